//! Swipe detection for a single in-flight touch or pointer gesture.

/// Navigation a completed swipe asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Swipe {
    /// Finger travelled left: show the next slide.
    Forward,
    /// Finger travelled right: show the previous slide.
    Backward,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureTracker {
    threshold: f32,
    start_x: Option<f32>,
    current_x: Option<f32>,
}

impl GestureTracker {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            start_x: None,
            current_x: None,
        }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn is_tracking(&self) -> bool {
        self.start_x.is_some()
    }

    pub fn begin(&mut self, x: f32) {
        self.start_x = Some(x);
        self.current_x = None;
    }

    pub fn moved(&mut self, x: f32) {
        self.current_x = Some(x);
    }

    /// Finish the gesture. Both samples are discarded either way.
    ///
    /// A gesture that never moved is a tap, not a swipe.
    pub fn end(&mut self) -> Option<Swipe> {
        let (start, current) = (self.start_x.take(), self.current_x.take());
        let distance = start? - current?;
        if distance > self.threshold {
            Some(Swipe::Forward)
        } else if distance < -self.threshold {
            Some(Swipe::Backward)
        } else {
            None
        }
    }

    pub fn cancel(&mut self) {
        self.start_x = None;
        self.current_x = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn swipe(start: f32, end: f32) -> Option<Swipe> {
        let mut tracker = GestureTracker::new(50.0);
        tracker.begin(start);
        tracker.moved(end);
        tracker.end()
    }

    #[test]
    fn threshold_is_strict() {
        assert_eq!(swipe(200.0, 140.0), Some(Swipe::Forward));
        assert_eq!(swipe(200.0, 160.0), None);
        assert_eq!(swipe(140.0, 200.0), Some(Swipe::Backward));
        assert_eq!(swipe(200.0, 150.0), None);
        assert_eq!(swipe(150.0, 200.0), None);
    }

    #[test]
    fn zero_coordinates_still_count() {
        assert_eq!(swipe(0.0, 80.0), Some(Swipe::Backward));
        assert_eq!(swipe(80.0, 0.0), Some(Swipe::Forward));
    }

    #[test]
    fn tap_without_move_is_ignored() {
        let mut tracker = GestureTracker::new(50.0);
        tracker.begin(200.0);
        assert_eq!(tracker.end(), None);
        assert!(!tracker.is_tracking());
    }

    #[test]
    fn begin_clears_stale_move() {
        let mut tracker = GestureTracker::new(50.0);
        tracker.begin(300.0);
        tracker.moved(100.0);
        tracker.begin(200.0);
        assert_eq!(tracker.end(), None);
    }

    #[test]
    fn samples_are_discarded_after_end() {
        let mut tracker = GestureTracker::new(50.0);
        tracker.begin(200.0);
        tracker.moved(100.0);
        assert_eq!(tracker.end(), Some(Swipe::Forward));
        assert_eq!(tracker.end(), None);
    }
}
