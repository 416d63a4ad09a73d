//! Index/phase state machine for the looping carousel
//!
//! `active_index` addresses the tripled sequence (`0..3N`). At rest it sits
//! in the middle third, `N <= active_index < 2N`. A step may carry it one
//! position into an outer third; [`CarouselState::settle`] folds it back by
//! `N` once the slide animation has finished.

use crate::error::CarouselError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    /// A slide is animating; navigation requests are dropped until settle.
    Transitioning,
}

/// Result of a navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// A transition began; the caller must schedule exactly one settle.
    Started { from: usize, to: usize },
    /// A transition was already in flight; the request was dropped.
    Debounced,
    /// No items, nothing to navigate.
    Empty,
}

impl Navigation {
    pub fn started(self) -> bool {
        matches!(self, Navigation::Started { .. })
    }
}

/// Result of an edge-correction pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settle {
    /// Nothing was in flight. Duplicate or late settles land here.
    AlreadyIdle,
    Settled {
        active_index: usize,
        /// Pre-fold index when the transition ended in an outer third.
        folded_from: Option<usize>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarouselState {
    len: usize,
    active_index: usize,
    phase: Phase,
}

impl CarouselState {
    /// Fresh state at the first item of the middle copy.
    pub fn new(len: usize) -> Self {
        Self {
            len,
            active_index: len,
            phase: Phase::Idle,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn in_transition(&self) -> bool {
        self.phase == Phase::Transitioning
    }

    /// Logical `0..N` index of the centred item; `None` when empty.
    pub fn base_index(&self) -> Option<usize> {
        (self.len > 0).then(|| self.active_index % self.len)
    }

    pub fn advance(&mut self) -> Navigation {
        self.begin(|idx| idx + 1)
    }

    pub fn retreat(&mut self) -> Navigation {
        // At rest active_index >= N >= 1, so this never underflows.
        self.begin(|idx| idx.saturating_sub(1))
    }

    /// Jump straight to a logical index, landing in the middle third.
    ///
    /// Out-of-range indices are rejected before any state is touched, even
    /// while a transition is in flight.
    pub fn jump_to(&mut self, index: usize) -> Result<Navigation, CarouselError> {
        if self.len == 0 {
            return Ok(Navigation::Empty);
        }
        if index >= self.len {
            return Err(CarouselError::IndexOutOfRange {
                index,
                len: self.len,
            });
        }
        let len = self.len;
        Ok(self.begin(|_| len + index))
    }

    /// Edge correction, run once the slide animation has elapsed.
    pub fn settle(&mut self) -> Settle {
        if self.phase == Phase::Idle {
            return Settle::AlreadyIdle;
        }
        self.phase = Phase::Idle;

        let before = self.active_index;
        if self.len > 0 {
            if self.active_index >= 2 * self.len {
                self.active_index -= self.len;
            } else if self.active_index < self.len {
                self.active_index += self.len;
            }
        }

        Settle::Settled {
            active_index: self.active_index,
            folded_from: (before != self.active_index).then_some(before),
        }
    }

    /// Re-anchor for a new item count, keeping the centred logical index
    /// when it still exists. Any in-flight transition is dropped.
    pub fn resize(&mut self, len: usize) {
        let base = self.base_index().unwrap_or(0);
        let base = if base < len { base } else { 0 };
        self.len = len;
        self.active_index = len + base;
        self.phase = Phase::Idle;
    }

    fn begin(&mut self, step: impl FnOnce(usize) -> usize) -> Navigation {
        if self.len == 0 {
            return Navigation::Empty;
        }
        if self.phase == Phase::Transitioning {
            return Navigation::Debounced;
        }
        let from = self.active_index;
        let to = step(from);
        self.phase = Phase::Transitioning;
        self.active_index = to;
        Navigation::Started { from, to }
    }
}
