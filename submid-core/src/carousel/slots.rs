//! Per-position slot classification shared by rendering and selection.

use submid_model::PromoItem;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Before,
    After,
}

/// Visual role of one position of the tripled sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// The focused slide: full scale, interactive, selectable.
    Center,
    /// Immediate neighbour, drawn dimmed and non-interactive.
    Adjacent(Side),
    /// Off-stage; laid out but not visible.
    Hidden,
}

impl Slot {
    /// Classify a slot by its distance from the active index.
    pub fn from_offset(offset: isize) -> Self {
        match offset {
            0 => Slot::Center,
            -1 => Slot::Adjacent(Side::Before),
            1 => Slot::Adjacent(Side::After),
            _ => Slot::Hidden,
        }
    }

    pub fn is_center(self) -> bool {
        self == Slot::Center
    }

    pub fn is_visible(self) -> bool {
        self != Slot::Hidden
    }

    /// Only the centred slide takes pointer input.
    pub fn is_interactive(self) -> bool {
        self.is_center()
    }
}

/// Everything the renderer needs for one position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderSlot<'a> {
    pub extended_index: usize,
    pub item: &'a PromoItem,
    pub slot: Slot,
    /// Signed distance from the active index. Multiply by the layout
    /// spacing to get the horizontal translate.
    pub offset: isize,
}

/// Classify every position for the given active index.
pub(crate) fn classify(active_index: usize, extended_len: usize) -> Vec<Slot> {
    (0..extended_len)
        .map(|idx| Slot::from_offset(offset_of(idx, active_index)))
        .collect()
}

pub(crate) fn offset_of(extended_index: usize, active_index: usize) -> isize {
    extended_index as isize - active_index as isize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_neighbours_around_active() {
        let slots = classify(4, 9);
        assert_eq!(slots.len(), 9);
        assert_eq!(slots[4], Slot::Center);
        assert_eq!(slots[3], Slot::Adjacent(Side::Before));
        assert_eq!(slots[5], Slot::Adjacent(Side::After));
        let visible = slots.iter().filter(|s| s.is_visible()).count();
        assert_eq!(visible, 3);
    }

    #[test]
    fn only_center_is_interactive() {
        assert!(Slot::Center.is_interactive());
        assert!(!Slot::Adjacent(Side::After).is_interactive());
        assert!(!Slot::Hidden.is_interactive());
    }
}
