//! Detail overlay state
//!
//! Independent of navigation: opening a promo neither pauses nor moves the
//! carousel.

use submid_model::PromoItem;

use super::slots::Slot;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectOutcome {
    Opened,
    /// The requested slide is not centred; only the centre slide opens.
    NotCentered,
    /// No slide exists at that position.
    Missing,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    selected: Option<PromoItem>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<&PromoItem> {
        self.selected.as_ref()
    }

    /// Open `item` if its slot is the centre slot.
    pub fn open(&mut self, item: Option<&PromoItem>, slot: Slot) -> SelectOutcome {
        let Some(item) = item else {
            return SelectOutcome::Missing;
        };
        if !slot.is_center() {
            return SelectOutcome::NotCentered;
        }
        self.selected = Some(item.clone());
        SelectOutcome::Opened
    }

    /// Close button and backdrop dismissal both land here.
    pub fn close(&mut self) -> bool {
        self.selected.take().is_some()
    }

    /// The host page should block body scrolling while this is true.
    pub fn scroll_locked(&self) -> bool {
        self.selected.is_some()
    }

    /// Drop the selection when `keep` rejects it (e.g. after a list reload).
    pub(crate) fn retain(&mut self, keep: impl FnOnce(&PromoItem) -> bool) {
        if self.selected.as_ref().is_some_and(|item| !keep(item)) {
            self.selected = None;
        }
    }
}
