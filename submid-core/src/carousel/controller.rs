//! Synchronous carousel controller
//!
//! Composes the item store, the index state machine, slot classification,
//! the detail overlay and the gesture tracker. The controller never looks
//! at a clock: whoever owns it calls [`CarouselController::settle`] once the
//! slide animation time has elapsed after a [`Navigation::Started`].

use std::sync::Arc;

use submid_config::CarouselSettings;
use submid_model::PromoItem;
use tracing::{debug, trace};

use super::extended::ItemStore;
use super::gesture::{GestureTracker, Swipe};
use super::selection::{SelectOutcome, Selection};
use super::slots::{self, RenderSlot, Slot};
use super::state::{CarouselState, Navigation, Settle};
use crate::error::CarouselError;

/// Render-facing view of the carousel after a state change.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CarouselSnapshot {
    pub item_count: usize,
    pub active_index: usize,
    /// Logical index for pagination dots; `None` when there are no items.
    pub base_index: Option<usize>,
    /// Enables the slide animation in the renderer.
    pub in_transition: bool,
    pub selected: Option<PromoItem>,
    /// Host page should block body scrolling.
    pub scroll_locked: bool,
}

impl CarouselSnapshot {
    pub fn is_empty(&self) -> bool {
        self.item_count == 0
    }
}

#[derive(Debug, Clone)]
pub struct CarouselController {
    store: ItemStore,
    state: CarouselState,
    slots: Vec<Slot>,
    selection: Selection,
    gesture: GestureTracker,
}

impl CarouselController {
    pub fn new(items: impl Into<Arc<[PromoItem]>>, swipe_threshold: f32) -> Self {
        let store = ItemStore::new(items);
        let state = CarouselState::new(store.len());
        let slots = slots::classify(state.active_index(), store.extended_len());
        Self {
            store,
            state,
            slots,
            selection: Selection::new(),
            gesture: GestureTracker::new(swipe_threshold),
        }
    }

    pub fn with_settings(
        items: impl Into<Arc<[PromoItem]>>,
        settings: &CarouselSettings,
    ) -> Self {
        Self::new(items, settings.swipe_threshold)
    }

    pub fn store(&self) -> &ItemStore {
        &self.store
    }

    pub fn state(&self) -> &CarouselState {
        &self.state
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn active_index(&self) -> usize {
        self.state.active_index()
    }

    pub fn base_index(&self) -> Option<usize> {
        self.state.base_index()
    }

    pub fn in_transition(&self) -> bool {
        self.state.in_transition()
    }

    /// Promo currently centred, if any.
    pub fn current(&self) -> Option<&PromoItem> {
        self.store.get(self.state.active_index())
    }

    pub fn selected(&self) -> Option<&PromoItem> {
        self.selection.selected()
    }

    pub fn scroll_locked(&self) -> bool {
        self.selection.scroll_locked()
    }

    pub fn advance(&mut self) -> Navigation {
        let nav = self.state.advance();
        self.after_navigation("advance", nav);
        nav
    }

    pub fn retreat(&mut self) -> Navigation {
        let nav = self.state.retreat();
        self.after_navigation("retreat", nav);
        nav
    }

    /// Pagination-dot jump to logical `index`.
    pub fn jump_to(&mut self, index: usize) -> Result<Navigation, CarouselError> {
        let nav = self.state.jump_to(index)?;
        self.after_navigation("jump", nav);
        Ok(nav)
    }

    /// Finish the current transition, folding the index back into the middle
    /// copy when it ran past an edge. A no-op while idle.
    pub fn settle(&mut self) -> Settle {
        let outcome = self.state.settle();
        match outcome {
            Settle::AlreadyIdle => {
                trace!("settle ignored, carousel already idle");
            }
            Settle::Settled {
                active_index,
                folded_from: Some(from),
            } => {
                debug!(from, to = active_index, "carousel folded into middle copy");
                self.refresh_slots();
            }
            Settle::Settled { active_index, .. } => {
                trace!(active_index, "carousel settled");
            }
        }
        outcome
    }

    pub fn gesture_start(&mut self, x: f32) {
        self.gesture.begin(x);
    }

    pub fn gesture_move(&mut self, x: f32) {
        self.gesture.moved(x);
    }

    /// Complete the gesture and navigate when it was a swipe.
    pub fn gesture_end(&mut self) -> Option<(Swipe, Navigation)> {
        let swipe = self.gesture.end()?;
        let nav = match swipe {
            Swipe::Forward => self.advance(),
            Swipe::Backward => self.retreat(),
        };
        Some((swipe, nav))
    }

    /// Slot classification of one position of the tripled sequence.
    pub fn slot(&self, extended_index: usize) -> Option<Slot> {
        self.slots.get(extended_index).copied()
    }

    /// Every position of the tripled sequence with its classification.
    pub fn slots(&self) -> impl Iterator<Item = RenderSlot<'_>> + '_ {
        let active = self.state.active_index();
        self.store
            .extended()
            .iter()
            .zip(self.slots.iter())
            .enumerate()
            .map(move |(extended_index, (item, slot))| RenderSlot {
                extended_index,
                item,
                slot: *slot,
                offset: slots::offset_of(extended_index, active),
            })
    }

    pub fn visible_slots(&self) -> impl Iterator<Item = RenderSlot<'_>> + '_ {
        self.slots().filter(|slot| slot.slot.is_visible())
    }

    /// Open the detail overlay for the slide at `extended_index`.
    pub fn select(&mut self, extended_index: usize) -> SelectOutcome {
        let slot = self.slot(extended_index).unwrap_or(Slot::Hidden);
        let outcome = self.selection.open(self.store.get(extended_index), slot);
        match &outcome {
            SelectOutcome::Opened => {
                debug!(extended_index, "promo detail opened");
            }
            rejected => {
                trace!(extended_index, ?rejected, "promo selection rejected");
            }
        }
        outcome
    }

    pub fn select_center(&mut self) -> SelectOutcome {
        self.select(self.state.active_index())
    }

    pub fn close_detail(&mut self) -> bool {
        let closed = self.selection.close();
        if closed {
            debug!("promo detail closed");
        }
        closed
    }

    /// Swap in a reloaded promo list. Returns whether anything changed.
    pub fn replace_items(&mut self, items: impl Into<Arc<[PromoItem]>>) -> bool {
        if !self.store.replace(items) {
            return false;
        }
        self.state.resize(self.store.len());
        let items = Arc::clone(self.store.items());
        self.selection
            .retain(|selected| items.iter().any(|item| item.id == selected.id));
        self.gesture.cancel();
        self.refresh_slots();
        debug!(count = self.store.len(), "carousel items replaced");
        true
    }

    pub fn snapshot(&self) -> CarouselSnapshot {
        CarouselSnapshot {
            item_count: self.store.len(),
            active_index: self.state.active_index(),
            base_index: self.state.base_index(),
            in_transition: self.state.in_transition(),
            selected: self.selection.selected().cloned(),
            scroll_locked: self.selection.scroll_locked(),
        }
    }

    fn after_navigation(&mut self, action: &'static str, nav: Navigation) {
        match nav {
            Navigation::Started { from, to } => {
                debug!(action, from, to, "carousel transition started");
                self.refresh_slots();
            }
            Navigation::Debounced => {
                trace!(action, "navigation dropped during transition");
            }
            Navigation::Empty => {
                trace!(action, "navigation ignored, no promos");
            }
        }
    }

    fn refresh_slots(&mut self) {
        self.slots =
            slots::classify(self.state.active_index(), self.store.extended_len());
    }
}
