//! Item store and the tripled index space
//!
//! The carousel addresses items through an index in `0..3N`. Positions in
//! the first and last third exist only so a slide can animate past either
//! visual edge before the state machine folds back into the middle third.

use std::sync::Arc;

use submid_model::PromoItem;

/// Number of copies of the item list laid end to end.
pub const COPIES: usize = 3;

/// The finite promo list plus its materialised tripled view.
///
/// Promo counts are single digits, so the tripled view is stored rather
/// than derived per lookup. Duplicate ids are kept as-is.
#[derive(Debug, Clone, Default)]
pub struct ItemStore {
    items: Arc<[PromoItem]>,
    extended: Arc<[PromoItem]>,
}

impl ItemStore {
    pub fn new(items: impl Into<Arc<[PromoItem]>>) -> Self {
        let items = items.into();
        let extended = triple(&items);
        Self { items, extended }
    }

    /// Swap in a new list. Returns `true` when the tripled view was rebuilt,
    /// which happens only if the list identity or length changed.
    pub fn replace(&mut self, items: impl Into<Arc<[PromoItem]>>) -> bool {
        let items = items.into();
        if Arc::ptr_eq(&self.items, &items) && self.items.len() == items.len() {
            return false;
        }
        self.extended = triple(&items);
        self.items = items;
        true
    }

    /// `N`, the number of distinct slides.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Degenerate carousel: nothing to show, nothing to navigate.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &Arc<[PromoItem]> {
        &self.items
    }

    /// The tripled sequence, `3N` long.
    pub fn extended(&self) -> &[PromoItem] {
        &self.extended
    }

    pub fn extended_len(&self) -> usize {
        self.extended.len()
    }

    /// Item at a position of the tripled sequence.
    pub fn get(&self, extended_index: usize) -> Option<&PromoItem> {
        self.extended.get(extended_index)
    }

    /// Item for a logical `0..N` index.
    pub fn logical(&self, index: usize) -> Option<&PromoItem> {
        self.items.get(index)
    }
}

fn triple(items: &[PromoItem]) -> Arc<[PromoItem]> {
    let mut out = Vec::with_capacity(items.len() * COPIES);
    for _ in 0..COPIES {
        out.extend_from_slice(items);
    }
    out.into()
}
