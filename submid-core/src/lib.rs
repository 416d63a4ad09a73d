//! # SUBMID core
//!
//! The promo carousel behind the site's home and promo pages.
//!
//! A finite list of offers is presented as an endless loop: the list is
//! viewed three times over, the centred position always lives in the middle
//! copy, and once a slide animation finishes the index is silently folded
//! back into the middle copy. Because the item at the folded position is the
//! same offer, the viewer never sees a jump.
//!
//! The crate is split in two layers:
//!
//! - [`carousel::CarouselController`] is synchronous and owns every rule
//!   (debounce, fold-back, swipe threshold, center-only selection). Time is
//!   an input: the caller invokes `settle` when the animation has elapsed.
//! - [`carousel::driver`] runs a controller on a tokio task for the lifetime
//!   of a mounted carousel, wiring the auto-advance interval, the settle
//!   delay, and the input channel into a single event loop.

#![allow(missing_docs)]

pub mod carousel;
pub mod error;

pub use carousel::{
    CarouselController, CarouselDriver, CarouselHandle, CarouselRemote,
    CarouselSnapshot, Navigation, RenderSlot, SelectOutcome, Side, Slot, Swipe,
};
pub use error::{CarouselError, DriverError};
