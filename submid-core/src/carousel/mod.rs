//! Looping promo carousel
//!
//! Leaf-first: [`extended`] owns the item list and its tripled view,
//! [`state`] is the index/phase state machine, [`slots`] classifies every
//! rendered position once per state change, [`selection`] and [`gesture`]
//! hold the detail overlay and in-flight swipe, [`controller`] composes them
//! and [`driver`] runs a controller against real timers.

pub mod controller;
pub mod driver;
pub mod extended;
pub mod gesture;
pub mod selection;
pub mod slots;
pub mod state;

pub use controller::{CarouselController, CarouselSnapshot};
pub use driver::{CarouselCommand, CarouselDriver, CarouselHandle, CarouselRemote};
pub use extended::ItemStore;
pub use gesture::{GestureTracker, Swipe};
pub use selection::{SelectOutcome, Selection};
pub use slots::{RenderSlot, Side, Slot};
pub use state::{CarouselState, Navigation, Phase, Settle};
