//! Core data model definitions shared across SUBMID crates.
#![allow(missing_docs)]

pub use ::chrono;

pub mod display;
pub mod error;
pub mod ids;
pub mod image;
pub mod promo;

// Intentionally curated re-exports for downstream consumers.
pub use display::{format_date, month_name_id};
pub use error::{ModelError, Result as ModelResult};
pub use ids::PromoId;
pub use image::{ImageKind, NO_IMAGE_PLACEHOLDER, resolve_image_url};
#[cfg(feature = "serde")]
pub use promo::load_promos_json;
pub use promo::{PromoItem, active_promos};
