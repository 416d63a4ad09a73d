//! Configuration for the SUBMID promo carousel.
//!
//! Settings resolve in three layers: built-in defaults, an optional
//! `submid.toml`, then `SUBMID_*` environment variables (a `.env` file is
//! loaded first when present). Values that would make the carousel
//! misbehave are rejected; questionable but workable values surface as
//! [`ConfigWarnings`] for the caller to log.

pub mod loader;
pub mod models;
pub mod sources;
pub mod validation;

pub use loader::{ConfigLoad, ConfigLoadError, ConfigLoader, ConfigLoaderOptions};
pub use models::{
    AutoAdvancePolicy, AutoAdvanceSettings, CarouselSettings, Config,
    ConfigMetadata, SlotLayout,
};
pub use sources::{EnvConfig, FileConfig};
pub use validation::{ConfigGuardRailError, ConfigWarning, ConfigWarnings};
