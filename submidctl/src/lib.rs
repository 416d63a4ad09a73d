//! Library side of `submidctl`: scripted carousel input and promo listings.

pub mod report;
pub mod script;

pub use report::{log_snapshots, promo_line, snapshot_line};
pub use script::{ScriptError, ScriptStep, parse_script};
