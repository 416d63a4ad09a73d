use std::time::Duration;

use thiserror::Error;

use crate::models::{CarouselSettings, SlotLayout};

#[derive(Debug, Error, PartialEq)]
pub enum ConfigGuardRailError {
    #[error("carousel transition must be longer than zero")]
    ZeroTransition,
    #[error("auto-advance interval must be longer than zero")]
    ZeroInterval,
    #[error("swipe threshold must be a finite, non-negative number (got {0})")]
    InvalidSwipeThreshold(f32),
    #[error("layout value `{field}` must be finite and positive (got {value})")]
    InvalidLayout { field: &'static str, value: f32 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, Default, Clone)]
pub struct ConfigWarnings {
    pub items: Vec<ConfigWarning>,
}

impl ConfigWarnings {
    pub fn push<S: Into<String>>(&mut self, message: S) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: None,
        });
    }

    pub fn push_with_hint<S: Into<String>, H: Into<String>>(
        &mut self,
        message: S,
        hint: H,
    ) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: Some(hint.into()),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn extend(&mut self, other: ConfigWarnings) {
        self.items.extend(other.items);
    }
}

pub fn apply_guard_rails(
    settings: &CarouselSettings,
) -> Result<ConfigWarnings, ConfigGuardRailError> {
    let mut warnings = ConfigWarnings::default();

    if settings.transition == Duration::ZERO {
        return Err(ConfigGuardRailError::ZeroTransition);
    }

    let threshold = settings.swipe_threshold;
    if !threshold.is_finite() || threshold < 0.0 {
        return Err(ConfigGuardRailError::InvalidSwipeThreshold(threshold));
    }

    validate_layout(&settings.layout)?;

    let auto = &settings.auto_advance;
    if auto.enabled {
        if auto.interval == Duration::ZERO {
            return Err(ConfigGuardRailError::ZeroInterval);
        }
        if auto.interval <= settings.transition {
            warnings.push_with_hint(
                format!(
                    "auto-advance interval ({}) is not longer than the transition ({})",
                    humantime::format_duration(auto.interval),
                    humantime::format_duration(settings.transition),
                ),
                "ticks that land mid-transition are dropped; raise the interval",
            );
        }
    }

    Ok(warnings)
}

fn validate_layout(layout: &SlotLayout) -> Result<(), ConfigGuardRailError> {
    for (field, value) in [
        ("breakpoint_px", layout.breakpoint_px),
        ("compact_spacing_pct", layout.compact_spacing_pct),
        ("wide_spacing_pct", layout.wide_spacing_pct),
    ] {
        if !value.is_finite() || value <= 0.0 {
            return Err(ConfigGuardRailError::InvalidLayout { field, value });
        }
    }
    Ok(())
}
