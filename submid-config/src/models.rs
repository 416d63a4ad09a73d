use std::{fmt, path::PathBuf, str::FromStr, time::Duration};

use serde::{Deserialize, Serialize};

/// Length of the slide animation. The renderer animates with this duration
/// and the state machine folds the index once it elapses.
pub const DEFAULT_TRANSITION: Duration = Duration::from_millis(700);
pub const DEFAULT_AUTO_ADVANCE_INTERVAL: Duration = Duration::from_secs(6);
pub const DEFAULT_SWIPE_THRESHOLD: f32 = 50.0;
pub const DEFAULT_BREAKPOINT_PX: f32 = 768.0;
pub const DEFAULT_COMPACT_SPACING_PCT: f32 = 85.0;
pub const DEFAULT_WIDE_SPACING_PCT: f32 = 75.0;

/// Fully resolved configuration.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub carousel: CarouselSettings,
    pub metadata: ConfigMetadata,
}

/// Where the resolved configuration came from.
#[derive(Debug, Clone, Default)]
pub struct ConfigMetadata {
    pub config_path: Option<PathBuf>,
    pub env_file_loaded: bool,
}

/// Timing and input tuning for one carousel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarouselSettings {
    pub transition: Duration,
    pub auto_advance: AutoAdvanceSettings,
    /// Horizontal travel a swipe must exceed (strictly) to navigate.
    pub swipe_threshold: f32,
    pub layout: SlotLayout,
}

impl Default for CarouselSettings {
    fn default() -> Self {
        Self {
            transition: DEFAULT_TRANSITION,
            auto_advance: AutoAdvanceSettings::default(),
            swipe_threshold: DEFAULT_SWIPE_THRESHOLD,
            layout: SlotLayout::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoAdvanceSettings {
    pub enabled: bool,
    pub interval: Duration,
    pub policy: AutoAdvancePolicy,
}

impl Default for AutoAdvanceSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            interval: DEFAULT_AUTO_ADVANCE_INTERVAL,
            policy: AutoAdvancePolicy::default(),
        }
    }
}

/// How the auto-advance timer reacts to user-driven navigation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum AutoAdvancePolicy {
    /// The timer keeps its cadence regardless of manual moves, so a manual
    /// advance can be followed closely by an automatic one.
    #[default]
    Free,
    /// Manual navigation restarts the interval from zero.
    RestartOnManual,
}

impl AutoAdvancePolicy {
    pub const fn as_str(self) -> &'static str {
        match self {
            AutoAdvancePolicy::Free => "free",
            AutoAdvancePolicy::RestartOnManual => "restart-on-manual",
        }
    }
}

impl fmt::Display for AutoAdvancePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AutoAdvancePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "free" => Ok(AutoAdvancePolicy::Free),
            "restart-on-manual" | "restart" => {
                Ok(AutoAdvancePolicy::RestartOnManual)
            }
            other => Err(format!("unknown auto-advance policy '{other}'")),
        }
    }
}

/// Horizontal spacing between slides, as a percentage of slide width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotLayout {
    pub breakpoint_px: f32,
    pub compact_spacing_pct: f32,
    pub wide_spacing_pct: f32,
}

impl Default for SlotLayout {
    fn default() -> Self {
        Self {
            breakpoint_px: DEFAULT_BREAKPOINT_PX,
            compact_spacing_pct: DEFAULT_COMPACT_SPACING_PCT,
            wide_spacing_pct: DEFAULT_WIDE_SPACING_PCT,
        }
    }
}

impl SlotLayout {
    /// Spacing to use for a viewport of the given width.
    pub fn spacing_for(&self, viewport_width: f32) -> f32 {
        if viewport_width < self.breakpoint_px {
            self.compact_spacing_pct
        } else {
            self.wide_spacing_pct
        }
    }

    /// Translate percentage for a slot `offset` positions away from center.
    pub fn translate_pct(&self, offset: isize, viewport_width: f32) -> f32 {
        offset as f32 * self.spacing_for(viewport_width)
    }
}
