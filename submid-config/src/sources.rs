use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::models::AutoAdvancePolicy;

/// Raw configuration as defined in a TOML file.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub carousel: FileCarouselConfig,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FileCarouselConfig {
    /// Humantime duration, e.g. `"700ms"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub swipe_threshold: Option<f32>,
    #[serde(default)]
    pub auto_advance: FileAutoAdvanceConfig,
    #[serde(default)]
    pub layout: FileLayoutConfig,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FileAutoAdvanceConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    /// Humantime duration, e.g. `"6s"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub policy: Option<AutoAdvancePolicy>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FileLayoutConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breakpoint_px: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compact_spacing_pct: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wide_spacing_pct: Option<f32>,
}

pub const ENV_CONFIG_PATH: &str = "SUBMID_CONFIG_PATH";
pub const ENV_TRANSITION: &str = "SUBMID_CAROUSEL_TRANSITION";
pub const ENV_AUTO_ADVANCE: &str = "SUBMID_AUTO_ADVANCE";
pub const ENV_AUTO_ADVANCE_INTERVAL: &str = "SUBMID_AUTO_ADVANCE_INTERVAL";
pub const ENV_AUTO_ADVANCE_POLICY: &str = "SUBMID_AUTO_ADVANCE_POLICY";
pub const ENV_SWIPE_THRESHOLD: &str = "SUBMID_SWIPE_THRESHOLD";

/// Raw overrides read from the process environment.
///
/// Values stay as strings here; the loader parses them so that a malformed
/// override is reported instead of silently ignored.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EnvConfig {
    pub config_path: Option<PathBuf>,
    pub transition: Option<String>,
    pub auto_advance: Option<String>,
    pub auto_advance_interval: Option<String>,
    pub auto_advance_policy: Option<String>,
    pub swipe_threshold: Option<String>,
}

impl EnvConfig {
    pub fn gather() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        Self {
            config_path: get(ENV_CONFIG_PATH).map(PathBuf::from),
            transition: get(ENV_TRANSITION),
            auto_advance: get(ENV_AUTO_ADVANCE),
            auto_advance_interval: get(ENV_AUTO_ADVANCE_INTERVAL),
            auto_advance_policy: get(ENV_AUTO_ADVANCE_POLICY),
            swipe_threshold: get(ENV_SWIPE_THRESHOLD),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn blank_env_values_are_unset() {
        let vars: HashMap<&str, &str> = HashMap::from([
            (ENV_TRANSITION, "  "),
            (ENV_SWIPE_THRESHOLD, " 64 "),
        ]);
        let env = EnvConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(env.transition, None);
        assert_eq!(env.swipe_threshold.as_deref(), Some("64"));
    }

    #[test]
    fn file_config_parses_nested_tables() {
        let raw = r#"
            [carousel]
            transition = "500ms"
            swipe_threshold = 40.0

            [carousel.auto_advance]
            interval = "8s"
            policy = "restart-on-manual"
        "#;
        let cfg: FileConfig = toml::from_str(raw).expect("parse");
        assert_eq!(cfg.carousel.transition.as_deref(), Some("500ms"));
        assert_eq!(cfg.carousel.swipe_threshold, Some(40.0));
        assert_eq!(
            cfg.carousel.auto_advance.policy,
            Some(AutoAdvancePolicy::RestartOnManual)
        );
        assert_eq!(cfg.carousel.layout.breakpoint_px, None);
    }
}
