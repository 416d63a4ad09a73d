use once_cell::sync::Lazy;
use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
    time::Duration,
};
use thiserror::Error;
use tracing::debug;

use crate::{
    models::{
        AutoAdvancePolicy, AutoAdvanceSettings, CarouselSettings, Config,
        ConfigMetadata, SlotLayout,
    },
    sources::{
        ENV_AUTO_ADVANCE, ENV_AUTO_ADVANCE_INTERVAL, ENV_AUTO_ADVANCE_POLICY,
        ENV_SWIPE_THRESHOLD, ENV_TRANSITION, EnvConfig, FileConfig,
    },
    validation::{self, ConfigGuardRailError, ConfigWarnings},
};

static DEFAULT_CONFIG_LOCATIONS: Lazy<Vec<PathBuf>> = Lazy::new(|| {
    vec![
        PathBuf::from("submid.toml"),
        PathBuf::from("config/submid.toml"),
    ]
});

#[derive(Debug, Default, Clone)]
pub struct ConfigLoaderOptions {
    pub config_path: Option<PathBuf>,
    pub env_file: Option<PathBuf>,
    /// Use these overrides instead of reading the process environment.
    pub env: Option<EnvConfig>,
    /// Candidate paths tried when nothing names a config file explicitly.
    pub search_paths: Option<Vec<PathBuf>>,
}

#[derive(Debug, Default)]
pub struct ConfigLoader {
    options: ConfigLoaderOptions,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ConfigLoaderOptions) -> Self {
        Self { options }
    }

    pub fn with_config_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.config_path = Some(path.into());
        self
    }

    pub fn with_env_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.env_file = Some(path.into());
        self
    }

    pub fn with_env(mut self, env: EnvConfig) -> Self {
        self.options.env = Some(env);
        self
    }

    pub fn with_search_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.options.search_paths = Some(paths);
        self
    }

    pub fn load(&self) -> Result<ConfigLoad, ConfigLoadError> {
        let env_file_loaded = match &self.options.env_file {
            Some(path) => dotenvy::from_path(path).map(|_| true).or_else(
                |err| match err {
                    dotenvy::Error::Io(_) => Ok(false),
                    _ => Err(err),
                },
            )?,
            None => {
                dotenvy::dotenv().map(|_| true).or_else(|err| match err {
                    dotenvy::Error::Io(_) => Ok(false),
                    _ => Err(err),
                })?
            }
        };

        let env_config = match &self.options.env {
            Some(env) => env.clone(),
            None => EnvConfig::gather(),
        };

        let (file_config, config_path) = self.load_file_config(&env_config)?;

        let mut warnings = ConfigWarnings::default();
        if config_path.is_none() {
            warnings.push_with_hint(
                "No submid.toml detected; using built-in carousel defaults",
                "Create submid.toml with a [carousel] table to tune timings",
            );
        }

        let carousel = compose_settings(file_config.unwrap_or_default(), &env_config)?;
        warnings.extend(validation::apply_guard_rails(&carousel)?);

        debug!(
            transition_ms = carousel.transition.as_millis() as u64,
            auto_advance = carousel.auto_advance.enabled,
            interval_ms = carousel.auto_advance.interval.as_millis() as u64,
            policy = %carousel.auto_advance.policy,
            "carousel configuration resolved"
        );

        Ok(ConfigLoad {
            config: Config {
                carousel,
                metadata: ConfigMetadata {
                    config_path,
                    env_file_loaded,
                },
            },
            warnings,
        })
    }

    fn load_file_config(
        &self,
        env_config: &EnvConfig,
    ) -> Result<(Option<FileConfig>, Option<PathBuf>), ConfigLoadError> {
        let mut source = ConfigPathSource::default();

        if let Some(explicit) = &self.options.config_path {
            source.explicit = Some(explicit.clone());
        } else if let Some(from_env) = &env_config.config_path {
            source.env = Some(from_env.clone());
        }

        if source.is_empty() {
            let candidates = self
                .options
                .search_paths
                .as_deref()
                .unwrap_or(DEFAULT_CONFIG_LOCATIONS.as_slice());
            source.default =
                candidates.iter().find(|candidate| candidate.exists()).cloned();
        }

        let Some((path, provenance)) = source.resolved_path() else {
            return Ok((None, None));
        };

        if !path.exists() {
            if provenance.is_explicit() {
                return Err(ConfigLoadError::MissingConfig { path });
            }
            return Ok((None, None));
        }

        let file_config = read_file_config(&path)?;
        Ok((Some(file_config), Some(path)))
    }
}

fn read_file_config(path: &Path) -> Result<FileConfig, ConfigLoadError> {
    let contents =
        fs::read_to_string(path).map_err(|err| ConfigLoadError::Io {
            path: path.to_path_buf(),
            source: err,
        })?;
    toml::from_str(&contents).map_err(|err| ConfigLoadError::Parse {
        path: path.to_path_buf(),
        source: err,
    })
}

/// Merge file values and environment overrides over the defaults.
fn compose_settings(
    file: FileConfig,
    env: &EnvConfig,
) -> Result<CarouselSettings, ConfigLoadError> {
    let defaults = CarouselSettings::default();
    let file = file.carousel;

    let transition = match env.transition.as_deref() {
        Some(raw) => parse_duration(ENV_TRANSITION, raw)?,
        None => match file.transition.as_deref() {
            Some(raw) => parse_duration("carousel.transition", raw)?,
            None => defaults.transition,
        },
    };

    let enabled = match env.auto_advance.as_deref() {
        Some(raw) => parse_bool(ENV_AUTO_ADVANCE, raw)?,
        None => file
            .auto_advance
            .enabled
            .unwrap_or(defaults.auto_advance.enabled),
    };

    let interval = match env.auto_advance_interval.as_deref() {
        Some(raw) => parse_duration(ENV_AUTO_ADVANCE_INTERVAL, raw)?,
        None => match file.auto_advance.interval.as_deref() {
            Some(raw) => parse_duration("carousel.auto_advance.interval", raw)?,
            None => defaults.auto_advance.interval,
        },
    };

    let policy = match env.auto_advance_policy.as_deref() {
        Some(raw) => AutoAdvancePolicy::from_str(raw).map_err(|reason| {
            ConfigLoadError::InvalidValue {
                key: ENV_AUTO_ADVANCE_POLICY,
                value: raw.to_string(),
                reason,
            }
        })?,
        None => file
            .auto_advance
            .policy
            .unwrap_or(defaults.auto_advance.policy),
    };

    let swipe_threshold = match env.swipe_threshold.as_deref() {
        Some(raw) => raw.parse::<f32>().map_err(|err| {
            ConfigLoadError::InvalidValue {
                key: ENV_SWIPE_THRESHOLD,
                value: raw.to_string(),
                reason: err.to_string(),
            }
        })?,
        None => file.swipe_threshold.unwrap_or(defaults.swipe_threshold),
    };

    let layout = SlotLayout {
        breakpoint_px: file
            .layout
            .breakpoint_px
            .unwrap_or(defaults.layout.breakpoint_px),
        compact_spacing_pct: file
            .layout
            .compact_spacing_pct
            .unwrap_or(defaults.layout.compact_spacing_pct),
        wide_spacing_pct: file
            .layout
            .wide_spacing_pct
            .unwrap_or(defaults.layout.wide_spacing_pct),
    };

    Ok(CarouselSettings {
        transition,
        auto_advance: AutoAdvanceSettings {
            enabled,
            interval,
            policy,
        },
        swipe_threshold,
        layout,
    })
}

fn parse_duration(
    key: &'static str,
    raw: &str,
) -> Result<Duration, ConfigLoadError> {
    humantime::parse_duration(raw).map_err(|err| ConfigLoadError::InvalidValue {
        key,
        value: raw.to_string(),
        reason: err.to_string(),
    })
}

fn parse_bool(key: &'static str, raw: &str) -> Result<bool, ConfigLoadError> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigLoadError::InvalidValue {
            key,
            value: raw.to_string(),
            reason: "expected a boolean".to_string(),
        }),
    }
}

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("configuration file missing: {path}")]
    MissingConfig { path: PathBuf },
    #[error("failed to read configuration {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse configuration {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid value '{value}' for {key}: {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
    #[error(transparent)]
    GuardRail(#[from] ConfigGuardRailError),
    #[error(transparent)]
    EnvFile(#[from] dotenvy::Error),
}

#[derive(Debug, Default)]
struct ConfigPathSource {
    explicit: Option<PathBuf>,
    env: Option<PathBuf>,
    default: Option<PathBuf>,
}

impl ConfigPathSource {
    fn is_empty(&self) -> bool {
        self.explicit.is_none() && self.env.is_none() && self.default.is_none()
    }

    fn resolved_path(&self) -> Option<(PathBuf, ConfigPathProvenance)> {
        if let Some(path) = &self.explicit {
            return Some((path.clone(), ConfigPathProvenance::Explicit));
        }
        if let Some(path) = &self.env {
            return Some((path.clone(), ConfigPathProvenance::Env));
        }
        if let Some(path) = &self.default {
            return Some((path.clone(), ConfigPathProvenance::Default));
        }
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigPathProvenance {
    Explicit,
    Env,
    Default,
}

impl ConfigPathProvenance {
    fn is_explicit(self) -> bool {
        matches!(
            self,
            ConfigPathProvenance::Explicit | ConfigPathProvenance::Env
        )
    }
}

#[derive(Debug)]
pub struct ConfigLoad {
    pub config: Config,
    pub warnings: ConfigWarnings,
}
