//! Scripted input for headless carousel runs.
//!
//! A script is a comma-separated list of steps:
//! `next`, `prev`, `jump:<index>`, `swipe:<start_x>:<end_x>`,
//! `select[:<extended_index>]`, `close`, `wait:<duration>`.

use std::{str::FromStr, time::Duration};

use submid_core::{CarouselRemote, DriverError};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScriptError {
    #[error("unknown script step '{0}'")]
    UnknownStep(String),
    #[error("step '{step}' has a malformed argument: {reason}")]
    BadArgument { step: String, reason: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScriptStep {
    Next,
    Prev,
    Jump(usize),
    Swipe { start_x: f32, end_x: f32 },
    /// Open the detail overlay; `None` targets the centred slide.
    Select(Option<usize>),
    Close,
    Wait(Duration),
}

impl FromStr for ScriptStep {
    type Err = ScriptError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let raw = raw.trim();
        let mut parts = raw.split(':');
        let name = parts.next().unwrap_or_default().to_ascii_lowercase();
        let args: Vec<&str> = parts.collect();

        let bad = |reason: String| ScriptError::BadArgument {
            step: raw.to_string(),
            reason,
        };
        let arity = |expected: usize| {
            if args.len() == expected {
                Ok(())
            } else {
                Err(bad(format!(
                    "expected {expected} argument(s), got {}",
                    args.len()
                )))
            }
        };

        match name.as_str() {
            "next" => arity(0).map(|_| ScriptStep::Next),
            "prev" => arity(0).map(|_| ScriptStep::Prev),
            "close" => arity(0).map(|_| ScriptStep::Close),
            "jump" => {
                arity(1)?;
                args[0]
                    .parse()
                    .map(ScriptStep::Jump)
                    .map_err(|err: std::num::ParseIntError| bad(err.to_string()))
            }
            "swipe" => {
                arity(2)?;
                let parse = |value: &str| {
                    value
                        .parse::<f32>()
                        .map_err(|err| bad(err.to_string()))
                };
                Ok(ScriptStep::Swipe {
                    start_x: parse(args[0])?,
                    end_x: parse(args[1])?,
                })
            }
            "select" => match args.as_slice() {
                [] => Ok(ScriptStep::Select(None)),
                [index] => index
                    .parse()
                    .map(|idx| ScriptStep::Select(Some(idx)))
                    .map_err(|err: std::num::ParseIntError| bad(err.to_string())),
                _ => Err(bad("expected at most 1 argument".to_string())),
            },
            "wait" => {
                arity(1)?;
                humantime::parse_duration(args[0])
                    .map(ScriptStep::Wait)
                    .map_err(|err| bad(err.to_string()))
            }
            _ => Err(ScriptError::UnknownStep(raw.to_string())),
        }
    }
}

/// Parse a comma-separated script. Empty entries are skipped.
pub fn parse_script(raw: &str) -> Result<Vec<ScriptStep>, ScriptError> {
    raw.split(',')
        .map(str::trim)
        .filter(|step| !step.is_empty())
        .map(ScriptStep::from_str)
        .collect()
}

impl ScriptStep {
    /// Feed this step to a mounted carousel.
    pub async fn apply(&self, remote: &CarouselRemote) -> Result<(), DriverError> {
        match self {
            ScriptStep::Next => remote.advance().await,
            ScriptStep::Prev => remote.retreat().await,
            ScriptStep::Jump(index) => remote.jump_to(*index).await,
            ScriptStep::Swipe { start_x, end_x } => {
                remote.gesture_start(*start_x).await?;
                remote.gesture_move(*end_x).await?;
                remote.gesture_end().await
            }
            ScriptStep::Select(Some(index)) => remote.select(*index).await,
            ScriptStep::Select(None) => {
                let active = remote.snapshot().active_index;
                remote.select(active).await
            }
            ScriptStep::Close => remote.close_detail().await,
            ScriptStep::Wait(duration) => {
                tokio::time::sleep(*duration).await;
                Ok(())
            }
        }
    }
}
