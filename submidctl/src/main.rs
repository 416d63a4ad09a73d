use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use submid_config::{ConfigLoad, ConfigLoader};
use submid_core::CarouselDriver;
use submid_model::{PromoItem, active_promos, load_promos_json};
use submidctl::{log_snapshots, parse_script, promo_line, snapshot_line};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "submidctl", about = "SUBMID promo carousel inspector")]
struct Cli {
    /// Explicit carousel config file (otherwise submid.toml is searched for)
    #[arg(long, global = true, env = "SUBMID_CONFIG_PATH")]
    config: Option<PathBuf>,
    /// Env file loaded before reading SUBMID_* variables
    #[arg(long, global = true, default_value = ".env")]
    env_file: PathBuf,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show the effective carousel settings and any config warnings
    Config,
    /// List the promos that are running, newest first
    Promos {
        /// JSON array as served by the promo listing endpoint
        #[arg(long)]
        file: PathBuf,
        /// Evaluate the active window at this RFC 3339 instant instead of now
        #[arg(long)]
        at: Option<String>,
        /// Include promos outside their active window
        #[arg(long)]
        all: bool,
    },
    /// Mount the carousel headlessly and log every state change
    Run {
        #[arg(long)]
        file: PathBuf,
        #[arg(long)]
        at: Option<String>,
        /// Steps such as "next,prev,jump:2,swipe:200:140,select,close,wait:2s"
        #[arg(long, default_value = "")]
        script: String,
        /// Pause between scripted steps
        #[arg(long, default_value = "1s", value_parser = humantime::parse_duration)]
        step_delay: Duration,
        /// How long to keep the carousel mounted after the script finishes
        #[arg(long, default_value = "15s", value_parser = humantime::parse_duration)]
        linger: Duration,
        /// Disable auto-advance for this run
        #[arg(long)]
        no_auto: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Config => {
            let load = load_config(cli.config, cli.env_file)?;
            print_config(&load);
        }
        Command::Promos { file, at, all } => {
            let now = parse_instant(at.as_deref())?;
            let promos = read_promos(&file, now, all)?;
            if promos.is_empty() {
                println!("no active promos");
            }
            for promo in &promos {
                println!("{}", promo_line(promo, now));
            }
        }
        Command::Run {
            file,
            at,
            script,
            step_delay,
            linger,
            no_auto,
        } => {
            let steps = parse_script(&script)?;
            let load = load_config(cli.config, cli.env_file)?;
            let now = parse_instant(at.as_deref())?;
            let promos = read_promos(&file, now, false)?;

            let mut settings = load.config.carousel;
            if no_auto {
                settings.auto_advance.enabled = false;
            }

            let handle = CarouselDriver::new(settings).mount(promos);
            let mut snapshots = handle.subscribe();
            info!("{}", snapshot_line(&snapshots.borrow_and_update()));
            let logger = tokio::spawn(log_snapshots(snapshots));

            let remote = handle.remote();
            for step in &steps {
                tokio::time::sleep(step_delay).await;
                if let Err(err) = step.apply(&remote).await {
                    warn!(?step, error = %err, "step rejected");
                }
            }
            tokio::time::sleep(linger).await;

            handle.unmount().await;
            // The watch sender went away with the task, so the logger ends.
            match logger.await {
                Ok(changes) => info!(changes, "carousel run finished"),
                Err(err) => warn!(error = %err, "snapshot logger failed"),
            }
        }
    }

    Ok(())
}

fn load_config(config: Option<PathBuf>, env_file: PathBuf) -> Result<ConfigLoad> {
    let mut loader = ConfigLoader::new().with_env_file(env_file);
    if let Some(path) = config {
        loader = loader.with_config_path(path);
    }
    let load = loader.load().context("failed to load carousel config")?;
    for warning in &load.warnings.items {
        match &warning.hint {
            Some(hint) => warn!(hint = %hint, "{}", warning.message),
            None => warn!("{}", warning.message),
        }
    }
    Ok(load)
}

fn print_config(load: &ConfigLoad) {
    let carousel = &load.config.carousel;
    let source = load
        .config
        .metadata
        .config_path
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "defaults".to_string());
    println!("source            : {source}");
    println!(
        "transition        : {}",
        humantime::format_duration(carousel.transition)
    );
    println!("auto-advance      : {}", carousel.auto_advance.enabled);
    println!(
        "  interval        : {}",
        humantime::format_duration(carousel.auto_advance.interval)
    );
    println!("  policy          : {}", carousel.auto_advance.policy);
    println!("swipe threshold   : {}px", carousel.swipe_threshold);
    println!(
        "layout            : {}% below {}px, {}% above",
        carousel.layout.compact_spacing_pct,
        carousel.layout.breakpoint_px,
        carousel.layout.wide_spacing_pct
    );
    for warning in &load.warnings.items {
        println!("warning           : {}", warning.message);
    }
}

fn parse_instant(raw: Option<&str>) -> Result<DateTime<Utc>> {
    match raw {
        None => Ok(Utc::now()),
        Some(raw) => Ok(DateTime::parse_from_rfc3339(raw)
            .with_context(|| format!("invalid --at instant '{raw}'"))?
            .with_timezone(&Utc)),
    }
}

fn read_promos(path: &Path, now: DateTime<Utc>, all: bool) -> Result<Vec<PromoItem>> {
    let file = File::open(path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    let promos = load_promos_json(BufReader::new(file))
        .with_context(|| format!("failed to parse {}", path.display()))?;
    if all {
        return Ok(promos);
    }
    let active = active_promos(promos, now);
    if active.is_empty() {
        warn!(path = %path.display(), "no promo is running at {now}");
    }
    Ok(active)
}

