// src/config.rs

use anyhow::{bail, Context, Result};
use std::{env, path::PathBuf, time::Duration};
use url::Url;

/// The results page we poll.
pub const DEFAULT_URL: &str = "https://results.eci.gov.in/PcResultGenJune2024/index.htm";
pub const DEFAULT_POLL_SECS: u64 = 5;
pub const DEFAULT_DUMP_PATH: &str = "main.html";
pub const DEFAULT_LOG_PATH: &str = "results-watch.log";

/// Redraws per second of the live display.
pub const REFRESH_PER_SECOND: u32 = 5;

#[derive(Debug, Clone)]
pub struct Config {
    pub url: Url,
    pub poll_interval: Duration,
    /// Where the raw body of every fetch is written. `None` disables the dump.
    pub dump_path: Option<PathBuf>,
    pub log_path: PathBuf,
}

impl Config {
    /// Hardcoded defaults, each overridable by one environment variable.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let raw_url = lookup("RESULTS_URL").unwrap_or_else(|| DEFAULT_URL.to_string());
        let url = Url::parse(&raw_url).with_context(|| format!("invalid RESULTS_URL {raw_url:?}"))?;

        let poll_secs = match lookup("POLL_INTERVAL_SECS") {
            Some(v) => v
                .trim()
                .parse::<u64>()
                .with_context(|| format!("invalid POLL_INTERVAL_SECS {v:?}"))?,
            None => DEFAULT_POLL_SECS,
        };
        if poll_secs == 0 {
            bail!("POLL_INTERVAL_SECS must be positive");
        }

        let dump_path = match lookup("RESULTS_DUMP") {
            Some(v) if v.is_empty() => None,
            Some(v) => Some(PathBuf::from(v)),
            None => Some(PathBuf::from(DEFAULT_DUMP_PATH)),
        };

        let log_path = lookup("RESULTS_LOG")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_PATH));

        Ok(Self {
            url,
            poll_interval: Duration::from_secs(poll_secs),
            dump_path,
            log_path,
        })
    }

    pub fn refresh_period(&self) -> Duration {
        Duration::from_millis(1000 / REFRESH_PER_SECOND as u64)
    }
}
