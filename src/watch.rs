// src/watch.rs

use crate::{
    config::Config,
    extract::extract_snapshot,
    fetch::Fetcher,
    render::{LiveDisplay, ResultsTable},
};
use anyhow::Result;
use chrono::Local;
use ratatui::backend::Backend;
use reqwest::Client;
use std::{fmt, future::Future};
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{error, info};

/// Why the loop stopped. Stopping is final.
#[derive(Debug)]
pub enum Outcome {
    Interrupted,
    Failed(anyhow::Error),
}

/// The farewell line printed once the terminal is released.
impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Interrupted => write!(f, "Exiting ..."),
            Outcome::Failed(e) => write!(f, "Got Error - {:#}", e),
        }
    }
}

/// One fetch → extract → build pass.
pub async fn refresh(fetcher: &Fetcher) -> Result<ResultsTable> {
    let body = fetcher.fetch().await?;
    let snapshot = extract_snapshot(&body)?;
    ResultsTable::from_snapshot(&snapshot, Local::now())
}

/// Polls `config.url` and keeps `display` current until `interrupt`
/// resolves or a cycle fails.
pub async fn watch<B, F>(config: &Config, display: &mut LiveDisplay<B>, interrupt: F) -> Outcome
where
    B: Backend,
    F: Future<Output = ()>,
{
    let fetcher = Fetcher::new(Client::new(), config.url.clone(), config.dump_path.clone());
    tokio::pin!(interrupt);

    let mut poll = time::interval(config.poll_interval);
    poll.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut redraw = time::interval(config.refresh_period());
    redraw.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut cycle: u64 = 0;
    loop {
        tokio::select! {
            biased;

            _ = &mut interrupt => {
                info!(cycle, "interrupted");
                return Outcome::Interrupted;
            }

            _ = poll.tick() => {
                cycle += 1;
                let start = Instant::now();
                let result = tokio::select! {
                    biased;
                    _ = &mut interrupt => {
                        info!(cycle, "interrupted during fetch");
                        return Outcome::Interrupted;
                    }
                    r = refresh(&fetcher) => r,
                };

                let shown = result.and_then(|table| {
                    let rows = table.rows.len();
                    display.update(table);
                    display.draw().map(|_| rows)
                });
                match shown {
                    Ok(rows) => info!(cycle, rows, elapsed = ?start.elapsed(), "display updated"),
                    Err(e) => {
                        error!(cycle, "cycle failed: {:#}", e);
                        return Outcome::Failed(e);
                    }
                }
            }

            _ = redraw.tick() => {
                if let Err(e) = display.draw() {
                    error!("redraw failed: {:#}", e);
                    return Outcome::Failed(e);
                }
            }
        }
    }
}
