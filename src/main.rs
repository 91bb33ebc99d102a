use anyhow::{Context, Result};
use results_watch::{
    config::Config,
    render::LiveDisplay,
    watch::watch,
};
use std::{fs::OpenOptions, sync::Mutex};
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // ─── 1) config & logging ─────────────────────────────────────────
    let config = Config::from_env()?;

    // stdout belongs to the live display, so logs go to a file
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_path)
        .with_context(|| format!("opening log file {:?}", config.log_path))?;
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .init();
    info!(url = %config.url, poll = ?config.poll_interval, "startup");

    std::panic::set_hook(Box::new(|info| {
        error!("panic: {}", info);
        eprintln!("panic: {}", info);
    }));

    // ─── 2) run until ctrl-c or the first failed cycle ───────────────
    let outcome = {
        let mut display = LiveDisplay::stdout()?;
        watch(&config, &mut display, async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!("cannot listen for ctrl-c: {}", e);
                std::future::pending::<()>().await;
            }
        })
        .await
    };

    // ─── 3) last table stays on screen; say goodbye ──────────────────
    println!("{}", outcome);
    info!("shutdown");
    Ok(())
}
