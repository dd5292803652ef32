//! SoundBot monitor — host entry point.
//!
//! Polls the SoundBot status endpoint and logs every display snapshot.
//!
//! ```text
//! soundbot-monitor [config.json]
//!
//!   RUST_LOG=debug              per-tick SSID and payload logging
//!   SOUNDBOT_ASSUME_SSID=<ssid> skip the host Wi-Fi query and report <ssid>
//! ```
#![deny(unused_must_use)]

use anyhow::{Context, Result};
use log::info;

use soundbot_link::adapters::http::BlockingHttpTransport;
use soundbot_link::adapters::log_sink::LogDisplaySink;
use soundbot_link::adapters::ssid::{CommandSsidSource, FixedSsidSource};
use soundbot_link::app::ports::{DisplaySink, HttpTransport, SsidSource};
use soundbot_link::config::PollConfig;
use soundbot_link::poller::PollingController;

fn load_config() -> Result<PollConfig> {
    match std::env::args().nth(1) {
        Some(path) => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("reading config file {path}"))?;
            PollConfig::from_json(&json).with_context(|| format!("loading config file {path}"))
        }
        None => Ok(PollConfig::default()),
    }
}

/// Drive the controller until the process is killed.
fn run<S, T, D>(config: &PollConfig, ssid: S, transport: T, sink: D) -> Result<()>
where
    S: SsidSource,
    T: HttpTransport,
    D: DisplaySink,
{
    let executor: edge_executor::LocalExecutor<'_, 8> = edge_executor::LocalExecutor::new();
    let mut controller = PollingController::new(config, ssid, transport, sink)?;
    controller.start(&executor);

    // The async-io-mini reactor thread services the timers; block_on
    // drives the executor, which drives the poll task.
    futures_lite::future::block_on(executor.run(core::future::pending::<()>()));
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("SoundBot monitor v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config()?;
    let transport = BlockingHttpTransport::new(std::time::Duration::from_millis(u64::from(
        config.request_timeout_ms,
    )))
    .context("building HTTP client")?;
    let sink = LogDisplaySink::new();

    match std::env::var("SOUNDBOT_ASSUME_SSID") {
        Ok(ssid) => {
            info!("Assuming association with {}", ssid);
            run(&config, FixedSsidSource::associated(&ssid), transport, sink)
        }
        Err(_) => run(&config, CommandSsidSource::iwgetid(), transport, sink),
    }
}
