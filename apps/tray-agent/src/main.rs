//! Sync daemon tray agent entry point.

mod app;
mod backend;
mod config;
mod dispatch;
mod emit;
mod logging;

fn main() -> anyhow::Result<()> {
    logging::init();

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "starting synctray agent"
    );

    let config = config::Config::load()?;
    tracing::info!(daemon_url = %config.daemon_url, "configuration loaded");

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(app::run(config))
}
