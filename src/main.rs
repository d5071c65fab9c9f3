use anyhow::Context;
use evergreen::{AppConfig, EvergreenApp};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Starting Evergreen");

    let config = AppConfig::load().unwrap_or_else(|e| {
        log::warn!("Failed to load config: {}. Using defaults.", e);
        AppConfig::default()
    });

    let app = EvergreenApp::new(config).context("failed to create the application")?;
    app.run().context("application exited with an error")
}
