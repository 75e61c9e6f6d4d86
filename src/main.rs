//! Timetable Portal
//!
//! Serves the portal (server build) or boots it in the browser (web build).

use timetable_portal::app::App;

#[cfg(feature = "server")]
fn main() -> anyhow::Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let config = timetable_portal::config::load_config()?;

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Timetable Portal v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(?config, "Configuration loaded");

    // The fullstack launcher binds to IP/PORT unless the dx CLI already set them
    if std::env::var_os("IP").is_none() {
        std::env::set_var("IP", &config.ip);
    }
    if std::env::var_os("PORT").is_none() {
        std::env::set_var("PORT", config.port.to_string());
    }

    dioxus::launch(App);
    Ok(())
}

#[cfg(not(feature = "server"))]
fn main() {
    dioxus::launch(App);
}
