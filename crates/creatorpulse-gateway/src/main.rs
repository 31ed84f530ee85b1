//! Gateway binary entry point

use anyhow::Context as _;
use tracing::info;

use creatorpulse_core::ProviderEndpoints;
use creatorpulse_gateway::{GatewayConfig, GatewayServer, GatewaySettings, ProviderClient};

/// Initialize tracing with console and file logging
///
/// - Console: colored, compact format
/// - File: daily rotation under the platform data dir
///   (e.g. `~/.local/share/creatorpulse/logs/` on Linux)
fn init_tracing() -> tracing_appender::non_blocking::WorkerGuard {
    use tracing_appender::rolling::{RollingFileAppender, Rotation};
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    // Load .env file if present (for development)
    dotenvy::dotenv().ok();

    let logs_dir = dirs::data_local_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join("creatorpulse")
        .join("logs");

    if let Err(e) = std::fs::create_dir_all(&logs_dir) {
        eprintln!("Warning: Failed to create logs directory: {}", e);
    }

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("creatorpulse")
        .filename_suffix("log")
        .build(&logs_dir)
        .expect("Failed to create log file appender");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    // RUST_LOG takes precedence, with sensible defaults for our crates
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("info")
            .add_directive("creatorpulse_core=debug".parse().unwrap())
            .add_directive("creatorpulse_gateway=debug".parse().unwrap())
    });

    let console_layer = fmt::layer()
        .with_ansi(true)
        .compact()
        .with_file(false)
        .with_line_number(false)
        .with_target(true);

    let file_layer = fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false)
        .with_file(true)
        .with_line_number(true)
        .with_target(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    guard
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _guard = init_tracing();

    let settings = GatewaySettings::from_env().context("gateway configuration")?;
    info!("[Gateway] Configuration loaded: {:?}", settings);

    let provider = ProviderClient::new(
        ProviderEndpoints::default(),
        settings.app_id.clone(),
        settings.app_secret.clone(),
    );

    let config = GatewayConfig {
        host: std::env::var("CREATORPULSE_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
        port: std::env::var("CREATORPULSE_PORT")
            .ok()
            .and_then(|port| port.parse().ok())
            .unwrap_or(3000),
        enable_cors: true,
    };

    GatewayServer::new(config, settings, provider).run().await
}
