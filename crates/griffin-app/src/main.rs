mod app_state;
mod cli;

use std::path::PathBuf;

use griffin_config::GriffinConfig;
use tracing_subscriber::EnvFilter;
use winit::event_loop::EventLoop;

use app_state::{GriffinApp, UserEvent};

const DEFAULT_LOG_DIRECTIVE: &str = "griffin=info";

fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        eprintln!("\n--- Griffin crashed ---");
        eprintln!("Please report this issue with the log output above.");
        eprintln!("-----------------------\n");

        default_hook(info);
    }));
}

/// Config is read before logging starts so `logging.level` can apply;
/// problems are reported once the subscriber is up.
fn load_config(path: Option<&PathBuf>) -> (GriffinConfig, Option<String>) {
    let result = match path {
        Some(path) => griffin_config::load_config_from(path),
        None => griffin_config::load_config(),
    };
    match result {
        Ok(config) => (config, None),
        Err(e) => (GriffinConfig::default(), Some(e.to_string())),
    }
}

fn main() {
    install_panic_hook();

    let args = cli::parse();
    let config_path = args.config.as_ref().map(PathBuf::from);
    let (config, config_error) = load_config(config_path.as_ref());

    let log_directive = args
        .log_level
        .clone()
        .unwrap_or_else(|| config.logging.level.clone());
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(
                log_directive
                    .parse()
                    .unwrap_or_else(|_| DEFAULT_LOG_DIRECTIVE.parse().unwrap()),
            ),
        )
        .init();

    tracing::info!("Griffin v{} starting...", env!("CARGO_PKG_VERSION"));

    if let Some(ref path) = config_path {
        tracing::info!("Using config override: {}", path.display());
    }
    if let Some(e) = config_error {
        tracing::warn!("Config load failed, using defaults: {e}");
    }
    tracing::info!(
        inactivity_timeout_minutes = config.surfaces.inactivity_timeout_minutes,
        "Config loaded"
    );

    let event_loop = match EventLoop::<UserEvent>::with_user_event().build() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            tracing::error!("Failed to create event loop: {e}");
            return;
        }
    };
    let mut app = GriffinApp::new(config, config_path, args.ephemeral, event_loop.create_proxy());

    tracing::info!("Entering event loop");
    if let Err(e) = event_loop.run_app(&mut app) {
        tracing::error!("Event loop error: {e}");
    }
    tracing::info!("Shutdown complete");
}
