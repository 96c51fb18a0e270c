mod config_manager;
mod state;
mod websocket;
mod routes;
mod handlers;
mod translate;

use anyhow::Result;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config_manager::Config;
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("translate_backend=debug,tower_http=debug")),
        )
        .init();

    let (config, loaded_path) = load_config()?;
    match loaded_path {
        Some(path) => info!("Loaded configuration from: {}", path),
        None => info!("No configuration file found, using defaults"),
    }

    let app_state = AppState::new(config.clone()).await?;

    let app = Router::new()
        .merge(routes::create_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    let addr = config.system_config.bind_addr()?;
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Load the first config file found in the usual locations, or the defaults
fn load_config() -> Result<(Config, Option<String>)> {
    if let Ok(path) = std::env::var("CONFIG_PATH") {
        let config = Config::load(&path)
            .map_err(|e| anyhow::anyhow!("Failed to load config from {}: {}", path, e))?;
        return Ok((config, Some(path)));
    }

    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| std::path::PathBuf::from("."));

    let config_paths: Vec<String> = vec![
        Some("conf.yaml".to_string()),
        Some("conf.jsonld".to_string()),
        exe_dir.join("conf.yaml").to_str().map(|s| s.to_string()),
        exe_dir.join("conf.jsonld").to_str().map(|s| s.to_string()),
    ]
    .into_iter()
    .flatten()
    .collect();

    for path in config_paths {
        if !std::path::Path::new(&path).exists() {
            continue;
        }
        // An existing file that fails to load is fatal
        let config = Config::load(&path)
            .map_err(|e| anyhow::anyhow!("Failed to load config from {}: {}", path, e))?;
        return Ok((config, Some(path)));
    }

    Ok((Config::default(), None))
}
