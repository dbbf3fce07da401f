use crate::{
    config::ServerConfig,
    logging::{log_event, LogLevel},
};
use axum::{http::header, response::IntoResponse, routing::get, Router};
use serde_json::json;
use std::path::Path;
use tower_http::services::{ServeDir, ServeFile};

/// Serves the `trunk` build output with an `index.html` fallback so
/// in-page anchors and unknown paths still land on the site.
pub fn router(dist_dir: &Path) -> Router {
    let static_service =
        ServeDir::new(dist_dir).fallback(ServeFile::new(dist_dir.join("index.html")));

    Router::new()
        .route("/healthz", get(healthz))
        .fallback_service(static_service)
}

async fn healthz() -> impl IntoResponse {
    ([(header::CACHE_CONTROL, "no-store")], "ok")
}

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::from_env();
    let bind_address = format!("0.0.0.0:{}", config.port);
    let app = router(&config.dist_dir);

    let listener = match tokio::net::TcpListener::bind(&bind_address).await {
        Ok(listener) => listener,
        Err(error) => {
            log_event(
                config.log_level,
                LogLevel::Info,
                "server_failed",
                json!({ "bind": bind_address, "error": error.to_string() }),
            );
            return Err(error.into());
        }
    };

    log_event(
        config.log_level,
        LogLevel::Info,
        "server_started",
        json!({
            "bind": bind_address,
            "dist_dir": config.dist_dir.display().to_string(),
        }),
    );
    axum::serve(listener, app).await?;
    Ok(())
}
