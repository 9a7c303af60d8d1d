pub mod config;
pub mod cors;
pub mod handler;
pub mod hosted;
pub mod local;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use config::ServiceConfig;
use imageops_core::{CloudinaryClient, ImageHost, ImageMagick};

/// ハンドラ間で共有する読み取り専用の状態
#[derive(Clone)]
pub struct AppState {
    pub host: Arc<dyn ImageHost>,
    pub magick: ImageMagick,
}

impl AppState {
    pub fn new(host: Arc<dyn ImageHost>, magick: ImageMagick) -> Self {
        Self { host, magick }
    }

    pub fn from_config(config: &ServiceConfig) -> Self {
        Self::new(
            Arc::new(CloudinaryClient::new(config.cloudinary.clone())),
            ImageMagick::new(config.magick_binary.clone()),
        )
    }
}

/// ルーターを組み立てる
///
/// 各処理エンドポイントは POST と OPTIONS のみ受け付け、それ以外は 405。
pub fn build_router(state: AppState, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/health", get(handler::health))
        .route(
            "/cloudinary-processor",
            post(hosted::process)
                .options(handler::preflight)
                .fallback(handler::method_not_allowed),
        )
        .route(
            "/image-processor",
            post(local::process)
                .options(handler::preflight)
                .fallback(handler::method_not_allowed),
        )
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(middleware::map_response(cors::apply_cors_headers))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
