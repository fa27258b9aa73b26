//! # ヘルスチェックハンドラ

use axum::{Json, response::IntoResponse};
use hondana_shared::HealthResponse;

/// GET /health
///
/// サーバーの稼働状態を返す。ロードバランサーの死活監視に使用する。
pub async fn health_check() -> impl IntoResponse {
    Json(HealthResponse {
        status:  "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
