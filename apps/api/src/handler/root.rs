//! # ルートドキュメントハンドラ
//!
//! API の入口となるエンドポイント一覧をリンク形式で返す。

use std::sync::Arc;

use axum::{Json, extract::State, response::IntoResponse};
use serde::Serialize;

use crate::handler::AppState;

/// ハイパーメディアリンク
#[derive(Debug, Clone, Serialize)]
pub struct LinkDto {
    pub href:   String,
    pub rel:    String,
    pub method: String,
}

impl LinkDto {
    fn new(href: String, rel: &str, method: &str) -> Self {
        Self {
            href,
            rel: rel.to_string(),
            method: method.to_string(),
        }
    }
}

/// GET /api
///
/// 主要なエンドポイントへのリンク一覧を返す。
pub async fn get_root(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let base = &state.public_base_url;

    Json(vec![
        LinkDto::new(format!("{base}/api"), "self", "GET"),
        LinkDto::new(format!("{base}/api/authors"), "authors", "GET"),
        LinkDto::new(format!("{base}/api/authors"), "create_author", "POST"),
    ])
}
