//! # Hondana API
//!
//! 書籍カタログの REST API。
//!
//! ## 層構成
//!
//! - [`handler`] - HTTP の入出力（検証・DTO 変換・ヘッダ組み立て）
//! - [`usecase`] - ビジネスロジック（リポジトリと Clock への依存を注入）
//! - [`projection`] - 並び替えマッピング表と部分射影セレクタの構成
//!
//! ルーター構築を [`router`] として公開し、統合テストから
//! モックリポジトリを注入したアプリケーションを組み立てられるようにする。

pub mod config;
pub mod dto;
pub mod error;
pub mod handler;
pub mod projection;
pub mod usecase;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::handler::{
    AppState,
    create_author,
    create_author_collection,
    create_book,
    delete_author,
    delete_book,
    get_author,
    get_author_collection,
    get_book,
    get_root,
    health_check,
    list_authors,
    list_books,
    options_authors,
    patch_book,
    put_book,
};

/// アプリケーションのルーターを構築する
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api", get(get_root))
        .route(
            "/api/authors",
            get(list_authors)
                .post(create_author)
                .options(options_authors),
        )
        .route(
            "/api/authors/{author_id}",
            get(get_author).delete(delete_author),
        )
        .route("/api/authorcollections", post(create_author_collection))
        .route("/api/authorcollections/{ids}", get(get_author_collection))
        .route(
            "/api/authors/{author_id}/books",
            get(list_books).post(create_book),
        )
        .route(
            "/api/authors/{author_id}/books/{book_id}",
            get(get_book)
                .put(put_book)
                .patch(patch_book)
                .delete(delete_book),
        )
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
