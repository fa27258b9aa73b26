//! # HTTP ハンドラ
//!
//! axum のハンドラ関数と共有状態を提供する。
//!
//! ## 責務
//!
//! - クエリ・パス・ボディの取り出しと事前検証（orderBy / fields は
//!   ユースケース呼び出し前に検証し、不正なら 400 を返す）
//! - ユースケースの呼び出し
//! - DTO への変換とレスポンスヘッダ（`X-Pagination`, `Location`）の組み立て

pub mod author;
pub mod author_collection;
pub mod book;
pub mod health;
pub mod root;

use std::sync::Arc;

use hondana_domain::clock::Clock;

use crate::{
    projection::Projections,
    usecase::{AuthorUseCase, BookUseCase},
};

pub use author::{create_author, delete_author, get_author, list_authors, options_authors};
pub use author_collection::{create_author_collection, get_author_collection};
pub use book::{create_book, delete_book, get_book, list_books, patch_book, put_book};
pub use health::health_check;
pub use root::get_root;

/// API 全体の共有状態
///
/// 起動時に 1 度だけ構築し、`Arc` でルーターへ渡す。
pub struct AppState {
    pub author_usecase:  AuthorUseCase,
    pub book_usecase:    BookUseCase,
    pub clock:           Arc<dyn Clock>,
    pub projections:     Arc<Projections>,
    /// `Location` ヘッダとページネーションリンクの基点 URL
    pub public_base_url: String,
}
