//! # ユースケース層
//!
//! ハンドラから呼び出されるビジネスロジックを提供する。
//!
//! ## 設計方針
//!
//! - リポジトリには `Arc<dyn Trait>` 経由で依存し、テストではモックに差し替える
//! - 現在時刻は `Clock` トレイト経由で取得し、エンティティへ引数で渡す
//! - 入力はハンドラのリクエスト型から変換した入力構造体で受け取る

pub mod author;
pub mod book;

pub use author::{AuthorUseCase, CreateAuthorInput};
pub use book::{BookContentInput, BookPatchInput, BookUseCase, UpsertOutcome};
