//! # リポジトリ実装
//!
//! 著者・書籍の永続化操作を定義するトレイトと、その PostgreSQL 実装を提供する。
//!
//! ## 設計方針
//!
//! - **依存性逆転**: ユースケース層はトレイト経由でリポジトリを利用する
//! - **データベース抽象化**: sqlx を使用し、PostgreSQL 固有の処理をカプセル化
//! - **テスタビリティ**: トレイト経由でモック可能な設計

pub mod author_repository;
pub mod book_repository;

pub use author_repository::{AuthorFilter, AuthorRepository, PostgresAuthorRepository};
pub use book_repository::{BookRepository, PostgresBookRepository};
