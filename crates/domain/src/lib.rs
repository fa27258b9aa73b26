//! # Hondana ドメイン層
//!
//! 書籍カタログのドメインモデルを定義する。
//!
//! ## 設計方針
//!
//! - **エンティティ**: 一意の識別子を持つオブジェクト（[`author::Author`],
//!   [`book::Book`]）
//! - **値オブジェクト**: 生成時にバリデーションを行う不変オブジェクト
//!   （[`value_objects`]）
//! - **ドメインエラー**: ビジネスルール違反を表現するエラー型
//!
//! ## 依存関係の方向
//!
//! ```text
//! api → infra → domain
//! ```
//!
//! ドメイン層はインフラ層（DB、外部サービス）に一切依存しない。

pub mod author;
pub mod book;
pub mod clock;
pub mod error;
pub mod value_objects;

pub use error::DomainError;
