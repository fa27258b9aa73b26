#![feature(int_roundings)]
//! # Hondana 共有ユーティリティ
//!
//! このクレートは、Hondana プロジェクト全体で使用される
//! 共通ユーティリティを提供する。
//!
//! ## 設計方針
//!
//! - infra と api から依存される（domain は依存しない）
//! - ビジネスロジックを含まない純粋なユーティリティのみを配置
//! - 外部クレートへの依存は最小限に抑える
//!
//! ## 主要モジュール
//!
//! - [`pagination`] - ページ分割されたコレクションと `X-Pagination` メタデータ
//! - [`sorting`] - `orderBy` 式のパースと公開フィールド → カラムのマッピング
//! - [`shaping`] - `fields` 式による部分フィールド射影

pub mod api_response;
pub mod error_response;
pub mod health;
pub mod observability;
pub mod pagination;
pub mod shaping;
pub mod sorting;

pub use api_response::ApiResponse;
pub use error_response::ErrorResponse;
pub use health::HealthResponse;
pub use pagination::{PagedList, PageRequest, PaginationMetadata};
pub use shaping::{FieldSelector, ShapeError};
pub use sorting::{
    PropertyMapping,
    PropertyMappingError,
    PropertyMappingRegistry,
    PropertyMappingValue,
    SortClause,
    SortDirection,
    SortError,
    SortKey,
    build_sort_clause,
    order_by_is_valid,
};
