//! # API エラー定義
//!
//! API 層で発生するエラーと、HTTP レスポンスへの変換を定義する。
//!
//! ## エラーの変換経路
//!
//! - [`DomainError`] → バリデーション系は 400、NotFound は 404、Conflict は 409
//! - [`InfraError`] → `InvalidInput` は 400、それ以外は 500（詳細はログのみ）
//! - マッピング表の未登録など構成上の問題 → 500（起動時の設定漏れを示す）

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use hondana_domain::DomainError;
use hondana_infra::{InfraError, InfraErrorKind};
use hondana_shared::{ErrorResponse, PropertyMappingError, SortError};
use thiserror::Error;

/// API 層で発生するエラー
#[derive(Debug, Error)]
pub enum ApiError {
    /// 不正なリクエスト
    #[error("不正なリクエスト: {0}")]
    BadRequest(String),

    /// リソースが見つからない
    #[error("リソースが見つかりません: {0}")]
    NotFound(String),

    /// 競合
    #[error("競合が発生しました: {0}")]
    Conflict(String),

    /// インフラ層エラー
    #[error("インフラエラー: {0}")]
    Infra(#[from] InfraError),

    /// 内部エラー（構成不備や事前条件違反）
    #[error("内部エラー: {0}")]
    Internal(String),
}

impl From<DomainError> for ApiError {
    fn from(error: DomainError) -> Self {
        match error {
            DomainError::Validation(msg) => Self::BadRequest(msg),
            DomainError::NotFound { entity_type, id } => {
                Self::NotFound(format!("{entity_type} が見つかりません: {id}"))
            }
            DomainError::Conflict(msg) => Self::Conflict(msg),
        }
    }
}

// マッピング表の未登録は起動時の構成漏れ。クライアントには詳細を返さない。
impl From<PropertyMappingError> for ApiError {
    fn from(error: PropertyMappingError) -> Self {
        Self::Internal(error.to_string())
    }
}

// orderBy は事前検証済みのため、ここに到達するのは呼び出し側のバグ。
impl From<SortError> for ApiError {
    fn from(error: SortError) -> Self {
        Self::Internal(error.to_string())
    }
}

impl From<crate::projection::ApiSortError> for ApiError {
    fn from(error: crate::projection::ApiSortError) -> Self {
        Self::Internal(error.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match &self {
            ApiError::BadRequest(msg) => ErrorResponse::bad_request(msg.clone()),
            ApiError::NotFound(msg) => ErrorResponse::not_found(msg.clone()),
            ApiError::Conflict(msg) => ErrorResponse::conflict(msg.clone()),
            ApiError::Infra(e) => match e.kind() {
                InfraErrorKind::InvalidInput(msg) => ErrorResponse::bad_request(msg.clone()),
                _ => {
                    tracing::error!(span_trace = %e.span_trace(), "インフラエラー: {e}");
                    ErrorResponse::internal_error()
                }
            },
            ApiError::Internal(msg) => {
                tracing::error!("内部エラー: {msg}");
                ErrorResponse::internal_error()
            }
        };

        let status =
            StatusCode::from_u16(body.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_domain_errorのバリデーションは400に変換される() {
        let error: ApiError = DomainError::Validation("タイトルは必須です".to_string()).into();

        assert!(matches!(error, ApiError::BadRequest(_)));
    }

    #[test]
    fn test_domain_errorのnot_foundは404に変換される() {
        let error: ApiError = DomainError::NotFound {
            entity_type: "Author",
            id:          "abc".to_string(),
        }
        .into();

        match error {
            ApiError::NotFound(msg) => assert_eq!(msg, "Author が見つかりません: abc"),
            other => panic!("NotFound であること: {other:?}"),
        }
    }

    #[test]
    fn test_infra_errorのinvalid_inputは400レスポンスになる() {
        let error = ApiError::Infra(InfraError::invalid_input("不正な入力"));
        let response = error.into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_internalは詳細を隠した500レスポンスになる() {
        let error = ApiError::Internal("マッピング未登録".to_string());
        let response = error.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
