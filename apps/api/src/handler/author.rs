//! # 著者ハンドラ
//!
//! ## エンドポイント
//!
//! - `GET /api/authors` - 著者一覧（ページング・並び替え・部分射影・絞り込み）
//! - `POST /api/authors` - 著者登録
//! - `OPTIONS /api/authors` - 許可メソッドの提示
//! - `GET /api/authors/{author_id}` - 著者詳細（部分射影対応）
//! - `DELETE /api/authors/{author_id}` - 著者削除（書籍もカスケード削除）
//!
//! ## クエリパラメータの検証順序
//!
//! `orderBy` → `fields` の順に検証し、最初の違反で 400 を返す。
//! 検証を通ってからユースケースを呼び出すため、ストレージ層には
//! 不正な式が到達しない。

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use hondana_domain::author::AuthorId;
use hondana_infra::repository::AuthorFilter;
use hondana_shared::{ApiResponse, PageRequest, PaginationMetadata};
use serde::Deserialize;
use uuid::Uuid;

use crate::{dto::AuthorDto, error::ApiError, handler::AppState, usecase::CreateAuthorInput};

/// 並び替えの既定値（結合氏名の昇順）
const DEFAULT_ORDER_BY: &str = "name";

/// 著者一覧のクエリパラメータ
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorsQuery {
    pub main_category: Option<String>,
    pub search_query:  Option<String>,
    pub order_by:      Option<String>,
    pub fields:        Option<String>,
    pub page_number:   Option<u32>,
    pub page_size:     Option<u32>,
}

/// 部分射影のみのクエリパラメータ
#[derive(Debug, Default, Deserialize)]
pub struct FieldsQuery {
    pub fields: Option<String>,
}

/// 著者登録リクエスト
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAuthorRequest {
    pub first_name:    String,
    pub last_name:     String,
    pub date_of_birth: DateTime<Utc>,
    pub main_category: String,
}

impl From<CreateAuthorRequest> for CreateAuthorInput {
    fn from(request: CreateAuthorRequest) -> Self {
        Self {
            first_name:    request.first_name,
            last_name:     request.last_name,
            date_of_birth: request.date_of_birth,
            main_category: request.main_category,
        }
    }
}

/// GET /api/authors
///
/// 絞り込み・並び替え・ページングを適用した著者一覧を返す。
/// ページネーションメタデータは `X-Pagination` レスポンスヘッダに載せる。
pub async fn list_authors(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AuthorsQuery>,
) -> Result<Response, ApiError> {
    let order_by = query.order_by.clone().unwrap_or_else(|| DEFAULT_ORDER_BY.to_string());

    if !state.projections.author_order_by_is_valid(&order_by)? {
        return Err(ApiError::BadRequest(format!(
            "orderBy に不正なフィールドが含まれています: {order_by:?}"
        )));
    }
    if let Some(fields) = &query.fields {
        if !state.projections.author_fields().has_fields(fields) {
            return Err(ApiError::BadRequest(format!(
                "fields に存在しないフィールドが含まれています: {fields:?}"
            )));
        }
    }

    let filter = AuthorFilter {
        main_category: normalize(query.main_category.as_deref()),
        search_query:  normalize(query.search_query.as_deref()),
    };
    let sort = state.projections.author_sort_clause(&order_by)?;
    let page = PageRequest::new(
        query.page_number.unwrap_or(1),
        query.page_size.unwrap_or(PageRequest::DEFAULT_PAGE_SIZE),
    );

    let paged = state.author_usecase.list(&filter, &sort, page).await?;

    let previous_link = paged
        .has_previous()
        .then(|| page_link(&state.public_base_url, &query, paged.current_page() - 1, paged.page_size()));
    let next_link = paged
        .has_next()
        .then(|| page_link(&state.public_base_url, &query, paged.current_page() + 1, paged.page_size()));
    let metadata = PaginationMetadata::from_paged_list(&paged, previous_link, next_link);
    let headers = pagination_headers(&metadata)?;

    let now = state.clock.now();
    let dtos: Vec<AuthorDto> = paged
        .items()
        .iter()
        .map(|author| AuthorDto::from_author(author, now))
        .collect();

    let response = match &query.fields {
        Some(fields) => {
            let shaped = state
                .projections
                .author_fields()
                .shape_many(&dtos, fields)
                .map_err(|e| ApiError::Internal(e.to_string()))?;
            (StatusCode::OK, headers, Json(ApiResponse::new(shaped))).into_response()
        }
        None => (StatusCode::OK, headers, Json(ApiResponse::new(dtos))).into_response(),
    };

    Ok(response)
}

/// GET /api/authors/{author_id}
pub async fn get_author(
    State(state): State<Arc<AppState>>,
    Path(author_id): Path<Uuid>,
    Query(query): Query<FieldsQuery>,
) -> Result<Response, ApiError> {
    if let Some(fields) = &query.fields {
        if !state.projections.author_fields().has_fields(fields) {
            return Err(ApiError::BadRequest(format!(
                "fields に存在しないフィールドが含まれています: {fields:?}"
            )));
        }
    }

    let author = state
        .author_usecase
        .get(&AuthorId::from_uuid(author_id))
        .await?;
    let dto = AuthorDto::from_author(&author, state.clock.now());

    let response = match &query.fields {
        Some(fields) => {
            let shaped = state
                .projections
                .author_fields()
                .shape(&dto, fields)
                .map_err(|e| ApiError::Internal(e.to_string()))?;
            Json(ApiResponse::new(shaped)).into_response()
        }
        None => Json(ApiResponse::new(dto)).into_response(),
    };

    Ok(response)
}

/// POST /api/authors
///
/// 著者を登録し、`Location` ヘッダに作成されたリソースの URL を載せて
/// 201 を返す。
pub async fn create_author(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateAuthorRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let author = state.author_usecase.create(request.into()).await?;
    let dto = AuthorDto::from_author(&author, state.clock.now());

    let location = format!("{}/api/authors/{}", state.public_base_url, author.id());
    let headers = location_header(&location)?;

    Ok((StatusCode::CREATED, headers, Json(ApiResponse::new(dto))))
}

/// DELETE /api/authors/{author_id}
pub async fn delete_author(
    State(state): State<Arc<AppState>>,
    Path(author_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .author_usecase
        .delete(&AuthorId::from_uuid(author_id))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// OPTIONS /api/authors
pub async fn options_authors() -> Result<impl IntoResponse, ApiError> {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::ALLOW,
        HeaderValue::from_static("GET,HEAD,POST,OPTIONS"),
    );

    Ok((StatusCode::OK, headers))
}

/// 空白のみのパラメータを未指定として扱う
fn normalize(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(ToString::to_string)
}

/// 指定ページへのリンクを、受け取ったクエリパラメータを引き継いで生成する
fn page_link(base: &str, query: &AuthorsQuery, page_number: u32, page_size: u32) -> String {
    let mut params = vec![
        format!("pageNumber={page_number}"),
        format!("pageSize={page_size}"),
    ];

    if let Some(order_by) = &query.order_by {
        params.push(format!("orderBy={}", urlencoding::encode(order_by)));
    }
    if let Some(fields) = &query.fields {
        params.push(format!("fields={}", urlencoding::encode(fields)));
    }
    if let Some(category) = &query.main_category {
        params.push(format!("mainCategory={}", urlencoding::encode(category)));
    }
    if let Some(search) = &query.search_query {
        params.push(format!("searchQuery={}", urlencoding::encode(search)));
    }

    format!("{base}/api/authors?{}", params.join("&"))
}

/// `X-Pagination` ヘッダを組み立てる
fn pagination_headers(metadata: &PaginationMetadata) -> Result<HeaderMap, ApiError> {
    let json = serde_json::to_string(metadata).map_err(|e| ApiError::Internal(e.to_string()))?;

    let mut headers = HeaderMap::new();
    headers.insert(
        "X-Pagination",
        HeaderValue::from_str(&json).map_err(|e| ApiError::Internal(e.to_string()))?,
    );
    Ok(headers)
}

/// `Location` ヘッダを組み立てる
pub(crate) fn location_header(location: &str) -> Result<HeaderMap, ApiError> {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::LOCATION,
        HeaderValue::from_str(location).map_err(|e| ApiError::Internal(e.to_string()))?,
    );
    Ok(headers)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_ページリンクは受け取ったパラメータを引き継ぐ() {
        let query = AuthorsQuery {
            main_category: Some("Fantasy".to_string()),
            search_query:  Some("king arthur".to_string()),
            order_by:      Some("name desc".to_string()),
            fields:        None,
            page_number:   Some(2),
            page_size:     Some(3),
        };

        let link = page_link("http://localhost:8080", &query, 3, 3);

        assert_eq!(
            link,
            "http://localhost:8080/api/authors?pageNumber=3&pageSize=3\
             &orderBy=name%20desc&mainCategory=Fantasy&searchQuery=king%20arthur"
        );
    }

    #[test]
    fn test_空白のみのパラメータは未指定として扱う() {
        assert_eq!(normalize(Some("  ")), None);
        assert_eq!(normalize(Some(" Fantasy ")), Some("Fantasy".to_string()));
        assert_eq!(normalize(None), None);
    }
}
