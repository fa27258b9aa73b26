//! # 書籍ハンドラ
//!
//! 著者配下の書籍リソースを提供する。
//!
//! ## エンドポイント
//!
//! - `GET /api/authors/{author_id}/books` - 書籍一覧（タイトル昇順・部分射影対応）
//! - `POST /api/authors/{author_id}/books` - 書籍登録
//! - `GET /api/authors/{author_id}/books/{book_id}` - 書籍詳細（部分射影対応）
//! - `PUT /api/authors/{author_id}/books/{book_id}` - 全置換（アップサート）
//! - `PATCH /api/authors/{author_id}/books/{book_id}` - 部分更新
//! - `DELETE /api/authors/{author_id}/books/{book_id}` - 削除

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use hondana_domain::{author::AuthorId, book::BookId};
use hondana_shared::ApiResponse;
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    dto::BookDto,
    error::ApiError,
    handler::{
        AppState,
        author::{FieldsQuery, location_header},
    },
    usecase::{BookContentInput, BookPatchInput, UpsertOutcome},
};

/// 書籍の作成・全置換リクエスト
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookContentRequest {
    pub title:       String,
    #[serde(default)]
    pub description: String,
}

impl From<BookContentRequest> for BookContentInput {
    fn from(request: BookContentRequest) -> Self {
        Self {
            title:       request.title,
            description: request.description,
        }
    }
}

/// 書籍の部分更新リクエスト
///
/// 省略されたフィールドは現在の値を維持する。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookPatchRequest {
    pub title:       Option<String>,
    pub description: Option<String>,
}

/// GET /api/authors/{author_id}/books
pub async fn list_books(
    State(state): State<Arc<AppState>>,
    Path(author_id): Path<Uuid>,
    Query(query): Query<FieldsQuery>,
) -> Result<Response, ApiError> {
    ensure_book_fields(&state, query.fields.as_deref())?;

    let books = state
        .book_usecase
        .list(&AuthorId::from_uuid(author_id))
        .await?;
    let dtos: Vec<BookDto> = books.iter().map(BookDto::from_book).collect();

    let response = match &query.fields {
        Some(fields) => {
            let shaped = state
                .projections
                .book_fields()
                .shape_many(&dtos, fields)
                .map_err(|e| ApiError::Internal(e.to_string()))?;
            Json(ApiResponse::new(shaped)).into_response()
        }
        None => Json(ApiResponse::new(dtos)).into_response(),
    };

    Ok(response)
}

/// GET /api/authors/{author_id}/books/{book_id}
pub async fn get_book(
    State(state): State<Arc<AppState>>,
    Path((author_id, book_id)): Path<(Uuid, Uuid)>,
    Query(query): Query<FieldsQuery>,
) -> Result<Response, ApiError> {
    ensure_book_fields(&state, query.fields.as_deref())?;

    let book = state
        .book_usecase
        .get(&AuthorId::from_uuid(author_id), &BookId::from_uuid(book_id))
        .await?;
    let dto = BookDto::from_book(&book);

    let response = match &query.fields {
        Some(fields) => {
            let shaped = state
                .projections
                .book_fields()
                .shape(&dto, fields)
                .map_err(|e| ApiError::Internal(e.to_string()))?;
            Json(ApiResponse::new(shaped)).into_response()
        }
        None => Json(ApiResponse::new(dto)).into_response(),
    };

    Ok(response)
}

/// `fields` パラメータを書籍 DTO のセレクタで検証する
fn ensure_book_fields(state: &AppState, fields: Option<&str>) -> Result<(), ApiError> {
    if let Some(fields) = fields {
        if !state.projections.book_fields().has_fields(fields) {
            return Err(ApiError::BadRequest(format!(
                "fields に存在しないフィールドが含まれています: {fields:?}"
            )));
        }
    }
    Ok(())
}

/// POST /api/authors/{author_id}/books
pub async fn create_book(
    State(state): State<Arc<AppState>>,
    Path(author_id): Path<Uuid>,
    Json(request): Json<BookContentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let book = state
        .book_usecase
        .create(&AuthorId::from_uuid(author_id), request.into())
        .await?;

    let location = format!(
        "{}/api/authors/{author_id}/books/{}",
        state.public_base_url,
        book.id()
    );
    let headers = location_header(&location)?;

    Ok((
        StatusCode::CREATED,
        headers,
        Json(ApiResponse::new(BookDto::from_book(&book))),
    ))
}

/// PUT /api/authors/{author_id}/books/{book_id}
///
/// 既存の書籍は全置換して 204、存在しない ID はその ID で新規作成して
/// 201 + `Location` を返す。
pub async fn put_book(
    State(state): State<Arc<AppState>>,
    Path((author_id, book_id)): Path<(Uuid, Uuid)>,
    Json(request): Json<BookContentRequest>,
) -> Result<Response, ApiError> {
    let outcome = state
        .book_usecase
        .upsert(
            &AuthorId::from_uuid(author_id),
            &BookId::from_uuid(book_id),
            request.into(),
        )
        .await?;

    let response = match outcome {
        UpsertOutcome::Created(book) => {
            let location = format!(
                "{}/api/authors/{author_id}/books/{}",
                state.public_base_url,
                book.id()
            );
            let headers = location_header(&location)?;
            (
                StatusCode::CREATED,
                headers,
                Json(ApiResponse::new(BookDto::from_book(&book))),
            )
                .into_response()
        }
        UpsertOutcome::Updated(_) => StatusCode::NO_CONTENT.into_response(),
    };

    Ok(response)
}

/// PATCH /api/authors/{author_id}/books/{book_id}
pub async fn patch_book(
    State(state): State<Arc<AppState>>,
    Path((author_id, book_id)): Path<(Uuid, Uuid)>,
    Json(request): Json<BookPatchRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let book = state
        .book_usecase
        .patch(
            &AuthorId::from_uuid(author_id),
            &BookId::from_uuid(book_id),
            BookPatchInput {
                title:       request.title,
                description: request.description,
            },
        )
        .await?;

    Ok(Json(ApiResponse::new(BookDto::from_book(&book))))
}

/// DELETE /api/authors/{author_id}/books/{book_id}
pub async fn delete_book(
    State(state): State<Arc<AppState>>,
    Path((author_id, book_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .book_usecase
        .delete(&AuthorId::from_uuid(author_id), &BookId::from_uuid(book_id))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
