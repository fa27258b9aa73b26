//! # 著者コレクションハンドラ
//!
//! 複数著者の一括登録と一括取得を提供する。
//!
//! ## エンドポイント
//!
//! - `POST /api/authorcollections` - 著者の一括登録（単一トランザクション）
//! - `GET /api/authorcollections/{ids}` - ID 列（カンマ区切り）での一括取得

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use hondana_domain::author::AuthorId;
use hondana_shared::ApiResponse;
use uuid::Uuid;

use crate::{
    dto::AuthorDto,
    error::ApiError,
    handler::{AppState, author::CreateAuthorRequest, author::location_header},
};

/// POST /api/authorcollections
///
/// すべて登録できた場合のみ 201 を返す。`Location` ヘッダには
/// 登録した ID 列での一括取得 URL を載せる。
pub async fn create_author_collection(
    State(state): State<Arc<AppState>>,
    Json(requests): Json<Vec<CreateAuthorRequest>>,
) -> Result<impl IntoResponse, ApiError> {
    let inputs = requests.into_iter().map(Into::into).collect();
    let authors = state.author_usecase.create_collection(inputs).await?;

    let ids = authors
        .iter()
        .map(|author| author.id().to_string())
        .collect::<Vec<_>>()
        .join(",");
    let location = format!("{}/api/authorcollections/{ids}", state.public_base_url);
    let headers = location_header(&location)?;

    let now = state.clock.now();
    let dtos: Vec<AuthorDto> = authors
        .iter()
        .map(|author| AuthorDto::from_author(author, now))
        .collect();

    Ok((StatusCode::CREATED, headers, Json(ApiResponse::new(dtos))))
}

/// GET /api/authorcollections/{ids}
///
/// `ids` はカンマ区切りの UUID 列。1 件でも存在しない ID が
/// 含まれる場合は 404 を返す。
pub async fn get_author_collection(
    State(state): State<Arc<AppState>>,
    Path(ids): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let author_ids = parse_ids(&ids)?;
    let authors = state.author_usecase.get_collection(&author_ids).await?;

    let now = state.clock.now();
    let dtos: Vec<AuthorDto> = authors
        .iter()
        .map(|author| AuthorDto::from_author(author, now))
        .collect();

    Ok(Json(ApiResponse::new(dtos)))
}

/// カンマ区切りの UUID 列をパースする
fn parse_ids(ids: &str) -> Result<Vec<AuthorId>, ApiError> {
    ids.split(',')
        .map(|id| {
            Uuid::parse_str(id.trim())
                .map(AuthorId::from_uuid)
                .map_err(|_| ApiError::BadRequest(format!("不正な ID が含まれています: {id:?}")))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_カンマ区切りのuuid列をパースできる() {
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();

        let ids = parse_ids(&format!("{first}, {second}")).unwrap();

        assert_eq!(ids, vec![
            AuthorId::from_uuid(first),
            AuthorId::from_uuid(second)
        ]);
    }

    #[test]
    fn test_不正なuuidを含む場合は400になる() {
        let result = parse_ids("not-a-uuid");

        assert!(matches!(result, Err(ApiError::BadRequest(_))));
    }
}
