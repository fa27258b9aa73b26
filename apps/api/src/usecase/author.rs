//! # 著者ユースケース
//!
//! 著者の一覧取得・登録・削除を担当する。

use std::sync::Arc;

use chrono::{DateTime, Utc};
use hondana_domain::{
    author::{Author, AuthorId},
    clock::Clock,
    value_objects::{MainCategory, PersonName},
};
use hondana_infra::repository::{AuthorFilter, AuthorRepository};
use hondana_shared::{PagedList, PageRequest, SortClause};

use crate::error::ApiError;

/// 著者作成の入力
#[derive(Debug, Clone)]
pub struct CreateAuthorInput {
    pub first_name:    String,
    pub last_name:     String,
    pub date_of_birth: DateTime<Utc>,
    pub main_category: String,
}

/// 著者ユースケース
pub struct AuthorUseCase {
    repository: Arc<dyn AuthorRepository>,
    clock:      Arc<dyn Clock>,
}

impl AuthorUseCase {
    pub fn new(repository: Arc<dyn AuthorRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// 条件に合致する著者を 1 ページ分取得する
    pub async fn list(
        &self,
        filter: &AuthorFilter,
        sort: &SortClause,
        page: PageRequest,
    ) -> Result<PagedList<Author>, ApiError> {
        Ok(self.repository.find_page(filter, sort, page).await?)
    }

    /// ID で著者を取得する
    pub async fn get(&self, id: &AuthorId) -> Result<Author, ApiError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("著者が見つかりません: {id}")))
    }

    /// 複数 ID で著者を一括取得する
    ///
    /// 1 件でも存在しない ID が含まれる場合は全体を 404 とする。
    pub async fn get_collection(&self, ids: &[AuthorId]) -> Result<Vec<Author>, ApiError> {
        let authors = self.repository.find_by_ids(ids).await?;

        if authors.len() != ids.len() {
            return Err(ApiError::NotFound(
                "指定された ID の一部が見つかりません".to_string(),
            ));
        }

        Ok(authors)
    }

    /// 著者を登録する
    pub async fn create(&self, input: CreateAuthorInput) -> Result<Author, ApiError> {
        let author = build_author(input, self.clock.now())?;
        self.repository.insert(&author).await?;
        Ok(author)
    }

    /// 複数の著者を一括登録する
    ///
    /// すべての入力を検証してから単一トランザクションで登録する。
    /// 1 件でも検証に失敗した場合は何も登録しない。
    pub async fn create_collection(
        &self,
        inputs: Vec<CreateAuthorInput>,
    ) -> Result<Vec<Author>, ApiError> {
        if inputs.is_empty() {
            return Err(ApiError::BadRequest(
                "登録する著者を 1 件以上指定してください".to_string(),
            ));
        }

        let now = self.clock.now();
        let authors = inputs
            .into_iter()
            .map(|input| build_author(input, now))
            .collect::<Result<Vec<_>, _>>()?;

        self.repository.insert_many(&authors).await?;
        Ok(authors)
    }

    /// 著者を削除する
    ///
    /// 紐づく書籍もカスケード削除される。
    pub async fn delete(&self, id: &AuthorId) -> Result<(), ApiError> {
        if !self.repository.exists(id).await? {
            return Err(ApiError::NotFound(format!("著者が見つかりません: {id}")));
        }

        self.repository.delete(id).await?;
        Ok(())
    }
}

fn build_author(input: CreateAuthorInput, now: DateTime<Utc>) -> Result<Author, ApiError> {
    let name = PersonName::new(input.first_name, input.last_name)?;
    let main_category = MainCategory::new(input.main_category)?;

    Ok(Author::new(
        AuthorId::new(),
        name,
        input.date_of_birth,
        main_category,
        now,
    ))
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use hondana_domain::clock::FixedClock;
    use hondana_infra::mock::MockAuthorRepository;
    use pretty_assertions::assert_eq;

    use super::*;

    fn usecase_with_repo() -> (AuthorUseCase, MockAuthorRepository) {
        let repo = MockAuthorRepository::new();
        let clock = FixedClock::new(Utc.with_ymd_and_hms(2026, 8, 26, 0, 0, 0).unwrap());
        let usecase = AuthorUseCase::new(Arc::new(repo.clone()), Arc::new(clock));
        (usecase, repo)
    }

    fn input(first: &str, last: &str) -> CreateAuthorInput {
        CreateAuthorInput {
            first_name:    first.to_string(),
            last_name:     last.to_string(),
            date_of_birth: Utc.with_ymd_and_hms(1970, 6, 15, 0, 0, 0).unwrap(),
            main_category: "Fantasy".to_string(),
        }
    }

    #[tokio::test]
    async fn test_著者を登録して取得できる() {
        let (usecase, _repo) = usecase_with_repo();

        let created = usecase.create(input("Jane", "Austen")).await.unwrap();
        let found = usecase.get(&created.id()).await.unwrap();

        assert_eq!(found, created);
    }

    #[tokio::test]
    async fn test_存在しない著者の取得は404になる() {
        let (usecase, _repo) = usecase_with_repo();

        let result = usecase.get(&AuthorId::new()).await;

        assert!(matches!(result, Err(ApiError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_不正な入力の登録は400になる() {
        let (usecase, _repo) = usecase_with_repo();

        let result = usecase.create(input("", "Austen")).await;

        assert!(matches!(result, Err(ApiError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_一括登録は全員に同じ作成日時を設定する() {
        let (usecase, _repo) = usecase_with_repo();

        let created = usecase
            .create_collection(vec![input("Jane", "Austen"), input("George", "Orwell")])
            .await
            .unwrap();

        assert_eq!(created.len(), 2);
        assert_eq!(created[0].created_at(), created[1].created_at());
    }

    #[tokio::test]
    async fn test_空の一括登録は400になる() {
        let (usecase, _repo) = usecase_with_repo();

        let result = usecase.create_collection(Vec::new()).await;

        assert!(matches!(result, Err(ApiError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_一括取得は存在しないidを含むと404になる() {
        let (usecase, _repo) = usecase_with_repo();
        let created = usecase.create(input("Jane", "Austen")).await.unwrap();

        let result = usecase
            .get_collection(&[created.id(), AuthorId::new()])
            .await;

        assert!(matches!(result, Err(ApiError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_削除後の取得は404になる() {
        let (usecase, _repo) = usecase_with_repo();
        let created = usecase.create(input("Jane", "Austen")).await.unwrap();

        usecase.delete(&created.id()).await.unwrap();
        let result = usecase.get(&created.id()).await;

        assert!(matches!(result, Err(ApiError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_存在しない著者の削除は404になる() {
        let (usecase, _repo) = usecase_with_repo();

        let result = usecase.delete(&AuthorId::new()).await;

        assert!(matches!(result, Err(ApiError::NotFound(_))));
    }
}
