//! # 書籍ユースケース
//!
//! 著者に紐づく書籍の取得・登録・更新・削除を担当する。
//!
//! ## PUT の意味論
//!
//! 指定 ID の書籍が存在すれば全置換、存在しなければその ID で新規作成する
//! （アップサート）。結果は [`UpsertOutcome`] で呼び出し側へ伝える。

use std::sync::Arc;

use chrono::{DateTime, Utc};
use hondana_domain::{
    author::AuthorId,
    book::{Book, BookId},
    clock::Clock,
    value_objects::{BookDescription, BookTitle},
};
use hondana_infra::repository::{AuthorRepository, BookRepository};

use crate::error::ApiError;

/// 書籍の作成・全置換の入力
#[derive(Debug, Clone)]
pub struct BookContentInput {
    pub title:       String,
    pub description: String,
}

/// 書籍の部分更新の入力
///
/// `None` のフィールドは現在の値を維持する。
#[derive(Debug, Clone, Default)]
pub struct BookPatchInput {
    pub title:       Option<String>,
    pub description: Option<String>,
}

/// アップサートの結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// 指定 ID で新規作成した
    Created(Book),
    /// 既存の書籍を全置換した
    Updated(Book),
}

/// 書籍ユースケース
pub struct BookUseCase {
    books:   Arc<dyn BookRepository>,
    authors: Arc<dyn AuthorRepository>,
    clock:   Arc<dyn Clock>,
}

impl BookUseCase {
    pub fn new(
        books: Arc<dyn BookRepository>,
        authors: Arc<dyn AuthorRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            books,
            authors,
            clock,
        }
    }

    /// 著者の書籍一覧を取得する
    pub async fn list(&self, author_id: &AuthorId) -> Result<Vec<Book>, ApiError> {
        self.ensure_author_exists(author_id).await?;
        Ok(self.books.find_all_by_author(author_id).await?)
    }

    /// 著者の書籍を 1 件取得する
    pub async fn get(&self, author_id: &AuthorId, book_id: &BookId) -> Result<Book, ApiError> {
        self.ensure_author_exists(author_id).await?;
        self.books
            .find_by_id(author_id, book_id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("書籍が見つかりません: {book_id}")))
    }

    /// 書籍を登録する
    pub async fn create(
        &self,
        author_id: &AuthorId,
        input: BookContentInput,
    ) -> Result<Book, ApiError> {
        self.ensure_author_exists(author_id).await?;

        let book = build_book(BookId::new(), *author_id, input, self.clock.now())?;
        self.books.insert(&book).await?;
        Ok(book)
    }

    /// 書籍をアップサートする
    ///
    /// 存在すれば全置換、存在しなければクライアント指定の ID で新規作成する。
    pub async fn upsert(
        &self,
        author_id: &AuthorId,
        book_id: &BookId,
        input: BookContentInput,
    ) -> Result<UpsertOutcome, ApiError> {
        self.ensure_author_exists(author_id).await?;
        let now = self.clock.now();

        match self.books.find_by_id(author_id, book_id).await? {
            Some(existing) => {
                let updated = existing.with_content(
                    BookTitle::new(input.title)?,
                    BookDescription::new(input.description)?,
                    now,
                )?;
                self.books.update(&updated).await?;
                Ok(UpsertOutcome::Updated(updated))
            }
            None => {
                let book = build_book(*book_id, *author_id, input, now)?;
                self.books.insert(&book).await?;
                Ok(UpsertOutcome::Created(book))
            }
        }
    }

    /// 書籍を部分更新する
    ///
    /// 指定されたフィールドのみ差し替え、未指定のフィールドは維持する。
    pub async fn patch(
        &self,
        author_id: &AuthorId,
        book_id: &BookId,
        input: BookPatchInput,
    ) -> Result<Book, ApiError> {
        let existing = self.get(author_id, book_id).await?;

        let title = match input.title {
            Some(title) => BookTitle::new(title)?,
            None => existing.title().clone(),
        };
        let description = match input.description {
            Some(description) => BookDescription::new(description)?,
            None => existing.description().clone(),
        };

        let updated = existing.with_content(title, description, self.clock.now())?;
        self.books.update(&updated).await?;
        Ok(updated)
    }

    /// 書籍を削除する
    pub async fn delete(&self, author_id: &AuthorId, book_id: &BookId) -> Result<(), ApiError> {
        // 存在確認を兼ねる（見つからなければ 404）
        self.get(author_id, book_id).await?;
        self.books.delete(author_id, book_id).await?;
        Ok(())
    }

    async fn ensure_author_exists(&self, author_id: &AuthorId) -> Result<(), ApiError> {
        if !self.authors.exists(author_id).await? {
            return Err(ApiError::NotFound(format!(
                "著者が見つかりません: {author_id}"
            )));
        }
        Ok(())
    }
}

fn build_book(
    id: BookId,
    author_id: AuthorId,
    input: BookContentInput,
    now: DateTime<Utc>,
) -> Result<Book, ApiError> {
    Ok(Book::new(
        id,
        author_id,
        BookTitle::new(input.title)?,
        BookDescription::new(input.description)?,
        now,
    )?)
}
