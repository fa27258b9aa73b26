//! # BookRepository
//!
//! 著者に紐づく書籍の永続化を担当するリポジトリ。
//!
//! ## 設計方針
//!
//! - **著者スコープ**: 書籍の取得・更新は常に著者 ID との組で行う
//! - **固定クエリ**: 動的な条件がないため、プレースホルダ付きの
//!   固定 SQL で完結する

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use hondana_domain::{
    author::AuthorId,
    book::{Book, BookId},
    value_objects::{BookDescription, BookTitle},
};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::InfraError;

/// 書籍リポジトリトレイト
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// 著者の書籍一覧をタイトル昇順で取得する
    async fn find_all_by_author(&self, author_id: &AuthorId) -> Result<Vec<Book>, InfraError>;

    /// 著者 ID と書籍 ID の組で書籍を検索する
    ///
    /// 書籍が存在しても著者が一致しない場合は `None` を返す。
    async fn find_by_id(
        &self,
        author_id: &AuthorId,
        book_id: &BookId,
    ) -> Result<Option<Book>, InfraError>;

    /// 書籍を登録する
    async fn insert(&self, book: &Book) -> Result<(), InfraError>;

    /// 書籍を更新する
    async fn update(&self, book: &Book) -> Result<(), InfraError>;

    /// 書籍を削除する
    async fn delete(&self, author_id: &AuthorId, book_id: &BookId) -> Result<(), InfraError>;
}

/// PostgreSQL 実装の BookRepository
#[derive(Debug, Clone)]
pub struct PostgresBookRepository {
    pool: PgPool,
}

impl PostgresBookRepository {
    /// 新しいリポジトリインスタンスを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// books テーブルの行
#[derive(Debug, FromRow)]
struct BookRow {
    id:          Uuid,
    author_id:   Uuid,
    title:       String,
    description: String,
    created_at:  DateTime<Utc>,
    updated_at:  DateTime<Utc>,
}

impl BookRow {
    fn into_book(self) -> Result<Book, InfraError> {
        Ok(Book::from_db(
            BookId::from_uuid(self.id),
            AuthorId::from_uuid(self.author_id),
            BookTitle::new(self.title).map_err(|e| InfraError::unexpected(e.to_string()))?,
            BookDescription::new(self.description)
                .map_err(|e| InfraError::unexpected(e.to_string()))?,
            self.created_at,
            self.updated_at,
        ))
    }
}

#[async_trait]
impl BookRepository for PostgresBookRepository {
    async fn find_all_by_author(&self, author_id: &AuthorId) -> Result<Vec<Book>, InfraError> {
        let rows: Vec<BookRow> = sqlx::query_as(
            r#"
            SELECT id, author_id, title, description, created_at, updated_at
            FROM books
            WHERE author_id = $1
            ORDER BY title
            "#,
        )
        .bind(author_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(BookRow::into_book).collect()
    }

    async fn find_by_id(
        &self,
        author_id: &AuthorId,
        book_id: &BookId,
    ) -> Result<Option<Book>, InfraError> {
        let row: Option<BookRow> = sqlx::query_as(
            r#"
            SELECT id, author_id, title, description, created_at, updated_at
            FROM books
            WHERE author_id = $1 AND id = $2
            "#,
        )
        .bind(author_id.as_uuid())
        .bind(book_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(BookRow::into_book).transpose()
    }

    async fn insert(&self, book: &Book) -> Result<(), InfraError> {
        sqlx::query(
            r#"
            INSERT INTO books (id, author_id, title, description, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(book.id().as_uuid())
        .bind(book.author_id().as_uuid())
        .bind(book.title().as_str())
        .bind(book.description().as_str())
        .bind(book.created_at())
        .bind(book.updated_at())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update(&self, book: &Book) -> Result<(), InfraError> {
        sqlx::query(
            r#"
            UPDATE books
            SET title = $3, description = $4, updated_at = $5
            WHERE author_id = $1 AND id = $2
            "#,
        )
        .bind(book.author_id().as_uuid())
        .bind(book.id().as_uuid())
        .bind(book.title().as_str())
        .bind(book.description().as_str())
        .bind(book.updated_at())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, author_id: &AuthorId, book_id: &BookId) -> Result<(), InfraError> {
        sqlx::query("DELETE FROM books WHERE author_id = $1 AND id = $2")
            .bind(author_id.as_uuid())
            .bind(book_id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
