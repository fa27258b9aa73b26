//! # 書籍エンティティ
//!
//! 著者に紐づく書籍を表すエンティティ。
//!
//! ## 設計方針
//!
//! - 書籍は必ず 1 人の著者に属する（`author_id` で紐づけ）
//! - タイトルと説明文が同一の書籍は登録できない
//! - 更新は `with_content` による不変更新スタイルで行う

use chrono::{DateTime, Utc};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    author::AuthorId,
    error::DomainError,
    value_objects::{BookDescription, BookTitle},
};

/// 書籍 ID
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize,
)]
pub struct BookId(Uuid);

impl BookId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for BookId {
    fn default() -> Self {
        Self::new()
    }
}

/// 書籍エンティティ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    id:          BookId,
    author_id:   AuthorId,
    title:       BookTitle,
    description: BookDescription,
    created_at:  DateTime<Utc>,
    updated_at:  DateTime<Utc>,
}

impl Book {
    /// 新しい書籍を生成する
    ///
    /// # Errors
    ///
    /// タイトルと説明文が同一の場合はエラーを返す。
    pub fn new(
        id: BookId,
        author_id: AuthorId,
        title: BookTitle,
        description: BookDescription,
        now: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        Self::ensure_title_differs_from_description(&title, &description)?;

        Ok(Self {
            id,
            author_id,
            title,
            description,
            created_at: now,
            updated_at: now,
        })
    }

    /// データベースから取得した値でエンティティを復元する
    pub const fn from_db(
        id: BookId,
        author_id: AuthorId,
        title: BookTitle,
        description: BookDescription,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            author_id,
            title,
            description,
            created_at,
            updated_at,
        }
    }

    pub const fn id(&self) -> BookId {
        self.id
    }

    pub const fn author_id(&self) -> AuthorId {
        self.author_id
    }

    pub const fn title(&self) -> &BookTitle {
        &self.title
    }

    pub const fn description(&self) -> &BookDescription {
        &self.description
    }

    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// タイトルと説明文を差し替えた新しい書籍を返す
    ///
    /// # Errors
    ///
    /// タイトルと説明文が同一の場合はエラーを返す。
    pub fn with_content(
        self,
        title: BookTitle,
        description: BookDescription,
        now: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        Self::ensure_title_differs_from_description(&title, &description)?;

        Ok(Self {
            title,
            description,
            updated_at: now,
            ..self
        })
    }

    fn ensure_title_differs_from_description(
        title: &BookTitle,
        description: &BookDescription,
    ) -> Result<(), DomainError> {
        if title.as_str() == description.as_str() {
            return Err(DomainError::Validation(
                "タイトルと説明文には異なる値を指定してください".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    use super::*;

    #[fixture]
    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap()
    }

    #[fixture]
    fn book(now: DateTime<Utc>) -> Book {
        Book::new(
            BookId::new(),
            AuthorId::new(),
            BookTitle::new("Emma").unwrap(),
            BookDescription::new("A novel of manners").unwrap(),
            now,
        )
        .unwrap()
    }

    #[rstest]
    fn test_タイトルと説明文が異なる書籍を生成できる(now: DateTime<Utc>) {
        let book = Book::new(
            BookId::new(),
            AuthorId::new(),
            BookTitle::new("Emma").unwrap(),
            BookDescription::new("A novel of manners").unwrap(),
            now,
        )
        .unwrap();

        assert_eq!(book.title().as_str(), "Emma");
        assert_eq!(book.description().as_str(), "A novel of manners");
        assert_eq!(book.created_at(), now);
        assert_eq!(book.updated_at(), now);
    }

    #[rstest]
    fn test_タイトルと説明文が同一の書籍は拒否する(now: DateTime<Utc>) {
        let result = Book::new(
            BookId::new(),
            AuthorId::new(),
            BookTitle::new("Emma").unwrap(),
            BookDescription::new("Emma").unwrap(),
            now,
        );

        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[rstest]
    fn test_内容を差し替えると更新日時のみ進む(book: Book) {
        let created_at = book.created_at();
        let later = Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap();

        let updated = book
            .with_content(
                BookTitle::new("Persuasion").unwrap(),
                BookDescription::new("Her last completed novel").unwrap(),
                later,
            )
            .unwrap();

        assert_eq!(updated.title().as_str(), "Persuasion");
        assert_eq!(updated.created_at(), created_at);
        assert_eq!(updated.updated_at(), later);
    }

    #[rstest]
    fn test_差し替え後のタイトルと説明文が同一の場合は拒否する(book: Book) {
        let later = Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap();

        let result = book.with_content(
            BookTitle::new("Persuasion").unwrap(),
            BookDescription::new("Persuasion").unwrap(),
            later,
        );

        assert!(matches!(result, Err(DomainError::Validation(_))));
    }
}
