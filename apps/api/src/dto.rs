//! # レスポンス DTO
//!
//! API が返す JSON 表現。エンティティの内部表現とは独立に定義し、
//! プロパティマッピング表（並び替え）とフィールドセレクタ（部分射影）の
//! 対象となる「公開フィールド」を構成する。

use chrono::{DateTime, Utc};
use hondana_domain::{author::Author, book::Book};
use serde::Serialize;
use uuid::Uuid;

/// 著者 DTO
///
/// 氏名は結合済み、年齢は生年月日から算出済みの「フレンドリー」表現。
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorDto {
    pub id:            Uuid,
    pub name:          String,
    pub age:           i32,
    pub main_category: String,
}

impl AuthorDto {
    /// エンティティから DTO に変換する
    ///
    /// 年齢の算出に現在時刻を使用するため、呼び出し側が注入する。
    pub fn from_author(author: &Author, now: DateTime<Utc>) -> Self {
        Self {
            id:            author.id().as_uuid(),
            name:          author.name().full(),
            age:           author.age(now),
            main_category: author.main_category().as_str().to_string(),
        }
    }
}

/// 書籍 DTO
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookDto {
    pub id:          Uuid,
    pub author_id:   Uuid,
    pub title:       String,
    pub description: String,
}

impl BookDto {
    pub fn from_book(book: &Book) -> Self {
        Self {
            id:          book.id().as_uuid(),
            author_id:   book.author_id().as_uuid(),
            title:       book.title().as_str().to_string(),
            description: book.description().as_str().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use hondana_domain::{
        author::AuthorId,
        value_objects::{MainCategory, PersonName},
    };
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_著者dtoは結合氏名と算出年齢を持つ() {
        let created = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let author = Author::new(
            AuthorId::new(),
            PersonName::new("Jane", "Austen").unwrap(),
            Utc.with_ymd_and_hms(1975, 12, 16, 0, 0, 0).unwrap(),
            MainCategory::new("Romance").unwrap(),
            created,
        );

        let now = Utc.with_ymd_and_hms(2026, 8, 26, 0, 0, 0).unwrap();
        let dto = AuthorDto::from_author(&author, now);

        assert_eq!(dto.name, "Jane Austen");
        assert_eq!(dto.age, 50);
        assert_eq!(dto.main_category, "Romance");
    }

    #[test]
    fn test_著者dtoのjsonはキャメルケースになる() {
        let created = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let author = Author::new(
            AuthorId::new(),
            PersonName::new("Jane", "Austen").unwrap(),
            Utc.with_ymd_and_hms(1975, 12, 16, 0, 0, 0).unwrap(),
            MainCategory::new("Romance").unwrap(),
            created,
        );
        let dto = AuthorDto::from_author(&author, created);
        let json = serde_json::to_value(&dto).unwrap();

        assert!(json.get("mainCategory").is_some());
        assert!(json.get("main_category").is_none());
    }
}
