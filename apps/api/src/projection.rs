//! # リソース射影の構成
//!
//! 公開フィールドとストレージカラムの対応表（並び替え用）と、
//! `fields` パラメータによる部分射影のセレクタをまとめて保持する。
//!
//! ## 設計方針
//!
//! - 起動時に 1 度だけ構築し、`Arc` でハンドラへ共有する（グローバル状態なし）
//! - 対応表は (公開 DTO 型, エンティティ型) のペアで登録する
//! - `age` は `date_of_birth` への逆方向マッピング
//!   （年齢の昇順 = 生年月日の降順）

use hondana_domain::author::Author;
use hondana_shared::{
    FieldSelector,
    PropertyMapping,
    PropertyMappingError,
    PropertyMappingRegistry,
    PropertyMappingValue,
    SortClause,
    SortError,
    build_sort_clause,
};
use serde_json::json;

use crate::dto::{AuthorDto, BookDto};

/// 射影の構成一式
///
/// マッピング表レジストリとフィールドセレクタを保持する。
pub struct Projections {
    registry:      PropertyMappingRegistry,
    author_fields: FieldSelector<AuthorDto>,
    book_fields:   FieldSelector<BookDto>,
}

impl Projections {
    /// 全リソースの射影構成を組み立てる
    pub fn build() -> Self {
        let mut registry = PropertyMappingRegistry::new();
        registry.register::<AuthorDto, Author>(
            PropertyMapping::new()
                .add("id", PropertyMappingValue::new(vec!["id"]))
                .add(
                    "mainCategory",
                    PropertyMappingValue::new(vec!["main_category"]),
                )
                .add("age", PropertyMappingValue::reverted(vec!["date_of_birth"]))
                .add(
                    "name",
                    PropertyMappingValue::new(vec!["first_name", "last_name"]),
                ),
        );

        let author_fields = FieldSelector::new("AuthorDto")
            .field("id", |a: &AuthorDto| json!(a.id))
            .field("name", |a: &AuthorDto| json!(a.name))
            .field("age", |a: &AuthorDto| json!(a.age))
            .field("mainCategory", |a: &AuthorDto| json!(a.main_category));

        let book_fields = FieldSelector::new("BookDto")
            .field("id", |b: &BookDto| json!(b.id))
            .field("authorId", |b: &BookDto| json!(b.author_id))
            .field("title", |b: &BookDto| json!(b.title))
            .field("description", |b: &BookDto| json!(b.description));

        Self {
            registry,
            author_fields,
            book_fields,
        }
    }

    /// 著者リソースの `orderBy` 式を検証する
    pub fn author_order_by_is_valid(&self, order_by: &str) -> Result<bool, PropertyMappingError> {
        self.registry
            .valid_mapping_exists_for::<AuthorDto, Author>(order_by)
    }

    /// 著者リソースの `orderBy` 式をストレージレベルのソート句に変換する
    ///
    /// 事前に [`author_order_by_is_valid`](Self::author_order_by_is_valid) で
    /// 検証済みであること。
    pub fn author_sort_clause(&self, order_by: &str) -> Result<SortClause, ApiSortError> {
        let mapping = self.registry.get::<AuthorDto, Author>()?;
        Ok(build_sort_clause(order_by, mapping)?)
    }

    /// 著者 DTO のフィールドセレクタ
    pub fn author_fields(&self) -> &FieldSelector<AuthorDto> {
        &self.author_fields
    }

    /// 書籍 DTO のフィールドセレクタ
    pub fn book_fields(&self) -> &FieldSelector<BookDto> {
        &self.book_fields
    }
}

/// ソート句構築で発生しうるエラーの合成型
#[derive(Debug, thiserror::Error)]
pub enum ApiSortError {
    #[error(transparent)]
    Mapping(#[from] PropertyMappingError),
    #[error(transparent)]
    Sort(#[from] SortError),
}

#[cfg(test)]
mod tests {
    use hondana_shared::{SortDirection, SortKey};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("name", true)]
    #[case("name desc", true)]
    #[case("age asc, mainCategory", true)]
    #[case("unknown", false)]
    #[case("name desc asc", false)]
    fn test_著者のorder_by検証はマッピング表に従う(
        #[case] expr: &str,
        #[case] expected: bool,
    ) {
        let projections = Projections::build();

        assert_eq!(projections.author_order_by_is_valid(expr).unwrap(), expected);
    }

    #[test]
    fn test_nameの降順は名と姓の降順に展開される() {
        let projections = Projections::build();
        let clause = projections.author_sort_clause("name desc").unwrap();

        assert_eq!(
            clause.keys(),
            &[
                SortKey {
                    column:    "first_name",
                    direction: SortDirection::Descending,
                },
                SortKey {
                    column:    "last_name",
                    direction: SortDirection::Descending,
                },
            ]
        );
    }

    #[test]
    fn test_ageの昇順は生年月日の降順に反転される() {
        let projections = Projections::build();
        let clause = projections.author_sort_clause("age asc").unwrap();

        assert_eq!(
            clause.keys(),
            &[SortKey {
                column:    "date_of_birth",
                direction: SortDirection::Descending,
            }]
        );
    }

    #[test]
    fn test_著者セレクタは公開フィールドのみ受け入れる() {
        let projections = Projections::build();

        assert!(projections.author_fields().has_fields("id,name,age"));
        assert!(projections.author_fields().has_fields("mainCategory"));
        assert!(!projections.author_fields().has_fields("dateOfBirth"));
    }
}
