//! # 値オブジェクト定義
//!
//! ドメイン層で使用する値オブジェクト。
//!
//! ## 設計方針
//!
//! - 生成時にバリデーションを行い、不正な値のインスタンス化を防ぐ
//! - 一度生成されたら不変
//! - 文字数制限はデータベースのカラム定義と一致させる

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// 人名（名 + 姓）
///
/// 著者の氏名を表す。名と姓はそれぞれ独立したカラムに保存されるが、
/// API レスポンスでは結合した形で返す。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonName {
    first_name: String,
    last_name:  String,
}

impl PersonName {
    pub const MAX_LENGTH: usize = 50;

    /// 人名を生成する
    ///
    /// # Errors
    ///
    /// 名または姓が空、あるいは 50 文字を超える場合はエラーを返す。
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let first_name = first_name.into();
        let last_name = last_name.into();

        if first_name.trim().is_empty() {
            return Err(DomainError::Validation("名は必須です".to_string()));
        }
        if first_name.chars().count() > Self::MAX_LENGTH {
            return Err(DomainError::Validation(format!(
                "名は{}文字以内で入力してください",
                Self::MAX_LENGTH
            )));
        }
        if last_name.trim().is_empty() {
            return Err(DomainError::Validation("姓は必須です".to_string()));
        }
        if last_name.chars().count() > Self::MAX_LENGTH {
            return Err(DomainError::Validation(format!(
                "姓は{}文字以内で入力してください",
                Self::MAX_LENGTH
            )));
        }

        Ok(Self {
            first_name,
            last_name,
        })
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    /// 「名 姓」の形式で結合した氏名を返す
    pub fn full(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// 著者の主要ジャンル
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MainCategory(String);

impl MainCategory {
    pub const MAX_LENGTH: usize = 50;

    /// 主要ジャンルを生成する
    ///
    /// # Errors
    ///
    /// 空文字、または 50 文字を超える場合はエラーを返す。
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();

        if value.trim().is_empty() {
            return Err(DomainError::Validation(
                "主要ジャンルは必須です".to_string(),
            ));
        }
        if value.chars().count() > Self::MAX_LENGTH {
            return Err(DomainError::Validation(format!(
                "主要ジャンルは{}文字以内で入力してください",
                Self::MAX_LENGTH
            )));
        }

        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

/// 書籍タイトル
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookTitle(String);

impl BookTitle {
    pub const MAX_LENGTH: usize = 100;

    /// 書籍タイトルを生成する
    ///
    /// # Errors
    ///
    /// 空文字、または 100 文字を超える場合はエラーを返す。
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();

        if value.trim().is_empty() {
            return Err(DomainError::Validation("タイトルは必須です".to_string()));
        }
        if value.chars().count() > Self::MAX_LENGTH {
            return Err(DomainError::Validation(format!(
                "タイトルは{}文字以内で入力してください",
                Self::MAX_LENGTH
            )));
        }

        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

/// 書籍の説明文
///
/// タイトルと異なり任意入力だが、入力された場合は 1500 文字以内に制限する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookDescription(String);

impl BookDescription {
    pub const MAX_LENGTH: usize = 1500;

    /// 書籍の説明文を生成する
    ///
    /// # Errors
    ///
    /// 1500 文字を超える場合はエラーを返す。
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();

        if value.chars().count() > Self::MAX_LENGTH {
            return Err(DomainError::Validation(format!(
                "説明文は{}文字以内で入力してください",
                Self::MAX_LENGTH
            )));
        }

        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    mod person_name {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_有効な氏名を生成できる() {
            let name = PersonName::new("Jane", "Austen").unwrap();

            assert_eq!(name.first_name(), "Jane");
            assert_eq!(name.last_name(), "Austen");
        }

        #[test]
        fn test_結合氏名は名と姓を半角スペースで連結する() {
            let name = PersonName::new("George", "Orwell").unwrap();

            assert_eq!(name.full(), "George Orwell");
        }

        #[rstest]
        #[case("", "Austen")]
        #[case("   ", "Austen")]
        #[case("Jane", "")]
        #[case("Jane", "   ")]
        fn test_空の名または姓は拒否する(#[case] first: &str, #[case] last: &str) {
            let result = PersonName::new(first, last);

            assert!(matches!(result, Err(DomainError::Validation(_))));
        }

        #[test]
        fn test_50文字を超える名は拒否する() {
            let long_name = "a".repeat(51);
            let result = PersonName::new(long_name, "Austen");

            assert!(matches!(result, Err(DomainError::Validation(_))));
        }

        #[test]
        fn test_50文字ちょうどの姓は受け入れる() {
            let boundary = "a".repeat(50);
            let result = PersonName::new("Jane", boundary);

            assert!(result.is_ok());
        }
    }

    mod main_category {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_有効なジャンルを生成できる() {
            let category = MainCategory::new("Fantasy").unwrap();

            assert_eq!(category.as_str(), "Fantasy");
        }

        #[rstest]
        #[case("")]
        #[case("   ")]
        fn test_空のジャンルは拒否する(#[case] value: &str) {
            let result = MainCategory::new(value);

            assert!(matches!(result, Err(DomainError::Validation(_))));
        }

        #[test]
        fn test_50文字を超えるジャンルは拒否する() {
            let result = MainCategory::new("a".repeat(51));

            assert!(matches!(result, Err(DomainError::Validation(_))));
        }
    }

    mod book_title {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_有効なタイトルを生成できる() {
            let title = BookTitle::new("Pride and Prejudice").unwrap();

            assert_eq!(title.as_str(), "Pride and Prejudice");
        }

        #[test]
        fn test_空のタイトルは拒否する() {
            let result = BookTitle::new("");

            assert!(matches!(result, Err(DomainError::Validation(_))));
        }

        #[test]
        fn test_100文字を超えるタイトルは拒否する() {
            let result = BookTitle::new("a".repeat(101));

            assert!(matches!(result, Err(DomainError::Validation(_))));
        }

        #[test]
        fn test_100文字ちょうどのタイトルは受け入れる() {
            let result = BookTitle::new("a".repeat(100));

            assert!(result.is_ok());
        }
    }

    mod book_description {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_空の説明文は許容する() {
            let description = BookDescription::new("").unwrap();

            assert_eq!(description.as_str(), "");
        }

        #[test]
        fn test_1500文字を超える説明文は拒否する() {
            let result = BookDescription::new("a".repeat(1501));

            assert!(matches!(result, Err(DomainError::Validation(_))));
        }

        #[test]
        fn test_1500文字ちょうどの説明文は受け入れる() {
            let result = BookDescription::new("a".repeat(1500));

            assert!(result.is_ok());
        }
    }
}
