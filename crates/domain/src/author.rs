//! # 著者エンティティ
//!
//! 書籍カタログに登録される著者を表すエンティティ。
//!
//! ## 設計方針
//!
//! - フィールドはすべて private とし、getter 経由でのみアクセスする
//! - 生成時に ID と現在時刻を外部から注入する（テスト容易性のため）
//! - 年齢は保存せず、生年月日と現在時刻から都度算出する

use chrono::{DateTime, Datelike, Utc};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::value_objects::{MainCategory, PersonName};

/// 著者 ID
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize,
)]
pub struct AuthorId(Uuid);

impl AuthorId {
    /// 新しい著者 ID を生成する
    ///
    /// UUID v7 を使用することで、生成順にソート可能な ID となる。
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

impl Default for AuthorId {
    fn default() -> Self {
        Self::new()
    }
}

/// 著者エンティティ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    id:            AuthorId,
    name:          PersonName,
    date_of_birth: DateTime<Utc>,
    main_category: MainCategory,
    created_at:    DateTime<Utc>,
    updated_at:    DateTime<Utc>,
}

impl Author {
    /// 新しい著者を生成する
    pub fn new(
        id: AuthorId,
        name: PersonName,
        date_of_birth: DateTime<Utc>,
        main_category: MainCategory,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            date_of_birth,
            main_category,
            created_at: now,
            updated_at: now,
        }
    }

    /// データベースから取得した値でエンティティを復元する
    pub const fn from_db(
        id: AuthorId,
        name: PersonName,
        date_of_birth: DateTime<Utc>,
        main_category: MainCategory,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            date_of_birth,
            main_category,
            created_at,
            updated_at,
        }
    }

    pub const fn id(&self) -> AuthorId {
        self.id
    }

    pub const fn name(&self) -> &PersonName {
        &self.name
    }

    pub const fn date_of_birth(&self) -> DateTime<Utc> {
        self.date_of_birth
    }

    pub const fn main_category(&self) -> &MainCategory {
        &self.main_category
    }

    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// 現在時刻における満年齢を算出する
    ///
    /// 誕生日がまだ到来していない年は 1 歳引く。
    pub fn age(&self, now: DateTime<Utc>) -> i32 {
        let mut age = now.year() - self.date_of_birth.year();

        let birthday_passed = (now.month(), now.day())
            >= (self.date_of_birth.month(), self.date_of_birth.day());
        if !birthday_passed {
            age -= 1;
        }

        age
    }
}
