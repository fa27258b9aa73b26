//! # ソート句の構築
//!
//! クライアント指定の `orderBy` 式（例: `"name desc, mainCategory"`）を、
//! ストレージレベルの `ORDER BY` 句に書き換える仕組みを提供する。
//!
//! ## 構成要素
//!
//! - [`PropertyMappingValue`]: 公開フィールド 1 つに対応するカラム列と
//!   逆順フラグ（例: `age` は `date_of_birth` の降順既定）
//! - [`PropertyMapping`]: 公開フィールド名（大文字小文字無視）→ 値 の対応表。
//!   ソート可能なフィールドのホワイトリストを兼ねる
//! - [`PropertyMappingRegistry`]: (公開型, ストレージ型) ペアごとの対応表。
//!   サービス起動時に 1 度だけ構築し、ハンドラへ参照で渡す
//!   （プロセス全体の暗黙的な static は持たない）
//! - [`build_sort_clause`]: 検証済みの式を [`SortClause`] へ変換する
//!
//! ## 文法
//!
//! カンマ区切りの句の並び。各句は `フィールド名` または
//! `フィールド名 asc|desc`（方向キーワードは大文字小文字無視）。
//! 3 語以上の句や未知の方向キーワードは、未登録フィールドと同じく
//! 不正な入力として扱う。
//!
//! ## エラーの区別
//!
//! - マッピング未登録の型ペア → [`PropertyMappingError`]（設定ミス。
//!   クライアントには 4xx ではなく 500 として返す）
//! - 式中の未登録フィールド・不正な句 → 事前検証
//!   （[`PropertyMappingRegistry::valid_mapping_exists_for`]）で 400 に変換する。
//!   検証を通さずに [`build_sort_clause`] に到達した未登録フィールドは
//!   呼び出し側のバグであり、[`SortError::UnmappedField`] で即座に失敗する

use std::{
    any::{TypeId, type_name},
    collections::HashMap,
};

use thiserror::Error;

/// 公開フィールド 1 つ分のマッピング
///
/// 1 つの公開フィールドは 1 つ以上のストレージカラムに対応する
/// （結合フィールド対応。例: `name` → `first_name`, `last_name`）。
/// `revert` が真のフィールドは、要求された方向を反転して適用する
/// （例: `age` 昇順 = `date_of_birth` 降順）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyMappingValue {
    destination_properties: Vec<&'static str>,
    revert: bool,
}

impl PropertyMappingValue {
    /// 通常方向のマッピングを作成する
    pub fn new(destination_properties: Vec<&'static str>) -> Self {
        Self {
            destination_properties,
            revert: false,
        }
    }

    /// 方向反転付きのマッピングを作成する
    pub fn reverted(destination_properties: Vec<&'static str>) -> Self {
        Self {
            destination_properties,
            revert: true,
        }
    }

    /// 対応するストレージカラム（宣言順）
    pub fn destination_properties(&self) -> &[&'static str] {
        &self.destination_properties
    }

    /// 要求方向を反転するか
    pub fn revert(&self) -> bool {
        self.revert
    }
}

/// 公開フィールド名 → [`PropertyMappingValue`] の対応表
///
/// フィールド名の照合は大文字小文字を無視する（ASCII）。
/// 登録順を保持するため内部は `Vec` で持つ。
#[derive(Debug, Clone, Default)]
pub struct PropertyMapping {
    entries: Vec<(&'static str, PropertyMappingValue)>,
}

impl PropertyMapping {
    /// 空の対応表を作成する
    pub fn new() -> Self {
        Self::default()
    }

    /// フィールドを追加する（ビルダー形式）
    pub fn add(mut self, exposed_field: &'static str, value: PropertyMappingValue) -> Self {
        self.entries.push((exposed_field, value));
        self
    }

    /// フィールドのマッピングを取得する（大文字小文字無視）
    pub fn get(&self, field: &str) -> Option<&PropertyMappingValue> {
        self.entries
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(field))
            .map(|(_, value)| value)
    }

    /// フィールドが登録されているか（大文字小文字無視）
    pub fn contains(&self, field: &str) -> bool {
        self.get(field).is_some()
    }
}

/// マッピング表の設定エラー
///
/// 型ペアに対する対応表が未登録の場合に発生する。
/// 新しいリソース型を追加した際の登録漏れを示すプログラミングエラーで、
/// クライアント入力では発生しない。
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PropertyMappingError {
    #[error("プロパティマッピングが登録されていません: <{source_type}, {destination_type}>")]
    MissingMapping {
        source_type:      &'static str,
        destination_type: &'static str,
    },
}

/// (公開型, ストレージ型) ペアごとのマッピング表レジストリ
///
/// サービス初期化時に 1 度だけ構築し、以降は読み取り専用。
/// ハンドラへは `Arc` 経由の参照で渡す。
#[derive(Debug, Default)]
pub struct PropertyMappingRegistry {
    tables: HashMap<(TypeId, TypeId), PropertyMapping>,
}

impl PropertyMappingRegistry {
    /// 空のレジストリを作成する
    pub fn new() -> Self {
        Self::default()
    }

    /// 型ペアに対するマッピング表を登録する
    pub fn register<Source: 'static, Destination: 'static>(&mut self, mapping: PropertyMapping) {
        self.tables.insert(
            (TypeId::of::<Source>(), TypeId::of::<Destination>()),
            mapping,
        );
    }

    /// 型ペアに対するマッピング表を取得する
    ///
    /// # エラー
    ///
    /// ペアが未登録の場合は [`PropertyMappingError::MissingMapping`] を返す。
    pub fn get<Source: 'static, Destination: 'static>(
        &self,
    ) -> Result<&PropertyMapping, PropertyMappingError> {
        self.tables
            .get(&(TypeId::of::<Source>(), TypeId::of::<Destination>()))
            .ok_or(PropertyMappingError::MissingMapping {
                source_type:      type_name::<Source>(),
                destination_type: type_name::<Destination>(),
            })
    }

    /// `orderBy` 式が型ペアのマッピングで有効か検証する
    ///
    /// 空白のみの式は常に有効。各句の方向キーワードを取り除いた
    /// フィールド名がすべて登録済みであれば真を返す。
    /// 不正な形の句（3 語以上など）は未登録フィールドと同様に偽。
    pub fn valid_mapping_exists_for<Source: 'static, Destination: 'static>(
        &self,
        order_by: &str,
    ) -> Result<bool, PropertyMappingError> {
        let mapping = self.get::<Source, Destination>()?;
        Ok(order_by_is_valid(order_by, mapping))
    }
}

/// ソート方向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    /// 反対方向を返す
    pub fn reversed(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    /// SQL キーワード表現
    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Ascending => "ASC",
            Self::Descending => "DESC",
        }
    }
}

/// ストレージカラム 1 つ分のソートキー
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
    pub column:    &'static str,
    pub direction: SortDirection,
}

/// ストレージレベルのソート句
///
/// キーは優先順（第 1 キー、第 2 キー、…）に並ぶ。
/// カラム名はすべて [`PropertyMapping`] 由来の静的な文字列であり、
/// クライアント入力が SQL に混入することはない。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortClause {
    keys: Vec<SortKey>,
}

impl SortClause {
    /// ソートなしの空句を作成する
    pub fn empty() -> Self {
        Self::default()
    }

    /// キーが 1 つもないか
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// ソートキー（優先順）
    pub fn keys(&self) -> &[SortKey] {
        &self.keys
    }

    /// `ORDER BY` の中身として使える SQL 断片を返す
    ///
    /// 例: `"first_name DESC, last_name DESC"`。空句の場合は `None`。
    pub fn to_sql(&self) -> Option<String> {
        if self.keys.is_empty() {
            return None;
        }
        Some(
            self.keys
                .iter()
                .map(|key| format!("{} {}", key.column, key.direction.as_sql()))
                .collect::<Vec<_>>()
                .join(", "),
        )
    }
}

/// ソート句構築のエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SortError {
    /// 句の形が文法に合わない（3 語以上、空の句、未知の方向キーワード）
    #[error("orderBy 句が不正です: {0:?}")]
    MalformedClause(String),

    /// 事前検証を通らずに未登録フィールドが到達した（呼び出し側のバグ）
    #[error("マッピングに存在しないフィールドです: {0:?}")]
    UnmappedField(String),
}

/// `orderBy` 式をパースして (フィールド名, 要求方向) の列にする
fn parse_order_by(order_by: &str) -> Result<Vec<(&str, SortDirection)>, SortError> {
    order_by
        .split(',')
        .map(|clause| {
            let tokens: Vec<&str> = clause.split_whitespace().collect();
            match tokens.as_slice() {
                [field] => Ok((*field, SortDirection::Ascending)),
                [field, direction] if direction.eq_ignore_ascii_case("asc") => {
                    Ok((*field, SortDirection::Ascending))
                }
                [field, direction] if direction.eq_ignore_ascii_case("desc") => {
                    Ok((*field, SortDirection::Descending))
                }
                _ => Err(SortError::MalformedClause(clause.trim().to_string())),
            }
        })
        .collect()
}

/// `orderBy` 式がマッピングに対して有効か検証する
///
/// 空白のみの式は常に有効。パースできない式、マッピングに存在しない
/// フィールドを含む式は無効。
pub fn order_by_is_valid(order_by: &str, mapping: &PropertyMapping) -> bool {
    if order_by.trim().is_empty() {
        return true;
    }
    match parse_order_by(order_by) {
        Ok(clauses) => clauses.iter().all(|(field, _)| mapping.contains(field)),
        Err(_) => false,
    }
}

/// `orderBy` 式をストレージレベルのソート句に変換する
///
/// 各句を左から右の優先順で処理し、マッピングの `destination_properties`
/// を宣言順に展開する。`revert` が真のフィールドは要求方向を反転する。
///
/// # 事前条件
///
/// 式は [`order_by_is_valid`]（または
/// [`PropertyMappingRegistry::valid_mapping_exists_for`]）で検証済みであること。
/// 未登録フィールドは回復不能エラー（[`SortError::UnmappedField`]）になる。
/// 空白のみの式はソートなしの空句を返す。
pub fn build_sort_clause(
    order_by: &str,
    mapping: &PropertyMapping,
) -> Result<SortClause, SortError> {
    if order_by.trim().is_empty() {
        return Ok(SortClause::empty());
    }

    let mut keys = Vec::new();
    for (field, requested) in parse_order_by(order_by)? {
        let value = mapping
            .get(field)
            .ok_or_else(|| SortError::UnmappedField(field.to_string()))?;

        let direction = if value.revert() {
            requested.reversed()
        } else {
            requested
        };

        for &column in value.destination_properties() {
            keys.push(SortKey { column, direction });
        }
    }

    Ok(SortClause { keys })
}
