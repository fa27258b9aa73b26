//! # フィールド射影（データシェイピング）
//!
//! クライアント指定の `fields` 式（カンマ区切りの公開フィールド名）に
//! 従って、DTO を「フィールド名 → 値」の順序付きマップへ射影する。
//!
//! ## 設計方針
//!
//! リフレクションの代わりに、DTO ごとに (宣言名, アクセサ関数) の静的な
//! リストを起動時に登録する（[`FieldSelector`]）。射影は名前でアクセサを
//! 引くだけの純粋な変換で、元オブジェクトを変更しない。
//!
//! ## 順序
//!
//! - `fields` が空 → 全フィールドを宣言順に
//! - `fields` が明示 → 要求順に。キーは要求時の表記ではなく宣言名
//!
//! 出力は `serde_json::Map`（`preserve_order` により挿入順を保持）。
//!
//! ## エラーハンドリング
//!
//! 存在しないフィールド名は [`ShapeError::UnknownField`] になる。
//! これはクライアント入力の検証エラーであり、ハンドラは射影の前に
//! [`FieldSelector::has_fields`] でガードして 400 に変換すること。

use serde_json::{Map, Value};
use thiserror::Error;

/// DTO からフィールド値を取り出すアクセサ関数
pub type FieldAccessor<T> = fn(&T) -> Value;

/// フィールド射影のエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShapeError {
    /// 要求されたフィールドが型に存在しない
    #[error("プロパティ {field:?} は型 {type_name} に存在しません")]
    UnknownField {
        field:     String,
        type_name: &'static str,
    },
}

/// DTO 1 型分のフィールドセレクタ
///
/// 公開フィールドの宣言名とアクセサを宣言順に保持する。
/// サービス起動時に 1 度だけ構築し、以降は読み取り専用。
///
/// ## 使用例
///
/// ```
/// use hondana_shared::shaping::FieldSelector;
/// use serde_json::json;
///
/// struct Dto {
///     id:   u32,
///     name: String,
/// }
///
/// let selector = FieldSelector::<Dto>::new("Dto")
///     .field("id", |dto| json!(dto.id))
///     .field("name", |dto| json!(dto.name));
///
/// let dto = Dto { id: 1, name: "a".to_string() };
/// let shaped = selector.shape(&dto, "name").unwrap();
/// assert_eq!(shaped.len(), 1);
/// assert_eq!(shaped["name"], json!("a"));
/// ```
pub struct FieldSelector<T> {
    type_name: &'static str,
    fields:    Vec<(&'static str, FieldAccessor<T>)>,
}

impl<T> FieldSelector<T> {
    /// 空のセレクタを作成する
    ///
    /// `type_name` はエラーメッセージに使う公開型名（例: `"AuthorDto"`）。
    pub fn new(type_name: &'static str) -> Self {
        Self {
            type_name,
            fields: Vec::new(),
        }
    }

    /// フィールドを宣言順に追加する（ビルダー形式）
    pub fn field(mut self, name: &'static str, accessor: FieldAccessor<T>) -> Self {
        self.fields.push((name, accessor));
        self
    }

    /// 宣言名とアクセサを取得する（大文字小文字無視）
    fn find(&self, name: &str) -> Option<(&'static str, FieldAccessor<T>)> {
        self.fields
            .iter()
            .find(|(declared, _)| declared.eq_ignore_ascii_case(name))
            .copied()
    }

    /// `fields` 式のすべての名前が型に存在するか検証する
    ///
    /// 空白のみの式は常に真。マッピング表を介さず、セレクタに登録された
    /// 宣言名との照合のみを行う。射影前のガードとして使用する。
    pub fn has_fields(&self, fields: &str) -> bool {
        if fields.trim().is_empty() {
            return true;
        }
        fields
            .split(',')
            .all(|field| self.find(field.trim()).is_some())
    }

    /// `fields` 式から (宣言名, アクセサ) のリストを解決する
    fn resolve(
        &self,
        fields: &str,
    ) -> Result<Vec<(&'static str, FieldAccessor<T>)>, ShapeError> {
        if fields.trim().is_empty() {
            return Ok(self.fields.clone());
        }

        fields
            .split(',')
            .map(|field| {
                let requested = field.trim();
                self.find(requested).ok_or_else(|| ShapeError::UnknownField {
                    field:     requested.to_string(),
                    type_name: self.type_name,
                })
            })
            .collect()
    }

    /// 単一オブジェクトを射影する
    ///
    /// `fields` が空の場合は全フィールドを宣言順に含める。
    pub fn shape(&self, source: &T, fields: &str) -> Result<Map<String, Value>, ShapeError> {
        let accessors = self.resolve(fields)?;
        Ok(Self::project(source, &accessors))
    }

    /// 同種オブジェクトの列を射影する
    ///
    /// フィールドの解決は 1 回だけ行い、全要素に適用する。
    pub fn shape_many(
        &self,
        sources: &[T],
        fields: &str,
    ) -> Result<Vec<Map<String, Value>>, ShapeError> {
        let accessors = self.resolve(fields)?;
        Ok(sources
            .iter()
            .map(|source| Self::project(source, &accessors))
            .collect())
    }

    fn project(source: &T, accessors: &[(&'static str, FieldAccessor<T>)]) -> Map<String, Value> {
        accessors
            .iter()
            .map(|(name, accessor)| ((*name).to_string(), accessor(source)))
            .collect()
    }
}

impl<T> std::fmt::Debug for FieldSelector<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldSelector")
            .field("type_name", &self.type_name)
            .field(
                "fields",
                &self.fields.iter().map(|(name, _)| *name).collect::<Vec<_>>(),
            )
            .finish()
    }
}
