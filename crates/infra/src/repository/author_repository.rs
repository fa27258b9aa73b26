//! # AuthorRepository
//!
//! 著者情報の永続化を担当するリポジトリ。
//!
//! ## 設計方針
//!
//! - **動的クエリ**: 絞り込み条件と並び順が実行時に決まるため
//!   `QueryBuilder` で SQL を組み立てる
//! - **ページング**: 総件数の取得とページ取得を分離し、`PagedList` に集約
//! - **並び順の安全性**: ORDER BY にはプロパティマッピング由来の
//!   カラム名（`&'static str`）のみを連結する。ユーザー入力は直接渡さない

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use hondana_domain::{
    author::{Author, AuthorId},
    value_objects::{MainCategory, PersonName},
};
use hondana_shared::{PagedList, PageRequest, SortClause};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::error::InfraError;

/// 著者一覧の絞り込み条件
///
/// すべて任意指定。未指定の条件は絞り込みに使用しない。
#[derive(Debug, Clone, Default)]
pub struct AuthorFilter {
    /// 主要ジャンルの完全一致
    pub main_category: Option<String>,
    /// 名・姓・主要ジャンルに対する部分一致検索
    pub search_query:  Option<String>,
}

/// 著者リポジトリトレイト
///
/// 著者情報の永続化操作を定義する。
/// インフラ層で具体的な実装を提供し、ユースケース層から利用する。
#[async_trait]
pub trait AuthorRepository: Send + Sync {
    /// 条件に合致する著者を 1 ページ分取得する
    ///
    /// # 引数
    ///
    /// - `filter`: 絞り込み条件（ジャンル完全一致・部分一致検索）
    /// - `sort`: 並び順。空の場合は名・姓の昇順
    /// - `page`: ページ番号とページサイズ
    ///
    /// # 戻り値
    ///
    /// 絞り込み後の総件数とページ内の著者を保持する [`PagedList`]。
    /// 範囲外のページを指定した場合、要素は空だが総件数は正しい値を返す。
    async fn find_page(
        &self,
        filter: &AuthorFilter,
        sort: &SortClause,
        page: PageRequest,
    ) -> Result<PagedList<Author>, InfraError>;

    /// ID で著者を検索する
    async fn find_by_id(&self, id: &AuthorId) -> Result<Option<Author>, InfraError>;

    /// 複数の ID で著者を一括検索する
    ///
    /// 存在しない ID は無視し、見つかった著者のみ名・姓の昇順で返す。
    /// 空の配列を渡した場合は空の Vec を返す。
    async fn find_by_ids(&self, ids: &[AuthorId]) -> Result<Vec<Author>, InfraError>;

    /// 指定した ID の著者が存在するかを返す
    async fn exists(&self, id: &AuthorId) -> Result<bool, InfraError>;

    /// 著者を登録する
    async fn insert(&self, author: &Author) -> Result<(), InfraError>;

    /// 複数の著者を単一トランザクションで一括登録する
    ///
    /// 1 件でも失敗した場合は全件ロールバックする。
    async fn insert_many(&self, authors: &[Author]) -> Result<(), InfraError>;

    /// 著者を削除する
    ///
    /// 紐づく書籍は外部キーのカスケード削除で同時に削除される。
    async fn delete(&self, id: &AuthorId) -> Result<(), InfraError>;
}

/// PostgreSQL 実装の AuthorRepository
#[derive(Debug, Clone)]
pub struct PostgresAuthorRepository {
    pool: PgPool,
}

impl PostgresAuthorRepository {
    /// 新しいリポジトリインスタンスを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// authors テーブルの行
#[derive(Debug, FromRow)]
struct AuthorRow {
    id:            Uuid,
    first_name:    String,
    last_name:     String,
    date_of_birth: DateTime<Utc>,
    main_category: String,
    created_at:    DateTime<Utc>,
    updated_at:    DateTime<Utc>,
}

impl AuthorRow {
    /// 行からエンティティを復元する
    ///
    /// データベース上の値がドメインの制約を満たさない場合は
    /// `Unexpected` エラーになる（データ不整合の検出）。
    fn into_author(self) -> Result<Author, InfraError> {
        Ok(Author::from_db(
            AuthorId::from_uuid(self.id),
            PersonName::new(self.first_name, self.last_name)
                .map_err(|e| InfraError::unexpected(e.to_string()))?,
            self.date_of_birth,
            MainCategory::new(self.main_category)
                .map_err(|e| InfraError::unexpected(e.to_string()))?,
            self.created_at,
            self.updated_at,
        ))
    }
}

const SELECT_COLUMNS: &str =
    "SELECT id, first_name, last_name, date_of_birth, main_category, created_at, updated_at \
     FROM authors";

/// 絞り込み条件を WHERE 句として組み立てる
fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &AuthorFilter) {
    let mut has_condition = false;

    if let Some(category) = &filter.main_category {
        builder.push(" WHERE main_category = ");
        builder.push_bind(category.clone());
        has_condition = true;
    }

    if let Some(query) = &filter.search_query {
        builder.push(if has_condition { " AND " } else { " WHERE " });

        let pattern = format!("%{query}%");
        builder.push("(first_name ILIKE ");
        builder.push_bind(pattern.clone());
        builder.push(" OR last_name ILIKE ");
        builder.push_bind(pattern.clone());
        builder.push(" OR main_category ILIKE ");
        builder.push_bind(pattern);
        builder.push(")");
    }
}

#[async_trait]
impl AuthorRepository for PostgresAuthorRepository {
    async fn find_page(
        &self,
        filter: &AuthorFilter,
        sort: &SortClause,
        page: PageRequest,
    ) -> Result<PagedList<Author>, InfraError> {
        // 総件数（絞り込み後）
        let mut count_builder = QueryBuilder::new("SELECT COUNT(*) FROM authors");
        push_filter(&mut count_builder, filter);
        let total_count: i64 = count_builder
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;

        // ページ本体
        let mut builder = QueryBuilder::new(SELECT_COLUMNS);
        push_filter(&mut builder, filter);

        builder.push(" ORDER BY ");
        match sort.to_sql() {
            // カラム名はマッピングテーブル由来の &'static str のみ
            Some(order_by) => builder.push(order_by),
            None => builder.push("first_name, last_name"),
        };

        builder.push(" LIMIT ");
        builder.push_bind(page.limit());
        builder.push(" OFFSET ");
        builder.push_bind(page.offset());

        let rows: Vec<AuthorRow> = builder.build_query_as().fetch_all(&self.pool).await?;

        let authors = rows
            .into_iter()
            .map(AuthorRow::into_author)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(PagedList::from_parts(authors, total_count, page))
    }

    async fn find_by_id(&self, id: &AuthorId) -> Result<Option<Author>, InfraError> {
        let row: Option<AuthorRow> = sqlx::query_as(
            r#"
            SELECT id, first_name, last_name, date_of_birth, main_category, created_at, updated_at
            FROM authors
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(AuthorRow::into_author).transpose()
    }

    async fn find_by_ids(&self, ids: &[AuthorId]) -> Result<Vec<Author>, InfraError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let uuid_ids: Vec<Uuid> = ids.iter().map(AuthorId::as_uuid).collect();

        let rows: Vec<AuthorRow> = sqlx::query_as(
            r#"
            SELECT id, first_name, last_name, date_of_birth, main_category, created_at, updated_at
            FROM authors
            WHERE id = ANY($1)
            ORDER BY first_name, last_name
            "#,
        )
        .bind(&uuid_ids)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(AuthorRow::into_author).collect()
    }

    async fn exists(&self, id: &AuthorId) -> Result<bool, InfraError> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM authors WHERE id = $1)")
            .bind(id.as_uuid())
            .fetch_one(&self.pool)
            .await?;

        Ok(exists)
    }

    async fn insert(&self, author: &Author) -> Result<(), InfraError> {
        insert_author(&self.pool, author).await
    }

    async fn insert_many(&self, authors: &[Author]) -> Result<(), InfraError> {
        let mut tx = self.pool.begin().await?;

        for author in authors {
            insert_author(&mut *tx, author).await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn delete(&self, id: &AuthorId) -> Result<(), InfraError> {
        sqlx::query("DELETE FROM authors WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

/// INSERT を接続・トランザクションの両方で使い回せるように分離
async fn insert_author<'e, E>(executor: E, author: &Author) -> Result<(), InfraError>
where
    E: sqlx::Executor<'e, Database = Postgres>,
{
    sqlx::query(
        r#"
        INSERT INTO authors
            (id, first_name, last_name, date_of_birth, main_category, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        "#,
    )
    .bind(author.id().as_uuid())
    .bind(author.name().first_name())
    .bind(author.name().last_name())
    .bind(author.date_of_birth())
    .bind(author.main_category().as_str())
    .bind(author.created_at())
    .bind(author.updated_at())
    .execute(executor)
    .await?;

    Ok(())
}
