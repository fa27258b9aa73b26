//! # ページネーション
//!
//! ページ番号方式のページネーションを提供する。
//!
//! ## 構成要素
//!
//! - [`PageRequest`]: クライアント指定のページ番号とページサイズ（上限付き）
//! - [`PagedList`]: フィルタ・ソート済みコレクションの 1 ページ分 + 件数メタデータ
//! - [`PaginationMetadata`]: `X-Pagination` レスポンスヘッダに載せる JSON
//!
//! ## 設計方針
//!
//! - **ソートは上流の責務**: `PagedList` は渡されたコレクションの順序を
//!   そのまま信頼し、並べ替えは行わない
//! - **範囲外ページは空ページ**: `total_pages` を超えるページ番号は
//!   クランプせず、空の `items` を返す（リンク生成メタデータとの
//!   整合性を保つため。DESIGN.md 参照）
//!
//! ## 不変条件
//!
//! - `total_pages == ceil(total_count / page_size)`
//! - `has_previous == (current_page > 1)`
//! - `has_next == (current_page < total_pages)`

use serde::{Deserialize, Serialize};

/// ページ指定（値オブジェクト）
///
/// ページ番号は 1 始まり。ページサイズにはアプリケーション既定値と
/// 上限があり、生成時にクランプされる。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page_number: u32,
    page_size:   u32,
}

impl PageRequest {
    /// ページサイズの既定値
    pub const DEFAULT_PAGE_SIZE: u32 = 10;
    /// ページサイズの上限
    pub const MAX_PAGE_SIZE: u32 = 20;

    /// ページ指定を作成する
    ///
    /// - `page_number` が 0 の場合は 1 に切り上げる
    /// - `page_size` は 1 〜 [`MAX_PAGE_SIZE`](Self::MAX_PAGE_SIZE) にクランプする
    pub fn new(page_number: u32, page_size: u32) -> Self {
        Self {
            page_number: page_number.max(1),
            page_size:   page_size.clamp(1, Self::MAX_PAGE_SIZE),
        }
    }

    /// 1 始まりのページ番号
    pub fn page_number(&self) -> u32 {
        self.page_number
    }

    /// 1 ページあたりの件数
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// SQL の `OFFSET` に渡す値
    pub fn offset(&self) -> i64 {
        i64::from(self.page_number - 1) * i64::from(self.page_size)
    }

    /// SQL の `LIMIT` に渡す値
    pub fn limit(&self) -> i64 {
        i64::from(self.page_size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1, Self::DEFAULT_PAGE_SIZE)
    }
}

/// ページ分割されたコレクション
///
/// フィルタ・ソート済みコレクションの 1 ページ分と、
/// クライアント向けページネーションメタデータを保持する。
/// リクエストごとに構築し、レスポンス直列化後に破棄される
/// （リクエストをまたぐ共有状態は持たない）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagedList<T> {
    items:       Vec<T>,
    total_count: i64,
    page_size:   u32,
    current_page: u32,
    total_pages: u32,
}

impl<T> PagedList<T> {
    /// フィルタ・ソート済みのコレクション全体からページを切り出す
    ///
    /// `skip((page_number - 1) * page_size) take page_size` 相当のスライスを行う。
    /// 範囲外のページ番号は空の `items` になる。
    pub fn create(collection: Vec<T>, page: PageRequest) -> Self {
        let total_count = collection.len() as i64;
        let items = collection
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.page_size() as usize)
            .collect();
        Self::assemble(items, total_count, page)
    }

    /// 件数とスライスを SQL 側で計算済みの場合にページを組み立てる
    ///
    /// `items` は `COUNT(*)` と `LIMIT`/`OFFSET` を適用済みの 1 ページ分
    /// であること。
    pub fn from_parts(items: Vec<T>, total_count: i64, page: PageRequest) -> Self {
        Self::assemble(items, total_count, page)
    }

    fn assemble(items: Vec<T>, total_count: i64, page: PageRequest) -> Self {
        let total_pages = total_count.div_ceil(i64::from(page.page_size())) as u32;
        Self {
            items,
            total_count,
            page_size: page.page_size(),
            current_page: page.page_number(),
            total_pages,
        }
    }

    /// ページ内の要素
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// 全体の件数（ページではなくコレクション全体）
    pub fn total_count(&self) -> i64 {
        self.total_count
    }

    /// 1 ページあたりの件数
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// 現在のページ番号（1 始まり）
    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    /// 総ページ数（`ceil(total_count / page_size)`）
    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// 前のページが存在するか
    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    /// 次のページが存在するか
    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// 要素を変換した新しい `PagedList` を返す
    ///
    /// メタデータ（件数・ページ情報）は変換後も維持される。
    /// エンティティ → DTO の変換に使用する。
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PagedList<U> {
        PagedList {
            items:        self.items.into_iter().map(f).collect(),
            total_count:  self.total_count,
            page_size:    self.page_size,
            current_page: self.current_page,
            total_pages:  self.total_pages,
        }
    }
}

/// `X-Pagination` レスポンスヘッダのペイロード
///
/// ## JSON 形式
///
/// ```json
/// {
///   "totalCount": 7,
///   "pageSize": 3,
///   "currentPage": 2,
///   "totalPages": 3,
///   "previousPageLink": "...",
///   "nextPageLink": "..."
/// }
/// ```
///
/// リンクは該当ページが存在しない場合 `null`。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMetadata {
    pub total_count:        i64,
    pub page_size:          u32,
    pub current_page:       u32,
    pub total_pages:        u32,
    pub previous_page_link: Option<String>,
    pub next_page_link:     Option<String>,
}

impl PaginationMetadata {
    /// `PagedList` とリンクからメタデータを組み立てる
    pub fn from_paged_list<T>(
        list: &PagedList<T>,
        previous_page_link: Option<String>,
        next_page_link: Option<String>,
    ) -> Self {
        Self {
            total_count: list.total_count(),
            page_size: list.page_size(),
            current_page: list.current_page(),
            total_pages: list.total_pages(),
            previous_page_link,
            next_page_link,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn seven_items() -> Vec<i32> {
        (1..=7).collect()
    }

    // ===== PageRequest のテスト =====

    #[test]
    fn test_ページ番号0は1に切り上げる() {
        let page = PageRequest::new(0, 10);
        assert_eq!(page.page_number(), 1);
    }

    #[rstest]
    #[case(0, 1)]
    #[case(10, 10)]
    #[case(20, 20)]
    #[case(100, 20)]
    fn test_ページサイズは1から上限にクランプされる(
        #[case] requested: u32,
        #[case] expected: u32,
    ) {
        let page = PageRequest::new(1, requested);
        assert_eq!(page.page_size(), expected);
    }

    #[test]
    fn test_オフセットはページ番号とサイズから計算される() {
        let page = PageRequest::new(3, 10);
        assert_eq!(page.offset(), 20);
        assert_eq!(page.limit(), 10);
    }

    #[test]
    fn test_既定値はページ1サイズ10() {
        let page = PageRequest::default();
        assert_eq!(page.page_number(), 1);
        assert_eq!(page.page_size(), PageRequest::DEFAULT_PAGE_SIZE);
    }

    // ===== PagedList のテスト =====

    #[test]
    fn test_7件をサイズ3で割ると3ページになる() {
        let list = PagedList::create(seven_items(), PageRequest::new(1, 3));
        assert_eq!(list.total_count(), 7);
        assert_eq!(list.total_pages(), 3);
    }

    #[test]
    fn test_1ページ目は前なし次ありになる() {
        let list = PagedList::create(seven_items(), PageRequest::new(1, 3));
        assert_eq!(list.items(), &[1, 2, 3]);
        assert!(!list.has_previous());
        assert!(list.has_next());
    }

    #[test]
    fn test_2ページ目は4から6を含む() {
        let list = PagedList::create(seven_items(), PageRequest::new(2, 3));
        assert_eq!(list.items(), &[4, 5, 6]);
        assert!(list.has_previous());
        assert!(list.has_next());
    }

    #[test]
    fn test_最終ページは1件で次なしになる() {
        let list = PagedList::create(seven_items(), PageRequest::new(3, 3));
        assert_eq!(list.items(), &[7]);
        assert!(!list.has_next());
    }

    #[test]
    fn test_範囲外ページは空のitemsを返す() {
        let list = PagedList::create(seven_items(), PageRequest::new(5, 3));
        assert!(list.items().is_empty());
        assert_eq!(list.total_pages(), 3);
        assert!(list.has_previous());
        assert!(!list.has_next());
    }

    #[test]
    fn test_空コレクションは総ページ0で前後なし() {
        let list = PagedList::create(Vec::<i32>::new(), PageRequest::new(1, 3));
        assert_eq!(list.total_count(), 0);
        assert_eq!(list.total_pages(), 0);
        assert!(!list.has_previous());
        assert!(!list.has_next());
    }

    #[rstest]
    #[case(0, 3, 0)]
    #[case(1, 3, 1)]
    #[case(3, 3, 1)]
    #[case(4, 3, 2)]
    #[case(7, 3, 3)]
    #[case(9, 3, 3)]
    fn test_総ページ数は切り上げ除算になる(
        #[case] total: i64,
        #[case] size: u32,
        #[case] expected: u32,
    ) {
        let list = PagedList::from_parts(Vec::<i32>::new(), total, PageRequest::new(1, size));
        assert_eq!(list.total_pages(), expected);
    }

    #[test]
    fn test_from_partsはsql側で計算した件数を保持する() {
        let list = PagedList::from_parts(vec![4, 5, 6], 7, PageRequest::new(2, 3));
        assert_eq!(list.items(), &[4, 5, 6]);
        assert_eq!(list.total_count(), 7);
        assert_eq!(list.current_page(), 2);
        assert_eq!(list.total_pages(), 3);
    }

    #[test]
    fn test_mapは要素を変換しメタデータを維持する() {
        let list = PagedList::create(seven_items(), PageRequest::new(2, 3));
        let mapped = list.map(|n| n.to_string());
        assert_eq!(mapped.items(), &["4", "5", "6"]);
        assert_eq!(mapped.total_count(), 7);
        assert_eq!(mapped.current_page(), 2);
        assert_eq!(mapped.total_pages(), 3);
    }

    // ===== PaginationMetadata のテスト =====

    #[test]
    fn test_メタデータはキャメルケースのjsonになる() {
        let list = PagedList::create(seven_items(), PageRequest::new(2, 3));
        let meta = PaginationMetadata::from_paged_list(
            &list,
            Some("/api/authors?pageNumber=1".to_string()),
            Some("/api/authors?pageNumber=3".to_string()),
        );
        let json = serde_json::to_value(&meta).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "totalCount": 7,
                "pageSize": 3,
                "currentPage": 2,
                "totalPages": 3,
                "previousPageLink": "/api/authors?pageNumber=1",
                "nextPageLink": "/api/authors?pageNumber=3",
            })
        );
    }

    #[test]
    fn test_リンクなしのメタデータはnullを直列化する() {
        let list = PagedList::create(vec![1], PageRequest::new(1, 3));
        let meta = PaginationMetadata::from_paged_list(&list, None, None);
        let json = serde_json::to_value(&meta).unwrap();

        assert_eq!(json["previousPageLink"], serde_json::Value::Null);
        assert_eq!(json["nextPageLink"], serde_json::Value::Null);
    }
}
