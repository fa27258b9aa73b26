//! # テスト用モックリポジトリ
//!
//! ユースケーステストや API テストで使用するインメモリモックリポジトリ。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! hondana-infra = { workspace = true, features = ["test-utils"] }
//! ```
//!
//! 絞り込み・並び替え・ページングは PostgreSQL 実装と同じ意味論で動作する。
//! 並び替えは安定ソートをキーの逆順に適用することで、複数キーの
//! 優先順位を再現する。

use std::{
    cmp::Ordering,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use hondana_domain::{
    author::{Author, AuthorId},
    book::{Book, BookId},
};
use hondana_shared::{PagedList, PageRequest, SortClause, SortDirection};

use crate::{
    error::InfraError,
    repository::{AuthorFilter, AuthorRepository, BookRepository},
};

// ===== MockAuthorRepository =====

#[derive(Clone, Default)]
pub struct MockAuthorRepository {
    authors: Arc<Mutex<Vec<Author>>>,
}

impl MockAuthorRepository {
    pub fn new() -> Self {
        Self {
            authors: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn add_author(&self, author: Author) {
        self.authors.lock().unwrap().push(author);
    }
}

/// ORDER BY カラム名に対応する比較を行う
fn compare_by_column(a: &Author, b: &Author, column: &str) -> Ordering {
    match column {
        "id" => a.id().as_uuid().cmp(&b.id().as_uuid()),
        "first_name" => a.name().first_name().cmp(b.name().first_name()),
        "last_name" => a.name().last_name().cmp(b.name().last_name()),
        "date_of_birth" => a.date_of_birth().cmp(&b.date_of_birth()),
        "main_category" => a.main_category().as_str().cmp(b.main_category().as_str()),
        _ => Ordering::Equal,
    }
}

/// 複数キーの並び替えを安定ソートの逆順適用で再現する
fn apply_sort(authors: &mut [Author], sort: &SortClause) {
    for key in sort.keys().iter().rev() {
        authors.sort_by(|a, b| {
            let ordering = compare_by_column(a, b, key.column);
            match key.direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });
    }
}

fn matches_filter(author: &Author, filter: &AuthorFilter) -> bool {
    if let Some(category) = &filter.main_category {
        if author.main_category().as_str() != category {
            return false;
        }
    }

    if let Some(query) = &filter.search_query {
        let query = query.to_lowercase();
        let hit = author.name().first_name().to_lowercase().contains(&query)
            || author.name().last_name().to_lowercase().contains(&query)
            || author.main_category().as_str().to_lowercase().contains(&query);
        if !hit {
            return false;
        }
    }

    true
}

#[async_trait]
impl AuthorRepository for MockAuthorRepository {
    async fn find_page(
        &self,
        filter: &AuthorFilter,
        sort: &SortClause,
        page: PageRequest,
    ) -> Result<PagedList<Author>, InfraError> {
        let mut matched: Vec<Author> = self
            .authors
            .lock()
            .unwrap()
            .iter()
            .filter(|a| matches_filter(a, filter))
            .cloned()
            .collect();

        if sort.is_empty() {
            matched.sort_by(|a, b| {
                a.name()
                    .first_name()
                    .cmp(b.name().first_name())
                    .then_with(|| a.name().last_name().cmp(b.name().last_name()))
            });
        } else {
            apply_sort(&mut matched, sort);
        }

        Ok(PagedList::create(matched, page))
    }

    async fn find_by_id(&self, id: &AuthorId) -> Result<Option<Author>, InfraError> {
        Ok(self
            .authors
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.id() == *id)
            .cloned())
    }

    async fn find_by_ids(&self, ids: &[AuthorId]) -> Result<Vec<Author>, InfraError> {
        let mut found: Vec<Author> = self
            .authors
            .lock()
            .unwrap()
            .iter()
            .filter(|a| ids.contains(&a.id()))
            .cloned()
            .collect();

        found.sort_by(|a, b| {
            a.name()
                .first_name()
                .cmp(b.name().first_name())
                .then_with(|| a.name().last_name().cmp(b.name().last_name()))
        });

        Ok(found)
    }

    async fn exists(&self, id: &AuthorId) -> Result<bool, InfraError> {
        Ok(self.authors.lock().unwrap().iter().any(|a| a.id() == *id))
    }

    async fn insert(&self, author: &Author) -> Result<(), InfraError> {
        self.authors.lock().unwrap().push(author.clone());
        Ok(())
    }

    async fn insert_many(&self, authors: &[Author]) -> Result<(), InfraError> {
        self.authors.lock().unwrap().extend_from_slice(authors);
        Ok(())
    }

    async fn delete(&self, id: &AuthorId) -> Result<(), InfraError> {
        self.authors.lock().unwrap().retain(|a| a.id() != *id);
        Ok(())
    }
}

// ===== MockBookRepository =====

#[derive(Clone, Default)]
pub struct MockBookRepository {
    books: Arc<Mutex<Vec<Book>>>,
}

impl MockBookRepository {
    pub fn new() -> Self {
        Self {
            books: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn add_book(&self, book: Book) {
        self.books.lock().unwrap().push(book);
    }
}

#[async_trait]
impl BookRepository for MockBookRepository {
    async fn find_all_by_author(&self, author_id: &AuthorId) -> Result<Vec<Book>, InfraError> {
        let mut found: Vec<Book> = self
            .books
            .lock()
            .unwrap()
            .iter()
            .filter(|b| b.author_id() == *author_id)
            .cloned()
            .collect();

        found.sort_by(|a, b| a.title().as_str().cmp(b.title().as_str()));

        Ok(found)
    }

    async fn find_by_id(
        &self,
        author_id: &AuthorId,
        book_id: &BookId,
    ) -> Result<Option<Book>, InfraError> {
        Ok(self
            .books
            .lock()
            .unwrap()
            .iter()
            .find(|b| b.author_id() == *author_id && b.id() == *book_id)
            .cloned())
    }

    async fn insert(&self, book: &Book) -> Result<(), InfraError> {
        self.books.lock().unwrap().push(book.clone());
        Ok(())
    }

    async fn update(&self, book: &Book) -> Result<(), InfraError> {
        let mut books = self.books.lock().unwrap();
        if let Some(stored) = books
            .iter_mut()
            .find(|b| b.author_id() == book.author_id() && b.id() == book.id())
        {
            *stored = book.clone();
        }
        Ok(())
    }

    async fn delete(&self, author_id: &AuthorId, book_id: &BookId) -> Result<(), InfraError> {
        self.books
            .lock()
            .unwrap()
            .retain(|b| !(b.author_id() == *author_id && b.id() == *book_id));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use hondana_domain::value_objects::{MainCategory, PersonName};
    use hondana_shared::{PropertyMapping, PropertyMappingValue, build_sort_clause};
    use pretty_assertions::assert_eq;

    use super::*;

    fn author(first: &str, last: &str, category: &str) -> Author {
        let now = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        Author::new(
            AuthorId::new(),
            PersonName::new(first, last).unwrap(),
            Utc.with_ymd_and_hms(1970, 6, 15, 0, 0, 0).unwrap(),
            MainCategory::new(category).unwrap(),
            now,
        )
    }

    fn name_mapping() -> PropertyMapping {
        PropertyMapping::new().add(
            "name",
            PropertyMappingValue::new(vec!["first_name", "last_name"]),
        )
    }

    #[tokio::test]
    async fn test_絞り込みと並び替えとページングを適用する() {
        let repo = MockAuthorRepository::new();
        for (first, last) in [
            ("Alice", "Aardvark"),
            ("Bob", "Baboon"),
            ("Carol", "Cheetah"),
            ("Dan", "Dingo"),
            ("Eve", "Echidna"),
        ] {
            repo.add_author(author(first, last, "Fantasy"));
        }
        repo.add_author(author("Zed", "Zebra", "Horror"));

        let filter = AuthorFilter {
            main_category: Some("Fantasy".to_string()),
            search_query:  None,
        };
        let sort = build_sort_clause("name desc", &name_mapping()).unwrap();
        let page = PageRequest::new(1, 3);

        let result = repo.find_page(&filter, &sort, page).await.unwrap();

        assert_eq!(result.total_count(), 5);
        let names: Vec<String> = result.items().iter().map(|a| a.name().full()).collect();
        assert_eq!(names, vec!["Eve Echidna", "Dan Dingo", "Carol Cheetah"]);
    }

    #[tokio::test]
    async fn test_部分一致検索は大文字小文字を区別しない() {
        let repo = MockAuthorRepository::new();
        repo.add_author(author("Alice", "Aardvark", "Fantasy"));
        repo.add_author(author("Bob", "Baboon", "Horror"));

        let filter = AuthorFilter {
            main_category: None,
            search_query:  Some("aardvark".to_string()),
        };
        let result = repo
            .find_page(&filter, &SortClause::empty(), PageRequest::new(1, 10))
            .await
            .unwrap();

        assert_eq!(result.total_count(), 1);
        assert_eq!(result.items()[0].name().full(), "Alice Aardvark");
    }
}
