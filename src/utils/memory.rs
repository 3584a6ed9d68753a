use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tokio::sync::RwLock;
use crate::core::domain::Identifiable;
use crate::core::library::{LibraryError, LibraryResult, PaginatedResult};

// Queryable exposes named attributes of a stored record so that tables can filter on them
pub trait Queryable {
    fn attribute(&self, name: &str) -> Option<String>;
}

// MemoryTable is an insertion-ordered table shared by every repository built over the same store.
pub struct MemoryTable<T> {
    name: String,
    rows: Arc<RwLock<Vec<T>>>,
}

impl<T> Clone for MemoryTable<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            rows: Arc::clone(&self.rows),
        }
    }
}

impl<T> fmt::Debug for MemoryTable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryTable").field("name", &self.name).finish()
    }
}

impl<T: Clone + Send + Sync> MemoryTable<T> {
    pub(crate) fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            rows: Arc::new(RwLock::new(vec![])),
        }
    }

    pub(crate) fn name(&self) -> &str {
        self.name.as_str()
    }

    pub(crate) async fn snapshot(&self) -> Vec<T> {
        self.rows.read().await.clone()
    }

    // first row in insertion order accepted by the predicate
    pub(crate) async fn find_first<F: Fn(&T) -> bool>(&self, predicate: F) -> Option<T> {
        self.rows.read().await.iter().find(|r| predicate(r)).cloned()
    }
}

impl<T: Identifiable + Clone> MemoryTable<T> {
    pub(crate) async fn insert(&self, row: T) -> LibraryResult<usize> {
        let mut rows = self.rows.write().await;
        let id = row.id();
        if rows.iter().any(|r| r.id() == id) {
            return Err(LibraryError::duplicate_key(
                format!("{} already contains {}", self.name, id).as_str()));
        }
        rows.push(row);
        Ok(1)
    }

    // Replaces the row with the same id as `next` only if the stored version still equals
    // `expected_version`.
    pub(crate) async fn replace(&self, expected_version: i64, next: T) -> LibraryResult<usize> {
        let mut rows = self.rows.write().await;
        let id = next.id();
        match rows.iter_mut().find(|r| r.id() == id) {
            Some(existing) if existing.version() == expected_version => {
                *existing = next;
                Ok(1)
            }
            Some(existing) => {
                Err(LibraryError::unavailable(
                    format!("{} {} changed, stored version {} expected {}",
                            self.name, id, existing.version(), expected_version).as_str(),
                    Some("409".to_string()), true))
            }
            None => {
                Err(LibraryError::not_found(format!("{} not found for {}", self.name, id).as_str()))
            }
        }
    }

    pub(crate) async fn get(&self, id: &str) -> LibraryResult<T> {
        self.rows.read().await.iter().find(|r| r.id() == id).cloned().ok_or_else(||
            LibraryError::not_found(format!("{} not found for {}", self.name, id).as_str()))
    }

    // removes the first row with the id; zero when absent
    pub(crate) async fn remove(&self, id: &str) -> usize {
        let mut rows = self.rows.write().await;
        if let Some(pos) = rows.iter().position(|r| r.id() == id) {
            rows.remove(pos);
            1
        } else {
            0
        }
    }
}

impl<T: Queryable + Clone + Send + Sync> MemoryTable<T> {
    pub(crate) async fn query(&self, predicate: &HashMap<String, String>,
                              page: Option<&str>, page_size: usize) -> LibraryResult<PaginatedResult<T>> {
        let offset = parse_page(page)?;
        let page_size = page_size.max(1);
        let rows = self.rows.read().await;
        let mut matched = rows.iter().filter(|r| matches(*r, predicate)).skip(offset);
        let records: Vec<T> = matched.by_ref().take(page_size).cloned().collect();
        let next_page = if matched.next().is_some() {
            Some((offset + records.len()).to_string())
        } else {
            None
        };
        Ok(PaginatedResult::new(page, page_size, next_page, records))
    }
}

fn matches<T: Queryable>(row: &T, predicate: &HashMap<String, String>) -> bool {
    predicate.iter().all(|(k, v)| row.attribute(k.as_str()).as_deref() == Some(v.as_str()))
}

pub(crate) fn parse_page(page: Option<&str>) -> LibraryResult<usize> {
    match page {
        None => Ok(0),
        Some(token) => token.parse::<usize>().map_err(|_|
            LibraryError::validation(format!("invalid page token {}", token).as_str(), Some("400".to_string()))),
    }
}
