use std::fmt;
use std::fmt::{Display, Formatter};
use chrono::{NaiveDateTime, Utc};
use uuid::Uuid;
use serde::{Deserialize, Serialize};
use crate::books::domain::Book;
use crate::books::domain::model::{BookEntity, BookFormat};
use crate::core::domain::Identifiable;
use crate::core::library::BookStatus;
use crate::utils::date::serializer;

// BookDto is a data transfer object for the catalog service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookDto {
    pub book_id: String,
    pub version: i64,
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub lent: bool,
    #[serde(default)]
    pub status: BookStatus,
    pub format: BookFormat,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

impl BookDto {
    pub fn new(title: &str, author: &str, isbn: &str, format: BookFormat) -> BookDto {
        BookDto {
            book_id: Uuid::new_v4().to_string(),
            version: 0,
            title: title.to_string(),
            author: author.to_string(),
            isbn: isbn.to_string(),
            lent: false,
            status: BookStatus::Listed,
            format,
            created_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
        }
    }

    pub fn printed(title: &str, author: &str, isbn: &str, page_count: u32, cover_type: &str) -> BookDto {
        Self::new(title, author, isbn, BookFormat::printed(page_count, cover_type))
    }

    pub fn electronic(title: &str, author: &str, isbn: &str, file_size_mb: f64, file_format: &str) -> BookDto {
        Self::new(title, author, isbn, BookFormat::electronic(file_size_mb, file_format))
    }

    pub fn mark_lent(&mut self) {
        self.lent = true;
    }

    pub fn mark_available(&mut self) {
        self.lent = false;
    }

    // One-line rendering used by the console listings
    pub fn describe(&self) -> String {
        self.to_string()
    }
}

impl Display for BookDto {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Is lent: {}, Title: {}, Author: {}, ISBN: {}, {}",
               if self.lent { "yes" } else { "no" }, self.title, self.author, self.isbn, self.format)
    }
}

impl Identifiable for BookDto {
    fn id(&self) -> String {
        self.book_id.to_string()
    }

    fn version(&self) -> i64 {
        self.version
    }
}

impl Book for BookDto {
    fn isbn(&self) -> &str {
        self.isbn.as_str()
    }

    fn is_lent(&self) -> bool {
        self.lent
    }

    fn book_type(&self) -> &'static str {
        self.format.book_type()
    }
}

impl From<&BookEntity> for BookDto {
    fn from(other: &BookEntity) -> Self {
        Self {
            book_id: other.book_id.to_string(),
            version: other.version,
            title: other.title.to_string(),
            author: other.author.to_string(),
            isbn: other.isbn.to_string(),
            lent: other.lent,
            status: other.status,
            format: other.format.clone(),
            created_at: other.created_at,
            updated_at: other.updated_at,
        }
    }
}

impl From<&BookDto> for BookEntity {
    fn from(other: &BookDto) -> Self {
        Self {
            book_id: other.book_id.to_string(),
            version: other.version,
            title: other.title.to_string(),
            author: other.author.to_string(),
            isbn: other.isbn.to_string(),
            lent: other.lent,
            status: other.status,
            format: other.format.clone(),
            created_at: other.created_at,
            updated_at: other.updated_at,
        }
    }
}
