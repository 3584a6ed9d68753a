use std::fmt;
use std::fmt::{Display, Formatter};
use chrono::{NaiveDateTime, Utc};
use uuid::Uuid;
use serde::{Deserialize, Serialize};
use crate::books::domain::Book;
use crate::core::domain::Identifiable;
use crate::core::library::BookStatus;
use crate::utils::date::serializer;
use crate::utils::memory::Queryable;

// BookFormat carries the fields that only one kind of book has.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BookFormat {
    Printed {
        page_count: u32,
        cover_type: String,
    },
    Electronic {
        file_size_mb: f64,
        file_format: String,
    },
}

impl BookFormat {
    pub fn printed(page_count: u32, cover_type: &str) -> Self {
        BookFormat::Printed { page_count, cover_type: cover_type.to_string() }
    }

    pub fn electronic(file_size_mb: f64, file_format: &str) -> Self {
        BookFormat::Electronic { file_size_mb, file_format: file_format.to_string() }
    }

    pub fn book_type(&self) -> &'static str {
        match self {
            BookFormat::Printed { .. } => "Printed Book",
            BookFormat::Electronic { .. } => "E-Book",
        }
    }
}

impl Display for BookFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            BookFormat::Printed { page_count, cover_type } => {
                write!(f, "Number of Pages: {}, Cover Type: {}", page_count, cover_type)
            }
            // Debug keeps a fractional digit on whole sizes, e.g. 2.0
            BookFormat::Electronic { file_size_mb, file_format } => {
                write!(f, "File Size: {:?}MB, File Format: {}", file_size_mb, file_format)
            }
        }
    }
}

// BookEntity is the stored form of one book in the catalog. Several entities may share
// an isbn; book_id tells them apart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookEntity {
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

impl BookEntity {
    pub fn new(title: &str, author: &str, isbn: &str, format: BookFormat) -> Self {
        Self {
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

    pub fn mark_lent(&mut self) {
        self.lent = true;
    }

    pub fn mark_available(&mut self) {
        self.lent = false;
    }

    // Takes the book off the shelf; the lent flag is left as it was.
    pub fn mark_removed(&mut self) {
        self.status = BookStatus::Removed;
    }

    pub fn is_removed(&self) -> bool {
        self.status == BookStatus::Removed
    }
}

impl Identifiable for BookEntity {
    fn id(&self) -> String {
        self.book_id.to_string()
    }

    fn version(&self) -> i64 {
        self.version
    }
}

impl Book for BookEntity {
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

impl Queryable for BookEntity {
    fn attribute(&self, name: &str) -> Option<String> {
        match name {
            "book_id" => Some(self.book_id.to_string()),
            "isbn" => Some(self.isbn.to_string()),
            "title" => Some(self.title.to_string()),
            "author" => Some(self.author.to_string()),
            "lent" => Some(self.lent.to_string()),
            "status" => Some(self.status.to_string()),
            "book_type" => Some(self.book_type().to_string()),
            _ => None,
        }
    }
}
