//! Domain DTOs for the book catalog.
//!
//! # Design
//! Field names on the wire follow the backend's JSON schema (`bookID`,
//! `publicationYear`, ...) via explicit serde renames. These types mirror the
//! mock-server's schema but are defined independently; integration tests
//! catch any drift between the two crates.

use serde::{Deserialize, Serialize};

/// Backend-assigned book identity.
pub type BookId = i64;

/// Reader identity within the preloaded roster.
pub type ReaderId = i64;

/// A catalog item as exchanged with the book API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Book {
    /// Zero for a book the backend has not assigned an identity to yet.
    #[serde(rename = "bookID", default)]
    pub book_id: BookId,
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(rename = "publicationYear")]
    pub publication_year: i32,
}

/// A library patron from the static roster.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Reader {
    #[serde(rename = "readerID")]
    pub reader_id: ReaderId,
    pub name: String,
    #[serde(rename = "weeklyReadingGoal", default)]
    pub weekly_reading_goal: u32,
    #[serde(rename = "totalMinutesRead", default)]
    pub total_minutes_read: u32,
}

/// Reduced projection of a [`Book`] kept for a deprecated consumer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LegacyBookView {
    #[serde(rename = "bookTitle")]
    pub book_title: String,
    pub year: i32,
}

impl From<&Book> for LegacyBookView {
    fn from(book: &Book) -> Self {
        Self {
            book_title: book.title.clone(),
            year: book.publication_year,
        }
    }
}
