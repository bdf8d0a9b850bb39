//! Static reader roster and seed book list supplied at startup.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{Book, BookId, Reader, ReaderId};

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read dataset {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse dataset {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("duplicate readerID {0}")]
    DuplicateReader(ReaderId),

    #[error("duplicate bookID {0}")]
    DuplicateBook(BookId),
}

/// Preloaded records. Read-only once handed to `CatalogAccess`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub readers: Vec<Reader>,
    #[serde(default)]
    pub books: Vec<Book>,
}

impl Dataset {
    pub fn new(readers: Vec<Reader>, books: Vec<Book>) -> Result<Self, DatasetError> {
        let dataset = Self { readers, books };
        dataset.validate()?;
        Ok(dataset)
    }

    /// Load a `{"readers": [...], "books": [...]}` document.
    pub fn from_json_file(path: &Path) -> Result<Self, DatasetError> {
        let raw = fs::read_to_string(path).map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let dataset: Dataset = serde_json::from_str(&raw).map_err(|source| DatasetError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        dataset.validate()?;
        Ok(dataset)
    }

    /// The roster bundled with the application.
    pub fn builtin() -> Self {
        let readers = vec![
            reader(1, "Marie", 400, 5600),
            reader(2, "Daniel", 210, 3000),
            reader(3, "Lanier", 140, 600),
        ];
        let books = vec![
            book(1, "Goodnight Moon", "Margaret Wise Brown", 1953),
            book(2, "Winnie-the-Pooh", "A. A. Milne", 1926),
            book(3, "Where the Wild Things Are", "Maurice Sendak", 1963),
            book(4, "The Hobbit", "J. R. R. Tolkien", 1937),
            book(5, "Curious George", "H. A. Rey", 1941),
            book(
                6,
                "Alexander and the Terrible, Horrible, No Good, Very Bad Day",
                "Judith Viorst",
                1972,
            ),
        ];
        Self { readers, books }
    }

    fn validate(&self) -> Result<(), DatasetError> {
        let mut seen = HashSet::new();
        for r in &self.readers {
            if !seen.insert(r.reader_id) {
                return Err(DatasetError::DuplicateReader(r.reader_id));
            }
        }
        seen.clear();
        for b in &self.books {
            if !seen.insert(b.book_id) {
                return Err(DatasetError::DuplicateBook(b.book_id));
            }
        }
        Ok(())
    }
}

fn reader(id: ReaderId, name: &str, goal: u32, minutes: u32) -> Reader {
    Reader {
        reader_id: id,
        name: name.to_string(),
        weekly_reading_goal: goal,
        total_minutes_read: minutes,
    }
}

fn book(id: BookId, title: &str, author: &str, year: i32) -> Book {
    Book {
        book_id: id,
        title: title.to_string(),
        author: author.to_string(),
        publication_year: year,
    }
}
