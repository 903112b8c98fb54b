use std::path::Path;

use tracing::info;
use uuid::Uuid;

use crate::domain::entities::book::Book;
use crate::helper::error_chain_fmt;

/// In-memory book catalog, loaded once at startup from a JSON seed file.
///
/// Shared read-only across all actix workers.
pub struct BookCatalogRepository {
    books: Vec<Book>,
}

#[derive(thiserror::Error)]
pub enum BookCatalogRepositoryError {
    #[error("Could not read the catalog file: {0}")]
    IOError(#[from] std::io::Error),
    #[error("Could not parse the catalog file: {0}")]
    ParseError(#[from] serde_json::Error),
}

impl std::fmt::Debug for BookCatalogRepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl BookCatalogRepository {
    #[tracing::instrument(name = "Loading book catalog")]
    pub fn load(catalog_file: &Path) -> Result<Self, BookCatalogRepositoryError> {
        let raw = std::fs::read_to_string(catalog_file)?;
        let books: Vec<Book> = serde_json::from_str(&raw)?;

        info!(
            "Loaded {} books from {}",
            books.len(),
            catalog_file.display()
        );
        Ok(Self { books })
    }

    pub fn from_books(books: Vec<Book>) -> Self {
        Self { books }
    }

    pub fn all(&self) -> &[Book] {
        &self.books
    }

    /// Looks a book up whatever the id format: ids that parse as UUIDs are
    /// compared canonically (so casing and formatting of the UUID do not
    /// matter), anything else is compared as a raw string.
    #[tracing::instrument(name = "Looking up book by id", skip(self))]
    pub fn find_by_any_id(&self, id: &str) -> Option<&Book> {
        if let Ok(uuid) = Uuid::parse_str(id) {
            let by_uuid = self.books.iter().find(|book| {
                Uuid::parse_str(&book.id)
                    .map(|stored| stored == uuid)
                    .unwrap_or(false)
            });
            if by_uuid.is_some() {
                return by_uuid;
            }
        }

        self.books.iter().find(|book| book.id == id)
    }
}
