use actix_web::http::header::ContentType;
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, ResponseError};
use serde::Serialize;
use serde_json::json;
use tracing::info;

use crate::domain::entities::content::{Block, ChapterEntry};
use crate::domain::services::segment_content::segment_content;
use crate::helper::error_chain_fmt;
use crate::repositories::book_catalog_repository::BookCatalogRepository;
use crate::repositories::book_file_store::{BookFileStore, BookFileStoreError};

/// Structured content of one book, ready for client rendering.
#[derive(Debug, Serialize)]
pub struct BookContentResponse {
    pub id: String,
    pub title: String,
    pub author: String,
    pub blocks: Vec<Block>,
    pub chapters: Vec<ChapterEntry>,
    pub content: String,
}

#[tracing::instrument(name = "Read book handler", skip(catalog, file_store))]
pub async fn read_book(
    catalog: web::Data<BookCatalogRepository>,
    file_store: web::Data<BookFileStore>,
    path: web::Path<String>,
) -> Result<HttpResponse, ReadBookError> {
    let id = path.into_inner();

    let book = catalog
        .find_by_any_id(&id)
        .ok_or(ReadBookError::BookNotFound(id))?;

    // Single attempt, no retry: a missing file is a 404, anything else a 500
    let raw_text = file_store
        .read_to_string(&book.file_name)
        .map_err(|error| match error {
            BookFileStoreError::FileNotFound(name) => ReadBookError::FileNotFound(name),
            other => ReadBookError::ReadFailure(other.into()),
        })?;

    let known_chapters = book.chapters.as_deref().unwrap_or(&[]);
    let segmented = segment_content(&raw_text, known_chapters);

    info!(
        "Segmented book {} into {} blocks and {} chapters",
        book.id,
        segmented.blocks.len(),
        segmented.chapters.len()
    );

    Ok(HttpResponse::Ok().json(BookContentResponse {
        id: book.id.clone(),
        title: book.title.clone(),
        author: book.author.clone(),
        blocks: segmented.blocks,
        chapters: segmented.chapters,
        content: segmented.content,
    }))
}

#[derive(thiserror::Error)]
pub enum ReadBookError {
    #[error("No book found for id {0}")]
    BookNotFound(String),
    #[error("The book file {0} is missing from the store")]
    FileNotFound(String),
    #[error("Failed to read the book file")]
    ReadFailure(#[source] anyhow::Error),
}

impl std::fmt::Debug for ReadBookError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for ReadBookError {
    fn status_code(&self) -> StatusCode {
        match self {
            ReadBookError::BookNotFound(_) | ReadBookError::FileNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            ReadBookError::ReadFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    #[tracing::instrument(name = "Response error from read_book handler", skip(self), fields(error = %self))]
    fn error_response(&self) -> HttpResponse<actix_web::body::BoxBody> {
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .json(json!({ "error": self.to_string() }))
    }
}
