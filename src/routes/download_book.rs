use actix_web::http::header::{self, ContentType};
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, ResponseError};
use serde_json::json;

use crate::helper::error_chain_fmt;
use crate::repositories::book_catalog_repository::BookCatalogRepository;
use crate::repositories::book_file_store::{
    sanitized_basename, BookFileStore, BookFileStoreError,
};

#[tracing::instrument(name = "Download book handler", skip(catalog, file_store))]
pub async fn download_book(
    catalog: web::Data<BookCatalogRepository>,
    file_store: web::Data<BookFileStore>,
    path: web::Path<String>,
) -> Result<HttpResponse, DownloadBookError> {
    let id = path.into_inner();

    let book = catalog
        .find_by_any_id(&id)
        .ok_or(DownloadBookError::BookNotFound(id))?;

    let bytes = file_store.read(&book.file_name).map_err(|error| match error {
        BookFileStoreError::FileNotFound(name) => DownloadBookError::FileNotFound(name),
        other => DownloadBookError::ReadFailure(other.into()),
    })?;

    let file_name = sanitized_basename(&book.file_name).unwrap_or_else(|| "book.txt".to_string());

    Ok(HttpResponse::Ok()
        .insert_header(ContentType::plaintext())
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", file_name),
        ))
        .body(bytes))
}

#[derive(thiserror::Error)]
pub enum DownloadBookError {
    #[error("No book found for id {0}")]
    BookNotFound(String),
    #[error("The book file {0} is missing from the store")]
    FileNotFound(String),
    #[error("Failed to read the book file")]
    ReadFailure(#[source] anyhow::Error),
}

impl std::fmt::Debug for DownloadBookError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for DownloadBookError {
    fn status_code(&self) -> StatusCode {
        match self {
            DownloadBookError::BookNotFound(_) | DownloadBookError::FileNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            DownloadBookError::ReadFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    #[tracing::instrument(name = "Response error from download_book handler", skip(self), fields(error = %self))]
    fn error_response(&self) -> HttpResponse<actix_web::body::BoxBody> {
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .json(json!({ "error": self.to_string() }))
    }
}
