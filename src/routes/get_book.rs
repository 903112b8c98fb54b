use actix_web::http::header::ContentType;
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, ResponseError};
use serde_json::json;

use crate::helper::error_chain_fmt;
use crate::repositories::book_catalog_repository::BookCatalogRepository;
use crate::routes::list_books::BookSummary;

#[tracing::instrument(name = "Get book handler", skip(catalog))]
pub async fn get_book(
    catalog: web::Data<BookCatalogRepository>,
    path: web::Path<String>,
) -> Result<HttpResponse, GetBookError> {
    let id = path.into_inner();

    let book = catalog
        .find_by_any_id(&id)
        .ok_or(GetBookError::BookNotFound(id))?;

    Ok(HttpResponse::Ok().json(BookSummary::from(book)))
}

#[derive(thiserror::Error)]
pub enum GetBookError {
    #[error("No book found for id {0}")]
    BookNotFound(String),
}

impl std::fmt::Debug for GetBookError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for GetBookError {
    fn status_code(&self) -> StatusCode {
        match self {
            GetBookError::BookNotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    #[tracing::instrument(name = "Response error from get_book handler", skip(self), fields(error = %self))]
    fn error_response(&self) -> HttpResponse<actix_web::body::BoxBody> {
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .json(json!({ "error": self.to_string() }))
    }
}
