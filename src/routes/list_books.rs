use actix_web::{web, HttpResponse};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::book::Book;
use crate::repositories::book_catalog_repository::BookCatalogRepository;

/// Book metadata exposed on the listing and detail endpoints.
/// Never carries content or the stored file name.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookSummary {
    pub id: String,
    pub title: String,
    pub author: String,
    pub price_cents: Option<i64>,
    pub paid: bool,
    pub added_at: DateTime<Utc>,
}

impl From<&Book> for BookSummary {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id.clone(),
            title: book.title.clone(),
            author: book.author.clone(),
            price_cents: book.price_cents,
            paid: book.paid,
            added_at: book.added_at,
        }
    }
}

#[tracing::instrument(name = "List books handler", skip(catalog))]
pub async fn list_books(catalog: web::Data<BookCatalogRepository>) -> HttpResponse {
    let books: Vec<BookSummary> = catalog.all().iter().map(BookSummary::from).collect();

    HttpResponse::Ok().json(books)
}
