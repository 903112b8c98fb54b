pub mod download_book;
pub mod get_book;
pub mod health_check;
pub mod list_books;
pub mod read_book;

pub use download_book::download_book;
pub use get_book::get_book;
pub use health_check::health_check;
pub use list_books::list_books;
pub use read_book::read_book;
