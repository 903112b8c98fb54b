pub mod book_catalog_repository;
pub mod book_file_store;
