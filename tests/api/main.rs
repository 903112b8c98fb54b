mod download_book;
mod get_book;
mod read_book;
