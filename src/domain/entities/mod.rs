pub mod book;
pub mod content;
