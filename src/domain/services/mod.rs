pub mod segment_content;
