use serde::{Deserialize, Serialize};

/// One structural unit of rendered book content, in source order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Block {
    Paragraph {
        text: String,
    },
    Chapter {
        title: String,
        #[serde(rename = "anchorId")]
        anchor_id: String,
    },
    Image {
        url: String,
    },
}

/// Chapter list entry, deduplicated by anchor id (first occurrence wins).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterEntry {
    pub title: String,

    #[serde(rename = "anchorId")]
    pub anchor_id: String,
}

/// Result of segmenting a raw book text: the ordered blocks, the
/// deduplicated chapter list, and the rendered markup string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SegmentedContent {
    pub blocks: Vec<Block>,
    pub chapters: Vec<ChapterEntry>,
    pub content: String,
}
