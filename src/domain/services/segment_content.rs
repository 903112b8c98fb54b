use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

use crate::domain::entities::book::ChapterMeta;
use crate::domain::entities::content::{Block, ChapterEntry, SegmentedContent};

const NO_CONTENT_PLACEHOLDER: &str = "No content available.";

/// A paragraph shorter than this, with fewer than `MAX_HEADING_WORDS` words
/// and no lowercase letter, is treated as a chapter heading.
const MAX_HEADING_CHARS: usize = 120;
const MAX_HEADING_WORDS: usize = 12;

// One-or-more blank lines; lines of spaces/tabs count as blank.
static BLANK_LINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\r?\n([ \t]*\r?\n)+").unwrap());
static IMAGE_REF: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\[image:(?P<url>[^\]]*)\]$").unwrap());
static HEADING_KEYWORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^(part|chapter)\b").unwrap());
static ROMAN_NUMERAL_DOT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[IVXLCDM]+\.(\s|$)").unwrap());

/// Reconstructs the structure of a plain-text book: chapter headings,
/// paragraph blocks and inline `[image:<url>]` references.
///
/// Pure and synchronous. Classification priority for each blank-line-delimited
/// paragraph candidate:
/// 1. exact case-insensitive match against a known chapter title;
/// 2. heading heuristic (PART/CHAPTER keyword, Roman-numeral-dot prefix, or
///    short all-uppercase text);
/// 3. bracketed image reference;
/// 4. plain paragraph.
///
/// Malformed content never fails: anything that doesn't match falls through
/// to a paragraph.
pub fn segment_content(raw_text: &str, known_chapters: &[ChapterMeta]) -> SegmentedContent {
    let mut blocks: Vec<Block> = Vec::new();
    let mut chapters: Vec<ChapterEntry> = Vec::new();

    for candidate in BLANK_LINES.split(raw_text) {
        // Internal newlines collapse to single spaces
        let text = candidate
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        if text.is_empty() {
            continue;
        }

        if let Some(known) = known_chapters
            .iter()
            .find(|chapter| chapter.title.to_lowercase() == text.to_lowercase())
        {
            let anchor_id = known
                .anchor_id
                .clone()
                .filter(|anchor| !anchor.is_empty())
                .unwrap_or_else(|| derive_anchor_id(&known.title));
            push_chapter(&mut blocks, &mut chapters, &text, anchor_id);
        } else if looks_like_heading(&text) {
            let anchor_id = derive_anchor_id(&text);
            push_chapter(&mut blocks, &mut chapters, &text, anchor_id);
        } else if let Some(captures) = IMAGE_REF.captures(&text) {
            blocks.push(Block::Image {
                url: captures["url"].trim().to_string(),
            });
        } else {
            blocks.push(Block::Paragraph { text });
        }
    }

    // A book with stored chapter metadata should never render an empty
    // table of contents just because the text matched none of the titles.
    if chapters.is_empty() && !known_chapters.is_empty() {
        for known in known_chapters {
            let anchor_id = known
                .anchor_id
                .clone()
                .filter(|anchor| !anchor.is_empty())
                .unwrap_or_else(|| derive_anchor_id(&known.title));
            if !chapters.iter().any(|entry| entry.anchor_id == anchor_id) {
                chapters.push(ChapterEntry {
                    title: known.title.clone(),
                    anchor_id,
                });
            }
        }
    }

    let content = render_markup(&blocks);

    SegmentedContent {
        blocks,
        chapters,
        content,
    }
}

/// Derives a URL/HTML-safe slug from a chapter title: lowercase, diacritics
/// stripped through NFD, non-alphanumeric runs collapsed to single hyphens.
///
/// Deterministic and idempotent: the same title always yields the same id,
/// and a derived id maps to itself.
pub fn derive_anchor_id(title: &str) -> String {
    let lowered = title.to_lowercase();

    // NFD splits letters from their combining marks, which are then dropped
    let stripped: String = lowered.nfd().filter(|c| !is_combining_mark(*c)).collect();

    let mut slug = String::with_capacity(stripped.len());
    let mut previous_was_hyphen = true;
    for c in stripped.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c);
            previous_was_hyphen = false;
        } else if !previous_was_hyphen {
            slug.push('-');
            previous_was_hyphen = true;
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }

    // A title with no alphanumeric characters at all would break the
    // non-empty anchor invariant
    if slug.is_empty() {
        return String::from("chapter");
    }
    slug
}

fn looks_like_heading(text: &str) -> bool {
    if HEADING_KEYWORD.is_match(text) || ROMAN_NUMERAL_DOT.is_match(text) {
        return true;
    }

    text.chars().count() < MAX_HEADING_CHARS
        && text.split_whitespace().count() < MAX_HEADING_WORDS
        && text.chars().any(|c| c.is_alphabetic())
        && !text.chars().any(|c| c.is_lowercase())
}

/// Anchor id collisions are silently merged: the block keeps the shared id,
/// the chapter list keeps the first occurrence only.
fn push_chapter(
    blocks: &mut Vec<Block>,
    chapters: &mut Vec<ChapterEntry>,
    title: &str,
    anchor_id: String,
) {
    blocks.push(Block::Chapter {
        title: title.to_string(),
        anchor_id: anchor_id.clone(),
    });

    if !chapters.iter().any(|entry| entry.anchor_id == anchor_id) {
        chapters.push(ChapterEntry {
            title: title.to_string(),
            anchor_id,
        });
    }
}

fn render_markup(blocks: &[Block]) -> String {
    if blocks.is_empty() {
        return String::from(NO_CONTENT_PLACEHOLDER);
    }

    blocks
        .iter()
        .map(|block| match block {
            Block::Chapter { title, .. } => format!("<h2>{}</h2>", title),
            Block::Paragraph { text } => format!("<p>{}</p>", text),
            Block::Image { url } => format!("<img src=\"{}\" alt=\"image\" />", url),
        })
        .collect::<Vec<_>>()
        .join("\n")
}
