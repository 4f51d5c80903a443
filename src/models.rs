use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha1::{Digest, Sha1};

/// Paragraph terminator carried by a line's source text.
pub const PARAGRAPH_BREAK: char = '\n';

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RectF {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl RectF {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        self.left < self.right
            && self.top < self.bottom
            && x >= self.left
            && x < self.right
            && y >= self.top
            && y < self.bottom
    }
}

/// One rendered unit: a glyph cluster or an inline image placeholder.
///
/// For images `char_data` holds the image source reference handed to the
/// image provider.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TextChar {
    pub char_data: String,
    pub start: f32,
    pub end: f32,
    #[serde(default)]
    pub is_image: bool,
    #[serde(default, skip_serializing)]
    pub selected: bool,
    #[serde(default, skip_serializing)]
    pub is_search_result: bool,
}

impl TextChar {
    pub fn new(char_data: impl Into<String>, start: f32, end: f32) -> Self {
        Self {
            char_data: char_data.into(),
            start,
            end,
            ..Self::default()
        }
    }

    pub fn image(src: impl Into<String>, start: f32, end: f32) -> Self {
        Self {
            is_image: true,
            ..Self::new(src, start, end)
        }
    }

    pub fn is_touch(&self, x: f32) -> bool {
        x >= self.start && x < self.end
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TextLine {
    /// Source text the line was laid out from, including a trailing
    /// paragraph terminator when the line closes a paragraph.
    pub text: String,
    pub chars: Vec<TextChar>,
    pub top: f32,
    pub base: f32,
    pub bottom: f32,
    #[serde(default)]
    pub is_title: bool,
    #[serde(default)]
    pub is_read_aloud: bool,
    #[serde(default)]
    pub is_image: bool,
}

impl TextLine {
    pub fn char_size(&self) -> usize {
        self.chars.len()
    }

    pub fn ends_paragraph(&self) -> bool {
        self.text.ends_with(PARAGRAPH_BREAK)
    }

    /// Whether `y` falls inside the line's band once the band is shifted by
    /// the owning slot's vertical offset.
    pub fn is_touch(&self, y: f32, relative_offset: f32) -> bool {
        y >= self.top + relative_offset && y < self.bottom + relative_offset
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChapterMeta {
    pub title: String,
    /// Characters of the chapter laid out on pages before this one.
    pub read_length: usize,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TextPage {
    pub lines: Vec<TextLine>,
    pub height: f32,
    pub chapter_index: usize,
    pub index: usize,
    #[serde(default)]
    pub chapter: Option<ChapterMeta>,
}

impl TextPage {
    pub fn line(&self, index: usize) -> Option<&TextLine> {
        self.lines.get(index)
    }

    /// Offset of `(line_index, char_index)` counted in characters from the
    /// top of the page.
    pub fn select_start_length(&self, line_index: usize, char_index: usize) -> usize {
        let max_index = line_index.min(self.lines.len());
        let before: usize = self.lines[..max_index].iter().map(TextLine::char_size).sum();
        before + char_index
    }

    pub fn text(&self) -> String {
        self.lines.iter().map(|line| line.text.as_str()).collect()
    }

    pub fn clear_flags(&mut self) {
        for ch in self.lines.iter_mut().flat_map(|line| line.chars.iter_mut()) {
            ch.selected = false;
            ch.is_search_result = false;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BookInfo {
    pub name: String,
    #[serde(default)]
    pub author: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bookmark {
    pub id: String,
    pub time: DateTime<Utc>,
    pub book_name: String,
    pub book_author: String,
    pub chapter_index: usize,
    pub chapter_pos: usize,
    pub chapter_name: String,
    pub book_text: String,
    #[serde(default)]
    pub content: String,
}

impl Bookmark {
    /// Short stable id: the first ten hex digits of the SHA-1 of the book
    /// name, chapter index and chapter position.
    pub fn make_id(book_name: &str, chapter_index: usize, chapter_pos: usize) -> String {
        let mut hasher = Sha1::new();
        hasher.update(format!("{book_name}{chapter_index}{chapter_pos}").as_bytes());
        let hash = hasher.finalize();
        hex::encode(hash)[..10].to_string()
    }
}

/// Pages serialized by a layout engine, as read by the `folio` binary.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub book: Option<BookInfo>,
    pub pages: Vec<TextPage>,
}
