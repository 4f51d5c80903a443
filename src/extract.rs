use regex::Regex;

use crate::models::{PARAGRAPH_BREAK, TextPage};
use crate::position::{Position, Slot};
use crate::source::PageSource;
use crate::window::PageWindow;

/// Serializes the characters in `[start, end]` into plain text.
///
/// Wrapped lines are joined directly. A break is emitted after a line only
/// when its last character was taken and its source text ends a paragraph;
/// one trailing break is dropped.
pub fn extract_text<S: PageSource>(
    window: &PageWindow<S>,
    start: Position,
    end: Position,
) -> String {
    let mut text = String::new();
    for slot in start.slot.through(end.slot) {
        let Some(page) = window.page(slot) else {
            break;
        };
        for (line_index, line) in page.lines.iter().enumerate() {
            if slot == end.slot && line_index > end.line_index {
                break;
            }
            let mut last_taken = None;
            for (char_index, ch) in line.chars.iter().enumerate() {
                let pos = Position::new(slot, line_index, char_index);
                if pos >= start && pos <= end {
                    text.push_str(&ch.char_data);
                    last_taken = Some(char_index);
                }
            }
            if last_taken.is_some_and(|index| index + 1 == line.char_size())
                && line.ends_paragraph()
            {
                text.push(PARAGRAPH_BREAK);
            }
        }
    }
    if text.ends_with(PARAGRAPH_BREAK) {
        text.pop();
    }
    text
}

/// First match of `pattern` on `page`, as an inclusive character range in
/// slot 0.
///
/// The page is searched as its characters joined the way `extract_text`
/// joins them, so a match may span wrapped lines and paragraph breaks.
/// Matches that cover no character (a bare break, an empty match) are
/// skipped.
pub fn find_in_page(page: &TextPage, pattern: &Regex) -> Option<(Position, Position)> {
    let mut haystack = String::new();
    // byte offset where each character starts, with its position
    let mut offsets: Vec<(usize, Position)> = Vec::new();
    for (line_index, line) in page.lines.iter().enumerate() {
        for (char_index, ch) in line.chars.iter().enumerate() {
            offsets.push((haystack.len(), Position::new(Slot::Current, line_index, char_index)));
            haystack.push_str(&ch.char_data);
        }
        if line.ends_paragraph() {
            haystack.push(PARAGRAPH_BREAK);
        }
    }

    let covering = |from: usize, to: usize| -> Option<(Position, Position)> {
        let first = offsets.iter().position(|(offset, _)| *offset >= from)?;
        let last = offsets.iter().rposition(|(offset, _)| *offset < to)?;
        (first <= last).then(|| (offsets[first].1, offsets[last].1))
    };

    pattern
        .find_iter(&haystack)
        .find_map(|m| covering(m.start(), m.end()))
}
