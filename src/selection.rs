use crate::position::{Position, Slot};
use crate::source::PageSource;
use crate::window::PageWindow;

/// Ordered `[start, end]` pair of positions.
///
/// Boundary moves that would invert the range are refused rather than
/// swapped, so `start <= end` holds after any sequence of `move_start` and
/// `move_end` calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectionEngine {
    start: Position,
    end: Position,
    started: bool,
    active: bool,
}

impl SelectionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn end(&self) -> Position {
        self.end
    }

    /// False until a selection is begun or a boundary is set, and again
    /// after `reset`.
    pub fn is_started(&self) -> bool {
        self.started
    }

    /// True while the range is on screen. `dismiss` clears it but keeps the
    /// positions, so a dismissed range can still be extracted.
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn dismiss(&mut self) {
        self.active = false;
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos >= self.start && pos <= self.end
    }

    pub fn begin(&mut self, pos: Position) {
        self.start = pos;
        self.end = pos;
        self.started = true;
        self.active = true;
    }

    pub fn move_start(&mut self, pos: Position) -> bool {
        if pos == self.start || pos > self.end {
            return false;
        }
        self.start = pos;
        self.started = true;
        self.active = true;
        true
    }

    pub fn move_end(&mut self, pos: Position) -> bool {
        if pos == self.end || pos < self.start {
            return false;
        }
        self.end = pos;
        self.started = true;
        self.active = true;
        true
    }

    /// Sets the start boundary unchecked. Callers restoring a range must set
    /// both ends so the pair ends up ordered.
    pub fn set_start(&mut self, pos: Position) {
        self.start = pos;
        self.started = true;
        self.active = true;
    }

    pub fn set_end(&mut self, pos: Position) {
        self.end = pos;
        self.started = true;
        self.active = true;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Flags every character of slots `0..=last` according to the current
    /// range. Idempotent for an unchanged range.
    pub fn recompute_highlights<S: PageSource>(
        &self,
        window: &mut PageWindow<S>,
        last: Slot,
        selecting_search_result: bool,
    ) {
        for slot in Slot::Current.through(last) {
            let Some(page) = window.page_mut(slot) else {
                break;
            };
            for (line_index, line) in page.lines.iter_mut().enumerate() {
                for (char_index, ch) in line.chars.iter_mut().enumerate() {
                    let selected = self.contains(Position::new(slot, line_index, char_index));
                    ch.selected = selected;
                    ch.is_search_result = selected && selecting_search_result;
                }
            }
        }
    }

    /// Drops every highlight flag on the pages the window currently holds.
    pub fn clear_highlights<S: PageSource>(window: &mut PageWindow<S>) {
        for (_, page) in window.materialized_pages_mut() {
            page.clear_flags();
        }
    }
}
