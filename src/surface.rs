use chrono::Utc;

use crate::draw::{Canvas, ImageProvider, Painter};
use crate::extract::extract_text;
use crate::models::{BookInfo, Bookmark, RectF, TextPage};
use crate::position::{Position, Slot};
use crate::scroll::ScrollOutcome;
use crate::selection::SelectionEngine;
use crate::settings::Settings;
use crate::source::PageSource;
use crate::window::PageWindow;

/// What the surrounding UI provides to, and hears back from, the surface.
pub trait SelectionHost {
    /// Start handle anchor: x, handle y and line top, header already added.
    fn update_selected_start(&mut self, x: f32, y: f32, top: f32);
    fn update_selected_end(&mut self, x: f32, y: f32);
    fn on_cancel_select(&mut self);
    fn show_image(&mut self, chapter_index: usize, src: &str);

    fn header_height(&self) -> f32;
    fn is_continuous_scroll(&self) -> bool;
    fn is_selecting_search_result(&self) -> bool;
    fn set_selecting_search_result(&mut self, selecting: bool);

    fn on_hit(&mut self, _position: Position) {}
    fn on_page_changed(&mut self, _page: &TextPage) {}
    fn notify_error(&mut self, _message: &str) {}
    fn invalidate(&mut self) {}
}

pub struct ReadingSurface<S, H> {
    window: PageWindow<S>,
    selection: SelectionEngine,
    host: H,
    book: Option<BookInfo>,
    selectable: bool,
}

impl<S: PageSource, H: SelectionHost> ReadingSurface<S, H> {
    pub fn new(source: S, host: H, settings: &Settings) -> Self {
        Self {
            window: PageWindow::new(source, settings.visible_rect()),
            selection: SelectionEngine::new(),
            host,
            book: None,
            selectable: settings.text_selectable,
        }
    }

    pub fn with_book(mut self, book: BookInfo) -> Self {
        self.book = Some(book);
        self
    }

    pub fn window(&self) -> &PageWindow<S> {
        &self.window
    }

    pub fn selection(&self) -> &SelectionEngine {
        &self.selection
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn book(&self) -> Option<&BookInfo> {
        self.book.as_ref()
    }

    pub fn set_selectable(&mut self, selectable: bool) {
        self.selectable = selectable;
    }

    fn last_slot(&self) -> Slot {
        PageWindow::<S>::last_slot(self.host.is_continuous_scroll())
    }

    /// Shows a new slot-0 page after navigation; any selection is dropped.
    pub fn set_content(&mut self, page: TextPage) {
        self.window.set_content(page);
        self.selection.reset();
        self.host.invalidate();
    }

    pub fn set_visible_rect(&mut self, rect: RectF) {
        self.window.set_visible_rect(rect);
        self.host.invalidate();
    }

    pub fn reset_page_offset(&mut self) {
        self.window.reset_page_offset();
    }

    pub fn scroll(&mut self, delta: f32) -> ScrollOutcome {
        let outcome = self.window.scroll(delta);
        if outcome.reslotted() {
            if self.selection.is_active() {
                self.cancel_select();
            }
            self.selection.reset();
            self.host.on_page_changed(self.window.current_page());
        }
        if outcome != ScrollOutcome::Unchanged {
            self.host.invalidate();
        }
        outcome
    }

    /// Starts a selection on the character under `(x, y)`. Tapping an image
    /// asks the host to show it instead.
    pub fn select_text(&mut self, x: f32, y: f32) -> Option<Position> {
        if !self.selectable {
            return None;
        }
        let continuous = self.host.is_continuous_scroll();
        let hit = self.window.locate(x, y, continuous)?;
        if hit.char.is_image {
            let chapter_index = hit.page.chapter_index;
            let src = hit.char.char_data.clone();
            self.host.show_image(chapter_index, &src);
            return None;
        }
        let position = hit.position;
        self.host.set_selecting_search_result(false);
        self.selection.begin(position);
        log::debug!("selection started at {position}");
        self.recompute_highlights();
        self.update_start_handle(position);
        self.update_end_handle(position);
        self.host.on_hit(position);
        Some(position)
    }

    /// Drags the start handle to `(x, y)`. Returns whether the range changed.
    pub fn select_start_move(&mut self, x: f32, y: f32) -> bool {
        let continuous = self.host.is_continuous_scroll();
        let Some(position) = self.window.locate(x, y, continuous).map(|hit| hit.position) else {
            return false;
        };
        if !self.selection.move_start(position) {
            return false;
        }
        log::debug!("selection start moved to {position}");
        self.update_start_handle(position);
        self.recompute_highlights();
        true
    }

    pub fn select_end_move(&mut self, x: f32, y: f32) -> bool {
        let continuous = self.host.is_continuous_scroll();
        let Some(position) = self.window.locate(x, y, continuous).map(|hit| hit.position) else {
            return false;
        };
        if !self.selection.move_end(position) {
            return false;
        }
        log::debug!("selection end moved to {position}");
        self.update_end_handle(position);
        self.recompute_highlights();
        true
    }

    /// Sets the start boundary from known indices.
    ///
    /// # Panics
    /// If the slot holds no page or the indices are outside it.
    pub fn select_start_move_index(&mut self, slot: Slot, line_index: usize, char_index: usize) {
        let position = Position::new(slot, line_index, char_index);
        self.update_start_handle(position);
        self.selection.set_start(position);
        self.recompute_highlights();
    }

    /// Sets the end boundary from known indices.
    ///
    /// # Panics
    /// If the slot holds no page or the indices are outside it.
    pub fn select_end_move_index(&mut self, slot: Slot, line_index: usize, char_index: usize) {
        let position = Position::new(slot, line_index, char_index);
        self.update_end_handle(position);
        self.selection.set_end(position);
        self.recompute_highlights();
    }

    /// Selects `[start, end]` as a search hit, tinting it as a search result.
    ///
    /// # Panics
    /// If `start > end`, or either position is outside the window.
    pub fn select_search_result(&mut self, start: Position, end: Position) {
        assert!(start <= end, "search result range {start}..{end} is inverted");
        self.host.set_selecting_search_result(true);
        self.select_start_move_index(start.slot, start.line_index, start.char_index);
        self.select_end_move_index(end.slot, end.line_index, end.char_index);
    }

    /// Clears every highlight and leaves search mode. The range positions
    /// stay readable through `extract`.
    pub fn cancel_select(&mut self) {
        SelectionEngine::clear_highlights(&mut self.window);
        self.selection.dismiss();
        self.host.set_selecting_search_result(false);
        self.host.invalidate();
        self.host.on_cancel_select();
    }

    /// Text of the current selection; empty when nothing was ever selected.
    pub fn selected_text(&self) -> String {
        if !self.selection.is_started() {
            return String::new();
        }
        self.extract(self.selection.start(), self.selection.end())
    }

    pub fn extract(&self, start: Position, end: Position) -> String {
        extract_text(&self.window, start, end)
    }

    pub fn create_bookmark(&self) -> Option<Bookmark> {
        let book = self.book.as_ref()?;
        let start = self.selection.start();
        let page = self.window.page(start.slot)?;
        let chapter = page.chapter.as_ref()?;
        let chapter_pos =
            chapter.read_length + page.select_start_length(start.line_index, start.char_index);
        Some(Bookmark {
            id: Bookmark::make_id(&book.name, page.chapter_index, chapter_pos),
            time: Utc::now(),
            book_name: book.name.clone(),
            book_author: book.author.clone(),
            chapter_index: page.chapter_index,
            chapter_pos,
            chapter_name: chapter.title.clone(),
            book_text: self.selected_text(),
            content: String::new(),
        })
    }

    /// Draws the visible slots; image failures reach the host as notices.
    pub fn draw<C, I>(&mut self, canvas: &mut C, images: &I)
    where
        C: Canvas + ?Sized,
        I: ImageProvider + ?Sized,
    {
        let continuous = self.host.is_continuous_scroll();
        let failures = Painter {
            canvas,
            images,
            book: self.book.as_ref(),
        }
        .draw_window(&self.window, continuous);
        for message in failures {
            self.host.notify_error(&message);
        }
    }

    fn recompute_highlights(&mut self) {
        let last = self.last_slot();
        let searching = self.host.is_selecting_search_result();
        self.selection.recompute_highlights(&mut self.window, last, searching);
        self.host.invalidate();
    }

    /// Geometry of the character at `position`: `(start, end, top, bottom)`
    /// in view coordinates.
    fn char_box(&self, position: Position) -> (f32, f32, f32, f32) {
        let Some(page) = self.window.page(position.slot) else {
            panic!("no page in slot {}", position.slot);
        };
        let Some(line) = page.line(position.line_index) else {
            panic!(
                "line {} out of range on slot {} ({} lines)",
                position.line_index,
                position.slot,
                page.lines.len()
            );
        };
        let Some(ch) = line.chars.get(position.char_index) else {
            panic!(
                "char {} out of range on line {} ({} chars)",
                position.char_index,
                position.line_index,
                line.char_size()
            );
        };
        let offset = self.window.vertical_offset(position.slot);
        (ch.start, ch.end, line.top + offset, line.bottom + offset)
    }

    fn update_start_handle(&mut self, position: Position) {
        let (start, _, top, bottom) = self.char_box(position);
        let header = self.host.header_height();
        self.host
            .update_selected_start(start, bottom + header, top + header);
    }

    fn update_end_handle(&mut self, position: Position) {
        let (_, end, _, bottom) = self.char_box(position);
        let header = self.host.header_height();
        self.host.update_selected_end(end, bottom + header);
    }
}
