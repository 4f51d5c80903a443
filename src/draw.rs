use eyre::Result;

use crate::models::{BookInfo, RectF, TextChar, TextLine, TextPage};
use crate::position::Slot;
use crate::source::PageSource;
use crate::window::PageWindow;

/// A decoded raster handed out by the image provider.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Bitmap {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

pub trait ImageProvider {
    /// Decodes `src` for a box of roughly `width` x `height` pixels.
    fn get_image(&self, book: &BookInfo, src: &str, width: u32, height: u32) -> Result<Bitmap>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextRole {
    Title,
    Content,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextColor {
    Normal,
    Accent,
}

pub trait Canvas {
    fn clip(&mut self, rect: RectF);
    fn draw_text(&mut self, text: &str, x: f32, baseline: f32, role: TextRole, color: TextColor);
    fn draw_selection(&mut self, rect: RectF);
    fn draw_bitmap(&mut self, bitmap: &Bitmap, dst: RectF) -> Result<()>;
}

/// Destination box of an image character.
///
/// A whole-line image fills the line box. An inline image keeps its aspect
/// ratio at the character's width, centred on the line (it may overflow the
/// line vertically).
pub fn image_rect(
    line_is_image: bool,
    ch: &TextChar,
    top: f32,
    bottom: f32,
    bitmap: &Bitmap,
) -> RectF {
    if line_is_image || bitmap.width == 0 {
        return RectF::new(ch.start, top, ch.end, bottom);
    }
    let height = (ch.end - ch.start) / bitmap.width as f32 * bitmap.height as f32;
    let div = (bottom - top - height) / 2.0;
    RectF::new(ch.start, top + div, ch.end, bottom - div)
}

pub struct Painter<'a, C: ?Sized, I: ?Sized> {
    pub canvas: &'a mut C,
    pub images: &'a I,
    pub book: Option<&'a BookInfo>,
}

impl<C: Canvas + ?Sized, I: ImageProvider + ?Sized> Painter<'_, C, I> {
    /// Draws every visible slot. Image failures are collected as messages
    /// and the affected image box is left empty for this frame.
    pub fn draw_window<S: PageSource>(
        &mut self,
        window: &PageWindow<S>,
        continuous_scroll: bool,
    ) -> Vec<String> {
        let mut failures = Vec::new();
        self.canvas.clip(window.visible_rect());
        self.draw_page(window.current_page(), window.vertical_offset(Slot::Current), &mut failures);
        if !continuous_scroll {
            return failures;
        }
        let Some(next) = window.next_page() else {
            return failures;
        };
        self.draw_page(next, window.vertical_offset(Slot::Next), &mut failures);
        let offset = window.vertical_offset(Slot::NextPlus);
        if offset < window.visible_height() {
            if let Some(next_plus) = window.next_plus_page() {
                self.draw_page(next_plus, offset, &mut failures);
            }
        }
        failures
    }

    fn draw_page(&mut self, page: &TextPage, relative_offset: f32, failures: &mut Vec<String>) {
        for line in &page.lines {
            self.draw_line(line, relative_offset, failures);
        }
    }

    fn draw_line(&mut self, line: &TextLine, relative_offset: f32, failures: &mut Vec<String>) {
        let top = line.top + relative_offset;
        let base = line.base + relative_offset;
        let bottom = line.bottom + relative_offset;
        let role = if line.is_title {
            TextRole::Title
        } else {
            TextRole::Content
        };
        for ch in &line.chars {
            if ch.is_image {
                if let Err(err) = self.draw_image(line, ch, top, bottom) {
                    log::warn!("failed to draw image {}: {err}", ch.char_data);
                    failures.push(err.to_string());
                }
            } else {
                let color = if line.is_read_aloud || ch.is_search_result {
                    TextColor::Accent
                } else {
                    TextColor::Normal
                };
                self.canvas.draw_text(&ch.char_data, ch.start, base, role, color);
            }
            if ch.selected {
                self.canvas.draw_selection(RectF::new(ch.start, top, ch.end, bottom));
            }
        }
    }

    fn draw_image(&mut self, line: &TextLine, ch: &TextChar, top: f32, bottom: f32) -> Result<()> {
        let Some(book) = self.book else {
            return Ok(());
        };
        let width = (ch.end - ch.start).max(0.0) as u32;
        let height = (bottom - top).max(0.0) as u32;
        let bitmap = self.images.get_image(book, &ch.char_data, width, height)?;
        let dst = image_rect(line.is_image, ch, top, bottom, &bitmap);
        self.canvas.draw_bitmap(&bitmap, dst)
    }
}
