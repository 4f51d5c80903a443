use crate::models::TextPage;

/// The layout engine side of the window: produces laid-out pages around a
/// cursor and moves that cursor one page at a time.
///
/// `next_page`/`next_plus_page` are only consulted after the matching
/// `has_next`/`has_next_plus` check, but returning `None` is always allowed.
pub trait PageSource {
    fn current_page(&self) -> TextPage;
    fn next_page(&self) -> Option<TextPage>;
    fn next_plus_page(&self) -> Option<TextPage>;

    fn has_prev(&self) -> bool;
    fn has_next(&self) -> bool;
    fn has_next_plus(&self) -> bool;

    /// Moves the cursor back one page. `up_content` asks the source to
    /// refresh any views it drives itself. Returns whether the cursor moved.
    fn move_to_prev(&mut self, up_content: bool) -> bool;
    fn move_to_next(&mut self, up_content: bool) -> bool;
}

/// Pages held in memory, in reading order.
#[derive(Debug, Clone, Default)]
pub struct VecPageSource {
    pages: Vec<TextPage>,
    index: usize,
}

impl VecPageSource {
    pub fn new(pages: Vec<TextPage>) -> Self {
        Self { pages, index: 0 }
    }

    pub fn with_index(mut self, index: usize) -> Self {
        self.index = index.min(self.pages.len().saturating_sub(1));
        self
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    fn page_at(&self, offset: usize) -> Option<TextPage> {
        self.pages.get(self.index + offset).cloned()
    }
}

impl PageSource for VecPageSource {
    fn current_page(&self) -> TextPage {
        self.page_at(0).unwrap_or_default()
    }

    fn next_page(&self) -> Option<TextPage> {
        self.page_at(1)
    }

    fn next_plus_page(&self) -> Option<TextPage> {
        self.page_at(2)
    }

    fn has_prev(&self) -> bool {
        self.index > 0
    }

    fn has_next(&self) -> bool {
        self.index + 1 < self.pages.len()
    }

    fn has_next_plus(&self) -> bool {
        self.index + 2 < self.pages.len()
    }

    fn move_to_prev(&mut self, _up_content: bool) -> bool {
        if !self.has_prev() {
            return false;
        }
        self.index -= 1;
        log::debug!("page source moved back to page {}", self.index);
        true
    }

    fn move_to_next(&mut self, _up_content: bool) -> bool {
        if !self.has_next() {
            return false;
        }
        self.index += 1;
        log::debug!("page source moved forward to page {}", self.index);
        true
    }
}
