use std::cell::OnceCell;

use crate::models::{RectF, TextPage};
use crate::position::Slot;
use crate::source::PageSource;

/// Slot 0 is the page at the current scroll offset, slot 1 the page after it
/// and slot 2 the page after that. Offsets stack the three pages into one
/// vertical strip.
#[derive(Debug)]
pub struct PageWindow<S> {
    pub(crate) source: S,
    pub(crate) current: TextPage,
    next: OnceCell<Option<TextPage>>,
    next_plus: OnceCell<Option<TextPage>>,
    pub(crate) page_offset: f32,
    visible_rect: RectF,
}

impl<S: PageSource> PageWindow<S> {
    pub fn new(source: S, visible_rect: RectF) -> Self {
        let current = source.current_page();
        Self {
            source,
            current,
            next: OnceCell::new(),
            next_plus: OnceCell::new(),
            page_offset: 0.0,
            visible_rect,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn visible_rect(&self) -> RectF {
        self.visible_rect
    }

    pub fn set_visible_rect(&mut self, rect: RectF) {
        self.visible_rect = rect;
    }

    pub fn visible_height(&self) -> f32 {
        self.visible_rect.height()
    }

    pub fn page_offset(&self) -> f32 {
        self.page_offset
    }

    pub fn reset_page_offset(&mut self) {
        self.page_offset = 0.0;
    }

    pub fn has_prev(&self) -> bool {
        self.source.has_prev()
    }

    pub fn has_next(&self) -> bool {
        self.source.has_next()
    }

    pub fn has_next_plus(&self) -> bool {
        self.source.has_next_plus()
    }

    pub fn current_page(&self) -> &TextPage {
        &self.current
    }

    pub fn next_page(&self) -> Option<&TextPage> {
        if !self.source.has_next() {
            return None;
        }
        self.next.get_or_init(|| self.source.next_page()).as_ref()
    }

    pub fn next_plus_page(&self) -> Option<&TextPage> {
        if !self.source.has_next_plus() {
            return None;
        }
        self.next_plus
            .get_or_init(|| self.source.next_plus_page())
            .as_ref()
    }

    pub fn page(&self, slot: Slot) -> Option<&TextPage> {
        match slot {
            Slot::Current => Some(&self.current),
            Slot::Next => self.next_page(),
            Slot::NextPlus => self.next_plus_page(),
        }
    }

    pub fn page_mut(&mut self, slot: Slot) -> Option<&mut TextPage> {
        match slot {
            Slot::Current => Some(&mut self.current),
            Slot::Next => {
                if !self.source.has_next() {
                    return None;
                }
                let source = &self.source;
                self.next.get_or_init(|| source.next_page());
                self.next.get_mut().and_then(Option::as_mut)
            }
            Slot::NextPlus => {
                if !self.source.has_next_plus() {
                    return None;
                }
                let source = &self.source;
                self.next_plus.get_or_init(|| source.next_plus_page());
                self.next_plus.get_mut().and_then(Option::as_mut)
            }
        }
    }

    /// Pages already held by the window, without fetching anything new.
    pub fn materialized_pages_mut(&mut self) -> impl Iterator<Item = (Slot, &mut TextPage)> {
        let next = self.next.get_mut().and_then(Option::as_mut);
        let next_plus = self.next_plus.get_mut().and_then(Option::as_mut);
        std::iter::once((Slot::Current, &mut self.current))
            .chain(next.map(|page| (Slot::Next, page)))
            .chain(next_plus.map(|page| (Slot::NextPlus, page)))
    }

    /// Top of `slot`'s page in view coordinates.
    pub fn vertical_offset(&self, slot: Slot) -> f32 {
        match slot {
            Slot::Current => self.page_offset,
            Slot::Next => self.page_offset + self.current.height,
            Slot::NextPlus => {
                let next_height = self.next_page().map_or(0.0, |page| page.height);
                self.page_offset + self.current.height + next_height
            }
        }
    }

    /// Last slot that takes part in hit-testing, highlighting and drawing.
    pub fn last_slot(continuous_scroll: bool) -> Slot {
        if continuous_scroll {
            Slot::NextPlus
        } else {
            Slot::Current
        }
    }

    /// Replaces slot 0 (chapter change or explicit navigation) and drops the
    /// lookahead pages.
    pub fn set_content(&mut self, page: TextPage) {
        self.current = page;
        self.drop_lookahead();
    }

    /// Re-reads every slot from the source after its cursor moved.
    pub(crate) fn reslot(&mut self) {
        self.current = self.source.current_page();
        self.drop_lookahead();
        log::debug!(
            "window re-slotted to chapter {} page {}",
            self.current.chapter_index,
            self.current.index
        );
    }

    fn drop_lookahead(&mut self) {
        self.next = OnceCell::new();
        self.next_plus = OnceCell::new();
    }
}
