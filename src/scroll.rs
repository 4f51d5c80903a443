use crate::source::PageSource;
use crate::window::PageWindow;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollOutcome {
    /// Zero delta.
    Unchanged,
    /// Offset moved within the current page.
    Scrolled,
    /// Pinned at the top of the first page.
    ClampedTop,
    /// Pinned so the bottom of the last page meets the viewport bottom.
    ClampedBottom,
    MovedPrev,
    MovedNext,
}

impl ScrollOutcome {
    /// Whether slot 0 now holds a different page.
    pub fn reslotted(self) -> bool {
        matches!(self, ScrollOutcome::MovedPrev | ScrollOutcome::MovedNext)
    }
}

impl<S: PageSource> PageWindow<S> {
    /// Applies a scroll delta in pixels (negative moves toward later pages).
    ///
    /// At most one page change happens per call; the residual offset carries
    /// over into the new slot 0.
    pub fn scroll(&mut self, delta: f32) -> ScrollOutcome {
        if delta == 0.0 {
            return ScrollOutcome::Unchanged;
        }
        self.page_offset += delta;
        let height = self.current.height;
        let visible_height = self.visible_height();

        if !self.source.has_prev() && self.page_offset > 0.0 {
            self.page_offset = 0.0;
            ScrollOutcome::ClampedTop
        } else if !self.source.has_next()
            && self.page_offset < 0.0
            && self.page_offset + height < visible_height
        {
            self.page_offset = (visible_height - height).min(0.0);
            ScrollOutcome::ClampedBottom
        } else if self.page_offset > 0.0 {
            if !self.source.move_to_prev(false) {
                self.page_offset = 0.0;
                return ScrollOutcome::ClampedTop;
            }
            self.reslot();
            self.page_offset -= self.current.height;
            ScrollOutcome::MovedPrev
        } else if self.page_offset < -height {
            if !self.source.move_to_next(false) {
                self.page_offset = (visible_height - height).min(0.0);
                return ScrollOutcome::ClampedBottom;
            }
            self.page_offset += height;
            self.reslot();
            ScrollOutcome::MovedNext
        } else {
            ScrollOutcome::Scrolled
        }
    }
}
