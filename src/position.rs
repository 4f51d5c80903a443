use std::fmt;

/// One of the three pages addressable in the window at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Slot {
    #[default]
    Current,
    Next,
    NextPlus,
}

impl Slot {
    pub const ALL: [Slot; 3] = [Slot::Current, Slot::Next, Slot::NextPlus];

    pub fn index(self) -> usize {
        match self {
            Slot::Current => 0,
            Slot::Next => 1,
            Slot::NextPlus => 2,
        }
    }

    pub fn from_index(index: usize) -> Option<Slot> {
        Slot::ALL.get(index).copied()
    }

    /// Slots from `self` through `last`, in window order.
    pub fn through(self, last: Slot) -> impl Iterator<Item = Slot> {
        (self.index()..=last.index()).filter_map(Slot::from_index)
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}

/// A character coordinate inside the window.
///
/// Ordering is lexicographic on `(slot, line_index, char_index)`, so the
/// derived `Ord` gives document order across the three slots. A position is
/// only meaningful until the window re-slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position {
    pub slot: Slot,
    pub line_index: usize,
    pub char_index: usize,
}

impl Position {
    pub fn new(slot: Slot, line_index: usize, char_index: usize) -> Self {
        Self {
            slot,
            line_index,
            char_index,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.slot, self.line_index, self.char_index)
    }
}
