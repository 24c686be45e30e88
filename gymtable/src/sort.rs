//! Sort state, owned by the caller.
//!
//! The table only reflects this state in its header glyphs and reports
//! header clicks; deciding the next direction and actually ordering rows is
//! left to whoever owns the data.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn glyph(self) -> char {
        match self {
            SortDirection::Ascending => '▲',
            SortDirection::Descending => '▼',
        }
    }
}

/// The active sort key and direction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SortState {
    pub key: String,
    pub direction: SortDirection,
}

impl SortState {
    pub fn new(key: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            key: key.into(),
            direction,
        }
    }

    pub fn ascending(key: impl Into<String>) -> Self {
        Self::new(key, SortDirection::Ascending)
    }

    pub fn descending(key: impl Into<String>) -> Self {
        Self::new(key, SortDirection::Descending)
    }

    /// Direction to show for the column keyed `key`, if it is the active one.
    pub fn direction_for(&self, key: &str) -> Option<SortDirection> {
        (self.key == key).then_some(self.direction)
    }
}
