use crate::layout::Rect;

/// What a screen position maps to within a rendered table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    /// Header cell of the column at this index.
    Header(usize),
    /// Body row showing the data item at this index.
    Row(usize),
    /// The loading/empty placeholder row.
    Placeholder,
}

/// Screen regions of a rendered table, produced by
/// [`Table::render`](crate::Table::render).
///
/// Only what actually fit on screen is recorded: rows clipped by the area's
/// height have no region and can't be hit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableLayout {
    pub area: Rect,
    /// One rect per column header, in column order.
    pub headers: Vec<Rect>,
    /// One rect per visible body row; `rows[i]` shows data item `i`.
    pub rows: Vec<Rect>,
    pub placeholder: Option<Rect>,
}

impl TableLayout {
    pub fn hit_test(&self, x: u16, y: u16) -> Option<HitTarget> {
        if !self.area.contains(x, y) {
            return None;
        }

        if let Some(col) = self.headers.iter().position(|r| r.contains(x, y)) {
            return Some(HitTarget::Header(col));
        }

        if self.placeholder.is_some_and(|r| r.contains(x, y)) {
            return Some(HitTarget::Placeholder);
        }

        self.rows
            .iter()
            .position(|r| r.contains(x, y))
            .map(HitTarget::Row)
    }

    /// Number of body rows that fit on screen.
    pub fn visible_rows(&self) -> usize {
        self.rows.len()
    }
}
