//! Column descriptors.
//!
//! A [`Column`] says how to label one column, how to pull its value out of
//! a row, and optionally how to render that value.
//!
//! ```
//! use gymtable::{Column, Record, Row, TextAlign};
//!
//! let columns: Vec<Column<Record>> = vec![
//!     Column::field("Name", "name").sortable(),
//!     Column::field("Status", "status")
//!         .cell(|r: &Record| r.field("status").map(|v| v.to_string().to_uppercase()).unwrap_or_default()),
//!     Column::computed("Visits", |r: &Record| r.field("visits").unwrap_or_default())
//!         .width(8)
//!         .align(TextAlign::Right),
//! ];
//! assert_eq!(columns[0].sort_key(), Some("name"));
//! assert_eq!(columns[2].sort_key(), None);
//! ```

use std::fmt;
use std::sync::Arc;

use crate::row::{Row, Value};
use crate::types::TextAlign;

type AccessorFn<R> = Arc<dyn Fn(&R) -> Value + Send + Sync>;
type CellFn<R> = Arc<dyn Fn(&R) -> CellContent + Send + Sync>;

/// How a column pulls its value out of a row.
pub enum Accessor<R> {
    /// Look the value up by field key.
    Field(String),
    /// Derive the value from the whole row.
    Function(AccessorFn<R>),
}

impl<R> Accessor<R> {
    /// The field key, if this accessor is one.
    pub fn key(&self) -> Option<&str> {
        match self {
            Accessor::Field(key) => Some(key),
            Accessor::Function(_) => None,
        }
    }
}

impl<R: Row> Accessor<R> {
    /// Resolve the accessor against a row. Missing fields become `Null`.
    pub fn resolve(&self, row: &R) -> Value {
        match self {
            Accessor::Field(key) => row.field(key).unwrap_or_default(),
            Accessor::Function(f) => f(row),
        }
    }
}

impl<R> Clone for Accessor<R> {
    fn clone(&self) -> Self {
        match self {
            Accessor::Field(key) => Accessor::Field(key.clone()),
            Accessor::Function(f) => Accessor::Function(Arc::clone(f)),
        }
    }
}

impl<R> fmt::Debug for Accessor<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Accessor::Field(key) => write!(f, "Field({key:?})"),
            Accessor::Function(_) => write!(f, "Function(..)"),
        }
    }
}

/// What a cell override produces: display text plus an optional style class.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CellContent {
    pub text: String,
    /// Named class looked up in [`TableStyle`](crate::TableStyle), e.g. a
    /// status badge color.
    pub class: Option<String>,
}

impl CellContent {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            class: None,
        }
    }

    /// Text drawn with the named style class.
    pub fn badge(text: impl Into<String>, class: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            class: Some(class.into()),
        }
    }
}

impl From<String> for CellContent {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

impl From<&str> for CellContent {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<Value> for CellContent {
    fn from(value: Value) -> Self {
        Self::new(value.to_string())
    }
}

/// Width of a column in terminal columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnWidth {
    Fixed(u16),
    /// Share of the width left over after fixed columns.
    Flex(u16),
}

impl Default for ColumnWidth {
    fn default() -> Self {
        ColumnWidth::Flex(1)
    }
}

/// Display hints for a column.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ColumnClass {
    pub width: ColumnWidth,
    pub align: TextAlign,
    /// Named class applied to every body cell of the column.
    pub name: Option<String>,
}

/// One column of a table.
pub struct Column<R> {
    pub header: String,
    pub accessor: Accessor<R>,
    /// Overrides how the cell is rendered. Takes precedence over the accessor.
    pub cell: Option<CellFn<R>>,
    pub sortable: bool,
    pub class: ColumnClass,
}

impl<R> Column<R> {
    /// Column that reads field `key`.
    pub fn field(header: impl Into<String>, key: impl Into<String>) -> Self {
        Self::with_accessor(header, Accessor::Field(key.into()))
    }

    /// Column whose value is derived from the whole row.
    ///
    /// Computed columns cannot be sorted by the caller's field-keyed sort
    /// state; marking one [`sortable`](Column::sortable) has no effect.
    pub fn computed<F>(header: impl Into<String>, f: F) -> Self
    where
        F: Fn(&R) -> Value + Send + Sync + 'static,
    {
        Self::with_accessor(header, Accessor::Function(Arc::new(f)))
    }

    pub fn with_accessor(header: impl Into<String>, accessor: Accessor<R>) -> Self {
        Self {
            header: header.into(),
            accessor,
            cell: None,
            sortable: false,
            class: ColumnClass::default(),
        }
    }

    /// Render the cell with `f` instead of the raw accessor value.
    pub fn cell<F, C>(mut self, f: F) -> Self
    where
        F: Fn(&R) -> C + Send + Sync + 'static,
        C: Into<CellContent>,
    {
        self.cell = Some(Arc::new(move |row: &R| f(row).into()));
        self
    }

    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Fixed width in terminal columns.
    pub fn width(mut self, width: u16) -> Self {
        self.class.width = ColumnWidth::Fixed(width);
        self
    }

    /// Flexible width with the given weight.
    pub fn flex(mut self, weight: u16) -> Self {
        self.class.width = ColumnWidth::Flex(weight);
        self
    }

    pub fn align(mut self, align: TextAlign) -> Self {
        self.class.align = align;
        self
    }

    pub fn class(mut self, name: impl Into<String>) -> Self {
        self.class.name = Some(name.into());
        self
    }

    /// The key `on_sort` reports for this column.
    ///
    /// `None` for unsortable columns and for malformed ones (sortable with a
    /// function accessor).
    pub fn sort_key(&self) -> Option<&str> {
        if self.sortable {
            self.accessor.key()
        } else {
            None
        }
    }

    /// Sortable but keyed by a function: sorting such a column is undefined.
    pub fn is_malformed(&self) -> bool {
        self.sortable && self.accessor.key().is_none()
    }
}

impl<R: Row> Column<R> {
    /// Content of this column's cell for `row`: the override if present,
    /// else the accessor's value. Absent fields yield empty text.
    pub fn content(&self, row: &R) -> CellContent {
        match &self.cell {
            Some(render) => render(row),
            None => CellContent::from(self.accessor.resolve(row)),
        }
    }
}

impl<R> Clone for Column<R> {
    fn clone(&self) -> Self {
        Self {
            header: self.header.clone(),
            accessor: self.accessor.clone(),
            cell: self.cell.clone(),
            sortable: self.sortable,
            class: self.class.clone(),
        }
    }
}

impl<R> fmt::Debug for Column<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("header", &self.header)
            .field("accessor", &self.accessor)
            .field("cell", &self.cell.as_ref().map(|_| ".."))
            .field("sortable", &self.sortable)
            .field("class", &self.class)
            .finish()
    }
}
