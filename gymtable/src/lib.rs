//! Generic table renderer for terminal dashboards.
//!
//! A [`Table`] is a stateless function of its inputs: columns, a row slice,
//! a loading flag, the caller's sort state and a [`TableStyle`]. It paints
//! into a [`Buffer`] and reports interaction back through callbacks. It never
//! sorts, filters or mutates the rows it is given.

pub mod buffer;
pub mod column;
pub mod error;
pub mod event;
pub mod hit;
pub mod layout;
pub mod row;
pub mod sort;
pub mod style;
pub mod table;
pub mod terminal;
pub mod text;
pub mod types;

pub use buffer::{Buffer, Cell};
pub use column::{Accessor, CellContent, Column, ColumnClass, ColumnWidth};
pub use error::{Error, Result};
pub use event::{Event, EventResult, Key, Modifiers, MouseButton};
pub use hit::{HitTarget, TableLayout};
pub use layout::Rect;
pub use row::{Record, Row, Value};
pub use sort::{SortDirection, SortState};
pub use style::TableStyle;
pub use table::{RenderedRow, RenderedTable, RowClass, Table};
pub use terminal::Terminal;
pub use types::*;
