//! The generic table renderer.
//!
//! A [`Table`] is rebuilt by its owner on every frame from borrowed inputs.
//! It holds no state of its own between frames: the sort indicator echoes
//! the caller's [`SortState`], row order is exactly the order of `data`,
//! and interaction is reported through `on_sort` / `on_row_click`.
//!
//! Body content follows a fixed priority:
//!
//! 1. `loading` → one full-width row with the loading message, whatever
//!    `data` holds.
//! 2. empty `data` → one full-width row with the empty message.
//! 3. otherwise one row per item, in input order.
//!
//! # Example
//!
//! ```
//! use gymtable::{Buffer, Column, Record, Rect, SortState, Table};
//!
//! let columns = vec![
//!     Column::field("Name", "name").sortable(),
//!     Column::field("Status", "status"),
//! ];
//! let members = vec![
//!     Record::with_id("1").set("name", "John Doe").set("status", "active"),
//!     Record::with_id("2").set("name", "Jane Roe").set("status", "inactive"),
//! ];
//! let sort = SortState::ascending("name");
//!
//! let mut requested = None;
//! let mut buf = Buffer::new(40, 6);
//! {
//!     let mut table = Table::new(&columns, &members)
//!         .sort_config(Some(&sort))
//!         .on_sort(|key| requested = Some(key.to_string()));
//!
//!     let layout = table.render(Rect::new(0, 0, 40, 6), &mut buf);
//!     let name_header = layout.headers[0];
//!     table.handle_click(&layout, name_header.x, name_header.y);
//! }
//!
//! assert!(buf.line(0).contains("Name ▲"));
//! assert!(buf.line(2).contains("John Doe"));
//! assert_eq!(requested.as_deref(), Some("name"));
//! ```

use crate::buffer::Buffer;
use crate::column::{CellContent, Column, ColumnWidth};
use crate::event::{Event, EventResult, MouseButton};
use crate::hit::{HitTarget, TableLayout};
use crate::layout::Rect;
use crate::row::Row;
use crate::sort::SortState;
use crate::style::{ResolvedStyle, TableStyle};
use crate::text::{align_offset, display_width, single_line, truncate_to_width};
use crate::types::{ColorContext, DefaultTheme, Style, TextAlign, Theme};

pub const DEFAULT_EMPTY_MESSAGE: &str = "No data available";
pub const DEFAULT_LOADING_MESSAGE: &str = "Loading...";

/// Rows between the top of the table and the first body row.
const HEADER_HEIGHT: u16 = 2;

static DEFAULT_THEME: DefaultTheme = DefaultTheme::new();

/// Style class for a body row.
pub enum RowClass<'a, R> {
    None,
    /// The same class on every row.
    Constant(String),
    /// Class computed from the row and its position in `data`.
    Function(Box<dyn Fn(&R, usize) -> Option<String> + 'a>),
}

impl<R> RowClass<'_, R> {
    fn resolve(&self, row: &R, index: usize) -> Option<String> {
        match self {
            RowClass::None => None,
            RowClass::Constant(name) => Some(name.clone()),
            RowClass::Function(f) => f(row, index),
        }
    }
}

/// One header cell as rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedHeader {
    pub label: String,
    /// Sort glyph, only on the column matching the active sort key.
    pub glyph: Option<char>,
    /// Whether clicking this header reports `on_sort`.
    pub sortable: bool,
}

/// One body row as rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderedRow {
    /// Data item `index`, one cell per column in column order.
    Data {
        index: usize,
        cells: Vec<CellContent>,
        class: Option<String>,
    },
    /// The single full-width loading/empty row.
    Placeholder { message: String },
}

impl RenderedRow {
    pub fn cell_texts(&self) -> Vec<&str> {
        match self {
            RenderedRow::Data { cells, .. } => cells.iter().map(|c| c.text.as_str()).collect(),
            RenderedRow::Placeholder { message } => vec![message.as_str()],
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, RenderedRow::Placeholder { .. })
    }
}

/// Screen-independent projection of a table: exactly what would be drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedTable {
    pub headers: Vec<RenderedHeader>,
    pub rows: Vec<RenderedRow>,
}

impl RenderedTable {
    /// The placeholder message, if the body is a placeholder.
    pub fn placeholder(&self) -> Option<&str> {
        match self.rows.as_slice() {
            [RenderedRow::Placeholder { message }] => Some(message),
            _ => None,
        }
    }
}

pub struct Table<'a, R> {
    columns: &'a [Column<R>],
    data: &'a [R],
    loading: bool,
    sort_config: Option<&'a SortState>,
    on_row_click: Option<Box<dyn FnMut(&R) + 'a>>,
    on_sort: Option<Box<dyn FnMut(&str) + 'a>>,
    empty_message: String,
    loading_message: String,
    row_class: RowClass<'a, R>,
    style: Option<&'a TableStyle>,
    theme: &'a dyn Theme,
}

impl<'a, R: Row> Table<'a, R> {
    pub fn new(columns: &'a [Column<R>], data: &'a [R]) -> Self {
        Self {
            columns,
            data,
            loading: false,
            sort_config: None,
            on_row_click: None,
            on_sort: None,
            empty_message: DEFAULT_EMPTY_MESSAGE.to_string(),
            loading_message: DEFAULT_LOADING_MESSAGE.to_string(),
            row_class: RowClass::None,
            style: None,
            theme: &DEFAULT_THEME,
        }
    }

    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    pub fn sort_config(mut self, sort: Option<&'a SortState>) -> Self {
        self.sort_config = sort;
        self
    }

    /// Make every body row an activation target. `f` receives the row
    /// exactly as it sits in `data`.
    pub fn on_row_click(mut self, f: impl FnMut(&R) + 'a) -> Self {
        self.on_row_click = Some(Box::new(f));
        self
    }

    /// Called with a sortable column's field key when its header is clicked.
    pub fn on_sort(mut self, f: impl FnMut(&str) + 'a) -> Self {
        self.on_sort = Some(Box::new(f));
        self
    }

    pub fn empty_message(mut self, message: impl Into<String>) -> Self {
        self.empty_message = message.into();
        self
    }

    pub fn loading_message(mut self, message: impl Into<String>) -> Self {
        self.loading_message = message.into();
        self
    }

    pub fn row_class(mut self, class: impl Into<String>) -> Self {
        self.row_class = RowClass::Constant(class.into());
        self
    }

    pub fn row_class_fn(mut self, f: impl Fn(&R, usize) -> Option<String> + 'a) -> Self {
        self.row_class = RowClass::Function(Box::new(f));
        self
    }

    pub fn style(mut self, style: &'a TableStyle) -> Self {
        self.style = Some(style);
        self
    }

    pub fn theme(mut self, theme: &'a dyn Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Compute what the table shows, without touching a screen.
    pub fn project(&self) -> RenderedTable {
        let headers = self
            .columns
            .iter()
            .map(|column| {
                if column.is_malformed() {
                    log::warn!(
                        "column {:?} is sortable but has a computed accessor; treating it as not sortable",
                        column.header
                    );
                }
                let key = column.sort_key();
                RenderedHeader {
                    label: column.header.clone(),
                    glyph: key
                        .zip(self.sort_config)
                        .and_then(|(key, sort)| sort.direction_for(key))
                        .map(|dir| dir.glyph()),
                    sortable: key.is_some(),
                }
            })
            .collect();

        let rows = if self.loading {
            vec![RenderedRow::Placeholder {
                message: self.loading_message.clone(),
            }]
        } else if self.data.is_empty() {
            vec![RenderedRow::Placeholder {
                message: self.empty_message.clone(),
            }]
        } else {
            self.data
                .iter()
                .enumerate()
                .map(|(index, row)| RenderedRow::Data {
                    index,
                    cells: self.columns.iter().map(|c| c.content(row)).collect(),
                    class: self.row_class.resolve(row, index),
                })
                .collect()
        };

        RenderedTable { headers, rows }
    }

    /// Paint the table into `area` of `buf` and return its hit regions.
    pub fn render(&self, area: Rect, buf: &mut Buffer) -> TableLayout {
        let mut layout = TableLayout {
            area,
            ..Default::default()
        };
        if area.is_empty() {
            return layout;
        }

        let default_style;
        let style = match self.style {
            Some(style) => style,
            None => {
                default_style = TableStyle::default();
                &default_style
            }
        };
        let painter = Painter {
            style,
            ctx: ColorContext::new(self.theme),
        };
        let projection = self.project();

        buf.fill(area, painter.resolve(&Style::new()).cell());

        let widths = column_widths(self.columns, area.width, style.column_gap);
        let (header_area, body_area) = area.split_top(HEADER_HEIGHT);

        // Header
        let mut x = area.x;
        for (header, &width) in projection.headers.iter().zip(&widths) {
            let rect = Rect::new(x, header_area.y, width, 1);
            let mut header_style = style.header.clone();
            if header.sortable {
                header_style = header_style.patch(&style.header_sortable);
            }
            let label = match header.glyph {
                // Too narrow for label, space and glyph: the glyph wins.
                Some(glyph) if width < 3 => glyph.to_string(),
                Some(glyph) => format!(
                    "{} {glyph}",
                    truncate_to_width(&header.label, width as usize - 2)
                ),
                None => header.label.clone(),
            };
            painter.text(buf, rect, area.right(), &label, TextAlign::Left, &header_style);
            layout.headers.push(rect);
            x = x.saturating_add(width).saturating_add(style.column_gap);
        }

        // Separator
        if header_area.height > 1 {
            let sep = painter.resolve(&style.separator);
            let line: String = std::iter::repeat(style.separator_char)
                .take(area.width as usize)
                .collect();
            buf.write_str(area.x, area.y + 1, &line, area.right(), sep.cell());
        }

        // Body
        for (offset, row) in projection.rows.iter().enumerate() {
            let Ok(offset) = u16::try_from(offset) else { break };
            if offset >= body_area.height {
                break;
            }
            let y = body_area.y + offset;
            let row_rect = Rect::new(area.x, y, area.width, 1);

            match row {
                RenderedRow::Placeholder { message } => {
                    painter.text(
                        buf,
                        row_rect,
                        area.right(),
                        message,
                        TextAlign::Center,
                        &style.placeholder,
                    );
                    layout.placeholder = Some(row_rect);
                }
                RenderedRow::Data { index, cells, class } => {
                    let mut row_style = style.body.clone();
                    if index % 2 == 1 {
                        if let Some(zebra) = &style.zebra {
                            row_style = row_style.patch(zebra);
                        }
                    }
                    let class_style = class.as_deref().and_then(|c| style.resolve_class(c));
                    if let Some(class_style) = class_style {
                        row_style = row_style.patch(class_style);
                    }
                    buf.fill(row_rect, painter.resolve(&row_style).cell());

                    let mut x = area.x;
                    for ((column, cell), &width) in self.columns.iter().zip(cells).zip(&widths) {
                        let mut cell_style = row_style.clone();
                        let names = [column.class.name.as_deref(), cell.class.as_deref()];
                        for name in names.into_iter().flatten() {
                            if let Some(extra) = style.resolve_class(name) {
                                cell_style = cell_style.patch(extra);
                            }
                        }
                        let rect = Rect::new(x, y, width, 1);
                        painter.text(
                            buf,
                            rect,
                            area.right(),
                            &single_line(&cell.text),
                            column.class.align,
                            &cell_style,
                        );
                        x = x.saturating_add(width).saturating_add(style.column_gap);
                    }
                    layout.rows.push(row_rect);
                }
            }
        }

        log::debug!(
            "table rendered: {} columns, {} of {} rows visible{}",
            self.columns.len(),
            layout.rows.len(),
            self.data.len(),
            if self.loading { " (loading)" } else { "" }
        );

        layout
    }

    /// Dispatch a click at `(x, y)` against a layout from [`Table::render`].
    ///
    /// A sortable header reports its key through `on_sort`; a data row
    /// reports its item through `on_row_click`. Headers of unsortable or
    /// malformed columns, the placeholder row and anything outside the
    /// table are ignored.
    pub fn handle_click(&mut self, layout: &TableLayout, x: u16, y: u16) -> EventResult {
        let columns = self.columns;
        let data = self.data;

        match layout.hit_test(x, y) {
            Some(HitTarget::Header(index)) => {
                let Some(key) = columns.get(index).and_then(|c| c.sort_key()) else {
                    return EventResult::Ignored;
                };
                let Some(on_sort) = self.on_sort.as_mut() else {
                    return EventResult::Ignored;
                };
                log::debug!("sort requested on {key:?}");
                on_sort(key);
                EventResult::Consumed
            }
            Some(HitTarget::Row(index)) if !self.loading => {
                let Some(row) = data.get(index) else {
                    return EventResult::Ignored;
                };
                let Some(on_row_click) = self.on_row_click.as_mut() else {
                    return EventResult::Ignored;
                };
                log::debug!("row {index} activated");
                on_row_click(row);
                EventResult::Consumed
            }
            _ => EventResult::Ignored,
        }
    }

    /// Offer an input event to the table. Only left clicks are handled.
    pub fn handle_event(&mut self, layout: &TableLayout, event: &Event) -> EventResult {
        match *event {
            Event::Click {
                x,
                y,
                button: MouseButton::Left,
            } => self.handle_click(layout, x, y),
            _ => EventResult::Ignored,
        }
    }
}

struct Painter<'a> {
    style: &'a TableStyle,
    ctx: ColorContext<'a>,
}

impl Painter<'_> {
    /// Resolve `style` layered on the table's base style.
    fn resolve(&self, style: &Style) -> ResolvedStyle {
        ResolvedStyle::resolve(&self.style.base.patch(style), &self.ctx)
    }

    fn text(
        &self,
        buf: &mut Buffer,
        rect: Rect,
        clip_x: u16,
        text: &str,
        align: TextAlign,
        style: &Style,
    ) {
        let width = rect.width as usize;
        let text = truncate_to_width(text, width);
        let offset = align_offset(display_width(&text), width, align) as u16;
        let max_x = rect.right().min(clip_x);
        let resolved = self.resolve(style);
        buf.write_str(rect.x.saturating_add(offset), rect.y, &text, max_x, resolved.cell());
    }
}

/// Resolve column widths for a table `total` columns wide.
///
/// Fixed columns get their width; whatever is left after fixed columns and
/// gaps is split between flex columns by weight, each getting at least one
/// column.
pub fn column_widths<R>(columns: &[Column<R>], total: u16, gap: u16) -> Vec<u16> {
    if columns.is_empty() {
        return Vec::new();
    }

    let gaps = gap.saturating_mul(columns.len() as u16 - 1);
    let available = total.saturating_sub(gaps);
    let fixed: u16 = columns
        .iter()
        .filter_map(|c| match c.class.width {
            ColumnWidth::Fixed(w) => Some(w),
            ColumnWidth::Flex(_) => None,
        })
        .fold(0, u16::saturating_add);
    let flex_total: u32 = columns
        .iter()
        .filter_map(|c| match c.class.width {
            ColumnWidth::Flex(weight) => Some(weight.max(1) as u32),
            ColumnWidth::Fixed(_) => None,
        })
        .sum();

    let remaining = available.saturating_sub(fixed) as u32;
    let last_flex = columns
        .iter()
        .rposition(|c| matches!(c.class.width, ColumnWidth::Flex(_)));
    let mut handed_out = 0u32;

    columns
        .iter()
        .enumerate()
        .map(|(i, c)| match c.class.width {
            ColumnWidth::Fixed(w) => w,
            ColumnWidth::Flex(weight) => {
                let share = if Some(i) == last_flex {
                    remaining.saturating_sub(handed_out)
                } else {
                    remaining * weight.max(1) as u32 / flex_total
                };
                handed_out += share;
                share.clamp(1, u16::MAX as u32) as u16
            }
        })
        .collect()
}
