//! Table style configuration.
//!
//! Every table in an application shares one [`TableStyle`] instead of
//! repeating color literals per view. Named classes cover the status badges
//! and row highlights pages need; columns and rows refer to them by name.

use std::collections::HashMap;

use crate::buffer::Cell;
use crate::types::{Color, ColorContext, Rgb, Style, TextStyle};

#[derive(Debug, Clone)]
pub struct TableStyle {
    /// Base style painted under the whole table area.
    pub base: Style,
    pub header: Style,
    /// Header style for sortable columns, layered on `header`.
    pub header_sortable: Style,
    pub separator: Style,
    pub separator_char: char,
    pub body: Style,
    /// Layered on every other body row when set.
    pub zebra: Option<Style>,
    pub placeholder: Style,
    /// Blank columns between cells.
    pub column_gap: u16,
    pub classes: HashMap<String, Style>,
}

impl TableStyle {
    pub fn new() -> Self {
        Self {
            base: Style::new()
                .background(Color::var("background"))
                .foreground(Color::var("foreground")),
            header: Style::new().foreground(Color::var("primary")).bold(),
            header_sortable: Style::new().underline(),
            separator: Style::new().foreground(Color::var("border")),
            separator_char: '─',
            body: Style::new(),
            zebra: None,
            placeholder: Style::new().foreground(Color::var("muted")).italic(),
            column_gap: 1,
            classes: default_classes(),
        }
    }

    pub fn zebra(mut self, style: Style) -> Self {
        self.zebra = Some(style);
        self
    }

    pub fn column_gap(mut self, gap: u16) -> Self {
        self.column_gap = gap;
        self
    }

    /// Register (or replace) a named class.
    pub fn class(mut self, name: impl Into<String>, style: Style) -> Self {
        self.classes.insert(name.into(), style);
        self
    }

    /// Look up a named class. Unknown names are logged and ignored.
    pub fn resolve_class(&self, name: &str) -> Option<&Style> {
        let style = self.classes.get(name);
        if style.is_none() {
            log::debug!("unknown table style class {name:?}");
        }
        style
    }
}

impl Default for TableStyle {
    fn default() -> Self {
        Self::new()
    }
}

fn default_classes() -> HashMap<String, Style> {
    let badge = |color: &str| Style::new().foreground(Color::var(color)).bold();

    HashMap::from([
        ("active".to_string(), badge("success")),
        ("paid".to_string(), badge("success")),
        ("good".to_string(), badge("success")),
        ("pending".to_string(), badge("warning")),
        ("maintenance".to_string(), badge("warning")),
        ("inactive".to_string(), badge("muted")),
        ("overdue".to_string(), badge("danger")),
        ("broken".to_string(), badge("danger")),
        ("full".to_string(), badge("danger")),
        (
            "selected".to_string(),
            Style::new()
                .background(Color::var("primary"))
                .foreground(Color::var("background")),
        ),
        (
            "muted".to_string(),
            Style::new().foreground(Color::var("muted")),
        ),
    ])
}

/// A style flattened to concrete colors for painting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ResolvedStyle {
    pub fg: Rgb,
    pub bg: Rgb,
    pub text_style: TextStyle,
}

impl ResolvedStyle {
    /// Unset colors fall back to the blank cell's colors.
    pub(crate) fn resolve(style: &Style, ctx: &ColorContext) -> Self {
        let blank = Cell::default();
        Self {
            fg: style.foreground.as_ref().map_or(blank.fg, |c| ctx.resolve(c)),
            bg: style.background.as_ref().map_or(blank.bg, |c| ctx.resolve(c)),
            text_style: style.text_style,
        }
    }

    pub(crate) fn cell(&self) -> Cell {
        Cell::new(' ')
            .with_fg(self.fg)
            .with_bg(self.bg)
            .with_style(self.text_style)
    }
}

impl ColorContext<'_> {
    /// Blank cell painted with `style`, for drawing outside a table.
    pub fn cell(&self, style: &Style) -> Cell {
        ResolvedStyle::resolve(style, self).cell()
    }
}
