//! The dashboard: tab bar, the current page's table and a status line.

use gymtable::{
    Buffer, Color, ColorContext, DefaultTheme, Event, EventResult, Key, MouseButton, Rect,
    SortDirection, SortState, Style, TableLayout, TableStyle, Terminal,
};
use serde::{Deserialize, Serialize};

use crate::boundary::ErrorBoundary;
use crate::config::DashboardConfig;
use crate::error::AppError;
use crate::pages::{Page, PageKind, build_pages};
use crate::settings::{SettingsError, SettingsProvider};
use crate::store::GymStore;

/// Smallest screen the dashboard draws into.
pub const MIN_WIDTH: u16 = 40;
pub const MIN_HEIGHT: u16 = 6;

/// Sort state as stored under `sort/<page>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedSort {
    pub key: String,
    pub descending: bool,
}

impl From<&SortState> for SavedSort {
    fn from(sort: &SortState) -> Self {
        Self {
            key: sort.key.clone(),
            descending: sort.direction == SortDirection::Descending,
        }
    }
}

impl From<SavedSort> for SortState {
    fn from(saved: SavedSort) -> Self {
        let direction = if saved.descending {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        };
        SortState::new(saved.key, direction)
    }
}

pub fn sort_key(page: PageKind) -> String {
    format!("sort/{}", page.slug())
}

pub struct App {
    settings: SettingsProvider,
    config: DashboardConfig,
    style: TableStyle,
    pages: Vec<Box<dyn Page>>,
    boundaries: Vec<ErrorBoundary>,
    current: PageKind,
    /// Where the current page's table was last drawn.
    layout: TableLayout,
    status: Option<String>,
    running: bool,
}

impl App {
    pub fn new(store: &GymStore, settings: SettingsProvider) -> Result<Self, AppError> {
        let config = DashboardConfig::load(&settings)?;
        let mut pages = build_pages(store);

        for page in &mut pages {
            if let Some(saved) = restore_sort(&settings, page.kind())? {
                log::debug!("{}: restored sort by {}", page.kind().slug(), saved.key);
                page.set_sort(Some(saved.into()));
            }
        }

        Ok(Self {
            style: table_style(&config),
            boundaries: PageKind::ALL.iter().map(|&k| ErrorBoundary::new(k)).collect(),
            current: config.start_page,
            config,
            settings,
            pages,
            layout: TableLayout::default(),
            status: None,
            running: true,
        })
    }

    pub fn current(&self) -> PageKind {
        self.current
    }

    pub fn page(&self, kind: PageKind) -> &dyn Page {
        self.pages[kind.index()].as_ref()
    }

    pub fn boundary(&self, kind: PageKind) -> &ErrorBoundary {
        &self.boundaries[kind.index()]
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Start loading every page.
    pub fn start(&mut self) {
        for page in &mut self.pages {
            page.reload();
        }
    }

    /// Pick up finished loads. Returns true when anything changed.
    pub fn poll_pages(&mut self) -> bool {
        let mut changed = false;
        for page in &mut self.pages {
            changed |= page.poll();
        }
        changed
    }

    pub fn run(mut self, terminal: &mut Terminal) -> Result<(), AppError> {
        self.start();

        while self.running {
            self.poll_pages();
            terminal.draw(|buf| self.render(buf))?;
            for event in terminal.poll(self.config.tick())? {
                self.handle_event(&event);
            }
        }

        log::info!("dashboard closed");
        Ok(())
    }

    pub fn render(&mut self, buf: &mut Buffer) {
        let area = buf.area();
        let theme = DefaultTheme::new();
        let ctx = ColorContext::new(&theme);
        buf.fill(area, ctx.cell(&self.style.base));

        if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
            let error = gymtable::Error::TooSmall {
                width: area.width,
                height: area.height,
                needed_width: MIN_WIDTH,
                needed_height: MIN_HEIGHT,
            };
            let text = gymtable::text::truncate_to_width(&error.to_string(), area.width as usize);
            buf.write_str(0, 0, &text, area.right(), ctx.cell(&self.style.base));
            self.layout = TableLayout::default();
            return;
        }

        let (tabs, rest) = area.split_top(1);
        let body = rest.shrink(1, 1, 1, 1);
        let status = Rect::new(area.x, area.bottom() - 1, area.width, 1);

        self.render_tabs(tabs, buf, &ctx);

        let index = self.current.index();
        let page = &self.pages[index];
        let boundary = &mut self.boundaries[index];
        let style = &self.style;
        self.layout = boundary
            .run(|| page.render(body, buf, style))
            .unwrap_or_default();
        if boundary.is_tripped() {
            boundary.render_fallback(body, buf);
        }

        self.render_status(status, buf, &ctx);
    }

    fn render_tabs(&self, area: Rect, buf: &mut Buffer, ctx: &ColorContext) {
        let base = &self.style.base;
        let active = base
            .clone()
            .background(Color::var("primary"))
            .foreground(Color::var("background"))
            .bold();
        let inactive = base.clone().foreground(Color::var("muted"));

        let brand = base.patch(&self.style.header);
        let mut x = buf.write_str(area.x, area.y, " gymdesk ", area.right(), ctx.cell(&brand));
        for (n, kind) in PageKind::ALL.iter().enumerate() {
            let label = format!(" {} {} ", n + 1, kind.title());
            let style = if *kind == self.current { &active } else { &inactive };
            x = buf.write_str(x + 1, area.y, &label, area.right(), ctx.cell(style));
        }
    }

    fn render_status(&self, area: Rect, buf: &mut Buffer, ctx: &ColorContext) {
        let page = self.page(self.current);
        let mut text = match &self.status {
            Some(message) => message.clone(),
            None if page.is_loading() => format!("Loading {}...", page.kind().slug()),
            None => format!("{} {}", page.record_count(), page.kind().slug()),
        };
        if let Some(sort) = page.sort() {
            text.push_str(&format!("  sorted by {} {}", sort.key, sort.direction.glyph()));
        }
        text.push_str("  |  1-4 pages  click to sort/select  d delete  r reload  z stripes  q quit");

        let style = Style::new()
            .background(Color::var("surface"))
            .foreground(Color::var("muted"));
        buf.fill(area, ctx.cell(&style));
        let text = gymtable::text::truncate_to_width(&text, area.width.saturating_sub(1) as usize);
        buf.write_str(area.x + 1, area.y, &text, area.right(), ctx.cell(&style));
    }

    pub fn handle_event(&mut self, event: &Event) -> EventResult {
        match *event {
            Event::Key { key, modifiers } => {
                if modifiers.ctrl && key == Key::Char('c') {
                    self.running = false;
                    return EventResult::Consumed;
                }
                self.handle_key(key)
            }
            Event::Click {
                x,
                y,
                button: MouseButton::Left,
            } => self.handle_click(x, y),
            _ => EventResult::Ignored,
        }
    }

    fn handle_key(&mut self, key: Key) -> EventResult {
        match key {
            Key::Char('q') | Key::Escape => self.running = false,
            Key::Char(c @ '1'..='9') => match PageKind::from_digit(c) {
                Some(kind) => self.switch_to(kind),
                None => return EventResult::Ignored,
            },
            Key::Tab => {
                let next = PageKind::ALL[(self.current.index() + 1) % PageKind::ALL.len()];
                self.switch_to(next);
            }
            Key::Char('r') => self.reload_current(),
            Key::Char('d') | Key::Delete => self.delete_selected(),
            Key::Char('z') => self.toggle_zebra(),
            _ => return EventResult::Ignored,
        }
        EventResult::Consumed
    }

    fn handle_click(&mut self, x: u16, y: u16) -> EventResult {
        let index = self.current.index();
        let page = &mut self.pages[index];
        let boundary = &mut self.boundaries[index];
        let layout = &self.layout;

        let before = page.sort().cloned();
        let result = boundary
            .run(|| page.click(layout, x, y))
            .unwrap_or(EventResult::Consumed);

        let after = page.sort().cloned();
        if after != before {
            // Rows moved: the last frame's regions no longer match them.
            self.layout = TableLayout::default();
            let kind = page.kind();
            if let Err(e) = self.persist_sort(kind, after.as_ref()) {
                log::warn!("could not save sort for {}: {e}", kind.slug());
            }
        }
        result
    }

    fn persist_sort(&self, kind: PageKind, sort: Option<&SortState>) -> Result<(), SettingsError> {
        match sort {
            Some(sort) => self.settings.set(&sort_key(kind), &SavedSort::from(sort)),
            None => self.settings.delete(&sort_key(kind)),
        }
    }

    fn switch_to(&mut self, kind: PageKind) {
        if kind != self.current {
            log::debug!("switch to {}", kind.slug());
            self.current = kind;
            self.layout = TableLayout::default();
            self.status = None;
        }
    }

    fn reload_current(&mut self) {
        let index = self.current.index();
        self.boundaries[index].reset();
        self.pages[index].reload();
        self.status = None;
    }

    fn delete_selected(&mut self) {
        let index = self.current.index();
        if self.boundaries[index].is_tripped() {
            return;
        }
        self.status = Some(match self.pages[index].delete_selected() {
            Ok(Some(label)) => format!("Deleted {label}"),
            Ok(None) => "Click a row to select it first".to_string(),
            Err(e) => {
                log::warn!("delete failed: {e}");
                format!("Delete failed: {e}")
            }
        });
    }

    fn toggle_zebra(&mut self) {
        self.config.zebra = !self.config.zebra;
        self.style = table_style(&self.config);
        if let Err(e) = self.config.save(&self.settings) {
            log::warn!("could not save config: {e}");
        }
    }
}

/// Saved sort for `page`. An unreadable entry is dropped rather than
/// failing startup.
fn restore_sort(
    settings: &SettingsProvider,
    page: PageKind,
) -> Result<Option<SavedSort>, SettingsError> {
    let key = sort_key(page);
    match settings.get::<SavedSort>(&key) {
        Err(SettingsError::Deserialization(e)) => {
            log::warn!("discarding unreadable {key}: {e}");
            settings.delete(&key)?;
            Ok(None)
        }
        other => other,
    }
}

/// The shared table style, with stripes when `config.zebra` is set.
pub fn table_style(config: &DashboardConfig) -> TableStyle {
    let style = TableStyle::default();
    if config.zebra {
        style.zebra(Style::new().background(Color::var("surface")))
    } else {
        style
    }
}
