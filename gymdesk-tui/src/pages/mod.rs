//! List pages: one per gym collection, all drawn by the same [`Table`].
//!
//! A page owns everything the table borrows: the column set, the loaded
//! snapshot in store order, the sorted view the table draws, the sort state
//! and the selection.
//! Table callbacks only record what was requested; the page applies the
//! request after the table is gone.

mod classes;
mod equipment;
mod members;
mod payments;

pub use classes::page as classes_page;
pub use equipment::page as equipment_page;
pub use members::page as members_page;
pub use payments::page as payments_page;

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use gymtable::{
    Buffer, Column, EventResult, Rect, Row, SortDirection, SortState, Table, TableLayout,
    TableStyle,
};
use serde::{Deserialize, Serialize};

use crate::store::{Entity, GymStore, Store, StoreError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PageKind {
    Members,
    Classes,
    Payments,
    Equipment,
}

impl PageKind {
    pub const ALL: [PageKind; 4] = [
        PageKind::Members,
        PageKind::Classes,
        PageKind::Payments,
        PageKind::Equipment,
    ];

    pub fn title(self) -> &'static str {
        match self {
            PageKind::Members => "Members",
            PageKind::Classes => "Classes",
            PageKind::Payments => "Payments",
            PageKind::Equipment => "Equipment",
        }
    }

    /// Settings key fragment.
    pub fn slug(self) -> &'static str {
        match self {
            PageKind::Members => "members",
            PageKind::Classes => "classes",
            PageKind::Payments => "payments",
            PageKind::Equipment => "equipment",
        }
    }

    pub fn index(self) -> usize {
        match self {
            PageKind::Members => 0,
            PageKind::Classes => 1,
            PageKind::Payments => 2,
            PageKind::Equipment => 3,
        }
    }

    /// Page bound to the number key `c` (`'1'` for the first page).
    pub fn from_digit(c: char) -> Option<Self> {
        let n = c.to_digit(10)? as usize;
        Self::ALL.get(n.checked_sub(1)?).copied()
    }
}

impl fmt::Display for PageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Next sort state after the user asks to sort by `key`.
///
/// The active key flips direction; any other key starts ascending.
pub fn next_sort(current: Option<&SortState>, key: &str) -> SortState {
    match current {
        Some(sort) if sort.key == key => SortState::new(key, sort.direction.toggled()),
        _ => SortState::ascending(key),
    }
}

/// Sort `records` in place by the field `sort.key`.
///
/// The sort is stable: records with equal values keep their relative order,
/// so sorting a store-order slice leaves ties in store order.
pub fn sort_records<T: Entity>(records: &mut [T], sort: &SortState) {
    records.sort_by(|a, b| {
        let ord = match (a.field(&sort.key), b.field(&sort.key)) {
            (Some(x), Some(y)) => x.compare(&y),
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
        match sort.direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    });
}

/// Object-safe view of a [`ListPage`], so the app can hold all four.
pub trait Page {
    fn kind(&self) -> PageKind;

    /// Start fetching a fresh snapshot from the store.
    fn reload(&mut self);

    /// Pick up a finished fetch. Returns true when the page changed.
    fn poll(&mut self) -> bool;

    fn is_loading(&self) -> bool;

    fn record_count(&self) -> usize;

    fn sort(&self) -> Option<&SortState>;

    /// Replace the sort state and reorder the snapshot.
    fn set_sort(&mut self, sort: Option<SortState>);

    fn selected(&self) -> Option<&str>;

    fn render(&self, area: Rect, buf: &mut Buffer, style: &TableStyle) -> TableLayout;

    /// Route a left click through the table.
    fn click(&mut self, layout: &TableLayout, x: u16, y: u16) -> EventResult;

    /// Delete the selected record from the store and reload.
    ///
    /// Returns the deleted record's label, or `None` with nothing selected.
    fn delete_selected(&mut self) -> Result<Option<String>, StoreError>;
}

/// A page listing one collection of `T`.
pub struct ListPage<T: Entity> {
    kind: PageKind,
    columns: Vec<Column<T>>,
    store: Arc<dyn Store<T>>,
    /// Last loaded snapshot, in store order.
    snapshot: Vec<T>,
    /// `snapshot` sorted by `sort`.
    records: Vec<T>,
    loading: bool,
    pending: Option<Receiver<Result<Vec<T>, StoreError>>>,
    error: Option<StoreError>,
    sort: Option<SortState>,
    selected: Option<String>,
    row_hint: fn(&T) -> Option<&'static str>,
}

impl<T: Entity> ListPage<T> {
    pub fn new(kind: PageKind, columns: Vec<Column<T>>, store: Arc<dyn Store<T>>) -> Self {
        Self {
            kind,
            columns,
            store,
            snapshot: Vec::new(),
            records: Vec::new(),
            loading: false,
            pending: None,
            error: None,
            sort: None,
            selected: None,
            row_hint: |_| None,
        }
    }

    /// Row class for records that aren't selected.
    pub fn row_hint(mut self, hint: fn(&T) -> Option<&'static str>) -> Self {
        self.row_hint = hint;
        self
    }

    pub fn columns(&self) -> &[Column<T>] {
        &self.columns
    }

    /// Current snapshot in display order.
    pub fn records(&self) -> &[T] {
        &self.records
    }

    pub fn error(&self) -> Option<&StoreError> {
        self.error.as_ref()
    }

    fn apply_snapshot(&mut self, result: Result<Vec<T>, StoreError>) {
        match result {
            Ok(records) => {
                log::debug!("{}: loaded {} records", self.kind.slug(), records.len());
                self.snapshot = records;
                self.error = None;
                self.resort();
                let gone = self
                    .selected
                    .as_deref()
                    .is_some_and(|id| !self.records.iter().any(|r| r.id() == id));
                if gone {
                    self.selected = None;
                }
            }
            Err(e) => {
                log::error!("{}: load failed: {e}", self.kind.slug());
                self.snapshot.clear();
                self.records.clear();
                self.selected = None;
                self.error = Some(e);
            }
        }
    }

    fn resort(&mut self) {
        self.records = self.snapshot.clone();
        if let Some(sort) = &self.sort {
            sort_records(&mut self.records, sort);
        }
    }

    fn empty_message(&self) -> String {
        match &self.error {
            Some(e) => format!("Could not load {}: {e}", self.kind.slug()),
            None => format!("No {} yet", self.kind.slug()),
        }
    }

    fn toggle_selection(&mut self, id: String) {
        if self.selected.as_deref() == Some(id.as_str()) {
            self.selected = None;
        } else {
            self.selected = Some(id);
        }
    }
}

impl<T: Entity> Page for ListPage<T> {
    fn kind(&self) -> PageKind {
        self.kind
    }

    fn reload(&mut self) {
        let store = Arc::clone(&self.store);
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let _ = tx.send(store.list());
        });
        self.pending = Some(rx);
        self.loading = true;
    }

    fn poll(&mut self) -> bool {
        let Some(rx) = &self.pending else {
            return false;
        };
        let result = match rx.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return false,
            Err(TryRecvError::Disconnected) => Err(StoreError::Unavailable(T::COLLECTION)),
        };
        self.pending = None;
        self.loading = false;
        self.apply_snapshot(result);
        true
    }

    fn is_loading(&self) -> bool {
        self.loading
    }

    fn record_count(&self) -> usize {
        self.records.len()
    }

    fn sort(&self) -> Option<&SortState> {
        self.sort.as_ref()
    }

    fn set_sort(&mut self, sort: Option<SortState>) {
        self.sort = sort;
        self.resort();
    }

    fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    fn render(&self, area: Rect, buf: &mut Buffer, style: &TableStyle) -> TableLayout {
        let selected = self.selected.as_deref();
        let hint = self.row_hint;

        Table::new(&self.columns, &self.records)
            .loading(self.loading)
            .loading_message(format!("Loading {}...", self.kind.slug()))
            .empty_message(self.empty_message())
            .sort_config(self.sort.as_ref())
            .row_class_fn(move |row: &T, _| {
                if selected == Some(row.id()) {
                    Some("selected".to_string())
                } else {
                    hint(row).map(str::to_string)
                }
            })
            .style(style)
            .render(area, buf)
    }

    fn click(&mut self, layout: &TableLayout, x: u16, y: u16) -> EventResult {
        let mut sort_request: Option<String> = None;
        let mut clicked: Option<String> = None;

        let result = Table::new(&self.columns, &self.records)
            .loading(self.loading)
            .sort_config(self.sort.as_ref())
            .on_sort(|key| sort_request = Some(key.to_string()))
            .on_row_click(|row: &T| clicked = Some(row.id().to_string()))
            .handle_click(layout, x, y);

        if let Some(key) = sort_request {
            let sort = next_sort(self.sort.as_ref(), &key);
            log::debug!("{}: sort by {} {:?}", self.kind.slug(), sort.key, sort.direction);
            self.set_sort(Some(sort));
        }
        if let Some(id) = clicked {
            self.toggle_selection(id);
        }
        result
    }

    fn delete_selected(&mut self) -> Result<Option<String>, StoreError> {
        let Some(id) = self.selected.clone() else {
            return Ok(None);
        };
        let removed = self.store.delete(&id)?;
        self.selected = None;
        self.reload();
        Ok(Some(removed.label()))
    }
}

/// All four pages, in tab order.
pub fn build_pages(store: &GymStore) -> Vec<Box<dyn Page>> {
    vec![
        Box::new(members::page(Arc::clone(&store.members))),
        Box::new(classes::page(Arc::clone(&store.classes))),
        Box::new(payments::page(Arc::clone(&store.payments))),
        Box::new(equipment::page(Arc::clone(&store.equipment))),
    ]
}
