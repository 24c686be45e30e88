use std::sync::Arc;

use gymtable::{CellContent, Column};

use super::{ListPage, PageKind};
use crate::store::{Condition, Equipment, Store};

pub fn columns() -> Vec<Column<Equipment>> {
    vec![
        Column::field("Equipment", "name").flex(2).sortable(),
        Column::field("Category", "category").width(9).sortable(),
        Column::field("Location", "location").width(9),
        Column::field("Condition", "condition")
            .width(11)
            .sortable()
            .cell(|e: &Equipment| CellContent::badge(e.condition.as_str(), e.condition.as_str())),
        Column::field("Serviced", "last_service")
            .width(10)
            .sortable()
            .cell(|e: &Equipment| match e.last_service {
                Some(date) => CellContent::new(date.format("%Y-%m-%d").to_string()),
                None => CellContent::badge("never", "muted"),
            }),
    ]
}

pub fn page(store: Arc<dyn Store<Equipment>>) -> ListPage<Equipment> {
    ListPage::new(PageKind::Equipment, columns(), store)
        .row_hint(|e| (e.condition == Condition::Broken).then_some("muted"))
}
