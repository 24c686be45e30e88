use std::sync::Arc;

use gymtable::{CellContent, Column, TextAlign};

use super::{ListPage, PageKind};
use crate::store::{GymClass, Store};

pub fn columns() -> Vec<Column<GymClass>> {
    vec![
        Column::field("Class", "name").flex(2).sortable(),
        Column::field("Trainer", "trainer").flex(2).sortable(),
        Column::field("Schedule", "schedule").width(10),
        Column::field("Length", "duration")
            .width(7)
            .align(TextAlign::Right)
            .sortable()
            .cell(|c: &GymClass| format!("{} min", c.duration_min)),
        Column::field("Enrolled", "enrolled")
            .width(10)
            .align(TextAlign::Right)
            .sortable()
            .cell(|c: &GymClass| {
                let text = format!("{}/{}", c.enrolled, c.capacity);
                if c.is_full() {
                    CellContent::badge(text, "full")
                } else {
                    CellContent::new(text)
                }
            }),
    ]
}

pub fn page(store: Arc<dyn Store<GymClass>>) -> ListPage<GymClass> {
    ListPage::new(PageKind::Classes, columns(), store)
}
