use std::sync::Arc;

use gymtable::{CellContent, Column, TextAlign};

use super::{ListPage, PageKind};
use crate::store::{Payment, Store};

pub fn columns() -> Vec<Column<Payment>> {
    vec![
        Column::field("ID", "id").width(7).sortable(),
        Column::field("Member", "member").flex(2).sortable(),
        Column::field("Amount", "amount")
            .width(9)
            .align(TextAlign::Right)
            .sortable()
            .cell(|p: &Payment| format!("${:.2}", p.amount)),
        Column::field("Date", "date").width(10).sortable(),
        Column::field("Method", "method").width(9),
        Column::field("Status", "status")
            .width(8)
            .sortable()
            .cell(|p: &Payment| CellContent::badge(p.status.as_str(), p.status.as_str())),
    ]
}

pub fn page(store: Arc<dyn Store<Payment>>) -> ListPage<Payment> {
    ListPage::new(PageKind::Payments, columns(), store)
}
