use std::sync::Arc;

use gymtable::{CellContent, Column};

use super::{ListPage, PageKind};
use crate::store::{Member, MemberStatus, Store};

pub fn columns() -> Vec<Column<Member>> {
    vec![
        Column::field("Name", "name").flex(2).sortable(),
        Column::field("Email", "email").flex(3),
        Column::field("Plan", "plan").width(8).sortable(),
        Column::field("Status", "status")
            .width(9)
            .sortable()
            .cell(|m: &Member| CellContent::badge(m.status.as_str(), m.status.as_str())),
        Column::field("Joined", "joined").width(10).sortable(),
        Column::computed("Trainer", |m: &Member| {
            m.trainer.as_deref().unwrap_or("unassigned").into()
        })
        .flex(2),
    ]
}

pub fn page(store: Arc<dyn Store<Member>>) -> ListPage<Member> {
    ListPage::new(PageKind::Members, columns(), store).row_hint(|m| {
        (m.status == MemberStatus::Inactive).then_some("muted")
    })
}
