use gymtable::{
    Buffer, Color, ColorContext, Column, DefaultTheme, Record, Rect, SortState, Style, Table,
    TableStyle, TextAlign,
};

fn data() -> Vec<Record> {
    vec![
        Record::with_id("1").set("name", "John Doe").set("status", "active"),
        Record::with_id("2").set("name", "Jane Roe").set("status", "inactive"),
        Record::with_id("3").set("name", "Max Power").set("status", "pending"),
    ]
}

fn resolve(color: &Color) -> gymtable::Rgb {
    ColorContext::new(&DefaultTheme::new()).resolve(color)
}

// ============================================================================
// Layout
// ============================================================================

#[test]
fn test_header_separator_and_rows() {
    let columns = vec![
        Column::field("Name", "name").width(12),
        Column::field("Status", "status").width(10),
    ];
    let rows = data();
    let mut buf = Buffer::new(23, 6);

    let layout = Table::new(&columns, &rows).render(buf.area(), &mut buf);

    assert_eq!(buf.line(0), "Name         Status    ");
    assert_eq!(buf.line(1), "─".repeat(23));
    assert_eq!(buf.line(2), "John Doe     active    ");
    assert_eq!(buf.line(3), "Jane Roe     inactive  ");
    assert_eq!(buf.line(4), "Max Power    pending   ");
    assert_eq!(layout.headers, [Rect::new(0, 0, 12, 1), Rect::new(13, 0, 10, 1)]);
    assert_eq!(layout.rows.len(), 3);
    assert_eq!(layout.rows[0], Rect::new(0, 2, 23, 1));
}

#[test]
fn test_rows_clipped_to_area_height() {
    let columns = vec![Column::field("Name", "name")];
    let rows = data();
    let mut buf = Buffer::new(20, 4);

    let layout = Table::new(&columns, &rows).render(buf.area(), &mut buf);

    // Two header lines leave room for two rows.
    assert_eq!(layout.visible_rows(), 2);
    assert!(buf.line(3).starts_with("Jane Roe"));
}

#[test]
fn test_render_respects_area_offset() {
    let columns = vec![Column::field("Name", "name")];
    let rows = data();
    let mut buf = Buffer::new(30, 10);

    let layout = Table::new(&columns, &rows).render(Rect::new(5, 3, 20, 6), &mut buf);

    assert!(buf.line(0).trim().is_empty());
    assert_eq!(&buf.line(3)[5..9], "Name");
    assert_eq!(layout.rows[0].y, 5);
    assert_eq!(layout.rows[0].x, 5);
}

#[test]
fn test_flex_columns_share_remaining_width() {
    let columns = vec![
        Column::<Record>::field("ID", "id").width(4),
        Column::field("Name", "name").flex(2),
        Column::field("Status", "status").flex(1),
    ];
    let widths = gymtable::table::column_widths(&columns, 36, 1);

    // 36 - 2 gaps - 4 fixed = 30, split 2:1.
    assert_eq!(widths, [4, 20, 10]);
}

#[test]
fn test_flex_columns_keep_minimum_width() {
    let columns = vec![
        Column::<Record>::field("Wide", "a").width(50),
        Column::field("Tiny", "b"),
    ];
    let widths = gymtable::table::column_widths(&columns, 20, 1);

    assert_eq!(widths, [50, 1]);
}

#[test]
fn test_long_values_truncated_with_ellipsis() {
    let columns = vec![Column::field("Name", "name").width(6)];
    let rows = vec![Record::new().set("name", "Bartholomew")];
    let mut buf = Buffer::new(6, 3);

    Table::new(&columns, &rows).render(buf.area(), &mut buf);

    assert_eq!(buf.line(2), "Barth…");
}

#[test]
fn test_multiline_values_flattened() {
    let columns = vec![Column::field("Notes", "notes").width(12)];
    let rows = vec![Record::new().set("notes", "knee\ninjury")];
    let mut buf = Buffer::new(12, 3);

    Table::new(&columns, &rows).render(buf.area(), &mut buf);

    assert_eq!(buf.line(2), "knee injury ");
}

#[test]
fn test_right_aligned_column() {
    let columns = vec![Column::field("Amount", "amount")
        .width(8)
        .align(TextAlign::Right)];
    let rows = vec![Record::new().set("amount", 45)];
    let mut buf = Buffer::new(8, 3);

    Table::new(&columns, &rows).render(buf.area(), &mut buf);

    assert_eq!(buf.line(2), "      45");
}

#[test]
fn test_sort_glyph_drawn_after_label() {
    let columns = vec![
        Column::field("Name", "name").width(10).sortable(),
        Column::field("Status", "status").width(10).sortable(),
    ];
    let rows = data();
    let sort = SortState::descending("status");
    let mut buf = Buffer::new(21, 5);

    Table::new(&columns, &rows)
        .sort_config(Some(&sort))
        .render(buf.area(), &mut buf);

    assert_eq!(buf.line(0), "Name       Status ▼  ");
}

#[test]
fn test_sort_glyph_survives_narrow_column() {
    let columns = vec![Column::field("Membership", "plan").width(6).sortable()];
    let rows = vec![Record::new().set("plan", "gold")];
    let sort = SortState::ascending("plan");
    let mut buf = Buffer::new(6, 3);

    Table::new(&columns, &rows)
        .sort_config(Some(&sort))
        .render(buf.area(), &mut buf);

    assert_eq!(buf.line(0), "Mem… ▲");
}

#[test]
fn test_sort_glyph_alone_in_tiny_column() {
    let columns = vec![
        Column::field("Name", "name").width(1).sortable(),
        Column::field("Status", "status").width(2).sortable(),
    ];
    let rows = data();
    let sort = SortState::ascending("name");
    let mut buf = Buffer::new(4, 3);

    Table::new(&columns, &rows)
        .sort_config(Some(&sort))
        .render(buf.area(), &mut buf);
    assert_eq!(buf.line(0), "▲ S…");

    let sort = SortState::descending("status");
    let mut buf = Buffer::new(4, 3);
    Table::new(&columns, &rows)
        .sort_config(Some(&sort))
        .render(buf.area(), &mut buf);
    assert_eq!(buf.line(0), "… ▼ ");
}

#[test]
fn test_placeholder_spans_full_width_centered() {
    let columns = vec![
        Column::<Record>::field("Name", "name").width(10),
        Column::field("Status", "status").width(9),
    ];
    let rows: Vec<Record> = Vec::new();
    let mut buf = Buffer::new(20, 4);

    let layout = Table::new(&columns, &rows)
        .empty_message("Empty")
        .render(buf.area(), &mut buf);

    assert_eq!(layout.placeholder, Some(Rect::new(0, 2, 20, 1)));
    assert_eq!(buf.line(2), "       Empty        ");
    assert!(buf.line(3).trim().is_empty());
}

#[test]
fn test_empty_area_renders_nothing() {
    let columns = vec![Column::field("Name", "name")];
    let rows = data();
    let mut buf = Buffer::new(10, 10);
    let before = buf.clone();

    let layout = Table::new(&columns, &rows).render(Rect::new(0, 0, 0, 5), &mut buf);

    assert_eq!(buf, before);
    assert!(layout.headers.is_empty());
}

// ============================================================================
// Styling
// ============================================================================

#[test]
fn test_header_uses_header_style() {
    let columns = vec![Column::field("Name", "name").width(10)];
    let rows = data();
    let style = TableStyle::default();
    let mut buf = Buffer::new(10, 4);

    Table::new(&columns, &rows)
        .style(&style)
        .render(buf.area(), &mut buf);

    let cell = buf.get(0, 0).unwrap();
    assert!(cell.style.bold);
    assert_eq!(cell.fg, resolve(&Color::var("primary")));
}

#[test]
fn test_badge_class_colors_cell() {
    let columns = vec![Column::field("Status", "status")
        .width(10)
        .cell(|r: &Record| {
            let status = gymtable::Row::field(r, "status").unwrap_or_default().to_string();
            gymtable::column::CellContent::badge(status.clone(), status)
        })];
    let rows = data();
    let mut buf = Buffer::new(10, 5);

    Table::new(&columns, &rows).render(buf.area(), &mut buf);

    assert_eq!(buf.get(0, 2).unwrap().fg, resolve(&Color::var("success")));
    assert_eq!(buf.get(0, 3).unwrap().fg, resolve(&Color::var("muted")));
    assert_eq!(buf.get(0, 4).unwrap().fg, resolve(&Color::var("warning")));
}

#[test]
fn test_selected_row_class_fills_row_background() {
    let columns = vec![Column::field("Name", "name").width(10)];
    let rows = data();
    let mut buf = Buffer::new(20, 5);

    Table::new(&columns, &rows)
        .row_class_fn(|_, index| (index == 1).then(|| "selected".to_string()))
        .render(buf.area(), &mut buf);

    let primary = resolve(&Color::var("primary"));
    // Whole row, including the area past the last column.
    assert_eq!(buf.get(0, 3).unwrap().bg, primary);
    assert_eq!(buf.get(19, 3).unwrap().bg, primary);
    assert_ne!(buf.get(0, 2).unwrap().bg, primary);
}

#[test]
fn test_zebra_rows() {
    let stripe = Color::rgb(40, 40, 40);
    let style = TableStyle::default().zebra(Style::new().background(stripe.clone()));
    let columns = vec![Column::field("Name", "name").width(10)];
    let rows = data();
    let mut buf = Buffer::new(10, 5);

    Table::new(&columns, &rows)
        .style(&style)
        .render(buf.area(), &mut buf);

    assert_ne!(buf.get(0, 2).unwrap().bg, stripe.to_rgb());
    assert_eq!(buf.get(0, 3).unwrap().bg, stripe.to_rgb());
    assert_ne!(buf.get(0, 4).unwrap().bg, stripe.to_rgb());
}

#[test]
fn test_unknown_class_is_ignored() {
    let columns = vec![Column::field("Name", "name").width(10).class("no-such-class")];
    let rows = data();
    let mut plain = Buffer::new(10, 5);
    let mut classed = Buffer::new(10, 5);

    Table::new(&columns, &rows).render(classed.area(), &mut classed);
    let columns = vec![Column::field("Name", "name").width(10)];
    Table::new(&columns, &rows).render(plain.area(), &mut plain);

    assert_eq!(plain, classed);
}

#[test]
fn test_custom_class_registered_on_style() {
    let vip = Color::rgb(255, 215, 0);
    let style = TableStyle::default().class("vip", Style::new().foreground(vip.clone()));
    let columns = vec![Column::field("Name", "name").width(10).class("vip")];
    let rows = data();
    let mut buf = Buffer::new(10, 5);

    Table::new(&columns, &rows)
        .style(&style)
        .render(buf.area(), &mut buf);

    assert_eq!(buf.get(0, 2).unwrap().fg, vip.to_rgb());
}
