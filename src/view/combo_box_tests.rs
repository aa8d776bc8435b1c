//! Tests for combo box layout, hit testing and rendering.

use super::*;
use crate::model::{ComboBoxId, InstanceIdGenerator};
use crate::state::{ComboBoxProps, ListBoxSize};
use ratatui::backend::TestBackend;
use ratatui::style::Modifier;
use ratatui::Terminal;

fn fruits() -> Vec<String> {
    ["Apple", "Banana", "Cherry", "Blueberry"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn combo_with(
    items: Vec<String>,
    tweak: impl FnOnce(ComboBoxProps<String>) -> ComboBoxProps<String>,
) -> ComboBox<String> {
    let props = ComboBoxProps::new(
        ComboBoxId::new("fruit").expect("valid id"),
        items,
        "Pick a fruit",
        |_: Option<&String>| {},
    );
    ComboBox::new(tweak(props), &InstanceIdGenerator::new())
}

fn render(widget: ComboBoxWidget<'_, String>, width: u16, height: u16) -> Buffer {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal
        .draw(|frame| frame.render_widget(widget, frame.area()))
        .unwrap();
    terminal.backend().buffer().clone()
}

fn line(buf: &Buffer, y: u16) -> String {
    (0..buf.area.width)
        .map(|x| buf[(x, y)].symbol())
        .collect::<String>()
        .trim_end()
        .to_string()
}

// ===== layout =====

#[test]
fn bottom_layout_stacks_title_field_menu_helper() {
    let mut combo = combo_with(fruits(), |p| p.title_text("Fruit").helper_text("Help"));
    combo.open();

    let layout = ComboBoxLayout::compute(&combo, Rect::new(0, 0, 30, 12));

    assert_eq!(layout.title, Some(Rect::new(0, 0, 30, 1)));
    assert_eq!(layout.field, Rect::new(0, 1, 30, 3));
    assert_eq!(layout.menu, Some(Rect::new(0, 4, 30, 6)));
    assert_eq!(layout.rows, Rect::new(1, 5, 28, 4));
    assert_eq!(layout.helper, Some(Rect::new(0, 10, 30, 1)));
    assert_eq!(layout.toggle, Rect::new(28, 2, 1, 1));
    assert_eq!(layout.query, Rect::new(1, 2, 26, 1));
    assert_eq!(layout.clear, None);
}

#[test]
fn top_layout_puts_menu_above_field() {
    let mut combo = combo_with(fruits()[..3].to_vec(), |p| p.direction(Direction::Top));
    combo.open();

    let layout = ComboBoxLayout::compute(&combo, Rect::new(0, 0, 30, 10));

    assert_eq!(layout.menu, Some(Rect::new(0, 0, 30, 5)));
    assert_eq!(layout.field, Rect::new(0, 5, 30, 3));
}

#[test]
fn closed_layout_has_no_menu() {
    let combo = combo_with(fruits(), |p| p);
    let layout = ComboBoxLayout::compute(&combo, Rect::new(0, 0, 30, 10));
    assert_eq!(layout.menu, None);
    assert_eq!(layout.rows, Rect::default());
}

#[test]
fn menu_height_follows_size_class() {
    let items: Vec<String> = (0..20).map(|i| format!("Item {i}")).collect();
    let mut combo = combo_with(items, |p| p.size(ListBoxSize::Sm));
    combo.open();

    let layout = ComboBoxLayout::compute(&combo, Rect::new(0, 0, 30, 20));

    assert_eq!(layout.rows.height, 4);
}

#[test]
fn clear_and_invalid_cells_precede_toggle() {
    let mut combo = combo_with(fruits(), |p| p.invalid(true));
    combo.set_query("b");

    let layout = ComboBoxLayout::compute(&combo, Rect::new(0, 0, 30, 5));

    assert_eq!(layout.invalid_marker, Some(Rect::new(24, 1, 1, 1)));
    assert_eq!(layout.clear, Some(Rect::new(26, 1, 1, 1)));
    assert_eq!(layout.toggle, Rect::new(28, 1, 1, 1));
    assert_eq!(layout.query.width, 22);
}

#[test]
fn inline_layout_puts_title_on_the_field_row() {
    let combo = combo_with(fruits(), |p| {
        p.title_text("Fruit").list_box_type(ListBoxType::Inline)
    });

    let layout = ComboBoxLayout::compute(&combo, Rect::new(0, 0, 30, 5));

    assert_eq!(layout.field, Rect::new(0, 0, 30, 1));
    assert_eq!(layout.title, Some(Rect::new(0, 0, 6, 1)));
    assert_eq!(layout.query.x, 6);
}

#[test]
fn menu_offset_keeps_highlight_visible() {
    assert_eq!(menu_offset(None, 4), 0);
    assert_eq!(menu_offset(Some(3), 4), 0);
    assert_eq!(menu_offset(Some(4), 4), 1);
    assert_eq!(menu_offset(Some(9), 4), 6);
    assert_eq!(menu_offset(Some(2), 0), 0);
}

// ===== hit testing =====

#[test]
fn hit_test_resolves_each_part() {
    let mut combo = combo_with(fruits(), |p| p.title_text("Fruit"));
    combo.set_query("b");
    combo.open();

    // b -> Banana, Blueberry
    let layout = ComboBoxLayout::compute(&combo, Rect::new(0, 0, 30, 12));

    assert_eq!(layout.hit_test(28, 2), Hit::Toggle);
    assert_eq!(layout.hit_test(26, 2), Hit::Clear);
    assert_eq!(layout.hit_test(5, 2), Hit::Input);
    assert_eq!(layout.hit_test(2, 0), Hit::Input);
    assert_eq!(layout.hit_test(3, 5), Hit::Row(0));
    assert_eq!(layout.hit_test(3, 6), Hit::Row(1));
    assert_eq!(layout.hit_test(0, 5), Hit::Menu);
    assert_eq!(layout.hit_test(3, 11), Hit::Outside);
}

#[test]
fn hit_test_accounts_for_scrolled_menu() {
    let items: Vec<String> = (0..10).map(|i| format!("Item {i}")).collect();
    let mut combo = combo_with(items, |p| p.size(ListBoxSize::Sm));
    combo.open();
    combo.move_highlight(7);

    let layout = ComboBoxLayout::compute(&combo, Rect::new(0, 0, 30, 12));

    assert_eq!(layout.row_offset, 3);
    assert_eq!(layout.hit_test(3, layout.rows.y), Hit::Row(3));
}

// ===== rendering =====

#[test]
fn closed_field_shows_placeholder_and_closed_toggle() {
    let combo = combo_with(fruits(), |p| p);
    let buf = render(ComboBoxWidget::new(&combo), 30, 3);

    assert_eq!(line(&buf, 1), format!("│Pick a fruit{}▾│", " ".repeat(15)));
}

#[test]
fn open_menu_lists_visible_items_with_selected_mark() {
    let mut combo = combo_with(fruits(), |p| p.initial_selected_item("Cherry".to_string()));
    combo.set_query("");
    combo.open();

    let buf = render(ComboBoxWidget::new(&combo), 30, 12);

    assert!(line(&buf, 1).ends_with("▴│"));
    assert_eq!(line(&buf, 4).trim_end_matches('│').trim_end(), "│  Apple");
    assert_eq!(line(&buf, 6).trim_end_matches('│').trim_end(), "│✓ Cherry");
}

#[test]
fn empty_menu_shows_no_results_row() {
    let mut combo = combo_with(fruits(), |p| p);
    combo.set_query("zzz");
    combo.open();

    let buf = render(ComboBoxWidget::new(&combo), 30, 8);

    assert!(line(&buf, 4).contains(EMPTY_MENU_TEXT));
}

#[test]
fn highlighted_row_gets_highlight_style() {
    let mut combo = combo_with(fruits(), |p| p);
    combo.open();
    combo.move_highlight(2);

    let styles = ComboBoxStyles::dark();
    let buf = render(ComboBoxWidget::new(&combo).styles(styles), 30, 12);

    assert_eq!(buf[(3, 5)].bg, styles.highlight.bg.expect("highlight bg"));
    assert_ne!(buf[(3, 4)].bg, styles.highlight.bg.expect("highlight bg"));
}

#[test]
fn focused_widget_draws_cursor_cell() {
    let mut combo = combo_with(fruits(), |p| p);
    combo.set_query("Ba");

    let buf = render(ComboBoxWidget::new(&combo).focused(true), 30, 3);

    assert!(buf[(3, 1)].modifier.contains(Modifier::REVERSED));
    assert!(!buf[(2, 1)].modifier.contains(Modifier::REVERSED));
}

#[test]
fn long_query_scrolls_to_keep_cursor_visible() {
    let mut combo = combo_with(fruits(), |p| p);
    combo.set_query("abcdefghijklmnop");

    // Field 12 wide: inner 10, tail "× ▾" 3, gap 1 -> 6 query cells
    let buf = render(ComboBoxWidget::new(&combo), 12, 3);

    assert_eq!(line(&buf, 1), "│lmnop  × ▾│");
}

#[test]
fn cursor_follows_display_width_of_wide_glyphs() {
    let mut combo = combo_with(fruits(), |p| p);
    combo.set_query("日本");

    let buf = render(ComboBoxWidget::new(&combo).focused(true), 30, 3);

    // Two double-width glyphs occupy cells 1..5; the cursor sits after them.
    assert_eq!(buf[(1, 1)].symbol(), "日");
    assert_eq!(buf[(3, 1)].symbol(), "本");
    assert!(buf[(5, 1)].modifier.contains(Modifier::REVERSED));
    assert!(!buf[(3, 1)].modifier.contains(Modifier::REVERSED));
}

#[test]
fn wide_query_scrolls_by_cells() {
    let mut combo = combo_with(fruits(), |p| p);
    combo.set_query("日本語です");

    // 6 query cells: two glyphs fit before the cursor cell.
    let buf = render(ComboBoxWidget::new(&combo).focused(true), 12, 3);

    assert_eq!(buf[(1, 1)].symbol(), "で");
    assert_eq!(buf[(3, 1)].symbol(), "す");
    assert!(buf[(5, 1)].modifier.contains(Modifier::REVERSED));
    assert_eq!(line(&buf, 1).chars().last(), Some('│'));
}

#[test]
fn item_to_element_replaces_row_content() {
    let mut combo = combo_with(fruits(), |p| p);
    combo.open();
    let element = |item: &String| Line::from(format!("<{}>", item.to_uppercase()));

    let buf = render(
        ComboBoxWidget::new(&combo).item_to_element(&element),
        30,
        12,
    );

    assert!(line(&buf, 4).starts_with("│  <APPLE>"));
}

#[test]
fn invalid_text_replaces_helper_text() {
    let combo = combo_with(fruits(), |p| {
        p.helper_text("Start typing")
            .invalid(true)
            .invalid_text("Required")
    });

    let buf = render(ComboBoxWidget::new(&combo), 30, 5);

    assert!(line(&buf, 1).contains(INVALID_SYMBOL));
    assert_eq!(line(&buf, 3), "Required");
}

#[test]
fn disabled_hides_clear_and_dims_everything() {
    let combo = combo_with(fruits(), |p| {
        p.initial_selected_item("Apple".to_string()).disabled(true)
    });

    let styles = ComboBoxStyles::dark();
    let buf = render(ComboBoxWidget::new(&combo).styles(styles).focused(true), 30, 3);

    assert!(!line(&buf, 1).contains(CLEAR_SYMBOL));
    assert!(buf[(1, 1)].modifier.contains(Modifier::DIM));
    assert!(!buf[(6, 1)].modifier.contains(Modifier::REVERSED));
}

#[test]
fn tiny_area_does_not_panic() {
    let mut combo = combo_with(fruits(), |p| {
        p.title_text("Fruit").helper_text("Help").invalid(true)
    });
    combo.set_query("b");
    combo.open();

    let _ = render(ComboBoxWidget::new(&combo), 3, 2);
}
