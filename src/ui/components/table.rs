//! Table component renderer.
//!
//! Four columns: read/star badges, title, source and publication date. Titles
//! of read items are drawn in the read colour, query matches are highlighted
//! on every row but the selected one.

use crate::ui::helpers::{self, display_width, position_cursor, print_padded};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{self, DisplayItem, BADGE_WIDTH, DATE_WIDTH, SOURCE_WIDTH};

/// Renders the column headers and returns the next row.
pub fn render_table_headers(row: usize, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    print_padded("", BADGE_WIDTH);
    print_padded("TITLE", viewmodel::title_width(cols));
    print!(" ");
    print_padded("SOURCE", SOURCE_WIDTH);
    print!(" ");
    print_padded("DATE", DATE_WIDTH);
    print!("{}", Theme::reset());
    row + 1
}

/// Renders all rows and returns the row after the last one.
pub fn render_table_rows(row: usize, items: &[DisplayItem], theme: &Theme, cols: usize) -> usize {
    let mut current_row = row;
    for item in items {
        current_row = render_table_row(current_row, item, theme, cols);
    }
    current_row
}

/// Renders one item row.
///
/// ```text
///  ★✓ Title (flexible width)            Source             2024-03-01
/// ```
///
/// The row is padded to the full width so the selection background spans it.
fn render_table_row(row: usize, item: &DisplayItem, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);

    let base_fg = if item.is_selected { &theme.colors.selection_fg } else { &theme.colors.text_normal };
    if item.is_selected {
        print!("{}", Theme::bg(&theme.colors.selection_bg));
    }

    print!(" ");
    if item.is_starred {
        let star_fg = if item.is_selected { base_fg } else { &theme.colors.star_fg };
        print!("{}★", Theme::fg(star_fg));
    } else {
        print!(" ");
    }
    print!("{}{} ", Theme::fg(base_fg), if item.is_read { "✓" } else { " " });

    let title_fg = if item.is_read && !item.is_selected { &theme.colors.read_fg } else { base_fg };
    print!("{}", Theme::fg(title_fg));
    helpers::render_highlighted_text(&item.title, &item.highlight_ranges, theme, item.is_selected);
    print!("{}", Theme::fg(title_fg));
    if item.is_selected {
        print!("{}", Theme::bg(&theme.colors.selection_bg));
    }
    print!("{}", " ".repeat(viewmodel::title_width(cols).saturating_sub(display_width(&item.title))));

    print!("{} ", Theme::fg(base_fg));
    print_padded(&item.source, SOURCE_WIDTH);
    print!(" ");

    let date_fg = if item.is_selected { base_fg } else { &theme.colors.text_dim };
    print!("{}", Theme::fg(date_fg));
    print_padded(&item.published, DATE_WIDTH);

    let used = BADGE_WIDTH + viewmodel::title_width(cols) + SOURCE_WIDTH + DATE_WIDTH + 2;
    print!("{}", " ".repeat(cols.saturating_sub(used)));

    print!("{}", Theme::reset());
    row + 1
}
