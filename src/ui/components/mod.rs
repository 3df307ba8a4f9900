//! Composable UI component renderers.
//!
//! # Components
//!
//! - [`header`]: Title bar with counts and fetch status
//! - [`filters`]: Source, topic and flag filters
//! - [`search`]: Query input box
//! - [`table`]: Item rows with read/star badges and query highlights
//! - [`pagination`]: Prev/next and numbered page buttons
//! - [`footer`]: Keybinding hints
//! - [`empty`]: Message shown in place of the table
//!
//! # Layout
//!
//! ```text
//! [blank line]
//! [Header]
//! [Border]
//! [Filter bar]
//! [Search box - 3 lines, when shown]
//! [Table headers]
//! [Table rows | Empty state]
//! [blank padding]
//! [Pagination]
//! [Border]
//! [Footer]
//! ```

mod empty;
mod filters;
mod footer;
mod header;
mod pagination;
mod search;
mod table;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

use empty::render_empty_state;
use filters::render_filter_bar;
use footer::render_footer;
use header::render_header;
use pagination::render_pagination;
use search::render_search_bar;
use table::{render_table_headers, render_table_rows};

/// Renders a horizontal border line and returns the next row.
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the full layout.
///
/// Reserves [`CHROME_ROWS`](crate::ui::viewmodel::CHROME_ROWS) lines for
/// chrome, plus the search box when present. The view model is already
/// windowed to fit the remaining rows.
pub fn render_layout(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 2;

    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);
    current_row = render_filter_bar(current_row, &vm.filter_bar, theme, cols);
    if let Some(search) = &vm.search_bar {
        current_row = render_search_bar(current_row, search, theme, cols);
    }

    if let Some(empty) = &vm.empty_state {
        render_empty_state(current_row + 2, empty, theme, cols);
    } else {
        current_row = render_table_headers(current_row, theme, cols);
        render_table_rows(current_row, &vm.display_items, theme, cols);
    }

    let footer_row = rows.saturating_sub(1);
    let border_row = footer_row.saturating_sub(1);
    let pagination_row = border_row.saturating_sub(1);

    render_pagination(pagination_row, &vm.pagination, theme, cols);
    render_border(border_row, &theme.colors.border, cols);
    render_footer(footer_row, &vm.footer, theme, cols);
}
