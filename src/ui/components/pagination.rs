//! Pagination row renderer.

use crate::ui::helpers::{display_width, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::PaginationInfo;

/// Renders prev/next arrows, numbered buttons and the range summary.
///
/// ```text
///  ‹ prev  [1]  2   3  …  next ›                      51-100 of 120
/// ```
///
/// Disabled arrows are dimmed. A trailing `…` marks pages beyond the button
/// window. Returns the next row.
pub fn render_pagination(row: usize, info: &PaginationInfo, theme: &Theme, cols: usize) -> usize {
    let controls = &info.controls;
    let mut used = 0;

    position_cursor(row, 1);

    let arrow_color = |enabled: bool| if enabled { &theme.colors.text_normal } else { &theme.colors.text_dim };

    print!(" {}‹ prev ", Theme::fg(arrow_color(controls.prev_enabled)));
    used += 8;

    for button in &controls.buttons {
        let label = if button.is_current {
            format!("[{}]", button.number)
        } else {
            format!(" {} ", button.number)
        };
        if button.is_current {
            print!("{}{}", Theme::fg(&theme.colors.selection_fg), Theme::bg(&theme.colors.selection_bg));
            print!("{label}");
            print!("{}", Theme::reset());
        } else {
            print!("{}{label}", Theme::fg(&theme.colors.text_normal));
        }
        print!(" ");
        used += display_width(&label) + 1;
    }

    if controls.buttons.len() < controls.total_pages {
        print!("{}… ", Theme::fg(&theme.colors.text_dim));
        used += 2;
    }

    print!("{}next ›", Theme::fg(arrow_color(controls.next_enabled)));
    used += 6;

    let summary = format!("page {} of {}  {} ", controls.current_page, controls.total_pages, info.showing);
    let summary_len = display_width(&summary);
    if used + summary_len < cols {
        print!("{}", " ".repeat(cols - used - summary_len));
        print!("{}{summary}", Theme::fg(&theme.colors.text_dim));
    } else {
        print!("{}", " ".repeat(cols.saturating_sub(used)));
    }

    print!("{}", Theme::reset());
    row + 1
}
