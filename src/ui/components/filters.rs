//! Filter bar component renderer.
//!
//! Shows the current source and topic selection and both flag toggles on a
//! single line. Values that restrict the list use the active filter colour.

use crate::ui::helpers::{display_width, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FilterBarInfo;

/// Renders the filter bar and returns the next row.
///
/// ```text
///  Source: Reuters │ Topic: All │ [x] hide read │ [ ] starred only
/// ```
pub fn render_filter_bar(row: usize, bar: &FilterBarInfo, theme: &Theme, cols: usize) -> usize {
    let segments = [
        ("Source: ", bar.source.clone(), bar.source != "All"),
        ("Topic: ", bar.topic.clone(), bar.topic != "All"),
        ("", format!("{} hide read", checkbox(bar.hide_read)), bar.hide_read),
        ("", format!("{} starred only", checkbox(bar.star_only)), bar.star_only),
    ];

    position_cursor(row, 1);
    print!("{}", Theme::fg(&theme.colors.text_normal));

    let mut used = 1;
    print!(" ");
    for (index, (label, value, active)) in segments.iter().enumerate() {
        if index > 0 {
            print!("{} │ {}", Theme::fg(&theme.colors.border), Theme::fg(&theme.colors.text_normal));
            used += 3;
        }

        print!("{}{label}", Theme::fg(&theme.colors.text_dim));
        let color = if *active { &theme.colors.active_filter_fg } else { &theme.colors.text_normal };
        print!("{}{value}", Theme::fg(color));
        used += display_width(label) + display_width(value);
    }

    print!("{}", " ".repeat(cols.saturating_sub(used)));
    print!("{}", Theme::reset());
    row + 1
}

const fn checkbox(checked: bool) -> &'static str {
    if checked {
        "[x]"
    } else {
        "[ ]"
    }
}
