//! Empty state component renderer.
//!
//! Drawn in place of the table when nothing is loaded, a fetch is running
//! with no previous data, the fetch failed, or the filters match nothing.

use crate::ui::helpers::{display_width, position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;

/// Renders a centred two-line message starting at `row`.
///
/// Failures use the error colour for the message line. The subtitle is
/// always dimmed.
pub fn render_empty_state(row: usize, empty: &EmptyState, theme: &Theme, cols: usize) {
    let message = truncate(&empty.message, cols);
    let msg_len = display_width(&message);
    let msg_padding = cols.saturating_sub(msg_len) / 2;
    let msg_color = if empty.is_error { &theme.colors.error_fg } else { &theme.colors.empty_state_fg };

    position_cursor(row, 1);
    print!("{}", Theme::fg(msg_color));
    print!("{}", " ".repeat(msg_padding));
    print!("{message}");
    print!("{}", " ".repeat(cols.saturating_sub(msg_padding + msg_len)));
    print!("{}", Theme::reset());

    let subtitle = truncate(&empty.subtitle, cols);
    let sub_len = display_width(&subtitle);
    let sub_padding = cols.saturating_sub(sub_len) / 2;

    position_cursor(row + 1, 1);
    print!("{}", Theme::dim());
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{}", " ".repeat(sub_padding));
    print!("{subtitle}");
    print!("{}", " ".repeat(cols.saturating_sub(sub_padding + sub_len)));
    print!("{}", Theme::reset());
}
