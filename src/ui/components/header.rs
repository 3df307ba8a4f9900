//! Header component renderer.

use crate::ui::helpers::{display_width, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Renders the centred title with the fetch status right-aligned.
///
/// The status is dropped when it would overlap the title.
///
/// # Returns
///
/// The next available row position (row + 1)
pub fn render_header(row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    let title_len = display_width(&header.title);
    let status = format!("{} ", header.status);
    let status_len = display_width(&status);
    let padding = cols.saturating_sub(title_len) / 2;
    let show_status = padding + title_len + status_len < cols;

    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        print!("{}", Theme::bg(bg));
    }

    print!("{}", " ".repeat(padding));
    print!("{}", header.title);

    if show_status {
        print!("{}", " ".repeat(cols - padding - title_len - status_len));
        print!("{}", Theme::fg(&theme.colors.text_dim));
        print!("{status}");
    } else {
        print!("{}", " ".repeat(cols.saturating_sub(padding + title_len)));
    }

    print!("{}", Theme::reset());
    row + 1
}
