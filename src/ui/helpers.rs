//! Shared rendering utilities.
//!
//! All width arithmetic here is in terminal columns: wide CJK and emoji
//! characters take two, and cuts never split inside a code point.

use crate::ui::theme::Theme;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Positions the cursor at a 1-indexed row and column.
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Removes control characters from remote text.
///
/// Newlines and tabs become single spaces so a headline stays on one row.
/// Everything else in the C0/C1 ranges, including the escape character, is
/// dropped so feed content cannot inject terminal escape sequences.
///
/// # Examples
///
/// ```
/// use newsdesk::ui::helpers::strip_control;
///
/// assert_eq!(strip_control("a\u{1b}[31mb\nc"), "a[31mb c");
/// ```
#[must_use]
pub fn strip_control(text: &str) -> String {
    text.chars()
        .filter_map(|c| match c {
            '\n' | '\r' | '\t' => Some(' '),
            c if c.is_control() => None,
            c => Some(c),
        })
        .collect()
}

/// Number of terminal columns `text` occupies.
#[must_use]
pub fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

/// Truncates to at most `max` columns, ending with `…` when cut.
///
/// # Examples
///
/// ```
/// use newsdesk::ui::helpers::truncate;
///
/// assert_eq!(truncate("headline", 5), "head…");
/// assert_eq!(truncate("short", 10), "short");
/// ```
#[must_use]
pub fn truncate(text: &str, max: usize) -> String {
    if display_width(text) <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let budget = max - 1;
    let mut used = 0;
    let mut cut = String::new();
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        cut.push(c);
    }
    cut.push('…');
    cut
}

/// Prints `text` padded with spaces to `width` columns.
pub fn print_padded(text: &str, width: usize) {
    print!("{text}");
    print!("{}", " ".repeat(width.saturating_sub(display_width(text))));
}

/// Renders text with highlighted character ranges for query matches.
///
/// Ranges are `(start, end)` char indices with exclusive end. Highlighting is
/// skipped on the selected row so it does not fight the selection colours.
pub fn render_highlighted_text(
    text: &str,
    ranges: &[(usize, usize)],
    theme: &Theme,
    is_selected: bool,
) {
    if ranges.is_empty() || is_selected {
        print!("{text}");
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len());
        let end = end.min(chars.len());
        if start < current_pos || start >= end {
            continue;
        }

        if start > current_pos {
            let normal_section: String = chars[current_pos..start].iter().collect();
            print!("{normal_section}");
        }

        print!("{}", Theme::fg(&theme.colors.match_highlight_fg));
        print!("{}", Theme::bg(&theme.colors.match_highlight_bg));
        let highlighted_section: String = chars[start..end].iter().collect();
        print!("{highlighted_section}");
        print!("{}", Theme::reset());
        print!("{}", Theme::fg(&theme.colors.text_normal));

        current_pos = end;
    }

    if current_pos < chars.len() {
        let remaining: String = chars[current_pos..].iter().collect();
        print!("{remaining}");
    }
}
