//! Top-level rendering entry point.
//!
//! Rendering is two steps: `AppState::compute_viewmodel` turns state into a
//! [`UIViewModel`], then the components print it as ANSI output.

use crate::app::AppState;
use crate::ui::components;

#[cfg(doc)]
use crate::ui::viewmodel::UIViewModel;

/// Renders the plugin UI to stdout.
///
/// # Parameters
///
/// * `state` - Current application state
/// * `rows` - Pane height in rows
/// * `cols` - Pane width in columns
///
/// # Output
///
/// Prints ANSI-styled output with `print!`. Does not clear the screen.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    let _span = tracing::trace_span!("render", rows, cols).entered();
    let viewmodel = state.compute_viewmodel(rows, cols);
    components::render_layout(&viewmodel, &state.theme, cols, rows);
}
