//! Terminal UI rendering layer.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → ANSI Output
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: Renderable UI state and column layout
//! - [`renderer`]: Rendering entry point
//! - [`components`]: Header, filter bar, search box, table, pagination, footer
//! - [`helpers`]: Cursor movement, highlighting, truncation, control stripping
//! - [`theme`]: Light and dark palettes and ANSI escapes

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::render;
pub use theme::Theme;
pub use viewmodel::{
    DisplayItem, EmptyState, FilterBarInfo, FooterInfo, HeaderInfo, PaginationInfo, SearchBarInfo,
    UIViewModel,
};
