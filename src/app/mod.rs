//! Application layer coordinating state, events, and actions.
//!
//! Sits between the plugin shim and the domain, storage and UI layers.
//!
//! # Architecture
//!
//! ```text
//! Key / Web result → Event → handle_event → ViewState transitions → Actions
//!                                 │                                   │
//!                                 └──── FetchResolved / FetchFailed ◀─┘
//! ```
//!
//! # Modules
//!
//! - [`filter`]: Filter engine and selector options
//! - [`pagination`]: Fixed-size pages and page buttons
//! - [`state`]: View state orchestration and view model computation
//! - [`handler`]: Event processing
//! - [`keys`]: Keyboard bindings
//! - [`actions`]: Side effects for the plugin shim
//! - [`modes`]: Input focus and dataset lifecycle types

pub mod actions;
pub mod filter;
pub mod handler;
pub mod keys;
pub mod modes;
pub mod pagination;
pub mod state;

pub use actions::Action;
pub use filter::FilterCriteria;
pub use handler::{handle_event, Event, FilterChange};
pub use keys::map_key;
pub use modes::{DatasetPhase, InputMode};
pub use state::{AppState, FeedSettings, ViewState};
