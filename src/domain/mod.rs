//! Domain layer for the Newsdesk plugin.
//!
//! This module contains the core domain types, independent of Zellij APIs and
//! of how items are stored or drawn.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`item`]: Feed items and the fetched dataset
//! - [`sanitize`]: Sanitized values carrying their discard reasons
//!
//! # Examples
//!
//! ```
//! use newsdesk::domain::{Dataset, Item};
//!
//! let items = vec![Item::new("1", "Hello", "https://example.com", "Wire", vec![])];
//! let dataset = Dataset::new(items, chrono::Utc::now());
//! assert_eq!(dataset.items.len(), 1);
//! ```

pub mod error;
pub mod item;
pub mod sanitize;

pub use error::{FetchError, NewsdeskError, Result};
pub use item::{Dataset, Item};
pub use sanitize::Sanitized;
