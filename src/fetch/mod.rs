//! Fetch gateway: the boundary to the remote feed endpoint.
//!
//! The plugin never performs I/O itself. It emits an
//! [`Action::Fetch`](crate::app::Action::Fetch) carrying a [`FetchRequest`];
//! the plugin shim hands that to the host's web request API, and the raw
//! result comes back later as an event that [`decode_response`] turns into
//! items or a [`FetchError`](crate::domain::FetchError).
//!
//! There is no retry, timeout, cancellation or deduplication here.

pub mod request;
pub mod response;

pub use request::{request_id_from_context, FetchRequest};
pub use response::{decode_response, into_items};
