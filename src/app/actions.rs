//! Side effects requested by the event handler.
//!
//! The handler never talks to the host directly. It returns a `Vec<Action>`
//! and the plugin shim executes them in order after each event.
//!
//! # Example
//!
//! ```
//! use newsdesk::app::Action;
//! use newsdesk::fetch::FetchRequest;
//!
//! let request = FetchRequest::new("http://127.0.0.1:8080/api/top", 200, 1)?;
//! let actions = vec![Action::Fetch(request)];
//! assert_eq!(actions.len(), 1);
//! # Ok::<(), newsdesk::NewsdeskError>(())
//! ```

use crate::fetch::FetchRequest;

/// Commands executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Closes the focused floating pane, hiding the plugin UI.
    CloseFocus,

    /// Issues a GET of the feed through the host's web request API.
    ///
    /// The result arrives later as a separate event.
    Fetch(FetchRequest),

    /// Opens an article link with the system URL handler.
    OpenUrl {
        /// Absolute link of the selected item.
        url: String,
    },
}
