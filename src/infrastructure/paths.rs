//! Storage locations inside the Zellij plugin sandbox.

use std::path::PathBuf;

/// Returns the device-local data directory for Newsdesk.
///
/// `/host` is the sandbox mount of the directory Zellij was started from,
/// usually the user's home, so this is normally
/// `~/.local/share/zellij/newsdesk` on the host. Annotation and theme slots
/// and the trace file all live here.
///
/// # Examples
///
/// ```
/// use newsdesk::infrastructure::data_dir;
///
/// assert_eq!(data_dir().to_str(), Some("/host/.local/share/zellij/newsdesk"));
/// ```
#[must_use]
pub fn data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("newsdesk")
}
