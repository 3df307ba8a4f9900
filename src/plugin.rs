//! Zellij plugin wrapper.
//!
//! Thin integration layer between the Newsdesk library and the Zellij plugin
//! system: it translates Zellij events into library events, hands them to
//! `handle_event`, and carries out the returned actions with host calls.
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, open the storage slots
//! 2. **Permissions**: Request `WebAccess` and `RunCommands`
//! 3. **Initial fetch**: Issued once permissions are granted
//! 4. **Update**: Map keys and web results to events, execute actions
//! 5. **Render**: Call the library render function
//!
//! # Event Mapping
//!
//! - `Key(..)` → [`newsdesk::app::map_key`]
//! - `WebRequestResult(status, _, body, context)` → `FetchResolved` / `FetchFailed`
//! - `PermissionRequestResult(Granted)` → `FetchRequested`
//! - `PermissionRequestResult(Denied)` → `FetchFailed` (transport error)
//!
//! Keybindings are documented on [`newsdesk::app::keys`].

use std::collections::BTreeMap;

use chrono::Utc;
use newsdesk::app::map_key;
use newsdesk::fetch::request_id_from_context;
use newsdesk::{handle_event, Action, Config, Event, FetchError};
use zellij_tile::prelude::*;

/// Plugin state wrapper.
///
/// Wraps the library's `AppState` with the Zellij-specific permission flag.
pub struct State {
    /// Core application state from the library layer.
    app: newsdesk::AppState,

    /// Whether the host granted the requested permissions.
    permitted: bool,
}

impl Default for State {
    fn default() -> Self {
        Self {
            app: newsdesk::initialize(&Config::default()),
            permitted: false,
        }
    }
}

impl ZellijPlugin for State {
    /// Initializes the plugin on load.
    ///
    /// # Permissions
    ///
    /// - `WebAccess`: Fetch the feed
    /// - `RunCommands`: Open links with `xdg-open`
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        newsdesk::observability::init_tracing(&config);

        let _guard = tracing::debug_span!("plugin_load").entered();
        tracing::debug!(feed_url = %config.feed_url, top_n = config.top_n, "parsed configuration");

        self.app = newsdesk::initialize(&config);

        request_permission(&[PermissionType::WebAccess, PermissionType::RunCommands]);
        subscribe(&[
            EventType::Key,
            EventType::WebRequestResult,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    /// Handles incoming Zellij events. Returns `true` if the UI should re-render.
    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::event_name(&event);
        let _guard = tracing::debug_span!("plugin_update_event", event_type = %event_name).entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match map_key(&self.app, key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                tracing::debug!(
                    status,
                    body_len = body.len(),
                    request_id = ?request_id_from_context(&context),
                    "web request result"
                );
                Event::from_fetch_result(status, &body, Utc::now())
            }
            zellij_tile::prelude::Event::PermissionRequestResult(status) => self.permission_event(status),
            _ => return false,
        };

        if matches!(our_event, Event::FetchRequested) && !self.permitted {
            tracing::debug!("fetch requested before permissions were granted");
            return false;
        }

        match handle_event(&mut self.app, &our_event) {
            Ok((should_render, actions)) => {
                tracing::debug!(action_count = actions.len(), should_render, "event handled");
                for action in &actions {
                    Self::execute_action(action);
                }
                should_render
            }
            Err(e) => {
                // The in-memory change stands; only persisting failed.
                tracing::error!(error = %e, "error handling event");
                true
            }
        }
    }

    fn render(&mut self, rows: usize, cols: usize) {
        newsdesk::ui::render(&self.app, rows, cols);
    }
}

impl State {
    fn event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => format!("WebRequestResult({status})"),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => "PermissionRequestResult".to_string(),
            _ => "Other".to_string(),
        }
    }

    fn permission_event(&mut self, status: PermissionStatus) -> Event {
        match status {
            PermissionStatus::Granted => {
                tracing::debug!("permissions granted - fetching feed");
                self.permitted = true;
                Event::FetchRequested
            }
            PermissionStatus::Denied => {
                tracing::warn!("permissions denied - feed cannot be fetched");
                let error = FetchError::Transport("web access permission denied".to_string());
                Event::FetchFailed {
                    message: error.to_string(),
                }
            }
        }
    }

    /// Translates library actions to Zellij API calls.
    #[tracing::instrument(level = "debug")]
    fn execute_action(action: &Action) {
        match action {
            Action::CloseFocus => {
                tracing::debug!("closing plugin focus");
                hide_self();
            }
            Action::Fetch(request) => {
                tracing::debug!(url = %request.url, request_id = request.request_id, "issuing web request");
                web_request(
                    &request.url,
                    HttpVerb::Get,
                    BTreeMap::new(),
                    vec![],
                    request.context(),
                );
            }
            Action::OpenUrl { url } => {
                tracing::debug!(url = %url, "opening link");
                run_command(&["xdg-open", url.as_str()], BTreeMap::new());
            }
        }
    }
}
