//! Keyboard bindings.
//!
//! Translates Zellij key presses into application events. The mapping depends
//! on the input mode and, for item actions, on the row under the cursor.
//!
//! | Key | Normal mode | Search mode |
//! |---|---|---|
//! | `j` / `Down`, `k` / `Up` | move cursor | `Down` / `Up` move, letters type |
//! | `h` / `Left`, `l` / `Right` | previous / next page | |
//! | `1`-`9` | jump to page | type |
//! | `/` | focus query | type |
//! | `Esc` | clear query | clear query, leave search |
//! | `f` / `F`, `t` / `T` | cycle source / topic | type |
//! | `u`, `m` | hide read, starred only | type |
//! | `r`, `s` | toggle read, star | type |
//! | `Enter` | open link | back to results |
//! | `R`, `d`, `q` | refresh, theme, close | type |
//!
//! `Ctrl+n` / `Ctrl+p` move the cursor in both modes.

use super::handler::{Event, FilterChange};
use super::modes::InputMode;
use super::state::AppState;
use zellij_tile::prelude::{BareKey, KeyModifier, KeyWithModifier};

/// Maps a key press to an event, or `None` when the key is unbound.
#[must_use]
pub fn map_key(state: &AppState, key: &KeyWithModifier) -> Option<Event> {
    if key.has_modifiers(&[KeyModifier::Ctrl]) {
        return match key.bare_key {
            BareKey::Char('n') => Some(Event::KeyDown),
            BareKey::Char('p') => Some(Event::KeyUp),
            _ => None,
        };
    }

    let bare_key = match key.bare_key {
        BareKey::Char(c) if key.key_modifiers.contains(&KeyModifier::Shift) => {
            BareKey::Char(c.to_ascii_uppercase())
        }
        other => other,
    };

    match state.input_mode {
        InputMode::Search => map_search_key(bare_key),
        InputMode::Normal => map_normal_key(state, bare_key),
    }
}

fn map_search_key(key: BareKey) -> Option<Event> {
    Some(match key {
        BareKey::Esc => Event::ClearQuery,
        BareKey::Enter => Event::FocusResults,
        BareKey::Backspace => Event::Backspace,
        BareKey::Down => Event::KeyDown,
        BareKey::Up => Event::KeyUp,
        BareKey::Char(c) => Event::Char(c),
        _ => return None,
    })
}

fn map_normal_key(state: &AppState, key: BareKey) -> Option<Event> {
    let criteria = state.view.criteria();

    Some(match key {
        BareKey::Down | BareKey::Char('j') => Event::KeyDown,
        BareKey::Up | BareKey::Char('k') => Event::KeyUp,
        BareKey::Left | BareKey::PageUp | BareKey::Char('h') => Event::PrevPage,
        BareKey::Right | BareKey::PageDown | BareKey::Char('l') => Event::NextPage,
        BareKey::Char(c @ '1'..='9') => Event::PageRequested(i64::from(c.to_digit(10)?)),
        BareKey::Char('/') => Event::FocusSearch,
        BareKey::Esc => Event::ClearQuery,
        BareKey::Char('f') => Event::CycleSource { forward: true },
        BareKey::Char('F') => Event::CycleSource { forward: false },
        BareKey::Char('t') => Event::CycleTopic { forward: true },
        BareKey::Char('T') => Event::CycleTopic { forward: false },
        BareKey::Char('u') => Event::FilterChanged(FilterChange::HideRead(!criteria.hide_read)),
        BareKey::Char('m') => Event::FilterChanged(FilterChange::StarOnly(!criteria.star_only)),
        BareKey::Char('r') => Event::ToggleRead(state.selected_item()?.id.clone()),
        BareKey::Char('s') => Event::ToggleStar(state.selected_item()?.id.clone()),
        BareKey::Enter => Event::OpenSelected,
        BareKey::Char('R') => Event::FetchRequested,
        BareKey::Char('d') => Event::ToggleTheme,
        BareKey::Char('q') => Event::CloseFocus,
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::FeedSettings;
    use crate::app::handle_event;
    use crate::domain::Item;
    use crate::storage::MemoryStorage;
    use pretty_assertions::assert_eq;

    fn state() -> AppState {
        AppState::with_storage(
            FeedSettings::default(),
            Box::new(MemoryStorage::default()),
            Box::new(MemoryStorage::default()),
        )
    }

    fn press(c: char) -> KeyWithModifier {
        KeyWithModifier::new(BareKey::Char(c))
    }

    #[test]
    fn letters_are_commands_in_normal_mode_and_text_in_search() {
        let mut state = state();
        assert_eq!(map_key(&state, &press('j')), Some(Event::KeyDown));
        assert_eq!(map_key(&state, &press('R')), Some(Event::FetchRequested));
        assert_eq!(map_key(&state, &press('3')), Some(Event::PageRequested(3)));

        state.input_mode = InputMode::Search;
        assert_eq!(map_key(&state, &press('j')), Some(Event::Char('j')));
        assert_eq!(map_key(&state, &KeyWithModifier::new(BareKey::Enter)), Some(Event::FocusResults));
        assert_eq!(map_key(&state, &KeyWithModifier::new(BareKey::Esc)), Some(Event::ClearQuery));
    }

    #[test]
    fn flag_keys_flip_current_criteria() {
        let mut state = state();
        assert_eq!(
            map_key(&state, &press('u')),
            Some(Event::FilterChanged(FilterChange::HideRead(true)))
        );

        handle_event(&mut state, &Event::FilterChanged(FilterChange::HideRead(true))).unwrap();
        assert_eq!(
            map_key(&state, &press('u')),
            Some(Event::FilterChanged(FilterChange::HideRead(false)))
        );
    }

    #[test]
    fn item_keys_need_a_selected_row() {
        let mut state = state();
        assert_eq!(map_key(&state, &press('r')), None);

        let items = vec![Item::new("a1", "t", "https://e.example/", "AP", vec![])];
        handle_event(&mut state, &Event::FetchResolved { items, fetched_at: chrono::Utc::now() }).unwrap();

        assert_eq!(map_key(&state, &press('r')), Some(Event::ToggleRead("a1".into())));
        assert_eq!(map_key(&state, &press('s')), Some(Event::ToggleStar("a1".into())));
    }

    #[test]
    fn ctrl_bindings_work_in_both_modes() {
        let mut state = state();
        let ctrl_n = KeyWithModifier::new(BareKey::Char('n')).with_ctrl_modifier();
        let ctrl_r = KeyWithModifier::new(BareKey::Char('r')).with_ctrl_modifier();

        assert_eq!(map_key(&state, &ctrl_n), Some(Event::KeyDown));
        assert_eq!(map_key(&state, &ctrl_r), None);
        state.input_mode = InputMode::Search;
        assert_eq!(map_key(&state, &ctrl_n), Some(Event::KeyDown));
    }
}
