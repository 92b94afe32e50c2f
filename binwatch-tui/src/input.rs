use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, Screen};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Action {
    None,
    Quit,
    /// Start a refresh cycle; never emitted while one is in flight
    Refresh,
}

pub(crate) fn handle_key_event(key: KeyEvent, app: &mut App) -> Action {
    use KeyCode::{BackTab, Char, Down, Left, Right, Tab, Up};

    // Global quit shortcuts
    if key.code == Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Action::Quit;
    }
    if key.code == Char('q') && key.modifiers.is_empty() {
        return Action::Quit;
    }

    match key.code {
        Char('r' | 'R') => {
            // The trigger is disabled while refreshing
            if app.dashboard.is_refreshing() {
                return Action::None;
            }
            return Action::Refresh;
        }
        Char('1') => app.screen = Screen::Dashboard,
        Char('2') => app.screen = Screen::BinMap,
        Char('3') => app.screen = Screen::Reports,
        Tab | Right => app.screen = app.screen.next(),
        BackTab | Left => app.screen = app.screen.previous(),
        _ => {}
    }

    match app.screen {
        Screen::Dashboard | Screen::BinMap => match key.code {
            Up | Char('k') => app.select_previous_bin(),
            Down | Char('j') => app.select_next_bin(),
            _ => {}
        },
        Screen::Reports => {}
    }

    Action::None
}
