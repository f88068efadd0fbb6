//! Key mapping from terminal events to UI commands.

use crate::types::Screen;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What the player asked for, independent of the key that did it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiCommand {
    Up,
    Down,
    Left,
    Right,
    /// Enter / space: pick, drop, submit or continue.
    Confirm,
    Back,
    /// Number keys 1-9 (0-based here).
    Pick(u8),
    /// Check a fully placed match round.
    Check,
    /// Take the highlighted match card back out of its zone.
    Unplace,
    Replay,
    NextFilter,
    PrevFilter,
    OpenCollection,
    OpenLeaderboard,
    SwitchPlayer,
    /// Text entry on the registration screen.
    Type(char),
    Erase,
}

/// Map keyboard input to a command for `screen`.
pub fn map_key(screen: Screen, key: KeyEvent) -> Option<UiCommand> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }
    if screen == Screen::Register {
        return match key.code {
            KeyCode::Enter => Some(UiCommand::Confirm),
            KeyCode::Backspace => Some(UiCommand::Erase),
            KeyCode::Esc => Some(UiCommand::Back),
            KeyCode::Up => Some(UiCommand::Up),
            KeyCode::Down => Some(UiCommand::Down),
            KeyCode::Char(c) if !c.is_control() => Some(UiCommand::Type(c)),
            _ => None,
        };
    }

    match key.code {
        // Movement
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('w') => Some(UiCommand::Up),
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('s') => Some(UiCommand::Down),
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('a') => Some(UiCommand::Left),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('d') => Some(UiCommand::Right),

        KeyCode::Enter | KeyCode::Char(' ') => Some(UiCommand::Confirm),
        KeyCode::Esc => Some(UiCommand::Back),
        KeyCode::Backspace | KeyCode::Char('u') => Some(UiCommand::Unplace),
        KeyCode::Tab => Some(UiCommand::NextFilter),
        KeyCode::BackTab => Some(UiCommand::PrevFilter),

        KeyCode::Char(c @ '1'..='9') => Some(UiCommand::Pick(c as u8 - b'1')),

        KeyCode::Char('c') | KeyCode::Char('C') => Some(match screen {
            Screen::SystemMatch => UiCommand::Check,
            _ => UiCommand::OpenCollection,
        }),
        KeyCode::Char('b') | KeyCode::Char('B') => Some(UiCommand::OpenLeaderboard),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(UiCommand::SwitchPlayer),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(UiCommand::Replay),

        _ => None,
    }
}

/// Check if key should quit the game.
///
/// `q` types a letter on the registration screen, so only Ctrl-C quits there.
pub fn should_quit(screen: Screen, key: KeyEvent) -> bool {
    let ctrl_c = key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL);
    let q = matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'));
    ctrl_c || (q && screen != Screen::Register)
}
