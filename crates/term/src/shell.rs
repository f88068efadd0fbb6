//! `TerminalShell`: the arcade's presentation callbacks for a terminal.
//!
//! The shell does no I/O itself. It records which screen to draw, keeps the
//! toast queue and the cursor state, and flags when a redraw is due. The main
//! loop turns that into a frame with [`crate::screens::draw`].

use std::collections::VecDeque;

use body_quest_core::{RoundReport, Shell, View};

use crate::types::{Screen, Severity};

/// How long a toast stays on screen.
pub const TOAST_MS: u32 = 2500;
const MAX_TOASTS: usize = 4;
/// Longest name the registration prompt accepts.
pub const NAME_LIMIT: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub text: String,
    pub severity: Severity,
    pub ttl_ms: u32,
}

/// Cursor and text-entry state owned by the front-end.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiState {
    /// Highlighted row: menu item, card, quiz option or collection entry.
    pub cursor: usize,
    /// Highlighted drop target: match system or builder zone.
    pub zone: usize,
    /// Registration prompt buffer.
    pub name: String,
}

impl UiState {
    pub fn reset_cursors(&mut self) {
        self.cursor = 0;
        self.zone = 0;
    }

    /// Move `cursor` by `delta` within `len` rows, wrapping.
    pub fn step_cursor(&mut self, delta: isize, len: usize) {
        self.cursor = step(self.cursor, delta, len);
    }

    pub fn step_zone(&mut self, delta: isize, len: usize) {
        self.zone = step(self.zone, delta, len);
    }

    pub fn push_char(&mut self, ch: char) -> bool {
        if self.name.chars().count() >= NAME_LIMIT {
            return false;
        }
        self.name.push(ch);
        true
    }
}

fn step(pos: usize, delta: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let len = len as isize;
    let pos = (pos as isize).min(len - 1);
    (pos + delta).rem_euclid(len) as usize
}

#[derive(Debug, Clone)]
pub struct TerminalShell {
    screen: Screen,
    dirty: bool,
    toasts: VecDeque<Toast>,
    pub ui: UiState,
}

impl Default for TerminalShell {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalShell {
    pub fn new() -> Self {
        Self {
            screen: Screen::Register,
            dirty: true,
            toasts: VecDeque::with_capacity(MAX_TOASTS),
            ui: UiState::default(),
        }
    }

    /// Screen last handed to [`Shell::render`].
    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn toasts(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter()
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Returns whether a redraw is due and clears the flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Age toasts by `elapsed_ms`, dropping expired ones.
    pub fn age(&mut self, elapsed_ms: u32) {
        let before = self.toasts.len();
        for toast in self.toasts.iter_mut() {
            toast.ttl_ms = toast.ttl_ms.saturating_sub(elapsed_ms);
        }
        self.toasts.retain(|t| t.ttl_ms > 0);
        if self.toasts.len() != before {
            self.dirty = true;
        }
    }
}

impl Shell for TerminalShell {
    fn render(&mut self, screen: Screen, _view: &View<'_>) {
        if screen != self.screen {
            self.ui.reset_cursors();
            self.screen = screen;
        }
        self.dirty = true;
    }

    fn notify(&mut self, message: &str, severity: Severity) {
        tracing::debug!(?severity, message, "toast");
        if self.toasts.len() == MAX_TOASTS {
            self.toasts.pop_front();
        }
        self.toasts.push_back(Toast {
            text: message.to_string(),
            severity,
            ttl_ms: TOAST_MS,
        });
        self.dirty = true;
    }

    fn results(&mut self, report: &RoundReport) {
        tracing::info!(
            mode = report.mode.as_str(),
            score = report.score,
            title = report.headline.title,
            "round results"
        );
        self.ui.reset_cursors();
        self.dirty = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toasts_expire_and_are_capped() {
        let mut shell = TerminalShell::new();
        for i in 0..6 {
            shell.notify(&format!("t{i}"), Severity::Info);
        }
        let texts: Vec<&str> = shell.toasts().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["t2", "t3", "t4", "t5"]);

        assert!(shell.take_dirty());
        assert!(!shell.take_dirty());
        shell.age(TOAST_MS - 1);
        assert!(!shell.take_dirty());
        shell.age(1);
        assert!(shell.take_dirty());
        assert_eq!(shell.toasts().count(), 0);
    }

    #[test]
    fn cursor_wraps() {
        let mut ui = UiState::default();
        ui.step_cursor(-1, 4);
        assert_eq!(ui.cursor, 3);
        ui.step_cursor(1, 4);
        assert_eq!(ui.cursor, 0);
        // Out-of-range cursors are clamped before stepping.
        ui.cursor = 10;
        ui.step_cursor(1, 3);
        assert_eq!(ui.cursor, 0);
        ui.step_cursor(1, 0);
        assert_eq!(ui.cursor, 0);
    }

    #[test]
    fn name_is_capped() {
        let mut ui = UiState::default();
        for _ in 0..NAME_LIMIT {
            assert!(ui.push_char('x'));
        }
        assert!(!ui.push_char('y'));
        assert_eq!(ui.name.len(), NAME_LIMIT);
    }
}
