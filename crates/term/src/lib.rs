//! Terminal front-end for the arcade.
//!
//! A small, game-oriented rendering layer: screens are drawn into a plain
//! framebuffer which is then diffed and flushed to the terminal with
//! `crossterm`. No widget toolkit is involved.
//!
//! - [`shell`]: the arcade's [`Shell`](body_quest_core::Shell) implementation
//! - [`screens`]: pure layout of every screen
//! - [`fb`] / [`renderer`]: framebuffer and terminal output

pub mod fb;
pub mod renderer;
pub mod screens;
pub mod shell;

pub use body_quest_core as core;
pub use body_quest_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
pub use screens::{draw, Viewport, HOME_MENU};
pub use shell::{TerminalShell, Toast, UiState};
