//! Terminal runner (default binary).
//!
//! Reads configuration from the environment, opens the profile store and
//! drives the arcade from crossterm events on a fixed frame step.

use std::fs::OpenOptions;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use tracing_subscriber::EnvFilter;

use body_quest::config::Config;
use body_quest::core::Arcade;
use body_quest::frontend;
use body_quest::input::{map_key, should_quit};
use body_quest::store::FileStorage;
use body_quest::term::{screens, FrameBuffer, TerminalRenderer, TerminalShell, Viewport};

type TermArcade = Arcade<FileStorage, TerminalShell>;

fn main() -> Result<()> {
    let cfg = Config::from_env();
    let storage = FileStorage::open(&cfg.data_dir)?;
    init_logging(&cfg)?;

    let catalog = cfg.load_catalog()?;
    let mut arcade = Arcade::new(catalog, storage, TerminalShell::new(), cfg.resolve_seed());
    let screen = arcade.boot();
    tracing::info!(?screen, data_dir = %cfg.data_dir.display(), "body quest started");

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut arcade, &cfg);

    // Always try to restore terminal state.
    let _ = term.exit();
    tracing::info!("body quest stopped");
    result
}

/// Log to a file; the terminal belongs to the game.
fn init_logging(cfg: &Config) -> Result<()> {
    let path = cfg.log_path();
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    let filter = EnvFilter::try_new(&cfg.log_filter).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn run(term: &mut TerminalRenderer, arcade: &mut TermArcade, cfg: &Config) -> Result<()> {
    let tick = Duration::from_millis(u64::from(cfg.tick_ms));
    let mut fb = FrameBuffer::new(0, 0);
    let mut last_tick = Instant::now();

    loop {
        if arcade.shell_mut().take_dirty() {
            let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
            screens::draw(
                &mut fb,
                Viewport::new(w, h),
                arcade.screen(),
                &arcade.view(),
                arcade.shell(),
            );
            term.draw_swap(&mut fb)?;
        }

        // Input with timeout until next frame step.
        let timeout = tick.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(arcade.screen(), key) {
                        return Ok(());
                    }
                    if let Some(cmd) = map_key(arcade.screen(), key) {
                        frontend::handle(arcade, cmd);
                    }
                }
                Event::Resize(..) => {
                    term.invalidate();
                    arcade.shell_mut().mark_dirty();
                }
                _ => {}
            }
        }

        let elapsed = last_tick.elapsed();
        if elapsed >= tick {
            let ms = u32::try_from(elapsed.as_millis()).unwrap_or(u32::MAX);
            last_tick = Instant::now();
            arcade.advance(ms);
            arcade.shell_mut().age(ms);
        }
    }
}
