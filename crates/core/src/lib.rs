//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds every rule of Body Quest: content catalog, the three round
//! types, scoring, achievements, player profiles and the arcade context that
//! ties them together. It has no terminal or file-system dependencies; the
//! front-end reaches it through the [`arcade::Shell`] callbacks and the
//! [`storage::Storage`] trait.
//!
//! # Module Structure
//!
//! - [`catalog`]: body systems, organ cards and quiz questions, with validation
//! - [`selection`]: shuffled content draws for each round
//! - [`session`]: Match, Builder and Quiz round state machines
//! - [`scoring`]: score formulas and player levels
//! - [`achievements`]: which events unlock which achievement
//! - [`profile`]: named player profiles and their persistence
//! - [`rewards`]: settling a finished round into a profile
//! - [`report`]: results screen content
//! - [`leaderboard`] / [`collection`]: derived view models
//! - [`arcade`]: the context object front-ends drive
//!
//! # Game Rules
//!
//! - **System Match**: sort 3 systems' cards in 60s; `round(correct/total*300) + time*2`
//! - **Body Builder**: put up to 8 organs on the body in 90s; `correct*50 + time*2`
//! - **Body Quiz**: up to 10 questions, 15s each, 100 HP, 20 HP per miss;
//!   `30 + (15 - taken)*2 + streak*5` per right answer
//!
//! # Example
//!
//! ```
//! use body_quest_core::{Arcade, MemoryStorage, RoundReport, Shell, View, Catalog};
//! use body_quest_core::types::{GameMode, Screen, Severity};
//!
//! struct Quiet;
//! impl Shell for Quiet {
//!     fn render(&mut self, _: Screen, _: &View<'_>) {}
//!     fn notify(&mut self, _: &str, _: Severity) {}
//!     fn results(&mut self, _: &RoundReport) {}
//! }
//!
//! let mut arcade = Arcade::new(Catalog::builtin(), MemoryStorage::new(), Quiet, 7);
//! arcade.boot();
//! arcade.register("Ana").unwrap();
//! let timer = arcade.start(GameMode::SystemMatch);
//! assert!(timer.is_some());
//! assert_eq!(arcade.screen(), Screen::SystemMatch);
//! ```
//!
//! # Timing
//!
//! Rounds count whole seconds. The front-end calls
//! [`Arcade::advance`](arcade::Arcade::advance) from its frame loop with the
//! elapsed milliseconds; the arcade's metronome turns that into one-second
//! pulses.

pub mod achievements;
pub mod arcade;
pub mod catalog;
pub mod collection;
pub mod leaderboard;
pub mod profile;
pub mod report;
pub mod rewards;
pub mod rng;
pub mod scoring;
pub mod selection;
pub mod session;
pub mod storage;
pub mod timer;

pub use body_quest_types as types;

// Re-export commonly used types for convenience
pub use arcade::{Arcade, Shell, View};
pub use catalog::{Catalog, CatalogError};
pub use collection::{CollectionEntry, CollectionFilter, CollectionProgress};
pub use leaderboard::LeaderboardEntry;
pub use profile::{PlayerProfile, ProfileError, ProfileStore, Roster};
pub use report::{Headline, RoundReport, RoundSummary, Stat};
pub use rewards::{settle, RoundOutcome, Settlement};
pub use rng::SimpleRng;
pub use session::Session;
pub use storage::{MemoryStorage, Storage, StorageError};
pub use timer::{Metronome, TimerId};
