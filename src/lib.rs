//! Body Quest (workspace facade crate).
//!
//! Re-exports the member crates under short names and hosts the pieces the
//! binary needs on top of them: environment configuration and the mapping
//! from UI commands to arcade operations.

pub use body_quest_core as core;
pub use body_quest_input as input;
pub use body_quest_store as store;
pub use body_quest_term as term;
pub use body_quest_types as types;

pub mod config;
pub mod frontend;
