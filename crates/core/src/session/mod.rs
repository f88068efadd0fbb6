//! Per-mode round state.
//!
//! Exactly one [`Session`] is live at a time; the arcade drops it on
//! navigation or when another mode starts.

pub mod body_builder;
pub mod quiz;
pub mod system_match;

pub use body_builder::{BuilderResult, BuilderRound, Placement};
pub use quiz::{AnswerFeedback, QuizPhase, QuizResult, QuizRound, QuizStep};
pub use system_match::{MatchResult, MatchRound};

use crate::catalog::Catalog;
use crate::rng::SimpleRng;
use crate::types::GameMode;

#[derive(Debug, Clone)]
pub enum Session {
    Match(MatchRound),
    Builder(BuilderRound),
    Quiz(QuizRound),
}

impl Session {
    /// Deal a fresh round for `mode`.
    pub fn deal(mode: GameMode, catalog: &Catalog, rng: &mut SimpleRng) -> Self {
        match mode {
            GameMode::SystemMatch => Session::Match(MatchRound::deal(catalog, rng)),
            GameMode::BodyBuilder => Session::Builder(BuilderRound::deal(catalog, rng)),
            GameMode::Quiz => Session::Quiz(QuizRound::deal(catalog, rng)),
        }
    }

    pub fn mode(&self) -> GameMode {
        match self {
            Session::Match(_) => GameMode::SystemMatch,
            Session::Builder(_) => GameMode::BodyBuilder,
            Session::Quiz(_) => GameMode::Quiz,
        }
    }

    /// The round accepts no more input.
    pub fn is_over(&self) -> bool {
        match self {
            Session::Match(r) => r.is_checked(),
            Session::Builder(r) => r.is_over(),
            Session::Quiz(r) => r.phase() == QuizPhase::Finished,
        }
    }

    /// Seconds left on the running clock.
    pub fn time_left(&self) -> u32 {
        match self {
            Session::Match(r) => r.time_left(),
            Session::Builder(r) => r.time_left(),
            Session::Quiz(r) => r.time_left(),
        }
    }

    pub fn as_match(&self) -> Option<&MatchRound> {
        match self {
            Session::Match(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_builder(&self) -> Option<&BuilderRound> {
        match self {
            Session::Builder(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_quiz(&self) -> Option<&QuizRound> {
        match self {
            Session::Quiz(r) => Some(r),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deal_matches_mode() {
        let catalog = Catalog::builtin();
        let mut rng = SimpleRng::new(3);
        for mode in GameMode::ALL {
            let session = Session::deal(mode, &catalog, &mut rng);
            assert_eq!(session.mode(), mode);
            assert!(!session.is_over());
        }
    }

    #[test]
    fn clocks_start_full() {
        let catalog = Catalog::builtin();
        let mut rng = SimpleRng::new(3);
        assert_eq!(Session::deal(GameMode::SystemMatch, &catalog, &mut rng).time_left(), 60);
        assert_eq!(Session::deal(GameMode::BodyBuilder, &catalog, &mut rng).time_left(), 90);
        assert_eq!(Session::deal(GameMode::Quiz, &catalog, &mut rng).time_left(), 15);
    }
}
