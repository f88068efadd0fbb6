//! Settlement: turning a finished round into profile progress.

use crate::achievements;
use crate::profile::ProfileStore;
use crate::session::{BuilderResult, MatchResult, QuizResult};
use crate::storage::Storage;
use crate::types::{Achievement, CardId, GameMode};

/// What a finished round earned, before it is applied to a profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundOutcome {
    pub mode: GameMode,
    pub score: u32,
    /// May contain repeats; only unseen cards are unlocked.
    pub earned_cards: Vec<CardId>,
    pub achievements: Vec<Achievement>,
}

impl RoundOutcome {
    pub fn from_match(result: &MatchResult) -> Self {
        Self {
            mode: GameMode::SystemMatch,
            score: result.score.total,
            earned_cards: result.correct_cards.clone(),
            achievements: achievements::for_match(result.correct, result.total).to_vec(),
        }
    }

    pub fn from_builder(result: &BuilderResult) -> Self {
        Self {
            mode: GameMode::BodyBuilder,
            score: result.score.total,
            earned_cards: result.placed_cards.clone(),
            achievements: achievements::for_builder(result.correct, result.total)
                .into_iter()
                .collect(),
        }
    }

    /// Lists every quiz achievement the round reached, including ones the
    /// arcade already granted mid-round.
    pub fn from_quiz(result: &QuizResult) -> Self {
        Self {
            mode: GameMode::Quiz,
            score: result.score,
            earned_cards: result.awarded_cards.clone(),
            achievements: achievements::for_quiz(result.max_streak, result.fast_answers).to_vec(),
        }
    }
}

/// What settlement actually changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settlement {
    pub score_added: u32,
    pub total_score: u64,
    pub new_cards: Vec<CardId>,
    pub new_achievements: Vec<Achievement>,
}

/// Apply `outcome` to the current player and persist.
///
/// Without a current player nothing changes and an empty settlement is returned.
pub fn settle<S: Storage>(store: &mut ProfileStore<S>, outcome: &RoundOutcome) -> Settlement {
    let Some(total_score) = store.add_score(outcome.score) else {
        tracing::warn!(mode = outcome.mode.as_str(), "round settled without a player");
        return Settlement::default();
    };
    let new_cards = store.unlock(outcome.earned_cards.iter().cloned());
    let new_achievements: Vec<Achievement> = outcome
        .achievements
        .iter()
        .copied()
        .filter(|a| store.grant_achievement(*a))
        .collect();
    store.save();

    tracing::info!(
        mode = outcome.mode.as_str(),
        score = outcome.score,
        total_score,
        new_cards = new_cards.len(),
        new_achievements = new_achievements.len(),
        "round settled"
    );

    Settlement {
        score_added: outcome.score,
        total_score,
        new_cards,
        new_achievements,
    }
}
