//! Achievement predicates.
//!
//! Each function maps a round event to the achievements it satisfies. Granting
//! is idempotent (see [`crate::profile::ProfileStore::grant_achievement`]), so
//! the same predicate may fire on every qualifying event.

use arrayvec::ArrayVec;

use crate::types::Achievement;

const STREAK_5: u32 = 5;
const STREAK_10: u32 = 10;
const FAST_ANSWERS: u32 = 5;

/// A match round was checked.
pub fn for_match(correct: u32, total: u32) -> ArrayVec<Achievement, 2> {
    let mut out = ArrayVec::new();
    out.push(Achievement::FirstMatch);
    if total > 0 && correct == total {
        out.push(Achievement::PerfectMatch);
    }
    out
}

/// A builder round finished.
pub fn for_builder(correct: u32, total: u32) -> Option<Achievement> {
    (total > 0 && correct == total).then_some(Achievement::BodyMaster)
}

/// A quiz answer was recorded with the round's running counters.
pub fn for_quiz(streak: u32, fast_answers: u32) -> ArrayVec<Achievement, 3> {
    let mut out = ArrayVec::new();
    if streak >= STREAK_5 {
        out.push(Achievement::QuizStreak5);
    }
    if streak >= STREAK_10 {
        out.push(Achievement::QuizStreak10);
    }
    if fast_answers >= FAST_ANSWERS {
        out.push(Achievement::SpeedDemon);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn match_always_grants_first_match() {
        assert_eq!(for_match(0, 5).as_slice(), &[Achievement::FirstMatch]);
        assert_eq!(
            for_match(5, 5).as_slice(),
            &[Achievement::FirstMatch, Achievement::PerfectMatch]
        );
        // An empty round is not perfect.
        assert_eq!(for_match(0, 0).as_slice(), &[Achievement::FirstMatch]);
    }

    #[test]
    fn builder_needs_every_card() {
        assert_eq!(for_builder(8, 8), Some(Achievement::BodyMaster));
        assert_eq!(for_builder(7, 8), None);
        assert_eq!(for_builder(0, 0), None);
    }

    #[test]
    fn quiz_thresholds() {
        assert!(for_quiz(4, 4).is_empty());
        assert_eq!(for_quiz(5, 0).as_slice(), &[Achievement::QuizStreak5]);
        assert_eq!(
            for_quiz(10, 5).as_slice(),
            &[
                Achievement::QuizStreak5,
                Achievement::QuizStreak10,
                Achievement::SpeedDemon
            ]
        );
    }
}
