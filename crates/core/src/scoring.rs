//! Scoring module - round score formulas and player levels
//!
//! All functions here are pure:
//! - Match: `round(correct / total * 300) + time_left * 2`
//! - Builder: `correct * 50 + time_left * 2`
//! - Quiz answer: `30 + max(0, (15 - time_taken) * 2) + streak * 5`
//! - Level: `min(total_score / 500 + 1, 5)`

use crate::types::{
    BUILDER_POINTS_PER_CARD, MATCH_ACCURACY_POINTS, MAX_LEVEL, POINTS_PER_LEVEL, QUIZ_BASE_POINTS,
    QUIZ_FAST_ANSWER_SECS, QUIZ_QUESTION_SECS, QUIZ_STREAK_BONUS, QUIZ_TIME_BONUS_PER_SEC,
    TIME_BONUS_PER_SEC,
};

/// Score breakdown for a checked match round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MatchScore {
    pub accuracy: u32,
    pub time_bonus: u32,
    pub total: u32,
}

/// Score breakdown for a finished builder round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BuilderScore {
    pub placement: u32,
    pub time_bonus: u32,
    pub total: u32,
}

/// Points for one correct quiz answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AnswerPoints {
    pub base: u32,
    pub time_bonus: u32,
    pub streak_bonus: u32,
    pub total: u32,
}

/// Bonus for seconds left on the clock.
pub fn time_bonus(time_left: u32) -> u32 {
    time_left.saturating_mul(TIME_BONUS_PER_SEC)
}

/// `round(correct / total * 300)`, rounding halves up; 0 for an empty round.
pub fn match_accuracy(correct: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    let correct = correct.min(total) as u64;
    let total = total as u64;
    ((2 * correct * MATCH_ACCURACY_POINTS as u64 + total) / (2 * total)) as u32
}

pub fn match_score(correct: u32, total: u32, time_left: u32) -> MatchScore {
    let accuracy = match_accuracy(correct, total);
    let time_bonus = time_bonus(time_left);
    MatchScore {
        accuracy,
        time_bonus,
        total: accuracy + time_bonus,
    }
}

pub fn builder_score(correct: u32, time_left: u32) -> BuilderScore {
    let placement = correct.saturating_mul(BUILDER_POINTS_PER_CARD);
    let time_bonus = time_bonus(time_left);
    BuilderScore {
        placement,
        time_bonus,
        total: placement.saturating_add(time_bonus),
    }
}

/// Points for a correct answer given seconds taken and the streak held before it.
pub fn quiz_answer_points(time_taken: u32, streak_before: u32) -> AnswerPoints {
    let base = QUIZ_BASE_POINTS;
    let time_bonus = QUIZ_QUESTION_SECS.saturating_sub(time_taken) * QUIZ_TIME_BONUS_PER_SEC;
    let streak_bonus = streak_before.saturating_mul(QUIZ_STREAK_BONUS);
    AnswerPoints {
        base,
        time_bonus,
        streak_bonus,
        total: base + time_bonus + streak_bonus,
    }
}

pub fn is_fast_answer(time_taken: u32) -> bool {
    time_taken <= QUIZ_FAST_ANSWER_SECS
}

/// Percentage of correct answers, rounded; 0 for an empty quiz.
pub fn quiz_accuracy_percent(correct: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    let correct = correct.min(total);
    (200 * correct + total) / (2 * total)
}

/// Player level for a lifetime score.
pub fn level_for_score(total_score: u64) -> u32 {
    let level = total_score / POINTS_PER_LEVEL + 1;
    level.min(MAX_LEVEL as u64) as u32
}

pub fn level_title(level: u32) -> &'static str {
    match level {
        0 | 1 => "New Student",
        2 => "Body Explorer",
        3 => "Cell Specialist",
        4 => "Trainee Nurse",
        _ => "Professional Nurse",
    }
}
