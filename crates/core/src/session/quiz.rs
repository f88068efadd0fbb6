//! Body Quiz: timed multiple choice with hit points and streaks.
//!
//! Each question is answered once (a timeout counts as a wrong answer with no
//! option chosen). After the answer the round shows feedback until
//! [`QuizRound::next`] moves on. The round ends when the questions run out or
//! hit points reach zero, whichever comes first.

use arrayvec::ArrayVec;

use crate::catalog::Catalog;
use crate::rng::SimpleRng;
use crate::scoring::{is_fast_answer, quiz_answer_points, AnswerPoints};
use crate::selection::pick_quiz_questions;
use crate::timer::Countdown;
use crate::types::{
    CardId, QuizQuestion, QUIZ_MISS_DAMAGE, QUIZ_QUESTION_LIMIT, QUIZ_QUESTION_SECS, QUIZ_START_HP,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizPhase {
    /// Waiting for an answer to the current question.
    Asking,
    /// Answer recorded, feedback on screen.
    Feedback,
    Finished,
}

/// What happened to the answer just given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerFeedback {
    pub correct: bool,
    /// `None` when the clock ran out.
    pub chosen: Option<u8>,
    pub correct_option: u8,
    pub time_taken: u32,
    /// Zero for a wrong answer.
    pub points: AnswerPoints,
    pub hp_lost: u32,
    pub streak: u32,
    pub awarded_card: Option<CardId>,
    pub explanation: String,
}

/// Where [`QuizRound::next`] landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizStep {
    /// Now asking the question at this index.
    Question(usize),
    Finished,
}

/// Result of a finished quiz.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizResult {
    pub correct: u32,
    pub total: u32,
    pub answered: u32,
    pub score: u32,
    pub hp: u32,
    pub max_streak: u32,
    pub fast_answers: u32,
    /// Reward cards in the order they were earned (may repeat).
    pub awarded_cards: Vec<CardId>,
}

impl QuizResult {
    pub fn survived(&self) -> bool {
        self.hp > 0
    }
}

#[derive(Debug, Clone)]
pub struct QuizRound {
    questions: ArrayVec<QuizQuestion, QUIZ_QUESTION_LIMIT>,
    index: usize,
    answered: u32,
    score: u32,
    hp: u32,
    streak: u32,
    max_streak: u32,
    correct_count: u32,
    fast_answers: u32,
    clock: Countdown,
    awarded_cards: Vec<CardId>,
    phase: QuizPhase,
    last_feedback: Option<AnswerFeedback>,
}

impl QuizRound {
    pub fn new(questions: ArrayVec<QuizQuestion, QUIZ_QUESTION_LIMIT>) -> Self {
        let phase = if questions.is_empty() {
            QuizPhase::Finished
        } else {
            QuizPhase::Asking
        };
        Self {
            questions,
            index: 0,
            answered: 0,
            score: 0,
            hp: QUIZ_START_HP,
            streak: 0,
            max_streak: 0,
            correct_count: 0,
            fast_answers: 0,
            clock: Countdown::new(QUIZ_QUESTION_SECS),
            awarded_cards: Vec::new(),
            phase,
            last_feedback: None,
        }
    }

    pub fn deal(catalog: &Catalog, rng: &mut SimpleRng) -> Self {
        Self::new(pick_quiz_questions(catalog, rng))
    }

    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }

    /// Question being asked (or whose feedback is showing).
    pub fn current(&self) -> Option<&QuizQuestion> {
        match self.phase {
            QuizPhase::Finished => None,
            _ => self.questions.get(self.index),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn hp(&self) -> u32 {
        self.hp
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn max_streak(&self) -> u32 {
        self.max_streak
    }

    pub fn correct_count(&self) -> u32 {
        self.correct_count
    }

    pub fn fast_answers(&self) -> u32 {
        self.fast_answers
    }

    pub fn time_left(&self) -> u32 {
        self.clock.remaining()
    }

    pub fn awarded_cards(&self) -> &[CardId] {
        &self.awarded_cards
    }

    pub fn last_feedback(&self) -> Option<&AnswerFeedback> {
        self.last_feedback.as_ref()
    }

    /// The round has nothing left to ask.
    pub fn is_over(&self) -> bool {
        self.index >= self.questions.len() || self.hp == 0
    }

    /// Record an answer to the current question. `None` means no answer (timeout).
    ///
    /// Ignored (returns `None`) unless a question is being asked.
    pub fn answer(&mut self, choice: Option<u8>, catalog: &Catalog, rng: &mut SimpleRng) -> Option<&AnswerFeedback> {
        if self.phase != QuizPhase::Asking {
            return None;
        }
        let question = self.questions.get(self.index)?;
        let time_taken = QUIZ_QUESTION_SECS.saturating_sub(self.clock.remaining());
        let correct = choice == Some(question.correct);

        let mut points = AnswerPoints::default();
        let mut hp_lost = 0;
        let mut awarded_card = None;

        if correct {
            points = quiz_answer_points(time_taken, self.streak);
            self.score += points.total;
            self.streak += 1;
            self.max_streak = self.max_streak.max(self.streak);
            self.correct_count += 1;
            if is_fast_answer(time_taken) {
                self.fast_answers += 1;
            }

            let pool: Vec<&crate::types::Card> = catalog.cards_of(&question.system).collect();
            if let Some(card) = rng.pick(&pool) {
                self.awarded_cards.push(card.id.clone());
                awarded_card = Some(card.id.clone());
            }
        } else {
            hp_lost = self.hp.min(QUIZ_MISS_DAMAGE);
            self.hp -= hp_lost;
            self.streak = 0;
        }

        self.answered += 1;
        self.phase = QuizPhase::Feedback;

        tracing::debug!(
            index = self.index,
            correct,
            time_taken,
            score = self.score,
            hp = self.hp,
            "quiz answer"
        );

        self.last_feedback = Some(AnswerFeedback {
            correct,
            chosen: choice,
            correct_option: question.correct,
            time_taken,
            points,
            hp_lost,
            streak: self.streak,
            awarded_card,
            explanation: question.explanation.clone(),
        });
        self.last_feedback.as_ref()
    }

    /// One second passes. Running out of time answers with no choice.
    pub fn tick(&mut self, catalog: &Catalog, rng: &mut SimpleRng) -> Option<&AnswerFeedback> {
        if self.phase != QuizPhase::Asking {
            return None;
        }
        if self.clock.tick() {
            return self.answer(None, catalog, rng);
        }
        None
    }

    /// Leave the feedback for the next question, or finish.
    ///
    /// Returns `None` when there is no feedback to leave.
    pub fn next(&mut self) -> Option<QuizStep> {
        if self.phase != QuizPhase::Feedback {
            return None;
        }
        self.index += 1;
        if self.is_over() {
            self.phase = QuizPhase::Finished;
            return Some(QuizStep::Finished);
        }
        self.phase = QuizPhase::Asking;
        self.clock.reset(QUIZ_QUESTION_SECS);
        Some(QuizStep::Question(self.index))
    }

    /// Summary of the round so far.
    pub fn result(&self) -> QuizResult {
        QuizResult {
            correct: self.correct_count,
            total: self.questions.len() as u32,
            answered: self.answered,
            score: self.score,
            hp: self.hp,
            max_streak: self.max_streak,
            fast_answers: self.fast_answers,
            awarded_cards: self.awarded_cards.clone(),
        }
    }
}
