//! Results screen content for a finished round.

use crate::catalog::Catalog;
use crate::rewards::{RoundOutcome, Settlement};
use crate::rng::SimpleRng;
use crate::scoring::quiz_accuracy_percent;
use crate::session::{BuilderResult, MatchResult, QuizResult};
use crate::types::{Achievement, Card, CardId, GameMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Headline {
    pub title: &'static str,
    pub icon: &'static str,
}

impl Headline {
    const fn new(title: &'static str, icon: &'static str) -> Self {
        Self { title, icon }
    }
}

pub fn match_headline(correct: u32, total: u32) -> Headline {
    if total > 0 && correct == total {
        Headline::new("Perfect!", "🏆")
    } else if correct * 2 > total {
        Headline::new("Well done!", "👏")
    } else {
        Headline::new("Try again!", "💪")
    }
}

pub fn builder_headline(correct: u32, total: u32) -> Headline {
    if total > 0 && correct == total {
        Headline::new("Every organ in place!", "🧍")
    } else {
        Headline::new("Good effort!", "💪")
    }
}

/// A knocked-out player keeps the accuracy title but gets the defeat icon.
pub fn quiz_headline(accuracy: u32, survived: bool) -> Headline {
    let title = if accuracy >= 80 {
        "Excellent!"
    } else if accuracy >= 50 {
        "Well done!"
    } else {
        "Try again!"
    };
    let icon = if !survived {
        "💀"
    } else if accuracy >= 80 {
        "🎉"
    } else {
        "📚"
    };
    Headline::new(title, icon)
}

/// Per-mode numbers behind the headline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundSummary {
    Match(MatchResult),
    Builder(BuilderResult),
    Quiz { result: QuizResult, accuracy: u32 },
}

/// One labelled line on the results screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stat {
    pub label: &'static str,
    pub value: String,
}

fn stat(label: &'static str, value: impl ToString) -> Stat {
    Stat {
        label,
        value: value.to_string(),
    }
}

impl RoundSummary {
    pub fn stats(&self) -> Vec<Stat> {
        match self {
            RoundSummary::Match(r) => vec![
                stat("Correct", format!("{}/{}", r.correct, r.total)),
                stat("Accuracy score", r.score.accuracy),
                stat("Time bonus", format!("+{}", r.score.time_bonus)),
                stat("Total", r.score.total),
            ],
            RoundSummary::Builder(r) => vec![
                stat("Placed", format!("{}/{}", r.correct, r.total)),
                stat("Placement score", r.score.placement),
                stat("Time bonus", format!("+{}", r.score.time_bonus)),
                stat("Total", r.score.total),
            ],
            RoundSummary::Quiz { result, accuracy } => vec![
                stat("Correct", format!("{}/{}", result.correct, result.total)),
                stat("Accuracy", format!("{accuracy}%")),
                stat("Best streak", format!("🔥 {}", result.max_streak)),
                stat("Total", result.score),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundReport {
    pub mode: GameMode,
    pub headline: Headline,
    pub summary: RoundSummary,
    pub score: u32,
    pub settlement: Settlement,
    /// Every achievement the round reached, new or not.
    pub achievements: Vec<Achievement>,
    /// Cards earned this round, first occurrence order.
    pub cards: Vec<CardId>,
    pub fun_fact: Option<String>,
}

impl RoundReport {
    fn assemble(
        headline: Headline,
        summary: RoundSummary,
        outcome: &RoundOutcome,
        settlement: Settlement,
        fun_fact: Option<String>,
    ) -> Self {
        let mut cards: Vec<CardId> = Vec::with_capacity(outcome.earned_cards.len());
        for card in &outcome.earned_cards {
            if !cards.contains(card) {
                cards.push(card.clone());
            }
        }
        Self {
            mode: outcome.mode,
            headline,
            summary,
            score: outcome.score,
            settlement,
            achievements: outcome.achievements.clone(),
            cards,
            fun_fact,
        }
    }

    /// `round_cards` are the cards dealt for the round; the fun fact comes from one of them.
    pub fn for_match(
        result: MatchResult,
        outcome: &RoundOutcome,
        settlement: Settlement,
        round_cards: &[Card],
        rng: &mut SimpleRng,
    ) -> Self {
        let headline = match_headline(result.correct, result.total);
        let fun_fact = pick_fun_fact(round_cards, rng);
        Self::assemble(headline, RoundSummary::Match(result), outcome, settlement, fun_fact)
    }

    pub fn for_builder(
        result: BuilderResult,
        outcome: &RoundOutcome,
        settlement: Settlement,
        round_cards: &[Card],
        rng: &mut SimpleRng,
    ) -> Self {
        let headline = builder_headline(result.correct, result.total);
        let fun_fact = pick_fun_fact(round_cards, rng);
        Self::assemble(headline, RoundSummary::Builder(result), outcome, settlement, fun_fact)
    }

    /// The quiz fun fact is drawn from the whole catalog.
    pub fn for_quiz(
        result: QuizResult,
        outcome: &RoundOutcome,
        settlement: Settlement,
        catalog: &Catalog,
        rng: &mut SimpleRng,
    ) -> Self {
        let accuracy = quiz_accuracy_percent(result.correct, result.total);
        let headline = quiz_headline(accuracy, result.survived());
        let fun_fact = pick_fun_fact(catalog.cards(), rng);
        Self::assemble(
            headline,
            RoundSummary::Quiz { result, accuracy },
            outcome,
            settlement,
            fun_fact,
        )
    }

    pub fn stats(&self) -> Vec<Stat> {
        self.summary.stats()
    }
}

fn pick_fun_fact(cards: &[Card], rng: &mut SimpleRng) -> Option<String> {
    rng.pick(cards).map(|c| c.fun_fact.clone())
}
