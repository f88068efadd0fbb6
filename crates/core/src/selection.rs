//! Content sampling for each game mode.
//!
//! Every mode shuffles its candidates without replacement and truncates:
//!
//! - Match: 3 systems, then every card of those systems (shuffled, no cap)
//! - Builder: positioned cards, first 8
//! - Quiz: questions, first 10

use arrayvec::ArrayVec;

use crate::catalog::Catalog;
use crate::rng::SimpleRng;
use crate::types::{
    BodySystem, Card, QuizQuestion, BUILDER_CARD_LIMIT, MATCH_SYSTEM_COUNT, QUIZ_QUESTION_LIMIT,
};

/// Systems and cards for one match round.
pub fn pick_match_content(catalog: &Catalog, rng: &mut SimpleRng) -> (Vec<BodySystem>, Vec<Card>) {
    let systems = rng.sample(catalog.systems(), MATCH_SYSTEM_COUNT);

    let mut cards: Vec<Card> = catalog
        .cards()
        .iter()
        .filter(|c| systems.iter().any(|s| s.id == c.system))
        .cloned()
        .collect();
    rng.shuffle(&mut cards);

    (systems, cards)
}

/// Positioned cards for one builder round.
pub fn pick_builder_cards(catalog: &Catalog, rng: &mut SimpleRng) -> ArrayVec<Card, BUILDER_CARD_LIMIT> {
    let mut cards: Vec<Card> = catalog.positioned_cards().cloned().collect();
    rng.shuffle(&mut cards);
    cards.into_iter().take(BUILDER_CARD_LIMIT).collect()
}

/// Questions for one quiz round, in play order.
pub fn pick_quiz_questions(catalog: &Catalog, rng: &mut SimpleRng) -> ArrayVec<QuizQuestion, QUIZ_QUESTION_LIMIT> {
    rng.sample(catalog.questions(), QUIZ_QUESTION_LIMIT)
        .into_iter()
        .collect()
}
