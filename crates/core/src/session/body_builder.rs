//! Body Builder: drop each organ onto its own spot on the body outline.
//!
//! Every zone belongs to exactly one card. A wrong drop is rejected with no
//! state change; a right drop is permanent.

use std::collections::BTreeSet;

use arrayvec::ArrayVec;

use crate::catalog::Catalog;
use crate::rng::SimpleRng;
use crate::scoring::{builder_score, BuilderScore};
use crate::selection::pick_builder_cards;
use crate::timer::Countdown;
use crate::types::{Card, CardId, BUILDER_CARD_LIMIT, BUILDER_ROUND_SECS};

/// Outcome of a single drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Right zone; the card is now fixed in place.
    Accepted,
    /// Wrong zone; nothing changed.
    Rejected,
    /// Round over, unknown id, or card already placed.
    Ignored,
}

/// Result of a finished builder round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuilderResult {
    pub correct: u32,
    pub total: u32,
    pub time_left: u32,
    pub score: BuilderScore,
    pub placed_cards: Vec<CardId>,
}

#[derive(Debug, Clone)]
pub struct BuilderRound {
    cards: ArrayVec<Card, BUILDER_CARD_LIMIT>,
    placed: BTreeSet<CardId>,
    selected: Option<CardId>,
    clock: Countdown,
    finished: bool,
}

impl BuilderRound {
    pub fn new(cards: ArrayVec<Card, BUILDER_CARD_LIMIT>) -> Self {
        Self {
            cards,
            placed: BTreeSet::new(),
            selected: None,
            clock: Countdown::new(BUILDER_ROUND_SECS),
            finished: false,
        }
    }

    pub fn deal(catalog: &Catalog, rng: &mut SimpleRng) -> Self {
        Self::new(pick_builder_cards(catalog, rng))
    }

    /// Round cards; each one is also a drop zone.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn is_placed(&self, card: &CardId) -> bool {
        self.placed.contains(card)
    }

    pub fn selected(&self) -> Option<&CardId> {
        self.selected.as_ref()
    }

    pub fn correct_count(&self) -> u32 {
        self.placed.len() as u32
    }

    pub fn time_left(&self) -> u32 {
        self.clock.remaining()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Every card sits on its zone.
    pub fn is_complete(&self) -> bool {
        self.placed.len() == self.cards.len()
    }

    /// No more drops are accepted: finished, complete, or out of time.
    pub fn is_over(&self) -> bool {
        self.finished || self.is_complete() || self.clock.is_expired()
    }

    fn has_card(&self, card: &CardId) -> bool {
        self.cards.iter().any(|c| &c.id == card)
    }

    pub fn select(&mut self, card: &CardId) -> bool {
        if self.is_over() || !self.has_card(card) || self.placed.contains(card) {
            return false;
        }
        self.selected = Some(card.clone());
        true
    }

    /// Drop `card` onto the zone that belongs to `zone`.
    pub fn place(&mut self, card: &CardId, zone: &CardId) -> Placement {
        if self.is_over()
            || !self.has_card(card)
            || !self.has_card(zone)
            || self.placed.contains(card)
        {
            return Placement::Ignored;
        }
        if card != zone {
            return Placement::Rejected;
        }
        self.placed.insert(card.clone());
        self.selected = None;
        Placement::Accepted
    }

    pub fn place_selected(&mut self, zone: &CardId) -> Placement {
        match self.selected.clone() {
            Some(card) => self.place(&card, zone),
            None => Placement::Ignored,
        }
    }

    /// One second passes. Returns true when time just ran out.
    pub fn tick(&mut self) -> bool {
        if self.finished {
            return false;
        }
        self.clock.tick()
    }

    /// Close the round. One-shot: later calls return `None`.
    pub fn finish(&mut self) -> Option<BuilderResult> {
        if self.finished {
            return None;
        }
        self.finished = true;
        self.selected = None;

        let correct = self.correct_count();
        let time_left = self.clock.remaining();
        let placed_cards = self
            .cards
            .iter()
            .filter(|c| self.placed.contains(&c.id))
            .map(|c| c.id.clone())
            .collect();

        tracing::debug!(correct, total = self.cards.len(), time_left, "builder round finished");

        Some(BuilderResult {
            correct,
            total: self.cards.len() as u32,
            time_left,
            score: builder_score(correct, time_left),
            placed_cards,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BodyPosition, SystemId};

    fn card(id: &str) -> Card {
        Card {
            id: CardId::from(id),
            system: SystemId::from("s"),
            name: id.into(),
            icon: String::new(),
            description: String::new(),
            fun_fact: String::new(),
            rarity: 1,
            position: Some(BodyPosition { top: 10.0, left: 50.0 }),
        }
    }

    fn round() -> BuilderRound {
        BuilderRound::new(["heart", "lungs", "brain"].into_iter().map(card).collect())
    }

    #[test]
    fn test_wrong_zone_is_rejected_without_change() {
        let mut r = round();
        let heart = CardId::from("heart");
        assert_eq!(r.place(&heart, &CardId::from("lungs")), Placement::Rejected);
        assert!(!r.is_placed(&heart));
        assert_eq!(r.correct_count(), 0);
    }

    #[test]
    fn test_right_zone_is_permanent() {
        let mut r = round();
        let heart = CardId::from("heart");
        assert_eq!(r.place(&heart, &heart), Placement::Accepted);
        assert!(r.is_placed(&heart));
        assert_eq!(r.correct_count(), 1);

        // Cannot be placed (or moved) again.
        assert_eq!(r.place(&heart, &heart), Placement::Ignored);
        assert_eq!(r.place(&heart, &CardId::from("lungs")), Placement::Ignored);
        assert!(!r.select(&heart));
        assert_eq!(r.correct_count(), 1);
    }

    #[test]
    fn test_unknown_ids_are_ignored() {
        let mut r = round();
        assert_eq!(r.place(&CardId::from("spleen"), &CardId::from("heart")), Placement::Ignored);
        assert_eq!(r.place(&CardId::from("heart"), &CardId::from("spleen")), Placement::Ignored);
    }

    #[test]
    fn test_select_then_place() {
        let mut r = round();
        assert_eq!(r.place_selected(&CardId::from("brain")), Placement::Ignored);
        assert!(r.select(&CardId::from("brain")));
        assert_eq!(r.place_selected(&CardId::from("lungs")), Placement::Rejected);
        // Selection survives a rejected drop.
        assert_eq!(r.selected(), Some(&CardId::from("brain")));
        assert_eq!(r.place_selected(&CardId::from("brain")), Placement::Accepted);
        assert_eq!(r.selected(), None);
    }

    #[test]
    fn test_complete_round() {
        let mut r = round();
        for id in ["heart", "lungs", "brain"] {
            let id = CardId::from(id);
            r.place(&id, &id);
        }
        assert!(r.is_complete());
        r.tick();
        let result = r.finish().unwrap();
        assert_eq!(result.correct, 3);
        assert_eq!(result.time_left, BUILDER_ROUND_SECS - 1);
        assert_eq!(result.score.total, 3 * 50 + (BUILDER_ROUND_SECS - 1) * 2);
        assert!(r.finish().is_none());
    }

    #[test]
    fn test_timeout() {
        let mut r = round();
        let lungs = CardId::from("lungs");
        r.place(&lungs, &lungs);
        let mut expired = false;
        for _ in 0..BUILDER_ROUND_SECS {
            expired = r.tick();
        }
        assert!(expired);
        assert!(r.is_over());
        assert_eq!(r.place(&lungs, &lungs), Placement::Ignored);
        let result = r.finish().unwrap();
        assert_eq!(result.score.total, 50);
        assert_eq!(result.placed_cards, vec![lungs.clone()]);
        assert_eq!(r.place(&lungs, &lungs), Placement::Ignored);
        assert!(!r.tick());
    }
}
