//! System Match: sort organ cards into the body system they belong to.
//!
//! Cards can be moved between the three zones freely until the round is
//! checked. Checking is one-shot: either manual (every card placed) or forced
//! when the clock runs out.

use std::collections::BTreeMap;

use crate::catalog::Catalog;
use crate::rng::SimpleRng;
use crate::scoring::{match_score, MatchScore};
use crate::selection::pick_match_content;
use crate::timer::Countdown;
use crate::types::{BodySystem, Card, CardId, SystemId, MATCH_ROUND_SECS};

/// Result of a checked match round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    pub correct: u32,
    pub total: u32,
    pub time_left: u32,
    pub score: MatchScore,
    /// Cards placed in their own system, in deal order.
    pub correct_cards: Vec<CardId>,
}

#[derive(Debug, Clone)]
pub struct MatchRound {
    systems: Vec<BodySystem>,
    cards: Vec<Card>,
    placements: BTreeMap<CardId, SystemId>,
    selected: Option<CardId>,
    clock: Countdown,
    result: Option<MatchResult>,
}

impl MatchRound {
    pub fn new(systems: Vec<BodySystem>, cards: Vec<Card>) -> Self {
        Self {
            systems,
            cards,
            placements: BTreeMap::new(),
            selected: None,
            clock: Countdown::new(MATCH_ROUND_SECS),
            result: None,
        }
    }

    /// Draw a fresh round from the catalog.
    pub fn deal(catalog: &Catalog, rng: &mut SimpleRng) -> Self {
        let (systems, cards) = pick_match_content(catalog, rng);
        Self::new(systems, cards)
    }

    pub fn systems(&self) -> &[BodySystem] {
        &self.systems
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Cards not yet dropped into a zone, in deal order.
    pub fn unplaced_cards(&self) -> impl Iterator<Item = &Card> {
        self.cards
            .iter()
            .filter(|c| !self.placements.contains_key(&c.id))
    }

    /// Cards currently sitting in `system`'s zone.
    pub fn cards_in<'a>(&'a self, system: &'a SystemId) -> impl Iterator<Item = &'a Card> + 'a {
        self.cards
            .iter()
            .filter(move |c| self.placements.get(&c.id) == Some(system))
    }

    pub fn placement(&self, card: &CardId) -> Option<&SystemId> {
        self.placements.get(card)
    }

    pub fn selected(&self) -> Option<&CardId> {
        self.selected.as_ref()
    }

    pub fn time_left(&self) -> u32 {
        self.clock.remaining()
    }

    pub fn is_checked(&self) -> bool {
        self.result.is_some()
    }

    /// The checked result, once the round is over.
    pub fn result(&self) -> Option<&MatchResult> {
        self.result.as_ref()
    }

    pub fn all_placed(&self) -> bool {
        self.cards
            .iter()
            .all(|c| self.placements.contains_key(&c.id))
    }

    /// Whether the manual check is available.
    pub fn can_check(&self) -> bool {
        !self.is_checked() && self.all_placed()
    }

    fn has_card(&self, card: &CardId) -> bool {
        self.cards.iter().any(|c| &c.id == card)
    }

    fn has_system(&self, system: &SystemId) -> bool {
        self.systems.iter().any(|s| &s.id == system)
    }

    /// Pick a card for tap-to-place.
    pub fn select(&mut self, card: &CardId) -> bool {
        if self.is_checked() || !self.has_card(card) {
            return false;
        }
        self.selected = Some(card.clone());
        true
    }

    /// Put `card` into `system`'s zone, moving it out of any other zone.
    pub fn place(&mut self, card: &CardId, system: &SystemId) -> bool {
        if self.is_checked() || !self.has_card(card) || !self.has_system(system) {
            return false;
        }
        self.placements.insert(card.clone(), system.clone());
        if self.selected.as_ref() == Some(card) {
            self.selected = None;
        }
        true
    }

    /// Drop the selected card into `system`.
    pub fn place_selected(&mut self, system: &SystemId) -> bool {
        match self.selected.clone() {
            Some(card) => self.place(&card, system),
            None => false,
        }
    }

    /// Take a card back out of its zone.
    pub fn unplace(&mut self, card: &CardId) -> bool {
        if self.is_checked() {
            return false;
        }
        self.placements.remove(card).is_some()
    }

    /// Manual check; only once every card has a zone.
    pub fn check(&mut self) -> Option<MatchResult> {
        if !self.can_check() {
            return None;
        }
        Some(self.finish())
    }

    /// One second passes. Returns the forced result when time runs out.
    pub fn tick(&mut self) -> Option<MatchResult> {
        if self.is_checked() {
            return None;
        }
        if self.clock.tick() {
            return Some(self.finish());
        }
        None
    }

    fn finish(&mut self) -> MatchResult {
        self.selected = None;

        let correct_cards: Vec<CardId> = self
            .cards
            .iter()
            .filter(|c| self.placements.get(&c.id) == Some(&c.system))
            .map(|c| c.id.clone())
            .collect();
        let correct = correct_cards.len() as u32;
        let total = self.cards.len() as u32;
        let time_left = self.clock.remaining();

        tracing::debug!(correct, total, time_left, "match round checked");

        let result = MatchResult {
            correct,
            total,
            time_left,
            score: match_score(correct, total, time_left),
            correct_cards,
        };
        self.result = Some(result.clone());
        result
    }
}
