//! Content catalog - the static systems, cards and quiz questions
//!
//! The catalog is read-only for the lifetime of the game. A built-in catalog
//! ships with the crate; [`Catalog::from_json`] loads a replacement and
//! validates its references so rounds never see a dangling system id.

use std::collections::HashSet;

use serde::Deserialize;

use crate::types::{BodySystem, Card, CardId, QuizQuestion, SystemId, MAX_RARITY, QUIZ_OPTION_COUNT};

const BUILTIN_JSON: &str = include_str!("../data/catalog.json");

/// Fallback color for cards whose system is unknown.
pub const UNKNOWN_SYSTEM_COLOR: &str = "#666666";

/// Errors raised while loading a catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("duplicate system id: {0}")]
    DuplicateSystem(SystemId),

    #[error("duplicate card id: {0}")]
    DuplicateCard(CardId),

    #[error("card {card} references unknown system {system}")]
    UnknownCardSystem { card: CardId, system: SystemId },

    #[error("card {card} has rarity {rarity}, expected 1 to 3")]
    InvalidRarity { card: CardId, rarity: u8 },

    #[error("question {index} references unknown system {system}")]
    UnknownQuestionSystem { index: usize, system: SystemId },

    #[error("question {index} has correct option {correct}, expected 0 to 3")]
    InvalidAnswer { index: usize, correct: u8 },
}

#[derive(Debug, Deserialize)]
struct RawCatalog {
    systems: Vec<BodySystem>,
    cards: Vec<Card>,
    #[serde(default)]
    questions: Vec<QuizQuestion>,
}

/// Read-only game content.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    systems: Vec<BodySystem>,
    cards: Vec<Card>,
    questions: Vec<QuizQuestion>,
}

impl Catalog {
    /// Build a catalog from already-validated parts.
    pub fn new(systems: Vec<BodySystem>, cards: Vec<Card>, questions: Vec<QuizQuestion>) -> Result<Self, CatalogError> {
        let catalog = Self {
            systems,
            cards,
            questions,
        };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Parse and validate a JSON catalog (`{"systems":[..],"cards":[..],"questions":[..]}`).
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let raw: RawCatalog = serde_json::from_str(json)?;
        Self::new(raw.systems, raw.cards, raw.questions)
    }

    /// The content bundled with the game.
    pub fn builtin() -> Self {
        match Self::from_json(BUILTIN_JSON) {
            Ok(catalog) => catalog,
            Err(err) => {
                tracing::warn!("built-in catalog failed to load: {err}");
                Self::default()
            }
        }
    }

    fn validate(&self) -> Result<(), CatalogError> {
        let mut system_ids = HashSet::new();
        for system in &self.systems {
            if !system_ids.insert(&system.id) {
                return Err(CatalogError::DuplicateSystem(system.id.clone()));
            }
        }

        let mut card_ids = HashSet::new();
        for card in &self.cards {
            if !card_ids.insert(&card.id) {
                return Err(CatalogError::DuplicateCard(card.id.clone()));
            }
            if !system_ids.contains(&card.system) {
                return Err(CatalogError::UnknownCardSystem {
                    card: card.id.clone(),
                    system: card.system.clone(),
                });
            }
            if card.rarity == 0 || card.rarity > MAX_RARITY {
                return Err(CatalogError::InvalidRarity {
                    card: card.id.clone(),
                    rarity: card.rarity,
                });
            }
        }

        for (index, question) in self.questions.iter().enumerate() {
            if !system_ids.contains(&question.system) {
                return Err(CatalogError::UnknownQuestionSystem {
                    index,
                    system: question.system.clone(),
                });
            }
            if question.correct as usize >= QUIZ_OPTION_COUNT {
                return Err(CatalogError::InvalidAnswer {
                    index,
                    correct: question.correct,
                });
            }
        }

        Ok(())
    }

    pub fn systems(&self) -> &[BodySystem] {
        &self.systems
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }

    pub fn system(&self, id: &SystemId) -> Option<&BodySystem> {
        self.systems.iter().find(|s| &s.id == id)
    }

    pub fn card(&self, id: &CardId) -> Option<&Card> {
        self.cards.iter().find(|c| &c.id == id)
    }

    /// Cards belonging to `system`, in catalog order.
    pub fn cards_of<'a>(&'a self, system: &'a SystemId) -> impl Iterator<Item = &'a Card> + 'a {
        self.cards.iter().filter(move |c| &c.system == system)
    }

    /// Cards that carry a body position (Body Builder candidates).
    pub fn positioned_cards(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter().filter(|c| c.position.is_some())
    }

    /// System display name, falling back to the raw id.
    pub fn system_name<'a>(&'a self, id: &'a SystemId) -> &'a str {
        self.system(id).map(|s| s.name.as_str()).unwrap_or(id.as_str())
    }

    /// System color, falling back to [`UNKNOWN_SYSTEM_COLOR`].
    pub fn system_color(&self, id: &SystemId) -> &str {
        self.system(id)
            .map(|s| s.color.as_str())
            .unwrap_or(UNKNOWN_SYSTEM_COLOR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BUILDER_CARD_LIMIT;

    #[test]
    fn builtin_catalog_loads() {
        let catalog = Catalog::builtin();
        assert!(catalog.systems().len() >= 3);
        assert!(!catalog.cards().is_empty());
        assert!(!catalog.questions().is_empty());
        assert!(catalog.positioned_cards().count() >= BUILDER_CARD_LIMIT);
    }

    #[test]
    fn lookups_and_fallbacks() {
        let catalog = Catalog::builtin();
        let heart = catalog.card(&CardId::from("heart")).unwrap();
        assert_eq!(heart.system.as_str(), "circulatory");
        assert_eq!(catalog.system_name(&heart.system), "Circulatory System");

        let unknown = SystemId::from("endocrine");
        assert_eq!(catalog.system_name(&unknown), "endocrine");
        assert_eq!(catalog.system_color(&unknown), UNKNOWN_SYSTEM_COLOR);
        assert!(catalog.card(&CardId::from("spleen")).is_none());
    }

    #[test]
    fn cards_of_filters_by_system() {
        let catalog = Catalog::builtin();
        let system = SystemId::from("urinary");
        assert!(catalog.cards_of(&system).all(|c| c.system == system));
        assert_eq!(catalog.cards_of(&system).count(), 3);
    }

    #[test]
    fn rejects_unknown_card_system() {
        let json = r##"{"systems":[{"id":"a","name":"A","icon":"","color":"#fff"}],
            "cards":[{"id":"x","system":"b","name":"X","description":"","funFact":"","rarity":1}]}"##;
        let err = Catalog::from_json(json).unwrap_err();
        assert!(matches!(err, CatalogError::UnknownCardSystem { .. }));
    }

    #[test]
    fn rejects_bad_rarity_and_answer() {
        let json = r##"{"systems":[{"id":"a","name":"A","icon":"","color":"#fff"}],
            "cards":[{"id":"x","system":"a","name":"X","description":"","funFact":"","rarity":4}]}"##;
        assert!(matches!(
            Catalog::from_json(json).unwrap_err(),
            CatalogError::InvalidRarity { rarity: 4, .. }
        ));

        let json = r##"{"systems":[{"id":"a","name":"A","icon":"","color":"#fff"}],"cards":[],
            "questions":[{"question":"?","options":["1","2","3","4"],"correct":4,"system":"a","explanation":""}]}"##;
        assert!(matches!(
            Catalog::from_json(json).unwrap_err(),
            CatalogError::InvalidAnswer { index: 0, correct: 4 }
        ));
    }

    #[test]
    fn rejects_duplicate_cards() {
        let json = r##"{"systems":[{"id":"a","name":"A","icon":"","color":"#fff"}],
            "cards":[{"id":"x","system":"a","name":"X","description":"","funFact":"","rarity":1},
                     {"id":"x","system":"a","name":"X","description":"","funFact":"","rarity":1}]}"##;
        assert!(matches!(
            Catalog::from_json(json).unwrap_err(),
            CatalogError::DuplicateCard(_)
        ));
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(
            Catalog::from_json("{not json").unwrap_err(),
            CatalogError::Parse(_)
        ));
    }
}
