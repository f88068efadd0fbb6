//! Core types module - shared data structures and constants
//!
//! This crate defines the fundamental types used throughout the game: the
//! static content model (systems, cards, questions), identifiers, game modes,
//! screens, player inputs and achievements. All types are plain data, usable
//! from the rules engine, the terminal front-end and tests alike.
//!
//! # Round Timing
//!
//! All countdowns run in whole seconds, one pulse per [`TICK_MS`]:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `MATCH_ROUND_SECS` | 60 | System Match round length |
//! | `BUILDER_ROUND_SECS` | 90 | Body Builder round length |
//! | `QUIZ_QUESTION_SECS` | 15 | Time per quiz question |
//! | `QUIZ_START_HP` | 100 | Hit points at quiz start |
//! | `QUIZ_MISS_DAMAGE` | 20 | Hit points lost per wrong answer |
//!
//! # Examples
//!
//! ```
//! use body_quest_types::{Achievement, CardId, GameMode};
//!
//! let mode = GameMode::from_str("quiz").unwrap();
//! assert_eq!(mode, GameMode::Quiz);
//! assert_eq!(mode.as_str(), "quiz");
//!
//! let id = CardId::from("heart");
//! assert_eq!(id.as_str(), "heart");
//!
//! assert_eq!(Achievement::from_id("speed_demon"), Some(Achievement::SpeedDemon));
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Timer pulse interval in milliseconds (one countdown step).
pub const TICK_MS: u32 = 1000;

/// System Match round length in seconds.
pub const MATCH_ROUND_SECS: u32 = 60;

/// Body Builder round length in seconds.
pub const BUILDER_ROUND_SECS: u32 = 90;

/// Time allowed per quiz question in seconds.
pub const QUIZ_QUESTION_SECS: u32 = 15;

/// Hit points at the start of a quiz.
pub const QUIZ_START_HP: u32 = 100;

/// Hit points lost on a wrong (or timed out) answer.
pub const QUIZ_MISS_DAMAGE: u32 = 20;

/// Number of candidate systems drawn for a match round.
pub const MATCH_SYSTEM_COUNT: usize = 3;

/// Maximum positioned cards in a builder round.
pub const BUILDER_CARD_LIMIT: usize = 8;

/// Maximum questions in a quiz round.
pub const QUIZ_QUESTION_LIMIT: usize = 10;

/// Options per quiz question.
pub const QUIZ_OPTION_COUNT: usize = 4;

/// Accuracy points for a perfect match round.
pub const MATCH_ACCURACY_POINTS: u32 = 300;

/// Points per remaining second at the end of a match or builder round.
pub const TIME_BONUS_PER_SEC: u32 = 2;

/// Points per correctly placed organ.
pub const BUILDER_POINTS_PER_CARD: u32 = 50;

/// Base points for a correct quiz answer.
pub const QUIZ_BASE_POINTS: u32 = 30;

/// Points per unused second on a correct quiz answer.
pub const QUIZ_TIME_BONUS_PER_SEC: u32 = 2;

/// Points per streak step already held before a correct answer.
pub const QUIZ_STREAK_BONUS: u32 = 5;

/// Answers taking at most this many seconds count as fast.
pub const QUIZ_FAST_ANSWER_SECS: u32 = 3;

/// Total score needed per player level.
pub const POINTS_PER_LEVEL: u64 = 500;

/// Player level cap.
pub const MAX_LEVEL: u32 = 5;

/// Highest card rarity.
pub const MAX_RARITY: u8 = 3;


macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(
    /// Identifier of a [`BodySystem`] (e.g. `"circulatory"`).
    SystemId
);

string_id!(
    /// Identifier of a [`Card`] (e.g. `"heart"`).
    CardId
);

/// A body system, the grouping every card belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BodySystem {
    pub id: SystemId,
    pub name: String,
    pub icon: String,
    /// CSS-style hex color (e.g. `"#e74c3c"`).
    pub color: String,
}

/// Where an organ sits on the body outline, in percent of the figure.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyPosition {
    pub top: f32,
    pub left: f32,
}

/// A collectible organ card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: CardId,
    pub system: SystemId,
    pub name: String,
    #[serde(default)]
    pub icon: String,
    pub description: String,
    pub fun_fact: String,
    /// 1 (common) to 3 (rare).
    pub rarity: u8,
    /// Cards with a position can appear in Body Builder.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<BodyPosition>,
}

impl Card {
    /// Rarity as filled/empty stars, e.g. `"★★☆"`.
    pub fn rarity_stars(&self) -> String {
        let filled = self.rarity.min(MAX_RARITY) as usize;
        let mut out = String::with_capacity(MAX_RARITY as usize * 3);
        for i in 0..MAX_RARITY as usize {
            out.push(if i < filled { '★' } else { '☆' });
        }
        out
    }
}

/// A four-option quiz question tagged with the system it teaches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub question: String,
    pub options: [String; QUIZ_OPTION_COUNT],
    /// Index into `options` of the right answer.
    pub correct: u8,
    pub system: SystemId,
    pub explanation: String,
}

/// The three game modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameMode {
    SystemMatch,
    BodyBuilder,
    Quiz,
}

impl GameMode {
    pub const ALL: [GameMode; 3] = [GameMode::SystemMatch, GameMode::BodyBuilder, GameMode::Quiz];

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "system-match" => Some(GameMode::SystemMatch),
            "body-builder" => Some(GameMode::BodyBuilder),
            "quiz" => Some(GameMode::Quiz),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::SystemMatch => "system-match",
            GameMode::BodyBuilder => "body-builder",
            GameMode::Quiz => "quiz",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            GameMode::SystemMatch => "System Match",
            GameMode::BodyBuilder => "Body Builder",
            GameMode::Quiz => "Body Quiz",
        }
    }

    /// Screen shown while a round of this mode is running.
    pub fn screen(&self) -> Screen {
        match self {
            GameMode::SystemMatch => Screen::SystemMatch,
            GameMode::BodyBuilder => Screen::BodyBuilder,
            GameMode::Quiz => Screen::Quiz,
        }
    }
}

/// Screens the navigation shell can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    Register,
    Home,
    SystemMatch,
    BodyBuilder,
    Quiz,
    Results,
    Collection,
    Leaderboard,
}

impl Screen {
    /// Whether a round is running while this screen is shown.
    pub fn is_round(&self) -> bool {
        matches!(self, Screen::SystemMatch | Screen::BodyBuilder | Screen::Quiz)
    }
}

/// Severity of a transient notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Info,
    Success,
    Error,
    Achievement,
}

/// Player input delivered to the active round.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GameInput {
    /// Pick a card for tap-to-place (Match and Builder).
    Select(CardId),
    /// Drop a card into one of the match round's systems.
    PlaceInSystem { card: CardId, system: SystemId },
    /// Drop the selected match card into a system.
    PlaceSelectedInSystem(SystemId),
    /// Return a placed match card to the pool.
    Unplace(CardId),
    /// Check a fully placed match round.
    CheckMatches,
    /// Drop a card onto the builder zone belonging to `zone`.
    PlaceOnZone { card: CardId, zone: CardId },
    /// Drop the selected builder card onto a zone.
    PlaceSelectedOnZone(CardId),
    /// Answer the current quiz question with an option index.
    Answer(u8),
    /// Leave the answer feedback and move on.
    NextQuestion,
}

/// Fixed set of unlockable achievements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Achievement {
    FirstMatch,
    PerfectMatch,
    BodyMaster,
    QuizStreak5,
    QuizStreak10,
    SpeedDemon,
}

impl Achievement {
    pub const ALL: [Achievement; 6] = [
        Achievement::FirstMatch,
        Achievement::PerfectMatch,
        Achievement::BodyMaster,
        Achievement::QuizStreak5,
        Achievement::QuizStreak10,
        Achievement::SpeedDemon,
    ];

    /// Stable id used in storage.
    pub fn id(&self) -> &'static str {
        match self {
            Achievement::FirstMatch => "first_match",
            Achievement::PerfectMatch => "perfect_match",
            Achievement::BodyMaster => "body_master",
            Achievement::QuizStreak5 => "quiz_streak_5",
            Achievement::QuizStreak10 => "quiz_streak_10",
            Achievement::SpeedDemon => "speed_demon",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.id() == id)
    }

    pub fn title(&self) -> &'static str {
        match self {
            Achievement::FirstMatch => "Good Start",
            Achievement::PerfectMatch => "Perfect Match",
            Achievement::BodyMaster => "Body Master",
            Achievement::QuizStreak5 => "Hot Streak 5",
            Achievement::QuizStreak10 => "Hot Streak 10",
            Achievement::SpeedDemon => "Lightning Fast",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Achievement::FirstMatch => "⭐",
            Achievement::PerfectMatch => "🎯",
            Achievement::BodyMaster => "🩺",
            Achievement::QuizStreak5 => "🔥",
            Achievement::QuizStreak10 => "💎",
            Achievement::SpeedDemon => "⚡",
        }
    }
}
