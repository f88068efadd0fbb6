//! The arcade: one context object owning everything a play session needs.
//!
//! Front-ends feed it navigation, [`GameInput`]s and elapsed time, and get
//! called back through [`Shell`]. Only one round is live at a time and only
//! one [`Metronome`] is armed; replacing either invalidates the old one.

use crate::achievements;
use crate::catalog::Catalog;
use crate::collection::{self, CollectionEntry, CollectionFilter, CollectionProgress};
use crate::leaderboard::{self, LeaderboardEntry};
use crate::profile::{PlayerProfile, ProfileError, ProfileStore, Roster};
use crate::report::RoundReport;
use crate::rewards::{settle, RoundOutcome};
use crate::rng::SimpleRng;
use crate::session::{AnswerFeedback, BuilderRound, MatchRound, Placement, Session};
use crate::storage::Storage;
use crate::timer::{Metronome, TimerId};
use crate::types::{Achievement, GameInput, GameMode, Screen, Severity};

/// Presentation callbacks.
pub trait Shell {
    /// Draw `screen`. Called after every state change.
    fn render(&mut self, screen: Screen, view: &View<'_>);
    /// Transient message.
    fn notify(&mut self, message: &str, severity: Severity);
    /// A round just finished; called before the results screen is rendered.
    fn results(&mut self, report: &RoundReport);
}

/// Everything a shell may read while drawing.
#[derive(Clone, Copy)]
pub struct View<'a> {
    pub catalog: &'a Catalog,
    pub player: Option<&'a PlayerProfile>,
    pub session: Option<&'a Session>,
    pub report: Option<&'a RoundReport>,
    pub roster: Roster<'a>,
    pub collection_filter: &'a CollectionFilter,
}

impl<'a> View<'a> {
    pub fn leaderboard(&self) -> Vec<LeaderboardEntry> {
        leaderboard::rankings(self.roster)
    }

    pub fn collection(&self) -> Vec<CollectionEntry<'a>> {
        collection::entries(self.catalog, self.player, self.collection_filter)
    }

    pub fn collection_progress(&self) -> CollectionProgress {
        collection::progress(self.catalog, self.player)
    }
}

pub struct Arcade<S, Sh> {
    catalog: Catalog,
    profiles: ProfileStore<S>,
    shell: Sh,
    rng: SimpleRng,
    screen: Screen,
    session: Option<Session>,
    timer: Option<Metronome>,
    next_timer_id: u32,
    last_report: Option<RoundReport>,
    collection_filter: CollectionFilter,
}

impl<S: Storage, Sh: Shell> Arcade<S, Sh> {
    pub fn new(catalog: Catalog, storage: S, shell: Sh, seed: u32) -> Self {
        Self {
            catalog,
            profiles: ProfileStore::new(storage),
            shell,
            rng: SimpleRng::new(seed),
            screen: Screen::Register,
            session: None,
            timer: None,
            next_timer_id: 0,
            last_report: None,
            collection_filter: CollectionFilter::All,
        }
    }

    /// Load saved profiles and show the first screen.
    pub fn boot(&mut self) -> Screen {
        self.profiles.load();
        self.screen = if self.profiles.current().is_some() {
            Screen::Home
        } else {
            Screen::Register
        };
        tracing::info!(screen = ?self.screen, seed = self.rng.seed(), "arcade booted");
        self.refresh();
        self.screen
    }

    pub fn register(&mut self, name: &str) -> Result<(), ProfileError> {
        match self.profiles.register(name) {
            Ok(profile) => {
                let message = format!("Welcome, {}!", profile.name);
                self.shell.notify(&message, Severity::Success);
                self.navigate(Screen::Home);
                Ok(())
            }
            Err(err) => {
                self.shell.notify("Please enter your name", Severity::Error);
                Err(err)
            }
        }
    }

    /// Make a saved player current without creating one.
    pub fn switch_player(&mut self, name: &str) -> Result<(), ProfileError> {
        let message = format!("Welcome back, {}!", self.profiles.set_current(name)?.name);
        self.shell.notify(&message, Severity::Success);
        self.navigate(Screen::Home);
        Ok(())
    }

    /// Deal a new round of `mode`, dropping any running one.
    ///
    /// Returns the id of the armed timer, or `None` when no round is running
    /// afterwards (no player, or nothing to play).
    pub fn start(&mut self, mode: GameMode) -> Option<TimerId> {
        self.stop_round();
        if self.profiles.current().is_none() {
            self.shell.notify("Please enter your name", Severity::Error);
            self.screen = Screen::Register;
            self.refresh();
            return None;
        }

        let session = Session::deal(mode, &self.catalog, &mut self.rng);
        tracing::debug!(mode = mode.as_str(), "round started");
        self.screen = mode.screen();

        if session.is_over() {
            self.session = Some(session);
            self.finalize();
            return None;
        }
        self.session = Some(session);

        self.next_timer_id = self.next_timer_id.wrapping_add(1);
        let id = TimerId::new(self.next_timer_id);
        self.timer = Some(Metronome::new(id));
        self.refresh();
        Some(id)
    }

    /// Start another round of the mode just finished.
    pub fn replay(&mut self) -> Option<TimerId> {
        let mode = self.last_report.as_ref()?.mode;
        self.start(mode)
    }

    /// Leave the current screen. Round screens are only reachable through
    /// [`Arcade::start`], and results only once a round has finished.
    pub fn navigate(&mut self, screen: Screen) -> bool {
        if screen.is_round() || (screen == Screen::Results && self.last_report.is_none()) {
            return false;
        }
        if screen != Screen::Register && self.profiles.current().is_none() {
            return false;
        }
        self.stop_round();
        self.screen = screen;
        self.refresh();
        true
    }

    fn stop_round(&mut self) {
        if let Some(timer) = self.timer.take() {
            tracing::debug!(timer = timer.id().get(), "timer cancelled");
        }
        self.session = None;
    }

    /// Feed one input to the live round. Returns whether anything changed.
    pub fn apply(&mut self, input: GameInput) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        if session.is_over() {
            return false;
        }

        let mut answered = None;
        let changed = match session {
            Session::Match(round) => Self::apply_match(round, &mut self.shell, input),
            Session::Builder(round) => Self::apply_builder(round, &self.catalog, &mut self.shell, input),
            Session::Quiz(round) => match input {
                GameInput::Answer(choice) => {
                    answered = round
                        .answer(Some(choice), &self.catalog, &mut self.rng)
                        .cloned()
                        .map(|feedback| (feedback, round.streak(), round.fast_answers()));
                    answered.is_some()
                }
                GameInput::NextQuestion => round.next().is_some(),
                _ => false,
            },
        };

        if let Some((feedback, streak, fast_answers)) = answered {
            self.after_answer(&feedback, streak, fast_answers);
        }
        if changed {
            if self.session.as_ref().is_some_and(Session::is_over) {
                self.finalize();
            } else {
                self.refresh();
            }
        }
        changed
    }

    fn apply_match(round: &mut MatchRound, shell: &mut Sh, input: GameInput) -> bool {
        match input {
            GameInput::Select(card) => round.select(&card),
            GameInput::PlaceInSystem { card, system } => round.place(&card, &system),
            GameInput::PlaceSelectedInSystem(system) => round.place_selected(&system),
            GameInput::Unplace(card) => round.unplace(&card),
            GameInput::CheckMatches => {
                if round.can_check() {
                    round.check().is_some()
                } else {
                    shell.notify("Place every card before checking", Severity::Info);
                    false
                }
            }
            _ => false,
        }
    }

    fn apply_builder(round: &mut BuilderRound, catalog: &Catalog, shell: &mut Sh, input: GameInput) -> bool {
        let placement = match input {
            GameInput::Select(card) => return round.select(&card),
            GameInput::PlaceOnZone { card, zone } => (round.place(&card, &zone), card),
            GameInput::PlaceSelectedOnZone(zone) => match round.selected().cloned() {
                Some(card) => (round.place_selected(&zone), card),
                None => return false,
            },
            _ => return false,
        };
        match placement {
            (Placement::Accepted, card) => {
                let name = catalog.card(&card).map_or(card.as_str(), |c| c.name.as_str());
                shell.notify(&format!("✅ {name} is in place!"), Severity::Success);
                true
            }
            (Placement::Rejected, _) => {
                shell.notify("❌ Not that spot, try again!", Severity::Error);
                false
            }
            (Placement::Ignored, _) => false,
        }
    }

    /// Shared by manual answers and timeouts.
    fn after_answer(&mut self, feedback: &AnswerFeedback, streak: u32, fast_answers: u32) {
        if feedback.correct {
            let message = format!("Correct! +{}", feedback.points.total);
            self.shell.notify(&message, Severity::Success);
        } else if feedback.chosen.is_none() {
            self.shell.notify("⏰ Time's up!", Severity::Error);
        } else {
            self.shell.notify("Wrong answer", Severity::Error);
        }

        for achievement in achievements::for_quiz(streak, fast_answers) {
            self.grant(achievement);
        }
    }

    fn grant(&mut self, achievement: Achievement) {
        if self.profiles.grant_achievement(achievement) {
            let message = format!("{} Achievement: {}!", achievement.icon(), achievement.title());
            self.shell.notify(&message, Severity::Achievement);
        }
    }

    /// Deliver one pulse from timer `id`. Stale ids are ignored.
    pub fn tick(&mut self, id: TimerId) -> bool {
        if self.timer.as_ref().map(Metronome::id) != Some(id) {
            tracing::debug!(timer = id.get(), "stale timer pulse ignored");
            return false;
        }
        let Some(session) = self.session.as_mut() else {
            return false;
        };

        let mut answered = None;
        match session {
            Session::Match(round) => {
                if round.tick().is_some() {
                    self.shell.notify("⏰ Time's up!", Severity::Info);
                }
            }
            Session::Builder(round) => {
                if round.tick() {
                    self.shell.notify("⏰ Time's up!", Severity::Info);
                }
            }
            Session::Quiz(round) => {
                answered = round
                    .tick(&self.catalog, &mut self.rng)
                    .cloned()
                    .map(|feedback| (feedback, round.streak(), round.fast_answers()));
            }
        }

        if let Some((feedback, streak, fast_answers)) = answered {
            self.after_answer(&feedback, streak, fast_answers);
        }
        if self.session.as_ref().is_some_and(Session::is_over) {
            self.finalize();
        } else {
            self.refresh();
        }
        true
    }

    /// Advance wall-clock time; fires due pulses on the armed timer.
    pub fn advance(&mut self, elapsed_ms: u32) {
        let Some(timer) = self.timer.as_mut() else {
            return;
        };
        let id = timer.id();
        let pulses = timer.advance(elapsed_ms);
        for _ in 0..pulses {
            // A pulse may finish the round and disarm the timer.
            if !self.tick(id) {
                break;
            }
        }
    }

    /// Settle the finished round and show its report.
    fn finalize(&mut self) {
        self.timer = None;
        let Some(session) = self.session.take() else {
            return;
        };

        let report = match session {
            Session::Match(round) => {
                let Some(result) = round.result().cloned() else {
                    return;
                };
                let outcome = RoundOutcome::from_match(&result);
                let settlement = settle(&mut self.profiles, &outcome);
                RoundReport::for_match(result, &outcome, settlement, round.cards(), &mut self.rng)
            }
            Session::Builder(mut round) => {
                let Some(result) = round.finish() else {
                    return;
                };
                let outcome = RoundOutcome::from_builder(&result);
                let settlement = settle(&mut self.profiles, &outcome);
                RoundReport::for_builder(result, &outcome, settlement, round.cards(), &mut self.rng)
            }
            Session::Quiz(round) => {
                let result = round.result();
                let outcome = RoundOutcome::from_quiz(&result);
                let settlement = settle(&mut self.profiles, &outcome);
                RoundReport::for_quiz(result, &outcome, settlement, &self.catalog, &mut self.rng)
            }
        };

        if !report.settlement.new_cards.is_empty() {
            let message = format!("🎴 {} new card(s) unlocked!", report.settlement.new_cards.len());
            self.shell.notify(&message, Severity::Achievement);
        }
        for achievement in &report.settlement.new_achievements {
            let message = format!("{} Achievement: {}!", achievement.icon(), achievement.title());
            self.shell.notify(&message, Severity::Achievement);
        }

        self.screen = Screen::Results;
        self.shell.results(&report);
        self.last_report = Some(report);
        self.refresh();
    }

    /// Re-render the current screen.
    pub fn refresh(&mut self) {
        let view = View {
            catalog: &self.catalog,
            player: self.profiles.current(),
            session: self.session.as_ref(),
            report: self.last_report.as_ref(),
            roster: self.profiles.roster(),
            collection_filter: &self.collection_filter,
        };
        self.shell.render(self.screen, &view);
    }

    pub fn view(&self) -> View<'_> {
        View {
            catalog: &self.catalog,
            player: self.profiles.current(),
            session: self.session.as_ref(),
            report: self.last_report.as_ref(),
            roster: self.profiles.roster(),
            collection_filter: &self.collection_filter,
        }
    }

    pub fn set_collection_filter(&mut self, filter: CollectionFilter) {
        self.collection_filter = filter;
        if self.screen == Screen::Collection {
            self.refresh();
        }
    }

    pub fn collection_filter(&self) -> &CollectionFilter {
        &self.collection_filter
    }

    pub fn leaderboard(&self) -> Vec<LeaderboardEntry> {
        leaderboard::rankings(self.profiles.roster())
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn timer_id(&self) -> Option<TimerId> {
        self.timer.as_ref().map(Metronome::id)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn profiles(&self) -> &ProfileStore<S> {
        &self.profiles
    }

    pub fn player(&self) -> Option<&PlayerProfile> {
        self.profiles.current()
    }

    pub fn last_report(&self) -> Option<&RoundReport> {
        self.last_report.as_ref()
    }

    pub fn shell(&self) -> &Sh {
        &self.shell
    }

    pub fn shell_mut(&mut self) -> &mut Sh {
        &mut self.shell
    }
}
