//! Dispatch of UI commands to arcade operations.
//!
//! Cursor movement only touches the shell's [`UiState`]; everything else
//! becomes an arcade call or a [`GameInput`].

use crate::core::session::{QuizPhase, Session};
use crate::core::{Arcade, Storage};
use crate::input::UiCommand;
use crate::term::screens::builder_pool;
use crate::term::{TerminalShell, UiState, HOME_MENU};
use crate::types::{CardId, GameInput, GameMode, Screen};

type TermArcade<S> = Arcade<S, TerminalShell>;

/// Apply one command. Returns whether the frame needs redrawing.
pub fn handle<S: Storage>(arcade: &mut TermArcade<S>, cmd: UiCommand) -> bool {
    let handled = match arcade.screen() {
        Screen::Register => register(arcade, cmd),
        Screen::Home => home(arcade, cmd),
        Screen::SystemMatch | Screen::BodyBuilder | Screen::Quiz => round(arcade, cmd),
        Screen::Results => results(arcade, cmd),
        Screen::Collection => collection(arcade, cmd),
        Screen::Leaderboard => leaderboard(arcade, cmd),
    };
    if handled {
        arcade.shell_mut().mark_dirty();
    }
    handled
}

fn ui<S: Storage>(arcade: &mut TermArcade<S>) -> &mut UiState {
    &mut arcade.shell_mut().ui
}

fn register<S: Storage>(arcade: &mut TermArcade<S>, cmd: UiCommand) -> bool {
    match cmd {
        UiCommand::Type(ch) => ui(arcade).push_char(ch),
        UiCommand::Erase => ui(arcade).name.pop().is_some(),
        UiCommand::Up | UiCommand::Down => {
            let len = arcade.profiles().roster().len();
            ui(arcade).step_cursor(if cmd == UiCommand::Up { -1 } else { 1 }, len);
            true
        }
        UiCommand::Confirm => {
            let name = ui(arcade).name.clone();
            // An empty entry picks the highlighted saved player.
            if name.trim().is_empty() {
                let cursor = ui(arcade).cursor;
                let saved = arcade.profiles().roster().profiles().nth(cursor).map(|p| p.name.clone());
                if let Some(saved) = saved {
                    return arcade.switch_player(&saved).is_ok();
                }
            }
            if arcade.register(&name).is_ok() {
                ui(arcade).name.clear();
            }
            true
        }
        UiCommand::Back => arcade.navigate(Screen::Home),
        _ => false,
    }
}

fn home<S: Storage>(arcade: &mut TermArcade<S>, cmd: UiCommand) -> bool {
    let item = match cmd {
        UiCommand::Up => {
            ui(arcade).step_cursor(-1, HOME_MENU.len());
            return true;
        }
        UiCommand::Down => {
            ui(arcade).step_cursor(1, HOME_MENU.len());
            return true;
        }
        UiCommand::Confirm => ui(arcade).cursor,
        UiCommand::Pick(i) => i as usize,
        UiCommand::OpenCollection => 3,
        UiCommand::OpenLeaderboard => 4,
        UiCommand::SwitchPlayer => return arcade.navigate(Screen::Register),
        _ => return false,
    };
    match item {
        0 => arcade.start(GameMode::SystemMatch).is_some(),
        1 => arcade.start(GameMode::BodyBuilder).is_some(),
        2 => arcade.start(GameMode::Quiz).is_some(),
        3 => arcade.navigate(Screen::Collection),
        4 => arcade.navigate(Screen::Leaderboard),
        _ => false,
    }
}

fn round<S: Storage>(arcade: &mut TermArcade<S>, cmd: UiCommand) -> bool {
    if cmd == UiCommand::Back {
        return arcade.navigate(Screen::Home);
    }
    let (cursor, zone) = {
        let ui = &arcade.shell().ui;
        (ui.cursor, ui.zone)
    };

    // Resolve the command against the live round without holding the borrow.
    let action = match arcade.session() {
        Some(Session::Match(r)) => {
            let card = r.cards().get(cursor.min(r.cards().len().saturating_sub(1))).map(|c| c.id.clone());
            let system = r.systems().get(zone.min(r.systems().len().saturating_sub(1))).map(|s| s.id.clone());
            match (cmd, card, system) {
                (UiCommand::Up, ..) => Step::Cursor(-1, r.cards().len()),
                (UiCommand::Down, ..) => Step::Cursor(1, r.cards().len()),
                (UiCommand::Left, ..) => Step::Zone(-1, r.systems().len()),
                (UiCommand::Right, ..) => Step::Zone(1, r.systems().len()),
                (UiCommand::Confirm, Some(card), Some(system)) => {
                    Step::Place(card, GameInput::PlaceSelectedInSystem(system))
                }
                (UiCommand::Pick(i), Some(card), _) => match r.systems().get(i as usize) {
                    Some(s) => Step::Place(card, GameInput::PlaceSelectedInSystem(s.id.clone())),
                    None => Step::None,
                },
                (UiCommand::Unplace, Some(card), _) => Step::Input(GameInput::Unplace(card)),
                (UiCommand::Check, ..) => Step::Input(GameInput::CheckMatches),
                _ => Step::None,
            }
        }
        Some(Session::Builder(r)) => {
            let pool = builder_pool(r);
            let card = pool
                .get(cursor.min(pool.len().saturating_sub(1)))
                .map(|&i| r.cards()[i].id.clone());
            let target = r.cards().get(zone.min(r.cards().len().saturating_sub(1))).map(|c| c.id.clone());
            match (cmd, card, target) {
                (UiCommand::Up, ..) => Step::Cursor(-1, pool.len()),
                (UiCommand::Down, ..) => Step::Cursor(1, pool.len()),
                (UiCommand::Left, ..) => Step::Zone(-1, r.cards().len()),
                (UiCommand::Right, ..) => Step::Zone(1, r.cards().len()),
                (UiCommand::Confirm, Some(card), Some(zone)) => {
                    Step::Place(card, GameInput::PlaceSelectedOnZone(zone))
                }
                (UiCommand::Pick(i), Some(card), _) => match r.cards().get(i as usize) {
                    Some(z) => Step::Place(card, GameInput::PlaceSelectedOnZone(z.id.clone())),
                    None => Step::None,
                },
                _ => Step::None,
            }
        }
        Some(Session::Quiz(r)) => match (cmd, r.phase()) {
            (UiCommand::Up, QuizPhase::Asking) => Step::Cursor(-1, 4),
            (UiCommand::Down, QuizPhase::Asking) => Step::Cursor(1, 4),
            (UiCommand::Pick(i), QuizPhase::Asking) if i < 4 => Step::Input(GameInput::Answer(i)),
            (UiCommand::Confirm, QuizPhase::Asking) => Step::Input(GameInput::Answer(cursor.min(3) as u8)),
            (UiCommand::Confirm, QuizPhase::Feedback) => Step::Input(GameInput::NextQuestion),
            _ => Step::None,
        },
        None => Step::None,
    };

    match action {
        Step::Cursor(delta, len) => {
            ui(arcade).step_cursor(delta, len);
            true
        }
        Step::Zone(delta, len) => {
            ui(arcade).step_zone(delta, len);
            true
        }
        Step::Place(card, input) => {
            arcade.apply(GameInput::Select(card));
            arcade.apply(input)
        }
        Step::Input(input) => {
            let next_question = input == GameInput::NextQuestion;
            let changed = arcade.apply(input);
            if changed && next_question {
                ui(arcade).reset_cursors();
            }
            changed
        }
        Step::None => false,
    }
}

enum Step {
    Cursor(isize, usize),
    Zone(isize, usize),
    /// Select the card under the cursor, then drop it.
    Place(CardId, GameInput),
    Input(GameInput),
    None,
}

fn results<S: Storage>(arcade: &mut TermArcade<S>, cmd: UiCommand) -> bool {
    match cmd {
        UiCommand::Replay => arcade.replay().is_some(),
        UiCommand::Confirm | UiCommand::Back => arcade.navigate(Screen::Home),
        UiCommand::OpenCollection => arcade.navigate(Screen::Collection),
        UiCommand::OpenLeaderboard => arcade.navigate(Screen::Leaderboard),
        _ => false,
    }
}

fn collection<S: Storage>(arcade: &mut TermArcade<S>, cmd: UiCommand) -> bool {
    let forward = match cmd {
        UiCommand::NextFilter | UiCommand::Right => true,
        UiCommand::PrevFilter | UiCommand::Left => false,
        UiCommand::Up | UiCommand::Down => {
            let len = arcade.view().collection().len();
            ui(arcade).step_cursor(if cmd == UiCommand::Up { -1 } else { 1 }, len);
            return true;
        }
        UiCommand::Back | UiCommand::Confirm => return arcade.navigate(Screen::Home),
        _ => return false,
    };
    let next = arcade.collection_filter().cycle(arcade.catalog(), forward);
    arcade.set_collection_filter(next);
    ui(arcade).reset_cursors();
    true
}

fn leaderboard<S: Storage>(arcade: &mut TermArcade<S>, cmd: UiCommand) -> bool {
    match cmd {
        UiCommand::Back | UiCommand::Confirm => arcade.navigate(Screen::Home),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Catalog, MemoryStorage};

    fn arcade() -> TermArcade<MemoryStorage> {
        let mut a = Arcade::new(Catalog::builtin(), MemoryStorage::new(), TerminalShell::new(), 5);
        a.boot();
        a
    }

    fn type_name(a: &mut TermArcade<MemoryStorage>, name: &str) {
        for ch in name.chars() {
            handle(a, UiCommand::Type(ch));
        }
        handle(a, UiCommand::Confirm);
    }

    #[test]
    fn register_then_home() {
        let mut a = arcade();
        assert_eq!(a.screen(), Screen::Register);
        handle(&mut a, UiCommand::Confirm);
        assert_eq!(a.screen(), Screen::Register);

        type_name(&mut a, "Ana");
        assert_eq!(a.screen(), Screen::Home);
        assert_eq!(a.player().unwrap().name, "Ana");
        assert!(a.shell().ui.name.is_empty());
    }

    #[test]
    fn register_screen_switches_to_saved_player() {
        let mut a = arcade();
        type_name(&mut a, "Ana");
        handle(&mut a, UiCommand::SwitchPlayer);
        type_name(&mut a, "Ben");
        assert_eq!(a.player().unwrap().name, "Ben");

        handle(&mut a, UiCommand::SwitchPlayer);
        assert_eq!(a.screen(), Screen::Register);
        // Saved players are listed by name: Ana, Ben.
        handle(&mut a, UiCommand::Down);
        handle(&mut a, UiCommand::Up);
        assert!(handle(&mut a, UiCommand::Confirm));
        assert_eq!(a.screen(), Screen::Home);
        assert_eq!(a.player().unwrap().name, "Ana");
        assert_eq!(a.profiles().roster().len(), 2);
    }

    #[test]
    fn home_menu_starts_modes() {
        let mut a = arcade();
        type_name(&mut a, "Ana");
        handle(&mut a, UiCommand::Down);
        handle(&mut a, UiCommand::Confirm);
        assert_eq!(a.screen(), Screen::BodyBuilder);

        handle(&mut a, UiCommand::Back);
        assert_eq!(a.screen(), Screen::Home);
        assert!(a.session().is_none());

        handle(&mut a, UiCommand::Pick(2));
        assert_eq!(a.screen(), Screen::Quiz);
    }

    #[test]
    fn quiz_keys_answer_and_advance() {
        let mut a = arcade();
        type_name(&mut a, "Ana");
        handle(&mut a, UiCommand::Pick(2));

        assert!(handle(&mut a, UiCommand::Pick(0)));
        let quiz = a.session().and_then(|s| s.as_quiz()).unwrap();
        assert_eq!(quiz.phase(), QuizPhase::Feedback);
        // A second answer key does nothing during feedback.
        assert!(!handle(&mut a, UiCommand::Pick(1)));

        handle(&mut a, UiCommand::Confirm);
        let quiz = a.session().and_then(|s| s.as_quiz()).unwrap();
        assert_eq!(quiz.index(), 1);
        assert_eq!(quiz.phase(), QuizPhase::Asking);
    }

    #[test]
    fn match_keys_place_cards() {
        let mut a = arcade();
        type_name(&mut a, "Ana");
        handle(&mut a, UiCommand::Pick(0));
        assert_eq!(a.screen(), Screen::SystemMatch);

        assert!(handle(&mut a, UiCommand::Right));
        assert!(handle(&mut a, UiCommand::Confirm));
        let round = a.session().and_then(|s| s.as_match()).unwrap();
        let first = &round.cards()[0];
        assert_eq!(round.placement(&first.id), Some(&round.systems()[1].id));

        assert!(handle(&mut a, UiCommand::Unplace));
        let round = a.session().and_then(|s| s.as_match()).unwrap();
        assert_eq!(round.placement(&round.cards()[0].id), None);
    }

    #[test]
    fn builder_confirm_places_card_under_cursor() {
        let mut a = arcade();
        type_name(&mut a, "Ana");
        handle(&mut a, UiCommand::Pick(1));
        assert_eq!(a.screen(), Screen::BodyBuilder);

        // Cursor and zone both start on the first card.
        let round = a.session().and_then(|s| s.as_builder()).unwrap();
        let first = round.cards()[builder_pool(round)[0]].id.clone();
        assert_eq!(first, round.cards()[0].id);
        assert!(handle(&mut a, UiCommand::Confirm));
        let round = a.session().and_then(|s| s.as_builder()).unwrap();
        assert!(round.is_placed(&first));
        assert_eq!(round.selected(), None);
    }

    #[test]
    fn collection_filter_cycles() {
        let mut a = arcade();
        type_name(&mut a, "Ana");
        handle(&mut a, UiCommand::OpenCollection);
        assert_eq!(a.screen(), Screen::Collection);
        handle(&mut a, UiCommand::NextFilter);
        assert_ne!(*a.collection_filter(), crate::core::CollectionFilter::All);
        handle(&mut a, UiCommand::Back);
        assert_eq!(a.screen(), Screen::Home);
    }
}
