//! Every screen drawn into a framebuffer from a live arcade.

use body_quest::core::{Arcade, Catalog, MemoryStorage};
use body_quest::frontend;
use body_quest::input::UiCommand;
use body_quest::term::{screens, FrameBuffer, TerminalRenderer, TerminalShell, Viewport};
use body_quest::types::{GameInput, GameMode, Screen};

type TermArcade = Arcade<MemoryStorage, TerminalShell>;

fn arcade() -> TermArcade {
    let mut arcade = Arcade::new(Catalog::builtin(), MemoryStorage::new(), TerminalShell::new(), 99);
    arcade.boot();
    arcade
}

fn draw(arcade: &TermArcade) -> FrameBuffer {
    let mut fb = FrameBuffer::new(0, 0);
    screens::draw(
        &mut fb,
        Viewport::new(100, 30),
        arcade.screen(),
        &arcade.view(),
        arcade.shell(),
    );
    fb
}

#[test]
fn test_register_screen_shows_prompt_and_buffer() {
    let mut arcade = arcade();
    for ch in "Ana".chars() {
        frontend::handle(&mut arcade, UiCommand::Type(ch));
    }
    let fb = draw(&arcade);
    assert_eq!(fb.width(), 100);
    assert_eq!(fb.height(), 30);
    assert!(fb.contains("What's your name?"));
    assert!(fb.contains("Ana_"));
}

#[test]
fn test_register_screen_lists_saved_players() {
    let mut arcade = arcade();
    arcade.register("Ana").unwrap();
    arcade.register("Ben").unwrap();
    frontend::handle(&mut arcade, UiCommand::SwitchPlayer);
    frontend::handle(&mut arcade, UiCommand::Down);
    let fb = draw(&arcade);
    assert!(fb.contains("Saved players"));
    assert!(fb.contains("  Ana"));
    assert!(fb.contains("▶ Ben"));
}

#[test]
fn test_home_screen_lists_menu_and_progress() {
    let mut arcade = arcade();
    arcade.register("Ana").unwrap();
    let fb = draw(&arcade);
    assert!(fb.contains("Choose a game"));
    assert!(fb.contains("System Match"));
    assert!(fb.contains("Leaderboard"));
    assert!(fb.contains("Your progress"));
    assert!(fb.contains("New Student"));
    // The welcome toast is still showing.
    assert!(fb.contains("Welcome, Ana!"));
}

#[test]
fn test_round_screens_render_their_content() {
    let mut arcade = arcade();
    arcade.register("Ana").unwrap();

    arcade.start(GameMode::SystemMatch).unwrap();
    let fb = draw(&arcade);
    let round = arcade.session().and_then(|s| s.as_match()).unwrap();
    assert!(fb.contains(GameMode::SystemMatch.title()));
    assert!(fb.contains(&round.cards()[0].name));
    assert!(fb.contains(&round.systems()[0].name));
    assert!(fb.contains("0/"));

    arcade.start(GameMode::BodyBuilder).unwrap();
    let fb = draw(&arcade);
    let round = arcade.session().and_then(|s| s.as_builder()).unwrap();
    assert!(fb.contains("organs placed"));
    assert!(fb.contains(&round.cards()[0].name));

    arcade.start(GameMode::Quiz).unwrap();
    let fb = draw(&arcade);
    let round = arcade.session().and_then(|s| s.as_quiz()).unwrap();
    let question = round.current().unwrap();
    assert!(fb.contains("HP"));
    assert!(fb.contains(&format!("1. {}", question.options[0])));
}

#[test]
fn test_quiz_feedback_is_drawn() {
    let mut arcade = arcade();
    arcade.register("Ana").unwrap();
    arcade.start(GameMode::Quiz).unwrap();
    let right = arcade
        .session()
        .and_then(|s| s.as_quiz())
        .and_then(|q| q.current())
        .unwrap()
        .correct;
    arcade.apply(GameInput::Answer((right + 1) % 4));
    let fb = draw(&arcade);
    assert!(fb.contains("Not quite. -20 HP"));
}

#[test]
fn test_results_collection_and_leaderboard() {
    let mut arcade = arcade();
    arcade.register("Ana").unwrap();
    arcade.start(GameMode::SystemMatch).unwrap();
    let cards = arcade
        .session()
        .and_then(|s| s.as_match())
        .unwrap()
        .cards()
        .to_vec();
    for card in &cards {
        arcade.apply(GameInput::PlaceInSystem {
            card: card.id.clone(),
            system: card.system.clone(),
        });
    }
    arcade.apply(GameInput::CheckMatches);
    assert_eq!(arcade.screen(), Screen::Results);

    let fb = draw(&arcade);
    assert!(fb.contains("Perfect!"));
    assert!(fb.contains("Cards earned"));
    assert!(fb.contains(&cards[0].name));
    assert!(fb.contains("Total score:"));

    assert!(arcade.navigate(Screen::Collection));
    let fb = draw(&arcade);
    assert!(fb.contains("Card Collection"));
    assert!(fb.contains(&format!("{}/", cards.len())));
    assert!(fb.contains("???"));

    assert!(arcade.navigate(Screen::Leaderboard));
    let fb = draw(&arcade);
    assert!(fb.contains("Rank  Player"));
    assert!(fb.contains("Ana"));
}

#[test]
fn test_small_viewport_does_not_panic() {
    let mut arcade = arcade();
    arcade.register("Ana").unwrap();
    arcade.start(GameMode::BodyBuilder).unwrap();
    let mut fb = FrameBuffer::new(0, 0);
    for (w, h) in [(1, 1), (10, 4), (40, 12)] {
        screens::draw(&mut fb, Viewport::new(w, h), arcade.screen(), &arcade.view(), arcade.shell());
        assert_eq!(fb.width(), w);
    }
}

#[test]
fn test_frames_flush_through_renderer() {
    let mut arcade = arcade();
    arcade.register("Ana").unwrap();
    let mut renderer = TerminalRenderer::with_writer(Vec::new());

    let mut fb = draw(&arcade);
    renderer.draw_swap(&mut fb).unwrap();
    let full = renderer.writer().len();

    frontend::handle(&mut arcade, UiCommand::Down);
    let mut fb = draw(&arcade);
    renderer.draw_swap(&mut fb).unwrap();
    let diff = renderer.writer().len() - full;
    assert!(diff > 0);
    assert!(diff < full);
}
