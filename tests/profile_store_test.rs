//! Profile persistence through the file-backed store.

use std::path::PathBuf;
use std::sync::atomic::{AtomicU32, Ordering};

use body_quest::core::storage::{CURRENT_PLAYER_KEY, PLAYERS_KEY};
use body_quest::core::{settle, ProfileStore, RoundOutcome, Storage};
use body_quest::store::FileStorage;
use body_quest::types::{Achievement, CardId, GameMode};

fn temp_dir() -> PathBuf {
    static COUNTER: AtomicU32 = AtomicU32::new(0);
    let id = COUNTER.fetch_add(1, Ordering::SeqCst);
    let dir = std::env::temp_dir().join(format!("body_quest_profiles_{}_{}", std::process::id(), id));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

fn open(dir: &PathBuf) -> ProfileStore<FileStorage> {
    let mut store = ProfileStore::new(FileStorage::open(dir).unwrap());
    store.load();
    store
}

#[test]
fn test_profiles_survive_restart() {
    let dir = temp_dir();
    {
        let mut store = open(&dir);
        store.register("Ana").unwrap();
        store.add_score(640);
        store.unlock([CardId::from("heart"), CardId::from("lungs")]);
        store.grant_achievement(Achievement::FirstMatch);
        assert!(store.save());
        store.register("Ben").unwrap();
    }

    let store = open(&dir);
    assert_eq!(store.current_name(), Some("Ben"));
    let ana = store.get("Ana").unwrap();
    assert_eq!(ana.total_score, 640);
    assert_eq!(ana.level(), 2);
    assert!(ana.has_card(&CardId::from("heart")));
    assert!(ana.has_achievement(Achievement::FirstMatch));
    assert_eq!(store.roster().len(), 2);
}

#[test]
fn test_stored_record_shape() {
    let dir = temp_dir();
    let mut store = open(&dir);
    store.register("Ana").unwrap();
    store.add_score(10);
    store.unlock([CardId::from("brain")]);

    let raw = store.storage().read(PLAYERS_KEY).unwrap().unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json["Ana"]["totalScore"], 10);
    assert_eq!(json["Ana"]["unlockedCards"][0], "brain");
    assert!(json["Ana"]["achievements"].as_array().unwrap().is_empty());
    assert_eq!(
        store.storage().read(CURRENT_PLAYER_KEY).unwrap().as_deref(),
        Some("Ana")
    );
}

#[test]
fn test_corrupt_players_file_starts_fresh() {
    let dir = temp_dir();
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("players.json"), "{not json").unwrap();
    std::fs::write(dir.join("currentPlayer.json"), "Ana").unwrap();

    let store = open(&dir);
    assert!(store.roster().is_empty());
    assert!(store.current().is_none());
}

#[test]
fn test_malformed_entry_is_skipped_and_extras_kept() {
    let dir = temp_dir();
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(
        dir.join("players.json"),
        r#"{
            "Ana": {"totalScore": 120, "unlockedCards": ["heart"], "achievements": ["first_match", "from_the_future"]},
            "Ben": {"totalScore": "lots"},
            "Cy": {}
        }"#,
    )
    .unwrap();

    let store = open(&dir);
    assert!(store.get("Ben").is_none());
    let cy = store.get("Cy").unwrap();
    assert_eq!(cy.total_score, 0);
    let ana = store.get("Ana").unwrap();
    assert!(ana.achievements.contains("from_the_future"));
    assert!(ana.has_achievement(Achievement::FirstMatch));
}

#[test]
fn test_settle_persists_round() {
    let dir = temp_dir();
    let mut store = open(&dir);
    store.register("Ana").unwrap();

    let outcome = RoundOutcome {
        mode: GameMode::BodyBuilder,
        score: 450,
        earned_cards: vec![CardId::from("heart"), CardId::from("heart"), CardId::from("brain")],
        achievements: vec![Achievement::BodyMaster],
    };
    let settlement = settle(&mut store, &outcome);
    assert_eq!(settlement.score_added, 450);
    assert_eq!(settlement.total_score, 450);
    assert_eq!(
        settlement.new_cards,
        vec![CardId::from("heart"), CardId::from("brain")]
    );
    assert_eq!(settlement.new_achievements, vec![Achievement::BodyMaster]);

    let again = settle(&mut store, &outcome);
    assert!(again.new_cards.is_empty());
    assert!(again.new_achievements.is_empty());
    assert_eq!(again.total_score, 900);

    let reloaded = open(&dir);
    let ana = reloaded.get("Ana").unwrap();
    assert_eq!(ana.total_score, 900);
    assert!(ana.has_achievement(Achievement::BodyMaster));
}

#[test]
fn test_settle_without_player_changes_nothing() {
    let dir = temp_dir();
    let mut store = open(&dir);
    let outcome = RoundOutcome {
        mode: GameMode::Quiz,
        score: 100,
        earned_cards: vec![CardId::from("heart")],
        achievements: vec![Achievement::SpeedDemon],
    };
    let settlement = settle(&mut store, &outcome);
    assert_eq!(settlement.total_score, 0);
    assert!(settlement.new_cards.is_empty());
    assert!(!dir.join("players.json").exists());
}
