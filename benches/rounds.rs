use criterion::{black_box, criterion_group, criterion_main, Criterion};
use body_quest::core::{settle, Arcade, Catalog, MemoryStorage, ProfileStore, RoundOutcome, Session, SimpleRng};
use body_quest::term::{screens, FrameBuffer, TerminalShell, Viewport};
use body_quest::types::{Achievement, CardId, GameMode};

fn bench_deal(c: &mut Criterion) {
    let catalog = Catalog::builtin();
    let mut rng = SimpleRng::new(12345);

    for mode in GameMode::ALL {
        c.bench_function(&format!("deal_{}", mode.as_str()), |b| {
            b.iter(|| Session::deal(black_box(mode), &catalog, &mut rng))
        });
    }
}

fn bench_settle(c: &mut Criterion) {
    let mut store = ProfileStore::new(MemoryStorage::new());
    store.register("Ana").unwrap();
    let outcome = RoundOutcome {
        mode: GameMode::SystemMatch,
        score: 320,
        earned_cards: vec![CardId::from("heart"), CardId::from("lungs"), CardId::from("brain")],
        achievements: vec![Achievement::FirstMatch, Achievement::PerfectMatch],
    };

    c.bench_function("settle_match_round", |b| {
        b.iter(|| settle(&mut store, black_box(&outcome)))
    });
}

fn bench_draw(c: &mut Criterion) {
    let mut arcade = Arcade::new(Catalog::builtin(), MemoryStorage::new(), TerminalShell::new(), 7);
    arcade.boot();
    arcade.register("Ana").unwrap();
    arcade.start(GameMode::SystemMatch);
    let mut fb = FrameBuffer::new(120, 40);

    c.bench_function("draw_match_screen_120x40", |b| {
        b.iter(|| {
            screens::draw(
                &mut fb,
                Viewport::new(120, 40),
                arcade.screen(),
                &arcade.view(),
                arcade.shell(),
            );
        })
    });
}

criterion_group!(benches, bench_deal, bench_settle, bench_draw);
criterion_main!(benches);
