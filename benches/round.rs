//! Benchmarks for full games and view projection.
//!
//! Games are played by the first seat with a legal action, always drawing
//! from the deck and revealing a hidden card when it can. Every iteration
//! plays the same game.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use skyjo_engine::{Action, GameEngine, Phase, PlayerId, RulesConfig};

fn seated(n: usize, seed: u64) -> (GameEngine, Vec<PlayerId>) {
    let mut engine = GameEngine::with_seed(RulesConfig::default(), seed);
    let mut ids = Vec::new();
    for i in 0..n {
        let (id, _) = engine.add_player(format!("P{}", i)).unwrap();
        engine.set_ready(&id, true).unwrap();
        ids.push(id);
    }
    engine.start_game_if_ready().unwrap();
    (engine, ids)
}

fn play_to_end(engine: &mut GameEngine, ids: &[PlayerId]) -> usize {
    let mut calls = 0;
    while engine.game().phase != Phase::GameOver {
        let next = ids.iter().find_map(|id| {
            let actions = engine.legal_actions(id);
            actions
                .iter()
                .find(|a| matches!(a, Action::DiscardDrawnAndReveal(_)))
                .or_else(|| actions.first())
                .map(|a| (id.clone(), *a))
        });
        let Some((id, action)) = next else { break };
        engine.apply(&id, action).unwrap();
        calls += 1;
    }
    calls
}

fn bench_full_game(c: &mut Criterion) {
    for players in [2, 4, 6] {
        c.bench_function(&format!("full_game_{}p", players), |b| {
            b.iter(|| {
                let (mut engine, ids) = seated(players, 42);
                black_box(play_to_end(&mut engine, &ids))
            })
        });
    }
}

fn bench_views(c: &mut Criterion) {
    let (mut engine, ids) = seated(4, 7);
    for id in &ids {
        engine.reveal_setup_card(id, 0).unwrap();
        engine.reveal_setup_card(id, 5).unwrap();
    }

    c.bench_function("public_view", |b| b.iter(|| black_box(engine.public_view())));
    c.bench_function("private_view", |b| {
        b.iter(|| black_box(engine.private_view(&ids[0]).unwrap()))
    });
}

criterion_group!(benches, bench_full_game, bench_views);
criterion_main!(benches);
