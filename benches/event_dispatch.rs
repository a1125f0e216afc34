//! Benchmarks for event dispatch and the death sweep.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use card_engine::cards::druid;
use card_engine::{
    Action, Deathrattle, Effect, EntityId, Event, EventName, EventPayload, EventScope,
    GameConfig, GameState, MinionCard, PlayerId, Selector, SelectorContext, Side,
};

fn listener_card() -> MinionCard {
    MinionCard::new("Watcher", 2, 1, 30).with_effect(Effect::new(
        Event::minion_damaged().with_scope(EventScope::AnyPlayer),
        Action::ChangeTempAttack { amount: 1 },
        Selector::Owner,
    ))
}

fn full_boards(per_side: usize) -> GameState {
    let mut state = GameState::new(GameConfig::default());
    for player in PlayerId::all(2) {
        for _ in 0..per_side {
            state.summon(&listener_card(), player, None);
        }
    }
    state
}

fn bench_raise(c: &mut Criterion) {
    let mut group = c.benchmark_group("raise");

    for per_side in [1usize, 4, 7] {
        group.bench_with_input(BenchmarkId::from_parameter(per_side), &per_side, |b, &per_side| {
            b.iter_batched(
                || full_boards(per_side),
                |mut state| {
                    state.raise(
                        EventName::MinionDamaged,
                        EventPayload::for_player(PlayerId::new(0)).with_amount(1),
                    );
                    black_box(state)
                },
                criterion::BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn seeded_boards() -> GameState {
    let card = druid::treant().with_deathrattle(Deathrattle::new(
        Action::summon(druid::treant()),
        Selector::FriendlyPlayer,
    ));
    let mut state = GameState::new(GameConfig::default());
    for player in PlayerId::all(2) {
        for _ in 0..7 {
            state.summon(&card, player, None);
        }
    }
    state
}

fn bench_area_damage(c: &mut Criterion) {
    let caster = SelectorContext::new(EntityId::player(PlayerId::new(0)), PlayerId::new(0));

    c.bench_function("area_damage_with_deathrattles", |b| {
        b.iter_batched(
            seeded_boards,
            |mut state| {
                let targets = Selector::PlayerMinions(Side::Both).resolve(&state, &caster);
                state.apply_action(&Action::Damage { amount: 2 }, &caster.action_context(), &targets);
                black_box(state)
            },
            criterion::BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, bench_raise, bench_area_damage);
criterion_main!(benches);
