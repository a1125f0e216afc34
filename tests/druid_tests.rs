//! Druid card integration tests.
//!
//! Each card is played through `Game::play_card`, so cost, targeting,
//! choice resolution and the death sweep all run as in a real game.

use card_engine::cards::druid;
use card_engine::{
    Card, EngineError, EntityId, Game, GameConfig, MinionCard, PlayerId, Result, ScriptedAgent,
};

fn p0() -> PlayerId {
    PlayerId::new(0)
}

fn p1() -> PlayerId {
    PlayerId::new(1)
}

fn filler(n: usize) -> Vec<Box<dyn Card>> {
    (0..n)
        .map(|_| Box::new(MinionCard::new("Filler", 1, 1, 1)) as Box<dyn Card>)
        .collect()
}

/// A fresh game on player 0's first turn with ten mana to spend.
fn game(agent: ScriptedAgent) -> Game {
    let mut game = Game::new(
        GameConfig::default(),
        vec![filler(20), filler(20)],
        vec![Box::new(agent), Box::new(ScriptedAgent::new())],
    );
    game.state.player_mut(p0()).mana = 10;
    game
}

fn play(game: &mut Game, card: impl Card + 'static) -> Result<()> {
    game.state.add_to_hand(p0(), Box::new(card));
    let index = game.state.player(p0()).hand().len() - 1;
    game.play_card(index)
}

fn summon(game: &mut Game, player: PlayerId, attack: i32, health: i32) -> EntityId {
    let card = MinionCard::new(format!("{attack}/{health}"), 1, attack, health);
    game.state.summon(&card, player, None).unwrap()
}

fn names(game: &Game, player: PlayerId) -> Vec<String> {
    game.state.minions_of(player).map(|m| m.name().to_string()).collect()
}

// =============================================================================
// Mana
// =============================================================================

#[test]
fn test_innervate() {
    let mut game = game(ScriptedAgent::new());
    game.state.player_mut(p0()).mana = 3;

    play(&mut game, druid::innervate()).unwrap();

    assert_eq!(game.state.player(p0()).mana, 5);
}

#[test]
fn test_wild_growth_gains_empty_crystal() {
    let mut game = game(ScriptedAgent::new());

    play(&mut game, druid::wild_growth()).unwrap();

    assert_eq!(game.state.player(p0()).max_mana, 2);
    assert_eq!(game.state.player(p0()).mana, 8);
}

#[test]
fn test_wild_growth_at_cap_gives_excess_mana() {
    let mut game = game(ScriptedAgent::new());
    game.state.player_mut(p0()).max_mana = 10;

    play(&mut game, druid::wild_growth()).unwrap();

    let hand = game.state.player(p0()).hand();
    assert_eq!(hand.last().unwrap().meta().name, "Excess Mana");

    let before = hand.len();
    game.play_card(before - 1).unwrap();
    // Excess Mana is spent and replaced by a draw.
    assert_eq!(game.state.player(p0()).hand().len(), before);
}

#[test]
fn test_nourish_crystals() {
    let mut game = game(ScriptedAgent::new().with_options([0]));
    game.state.player_mut(p0()).mana = 5;

    play(&mut game, druid::nourish()).unwrap();

    assert_eq!(game.state.player(p0()).max_mana, 3);
    assert_eq!(game.state.player(p0()).mana, 2);
}

#[test]
fn test_nourish_draw() {
    let mut game = game(ScriptedAgent::new().with_options([1]));
    let before = game.state.player(p0()).hand().len();

    play(&mut game, druid::nourish()).unwrap();

    assert_eq!(game.state.player(p0()).hand().len(), before + 3);
}

// =============================================================================
// Damage
// =============================================================================

#[test]
fn test_moonfire_scales_with_spell_damage() {
    let enemy_hero = EntityId::hero(p1(), 2);
    let mut game = game(ScriptedAgent::new().with_targets([enemy_hero, enemy_hero]));

    play(&mut game, druid::moonfire()).unwrap();
    assert_eq!(game.state.hero(p1()).health, 29);

    game.state.player_mut(p0()).spell_damage = 1;
    play(&mut game, druid::moonfire()).unwrap();
    assert_eq!(game.state.hero(p1()).health, 27);
}

#[test]
fn test_savagery_uses_hero_attack() {
    let target = EntityId(4);
    let mut game = game(ScriptedAgent::new().with_targets([target]));
    summon(&mut game, p1(), 1, 5);

    play(&mut game, druid::claw()).unwrap();
    play(&mut game, druid::savagery()).unwrap();

    assert_eq!(game.state.minion(target).unwrap().health, 3);
}

#[test]
fn test_swipe() {
    let primary = EntityId(4);
    let mut game = game(ScriptedAgent::new().with_targets([primary]));
    let target = summon(&mut game, p1(), 1, 5);
    let other = summon(&mut game, p1(), 1, 2);
    let friendly = summon(&mut game, p0(), 1, 2);
    assert_eq!(target, primary);

    play(&mut game, druid::swipe()).unwrap();

    assert_eq!(game.state.minion(target).unwrap().health, 1);
    assert_eq!(game.state.minion(other).unwrap().health, 1);
    assert_eq!(game.state.hero(p1()).health, 29);
    assert_eq!(game.state.minion(friendly).unwrap().health, 2);
    assert_eq!(game.state.hero(p0()).health, 30);
}

#[test]
fn test_swipe_on_hero_hits_it_once() {
    let enemy_hero = EntityId::hero(p1(), 2);
    let mut game = game(ScriptedAgent::new().with_targets([enemy_hero]));
    let minion = summon(&mut game, p1(), 1, 3);

    play(&mut game, druid::swipe()).unwrap();

    assert_eq!(game.state.hero(p1()).health, 26);
    assert_eq!(game.state.minion(minion).unwrap().health, 2);
}

#[test]
fn test_swipe_spell_damage_boosts_splash_only() {
    let primary = EntityId(4);
    let mut game = game(ScriptedAgent::new().with_targets([primary]));
    game.state.player_mut(p0()).spell_damage = 1;
    let target = summon(&mut game, p1(), 1, 6);
    let other = summon(&mut game, p1(), 1, 3);

    play(&mut game, druid::swipe()).unwrap();

    assert_eq!(game.state.minion(target).unwrap().health, 2);
    assert_eq!(game.state.minion(other).unwrap().health, 1);
    assert_eq!(game.state.hero(p1()).health, 28);
}

#[test]
fn test_starfire_damages_and_draws() {
    let enemy_hero = EntityId::hero(p1(), 2);
    let mut game = game(ScriptedAgent::new().with_targets([enemy_hero]));
    let before = game.state.player(p0()).hand().len();

    play(&mut game, druid::starfire()).unwrap();

    assert_eq!(game.state.hero(p1()).health, 25);
    assert_eq!(game.state.player(p0()).hand().len(), before + 1);
}

#[test]
fn test_wrath_three_damage() {
    let target = EntityId(4);
    let mut game = game(ScriptedAgent::new().with_targets([target]).with_options([0]));
    summon(&mut game, p1(), 1, 4);

    play(&mut game, druid::wrath()).unwrap();

    assert_eq!(game.state.minion(target).unwrap().health, 1);
}

#[test]
fn test_wrath_one_damage_and_draw() {
    let target = EntityId(4);
    let mut game = game(ScriptedAgent::new().with_targets([target]).with_options([1]));
    summon(&mut game, p1(), 1, 4);
    let before = game.state.player(p0()).hand().len();

    play(&mut game, druid::wrath()).unwrap();

    assert_eq!(game.state.minion(target).unwrap().health, 3);
    assert_eq!(game.state.player(p0()).hand().len(), before + 1);
}

#[test]
#[should_panic(expected = "agent chose option 7 but only 2 were offered")]
fn test_wrath_out_of_range_option_panics() {
    let target = EntityId(4);
    let mut game = game(ScriptedAgent::new().with_targets([target]).with_options([7]));
    summon(&mut game, p1(), 1, 4);

    let _ = play(&mut game, druid::wrath());
}

#[test]
#[should_panic(expected = "agent chose option 9 but only 2 were offered")]
fn test_nourish_out_of_range_option_panics() {
    let mut game = game(ScriptedAgent::new().with_options([9]));

    let _ = play(&mut game, druid::nourish());
}

#[test]
fn test_starfall_needs_enemy_minions() {
    let mut game = game(ScriptedAgent::new());
    summon(&mut game, p0(), 1, 1);

    let result = play(&mut game, druid::starfall());

    assert!(matches!(result, Err(EngineError::IllegalPlay(_))));
    assert_eq!(game.state.player(p0()).mana, 10);
}

#[test]
fn test_starfall_area() {
    let mut game = game(ScriptedAgent::new().with_options([0]));
    let a = summon(&mut game, p1(), 1, 3);
    let b = summon(&mut game, p1(), 1, 2);
    let own = summon(&mut game, p0(), 1, 3);

    play(&mut game, druid::starfall()).unwrap();

    assert_eq!(game.state.minion(a).unwrap().health, 1);
    assert!(!game.state.is_in_play(b));
    assert_eq!(game.state.minion(own).unwrap().health, 3);
}

#[test]
fn test_starfall_single_target() {
    let mut game = game(ScriptedAgent::new().with_options([1]).with_targets([EntityId(5)]));
    let a = summon(&mut game, p1(), 1, 6);
    let b = summon(&mut game, p1(), 1, 6);
    assert_eq!(b, EntityId(5));

    play(&mut game, druid::starfall()).unwrap();

    assert_eq!(game.state.minion(a).unwrap().health, 6);
    assert_eq!(game.state.minion(b).unwrap().health, 1);
}

// =============================================================================
// Buffs and healing
// =============================================================================

#[test]
fn test_claw_and_bite_expire_at_end_of_turn() {
    let mut game = game(ScriptedAgent::new());

    play(&mut game, druid::claw()).unwrap();
    play(&mut game, druid::bite()).unwrap();

    let hero = game.state.hero(p0());
    assert_eq!((hero.temp_attack, hero.armor), (6, 6));
    assert_eq!(hero.calculate_attack(), 6);

    game.end_turn().unwrap();
    let hero = game.state.hero(p0());
    assert_eq!((hero.temp_attack, hero.armor), (0, 6));
}

#[test]
fn test_mark_of_the_wild() {
    let target = EntityId(4);
    let mut game = game(ScriptedAgent::new().with_targets([target]));
    summon(&mut game, p0(), 1, 1);

    play(&mut game, druid::mark_of_the_wild()).unwrap();

    let minion = game.state.minion(target).unwrap();
    assert_eq!((minion.attack, minion.health, minion.max_health), (3, 3, 3));
    assert!(minion.taunt);
}

#[test]
fn test_mark_of_nature_options() {
    let target = EntityId(4);
    let mut game = game(
        ScriptedAgent::new()
            .with_targets([target, target])
            .with_options([0, 1]),
    );
    summon(&mut game, p0(), 1, 1);

    play(&mut game, druid::mark_of_nature()).unwrap();
    let minion = game.state.minion(target).unwrap();
    assert_eq!((minion.attack, minion.health), (5, 1));
    assert!(!minion.taunt);

    play(&mut game, druid::mark_of_nature()).unwrap();
    let minion = game.state.minion(target).unwrap();
    assert_eq!((minion.attack, minion.health), (5, 5));
    assert!(minion.taunt);
}

#[test]
fn test_healing_touch_clamps() {
    let own_hero = EntityId::hero(p0(), 2);
    let mut game = game(ScriptedAgent::new().with_targets([own_hero, own_hero]));
    game.state.damage(own_hero, own_hero, 10);

    play(&mut game, druid::healing_touch()).unwrap();
    assert_eq!(game.state.hero(p0()).health, 28);

    play(&mut game, druid::healing_touch()).unwrap();
    assert_eq!(game.state.hero(p0()).health, 30);
}

#[test]
fn test_savage_roar() {
    let mut game = game(ScriptedAgent::new());
    let own = summon(&mut game, p0(), 1, 1);
    let enemy = summon(&mut game, p1(), 1, 1);

    play(&mut game, druid::savage_roar()).unwrap();

    assert_eq!(game.state.minion(own).unwrap().calculate_attack(), 3);
    assert_eq!(game.state.minion(enemy).unwrap().calculate_attack(), 1);
    assert_eq!(game.state.hero(p0()).calculate_attack(), 2);
}

// =============================================================================
// Choices
// =============================================================================

#[test]
fn test_power_of_the_wild_options() {
    let mut game = game(ScriptedAgent::new().with_options([0, 1]));
    let own = summon(&mut game, p0(), 1, 1);

    play(&mut game, druid::power_of_the_wild()).unwrap();
    let minion = game.state.minion(own).unwrap();
    assert_eq!((minion.attack, minion.health), (2, 2));

    play(&mut game, druid::power_of_the_wild()).unwrap();
    assert_eq!(names(&game, p0()), vec!["1/1", "Panther"]);
}

/// A full board removes the summon option; the buff is picked without
/// asking.
#[test]
fn test_power_of_the_wild_full_board() {
    let mut game = game(ScriptedAgent::new().with_options([1]));
    for _ in 0..7 {
        summon(&mut game, p0(), 1, 1);
    }

    play(&mut game, druid::power_of_the_wild()).unwrap();

    assert_eq!(game.state.board_len(p0()), 7);
    assert!(game.state.minions_of(p0()).all(|m| m.attack == 2 && m.health == 2));
}

#[test]
fn test_dark_wispers_summons_wisps() {
    let mut game = game(ScriptedAgent::new().with_options([0]));
    summon(&mut game, p1(), 1, 1);

    play(&mut game, druid::dark_wispers()).unwrap();

    assert_eq!(names(&game, p0()), vec!["Wisp"; 5]);
}

#[test]
fn test_dark_wispers_stops_at_full_board() {
    let mut game = game(ScriptedAgent::new().with_options([0]));
    for _ in 0..5 {
        summon(&mut game, p0(), 1, 1);
    }

    play(&mut game, druid::dark_wispers()).unwrap();

    assert_eq!(game.state.board_len(p0()), 7);
}

#[test]
fn test_dark_wispers_buff() {
    let target = EntityId(4);
    let mut game = game(ScriptedAgent::new().with_options([1]).with_targets([target]));
    summon(&mut game, p1(), 1, 1);

    play(&mut game, druid::dark_wispers()).unwrap();

    let minion = game.state.minion(target).unwrap();
    assert_eq!((minion.attack, minion.health), (6, 6));
    assert!(minion.taunt);
    assert_eq!(game.state.board_len(p0()), 0);
}

// =============================================================================
// Board
// =============================================================================

#[test]
fn test_naturalize() {
    let target = EntityId(4);
    let mut game = game(ScriptedAgent::new().with_targets([target]));
    summon(&mut game, p1(), 5, 5);
    let before = game.state.player(p1()).hand().len();

    play(&mut game, druid::naturalize()).unwrap();

    assert!(!game.state.is_in_play(target));
    assert_eq!(game.state.player(p1()).hand().len(), before + 2);
}

#[test]
fn test_soul_of_the_forest_stacks() {
    let mut game = game(ScriptedAgent::new());
    let own = summon(&mut game, p0(), 1, 1);
    let enemy = summon(&mut game, p1(), 1, 1);

    play(&mut game, druid::soul_of_the_forest()).unwrap();
    play(&mut game, druid::soul_of_the_forest()).unwrap();
    assert_eq!(game.state.minion(own).unwrap().deathrattles.len(), 2);
    assert!(game.state.minion(enemy).unwrap().deathrattles.is_empty());

    game.state.kill(own);

    assert_eq!(names(&game, p0()), vec!["Treant", "Treant"]);
}

#[test]
fn test_force_of_nature() {
    let mut game = game(ScriptedAgent::new());

    play(&mut game, druid::force_of_nature()).unwrap();
    assert_eq!(names(&game, p0()), vec!["Treant"; 3]);
    assert!(game.state.minions_of(p0()).all(|m| m.charge));

    game.end_turn().unwrap();
    assert_eq!(game.state.board_len(p0()), 0);
}

#[test]
fn test_poison_seeds() {
    let mut game = game(ScriptedAgent::new());
    summon(&mut game, p0(), 1, 1);
    summon(&mut game, p0(), 3, 3);
    summon(&mut game, p1(), 5, 5);

    play(&mut game, druid::poison_seeds()).unwrap();

    assert_eq!(names(&game, p0()), vec!["Treant"; 2]);
    assert_eq!(names(&game, p1()), vec!["Treant"]);
    assert!(game.state.minions_of(p1()).all(|m| m.health == 2));
}

#[test]
fn test_recycle() {
    let target = EntityId(4);
    let mut game = game(ScriptedAgent::new().with_targets([target]));
    summon(&mut game, p1(), 4, 5);
    let before = game.state.player(p1()).deck_size();

    play(&mut game, druid::recycle()).unwrap();

    assert!(!game.state.is_in_play(target));
    assert_eq!(game.state.player(p1()).deck_size(), before + 1);
    assert!(game.state.player(p1()).deck_names().any(|name| name == "4/5"));
}

#[test]
fn test_treant_is_a_plain_minion() {
    let mut game = game(ScriptedAgent::new());

    play(&mut game, druid::treant()).unwrap();

    assert_eq!(names(&game, p0()), vec!["Treant"]);
    assert_eq!(game.state.player(p0()).mana, 9);
}
