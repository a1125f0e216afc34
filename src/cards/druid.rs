//! The druid card set.
//!
//! Every card here is composed from the framework: selectors, actions,
//! effects and deathrattles, plus `resolve_choice` for "Choose One" cards.
//! Scaled amounts are read from the `PlayContext` at cast time.

use crate::core::{EntityId, GameState, MinionType, PlayerId};
use crate::effects::{Action, Deathrattle, Effect, Selector, Side, TargetRule};
use crate::error::Result;
use crate::triggers::Event;

use super::card::PlayContext;
use super::choice::{resolve_choice, Aim, ChoiceCard, Requirement};
use super::definition::{CardMeta, CharacterClass, Rarity};
use super::minion_card::MinionCard;
use super::registry::CardRegistry;
use super::spell::SpellCard;

fn druid_spell(name: &str, cost: i32, rarity: Rarity) -> CardMeta {
    CardMeta::spell(name, cost, CharacterClass::Druid, rarity)
}

fn enemy_has_minions(state: &GameState, player: PlayerId) -> bool {
    Side::Enemy
        .players(player, state.player_count())
        .any(|enemy| state.board_len(enemy) > 0)
}

/// Register every druid card.
pub fn register(registry: &mut CardRegistry) {
    registry.register(|| Box::new(innervate()));
    registry.register(|| Box::new(moonfire()));
    registry.register(|| Box::new(claw()));
    registry.register(|| Box::new(naturalize()));
    registry.register(|| Box::new(savagery()));
    registry.register(|| Box::new(mark_of_the_wild()));
    registry.register(|| Box::new(power_of_the_wild()));
    registry.register(|| Box::new(wild_growth()));
    registry.register(|| Box::new(excess_mana()));
    registry.register(|| Box::new(wrath()));
    registry.register(|| Box::new(healing_touch()));
    registry.register(|| Box::new(mark_of_nature()));
    registry.register(|| Box::new(savage_roar()));
    registry.register(|| Box::new(bite()));
    registry.register(|| Box::new(treant()));
    registry.register(|| Box::new(soul_of_the_forest()));
    registry.register(|| Box::new(swipe()));
    registry.register(|| Box::new(nourish()));
    registry.register(|| Box::new(starfall()));
    registry.register(|| Box::new(force_of_nature()));
    registry.register(|| Box::new(starfire()));
    registry.register(|| Box::new(poison_seeds()));
    registry.register(|| Box::new(dark_wispers()));
    registry.register(|| Box::new(recycle()));
}

// === Tokens ===

/// 2/2 Treant.
#[must_use]
pub fn treant() -> MinionCard {
    MinionCard::new("Treant", 1, 2, 2).with_class(CharacterClass::Druid)
}

#[must_use]
pub fn panther() -> MinionCard {
    MinionCard::new("Panther", 2, 3, 2)
        .with_class(CharacterClass::Druid)
        .with_rarity(Rarity::Special)
        .with_type(MinionType::Beast)
}

#[must_use]
pub fn wisp() -> MinionCard {
    MinionCard::new("Wisp", 0, 1, 1)
}

/// Charging Treant that destroys itself at the end of its controller's turn.
#[must_use]
pub fn charging_treant() -> MinionCard {
    treant()
        .with_rarity(Rarity::Special)
        .with_charge()
        .with_effect(Effect::new(Event::turn_ended(), Action::Kill, Selector::Owner))
}

// === Simple spells ===

#[must_use]
pub fn innervate() -> SpellCard {
    SpellCard::new(druid_spell("Innervate", 0, Rarity::Free), |ctx| {
        ctx.act(&Action::GainMana { amount: 2 }, &Selector::FriendlyPlayer);
        Ok(())
    })
}

#[must_use]
pub fn moonfire() -> SpellCard {
    SpellCard::new(druid_spell("Moonfire", 0, Rarity::Common), |ctx| {
        let target = ctx.target()?;
        let amount = ctx.spell_damage(1);
        ctx.act_on(&Action::Damage { amount }, &[target]);
        Ok(())
    })
    .with_target(TargetRule::SpellTarget)
}

#[must_use]
pub fn claw() -> SpellCard {
    SpellCard::new(druid_spell("Claw", 1, Rarity::Free), |ctx| {
        let action = Action::Batch(vec![
            Action::ChangeTempAttack { amount: 2 },
            Action::IncreaseArmor { amount: 2 },
        ]);
        ctx.act(&action, &Selector::FriendlyHero);
        Ok(())
    })
}

/// Destroy a minion. The opponent draws two cards.
#[must_use]
pub fn naturalize() -> SpellCard {
    SpellCard::new(druid_spell("Naturalize", 1, Rarity::Common), |ctx| {
        let target = ctx.target()?;
        ctx.act_on(&Action::Kill, &[target]);
        let opponent = EntityId::player(ctx.opponent());
        ctx.act_on(&Action::Draw { count: 2 }, &[opponent]);
        Ok(())
    })
    .with_target(TargetRule::MinionSpellTarget)
}

/// Deal damage equal to the hero's attack to a minion.
#[must_use]
pub fn savagery() -> SpellCard {
    SpellCard::new(druid_spell("Savagery", 1, Rarity::Rare), |ctx| {
        let target = ctx.target()?;
        let attack = ctx.state.hero(ctx.player).calculate_attack();
        let amount = ctx.spell_damage(attack);
        ctx.act_on(&Action::Damage { amount }, &[target]);
        Ok(())
    })
    .with_target(TargetRule::MinionSpellTarget)
}

#[must_use]
pub fn mark_of_the_wild() -> SpellCard {
    SpellCard::new(druid_spell("Mark of the Wild", 2, Rarity::Free), |ctx| {
        let target = ctx.target()?;
        ctx.act_on(&Action::Batch(vec![Action::buff(2, 2), Action::GiveTaunt]), &[target]);
        Ok(())
    })
    .with_target(TargetRule::MinionSpellTarget)
}

/// Gain an empty mana crystal, or an Excess Mana card when already at the cap.
#[must_use]
pub fn wild_growth() -> SpellCard {
    SpellCard::new(druid_spell("Wild Growth", 2, Rarity::Free), |ctx| {
        let cap = ctx.state.config().max_mana;
        if ctx.state.player(ctx.player).max_mana < cap {
            ctx.act(
                &Action::GainManaCrystals { amount: 1, filled: false },
                &Selector::FriendlyPlayer,
            );
        } else {
            ctx.state.add_to_hand(ctx.player, Box::new(excess_mana()));
        }
        Ok(())
    })
}

#[must_use]
pub fn excess_mana() -> SpellCard {
    SpellCard::new(druid_spell("Excess Mana", 0, Rarity::Special), |ctx| {
        ctx.act(&Action::Draw { count: 1 }, &Selector::FriendlyPlayer);
        Ok(())
    })
}

#[must_use]
pub fn healing_touch() -> SpellCard {
    SpellCard::new(druid_spell("Healing Touch", 3, Rarity::Free), |ctx| {
        let target = ctx.target()?;
        let amount = ctx.heal_power(8);
        ctx.act_on(&Action::Heal { amount }, &[target]);
        Ok(())
    })
    .with_target(TargetRule::SpellTarget)
}

/// +2 attack this turn to every friendly character.
#[must_use]
pub fn savage_roar() -> SpellCard {
    SpellCard::new(druid_spell("Savage Roar", 3, Rarity::Common), |ctx| {
        ctx.act(
            &Action::ChangeTempAttack { amount: 2 },
            &Selector::Characters(Side::Friendly),
        );
        Ok(())
    })
}

#[must_use]
pub fn bite() -> SpellCard {
    SpellCard::new(druid_spell("Bite", 4, Rarity::Rare), |ctx| {
        let action = Action::Batch(vec![
            Action::ChangeTempAttack { amount: 4 },
            Action::IncreaseArmor { amount: 4 },
        ]);
        ctx.act(&action, &Selector::FriendlyHero);
        Ok(())
    })
}

/// Friendly minions gain "Deathrattle: summon a 2/2 Treant". Repeated casts
/// stack.
#[must_use]
pub fn soul_of_the_forest() -> SpellCard {
    SpellCard::new(druid_spell("Soul of the Forest", 4, Rarity::Common), |ctx| {
        let deathrattle = Deathrattle::new(Action::summon(treant()), Selector::FriendlyPlayer);
        ctx.act(
            &Action::add_deathrattle(deathrattle),
            &Selector::PlayerMinions(Side::Friendly),
        );
        Ok(())
    })
}

/// 4 damage to an enemy, 1 to every other enemy character.
///
/// Spell damage boosts the splash but not the primary hit.
#[must_use]
pub fn swipe() -> SpellCard {
    SpellCard::new(druid_spell("Swipe", 4, Rarity::Common), |ctx| {
        let target = ctx.target()?;
        let splash: Vec<EntityId> = ctx
            .select(&Selector::Characters(Side::Enemy))
            .into_iter()
            .filter(|&other| other != target)
            .collect();
        let secondary = ctx.spell_damage(1);
        ctx.act_on(&Action::Damage { amount: 4 }, &[target]);
        ctx.act_on(&Action::Damage { amount: secondary }, &splash);
        Ok(())
    })
    .with_target(TargetRule::EnemySpellTarget)
}

/// Summon three charging Treants that die at the end of the turn.
#[must_use]
pub fn force_of_nature() -> SpellCard {
    SpellCard::new(druid_spell("Force of Nature", 6, Rarity::Epic), |ctx| {
        let summon = Action::summon(charging_treant());
        for _ in 0..3 {
            ctx.act(&summon, &Selector::FriendlyPlayer);
        }
        Ok(())
    })
    .with_requirement(|state, player| state.board_has_room(player))
}

#[must_use]
pub fn starfire() -> SpellCard {
    SpellCard::new(druid_spell("Starfire", 6, Rarity::Common), |ctx| {
        let target = ctx.target()?;
        let amount = ctx.spell_damage(5);
        ctx.act_on(&Action::Damage { amount }, &[target]);
        ctx.act(&Action::Draw { count: 1 }, &Selector::FriendlyPlayer);
        Ok(())
    })
    .with_target(TargetRule::SpellTarget)
}

/// Destroy every minion, then each owner gets a 2/2 Treant per minion lost.
#[must_use]
pub fn poison_seeds() -> SpellCard {
    SpellCard::new(druid_spell("Poison Seeds", 4, Rarity::Common), |ctx| {
        let doomed = ctx.select(&Selector::PlayerMinions(Side::Both));
        let owners: Vec<PlayerId> = doomed
            .iter()
            .filter_map(|&minion| ctx.state.controller_of(minion))
            .collect();

        ctx.act_on(&Action::Kill, &doomed);
        // Deaths must clear the board before the Treants arrive.
        ctx.state.check_delayed();

        let seedling = MinionCard::new("Treant", 2, 2, 2)
            .with_class(CharacterClass::Druid)
            .with_rarity(Rarity::Special);
        let summon = Action::summon(seedling);
        for owner in owners {
            ctx.act_on(&summon, &[EntityId::player(owner)]);
        }
        Ok(())
    })
}

/// Shuffle an enemy minion back into its owner's deck.
#[must_use]
pub fn recycle() -> SpellCard {
    SpellCard::new(druid_spell("Recycle", 6, Rarity::Rare), |ctx| {
        let target = ctx.target()?;
        if let Some((minion, _)) = ctx.state.remove_from_board(target) {
            ctx.state.put_back(minion.owner, Box::new(minion.card));
        }
        Ok(())
    })
    .with_target(TargetRule::EnemyMinionSpellTarget)
}

// === Choose One ===

#[must_use]
pub fn power_of_the_wild() -> SpellCard {
    SpellCard::new(druid_spell("Power of the Wild", 2, Rarity::Common), cast_power_of_the_wild)
}

fn cast_power_of_the_wild(ctx: &mut PlayContext<'_>) -> Result<()> {
    let options = vec![
        ChoiceCard::new("Leader of the Pack").then(
            Aim::Select(Selector::PlayerMinions(Side::Friendly)),
            Action::buff(1, 1),
        ),
        ChoiceCard::new("Summon a Panther")
            .requires(Requirement::BoardHasRoom)
            .then(Aim::Select(Selector::FriendlyPlayer), Action::summon(panther())),
    ];
    resolve_choice(ctx, options)
}

#[must_use]
pub fn wrath() -> SpellCard {
    SpellCard::new(druid_spell("Wrath", 2, Rarity::Common), cast_wrath)
        .with_target(TargetRule::MinionSpellTarget)
}

fn cast_wrath(ctx: &mut PlayContext<'_>) -> Result<()> {
    let options = vec![
        ChoiceCard::new("Wrath: 3 damage")
            .requires(Requirement::ParentTarget)
            .then(Aim::ParentTarget, Action::Damage { amount: ctx.spell_damage(3) }),
        ChoiceCard::new("Wrath: 1 damage and draw")
            .requires(Requirement::ParentTarget)
            .then(Aim::ParentTarget, Action::Damage { amount: ctx.spell_damage(1) })
            .then(Aim::Select(Selector::FriendlyPlayer), Action::Draw { count: 1 }),
    ];
    resolve_choice(ctx, options)
}

#[must_use]
pub fn mark_of_nature() -> SpellCard {
    SpellCard::new(druid_spell("Mark of Nature", 3, Rarity::Common), cast_mark_of_nature)
        .with_target(TargetRule::MinionSpellTarget)
}

fn cast_mark_of_nature(ctx: &mut PlayContext<'_>) -> Result<()> {
    let options = vec![
        ChoiceCard::new("Tiger's Fury")
            .requires(Requirement::ParentTarget)
            .then(Aim::ParentTarget, Action::ChangeAttack { amount: 4 }),
        ChoiceCard::new("Thick Hide")
            .requires(Requirement::ParentTarget)
            .then(
                Aim::ParentTarget,
                Action::Batch(vec![Action::IncreaseHealth { amount: 4 }, Action::GiveTaunt]),
            ),
    ];
    resolve_choice(ctx, options)
}

#[must_use]
pub fn nourish() -> SpellCard {
    SpellCard::new(druid_spell("Nourish", 5, Rarity::Rare), cast_nourish)
}

fn cast_nourish(ctx: &mut PlayContext<'_>) -> Result<()> {
    let options = vec![
        ChoiceCard::new("Rampant Growth").then(
            Aim::Select(Selector::FriendlyPlayer),
            Action::GainManaCrystals { amount: 2, filled: true },
        ),
        ChoiceCard::new("Enrich").then(Aim::Select(Selector::FriendlyPlayer), Action::Draw { count: 3 }),
    ];
    resolve_choice(ctx, options)
}

#[must_use]
pub fn starfall() -> SpellCard {
    SpellCard::new(druid_spell("Starfall", 5, Rarity::Rare), cast_starfall)
        .with_requirement(enemy_has_minions)
}

fn cast_starfall(ctx: &mut PlayContext<'_>) -> Result<()> {
    let options = vec![
        ChoiceCard::new("Starlord").then(
            Aim::Select(Selector::PlayerMinions(Side::Enemy)),
            Action::Damage { amount: ctx.spell_damage(2) },
        ),
        ChoiceCard::new("Stellar Drift")
            .requires(Requirement::Target(TargetRule::MinionSpellTarget))
            .then(Aim::ChosenTarget, Action::Damage { amount: ctx.spell_damage(5) }),
    ];
    resolve_choice(ctx, options)
}

#[must_use]
pub fn dark_wispers() -> SpellCard {
    SpellCard::new(druid_spell("Dark Wispers", 6, Rarity::Epic), cast_dark_wispers)
}

fn cast_dark_wispers(ctx: &mut PlayContext<'_>) -> Result<()> {
    let mut wisps = ChoiceCard::new("Call the Wisps").requires(Requirement::BoardHasRoom);
    for _ in 0..5 {
        wisps = wisps.then(Aim::Select(Selector::FriendlyPlayer), Action::summon(wisp()));
    }
    let options = vec![
        wisps,
        ChoiceCard::new("Embolden")
            .requires(Requirement::Target(TargetRule::MinionSpellTarget))
            .then(
                Aim::ChosenTarget,
                Action::Batch(vec![Action::buff(5, 5), Action::GiveTaunt]),
            ),
    ];
    resolve_choice(ctx, options)
}
