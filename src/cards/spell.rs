//! Spell cards.
//!
//! A spell is metadata plus a plain function that resolves it. Factories in
//! card-set modules build them; nothing about a spell is captured at
//! construction time, so amounts that scale (spell damage, healing) are
//! computed inside `cast` from the `PlayContext`.

use crate::core::{GameState, PlayerId};
use crate::effects::{has_targets, TargetRule};
use crate::error::Result;

use super::card::{Card, PlayContext};
use super::definition::CardMeta;

/// Resolves a spell.
pub type CastFn = fn(&mut PlayContext<'_>) -> Result<()>;

/// Extra play condition beyond targeting.
pub type UsableFn = fn(&GameState, PlayerId) -> bool;

#[derive(Clone, Debug)]
pub struct SpellCard {
    pub meta: CardMeta,
    target: Option<TargetRule>,
    usable: Option<UsableFn>,
    cast: CastFn,
}

impl SpellCard {
    #[must_use]
    pub fn new(meta: CardMeta, cast: CastFn) -> Self {
        Self {
            meta,
            target: None,
            usable: None,
            cast,
        }
    }

    /// Require a target chosen under `rule` before casting.
    #[must_use]
    pub fn with_target(mut self, rule: TargetRule) -> Self {
        self.target = Some(rule);
        self
    }

    /// Require `usable` to hold before casting.
    #[must_use]
    pub fn with_requirement(mut self, usable: UsableFn) -> Self {
        self.usable = Some(usable);
        self
    }
}

impl Card for SpellCard {
    fn meta(&self) -> &CardMeta {
        &self.meta
    }

    fn target_rule(&self) -> Option<TargetRule> {
        self.target
    }

    fn can_use(&self, state: &GameState, player: PlayerId) -> bool {
        let targetable = self
            .target
            .map_or(true, |rule| has_targets(state, &rule, player));
        targetable && self.usable.map_or(true, |usable| usable(state, player))
    }

    fn play(&self, ctx: &mut PlayContext<'_>) -> Result<()> {
        (self.cast)(ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::FirstOptionAgent;
    use crate::cards::{CharacterClass, MinionCard, Rarity};
    use crate::core::GameConfig;
    use crate::effects::Action;

    fn p0() -> PlayerId {
        PlayerId::new(0)
    }

    fn ping() -> SpellCard {
        SpellCard::new(
            CardMeta::spell("Ping", 1, CharacterClass::Neutral, Rarity::Common),
            |ctx| {
                let target = ctx.target()?;
                let amount = ctx.spell_damage(1);
                ctx.act_on(&Action::Damage { amount }, &[target]);
                Ok(())
            },
        )
        .with_target(TargetRule::MinionSpellTarget)
    }

    #[test]
    fn test_target_requirement() {
        let mut state = GameState::new(GameConfig::default());
        let card = ping();

        assert!(!card.can_use(&state, p0()));
        state.summon(&MinionCard::new("Wisp", 0, 1, 1), PlayerId::new(1), None);
        assert!(card.can_use(&state, p0()));
    }

    #[test]
    fn test_extra_requirement() {
        let state = GameState::new(GameConfig::default());
        let card = SpellCard::new(
            CardMeta::spell("Never", 0, CharacterClass::Neutral, Rarity::Common),
            |_| Ok(()),
        )
        .with_requirement(|_, _| false);

        assert!(!card.can_use(&state, p0()));
    }

    #[test]
    fn test_cast_scales_damage() {
        let mut state = GameState::new(GameConfig::default());
        state.player_mut(p0()).spell_damage = 1;
        let target = state.summon(&MinionCard::new("Yeti", 4, 4, 5), PlayerId::new(1), None).unwrap();

        let mut agent = FirstOptionAgent;
        let mut ctx = PlayContext::new(&mut state, &mut agent, p0()).with_target(target);
        ping().play(&mut ctx).unwrap();

        assert_eq!(state.minion(target).unwrap().health, 3);
    }

    #[test]
    fn test_cast_without_target_fails() {
        let mut state = GameState::new(GameConfig::default());
        let mut agent = FirstOptionAgent;
        let mut ctx = PlayContext::new(&mut state, &mut agent, p0());

        assert!(ping().play(&mut ctx).is_err());
    }
}
