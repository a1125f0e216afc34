//! Card targeting.
//!
//! A `TargetRule` says which characters a card may be aimed at.
//! `find_targets` lists them; a card that needs a target must refuse to be
//! played when that list is empty, so `play` can assume one exists.
//!
//! Candidates are listed per player in seat order starting with the acting
//! player: hero first, then minions in board order. Minions already marked
//! dying are never offered.

use crate::core::{EntityId, GameState, PlayerId};

use super::selector::Side;

/// Custom legality predicate: `(state, acting player, candidate)`.
pub type TargetPredicate = fn(&GameState, PlayerId, EntityId) -> bool;

/// Which characters a card may target.
#[derive(Clone, Copy, Debug)]
pub enum TargetRule {
    /// Any character.
    SpellTarget,
    /// Any minion.
    MinionSpellTarget,
    /// Any enemy character.
    EnemySpellTarget,
    /// Any enemy minion.
    EnemyMinionSpellTarget,
    /// Any friendly minion.
    FriendlyMinionSpellTarget,
    /// Characters passing a predicate.
    Custom(TargetPredicate),
}

impl TargetRule {
    fn side(self) -> Side {
        match self {
            Self::EnemySpellTarget | Self::EnemyMinionSpellTarget => Side::Enemy,
            Self::FriendlyMinionSpellTarget => Side::Friendly,
            Self::SpellTarget | Self::MinionSpellTarget | Self::Custom(_) => Side::Both,
        }
    }

    fn allows_heroes(self) -> bool {
        matches!(
            self,
            Self::SpellTarget | Self::EnemySpellTarget | Self::Custom(_)
        )
    }

    fn accepts(self, state: &GameState, player: PlayerId, candidate: EntityId) -> bool {
        match self {
            Self::Custom(predicate) => predicate(state, player, candidate),
            _ => true,
        }
    }
}

/// Every legal target for `rule` from `player`'s point of view.
#[must_use]
pub fn find_targets(state: &GameState, rule: &TargetRule, player: PlayerId) -> Vec<EntityId> {
    let mut targets = Vec::new();
    for seat in rule.side().players(player, state.player_count()) {
        if rule.allows_heroes() {
            let hero = state.hero(seat);
            if !hero.dead && rule.accepts(state, player, hero.id) {
                targets.push(hero.id);
            }
        }
        targets.extend(
            state
                .minions_of(seat)
                .filter(|m| !m.dying && rule.accepts(state, player, m.id))
                .map(|m| m.id),
        );
    }
    targets
}

/// Whether `rule` has at least one legal target.
#[must_use]
pub fn has_targets(state: &GameState, rule: &TargetRule, player: PlayerId) -> bool {
    !find_targets(state, rule, player).is_empty()
}

/// Whether `candidate` is a legal target for `rule`.
#[must_use]
pub fn is_valid_target(state: &GameState, rule: &TargetRule, player: PlayerId, candidate: EntityId) -> bool {
    find_targets(state, rule, player).contains(&candidate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::MinionCard;
    use crate::core::GameConfig;

    fn p0() -> PlayerId {
        PlayerId::new(0)
    }

    fn p1() -> PlayerId {
        PlayerId::new(1)
    }

    fn setup() -> (GameState, EntityId, EntityId) {
        let mut state = GameState::new(GameConfig::default());
        let friendly = state.summon(&MinionCard::new("Ally", 1, 1, 1), p0(), None).unwrap();
        let enemy = state.summon(&MinionCard::new("Foe", 1, 1, 1), p1(), None).unwrap();
        (state, friendly, enemy)
    }

    #[test]
    fn test_spell_target_order() {
        let (state, friendly, enemy) = setup();

        let targets = find_targets(&state, &TargetRule::SpellTarget, p0());
        assert_eq!(targets, vec![EntityId(2), friendly, EntityId(3), enemy]);

        let from_enemy = find_targets(&state, &TargetRule::SpellTarget, p1());
        assert_eq!(from_enemy, vec![EntityId(3), enemy, EntityId(2), friendly]);
    }

    #[test]
    fn test_minion_rules() {
        let (state, friendly, enemy) = setup();

        assert_eq!(find_targets(&state, &TargetRule::MinionSpellTarget, p0()), vec![friendly, enemy]);
        assert_eq!(find_targets(&state, &TargetRule::EnemyMinionSpellTarget, p0()), vec![enemy]);
        assert_eq!(find_targets(&state, &TargetRule::FriendlyMinionSpellTarget, p0()), vec![friendly]);
        assert_eq!(find_targets(&state, &TargetRule::EnemySpellTarget, p0()), vec![EntityId(3), enemy]);
    }

    #[test]
    fn test_no_minions() {
        let state = GameState::new(GameConfig::default());

        assert!(!has_targets(&state, &TargetRule::MinionSpellTarget, p0()));
        assert!(has_targets(&state, &TargetRule::SpellTarget, p0()));
    }

    #[test]
    fn test_custom_rule() {
        let (mut state, friendly, _) = setup();
        state.increase_health(friendly, 4);
        let big = TargetRule::Custom(|state, _, candidate| {
            state.minion(candidate).is_some_and(|m| m.health >= 5)
        });

        assert_eq!(find_targets(&state, &big, p0()), vec![friendly]);
        assert!(is_valid_target(&state, &big, p0(), friendly));
        assert!(!is_valid_target(&state, &big, p0(), EntityId(2)));
    }
}
