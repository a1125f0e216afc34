//! Trigger conditions.
//!
//! A condition is an optional predicate on an `Event` arm, evaluated
//! against the raised payload and the current state at fire time. Most
//! conditions inspect the payload's subject; a subject that has left play
//! fails every entity test.

use serde::{Deserialize, Serialize};

use crate::core::{EntityId, EntityKind, GameState, MinionType};

use super::event::EventPayload;

/// A predicate an event must satisfy for its effect to fire.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Condition {
    // === Subject Filters ===

    /// Subject is a minion in play.
    IsMinion,

    /// Subject is a hero.
    IsHero,

    /// Subject is a minion of the given type.
    IsType(MinionType),

    /// Subject is a damaged character.
    IsDamaged,

    /// Subject's attack is at most N.
    AttackAtMost(i32),

    /// Subject is not the effect's owner ("another minion").
    NotOwner,

    // === Payload Filters ===

    /// The event's other entity is the effect's owner.
    OtherIsOwner,

    /// The event's amount is at least N.
    AmountAtLeast(i32),

    // === Combinators ===

    All(Vec<Condition>),
    Any(Vec<Condition>),
    Not(Box<Condition>),
}

impl Condition {
    /// AND of several conditions.
    pub fn all(conditions: impl IntoIterator<Item = Condition>) -> Self {
        Self::All(conditions.into_iter().collect())
    }

    /// OR of several conditions.
    pub fn any(conditions: impl IntoIterator<Item = Condition>) -> Self {
        Self::Any(conditions.into_iter().collect())
    }

    /// Negate this condition.
    #[must_use]
    pub fn negate(self) -> Self {
        Self::Not(Box::new(self))
    }

    /// Evaluate against a raised event for an effect owned by `owner`.
    #[must_use]
    pub fn evaluate(&self, state: &GameState, owner: EntityId, payload: &EventPayload) -> bool {
        let subject = payload.subject;
        match self {
            Self::IsMinion => subject.and_then(|s| state.kind_of(s)) == Some(EntityKind::Minion),
            Self::IsHero => matches!(subject.and_then(|s| state.kind_of(s)), Some(EntityKind::Hero(_))),
            Self::IsType(minion_type) => subject
                .and_then(|s| state.minion(s))
                .is_some_and(|m| m.minion_type == *minion_type),
            Self::IsDamaged => subject.is_some_and(|s| Self::is_damaged(state, s)),
            Self::AttackAtMost(max) => subject
                .and_then(|s| state.minion(s))
                .is_some_and(|m| m.calculate_attack() <= *max),
            Self::NotOwner => subject != Some(owner),
            Self::OtherIsOwner => payload.other == Some(owner),
            Self::AmountAtLeast(min) => payload.amount >= *min,
            Self::All(conditions) => conditions.iter().all(|c| c.evaluate(state, owner, payload)),
            Self::Any(conditions) => conditions.iter().any(|c| c.evaluate(state, owner, payload)),
            Self::Not(inner) => !inner.evaluate(state, owner, payload),
        }
    }

    fn is_damaged(state: &GameState, entity: EntityId) -> bool {
        match state.kind_of(entity) {
            Some(EntityKind::Hero(player)) => {
                let hero = state.hero(player);
                hero.health < hero.max_health
            }
            Some(EntityKind::Minion) => state
                .minion(entity)
                .is_some_and(|m| m.health < m.max_health),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::MinionCard;
    use crate::core::{GameConfig, PlayerId};

    fn setup() -> (GameState, EntityId) {
        let mut state = GameState::new(GameConfig::default());
        let card = MinionCard::new("River Crocolisk", 2, 2, 3).with_type(MinionType::Beast);
        let id = state.summon(&card, PlayerId::new(0), None).unwrap();
        (state, id)
    }

    #[test]
    fn test_subject_kind() {
        let (state, minion) = setup();
        let on_minion = EventPayload::new(PlayerId::new(0)).with_subject(minion);
        let on_hero = EventPayload::new(PlayerId::new(0)).with_subject(EntityId(2));

        assert!(Condition::IsMinion.evaluate(&state, EntityId(0), &on_minion));
        assert!(!Condition::IsMinion.evaluate(&state, EntityId(0), &on_hero));
        assert!(Condition::IsHero.evaluate(&state, EntityId(0), &on_hero));
        assert!(Condition::IsType(MinionType::Beast).evaluate(&state, EntityId(0), &on_minion));
        assert!(!Condition::IsType(MinionType::Murloc).evaluate(&state, EntityId(0), &on_minion));
    }

    #[test]
    fn test_subject_left_play() {
        let (state, _) = setup();
        let gone = EventPayload::new(PlayerId::new(0)).with_subject(EntityId(99));

        assert!(!Condition::IsMinion.evaluate(&state, EntityId(0), &gone));
        assert!(!Condition::IsDamaged.evaluate(&state, EntityId(0), &gone));
    }

    #[test]
    fn test_is_damaged() {
        let (mut state, minion) = setup();
        let payload = EventPayload::new(PlayerId::new(0)).with_subject(minion);

        assert!(!Condition::IsDamaged.evaluate(&state, EntityId(0), &payload));
        state.damage(EntityId(3), minion, 1);
        assert!(Condition::IsDamaged.evaluate(&state, EntityId(0), &payload));
    }

    #[test]
    fn test_combinators() {
        let (state, minion) = setup();
        let payload = EventPayload::new(PlayerId::new(0))
            .with_subject(minion)
            .with_amount(3);

        let both = Condition::all([Condition::IsMinion, Condition::AmountAtLeast(3)]);
        let either = Condition::any([Condition::IsHero, Condition::AmountAtLeast(5)]);

        assert!(both.evaluate(&state, EntityId(0), &payload));
        assert!(!either.evaluate(&state, EntityId(0), &payload));
        assert!(either.negate().evaluate(&state, EntityId(0), &payload));
    }

    #[test]
    fn test_owner_relative() {
        let (state, minion) = setup();
        let payload = EventPayload::new(PlayerId::new(0))
            .with_subject(minion)
            .with_other(EntityId(2));

        assert!(!Condition::NotOwner.evaluate(&state, minion, &payload));
        assert!(Condition::NotOwner.evaluate(&state, EntityId(2), &payload));
        assert!(Condition::OtherIsOwner.evaluate(&state, EntityId(2), &payload));
    }
}
