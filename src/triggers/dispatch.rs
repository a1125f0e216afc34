//! Effect binding and event dispatch.
//!
//! ## Walk order
//!
//! `raise` visits owners starting at the seat of the player the event is
//! about: that player's own entity, then their hero, then their minions in
//! board order, then the same for each following player in seat order.
//! Listeners on one owner are visited in registration order.
//!
//! ## Firing
//!
//! Matching effects are collected into a snapshot before any of them fires,
//! so effects attached or detached mid-raise never change who is visited.
//! Each effect fires at most once per raise even when several of its arms
//! match. Right before firing the effect must still be attached; its
//! condition is re-checked and its selector resolved against the state as
//! it is at that moment.

use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::core::{EntityId, GameState};
use crate::effects::{AttachedEffect, Effect, EffectId, Lifetime, SelectorContext};

use super::event::{EventName, EventPayload};

impl GameState {
    // === Binding ===

    /// Attach an effect to `owner` and bind its trigger.
    ///
    /// Attaching to an entity that is not in play returns an id that was
    /// never bound; detaching it later is a no-op.
    pub fn attach_effect(&mut self, owner: EntityId, effect: Effect) -> EffectId {
        let id = self.effects.allocate();
        if !self.is_in_play(owner) {
            trace!(%owner, effect = %id, "attach target left play");
            return id;
        }
        self.bus.bind(owner, id, &effect.trigger);
        debug!(%owner, effect = %id, trigger = ?effect.trigger, "effect attached");
        self.effects.insert(AttachedEffect { id, owner, effect });
        id
    }

    /// Detach an effect. Unknown or already detached ids are a no-op.
    pub fn detach_effect(&mut self, id: EffectId) {
        if let Some(attached) = self.effects.remove(id) {
            self.bus.unbind(attached.owner, id);
            debug!(owner = %attached.owner, effect = %id, "effect detached");
        }
    }

    /// Detach every effect `owner` holds.
    pub fn detach_owned(&mut self, owner: EntityId) {
        let owned: SmallVec<[EffectId; 4]> = self.effects.owned_by(owner).iter().copied().collect();
        for id in owned {
            self.detach_effect(id);
        }
        self.bus.unbind_all(owner);
    }

    /// An attached effect.
    #[must_use]
    pub fn effect(&self, id: EffectId) -> Option<&AttachedEffect> {
        self.effects.get(id)
    }

    /// Ids of the effects attached to `owner`, in attach order.
    #[must_use]
    pub fn effects_of(&self, owner: EntityId) -> &[EffectId] {
        self.effects.owned_by(owner)
    }

    /// All attached effects, ordered by id.
    #[must_use]
    pub fn attached_effects(&self) -> Vec<&AttachedEffect> {
        self.effects.iter_ordered()
    }

    // === Dispatch ===

    /// Raise an event and fire every matching effect.
    ///
    /// Runs as one atomic mutation: deaths caused by the fired effects are
    /// swept when the outermost mutation ends.
    pub fn raise(&mut self, name: EventName, payload: EventPayload) {
        let snapshot = self.listening_effects(name, &payload);
        debug!(event = %name, player = %payload.player, subject = ?payload.subject, listeners = snapshot.len(), "event raised");
        if snapshot.is_empty() {
            return;
        }

        self.atomically(|state| {
            for id in snapshot {
                state.fire(id, name, &payload);
            }
        });
    }

    /// Effects with an arm bound to `name` whose scope matches, in walk
    /// order, each listed once.
    fn listening_effects(&self, name: EventName, payload: &EventPayload) -> Vec<EffectId> {
        let mut seen = FxHashSet::default();
        let mut effects = Vec::new();

        for player in payload.player.seat_order(self.player_count()) {
            let owners = std::iter::once(EntityId::player(player)).chain(self.characters_of(player));
            for owner in owners {
                let Some(controller) = self.controller_of(owner) else {
                    continue;
                };
                for listener in self.bus.listeners(owner) {
                    if listener.name == name
                        && listener.scope.matches(owner, controller, payload)
                        && seen.insert(listener.effect)
                    {
                        effects.push(listener.effect);
                    }
                }
            }
        }
        effects
    }

    fn fire(&mut self, id: EffectId, name: EventName, payload: &EventPayload) {
        let Some(attached) = self.effects.get(id) else {
            trace!(effect = %id, "effect detached before firing");
            return;
        };
        let owner = attached.owner;
        let Some(controller) = self.controller_of(owner) else {
            return;
        };
        if !attached.effect.trigger.accepts(self, name, owner, controller, payload) {
            trace!(effect = %id, "condition not met");
            return;
        }
        let effect = attached.effect.clone();

        if effect.lifetime == Lifetime::OneShot {
            self.detach_effect(id);
        }

        let ctx = SelectorContext::new(owner, controller).with_payload(*payload);
        let targets = effect.selector.resolve(self, &ctx);
        if targets.is_empty() {
            trace!(effect = %id, selector = ?effect.selector, "no targets");
            return;
        }
        debug!(effect = %id, %owner, event = %name, targets = targets.len(), "effect fired");
        self.apply_action(&effect.action, &ctx.action_context(), &targets);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::MinionCard;
    use crate::core::{GameConfig, PlayerId};
    use crate::effects::{Action, Selector};
    use crate::triggers::{Condition, Event, EventScope};

    fn p0() -> PlayerId {
        PlayerId::new(0)
    }

    fn p1() -> PlayerId {
        PlayerId::new(1)
    }

    fn armor_on(trigger: Event) -> Effect {
        Effect::new(trigger, Action::IncreaseArmor { amount: 1 }, Selector::FriendlyHero)
    }

    #[test]
    fn test_attach_and_fire() {
        let mut state = GameState::new(GameConfig::default());
        let player = EntityId::player(p0());

        state.attach_effect(player, armor_on(Event::turn_ended()));
        state.raise(EventName::TurnEnded, EventPayload::for_player(p0()));
        state.raise(EventName::TurnEnded, EventPayload::for_player(p1()));

        assert_eq!(state.hero(p0()).armor, 1);
    }

    #[test]
    fn test_enemy_scope() {
        let mut state = GameState::new(GameConfig::default());
        let player = EntityId::player(p0());

        state.attach_effect(player, armor_on(Event::turn_ended().with_scope(EventScope::EnemyPlayer)));
        state.raise(EventName::TurnEnded, EventPayload::for_player(p0()));
        assert_eq!(state.hero(p0()).armor, 0);

        state.raise(EventName::TurnEnded, EventPayload::for_player(p1()));
        assert_eq!(state.hero(p0()).armor, 1);
    }

    #[test]
    fn test_either_fires_once() {
        let mut state = GameState::new(GameConfig::default());
        let player = EntityId::player(p0());
        let either = Event::either(
            Event::turn_ended(),
            Event::turn_ended().with_scope(EventScope::AnyPlayer),
        );

        state.attach_effect(player, armor_on(either));
        state.raise(EventName::TurnEnded, EventPayload::for_player(p0()));

        assert_eq!(state.hero(p0()).armor, 1);
    }

    #[test]
    fn test_one_shot_detaches() {
        let mut state = GameState::new(GameConfig::default());
        let player = EntityId::player(p0());

        let id = state.attach_effect(player, armor_on(Event::turn_started()).one_shot());
        state.raise(EventName::TurnStarted, EventPayload::for_player(p0()));
        state.raise(EventName::TurnStarted, EventPayload::for_player(p0()));

        assert_eq!(state.hero(p0()).armor, 1);
        assert!(state.effect(id).is_none());
        assert!(state.bus.is_empty());
    }

    #[test]
    fn test_condition_checked_at_fire_time() {
        let mut state = GameState::new(GameConfig::default());
        let player = EntityId::player(p0());
        let trigger = Event::minion_summoned().with_condition(Condition::IsMinion);

        state.attach_effect(player, armor_on(trigger));
        state.raise(EventName::MinionSummoned, EventPayload::new(p0()).with_subject(EntityId(99)));
        assert_eq!(state.hero(p0()).armor, 0);

        state.summon(&MinionCard::new("Wisp", 0, 1, 1), p0(), None);
        assert_eq!(state.hero(p0()).armor, 1);
    }

    #[test]
    fn test_detach_unknown_is_noop() {
        let mut state = GameState::new(GameConfig::default());
        state.detach_effect(EffectId(42));
        assert!(state.attached_effects().is_empty());
    }

    #[test]
    fn test_attach_to_departed_entity() {
        let mut state = GameState::new(GameConfig::default());

        let id = state.attach_effect(EntityId(50), armor_on(Event::turn_ended()));

        assert!(state.effect(id).is_none());
        assert!(state.bus.is_empty());
        state.detach_effect(id);
    }

    #[test]
    fn test_leaving_play_detaches() {
        let mut state = GameState::new(GameConfig::default());
        let minion = state.summon(&MinionCard::new("Wisp", 0, 1, 1), p0(), None).unwrap();
        let id = state.attach_effect(minion, armor_on(Event::turn_ended()));

        state.kill(minion);

        assert!(state.effect(id).is_none());
        assert!(state.effects_of(minion).is_empty());
        state.raise(EventName::TurnEnded, EventPayload::for_player(p0()));
        assert_eq!(state.hero(p0()).armor, 0);
    }
}
