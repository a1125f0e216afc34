//! Effects and deathrattles.
//!
//! An `Effect` couples a trigger `Event` to an `Action` through a
//! `Selector`. Attached to an entity it is *bound*: it listens until the
//! entity leaves play or, for one-shot effects, until it fires once.
//!
//! A `Deathrattle` is the one-shot case whose trigger is implicitly "the
//! owning minion died". Deathrattles are kept in order on the minion and
//! fire from the death sweep rather than through the event bus.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::EntityId;
use crate::triggers::Event;

use super::action::Action;
use super::selector::Selector;

/// Identifier of an attached effect. Never reused within a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EffectId(pub u32);

impl std::fmt::Display for EffectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Effect({})", self.0)
    }
}

/// How long a bound effect keeps listening.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Lifetime {
    /// Fires every time its trigger matches.
    #[default]
    Standing,
    /// Unbinds right before its first firing.
    OneShot,
}

/// A triggered ability.
///
/// ```
/// use card_engine::effects::{Action, Effect, Selector};
/// use card_engine::triggers::Event;
///
/// // "At the end of your turn, gain 1 armor."
/// let effect = Effect::new(
///     Event::turn_ended(),
///     Action::IncreaseArmor { amount: 1 },
///     Selector::FriendlyHero,
/// );
/// assert!(!effect.is_one_shot());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Effect {
    pub trigger: Event,
    pub action: Action,
    pub selector: Selector,
    pub lifetime: Lifetime,
}

impl Effect {
    /// A standing effect.
    #[must_use]
    pub fn new(trigger: Event, action: Action, selector: Selector) -> Self {
        Self {
            trigger,
            action,
            selector,
            lifetime: Lifetime::Standing,
        }
    }

    /// Make this effect fire at most once (builder pattern).
    #[must_use]
    pub fn one_shot(mut self) -> Self {
        self.lifetime = Lifetime::OneShot;
        self
    }

    #[must_use]
    pub fn is_one_shot(&self) -> bool {
        self.lifetime == Lifetime::OneShot
    }
}

/// An action that runs when the owning minion dies.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deathrattle {
    pub action: Action,
    pub selector: Selector,
}

impl Deathrattle {
    #[must_use]
    pub fn new(action: Action, selector: Selector) -> Self {
        Self { action, selector }
    }
}

/// An effect bound to its owner.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachedEffect {
    pub id: EffectId,
    pub owner: EntityId,
    pub effect: Effect,
}

/// Storage for attached effects, indexed by id and by owner.
#[derive(Clone, Debug, Default)]
pub struct EffectTable {
    effects: FxHashMap<EffectId, AttachedEffect>,
    owned: FxHashMap<EntityId, Vec<EffectId>>,
    next_id: u32,
}

impl EffectTable {
    /// Reserve a fresh id.
    pub fn allocate(&mut self) -> EffectId {
        let id = EffectId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn insert(&mut self, attached: AttachedEffect) {
        self.owned.entry(attached.owner).or_default().push(attached.id);
        self.effects.insert(attached.id, attached);
    }

    pub fn remove(&mut self, id: EffectId) -> Option<AttachedEffect> {
        let attached = self.effects.remove(&id)?;
        if let Some(ids) = self.owned.get_mut(&attached.owner) {
            ids.retain(|owned| *owned != id);
            if ids.is_empty() {
                self.owned.remove(&attached.owner);
            }
        }
        Some(attached)
    }

    #[must_use]
    pub fn get(&self, id: EffectId) -> Option<&AttachedEffect> {
        self.effects.get(&id)
    }

    /// Effects held by `owner`, in attach order.
    #[must_use]
    pub fn owned_by(&self, owner: EntityId) -> &[EffectId] {
        self.owned.get(&owner).map_or(&[], Vec::as_slice)
    }

    /// All attached effects, ordered by id.
    #[must_use]
    pub fn iter_ordered(&self) -> Vec<&AttachedEffect> {
        let mut attached: Vec<_> = self.effects.values().collect();
        attached.sort_by_key(|a| a.id);
        attached
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.effects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}
