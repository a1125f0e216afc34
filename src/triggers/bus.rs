//! The event bus: listener registry keyed by owning entity.
//!
//! Each entity keeps its listeners in registration order. An `Either`
//! event registers one listener per arm, all pointing at the same effect;
//! dispatch collapses them so the effect fires once per raise.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::core::EntityId;
use crate::effects::EffectId;

use super::event::{Event, EventName, EventScope};

/// One registered arm of an effect's trigger.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Listener {
    pub effect: EffectId,
    pub name: EventName,
    pub scope: EventScope,
}

/// Per-entity listener registry.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EventBus {
    listeners: FxHashMap<EntityId, SmallVec<[Listener; 4]>>,
}

impl EventBus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register every arm of `event` for `effect` on `owner`.
    pub fn bind(&mut self, owner: EntityId, effect: EffectId, event: &Event) {
        let entry = self.listeners.entry(owner).or_default();
        for (name, scope) in event.arms() {
            entry.push(Listener { effect, name, scope });
        }
    }

    /// Remove every listener `effect` registered on `owner`.
    ///
    /// Unbinding something never bound is a no-op.
    pub fn unbind(&mut self, owner: EntityId, effect: EffectId) {
        let Some(entry) = self.listeners.get_mut(&owner) else {
            return;
        };
        entry.retain(|l| l.effect != effect);
        if entry.is_empty() {
            self.listeners.remove(&owner);
        }
    }

    /// Drop all listeners on `owner`.
    pub fn unbind_all(&mut self, owner: EntityId) {
        self.listeners.remove(&owner);
    }

    /// Listeners registered on `owner`, in registration order.
    #[must_use]
    pub fn listeners(&self, owner: EntityId) -> &[Listener] {
        self.listeners.get(&owner).map_or(&[], |l| l.as_slice())
    }

    /// Whether `effect` has any listener on `owner`.
    #[must_use]
    pub fn is_bound(&self, owner: EntityId, effect: EffectId) -> bool {
        self.listeners(owner).iter().any(|l| l.effect == effect)
    }

    /// Total number of registered listeners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners.values().map(|l| l.len()).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}
