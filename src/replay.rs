//! Serialization of the effect graph.
//!
//! Events have a stable key-value form (`event_to_kv` / `event_from_kv`):
//!
//! ```text
//! { "event_name": "did_damage", "player": "owner", "condition": {...} }
//! { "event_name": "either", "player": "friendly_player",
//!   "event1": {...}, "event2": {...} }
//! ```
//!
//! `condition` is omitted when absent. `EffectGraph` captures every
//! attached effect and every deathrattle in a state, and round-trips
//! through the same key-value form or compact bincode bytes.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::trace;

use crate::core::{EntityId, GameState};
use crate::effects::{Action, Deathrattle, Effect, Lifetime, Selector};
use crate::error::{EngineError, Result};
use crate::triggers::{Condition, Event, EventName, EventScope};

const EITHER: &str = "either";

fn malformed(what: impl std::fmt::Display) -> EngineError {
    EngineError::Serialization(format!("malformed key-value data: {what}"))
}

fn field<'v>(map: &'v Map<String, Value>, key: &str) -> Result<&'v Value> {
    map.get(key).ok_or_else(|| malformed(format!("missing {key}")))
}

// === Events ===

/// Key-value form of an event.
pub fn event_to_kv(event: &Event) -> Result<Value> {
    let mut map = Map::new();
    match event {
        Event::On { name, scope, condition } => {
            map.insert("event_name".into(), Value::String(name.as_str().into()));
            map.insert("player".into(), serde_json::to_value(scope)?);
            if let Some(condition) = condition {
                map.insert("condition".into(), serde_json::to_value(condition)?);
            }
        }
        Event::Either { first, second, scope } => {
            map.insert("event_name".into(), Value::String(EITHER.into()));
            map.insert("player".into(), serde_json::to_value(scope)?);
            map.insert("event1".into(), event_to_kv(first)?);
            map.insert("event2".into(), event_to_kv(second)?);
        }
    }
    Ok(Value::Object(map))
}

/// Parse the key-value form of an event.
///
/// A missing `player` means the default scope.
pub fn event_from_kv(value: &Value) -> Result<Event> {
    let map = value
        .as_object()
        .ok_or_else(|| malformed("event is not a map"))?;
    let name = field(map, "event_name")?
        .as_str()
        .ok_or_else(|| malformed("event_name is not a string"))?;
    let scope = match map.get("player") {
        Some(player) => EventScope::deserialize(player)?,
        None => EventScope::default(),
    };

    if name == EITHER {
        let first = event_from_kv(field(map, "event1")?)?;
        let second = event_from_kv(field(map, "event2")?)?;
        return Ok(Event::either(first, second).with_scope(scope));
    }

    let name = EventName::parse(name).ok_or_else(|| malformed(format!("unknown event {name:?}")))?;
    let condition = match map.get("condition") {
        None | Some(Value::Null) => None,
        Some(condition) => Some(Condition::deserialize(condition)?),
    };
    Ok(Event::On { name, scope, condition })
}

// === Effect graph ===

/// An effect and the entity it is attached to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectEntry {
    pub owner: EntityId,
    pub effect: Effect,
}

/// A minion's deathrattles, in append order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeathrattleEntry {
    pub minion: EntityId,
    pub deathrattles: Vec<Deathrattle>,
}

/// Every effect and deathrattle live in a state.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectGraph {
    /// Ordered by attach order.
    pub effects: Vec<EffectEntry>,
    /// Ordered by seat, then board position.
    pub deathrattles: Vec<DeathrattleEntry>,
}

impl EffectGraph {
    /// Capture the graph of a state.
    #[must_use]
    pub fn capture(state: &GameState) -> Self {
        let effects = state
            .attached_effects()
            .into_iter()
            .map(|attached| EffectEntry {
                owner: attached.owner,
                effect: attached.effect.clone(),
            })
            .collect();
        let deathrattles = state
            .player_ids()
            .flat_map(|player| state.minions_of(player))
            .filter(|minion| !minion.deathrattles.is_empty())
            .map(|minion| DeathrattleEntry {
                minion: minion.id,
                deathrattles: minion.deathrattles.clone(),
            })
            .collect();
        Self { effects, deathrattles }
    }

    /// Attach the captured effects and deathrattles to matching entities
    /// in `state`. Entries whose entity is not in play are skipped.
    pub fn restore(&self, state: &mut GameState) {
        for entry in &self.effects {
            if state.is_in_play(entry.owner) {
                state.attach_effect(entry.owner, entry.effect.clone());
            } else {
                trace!(owner = %entry.owner, "restore skipped effect");
            }
        }
        for entry in &self.deathrattles {
            for deathrattle in &entry.deathrattles {
                state.add_deathrattle(entry.minion, deathrattle.clone());
            }
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty() && self.deathrattles.is_empty()
    }

    // === Key-value form ===

    /// Key-value form. Effect triggers use the event key-value form.
    pub fn to_kv(&self) -> Result<Value> {
        let effects = self
            .effects
            .iter()
            .map(|entry| -> Result<Value> {
                let mut map = Map::new();
                map.insert("owner".into(), serde_json::to_value(entry.owner)?);
                map.insert("event".into(), event_to_kv(&entry.effect.trigger)?);
                map.insert("action".into(), serde_json::to_value(&entry.effect.action)?);
                map.insert("selector".into(), serde_json::to_value(&entry.effect.selector)?);
                map.insert("lifetime".into(), serde_json::to_value(entry.effect.lifetime)?);
                Ok(Value::Object(map))
            })
            .collect::<Result<Vec<_>>>()?;

        let mut map = Map::new();
        map.insert("effects".into(), Value::Array(effects));
        map.insert("deathrattles".into(), serde_json::to_value(&self.deathrattles)?);
        Ok(Value::Object(map))
    }

    /// Parse the key-value form.
    pub fn from_kv(value: &Value) -> Result<Self> {
        let map = value
            .as_object()
            .ok_or_else(|| malformed("effect graph is not a map"))?;
        let effects = field(map, "effects")?
            .as_array()
            .ok_or_else(|| malformed("effects is not a list"))?
            .iter()
            .map(Self::effect_from_kv)
            .collect::<Result<Vec<_>>>()?;
        let deathrattles = Vec::<DeathrattleEntry>::deserialize(field(map, "deathrattles")?)?;
        Ok(Self { effects, deathrattles })
    }

    fn effect_from_kv(value: &Value) -> Result<EffectEntry> {
        let map = value
            .as_object()
            .ok_or_else(|| malformed("effect is not a map"))?;
        let effect = Effect {
            trigger: event_from_kv(field(map, "event")?)?,
            action: Action::deserialize(field(map, "action")?)?,
            selector: Selector::deserialize(field(map, "selector")?)?,
            lifetime: match map.get("lifetime") {
                Some(lifetime) => Lifetime::deserialize(lifetime)?,
                None => Lifetime::default(),
            },
        };
        Ok(EffectEntry {
            owner: EntityId::deserialize(field(map, "owner")?)?,
            effect,
        })
    }

    // === Bytes ===

    /// Compact binary form.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(bincode::deserialize(bytes)?)
    }
}
