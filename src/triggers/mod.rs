//! Event-driven trigger system.
//!
//! - `event`: event names, scopes, payloads and the `Event` listeners bind
//! - `condition`: predicates an event must satisfy to fire its effect
//! - `bus`: per-entity listener registry
//! - `dispatch`: binding effects and raising events on `GameState`

pub mod event;
pub mod condition;
pub mod bus;
pub mod dispatch;

pub use event::{Event, EventName, EventPayload, EventScope};
pub use condition::Condition;
pub use bus::{EventBus, Listener};
