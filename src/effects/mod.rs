//! Effect system for card abilities.
//!
//! Abilities are compositions of four primitives:
//!
//! - `Selector`: which entities, resolved at fire time
//! - `Action`: what happens to them
//! - `Event` + `Condition` (in `triggers`): when
//! - `Effect` / `Deathrattle`: the binding of the three to an owner
//!
//! `targeting` holds the card-level target rules players choose from.

pub mod effect;
pub mod selector;
pub mod action;
pub mod targeting;

pub use effect::{AttachedEffect, Deathrattle, Effect, EffectId, EffectTable, Lifetime};
pub use selector::{Selector, SelectorContext, Side, Targets};
pub use action::{Action, ActionContext, SummonPosition};
pub use targeting::{find_targets, has_targets, is_valid_target, TargetPredicate, TargetRule};
