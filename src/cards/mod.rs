//! Cards: metadata, the `Card` trait, and the card kinds.
//!
//! ## Key Types
//!
//! - `CardMeta`: name, cost, class, rarity, overload
//! - `Card`: the trait the game loop plays through
//! - `PlayContext`: state, agent, player and target handed to `play`
//! - `MinionCard`: data-driven minion template
//! - `SpellCard`: metadata plus a cast function
//! - `ChoiceCard`: one option of a "Choose One" card
//! - `CardRegistry`: name → factory lookup for building decks

pub mod definition;
pub mod card;
pub mod minion_card;
pub mod spell;
pub mod choice;
pub mod druid;
pub mod registry;

pub use definition::{CardKind, CardMeta, CharacterClass, Rarity};
pub use card::{Card, PlayContext};
pub use minion_card::{MinionCard, MinionTemplate};
pub use spell::{CastFn, SpellCard, UsableFn};
pub use choice::{any_usable, resolve_choice, Aim, ChoiceCard, Requirement, Step};
pub use registry::{CardFactory, CardRegistry};
