//! The `Card` trait and the context a card is played in.
//!
//! A card's `play` receives a `PlayContext` carrying everything the old
//! per-card closures used to capture: the mutable state, the acting
//! player's agent, the acting player and the chosen target. The agent and
//! the state are separate fields, so an agent can inspect the state while
//! the card holds it mutably.

use crate::agents::Agent;
use crate::core::{EntityId, GameState, PlayerId};
use crate::effects::{find_targets, has_targets, Action, Selector, SelectorContext, TargetRule, Targets};
use crate::error::{EngineError, Result};

use super::definition::CardMeta;

/// A playable card.
pub trait Card: std::fmt::Debug {
    /// Static metadata.
    fn meta(&self) -> &CardMeta;

    /// The rule the player picks a target under before `play`, if any.
    fn target_rule(&self) -> Option<TargetRule> {
        None
    }

    /// Whether the card may be played right now.
    ///
    /// A card that needs a target refuses when none exists.
    fn can_use(&self, state: &GameState, player: PlayerId) -> bool {
        self.target_rule()
            .map_or(true, |rule| has_targets(state, &rule, player))
    }

    /// Resolve the card. Called after cost has been paid.
    fn play(&self, ctx: &mut PlayContext<'_>) -> Result<()>;

    /// Whether this is one option of a choice card. Options are only ever
    /// played through their parent.
    fn is_choice(&self) -> bool {
        false
    }
}

/// Everything a card needs while it resolves.
pub struct PlayContext<'a> {
    pub state: &'a mut GameState,
    /// The acting player's decision maker.
    pub agent: &'a mut dyn Agent,
    pub player: PlayerId,
    /// Target picked before play, under the card's `target_rule`.
    pub target: Option<EntityId>,
}

impl<'a> PlayContext<'a> {
    #[must_use]
    pub fn new(state: &'a mut GameState, agent: &'a mut dyn Agent, player: PlayerId) -> Self {
        Self {
            state,
            agent,
            player,
            target: None,
        }
    }

    #[must_use]
    pub fn with_target(mut self, target: EntityId) -> Self {
        self.target = Some(target);
        self
    }

    /// The entity a card acts through: its player.
    #[must_use]
    pub fn source(&self) -> EntityId {
        EntityId::player(self.player)
    }

    /// The next player in seat order.
    #[must_use]
    pub fn opponent(&self) -> PlayerId {
        self.player.next(self.state.player_count())
    }

    // === Scaling ===

    /// Spell damage after the acting player's bonuses.
    #[must_use]
    pub fn spell_damage(&self, base: i32) -> i32 {
        self.state.player(self.player).effective_spell_damage(base)
    }

    /// Healing after the acting player's multipliers.
    #[must_use]
    pub fn heal_power(&self, base: i32) -> i32 {
        self.state.player(self.player).effective_heal_power(base)
    }

    // === Targets ===

    /// The pre-chosen target.
    pub fn target(&self) -> Result<EntityId> {
        self.target
            .ok_or_else(|| EngineError::IllegalPlay("card requires a target".to_string()))
    }

    #[must_use]
    pub fn selector_context(&self) -> SelectorContext {
        SelectorContext::new(self.source(), self.player)
    }

    /// Resolve a selector from the acting player's point of view.
    #[must_use]
    pub fn select(&self, selector: &Selector) -> Targets {
        selector.resolve(self.state, &self.selector_context())
    }

    /// Ask the agent for a target under `rule` during resolution.
    ///
    /// # Panics
    ///
    /// Panics when the agent answers with a target that was not offered.
    /// The card is already paid for, so the play cannot be rejected cleanly.
    pub fn choose_target(&mut self, rule: &TargetRule) -> Result<EntityId> {
        let offered = find_targets(self.state, rule, self.player);
        if offered.is_empty() {
            return Err(EngineError::IllegalPlay("no legal target".to_string()));
        }
        let chosen = self.agent.choose_target(self.state, self.player, &offered);
        assert!(offered.contains(&chosen), "agent chose target {chosen} which was not offered");
        Ok(chosen)
    }

    // === Mutation ===

    /// Resolve `selector`, then apply `action` to the result.
    pub fn act(&mut self, action: &Action, selector: &Selector) {
        let targets = self.select(selector);
        self.act_on(action, &targets);
    }

    /// Apply `action` to explicit targets.
    pub fn act_on(&mut self, action: &Action, targets: &[EntityId]) {
        let ctx = self.selector_context().action_context();
        self.state.apply_action(action, &ctx, targets);
    }
}

impl std::fmt::Debug for PlayContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlayContext")
            .field("player", &self.player)
            .field("target", &self.target)
            .finish_non_exhaustive()
    }
}
