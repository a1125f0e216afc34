//! Choice cards ("Choose One").
//!
//! A choice card's spell builds its options at play time as `ChoiceCard`
//! values: data describing a requirement and a list of steps. Building them
//! at play time lets options bake in scaled amounts and lets them refer to
//! the parent's target.
//!
//! `resolve_choice` filters out options whose requirement fails, so an
//! agent is never offered an unusable option. A single remaining option is
//! picked without asking.

use tracing::debug;

use crate::core::{EntityId, GameState, PlayerId};
use crate::effects::{has_targets, Action, Selector, TargetRule};
use crate::error::{EngineError, Result};

use super::card::{Card, PlayContext};
use super::definition::CardMeta;

/// What must hold for an option to be offered.
#[derive(Clone, Copy, Debug, Default)]
pub enum Requirement {
    #[default]
    None,
    /// The acting player's board has a free slot.
    BoardHasRoom,
    /// The option picks its own target under this rule.
    Target(TargetRule),
    /// The parent card's target is still in play.
    ParentTarget,
}

/// What a step acts on.
#[derive(Clone, Debug)]
pub enum Aim {
    /// The target the parent card was played on.
    ParentTarget,
    /// The target picked for this option under `Requirement::Target`.
    ChosenTarget,
    Select(Selector),
}

#[derive(Clone, Debug)]
pub struct Step {
    pub aim: Aim,
    pub action: Action,
}

/// One option of a choice card.
#[derive(Clone, Debug)]
pub struct ChoiceCard {
    pub meta: CardMeta,
    pub requirement: Requirement,
    pub steps: Vec<Step>,
}

impl ChoiceCard {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            meta: CardMeta::choice(name),
            requirement: Requirement::None,
            steps: Vec::new(),
        }
    }

    #[must_use]
    pub fn requires(mut self, requirement: Requirement) -> Self {
        self.requirement = requirement;
        self
    }

    /// Append a step. Steps run in order.
    #[must_use]
    pub fn then(mut self, aim: Aim, action: Action) -> Self {
        self.steps.push(Step { aim, action });
        self
    }

    /// Whether this option can be offered.
    #[must_use]
    pub fn is_usable(&self, state: &GameState, player: PlayerId, parent_target: Option<EntityId>) -> bool {
        match &self.requirement {
            Requirement::None => true,
            Requirement::BoardHasRoom => state.board_has_room(player),
            Requirement::Target(rule) => has_targets(state, rule, player),
            Requirement::ParentTarget => parent_target.is_some_and(|t| state.is_in_play(t)),
        }
    }

    /// Run the steps against the context.
    pub fn resolve(&self, ctx: &mut PlayContext<'_>) -> Result<()> {
        let chosen = match &self.requirement {
            Requirement::Target(rule) => Some(ctx.choose_target(rule)?),
            _ => None,
        };
        debug!(player = %ctx.player, option = %self.meta.name, "choice resolved");

        for step in &self.steps {
            match &step.aim {
                Aim::ParentTarget => {
                    let target = ctx.target()?;
                    ctx.act_on(&step.action, &[target]);
                }
                Aim::ChosenTarget => {
                    let target = chosen.ok_or_else(|| {
                        EngineError::IllegalPlay(format!("{} has no target rule", self.meta.name))
                    })?;
                    ctx.act_on(&step.action, &[target]);
                }
                Aim::Select(selector) => ctx.act(&step.action, selector),
            }
        }
        Ok(())
    }
}

impl Card for ChoiceCard {
    fn meta(&self) -> &CardMeta {
        &self.meta
    }

    fn target_rule(&self) -> Option<TargetRule> {
        match self.requirement {
            Requirement::Target(rule) => Some(rule),
            _ => None,
        }
    }

    fn can_use(&self, state: &GameState, player: PlayerId) -> bool {
        self.is_usable(state, player, None)
    }

    fn play(&self, ctx: &mut PlayContext<'_>) -> Result<()> {
        self.resolve(ctx)
    }

    fn is_choice(&self) -> bool {
        true
    }
}

/// Whether any option would be offered.
#[must_use]
pub fn any_usable(options: &[ChoiceCard], state: &GameState, player: PlayerId, parent_target: Option<EntityId>) -> bool {
    options
        .iter()
        .any(|option| option.is_usable(state, player, parent_target))
}

/// Offer the usable options to the acting player and resolve the pick.
///
/// Fails with `IllegalPlay` when nothing is usable.
///
/// # Panics
///
/// Panics when the agent answers with an index that was not offered. The
/// card has already been paid for at this point, so there is no state to
/// roll back to.
pub fn resolve_choice(ctx: &mut PlayContext<'_>, options: Vec<ChoiceCard>) -> Result<()> {
    let offered: Vec<ChoiceCard> = options
        .into_iter()
        .filter(|option| option.is_usable(ctx.state, ctx.player, ctx.target))
        .collect();

    let index = match offered.len() {
        0 => return Err(EngineError::IllegalPlay("no usable option".to_string())),
        1 => 0,
        _ => ctx.agent.choose_option(ctx.state, ctx.player, &offered),
    };
    assert!(
        index < offered.len(),
        "agent chose option {index} but only {} were offered",
        offered.len()
    );
    offered[index].resolve(ctx)
}
