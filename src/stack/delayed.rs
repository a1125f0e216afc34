//! Delayed resolution queue.
//!
//! Work that must not run in the middle of a mutation is queued here and
//! drained once the outermost mutation ends. Draining runs to a fixpoint:
//! tasks queued while draining run in the same pass, each exactly once.
//! A drain requested while one is already running is ignored; the running
//! drain picks the new tasks up.
//!
//! ## Death sweep
//!
//! A `Death` task sweeps every minion marked dying, not just the one it
//! names:
//!
//! 1. all dying minions leave the board (ordered by summon sequence) and
//!    lose their effects
//! 2. then each one's deathrattles fire in append order, followed by
//!    `MinionDied`
//!
//! Deathrattles therefore always see a board with every simultaneous death
//! already removed.

use std::collections::VecDeque;

use tracing::{debug, trace};

use crate::core::{EntityId, GameState, Minion};
use crate::effects::SelectorContext;
use crate::triggers::{EventName, EventPayload};

/// A queued task.
pub enum Deferred {
    /// A minion was marked dying.
    Death(EntityId),
    /// Arbitrary work against the state.
    Callback(Box<dyn FnOnce(&mut GameState)>),
}

impl std::fmt::Debug for Deferred {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Death(id) => f.debug_tuple("Death").field(id).finish(),
            Self::Callback(_) => f.write_str("Callback(..)"),
        }
    }
}

/// FIFO of deferred tasks.
#[derive(Debug, Default)]
pub struct DelayedQueue {
    tasks: VecDeque<Deferred>,
    draining: bool,
}

impl DelayedQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a task.
    pub fn push(&mut self, task: Deferred) {
        self.tasks.push_back(task);
    }

    /// Take the oldest task.
    pub fn pop(&mut self) -> Option<Deferred> {
        self.tasks.pop_front()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether a drain is in progress.
    #[must_use]
    pub fn is_draining(&self) -> bool {
        self.draining
    }
}

impl GameState {
    /// Queue a callback to run after the current mutation.
    pub fn defer(&mut self, callback: impl FnOnce(&mut GameState) + 'static) {
        self.delayed.push(Deferred::Callback(Box::new(callback)));
    }

    /// Number of queued tasks.
    #[must_use]
    pub fn pending_delayed(&self) -> usize {
        self.delayed.len()
    }

    /// Drain the delayed queue to a fixpoint.
    pub fn check_delayed(&mut self) {
        if self.delayed.draining {
            trace!("drain already running");
            return;
        }
        self.delayed.draining = true;

        while let Some(task) = self.delayed.pop() {
            match task {
                Deferred::Death(id) => {
                    trace!(minion = %id, "death task");
                    self.sweep_deaths();
                }
                Deferred::Callback(callback) => callback(self),
            }
        }

        self.delayed.draining = false;
    }

    /// Remove every dying minion, then fire their deathrattles.
    fn sweep_deaths(&mut self) {
        let dying = self.dying_minions();
        if dying.is_empty() {
            return;
        }

        let mut removed: Vec<(Minion, usize)> = Vec::with_capacity(dying.len());
        for id in dying {
            if let Some(entry) = self.take_minion(id) {
                self.detach_owned(id);
                removed.push(entry);
            }
        }
        debug!(count = removed.len(), "death sweep");

        for (minion, index) in removed {
            debug!(minion = %minion.id, name = minion.name(), deathrattles = minion.deathrattles.len(), "minion died");
            let ctx = SelectorContext::new(minion.id, minion.owner).with_owner_index(index);
            for deathrattle in &minion.deathrattles {
                let targets = deathrattle.selector.resolve(self, &ctx);
                self.apply_action(&deathrattle.action, &ctx.action_context(), &targets);
            }
            self.raise(
                EventName::MinionDied,
                EventPayload::new(minion.owner).with_subject(minion.id),
            );
        }
    }
}
