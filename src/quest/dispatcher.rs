//! Task Behavior Dispatch
//!
//! Runs per-kind hooks for every task that is open, unblocked and located on
//! the current map. Kinds without logic get no-op hooks.

use std::collections::HashMap;

use tracing::debug;

use super::fetch;
use super::graph::QuestGraph;
use super::task::{Task, TaskKind};
use crate::ports::{EntityPort, MapPort, ProfilePort, QuestEntity};

/// The collaborators a hook may touch, borrowed for one call
pub struct QuestWorld<'a, E> {
    pub map: &'a mut dyn MapPort<E>,
    pub profile: &'a mut dyn ProfilePort,
    pub entities: &'a mut dyn EntityPort<Entity = E>,
}

impl<'a, E> QuestWorld<'a, E> {
    pub fn new(
        map: &'a mut dyn MapPort<E>,
        profile: &'a mut dyn ProfilePort,
        entities: &'a mut dyn EntityPort<Entity = E>,
    ) -> Self {
        Self {
            map,
            profile,
            entities,
        }
    }
}

/// A hook receives the quest id and the task it runs for
pub type Hook<E> = fn(quest_id: &str, task: &mut Task, world: &mut QuestWorld<'_, E>);

/// Initialize and advance hooks for one task kind
pub struct Behavior<E> {
    pub initialize: Hook<E>,
    pub advance: Hook<E>,
}

impl<E> Clone for Behavior<E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for Behavior<E> {}

impl<E> Behavior<E> {
    pub fn new(initialize: Hook<E>, advance: Hook<E>) -> Self {
        Self { initialize, advance }
    }

    /// Does nothing in either phase
    pub fn inert() -> Self {
        Self::new(no_op, no_op)
    }
}

fn no_op<E>(_quest_id: &str, _task: &mut Task, _world: &mut QuestWorld<'_, E>) {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Initialize,
    Advance,
}

/// Kind -> behavior table
pub struct BehaviorDispatcher<E> {
    behaviors: HashMap<TaskKind, Behavior<E>>,
}

impl<E: QuestEntity> BehaviorDispatcher<E> {
    /// Fetch logic installed, every other kind inert
    pub fn new() -> Self {
        let behaviors = TaskKind::ALL
            .into_iter()
            .map(|kind| {
                let behavior = match kind {
                    TaskKind::Fetch => Behavior::new(fetch::initialize, fetch::advance),
                    TaskKind::Kill
                    | TaskKind::Delivery
                    | TaskKind::Guard
                    | TaskKind::Escort
                    | TaskKind::Return
                    | TaskKind::Discover => Behavior::inert(),
                };
                (kind, behavior)
            })
            .collect();

        Self { behaviors }
    }
}

impl<E: QuestEntity> Default for BehaviorDispatcher<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> BehaviorDispatcher<E> {
    /// Replace the hooks for a kind
    pub fn register(&mut self, kind: TaskKind, behavior: Behavior<E>) {
        self.behaviors.insert(kind, behavior);
    }

    /// Run initialize hooks for tasks active in `location`
    pub fn initialize(&self, graph: &mut QuestGraph, location: &str, world: &mut QuestWorld<'_, E>) {
        self.dispatch(graph, location, world, Phase::Initialize);
    }

    /// Run advance hooks for tasks active in `location`.
    /// Returns the ids of tasks completed during this call.
    pub fn advance(
        &self,
        graph: &mut QuestGraph,
        location: &str,
        world: &mut QuestWorld<'_, E>,
    ) -> Vec<String> {
        self.dispatch(graph, location, world, Phase::Advance)
    }

    fn dispatch(
        &self,
        graph: &mut QuestGraph,
        location: &str,
        world: &mut QuestWorld<'_, E>,
        phase: Phase,
    ) -> Vec<String> {
        let quest_id = graph.quest_id().to_string();
        let ids: Vec<String> = graph.task_ids().cloned().collect();
        let mut completed = Vec::new();

        for id in ids {
            // Checked per visit: a task completed earlier in this pass may unblock this one
            if !graph.is_active_at(&id, location) {
                continue;
            }
            let Some(task) = graph.task_mut(&id) else {
                continue;
            };
            let Some(behavior) = self.behaviors.get(&task.kind()) else {
                continue;
            };

            let hook = match phase {
                Phase::Initialize => behavior.initialize,
                Phase::Advance => behavior.advance,
            };
            hook(&quest_id, task, world);

            if task.is_complete() {
                debug!("TASK: {} is complete of Quest: {}", id, quest_id);
                completed.push(id);
            }
        }

        completed
    }
}
