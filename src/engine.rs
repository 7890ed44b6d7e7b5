//! Quest Engine
//!
//! Host-facing wrapper around one quest graph and its behavior table. The
//! host owns the ports and lends them for the duration of each call.

use tracing::{debug, info};

use crate::error::DefinitionError;
use crate::ports::{EntityPort, MapPort, ProfilePort, QuestEntity};
use crate::quest::{Behavior, BehaviorDispatcher, QuestGraph, QuestReward, QuestWorld, TaskKind};

pub struct QuestEngine<E> {
    graph: QuestGraph,
    dispatcher: BehaviorDispatcher<E>,
}

impl<E: QuestEntity> QuestEngine<E> {
    pub fn new(graph: QuestGraph) -> Self {
        Self {
            graph,
            dispatcher: BehaviorDispatcher::new(),
        }
    }

    /// Restore an engine from a saved quest record
    pub fn from_json(json: &str) -> Result<Self, DefinitionError> {
        Ok(Self::new(QuestGraph::from_json(json)?))
    }
}

impl<E> QuestEngine<E> {
    /// Swap in a different quest, keeping registered behaviors
    pub fn load(&mut self, graph: QuestGraph) {
        debug!("Loading quest {} into engine", graph.quest_id());
        self.graph = graph;
    }

    pub fn register_behavior(&mut self, kind: TaskKind, behavior: Behavior<E>) {
        self.dispatcher.register(kind, behavior);
    }

    /// Entering the world: spawn what the active tasks need
    pub fn init(
        &mut self,
        map: &mut dyn MapPort<E>,
        profile: &mut dyn ProfilePort,
        entities: &mut dyn EntityPort<Entity = E>,
    ) {
        let location = map.current_location_tag();
        let mut world = QuestWorld::new(map, profile, entities);
        self.dispatcher.initialize(&mut self.graph, &location, &mut world);
    }

    /// Game tick: returns the ids of tasks that completed
    pub fn tick(
        &mut self,
        map: &mut dyn MapPort<E>,
        profile: &mut dyn ProfilePort,
        entities: &mut dyn EntityPort<Entity = E>,
    ) -> Vec<String> {
        let location = map.current_location_tag();
        let mut world = QuestWorld::new(map, profile, entities);
        self.dispatcher.advance(&mut self.graph, &location, &mut world)
    }

    /// External completion signal (dialog, kill, ...)
    pub fn mark_task_complete(&mut self, task_id: &str) -> bool {
        self.graph.mark_complete(task_id)
    }

    /// The player is back at the quest giver
    pub fn try_return(&mut self) -> bool {
        self.graph.update_return_phase()
    }

    pub fn all_complete(&self) -> bool {
        self.graph.all_tasks_complete()
    }

    /// Close out the quest once every task is done
    pub fn complete_quest(&mut self) -> Option<QuestReward> {
        if !self.graph.complete_quest() {
            return None;
        }
        info!("Quest {} complete", self.graph.quest_id());
        Some(QuestReward::of(&self.graph))
    }

    pub fn graph(&self) -> &QuestGraph {
        &self.graph
    }

    pub fn into_graph(self) -> QuestGraph {
        self.graph
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        self.graph.to_json()
    }
}
