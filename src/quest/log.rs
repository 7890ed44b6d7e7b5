//! Quest Log
//!
//! All quest state for a single player: the quests in progress and the ids of
//! the ones already turned in. Saved as one JSON record.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::dispatcher::{BehaviorDispatcher, QuestWorld};
use super::graph::QuestGraph;
use crate::error::DefinitionError;

/// Gold and experience granted for finishing a quest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct QuestReward {
    pub gold: u32,
    pub xp: u32,
}

impl QuestReward {
    pub fn of(graph: &QuestGraph) -> Self {
        Self {
            gold: graph.gold_reward(),
            xp: graph.xp_reward(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestLog {
    /// Active quests (quest_id -> graph)
    active_quests: BTreeMap<String, QuestGraph>,
    /// Turned-in quest IDs
    completed_quests: Vec<String>,
}

impl QuestLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a quest. Refused if it is already active or was turned in.
    pub fn accept(&mut self, graph: QuestGraph) -> bool {
        let quest_id = graph.quest_id().to_string();
        if self.is_quest_active(&quest_id) || self.is_quest_completed(&quest_id) {
            return false;
        }

        info!("Accepted quest: {} ({})", graph.quest_title(), quest_id);
        self.active_quests.insert(quest_id, graph);
        true
    }

    /// Drop an active quest and all of its progress
    pub fn abandon(&mut self, quest_id: &str) -> Option<QuestGraph> {
        let graph = self.active_quests.remove(quest_id)?;
        info!("Abandoned quest: {}", quest_id);
        Some(graph)
    }

    /// Finish a quest whose tasks are all complete and move it to the
    /// completed list
    pub fn turn_in(&mut self, quest_id: &str) -> Option<QuestReward> {
        let graph = self.active_quests.get_mut(quest_id)?;
        if !graph.complete_quest() {
            return None;
        }

        let reward = QuestReward::of(graph);
        self.active_quests.remove(quest_id);
        self.completed_quests.push(quest_id.to_string());
        info!(
            "Quest {} turned in for {} gold, {} xp",
            quest_id, reward.gold, reward.xp
        );
        Some(reward)
    }

    pub fn get_quest(&self, quest_id: &str) -> Option<&QuestGraph> {
        self.active_quests.get(quest_id)
    }

    pub fn get_quest_mut(&mut self, quest_id: &str) -> Option<&mut QuestGraph> {
        self.active_quests.get_mut(quest_id)
    }

    pub fn active_quests(&self) -> impl Iterator<Item = &QuestGraph> {
        self.active_quests.values()
    }

    pub fn completed_quests(&self) -> &[String] {
        &self.completed_quests
    }

    pub fn is_quest_active(&self, quest_id: &str) -> bool {
        self.active_quests.contains_key(quest_id)
    }

    pub fn is_quest_completed(&self, quest_id: &str) -> bool {
        self.completed_quests.iter().any(|id| id == quest_id)
    }

    /// Run initialize hooks for every active quest
    pub fn init_all<E>(&mut self, dispatcher: &BehaviorDispatcher<E>, world: &mut QuestWorld<'_, E>) {
        let location = world.map.current_location_tag();
        for graph in self.active_quests.values_mut() {
            dispatcher.initialize(graph, &location, world);
        }
    }

    /// Run advance hooks for every active quest.
    /// Returns (quest_id, task_id) for each task completed.
    pub fn tick_all<E>(
        &mut self,
        dispatcher: &BehaviorDispatcher<E>,
        world: &mut QuestWorld<'_, E>,
    ) -> Vec<(String, String)> {
        let location = world.map.current_location_tag();
        let mut completed = Vec::new();
        for (quest_id, graph) in self.active_quests.iter_mut() {
            completed.extend(
                dispatcher
                    .advance(graph, &location, world)
                    .into_iter()
                    .map(|task_id| (quest_id.clone(), task_id)),
            );
        }
        completed
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Restore a saved log, validating every quest in it
    pub fn from_json(json: &str) -> Result<Self, DefinitionError> {
        let mut log: QuestLog = serde_json::from_str(json)?;
        for graph in log.active_quests.values_mut() {
            graph.fill_edge_table();
            graph.validate()?;
        }
        Ok(log)
    }
}
