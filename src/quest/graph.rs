//! Quest Graph
//!
//! Tasks keyed by id plus an adjacency list of dependency edges. Edges carry
//! plain string endpoints; the graph owns everything it references.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::task::{DependencyEdge, Task};

/// A quest: its rewards, its tasks and the dependencies between them
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestGraph {
    quest_id: String,
    quest_title: String,
    #[serde(default)]
    gold_reward: u32,
    #[serde(default)]
    xp_reward: u32,
    #[serde(default)]
    quest_complete: bool,
    #[serde(default)]
    tasks: BTreeMap<String, Task>,
    /// Edges keyed by their source task id
    #[serde(default)]
    edges: BTreeMap<String, Vec<DependencyEdge>>,
}

impl QuestGraph {
    pub fn new(quest_id: impl Into<String>, quest_title: impl Into<String>) -> Self {
        Self {
            quest_id: quest_id.into(),
            quest_title: quest_title.into(),
            ..Self::default()
        }
    }

    pub fn with_rewards(mut self, gold_reward: u32, xp_reward: u32) -> Self {
        self.gold_reward = gold_reward;
        self.xp_reward = xp_reward;
        self
    }

    pub fn quest_id(&self) -> &str {
        &self.quest_id
    }

    pub fn quest_title(&self) -> &str {
        &self.quest_title
    }

    pub fn gold_reward(&self) -> u32 {
        self.gold_reward
    }

    pub fn xp_reward(&self) -> u32 {
        self.xp_reward
    }

    pub fn is_quest_complete(&self) -> bool {
        self.quest_complete
    }

    /// Flag the quest as finished. Refused while any task is still open.
    pub fn complete_quest(&mut self) -> bool {
        if !self.all_tasks_complete() {
            return false;
        }
        self.quest_complete = true;
        true
    }

    /// Replace the task table. Every task starts with no dependencies.
    pub fn set_tasks(&mut self, tasks: BTreeMap<String, Task>) {
        self.edges = tasks.keys().map(|id| (id.clone(), Vec::new())).collect();
        self.tasks = tasks;
    }

    /// Append an edge to its source's list. An unknown source is ignored; the
    /// destination is checked by the caller.
    pub fn add_dependency(&mut self, edge: DependencyEdge) {
        if !self.is_valid(&edge.source_id) {
            debug!(
                "Ignoring dependency {} -> {}: unknown source",
                edge.source_id, edge.destination_id
            );
            return;
        }
        self.edges
            .entry(edge.source_id.clone())
            .or_default()
            .push(edge);
    }

    pub fn clear(&mut self) {
        self.tasks.clear();
        self.edges.clear();
    }

    pub fn is_valid(&self, id: &str) -> bool {
        self.tasks.contains_key(id)
    }

    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.get(id)
    }

    pub(crate) fn task_mut(&mut self, id: &str) -> Option<&mut Task> {
        self.tasks.get_mut(id)
    }

    /// Edges originating at `id`
    pub fn dependencies(&self, id: &str) -> &[DependencyEdge] {
        self.edges.get(id).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn has_dependencies(&self, id: &str) -> bool {
        self.is_valid(id) && !self.dependencies(id).is_empty()
    }

    /// Whether a chain of edges leads from `source` to `sink`
    pub fn is_reachable(&self, source: &str, sink: &str) -> bool {
        if !self.is_valid(source) || !self.is_valid(sink) {
            return false;
        }

        let mut visited: HashSet<&str> = HashSet::new();
        let mut stack = vec![source];

        while let Some(node) = stack.pop() {
            if node == sink {
                return true;
            }
            if !visited.insert(node) {
                continue;
            }
            for edge in self.dependencies(node) {
                let next = edge.destination_id.as_str();
                if !visited.contains(next) {
                    stack.push(next);
                }
            }
        }

        false
    }

    /// Whether adding `edge` would close a loop
    pub fn cycle_would_be_created(&self, edge: &DependencyEdge) -> bool {
        edge.source_id == edge.destination_id
            || self.is_reachable(&edge.destination_id, &edge.source_id)
    }

    pub fn all_tasks(&self) -> impl Iterator<Item = &Task> {
        self.tasks.values()
    }

    pub fn task_ids(&self) -> impl Iterator<Item = &String> {
        self.tasks.keys()
    }

    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    pub fn all_tasks_complete(&self) -> bool {
        self.tasks.values().all(Task::is_complete)
    }

    pub(crate) fn edge_table(&self) -> &BTreeMap<String, Vec<DependencyEdge>> {
        &self.edges
    }

    pub(crate) fn task_table(&self) -> &BTreeMap<String, Task> {
        &self.tasks
    }

    /// Give every task an edge list, even if the record omitted it
    pub(crate) fn fill_edge_table(&mut self) {
        for id in self.tasks.keys() {
            if !self.edges.contains_key(id) {
                self.edges.insert(id.clone(), Vec::new());
            }
        }
    }
}
