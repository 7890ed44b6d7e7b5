//! Quest Definition Structures
//!
//! Authored quests come from TOML files; saved quests round-trip through the
//! JSON quest record. Both paths end in a validated `QuestGraph`.

use std::collections::BTreeMap;

use serde::Deserialize;

use super::graph::QuestGraph;
use super::task::{DependencyEdge, Task, TaskKind};
use crate::error::DefinitionError;

/// A quest definition loaded from TOML
#[derive(Debug, Clone, Deserialize)]
pub struct RawQuestFile {
    pub quest: RawQuest,
}

/// Raw quest data as it appears in TOML
#[derive(Debug, Clone, Deserialize)]
pub struct RawQuest {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub gold_reward: u32,
    #[serde(default)]
    pub xp_reward: u32,
    #[serde(default)]
    pub tasks: Vec<RawTask>,
    #[serde(default)]
    pub dependencies: Vec<RawDependency>,
}

/// Raw task as it appears in TOML
#[derive(Debug, Clone, Deserialize)]
pub struct RawTask {
    pub id: String,
    pub kind: String,
    /// Property name -> value, e.g. TARGET_LOCATION = "CAVE"
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
}

/// `source` needs `destination` done first
#[derive(Debug, Clone, Deserialize)]
pub struct RawDependency {
    pub source: String,
    pub destination: String,
}

impl QuestGraph {
    /// Build a graph from raw TOML data
    pub fn from_raw(raw: &RawQuest) -> Result<Self, DefinitionError> {
        if raw.id.is_empty() {
            return Err(DefinitionError::EmptyQuestId);
        }
        if raw.tasks.is_empty() {
            return Err(DefinitionError::NoTasks(raw.id.clone()));
        }

        let mut tasks = BTreeMap::new();
        for raw_task in &raw.tasks {
            if raw_task.id.is_empty() {
                return Err(DefinitionError::EmptyTaskId(raw.id.clone()));
            }
            let kind = TaskKind::parse(&raw_task.kind).ok_or_else(|| DefinitionError::UnknownKind {
                task: raw_task.id.clone(),
                kind: raw_task.kind.clone(),
            })?;

            let task = raw_task
                .properties
                .iter()
                .fold(Task::new(&raw_task.id, kind), |task, (name, value)| {
                    task.with_raw_property(name, value)
                });

            if tasks.insert(raw_task.id.clone(), task).is_some() {
                return Err(DefinitionError::DuplicateTask(raw_task.id.clone()));
            }
        }

        let mut graph = QuestGraph::new(&raw.id, &raw.title).with_rewards(raw.gold_reward, raw.xp_reward);
        graph.set_tasks(tasks);

        for dependency in &raw.dependencies {
            let edge = DependencyEdge::new(&dependency.source, &dependency.destination);
            graph.check_endpoints(&edge)?;
            if graph.cycle_would_be_created(&edge) {
                return Err(DefinitionError::Cycle {
                    source_id: edge.source_id,
                    destination_id: edge.destination_id,
                });
            }
            graph.add_dependency(edge);
        }

        Ok(graph)
    }

    pub fn from_toml(content: &str) -> Result<Self, DefinitionError> {
        let raw: RawQuestFile = toml::from_str(content)?;
        Self::from_raw(&raw.quest)
    }

    /// Decode a quest record and check it is well formed
    pub fn from_json(json: &str) -> Result<Self, DefinitionError> {
        let mut graph: QuestGraph = serde_json::from_str(json)?;
        graph.fill_edge_table();
        graph.validate()?;
        Ok(graph)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Check the structural invariants of a graph that didn't go through
    /// `from_raw`
    pub fn validate(&self) -> Result<(), DefinitionError> {
        if self.quest_id().is_empty() {
            return Err(DefinitionError::EmptyQuestId);
        }

        for (key, task) in self.task_table() {
            if task.id().is_empty() {
                return Err(DefinitionError::EmptyTaskId(self.quest_id().to_string()));
            }
            if key != task.id() {
                return Err(DefinitionError::MismatchedTaskKey {
                    key: key.clone(),
                    id: task.id().to_string(),
                });
            }
        }

        for (key, edges) in self.edge_table() {
            for edge in edges {
                if *key != edge.source_id {
                    return Err(DefinitionError::MisplacedEdge {
                        key: key.clone(),
                        source_id: edge.source_id.clone(),
                        destination_id: edge.destination_id.clone(),
                    });
                }
                self.check_endpoints(edge)?;
                // Acyclic iff no edge can find its way back to its own source
                if self.cycle_would_be_created(edge) {
                    return Err(DefinitionError::Cycle {
                        source_id: edge.source_id.clone(),
                        destination_id: edge.destination_id.clone(),
                    });
                }
            }
        }

        if self.is_quest_complete() && !self.all_tasks_complete() {
            return Err(DefinitionError::PrematureCompletion(self.quest_id().to_string()));
        }

        Ok(())
    }

    fn check_endpoints(&self, edge: &DependencyEdge) -> Result<(), DefinitionError> {
        [&edge.source_id, &edge.destination_id]
            .into_iter()
            .find(|id| !self.is_valid(id))
            .map_or(Ok(()), |missing| {
                Err(DefinitionError::UnknownEndpoint {
                    source_id: edge.source_id.clone(),
                    destination_id: edge.destination_id.clone(),
                    missing: missing.clone(),
                })
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quest::task::TaskProperty;

    const HERBALIST: &str = r#"
[quest]
id = "herbalist"
title = "The Herbalist"
gold_reward = 25
xp_reward = 50

[[quest.tasks]]
id = "pick_mushrooms"
kind = "fetch"
[quest.tasks.properties]
TARGET_LOCATION = "CAVE"
TARGET_TYPE = "mushroom"
TARGET_NUM = "2"

[[quest.tasks]]
id = "bring_back"
kind = "RETURN"

[[quest.dependencies]]
source = "bring_back"
destination = "pick_mushrooms"
"#;

    #[test]
    fn test_parse_toml_quest() {
        let graph = QuestGraph::from_toml(HERBALIST).unwrap();

        assert_eq!(graph.quest_id(), "herbalist");
        assert_eq!(graph.quest_title(), "The Herbalist");
        assert_eq!(graph.gold_reward(), 25);
        assert_eq!(graph.xp_reward(), 50);
        assert_eq!(graph.task_count(), 2);

        let pick = graph.task("pick_mushrooms").unwrap();
        assert_eq!(pick.kind(), TaskKind::Fetch);
        assert_eq!(pick.property(TaskProperty::TargetLocation), Some("CAVE"));
        assert_eq!(pick.property(TaskProperty::TargetNum), Some("2"));

        assert!(graph.has_dependencies("bring_back"));
        assert!(!graph.is_available("bring_back"));
        assert!(graph.is_available("pick_mushrooms"));
    }

    fn raw(tasks: &[(&str, &str)], dependencies: &[(&str, &str)]) -> RawQuest {
        RawQuest {
            id: "q".to_string(),
            title: "Q".to_string(),
            gold_reward: 0,
            xp_reward: 0,
            tasks: tasks
                .iter()
                .map(|(id, kind)| RawTask {
                    id: id.to_string(),
                    kind: kind.to_string(),
                    properties: BTreeMap::new(),
                })
                .collect(),
            dependencies: dependencies
                .iter()
                .map(|(source, destination)| RawDependency {
                    source: source.to_string(),
                    destination: destination.to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_rejects_malformed_definitions() {
        assert!(matches!(
            QuestGraph::from_raw(&raw(&[], &[])),
            Err(DefinitionError::NoTasks(_))
        ));
        assert!(matches!(
            QuestGraph::from_raw(&raw(&[("a", "collect")], &[])),
            Err(DefinitionError::UnknownKind { .. })
        ));
        assert!(matches!(
            QuestGraph::from_raw(&raw(&[("a", "kill"), ("a", "fetch")], &[])),
            Err(DefinitionError::DuplicateTask(_))
        ));
        assert!(matches!(
            QuestGraph::from_raw(&raw(&[("", "kill")], &[])),
            Err(DefinitionError::EmptyTaskId(_))
        ));
        assert!(matches!(
            QuestGraph::from_raw(&raw(&[("a", "kill")], &[("a", "ghost")])),
            Err(DefinitionError::UnknownEndpoint { ref missing, .. }) if missing == "ghost"
        ));
    }

    #[test]
    fn test_rejects_cycles() {
        let result = QuestGraph::from_raw(&raw(
            &[("a", "kill"), ("b", "kill"), ("c", "kill")],
            &[("a", "b"), ("b", "c"), ("c", "a")],
        ));
        assert!(matches!(result, Err(DefinitionError::Cycle { .. })));

        // Diamond is fine
        let result = QuestGraph::from_raw(&raw(
            &[("a", "kill"), ("b", "kill"), ("c", "kill"), ("d", "kill")],
            &[("a", "b"), ("a", "c"), ("b", "d"), ("c", "d")],
        ));
        assert!(result.is_ok());
    }

    #[test]
    fn test_json_round_trip() {
        let mut graph = QuestGraph::from_toml(HERBALIST).unwrap();
        graph.mark_complete("pick_mushrooms");

        let json = graph.to_json().unwrap();
        let restored = QuestGraph::from_json(&json).unwrap();

        assert_eq!(restored, graph);
        assert!(restored.task("pick_mushrooms").unwrap().is_complete());
        assert!(restored.is_available("bring_back"));
    }

    #[test]
    fn test_json_record_field_names() {
        let graph = QuestGraph::from_toml(HERBALIST).unwrap();
        let value: serde_json::Value = serde_json::from_str(&graph.to_json().unwrap()).unwrap();

        assert_eq!(value["questId"], "herbalist");
        assert_eq!(value["questTitle"], "The Herbalist");
        assert_eq!(value["goldReward"], 25);
        assert_eq!(value["xpReward"], 50);
        assert_eq!(value["questComplete"], false);
        assert_eq!(value["tasks"]["pick_mushrooms"]["kind"], "FETCH");
        assert_eq!(
            value["tasks"]["pick_mushrooms"]["properties"]["TARGET_TYPE"],
            "mushroom"
        );
        assert_eq!(value["edges"]["bring_back"][0]["destinationId"], "pick_mushrooms");
        assert_eq!(value["edges"]["pick_mushrooms"], serde_json::json!([]));
    }

    #[test]
    fn test_json_fills_missing_edge_lists() {
        let json = r#"{
            "questId": "q",
            "questTitle": "Q",
            "tasks": { "a": { "id": "a", "kind": "KILL" } }
        }"#;
        let graph = QuestGraph::from_json(json).unwrap();
        assert!(graph.edge_table().contains_key("a"));
        assert!(!graph.task("a").unwrap().is_complete());
    }

    #[test]
    fn test_json_rejects_broken_records() {
        let mismatched = r#"{
            "questId": "q", "questTitle": "Q",
            "tasks": { "a": { "id": "b", "kind": "KILL" } }
        }"#;
        assert!(matches!(
            QuestGraph::from_json(mismatched),
            Err(DefinitionError::MismatchedTaskKey { .. })
        ));

        let cyclic = r#"{
            "questId": "q", "questTitle": "Q",
            "tasks": {
                "a": { "id": "a", "kind": "KILL" },
                "b": { "id": "b", "kind": "KILL" }
            },
            "edges": {
                "a": [{ "sourceId": "a", "destinationId": "b" }],
                "b": [{ "sourceId": "b", "destinationId": "a" }]
            }
        }"#;
        assert!(matches!(
            QuestGraph::from_json(cyclic),
            Err(DefinitionError::Cycle { .. })
        ));

        let premature = r#"{
            "questId": "q", "questTitle": "Q", "questComplete": true,
            "tasks": { "a": { "id": "a", "kind": "KILL" } }
        }"#;
        assert!(matches!(
            QuestGraph::from_json(premature),
            Err(DefinitionError::PrematureCompletion(_))
        ));

        assert!(matches!(
            QuestGraph::from_json(r#"{ "questId": "q" }"#),
            Err(DefinitionError::Json(_))
        ));
    }
}
