//! Quest Task Model
//!
//! Value types for a single quest task and the edges between tasks.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Task kinds supported by the quest system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskKind {
    /// Pick up items spawned in the target location
    Fetch,
    /// Defeat a target
    Kill,
    /// Bring an item to someone
    Delivery,
    /// Protect a location or NPC
    Guard,
    /// Accompany an NPC
    Escort,
    /// Go back to the quest giver
    Return,
    /// Find a location
    Discover,
}

impl TaskKind {
    pub const ALL: [TaskKind; 7] = [
        TaskKind::Fetch,
        TaskKind::Kill,
        TaskKind::Delivery,
        TaskKind::Guard,
        TaskKind::Escort,
        TaskKind::Return,
        TaskKind::Discover,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskKind::Fetch => "FETCH",
            TaskKind::Kill => "KILL",
            TaskKind::Delivery => "DELIVERY",
            TaskKind::Guard => "GUARD",
            TaskKind::Escort => "ESCORT",
            TaskKind::Return => "RETURN",
            TaskKind::Discover => "DISCOVER",
        }
    }

    /// Parse a kind tag, ignoring case
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Property names the engine understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskProperty {
    /// Tag of the map where the task is active
    TargetLocation,
    /// Entity configuration to spawn or hunt
    TargetType,
    /// How many targets the task asks for (informational)
    TargetNum,
}

impl TaskProperty {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskProperty::TargetLocation => "TARGET_LOCATION",
            TaskProperty::TargetType => "TARGET_TYPE",
            TaskProperty::TargetNum => "TARGET_NUM",
        }
    }
}

/// A single quest task
///
/// The property bag is keyed by name so that unknown properties survive a
/// save/load cycle untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    id: String,
    kind: TaskKind,
    #[serde(default)]
    properties: BTreeMap<String, String>,
    #[serde(default)]
    complete: bool,
}

impl Task {
    pub fn new(id: impl Into<String>, kind: TaskKind) -> Self {
        Self {
            id: id.into(),
            kind,
            properties: BTreeMap::new(),
            complete: false,
        }
    }

    /// Set a recognized property
    pub fn with_property(mut self, name: TaskProperty, value: impl Into<String>) -> Self {
        self.properties.insert(name.as_str().to_string(), value.into());
        self
    }

    /// Set a property by raw name (kept even if the engine ignores it)
    pub fn with_raw_property(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> TaskKind {
        self.kind
    }

    pub fn property(&self, name: TaskProperty) -> Option<&str> {
        self.properties.get(name.as_str()).map(String::as_str)
    }

    pub fn raw_property(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }

    pub fn properties(&self) -> &BTreeMap<String, String> {
        &self.properties
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Mark the task complete. Returns true if this call changed the flag.
    pub fn mark_complete(&mut self) -> bool {
        let changed = !self.complete;
        self.complete = true;
        changed
    }
}

/// `source` can only be completed once `destination` is complete
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyEdge {
    pub source_id: String,
    pub destination_id: String,
}

impl DependencyEdge {
    pub fn new(source_id: impl Into<String>, destination_id: impl Into<String>) -> Self {
        Self {
            source_id: source_id.into(),
            destination_id: destination_id.into(),
        }
    }
}
