//! Quest System Module
//!
//! Quests are graphs of tasks joined by dependency edges. Readiness is
//! computed from completion flags; per-kind behaviors spawn and track what a
//! task needs in the world.

pub mod definition;
pub mod dispatcher;
pub mod fetch;
pub mod graph;
pub mod log;
pub mod readiness;
pub mod registry;
pub mod task;

pub use definition::{RawDependency, RawQuest, RawQuestFile, RawTask};
pub use dispatcher::{Behavior, BehaviorDispatcher, Hook, QuestWorld};
pub use graph::QuestGraph;
pub use log::{QuestLog, QuestReward};
pub use registry::QuestRegistry;
pub use task::{DependencyEdge, Task, TaskKind, TaskProperty};
