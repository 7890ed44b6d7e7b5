//! Quest graph engine.
//!
//! Tracks which quest tasks a player can work on, which are done, and what a
//! task needs spawned in the world when the player is in the right place.
//! The map, entity and profile subsystems are reached through the traits in
//! [`ports`].

pub mod engine;
pub mod error;
pub mod ports;
pub mod profile;
pub mod quest;

pub use engine::QuestEngine;
pub use error::DefinitionError;
pub use ports::{EntityConfig, EntityPort, MapPort, Position, ProfileExt, ProfilePort, QuestEntity};
pub use profile::MemoryProfile;
pub use quest::{
    Behavior, BehaviorDispatcher, DependencyEdge, QuestGraph, QuestLog, QuestRegistry, QuestReward,
    QuestWorld, Task, TaskKind, TaskProperty,
};
