//! Collaborator Ports
//!
//! The engine only talks to the outside world through these traits. The host
//! implements them on top of its map, entity and profile subsystems.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// A 2D world position
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Resolved entity configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityConfig {
    /// Unique entity id; fetch tasks persist item positions under it
    pub entity_id: String,
    #[serde(default)]
    pub display_name: String,
}

impl EntityConfig {
    pub fn new(entity_id: impl Into<String>) -> Self {
        Self {
            entity_id: entity_id.into(),
            display_name: String::new(),
        }
    }
}

/// An instantiated entity that can be claimed by a quest
pub trait QuestEntity {
    fn current_quest_id(&self) -> Option<&str>;
    fn set_current_quest_id(&mut self, quest_id: &str);
}

/// The world/map subsystem
pub trait MapPort<E> {
    /// Tag of the map the player is on
    fn current_location_tag(&self) -> String;

    /// Where items for a quest task should appear. `None` if the map has no
    /// spawn data for the task.
    fn quest_item_spawn_positions(&self, quest_id: &str, task_id: &str) -> Option<Vec<Position>>;

    /// Take ownership of freshly spawned quest entities
    fn accept_quest_entities(&mut self, entities: Vec<E>);
}

/// The entity subsystem
pub trait EntityPort {
    /// Handle of a spawned entity; quest hooks need it to be `QuestEntity`
    type Entity;

    fn entity_config(&self, type_id: &str) -> Option<EntityConfig>;

    fn instantiate(&mut self, config: &EntityConfig, position: Position) -> Self::Entity;
}

/// The player profile: an untyped key/value bag
pub trait ProfilePort {
    fn get_value(&self, key: &str) -> Option<serde_json::Value>;

    fn put_value(&mut self, key: &str, value: serde_json::Value);
}

/// Typed access to a profile. Each call site names the shape it expects.
pub trait ProfileExt: ProfilePort {
    /// Read `key` as `T`. A value of another shape reads as absent.
    fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = self.get_value(key)?;
        match serde_json::from_value(value) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                warn!("Profile entry '{}' has unexpected shape: {}", key, e);
                None
            }
        }
    }

    fn put<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) {
        match serde_json::to_value(value) {
            Ok(json) => self.put_value(key, json),
            Err(e) => warn!("Failed to encode profile entry '{}': {}", key, e),
        }
    }
}

impl<P: ProfilePort + ?Sized> ProfileExt for P {}
