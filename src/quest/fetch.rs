//! Fetch Task Behavior
//!
//! Spawns the items a fetch task asks for and remembers where they are, so a
//! reload puts them back in the same spots. The task completes once every
//! remembered position has been picked up (the host empties the list).

use tracing::{debug, warn};

use super::dispatcher::QuestWorld;
use super::task::{Task, TaskProperty};
use crate::ports::{EntityConfig, Position, ProfileExt, ProfilePort, QuestEntity};

/// Resolve the entity configuration the task points at
fn target_config<E>(task: &Task, world: &QuestWorld<'_, E>) -> Option<EntityConfig> {
    let target_type = match task.property(TaskProperty::TargetType) {
        Some(target) if !target.is_empty() => target,
        _ => {
            debug!("Fetch task '{}' has no target type", task.id());
            return None;
        }
    };

    let config = world.entities.entity_config(target_type);
    if config.is_none() {
        debug!("No entity config '{}' for fetch task '{}'", target_type, task.id());
    }
    config
}

pub fn initialize<E: QuestEntity>(quest_id: &str, task: &mut Task, world: &mut QuestWorld<'_, E>) {
    let Some(config) = target_config(task, world) else {
        return;
    };

    let positions = match world.profile.get_value(&config.entity_id) {
        // Saved game: respawn where the items were left
        Some(stored) => match serde_json::from_value::<Vec<Position>>(stored) {
            Ok(stored) => stored,
            Err(e) => {
                warn!(
                    "Profile entry '{}' is not a position list, skipping {}/{}: {}",
                    config.entity_id,
                    quest_id,
                    task.id(),
                    e
                );
                return;
            }
        },
        None => match world.map.quest_item_spawn_positions(quest_id, task.id()) {
            Some(spawns) if !spawns.is_empty() => spawns,
            // An empty list is never saved: advance would read it as "all picked up"
            _ => {
                debug!("No spawn positions for {}/{}", quest_id, task.id());
                return;
            }
        },
    };

    let entities: Vec<E> = positions
        .iter()
        .map(|position| {
            let mut entity = world.entities.instantiate(&config, *position);
            entity.set_current_quest_id(quest_id);
            entity
        })
        .collect();

    debug!(
        "Spawned {} '{}' for quest {}",
        entities.len(),
        config.entity_id,
        quest_id
    );
    world.map.accept_quest_entities(entities);
    world.profile.put(&config.entity_id, &positions);
}

pub fn advance<E: QuestEntity>(_quest_id: &str, task: &mut Task, world: &mut QuestWorld<'_, E>) {
    let Some(config) = target_config(task, world) else {
        return;
    };

    let Some(remaining) = world.profile.get::<Vec<Position>>(&config.entity_id) else {
        return;
    };

    // Every item has been picked up
    if remaining.is_empty() {
        task.mark_complete();
    }
}
