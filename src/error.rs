use std::path::PathBuf;

use thiserror::Error;

/// A quest definition that can't be turned into a well-formed graph
#[derive(Debug, Error)]
pub enum DefinitionError {
    #[error("IO error reading {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("quest has an empty id")]
    EmptyQuestId,
    #[error("quest '{0}' has no tasks")]
    NoTasks(String),
    #[error("quest '{0}' has a task with an empty id")]
    EmptyTaskId(String),
    #[error("task '{0}' is defined more than once")]
    DuplicateTask(String),
    #[error("task '{task}' has unknown kind '{kind}'")]
    UnknownKind { task: String, kind: String },
    #[error("task stored under '{key}' has id '{id}'")]
    MismatchedTaskKey { key: String, id: String },
    #[error("dependency {source_id} -> {destination_id} references unknown task '{missing}'")]
    UnknownEndpoint {
        source_id: String,
        destination_id: String,
        missing: String,
    },
    #[error("dependency {source_id} -> {destination_id} is stored under '{key}'")]
    MisplacedEdge {
        key: String,
        source_id: String,
        destination_id: String,
    },
    #[error("dependency {source_id} -> {destination_id} would create a cycle")]
    Cycle {
        source_id: String,
        destination_id: String,
    },
    #[error("quest '{0}' is marked complete but has open tasks")]
    PrematureCompletion(String),
}
