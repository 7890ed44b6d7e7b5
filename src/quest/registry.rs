//! Quest Registry
//!
//! Loads and caches quest definitions from a data directory. Authored quests
//! are TOML, saved quest records are JSON.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use super::graph::QuestGraph;
use crate::error::DefinitionError;

/// Registry for all quest definitions
pub struct QuestRegistry {
    /// Loaded quests as read from disk. Saved `.json` records keep their
    /// completion flags.
    quests: HashMap<String, QuestGraph>,
    /// Base directory for quest data
    data_dir: PathBuf,
}

impl QuestRegistry {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            quests: HashMap::new(),
            data_dir: data_dir.join("quests"),
        }
    }

    /// Load every quest file under the data directory.
    ///
    /// Files that fail to load are logged and skipped. Returns how many
    /// quests were loaded.
    pub fn load_all(&mut self) -> Result<usize, DefinitionError> {
        info!("Loading quests from {:?}", self.data_dir);

        if !self.data_dir.exists() {
            warn!("Quest directory does not exist: {:?}", self.data_dir);
            return Ok(0);
        }

        let mut paths = Vec::new();
        collect_quest_files(&self.data_dir, &mut paths)?;
        paths.sort();

        let mut count = 0;
        for path in paths {
            match self.load_quest_file(&path) {
                Ok(()) => count += 1,
                Err(e) => warn!("Failed to load quest {:?}: {}", path, e),
            }
        }

        info!("Loaded {} quest definitions", count);
        Ok(count)
    }

    /// Load a single quest file
    pub fn load_quest_file(&mut self, path: &Path) -> Result<(), DefinitionError> {
        let content = std::fs::read_to_string(path).map_err(|source| DefinitionError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let graph = match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => QuestGraph::from_json(&content)?,
            _ => QuestGraph::from_toml(&content)?,
        };

        if self.quests.contains_key(graph.quest_id()) {
            warn!("Duplicate quest ID '{}' in {:?}, overwriting", graph.quest_id(), path);
        }
        info!("Loaded quest: {} ({})", graph.quest_title(), graph.quest_id());

        self.quests.insert(graph.quest_id().to_string(), graph);
        Ok(())
    }

    /// An independent copy of a loaded quest
    pub fn get(&self, quest_id: &str) -> Option<QuestGraph> {
        self.quests.get(quest_id).cloned()
    }

    pub fn contains(&self, quest_id: &str) -> bool {
        self.quests.contains_key(quest_id)
    }

    /// Get all quest IDs
    pub fn all_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.quests.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Get count of loaded quests
    pub fn count(&self) -> usize {
        self.quests.len()
    }
}

/// Recursively collect `.toml` and `.json` files
fn collect_quest_files(dir: &Path, paths: &mut Vec<PathBuf>) -> Result<(), DefinitionError> {
    let io_error = |source| DefinitionError::Io {
        path: dir.to_path_buf(),
        source,
    };

    for entry in std::fs::read_dir(dir).map_err(io_error)? {
        let entry = entry.map_err(io_error)?;
        let file_type = entry.file_type().map_err(io_error)?;
        let path = entry.path();

        // Symlinked directories are not followed
        if file_type.is_symlink() && path.is_dir() {
            warn!("Skipping symlinked quest directory {:?}", path);
        } else if file_type.is_dir() {
            collect_quest_files(&path, paths)?;
        } else if path
            .extension()
            .is_some_and(|ext| ext == "toml" || ext == "json")
        {
            paths.push(path);
        }
    }

    Ok(())
}
