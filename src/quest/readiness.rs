//! Task Readiness
//!
//! Availability is computed on demand from the completion flags of each
//! task's prerequisites. Nothing is pushed downstream when a task completes.

use tracing::debug;

use super::graph::QuestGraph;
use super::task::{TaskKind, TaskProperty};

impl QuestGraph {
    /// A task is available once every prerequisite is complete (or unknown)
    pub fn is_available(&self, id: &str) -> bool {
        if !self.is_valid(id) {
            return false;
        }

        self.dependencies(id)
            .iter()
            .filter(|edge| edge.source_id == id)
            .all(|edge| {
                self.task(&edge.destination_id)
                    .is_none_or(|prerequisite| prerequisite.is_complete())
            })
    }

    /// Ids of open tasks the player can work on right now
    pub fn available_tasks(&self) -> Vec<&str> {
        self.all_tasks()
            .filter(|task| !task.is_complete() && self.is_available(task.id()))
            .map(|task| task.id())
            .collect()
    }

    /// Mark a task complete. Unknown ids are ignored.
    pub fn mark_complete(&mut self, id: &str) -> bool {
        let Some(task) = self.task_mut(id) else {
            debug!("Ignoring completion of unknown task '{}'", id);
            return false;
        };
        task.mark_complete()
    }

    /// Whether the dispatcher should run hooks for this task in `location`
    pub fn is_active_at(&self, id: &str, location: &str) -> bool {
        let Some(task) = self.task(id) else {
            return false;
        };
        if task.is_complete() || !self.is_available(id) {
            return false;
        }

        match task.property(TaskProperty::TargetLocation) {
            Some(target) if !target.is_empty() => target.eq_ignore_ascii_case(location),
            _ => false,
        }
    }

    /// Complete every RETURN task once nothing else is blocked.
    ///
    /// Returns false without touching anything if some open task is still
    /// waiting on a prerequisite.
    pub fn update_return_phase(&mut self) -> bool {
        let blocked = self
            .all_tasks()
            .any(|task| !task.is_complete() && !self.is_available(task.id()));
        if blocked {
            return false;
        }

        let ready: Vec<String> = self
            .all_tasks()
            .filter(|task| task.kind() == TaskKind::Return && !task.is_complete())
            .map(|task| task.id().to_string())
            .collect();

        for id in &ready {
            self.mark_complete(id);
            debug!("Return task '{}' complete for quest {}", id, self.quest_id());
        }

        !ready.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use crate::quest::graph::QuestGraph;
    use crate::quest::graph::tests::graph_with;
    use crate::quest::task::{DependencyEdge, Task, TaskKind, TaskProperty};

    #[test]
    fn test_linear_chain() {
        // a needs b, b needs c
        let mut graph = graph_with(&["a", "b", "c"], &[("a", "b"), ("b", "c")]);

        assert!(graph.is_available("c"));
        assert!(!graph.is_available("b"));
        assert!(!graph.is_available("a"));
        assert_eq!(graph.available_tasks(), vec!["c"]);

        graph.mark_complete("c");
        assert!(graph.is_available("b"));
        assert!(!graph.is_available("a"));

        graph.mark_complete("b");
        assert!(graph.is_available("a"));
        assert!(!graph.all_tasks_complete());

        graph.mark_complete("a");
        assert!(graph.all_tasks_complete());
    }

    #[test]
    fn test_availability_ignores_completion() {
        let mut graph = graph_with(&["a"], &[]);
        graph.mark_complete("a");
        assert!(graph.is_available("a"));
        assert!(graph.available_tasks().is_empty());
    }

    #[test]
    fn test_unknown_ids() {
        let mut graph = graph_with(&["a"], &[]);
        assert!(!graph.is_available("missing"));
        assert!(!graph.mark_complete("missing"));
        assert!(!graph.task("a").unwrap().is_complete());
    }

    #[test]
    fn test_unknown_destination_does_not_block() {
        let mut graph = graph_with(&["a"], &[]);
        graph.add_dependency(DependencyEdge::new("a", "ghost"));
        assert!(graph.is_available("a"));
    }

    #[test]
    fn test_completion_is_monotonic() {
        let mut graph = graph_with(&["a", "b"], &[("a", "b")]);
        graph.mark_complete("a");
        graph.mark_complete("a");
        graph.update_return_phase();
        assert!(graph.task("a").unwrap().is_complete());
    }

    #[test]
    fn test_active_at_location() {
        let mut graph = QuestGraph::new("q", "Q");
        graph.set_tasks(
            [
                Task::new("cave", TaskKind::Fetch)
                    .with_property(TaskProperty::TargetLocation, "CAVE"),
                Task::new("anywhere", TaskKind::Fetch),
                Task::new("blank", TaskKind::Fetch)
                    .with_property(TaskProperty::TargetLocation, ""),
            ]
            .into_iter()
            .map(|task| (task.id().to_string(), task))
            .collect(),
        );

        assert!(graph.is_active_at("cave", "cave"));
        assert!(graph.is_active_at("cave", "CAVE"));
        assert!(!graph.is_active_at("cave", "forest"));
        assert!(!graph.is_active_at("anywhere", "cave"));
        assert!(!graph.is_active_at("blank", ""));

        graph.mark_complete("cave");
        assert!(!graph.is_active_at("cave", "cave"));
    }

    fn return_quest() -> QuestGraph {
        let mut graph = QuestGraph::new("q", "Q");
        graph.set_tasks(
            [
                Task::new("report", TaskKind::Return),
                Task::new("collect_bounty", TaskKind::Return),
                Task::new("slay", TaskKind::Kill),
                Task::new("scout", TaskKind::Discover),
            ]
            .into_iter()
            .map(|task| (task.id().to_string(), task))
            .collect(),
        );
        graph.add_dependency(DependencyEdge::new("report", "slay"));
        graph.add_dependency(DependencyEdge::new("collect_bounty", "slay"));
        graph
    }

    #[test]
    fn test_return_phase_marks_all_ready_returns() {
        let mut graph = return_quest();
        graph.mark_complete("slay");
        graph.mark_complete("scout");

        assert!(graph.update_return_phase());
        assert!(graph.task("report").unwrap().is_complete());
        assert!(graph.task("collect_bounty").unwrap().is_complete());
        assert!(graph.all_tasks_complete());

        // Nothing left to mark
        assert!(!graph.update_return_phase());
    }

    #[test]
    fn test_return_phase_blocked_by_unavailable_task() {
        let mut graph = return_quest();
        graph.add_dependency(DependencyEdge::new("scout", "slay"));

        assert!(!graph.update_return_phase());
        assert!(!graph.task("report").unwrap().is_complete());
        assert!(!graph.task("collect_bounty").unwrap().is_complete());
    }

    #[test]
    fn test_return_phase_without_return_tasks() {
        let mut graph = graph_with(&["a"], &[]);
        assert!(!graph.update_return_phase());
        assert!(!graph.task("a").unwrap().is_complete());
    }
}
