//! Tree flattening with expand/collapse state.
//!
//! Converts a task forest into the ordered, depth-annotated row list that
//! both the chart and the hit-tester consume.

use std::collections::HashSet;

use crate::model::Task;

/// Set of task ids whose children are currently shown.
///
/// Membership is only ever changed explicitly; a group that is not in the
/// set renders collapsed regardless of its depth.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpandedSet {
    ids: HashSet<String>,
}

impl ExpandedSet {
    /// Create an empty set (everything collapsed).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a set holding every root id of the forest.
    pub fn with_roots(forest: &[Task]) -> Self {
        Self {
            ids: forest.iter().map(|task| task.id.clone()).collect(),
        }
    }

    /// Create a set holding every group id of the forest.
    pub fn with_all_groups(forest: &[Task]) -> Self {
        let mut set = Self::new();
        set.expand_all(forest);
        set
    }

    /// Check if a task is expanded.
    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Expand a task.
    pub fn expand(&mut self, id: impl Into<String>) {
        self.ids.insert(id.into());
    }

    /// Collapse a task.
    pub fn collapse(&mut self, id: &str) {
        self.ids.remove(id);
    }

    /// Flip the membership of `id`.
    pub fn toggle(&mut self, id: &str) {
        if self.contains(id) {
            self.collapse(id);
        } else {
            self.expand(id);
        }
    }

    /// Expand every group in the forest.
    pub fn expand_all(&mut self, forest: &[Task]) {
        for task in forest {
            self.expand_recursive(task);
        }
    }

    fn expand_recursive(&mut self, task: &Task) {
        if task.has_children() {
            self.expand(task.id.clone());
            for child in &task.children {
                self.expand_recursive(child);
            }
        }
    }

    /// Collapse everything.
    pub fn collapse_all(&mut self) {
        self.ids.clear();
    }

    /// Number of expanded ids.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Check if nothing is expanded.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// A visible task together with its nesting depth (0 = root).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlatRow<'a> {
    pub task: &'a Task,
    pub depth: usize,
}

/// Flatten a forest into visible rows, pre-order.
///
/// A group's children follow it (one level deeper, in their given order)
/// only if its id is in `expanded`. Ids are assumed unique across the
/// forest; duplicates give unspecified expansion results.
pub fn flatten<'a>(forest: &'a [Task], expanded: &ExpandedSet) -> Vec<FlatRow<'a>> {
    let mut rows = Vec::new();
    for root in forest {
        flatten_task(&mut rows, root, 0, expanded);
    }
    rows
}

fn flatten_task<'a>(
    rows: &mut Vec<FlatRow<'a>>,
    task: &'a Task,
    depth: usize,
    expanded: &ExpandedSet,
) {
    rows.push(FlatRow { task, depth });

    if expanded.contains(&task.id) {
        for child in &task.children {
            flatten_task(rows, child, depth + 1, expanded);
        }
    }
}
