use std::collections::VecDeque;

use crate::tree::Tree;

/// Linear undo/redo over full tree snapshots.
///
/// Snapshots are [`Tree`] clones, which share structure with each other and with the
/// live tree, so keeping many of them is cheap.
#[derive(Debug, Clone, Default)]
pub struct History {
    /// Oldest first; the back is the state just before the current one
    past: VecDeque<Tree>,
    /// The back is the next state to redo
    future: Vec<Tree>,
    limit: Option<usize>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps at most `limit` undo steps, dropping the oldest first.
    pub fn with_limit(limit: Option<usize>) -> Self {
        Self {
            limit,
            ..Self::default()
        }
    }

    /// Record the tree as it was before an edit. Invalidates everything redoable.
    pub fn record(&mut self, previous: Tree) {
        self.past.push_back(previous);
        self.future.clear();
        if let Some(limit) = self.limit {
            while self.past.len() > limit {
                self.past.pop_front();
            }
        }
    }

    /// Swap `current` for the most recent past snapshot. Returns `false` when there is
    /// nothing to undo.
    pub fn undo(&mut self, current: &mut Tree) -> bool {
        match self.past.pop_back() {
            Some(previous) => {
                self.future.push(std::mem::replace(current, previous));
                true
            }
            None => false,
        }
    }

    /// Swap `current` for the most recently undone snapshot. Returns `false` when there
    /// is nothing to redo.
    pub fn redo(&mut self, current: &mut Tree) -> bool {
        match self.future.pop() {
            Some(next) => {
                self.past.push_back(std::mem::replace(current, next));
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn past_len(&self) -> usize {
        self.past.len()
    }

    pub fn future_len(&self) -> usize {
        self.future.len()
    }

    pub fn clear(&mut self) {
        self.past.clear();
        self.future.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{ContainerContent, Element, ElementContent};

    fn tree_with(ids: &[&str]) -> Tree {
        Tree::from_elements(
            ids.iter()
                .map(|id| Element::new(*id, ElementContent::Section(ContainerContent::default())))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn undo_then_redo_restores() {
        let mut history = History::new();
        let mut current = tree_with(&["a"]);
        history.record(current.clone());
        current = tree_with(&["a", "b"]);

        assert!(history.undo(&mut current));
        assert_eq!(current, tree_with(&["a"]));
        assert!(history.redo(&mut current));
        assert_eq!(current, tree_with(&["a", "b"]));
        assert!(!history.redo(&mut current));
    }

    #[test]
    fn empty_history_is_a_no_op() {
        let mut history = History::new();
        let mut current = tree_with(&["a"]);
        assert!(!history.undo(&mut current));
        assert!(!history.redo(&mut current));
        assert_eq!(current, tree_with(&["a"]));
    }

    #[test]
    fn record_clears_future() {
        let mut history = History::new();
        let mut current = tree_with(&["a"]);
        history.record(current.clone());
        current = tree_with(&["a", "b"]);
        history.undo(&mut current);
        assert!(history.can_redo());

        history.record(current.clone());
        assert_eq!(history.future_len(), 0);
        assert!(!history.redo(&mut current));
    }

    #[test]
    fn limit_drops_oldest() {
        let mut history = History::with_limit(Some(2));
        for n in 0..5 {
            history.record(tree_with(&[&n.to_string()]));
        }
        assert_eq!(history.past_len(), 2);

        let mut current = Tree::new();
        history.undo(&mut current);
        assert_eq!(current, tree_with(&["4"]));
        history.undo(&mut current);
        assert_eq!(current, tree_with(&["3"]));
        assert!(!history.can_undo());
    }
}
