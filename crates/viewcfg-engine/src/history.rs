use std::collections::VecDeque;
use viewcfg_types::ConfigurationChange;

pub const DEFAULT_MAX_CHANGES: usize = 100;

/// Undo/redo stacks of configuration changes.
///
/// The tracker only moves records between its stacks; applying a change to
/// a config is the caller's job (see [`EditSession`](crate::EditSession)).
#[derive(Debug)]
pub struct ChangeTracker {
    undo_stack: VecDeque<ConfigurationChange>,
    redo_stack: Vec<ConfigurationChange>,
    max_changes: usize,
}

impl Default for ChangeTracker {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CHANGES)
    }
}

impl ChangeTracker {
    pub fn new(max_changes: usize) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            max_changes,
        }
    }

    /// Record a new change. Clears the redo stack and drops the oldest
    /// entry once capacity is exceeded.
    pub fn track_change(&mut self, change: ConfigurationChange) {
        self.undo_stack.push_back(change);
        self.redo_stack.clear();

        while self.undo_stack.len() > self.max_changes {
            self.undo_stack.pop_front();
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Change the next [`undo`](Self::undo) would return, left in place
    pub fn peek_undo(&self) -> Option<&ConfigurationChange> {
        self.undo_stack.back()
    }

    pub fn peek_redo(&self) -> Option<&ConfigurationChange> {
        self.redo_stack.last()
    }

    /// Most recent change, moved onto the redo stack
    pub fn undo(&mut self) -> Option<ConfigurationChange> {
        let change = self.undo_stack.pop_back()?;
        self.redo_stack.push(change.clone());
        Some(change)
    }

    pub fn redo(&mut self) -> Option<ConfigurationChange> {
        let change = self.redo_stack.pop()?;
        self.undo_stack.push_back(change.clone());
        while self.undo_stack.len() > self.max_changes {
            self.undo_stack.pop_front();
        }
        Some(change)
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}
