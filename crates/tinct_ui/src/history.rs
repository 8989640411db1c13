//! Bounded undo/redo history

use std::collections::VecDeque;

use crate::constants::UNDO_STACK_LIMIT;

/// Past and undone states of a value, oldest past entries dropped first.
///
/// The owner keeps the current state itself. Before changing it, the owner
/// pushes the state it is leaving; `undo` and `redo` swap the current state
/// for a remembered one.
///
/// # Example
/// ```
/// use tinct_ui::UndoStack;
///
/// let mut history: UndoStack<[i32; 3]> = UndoStack::new(16);
/// history.push([0, 0, 0]);
///
/// let current = [255, 0, 0];
/// assert_eq!(history.undo(current), Some([0, 0, 0]));
/// assert_eq!(history.redo([0, 0, 0]), Some([255, 0, 0]));
/// ```
#[derive(Debug, Clone)]
pub struct UndoStack<T> {
    past: VecDeque<T>,
    undone: Vec<T>,
    limit: usize,
}

impl<T> Default for UndoStack<T> {
    fn default() -> Self {
        Self::new(UNDO_STACK_LIMIT)
    }
}

impl<T> UndoStack<T> {
    /// History remembering at most `limit` past states.
    pub fn new(limit: usize) -> Self {
        Self {
            past: VecDeque::new(),
            undone: Vec::new(),
            limit,
        }
    }

    /// Remember `left` as the state being replaced. Forgets anything undone.
    pub fn push(&mut self, left: T) {
        self.undone.clear();
        self.past.push_back(left);
        if self.past.len() > self.limit {
            self.past.pop_front();
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.undone.is_empty()
    }

    /// Trade `current` for the most recent past state.
    pub fn undo(&mut self, current: T) -> Option<T> {
        let previous = self.past.pop_back()?;
        self.undone.push(current);
        Some(previous)
    }

    /// Trade `current` for the most recently undone state.
    pub fn redo(&mut self, current: T) -> Option<T> {
        let next = self.undone.pop()?;
        self.past.push_back(current);
        Some(next)
    }
}
