//! Command log with undo and redo
//!
//! Editing state (the guide set, the list of drawn crop rectangles) is a
//! plain value. Every user action is an [`Edit`] command; [`EditLog`]
//! keeps the base value plus the applied commands and rebuilds the current
//! state by replaying them. Undo moves the last command onto the redo
//! stack, and pushing a new command discards whatever could be redone.

use crate::crop::Rectangle;
use crate::guides::{Axis, GuideSet};

/// A command that derives a new state from an old one.
pub trait Edit<S> {
    /// Produce the state after this command; `state` is left untouched.
    fn apply(&self, state: &S) -> S;
}

/// An ordered log of edits over a base state
#[derive(Debug, Clone)]
pub struct EditLog<S, C> {
    base: S,
    applied: Vec<C>,
    undone: Vec<C>,
}

impl<S, C> EditLog<S, C>
where
    S: Clone,
    C: Edit<S>,
{
    /// Start a log from `base`.
    pub fn new(base: S) -> Self {
        Self {
            base,
            applied: Vec::new(),
            undone: Vec::new(),
        }
    }

    /// Record a command. Clears the redo stack.
    pub fn push(&mut self, command: C) {
        self.applied.push(command);
        self.undone.clear();
    }

    /// Withdraw the most recent command. Returns false if there was none.
    pub fn undo(&mut self) -> bool {
        match self.applied.pop() {
            Some(c) => {
                self.undone.push(c);
                true
            }
            None => false,
        }
    }

    /// Re-apply the most recently undone command.
    pub fn redo(&mut self) -> bool {
        match self.undone.pop() {
            Some(c) => {
                self.applied.push(c);
                true
            }
            None => false,
        }
    }

    /// Replay every applied command over the base state.
    pub fn current(&self) -> S {
        self.applied
            .iter()
            .fold(self.base.clone(), |state, c| c.apply(&state))
    }

    /// Forget all commands and start over from `base`.
    pub fn reset(&mut self, base: S) {
        self.base = base;
        self.applied.clear();
        self.undone.clear();
    }

    pub fn base(&self) -> &S {
        &self.base
    }

    /// Number of applied commands
    pub fn len(&self) -> usize {
        self.applied.len()
    }

    pub fn is_empty(&self) -> bool {
        self.applied.is_empty()
    }

    pub fn can_undo(&self) -> bool {
        !self.applied.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.undone.is_empty()
    }

    /// Applied commands, oldest first
    pub fn commands(&self) -> &[C] {
        &self.applied
    }
}

/// Guide editing commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuideEdit {
    AddVertical(i32),
    AddHorizontal(i32),
    RemoveVertical(i32),
    RemoveHorizontal(i32),
    /// Drop every guide
    Clear,
    /// Swap in a whole new set, e.g. one typed as text
    Replace(GuideSet),
}

impl Edit<GuideSet> for GuideEdit {
    fn apply(&self, state: &GuideSet) -> GuideSet {
        let mut next = state.clone();
        match self {
            GuideEdit::AddVertical(x) => {
                next.insert(Axis::Vertical, *x);
            }
            GuideEdit::AddHorizontal(y) => {
                next.insert(Axis::Horizontal, *y);
            }
            GuideEdit::RemoveVertical(x) => {
                next.remove(Axis::Vertical, *x);
            }
            GuideEdit::RemoveHorizontal(y) => {
                next.remove(Axis::Horizontal, *y);
            }
            GuideEdit::Clear => next.clear(),
            GuideEdit::Replace(set) => next = set.clone(),
        }
        next
    }
}

/// Free-crop rectangle list commands
#[derive(Debug, Clone, PartialEq)]
pub enum CropEdit {
    Add(Rectangle),
    /// Remove the most recently drawn rectangle
    RemoveLast,
    Clear,
}

impl Edit<Vec<Rectangle>> for CropEdit {
    fn apply(&self, state: &Vec<Rectangle>) -> Vec<Rectangle> {
        let mut next = state.clone();
        match self {
            CropEdit::Add(r) => next.push(*r),
            CropEdit::RemoveLast => {
                next.pop();
            }
            CropEdit::Clear => next.clear(),
        }
        next
    }
}

/// Undo log for a guide set
pub type GuideLog = EditLog<GuideSet, GuideEdit>;

/// Undo log for drawn crop rectangles
pub type CropLog = EditLog<Vec<Rectangle>, CropEdit>;
