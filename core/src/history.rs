use crate::action::Action;
use std::rc::Rc;

/// The actions applied to reach a planning state, newest first.
///
/// Each state holds only a pointer to its newest step, so extending the
/// history of a successor is O(1) and siblings share their common prefix.
#[derive(Clone, Debug, Default)]
pub struct History {
    head: Option<Rc<Step>>,
    len: usize,
}

#[derive(Debug)]
struct Step {
    action: Action,
    prev: Option<Rc<Step>>,
}

impl History {
    /// Creates an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a new history with `action` appended. `self` is unchanged.
    pub fn push(&self, action: Action) -> Self {
        Self {
            head: Some(Rc::new(Step {
                action,
                prev: self.head.clone(),
            })),
            len: self.len + 1,
        }
    }

    /// Number of recorded actions.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The most recently applied action.
    pub fn last(&self) -> Option<&Action> {
        self.head.as_deref().map(|step| &step.action)
    }

    /// Iterates from the newest action back to the first one.
    pub fn iter_rev(&self) -> impl Iterator<Item = &Action> {
        let mut cursor = self.head.as_deref();
        std::iter::from_fn(move || {
            let step = cursor?;
            cursor = step.prev.as_deref();
            Some(&step.action)
        })
    }

    /// Returns the actions in execution order.
    pub fn to_vec(&self) -> Vec<Action> {
        let mut actions: Vec<Action> = self.iter_rev().cloned().collect();
        actions.reverse();
        actions
    }
}

impl Drop for History {
    // Unlink the chain iteratively; deep plans would otherwise recurse once per step.
    fn drop(&mut self) {
        let mut next = self.head.take();
        while let Some(step) = next {
            match Rc::try_unwrap(step) {
                Ok(mut owned) => next = owned.prev.take(),
                Err(_) => break,
            }
        }
    }
}
