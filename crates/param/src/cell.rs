use std::sync::{Arc, Weak};

use parking_lot::RwLock;

use crate::scope::Scope;

/// A single overridable value slot with inheritance.
///
/// A cell either carries a specific value set at its own scope or defers
/// to the corresponding cell one scope up. Parent links are weak: a cell
/// never owns its ancestors, and a dropped or rebound parent degrades to
/// "no parent" rather than dangling. Chains are wired programmatically
/// after load and are acyclic by construction (depth at most three:
/// default, book, sheet).
///
/// Mutation is expected from one logical writer per owning entity; the
/// locks provide memory safety for concurrent readers, not coordination.
#[derive(Debug)]
pub struct Param<T> {
    specific: RwLock<Option<T>>,
    parent: RwLock<Weak<Param<T>>>,
    scope: RwLock<Option<Scope>>,
}

impl<T> Param<T> {
    /// A fresh unbound cell: no specific value, no parent.
    pub fn new() -> Self {
        Self {
            specific: RwLock::new(None),
            parent: RwLock::new(Weak::new()),
            scope: RwLock::new(None),
        }
    }

    /// A cell seeded with a specific value, used for process defaults.
    pub fn with_value(value: T) -> Self {
        let cell = Self::new();
        *cell.specific.write() = Some(value);
        cell
    }

    /// Store or clear the override set at this scope. `None` falls back
    /// to inheritance.
    pub fn set_specific(&self, value: Option<T>) {
        *self.specific.write() = value;
    }

    /// Whether an override is set at this scope.
    pub fn is_specific(&self) -> bool {
        self.specific.read().is_some()
    }

    /// Rebind the inheritance link. Values are never copied across.
    pub fn set_parent(&self, parent: &Arc<Param<T>>) {
        *self.parent.write() = Arc::downgrade(parent);
    }

    /// Detach from any parent.
    pub fn clear_parent(&self) {
        *self.parent.write() = Weak::new();
    }

    pub fn set_scope(&self, scope: Scope) {
        *self.scope.write() = Some(scope);
    }

    pub fn scope(&self) -> Option<Scope> {
        self.scope.read().clone()
    }
}

impl<T: Clone> Param<T> {
    /// The override set at this scope, if any.
    pub fn specific(&self) -> Option<T> {
        self.specific.read().clone()
    }

    /// The value in force at this scope: the specific value if set, else
    /// whatever the parent chain resolves to. `None` means no scope in
    /// the chain has anything to say, which is a legitimate outcome, not
    /// an error.
    pub fn effective(&self) -> Option<T> {
        if let Some(value) = self.specific.read().as_ref() {
            return Some(value.clone());
        }

        let parent = self.parent.read().upgrade();
        match parent {
            Some(parent) => parent.effective(),
            None => None,
        }
    }

    /// Fresh cell carrying the same specific value and the same parent
    /// target. Edits staged on the copy never show through the original.
    pub fn duplicate(&self) -> Arc<Param<T>> {
        let copy = Param::new();
        *copy.specific.write() = self.specific.read().clone();
        *copy.parent.write() = self.parent.read().clone();
        *copy.scope.write() = self.scope.read().clone();
        Arc::new(copy)
    }
}

impl<T> Default for Param<T> {
    fn default() -> Self {
        Self::new()
    }
}
