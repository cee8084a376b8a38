//! Client-side change tracking for directory entities.
//!
//! Query results are attached as `Unchanged`; an operation may stage local
//! additions, modifications or deletions while it runs. Staged entries never
//! outlive the attempt that created them: the dispatcher detaches them after
//! every attempt, successful or not.
//!
//! Attached entities are kept for as long as the tracker lives, which is the
//! lifetime of the owning client. Long-running callers release them with
//! [`EntityTracker::detach_all`].

use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityState {
    Unchanged,
    Added,
    Modified,
    Deleted,
}

impl EntityState {
    pub fn is_pending(self) -> bool {
        !matches!(self, EntityState::Unchanged)
    }
}

/// Tracked entities keyed by object id.
#[derive(Debug, Default)]
pub struct EntityTracker {
    entities: BTreeMap<String, EntityState>,
}

impl EntityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a materialized entity. Existing pending state is overwritten.
    pub fn attach(&mut self, object_id: impl Into<String>) {
        self.entities.insert(object_id.into(), EntityState::Unchanged);
    }

    pub fn add(&mut self, object_id: impl Into<String>) {
        self.entities.insert(object_id.into(), EntityState::Added);
    }

    /// Mark an entity modified. Entities staged as added stay added.
    pub fn update(&mut self, object_id: impl Into<String>) {
        let state = self
            .entities
            .entry(object_id.into())
            .or_insert(EntityState::Modified);
        if *state == EntityState::Unchanged {
            *state = EntityState::Modified;
        }
    }

    pub fn delete(&mut self, object_id: impl Into<String>) {
        self.entities.insert(object_id.into(), EntityState::Deleted);
    }

    pub fn state(&self, object_id: &str) -> Option<EntityState> {
        self.entities.get(object_id).copied()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn pending_count(&self) -> usize {
        self.entities.values().filter(|s| s.is_pending()).count()
    }

    /// Forget every tracked entity; returns how many were dropped.
    pub fn detach_all(&mut self) -> usize {
        let n = self.entities.len();
        self.entities.clear();
        n
    }

    /// Detach every added, modified or deleted entity; returns how many were dropped.
    pub fn detach_pending(&mut self) -> usize {
        let before = self.entities.len();
        self.entities.retain(|_, state| !state.is_pending());
        before - self.entities.len()
    }
}
