use std::time::Instant;

use hashbrown::HashMap;
use hashbrown::hash_map::Entry;

use crate::actor::ActorId;

use super::AccumulatorEntry;

/// Largest pre-allocation honoured by [`AccumulatorStore::with_capacity`].
pub const MAX_PRESIZE: usize = 4096;

/// Outcome of [`AccumulatorStore::upsert`], carrying the stored snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Upsert {
    Created(AccumulatorEntry),
    Updated(AccumulatorEntry),
}

impl Upsert {
    pub fn entry(&self) -> AccumulatorEntry {
        match self {
            Self::Created(entry) | Self::Updated(entry) => *entry,
        }
    }

    pub fn is_created(&self) -> bool {
        matches!(self, Self::Created(_))
    }
}

/// Map of actor → rolling total.
///
/// Not synchronized. Every operation takes `&mut self` (or `&self`), so the
/// owner decides how access is serialized.
#[derive(Debug, Default)]
pub struct AccumulatorStore {
    entries: HashMap<ActorId, AccumulatorEntry>,
}

impl AccumulatorStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-size for the expected number of concurrent participants.
    /// Growing past the hint is fine; hints above [`MAX_PRESIZE`] are capped.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::with_capacity(capacity.min(MAX_PRESIZE)),
        }
    }

    pub fn get(&self, id: ActorId) -> Option<AccumulatorEntry> {
        self.entries.get(&id).copied()
    }

    /// Create or replace the entry for `id` in a single lookup.
    ///
    /// `mutate` receives the current snapshot (or `None`) and returns the
    /// entry to store.
    pub fn upsert<F>(&mut self, id: ActorId, mutate: F) -> Upsert
    where
        F: FnOnce(Option<AccumulatorEntry>) -> AccumulatorEntry,
    {
        match self.entries.entry(id) {
            Entry::Occupied(mut slot) => {
                let next = mutate(Some(*slot.get()));
                *slot.get_mut() = next;
                Upsert::Updated(next)
            }
            Entry::Vacant(slot) => {
                let next = mutate(None);
                slot.insert(next);
                Upsert::Created(next)
            }
        }
    }

    /// Returns whether an entry was present.
    pub fn remove(&mut self, id: ActorId) -> bool {
        self.entries.remove(&id).is_some()
    }

    /// Visit every entry whose deadline is strictly before `now`.
    ///
    /// Read-only: the store cannot be mutated while the visit is in
    /// progress, so callers collect keys and remove them afterwards.
    pub fn for_each_expired<F>(&self, now: Instant, mut f: F)
    where
        F: FnMut(ActorId, &AccumulatorEntry),
    {
        for (id, entry) in &self.entries {
            if entry.is_expired(now) {
                f(*id, entry);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
