use std::collections::{HashSet, VecDeque};

use chrono::{DateTime, Utc};
use roster_core::AccountId;

/// Outcome of asking an allocator for the next account id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Allocation {
    /// A released id, already removed from the pool.
    Recycled(AccountId),
    /// The pool was empty; the store's own sequence must mint the id.
    Fresh,
}

impl Allocation {
    pub fn is_recycled(&self) -> bool {
        matches!(self, Allocation::Recycled(_))
    }
}

/// In-memory pool of released account ids, oldest release first.
///
/// Not synchronized on its own: the owning store keeps it behind the same
/// lock as the accounts so allocation and insertion happen together.
#[derive(Debug, Default)]
pub struct IdPool {
    entries: VecDeque<(AccountId, DateTime<Utc>)>,
    members: HashSet<AccountId>,
}

impl IdPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the oldest released id, if any.
    pub fn next_id(&mut self) -> Allocation {
        match self.entries.pop_front() {
            Some((id, _)) => {
                self.members.remove(&id);
                Allocation::Recycled(id)
            }
            None => Allocation::Fresh,
        }
    }

    /// Put an id back into the pool. Returns `false` if it was already
    /// there.
    pub fn release(&mut self, id: AccountId) -> bool {
        if !self.members.insert(id) {
            return false;
        }
        self.entries.push_back((id, Utc::now()));
        true
    }

    pub fn contains(&self, id: AccountId) -> bool {
        self.members.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
