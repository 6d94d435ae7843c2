use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::handle::HandleId;

static NEXT_HANDLE: AtomicU64 = AtomicU64::new(1);

/// Acquisition/release counters of a [`HandleLedger`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerStats {
    pub acquired: usize,
    pub released: usize,
    /// Releases of an identifier that was not live.
    pub double_released: usize,
}

impl LedgerStats {
    pub fn live(&self) -> usize {
        self.acquired - self.released
    }
}

/// Tracks which handle identifiers are live and what each one refers to.
#[derive(Debug)]
pub struct HandleLedger<E> {
    live: RefCell<HashMap<HandleId, E>>,
    stats: Cell<LedgerStats>,
}

impl<E> Default for HandleLedger<E> {
    fn default() -> Self {
        Self {
            live: RefCell::new(HashMap::new()),
            stats: Cell::new(LedgerStats::default()),
        }
    }
}

impl<E: Copy> HandleLedger<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn acquire(&self, entry: E) -> HandleId {
        let id = HandleId(NEXT_HANDLE.fetch_add(1, Ordering::Relaxed));
        self.live.borrow_mut().insert(id, entry);
        let mut stats = self.stats.get();
        stats.acquired += 1;
        self.stats.set(stats);
        id
    }

    /// What a live identifier refers to; `None` once released or if foreign.
    pub fn resolve(&self, id: HandleId) -> Option<E> {
        self.live.borrow().get(&id).copied()
    }

    /// Returns false, and counts a double release, when `id` was not live.
    pub fn release(&self, id: HandleId) -> bool {
        let removed = self.live.borrow_mut().remove(&id).is_some();
        let mut stats = self.stats.get();
        if removed {
            stats.released += 1;
        } else {
            stats.double_released += 1;
            warn!(handle = id.0, "released a handle that was not live");
        }
        self.stats.set(stats);
        removed
    }

    pub fn live_count(&self) -> usize {
        self.live.borrow().len()
    }

    pub fn stats(&self) -> LedgerStats {
        self.stats.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acquire_resolve_release() {
        let ledger: HandleLedger<u32> = HandleLedger::new();
        let a = ledger.acquire(10);
        let b = ledger.acquire(20);
        assert_ne!(a, b);
        assert_eq!(ledger.resolve(b), Some(20));
        assert_eq!(ledger.live_count(), 2);

        assert!(ledger.release(a));
        assert_eq!(ledger.resolve(a), None);
        assert_eq!(ledger.stats().live(), 1);
    }

    #[test]
    fn test_double_release_is_counted() {
        let ledger: HandleLedger<u32> = HandleLedger::new();
        let a = ledger.acquire(1);
        assert!(ledger.release(a));
        assert!(!ledger.release(a));
        let stats = ledger.stats();
        assert_eq!(stats.acquired, 1);
        assert_eq!(stats.released, 1);
        assert_eq!(stats.double_released, 1);
    }

    #[test]
    fn test_identifiers_unique_across_ledgers() {
        let first: HandleLedger<u8> = HandleLedger::new();
        let second: HandleLedger<u8> = HandleLedger::new();
        let a = first.acquire(0);
        let b = second.acquire(0);
        assert_ne!(a, b);
        assert_eq!(second.resolve(a), None);
    }
}
