//! In-memory ordered ledger.
//!
//! Backed by a `BTreeMap`, so range scans come out in ascending byte order
//! exactly like the on-chain [`StorageLedger`](crate::StorageLedger).

extern crate alloc;

use alloc::collections::{BTreeMap, VecDeque};
use alloc::string::{String as StdString, ToString};
use alloc::vec::Vec as StdVec;

use crate::ledger::{Ledger, LedgerError, StateEntry, StateIterator};

#[derive(Clone, Debug, Default)]
pub struct MemoryLedger {
    entries: BTreeMap<StdString, StdVec<u8>>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }
}

impl Ledger for MemoryLedger {
    type Iter = MemoryIterator;

    fn get_state(&self, key: &str) -> Result<StdVec<u8>, LedgerError> {
        Ok(self.entries.get(key).cloned().unwrap_or_default())
    }

    fn put_state(&mut self, key: &str, value: &[u8]) -> Result<(), LedgerError> {
        self.entries.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn get_state_by_range(
        &self,
        start_key: &str,
        end_key: &str,
    ) -> Result<MemoryIterator, LedgerError> {
        // BTreeMap::range panics on an inverted interval; treat it as empty.
        if start_key >= end_key {
            return Ok(MemoryIterator::from_entries(VecDeque::new()));
        }
        let pending = self
            .entries
            .range::<str, _>((
                core::ops::Bound::Included(start_key),
                core::ops::Bound::Excluded(end_key),
            ))
            .map(|(k, v)| StateEntry::new(k.clone(), v.clone()))
            .collect();
        Ok(MemoryIterator::from_entries(pending))
    }
}

/// Snapshot iterator returned by [`MemoryLedger::get_state_by_range`].
#[derive(Debug)]
pub struct MemoryIterator {
    pending: VecDeque<StateEntry>,
    closed: bool,
}

impl MemoryIterator {
    pub fn from_entries(pending: VecDeque<StateEntry>) -> Self {
        Self {
            pending,
            closed: false,
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl StateIterator for MemoryIterator {
    fn has_next(&self) -> bool {
        !self.closed && !self.pending.is_empty()
    }

    fn next_entry(&mut self) -> Result<StateEntry, LedgerError> {
        if self.closed {
            return Err(LedgerError::IteratorClosed);
        }
        self.pending
            .pop_front()
            .ok_or(LedgerError::IteratorExhausted)
    }

    fn close(&mut self) {
        self.pending.clear();
        self.closed = true;
    }
}
