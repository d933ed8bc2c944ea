//! Ordered key-value ledger interface.
//!
//! Contracts never talk to a concrete store directly. They are written
//! against [`Ledger`], which offers point reads, point writes and a range
//! scan over a half-open lexicographic key interval. Durability, consensus
//! and commit semantics belong to whatever sits behind the trait.

extern crate alloc;

use alloc::string::String as StdString;
use alloc::vec::Vec as StdVec;
use thiserror::Error;

/// Errors raised by a ledger backend or by a range-scan iterator.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum LedgerError {
    /// `next_entry` was called after `close`.
    #[error("range scan iterator is closed")]
    IteratorClosed,
    /// `next_entry` was called with no entries left.
    #[error("range scan iterator is exhausted")]
    IteratorExhausted,
    /// The backing store failed; the message is passed through untouched.
    #[error("{0}")]
    Backend(StdString),
}

/// One `(key, value)` pair yielded by a range scan.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StateEntry {
    pub key: StdString,
    pub value: StdVec<u8>,
}

impl StateEntry {
    pub fn new(key: impl Into<StdString>, value: impl Into<StdVec<u8>>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Cursor over the entries of a range scan.
///
/// Lifecycle: open (entries remaining) -> exhausted -> closed. `close` is
/// terminal; after it `has_next` is `false` and `next_entry` fails with
/// [`LedgerError::IteratorClosed`]. Callers own the obligation to call
/// `close` exactly once after a successful open.
pub trait StateIterator {
    fn has_next(&self) -> bool;

    fn next_entry(&mut self) -> Result<StateEntry, LedgerError>;

    fn close(&mut self);
}

/// Ordered key-value store.
pub trait Ledger {
    type Iter: StateIterator;

    /// Read the value stored at `key`. An absent key yields empty bytes.
    fn get_state(&self, key: &str) -> Result<StdVec<u8>, LedgerError>;

    /// Write `value` at `key`, replacing anything already there.
    fn put_state(&mut self, key: &str, value: &[u8]) -> Result<(), LedgerError>;

    /// Open a scan over keys `k` with `start_key <= k < end_key`, in
    /// ascending byte order.
    fn get_state_by_range(&self, start_key: &str, end_key: &str)
        -> Result<Self::Iter, LedgerError>;
}

/// Whether `key` falls inside the half-open window `[start_key, end_key)`.
pub fn in_range(key: &str, start_key: &str, end_key: &str) -> bool {
    key >= start_key && key < end_key
}
