//! Instrumented ledger for exercising failure paths.
//!
//! Wraps a [`MemoryLedger`], counts every ledger call and every iterator
//! close, and can be told to fail the N-th `put_state`, the opening of a
//! scan, or the N-th `next_entry` of a scan.

extern crate alloc;

use alloc::format;
use alloc::rc::Rc;
use alloc::string::String as StdString;
use alloc::vec::Vec as StdVec;
use core::cell::Cell;

use crate::ledger::{Ledger, LedgerError, StateEntry, StateIterator};
use crate::memory_ledger::{MemoryIterator, MemoryLedger};

#[derive(Debug, Default)]
pub struct InstrumentedLedger {
    inner: MemoryLedger,
    calls: Cell<u32>,
    puts: u32,
    closes: Rc<Cell<u32>>,
    fail_put_at: Option<u32>,
    fail_open: bool,
    fail_next_at: Option<u32>,
}

impl InstrumentedLedger {
    pub fn new(inner: MemoryLedger) -> Self {
        Self {
            inner,
            ..Self::default()
        }
    }

    /// Fail the `n`-th `put_state` call (1-based).
    pub fn failing_put_at(mut self, n: u32) -> Self {
        self.fail_put_at = Some(n);
        self
    }

    /// Fail every `get_state_by_range` call.
    pub fn failing_open(mut self) -> Self {
        self.fail_open = true;
        self
    }

    /// Fail the `n`-th `next_entry` call (1-based) of every scan.
    pub fn failing_next_at(mut self, n: u32) -> Self {
        self.fail_next_at = Some(n);
        self
    }

    /// Number of `get_state`, `put_state` and `get_state_by_range` calls.
    pub fn ledger_calls(&self) -> u32 {
        self.calls.get()
    }

    /// Number of `close` calls across all iterators opened so far.
    pub fn closes(&self) -> u32 {
        self.closes.get()
    }

    pub fn inner(&self) -> &MemoryLedger {
        &self.inner
    }

    fn record_call(&self) {
        self.calls.set(self.calls.get() + 1);
    }
}

impl Ledger for InstrumentedLedger {
    type Iter = InstrumentedIterator;

    fn get_state(&self, key: &str) -> Result<StdVec<u8>, LedgerError> {
        self.record_call();
        self.inner.get_state(key)
    }

    fn put_state(&mut self, key: &str, value: &[u8]) -> Result<(), LedgerError> {
        self.record_call();
        self.puts += 1;
        if self.fail_put_at == Some(self.puts) {
            return Err(LedgerError::Backend(format!(
                "injected failure on put #{}",
                self.puts
            )));
        }
        self.inner.put_state(key, value)
    }

    fn get_state_by_range(
        &self,
        start_key: &str,
        end_key: &str,
    ) -> Result<InstrumentedIterator, LedgerError> {
        self.record_call();
        if self.fail_open {
            return Err(LedgerError::Backend(StdString::from(
                "injected failure opening range scan",
            )));
        }
        Ok(InstrumentedIterator {
            inner: self.inner.get_state_by_range(start_key, end_key)?,
            advanced: 0,
            fail_next_at: self.fail_next_at,
            closes: Rc::clone(&self.closes),
        })
    }
}

#[derive(Debug)]
pub struct InstrumentedIterator {
    inner: MemoryIterator,
    advanced: u32,
    fail_next_at: Option<u32>,
    closes: Rc<Cell<u32>>,
}

impl StateIterator for InstrumentedIterator {
    fn has_next(&self) -> bool {
        self.inner.has_next()
    }

    fn next_entry(&mut self) -> Result<StateEntry, LedgerError> {
        self.advanced += 1;
        if self.fail_next_at == Some(self.advanced) {
            return Err(LedgerError::Backend(format!(
                "injected failure on next #{}",
                self.advanced
            )));
        }
        self.inner.next_entry()
    }

    fn close(&mut self) {
        self.closes.set(self.closes.get() + 1);
        self.inner.close();
    }
}
