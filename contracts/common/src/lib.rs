//! Shared ledger plumbing for the Teye contract suite.
//!
//! This crate provides:
//! - [`Ledger`] / [`StateIterator`]: the ordered key-value view contracts
//!   program against, with [`LedgerError`] as its error type.
//! - [`MemoryLedger`]: an ordered in-memory ledger for off-chain use.
//! - [`StorageLedger`]: the same interface backed by Soroban persistent
//!   storage, with a sorted key index for range scans.
//! - [`host`]: conversions between Soroban host values and Rust values.
//! - `testing` (behind `testutils`): an instrumented ledger that counts calls
//!   and injects failures.

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

extern crate alloc;

// ── Modules ──────────────────────────────────────────────────────────────────

pub mod host;
pub mod ledger;
pub mod memory_ledger;
pub mod storage_ledger;
#[cfg(any(test, feature = "testutils"))]
pub mod testing;

pub use ledger::*;
pub use memory_ledger::*;
pub use storage_ledger::*;
