//! [`Ledger`] backed by Soroban persistent storage.
//!
//! Soroban storage has no iteration, so every written key is also recorded
//! in a sorted key index. The index is split into pages of bounded size so
//! no single storage entry grows with the number of keys. A small directory
//! lists each page with its fence (smallest key), ordered by fence, and a
//! write touches the directory plus one or two pages.
//!
//! Range scans binary-search the directory and the first page for the
//! window start, then walk forward page by page, reading values lazily as
//! the iterator advances. The host orders `String` values by their bytes,
//! which gives the same lexicographic order as
//! [`MemoryLedger`](crate::MemoryLedger).

extern crate alloc;

use alloc::format;
use alloc::vec::Vec as StdVec;

use soroban_sdk::{contracttype, Bytes, Env, String, Vec};

use crate::host::{to_host_bytes, to_host_string, to_std_bytes, to_std_string};
use crate::ledger::{Ledger, LedgerError, StateEntry, StateIterator};

pub const TTL_THRESHOLD: u32 = 17_280;
pub const TTL_EXTEND_TO: u32 = 518_400;

/// A page is split once it holds more keys than this.
pub const INDEX_PAGE_MAX_KEYS: u32 = 64;
/// A page is split once its keys add up to more bytes than this.
pub const INDEX_PAGE_MAX_BYTES: u32 = 16 * 1024;

/// Storage keys owned by the ledger adapter.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum LedgerKey {
    State(String),
    IndexDirectory,
    IndexPage(u32),
}

/// Directory entry for one page of the key index.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IndexPageRef {
    /// Smallest key held by the page.
    pub fence: String,
    pub page: u32,
}

pub struct StorageLedger {
    env: Env,
}

impl StorageLedger {
    pub fn new(env: &Env) -> Self {
        Self { env: env.clone() }
    }

    /// Index pages in key order.
    pub fn index_directory(&self) -> Vec<IndexPageRef> {
        let storage = self.env.storage().persistent();
        match storage.get(&LedgerKey::IndexDirectory) {
            Some(directory) => {
                storage.extend_ttl(&LedgerKey::IndexDirectory, TTL_THRESHOLD, TTL_EXTEND_TO);
                directory
            }
            None => Vec::new(&self.env),
        }
    }

    fn index_key(&self, key: String) {
        let mut directory = self.index_directory();
        if directory.is_empty() {
            write_page(&self.env, 0, &Vec::from_array(&self.env, [key.clone()]));
            directory.push_back(IndexPageRef { fence: key, page: 0 });
            write_directory(&self.env, &directory);
            return;
        }

        let slot = page_slot(&directory, &key);
        let mut entry = directory.get_unchecked(slot);
        let mut keys = read_page(&self.env, entry.page);
        let position = match keys.binary_search(&key) {
            Ok(_) => return,
            Err(position) => position,
        };
        keys.insert(position, key.clone());

        let mut directory_changed = false;
        if position == 0 {
            entry.fence = key;
            directory.set(slot, entry.clone());
            directory_changed = true;
        }

        if needs_split(&keys) {
            let half = keys.len() / 2;
            let upper = keys.slice(half..);
            let new_page = directory.len();
            write_page(&self.env, entry.page, &keys.slice(..half));
            write_page(&self.env, new_page, &upper);
            directory.insert(
                slot + 1,
                IndexPageRef {
                    fence: upper.get_unchecked(0),
                    page: new_page,
                },
            );
            directory_changed = true;
        } else {
            write_page(&self.env, entry.page, &keys);
        }

        if directory_changed {
            write_directory(&self.env, &directory);
        }
    }
}

/// Slot of the page that should hold `key`: the last page whose fence is
/// not greater than `key`, or the first page when `key` precedes them all.
fn page_slot(directory: &Vec<IndexPageRef>, key: &String) -> u32 {
    let (mut low, mut high) = (0, directory.len());
    while low < high {
        let mid = low + (high - low) / 2;
        if directory.get_unchecked(mid).fence <= *key {
            low = mid + 1;
        } else {
            high = mid;
        }
    }
    low.saturating_sub(1)
}

fn needs_split(keys: &Vec<String>) -> bool {
    if keys.len() < 2 {
        return false;
    }
    keys.len() > INDEX_PAGE_MAX_KEYS
        || keys.iter().map(|key| key.len()).sum::<u32>() > INDEX_PAGE_MAX_BYTES
}

fn read_page(env: &Env, page: u32) -> Vec<String> {
    let storage = env.storage().persistent();
    let page_key = LedgerKey::IndexPage(page);
    match storage.get(&page_key) {
        Some(keys) => {
            storage.extend_ttl(&page_key, TTL_THRESHOLD, TTL_EXTEND_TO);
            keys
        }
        None => Vec::new(env),
    }
}

fn write_page(env: &Env, page: u32, keys: &Vec<String>) {
    let storage = env.storage().persistent();
    let page_key = LedgerKey::IndexPage(page);
    storage.set(&page_key, keys);
    storage.extend_ttl(&page_key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

fn write_directory(env: &Env, directory: &Vec<IndexPageRef>) {
    let storage = env.storage().persistent();
    storage.set(&LedgerKey::IndexDirectory, directory);
    storage.extend_ttl(&LedgerKey::IndexDirectory, TTL_THRESHOLD, TTL_EXTEND_TO);
}

impl Ledger for StorageLedger {
    type Iter = StorageIterator;

    fn get_state(&self, key: &str) -> Result<StdVec<u8>, LedgerError> {
        let state_key = LedgerKey::State(to_host_string(&self.env, key));
        let value: Option<Bytes> = self.env.storage().persistent().get(&state_key);
        match value {
            Some(bytes) => {
                self.env
                    .storage()
                    .persistent()
                    .extend_ttl(&state_key, TTL_THRESHOLD, TTL_EXTEND_TO);
                Ok(to_std_bytes(&bytes))
            }
            None => Ok(StdVec::new()),
        }
    }

    fn put_state(&mut self, key: &str, value: &[u8]) -> Result<(), LedgerError> {
        let host_key = to_host_string(&self.env, key);
        let state_key = LedgerKey::State(host_key.clone());

        if !self.env.storage().persistent().has(&state_key) {
            self.index_key(host_key);
        }

        self.env
            .storage()
            .persistent()
            .set(&state_key, &to_host_bytes(&self.env, value));
        self.env
            .storage()
            .persistent()
            .extend_ttl(&state_key, TTL_THRESHOLD, TTL_EXTEND_TO);
        Ok(())
    }

    fn get_state_by_range(
        &self,
        start_key: &str,
        end_key: &str,
    ) -> Result<StorageIterator, LedgerError> {
        let directory = self.index_directory();
        let start = to_host_string(&self.env, start_key);
        let slot = page_slot(&directory, &start);

        let mut iter = StorageIterator {
            env: self.env.clone(),
            directory: directory.clone(),
            slot,
            keys: Vec::new(&self.env),
            position: 0,
            end: to_host_string(&self.env, end_key),
            upcoming: None,
            closed: false,
        };
        if let Some(entry) = directory.get(slot) {
            iter.keys = read_page(&self.env, entry.page);
            iter.position = iter.keys.binary_search(&start).unwrap_or_else(|at| at);
            iter.advance();
        }
        Ok(iter)
    }
}

/// Lazy iterator over the key index, one page at a time.
pub struct StorageIterator {
    env: Env,
    directory: Vec<IndexPageRef>,
    slot: u32,
    keys: Vec<String>,
    position: u32,
    end: String,
    upcoming: Option<String>,
    closed: bool,
}

impl StorageIterator {
    /// Move `upcoming` to the next indexed key below `end`, loading the
    /// following page when the current one runs out.
    fn advance(&mut self) {
        loop {
            if let Some(key) = self.keys.get(self.position) {
                self.position += 1;
                self.upcoming = (key < self.end).then_some(key);
                return;
            }
            self.slot += 1;
            match self.directory.get(self.slot) {
                Some(entry) => {
                    self.keys = read_page(&self.env, entry.page);
                    self.position = 0;
                }
                None => {
                    self.upcoming = None;
                    return;
                }
            }
        }
    }
}

impl StateIterator for StorageIterator {
    fn has_next(&self) -> bool {
        !self.closed && self.upcoming.is_some()
    }

    fn next_entry(&mut self) -> Result<StateEntry, LedgerError> {
        if self.closed {
            return Err(LedgerError::IteratorClosed);
        }
        let key = self.upcoming.take().ok_or(LedgerError::IteratorExhausted)?;
        self.advance();

        let value: Option<Bytes> = self
            .env
            .storage()
            .persistent()
            .get(&LedgerKey::State(key.clone()));
        let key = to_std_string(&key);
        match value {
            Some(bytes) => Ok(StateEntry::new(key, to_std_bytes(&bytes))),
            None => Err(LedgerError::Backend(format!(
                "key index references missing state entry {key}"
            ))),
        }
    }

    fn close(&mut self) {
        self.closed = true;
    }
}
