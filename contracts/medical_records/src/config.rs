//! Store configuration.

extern crate alloc;

use alloc::string::{String as StdString, ToString};

use common::in_range;

/// First key of the record scan window (inclusive).
pub const SCAN_START_KEY: &str = "REC0";
/// End of the record scan window (exclusive).
pub const SCAN_END_KEY: &str = "REC999";
/// Prefix of the keys written by seeding.
pub const SEED_KEY_PREFIX: &str = "REC";

/// Tunables for a [`RecordStore`](crate::store::RecordStore).
///
/// `queryAllRecords` only sees keys inside `[scan_start, scan_end)`. With
/// `enforce_scan_window` set, writes to keys outside that window are
/// rejected so every stored record stays reachable by the scan. The default
/// window is `REC0..REC999`, unenforced.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StoreConfig {
    pub scan_start: StdString,
    pub scan_end: StdString,
    pub enforce_scan_window: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            scan_start: SCAN_START_KEY.to_string(),
            scan_end: SCAN_END_KEY.to_string(),
            enforce_scan_window: false,
        }
    }
}

impl StoreConfig {
    pub fn with_scan_window(mut self, start: &str, end: &str) -> Self {
        self.scan_start = start.to_string();
        self.scan_end = end.to_string();
        self
    }

    pub fn enforcing_scan_window(mut self) -> Self {
        self.enforce_scan_window = true;
        self
    }

    /// Whether a write to `key` is allowed under this configuration.
    pub fn admits(&self, key: &str) -> bool {
        !self.enforce_scan_window || in_range(key, &self.scan_start, &self.scan_end)
    }
}
