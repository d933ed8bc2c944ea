//! Record Store: the caller-facing record operations.
//!
//! Every operation is a single stateless request against the ledger. The
//! store keeps a ledger handle and its configuration, never record data.
//! Argument counts are checked before any ledger call is made.

extern crate alloc;

use alloc::string::String as StdString;
use alloc::vec::Vec as StdVec;
use thiserror::Error;

use common::{Ledger, LedgerError, StateIterator};

use crate::codec::{self, CodecError};
use crate::config::StoreConfig;
use crate::seed;
use crate::types::{Function, MedicalRecord};
use crate::validation::expect_args;

#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum StoreError {
    #[error("Incorrect number of arguments. Expecting {expected}")]
    ArgumentCount { expected: usize },
    #[error("Invalid Smart Contract function name.")]
    InvalidFunction,
    #[error("key {key} is outside the scan window")]
    KeyOutsideScanWindow { key: StdString },
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error(transparent)]
    Codec(#[from] CodecError),
}

pub struct RecordStore<L: Ledger> {
    ledger: L,
    config: StoreConfig,
}

impl<L: Ledger> RecordStore<L> {
    pub fn new(ledger: L) -> Self {
        Self::with_config(ledger, StoreConfig::default())
    }

    pub fn with_config(ledger: L, config: StoreConfig) -> Self {
        Self { ledger, config }
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    pub fn into_ledger(self) -> L {
        self.ledger
    }

    /// Resolve `function` by name and run it.
    pub fn dispatch(
        &mut self,
        function: &str,
        args: &[StdString],
    ) -> Result<StdVec<u8>, StoreError> {
        let function = Function::from_name(function).ok_or(StoreError::InvalidFunction)?;
        self.call(function, args)
    }

    /// Run `function`. Writes return an empty payload.
    pub fn call(
        &mut self,
        function: Function,
        args: &[StdString],
    ) -> Result<StdVec<u8>, StoreError> {
        match function {
            Function::QueryRecord => self.query_record(args),
            Function::InitLedger => self.init_ledger().map(|_| StdVec::new()),
            Function::CreateRecord => self.create_record(args).map(|()| StdVec::new()),
            Function::QueryAllRecords => self.query_all_records(),
            Function::ChangeRecordPatient => {
                self.change_record_patient(args).map(|()| StdVec::new())
            }
        }
    }

    /// `[key]` -> the bytes stored at `key`, empty if absent.
    pub fn query_record(&self, args: &[StdString]) -> Result<StdVec<u8>, StoreError> {
        let [key] = expect_args::<1>(args)?;
        Ok(self.ledger.get_state(key)?)
    }

    /// Write the sample records under `REC0`..`REC11`. Returns how many
    /// were written.
    pub fn init_ledger(&mut self) -> Result<u32, StoreError> {
        let mut written = 0;
        for (key, record) in seed::seed_records() {
            self.ledger.put_state(&key, &codec::encode(&record)?)?;
            written += 1;
        }
        Ok(written)
    }

    /// `[key, patient, doctor, procedure, cost]` -> overwrite `key`.
    pub fn create_record(&mut self, args: &[StdString]) -> Result<(), StoreError> {
        let [key, patient, doctor, procedure, cost] = expect_args::<5>(args)?;
        let record = MedicalRecord::new(
            patient.as_str(),
            doctor.as_str(),
            procedure.as_str(),
            cost.as_str(),
        );
        self.write_record(key, &record)
    }

    /// JSON array of `{"Key":<key>, "Record":<stored bytes>}` for every key
    /// in the scan window, in ledger order.
    ///
    /// The iterator is closed exactly once whether the scan completes or
    /// fails part way; a failure discards everything assembled so far.
    pub fn query_all_records(&self) -> Result<StdVec<u8>, StoreError> {
        let mut iter = self
            .ledger
            .get_state_by_range(&self.config.scan_start, &self.config.scan_end)?;
        let assembled = assemble_scan(&mut iter);
        iter.close();
        assembled
    }

    /// `[key, patient]` -> rewrite the record at `key` with a new patient.
    ///
    /// Read-modify-write with no guard against a concurrent writer. A
    /// missing or unreadable record is treated as empty, so the result is
    /// a record holding only the new patient name.
    pub fn change_record_patient(&mut self, args: &[StdString]) -> Result<(), StoreError> {
        let [key, patient] = expect_args::<2>(args)?;
        let stored = self.ledger.get_state(key)?;
        let mut record = codec::decode_lenient(&stored);
        record.patient = patient.clone();
        self.write_record(key, &record)
    }

    fn write_record(&mut self, key: &str, record: &MedicalRecord) -> Result<(), StoreError> {
        if !self.config.admits(key) {
            return Err(StoreError::KeyOutsideScanWindow { key: key.into() });
        }
        self.ledger.put_state(key, &codec::encode(record)?)?;
        Ok(())
    }
}

fn assemble_scan<I: StateIterator>(iter: &mut I) -> Result<StdVec<u8>, StoreError> {
    let mut buffer = StdVec::new();
    buffer.push(b'[');

    let mut member_written = false;
    while iter.has_next() {
        let entry = iter.next_entry()?;
        if member_written {
            buffer.push(b',');
        }
        buffer.extend_from_slice(b"{\"Key\":");
        buffer.extend_from_slice(&codec::encode_key(&entry.key)?);
        buffer.extend_from_slice(b", \"Record\":");
        // Stored bytes are already a JSON object.
        buffer.extend_from_slice(&entry.value);
        buffer.push(b'}');
        member_written = true;
    }

    buffer.push(b']');
    Ok(buffer)
}
