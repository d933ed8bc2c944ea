#![no_std]

//! Medical procedure records kept on the contract ledger.
//!
//! Callers reach every operation through [`MedicalRecordsContract::dispatch`]
//! with an operation name and a list of string arguments. The operations
//! themselves live in [`store::RecordStore`], which is generic over
//! [`common::Ledger`] and runs here over Soroban persistent storage.

extern crate alloc;

pub mod codec;
pub mod config;
pub mod events;
pub mod seed;
pub mod store;
pub mod types;
pub mod validation;

use alloc::vec::Vec as StdVec;
use soroban_sdk::{contract, contractimpl, Bytes, Env, String, Vec};

use common::host::{to_host_bytes, to_std_string, to_std_strings};
use common::StorageLedger;

pub use codec::CodecError;
pub use config::StoreConfig;
pub use store::{RecordStore, StoreError};
pub use types::{ContractError, Function, MedicalRecord};

#[contract]
pub struct MedicalRecordsContract;

#[contractimpl]
impl MedicalRecordsContract {
    /// Run the operation named `function` with `args`.
    ///
    /// `queryRecord` and `queryAllRecords` return their JSON payload; the
    /// write operations return empty bytes.
    pub fn dispatch(env: Env, function: String, args: Vec<String>) -> Result<Bytes, ContractError> {
        let function = Function::from_name(&to_std_string(&function))
            .ok_or(ContractError::InvalidFunction)?;
        let arguments = to_std_strings(&args);
        let mut store = RecordStore::new(StorageLedger::new(&env));

        let payload = match function {
            Function::InitLedger => {
                let count = store.init_ledger()?;
                events::publish_ledger_seeded(&env, count);
                StdVec::new()
            }
            Function::CreateRecord => {
                store.create_record(&arguments)?;
                if let Some(key) = args.get(0) {
                    events::publish_record_created(&env, key);
                }
                StdVec::new()
            }
            Function::ChangeRecordPatient => {
                store.change_record_patient(&arguments)?;
                if let Some(key) = args.get(0) {
                    events::publish_patient_changed(&env, key);
                }
                StdVec::new()
            }
            Function::QueryRecord | Function::QueryAllRecords => {
                store.call(function, &arguments)?
            }
        };

        Ok(to_host_bytes(&env, &payload))
    }

    /// Contract version
    pub fn version() -> u32 {
        1
    }
}
