extern crate alloc;

use alloc::string::String as StdString;
use serde::{Deserialize, Serialize};
use soroban_sdk::contracterror;

use crate::store::StoreError;

/// A medical procedure record.
///
/// The record carries no identity of its own; it is addressed by the ledger
/// key it is stored under. `cost` is kept as text and never parsed.
///
/// Field order here is the serialized field order.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MedicalRecord {
    #[serde(alias = "Patient")]
    pub patient: StdString,
    #[serde(alias = "Doctor")]
    pub doctor: StdString,
    #[serde(alias = "Procedure")]
    pub procedure: StdString,
    #[serde(alias = "Cost")]
    pub cost: StdString,
}

impl MedicalRecord {
    pub fn new(
        patient: impl Into<StdString>,
        doctor: impl Into<StdString>,
        procedure: impl Into<StdString>,
        cost: impl Into<StdString>,
    ) -> Self {
        Self {
            patient: patient.into(),
            doctor: doctor.into(),
            procedure: procedure.into(),
            cost: cost.into(),
        }
    }
}

/// Operations reachable through the dispatch entry point.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Function {
    QueryRecord,
    InitLedger,
    CreateRecord,
    QueryAllRecords,
    ChangeRecordPatient,
}

impl Function {
    pub const ALL: [Function; 5] = [
        Function::QueryRecord,
        Function::InitLedger,
        Function::CreateRecord,
        Function::QueryAllRecords,
        Function::ChangeRecordPatient,
    ];

    /// Name callers use to select this operation.
    pub const fn name(self) -> &'static str {
        match self {
            Function::QueryRecord => "queryRecord",
            Function::InitLedger => "initLedger",
            Function::CreateRecord => "createRecord",
            Function::QueryAllRecords => "queryAllRecords",
            Function::ChangeRecordPatient => "changeRecordPatient",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|function| function.name() == name)
    }
}

/// Contract errors
///
/// Codes start at 100, the range the suite reserves for contract-specific
/// errors.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ContractError {
    InvalidFunction = 100,
    IncorrectArgumentCount = 101,
    KeyOutsideScanWindow = 102,
    LedgerFailure = 103,
    EncodingFailure = 104,
}

impl From<StoreError> for ContractError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::ArgumentCount { .. } => ContractError::IncorrectArgumentCount,
            StoreError::InvalidFunction => ContractError::InvalidFunction,
            StoreError::KeyOutsideScanWindow { .. } => ContractError::KeyOutsideScanWindow,
            StoreError::Ledger(_) => ContractError::LedgerFailure,
            StoreError::Codec(_) => ContractError::EncodingFailure,
        }
    }
}
