use soroban_sdk::{symbol_short, Env, String};

/// Event published when the sample records have been written.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LedgerSeededEvent {
    pub count: u32,
    pub timestamp: u64,
}

/// Event published when a record is created or overwritten.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RecordCreatedEvent {
    pub key: String,
    pub timestamp: u64,
}

/// Event published when a record's patient field is rewritten.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PatientChangedEvent {
    pub key: String,
    pub timestamp: u64,
}

pub fn publish_ledger_seeded(env: &Env, count: u32) {
    let topics = (symbol_short!("SEEDED"),);
    let data = LedgerSeededEvent {
        count,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_record_created(env: &Env, key: String) {
    let topics = (symbol_short!("REC_NEW"), key.clone());
    let data = RecordCreatedEvent {
        key,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_patient_changed(env: &Env, key: String) {
    let topics = (symbol_short!("PAT_CHG"), key.clone());
    let data = PatientChangedEvent {
        key,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}
