#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use medical_records::{MedicalRecordsContract, MedicalRecordsContractClient};
use soroban_sdk::{Env, String, Vec};

/// Calls against the dispatch entry point.
///
/// Keys are mostly drawn from a small numbered pool so writes collide and
/// scans have something to list. `Raw` sends arbitrary names and argument
/// lists to reach the rejection paths.
#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    InitLedger,
    Create { key: u16, fields: [std::string::String; 4] },
    ChangePatient { key: u16, patient: std::string::String },
    Query { key: u16 },
    QueryAll,
    Raw { function: std::string::String, args: std::vec::Vec<std::string::String> },
}

fn record_key(index: u16) -> std::string::String {
    format!("REC{}", index % 1200)
}

fn strings(env: &Env, values: &[&str]) -> Vec<String> {
    let mut out = Vec::new(env);
    for value in values {
        out.push_back(String::from_str(env, value));
    }
    out
}

fuzz_target!(|actions: std::vec::Vec<FuzzAction>| {
    let env = Env::default();
    let contract_id = env.register(MedicalRecordsContract, ());
    let client = MedicalRecordsContractClient::new(&env, &contract_id);

    for action in actions.into_iter().take(64) {
        let (function, args): (&str, std::vec::Vec<std::string::String>) = match action {
            FuzzAction::InitLedger => ("initLedger", vec![]),
            FuzzAction::Create { key, fields } => {
                let mut args = vec![record_key(key)];
                args.extend(fields);
                ("createRecord", args)
            }
            FuzzAction::ChangePatient { key, patient } => {
                ("changeRecordPatient", vec![record_key(key), patient])
            }
            FuzzAction::Query { key } => ("queryRecord", vec![record_key(key)]),
            FuzzAction::QueryAll => ("queryAllRecords", vec![]),
            FuzzAction::Raw { function, args } => {
                let refs: std::vec::Vec<&str> = args.iter().map(|a| a.as_str()).collect();
                let _ = client.try_dispatch(&String::from_str(&env, &function), &strings(&env, &refs));
                continue;
            }
        };

        let refs: std::vec::Vec<&str> = args.iter().map(|a| a.as_str()).collect();
        let result = client.try_dispatch(&String::from_str(&env, function), &strings(&env, &refs));
        assert!(
            matches!(result, Ok(Ok(_))),
            "well-formed {function} call was rejected: {result:?}"
        );

        // ── Post-action invariant: the scan is always a JSON array ──
        let mut payload = std::vec::Vec::new();
        for byte in client.dispatch(&String::from_str(&env, "queryAllRecords"), &Vec::new(&env)).iter() {
            payload.push(byte);
        }
        let parsed: serde_json::Value = serde_json::from_slice(&payload)
            .unwrap_or_else(|e| panic!("INVARIANT VIOLATION: scan is not JSON ({e})"));
        assert!(parsed.is_array(), "INVARIANT VIOLATION: scan is not an array");
    }
});
