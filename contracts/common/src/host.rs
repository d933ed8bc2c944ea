//! Conversions between Soroban host values and plain Rust values.

extern crate alloc;

use alloc::string::String as StdString;
use alloc::vec;
use alloc::vec::Vec as StdVec;

use soroban_sdk::{Bytes, Env, String, Vec};

/// Copy a host string out as UTF-8. Invalid sequences are replaced with
/// U+FFFD rather than rejected.
pub fn to_std_string(value: &String) -> StdString {
    let mut buf = vec![0u8; value.len() as usize];
    value.copy_into_slice(&mut buf);
    match StdString::from_utf8(buf) {
        Ok(s) => s,
        Err(err) => StdString::from_utf8_lossy(err.as_bytes()).into_owned(),
    }
}

pub fn to_std_strings(values: &Vec<String>) -> StdVec<StdString> {
    values.iter().map(|v| to_std_string(&v)).collect()
}

pub fn to_std_bytes(value: &Bytes) -> StdVec<u8> {
    let mut buf = vec![0u8; value.len() as usize];
    value.copy_into_slice(&mut buf);
    buf
}

pub fn to_host_string(env: &Env, value: &str) -> String {
    String::from_str(env, value)
}

pub fn to_host_bytes(env: &Env, value: &[u8]) -> Bytes {
    Bytes::from_slice(env, value)
}
