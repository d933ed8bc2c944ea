//! Sample records written by `initLedger`.

extern crate alloc;

use alloc::format;
use alloc::string::String as StdString;

use crate::config::SEED_KEY_PREFIX;
use crate::types::MedicalRecord;

/// `(patient, doctor, procedure, cost)`; entry `i` is stored at `REC<i>`.
pub const SAMPLE_RECORDS: [(&str, &str, &str, &str); 12] = [
    ("Jacob Henderson", "Dr. Amara Osei", "Vasectomy", "400000"),
    ("Lena O'Brien", "Dr. Leo Marchetti", "STI Test", "00"),
    ("George Stavros", "Dr. Marley Davis", "Immunizations", "10000"),
    ("Anika Ghosh", "Dr. Robert Delacroix", "12 Stitches", "103000"),
    ("David Carmichael", "Dr. Robin Hale", "Yearly Checkup", "1230400"),
    ("Ryan Pagan", "Dr. Bridget Dewey", "Hepatitis C Vaccination", "00"),
    ("Chary Adamo", "Dr. Van Bailey", "Check Blood Pressure", "5000"),
    ("Paola Hilbert", "Dr. Allen Po", "Botox Injection 120cc", "15000000"),
    ("Tata Holden", "Dr. Nadia Botha", "Liposuction 12 lbs", "2200300"),
    ("Joe Crawford", "Dr. Brian Nina", "Cast Broken Arm", "404400"),
    ("John Smith", "Dr. Stephen Strand", "Brain Surgery", "50"),
    (
        "John Jacob Jingleheimer Schmidt",
        "Dr. Grenaldi",
        "Turn your head and cough",
        "50",
    ),
];

pub fn seed_key(index: usize) -> StdString {
    format!("{SEED_KEY_PREFIX}{index}")
}

/// `(key, record)` pairs in seeding order.
pub fn seed_records() -> impl Iterator<Item = (StdString, MedicalRecord)> {
    SAMPLE_RECORDS
        .iter()
        .enumerate()
        .map(|(index, (patient, doctor, procedure, cost))| {
            (
                seed_key(index),
                MedicalRecord::new(*patient, *doctor, *procedure, *cost),
            )
        })
}
