//! Create a sample SQLite database of synthetic patient vitals

use std::path::Path;
use rusqlite::{params, Connection};
use tracing::info;

use crate::DataError;

/// Table written by [`create_sample_database`]
pub const SAMPLE_TABLE: &str = "synthetic_patient_timeseries";

/// Create (or replace) the sample table at `path` and fill it with
/// `patients * samples_per_patient` rows. Returns the number of rows written.
pub fn create_sample_database(
    path: &Path,
    patients: usize,
    samples_per_patient: usize,
) -> Result<usize, DataError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let mut conn = Connection::open(path)?;
    conn.execute_batch(&format!(
        "
        DROP TABLE IF EXISTS {table};
        CREATE TABLE {table} (
            PatientID INTEGER NOT NULL,
            SampleIndex INTEGER NOT NULL,
            Age INTEGER,
            HeartRate REAL,
            RespiratoryRate REAL,
            SpO2 REAL,
            Temperature REAL,
            SystolicBP REAL,
            DiastolicBP REAL
        );
        ",
        table = SAMPLE_TABLE
    ))?;

    let tx = conn.transaction()?;
    let mut rows = 0;
    {
        let mut stmt = tx.prepare(&format!(
            "INSERT INTO {} (PatientID, SampleIndex, Age, HeartRate, RespiratoryRate,
                             SpO2, Temperature, SystolicBP, DiastolicBP)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            SAMPLE_TABLE
        ))?;

        let mut rng = 42u32;
        for patient in 1..=patients {
            let age = 25 + (random_int(&mut rng) % 60) as i64;
            let resting_hr = 60.0 + random_float(&mut rng) * 25.0;
            let resting_rr = 12.0 + random_float(&mut rng) * 6.0;
            let resting_sys = 105.0 + random_float(&mut rng) * 35.0;

            for sample in 1..=samples_per_patient {
                let t = sample as f64 / 10.0;
                let heart_rate = resting_hr + 6.0 * t.sin() + (random_float(&mut rng) - 0.5) * 4.0;
                let respiratory_rate = resting_rr + 1.5 * (t * 0.7).cos() + (random_float(&mut rng) - 0.5);
                // occasional missing oximeter readings
                let spo2 = if random_float(&mut rng) < 0.03 {
                    None
                } else {
                    Some((97.0 + (random_float(&mut rng) - 0.5) * 3.0).min(100.0))
                };
                let temperature = 36.6 + 0.3 * (t * 0.5).sin() + (random_float(&mut rng) - 0.5) * 0.2;
                let systolic = resting_sys + 5.0 * (t * 0.3).sin() + (random_float(&mut rng) - 0.5) * 6.0;
                let diastolic = systolic * 0.65 + (random_float(&mut rng) - 0.5) * 4.0;

                stmt.execute(params![
                    patient as i64,
                    sample as i64,
                    age,
                    heart_rate,
                    respiratory_rate,
                    spo2,
                    temperature,
                    systolic,
                    diastolic,
                ])?;
                rows += 1;
            }
        }
    }
    tx.commit()?;

    info!("Created sample database {:?} with {} rows", path, rows);
    Ok(rows)
}

fn random_float(seed: &mut u32) -> f64 {
    *seed = seed.wrapping_mul(1664525).wrapping_add(1013904223);
    (*seed as f64) / (u32::MAX as f64)
}

fn random_int(seed: &mut u32) -> u32 {
    *seed = seed.wrapping_mul(1664525).wrapping_add(1013904223);
    *seed
}
