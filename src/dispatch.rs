//! Workout code dispatch
//!
//! Maps the three sensor workout codes onto calculator constructors through a
//! single read-only table. The table is a process-wide constant; nothing ever
//! mutates it.

use crate::error::ComputeError;
use crate::workout::{Running, SportsWalking, Swimming, Workout};

type Constructor = fn(&[f64]) -> Result<Workout, ComputeError>;

/// One row of the code table
pub struct CodeEntry {
    /// Sensor workout code
    pub code: &'static str,
    /// Kind name the code maps to
    pub kind: &'static str,
    /// Expected number of positional sensor values
    pub arity: usize,
    /// Positional field names, in sensor order
    pub fields: &'static [&'static str],
    build: Constructor,
}

fn build_swimming(values: &[f64]) -> Result<Workout, ComputeError> {
    Swimming::from_values(values).map(Workout::Swimming)
}

fn build_running(values: &[f64]) -> Result<Workout, ComputeError> {
    Running::from_values(values).map(Workout::Running)
}

fn build_walking(values: &[f64]) -> Result<Workout, ComputeError> {
    SportsWalking::from_values(values).map(Workout::SportsWalking)
}

/// The fixed code → constructor mapping
pub const CODE_TABLE: [CodeEntry; 3] = [
    CodeEntry {
        code: "SWM",
        kind: "Swimming",
        arity: Swimming::ARITY,
        fields: &[
            "action",
            "duration_hours",
            "weight_kg",
            "pool_length_m",
            "pool_laps",
        ],
        build: build_swimming,
    },
    CodeEntry {
        code: "RUN",
        kind: "Running",
        arity: Running::ARITY,
        fields: &["action", "duration_hours", "weight_kg"],
        build: build_running,
    },
    CodeEntry {
        code: "WLK",
        kind: "SportsWalking",
        arity: SportsWalking::ARITY,
        fields: &["action", "duration_hours", "weight_kg", "height_cm"],
        build: build_walking,
    },
];

/// Build a workout calculator from a sensor code and positional values.
///
/// An unknown code is a recoverable lookup-miss carrying the offending code;
/// arity and measurement problems surface from the variant constructor.
pub fn dispatch(code: &str, values: &[f64]) -> Result<Workout, ComputeError> {
    let entry = CODE_TABLE
        .iter()
        .find(|entry| entry.code == code)
        .ok_or_else(|| ComputeError::UnknownWorkoutCode(code.to_string()))?;

    (entry.build)(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_all_known_codes() {
        let swim = dispatch("SWM", &[720.0, 1.0, 80.0, 25.0, 40.0]).unwrap();
        assert_eq!(swim.kind_name(), "Swimming");

        let run = dispatch("RUN", &[15000.0, 1.0, 75.0]).unwrap();
        assert_eq!(run.kind_name(), "Running");

        let walk = dispatch("WLK", &[9000.0, 1.0, 75.0, 180.0]).unwrap();
        assert_eq!(walk.kind_name(), "SportsWalking");
    }

    #[test]
    fn test_unknown_code_reports_the_code() {
        for code in ["BIK", "run", "swm", "", "WALK"] {
            match dispatch(code, &[1.0, 1.0, 1.0]) {
                Err(ComputeError::UnknownWorkoutCode(reported)) => assert_eq!(reported, code),
                other => panic!("expected lookup-miss for {code:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_arity_mismatch_is_a_construction_error() {
        let err = dispatch("WLK", &[9000.0, 1.0, 75.0]).unwrap_err();
        assert!(matches!(
            err,
            ComputeError::ArityMismatch {
                code: "WLK",
                expected: 4,
                got: 3,
            }
        ));
    }

    #[test]
    fn test_table_arities_match_field_lists() {
        for entry in &CODE_TABLE {
            assert_eq!(entry.arity, entry.fields.len(), "entry {}", entry.code);
        }
    }
}
