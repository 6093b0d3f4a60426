//! Workout calculators
//!
//! One calculator per workout kind (running, sports walking, swimming), closed
//! over the [`Workout`] sum type. Each calculator is built from one sensor row,
//! derives distance, mean speed, and calories, and is then discarded.

use crate::error::ComputeError;
use crate::record::WorkoutRecord;

/// Meters per kilometer, used as the unit-count divisor in distance formulas
pub const M_IN_KM: f64 = 1000.0;

/// Minutes per hour, for calorie-per-minute formulas
const MIN_PER_HOUR: f64 = 60.0;

/// Reject non-positive or non-finite measurements before they reach a divisor
fn positive(field: &'static str, value: f64) -> Result<f64, ComputeError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ComputeError::InvalidMeasurement { field, value })
    }
}

fn check_arity(code: &'static str, expected: usize, values: &[f64]) -> Result<(), ComputeError> {
    if values.len() == expected {
        Ok(())
    } else {
        Err(ComputeError::ArityMismatch {
            code,
            expected,
            got: values.len(),
        })
    }
}

/// Running workout: steps, duration, body weight
#[derive(Debug, Clone, PartialEq)]
pub struct Running {
    pub action: u32,
    pub duration_hours: f64,
    pub weight_kg: f64,
}

impl Running {
    /// Distance covered per step (km per 1000 steps)
    pub const LEN_STEP_KM: f64 = 0.65;
    /// Number of positional sensor values
    pub const ARITY: usize = 3;

    // Empirical metabolic coefficients for running
    const CALORIE_SPEED_MULTIPLIER: f64 = 18.0;
    const CALORIE_SPEED_SHIFT: f64 = 20.0;

    pub fn new(action: u32, duration_hours: f64, weight_kg: f64) -> Result<Self, ComputeError> {
        Ok(Self {
            action,
            duration_hours: positive("duration_hours", duration_hours)?,
            weight_kg: positive("weight_kg", weight_kg)?,
        })
    }

    /// Build positionally from a sensor row: `[action, duration, weight]`
    pub fn from_values(values: &[f64]) -> Result<Self, ComputeError> {
        check_arity("RUN", Self::ARITY, values)?;
        Self::new(values[0] as u32, values[1], values[2])
    }

    pub fn distance_km(&self) -> f64 {
        f64::from(self.action) * Self::LEN_STEP_KM / M_IN_KM
    }

    pub fn mean_speed_kmh(&self) -> f64 {
        self.distance_km() / self.duration_hours
    }

    pub fn calories_kcal(&self) -> f64 {
        (Self::CALORIE_SPEED_MULTIPLIER * self.mean_speed_kmh() - Self::CALORIE_SPEED_SHIFT)
            * self.weight_kg
            / M_IN_KM
            * self.duration_hours
            * MIN_PER_HOUR
    }
}

/// Sports walking workout: steps, duration, body weight, body height
#[derive(Debug, Clone, PartialEq)]
pub struct SportsWalking {
    pub action: u32,
    pub duration_hours: f64,
    pub weight_kg: f64,
    pub height_cm: f64,
}

impl SportsWalking {
    /// Same step length as running
    pub const LEN_STEP_KM: f64 = 0.65;
    pub const ARITY: usize = 4;

    const CALORIE_WEIGHT_MULTIPLIER: f64 = 0.035;
    const CALORIE_SPEED_HEIGHT_MULTIPLIER: f64 = 0.029;

    pub fn new(
        action: u32,
        duration_hours: f64,
        weight_kg: f64,
        height_cm: f64,
    ) -> Result<Self, ComputeError> {
        Ok(Self {
            action,
            duration_hours: positive("duration_hours", duration_hours)?,
            weight_kg: positive("weight_kg", weight_kg)?,
            height_cm: positive("height_cm", height_cm)?,
        })
    }

    /// Build positionally from a sensor row: `[action, duration, weight, height]`
    pub fn from_values(values: &[f64]) -> Result<Self, ComputeError> {
        check_arity("WLK", Self::ARITY, values)?;
        Self::new(values[0] as u32, values[1], values[2], values[3])
    }

    pub fn distance_km(&self) -> f64 {
        f64::from(self.action) * Self::LEN_STEP_KM / M_IN_KM
    }

    pub fn mean_speed_kmh(&self) -> f64 {
        self.distance_km() / self.duration_hours
    }

    pub fn calories_kcal(&self) -> f64 {
        // The squared-speed term uses floor division by height. This is the
        // reference formula's behavior and must not be smoothed into a plain
        // floating-point division.
        let speed = self.mean_speed_kmh();
        let speed_height_term = (speed.powi(2) / self.height_cm).floor();

        (Self::CALORIE_WEIGHT_MULTIPLIER * self.weight_kg
            + speed_height_term * Self::CALORIE_SPEED_HEIGHT_MULTIPLIER * self.weight_kg)
            * self.duration_hours
            * MIN_PER_HOUR
    }
}

/// Swimming workout: strokes, duration, body weight, pool length, lap count
#[derive(Debug, Clone, PartialEq)]
pub struct Swimming {
    pub action: u32,
    pub duration_hours: f64,
    pub weight_kg: f64,
    pub pool_length_m: f64,
    pub pool_laps: u32,
}

impl Swimming {
    /// Distance covered per stroke (km per 1000 strokes). Differs from the
    /// footstep constant; it feeds the rendered distance only, since the
    /// swimming speed and calorie formulas never consume the distance.
    pub const LEN_STROKE_KM: f64 = 1.38;
    pub const ARITY: usize = 5;

    const CALORIE_SPEED_SHIFT: f64 = 1.1;
    const CALORIE_WEIGHT_MULTIPLIER: f64 = 2.0;

    pub fn new(
        action: u32,
        duration_hours: f64,
        weight_kg: f64,
        pool_length_m: f64,
        pool_laps: u32,
    ) -> Result<Self, ComputeError> {
        Ok(Self {
            action,
            duration_hours: positive("duration_hours", duration_hours)?,
            weight_kg: positive("weight_kg", weight_kg)?,
            pool_length_m: positive("pool_length_m", pool_length_m)?,
            pool_laps,
        })
    }

    /// Build positionally from a sensor row:
    /// `[action, duration, weight, pool_length, pool_laps]`
    pub fn from_values(values: &[f64]) -> Result<Self, ComputeError> {
        check_arity("SWM", Self::ARITY, values)?;
        Self::new(
            values[0] as u32,
            values[1],
            values[2],
            values[3],
            values[4] as u32,
        )
    }

    pub fn distance_km(&self) -> f64 {
        f64::from(self.action) * Self::LEN_STROKE_KM / M_IN_KM
    }

    /// Mean speed from pool geometry, not from stroke distance
    pub fn mean_speed_kmh(&self) -> f64 {
        self.pool_length_m * f64::from(self.pool_laps) / M_IN_KM / self.duration_hours
    }

    pub fn calories_kcal(&self) -> f64 {
        (self.mean_speed_kmh() + Self::CALORIE_SPEED_SHIFT)
            * Self::CALORIE_WEIGHT_MULTIPLIER
            * self.weight_kg
    }
}

/// A workout of any supported kind
///
/// The variant set is closed: workout codes map onto exactly these three
/// calculators and nothing else.
#[derive(Debug, Clone, PartialEq)]
pub enum Workout {
    Running(Running),
    SportsWalking(SportsWalking),
    Swimming(Swimming),
}

impl Workout {
    /// Kind name as it appears in the rendered summary
    pub fn kind_name(&self) -> &'static str {
        match self {
            Workout::Running(_) => "Running",
            Workout::SportsWalking(_) => "SportsWalking",
            Workout::Swimming(_) => "Swimming",
        }
    }

    pub fn duration_hours(&self) -> f64 {
        match self {
            Workout::Running(w) => w.duration_hours,
            Workout::SportsWalking(w) => w.duration_hours,
            Workout::Swimming(w) => w.duration_hours,
        }
    }

    pub fn distance_km(&self) -> f64 {
        match self {
            Workout::Running(w) => w.distance_km(),
            Workout::SportsWalking(w) => w.distance_km(),
            Workout::Swimming(w) => w.distance_km(),
        }
    }

    pub fn mean_speed_kmh(&self) -> f64 {
        match self {
            Workout::Running(w) => w.mean_speed_kmh(),
            Workout::SportsWalking(w) => w.mean_speed_kmh(),
            Workout::Swimming(w) => w.mean_speed_kmh(),
        }
    }

    pub fn calories_kcal(&self) -> f64 {
        match self {
            Workout::Running(w) => w.calories_kcal(),
            Workout::SportsWalking(w) => w.calories_kcal(),
            Workout::Swimming(w) => w.calories_kcal(),
        }
    }

    /// Snapshot the computed metrics into an immutable record
    pub fn record(&self) -> WorkoutRecord {
        WorkoutRecord::new(
            self.kind_name(),
            self.duration_hours(),
            self.distance_km(),
            self.mean_speed_kmh(),
            self.calories_kcal(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_running_reference_values() {
        let run = Running::new(15000, 1.0, 75.0).unwrap();

        assert!((run.distance_km() - 9.75).abs() < 1e-9);
        assert!((run.mean_speed_kmh() - 9.75).abs() < 1e-9);
        // (18 * 9.75 - 20) * 75 / 1000 * 1 * 60
        assert!((run.calories_kcal() - 699.75).abs() < 1e-9);
    }

    #[test]
    fn test_walking_floor_term_zero() {
        let walk = SportsWalking::new(9000, 1.0, 75.0, 180.0).unwrap();

        assert!((walk.distance_km() - 5.85).abs() < 1e-9);
        assert!((walk.mean_speed_kmh() - 5.85).abs() < 1e-9);
        // 5.85^2 / 180 = 0.190..., floored to 0, leaving only the weight term
        assert!((walk.calories_kcal() - 157.5).abs() < 1e-9);
    }

    #[test]
    fn test_walking_floor_term_nonzero() {
        // 5.85^2 / 30 = 1.14..., floored to 1
        let walk = SportsWalking::new(9000, 1.0, 75.0, 30.0).unwrap();

        // (0.035 * 75 + 1 * 0.029 * 75) * 1 * 60 = (2.625 + 2.175) * 60
        assert!((walk.calories_kcal() - 288.0).abs() < 1e-9);
    }

    #[test]
    fn test_swimming_reference_values() {
        let swim = Swimming::new(720, 1.0, 80.0, 25.0, 40).unwrap();

        // 25 * 40 / 1000 / 1
        assert!((swim.mean_speed_kmh() - 1.0).abs() < 1e-9);
        // (1.0 + 1.1) * 2.0 * 80
        assert!((swim.calories_kcal() - 336.0).abs() < 1e-9);
        // Distance uses the stroke length, not pool geometry
        assert!((swim.distance_km() - 0.9936).abs() < 1e-9);
    }

    #[test]
    fn test_non_positive_duration_rejected() {
        let err = Running::new(15000, 0.0, 75.0).unwrap_err();
        assert!(matches!(
            err,
            ComputeError::InvalidMeasurement {
                field: "duration_hours",
                ..
            }
        ));
    }

    #[test]
    fn test_zero_height_rejected() {
        let err = SportsWalking::new(9000, 1.0, 75.0, 0.0).unwrap_err();
        assert!(matches!(
            err,
            ComputeError::InvalidMeasurement {
                field: "height_cm",
                ..
            }
        ));
    }

    #[test]
    fn test_non_finite_weight_rejected() {
        assert!(Running::new(15000, 1.0, f64::NAN).is_err());
        assert!(Running::new(15000, f64::INFINITY, 75.0).is_err());
    }

    #[test]
    fn test_from_values_arity() {
        let err = Running::from_values(&[15000.0, 1.0]).unwrap_err();
        assert!(matches!(
            err,
            ComputeError::ArityMismatch {
                code: "RUN",
                expected: 3,
                got: 2,
            }
        ));

        let err = Swimming::from_values(&[720.0, 1.0, 80.0, 25.0, 40.0, 7.0]).unwrap_err();
        assert!(matches!(
            err,
            ComputeError::ArityMismatch {
                code: "SWM",
                expected: 5,
                got: 6,
            }
        ));
    }

    #[test]
    fn test_record_snapshot() {
        let workout = Workout::Swimming(Swimming::new(720, 1.0, 80.0, 25.0, 40).unwrap());
        let record = workout.record();

        assert_eq!(record.kind, "Swimming");
        assert!((record.mean_speed_kmh - 1.0).abs() < 1e-9);
        assert!((record.calories_kcal - 336.0).abs() < 1e-9);
    }

    #[test]
    fn test_computation_is_deterministic() {
        let workout = Workout::Running(Running::new(15000, 1.0, 75.0).unwrap());
        assert_eq!(
            workout.record().to_string(),
            workout.record().to_string()
        );
    }
}
