//! Workout summary record
//!
//! An immutable snapshot of one computation, rendered as a single fixed-format
//! line. The format is write-only: floats always carry exactly three fractional
//! digits with a locale-independent decimal point.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Computed metrics for one workout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutRecord {
    /// Workout kind name (Running, SportsWalking, Swimming)
    pub kind: String,
    pub duration_hours: f64,
    pub distance_km: f64,
    pub mean_speed_kmh: f64,
    pub calories_kcal: f64,
}

impl WorkoutRecord {
    pub fn new(
        kind: &str,
        duration_hours: f64,
        distance_km: f64,
        mean_speed_kmh: f64,
        calories_kcal: f64,
    ) -> Self {
        Self {
            kind: kind.to_string(),
            duration_hours,
            distance_km,
            mean_speed_kmh,
            calories_kcal,
        }
    }
}

impl fmt::Display for WorkoutRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Тип тренировки: {}; Длительность: {:.3} ч.; Дистанция: {:.3} км; \
             Ср. скорость: {:.3} км/ч; Потрачено ккал: {:.3}.",
            self.kind,
            self.duration_hours,
            self.distance_km,
            self.mean_speed_kmh,
            self.calories_kcal,
        )
    }
}
