//! Fittrace - Workout metrics calculator for raw sensor packets
//!
//! Fittrace turns raw workout sensor packets — a workout code plus ordered
//! numeric values — into computed metrics through a small pure pipeline:
//! code dispatch → kind-specific calculator → workout record → rendered
//! summary line.
//!
//! ## Modules
//!
//! - **workout**: the three calculators (Running, SportsWalking, Swimming)
//! - **dispatch**: the fixed workout-code table
//! - **record**: the immutable computed snapshot and its fixed-format rendering
//! - **schema**: the `fit.sensor_packet.v1` input schema
//! - **pipeline**: batch orchestration and JSON batch summaries

pub mod dispatch;
pub mod error;
pub mod pipeline;
pub mod record;
pub mod schema;
pub mod workout;

pub use dispatch::{dispatch, CODE_TABLE};
pub use error::ComputeError;
pub use pipeline::{compute_record, reference_packets, FitProcessor};
pub use record::WorkoutRecord;
pub use schema::{SensorPacket, SCHEMA_VERSION};
pub use workout::{Running, SportsWalking, Swimming, Workout};

/// Fittrace version embedded in batch summaries
pub const FITTRACE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Producer name for batch summaries
pub const PRODUCER_NAME: &str = "fittrace";
