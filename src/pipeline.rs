//! Pipeline orchestration
//!
//! The public API for Fittrace: dispatch a sensor packet to the right
//! calculator, compute the metrics, and render the summary. Batch processing
//! treats an unknown workout code as recoverable (a report line in place of a
//! record) and everything else as fatal for the batch.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::dispatch::dispatch;
use crate::error::ComputeError;
use crate::record::WorkoutRecord;
use crate::schema::SensorPacket;
use crate::{FITTRACE_VERSION, PRODUCER_NAME};

/// Compute one workout record from a code and positional sensor values
pub fn compute_record(code: &str, values: &[f64]) -> Result<WorkoutRecord, ComputeError> {
    Ok(dispatch(code, values)?.record())
}

/// The reference packet set from the original sensor demo
pub fn reference_packets() -> Vec<SensorPacket> {
    vec![
        SensorPacket::new("SWM", vec![720.0, 1.0, 80.0, 25.0, 40.0]),
        SensorPacket::new("RUN", vec![15000.0, 1.0, 75.0]),
        SensorPacket::new("WLK", vec![9000.0, 1.0, 75.0, 180.0]),
    ]
}

/// Producer metadata attached to batch summaries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchProducer {
    pub name: String,
    pub version: String,
    pub instance_id: String,
}

/// One processed packet in a batch summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchEntry {
    /// Workout code from the packet
    pub workout_type: String,
    /// Rendered summary line, or the lookup-miss report for unknown codes
    pub line: String,
    /// Computed record; absent when the code was unknown
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<WorkoutRecord>,
}

/// JSON batch output with provenance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchSummary {
    pub producer: BatchProducer,
    pub computed_at_utc: String,
    pub entries: Vec<BatchEntry>,
}

/// Processor for sensor packet batches.
///
/// Stateless apart from the instance id stamped into batch summaries; each
/// dispatch-compute-render cycle is fully independent.
pub struct FitProcessor {
    instance_id: String,
}

impl Default for FitProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl FitProcessor {
    /// Create a processor with a unique instance ID
    pub fn new() -> Self {
        Self {
            instance_id: Uuid::new_v4().to_string(),
        }
    }

    /// Create a processor with a specific instance ID
    pub fn with_instance_id(instance_id: String) -> Self {
        Self { instance_id }
    }

    /// Render one summary line per packet.
    ///
    /// An unknown workout code produces its report line and the batch
    /// continues; malformed packets and construction failures propagate.
    pub fn render_lines(&self, packets: &[SensorPacket]) -> Result<Vec<String>, ComputeError> {
        Ok(self
            .process(packets)?
            .into_iter()
            .map(|entry| entry.line)
            .collect())
    }

    /// Process a batch into entries carrying both lines and records
    pub fn process(&self, packets: &[SensorPacket]) -> Result<Vec<BatchEntry>, ComputeError> {
        let mut entries = Vec::with_capacity(packets.len());

        for packet in packets {
            packet.validate()?;

            match compute_record(&packet.workout_type, &packet.data) {
                Ok(record) => entries.push(BatchEntry {
                    workout_type: packet.workout_type.clone(),
                    line: record.to_string(),
                    record: Some(record),
                }),
                Err(miss @ ComputeError::UnknownWorkoutCode(_)) => entries.push(BatchEntry {
                    workout_type: packet.workout_type.clone(),
                    line: miss.to_string(),
                    record: None,
                }),
                Err(fatal) => return Err(fatal),
            }
        }

        Ok(entries)
    }

    /// Process a batch into a JSON-ready summary with producer metadata
    pub fn summarize(&self, packets: &[SensorPacket]) -> Result<BatchSummary, ComputeError> {
        let entries = self.process(packets)?;

        Ok(BatchSummary {
            producer: BatchProducer {
                name: PRODUCER_NAME.to_string(),
                version: FITTRACE_VERSION.to_string(),
                instance_id: self.instance_id.clone(),
            },
            computed_at_utc: Utc::now().to_rfc3339(),
            entries,
        })
    }
}
