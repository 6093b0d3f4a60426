//! fit.sensor_packet.v1 schema definition
//!
//! The input side of the calculator: one packet per workout, carrying the
//! workout code and the ordered positional sensor values. Optional provenance
//! fields (device id, observation time) travel alongside but never influence
//! the computation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ComputeError;

/// Current input schema version
pub const SCHEMA_VERSION: &str = "fit.sensor_packet.v1";

/// One raw sensor packet: `(workout code, ordered values)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorPacket {
    /// Workout code (SWM, RUN, WLK)
    pub workout_type: String,
    /// Positional sensor values; order and count are code-specific
    pub data: Vec<f64>,
    /// Originating device, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,
    /// When the packet was recorded (UTC)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observed_at: Option<DateTime<Utc>>,
}

impl SensorPacket {
    pub fn new(workout_type: &str, data: Vec<f64>) -> Self {
        Self {
            workout_type: workout_type.to_string(),
            data,
            device_id: None,
            observed_at: None,
        }
    }

    /// Check packet well-formedness without dispatching it.
    ///
    /// Arity against the code table is deliberately not checked here; that is
    /// a construction-time concern of the calculator constructors.
    pub fn validate(&self) -> Result<(), ComputeError> {
        if self.workout_type.trim().is_empty() {
            return Err(ComputeError::InvalidPacket(
                "empty workout code".to_string(),
            ));
        }

        if self.data.is_empty() {
            return Err(ComputeError::InvalidPacket(format!(
                "packet {} carries no sensor values",
                self.workout_type
            )));
        }

        for (index, value) in self.data.iter().enumerate() {
            if !value.is_finite() || *value < 0.0 {
                return Err(ComputeError::InvalidPacket(format!(
                    "non-finite or negative sensor value {value} at index {index}"
                )));
            }
        }

        Ok(())
    }

    /// Parse newline-delimited JSON (one packet per line, blank lines skipped)
    pub fn parse_ndjson(input: &str) -> Result<Vec<SensorPacket>, ComputeError> {
        let mut packets = Vec::new();

        for line in input.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            packets.push(serde_json::from_str(trimmed)?);
        }

        Ok(packets)
    }

    /// Parse a JSON array of packets
    pub fn parse_array(input: &str) -> Result<Vec<SensorPacket>, ComputeError> {
        Ok(serde_json::from_str(input)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_ndjson() {
        let input = r#"
            {"workout_type": "RUN", "data": [15000, 1, 75]}

            {"workout_type": "SWM", "data": [720, 1, 80, 25, 40], "device_id": "pool-watch-7"}
        "#;

        let packets = SensorPacket::parse_ndjson(input).unwrap();
        assert_eq!(packets.len(), 2);
        assert_eq!(packets[0].workout_type, "RUN");
        assert_eq!(packets[0].data, vec![15000.0, 1.0, 75.0]);
        assert_eq!(packets[1].device_id.as_deref(), Some("pool-watch-7"));
    }

    #[test]
    fn test_parse_array() {
        let input = r#"[
            {"workout_type": "WLK", "data": [9000, 1, 75, 180]},
            {"workout_type": "RUN", "data": [15000, 1, 75]}
        ]"#;

        let packets = SensorPacket::parse_array(input).unwrap();
        assert_eq!(packets.len(), 2);
        assert_eq!(packets[0].workout_type, "WLK");
    }

    #[test]
    fn test_parse_rejects_malformed_json() {
        assert!(SensorPacket::parse_ndjson("not json").is_err());
        assert!(SensorPacket::parse_array(r#"{"workout_type": "RUN"}"#).is_err());
    }

    #[test]
    fn test_validate_rejects_empty_code_and_values() {
        let packet = SensorPacket::new("", vec![1.0]);
        assert!(packet.validate().is_err());

        let packet = SensorPacket::new("RUN", vec![]);
        assert!(packet.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_non_finite_values() {
        let packet = SensorPacket::new("RUN", vec![15000.0, f64::NAN, 75.0]);
        assert!(packet.validate().is_err());

        let packet = SensorPacket::new("RUN", vec![15000.0, 1.0, -75.0]);
        assert!(packet.validate().is_err());
    }

    #[test]
    fn test_validate_does_not_check_arity() {
        // Too few values for RUN, but still a well-formed packet
        let packet = SensorPacket::new("RUN", vec![15000.0]);
        assert!(packet.validate().is_ok());
    }

    #[test]
    fn test_serialization_round_trip() {
        let mut packet = SensorPacket::new("SWM", vec![720.0, 1.0, 80.0, 25.0, 40.0]);
        packet.device_id = Some("pool-watch-7".to_string());

        let json = serde_json::to_string(&packet).unwrap();
        let back: SensorPacket = serde_json::from_str(&json).unwrap();
        assert_eq!(packet, back);
    }
}
