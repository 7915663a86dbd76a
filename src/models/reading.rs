use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// One set of vitals submitted to `/suggest`.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Reading {
    #[serde(rename = "temp")]
    pub temperature: f64,
    pub pulse: f64,
    #[serde(rename = "spO2")]
    pub oxygen_saturation: f64,
    pub language: String,
}

/// Vitals submitted to `/assess`. Any `language` field is ignored.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq)]
pub struct Vitals {
    #[serde(rename = "temp")]
    pub temperature: f64,
    pub pulse: f64,
    #[serde(rename = "spO2")]
    pub oxygen_saturation: f64,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SuggestionResponse {
    pub suggestion: String,
}

/// Accepted clinical range for one vital sign.
#[derive(Debug, Clone)]
pub struct VitalRange {
    pub name: &'static str,
    pub unit: &'static str,
    pub range: RangeInclusive<f64>,
}

pub const BODY_TEMPERATURE: VitalRange = VitalRange {
    name: "Body Temperature",
    unit: "°C",
    range: 35.0..=42.0,
};

pub const PULSE_RATE: VitalRange = VitalRange {
    name: "Pulse Rate",
    unit: " BPM",
    range: 40.0..=180.0,
};

pub const SPO2_LEVEL: VitalRange = VitalRange {
    name: "SpO₂ Level",
    unit: "%",
    range: 80.0..=100.0,
};

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum RangeError {
    #[error("{name} {value}{unit} is too low. Expected minimum: {min}{unit}.")]
    TooLow {
        name: &'static str,
        unit: &'static str,
        value: f64,
        min: f64,
    },
    #[error("{name} {value}{unit} is too high. Expected maximum: {max}{unit}.")]
    TooHigh {
        name: &'static str,
        unit: &'static str,
        value: f64,
        max: f64,
    },
}

impl VitalRange {
    pub fn check(&self, value: f64) -> Result<(), RangeError> {
        if value < *self.range.start() {
            return Err(RangeError::TooLow {
                name: self.name,
                unit: self.unit,
                value,
                min: *self.range.start(),
            });
        }
        if value > *self.range.end() {
            return Err(RangeError::TooHigh {
                name: self.name,
                unit: self.unit,
                value,
                max: *self.range.end(),
            });
        }
        Ok(())
    }
}

impl Vitals {
    /// Reports the first out-of-range value: temperature, then pulse, then SpO₂.
    pub fn check_ranges(&self) -> Result<(), RangeError> {
        BODY_TEMPERATURE.check(self.temperature)?;
        PULSE_RATE.check(self.pulse)?;
        SPO2_LEVEL.check(self.oxygen_saturation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reading_uses_wire_names() {
        let reading: Reading = serde_json::from_str(
            r#"{"temp":38.5,"pulse":110,"spO2":94.2,"language":"English"}"#,
        )
        .unwrap();
        assert_eq!(reading.temperature, 38.5);
        assert_eq!(reading.pulse, 110.0);
        assert_eq!(reading.oxygen_saturation, 94.2);
        assert_eq!(reading.language, "English");
    }

    #[test]
    fn reading_rejects_missing_and_mistyped_fields() {
        assert!(serde_json::from_str::<Reading>(r#"{"temp":"high"}"#).is_err());
        assert!(serde_json::from_str::<Reading>(r#"{"temp":37,"pulse":80,"spO2":98}"#).is_err());
        assert!(serde_json::from_str::<Reading>(
            r#"{"temp":37,"pulse":80,"spO2":98,"language":5}"#
        )
        .is_err());
    }

    #[test]
    fn bounds_are_inclusive() {
        let vitals = Vitals {
            temperature: 35.0,
            pulse: 180.0,
            oxygen_saturation: 100.0,
        };
        assert!(vitals.check_ranges().is_ok());
    }

    #[test]
    fn first_violation_is_reported() {
        let vitals = Vitals {
            temperature: 43.0,
            pulse: 20.0,
            oxygen_saturation: 70.0,
        };
        assert_eq!(
            vitals.check_ranges().unwrap_err().to_string(),
            "Body Temperature 43°C is too high. Expected maximum: 42°C."
        );

        let vitals = Vitals {
            temperature: 37.0,
            pulse: 20.0,
            oxygen_saturation: 70.0,
        };
        assert_eq!(
            vitals.check_ranges().unwrap_err().to_string(),
            "Pulse Rate 20 BPM is too low. Expected minimum: 40 BPM."
        );

        let vitals = Vitals {
            temperature: 37.0,
            pulse: 80.0,
            oxygen_saturation: 79.5,
        };
        assert_eq!(
            vitals.check_ranges().unwrap_err().to_string(),
            "SpO₂ Level 79.5% is too low. Expected minimum: 80%."
        );
    }
}
