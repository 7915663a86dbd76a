//! Fuzzy severity scoring of a set of vitals.
//!
//! A small Mamdani system: triangular memberships on each vital, rules
//! combined with min, consequents clipped and aggregated with max, and the
//! crisp score taken as the centroid of the piecewise-linear aggregate over
//! the 0..=100 severity universe.

use crate::models::reading::Vitals;
use serde::{Deserialize, Serialize};

const TEMPERATURE_UNIVERSE: (f64, f64) = (35.0, 41.9);
const PULSE_UNIVERSE: (f64, f64) = (40.0, 179.0);
const SPO2_UNIVERSE: (f64, f64) = (80.0, 100.0);
const SEVERITY_MAX: u32 = 100;

const NO_MATCHING_RULE: &str = "No matching rule found. Unable to calculate severity level.";
const NO_MATCHING_RULE_COLOR: &str = "white";

#[derive(Debug, Clone, Copy)]
struct Triangle(f64, f64, f64);

impl Triangle {
    fn membership(self, x: f64) -> f64 {
        let Triangle(a, b, c) = self;
        if x == b {
            1.0
        } else if a < x && x < b {
            (x - a) / (b - a)
        } else if b < x && x < c {
            (c - x) / (c - b)
        } else {
            0.0
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Temperature {
    Low,
    Normal,
    High,
}

impl Temperature {
    fn shape(self) -> Triangle {
        match self {
            Temperature::Low => Triangle(35.0, 36.0, 37.0),
            Temperature::Normal => Triangle(36.0, 37.0, 38.0),
            Temperature::High => Triangle(37.0, 39.0, 41.0),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Pulse {
    Low,
    Normal,
}

impl Pulse {
    fn shape(self) -> Triangle {
        match self {
            Pulse::Low => Triangle(40.0, 60.0, 80.0),
            Pulse::Normal => Triangle(70.0, 100.0, 130.0),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Oxygen {
    VeryLow,
    Low,
    Normal,
}

impl Oxygen {
    fn shape(self) -> Triangle {
        match self {
            Oxygen::VeryLow => Triangle(80.0, 85.0, 90.0),
            Oxygen::Low => Triangle(88.0, 92.0, 95.0),
            Oxygen::Normal => Triangle(94.0, 97.0, 100.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeverityLevel {
    Low,
    Medium,
    High,
    VeryHigh,
}

impl SeverityLevel {
    const ALL: [SeverityLevel; 4] = [
        SeverityLevel::Low,
        SeverityLevel::Medium,
        SeverityLevel::High,
        SeverityLevel::VeryHigh,
    ];

    fn shape(self) -> Triangle {
        match self {
            SeverityLevel::Low => Triangle(0.0, 25.0, 50.0),
            SeverityLevel::Medium => Triangle(30.0, 50.0, 70.0),
            SeverityLevel::High => Triangle(60.0, 80.0, 90.0),
            SeverityLevel::VeryHigh => Triangle(80.0, 90.0, 100.0),
        }
    }

    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            SeverityLevel::VeryHigh
        } else if score >= 60.0 {
            SeverityLevel::High
        } else if score >= 30.0 {
            SeverityLevel::Medium
        } else {
            SeverityLevel::Low
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            SeverityLevel::VeryHigh => {
                "ALERT: Very High severity! Immediate medical attention recommended"
            }
            SeverityLevel::High => "Warning: High severity. Monitor patient closely",
            SeverityLevel::Medium => "Warning: Medium severity. Check condition regularly",
            SeverityLevel::Low => "Normal: Low severity. Patient condition is stable",
        }
    }

    /// Alert colour shown alongside the message.
    pub fn color(self) -> &'static str {
        match self {
            SeverityLevel::VeryHigh => "red",
            SeverityLevel::High => "orange",
            SeverityLevel::Medium => "yellow",
            SeverityLevel::Low => "green",
        }
    }
}

struct Rule {
    temperature: Temperature,
    pulse: Pulse,
    oxygen: Oxygen,
    severity: SeverityLevel,
}

const RULES: [Rule; 7] = [
    Rule {
        temperature: Temperature::High,
        pulse: Pulse::Low,
        oxygen: Oxygen::VeryLow,
        severity: SeverityLevel::VeryHigh,
    },
    Rule {
        temperature: Temperature::High,
        pulse: Pulse::Low,
        oxygen: Oxygen::Low,
        severity: SeverityLevel::High,
    },
    Rule {
        temperature: Temperature::Normal,
        pulse: Pulse::Low,
        oxygen: Oxygen::Low,
        severity: SeverityLevel::High,
    },
    Rule {
        temperature: Temperature::Normal,
        pulse: Pulse::Normal,
        oxygen: Oxygen::Low,
        severity: SeverityLevel::Medium,
    },
    Rule {
        temperature: Temperature::Normal,
        pulse: Pulse::Normal,
        oxygen: Oxygen::Normal,
        severity: SeverityLevel::Low,
    },
    Rule {
        temperature: Temperature::Low,
        pulse: Pulse::Low,
        oxygen: Oxygen::Low,
        severity: SeverityLevel::High,
    },
    Rule {
        temperature: Temperature::Low,
        pulse: Pulse::Normal,
        oxygen: Oxygen::VeryLow,
        severity: SeverityLevel::VeryHigh,
    },
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub severity: Option<f64>,
    pub level: Option<SeverityLevel>,
    pub message: String,
    pub color: String,
}

/// Crisp severity in 0..=100, or `None` when no rule fires.
pub fn severity_score(vitals: &Vitals) -> Option<f64> {
    let temperature = vitals
        .temperature
        .clamp(TEMPERATURE_UNIVERSE.0, TEMPERATURE_UNIVERSE.1);
    let pulse = vitals.pulse.clamp(PULSE_UNIVERSE.0, PULSE_UNIVERSE.1);
    let oxygen = vitals
        .oxygen_saturation
        .clamp(SPO2_UNIVERSE.0, SPO2_UNIVERSE.1);

    // Firing strength per consequent, indexed like SeverityLevel::ALL.
    let mut activation = [0.0_f64; 4];
    for rule in &RULES {
        let strength = rule
            .temperature
            .shape()
            .membership(temperature)
            .min(rule.pulse.shape().membership(pulse))
            .min(rule.oxygen.shape().membership(oxygen));
        let slot = &mut activation[rule.severity as usize];
        *slot = slot.max(strength);
    }

    // Integer steps plus the points where each clipped consequent leaves
    // its triangle, so the aggregate is linear between neighbours.
    let mut universe: Vec<f64> = (0..=SEVERITY_MAX).map(f64::from).collect();
    for level in SeverityLevel::ALL {
        let cut = activation[level as usize];
        if cut > 0.0 && cut < 1.0 {
            let Triangle(a, b, c) = level.shape();
            universe.push(a + cut * (b - a));
            universe.push(c - cut * (c - b));
        }
    }
    universe.sort_by(f64::total_cmp);
    universe.dedup();

    let aggregate: Vec<f64> = universe
        .iter()
        .map(|&x| {
            SeverityLevel::ALL
                .iter()
                .map(|level| activation[*level as usize].min(level.shape().membership(x)))
                .fold(0.0, f64::max)
        })
        .collect();

    piecewise_centroid(&universe, &aggregate)
}

/// Centroid of the polyline through `(xs[i], ys[i])`, each segment taken as
/// a trapezoid. `None` when the enclosed area is zero.
fn piecewise_centroid(xs: &[f64], ys: &[f64]) -> Option<f64> {
    let (mut moment, mut area) = (0.0, 0.0);
    for (x, y) in xs.windows(2).zip(ys.windows(2)) {
        let (x1, x2, y1, y2) = (x[0], x[1], y[0], y[1]);
        if y1 + y2 == 0.0 || x1 == x2 {
            continue;
        }
        let segment_area = 0.5 * (x2 - x1) * (y1 + y2);
        let segment_centre = x1 + (x2 - x1) * (y1 + 2.0 * y2) / (3.0 * (y1 + y2));
        moment += segment_centre * segment_area;
        area += segment_area;
    }

    if area > 0.0 {
        Some(moment / area)
    } else {
        None
    }
}

pub fn assess(vitals: &Vitals) -> Assessment {
    match severity_score(vitals) {
        Some(score) => {
            let level = SeverityLevel::from_score(score);
            Assessment {
                severity: Some(score),
                level: Some(level),
                message: level.message().to_string(),
                color: level.color().to_string(),
            }
        }
        None => Assessment {
            severity: None,
            level: None,
            message: NO_MATCHING_RULE.to_string(),
            color: NO_MATCHING_RULE_COLOR.to_string(),
        },
    }
}
