// Copyright (c) 2026 Foxflow contributors
//
// This file is part of Foxflow.
//
// Licensed under the MIT license. See the LICENSE file in the repository root
// for the full license text.
//
// This software is provided "AS IS", without warranty of any kind.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Rounding applied to integrated totals when a description does not ask
/// for a specific precision
pub const DEFAULT_ROUND_DIGITS: u8 = 3;

/// Numerical method the host integrator should use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IntegrationMethod {
    /// Trapezoidal rule (average of successive samples)
    #[default]
    Trapezoidal,
    /// Left Riemann sum (hold previous sample)
    Left,
    /// Right Riemann sum (hold next sample)
    Right,
}

impl fmt::Display for IntegrationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Trapezoidal => "trapezoidal",
            Self::Left => "left",
            Self::Right => "right",
        };
        write!(f, "{name}")
    }
}

/// Time unit of the integral (power in kW integrated over hours gives kWh)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnitOfTime {
    Seconds,
    Minutes,
    #[default]
    Hours,
    Days,
}

impl UnitOfTime {
    /// Unit suffix as the host platform spells it
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Seconds => "s",
            Self::Minutes => "min",
            Self::Hours => "h",
            Self::Days => "d",
        }
    }
}

impl fmt::Display for UnitOfTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Configuration handed to the host's integrating-sensor implementation
///
/// Foxflow only supplies this configuration; accumulation, state
/// restoration after restart and the update lifecycle are entirely the
/// host integrator's responsibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrationConfig {
    pub method: IntegrationMethod,
    pub round_digits: u8,
    /// Resolved entity id of the power sensor being integrated
    pub source_entity: String,
    pub unit_time: UnitOfTime,
}

/// Host-supplied time integrator (power -> energy)
///
/// Modeled as a collaborator the descriptions configure instead of a base
/// class entities inherit from, so the integration math stays outside this
/// codebase.
pub trait EnergyIntegrator: Send + Sync {
    /// Current accumulated total for the configured source, unrounded
    ///
    /// `None` while the integrator has not accumulated anything yet.
    fn total(&self, config: &IntegrationConfig) -> Option<f64>;
}

/// Round to a fixed number of decimal digits, half away from zero
pub fn round_to(value: f64, digits: u8) -> f64 {
    let factor = 10_f64.powi(i32::from(digits));
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_serde_kebab_case() {
        assert_eq!(
            serde_json::to_value(IntegrationMethod::Trapezoidal).unwrap(),
            serde_json::json!("trapezoidal")
        );
        let parsed: IntegrationMethod = serde_json::from_value(serde_json::json!("left")).unwrap();
        assert_eq!(parsed, IntegrationMethod::Left);
    }

    #[test]
    fn test_unit_of_time_suffix() {
        assert_eq!(UnitOfTime::Hours.to_string(), "h");
        assert_eq!(UnitOfTime::Seconds.to_string(), "s");
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(1.23456, 3), 1.235);
        assert_eq!(round_to(1.23456, 1), 1.2);
        assert_eq!(round_to(-2.71828, 2), -2.72);
        assert_eq!(round_to(2.0, 3), 2.0);
    }

    #[test]
    fn test_config_serde_round_trip() {
        let config = IntegrationConfig {
            method: IntegrationMethod::Left,
            round_digits: DEFAULT_ROUND_DIGITS,
            source_entity: "sensor.garage_h1_pv1_power".to_owned(),
            unit_time: UnitOfTime::Hours,
        };

        let json = serde_json::to_string(&config).unwrap();
        let back: IntegrationConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
