// Copyright (c) 2026 Foxflow contributors
//
// This file is part of Foxflow.
//
// Licensed under the MIT license. See the LICENSE file in the repository root
// for the full license text.
//
// This software is provided "AS IS", without warranty of any kind.

use foxflow_core::{DeviceClass, SensorState, StateClass, TimeOfDay};
use serde::Serialize;

/// Post-processing applied to a scaled register value
///
/// A closed set of strategies instead of arbitrary closures, so descriptions
/// stay plain serializable data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PostProcess {
    /// Keep positive flow, report zero otherwise
    ClampPositive,
    /// Keep the magnitude of negative flow, report zero otherwise
    ClampNegativeAbs,
    /// Decode an `hour * 256 + minute` clock register
    PackedTime,
}

/// Static description of one register-backed sensor
///
/// Descriptions are immutable, process-wide data; a live sensor binds one of
/// them to a controller. Two descriptions may deliberately share an address
/// with complementary clamping (battery charge/discharge on one signed
/// power register).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SensorDescription {
    /// Unique key, stable across restarts for entity-id continuity
    pub key: &'static str,
    /// Register address the value is read from
    pub address: u16,
    /// Display name
    pub name: &'static str,
    pub device_class: Option<DeviceClass>,
    pub state_class: Option<StateClass>,
    /// Unit of the *scaled* value, forwarded verbatim to the host
    pub unit: Option<&'static str>,
    /// Multiplicative factor from raw register units to physical units;
    /// absent means the raw integer is already the physical value
    pub scale: Option<f64>,
    pub post_process: Option<PostProcess>,
}

impl SensorDescription {
    pub const fn new(key: &'static str, address: u16, name: &'static str) -> Self {
        Self {
            key,
            address,
            name,
            device_class: None,
            state_class: None,
            unit: None,
            scale: None,
            post_process: None,
        }
    }

    pub const fn device_class(mut self, device_class: DeviceClass) -> Self {
        self.device_class = Some(device_class);
        self
    }

    pub const fn state_class(mut self, state_class: StateClass) -> Self {
        self.state_class = Some(state_class);
        self
    }

    pub const fn unit(mut self, unit: &'static str) -> Self {
        self.unit = Some(unit);
        self
    }

    pub const fn scale(mut self, scale: f64) -> Self {
        self.scale = Some(scale);
        self
    }

    pub const fn post_process(mut self, post_process: PostProcess) -> Self {
        self.post_process = Some(post_process);
        self
    }

    /// Derive the display value from a raw register reading
    ///
    /// Pure and total: scaling first, then the post-processing strategy.
    /// Reapplying to the same raw input always yields the same state.
    pub fn derive(&self, raw: i32) -> SensorState {
        match self.post_process {
            // Packed times are never scaled; the register holds the packed
            // integer directly
            Some(PostProcess::PackedTime) => {
                SensorState::Time(TimeOfDay::from_register(raw as u16))
            }
            Some(PostProcess::ClampPositive) => {
                let value = self.scaled(raw);
                SensorState::Numeric(if value > 0.0 { value } else { 0.0 })
            }
            Some(PostProcess::ClampNegativeAbs) => {
                let value = self.scaled(raw);
                SensorState::Numeric(if value < 0.0 { value.abs() } else { 0.0 })
            }
            None => SensorState::Numeric(self.scaled(raw)),
        }
    }

    fn scaled(&self, raw: i32) -> f64 {
        match self.scale {
            Some(scale) => f64::from(raw) * scale,
            None => f64::from(raw),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAIN: SensorDescription = SensorDescription::new("pv1_voltage", 11000, "PV1 Voltage")
        .device_class(DeviceClass::Voltage)
        .state_class(StateClass::Measurement)
        .unit("V")
        .scale(0.1);

    const DISCHARGE: SensorDescription =
        SensorDescription::new("battery_discharge", 11008, "Battery Discharge")
            .scale(0.001)
            .post_process(PostProcess::ClampPositive);

    const CHARGE: SensorDescription =
        SensorDescription::new("battery_charge", 11008, "Battery Charge")
            .scale(0.001)
            .post_process(PostProcess::ClampNegativeAbs);

    const PERIOD_START: SensorDescription =
        SensorDescription::new("time_period_1_start", 41002, "Period 1 - Start")
            .post_process(PostProcess::PackedTime);

    #[test]
    fn test_derive_without_post_process_is_raw_times_scale() {
        assert_eq!(PLAIN.derive(2304), SensorState::Numeric(230.4));
        assert_eq!(PLAIN.derive(0), SensorState::Numeric(0.0));
        assert_eq!(PLAIN.derive(-10), SensorState::Numeric(-1.0));
    }

    #[test]
    fn test_derive_without_scale_keeps_raw() {
        let soc = SensorDescription::new("battery_soc", 11036, "Battery SoC");
        assert_eq!(soc.derive(87), SensorState::Numeric(87.0));
    }

    #[test]
    fn test_clamp_pair_is_exclusive_and_non_negative() {
        for raw in [-30000, -1500, -1, 0, 1, 1500, 30000] {
            let SensorState::Numeric(discharge) = DISCHARGE.derive(raw) else {
                panic!("expected numeric state");
            };
            let SensorState::Numeric(charge) = CHARGE.derive(raw) else {
                panic!("expected numeric state");
            };

            assert!(discharge >= 0.0);
            assert!(charge >= 0.0);
            if raw == 0 {
                assert_eq!(discharge, 0.0);
                assert_eq!(charge, 0.0);
            } else {
                // exactly one side of the pair is active
                assert!((discharge == 0.0) != (charge == 0.0));
            }
        }
    }

    #[test]
    fn test_clamp_pair_magnitudes() {
        assert_eq!(DISCHARGE.derive(1500), SensorState::Numeric(1.5));
        assert_eq!(CHARGE.derive(1500), SensorState::Numeric(0.0));
        assert_eq!(DISCHARGE.derive(-1500), SensorState::Numeric(0.0));
        assert_eq!(CHARGE.derive(-1500), SensorState::Numeric(1.5));
    }

    #[test]
    fn test_derive_packed_time() {
        assert_eq!(
            PERIOD_START.derive(5 * 256 + 30),
            SensorState::Time(TimeOfDay::new(5, 30))
        );
        // literal arithmetic for out-of-range content
        assert_eq!(
            PERIOD_START.derive(1530),
            SensorState::Time(TimeOfDay::new(5, 250))
        );
    }

    #[test]
    fn test_derive_is_idempotent_per_input() {
        assert_eq!(DISCHARGE.derive(777), DISCHARGE.derive(777));
        assert_eq!(PERIOD_START.derive(1281), PERIOD_START.derive(1281));
    }

    #[test]
    fn test_description_serializes() {
        let json = serde_json::to_value(PLAIN).unwrap();
        assert_eq!(json["key"], "pv1_voltage");
        assert_eq!(json["address"], 11000);
        assert_eq!(json["device_class"], "voltage");
    }
}
