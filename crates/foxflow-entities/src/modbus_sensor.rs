// Copyright (c) 2026 Foxflow contributors
//
// This file is part of Foxflow.
//
// Licensed under the MIT license. See the LICENSE file in the repository root
// for the full license text.
//
// This software is provided "AS IS", without warranty of any kind.

use crate::sensor_desc::SensorDescription;
use foxflow_core::{EntityController, ModbusEntity, Platform, SensorState, entity_id_for};
use std::fmt;
use std::sync::Arc;

/// A measurement sensor bound to one register description
///
/// Holds no state of its own; every poll recomputes the display value from
/// the controller's latest snapshot.
pub struct ModbusSensor {
    controller: Arc<dyn EntityController>,
    description: &'static SensorDescription,
}

impl ModbusSensor {
    pub fn new(
        controller: Arc<dyn EntityController>,
        description: &'static SensorDescription,
    ) -> Self {
        Self {
            controller,
            description,
        }
    }

    pub fn description(&self) -> &'static SensorDescription {
        self.description
    }
}

impl fmt::Debug for ModbusSensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModbusSensor")
            .field("key", &self.description.key)
            .field("address", &self.description.address)
            .finish_non_exhaustive()
    }
}

impl ModbusEntity for ModbusSensor {
    fn key(&self) -> &str {
        self.description.key
    }

    fn name(&self) -> String {
        let friendly = self.controller.friendly_name();
        if friendly.is_empty() {
            self.description.name.to_owned()
        } else {
            format!("{friendly} {}", self.description.name)
        }
    }

    fn unique_id(&self) -> String {
        format!(
            "foxflow_{}_{}",
            self.controller.unique_id_prefix(),
            self.description.key
        )
    }

    fn entity_id(&self) -> String {
        entity_id_for(self.controller.as_ref(), Platform::Sensor, self.description.key)
    }

    fn addresses(&self) -> Vec<u16> {
        vec![self.description.address]
    }

    fn state(&self) -> Option<SensorState> {
        self.controller
            .raw_value(self.description.address)
            .map(|raw| self.description.derive(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensor_desc::PostProcess;
    use foxflow_core::{DeviceClass, EnergyIntegrator, IntegrationConfig, StateClass, TimeOfDay};
    use std::collections::HashMap;

    struct NoopIntegrator;

    impl EnergyIntegrator for NoopIntegrator {
        fn total(&self, _config: &IntegrationConfig) -> Option<f64> {
            None
        }
    }

    struct FakeController {
        registers: HashMap<u16, i32>,
    }

    impl FakeController {
        fn with(registers: &[(u16, i32)]) -> Arc<Self> {
            Arc::new(Self {
                registers: registers.iter().copied().collect(),
            })
        }
    }

    impl EntityController for FakeController {
        fn raw_value(&self, address: u16) -> Option<i32> {
            self.registers.get(&address).copied()
        }

        fn friendly_name(&self) -> &str {
            "Garage H1"
        }

        fn unique_id_prefix(&self) -> &str {
            "entry01"
        }

        fn integrator(&self) -> Arc<dyn EnergyIntegrator> {
            Arc::new(NoopIntegrator)
        }
    }

    const VOLTAGE: SensorDescription = SensorDescription::new("pv1_voltage", 11000, "PV1 Voltage")
        .device_class(DeviceClass::Voltage)
        .state_class(StateClass::Measurement)
        .unit("V")
        .scale(0.1);

    const PERIOD: SensorDescription =
        SensorDescription::new("time_period_1_start", 41002, "Period 1 - Start")
            .post_process(PostProcess::PackedTime);

    #[test]
    fn test_state_from_snapshot() {
        let controller = FakeController::with(&[(11000, 2304)]);
        let sensor = ModbusSensor::new(controller, &VOLTAGE);

        assert_eq!(sensor.state(), Some(SensorState::Numeric(230.4)));
    }

    #[test]
    fn test_state_none_when_register_unread() {
        let controller = FakeController::with(&[]);
        let sensor = ModbusSensor::new(controller, &VOLTAGE);

        assert_eq!(sensor.state(), None);
    }

    #[test]
    fn test_time_sensor_state() {
        let controller = FakeController::with(&[(41002, 7 * 256 + 45)]);
        let sensor = ModbusSensor::new(controller, &PERIOD);

        assert_eq!(
            sensor.state(),
            Some(SensorState::Time(TimeOfDay::new(7, 45)))
        );
    }

    #[test]
    fn test_identity() {
        let controller = FakeController::with(&[]);
        let sensor = ModbusSensor::new(controller, &VOLTAGE);

        assert_eq!(sensor.key(), "pv1_voltage");
        assert_eq!(sensor.name(), "Garage H1 PV1 Voltage");
        assert_eq!(sensor.unique_id(), "foxflow_entry01_pv1_voltage");
        assert_eq!(sensor.entity_id(), "sensor.garage_h1_pv1_voltage");
        assert_eq!(sensor.addresses(), vec![11000]);
    }
}
