// Copyright (c) 2026 Foxflow contributors
//
// This file is part of Foxflow.
//
// Licensed under the MIT license. See the LICENSE file in the repository root
// for the full license text.
//
// This software is provided "AS IS", without warranty of any kind.

//! Auxiliary sensor table for the H1 register family.
//!
//! Pure data: one description per register-backed sensor. Note the two
//! clamp pairs reading a single signed power register each
//! (battery charge/discharge on 11008, feed-in/grid consumption on 11021)
//! and the packed-time charge period registers in the 41xxx holding range.

use crate::modbus_sensor::ModbusSensor;
use crate::sensor_desc::{PostProcess, SensorDescription};
use foxflow_core::DeviceClass::{Battery, Current, Energy, Frequency, Power, Temperature, Voltage};
use foxflow_core::EntityController;
use foxflow_core::StateClass::Measurement;
use std::sync::Arc;
use tracing::debug;

pub const H1_AUX_SENSORS: &[SensorDescription] = &[
    SensorDescription::new("pv1_voltage", 11000, "PV1 Voltage")
        .device_class(Voltage)
        .state_class(Measurement)
        .unit("V")
        .scale(0.1),
    SensorDescription::new("pv1_current", 11001, "PV1 Current")
        .device_class(Current)
        .state_class(Measurement)
        .unit("A")
        .scale(0.1),
    SensorDescription::new("pv1_power", 11002, "PV1 Power")
        .device_class(Power)
        .state_class(Measurement)
        .unit("kW")
        .scale(0.001),
    SensorDescription::new("pv2_voltage", 11003, "PV2 Voltage")
        .device_class(Voltage)
        .state_class(Measurement)
        .unit("V")
        .scale(0.1),
    SensorDescription::new("pv2_current", 11004, "PV2 Current")
        .device_class(Current)
        .state_class(Measurement)
        .unit("A")
        .scale(0.1),
    SensorDescription::new("pv2_power", 11005, "PV2 Power")
        .device_class(Power)
        .state_class(Measurement)
        .unit("kW")
        .scale(0.001),
    SensorDescription::new("battery_soc", 11036, "Battery SoC")
        .device_class(Battery)
        .state_class(Measurement)
        .unit("%"),
    SensorDescription::new("battery_discharge", 11008, "Battery Discharge")
        .device_class(Power)
        .state_class(Measurement)
        .unit("kW")
        .scale(0.001)
        .post_process(PostProcess::ClampPositive),
    SensorDescription::new("battery_charge", 11008, "Battery Charge")
        .device_class(Power)
        .state_class(Measurement)
        .unit("kW")
        .scale(0.001)
        .post_process(PostProcess::ClampNegativeAbs),
    SensorDescription::new("feed_in", 11021, "Feed In")
        .device_class(Power)
        .state_class(Measurement)
        .unit("kW")
        .scale(0.001)
        .post_process(PostProcess::ClampPositive),
    SensorDescription::new("grid_consumption", 11021, "Grid Consumption")
        .device_class(Power)
        .state_class(Measurement)
        .unit("kW")
        .scale(0.001)
        .post_process(PostProcess::ClampNegativeAbs),
    SensorDescription::new("battery_temp", 11038, "Battery Temp")
        .device_class(Temperature)
        .state_class(Measurement)
        .unit("°C")
        .scale(0.1),
    SensorDescription::new("invtemp", 11025, "Inverter Temp")
        .device_class(Temperature)
        .state_class(Measurement)
        .unit("°C")
        .scale(0.1),
    SensorDescription::new("ambtemp", 11024, "Ambient Temp")
        .device_class(Temperature)
        .state_class(Measurement)
        .unit("°C")
        .scale(0.1),
    SensorDescription::new("load_power", 11023, "Load Power")
        .device_class(Power)
        .state_class(Measurement)
        .unit("kW")
        .scale(0.001),
    SensorDescription::new("invbatvolt", 11006, "Inverter Battery Voltage")
        .device_class(Voltage)
        .state_class(Measurement)
        .unit("V")
        .scale(0.1),
    SensorDescription::new("invbatpower", 11007, "Inverter Battery Power")
        .device_class(Power)
        .state_class(Measurement)
        .unit("kW")
        .scale(0.01),
    SensorDescription::new("grid_ct", 11021, "Grid CT")
        .device_class(Power)
        .state_class(Measurement)
        .unit("kW")
        .scale(0.001),
    SensorDescription::new("batvolt", 11034, "Battery Voltage")
        .device_class(Voltage)
        .state_class(Measurement)
        .unit("V")
        .scale(0.1),
    SensorDescription::new("bat_current", 11035, "Battery Current")
        .device_class(Current)
        .state_class(Measurement)
        .unit("A")
        .scale(0.1),
    SensorDescription::new("rvolt", 11009, "Grid Voltage")
        .device_class(Voltage)
        .state_class(Measurement)
        .unit("V")
        .scale(0.1),
    SensorDescription::new("rcurrent", 11010, "Grid Current")
        .device_class(Current)
        .state_class(Measurement)
        .unit("A")
        .scale(0.1),
    SensorDescription::new("rfreq", 11014, "Grid Frequency")
        .device_class(Frequency)
        .state_class(Measurement)
        .unit("Hz")
        .scale(0.01),
    SensorDescription::new("eps_rvolt", 11015, "EPS Voltage")
        .device_class(Voltage)
        .state_class(Measurement)
        .unit("V")
        .scale(0.1),
    SensorDescription::new("ct2_meter", 11022, "CT2 Meter")
        .device_class(Power)
        .state_class(Measurement)
        .unit("kW")
        .scale(0.001),
    SensorDescription::new("bms_watthours_total", 11049, "BMS Watthours Total")
        .device_class(Energy)
        .state_class(Measurement)
        .unit("kWh")
        .scale(0.1),
    SensorDescription::new("min_soc", 41009, "Min SoC")
        .device_class(Battery)
        .state_class(Measurement)
        .unit("%"),
    SensorDescription::new("min_soc_on_grid", 41011, "Min SoC (On Grid)")
        .device_class(Battery)
        .state_class(Measurement)
        .unit("%"),
    SensorDescription::new("max_soc", 41010, "Max SoC")
        .device_class(Battery)
        .state_class(Measurement)
        .unit("%"),
    SensorDescription::new("time_period_1_start", 41002, "Period 1 - Start")
        .post_process(PostProcess::PackedTime),
    SensorDescription::new("time_period_1_end", 41003, "Period 1 - End")
        .post_process(PostProcess::PackedTime),
    SensorDescription::new("time_period_2_start", 41005, "Period 2 - Start")
        .post_process(PostProcess::PackedTime),
    SensorDescription::new("time_period_2_end", 41006, "Period 2 - End")
        .post_process(PostProcess::PackedTime),
    SensorDescription::new("bms_cell_mv_high", 11045, "BMS Cell mV High")
        .device_class(Voltage)
        .state_class(Measurement)
        .unit("mV"),
    SensorDescription::new("bms_cell_mv_low", 11046, "BMS Cell mV Low")
        .device_class(Voltage)
        .state_class(Measurement)
        .unit("mV"),
    SensorDescription::new("bms_charge_rate", 11041, "BMS Charge Rate")
        .device_class(Current)
        .state_class(Measurement)
        .unit("A")
        .scale(0.1),
    SensorDescription::new("bms_discharge_rate", 11042, "BMS Discharge Rate")
        .device_class(Current)
        .state_class(Measurement)
        .unit("A")
        .scale(0.1),
    SensorDescription::new("bms_cell_temp_high", 11043, "BMS Cell Temp High")
        .device_class(Temperature)
        .state_class(Measurement)
        .unit("°C")
        .scale(0.1),
    SensorDescription::new("bms_cell_temp_low", 11044, "BMS Cell Temp Low")
        .device_class(Temperature)
        .state_class(Measurement)
        .unit("°C")
        .scale(0.1),
    SensorDescription::new("bms_kwh_remaining", 11037, "BMS kW Remaining")
        .device_class(Energy)
        .state_class(Measurement)
        .unit("kWh")
        .scale(0.01),
    SensorDescription::new("bms_cycle_count", 11048, "BMS Cycle Count").state_class(Measurement),
];

/// Look up one description by key; table order is fixed, keys are unique
pub fn h1_aux_sensor(key: &str) -> Option<&'static SensorDescription> {
    H1_AUX_SENSORS.iter().find(|description| description.key == key)
}

/// Sensor factory: one live sensor per table entry, bound to the controller
pub fn sensors(controller: &Arc<dyn EntityController>) -> Vec<ModbusSensor> {
    let entities: Vec<ModbusSensor> = H1_AUX_SENSORS
        .iter()
        .map(|description| ModbusSensor::new(Arc::clone(controller), description))
        .collect();

    debug!(
        count = entities.len(),
        inverter = controller.friendly_name(),
        "created H1 auxiliary sensors"
    );
    entities
}

#[cfg(test)]
mod tests {
    use super::*;
    use foxflow_core::{EnergyIntegrator, IntegrationConfig, ModbusEntity, SensorState};
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

    fn controller_with(registers: &[(u16, i32)]) -> Arc<dyn EntityController> {
        Arc::new(FakeController {
            registers: registers.iter().copied().collect(),
        })
    }

    #[test]
    fn test_table_size_and_unique_keys() {
        assert_eq!(H1_AUX_SENSORS.len(), 41);

        let mut keys: Vec<&str> = H1_AUX_SENSORS.iter().map(|d| d.key).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), H1_AUX_SENSORS.len());
    }

    #[test]
    fn test_lookup_is_total_and_deterministic() {
        for description in H1_AUX_SENSORS {
            let first = h1_aux_sensor(description.key).unwrap();
            let second = h1_aux_sensor(description.key).unwrap();
            assert_eq!(first, second);
            assert_eq!(first.address, description.address);
        }
        assert!(h1_aux_sensor("no_such_sensor").is_none());
    }

    #[test]
    fn test_aliased_addresses_carry_complementary_clamps() {
        let discharge = h1_aux_sensor("battery_discharge").unwrap();
        let charge = h1_aux_sensor("battery_charge").unwrap();
        assert_eq!(discharge.address, charge.address);
        assert_eq!(discharge.post_process, Some(PostProcess::ClampPositive));
        assert_eq!(charge.post_process, Some(PostProcess::ClampNegativeAbs));

        let feed_in = h1_aux_sensor("feed_in").unwrap();
        let consumption = h1_aux_sensor("grid_consumption").unwrap();
        assert_eq!(feed_in.address, consumption.address);
    }

    #[test]
    fn test_factory_builds_one_sensor_per_entry() {
        let controller = controller_with(&[]);
        let entities = sensors(&controller);

        assert_eq!(entities.len(), H1_AUX_SENSORS.len());
        for (sensor, description) in entities.iter().zip(H1_AUX_SENSORS) {
            assert_eq!(sensor.key(), description.key);
            assert_eq!(sensor.addresses(), vec![description.address]);
        }
    }

    #[test]
    fn test_end_to_end_battery_flow_split() {
        let controller = controller_with(&[(11008, 1500)]);
        let entities = sensors(&controller);

        let state_of = |key: &str| {
            entities
                .iter()
                .find(|s| s.key() == key)
                .unwrap()
                .state()
                .unwrap()
        };

        assert_eq!(state_of("battery_discharge"), SensorState::Numeric(1.5));
        assert_eq!(state_of("battery_charge"), SensorState::Numeric(0.0));

        let controller = controller_with(&[(11008, -1500)]);
        let entities = sensors(&controller);
        let state_of = |key: &str| {
            entities
                .iter()
                .find(|s| s.key() == key)
                .unwrap()
                .state()
                .unwrap()
        };

        assert_eq!(state_of("battery_discharge"), SensorState::Numeric(0.0));
        assert_eq!(state_of("battery_charge"), SensorState::Numeric(1.5));
    }
}
