// Copyright (c) 2026 Foxflow contributors
//
// This file is part of Foxflow.
//
// Licensed under the MIT license. See the LICENSE file in the repository root
// for the full license text.
//
// This software is provided "AS IS", without warranty of any kind.

//! Entity descriptions for the FoxESS H1 register family.
//!
//! Static descriptor tables plus the thin adapters that turn a register
//! snapshot into host-platform entity states. The host owns scheduling,
//! persistence and the entity lifecycle; everything here is immutable data
//! and pure derivation.

pub mod h1_aux_sensors;
pub mod integration_sensor;
pub mod modbus_sensor;
pub mod sensor_desc;

pub use h1_aux_sensors::{H1_AUX_SENSORS, h1_aux_sensor};
pub use integration_sensor::{
    H1_INTEGRATION_SENSORS, ModbusIntegrationSensor, ModbusIntegrationSensorDescription,
    integration_sensors,
};
pub use modbus_sensor::ModbusSensor;
pub use sensor_desc::{PostProcess, SensorDescription};

use foxflow_core::{EntityController, InverterModel, ModbusEntity, RegisterType};
use std::sync::Arc;
use tracing::info;

/// Set up every H1 entity this crate describes: one measurement sensor per
/// auxiliary table entry plus the integration sensors the hardware variant
/// supports
pub fn create_h1_entities(
    controller: &Arc<dyn EntityController>,
    model: InverterModel,
    register_type: RegisterType,
) -> Vec<Box<dyn ModbusEntity>> {
    let mut entities: Vec<Box<dyn ModbusEntity>> = h1_aux_sensors::sensors(controller)
        .into_iter()
        .map(|sensor| Box::new(sensor) as Box<dyn ModbusEntity>)
        .collect();

    entities.extend(integration_sensor::integration_sensors(
        controller,
        model,
        register_type,
    ));

    info!(
        count = entities.len(),
        %model,
        inverter = controller.friendly_name(),
        "created H1 entities"
    );
    entities
}
