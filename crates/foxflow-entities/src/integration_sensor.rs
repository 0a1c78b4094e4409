// Copyright (c) 2026 Foxflow contributors
//
// This file is part of Foxflow.
//
// Licensed under the MIT license. See the LICENSE file in the repository root
// for the full license text.
//
// This software is provided "AS IS", without warranty of any kind.

//! Synthetic energy sensors integrating the H1 power sensors over time.
//!
//! The descriptions here only configure the host's integrator; none of the
//! accumulation math lives in this crate.

use foxflow_core::{
    DEFAULT_ROUND_DIGITS, EnergyIntegrator, EntityController, EntityFactory, EntitySpec,
    IntegrationConfig, IntegrationMethod, InverterModel, ModbusEntity, Platform, RegisterType,
    SensorState, UnitOfTime, entity_id_for, round_to,
};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Static description of one time-integrating sensor
///
/// References a source power sensor by its table key; the live entity id is
/// resolved within the controller's namespace at construction time.
#[derive(Debug, Clone, Copy)]
pub struct ModbusIntegrationSensorDescription {
    pub key: &'static str,
    pub name: &'static str,
    /// Hardware variants this sensor applies to
    pub models: &'static [EntitySpec],
    pub integration_method: IntegrationMethod,
    /// Decimal digits for the reported total; `None` uses the host default
    pub round_digits: Option<u8>,
    /// Key of the power sensor being integrated
    pub source_entity: &'static str,
    pub unit_time: UnitOfTime,
}

impl ModbusIntegrationSensorDescription {
    fn supports(&self, model: InverterModel, register_type: RegisterType) -> bool {
        self.models
            .iter()
            .any(|spec| spec.supports(model, register_type))
    }
}

impl EntityFactory for ModbusIntegrationSensorDescription {
    fn create_entity_if_supported(
        &'static self,
        controller: Arc<dyn EntityController>,
        model: InverterModel,
        register_type: RegisterType,
    ) -> Option<Box<dyn ModbusEntity>> {
        if !self.supports(model, register_type) {
            debug!(key = self.key, %model, "integration sensor not applicable to this model");
            return None;
        }

        let source_entity = entity_id_for(controller.as_ref(), Platform::Sensor, self.source_entity);
        let config = IntegrationConfig {
            method: self.integration_method,
            round_digits: self.round_digits.unwrap_or(DEFAULT_ROUND_DIGITS),
            source_entity,
            unit_time: self.unit_time,
        };

        Some(Box::new(ModbusIntegrationSensor::new(
            controller, self, config,
        )))
    }
}

/// A synthetic sensor whose value is the time-integral of another sensor
///
/// Owns no register; the host's [`EnergyIntegrator`] does the accumulation
/// and persistence, this entity only supplies the configuration and rounds
/// the reported total.
pub struct ModbusIntegrationSensor {
    controller: Arc<dyn EntityController>,
    description: &'static ModbusIntegrationSensorDescription,
    integrator: Arc<dyn EnergyIntegrator>,
    config: IntegrationConfig,
}

impl ModbusIntegrationSensor {
    fn new(
        controller: Arc<dyn EntityController>,
        description: &'static ModbusIntegrationSensorDescription,
        config: IntegrationConfig,
    ) -> Self {
        let integrator = controller.integrator();
        Self {
            controller,
            description,
            integrator,
            config,
        }
    }

    pub fn config(&self) -> &IntegrationConfig {
        &self.config
    }
}

impl fmt::Debug for ModbusIntegrationSensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModbusIntegrationSensor")
            .field("key", &self.description.key)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ModbusEntity for ModbusIntegrationSensor {
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

    // Synthetic sensor: no protocol register of its own
    fn addresses(&self) -> Vec<u16> {
        Vec::new()
    }

    fn state(&self) -> Option<SensorState> {
        self.integrator
            .total(&self.config)
            .map(|total| SensorState::Numeric(round_to(total, self.config.round_digits)))
    }
}

/// H1 family with the input-register addressing the aux power sensors use
const H1_FAMILY: EntitySpec = EntitySpec::new(
    &[InverterModel::H1, InverterModel::Ac1, InverterModel::AioH1],
    &[RegisterType::Input],
);

const fn energy_total(
    key: &'static str,
    name: &'static str,
    source_entity: &'static str,
) -> ModbusIntegrationSensorDescription {
    ModbusIntegrationSensorDescription {
        key,
        name,
        models: &[H1_FAMILY],
        integration_method: IntegrationMethod::Left,
        round_digits: None,
        source_entity,
        unit_time: UnitOfTime::Hours,
    }
}

/// Energy totals derived from the H1 auxiliary power sensors
pub const H1_INTEGRATION_SENSORS: &[ModbusIntegrationSensorDescription] = &[
    energy_total("pv1_energy_total", "PV1 Energy Total", "pv1_power"),
    energy_total("pv2_energy_total", "PV2 Energy Total", "pv2_power"),
    energy_total("load_energy_total", "Load Energy Total", "load_power"),
    energy_total("feed_in_energy_total", "Feed In Energy Total", "feed_in"),
    energy_total(
        "grid_consumption_energy_total",
        "Grid Consumption Energy Total",
        "grid_consumption",
    ),
    energy_total(
        "battery_charge_energy_total",
        "Battery Charge Energy Total",
        "battery_charge",
    ),
    energy_total(
        "battery_discharge_energy_total",
        "Battery Discharge Energy Total",
        "battery_discharge",
    ),
];

/// Integration-sensor factory: one entity per table entry the hardware
/// variant supports
pub fn integration_sensors(
    controller: &Arc<dyn EntityController>,
    model: InverterModel,
    register_type: RegisterType,
) -> Vec<Box<dyn ModbusEntity>> {
    H1_INTEGRATION_SENSORS
        .iter()
        .filter_map(|description| {
            description.create_entity_if_supported(Arc::clone(controller), model, register_type)
        })
        .collect()
}
