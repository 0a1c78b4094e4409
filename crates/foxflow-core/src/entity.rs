// Copyright (c) 2026 Foxflow contributors
//
// This file is part of Foxflow.
//
// Licensed under the MIT license. See the LICENSE file in the repository root
// for the full license text.
//
// This software is provided "AS IS", without warranty of any kind.

use crate::integration::EnergyIntegrator;
use crate::model::{InverterModel, RegisterType};
use crate::value::SensorState;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Host platform namespaces an entity can live in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Platform {
    Sensor,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sensor => "sensor",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Host-platform device class, forwarded verbatim as entity metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeviceClass {
    Battery,
    Current,
    Energy,
    Frequency,
    Power,
    Temperature,
    Voltage,
}

/// Host-platform state class, forwarded verbatim as entity metadata
///
/// `Measurement` is a reading in present time; `TotalIncreasing` is a
/// monotonically growing lifetime total (energy counters).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StateClass {
    Measurement,
    Total,
    TotalIncreasing,
}

/// Read-side view of the controller that polls the inverter
///
/// The controller owns protocol I/O, scheduling and failure recovery; this
/// trait only exposes its latest register snapshot plus the identity bits
/// entities need. Business code never sees the wire protocol.
pub trait EntityController: Send + Sync {
    /// Latest raw value read for a register address
    ///
    /// Returns `None` when the address has not been polled yet or the last
    /// read failed upstream; derivation is never attempted in that case.
    fn raw_value(&self, address: u16) -> Option<i32>;

    /// User-facing name of this inverter, used to build entity ids
    fn friendly_name(&self) -> &str;

    /// Stable identifier of the configuration entry this controller belongs
    /// to, used for unique-id continuity across restarts
    fn unique_id_prefix(&self) -> &str;

    /// Host-side time integrator used by synthetic energy sensors
    fn integrator(&self) -> Arc<dyn EnergyIntegrator>;
}

/// Pull contract the host platform polls on every update cycle
pub trait ModbusEntity: Send + Sync {
    /// Stable key of this entity within the inverter's namespace
    fn key(&self) -> &str;

    /// Display name shown to the user
    fn name(&self) -> String;

    /// Globally unique identifier, stable across restarts
    fn unique_id(&self) -> String;

    /// Entity id within the host platform
    fn entity_id(&self) -> String;

    /// Register addresses this entity is derived from; empty for synthetic
    /// entities that own no register
    fn addresses(&self) -> Vec<u16>;

    /// Current display state computed from the latest controller snapshot
    fn state(&self) -> Option<SensorState>;
}

/// Factory turning a static description into a live entity
pub trait EntityFactory: Send + Sync {
    /// Create the entity when the description applies to this hardware
    /// variant; `None` is the normal "not supported by this model" outcome,
    /// not an error
    fn create_entity_if_supported(
        &'static self,
        controller: Arc<dyn EntityController>,
        model: InverterModel,
        register_type: RegisterType,
    ) -> Option<Box<dyn ModbusEntity>>;
}

/// Build the host entity id for a logical key within the controller's
/// namespace, e.g. `sensor.my_inverter_battery_discharge`
pub fn entity_id_for(controller: &dyn EntityController, platform: Platform, key: &str) -> String {
    format!(
        "{}.{}_{}",
        platform.as_str(),
        slugify(controller.friendly_name()),
        key
    )
}

/// Lowercase ASCII slug of a friendly name; everything else becomes `_`
fn slugify(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect()
}
