// Copyright (c) 2026 Foxflow contributors
//
// This file is part of Foxflow.
//
// Licensed under the MIT license. See the LICENSE file in the repository root
// for the full license text.
//
// This software is provided "AS IS", without warranty of any kind.

//! Shared vocabulary and trait seams for Foxflow.
//!
//! This crate defines what an entity *is* (identity, metadata, the pull
//! contract the host polls) and which external collaborators it talks to
//! (register snapshot controller, host time integrator). It contains no
//! protocol I/O and no entity descriptions; those live in
//! `foxflow-entities`.

pub mod entity;
pub mod integration;
pub mod model;
pub mod value;

pub use entity::{
    DeviceClass, EntityController, EntityFactory, ModbusEntity, Platform, StateClass,
    entity_id_for,
};
pub use integration::{
    DEFAULT_ROUND_DIGITS, EnergyIntegrator, IntegrationConfig, IntegrationMethod, UnitOfTime,
    round_to,
};
pub use model::{EntitySpec, InverterModel, ParseModelError, RegisterType};
pub use value::{SensorState, TimeOfDay};
