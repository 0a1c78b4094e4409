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
use std::str::FromStr;

/// Inverter models sharing the FoxESS H1 register layout
/// This enum defines all hardware variants Foxflow knows how to describe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InverterModel {
    /// Hybrid H1 inverter
    H1,
    /// AC-coupled AC1 variant (same register map as H1)
    Ac1,
    /// All-in-one AIO-H1 variant
    AioH1,
    /// KH series (different aux register layout)
    Kh,
}

impl InverterModel {
    /// Get human-readable name for the inverter model
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::H1 => "H1",
            Self::Ac1 => "AC1",
            Self::AioH1 => "AIO-H1",
            Self::Kh => "KH",
        }
    }

    /// Get config string value (kebab-case)
    pub fn to_config_value(&self) -> &'static str {
        match self {
            Self::H1 => "h1",
            Self::Ac1 => "ac1",
            Self::AioH1 => "aio-h1",
            Self::Kh => "kh",
        }
    }

    /// List all supported inverter models
    pub fn all() -> &'static [InverterModel] {
        &[Self::H1, Self::Ac1, Self::AioH1, Self::Kh]
    }
}

impl fmt::Display for InverterModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for InverterModel {
    type Err = ParseModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "h1" => Ok(Self::H1),
            "ac1" => Ok(Self::Ac1),
            "aio-h1" => Ok(Self::AioH1),
            "kh" => Ok(Self::Kh),
            other => Err(ParseModelError::UnknownModel(other.to_owned())),
        }
    }
}

/// How a register is addressed on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RegisterType {
    /// Read-only input registers (live measurements)
    Input,
    /// Read-write holding registers (configuration)
    Holding,
}

impl RegisterType {
    /// Get config string value (kebab-case)
    pub fn to_config_value(&self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::Holding => "holding",
        }
    }
}

impl fmt::Display for RegisterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_config_value())
    }
}

impl FromStr for RegisterType {
    type Err = ParseModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "input" => Ok(Self::Input),
            "holding" => Ok(Self::Holding),
            other => Err(ParseModelError::UnknownRegisterType(other.to_owned())),
        }
    }
}

/// Error parsing a model or register-type config value
#[derive(Debug, thiserror::Error)]
pub enum ParseModelError {
    #[error("unknown inverter model '{0}', supported models: h1, ac1, aio-h1, kh")]
    UnknownModel(String),
    #[error("unknown register type '{0}', supported types: input, holding")]
    UnknownRegisterType(String),
}

/// Model/register-type compatibility predicate for one entity description
///
/// A description carries one or more specs; the entity applies to a hardware
/// variant when any spec matches both the model and its addressing mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntitySpec {
    pub models: &'static [InverterModel],
    pub register_types: &'static [RegisterType],
}

impl EntitySpec {
    pub const fn new(
        models: &'static [InverterModel],
        register_types: &'static [RegisterType],
    ) -> Self {
        Self {
            models,
            register_types,
        }
    }

    /// Pure function of (model, register_type); same arguments always give
    /// the same answer
    pub fn supports(&self, model: InverterModel, register_type: RegisterType) -> bool {
        self.models.contains(&model) && self.register_types.contains(&register_type)
    }
}
