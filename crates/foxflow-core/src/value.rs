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

/// Clock time packed into a single register as `hour * 256 + minute`
///
/// Decoding is the literal quotient/remainder of the raw register content.
/// The inverter is expected to report values below `256 * 24`; anything
/// above that is passed through unchanged rather than rejected, matching
/// what the device actually sends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeOfDay {
    pub hour: u8,
    pub minute: u8,
}

impl TimeOfDay {
    pub const fn new(hour: u8, minute: u8) -> Self {
        Self { hour, minute }
    }

    /// Decode a packed charge-period register
    pub const fn from_register(raw: u16) -> Self {
        Self {
            hour: (raw / 256) as u8,
            minute: (raw % 256) as u8,
        }
    }

    /// Re-encode into the packed register representation
    pub const fn to_register(self) -> u16 {
        self.hour as u16 * 256 + self.minute as u16
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// Display state a sensor reports to the host platform
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SensorState {
    /// Scaled physical value (V, A, kW, ...)
    Numeric(f64),
    /// Decoded charge-period clock time
    Time(TimeOfDay),
}

impl fmt::Display for SensorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(value) => write!(f, "{value}"),
            Self::Time(time) => write!(f, "{time}"),
        }
    }
}
