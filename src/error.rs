/*
 * This file is part of check_linux_sensors.
 *
 * Copyright (C) 2026 check_linux_sensors contributors
 *
 * check_linux_sensors is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * check_linux_sensors is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with check_linux_sensors. If not, see <https://www.gnu.org/licenses/>.
 */

//! Fatal error type for a check run.
//!
//! Only hardware/driver failures live here. An absent sub-feature is a
//! normal per-feature condition and never becomes an error.

use thiserror::Error;

/// Result type alias using CheckError
pub type Result<T> = std::result::Result<T, CheckError>;

/// A fatal libsensors failure. Any one of these aborts the whole run and is
/// reported as UNKNOWN, keyed by the conventional name of the library call
/// that failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckError {
    /// The sensor library could not be initialized (unreadable or invalid
    /// configuration file).
    #[error("sensors_init(): {0}")]
    Init(String),

    /// A chip's display name could not be resolved.
    #[error("sensors_snprintf_chip_name(): {0}")]
    ChipName(String),

    /// A sub-feature exists but reading its value failed.
    #[error("sensors_get_value(): {0}")]
    Read(String),
}

impl CheckError {
    /// Conventional name of the failing library call, used as the key of
    /// the single-entry error map the monitoring harness renders.
    pub fn key(&self) -> &'static str {
        match self {
            CheckError::Init(_) => "sensors_init()",
            CheckError::ChipName(_) => "sensors_snprintf_chip_name()",
            CheckError::Read(_) => "sensors_get_value()",
        }
    }

    /// The underlying library error text.
    pub fn detail(&self) -> &str {
        match self {
            CheckError::Init(msg) | CheckError::ChipName(msg) | CheckError::Read(msg) => msg,
        }
    }
}
