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

//! Sensor-source abstraction.
//!
//! The walker and the mapper only ever talk to these traits. Two
//! implementations exist: the libsensors binding (`libsensors` module) and
//! the in-memory fixture (`fixture` module) used by tests.

use crate::error::Result;

/// Semantic type of a feature. Closed set; anything the library reports
/// beyond these is skipped by the mapper without error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureKind {
    Voltage,
    ReferenceVoltage,
    Fan,
    Temperature,
    Current,
    Power,
    Energy,
    Humidity,
    Intrusion,
    Unsupported,
}

/// One reading kind within a feature.
///
/// Which kinds exist is a property of each feature *instance*: a fan may
/// expose `Input` and `Fault` and nothing else. Absence is an expected
/// condition, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubfeatureKind {
    Input,
    Average,
    Lowest,
    Highest,
    Min,
    Max,
    Lcrit,
    Crit,
    Alarm,
    MinAlarm,
    MaxAlarm,
    LcritAlarm,
    CritAlarm,
    EmergencyAlarm,
    Fault,
    Vid,
    Cap,
    CapAlarm,
    AverageLowest,
    AverageHighest,
    AverageInterval,
    InputLowest,
    InputHighest,
}

/// A whole sensor subsystem: the chips it detected, in enumeration order.
pub trait SensorSource {
    fn chips(&self) -> Vec<Box<dyn ChipSource + '_>>;
}

/// One hardware monitoring chip.
pub trait ChipSource {
    /// Display name, e.g. `coretemp-isa-0000`. Failure is fatal to the run.
    fn name(&self) -> Result<String>;

    /// Parent bus adapter name, when the bus exposes one.
    fn adapter_name(&self) -> Option<String>;

    /// The chip's features, in enumeration order.
    fn features(&self) -> Vec<Box<dyn FeatureSource + '_>>;
}

/// One logical sensor channel on a chip.
#[cfg_attr(test, mockall::automock)]
pub trait FeatureSource {
    /// Channel name, e.g. `temp1` (may be driver-generated).
    fn name(&self) -> String;

    /// Optional human-readable label from the sensors configuration; only
    /// shown when it differs from the name.
    fn label(&self) -> Option<String>;

    fn kind(&self) -> FeatureKind;

    /// Read one sub-feature. `Ok(None)` means the kind does not exist on
    /// this instance; `Err` means it exists but reading failed, which
    /// aborts the whole run.
    fn value(&self, sub: SubfeatureKind) -> Result<Option<f64>>;
}
