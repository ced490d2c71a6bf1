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

//! libsensors-backed sensor source.
//!
//! The only module that touches the `lm-sensors` crate. The `LMSensors`
//! handle runs `sensors_cleanup()` when dropped, so the init/cleanup
//! bracket holds on every exit path, including fail-fast error returns.

use std::path::Path;

use lm_sensors::{feature, value, LMSensors};
use tracing::debug;

use crate::error::{CheckError, Result};
use crate::sensors::{ChipSource, FeatureKind, FeatureSource, SensorSource, SubfeatureKind};

/// Live sensor subsystem handle.
pub struct Libsensors {
    sensors: LMSensors,
}

impl Libsensors {
    /// Initialize the library, optionally from an alternate configuration
    /// file (the default configuration loads /etc/sensors3.conf and
    /// friends).
    pub fn initialize(config: Option<&Path>) -> Result<Self> {
        let mut initializer = lm_sensors::Initializer::default();
        if let Some(path) = config {
            initializer = initializer.config_path(path);
        }
        let sensors = initializer
            .initialize()
            .map_err(|e| CheckError::Init(e.to_string()))?;
        debug!("libsensors initialized");
        Ok(Self { sensors })
    }
}

impl SensorSource for Libsensors {
    fn chips(&self) -> Vec<Box<dyn ChipSource + '_>> {
        // no chip-name filter: the check always reports everything
        self.sensors
            .chip_iter(None)
            .map(|chip| Box::new(LibsensorsChip { chip }) as Box<dyn ChipSource + '_>)
            .collect()
    }
}

struct LibsensorsChip<'a> {
    chip: lm_sensors::ChipRef<'a>,
}

impl ChipSource for LibsensorsChip<'_> {
    fn name(&self) -> Result<String> {
        self.chip
            .name()
            .map_err(|e| CheckError::ChipName(e.to_string()))
    }

    fn adapter_name(&self) -> Option<String> {
        self.chip.bus().adapter_name().map(|name| name.to_string())
    }

    fn features(&self) -> Vec<Box<dyn FeatureSource + '_>> {
        self.chip
            .feature_iter()
            .map(|feature| Box::new(LibsensorsFeature { feature }) as Box<dyn FeatureSource + '_>)
            .collect()
    }
}

struct LibsensorsFeature<'a> {
    feature: lm_sensors::FeatureRef<'a>,
}

impl FeatureSource for LibsensorsFeature<'_> {
    fn name(&self) -> String {
        match self.feature.name() {
            Some(Ok(name)) => name.to_string(),
            _ => String::new(),
        }
    }

    fn label(&self) -> Option<String> {
        self.feature.label().ok()
    }

    fn kind(&self) -> FeatureKind {
        match self.feature.kind() {
            Some(feature::Kind::Voltage) => FeatureKind::Voltage,
            Some(feature::Kind::VoltageID) => FeatureKind::ReferenceVoltage,
            Some(feature::Kind::Fan) => FeatureKind::Fan,
            Some(feature::Kind::Temperature) => FeatureKind::Temperature,
            Some(feature::Kind::Current) => FeatureKind::Current,
            Some(feature::Kind::Power) => FeatureKind::Power,
            Some(feature::Kind::Energy) => FeatureKind::Energy,
            Some(feature::Kind::Humidity) => FeatureKind::Humidity,
            Some(feature::Kind::Intrusion) => FeatureKind::Intrusion,
            _ => FeatureKind::Unsupported,
        }
    }

    fn value(&self, sub: SubfeatureKind) -> Result<Option<f64>> {
        let kind = match value_kind(self.kind(), sub) {
            Some(kind) => kind,
            None => return Ok(None),
        };
        let subfeature = self
            .feature
            .sub_feature_iter()
            .find(|s| s.kind() == Some(kind));
        match subfeature {
            Some(subfeature) => match subfeature.raw_value() {
                Ok(v) => Ok(Some(v)),
                Err(e) => Err(CheckError::Read(e.to_string())),
            },
            None => Ok(None),
        }
    }
}

/// Map a generic sub-feature kind to the concrete libsensors value kind for
/// the given feature type. Combinations outside the mapping table resolve
/// to `None` and read as absent.
fn value_kind(feature: FeatureKind, sub: SubfeatureKind) -> Option<value::Kind> {
    use value::Kind as V;
    use FeatureKind as F;
    use SubfeatureKind as S;

    let kind = match (feature, sub) {
        (F::Voltage, S::Input) => V::VoltageInput,
        (F::Voltage, S::Average) => V::VoltageAverage,
        (F::Voltage, S::Lowest) => V::VoltageLowest,
        (F::Voltage, S::Highest) => V::VoltageHighest,
        (F::Voltage, S::Min) => V::VoltageMinimum,
        (F::Voltage, S::Max) => V::VoltageMaximum,
        (F::Voltage, S::Lcrit) => V::VoltageLCritical,
        (F::Voltage, S::Crit) => V::VoltageCritical,
        (F::Voltage, S::Alarm) => V::VoltageAlarm,
        (F::Voltage, S::MinAlarm) => V::VoltageMinimumAlarm,
        (F::Voltage, S::MaxAlarm) => V::VoltageMaximumAlarm,
        (F::Voltage, S::LcritAlarm) => V::VoltageLCriticalAlarm,
        (F::Voltage, S::CritAlarm) => V::VoltageCriticalAlarm,

        (F::ReferenceVoltage, S::Vid) => V::VoltageID,

        (F::Fan, S::Input) => V::FanInput,
        (F::Fan, S::Min) => V::FanMinimum,
        (F::Fan, S::Max) => V::FanMaximum,
        (F::Fan, S::Alarm) => V::FanAlarm,
        (F::Fan, S::MinAlarm) => V::FanMinimumAlarm,
        (F::Fan, S::MaxAlarm) => V::FanMaximumAlarm,
        (F::Fan, S::Fault) => V::FanFault,

        (F::Temperature, S::Input) => V::TemperatureInput,
        (F::Temperature, S::Lowest) => V::TemperatureLowest,
        (F::Temperature, S::Highest) => V::TemperatureHighest,
        (F::Temperature, S::Min) => V::TemperatureMinimum,
        (F::Temperature, S::Max) => V::TemperatureMaximum,
        (F::Temperature, S::Lcrit) => V::TemperatureLCritical,
        (F::Temperature, S::Crit) => V::TemperatureCritical,
        (F::Temperature, S::Alarm) => V::TemperatureAlarm,
        (F::Temperature, S::MinAlarm) => V::TemperatureMinimumAlarm,
        (F::Temperature, S::MaxAlarm) => V::TemperatureMaximumAlarm,
        (F::Temperature, S::LcritAlarm) => V::TemperatureLCriticalAlarm,
        (F::Temperature, S::CritAlarm) => V::TemperatureCriticalAlarm,
        (F::Temperature, S::EmergencyAlarm) => V::TemperatureEmergencyAlarm,
        (F::Temperature, S::Fault) => V::TemperatureFault,

        (F::Current, S::Input) => V::CurrentInput,
        (F::Current, S::Average) => V::CurrentAverage,
        (F::Current, S::Lowest) => V::CurrentLowest,
        (F::Current, S::Highest) => V::CurrentHighest,
        (F::Current, S::Min) => V::CurrentMinimum,
        (F::Current, S::Max) => V::CurrentMaximum,
        (F::Current, S::Lcrit) => V::CurrentLCritical,
        (F::Current, S::Crit) => V::CurrentCritical,
        (F::Current, S::Alarm) => V::CurrentAlarm,
        (F::Current, S::MinAlarm) => V::CurrentMinimumAlarm,
        (F::Current, S::MaxAlarm) => V::CurrentMaximumAlarm,
        (F::Current, S::LcritAlarm) => V::CurrentLCriticalAlarm,
        (F::Current, S::CritAlarm) => V::CurrentCriticalAlarm,

        (F::Power, S::Average) => V::PowerAverage,
        (F::Power, S::AverageLowest) => V::PowerAverageLowest,
        (F::Power, S::AverageHighest) => V::PowerAverageHighest,
        (F::Power, S::AverageInterval) => V::PowerAverageInterval,
        (F::Power, S::Input) => V::PowerInput,
        (F::Power, S::InputLowest) => V::PowerInputLowest,
        (F::Power, S::InputHighest) => V::PowerInputHighest,
        (F::Power, S::Max) => V::PowerMaximum,
        (F::Power, S::Crit) => V::PowerCritical,
        (F::Power, S::Cap) => V::PowerCap,
        (F::Power, S::Alarm) => V::PowerAlarm,
        (F::Power, S::CapAlarm) => V::PowerCapAlarm,
        (F::Power, S::MaxAlarm) => V::PowerMaximumAlarm,
        (F::Power, S::CritAlarm) => V::PowerCriticalAlarm,

        (F::Energy, S::Input) => V::EnergyInput,

        (F::Humidity, S::Input) => V::HumidityInput,

        (F::Intrusion, S::Alarm) => V::IntrusionAlarm,

        _ => return None,
    };
    Some(kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_combinations_read_as_absent() {
        assert_eq!(value_kind(FeatureKind::Energy, SubfeatureKind::Alarm), None);
        assert_eq!(value_kind(FeatureKind::Fan, SubfeatureKind::Crit), None);
        assert_eq!(
            value_kind(FeatureKind::Unsupported, SubfeatureKind::Input),
            None
        );
    }

    #[test]
    fn every_feature_type_maps_its_primary_reading() {
        assert_eq!(
            value_kind(FeatureKind::Voltage, SubfeatureKind::Input),
            Some(value::Kind::VoltageInput)
        );
        assert_eq!(
            value_kind(FeatureKind::Temperature, SubfeatureKind::Input),
            Some(value::Kind::TemperatureInput)
        );
        assert_eq!(
            value_kind(FeatureKind::Intrusion, SubfeatureKind::Alarm),
            Some(value::Kind::IntrusionAlarm)
        );
    }
}
