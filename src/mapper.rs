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

//! The feature-type mapping table.
//!
//! For each recognized feature type this module knows which sub-feature
//! kinds to query, which become perfdata points, which pair up into a
//! critical threshold and which are boolean alarm/fault flags. Everything
//! goes through the `FeatureSource` trait, so the table is testable without
//! hardware.

use crate::error::Result;
use crate::perfdata::{fmt_value, Perfdata, ThresholdRange};
use crate::sensors::{FeatureKind, FeatureSource, SubfeatureKind};

/// One human-readable row of a feature's statistics table.
#[derive(Debug, Clone, PartialEq)]
pub struct StatRow {
    pub label: &'static str,
    pub text: String,
}

/// Everything the mapper derives from a single feature.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureReport {
    /// False for feature types outside the mapping table; such features
    /// contribute nothing to any output.
    pub supported: bool,
    pub has_alarm: bool,
    pub has_fault: bool,
    pub stats: Vec<StatRow>,
    pub perfdata: Vec<Perfdata>,
}

/// Dispatch a feature to its mapping-table branch.
pub fn inspect_feature(chip: &str, feature: &dyn FeatureSource) -> Result<FeatureReport> {
    match feature.kind() {
        FeatureKind::Voltage => voltage_like(chip, feature, "V"),
        FeatureKind::Current => voltage_like(chip, feature, "A"),
        FeatureKind::ReferenceVoltage => reference_voltage(chip, feature),
        FeatureKind::Fan => fan(chip, feature),
        FeatureKind::Temperature => temperature(chip, feature),
        FeatureKind::Power => power(chip, feature),
        FeatureKind::Energy => simple_input(chip, feature, "J"),
        FeatureKind::Humidity => simple_input(chip, feature, "%"),
        FeatureKind::Intrusion => intrusion(chip, feature),
        FeatureKind::Unsupported => Ok(FeatureReport::default()),
    }
}

/// Build the optional critical range over a pair of sub-feature kinds.
///
/// Passing the same kind twice marks the feature type as having only an
/// upper critical limit: the lower bound is then treated as never present.
/// Either bound alone is enough for the range to exist; the missing side
/// becomes the matching infinite sentinel.
fn threshold(
    feature: &dyn FeatureSource,
    kind_low: SubfeatureKind,
    kind_high: SubfeatureKind,
) -> Result<Option<ThresholdRange>> {
    let low = if kind_low == kind_high {
        None
    } else {
        feature.value(kind_low)?
    };
    let high = feature.value(kind_high)?;

    if low.is_none() && high.is_none() {
        return Ok(None);
    }
    Ok(Some(ThresholdRange {
        inverted: false,
        start: low.unwrap_or(f64::NEG_INFINITY),
        end: high.unwrap_or(f64::INFINITY),
    }))
}

/// Which feature flag a boolean sub-feature raises when it reads 1.
#[derive(Clone, Copy)]
enum Flag {
    Alarm,
    Fault,
}

/// Accumulates perfdata points and stat rows for one feature.
struct Collector<'a> {
    chip: &'a str,
    name: String,
    feature: &'a dyn FeatureSource,
    unit: &'static str,
    report: FeatureReport,
}

impl<'a> Collector<'a> {
    fn new(chip: &'a str, feature: &'a dyn FeatureSource, unit: &'static str) -> Self {
        Self {
            chip,
            name: feature.name(),
            feature,
            unit,
            report: FeatureReport {
                supported: true,
                ..FeatureReport::default()
            },
        }
    }

    fn label(&self, kind: &str) -> String {
        format!("{}::{}::{}", self.chip, self.name, kind)
    }

    fn stat(&mut self, label: &'static str, value: f64) {
        self.stat_with_unit(label, value, self.unit);
    }

    fn stat_with_unit(&mut self, label: &'static str, value: f64, unit: &'static str) {
        self.report.stats.push(StatRow {
            label,
            text: format!("{} {}", fmt_value(value), unit),
        });
    }

    /// Plain gauge: one perfdata point plus one stat row, no bounds.
    fn gauge(&mut self, kind: &'static str, stat_label: &'static str, value: f64) {
        self.report
            .perfdata
            .push(Perfdata::new(self.label(kind), value));
        self.stat(stat_label, value);
    }

    /// The `input` reading with its optional bounds and critical range.
    /// Infinite threshold ends are suppressed from the stat rows.
    fn input(
        &mut self,
        value: f64,
        min: Option<f64>,
        max: Option<f64>,
        crit: Option<ThresholdRange>,
    ) {
        self.report.perfdata.push(Perfdata {
            label: self.label("input"),
            value,
            uom: "",
            warn: None,
            crit,
            min,
            max,
        });
        self.stat("Input", value);
        if let Some(min) = min {
            self.stat("Minimum", min);
        }
        if let Some(max) = max {
            self.stat("Maximum", max);
        }
        if let Some(crit) = crit {
            if crit.has_lower_bound() {
                self.stat("Critical, lower", crit.start);
            }
            if crit.has_upper_bound() {
                self.stat("Critical, upper", crit.end);
            }
        }
    }

    /// Boolean alarm/fault gauge, when present: reported as a 0..1 point
    /// with the fixed nonzero-is-critical range. A reading of exactly 1
    /// raises the feature flag; the flag never resets.
    fn alarm(&mut self, sub: SubfeatureKind, kind: &'static str, flag: Flag) -> Result<()> {
        if let Some(value) = self.feature.value(sub)? {
            self.report.perfdata.push(Perfdata {
                label: self.label(kind),
                value,
                uom: "",
                warn: None,
                crit: Some(ThresholdRange::alert_if_nonzero()),
                min: Some(0.0),
                max: Some(1.0),
            });
            if value == 1.0 {
                match flag {
                    Flag::Alarm => self.report.has_alarm = true,
                    Flag::Fault => self.report.has_fault = true,
                }
            }
        }
        Ok(())
    }
}

/// Voltage and current features share one shape; only the unit differs.
fn voltage_like(
    chip: &str,
    feature: &dyn FeatureSource,
    unit: &'static str,
) -> Result<FeatureReport> {
    let mut c = Collector::new(chip, feature, unit);

    if let Some(input) = feature.value(SubfeatureKind::Input)? {
        let min = feature.value(SubfeatureKind::Min)?;
        let max = feature.value(SubfeatureKind::Max)?;
        let crit = threshold(feature, SubfeatureKind::Lcrit, SubfeatureKind::Crit)?;
        c.input(input, min, max, crit);
    }
    if let Some(v) = feature.value(SubfeatureKind::Average)? {
        c.gauge("average", "Average", v);
    }
    if let Some(v) = feature.value(SubfeatureKind::Lowest)? {
        c.gauge("lowest", "Lowest", v);
    }
    if let Some(v) = feature.value(SubfeatureKind::Highest)? {
        c.gauge("highest", "Highest", v);
    }
    c.alarm(SubfeatureKind::Alarm, "alarm", Flag::Alarm)?;
    c.alarm(SubfeatureKind::MinAlarm, "min_alarm", Flag::Alarm)?;
    c.alarm(SubfeatureKind::MaxAlarm, "max_alarm", Flag::Alarm)?;
    c.alarm(SubfeatureKind::LcritAlarm, "lcrit_alarm", Flag::Alarm)?;
    c.alarm(SubfeatureKind::CritAlarm, "crit_alarm", Flag::Alarm)?;

    Ok(c.report)
}

fn reference_voltage(chip: &str, feature: &dyn FeatureSource) -> Result<FeatureReport> {
    let mut c = Collector::new(chip, feature, "V");

    if let Some(v) = feature.value(SubfeatureKind::Vid)? {
        c.gauge("vid", "Ref. voltage", v);
    }

    Ok(c.report)
}

fn fan(chip: &str, feature: &dyn FeatureSource) -> Result<FeatureReport> {
    let mut c = Collector::new(chip, feature, "RPM");

    if let Some(input) = feature.value(SubfeatureKind::Input)? {
        let min = feature.value(SubfeatureKind::Min)?;
        let max = feature.value(SubfeatureKind::Max)?;
        c.input(input, min, max, None);
    }
    c.alarm(SubfeatureKind::Alarm, "alarm", Flag::Alarm)?;
    c.alarm(SubfeatureKind::MinAlarm, "min_alarm", Flag::Alarm)?;
    c.alarm(SubfeatureKind::MaxAlarm, "max_alarm", Flag::Alarm)?;
    c.alarm(SubfeatureKind::Fault, "fault", Flag::Fault)?;

    Ok(c.report)
}

fn temperature(chip: &str, feature: &dyn FeatureSource) -> Result<FeatureReport> {
    let mut c = Collector::new(chip, feature, "deg. C");

    if let Some(input) = feature.value(SubfeatureKind::Input)? {
        let min = feature.value(SubfeatureKind::Min)?;
        let max = feature.value(SubfeatureKind::Max)?;
        let crit = threshold(feature, SubfeatureKind::Lcrit, SubfeatureKind::Crit)?;
        c.input(input, min, max, crit);
    }
    if let Some(v) = feature.value(SubfeatureKind::Lowest)? {
        c.gauge("lowest", "Lowest", v);
    }
    if let Some(v) = feature.value(SubfeatureKind::Highest)? {
        c.gauge("highest", "Highest", v);
    }
    c.alarm(SubfeatureKind::Alarm, "alarm", Flag::Alarm)?;
    c.alarm(SubfeatureKind::MinAlarm, "min_alarm", Flag::Alarm)?;
    c.alarm(SubfeatureKind::MaxAlarm, "max_alarm", Flag::Alarm)?;
    c.alarm(SubfeatureKind::LcritAlarm, "lcrit_alarm", Flag::Alarm)?;
    c.alarm(SubfeatureKind::CritAlarm, "crit_alarm", Flag::Alarm)?;
    c.alarm(SubfeatureKind::EmergencyAlarm, "emergency_alarm", Flag::Alarm)?;
    c.alarm(SubfeatureKind::Fault, "fault", Flag::Fault)?;

    Ok(c.report)
}

fn power(chip: &str, feature: &dyn FeatureSource) -> Result<FeatureReport> {
    let mut c = Collector::new(chip, feature, "W");

    if let Some(v) = feature.value(SubfeatureKind::Average)? {
        c.gauge("average", "Average", v);
    }
    if let Some(v) = feature.value(SubfeatureKind::AverageLowest)? {
        c.gauge("average_lowest", "Average, lowest", v);
    }
    if let Some(v) = feature.value(SubfeatureKind::AverageHighest)? {
        c.gauge("average_highest", "Average, highest", v);
    }
    if let Some(v) = feature.value(SubfeatureKind::AverageInterval)? {
        // the one point that carries a unit on the wire
        let mut point = Perfdata::new(c.label("average_interval"), v);
        point.uom = "s";
        c.report.perfdata.push(point);
        c.stat_with_unit("Average interval", v, "s");
    }
    if let Some(input) = feature.value(SubfeatureKind::Input)? {
        let max = feature.value(SubfeatureKind::Max)?;
        // power features define a single critical sub-feature, so the
        // limit is upper-only: same kind on both ends of the pair
        let crit = threshold(feature, SubfeatureKind::Crit, SubfeatureKind::Crit)?;
        c.input(input, None, max, crit);
    }
    if let Some(v) = feature.value(SubfeatureKind::InputLowest)? {
        c.gauge("lowest", "Lowest", v);
    }
    if let Some(v) = feature.value(SubfeatureKind::InputHighest)? {
        c.gauge("highest", "Highest", v);
    }
    if let Some(v) = feature.value(SubfeatureKind::Cap)? {
        c.gauge("cap", "Cap", v);
    }
    c.alarm(SubfeatureKind::Alarm, "alarm", Flag::Alarm)?;
    c.alarm(SubfeatureKind::CapAlarm, "cap_alarm", Flag::Alarm)?;
    c.alarm(SubfeatureKind::MaxAlarm, "max_alarm", Flag::Alarm)?;
    c.alarm(SubfeatureKind::CritAlarm, "crit_alarm", Flag::Alarm)?;

    Ok(c.report)
}

/// Energy and humidity expose a single input reading.
fn simple_input(
    chip: &str,
    feature: &dyn FeatureSource,
    unit: &'static str,
) -> Result<FeatureReport> {
    let mut c = Collector::new(chip, feature, unit);

    if let Some(v) = feature.value(SubfeatureKind::Input)? {
        c.gauge("input", "Input", v);
    }

    Ok(c.report)
}

fn intrusion(chip: &str, feature: &dyn FeatureSource) -> Result<FeatureReport> {
    let mut c = Collector::new(chip, feature, "");

    c.alarm(SubfeatureKind::Alarm, "alarm", Flag::Alarm)?;

    Ok(c.report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CheckError;
    use crate::fixture::FixtureFeature;
    use crate::sensors::MockFeatureSource;

    fn feature(name: &str, kind: FeatureKind, values: &[(SubfeatureKind, f64)]) -> FixtureFeature {
        FixtureFeature::new(name, kind, values)
    }

    #[test]
    fn unsupported_feature_contributes_nothing() {
        let f = feature("beep!", FeatureKind::Unsupported, &[(SubfeatureKind::Input, 1.0)]);
        let report = inspect_feature("chip", &f).unwrap();
        assert!(!report.supported);
        assert!(report.perfdata.is_empty());
        assert!(report.stats.is_empty());
    }

    #[test]
    fn voltage_with_only_input_has_no_bounds() {
        let f = feature("in0", FeatureKind::Voltage, &[(SubfeatureKind::Input, 1.05)]);
        let report = inspect_feature("chip", &f).unwrap();

        assert!(report.supported);
        assert_eq!(report.perfdata.len(), 1);
        let p = &report.perfdata[0];
        assert_eq!(p.label, "chip::in0::input");
        assert_eq!(p.value, 1.05);
        assert_eq!(p.min, None);
        assert_eq!(p.max, None);
        assert_eq!(p.crit, None);
        assert_eq!(report.stats.len(), 1);
        assert_eq!(report.stats[0].label, "Input");
        assert_eq!(report.stats[0].text, "1.05 V");
    }

    #[test]
    fn voltage_with_full_bounds_and_thresholds() {
        let f = feature(
            "in0",
            FeatureKind::Voltage,
            &[
                (SubfeatureKind::Input, 1.0),
                (SubfeatureKind::Min, 0.8),
                (SubfeatureKind::Max, 1.2),
                (SubfeatureKind::Lcrit, 0.7),
                (SubfeatureKind::Crit, 1.3),
                (SubfeatureKind::Average, 1.01),
                (SubfeatureKind::Lowest, 0.9),
                (SubfeatureKind::Highest, 1.1),
            ],
        );
        let report = inspect_feature("chip", &f).unwrap();

        let input = &report.perfdata[0];
        assert_eq!(input.min, Some(0.8));
        assert_eq!(input.max, Some(1.2));
        assert_eq!(input.crit, Some(ThresholdRange::new(0.7, 1.3)));

        let labels: Vec<&str> = report.perfdata.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(
            labels,
            [
                "chip::in0::input",
                "chip::in0::average",
                "chip::in0::lowest",
                "chip::in0::highest",
            ]
        );

        let stats: Vec<&str> = report.stats.iter().map(|s| s.label).collect();
        assert_eq!(
            stats,
            [
                "Input",
                "Minimum",
                "Maximum",
                "Critical, lower",
                "Critical, upper",
                "Average",
                "Lowest",
                "Highest",
            ]
        );
    }

    #[test]
    fn current_uses_ampere_unit() {
        let f = feature("curr1", FeatureKind::Current, &[(SubfeatureKind::Input, 2.5)]);
        let report = inspect_feature("chip", &f).unwrap();
        assert_eq!(report.stats[0].text, "2.5 A");
    }

    #[test]
    fn reference_voltage_emits_vid() {
        let f = feature("cpu0_vid", FeatureKind::ReferenceVoltage, &[(SubfeatureKind::Vid, 1.35)]);
        let report = inspect_feature("chip", &f).unwrap();
        assert_eq!(report.perfdata.len(), 1);
        assert_eq!(report.perfdata[0].label, "chip::cpu0_vid::vid");
        assert_eq!(report.stats[0].label, "Ref. voltage");
        assert_eq!(report.stats[0].text, "1.35 V");
    }

    #[test]
    fn fan_min_alarm_sets_flag_and_sentinel_bounds() {
        let f = feature(
            "fan1",
            FeatureKind::Fan,
            &[(SubfeatureKind::Input, 1200.0), (SubfeatureKind::MinAlarm, 1.0)],
        );
        let report = inspect_feature("chip", &f).unwrap();

        assert!(report.has_alarm);
        assert!(!report.has_fault);
        let alarm = &report.perfdata[1];
        assert_eq!(alarm.label, "chip::fan1::min_alarm");
        assert_eq!(alarm.value, 1.0);
        assert_eq!(alarm.min, Some(0.0));
        assert_eq!(alarm.max, Some(1.0));
        assert_eq!(alarm.crit, Some(ThresholdRange::alert_if_nonzero()));
        // alarms are perfdata-only, never stat rows
        assert_eq!(report.stats.len(), 1);
    }

    #[test]
    fn fan_fault_sets_fault_flag_only() {
        let f = feature("fan2", FeatureKind::Fan, &[(SubfeatureKind::Fault, 1.0)]);
        let report = inspect_feature("chip", &f).unwrap();
        assert!(report.has_fault);
        assert!(!report.has_alarm);
        assert_eq!(report.perfdata[0].label, "chip::fan2::fault");
    }

    #[test]
    fn alarm_value_other_than_one_leaves_flag_unset() {
        for value in [0.0, 2.0, 0.5] {
            let f = feature("fan1", FeatureKind::Fan, &[(SubfeatureKind::Alarm, value)]);
            let report = inspect_feature("chip", &f).unwrap();
            assert!(!report.has_alarm, "value {} must not raise the flag", value);
            // the point itself is still emitted
            assert_eq!(report.perfdata[0].value, value);
        }
    }

    #[test]
    fn temperature_emergency_alarm_and_fault() {
        let f = feature(
            "temp1",
            FeatureKind::Temperature,
            &[
                (SubfeatureKind::Input, 45.0),
                (SubfeatureKind::EmergencyAlarm, 1.0),
                (SubfeatureKind::Fault, 1.0),
            ],
        );
        let report = inspect_feature("chip", &f).unwrap();
        assert!(report.has_alarm);
        assert!(report.has_fault);
        let labels: Vec<&str> = report.perfdata.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(
            labels,
            [
                "chip::temp1::input",
                "chip::temp1::emergency_alarm",
                "chip::temp1::fault",
            ]
        );
    }

    #[test]
    fn temperature_lower_only_threshold_keeps_upper_open() {
        let f = feature(
            "temp1",
            FeatureKind::Temperature,
            &[(SubfeatureKind::Input, 45.0), (SubfeatureKind::Lcrit, -10.0)],
        );
        let report = inspect_feature("chip", &f).unwrap();
        let crit = report.perfdata[0].crit.unwrap();
        assert_eq!(crit.start, -10.0);
        assert_eq!(crit.end, f64::INFINITY);
        // "Critical, upper" must be suppressed
        let stats: Vec<&str> = report.stats.iter().map(|s| s.label).collect();
        assert_eq!(stats, ["Input", "Critical, lower"]);
    }

    #[test]
    fn power_crit_is_upper_only_even_with_lcrit_like_values() {
        let f = feature(
            "power1",
            FeatureKind::Power,
            &[(SubfeatureKind::Input, 95.0), (SubfeatureKind::Crit, 120.0)],
        );
        let report = inspect_feature("chip", &f).unwrap();

        let crit = report.perfdata[0].crit.unwrap();
        assert_eq!(crit.start, f64::NEG_INFINITY);
        assert_eq!(crit.end, 120.0);

        let stats: Vec<&str> = report.stats.iter().map(|s| s.label).collect();
        assert_eq!(stats, ["Input", "Critical, upper"]);
    }

    #[test]
    fn power_average_family_and_interval() {
        let f = feature(
            "power1",
            FeatureKind::Power,
            &[
                (SubfeatureKind::Average, 80.0),
                (SubfeatureKind::AverageLowest, 10.0),
                (SubfeatureKind::AverageHighest, 150.0),
                (SubfeatureKind::AverageInterval, 2.5),
            ],
        );
        let report = inspect_feature("chip", &f).unwrap();

        let labels: Vec<&str> = report.perfdata.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(
            labels,
            [
                "chip::power1::average",
                "chip::power1::average_lowest",
                "chip::power1::average_highest",
                "chip::power1::average_interval",
            ]
        );
        assert_eq!(report.perfdata[3].uom, "s");
        assert_eq!(report.stats[1].text, "10 W");
        assert_eq!(report.stats[2].text, "150 W");
        assert_eq!(report.stats[3].text, "2.5 s");
    }

    #[test]
    fn power_input_never_carries_min() {
        let f = feature(
            "power1",
            FeatureKind::Power,
            &[(SubfeatureKind::Input, 95.0), (SubfeatureKind::Max, 200.0)],
        );
        let report = inspect_feature("chip", &f).unwrap();
        assert_eq!(report.perfdata[0].min, None);
        assert_eq!(report.perfdata[0].max, Some(200.0));
    }

    #[test]
    fn energy_and_humidity_are_plain_inputs() {
        let e = feature("energy1", FeatureKind::Energy, &[(SubfeatureKind::Input, 4.2)]);
        let report = inspect_feature("chip", &e).unwrap();
        assert_eq!(report.stats[0].text, "4.2 J");

        let h = feature("humidity1", FeatureKind::Humidity, &[(SubfeatureKind::Input, 40.0)]);
        let report = inspect_feature("chip", &h).unwrap();
        assert_eq!(report.stats[0].text, "40 %");
    }

    #[test]
    fn intrusion_has_perfdata_but_no_stats() {
        let f = feature("intrusion0", FeatureKind::Intrusion, &[(SubfeatureKind::Alarm, 1.0)]);
        let report = inspect_feature("chip", &f).unwrap();
        assert!(report.supported);
        assert!(report.has_alarm);
        assert_eq!(report.perfdata.len(), 1);
        assert!(report.stats.is_empty());
    }

    #[test]
    fn threshold_same_kind_means_no_lower_bound() {
        let f = feature("power1", FeatureKind::Power, &[(SubfeatureKind::Crit, 120.0)]);
        let range = threshold(&f, SubfeatureKind::Crit, SubfeatureKind::Crit)
            .unwrap()
            .unwrap();
        assert!(!range.has_lower_bound());
        assert_eq!(range.end, 120.0);
    }

    #[test]
    fn threshold_absent_on_both_sides_is_unset() {
        let f = feature("in0", FeatureKind::Voltage, &[]);
        let range = threshold(&f, SubfeatureKind::Lcrit, SubfeatureKind::Crit).unwrap();
        assert_eq!(range, None);
    }

    #[test]
    fn read_error_aborts_the_feature() {
        let mut mock = MockFeatureSource::new();
        mock.expect_kind().return_const(FeatureKind::Temperature);
        mock.expect_name().return_const("temp1".to_string());
        mock.expect_value()
            .returning(|_| Err(CheckError::Read("ETIMEDOUT".to_string())));

        let err = inspect_feature("chip", &mock).unwrap_err();
        assert_eq!(err.key(), "sensors_get_value()");
    }
}
