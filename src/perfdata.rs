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

//! Perfdata model and wire rendering.
//!
//! A perfdata point is one `'label'=value[uom];warn;crit;min;max` element of
//! the machine-readable block after the `|` separator in plugin output.
//! Threshold ranges use the Nagios range notation; an infinite bound is the
//! sentinel for "unbounded on that side" and is never rendered as a number.

use std::fmt;

use serde::Serialize;

/// An alert range. A value *outside* `[start, end]` breaches the range, or
/// *inside* it when `inverted` is set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ThresholdRange {
    pub inverted: bool,
    pub start: f64,
    pub end: f64,
}

impl ThresholdRange {
    /// Range bounded on both sides.
    pub fn new(start: f64, end: f64) -> Self {
        Self {
            inverted: false,
            start,
            end,
        }
    }

    /// Range with only an upper limit; the lower side stays open.
    pub fn upper(end: f64) -> Self {
        Self {
            inverted: false,
            start: f64::NEG_INFINITY,
            end,
        }
    }

    /// The fixed range attached to boolean alarm/fault gauges: any value
    /// other than 0 breaches it.
    pub fn alert_if_nonzero() -> Self {
        Self {
            inverted: false,
            start: 0.0,
            end: 0.0,
        }
    }

    /// Whether the lower bound carries a real limit. Negative infinity is
    /// the "unbounded below" sentinel and must never be rendered.
    pub fn has_lower_bound(&self) -> bool {
        self.start != f64::NEG_INFINITY
    }

    /// Whether the upper bound carries a real limit (positive infinity is
    /// the "unbounded above" sentinel).
    pub fn has_upper_bound(&self) -> bool {
        self.end != f64::INFINITY
    }

    /// Whether `value` breaches the range.
    pub fn breached_by(&self, value: f64) -> bool {
        let inside = value >= self.start && value <= self.end;
        if self.inverted {
            inside
        } else {
            !inside
        }
    }
}

impl fmt::Display for ThresholdRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.inverted {
            f.write_str("@")?;
        }
        if !self.has_upper_bound() {
            // "start:" form, alert below start only
            if self.has_lower_bound() {
                write!(f, "{}:", fmt_value(self.start))
            } else {
                f.write_str("~:")
            }
        } else if !self.has_lower_bound() {
            write!(f, "~:{}", fmt_value(self.end))
        } else if self.start == 0.0 {
            // "end" shorthand means 0:end
            write!(f, "{}", fmt_value(self.end))
        } else {
            write!(f, "{}:{}", fmt_value(self.start), fmt_value(self.end))
        }
    }
}

/// One perfdata point: a namespaced label plus a value and its bounds.
///
/// Labels are built as `chip::feature::kind`; the components never contain
/// the separator (libsensors naming conventions guarantee that upstream).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Perfdata {
    pub label: String,
    pub value: f64,
    /// Unit of measure on the wire; empty means "no unit".
    pub uom: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warn: Option<ThresholdRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crit: Option<ThresholdRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl Perfdata {
    /// A bare point with no unit, thresholds or bounds.
    pub fn new(label: String, value: f64) -> Self {
        Self {
            label,
            value,
            uom: "",
            warn: None,
            crit: None,
            min: None,
            max: None,
        }
    }
}

impl fmt::Display for Perfdata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}'={}{}", self.label, fmt_value(self.value), self.uom)?;

        let fields = [
            self.warn.map(|t| t.to_string()).unwrap_or_default(),
            self.crit.map(|t| t.to_string()).unwrap_or_default(),
            self.min.map(fmt_value).unwrap_or_default(),
            self.max.map(fmt_value).unwrap_or_default(),
        ];

        // trailing empty fields are dropped from the wire form
        if let Some(last) = fields.iter().rposition(|s| !s.is_empty()) {
            for field in &fields[..=last] {
                write!(f, ";{}", field)?;
            }
        }
        Ok(())
    }
}

/// Render a float the way the wire format wants it: the shortest decimal
/// form that round-trips, never scientific notation.
pub fn fmt_value(value: f64) -> String {
    format!("{}", value)
}
