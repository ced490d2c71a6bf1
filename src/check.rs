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

//! Chip/feature walker and long-output assembly.
//!
//! Walks chips and features in enumeration order, runs each feature through
//! the mapper, and concatenates the HTML-ish long output the monitoring
//! front end renders. All free text is escaped before insertion.

use html_escape::encode_safe;
use tracing::debug;

use crate::error::Result;
use crate::mapper::{inspect_feature, FeatureReport};
use crate::perfdata::Perfdata;
use crate::sensors::{ChipSource, FeatureSource, SensorSource};

const BADGE_FAULT: &str = r#" <b style="color: #f70000;">FAULT</b>"#;
const BADGE_ALARM: &str = r#" <b style="color: #f70000;">ALARM</b>"#;

/// Everything a successful run produced.
///
/// An `Err` from [`run_check`] carries no partial data: a run that hit a
/// hardware error reports only that error, never half a walk.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CheckOutcome {
    pub long_output: String,
    pub perfdata: Vec<Perfdata>,
}

/// Walk every chip and feature of `source` and build the plugin output.
pub fn run_check(source: &dyn SensorSource) -> Result<CheckOutcome> {
    let mut long_output = String::from("\n\n");
    let mut perfdata: Vec<Perfdata> = Vec::new();

    for chip in source.chips() {
        let chip_name = chip.name()?;
        debug!("walking chip {}", chip_name);

        long_output.push_str("<p><b>Chip: ");
        long_output.push_str(&encode_safe(&chip_name));
        long_output.push_str("</b>");
        if let Some(adapter) = chip.adapter_name() {
            long_output.push_str(" (");
            long_output.push_str(&encode_safe(&adapter));
            long_output.push(')');
        }
        long_output.push_str("</p>");

        for feature in chip.features() {
            let report = inspect_feature(&chip_name, feature.as_ref())?;
            if report.supported {
                append_feature_block(&mut long_output, feature.as_ref(), &report);
            }
            perfdata.extend(report.perfdata);
        }
    }

    Ok(CheckOutcome {
        long_output,
        perfdata,
    })
}

/// Feature header (name, optional distinct label, alarm badge) plus its
/// statistics table. A fault outranks an alarm in the badge.
fn append_feature_block(out: &mut String, feature: &dyn FeatureSource, report: &FeatureReport) {
    let name = feature.name();

    out.push_str("<p>Feature: ");
    out.push_str(&encode_safe(&name));
    if let Some(label) = feature.label() {
        if label != name {
            out.push_str(" (");
            out.push_str(&encode_safe(&label));
            out.push(')');
        }
    }
    if report.has_fault {
        out.push_str(BADGE_FAULT);
    } else if report.has_alarm {
        out.push_str(BADGE_ALARM);
    }
    out.push_str("</p>");

    if !report.stats.is_empty() {
        out.push_str("<table><tbody>");
        for row in &report.stats {
            out.push_str("<tr><td>");
            out.push_str(&encode_safe(row.label));
            out.push_str("</td><td>");
            out.push_str(&encode_safe(&row.text));
            out.push_str("</td></tr>");
        }
        out.push_str("</tbody></table>");
    }
}
