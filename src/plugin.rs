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

//! Plugin execution harness.
//!
//! Implements the monitoring-plugin contract: severity derivation from the
//! perfdata thresholds, stdout assembly, exit codes, and the attribution
//! banner shown when someone runs the plugin by hand on a terminal.

use std::fmt;
use std::process;

use crate::check::CheckOutcome;
use crate::error::CheckError;
use crate::perfdata::Perfdata;

/// Conventional monitoring plugin exit states, ordered by severity.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ExitStatus {
    Ok,
    Warning,
    Critical,
    Unknown,
}

impl ExitStatus {
    pub fn code(self) -> i32 {
        match self {
            ExitStatus::Ok => 0,
            ExitStatus::Warning => 1,
            ExitStatus::Critical => 2,
            ExitStatus::Unknown => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ExitStatus::Ok => "OK",
            ExitStatus::Warning => "WARNING",
            ExitStatus::Critical => "CRITICAL",
            ExitStatus::Unknown => "UNKNOWN",
        }
    }

    pub fn exit(self) -> ! {
        process::exit(self.code())
    }
}

impl fmt::Display for ExitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Severity one point implies on its own: a breached critical range wins
/// over a breached warning range.
fn point_status(point: &Perfdata) -> ExitStatus {
    if point.crit.map_or(false, |r| r.breached_by(point.value)) {
        ExitStatus::Critical
    } else if point.warn.map_or(false, |r| r.breached_by(point.value)) {
        ExitStatus::Warning
    } else {
        ExitStatus::Ok
    }
}

/// Overall state plus the labels of every breaching point, in emission
/// order.
fn evaluate(perfdata: &[Perfdata]) -> (ExitStatus, Vec<&str>) {
    let mut worst = ExitStatus::Ok;
    let mut breached = Vec::new();

    for point in perfdata {
        let status = point_status(point);
        if status > ExitStatus::Ok {
            breached.push(point.label.as_str());
        }
        worst = worst.max(status);
    }
    (worst, breached)
}

/// Render the final stdout payload for a finished check: severity word
/// (with breaching labels, if any), long output, then the perfdata block.
pub fn format_output(outcome: &CheckOutcome) -> (ExitStatus, String) {
    let (status, breached) = evaluate(&outcome.perfdata);

    let mut out = String::new();
    out.push_str(status.as_str());
    if !breached.is_empty() {
        out.push_str(": ");
        out.push_str(&breached.join(", "));
    }
    out.push_str(&outcome.long_output);

    if !outcome.perfdata.is_empty() {
        let rendered: Vec<String> = outcome.perfdata.iter().map(|p| p.to_string()).collect();
        out.push('|');
        out.push_str(&rendered.join(" "));
    }
    (status, out)
}

/// Run a check under the plugin contract.
///
/// On a terminal the banner is printed instead and the check never runs;
/// monitoring schedulers always attach a pipe, people get pointed at the
/// project. A failed check renders its single error-map entry as
/// `UNKNOWN: <key>: <detail>`.
pub fn execute_check<B, C>(banner: B, check: C) -> ExitStatus
where
    B: FnOnce() -> String,
    C: FnOnce() -> Result<CheckOutcome, CheckError>,
{
    if stdout_is_terminal() {
        println!("{}", banner());
        return ExitStatus::Unknown;
    }

    match check() {
        Ok(outcome) => {
            let (status, out) = format_output(&outcome);
            println!("{}", out);
            status
        }
        Err(err) => {
            println!("UNKNOWN: {}", err);
            ExitStatus::Unknown
        }
    }
}

fn stdout_is_terminal() -> bool {
    unsafe { libc::isatty(libc::STDOUT_FILENO) == 1 }
}
