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

//! Command line interface.
//!
//! The plugin itself needs no flags; everything here is operator
//! convenience.

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "check_linux_sensors")]
#[command(version)]
#[command(about = "Monitoring plugin reporting Linux hardware sensors as perfdata")]
#[command(long_about = "check_linux_sensors - hardware sensor check for \
Icinga/Nagios-compatible monitoring systems

Walks every chip libsensors detects and reports voltages, fans,
temperatures, currents, power, energy, humidity and chassis intrusion as
perfdata. A sensor signalling an alarm or a reading outside its critical
range turns the check CRITICAL; hardware access failures turn it UNKNOWN.

EXAMPLES:
    check_linux_sensors | cat              Run the check (plugin output)
    check_linux_sensors --dump-json        Inspect collected perfdata as JSON
    check_linux_sensors --config ./sensors3.conf --dump-json

ENVIRONMENT VARIABLES:
    RUST_LOG=debug         Enable debug logging on stderr

FILES:
    /etc/sensors3.conf     Default libsensors configuration")]
pub struct Cli {
    /// Alternate libsensors configuration file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print the collected perfdata as JSON and exit (debugging aid)
    #[arg(long)]
    pub dump_json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_without_any_flags() {
        let cli = Cli::try_parse_from(["check_linux_sensors"]).unwrap();
        assert_eq!(cli.config, None);
        assert!(!cli.dump_json);
    }

    #[test]
    fn parses_config_and_dump_flags() {
        let cli = Cli::try_parse_from([
            "check_linux_sensors",
            "--config",
            "/tmp/sensors3.conf",
            "--dump-json",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/sensors3.conf")));
        assert!(cli.dump_json);
    }

    #[test]
    fn rejects_unknown_flags() {
        assert!(Cli::try_parse_from(["check_linux_sensors", "--frobnicate"]).is_err());
    }
}
