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

//! check_linux_sensors - monitoring plugin for Linux hardware sensors
//!
//! Walks the libsensors chip/feature/sub-feature tree and reports every
//! recognized reading as perfdata with alarm thresholds, plus an HTML-ish
//! long output for the monitoring front end.
//!
//! The walk and the feature mapping run against the `sensors` traits, with
//! two implementations: the live libsensors binding and an in-memory
//! fixture for tests.

pub mod check;
pub mod cli;
pub mod error;
pub mod fixture;
pub mod libsensors;
pub mod mapper;
pub mod perfdata;
pub mod plugin;
pub mod sensors;

pub use check::{run_check, CheckOutcome};
pub use error::{CheckError, Result};
pub use perfdata::{Perfdata, ThresholdRange};
pub use plugin::{execute_check, ExitStatus};
