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

use clap::Parser;

use check_linux_sensors::check::run_check;
use check_linux_sensors::cli::Cli;
use check_linux_sensors::libsensors::Libsensors;
use check_linux_sensors::plugin::{execute_check, ExitStatus};

fn main() {
    let cli = Cli::parse();

    // Log to stderr only when asked; stdout belongs to the plugin protocol.
    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .init();
    }

    if cli.dump_json {
        if let Err(e) = dump_json(&cli) {
            eprintln!("Error: {}", e);
            ExitStatus::Unknown.exit();
        }
        ExitStatus::Ok.exit();
    }

    execute_check(banner, || {
        let source = Libsensors::initialize(cli.config.as_deref())?;
        run_check(&source)
    })
    .exit()
}

/// Attribution text shown when someone runs the plugin by hand.
fn banner() -> String {
    format!(
        "{} {}\n\nFor the terms of use, the source code and the authors see\n\n  {}\n",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        env!("CARGO_PKG_REPOSITORY"),
    )
}

/// Debug path: print what the walk collected, bypassing the plugin
/// protocol entirely.
fn dump_json(cli: &Cli) -> anyhow::Result<()> {
    let source = Libsensors::initialize(cli.config.as_deref())?;
    let outcome = run_check(&source)?;
    println!("{}", serde_json::to_string_pretty(&outcome.perfdata)?);
    Ok(())
}
