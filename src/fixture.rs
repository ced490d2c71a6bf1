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

//! In-memory sensor source.
//!
//! The second `SensorSource` implementation: a scripted hardware snapshot
//! for tests and for poking at the mapper without real sensors. Name and
//! read failures are injectable to exercise the fail-fast paths.

use crate::error::{CheckError, Result};
use crate::sensors::{ChipSource, FeatureKind, FeatureSource, SensorSource, SubfeatureKind};

#[derive(Debug, Clone, Default)]
pub struct FixtureSource {
    pub chips: Vec<FixtureChip>,
}

#[derive(Debug, Clone)]
pub struct FixtureChip {
    pub name: String,
    pub adapter: Option<String>,
    pub features: Vec<FixtureFeature>,
    /// When set, `name()` fails with this message instead.
    pub broken_name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct FixtureFeature {
    pub name: String,
    pub label: Option<String>,
    pub kind: FeatureKind,
    pub values: Vec<(SubfeatureKind, f64)>,
    /// When set, reading this sub-feature kind fails.
    pub broken: Option<SubfeatureKind>,
}

impl FixtureSource {
    pub fn new(chips: Vec<FixtureChip>) -> Self {
        Self { chips }
    }
}

impl FixtureChip {
    pub fn new(name: &str, features: Vec<FixtureFeature>) -> Self {
        Self {
            name: name.to_string(),
            adapter: None,
            features,
            broken_name: None,
        }
    }
}

impl FixtureFeature {
    pub fn new(name: &str, kind: FeatureKind, values: &[(SubfeatureKind, f64)]) -> Self {
        Self {
            name: name.to_string(),
            label: None,
            kind,
            values: values.to_vec(),
            broken: None,
        }
    }

    pub fn with_label(mut self, label: &str) -> Self {
        self.label = Some(label.to_string());
        self
    }
}

impl SensorSource for FixtureSource {
    fn chips(&self) -> Vec<Box<dyn ChipSource + '_>> {
        self.chips
            .iter()
            .map(|chip| Box::new(chip.clone()) as Box<dyn ChipSource>)
            .collect()
    }
}

impl ChipSource for FixtureChip {
    fn name(&self) -> Result<String> {
        match &self.broken_name {
            Some(message) => Err(CheckError::ChipName(message.clone())),
            None => Ok(self.name.clone()),
        }
    }

    fn adapter_name(&self) -> Option<String> {
        self.adapter.clone()
    }

    fn features(&self) -> Vec<Box<dyn FeatureSource + '_>> {
        self.features
            .iter()
            .map(|feature| Box::new(feature.clone()) as Box<dyn FeatureSource>)
            .collect()
    }
}

impl FeatureSource for FixtureFeature {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn label(&self) -> Option<String> {
        self.label.clone()
    }

    fn kind(&self) -> FeatureKind {
        self.kind
    }

    fn value(&self, sub: SubfeatureKind) -> Result<Option<f64>> {
        if self.broken == Some(sub) {
            return Err(CheckError::Read(format!(
                "injected read failure on {}",
                self.name
            )));
        }
        Ok(self
            .values
            .iter()
            .find(|(kind, _)| *kind == sub)
            .map(|(_, value)| *value))
    }
}
