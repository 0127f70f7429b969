// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::calculator::PlateCalculator;
use crate::language::Language;
use crate::route::DEFAULT_ROUTE_SIZE;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Country CSV to use instead of the built-in list
    pub catalog_path: Option<PathBuf>,
    pub language: Language,
    pub route_size: usize,
    pub example_target: usize,
    pub sample_budget: usize,
    pub max_examples: usize,
}

impl Default for Settings {
    fn default() -> Self {
        let calc = PlateCalculator::default();
        Self {
            catalog_path: None,
            language: Language::default(),
            route_size: DEFAULT_ROUTE_SIZE,
            example_target: calc.example_target,
            sample_budget: calc.sample_budget,
            max_examples: calc.max_examples,
        }
    }
}

impl Settings {
    /// Reads settings from `path`, or returns defaults when the file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No settings file, using defaults: path={}", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn load_default() -> Result<Self> {
        Self::load(&Self::default_path())
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).context("Failed to create config directory")?;
            }
        }
        let content = serde_json::to_string_pretty(self).context("Failed to serialize settings")?;
        fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
    }

    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("org", "signluck", "SignLuck")
            .map(|dirs| dirs.config_dir().join(SETTINGS_FILE))
            .unwrap_or_else(|| PathBuf::from(SETTINGS_FILE))
    }

    pub fn calculator(&self) -> PlateCalculator {
        PlateCalculator {
            example_target: self.example_target,
            sample_budget: self.sample_budget,
            max_examples: self.max_examples,
        }
    }
}
