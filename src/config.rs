use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::analysis::insights::InsightThresholds;
use crate::analysis::CorrelationMethod;

/// Environment variable naming a JSON settings file.
pub const CONFIG_ENV_VAR: &str = "CORR_STUDIO_CONFIG";

/// Viewer settings. Every field falls back to its default when absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StudioConfig {
    /// Method used for the first matrix of every upload.
    pub default_method: CorrelationMethod,
    pub insights: InsightThresholds,
    pub export: ExportConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Edge length of one heatmap cell in exported PNGs, in pixels.
    pub cell_size: u32,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self { cell_size: 40 }
    }
}

impl StudioConfig {
    /// Read the file named by [`CONFIG_ENV_VAR`], or use defaults when unset.
    pub fn load() -> Result<Self> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::from_path(Path::new(&path)),
            None => Ok(Self::default()),
        }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }
}
