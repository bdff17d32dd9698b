// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Pipeline configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::PaletteMethod;
use crate::error::{ChromaError, Result};

/// Settings for the dump, scatter, and palette pipelines.
///
/// Every field has a default, so a config file only needs to name the values
/// it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Directory holding the `{index}.jpg` source images.
    pub source_dir: PathBuf,
    /// Directory receiving `imgData{index}.json` pixel dumps.
    pub dump_dir: PathBuf,
    /// Directory receiving `{index}.jpg` scatter plots.
    pub plot_dir: PathBuf,
    /// Directory receiving palette swatch strips.
    pub palette_dir: PathBuf,
    /// Image indices to process, in order.
    pub indices: Vec<u32>,
    /// Downsampling ratio for pixel dumps.
    pub dump_rate: f64,
    /// Downsampling ratio for scatter plots.
    pub scatter_rate: f64,
    pub plot: PlotConfig,
    pub palette: PaletteConfig,
}

/// Scatter plot appearance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    pub width: u32,
    pub height: u32,
    /// Point opacity in [0, 1].
    pub alpha: f64,
    /// Point radius in pixels.
    pub point_size: u32,
}

/// Palette extraction tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteConfig {
    pub method: PaletteMethod,
    /// Number of dominant colours to extract.
    pub colors: usize,
    /// k-means iteration cap.
    pub max_iterations: usize,
    /// k-means convergence threshold (squared RGB distance).
    pub min_move: f64,
    /// Octree leaf budget before reduction.
    pub max_leaves: usize,
    /// Fixed RNG seed for k-means; random when absent.
    pub seed: Option<u64>,
    /// Edge length of one swatch block in pixels.
    pub swatch_size: u32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("imgs/test"),
            dump_dir: PathBuf::from("imgs/test"),
            plot_dir: PathBuf::from("imgs/blog"),
            palette_dir: PathBuf::from("imgs/palette"),
            indices: vec![1, 2, 3, 4],
            dump_rate: 0.03,
            scatter_rate: 0.2,
            plot: PlotConfig::default(),
            palette: PaletteConfig::default(),
        }
    }
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            alpha: 0.3,
            point_size: 1,
        }
    }
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            method: PaletteMethod::Octree,
            colors: 4,
            max_iterations: 20,
            min_move: 25.0,
            max_leaves: 16,
            seed: None,
            swatch_size: 64,
        }
    }
}

impl PipelineConfig {
    /// Reject settings that would make a pipeline meaningless.
    pub fn validate(&self) -> Result<()> {
        check_rate("dump_rate", self.dump_rate)?;
        check_rate("scatter_rate", self.scatter_rate)?;
        if self.indices.is_empty() {
            return Err(ChromaError::InvalidConfig("indices must not be empty".into()));
        }
        if let Some(&index) = self.indices.iter().find(|&&i| i == 0) {
            return Err(ChromaError::InvalidIndex(index));
        }
        if !(0.0..=1.0).contains(&self.plot.alpha) {
            return Err(ChromaError::InvalidConfig(format!(
                "plot.alpha must be within [0, 1], got {}",
                self.plot.alpha
            )));
        }
        if self.plot.width == 0 || self.plot.height == 0 {
            return Err(ChromaError::InvalidConfig("plot size must be non-zero".into()));
        }
        if self.palette.colors == 0 {
            return Err(ChromaError::InvalidConfig("palette.colors must be at least 1".into()));
        }
        if self.palette.max_leaves < self.palette.colors {
            return Err(ChromaError::InvalidConfig(format!(
                "palette.max_leaves ({}) must be at least palette.colors ({})",
                self.palette.max_leaves, self.palette.colors
            )));
        }
        Ok(())
    }

    /// `{source_dir}/{index}.jpg`
    pub fn source_path(&self, index: u32) -> PathBuf {
        self.source_dir.join(format!("{index}.jpg"))
    }

    /// `{dump_dir}/imgData{index}.json`
    pub fn dump_path(&self, index: u32) -> PathBuf {
        self.dump_dir.join(format!("imgData{index}.json"))
    }

    /// `{plot_dir}/{index}.jpg`
    pub fn plot_path(&self, index: u32) -> PathBuf {
        self.plot_dir.join(format!("{index}.jpg"))
    }

    /// `{palette_dir}/{index}-{method}.png`
    pub fn swatch_path(&self, index: u32, method: PaletteMethod) -> PathBuf {
        self.palette_dir.join(format!("{index}-{method}.png"))
    }

    /// Load a config from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&data)?;
        config.validate()?;
        Ok(config)
    }
}

fn check_rate(name: &str, rate: f64) -> Result<()> {
    if rate > 0.0 && rate <= 1.0 {
        Ok(())
    } else {
        Err(ChromaError::InvalidConfig(format!(
            "{name} must be within (0, 1], got {rate}"
        )))
    }
}
