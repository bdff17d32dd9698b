// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Per-index pipelines: pixel dump, scatter plot, and palette extraction.
//
// Each task walks the configured indices in order and stops at the first
// failure; outputs already written for earlier indices are kept.

use std::path::{Path, PathBuf};

use chromadump_core::error::Result;
use chromadump_core::{PaletteEntry, PaletteMethod, PipelineConfig};
use chromadump_image::palette::extract_palette;
use chromadump_image::{Downsampler, ScatterPlot, read_dump, render_swatch, write_dump};
use tracing::{info, instrument};

/// One unit of work over every configured index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    Dump,
    Scatter,
    Palette { method: PaletteMethod, swatch: bool },
    /// Dump, then scatter.
    All,
}

/// A single per-index step of a [`Task`].
#[derive(Debug, Clone, Copy)]
enum Stage {
    Dump,
    Scatter,
    Palette { method: PaletteMethod, swatch: bool },
}

/// Runs tasks against a validated [`PipelineConfig`].
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run `task` over every index, in order.
    ///
    /// `Task::All` runs the dump stage over every index before the scatter
    /// stage starts.
    pub fn run(&self, task: Task) -> Result<()> {
        let stages = match task {
            Task::Dump => vec![Stage::Dump],
            Task::Scatter => vec![Stage::Scatter],
            Task::Palette { method, swatch } => vec![Stage::Palette { method, swatch }],
            Task::All => vec![Stage::Dump, Stage::Scatter],
        };
        for stage in stages {
            for &index in &self.config.indices {
                self.run_stage(stage, index)?;
            }
        }
        Ok(())
    }

    fn run_stage(&self, stage: Stage, index: u32) -> Result<()> {
        match stage {
            Stage::Dump => self.dump(index).map(drop),
            Stage::Scatter => self.scatter(index).map(drop),
            Stage::Palette { method, swatch } => self.palette(index, method, swatch).map(drop),
        }
    }

    /// Downsample `{index}.jpg` by the dump rate and write its pixels as JSON.
    #[instrument(skip(self))]
    pub fn dump(&self, index: u32) -> Result<PathBuf> {
        let pixels = Downsampler::open(self.config.source_path(index))?
            .shrink(self.config.dump_rate)
            .flatten()?;
        let target = self.config.dump_path(index);
        ensure_parent(&target)?;
        write_dump(&target, &pixels)?;
        Ok(target)
    }

    /// Downsample `{index}.jpg` by the scatter rate and plot it in RGB space.
    #[instrument(skip(self))]
    pub fn scatter(&self, index: u32) -> Result<PathBuf> {
        let pixels = Downsampler::open(self.config.source_path(index))?
            .shrink(self.config.scatter_rate)
            .flatten()?;
        let target = self.config.plot_path(index);
        ensure_parent(&target)?;
        ScatterPlot::from_config(&self.config.plot).render(&pixels, &target)?;
        Ok(target)
    }

    /// Extract the dominant colours from `imgData{index}.json`.
    #[instrument(skip(self))]
    pub fn palette(
        &self,
        index: u32,
        method: PaletteMethod,
        swatch: bool,
    ) -> Result<Vec<PaletteEntry>> {
        let pixels = read_dump(&self.config.dump_path(index))?;
        let palette = extract_palette(&pixels, method, &self.config.palette);

        if swatch && !palette.is_empty() {
            let target = self.config.swatch_path(index, method);
            ensure_parent(&target)?;
            render_swatch(&palette, self.config.palette.swatch_size, &target)?;
        }
        Ok(palette)
    }
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !parent.exists() {
            info!(dir = %parent.display(), "Creating output directory");
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
