// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// chromadump — dump, plot, and quantise image colours.
//
// Entry point. Initialises logging, resolves the config, and runs the
// requested pipeline over every configured image index.

mod services;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use chromadump_core::error::{ChromaError, Result};
use chromadump_core::{PaletteMethod, PipelineConfig};
use clap::{Parser, Subcommand};

use services::config_file::{CONFIG_FILE, load_config, persist_config};
use services::pipeline::{Pipeline, Task};

#[derive(Debug, Parser)]
#[command(name = "chromadump", version, about = "Downsample images, dump their pixels, plot and quantise their colours")]
struct Cli {
    /// JSON config file (defaults to ./chromadump.json when present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Write `imgData{index}.json` pixel dumps.
    Dump,
    /// Render `{index}.jpg` RGB scatter plots.
    Scatter,
    /// Extract dominant colours from the pixel dumps.
    Palette {
        /// kmeans, median-cut, or octree (defaults to the configured method).
        #[arg(long)]
        method: Option<PaletteMethod>,
        /// Number of colours to extract.
        #[arg(long)]
        colors: Option<usize>,
        /// Also save a swatch strip per image.
        #[arg(long)]
        swatch: bool,
    },
    /// Dump, then scatter (the default).
    All,
    /// Write the effective config to a file.
    InitConfig {
        #[arg(long, default_value = CONFIG_FILE)]
        output: PathBuf,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(%err, "chromadump failed");
            ExitCode::FAILURE
        }
    }
}

/// What a parsed command line resolves to.
#[derive(Debug)]
enum Plan {
    /// Run `Task` over the config's indices.
    Run(PipelineConfig, Task),
    /// `init-config` wrote the effective config to this path.
    ConfigWritten(PathBuf),
}

fn run(cli: Cli) -> Result<()> {
    let working_dir = std::env::current_dir()?;
    match plan(cli, &working_dir)? {
        Plan::Run(config, task) => {
            tracing::info!(?task, indices = ?config.indices, "chromadump starting");
            Pipeline::new(config)?.run(task)
        }
        Plan::ConfigWritten(path) => {
            tracing::info!(path = %path.display(), "Config written");
            Ok(())
        }
    }
}

/// Resolve the config and turn the subcommand into a task.
///
/// `init-config` is carried out here, since it needs nothing but the config.
fn plan(cli: Cli, working_dir: &Path) -> Result<Plan> {
    let mut config = load_config(cli.config.as_deref(), working_dir)?;

    let task = match cli.command.unwrap_or(Command::All) {
        Command::Dump => Task::Dump,
        Command::Scatter => Task::Scatter,
        Command::All => Task::All,
        Command::Palette {
            method,
            colors,
            swatch,
        } => {
            if let Some(colors) = colors {
                config.palette.colors = colors;
            }
            Task::Palette {
                method: method.unwrap_or(config.palette.method),
                swatch,
            }
        }
        Command::InitConfig { output } => {
            if output.exists() {
                return Err(ChromaError::InvalidConfig(format!(
                    "{} already exists",
                    output.display()
                )));
            }
            config.validate()?;
            persist_config(&output, &config)?;
            return Ok(Plan::ConfigWritten(output));
        }
    };

    Ok(Plan::Run(config, task))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_arguments_means_all() {
        let cli = Cli::try_parse_from(["chromadump"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.config.is_none());
    }

    #[test]
    fn palette_flags_parse() {
        let cli = Cli::try_parse_from([
            "chromadump",
            "palette",
            "--method",
            "median-cut",
            "--colors",
            "6",
            "--swatch",
        ])
        .unwrap();
        match cli.command {
            Some(Command::Palette {
                method,
                colors,
                swatch,
            }) => {
                assert_eq!(method, Some(PaletteMethod::MedianCut));
                assert_eq!(colors, Some(6));
                assert!(swatch);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn unknown_method_is_rejected() {
        assert!(Cli::try_parse_from(["chromadump", "palette", "--method", "popularity"]).is_err());
    }

    fn plan_in(dir: &Path, args: &[&str]) -> Result<Plan> {
        let cli = Cli::try_parse_from(std::iter::once("chromadump").chain(args.iter().copied()))
            .unwrap();
        plan(cli, dir)
    }

    #[test]
    fn init_config_writes_a_loadable_file() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("cfg.json");
        let output_arg = output.to_str().unwrap();

        let written = plan_in(dir.path(), &["init-config", "--output", output_arg]).unwrap();
        assert!(matches!(written, Plan::ConfigWritten(ref path) if *path == output));
        assert_eq!(PipelineConfig::load(&output).unwrap(), PipelineConfig::default());
    }

    #[test]
    fn init_config_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("cfg.json");
        std::fs::write(&output, "keep me").unwrap();

        let result = plan_in(dir.path(), &["init-config", "--output", output.to_str().unwrap()]);
        assert!(matches!(result, Err(ChromaError::InvalidConfig(_))));
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "keep me");
    }

    #[test]
    fn palette_colors_override_the_config() {
        let dir = tempfile::tempdir().unwrap();
        match plan_in(dir.path(), &["palette", "--colors", "2"]).unwrap() {
            Plan::Run(config, task) => {
                assert_eq!(config.palette.colors, 2);
                assert_eq!(
                    task,
                    Task::Palette {
                        method: config.palette.method,
                        swatch: false,
                    }
                );
            }
            other => panic!("unexpected plan: {other:?}"),
        }
    }

    #[test]
    fn explicit_config_is_used() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.json");
        std::fs::write(&path, r#"{ "indices": [2, 3] }"#).unwrap();

        match plan_in(dir.path(), &["--config", path.to_str().unwrap(), "dump"]).unwrap() {
            Plan::Run(config, task) => {
                assert_eq!(config.indices, vec![2, 3]);
                assert_eq!(task, Task::Dump);
            }
            other => panic!("unexpected plan: {other:?}"),
        }
    }
}
