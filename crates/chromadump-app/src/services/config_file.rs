// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Config file resolution.

use std::path::Path;

use chromadump_core::PipelineConfig;
use chromadump_core::error::Result;
use tracing::{debug, info};

/// Looked up in the working directory when no `--config` is given.
pub const CONFIG_FILE: &str = "chromadump.json";

/// Resolve the pipeline config.
///
/// An explicit path must exist and parse. Without one, `chromadump.json` in
/// `working_dir` is used if present, otherwise the built-in defaults.
pub fn load_config(explicit: Option<&Path>, working_dir: &Path) -> Result<PipelineConfig> {
    if let Some(path) = explicit {
        info!(path = %path.display(), "Loading config");
        return PipelineConfig::load(path);
    }

    let implicit = working_dir.join(CONFIG_FILE);
    if implicit.is_file() {
        info!(path = %implicit.display(), "Loading config");
        return PipelineConfig::load(&implicit);
    }

    debug!("No config file, using defaults");
    Ok(PipelineConfig::default())
}

/// Write `config` as pretty JSON, e.g. to seed a config file.
pub fn persist_config(path: &Path, config: &PipelineConfig) -> Result<()> {
    let json = serde_json::to_string_pretty(config)?;
    std::fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(None, dir.path()).unwrap();
        assert_eq!(config, PipelineConfig::default());
    }

    #[test]
    fn picks_up_working_dir_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut expected = PipelineConfig::default();
        expected.indices = vec![3];
        expected.scatter_rate = 0.5;
        persist_config(&dir.path().join(CONFIG_FILE), &expected).unwrap();

        assert_eq!(load_config(None, dir.path()).unwrap(), expected);
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.json");
        let err = load_config(Some(&missing), dir.path()).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn invalid_values_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, r#"{ "dump_rate": 2.0 }"#).unwrap();
        assert!(load_config(Some(&path), dir.path()).is_err());
    }
}
