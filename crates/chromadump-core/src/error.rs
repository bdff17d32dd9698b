// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for chromadump.

use thiserror::Error;

/// Top-level error type for all chromadump operations.
#[derive(Debug, Error)]
pub enum ChromaError {
    // -- Image / rendering --
    #[error("image processing failed: {0}")]
    Image(String),

    #[error("plot rendering failed: {0}")]
    Plot(String),

    // -- Input validation --
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("image index {0} is out of range (indices start at 1)")]
    InvalidIndex(u32),

    #[error("unknown palette method: {0} (expected kmeans, median-cut, or octree)")]
    UnknownMethod(String),

    // -- Storage --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ChromaError {
    /// True when the error stems from a missing input file.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io(err) if err.kind() == std::io::ErrorKind::NotFound)
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, ChromaError>;
