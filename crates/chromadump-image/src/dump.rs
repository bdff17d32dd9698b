// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Pixel dumps — a flat JSON array of `[r, g, b]` triples per image.

use std::path::Path;

use chromadump_core::PixelBuffer;
use chromadump_core::error::Result;
use tracing::{info, instrument};

/// Serialise `pixels` as a JSON array of 3-element arrays and write it to
/// `path`.
///
/// The document is built in memory first, so a serialisation failure never
/// leaves a truncated file on disk.
#[instrument(skip_all, fields(path = %path.display(), pixels = pixels.len()))]
pub fn write_dump(path: &Path, pixels: &PixelBuffer) -> Result<()> {
    let json = serde_json::to_vec(pixels)?;
    std::fs::write(path, &json)?;
    info!(bytes = json.len(), "Pixel dump written");
    Ok(())
}

/// Read a pixel dump written by [`write_dump`].
///
/// Channel values outside [0, 255] and entries that are not 3-element arrays
/// are rejected as serialisation errors.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn read_dump(path: &Path) -> Result<PixelBuffer> {
    let data = std::fs::read(path)?;
    let pixels: PixelBuffer = serde_json::from_slice(&data)?;
    info!(pixels = pixels.len(), "Pixel dump loaded");
    Ok(pixels)
}
