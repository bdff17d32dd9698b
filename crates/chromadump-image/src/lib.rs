// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// chromadump-image — Image colour processing for chromadump.
//
// Provides downsampling and pixel flattening, JSON pixel dumps, 3-D RGB
// scatter plots, dominant-colour palette extraction (k-means, median cut,
// octree), and palette swatch rendering.

pub mod dump;
pub mod palette;
pub mod plot;
pub mod sample;
pub mod swatch;

// Re-export the primary entry points so callers can use `chromadump_image::Downsampler` etc.
pub use dump::{read_dump, write_dump};
pub use palette::{PaletteExtractor, extract_palette};
pub use plot::scatter::ScatterPlot;
pub use sample::downsampler::Downsampler;
pub use swatch::render_swatch;
