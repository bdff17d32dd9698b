// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Palette swatches — a strip of square colour blocks, drawn with `imageproc`.

use std::path::Path;

use chromadump_core::PaletteEntry;
use chromadump_core::error::{ChromaError, Result};
use image::RgbImage;
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;
use tracing::{info, instrument};

/// Lay out `palette` left to right as `block` x `block` squares.
pub fn swatch_image(palette: &[PaletteEntry], block: u32) -> Result<RgbImage> {
    if palette.is_empty() {
        return Err(ChromaError::Image("cannot draw a swatch for an empty palette".into()));
    }
    let block = block.max(1);
    let mut canvas = RgbImage::new(block * palette.len() as u32, block);
    for (i, entry) in palette.iter().enumerate() {
        let x = (i as u32 * block) as i32;
        draw_filled_rect_mut(
            &mut canvas,
            Rect::at(x, 0).of_size(block, block),
            image::Rgb(entry.color.0),
        );
    }
    Ok(canvas)
}

/// Render `palette` as a swatch strip and save it to `path`.
#[instrument(skip_all, fields(path = %path.display(), colors = palette.len()))]
pub fn render_swatch(palette: &[PaletteEntry], block: u32, path: &Path) -> Result<()> {
    let canvas = swatch_image(palette, block)?;
    canvas.save(path).map_err(|err| {
        ChromaError::Image(format!("failed to save swatch to {}: {}", path.display(), err))
    })?;
    info!("Swatch saved");
    Ok(())
}
