// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Palette module — dominant-colour extraction by k-means clustering, median
// cut, and octree quantisation.

pub mod kmeans;
pub mod median_cut;
pub mod octree;

use chromadump_core::config::PaletteConfig;
use chromadump_core::{PaletteEntry, PaletteMethod, PixelBuffer, Rgb};
use tracing::{info, instrument};

pub use kmeans::KMeans;
pub use median_cut::MedianCut;
pub use octree::Octree;

/// A colour quantiser that reduces a set of pixels to a small palette.
pub trait PaletteExtractor {
    fn method(&self) -> PaletteMethod;

    /// Return at most `colors` entries, most populous first.
    fn extract(&self, pixels: &[Rgb], colors: usize) -> Vec<PaletteEntry>;
}

/// Build the extractor for `method`, tuned by `config`.
pub fn extractor_for(method: PaletteMethod, config: &PaletteConfig) -> Box<dyn PaletteExtractor> {
    match method {
        PaletteMethod::KMeans => Box::new(KMeans {
            max_iterations: config.max_iterations,
            min_move: config.min_move,
            seed: config.seed,
        }),
        PaletteMethod::MedianCut => Box::new(MedianCut),
        PaletteMethod::Octree => Box::new(Octree {
            max_leaves: config.max_leaves,
        }),
    }
}

/// Extract `config.colors` dominant colours from `pixels` with `method`.
#[instrument(skip(pixels, config), fields(pixels = pixels.len(), colors = config.colors))]
pub fn extract_palette(
    pixels: &PixelBuffer,
    method: PaletteMethod,
    config: &PaletteConfig,
) -> Vec<PaletteEntry> {
    let extractor = extractor_for(method, config);
    let palette = extractor.extract(pixels.pixels(), config.colors);
    let hex: Vec<String> = palette.iter().map(|e| e.color.to_hex()).collect();
    info!(method = %extractor.method(), palette = ?hex, "Palette extracted");
    palette
}

/// Channel-wise mean of accumulated sums, truncated toward zero.
pub(crate) fn mean_color(sum: [u64; 3], count: u64) -> Rgb {
    if count == 0 {
        return Rgb::new(0, 0, 0);
    }
    Rgb::new(
        (sum[0] / count) as u8,
        (sum[1] / count) as u8,
        (sum[2] / count) as u8,
    )
}

/// Order entries by population, largest first. Ties keep their input order.
pub(crate) fn sort_by_population(entries: &mut [PaletteEntry]) {
    entries.sort_by(|a, b| b.population.cmp(&a.population));
}

#[cfg(test)]
pub(crate) mod test_support {
    use chromadump_core::Rgb;

    /// `count` copies of each colour, concatenated in the given order.
    pub fn blocks(runs: &[(Rgb, usize)]) -> Vec<Rgb> {
        runs.iter()
            .flat_map(|&(color, count)| std::iter::repeat_n(color, count))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_method_finds_a_flat_colour() {
        let teal = Rgb::new(0, 128, 128);
        let pixels = PixelBuffer::from(vec![teal; 200]);
        let config = PaletteConfig {
            seed: Some(7),
            ..PaletteConfig::default()
        };

        for method in PaletteMethod::ALL {
            let palette = extract_palette(&pixels, method, &config);
            assert!(!palette.is_empty(), "{method} returned nothing");
            assert!(palette.len() <= config.colors);
            assert_eq!(palette[0].color, teal, "{method} missed the dominant colour");
        }
    }

    #[test]
    fn empty_input_gives_empty_palette() {
        let config = PaletteConfig::default();
        for method in PaletteMethod::ALL {
            assert!(extract_palette(&PixelBuffer::default(), method, &config).is_empty());
        }
    }

    #[test]
    fn mean_truncates() {
        assert_eq!(mean_color([3, 5, 7], 2), Rgb::new(1, 2, 3));
    }
}
