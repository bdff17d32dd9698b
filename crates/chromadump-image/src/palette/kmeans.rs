// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// k-means palette extraction in RGB space.

use chromadump_core::{PaletteEntry, PaletteMethod, Rgb};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use super::{PaletteExtractor, sort_by_population};

/// Lloyd's k-means over RGB triples.
///
/// Centres start at uniformly random colours. Each round assigns every pixel
/// to its nearest centre (squared Euclidean distance) and moves each centre to
/// the mean of its cluster. An empty cluster keeps its centre. Iteration stops
/// once no centre would move further than `min_move` (squared distance), in
/// which case that final small move is not applied, or after `max_iterations`
/// rounds.
#[derive(Debug, Clone)]
pub struct KMeans {
    pub max_iterations: usize,
    pub min_move: f64,
    /// Fixed seed for reproducible centres; drawn at random when `None`.
    pub seed: Option<u64>,
}

impl Default for KMeans {
    fn default() -> Self {
        Self {
            max_iterations: 20,
            min_move: 25.0,
            seed: None,
        }
    }
}

type Centre = [f64; 3];

impl PaletteExtractor for KMeans {
    fn method(&self) -> PaletteMethod {
        PaletteMethod::KMeans
    }

    fn extract(&self, pixels: &[Rgb], colors: usize) -> Vec<PaletteEntry> {
        if pixels.is_empty() || colors == 0 {
            return Vec::new();
        }

        let seed = self.seed.unwrap_or_else(rand::random);
        let mut rng = StdRng::seed_from_u64(seed);
        let centres: Vec<Centre> = (0..colors)
            .map(|_| {
                [
                    rng.random_range(0..=255u8) as f64,
                    rng.random_range(0..=255u8) as f64,
                    rng.random_range(0..=255u8) as f64,
                ]
            })
            .collect();

        let centres = self.fit(pixels, centres);
        debug!(seed, "k-means centres fitted");

        let (_, counts) = accumulate(pixels, &centres);
        let mut entries: Vec<PaletteEntry> = centres
            .iter()
            .zip(counts)
            .filter(|(_, count)| *count > 0)
            .map(|(centre, count)| PaletteEntry {
                color: Rgb::new(
                    centre[0].round() as u8,
                    centre[1].round() as u8,
                    centre[2].round() as u8,
                ),
                population: count,
            })
            .collect();
        sort_by_population(&mut entries);
        entries
    }
}

impl KMeans {
    /// Refine `centres` by Lloyd iterations.
    ///
    /// A round whose centres would all move by at most `min_move` ends the
    /// search, and the centres from before that round are kept.
    fn fit(&self, pixels: &[Rgb], mut centres: Vec<Centre>) -> Vec<Centre> {
        for round in 0..self.max_iterations {
            let (sums, counts) = accumulate(pixels, &centres);
            let next: Vec<Centre> = centres
                .iter()
                .zip(sums.iter().zip(&counts))
                .map(|(old, (sum, &count))| {
                    if count == 0 {
                        *old
                    } else {
                        let n = count as f64;
                        [sum[0] / n, sum[1] / n, sum[2] / n]
                    }
                })
                .collect();

            let settled = centres
                .iter()
                .zip(&next)
                .all(|(a, b)| distance_sq(a, b) <= self.min_move);
            if settled {
                debug!(round, "k-means converged");
                break;
            }
            centres = next;
        }
        centres
    }
}

/// Per-centre channel sums and pixel counts for the nearest-centre partition.
fn accumulate(pixels: &[Rgb], centres: &[Centre]) -> (Vec<Centre>, Vec<usize>) {
    let mut sums = vec![[0.0; 3]; centres.len()];
    let mut counts = vec![0usize; centres.len()];
    for pixel in pixels {
        let point = [pixel.r() as f64, pixel.g() as f64, pixel.b() as f64];
        let nearest = nearest_centre(&point, centres);
        for (acc, channel) in sums[nearest].iter_mut().zip(point) {
            *acc += channel;
        }
        counts[nearest] += 1;
    }
    (sums, counts)
}

fn nearest_centre(point: &Centre, centres: &[Centre]) -> usize {
    let mut best = 0;
    let mut best_dist = f64::INFINITY;
    for (i, centre) in centres.iter().enumerate() {
        let dist = distance_sq(point, centre);
        if dist < best_dist {
            best = i;
            best_dist = dist;
        }
    }
    best
}

fn distance_sq(a: &Centre, b: &Centre) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}
