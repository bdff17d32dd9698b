// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Median-cut palette extraction.

use chromadump_core::{PaletteEntry, PaletteMethod, Rgb};

use super::{PaletteExtractor, mean_color, sort_by_population};

/// Volume used for boxes flat along some channel.
const MIN_VOLUME: f64 = 0.0001;

/// Recursive median cut over the RGB bounding box.
///
/// The densest splittable box (pixels per unit of bounding volume) is cut
/// perpendicular to its longest channel at the median until the requested
/// number of boxes exists. Each box contributes its mean colour.
#[derive(Debug, Clone, Copy, Default)]
pub struct MedianCut;

struct ColorBox {
    pixels: Vec<Rgb>,
    density: f64,
}

impl PaletteExtractor for MedianCut {
    fn method(&self) -> PaletteMethod {
        PaletteMethod::MedianCut
    }

    fn extract(&self, pixels: &[Rgb], colors: usize) -> Vec<PaletteEntry> {
        if pixels.is_empty() || colors == 0 {
            return Vec::new();
        }

        let mut boxes = vec![ColorBox {
            pixels: pixels.to_vec(),
            density: 0.0,
        }];

        while boxes.len() < colors {
            let Some(index) = densest_splittable(&boxes) else {
                break;
            };
            let (left, right) = split(boxes.swap_remove(index).pixels);
            boxes.push(left);
            boxes.push(right);
        }

        let mut entries: Vec<PaletteEntry> = boxes
            .iter()
            .map(|b| {
                let mut sum = [0u64; 3];
                for pixel in &b.pixels {
                    for (acc, channel) in sum.iter_mut().zip(pixel.0) {
                        *acc += channel as u64;
                    }
                }
                PaletteEntry {
                    color: mean_color(sum, b.pixels.len() as u64),
                    population: b.pixels.len(),
                }
            })
            .collect();
        sort_by_population(&mut entries);
        entries
    }
}

fn densest_splittable(boxes: &[ColorBox]) -> Option<usize> {
    boxes
        .iter()
        .enumerate()
        .filter(|(_, b)| b.pixels.len() >= 2)
        .max_by(|(_, a), (_, b)| a.density.total_cmp(&b.density))
        .map(|(i, _)| i)
}

/// Per-channel `(min, max)` of a non-empty pixel set.
fn bounds(pixels: &[Rgb]) -> [(u8, u8); 3] {
    let mut bounds = [(u8::MAX, u8::MIN); 3];
    for pixel in pixels {
        for (bound, channel) in bounds.iter_mut().zip(pixel.0) {
            bound.0 = bound.0.min(channel);
            bound.1 = bound.1.max(channel);
        }
    }
    bounds
}

/// Cut `pixels` at the median of the longest channel. The lower half receives
/// `len / 2` pixels.
fn split(mut pixels: Vec<Rgb>) -> (ColorBox, ColorBox) {
    let bounds = bounds(&pixels);
    let mut axis = 0;
    for channel in 1..3 {
        let edge = |c: usize| bounds[c].1 - bounds[c].0;
        if edge(channel) > edge(axis) {
            axis = channel;
        }
    }

    pixels.sort_by_key(|p| p.0[axis]);
    let half = pixels.len() / 2;
    let median = pixels[half].0[axis] as f64;

    let mut left_volume = 1.0;
    let mut right_volume = 1.0;
    for (channel, &(min, max)) in bounds.iter().enumerate() {
        let (min, max) = (min as f64, max as f64);
        if channel == axis {
            left_volume *= median - min;
            right_volume *= max - median;
        } else {
            left_volume *= max - min;
            right_volume *= max - min;
        }
    }

    let right = pixels.split_off(half);
    let density = |count: usize, volume: f64| {
        let volume = if volume == 0.0 { MIN_VOLUME } else { volume };
        count as f64 / volume
    };
    (
        ColorBox {
            density: density(pixels.len(), left_volume),
            pixels,
        },
        ColorBox {
            density: density(right.len(), right_volume),
            pixels: right,
        },
    )
}
