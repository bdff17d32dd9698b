// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for palette extraction in the chromadump-image crate.
// Runs every quantiser over a synthetic 120x80 gradient, roughly the size of a
// 3% dump of a phone photo.

use chromadump_core::config::PaletteConfig;
use chromadump_core::{PaletteMethod, PixelBuffer};
use chromadump_image::{Downsampler, extract_palette};
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use image::{DynamicImage, Rgb, RgbImage};

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

fn gradient_pixels() -> PixelBuffer {
    let img = RgbImage::from_fn(120, 80, |x, y| {
        Rgb([(x * 2) as u8, (y * 3) as u8, ((x + y) % 256) as u8])
    });
    Downsampler::from_dynamic(DynamicImage::ImageRgb8(img))
        .flatten()
        .expect("flatten synthetic gradient")
}

fn bench_palette_methods(c: &mut Criterion) {
    let pixels = gradient_pixels();
    let config = PaletteConfig {
        seed: Some(7),
        ..PaletteConfig::default()
    };

    for method in PaletteMethod::ALL {
        c.bench_function(&format!("palette {method} (120x80)"), |b| {
            b.iter(|| black_box(extract_palette(black_box(&pixels), method, &config)));
        });
    }
}

criterion_group!(benches, bench_palette_methods);
criterion_main!(benches);
