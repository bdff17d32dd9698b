// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// RGB scatter plot — every pixel drawn as a translucent point at its own
// (R, G, B) coordinate, in its own colour, on a 3-D chart rendered with
// `plotters`' bitmap backend.

use std::error::Error;
use std::path::Path;

use chromadump_core::PixelBuffer;
use chromadump_core::config::PlotConfig;
use chromadump_core::error::{ChromaError, Result};
use plotters::prelude::*;
use tracing::{info, instrument};

/// Upper bound of every channel axis.
const CHANNEL_MAX: f64 = 255.0;

/// Renders a [`PixelBuffer`] as a 3-D scatter in RGB space.
///
/// The chart's vertical axis is blue; red runs left to right and green runs
/// into the page. Each axis is traced in its channel colour. Tick labels need
/// a font backend and are only drawn with the `plot-text` feature; without it
/// the channel cube is outlined instead.
#[derive(Debug, Clone)]
pub struct ScatterPlot {
    width: u32,
    height: u32,
    alpha: f64,
    point_size: u32,
}

impl Default for ScatterPlot {
    fn default() -> Self {
        Self::from_config(&PlotConfig::default())
    }
}

impl ScatterPlot {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn from_config(config: &PlotConfig) -> Self {
        Self {
            width: config.width,
            height: config.height,
            alpha: config.alpha,
            point_size: config.point_size,
        }
    }

    /// Point opacity, clamped to [0, 1].
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha.clamp(0.0, 1.0);
        self
    }

    /// Draw `pixels` and save the chart to `path`. The image format follows
    /// the file extension.
    #[instrument(skip_all, fields(path = %path.display(), points = pixels.len()))]
    pub fn render(&self, pixels: &PixelBuffer, path: &Path) -> Result<()> {
        self.draw(pixels, path).map_err(|err| {
            ChromaError::Plot(format!("failed to render {}: {}", path.display(), err))
        })?;
        info!(width = self.width, height = self.height, "Scatter plot saved");
        Ok(())
    }

    fn draw(&self, pixels: &PixelBuffer, path: &Path) -> std::result::Result<(), Box<dyn Error>> {
        let root = BitMapBackend::new(path, (self.width, self.height)).into_drawing_area();
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .margin(20)
            .build_cartesian_3d(0.0..CHANNEL_MAX, 0.0..CHANNEL_MAX, 0.0..CHANNEL_MAX)?;

        chart.with_projection(|mut pb| {
            pb.yaw = 0.6;
            pb.pitch = 0.35;
            pb.scale = 0.85;
            pb.into_matrix()
        });

        #[cfg(feature = "plot-text")]
        chart
            .configure_axes()
            .light_grid_style(BLACK.mix(0.1))
            .max_light_lines(3)
            .x_formatter(&|v: &f64| format!("R {v:.0}"))
            .y_formatter(&|v: &f64| format!("B {v:.0}"))
            .z_formatter(&|v: &f64| format!("G {v:.0}"))
            .draw()?;

        #[cfg(not(feature = "plot-text"))]
        for (from, to) in cube_edges() {
            chart.draw_series(LineSeries::new([from, to], BLACK.mix(0.2)))?;
        }

        // Chart coordinates are (x, y, z) = (R, B, G) so blue points up.
        let axes = [
            ((CHANNEL_MAX, 0.0, 0.0), RED),
            ((0.0, CHANNEL_MAX, 0.0), BLUE),
            ((0.0, 0.0, CHANNEL_MAX), GREEN),
        ];
        for (end, color) in axes {
            chart.draw_series(LineSeries::new([(0.0, 0.0, 0.0), end], color.stroke_width(2)))?;
        }

        let alpha = self.alpha;
        let radius = self.point_size as i32;
        chart.draw_series(pixels.iter().map(|p| {
            let style = RGBColor(p.r(), p.g(), p.b()).mix(alpha).filled();
            Circle::new((p.r() as f64, p.b() as f64, p.g() as f64), radius, style)
        }))?;

        root.present()?;
        Ok(())
    }
}

type Point3 = (f64, f64, f64);

/// The twelve edges of the 0..=255 channel cube.
#[cfg_attr(feature = "plot-text", allow(dead_code))]
fn cube_edges() -> Vec<(Point3, Point3)> {
    let corner = |i: u8| {
        let pick = |bit: u8| if i & bit != 0 { CHANNEL_MAX } else { 0.0 };
        (pick(1), pick(2), pick(4))
    };
    let mut edges = Vec::with_capacity(12);
    for a in 0..8u8 {
        for bit in [1u8, 2, 4] {
            if a & bit == 0 {
                edges.push((corner(a), corner(a | bit)));
            }
        }
    }
    edges
}

#[cfg(test)]
mod tests {
    use super::*;
    use chromadump_core::Rgb;

    fn sample_pixels() -> PixelBuffer {
        let pixels = (0..64u8)
            .map(|i| Rgb::new(i * 4, 255 - i * 4, ((i as u16 * 7) % 255) as u8))
            .collect::<Vec<_>>();
        PixelBuffer::from_raster(pixels, 8, 8).unwrap()
    }

    #[test]
    fn renders_png_with_requested_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("1.png");

        ScatterPlot::new(320, 240)
            .render(&sample_pixels(), &path)
            .expect("render failed");

        let written = image::open(&path).expect("plot must decode");
        assert_eq!((written.width(), written.height()), (320, 240));
    }

    #[test]
    fn renders_jpeg_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("2.jpg");

        ScatterPlot::default()
            .with_alpha(0.3)
            .render(&sample_pixels(), &path)
            .expect("render failed");

        let written = image::open(&path).expect("plot must decode");
        assert_eq!((written.width(), written.height()), (640, 480));
    }

    #[test]
    fn empty_buffer_still_draws_axes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("3.png");
        ScatterPlot::new(200, 200)
            .render(&PixelBuffer::default(), &path)
            .expect("render failed");
        assert!(path.exists());
    }

    #[test]
    fn points_are_drawn_in_their_own_colour() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("4.png");
        let magenta = PixelBuffer::from_raster(vec![Rgb::new(255, 0, 255); 16], 4, 4).unwrap();

        ScatterPlot::new(240, 240)
            .with_alpha(1.0)
            .render(&magenta, &path)
            .expect("render failed");

        let written = image::open(&path).unwrap().to_rgb8();
        assert!(
            written
                .pixels()
                .any(|p| p.0[0] > 200 && p.0[1] < 60 && p.0[2] > 200),
            "no magenta point in the rendered plot"
        );
    }

    #[test]
    fn cube_has_twelve_distinct_edges() {
        let edges = cube_edges();
        assert_eq!(edges.len(), 12);
        for (from, to) in &edges {
            let changed = [from.0 != to.0, from.1 != to.1, from.2 != to.2];
            assert_eq!(changed.iter().filter(|c| **c).count(), 1);
        }
    }

    #[test]
    fn alpha_is_clamped() {
        let plot = ScatterPlot::default().with_alpha(4.0);
        assert_eq!(plot.alpha, 1.0);
    }
}
