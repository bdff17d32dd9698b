// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types: RGB triples, flattened pixel buffers, and palettes.

use serde::{Deserialize, Serialize};

use crate::error::ChromaError;

/// One RGB triple. Serialises as a 3-element JSON array `[r, g, b]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Rgb(pub [u8; 3]);

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b])
    }

    pub fn r(&self) -> u8 {
        self.0[0]
    }

    pub fn g(&self) -> u8 {
        self.0[1]
    }

    pub fn b(&self) -> u8 {
        self.0[2]
    }

    /// Lower-case `#rrggbb` representation.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0[0], self.0[1], self.0[2])
    }
}

impl From<[u8; 3]> for Rgb {
    fn from(value: [u8; 3]) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// A flattened raster: RGB triples in row-major order.
///
/// Buffers produced from an image remember the raster dimensions so callers
/// can check `len() == width * height`. Buffers read back from a JSON dump
/// carry no dimensions, since the dump format is only the flat array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PixelBuffer {
    pixels: Vec<Rgb>,
    #[serde(skip)]
    dimensions: Option<(u32, u32)>,
}

impl PixelBuffer {
    /// Build a buffer from a raster of known size.
    ///
    /// Fails if the pixel count does not match `width * height`.
    pub fn from_raster(pixels: Vec<Rgb>, width: u32, height: u32) -> Result<Self, ChromaError> {
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(ChromaError::Image(format!(
                "raster {}x{} needs {} pixels, got {}",
                width,
                height,
                expected,
                pixels.len()
            )));
        }
        Ok(Self {
            pixels,
            dimensions: Some((width, height)),
        })
    }

    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// `(width, height)` of the originating raster, if known.
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.dimensions
    }

    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rgb> {
        self.pixels.iter()
    }
}

impl From<Vec<Rgb>> for PixelBuffer {
    fn from(pixels: Vec<Rgb>) -> Self {
        Self {
            pixels,
            dimensions: None,
        }
    }
}

impl<'a> IntoIterator for &'a PixelBuffer {
    type Item = &'a Rgb;
    type IntoIter = std::slice::Iter<'a, Rgb>;

    fn into_iter(self) -> Self::IntoIter {
        self.pixels.iter()
    }
}

/// A palette colour and the number of pixels it stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaletteEntry {
    pub color: Rgb,
    pub population: usize,
}

/// Colour quantisation algorithms available for palette extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaletteMethod {
    #[serde(rename = "kmeans")]
    KMeans,
    MedianCut,
    Octree,
}

impl PaletteMethod {
    pub const ALL: [PaletteMethod; 3] = [Self::KMeans, Self::MedianCut, Self::Octree];

    /// Short name used in file names and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::KMeans => "kmeans",
            Self::MedianCut => "median-cut",
            Self::Octree => "octree",
        }
    }
}

impl std::fmt::Display for PaletteMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PaletteMethod {
    type Err = ChromaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "kmeans" | "k-means" => Ok(Self::KMeans),
            "median-cut" | "mediancut" | "midcut" => Ok(Self::MedianCut),
            "octree" => Ok(Self::Octree),
            other => Err(ChromaError::UnknownMethod(other.to_string())),
        }
    }
}
