// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Sampling module — proportional downsampling and RGB flattening.

pub mod downsampler;

pub use downsampler::Downsampler;
