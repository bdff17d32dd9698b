// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Plot module — RGB colour-space scatter rendering.

pub mod scatter;

pub use scatter::ScatterPlot;
