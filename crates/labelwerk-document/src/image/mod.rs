// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image module — canvas primitives, QR rasterisation, and quarter-turn rotation.

pub mod canvas;
pub mod qr;
pub mod rotate;

pub use qr::QrRenderer;
pub use rotate::rotate_ccw;
