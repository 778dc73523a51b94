// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Label module — per-record composition of the QR code and captions.

pub mod compositor;
pub mod vertical;

pub use compositor::{LabelCompositor, compose};
pub use vertical::RotatedTextBlock;
