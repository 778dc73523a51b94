// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// labelwerk-document — Label rendering and label sheet assembly.
//
// Provides QR rasterisation, caption measurement and rendering, quarter-turn
// rotation, per-record label composition, and PDF assembly of finished labels
// with per-record failure isolation.

pub mod batch;
pub mod image;
pub mod label;
pub mod pdf;
pub mod text;

// Re-export the primary structs so callers can use `labelwerk_document::BatchRenderer` etc.
pub use batch::{BatchReport, BatchRenderer, RenderedBatch, SkippedRecord};
pub use image::QrRenderer;
pub use label::{LabelCompositor, RotatedTextBlock, compose};
pub use pdf::{LabelDocument, assemble};
pub use text::{LabelFont, TextRenderer};
