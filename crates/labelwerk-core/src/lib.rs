// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Labelwerk — Core types, layout configuration and error definitions shared
// across all crates.

pub mod config;
pub mod error;
pub mod types;

pub use config::{Anchor, GeneratorConfig, LabelLayout, MAX_QR_OVERHANG_PX, TextAnchor};
pub use error::{LabelError, Result};
pub use types::*;
