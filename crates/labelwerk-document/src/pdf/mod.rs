// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF module — assembling label rasters into a paginated label sheet.

pub mod writer;

pub use writer::{LabelDocument, assemble};
