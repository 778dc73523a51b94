// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Batch rendering — records in, one PDF out.
//
// Records are composed and paged strictly in input order. A record that fails
// anywhere before its page lands is logged with its index and left out; only
// a failure to serialise the finished document ends the run.

use labelwerk_core::error::{LabelError, Result};
use labelwerk_core::{GeneratorConfig, LabelRecord};
use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::label::LabelCompositor;
use crate::pdf::LabelDocument;
use crate::pdf::writer::sha256_hex;
use crate::text::LabelFont;

/// A record that did not make it into the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRecord {
    /// Zero-based position in the record sequence handed to the renderer.
    ///
    /// For sheet rows mapped with a skipped header this counts data rows, so
    /// the row in the sheet itself is `index + 1`.
    pub index: usize,
    pub reason: String,
}

/// Outcome of one batch run.
///
/// Indices in both lists use the same zero-based record positions as
/// [`SkippedRecord::index`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    /// Input positions that became pages, in page order.
    pub rendered: Vec<usize>,
    pub skipped: Vec<SkippedRecord>,
    /// SHA-256 of the produced PDF.
    pub sha256: String,
}

impl BatchReport {
    pub fn page_count(&self) -> usize {
        self.rendered.len()
    }
}

/// A finished label sheet and what went into it.
#[derive(Debug, Clone)]
pub struct RenderedBatch {
    pub pdf: Vec<u8>,
    pub report: BatchReport,
}

/// Runs records through composition and page assembly.
#[derive(Debug, Clone)]
pub struct BatchRenderer {
    compositor: LabelCompositor,
    title: String,
}

impl BatchRenderer {
    /// Validate the configured layout and bind it to `font`.
    pub fn new(config: GeneratorConfig, font: LabelFont) -> Result<Self> {
        Ok(Self {
            compositor: LabelCompositor::new(config.layout, font)?,
            title: config.title,
        })
    }

    pub fn compositor(&self) -> &LabelCompositor {
        &self.compositor
    }

    /// Render already-resolved records.
    pub fn render(
        &self,
        records: impl IntoIterator<Item = LabelRecord>,
    ) -> Result<RenderedBatch> {
        self.render_results(records.into_iter().map(Ok))
    }

    /// Render records that may already have failed upstream (for example
    /// while being derived from sheet rows). Failed entries are skipped like
    /// records that fail to compose, keeping their input position.
    #[instrument(skip_all, fields(title = %self.title))]
    pub fn render_results(
        &self,
        records: impl IntoIterator<Item = Result<LabelRecord>>,
    ) -> Result<RenderedBatch> {
        let mut document =
            LabelDocument::new(self.compositor.layout().page_size(), &self.title);
        let mut report = BatchReport::default();

        for (index, record) in records.into_iter().enumerate() {
            let placed = record
                .and_then(|record| self.compositor.compose(&record))
                .and_then(|canvas| document.push_canvas(&canvas));

            match placed {
                Ok(()) => report.rendered.push(index),
                Err(err) => {
                    warn!(index, error = %err, "Skipping label record");
                    report.skipped.push(SkippedRecord {
                        index,
                        reason: err.to_string(),
                    });
                }
            }
        }

        info!(
            rendered = report.rendered.len(),
            skipped = report.skipped.len(),
            "Labels composed"
        );

        let pdf = document.finalize().map_err(|err| match err {
            LabelError::Assembly(detail) if report.rendered.is_empty() => LabelError::Assembly(
                format!("{detail}: all {} records failed", report.skipped.len()),
            ),
            other => other,
        })?;
        report.sha256 = sha256_hex(&pdf);

        Ok(RenderedBatch { pdf, report })
    }
}
