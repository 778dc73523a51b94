// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// One generation run: load inputs, render the label sheet, write outputs.

use std::path::Path;

use labelwerk_core::error::Result;
use labelwerk_core::{GeneratorConfig, LabelLayout, LabelRecord, SheetRowMapping};
use labelwerk_document::{BatchRenderer, BatchReport, LabelFont, RenderedBatch};
use tracing::{info, instrument};

use crate::args::CliArgs;

/// Render the sheet described by `args` and write the PDF (and report).
#[instrument(skip_all, fields(input = %args.input.display()))]
pub fn run(args: &CliArgs) -> Result<BatchReport> {
    let mut config = match &args.config {
        Some(path) => GeneratorConfig::from_json_file(path)?,
        None => GeneratorConfig::default(),
    };
    if let Some(path) = &args.layout {
        config.layout = LabelLayout::from_json_file(path)?;
    }
    if let Some(title) = &args.title {
        config.title = title.clone();
    }

    let font = LabelFont::open(&args.font)?;
    let renderer = BatchRenderer::new(config, font)?;

    let batch = render_input(&renderer, &args.input, args.rows)?;

    std::fs::write(&args.output, &batch.pdf)?;
    info!(
        output = %args.output.display(),
        pages = batch.report.page_count(),
        skipped = batch.report.skipped.len(),
        "Label sheet written"
    );

    if let Some(path) = &args.report {
        std::fs::write(path, serde_json::to_vec_pretty(&batch.report)?)?;
    }

    Ok(batch.report)
}

fn render_input(renderer: &BatchRenderer, input: &Path, rows: bool) -> Result<RenderedBatch> {
    let json = std::fs::read_to_string(input)?;
    if rows {
        let sheet: Vec<Vec<String>> = serde_json::from_str(&json)?;
        info!(rows = sheet.len(), "Sheet rows loaded");
        renderer.render_results(SheetRowMapping::default().map_rows(&sheet))
    } else {
        let records: Vec<LabelRecord> = serde_json::from_str(&json)?;
        info!(records = records.len(), "Label records loaded");
        renderer.render(records)
    }
}
