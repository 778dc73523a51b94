// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

/// Render QR label records into a one-label-per-page PDF sheet.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "labelwerk", version, about)]
pub struct CliArgs {
    /// JSON array of [qr, vertical, top, bottom] records (or sheet rows with --rows)
    pub input: PathBuf,

    /// TrueType/OpenType font used for every caption
    pub font: PathBuf,

    /// Where the label sheet is written
    pub output: PathBuf,

    /// Treat the input as sheet rows ([id, code, ...], header first)
    #[arg(long)]
    pub rows: bool,

    /// JSON generator config (layout and title)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// JSON label layout overriding the built-in 75mm x 25mm design
    #[arg(long, value_name = "FILE")]
    pub layout: Option<PathBuf>,

    /// PDF document title [default: Labels]
    #[arg(long)]
    pub title: Option<String>,

    /// Write a JSON report of rendered and skipped records
    #[arg(long, value_name = "FILE")]
    pub report: Option<PathBuf>,
}
