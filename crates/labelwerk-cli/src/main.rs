// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Labelwerk — QR label sheet generator
//
// Entry point. Initialises logging, parses arguments, and renders one label
// sheet from a records file.

mod args;
mod run;

use std::process::ExitCode;

use args::CliArgs;
use clap::Parser;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = CliArgs::parse();

    tracing::info!("Labelwerk starting");

    match run::run(&cli) {
        Ok(report) => {
            if !report.skipped.is_empty() {
                tracing::warn!(
                    skipped = report.skipped.len(),
                    "some records were left out of the sheet"
                );
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(error = %err, "label generation failed");
            ExitCode::FAILURE
        }
    }
}
