// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Labelwerk.

use thiserror::Error;

/// Top-level error type for all Labelwerk operations.
#[derive(Debug, Error)]
pub enum LabelError {
    // -- Per-record errors --
    #[error("QR encoding failed: {0}")]
    Encoding(String),

    #[error("text measurement failed: {0}")]
    Measurement(String),

    #[error("text rendering failed: {0}")]
    Render(String),

    #[error("invalid label record: {0}")]
    InvalidRecord(String),

    // -- Document errors --
    #[error("page assembly failed: {0}")]
    Assembly(String),

    // -- Configuration --
    #[error("invalid label layout: {0}")]
    InvalidLayout(String),

    #[error("font could not be loaded: {0}")]
    Font(String),

    // -- Storage / persistence --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl LabelError {
    /// Whether the error belongs to a single record and the batch may go on.
    pub fn is_per_record(&self) -> bool {
        matches!(
            self,
            Self::Encoding(_)
                | Self::Measurement(_)
                | Self::Render(_)
                | Self::InvalidRecord(_)
                | Self::Assembly(_)
        )
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, LabelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encoding_is_per_record() {
        assert!(LabelError::Encoding("data too long".into()).is_per_record());
    }

    #[test]
    fn layout_errors_are_fatal() {
        assert!(!LabelError::InvalidLayout("qr box".into()).is_per_record());
        assert!(!LabelError::Font("bad".into()).is_per_record());
    }

    #[test]
    fn io_errors_convert() {
        let err: LabelError = std::io::Error::other("disk").into();
        assert!(err.to_string().contains("disk"));
    }
}
