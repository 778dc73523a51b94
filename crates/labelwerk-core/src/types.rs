// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for label generation.

use serde::{Deserialize, Serialize};

use crate::error::{LabelError, Result};

/// Millimetres per inch, used for pixel <-> physical size conversion.
const MM_PER_INCH: f32 = 25.4;

/// The four strings printed on one label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "[String; 4]", into = "[String; 4]")]
pub struct LabelRecord {
    /// Encoded into the QR code.
    pub qr_payload: String,
    /// Printed rotated along the left edge.
    pub vertical_caption: String,
    /// Centered above the bottom caption.
    pub top_caption: String,
    /// Large centered caption near the bottom edge.
    pub bottom_caption: String,
}

impl LabelRecord {
    pub fn new(
        qr_payload: impl Into<String>,
        vertical_caption: impl Into<String>,
        top_caption: impl Into<String>,
        bottom_caption: impl Into<String>,
    ) -> Self {
        Self {
            qr_payload: qr_payload.into(),
            vertical_caption: vertical_caption.into(),
            top_caption: top_caption.into(),
            bottom_caption: bottom_caption.into(),
        }
    }
}

impl From<[String; 4]> for LabelRecord {
    fn from([qr_payload, vertical_caption, top_caption, bottom_caption]: [String; 4]) -> Self {
        Self {
            qr_payload,
            vertical_caption,
            top_caption,
            bottom_caption,
        }
    }
}

impl From<LabelRecord> for [String; 4] {
    fn from(record: LabelRecord) -> Self {
        [
            record.qr_payload,
            record.vertical_caption,
            record.top_caption,
            record.bottom_caption,
        ]
    }
}

/// Size of one document page, expressed as the raster that fills it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageSize {
    pub width_px: u32,
    pub height_px: u32,
    /// Resolution the raster is printed at.
    pub dpi: f32,
}

impl PageSize {
    /// Physical dimensions (width, height) in millimetres.
    pub fn dimensions_mm(&self) -> (f32, f32) {
        (
            self.width_px as f32 / self.dpi * MM_PER_INCH,
            self.height_px as f32 / self.dpi * MM_PER_INCH,
        )
    }

    /// Whether a raster of `width` x `height` pixels fills this page exactly.
    pub fn fits_exactly(&self, width: u32, height: u32) -> bool {
        self.width_px == width && self.height_px == height
    }
}

/// Derives label records from raw spreadsheet rows.
///
/// A row is `[id, code, ..]` where `code` looks like `X<lot>-<a>-<b>-<tail>`.
/// The record becomes `(prefix + id, lot, "<a>-<b>", tail)`; the leading
/// character of the code is dropped. Cells past the second are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetRowMapping {
    /// Prepended to the id cell to form the QR payload.
    pub qr_prefix: String,
    /// Whether the first row holds column titles.
    pub skip_header: bool,
}

impl Default for SheetRowMapping {
    fn default() -> Self {
        Self {
            qr_prefix: "cl".into(),
            skip_header: true,
        }
    }
}

impl SheetRowMapping {
    /// Map one data row into a record.
    pub fn map_row(&self, row: &[String]) -> Result<LabelRecord> {
        let (id, code) = match row {
            [id, code, ..] => (id.trim(), code.trim()),
            _ => {
                return Err(LabelError::InvalidRecord(format!(
                    "expected at least 2 cells, got {}",
                    row.len()
                )));
            }
        };

        let parts: Vec<&str> = code.split('-').collect();
        let [lot, first, second, tail, ..] = parts.as_slice() else {
            return Err(LabelError::InvalidRecord(format!(
                "code {code:?} has {} dash-separated parts, expected 4",
                parts.len()
            )));
        };

        let mut lot_chars = lot.chars();
        if lot_chars.next().is_none() {
            return Err(LabelError::InvalidRecord(format!(
                "code {code:?} has an empty lot segment"
            )));
        }

        Ok(LabelRecord::new(
            format!("{}{}", self.qr_prefix, id),
            lot_chars.as_str(),
            format!("{first}-{second}"),
            *tail,
        ))
    }

    /// Map a whole sheet, one result per data row, in row order. With
    /// `skip_header` the result at position `i` comes from sheet row `i + 1`.
    pub fn map_rows(&self, rows: &[Vec<String>]) -> Vec<Result<LabelRecord>> {
        let skip = usize::from(self.skip_header && !rows.is_empty());
        rows[skip..].iter().map(|row| self.map_row(row)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn a4_at_72_dpi_is_roughly_a4() {
        let page = PageSize {
            width_px: 595,
            height_px: 842,
            dpi: 72.0,
        };
        let (w, h) = page.dimensions_mm();
        assert!((w - 210.0).abs() < 0.5 && (h - 297.0).abs() < 0.5);
        assert!(page.fits_exactly(595, 842));
        assert!(!page.fits_exactly(842, 595));
    }

    #[test]
    fn record_deserializes_from_string_array() {
        let record: LabelRecord =
            serde_json::from_str(r#"["ABC123", "LOT9", "Item Name", "$42.00"]"#).unwrap();
        assert_eq!(record, LabelRecord::new("ABC123", "LOT9", "Item Name", "$42.00"));
    }

    #[test]
    fn record_serializes_as_string_array() {
        let json = serde_json::to_string(&LabelRecord::new("a", "b", "c", "d")).unwrap();
        assert_eq!(json, r#"["a","b","c","d"]"#);
    }

    #[test]
    fn sheet_row_maps_to_record() {
        let mapping = SheetRowMapping::default();
        let record = mapping.map_row(&row(&["1042", "L17-AB-03-500g"])).unwrap();
        assert_eq!(record, LabelRecord::new("cl1042", "17", "AB-03", "500g"));
    }

    #[test]
    fn extra_dash_segments_are_ignored() {
        let mapping = SheetRowMapping::default();
        let record = mapping.map_row(&row(&["7", "X1-2-3-4-5"])).unwrap();
        assert_eq!(record.bottom_caption, "4");
    }

    #[test]
    fn short_code_is_invalid() {
        let mapping = SheetRowMapping::default();
        let err = mapping.map_row(&row(&["7", "X1-2"])).unwrap_err();
        assert!(matches!(err, LabelError::InvalidRecord(_)));
    }

    #[test]
    fn missing_code_cell_is_invalid() {
        let mapping = SheetRowMapping::default();
        assert!(mapping.map_row(&row(&["7"])).is_err());
    }

    #[test]
    fn empty_lot_segment_is_invalid() {
        let mapping = SheetRowMapping::default();
        assert!(mapping.map_row(&row(&["7", "-a-b-c"])).is_err());
    }

    #[test]
    fn header_row_is_skipped() {
        let mapping = SheetRowMapping::default();
        let rows = vec![
            row(&["id", "code"]),
            row(&["1", "A1-x-y-z"]),
            row(&["2", "bad"]),
        ];
        let mapped = mapping.map_rows(&rows);
        assert_eq!(mapped.len(), 2);
        assert!(mapped[0].is_ok());
        assert!(mapped[1].is_err());
    }

    #[test]
    fn empty_sheet_maps_to_nothing() {
        assert!(SheetRowMapping::default().map_rows(&[]).is_empty());
    }
}
