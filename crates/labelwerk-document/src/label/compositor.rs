// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Label compositor — turns one record into a finished label raster.
//
// Placement is driven purely by the layout and by measured advance widths:
// the QR box is pasted at its origin, the vertical caption covers the left
// quarter, and the two horizontal captions are centered in the gap between
// their anchor and the QR box, then pulled left by `center_offset`.

use image::RgbaImage;
use labelwerk_core::error::Result;
use labelwerk_core::{LabelLayout, LabelRecord, TextAnchor};
use tracing::{debug, instrument};

use super::vertical::RotatedTextBlock;
use crate::image::QrRenderer;
use crate::image::canvas::blank;
use crate::text::{LabelFont, TextRenderer};

/// Composes label rasters for one layout and font.
#[derive(Debug, Clone)]
pub struct LabelCompositor {
    layout: LabelLayout,
    text: TextRenderer,
    qr: QrRenderer,
}

impl LabelCompositor {
    /// Validate `layout` and bind it to `font`.
    pub fn new(layout: LabelLayout, font: LabelFont) -> Result<Self> {
        layout.validate()?;
        let overhang = layout.qr_overhang();
        if overhang != (0, 0) {
            debug!(
                right = overhang.0,
                bottom = overhang.1,
                "QR box is clipped by the canvas edge"
            );
        }
        Ok(Self {
            text: TextRenderer::new(font, layout.dpi),
            layout,
            qr: QrRenderer,
        })
    }

    pub fn layout(&self) -> &LabelLayout {
        &self.layout
    }

    /// Compose the label for `record`.
    ///
    /// Any failure (unencodable payload, text error) aborts only this record.
    #[instrument(skip_all, fields(payload_len = record.qr_payload.len()))]
    pub fn compose(&self, record: &LabelRecord) -> Result<RgbaImage> {
        let layout = &self.layout;
        let mut canvas = blank(layout.width, layout.height);

        let qr = self.qr.render(&record.qr_payload, layout.qr_size)?;
        image::imageops::replace(
            &mut canvas,
            &qr,
            i64::from(layout.qr_x),
            i64::from(layout.qr_y),
        );

        RotatedTextBlock::render(&self.text, layout, &record.vertical_caption)?
            .composite_onto(&mut canvas);

        self.draw_centered(&record.top_caption, &layout.top_text, &mut canvas)?;
        self.draw_centered(&record.bottom_caption, &layout.bottom_text, &mut canvas)?;

        Ok(canvas)
    }

    /// Left edge for a caption of `text_width` pixels so that it sits centered
    /// between `anchor.x` and the QR box, shifted left by `center_offset`.
    ///
    /// Captions wider than the gap get an origin left of the anchor (possibly
    /// negative) and are clipped rather than shrunk.
    pub fn centered_x(&self, anchor: &TextAnchor, text_width: f32) -> i32 {
        let available = self.layout.available_width(anchor.x);
        anchor.x + ((available - text_width) / 2.0) as i32 - self.layout.center_offset
    }

    fn draw_centered(
        &self,
        caption: &str,
        anchor: &TextAnchor,
        canvas: &mut RgbaImage,
    ) -> Result<()> {
        let width = self.text.measure(caption, anchor.size_pt)?;
        let x = self.centered_x(anchor, width);
        debug!(x, y = anchor.y, width, "Centered caption placed");
        self.text.draw(caption, anchor.size_pt, (x, anchor.y), canvas)?;
        Ok(())
    }
}

/// Compose a single label without keeping a compositor around.
pub fn compose(
    record: &LabelRecord,
    layout: &LabelLayout,
    font: &LabelFont,
) -> Result<RgbaImage> {
    LabelCompositor::new(layout.clone(), font.clone())?.compose(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::canvas::{INK, PAPER, blank, count_ink};
    use crate::test_support::font;
    use labelwerk_core::LabelError;

    fn compositor() -> LabelCompositor {
        LabelCompositor::new(LabelLayout::default(), font()).unwrap()
    }

    fn sample() -> LabelRecord {
        LabelRecord::new("ABC123", "LOT9", "Item Name", "$42.00")
    }

    #[test]
    fn label_has_layout_dimensions() {
        let canvas = compositor().compose(&sample()).unwrap();
        assert_eq!(canvas.dimensions(), (886, 295));
    }

    #[test]
    fn sample_label_places_every_element() {
        let canvas = compositor().compose(&sample()).unwrap();

        // QR: version 1 symbol, scale 10, first module at 595 + 45.
        assert_eq!(*canvas.get_pixel(595 + 45, 45), INK);
        assert_eq!(*canvas.get_pixel(595 + 44, 44), PAPER);
        assert!(count_ink(&canvas, 595, 0, 291, 295) > 1000);

        // Vertical caption inside the left quarter.
        assert!(count_ink(&canvas, 0, 0, 221, 295) > 0);

        // Top caption above baseline y=100, bottom caption above y=250.
        assert!(count_ink(&canvas, 221, 40, 374, 62) > 0);
        assert!(count_ink(&canvas, 221, 110, 374, 142) > 0);
    }

    #[test]
    fn composition_is_deterministic() {
        let c = compositor();
        assert_eq!(c.compose(&sample()).unwrap(), c.compose(&sample()).unwrap());
    }

    #[test]
    fn free_function_matches_compositor() {
        let via_fn = compose(&sample(), &LabelLayout::default(), &font()).unwrap();
        assert_eq!(via_fn, compositor().compose(&sample()).unwrap());
    }

    #[test]
    fn caption_is_centered_between_anchor_and_qr() {
        let c = compositor();
        let layout = LabelLayout::default();
        for (caption, anchor) in [("A1", layout.top_text), ("42", layout.bottom_text)] {
            let width = c.text.measure(caption, anchor.size_pt).unwrap();
            assert!(width < layout.available_width(anchor.x));
            let x = c.centered_x(&anchor, width);
            let center = x as f32 + width / 2.0;
            let expected =
                (anchor.x + layout.qr_x as i32) as f32 / 2.0 - layout.center_offset as f32;
            assert!((center - expected).abs() <= 1.0, "{caption}: {center} vs {expected}");
        }
    }

    #[test]
    fn composed_captions_land_at_centered_origin() {
        let c = compositor();
        let layout = LabelLayout::default();
        let record = LabelRecord::new("ABC123", "", "A1", "42");
        let composed = c.compose(&record).unwrap();

        let mut expected = blank(layout.width, layout.height);
        for (caption, anchor) in [("A1", layout.top_text), ("42", layout.bottom_text)] {
            let width = c.text.measure(caption, anchor.size_pt).unwrap();
            let x = c.centered_x(&anchor, width);
            assert_ne!(x, anchor.x);
            c.text
                .draw(caption, anchor.size_pt, (x, anchor.y), &mut expected)
                .unwrap();
        }

        // Between the vertical strip and the QR box only the captions are drawn.
        let (strip_w, _) = layout.vertical_strip_size();
        let mut caption_pixels = 0;
        for y in 0..layout.height {
            for x in strip_w..layout.qr_x {
                assert_eq!(composed.get_pixel(x, y), expected.get_pixel(x, y), "({x}, {y})");
                if *expected.get_pixel(x, y) != PAPER {
                    caption_pixels += 1;
                }
            }
        }
        assert!(caption_pixels > 0);
    }

    #[test]
    fn overflowing_caption_gets_negative_origin() {
        let c = compositor();
        let anchor = LabelLayout::default().bottom_text;
        assert!(c.centered_x(&anchor, 2000.0) < 0);
    }

    #[test]
    fn overflowing_caption_still_composes() {
        let record =
            LabelRecord::new("ABC123", "LOT9", "Item Name", "$4,200,000,000.00 per unit");
        let canvas = compositor().compose(&record).unwrap();
        assert_eq!(canvas.dimensions(), (886, 295));
    }

    #[test]
    fn offset_is_taken_from_layout() {
        let shifted = LabelCompositor::new(
            LabelLayout {
                center_offset: 0,
                ..LabelLayout::default()
            },
            font(),
        )
        .unwrap();
        let anchor = LabelLayout::default().top_text;
        assert_eq!(
            shifted.centered_x(&anchor, 100.0),
            compositor().centered_x(&anchor, 100.0) + 35
        );
    }

    #[test]
    fn unencodable_payload_fails_the_record() {
        let record = LabelRecord::new("Z".repeat(5000), "LOT9", "Item Name", "$42.00");
        let err = compositor().compose(&record).unwrap_err();
        assert!(matches!(err, LabelError::Encoding(_)));
    }

    #[test]
    fn invalid_layout_is_rejected_up_front() {
        let layout = LabelLayout {
            qr_size: 0,
            ..LabelLayout::default()
        };
        let err = LabelCompositor::new(layout, font()).unwrap_err();
        assert!(matches!(err, LabelError::InvalidLayout(_)));
    }

    #[test]
    fn oversized_qr_box_is_a_layout_error() {
        let layout = LabelLayout {
            qr_size: u32::MAX,
            ..LabelLayout::default()
        };
        let err = LabelCompositor::new(layout, font()).unwrap_err();
        assert!(matches!(err, LabelError::InvalidLayout(_)));
    }
}
