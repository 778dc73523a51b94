// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// QR rendering — encodes a payload at error-correction level M and rasterises
// the symbol into a square RGBA canvas of an exact pixel size.

use image::RgbaImage;
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;
use labelwerk_core::error::{LabelError, Result};
use qrcode::{Color, EcLevel, QrCode};
use tracing::{debug, instrument};

use super::canvas::{INK, PAPER};

/// Width of the blank border around the symbol, in modules.
pub const QUIET_ZONE_MODULES: u32 = 4;

/// Renders QR symbols at a fixed error-correction level (M, ~15% recoverable).
#[derive(Debug, Clone, Copy, Default)]
pub struct QrRenderer;

impl QrRenderer {
    const EC_LEVEL: EcLevel = EcLevel::M;

    /// Encode `payload` into a `size_px` x `size_px` canvas.
    ///
    /// Modules are drawn at the largest whole-pixel scale that fits the symbol
    /// plus its quiet zone; leftover pixels are split evenly around it as
    /// white margin.
    #[instrument(skip(self, payload), fields(payload_len = payload.len()))]
    pub fn render(&self, payload: &str, size_px: u32) -> Result<RgbaImage> {
        if payload.is_empty() {
            return Err(LabelError::Encoding("QR payload is empty".into()));
        }
        if size_px == 0 {
            return Err(LabelError::Encoding("QR box size must be positive".into()));
        }

        let code = QrCode::with_error_correction_level(payload.as_bytes(), Self::EC_LEVEL)
            .map_err(|err| {
                LabelError::Encoding(format!(
                    "cannot encode {} bytes at level M: {}",
                    payload.len(),
                    err
                ))
            })?;

        let modules = code.width() as u32;
        let span = modules + 2 * QUIET_ZONE_MODULES;
        let scale = size_px / span;
        if scale == 0 {
            return Err(LabelError::Encoding(format!(
                "{modules}-module symbol does not fit a {size_px}px box"
            )));
        }

        let margin = (size_px - span * scale) / 2 + QUIET_ZONE_MODULES * scale;
        debug!(modules, scale, margin, "QR symbol laid out");

        let mut canvas = RgbaImage::from_pixel(size_px, size_px, PAPER);
        for (i, color) in code.to_colors().into_iter().enumerate() {
            if color != Color::Dark {
                continue;
            }
            let col = i as u32 % modules;
            let row = i as u32 / modules;
            let rect = Rect::at((margin + col * scale) as i32, (margin + row * scale) as i32)
                .of_size(scale, scale);
            draw_filled_rect_mut(&mut canvas, rect, INK);
        }

        Ok(canvas)
    }
}
