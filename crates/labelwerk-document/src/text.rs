// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Text measurement and rendering on label canvases using `ab_glyph`.
//
// Both operations share one glyph layout pass (advance widths plus kerning on a
// single baseline); measurement feeds the outlines to a no-op sink so it never
// touches a canvas.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use ab_glyph::{Font, FontArc, GlyphId, OutlinedGlyph, PxScale, ScaleFont, point};
use image::RgbaImage;
use labelwerk_core::error::{LabelError, Result};
use tracing::{debug, info, instrument};

use crate::image::canvas::{INK, blend_over};

/// A parsed outline font, shared read-only by every render call.
///
/// Cloning is cheap and the handle is `Send + Sync`, so one font can serve
/// documents built on several threads.
#[derive(Clone)]
pub struct LabelFont {
    font: FontArc,
    name: Arc<str>,
}

impl fmt::Debug for LabelFont {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LabelFont").field("name", &self.name).finish()
    }
}

impl LabelFont {
    /// Parse a TrueType/OpenType font from raw bytes.
    pub fn from_bytes(name: impl Into<String>, data: Vec<u8>) -> Result<Self> {
        let name: String = name.into();
        let font = FontArc::try_from_vec(data)
            .map_err(|err| LabelError::Font(format!("{name}: {err}")))?;
        if font.units_per_em().is_none() {
            return Err(LabelError::Font(format!("{name}: font has no units-per-em")));
        }
        Ok(Self {
            font,
            name: name.into(),
        })
    }

    /// Load a font file from disk.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let data = std::fs::read(path.as_ref())?;
        let font = Self::from_bytes(path.as_ref().display().to_string(), data)?;
        info!(glyphs = font.font.glyph_count(), "Font loaded");
        Ok(font)
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Measures and draws single-line captions at a fixed print resolution.
#[derive(Debug, Clone)]
pub struct TextRenderer {
    font: LabelFont,
    dpi: f32,
}

impl TextRenderer {
    pub fn new(font: LabelFont, dpi: f32) -> Self {
        Self { font, dpi }
    }

    pub fn font(&self) -> &LabelFont {
        &self.font
    }

    /// Advance width of `text` in pixels at `size_pt`.
    ///
    /// Equivalent to drawing at the origin and reading back where the pen
    /// stopped, without any canvas being written.
    pub fn measure(&self, text: &str, size_pt: f32) -> Result<f32> {
        let scale = self.scale(size_pt, LabelError::Measurement)?;
        Ok(self.layout_line(text, scale, (0.0, 0.0), |_| {}))
    }

    /// Draw `text` in opaque black with its baseline starting at `origin`.
    ///
    /// Glyph coverage is alpha-composited over whatever `target` already
    /// holds; pixels outside the canvas are clipped. Returns the advance width.
    #[instrument(skip(self, text, target), fields(text_len = text.len()))]
    pub fn draw(
        &self,
        text: &str,
        size_pt: f32,
        origin: (i32, i32),
        target: &mut RgbaImage,
    ) -> Result<f32> {
        let scale = self.scale(size_pt, LabelError::Render)?;
        let (width, height) = target.dimensions();
        let advance = self.layout_line(
            text,
            scale,
            (origin.0 as f32, origin.1 as f32),
            |glyph| {
                let bounds = glyph.px_bounds();
                let (left, top) = (bounds.min.x as i32, bounds.min.y as i32);
                glyph.draw(|gx, gy, coverage| {
                    let x = left + gx as i32;
                    let y = top + gy as i32;
                    if x < 0 || y < 0 || x >= width as i32 || y >= height as i32 {
                        return;
                    }
                    blend_over(target.get_pixel_mut(x as u32, y as u32), INK, coverage);
                });
            },
        );
        debug!(x = origin.0, y = origin.1, advance, "Caption drawn");
        Ok(advance)
    }

    /// Pixel scale for a point size. `ab_glyph` scales by line height, so the
    /// em size is converted using the font's own height-to-em ratio.
    fn scale(&self, size_pt: f32, kind: fn(String) -> LabelError) -> Result<PxScale> {
        if !(size_pt.is_finite() && size_pt > 0.0) {
            return Err(kind(format!("font size must be positive, got {size_pt}")));
        }
        let units_per_em = self
            .font
            .font
            .units_per_em()
            .ok_or_else(|| kind(format!("{} has no units-per-em", self.font.name)))?;
        let px_per_em = size_pt * self.dpi / 72.0;
        Ok(PxScale::from(
            px_per_em * self.font.font.height_unscaled() / units_per_em,
        ))
    }

    /// Lay glyphs out along one baseline, handing each outline to `sink`, and
    /// return the final pen advance. Characters without a glyph fall back to
    /// the font's notdef glyph.
    fn layout_line(
        &self,
        text: &str,
        scale: PxScale,
        origin: (f32, f32),
        mut sink: impl FnMut(OutlinedGlyph),
    ) -> f32 {
        let scaled = self.font.font.as_scaled(scale);
        let mut caret = 0.0f32;
        let mut previous: Option<GlyphId> = None;

        for ch in text.chars().filter(|ch| !ch.is_control()) {
            let id = scaled.glyph_id(ch);
            if let Some(prev) = previous {
                caret += scaled.kern(prev, id);
            }
            let glyph = id.with_scale_and_position(scale, point(origin.0 + caret, origin.1));
            caret += scaled.h_advance(id);
            previous = Some(id);

            if let Some(outlined) = self.font.font.outline_glyph(glyph) {
                sink(outlined);
            }
        }

        caret
    }
}
