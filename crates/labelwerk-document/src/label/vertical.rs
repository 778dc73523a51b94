// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Vertical caption — drawn horizontally into a transparent strip, then turned
// a quarter counter-clockwise so it reads bottom-to-top along the left edge.

use image::RgbaImage;
use labelwerk_core::LabelLayout;
use labelwerk_core::error::Result;
use tracing::debug;

use crate::image::canvas::transparent;
use crate::image::rotate::rotate_ccw;
use crate::text::TextRenderer;

/// A rotated caption ready to be laid over the label's left edge.
#[derive(Debug, Clone)]
pub struct RotatedTextBlock {
    canvas: RgbaImage,
}

impl RotatedTextBlock {
    /// Render `caption` into a `height x width/4` strip at the layout's strip
    /// anchor and rotate it into a `width/4 x height` block.
    pub fn render(text: &TextRenderer, layout: &LabelLayout, caption: &str) -> Result<Self> {
        let (strip_w, strip_h) = layout.vertical_strip_size();
        let mut strip = transparent(strip_w, strip_h);
        let anchor = layout.vertical_strip_anchor;

        let advance = text.draw(
            caption,
            layout.vertical_text.size_pt,
            (anchor.x, anchor.y),
            &mut strip,
        )?;
        debug!(strip_w, strip_h, advance, "Vertical caption strip drawn");

        Ok(Self {
            canvas: rotate_ccw(&strip),
        })
    }

    pub fn canvas(&self) -> &RgbaImage {
        &self.canvas
    }

    /// Alpha-composite the block onto `target` with its top-left at the origin.
    pub fn composite_onto(&self, target: &mut RgbaImage) {
        image::imageops::overlay(target, &self.canvas, 0, 0);
    }
}
