// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Label layout and generator configuration.
//
// All coordinates are device pixels at `dpi`; font sizes are points. The default
// design is a 75mm x 25mm label at 300 DPI.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{LabelError, Result};
use crate::types::PageSize;

/// How far the QR box may reach past the right or bottom canvas edge. The
/// clipped strip falls inside the symbol's quiet zone for any sensible box.
pub const MAX_QR_OVERHANG_PX: u32 = 16;

/// A pixel position inside a canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Anchor {
    pub x: i32,
    pub y: i32,
}

impl Anchor {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Where a caption starts and how large it is drawn.
///
/// `y` is the text baseline, not the top of the glyph box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextAnchor {
    pub x: i32,
    pub y: i32,
    /// Font size in points, converted to pixels at the layout DPI.
    pub size_pt: f32,
}

impl TextAnchor {
    pub const fn new(x: i32, y: i32, size_pt: f32) -> Self {
        Self { x, y, size_pt }
    }
}

/// Geometric description of one label design.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelLayout {
    /// Print resolution the pixel values are expressed in.
    pub dpi: f32,
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Top-left corner of the QR box.
    pub qr_x: u32,
    pub qr_y: u32,
    /// Side length of the (square) QR box.
    pub qr_size: u32,
    /// Nominal anchor of the vertical caption on the finished label.
    pub vertical_text: TextAnchor,
    /// Baseline start of the vertical caption inside the unrotated strip.
    pub vertical_strip_anchor: Anchor,
    pub top_text: TextAnchor,
    pub bottom_text: TextAnchor,
    /// Leftward shift applied to both centered captions, in pixels.
    pub center_offset: i32,
}

impl Default for LabelLayout {
    fn default() -> Self {
        Self {
            dpi: 300.0,
            width: 886,
            height: 295,
            qr_x: 595,
            qr_y: 0,
            qr_size: 300,
            vertical_text: TextAnchor::new(30, 265, 10.0),
            vertical_strip_anchor: Anchor::new(60, 89),
            top_text: TextAnchor::new(305, 100, 16.0),
            bottom_text: TextAnchor::new(275, 250, 42.0),
            center_offset: 35,
        }
    }
}

impl LabelLayout {
    /// Parse a layout from JSON and validate it. Missing fields fall back to
    /// the default design.
    pub fn from_json(json: &str) -> Result<Self> {
        let layout: Self = serde_json::from_str(json)?;
        layout.validate()?;
        Ok(layout)
    }

    /// Read, parse, and validate a JSON layout file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&json)
    }

    /// Check every geometric invariant of the layout.
    ///
    /// The QR box must start inside the canvas and may reach at most
    /// [`MAX_QR_OVERHANG_PX`] past the right or bottom edge; that part is
    /// clipped when the label is composed (the default design overhangs by a
    /// few pixels into the symbol's quiet zone).
    pub fn validate(&self) -> Result<()> {
        if !(self.dpi.is_finite() && self.dpi > 0.0) {
            return Err(invalid(format!("dpi must be positive, got {}", self.dpi)));
        }
        if self.width == 0 || self.height == 0 {
            return Err(invalid(format!(
                "canvas must not be empty, got {}x{}",
                self.width, self.height
            )));
        }
        if self.qr_size == 0 {
            return Err(invalid("QR box side must be positive".into()));
        }
        if self.qr_x >= self.width || self.qr_y >= self.height {
            return Err(invalid(format!(
                "QR box origin ({}, {}) lies outside the {}x{} canvas",
                self.qr_x, self.qr_y, self.width, self.height
            )));
        }
        let (Some(qr_right), Some(qr_bottom)) = (
            self.qr_x.checked_add(self.qr_size),
            self.qr_y.checked_add(self.qr_size),
        ) else {
            return Err(invalid(format!(
                "QR box side {} overflows the pixel range",
                self.qr_size
            )));
        };
        let limit_w = self.width.saturating_add(MAX_QR_OVERHANG_PX);
        let limit_h = self.height.saturating_add(MAX_QR_OVERHANG_PX);
        if qr_right > limit_w || qr_bottom > limit_h {
            return Err(invalid(format!(
                "QR box at ({}, {}) with side {} reaches more than {}px past the {}x{} canvas",
                self.qr_x, self.qr_y, self.qr_size, MAX_QR_OVERHANG_PX, self.width, self.height
            )));
        }

        self.check_text("vertical caption", &self.vertical_text)?;
        self.check_text("top caption", &self.top_text)?;
        self.check_text("bottom caption", &self.bottom_text)?;

        let (strip_w, strip_h) = self.vertical_strip_size();
        if strip_h == 0 {
            return Err(invalid("canvas too narrow for the vertical caption strip".into()));
        }
        let strip = self.vertical_strip_anchor;
        if strip.x < 0 || strip.y < 0 || strip.x as u32 >= strip_w || strip.y as u32 >= strip_h {
            return Err(invalid(format!(
                "vertical strip anchor ({}, {}) lies outside the {}x{} strip",
                strip.x, strip.y, strip_w, strip_h
            )));
        }

        for (name, anchor) in [("top", &self.top_text), ("bottom", &self.bottom_text)] {
            if anchor.x as u32 >= self.qr_x {
                return Err(invalid(format!(
                    "{name} caption starts at x={} which leaves no room before the QR box at x={}",
                    anchor.x, self.qr_x
                )));
            }
        }

        Ok(())
    }

    fn check_text(&self, name: &str, anchor: &TextAnchor) -> Result<()> {
        if anchor.x < 0 || anchor.y < 0 {
            return Err(invalid(format!(
                "{name} anchor ({}, {}) is negative",
                anchor.x, anchor.y
            )));
        }
        if anchor.x as u32 >= self.width || anchor.y as u32 >= self.height {
            return Err(invalid(format!(
                "{name} anchor ({}, {}) lies outside the {}x{} canvas",
                anchor.x, anchor.y, self.width, self.height
            )));
        }
        if !(anchor.size_pt.is_finite() && anchor.size_pt > 0.0) {
            return Err(invalid(format!(
                "{name} font size must be positive, got {}",
                anchor.size_pt
            )));
        }
        Ok(())
    }

    /// Size of the unrotated vertical caption strip: the canvas height by a
    /// quarter of the canvas width.
    pub fn vertical_strip_size(&self) -> (u32, u32) {
        (self.height, self.width / 4)
    }

    /// Pixels of the QR box that fall past the right and bottom canvas edges.
    pub fn qr_overhang(&self) -> (u32, u32) {
        (
            self.qr_x.saturating_add(self.qr_size).saturating_sub(self.width),
            self.qr_y.saturating_add(self.qr_size).saturating_sub(self.height),
        )
    }

    /// Horizontal room a centered caption starting at `x` has before the QR box.
    pub fn available_width(&self, x: i32) -> f32 {
        (self.qr_x as i32 - x) as f32
    }

    /// Convert a point size to pixels per em at the layout DPI.
    pub fn pt_to_px(&self, size_pt: f32) -> f32 {
        size_pt * self.dpi / 72.0
    }

    /// The page one finished label fills exactly.
    pub fn page_size(&self) -> PageSize {
        PageSize {
            width_px: self.width,
            height_px: self.height,
            dpi: self.dpi,
        }
    }
}

fn invalid(detail: String) -> LabelError {
    LabelError::InvalidLayout(detail)
}

/// Settings for one document generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub layout: LabelLayout,
    /// Title embedded in the PDF /Info dictionary.
    pub title: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            layout: LabelLayout::default(),
            title: "Labels".into(),
        }
    }
}

impl GeneratorConfig {
    /// Read a JSON generator config and validate its layout.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&json)?;
        config.layout.validate()?;
        Ok(config)
    }
}
