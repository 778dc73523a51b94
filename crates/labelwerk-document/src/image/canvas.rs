// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Raster canvas primitives shared by the label pipeline.

use image::{Rgba, RgbaImage};

/// Opaque black used for QR modules and glyphs.
pub const INK: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Opaque white label background.
pub const PAPER: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// A fully opaque white canvas.
pub fn blank(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_pixel(width, height, PAPER)
}

/// A fully transparent canvas, used as a scratch layer that is later
/// composited over another canvas.
pub fn transparent(width: u32, height: u32) -> RgbaImage {
    RgbaImage::new(width, height)
}

/// Composite `ink` over `dst` with the given coverage (0.0..=1.0), using
/// non-premultiplied source-over blending.
pub fn blend_over(dst: &mut Rgba<u8>, ink: Rgba<u8>, coverage: f32) {
    let src_a = coverage.clamp(0.0, 1.0) * f32::from(ink[3]) / 255.0;
    if src_a <= 0.0 {
        return;
    }

    let dst_a = f32::from(dst[3]) / 255.0;
    let out_a = src_a + dst_a * (1.0 - src_a);
    let channel = |i: usize| -> u8 {
        let value =
            (f32::from(ink[i]) * src_a + f32::from(dst[i]) * dst_a * (1.0 - src_a)) / out_a;
        value.round().clamp(0.0, 255.0) as u8
    };

    *dst = Rgba([
        channel(0),
        channel(1),
        channel(2),
        (out_a * 255.0).round() as u8,
    ]);
}

/// Count pixels inside the rectangle that are darker than mid-grey and not
/// transparent.
#[cfg(test)]
pub(crate) fn count_ink(canvas: &RgbaImage, x: u32, y: u32, width: u32, height: u32) -> usize {
    let x_end = (x + width).min(canvas.width());
    let y_end = (y + height).min(canvas.height());
    let mut count = 0;
    for py in y.min(y_end)..y_end {
        for px in x.min(x_end)..x_end {
            let Rgba([r, g, b, a]) = *canvas.get_pixel(px, py);
            let luma = (u32::from(r) + u32::from(g) + u32::from(b)) / 3;
            if a >= 128 && luma < 128 {
                count += 1;
            }
        }
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_coverage_paints_ink() {
        let mut px = PAPER;
        blend_over(&mut px, INK, 1.0);
        assert_eq!(px, INK);
    }

    #[test]
    fn zero_coverage_is_a_no_op() {
        let mut px = Rgba([10, 20, 30, 40]);
        blend_over(&mut px, INK, 0.0);
        assert_eq!(px, Rgba([10, 20, 30, 40]));
    }

    #[test]
    fn half_coverage_on_white_is_grey() {
        let mut px = PAPER;
        blend_over(&mut px, INK, 0.5);
        assert_eq!(px, Rgba([128, 128, 128, 255]));
    }

    #[test]
    fn coverage_on_transparent_keeps_ink_color() {
        let mut px = Rgba([0, 0, 0, 0]);
        blend_over(&mut px, INK, 0.25);
        assert_eq!(px[0], 0);
        assert_eq!(px[3], 64);
    }

    #[test]
    fn count_ink_clips_to_canvas() {
        let mut canvas = blank(10, 10);
        canvas.put_pixel(9, 9, INK);
        assert_eq!(count_ink(&canvas, 5, 5, 100, 100), 1);
        assert_eq!(count_ink(&canvas, 20, 20, 5, 5), 0);
    }
}
