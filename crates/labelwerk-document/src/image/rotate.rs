// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Lossless quarter-turn rotation by direct pixel remapping.

use image::RgbaImage;

/// Rotate 90° counter-clockwise.
///
/// Source pixel `(x, y)` lands at `(y, max_x - x)`, so a `W x H` canvas becomes
/// `H x W`. No interpolation: every pixel is copied exactly once.
pub fn rotate_ccw(source: &RgbaImage) -> RgbaImage {
    let (width, height) = source.dimensions();
    RgbaImage::from_fn(height, width, |dx, dy| {
        *source.get_pixel(width - 1 - dy, dx)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    /// Inverse of `rotate_ccw`: `(x, y)` lands at `(max_y - y, x)`.
    fn rotate_cw(source: &RgbaImage) -> RgbaImage {
        let (width, height) = source.dimensions();
        RgbaImage::from_fn(height, width, |dx, dy| {
            *source.get_pixel(dy, height - 1 - dx)
        })
    }

    /// A canvas where every pixel encodes its own coordinates.
    fn coordinate_canvas(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| Rgba([x as u8, y as u8, 7, 255]))
    }

    #[test]
    fn dimensions_swap() {
        let rotated = rotate_ccw(&coordinate_canvas(5, 3));
        assert_eq!(rotated.dimensions(), (3, 5));
    }

    #[test]
    fn pixels_follow_the_remap() {
        let source = coordinate_canvas(5, 3);
        let rotated = rotate_ccw(&source);
        for (x, y, pixel) in source.enumerate_pixels() {
            assert_eq!(rotated.get_pixel(y, 4 - x), pixel, "source ({x}, {y})");
        }
    }

    #[test]
    fn top_right_corner_moves_to_top_left() {
        let mut source = RgbaImage::new(4, 2);
        source.put_pixel(3, 0, Rgba([255, 0, 0, 255]));
        let rotated = rotate_ccw(&source);
        assert_eq!(*rotated.get_pixel(0, 0), Rgba([255, 0, 0, 255]));
    }

    #[test]
    fn matches_image_rotate270() {
        let source = coordinate_canvas(7, 4);
        assert_eq!(rotate_ccw(&source), image::imageops::rotate270(&source));
    }

    #[test]
    fn inverse_remap_restores_every_pixel() {
        let source = coordinate_canvas(6, 9);
        assert_eq!(rotate_cw(&rotate_ccw(&source)), source);
    }

    #[test]
    fn four_quarter_turns_are_identity() {
        let source = coordinate_canvas(8, 3);
        let mut turned = source.clone();
        for _ in 0..4 {
            turned = rotate_ccw(&turned);
        }
        assert_eq!(turned, source);
    }

    #[test]
    fn empty_canvas_rotates_to_empty() {
        let rotated = rotate_ccw(&RgbaImage::new(0, 3));
        assert_eq!(rotated.dimensions(), (3, 0));
    }
}
