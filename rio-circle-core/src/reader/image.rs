//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use tile_grid::BoundingBox;

/// Affine pixel to map transformation in GDAL order:
/// `x = t[0] + col*t[1] + row*t[2]`, `y = t[3] + col*t[4] + row*t[5]`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoTransform(pub [f64; 6]);

impl GeoTransform {
    /// North-up transform of `bounds` covering `width` x `height` pixels
    pub fn from_bounds(bounds: &BoundingBox, width: u32, height: u32) -> GeoTransform {
        GeoTransform([
            bounds.left,
            bounds.width() / width as f64,
            0.0,
            bounds.top,
            0.0,
            -bounds.height() / height as f64,
        ])
    }

    pub fn apply(&self, col: f64, row: f64) -> (f64, f64) {
        let t = &self.0;
        (
            t[0] + col * t[1] + row * t[2],
            t[3] + col * t[4] + row * t[5],
        )
    }

    /// Map to pixel transform
    pub fn invert(&self) -> Option<GeoTransform> {
        let t = &self.0;
        let det = t[1] * t[5] - t[2] * t[4];
        if det == 0.0 || !det.is_finite() {
            return None;
        }
        Some(GeoTransform([
            (t[2] * t[3] - t[0] * t[5]) / det,
            t[5] / det,
            -t[2] / det,
            (t[0] * t[4] - t[1] * t[3]) / det,
            -t[4] / det,
            t[1] / det,
        ]))
    }

    /// Map bounds of a `width` x `height` raster
    pub fn bounds(&self, width: usize, height: usize) -> BoundingBox {
        let corners = [
            self.apply(0.0, 0.0),
            self.apply(width as f64, 0.0),
            self.apply(0.0, height as f64),
            self.apply(width as f64, height as f64),
        ];
        let mut bbox = BoundingBox::new(
            std::f64::INFINITY,
            std::f64::INFINITY,
            std::f64::NEG_INFINITY,
            std::f64::NEG_INFINITY,
        );
        for (x, y) in corners.iter() {
            bbox.left = bbox.left.min(*x);
            bbox.bottom = bbox.bottom.min(*y);
            bbox.right = bbox.right.max(*x);
            bbox.top = bbox.top.max(*y);
        }
        bbox
    }
}

pub const MASK_VALID: u8 = 255;
pub const MASK_INVALID: u8 = 0;

/// Result of a window read: pixel data, validity mask and spatial info
#[derive(Clone, Debug, PartialEq)]
pub struct ImageData {
    /// Band-major pixel values
    pub data: Vec<f64>,
    /// One entry per pixel, 255 valid, 0 masked
    pub mask: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub count: usize,
    pub bounds: BoundingBox,
    pub srid: i32,
    pub band_names: Vec<String>,
}

impl ImageData {
    fn pixel_index(&self, col: u32, row: u32) -> usize {
        row as usize * self.width as usize + col as usize
    }
    /// Values of a band, 0-based
    pub fn band(&self, band: usize) -> &[f64] {
        let len = self.width as usize * self.height as usize;
        &self.data[band * len..(band + 1) * len]
    }
    pub fn value(&self, band: usize, col: u32, row: u32) -> f64 {
        self.band(band)[self.pixel_index(col, row)]
    }
    pub fn is_valid(&self, col: u32, row: u32) -> bool {
        self.mask[self.pixel_index(col, row)] == MASK_VALID
    }
    pub fn valid_count(&self) -> usize {
        self.mask.iter().filter(|m| **m == MASK_VALID).count()
    }
    pub fn transform(&self) -> GeoTransform {
        GeoTransform::from_bounds(&self.bounds, self.width, self.height)
    }
}
