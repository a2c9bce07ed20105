//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Mapping of output pixels onto a source raster and compositing of the
//! validity mask from raster extent, cutline and nodata.

use crate::error::{Error, Result};
use crate::reader::image::{MASK_INVALID, MASK_VALID};
use crate::reader::{BandSelection, Cutline, GeoTransform, ImageData};
use tile_grid::BoundingBox;

/// Source pixel positions of all output pixels
#[derive(Debug)]
pub struct SamplePlan {
    pub width: u32,
    pub height: u32,
    /// (col, row) in source pixel space, `None` outside the source or the cutline
    pub positions: Vec<Option<(f64, f64)>>,
}

impl SamplePlan {
    /// Source window (col_off, row_off, cols, rows) covering all positions
    pub fn source_window(&self) -> Option<(usize, usize, usize, usize)> {
        let mut window: Option<(f64, f64, f64, f64)> = None;
        for (col, row) in self.positions.iter().flatten() {
            window = Some(match window {
                None => (*col, *row, *col, *row),
                Some((minc, minr, maxc, maxr)) => {
                    (minc.min(*col), minr.min(*row), maxc.max(*col), maxr.max(*row))
                }
            });
        }
        window.map(|(minc, minr, maxc, maxr)| {
            let col_off = minc.floor() as usize;
            let row_off = minr.floor() as usize;
            (
                col_off,
                row_off,
                maxc.floor() as usize - col_off + 1,
                maxr.floor() as usize - row_off + 1,
            )
        })
    }
}

/// Map the centers of a `width` x `height` grid over `bounds` onto the source.
///
/// `to_source_crs` transforms map coordinates in place from the output CRS
/// into the source CRS.
pub fn plan<T>(
    bounds: &BoundingBox,
    width: u32,
    height: u32,
    src_transform: &GeoTransform,
    src_size: (usize, usize),
    cutline: Option<&Cutline>,
    to_source_crs: T,
) -> Result<SamplePlan>
where
    T: FnOnce(&mut [f64], &mut [f64]) -> Result<()>,
{
    if width == 0 || height == 0 {
        return Err(Error::Window(format!(
            "output size {}x{} is empty",
            width, height
        )));
    }
    let dst_transform = GeoTransform::from_bounds(bounds, width, height);
    let src_inverse = src_transform
        .invert()
        .ok_or_else(|| Error::Window("source geotransform is not invertible".to_string()))?;

    let npixels = width as usize * height as usize;
    let mut xs = Vec::with_capacity(npixels);
    let mut ys = Vec::with_capacity(npixels);
    for row in 0..height {
        for col in 0..width {
            let (x, y) = dst_transform.apply(col as f64 + 0.5, row as f64 + 0.5);
            xs.push(x);
            ys.push(y);
        }
    }
    to_source_crs(&mut xs, &mut ys)?;

    let (src_width, src_height) = (src_size.0 as f64, src_size.1 as f64);
    let positions = xs
        .iter()
        .zip(ys.iter())
        .map(|(x, y)| {
            let (col, row) = src_inverse.apply(*x, *y);
            let inside = col >= 0.0 && col < src_width && row >= 0.0 && row < src_height;
            if inside && cutline.map_or(true, |c| c.contains(col, row)) {
                Some((col, row))
            } else {
                None
            }
        })
        .collect();
    Ok(SamplePlan {
        width,
        height,
        positions,
    })
}

/// Sample the selected bands and build the output image.
///
/// `sample(band, col, row)` returns the value of a 1-based source band at a
/// source pixel. A pixel is masked when it has no source position or when all
/// sampled bands equal `nodata`.
pub fn composite<F>(
    plan: &SamplePlan,
    selection: &BandSelection,
    nodata: Option<f64>,
    bounds: &BoundingBox,
    srid: i32,
    mut sample: F,
) -> ImageData
where
    F: FnMut(usize, usize, usize) -> f64,
{
    let npixels = plan.positions.len();
    let source_bands = selection.source_bands();
    let fill = nodata.unwrap_or(0.0);

    let mut mask = vec![MASK_INVALID; npixels];
    let mut values = vec![fill; source_bands.len() * npixels];
    for (i, pos) in plan.positions.iter().enumerate() {
        if let Some((col, row)) = pos {
            let (col, row) = (col.floor() as usize, row.floor() as usize);
            let mut all_nodata = true;
            for (b, band) in source_bands.iter().enumerate() {
                let v = sample(*band, col, row);
                if nodata.map_or(true, |nd| v != nd) {
                    all_nodata = false;
                }
                values[b * npixels + i] = v;
            }
            if !all_nodata || source_bands.is_empty() {
                mask[i] = MASK_VALID;
            }
        }
    }

    let (data, count) = match selection {
        BandSelection::Indexes(_) => (values, source_bands.len()),
        BandSelection::Expression(expr) => {
            let count = expr.len();
            let mut data = vec![fill; count * npixels];
            for i in 0..npixels {
                if mask[i] == MASK_INVALID {
                    continue;
                }
                let results = expr.eval(|band| {
                    let b = source_bands.iter().position(|sb| *sb == band).unwrap_or(0);
                    values[b * npixels + i]
                });
                if results.iter().any(|v| !v.is_finite()) {
                    mask[i] = MASK_INVALID;
                    continue;
                }
                for (b, v) in results.into_iter().enumerate() {
                    data[b * npixels + i] = v;
                }
            }
            (data, count)
        }
    };

    ImageData {
        data,
        mask,
        width: plan.width,
        height: plan.height,
        count,
        bounds: *bounds,
        srid,
        band_names: selection.band_names(),
    }
}
