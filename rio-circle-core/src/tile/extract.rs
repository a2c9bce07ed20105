//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::error::{Error, Result};
use crate::reader::{ImageData, PartRequest, RasterReader, ReadOptions};
use crate::tile::{circle_vertices, Feature};
use tile_grid::{BoundingBox, Tile};

/// Parameters of a tile read
#[derive(Clone, Debug, PartialEq)]
pub struct TileParams {
    /// Output size in pixels without buffer
    pub tilesize: u32,
    /// 1-based band indexes
    pub indexes: Option<Vec<usize>>,
    /// Band math expression, e.g. `b1/b2+b3`
    pub expression: Option<String>,
    /// Buffer in pixels on each side of the tile, a multiple of 0.5
    pub tile_buffer: Option<f64>,
    pub options: ReadOptions,
}

impl Default for TileParams {
    fn default() -> TileParams {
        TileParams {
            tilesize: 256,
            indexes: None,
            expression: None,
            tile_buffer: None,
            options: ReadOptions::default(),
        }
    }
}

/// Expand tile bounds by `tile_buffer` pixels of the tile resolution on each side.
///
/// Returns the buffered bounds and output size. A buffer of 0.5 adds one
/// pixel in total, 1.0 adds two.
pub fn buffered_bounds(
    bounds: BoundingBox,
    tilesize: u32,
    tile_buffer: Option<f64>,
) -> Result<(BoundingBox, u32)> {
    if tilesize == 0 {
        return Err(Error::Window("tilesize must be positive".to_string()));
    }
    let tile_buffer = match tile_buffer {
        Some(tile_buffer) => tile_buffer,
        None => return Ok((bounds, tilesize)),
    };
    if !tile_buffer.is_finite() || tile_buffer < 0.0 || tile_buffer % 0.5 != 0.0 {
        return Err(Error::InvalidTileBuffer(tile_buffer));
    }
    let x_res = bounds.width() / tilesize as f64;
    let y_res = bounds.height() / tilesize as f64;
    let buffered = bounds.expand(x_res * tile_buffer, y_res * tile_buffer);
    let size = Some(tile_buffer * 2.0)
        .filter(|pixels| *pixels <= std::u32::MAX as f64)
        .and_then(|pixels| tilesize.checked_add(pixels as u32))
        .ok_or_else(|| {
            Error::Window(format!(
                "tilesize {} with a buffer of {} pixels exceeds the maximum output size",
                tilesize, tile_buffer
            ))
        })?;
    Ok((buffered, size))
}

/// Read the XYZ tile `z/x/y` cropped to the circle inscribed in its
/// (buffered) bounds. Pixels outside the circle are masked.
pub fn circular_tile<R: RasterReader + ?Sized>(
    reader: &R,
    tile_x: u32,
    tile_y: u32,
    tile_z: u8,
    params: &TileParams,
) -> Result<ImageData> {
    let outside = || Error::TileOutsideBounds {
        x: tile_x,
        y: tile_y,
        z: tile_z,
        input: reader.input().to_string(),
    };
    if !reader.tile_exists(tile_x, tile_y, tile_z) {
        return Err(outside());
    }

    let tms = reader.tms();
    let tile_bounds = tms
        .checked_xy_bounds(&Tile::new(tile_x, tile_y, tile_z))
        .ok_or_else(outside)?;
    let (tile_bounds, tilesize) =
        buffered_bounds(tile_bounds, params.tilesize, params.tile_buffer)?;

    let feature = Feature::polygon(circle_vertices(&tile_bounds));
    let cutline = reader.create_cutline(&feature, tms.srid)?;

    let mut options = params.options.clone();
    options.vrt_options.cutline = Some(cutline);

    debug!(
        "{}: circular tile {}/{}/{} {}x{} bounds {:?}",
        reader.input(),
        tile_z,
        tile_x,
        tile_y,
        tilesize,
        tilesize,
        tile_bounds
    );
    reader.part(&PartRequest {
        bounds: tile_bounds,
        dst_srid: tms.srid,
        bounds_srid: None,
        height: tilesize,
        width: tilesize,
        max_size: None,
        indexes: params.indexes.clone(),
        expression: params.expression.clone(),
        options,
    })
}

/// Circular tile reads for any raster reader
pub trait CircularTile {
    fn circular_tile(
        &self,
        tile_x: u32,
        tile_y: u32,
        tile_z: u8,
        params: &TileParams,
    ) -> Result<ImageData>;
}

impl<R: RasterReader + ?Sized> CircularTile for R {
    fn circular_tile(
        &self,
        tile_x: u32,
        tile_y: u32,
        tile_z: u8,
        params: &TileParams,
    ) -> Result<ImageData> {
        circular_tile(self, tile_x, tile_y, tile_z, params)
    }
}
