//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Tile {z}/{x}/{y} is outside {input} bounds")]
    TileOutsideBounds {
        x: u32,
        y: u32,
        z: u8,
        input: String,
    },
    #[error("`tile_buffer` must be a multiple of `0.5` (e.g: 0.5, 1, 1.5, ...), got {0}")]
    InvalidTileBuffer(f64),
    #[error("Invalid band index {0}")]
    InvalidBandIndex(usize),
    #[error("Invalid expression: {0}")]
    Expression(String),
    #[error("Reprojection from EPSG:{from} to EPSG:{to} is not supported by this reader")]
    Reprojection { from: i32, to: i32 },
    #[error("Invalid read window: {0}")]
    Window(String),
    #[error("Raster reader error: {0}")]
    Reader(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
