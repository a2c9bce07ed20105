//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Raster reader capability and the request types shared by all backends.

mod cutline;
pub mod expression;
mod image;
mod memory;
pub mod warp;

#[cfg(test)]
mod memory_test;

pub use self::cutline::Cutline;
pub use self::expression::Expression;
pub use self::image::{GeoTransform, ImageData, MASK_INVALID, MASK_VALID};
pub use self::memory::MemoryReader;

use crate::error::{Error, Result};
use crate::tile::Feature;
use std::collections::BTreeMap;
use std::str::FromStr;
use tile_grid::{BoundingBox, Grid, Tile};

/// Resampling method used when the source has to be decimated
#[derive(Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Resampling {
    Nearest,
    Bilinear,
    Cubic,
    CubicSpline,
    Lanczos,
    Average,
    Mode,
}

impl Default for Resampling {
    fn default() -> Resampling {
        Resampling::Nearest
    }
}

impl FromStr for Resampling {
    type Err = Error;

    fn from_str(s: &str) -> Result<Resampling> {
        match s.to_lowercase().as_str() {
            "nearest" => Ok(Resampling::Nearest),
            "bilinear" => Ok(Resampling::Bilinear),
            "cubic" => Ok(Resampling::Cubic),
            "cubicspline" => Ok(Resampling::CubicSpline),
            "lanczos" => Ok(Resampling::Lanczos),
            "average" => Ok(Resampling::Average),
            "mode" => Ok(Resampling::Mode),
            _ => Err(Error::Config(format!("Unknown resampling method '{}'", s))),
        }
    }
}

/// Options of the virtual raster a window is read through
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VrtOptions {
    /// Mask geometry in source pixel space
    pub cutline: Option<Cutline>,
    /// Further backend specific options, passed through untouched
    pub other: BTreeMap<String, String>,
}

/// Reader configuration forwarded with every window read
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReadOptions {
    pub resampling: Resampling,
    /// Overrides the nodata value of the dataset
    pub nodata: Option<f64>,
    pub vrt_options: VrtOptions,
    /// Backend specific options
    pub extra: BTreeMap<String, String>,
}

impl ReadOptions {
    /// Pass-through options of `vrt_options.other` and `extra` as `section.key=value`.
    /// Readers without VRT or driver options log them as not applied.
    pub fn passthrough(&self) -> Vec<String> {
        self.vrt_options
            .other
            .iter()
            .map(|(k, v)| format!("vrt_options.{}={}", k, v))
            .chain(self.extra.iter().map(|(k, v)| format!("extra.{}={}", k, v)))
            .collect()
    }
}

/// Read of an arbitrary window
#[derive(Clone, Debug, PartialEq)]
pub struct PartRequest {
    pub bounds: BoundingBox,
    /// CRS of the output image
    pub dst_srid: i32,
    /// CRS of `bounds`. `None`: bounds are given in `dst_srid`
    pub bounds_srid: Option<i32>,
    pub height: u32,
    pub width: u32,
    /// Limit of the larger output side
    pub max_size: Option<u32>,
    /// 1-based band indexes
    pub indexes: Option<Vec<usize>>,
    pub expression: Option<String>,
    pub options: ReadOptions,
}

impl PartRequest {
    /// Output (width, height) after applying `max_size`
    pub fn output_size(&self) -> (u32, u32) {
        match self.max_size {
            Some(max_size) if self.width.max(self.height) > max_size => {
                let ratio = self.height as f64 / self.width as f64;
                if ratio > 1.0 {
                    (((max_size as f64 / ratio).ceil() as u32).max(1), max_size)
                } else {
                    (max_size, ((max_size as f64 * ratio).ceil() as u32).max(1))
                }
            }
            _ => (self.width, self.height),
        }
    }
}

/// Output bands of a read
#[derive(Clone, Debug, PartialEq)]
pub enum BandSelection {
    Indexes(Vec<usize>),
    Expression(Expression),
}

impl BandSelection {
    /// Resolve the requested bands against a dataset with `band_count` bands.
    /// An expression takes precedence over indexes.
    pub fn from_request(
        indexes: Option<&[usize]>,
        expression: Option<&str>,
        band_count: usize,
    ) -> Result<BandSelection> {
        let selection = match (expression, indexes) {
            (Some(expr), idx) => {
                if idx.is_some() {
                    debug!("Band indexes ignored in favor of expression '{}'", expr);
                }
                BandSelection::Expression(Expression::parse(expr)?)
            }
            (None, Some(idx)) => BandSelection::Indexes(idx.to_vec()),
            (None, None) => BandSelection::Indexes((1..=band_count).collect()),
        };
        for band in selection.source_bands() {
            if band == 0 || band > band_count {
                return Err(Error::InvalidBandIndex(band));
            }
        }
        Ok(selection)
    }
    /// Dataset bands which have to be read
    pub fn source_bands(&self) -> Vec<usize> {
        match self {
            BandSelection::Indexes(idx) => idx.clone(),
            BandSelection::Expression(expr) => expr.bands(),
        }
    }
    /// Names of the output bands
    pub fn band_names(&self) -> Vec<String> {
        match self {
            BandSelection::Indexes(idx) => idx.iter().map(|b| format!("b{}", b)).collect(),
            BandSelection::Expression(expr) => expr.names(),
        }
    }
}

/// Capabilities of a raster dataset needed to serve tiles from it
pub trait RasterReader {
    /// Dataset label used in messages
    fn input(&self) -> &str;
    /// Tiling scheme of the reader
    fn tms(&self) -> &Grid;
    /// Dataset extent in the CRS of the tiling scheme
    fn bounds(&self) -> &BoundingBox;
    /// True if the XYZ tile intersects the dataset
    fn tile_exists(&self, x: u32, y: u32, z: u8) -> bool {
        self.tms().covers(self.bounds(), &Tile::new(x, y, z))
    }
    /// Mask of a polygon feature given in `geometry_srid`
    fn create_cutline(&self, feature: &Feature, geometry_srid: i32) -> Result<Cutline>;
    /// Read an arbitrary window
    fn part(&self, request: &PartRequest) -> Result<ImageData>;
}
