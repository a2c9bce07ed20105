//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::error::{Error, Result};
use crate::reader::{
    warp, BandSelection, Cutline, GeoTransform, ImageData, PartRequest, RasterReader, Resampling,
};
use crate::tile::Feature;
use tile_grid::{BoundingBox, Grid};

/// Raster held in memory, sampled with nearest neighbour.
///
/// The dataset must use the CRS of its tiling grid.
#[derive(Clone, Debug)]
pub struct MemoryReader {
    name: String,
    grid: Grid,
    width: usize,
    height: usize,
    transform: GeoTransform,
    bands: Vec<Vec<f64>>,
    nodata: Option<f64>,
    bounds: BoundingBox,
}

impl MemoryReader {
    pub fn new(
        name: &str,
        grid: Grid,
        width: usize,
        height: usize,
        transform: GeoTransform,
        bands: Vec<Vec<f64>>,
    ) -> Result<MemoryReader> {
        if bands.is_empty() {
            return Err(Error::Reader(format!("{}: dataset without bands", name)));
        }
        if let Some(band) = bands.iter().find(|b| b.len() != width * height) {
            return Err(Error::Reader(format!(
                "{}: band has {} values, expected {}x{}",
                name,
                band.len(),
                width,
                height
            )));
        }
        if transform.invert().is_none() {
            return Err(Error::Reader(format!(
                "{}: geotransform is not invertible",
                name
            )));
        }
        let bounds = transform.bounds(width, height);
        Ok(MemoryReader {
            name: name.to_string(),
            grid,
            width,
            height,
            transform,
            bands,
            nodata: None,
            bounds,
        })
    }

    pub fn with_nodata(mut self, nodata: f64) -> MemoryReader {
        self.nodata = Some(nodata);
        self
    }

    pub fn band_count(&self) -> usize {
        self.bands.len()
    }

    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    fn check_srid(&self, srid: i32) -> Result<()> {
        if srid != self.grid.srid {
            return Err(Error::Reprojection {
                from: self.grid.srid,
                to: srid,
            });
        }
        Ok(())
    }
}

impl RasterReader for MemoryReader {
    fn input(&self) -> &str {
        &self.name
    }
    fn tms(&self) -> &Grid {
        &self.grid
    }
    fn bounds(&self) -> &BoundingBox {
        &self.bounds
    }
    fn create_cutline(&self, feature: &Feature, geometry_srid: i32) -> Result<Cutline> {
        self.check_srid(geometry_srid)?;
        Cutline::from_feature(feature, &self.transform)
    }
    fn part(&self, request: &PartRequest) -> Result<ImageData> {
        self.check_srid(request.dst_srid)?;
        if let Some(bounds_srid) = request.bounds_srid {
            self.check_srid(bounds_srid)?;
        }
        if request.options.resampling != Resampling::Nearest {
            debug!(
                "{}: {:?} resampling not supported, using nearest",
                self.name, request.options.resampling
            );
        }
        for option in request.options.passthrough() {
            warn!("{}: ignoring option '{}'", self.name, option);
        }
        let selection = BandSelection::from_request(
            request.indexes.as_deref(),
            request.expression.as_deref(),
            self.bands.len(),
        )?;
        let (width, height) = request.output_size();
        let plan = warp::plan(
            &request.bounds,
            width,
            height,
            &self.transform,
            (self.width, self.height),
            request.options.vrt_options.cutline.as_ref(),
            |_, _| Ok(()),
        )?;
        let nodata = request.options.nodata.or(self.nodata);
        Ok(warp::composite(
            &plan,
            &selection,
            nodata,
            &request.bounds,
            request.dst_srid,
            |band, col, row| self.bands[band - 1][row * self.width + col],
        ))
    }
}
