//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use gdal::errors::GdalError;
use gdal::raster::{Buffer, ResampleAlg};
use gdal::spatial_ref::{CoordTransform, SpatialRef};
use gdal::{Dataset, Driver};
use rio_circle_core::reader::{
    warp, BandSelection, Cutline, GeoTransform, ImageData, PartRequest, RasterReader, Resampling,
    MASK_VALID,
};
use rio_circle_core::tile::Feature;
use rio_circle_core::{Error, Result};
use std::collections::BTreeMap;
use std::path::Path;
use tile_grid::{BoundingBox, Grid};

/// Number of points per edge used for reprojecting an extent
const EDGE_DENSITY: usize = 21;

fn gdal_err(err: GdalError) -> Error {
    Error::Reader(err.to_string())
}

/// Spatial reference with x/y (lon/lat) axis order
fn epsg_srs(srid: i32) -> Result<SpatialRef> {
    let srs = SpatialRef::from_epsg(srid as u32).map_err(gdal_err)?;
    srs.set_axis_mapping_strategy(gdal_sys::OSRAxisMappingStrategy::OAMS_TRADITIONAL_GIS_ORDER);
    Ok(srs)
}

/// Transform coordinates in place. Points which can't be transformed are set to NaN.
fn transform_coords(from: &SpatialRef, to: &SpatialRef, xs: &mut [f64], ys: &mut [f64]) -> Result<()> {
    let transform = CoordTransform::new(from, to).map_err(gdal_err)?;
    let mut zs = vec![0.0; xs.len()];
    let (xs_orig, ys_orig) = (xs.to_vec(), ys.to_vec());
    if transform.transform_coords(xs, ys, &mut zs).is_ok() {
        return Ok(());
    }
    // Retry point by point, e.g. for points beyond the validity of the target CRS
    for i in 0..xs.len() {
        let mut x = [xs_orig[i]];
        let mut y = [ys_orig[i]];
        let mut z = [0.0];
        match transform.transform_coords(&mut x, &mut y, &mut z) {
            Ok(_) => {
                xs[i] = x[0];
                ys[i] = y[0];
            }
            Err(_) => {
                xs[i] = std::f64::NAN;
                ys[i] = std::f64::NAN;
            }
        }
    }
    Ok(())
}

fn resample_alg(resampling: Resampling) -> ResampleAlg {
    match resampling {
        Resampling::Nearest => ResampleAlg::NearestNeighbour,
        Resampling::Bilinear => ResampleAlg::Bilinear,
        Resampling::Cubic => ResampleAlg::Cubic,
        Resampling::CubicSpline => ResampleAlg::CubicSpline,
        Resampling::Lanczos => ResampleAlg::Lanczos,
        Resampling::Average => ResampleAlg::Average,
        Resampling::Mode => ResampleAlg::Mode,
    }
}

/// GDAL raster dataset served on a tiling grid
pub struct GdalReader {
    name: String,
    dataset: Dataset,
    grid: Grid,
    srs: SpatialRef,
    srid: Option<i32>,
    transform: GeoTransform,
    size: (usize, usize),
    band_count: usize,
    nodata: Option<f64>,
    bounds: BoundingBox,
}

impl GdalReader {
    pub fn open(path: &str, grid: Grid) -> Result<GdalReader> {
        let dataset = Dataset::open(Path::new(path)).map_err(gdal_err)?;
        GdalReader::from_dataset(path, dataset, grid)
    }

    pub fn from_dataset(name: &str, dataset: Dataset, grid: Grid) -> Result<GdalReader> {
        let transform = GeoTransform(dataset.geo_transform().map_err(gdal_err)?);
        if transform.invert().is_none() {
            return Err(Error::Reader(format!(
                "{}: geotransform is not invertible",
                name
            )));
        }
        let band_count = dataset.raster_count() as usize;
        if band_count == 0 {
            return Err(Error::Reader(format!("{}: dataset without bands", name)));
        }
        let size = dataset.raster_size();
        let srs = dataset.spatial_ref().map_err(gdal_err)?;
        srs.set_axis_mapping_strategy(
            gdal_sys::OSRAxisMappingStrategy::OAMS_TRADITIONAL_GIS_ORDER,
        );
        let srid = srs.auth_code().ok();
        let nodata = dataset.rasterband(1).map_err(gdal_err)?.no_data_value();

        let native = transform.bounds(size.0, size.1);
        let bounds = if srid == Some(grid.srid) {
            native
        } else {
            let grid_srs = epsg_srs(grid.srid)?;
            reproject_bounds(&native, &srs, &grid_srs)?
        };
        info!(
            "{}: {}x{} pixels, {} band(s), EPSG:{}",
            name,
            size.0,
            size.1,
            band_count,
            srid.map_or("?".to_string(), |s| s.to_string())
        );
        debug!("{}: bounds in EPSG:{}: {:?}", name, grid.srid, bounds);
        Ok(GdalReader {
            name: name.to_string(),
            dataset,
            grid,
            srs,
            srid,
            transform,
            size,
            band_count,
            nodata,
            bounds,
        })
    }

    /// Label used in messages
    pub fn with_name(mut self, name: &str) -> GdalReader {
        self.name = name.to_string();
        self
    }

    pub fn band_count(&self) -> usize {
        self.band_count
    }

    pub fn size(&self) -> (usize, usize) {
        self.size
    }

    pub fn nodata(&self) -> Option<f64> {
        self.nodata
    }

    /// Transform coordinates given in `srid` into the dataset CRS
    fn to_dataset_crs(&self, srid: i32, xs: &mut [f64], ys: &mut [f64]) -> Result<()> {
        if self.srid == Some(srid) {
            return Ok(());
        }
        transform_coords(&epsg_srs(srid)?, &self.srs, xs, ys)
    }
}

/// Extent of a densified boundary after reprojection
fn reproject_bounds(bounds: &BoundingBox, from: &SpatialRef, to: &SpatialRef) -> Result<BoundingBox> {
    let mut xs = Vec::with_capacity(EDGE_DENSITY * 4);
    let mut ys = Vec::with_capacity(EDGE_DENSITY * 4);
    for i in 0..EDGE_DENSITY {
        let f = i as f64 / (EDGE_DENSITY - 1) as f64;
        let x = bounds.left + f * bounds.width();
        let y = bounds.bottom + f * bounds.height();
        xs.extend_from_slice(&[x, x, bounds.left, bounds.right]);
        ys.extend_from_slice(&[bounds.bottom, bounds.top, y, y]);
    }
    transform_coords(from, to, &mut xs, &mut ys)?;
    let mut extent: Option<BoundingBox> = None;
    for (x, y) in xs.iter().zip(ys.iter()).filter(|(x, y)| x.is_finite() && y.is_finite()) {
        extent = Some(match extent {
            None => BoundingBox::new(*x, *y, *x, *y),
            Some(e) => BoundingBox::new(e.left.min(*x), e.bottom.min(*y), e.right.max(*x), e.top.max(*y)),
        });
    }
    extent.ok_or_else(|| Error::Reader("extent can't be reprojected".to_string()))
}

impl RasterReader for GdalReader {
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
        if self.srid == Some(geometry_srid) {
            return Cutline::from_feature(feature, &self.transform);
        }
        let ring = feature.exterior();
        let mut xs: Vec<f64> = ring.iter().map(|c| c[0]).collect();
        let mut ys: Vec<f64> = ring.iter().map(|c| c[1]).collect();
        self.to_dataset_crs(geometry_srid, &mut xs, &mut ys)?;
        let ring = xs.into_iter().zip(ys).map(|(x, y)| [x, y]).collect();
        Cutline::from_feature(&Feature::polygon(ring), &self.transform)
    }
    fn part(&self, request: &PartRequest) -> Result<ImageData> {
        let selection = BandSelection::from_request(
            request.indexes.as_deref(),
            request.expression.as_deref(),
            self.band_count,
        )?;
        for option in request.options.passthrough() {
            debug!("{}: option '{}' not applied", self.name, option);
        }
        let bounds = match request.bounds_srid {
            Some(srid) if srid != request.dst_srid => {
                reproject_bounds(&request.bounds, &epsg_srs(srid)?, &epsg_srs(request.dst_srid)?)?
            }
            _ => request.bounds,
        };
        let (width, height) = request.output_size();
        let plan = warp::plan(
            &bounds,
            width,
            height,
            &self.transform,
            self.size,
            request.options.vrt_options.cutline.as_ref(),
            |xs, ys| self.to_dataset_crs(request.dst_srid, xs, ys),
        )?;

        // Read the source window covering all sample positions
        let mut bands = BTreeMap::new();
        let window = plan.source_window();
        let mut read_size = (1, 1);
        let mut scale = (1.0, 1.0);
        if let Some((col_off, row_off, cols, rows)) = window {
            read_size = (
                cols.min(width as usize).max(1),
                rows.min(height as usize).max(1),
            );
            scale = (
                read_size.0 as f64 / cols as f64,
                read_size.1 as f64 / rows as f64,
            );
            let resampling = if read_size != (cols, rows) {
                Some(resample_alg(request.options.resampling))
            } else {
                None
            };
            debug!(
                "{}: reading window {}x{}+{}+{} as {}x{}",
                self.name, cols, rows, col_off, row_off, read_size.0, read_size.1
            );
            for band in selection.source_bands() {
                if bands.contains_key(&band) {
                    continue;
                }
                let rasterband = self.dataset.rasterband(band as isize).map_err(gdal_err)?;
                let buffer = rasterband
                    .read_as::<f64>(
                        (col_off as isize, row_off as isize),
                        (cols, rows),
                        read_size,
                        resampling,
                    )
                    .map_err(gdal_err)?;
                bands.insert(band, buffer.data);
            }
        }

        let nodata = request.options.nodata.or(self.nodata);
        let (col_off, row_off) = window.map_or((0, 0), |w| (w.0, w.1));
        Ok(warp::composite(
            &plan,
            &selection,
            nodata,
            &bounds,
            request.dst_srid,
            |band, col, row| {
                let c = ((col.saturating_sub(col_off) as f64 * scale.0) as usize).min(read_size.0 - 1);
                let r = ((row.saturating_sub(row_off) as f64 * scale.1) as usize).min(read_size.1 - 1);
                bands
                    .get(&band)
                    .map_or(std::f64::NAN, |data| data[r * read_size.0 + c])
            },
        ))
    }
}

/// Write an image as GeoTIFF with masked pixels set to `nodata` (Default: 0)
pub fn write_geotiff(img: &ImageData, path: &str, nodata: Option<f64>) -> Result<()> {
    let driver = Driver::get("GTiff").map_err(gdal_err)?;
    let mut dataset = driver
        .create_with_band_type::<f64>(
            path,
            img.width as isize,
            img.height as isize,
            img.count as isize,
        )
        .map_err(gdal_err)?;
    dataset
        .set_geo_transform(&img.transform().0)
        .map_err(gdal_err)?;
    dataset
        .set_spatial_ref(&epsg_srs(img.srid)?)
        .map_err(gdal_err)?;
    let fill = nodata.unwrap_or(0.0);
    let size = (img.width as usize, img.height as usize);
    for b in 0..img.count {
        let data = img
            .band(b)
            .iter()
            .zip(img.mask.iter())
            .map(|(v, m)| if *m == MASK_VALID { *v } else { fill })
            .collect();
        let band = dataset.rasterband(b as isize + 1).map_err(gdal_err)?;
        band.set_no_data_value(fill).map_err(gdal_err)?;
        band.write((0, 0), size, &Buffer::new(size, data))
            .map_err(gdal_err)?;
    }
    info!("{}: {}x{} pixels, {} band(s) written", path, size.0, size.1, img.count);
    Ok(())
}
