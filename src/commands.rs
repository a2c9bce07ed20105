//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::args;
use clap::ArgMatches;
use rio_circle_core::tile::{buffered_bounds, circle_vertices, Feature};
use rio_circle_core::TileParams;
use tile_grid::{Grid, Tile};

/// Buffered bounds, output size and circle feature of a tile
pub fn circle_info(grid: &Grid, tile: &Tile, params: &TileParams) -> Result<String, String> {
    let bounds = grid
        .checked_xy_bounds(tile)
        .filter(|_| grid.covers(&grid.extent, tile))
        .ok_or_else(|| {
            format!(
                "Tile {}/{}/{} is outside of the grid",
                tile.z, tile.x, tile.y
            )
        })?;
    let (bounds, size) = buffered_bounds(bounds, params.tilesize, params.tile_buffer)
        .map_err(|e| e.to_string())?;
    let feature = Feature::polygon(circle_vertices(&bounds));
    Ok(format!(
        "bounds: {} {} {} {}\nsize: {}x{}\n{}",
        bounds.left,
        bounds.bottom,
        bounds.right,
        bounds.top,
        size,
        size,
        feature.to_json()
    ))
}

pub fn circle(args: &ArgMatches<'_>) -> Result<(), String> {
    let config = args::config_from_args(args)?;
    let grid = args::grid_from_args(args, config.as_ref())?;
    let params = args::tile_params_from_args(args, config.as_ref())?;
    let (x, y, z) = args::tile_from_args(args)?;
    println!("{}", circle_info(&grid, &Tile::new(x, y, z), &params)?);
    Ok(())
}

#[cfg(feature = "with-gdal")]
pub fn tile(args: &ArgMatches<'_>) -> Result<(), String> {
    use rio_circle_core::CircularTile;
    use rio_circle_gdal::{write_geotiff, GdalReader};

    let config = args::config_from_args(args)?;
    let grid = args::grid_from_args(args, config.as_ref())?;
    let params = args::tile_params_from_args(args, config.as_ref())?;
    let (path, label) = args::dataset_from_args(args, config.as_ref())?;
    let (x, y, z) = args::tile_from_args(args)?;
    let output = args
        .value_of("output")
        .ok_or_else(|| "Missing argument 'output'".to_string())?;

    let reader = GdalReader::open(&path, grid)
        .map_err(|e| e.to_string())?
        .with_name(&label);
    let img = reader
        .circular_tile(x, y, z, &params)
        .map_err(|e| e.to_string())?;
    write_geotiff(&img, output, params.options.nodata.or(reader.nodata()))
        .map_err(|e| e.to_string())?;
    info!(
        "Tile {}/{}/{}: {} of {} pixels valid",
        z,
        x,
        y,
        img.valid_count(),
        img.width * img.height
    );
    Ok(())
}

#[cfg(not(feature = "with-gdal"))]
pub fn tile(_args: &ArgMatches<'_>) -> Result<(), String> {
    Err("rio_circle was built without GDAL support (feature `with-gdal`)".to_string())
}
