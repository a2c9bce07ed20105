//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use clap::{App, AppSettings, ArgMatches, SubCommand};
use rio_circle_core::core::{predefined_grid, read_config, ApplicationCfg, Config, TileCfg};
use rio_circle_core::TileParams;
use std::str::FromStr;
use tile_grid::Grid;

pub fn app<'a, 'b>(version: &'b str) -> App<'a, 'b> {
    // http://kbknapp.github.io/clap-rs/clap/
    App::new("rio_circle")
        .version(version)
        .author("Pirmin Kalberer <pka@sourcepole.ch>")
        .about("Raster tiles cropped to the circle inscribed in the tile bounds")
        .subcommand(SubCommand::with_name("genconfig")
                        .args_from_usage("--loglevel=[error|warn|info|debug|trace] 'Log level (Default: info)'")
                        .about("Generate configuration template"))
        .subcommand(SubCommand::with_name("circle")
                        .args_from_usage("-c, --config=[FILE] 'Load from custom config file'
                                              --loglevel=[error|warn|info|debug|trace] 'Log level (Default: info)'
                                              --grid=[web_mercator|wgs84] 'Tiling grid (Default: web_mercator)'
                                              --z=<LEVEL> 'Zoom level'
                                              --x=<COL> 'Tile column'
                                              --y=<ROW> 'Tile row'
                                              --tilesize=[PIXELS] 'Tile size (Default: 256)'
                                              --buffer=[PIXELS] 'Tile buffer, multiple of 0.5'")
                        .about("Print bounds and circle geometry of a tile"))
        .subcommand(SubCommand::with_name("tile")
                        .setting(AppSettings::AllowLeadingHyphen)
                        .args_from_usage("-c, --config=[FILE] 'Load from custom config file'
                                              --loglevel=[error|warn|info|debug|trace] 'Log level (Default: info)'
                                              --path=[FILE_OR_GDAL_DS] 'GDAL raster dataset'
                                              --grid=[web_mercator|wgs84] 'Tiling grid (Default: web_mercator)'
                                              --z=<LEVEL> 'Zoom level'
                                              --x=<COL> 'Tile column'
                                              --y=<ROW> 'Tile row'
                                              --tilesize=[PIXELS] 'Tile size (Default: 256)'
                                              --buffer=[PIXELS] 'Tile buffer, multiple of 0.5'
                                              --bidx=[1,2,..] 'Band indexes'
                                              --expression=[EXPR] 'Band math expression, e.g. b1/b2'
                                              --resampling=[nearest|bilinear|cubic|cubicspline|lanczos|average|mode] 'Resampling method'
                                              --nodata=[VALUE] 'Nodata value'
                                              --output=<FILE> 'GeoTIFF output file'")
                        .about("Read a circular tile and write it as GeoTIFF"))
}

fn parse_arg<T: FromStr>(args: &ArgMatches<'_>, name: &str) -> Result<Option<T>, String> {
    args.value_of(name)
        .map(|s| {
            s.parse::<T>()
                .map_err(|_| format!("Error parsing '{}' value '{}'", name, s))
        })
        .transpose()
}

fn required_arg<T: FromStr>(args: &ArgMatches<'_>, name: &str) -> Result<T, String> {
    parse_arg(args, name)?.ok_or_else(|| format!("Missing argument '{}'", name))
}

pub fn config_from_args(args: &ArgMatches<'_>) -> Result<Option<ApplicationCfg>, String> {
    match args.value_of("config") {
        Some(path) => {
            info!("Reading configuration from '{}'", path);
            read_config(path).map(Some)
        }
        None => Ok(None),
    }
}

/// Tile (x, y, z) from `--x`, `--y` and `--z`
pub fn tile_from_args(args: &ArgMatches<'_>) -> Result<(u32, u32, u8), String> {
    Ok((
        required_arg(args, "x")?,
        required_arg(args, "y")?,
        required_arg(args, "z")?,
    ))
}

/// Tiling grid from `--grid`, the configuration or web mercator
pub fn grid_from_args(args: &ArgMatches<'_>, config: Option<&ApplicationCfg>) -> Result<Grid, String> {
    match (args.value_of("grid"), config) {
        (Some(gridname), _) => predefined_grid(gridname),
        (None, Some(config)) => Grid::from_config(&config.grid),
        (None, None) => Ok(Grid::web_mercator()),
    }
}

/// Tile parameters from the configuration, overridden by command line arguments
pub fn tile_params_from_args(
    args: &ArgMatches<'_>,
    config: Option<&ApplicationCfg>,
) -> Result<TileParams, String> {
    let mut cfg = config.map_or_else(TileCfg::default, |c| c.tile.clone());
    if let Some(tilesize) = parse_arg(args, "tilesize")? {
        cfg.tilesize = tilesize;
    }
    if let Some(buffer) = parse_arg(args, "buffer")? {
        cfg.buffer = Some(buffer);
    }
    if let Some(bidx) = args.value_of("bidx") {
        let indexes = bidx
            .split(',')
            .map(|b| {
                b.trim()
                    .parse::<usize>()
                    .map_err(|_| format!("Error parsing 'bidx' value '{}'", b))
            })
            .collect::<Result<Vec<_>, _>>()?;
        cfg.indexes = Some(indexes);
    }
    if let Some(expression) = args.value_of("expression") {
        cfg.expression = Some(expression.to_string());
    }
    if let Some(resampling) = args.value_of("resampling") {
        cfg.resampling = Some(resampling.to_string());
    }
    if let Some(nodata) = parse_arg(args, "nodata")? {
        cfg.nodata = Some(nodata);
    }
    TileParams::from_config(&cfg)
}

/// Dataset path and label from `--path` or the configuration
pub fn dataset_from_args(
    args: &ArgMatches<'_>,
    config: Option<&ApplicationCfg>,
) -> Result<(String, String), String> {
    match (args.value_of("path"), config) {
        (Some(path), _) => Ok((path.to_string(), path.to_string())),
        (None, Some(config)) if !config.dataset.path.is_empty() => Ok((
            config.dataset.path.clone(),
            config.dataset.label().to_string(),
        )),
        _ => Err("Missing dataset: use --path or [dataset] in config file".to_string()),
    }
}

/// Configuration template
pub fn gen_config() -> String {
    let dataset = r#"# rio_circle configuration

[dataset]
# GDAL raster dataset
path = ""
#name = ""
"#;
    format!("{}{}{}", dataset, Grid::gen_config(), TileParams::gen_config())
}
