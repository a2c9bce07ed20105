//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::core::gridcfg::ExtentCfg;
use regex::Regex;
use serde::Deserialize;
use std::collections::HashMap;
use std::env;
use std::error::Error;
use std::fs::File;
use std::io::prelude::*;
use tera::{Context, Tera};
use toml::Value;

pub trait Config<'a, C: Deserialize<'a>>
where
    Self: std::marker::Sized,
{
    /// Read configuration
    fn from_config(config: &C) -> Result<Self, String>;
    /// Generate configuration template
    fn gen_config() -> String;
}

#[derive(Deserialize, Clone, Debug)]
pub struct ApplicationCfg {
    pub dataset: DatasetCfg,
    pub grid: GridCfg,
    #[serde(default)]
    pub tile: TileCfg,
}

#[derive(Deserialize, Clone, Debug)]
pub struct DatasetCfg {
    /// GDAL raster dataset (file name or GDAL connection string)
    pub path: String,
    /// Label used in messages (Default: path)
    pub name: Option<String>,
}

impl DatasetCfg {
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.path)
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct GridCfg {
    pub predefined: Option<String>,
    pub user: Option<UserGridCfg>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct UserGridCfg {
    /// The width and height of an individual tile, in pixels.
    pub width: u16,
    pub height: u16,
    /// The geographical extent covered by the grid, in ground units (e.g. meters, degrees, feet, etc.).
    /// Must be specified as 4 floating point numbers ordered as minx, miny, maxx, maxy.
    pub extent: ExtentCfg,
    /// Spatial reference system (EPSG code).
    pub srid: i32,
    /// Grid units (m: meters, dd: decimal degrees, ft: feet)
    pub units: String,
    /// Resolutions in units-per-pixel, ordered from largest (zoom level 0) to smallest.
    #[serde(default)]
    pub resolutions: Vec<f64>,
    /// Grid origin
    pub origin: String,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct TileCfg {
    /// Output size without buffer
    #[serde(default = "default_tilesize")]
    pub tilesize: u32,
    /// Buffer in pixels on each side, multiple of 0.5
    pub buffer: Option<f64>,
    pub indexes: Option<Vec<usize>>,
    pub expression: Option<String>,
    /// nearest, bilinear, cubic, cubicspline, lanczos, average or mode
    pub resampling: Option<String>,
    pub nodata: Option<f64>,
    /// Backend specific VRT options
    #[serde(default)]
    pub vrt_options: HashMap<String, String>,
}

pub fn default_tilesize() -> u32 {
    256
}

impl Default for TileCfg {
    fn default() -> TileCfg {
        TileCfg {
            tilesize: default_tilesize(),
            buffer: None,
            indexes: None,
            expression: None,
            resampling: None,
            nodata: None,
            vrt_options: HashMap::new(),
        }
    }
}

pub const DEFAULT_CONFIG: &'static str = r#"
[dataset]
path = ""
#name = ""

[grid]
predefined = "web_mercator"

[tile]
tilesize = 256
#buffer = 0.5
#indexes = [1, 2, 3]
#expression = "b1/b2+b3"
#resampling = "nearest"
#nodata = 0.0
"#;

/// Load and parse the config file into an config struct.
pub fn read_config<'a, T: Deserialize<'a>>(path: &str) -> Result<T, String> {
    let mut file = match File::open(path) {
        Ok(file) => file,
        Err(_) => {
            return Err("Could not find config file!".to_string());
        }
    };
    let mut config_toml = String::new();
    if let Err(err) = file.read_to_string(&mut config_toml) {
        return Err(format!("Error while reading config: [{}]", err));
    };

    parse_config(config_toml, path)
}

/// Parse the configuration into an config struct.
pub fn parse_config<'a, T: Deserialize<'a>>(config_toml: String, path: &str) -> Result<T, String> {
    // Check for old ${var} expressions
    let re = Regex::new(r"\$\{([[:alnum:]_]+)\}").map_err(|e| e.to_string())?;
    if re.is_match(&config_toml) {
        return Err(
            "Replace old environment variable syntax ${VARNAME} with `{{env.VARNAME}}`".to_string(),
        );
    }

    // Parse template
    let mut tera = Tera::default();
    tera.add_raw_template(path, &config_toml)
        .map_err(|e| format!("Template error: {}", e))?;
    let mut context = Context::new();
    let mut env = HashMap::new();
    for (key, value) in env::vars() {
        env.insert(key, value);
    }
    context.insert("env", &env);
    let toml = tera.render(path, &context).map_err(|e| {
        format!(
            "Template error: {}",
            e.source().map_or(e.to_string(), |s| s.to_string())
        )
    })?;

    toml.parse::<Value>()
        .and_then(|cfg| cfg.try_into::<T>())
        .map_err(|err| format!("{} - {}", path, err))
}
