//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::core::config::GridCfg;
use crate::core::Config;
use tile_grid::{BoundingBox, Grid, Origin, Unit};

#[derive(Deserialize, Clone, Debug)]
pub struct ExtentCfg {
    pub minx: f64,
    pub miny: f64,
    pub maxx: f64,
    pub maxy: f64,
}

impl From<&ExtentCfg> for BoundingBox {
    fn from(cfg: &ExtentCfg) -> BoundingBox {
        BoundingBox::new(cfg.minx, cfg.miny, cfg.maxx, cfg.maxy)
    }
}

/// Grid by name (`web_mercator` or `wgs84`)
pub fn predefined_grid(gridname: &str) -> Result<Grid, String> {
    match gridname {
        "wgs84" => Ok(Grid::wgs84()),
        "web_mercator" => Ok(Grid::web_mercator()),
        _ => Err(format!("Unkown grid '{}'", gridname)),
    }
}

fn grid_unit(units: &str) -> Result<Unit, String> {
    match units.to_lowercase().as_str() {
        "m" => Ok(Unit::Meters),
        "dd" => Ok(Unit::Degrees),
        "ft" => Ok(Unit::Feet),
        _ => Err(format!("Unexpected grid units '{}' (m, dd or ft)", units)),
    }
}

fn grid_origin(origin: &str) -> Result<Origin, String> {
    match origin {
        "TopLeft" => Ok(Origin::TopLeft),
        "BottomLeft" => Ok(Origin::BottomLeft),
        _ => Err(format!(
            "Unexpected grid origin '{}' (TopLeft or BottomLeft)",
            origin
        )),
    }
}

impl<'a> Config<'a, GridCfg> for Grid {
    fn from_config(grid_cfg: &GridCfg) -> Result<Self, String> {
        match (&grid_cfg.predefined, &grid_cfg.user) {
            (Some(gridname), _) => predefined_grid(gridname),
            (None, Some(usergrid)) => {
                if usergrid.resolutions.is_empty() {
                    return Err("Grid without resolutions".to_string());
                }
                Ok(Grid::new(
                    usergrid.width,
                    usergrid.height,
                    BoundingBox::from(&usergrid.extent),
                    usergrid.srid,
                    grid_unit(&usergrid.units)?,
                    usergrid.resolutions.clone(),
                    grid_origin(&usergrid.origin)?,
                ))
            }
            (None, None) => Err("Invalid grid definition".to_string()),
        }
    }
    fn gen_config() -> String {
        let toml = r#"
[grid]
# Predefined grids: web_mercator, wgs84
predefined = "web_mercator"
# User defined grid:
#[grid.user]
#width = 256
#height = 256
#extent = { minx = 2420000.0, miny = 1030000.0, maxx = 2900000.0, maxy = 1350000.0 }
#srid = 2056
#units = "m"
#resolutions = [4000.0, 3750.0, 3500.0, 3250.0, 3000.0]
#origin = "TopLeft"
"#;
        toml.to_string()
    }
}
