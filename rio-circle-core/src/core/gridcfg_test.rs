//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::core::config::GridCfg;
use crate::core::parse_config;
use crate::core::Config;
use tile_grid::{BoundingBox, Grid, Origin, Tile};

#[test]
fn test_grid_from_config() {
    let toml = r#"
        #[grid]
        predefined = "web_mercator"
        "#;
    let config: GridCfg = parse_config(toml.to_string(), "").unwrap();
    let grid = Grid::from_config(&config).unwrap();
    assert_eq!(grid.srid, 3857);
    assert_eq!(
        grid.extent,
        BoundingBox {
            left: -20037508.3427892480,
            bottom: -20037508.3427892480,
            right: 20037508.3427892480,
            top: 20037508.3427892480,
        }
    );

    let toml = r#"
        #[grid.user]
        [user]
        width = 256
        height = 256
        extent = { minx = 2420000.0, miny = 1030000.0, maxx = 2900000.0, maxy = 1350000.0 }
        srid = 2056
        units = "m"
        resolutions = [4000.0,3750.0,3500.0,3250.0,3000.0,2750.0,2500.0,2250.0,2000.0,1750.0,1500.0,1250.0,1000.0,750.0,650.0,500.0,250.0,100.0,50.0,20.0,10.0,5.0,2.5,2.0,1.5,1.0,0.5,0.25,0.1]
        origin = "TopLeft"
        "#;
    let config: GridCfg = parse_config(toml.to_string(), "").unwrap();
    let grid = Grid::from_config(&config).unwrap();
    assert_eq!(
        grid.extent,
        BoundingBox::new(2420000.0, 1030000.0, 2900000.0, 1350000.0)
    );
    assert_eq!(grid.origin, Origin::TopLeft);

    // lake of Zurich
    let bounds = grid.xy_bounds(&Tile::new(10, 4, 17));
    assert_eq!(
        bounds,
        BoundingBox {
            left: 2676000.,
            bottom: 1222000.,
            right: 2701600.,
            top: 1247600.,
        }
    );
}

#[test]
fn test_invalid_grid_config() {
    let config: GridCfg = parse_config(r#"predefined = "lv95""#.to_string(), "").unwrap();
    assert_eq!(
        Grid::from_config(&config).err(),
        Some("Unkown grid 'lv95'".to_string())
    );

    let toml = r#"
        [user]
        width = 256
        height = 256
        extent = { minx = 0.0, miny = 0.0, maxx = 100.0, maxy = 100.0 }
        srid = 2056
        units = "km"
        resolutions = [1.0]
        origin = "TopLeft"
        "#;
    let config: GridCfg = parse_config(toml.to_string(), "").unwrap();
    assert_eq!(
        Grid::from_config(&config).err(),
        Some("Unexpected grid units 'km' (m, dd or ft)".to_string())
    );

    let config: GridCfg = parse_config("".to_string(), "").unwrap();
    assert_eq!(
        Grid::from_config(&config).err(),
        Some("Invalid grid definition".to_string())
    );
}
