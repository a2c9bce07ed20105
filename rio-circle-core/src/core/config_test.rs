//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::core::config::{read_config, ApplicationCfg, TileCfg, DEFAULT_CONFIG};
use crate::core::{parse_config, Config};
use crate::reader::Resampling;
use crate::tile::TileParams;

#[test]
fn test_load_config() {
    let config = read_config("src/test/example.toml");
    println!("{:#?}", config);
    let config: ApplicationCfg = config.expect("load_config returned Err");
    assert_eq!(config.dataset.path, "../data/dem_3857.tif");
    assert_eq!(config.dataset.label(), "dem");
    assert_eq!(config.grid.predefined, Some("web_mercator".to_string()));
    assert_eq!(config.tile.tilesize, 512);
    assert_eq!(config.tile.buffer, Some(1.5));
    assert_eq!(config.tile.indexes, Some(vec![1]));
    assert_eq!(
        config.tile.vrt_options.get("add_alpha"),
        Some(&"true".to_string())
    );

    let params = TileParams::from_config(&config.tile).unwrap();
    assert_eq!(params.tilesize, 512);
    assert_eq!(params.tile_buffer, Some(1.5));
    assert_eq!(params.options.resampling, Resampling::Bilinear);
    assert_eq!(params.options.nodata, Some(-9999.0));
    assert!(params.options.vrt_options.cutline.is_none());
    assert_eq!(params.options.vrt_options.other.len(), 1);
}

#[test]
fn test_parse_error() {
    let config: Result<ApplicationCfg, _> = read_config("src/core/mod.rs");
    assert!(config
        .err()
        .unwrap()
        .starts_with("src/core/mod.rs - unexpected character found: `/` at line 1"));

    let config: Result<ApplicationCfg, _> = read_config("wrongfile");
    assert_eq!("Could not find config file!", config.err().unwrap());
}

#[test]
fn test_default_config() {
    let config: ApplicationCfg = parse_config(DEFAULT_CONFIG.to_string(), "").unwrap();
    assert_eq!(config.dataset.path, "");
    assert_eq!(config.dataset.label(), "");
    assert_eq!(config.tile, TileCfg::default());

    let params = TileParams::from_config(&config.tile).unwrap();
    assert_eq!(params, TileParams::default());
}

#[test]
fn test_tile_defaults() {
    let toml = r#"
        [dataset]
        path = "world.tif"

        [grid]
        predefined = "wgs84"
        "#;
    let config: ApplicationCfg = parse_config(toml.to_string(), "").unwrap();
    assert_eq!(config.dataset.label(), "world.tif");
    assert_eq!(config.tile.tilesize, 256);
    assert_eq!(config.tile.buffer, None);
}

#[test]
fn test_invalid_resampling() {
    let toml = r#"
        resampling = "sharpest"
        "#;
    let config: TileCfg = parse_config(toml.to_string(), "").unwrap();
    assert_eq!(
        TileParams::from_config(&config).err(),
        Some("Configuration error: Unknown resampling method 'sharpest'".to_string())
    );
}

#[test]
fn test_env_template() {
    std::env::set_var("RIO_CIRCLE_TEST_PATH", "from_env.tif");
    let toml = r#"
        [dataset]
        path = "{{env.RIO_CIRCLE_TEST_PATH}}"

        [grid]
        predefined = "web_mercator"
        "#;
    let config: ApplicationCfg = parse_config(toml.to_string(), "").unwrap();
    assert_eq!(config.dataset.path, "from_env.tif");

    let toml = r#"
        [dataset]
        path = "${RIO_CIRCLE_TEST_PATH}"
        "#;
    let config: Result<ApplicationCfg, _> = parse_config(toml.to_string(), "");
    assert_eq!(
        "Replace old environment variable syntax ${VARNAME} with `{{env.VARNAME}}`",
        config.err().unwrap()
    );

    let toml = r#"
        [dataset]
        path = "${HOME}/dem.tif"
        "#;
    let config: Result<ApplicationCfg, _> = parse_config(toml.to_string(), "");
    assert!(config.err().unwrap().starts_with("Replace old environment variable syntax"));
}
