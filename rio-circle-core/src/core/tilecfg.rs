//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::core::config::TileCfg;
use crate::core::Config;
use crate::reader::{ReadOptions, Resampling, VrtOptions};
use crate::tile::TileParams;

impl<'a> Config<'a, TileCfg> for TileParams {
    fn from_config(tile_cfg: &TileCfg) -> Result<Self, String> {
        let resampling = match tile_cfg.resampling {
            Some(ref name) => name.parse::<Resampling>().map_err(|e| e.to_string())?,
            None => Resampling::default(),
        };
        Ok(TileParams {
            tilesize: tile_cfg.tilesize,
            indexes: tile_cfg.indexes.clone(),
            expression: tile_cfg.expression.clone(),
            tile_buffer: tile_cfg.buffer,
            options: ReadOptions {
                resampling,
                nodata: tile_cfg.nodata,
                vrt_options: VrtOptions {
                    cutline: None,
                    other: tile_cfg
                        .vrt_options
                        .iter()
                        .map(|(k, v)| (k.clone(), v.clone()))
                        .collect(),
                },
                extra: Default::default(),
            },
        })
    }
    fn gen_config() -> String {
        let toml = r#"
[tile]
tilesize = 256
#buffer = 0.5
#indexes = [1, 2, 3]
#expression = "b1/b2+b3"
#resampling = "nearest"
#nodata = 0.0
"#;
        toml.to_string()
    }
}
