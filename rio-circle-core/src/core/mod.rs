//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

pub mod config;
pub mod gridcfg;
mod tilecfg;

pub use self::config::{
    parse_config, read_config, ApplicationCfg, Config, DatasetCfg, GridCfg, TileCfg,
    DEFAULT_CONFIG,
};
pub use self::gridcfg::predefined_grid;

#[cfg(test)]
mod config_test;
#[cfg(test)]
mod gridcfg_test;
