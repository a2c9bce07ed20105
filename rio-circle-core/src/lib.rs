//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Circular tile extraction.
//!
//! A tile is read through any [`reader::RasterReader`], cropped to the circle
//! inscribed in its (optionally buffered) bounds.

#[macro_use]
extern crate log;
#[macro_use]
extern crate serde_derive;

pub mod core;
pub mod error;
pub mod reader;
pub mod tile;

pub use crate::error::{Error, Result};
pub use crate::tile::{circular_tile, CircularTile, TileParams};
