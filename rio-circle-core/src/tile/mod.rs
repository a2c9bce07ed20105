//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

mod circle;
mod extract;

#[cfg(test)]
mod circle_test;

pub use self::circle::{circle_vertices, Feature, Geometry, CIRCLE_STEP_DEGREES};
pub use self::extract::{buffered_bounds, circular_tile, CircularTile, TileParams};
