//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::error::{Error, Result};
use crate::reader::GeoTransform;
use crate::tile::Feature;
use geo::{Contains, Coord, LineString, Point, Polygon};

/// Mask polygon in source pixel/line space, as used by GDAL warp cutlines
#[derive(Clone, Debug, PartialEq)]
pub struct Cutline {
    polygon: Polygon<f64>,
}

impl Cutline {
    /// Cutline from a ring of (col, row) positions. The ring is closed if needed.
    pub fn new(ring: Vec<(f64, f64)>) -> Result<Cutline> {
        if ring.len() < 3 {
            return Err(Error::Window(format!(
                "cutline needs at least 3 vertices, got {}",
                ring.len()
            )));
        }
        let exterior: LineString<f64> = ring.into_iter().map(|(x, y)| Coord { x, y }).collect();
        Ok(Cutline {
            polygon: Polygon::new(exterior, vec![]),
        })
    }

    /// Cutline of a feature whose coordinates are already in the CRS of `transform`
    pub fn from_feature(feature: &Feature, transform: &GeoTransform) -> Result<Cutline> {
        let inverse = transform
            .invert()
            .ok_or_else(|| Error::Window("geotransform is not invertible".to_string()))?;
        let ring = feature
            .exterior()
            .iter()
            .map(|c| inverse.apply(c[0], c[1]))
            .collect();
        Cutline::new(ring)
    }

    /// True if the pixel position lies inside the cutline
    pub fn contains(&self, col: f64, row: f64) -> bool {
        self.polygon.contains(&Point::new(col, row))
    }

    /// Closed exterior ring
    pub fn exterior(&self) -> &LineString<f64> {
        self.polygon.exterior()
    }

    pub fn wkt(&self) -> String {
        let coords: Vec<String> = self
            .polygon
            .exterior()
            .coords()
            .map(|c| format!("{} {}", c.x, c.y))
            .collect();
        format!("POLYGON (({}))", coords.join(","))
    }
}
