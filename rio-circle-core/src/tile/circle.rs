//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use std::collections::BTreeMap;
use tile_grid::BoundingBox;

/// Angular distance between two circle vertices
pub const CIRCLE_STEP_DEGREES: usize = 10;

/// Vertices of the circle inscribed in `bounds`.
///
/// Centered on the box, radius is half the box width. Counterclockwise from
/// angle 0, the first vertex is not repeated at the end.
pub fn circle_vertices(bounds: &BoundingBox) -> Vec<[f64; 2]> {
    let (cx, cy) = bounds.center();
    let radius = bounds.width() / 2.0;
    (0..360)
        .step_by(CIRCLE_STEP_DEGREES)
        .map(|theta| {
            let theta = (theta as f64).to_radians();
            [cx + radius * theta.cos(), cy + radius * theta.sin()]
        })
        .collect()
}

/// GeoJSON polygon geometry
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct Geometry {
    #[serde(rename = "type")]
    pub geom_type: String,
    pub coordinates: Vec<Vec<[f64; 2]>>,
}

/// GeoJSON feature with a single ring polygon
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct Feature {
    #[serde(rename = "type")]
    pub feature_type: String,
    pub properties: BTreeMap<String, String>,
    pub geometry: Geometry,
}

impl Feature {
    pub fn polygon(ring: Vec<[f64; 2]>) -> Feature {
        Feature {
            feature_type: "Feature".to_string(),
            properties: BTreeMap::new(),
            geometry: Geometry {
                geom_type: "Polygon".to_string(),
                coordinates: vec![ring],
            },
        }
    }

    pub fn exterior(&self) -> &[[f64; 2]] {
        self.geometry
            .coordinates
            .first()
            .map(|ring| ring.as_slice())
            .unwrap_or(&[])
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}
