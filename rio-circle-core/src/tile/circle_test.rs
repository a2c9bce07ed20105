//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::tile::{circle_vertices, Feature, CIRCLE_STEP_DEGREES};
use assert_approx_eq::assert_approx_eq;
use tile_grid::{BoundingBox, Grid, Tile};

#[test]
fn test_circle_vertices() {
    let bounds = Grid::web_mercator().xy_bounds(&Tile::new(1073, 717, 11));
    let (cx, cy) = bounds.center();
    let radius = bounds.width() / 2.0;

    let ring = circle_vertices(&bounds);
    assert_eq!(ring.len(), 36);
    assert_eq!(ring.len(), 360 / CIRCLE_STEP_DEGREES);
    for (i, v) in ring.iter().enumerate() {
        let (dx, dy) = (v[0] - cx, v[1] - cy);
        assert_approx_eq!((dx * dx + dy * dy).sqrt(), radius, 1e-6);
        let mut angle = dy.atan2(dx).to_degrees();
        if angle < -1e-9 {
            angle += 360.0;
        }
        assert_approx_eq!(angle, (i * 10) as f64, 1e-6);
    }
    // ring is not closed explicitly
    assert_ne!(ring.first(), ring.last());
}

#[test]
fn test_circle_first_vertices() {
    let bounds = BoundingBox::new(0.0, 0.0, 20.0, 20.0);
    let ring = circle_vertices(&bounds);
    assert_eq!(ring[0], [20.0, 10.0]);
    assert_approx_eq!(ring[9][0], 10.0, 1e-12);
    assert_approx_eq!(ring[9][1], 20.0, 1e-12);
    assert_approx_eq!(ring[18][0], 0.0, 1e-12);
    assert_approx_eq!(ring[18][1], 10.0, 1e-12);
}

#[test]
fn test_radius_from_width() {
    // non-square bounds use half the width
    let bounds = BoundingBox::new(0.0, 0.0, 10.0, 40.0);
    let ring = circle_vertices(&bounds);
    assert_eq!(ring[0], [10.0, 20.0]);
    assert_approx_eq!(ring[9][1], 25.0, 1e-12);
}

#[test]
fn test_feature() {
    let ring = circle_vertices(&BoundingBox::new(0.0, 0.0, 2.0, 2.0));
    let feature = Feature::polygon(ring.clone());
    assert_eq!(feature.exterior(), ring.as_slice());

    let json: serde_json::Value = serde_json::from_str(&feature.to_json()).unwrap();
    assert_eq!(json["type"], "Feature");
    assert_eq!(json["properties"], serde_json::json!({}));
    assert_eq!(json["geometry"]["type"], "Polygon");
    assert_eq!(json["geometry"]["coordinates"][0].as_array().unwrap().len(), 36);
    assert_eq!(json["geometry"]["coordinates"][0][0], serde_json::json!([2.0, 1.0]));
}
