//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::error::Error;
use assert_approx_eq::assert_approx_eq;
use crate::reader::{GeoTransform, MemoryReader, PartRequest, RasterReader, ReadOptions};
use crate::tile::{circle_vertices, Feature};
use tile_grid::{BoundingBox, Grid};

/// 8x8 wgs84 raster over the eastern hemisphere, value = row * 8 + col
fn eastern_hemisphere() -> MemoryReader {
    let bounds = BoundingBox::new(0.0, -90.0, 180.0, 90.0);
    let transform = GeoTransform::from_bounds(&bounds, 8, 8);
    let band = (0..64).map(|i| i as f64).collect();
    MemoryReader::new("east", Grid::wgs84(), 8, 8, transform, vec![band]).unwrap()
}

fn request(bounds: BoundingBox, size: u32) -> PartRequest {
    PartRequest {
        bounds,
        dst_srid: 4326,
        bounds_srid: None,
        height: size,
        width: size,
        max_size: None,
        indexes: None,
        expression: None,
        options: ReadOptions::default(),
    }
}

#[test]
fn test_reader_info() {
    let reader = eastern_hemisphere();
    assert_eq!(reader.input(), "east");
    assert_eq!(reader.band_count(), 1);
    assert_eq!(reader.size(), (8, 8));
    assert_eq!(reader.bounds(), &BoundingBox::new(0.0, -90.0, 180.0, 90.0));
    assert_eq!(reader.tms().srid, 4326);

    assert!(reader.tile_exists(1, 0, 0));
    assert!(!reader.tile_exists(0, 0, 0));
    assert!(reader.tile_exists(4, 1, 2));
    assert!(reader.tile_exists(7, 3, 2));
    assert!(!reader.tile_exists(3, 1, 2));
}

#[test]
fn test_invalid_datasets() {
    let transform = GeoTransform::from_bounds(&BoundingBox::new(0.0, 0.0, 1.0, 1.0), 2, 2);
    let err = MemoryReader::new("empty", Grid::wgs84(), 2, 2, transform, vec![])
        .err()
        .unwrap();
    assert_eq!(err.to_string(), "Raster reader error: empty: dataset without bands");

    assert!(matches!(
        MemoryReader::new("short", Grid::wgs84(), 2, 2, transform, vec![vec![1.0; 3]]),
        Err(Error::Reader(_))
    ));

    let singular = GeoTransform([0.0; 6]);
    assert!(matches!(
        MemoryReader::new("flat", Grid::wgs84(), 2, 2, singular, vec![vec![1.0; 4]]),
        Err(Error::Reader(_))
    ));
}

#[test]
fn test_part() {
    let reader = eastern_hemisphere();
    // full dataset at double resolution
    let img = reader
        .part(&request(BoundingBox::new(0.0, -90.0, 180.0, 90.0), 16))
        .unwrap();
    assert_eq!((img.width, img.height), (16, 16));
    assert_eq!(img.valid_count(), 256);
    assert_eq!(img.value(0, 0, 0), 0.0);
    assert_eq!(img.value(0, 15, 0), 7.0);
    assert_eq!(img.value(0, 15, 15), 63.0);

    // window sticking out of the dataset
    let img = reader
        .part(&request(BoundingBox::new(-180.0, -90.0, 180.0, 90.0), 8))
        .unwrap();
    assert!(!img.is_valid(0, 0));
    assert!(!img.is_valid(3, 7));
    assert!(img.is_valid(4, 0));
    assert_eq!(img.valid_count(), 32);
}

#[test]
fn test_part_nodata() {
    let reader = eastern_hemisphere().with_nodata(0.0);
    let bounds = BoundingBox::new(0.0, -90.0, 180.0, 90.0);
    let img = reader.part(&request(bounds, 8)).unwrap();
    assert!(!img.is_valid(0, 0));
    assert_eq!(img.valid_count(), 63);

    // nodata of the request overrides the dataset
    let mut req = request(bounds, 8);
    req.options.nodata = Some(63.0);
    let img = reader.part(&req).unwrap();
    assert!(img.is_valid(0, 0));
    assert!(!img.is_valid(7, 7));
    assert_eq!(img.value(0, 7, 7), 63.0);
}

#[test]
fn test_part_max_size() {
    let reader = eastern_hemisphere();
    let mut req = request(BoundingBox::new(0.0, -90.0, 180.0, 90.0), 0);
    req.width = 64;
    req.height = 32;
    req.max_size = Some(16);
    assert_eq!(req.output_size(), (16, 8));
    let img = reader.part(&req).unwrap();
    assert_eq!((img.width, img.height), (16, 8));

    req.width = 10;
    req.height = 40;
    req.max_size = Some(20);
    assert_eq!(req.output_size(), (5, 20));

    req.max_size = Some(100);
    assert_eq!(req.output_size(), (10, 40));
}

#[test]
fn test_part_reprojection() {
    let reader = eastern_hemisphere();
    let mut req = request(BoundingBox::new(0.0, -90.0, 180.0, 90.0), 8);
    req.dst_srid = 3857;
    assert!(matches!(
        reader.part(&req),
        Err(Error::Reprojection {
            from: 4326,
            to: 3857
        })
    ));

    let mut req = request(BoundingBox::new(0.0, -90.0, 180.0, 90.0), 8);
    req.bounds_srid = Some(3857);
    assert!(matches!(reader.part(&req), Err(Error::Reprojection { .. })));
    // bounds already given in the destination CRS
    req.bounds_srid = Some(4326);
    assert!(reader.part(&req).is_ok());
}

#[test]
fn test_create_cutline() {
    let reader = eastern_hemisphere();
    let feature = Feature::polygon(circle_vertices(&BoundingBox::new(0.0, -90.0, 180.0, 90.0)));
    let cutline = reader.create_cutline(&feature, 4326).unwrap();
    // circle centered on the raster in pixel space
    assert!(cutline.contains(4.0, 4.0));
    assert!(!cutline.contains(0.2, 0.2));
    assert!(cutline.wkt().starts_with("POLYGON (("));
    let first = cutline.exterior().0[0];
    assert_approx_eq!(first.x, 8.0, 1e-9);
    assert_approx_eq!(first.y, 4.0, 1e-9);
    assert_eq!(cutline.exterior().0[36], first);

    assert!(matches!(
        reader.create_cutline(&feature, 3857),
        Err(Error::Reprojection { .. })
    ));

    let mut req = request(BoundingBox::new(0.0, -90.0, 180.0, 90.0), 8);
    req.options.vrt_options.cutline = Some(cutline);
    let img = reader.part(&req).unwrap();
    assert!(!img.is_valid(0, 0));
    assert!(img.is_valid(3, 3));
    assert!(img.is_valid(4, 4));
}

#[test]
fn test_passthrough_options() {
    let reader = eastern_hemisphere();
    let bounds = BoundingBox::new(0.0, -90.0, 180.0, 90.0);
    let plain = reader.part(&request(bounds, 8)).unwrap();

    let mut req = request(bounds, 8);
    assert!(req.options.passthrough().is_empty());
    req.options
        .vrt_options
        .other
        .insert("add_alpha".to_string(), "true".to_string());
    req.options
        .extra
        .insert("unscale".to_string(), "false".to_string());
    assert_eq!(
        req.options.passthrough(),
        vec![
            "vrt_options.add_alpha=true".to_string(),
            "extra.unscale=false".to_string()
        ]
    );
    // not applied, output unchanged
    assert_eq!(reader.part(&req).unwrap(), plain);
}
