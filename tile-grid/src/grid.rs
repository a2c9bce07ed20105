//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//!Tile grids

use std::f64::consts;

/// Geographic bounds, ordered as left, bottom, right, top
#[derive(PartialEq, Clone, Copy, Debug)]
pub struct BoundingBox {
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
    pub top: f64,
}

impl BoundingBox {
    pub fn new(left: f64, bottom: f64, right: f64, top: f64) -> BoundingBox {
        BoundingBox {
            left,
            bottom,
            right,
            top,
        }
    }
    pub fn width(&self) -> f64 {
        self.right - self.left
    }
    pub fn height(&self) -> f64 {
        self.top - self.bottom
    }
    /// (x, y) of the box center
    pub fn center(&self) -> (f64, f64) {
        (
            (self.left + self.right) / 2.0,
            (self.bottom + self.top) / 2.0,
        )
    }
    /// Grow each side by `dx` horizontally and `dy` vertically
    pub fn expand(&self, dx: f64, dy: f64) -> BoundingBox {
        BoundingBox {
            left: self.left - dx,
            bottom: self.bottom - dy,
            right: self.right + dx,
            top: self.top + dy,
        }
    }
    /// True if both boxes share some area
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        self.left < other.right
            && other.left < self.right
            && self.bottom < other.top
            && other.bottom < self.top
    }
    /// True if `other` lies inside this box, borders included
    pub fn contains(&self, other: &BoundingBox) -> bool {
        self.left <= other.left
            && self.bottom <= other.bottom
            && self.right >= other.right
            && self.top >= other.top
    }
}

/// Tile address in XYZ scheme (row 0 at the top)
#[derive(PartialEq, Eq, Clone, Copy, Debug, Hash)]
pub struct Tile {
    pub x: u32,
    pub y: u32,
    pub z: u8,
}

impl Tile {
    pub fn new(x: u32, y: u32, z: u8) -> Tile {
        Tile { x, y, z }
    }
}

/// Tile index range of one zoom level. Max values are exclusive.
#[derive(PartialEq, Clone, Debug)]
pub struct TileLimits {
    pub minx: u32,
    pub miny: u32,
    pub maxx: u32,
    pub maxy: u32,
}

impl TileLimits {
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.minx && x < self.maxx && y >= self.miny && y < self.maxy
    }
}

// Max grid cell numbers
type CellIndex = (u32, u32);

/// Grid origin
#[derive(PartialEq, Clone, Debug)]
pub enum Origin {
    TopLeft,
    BottomLeft,
}

/// Grid units
#[derive(PartialEq, Clone, Debug)]
pub enum Unit {
    Meters,
    Degrees,
    Feet,
}

/// Tile grid
#[derive(Clone, Debug)]
pub struct Grid {
    /// The width of an individual tile, in pixels.
    width: u16,
    /// The height of an individual tile, in pixels.
    height: u16,
    /// The geographical extent covered by the grid, in ground units (e.g. meters, degrees, feet, etc.).
    /// The (left,bottom) point defines the origin of a BottomLeft grid, (left,top) the one of
    /// a TopLeft grid.
    pub extent: BoundingBox,
    /// Spatial reference system (EPSG code).
    pub srid: i32,
    /// Grid units
    pub units: Unit,
    /// Resolutions in units-per-pixel, one per zoom level, ordered from largest to smallest.
    resolutions: Vec<f64>,
    /// maxx/maxy for each resolution
    level_max: Vec<CellIndex>,
    /// Grid origin
    pub origin: Origin,
}

impl Grid {
    /// WGS84 grid
    pub fn wgs84() -> Grid {
        Grid::new(
            256,
            256,
            BoundingBox::new(-180.0, -90.0, 180.0, 90.0),
            4326,
            Unit::Degrees,
            vec![
                0.703125000000000,
                0.351562500000000,
                0.175781250000000,
                8.78906250000000e-2,
                4.39453125000000e-2,
                2.19726562500000e-2,
                1.09863281250000e-2,
                5.49316406250000e-3,
                2.74658203125000e-3,
                1.37329101562500e-3,
                6.86645507812500e-4,
                3.43322753906250e-4,
                1.71661376953125e-4,
                8.58306884765625e-5,
                4.29153442382812e-5,
                2.14576721191406e-5,
                1.07288360595703e-5,
                5.36441802978516e-6,
            ],
            Origin::BottomLeft,
        )
    }

    /// Web Mercator grid (Google maps compatible)
    pub fn web_mercator() -> Grid {
        Grid::new(
            256,
            256,
            BoundingBox::new(
                -20037508.3427892480,
                -20037508.3427892480,
                20037508.3427892480,
                20037508.3427892480,
            ),
            3857,
            Unit::Meters,
            // 156543.0339280410 / 2^z, rounded to 10 digits at zoom 0
            vec![
                156543.0339280410,
                78271.5169640205,
                39135.75848201025,
                19567.879241005125,
                9783.939620502562,
                4891.969810251281,
                2445.9849051256406,
                1222.9924525628203,
                611.4962262814101,
                305.7481131407051,
                152.87405657035254,
                76.43702828517627,
                38.218514142588134,
                19.109257071294067,
                9.554628535647034,
                4.777314267823517,
                2.3886571339117584,
                1.1943285669558792,
                0.5971642834779396,
                0.2985821417389698,
                0.1492910708694849,
                0.07464553543474245,
                0.037322767717371225,
            ],
            Origin::BottomLeft,
        )
    }

    pub fn new(
        width: u16,
        height: u16,
        extent: BoundingBox,
        srid: i32,
        units: Unit,
        resolutions: Vec<f64>,
        origin: Origin,
    ) -> Grid {
        let mut grid = Grid {
            width,
            height,
            extent,
            srid,
            units,
            resolutions,
            origin,
            level_max: Vec::new(),
        };
        grid.level_max = grid.level_max();
        grid
    }
    pub fn nlevels(&self) -> u8 {
        self.resolutions.len() as u8
    }
    pub fn maxzoom(&self) -> u8 {
        self.nlevels().saturating_sub(1)
    }
    /// Units per pixel at `zoom`
    pub fn resolution(&self, zoom: u8) -> Option<f64> {
        self.resolutions.get(zoom as usize).cloned()
    }
    /// Tile width and height in pixels
    pub fn tile_size(&self) -> (u16, u16) {
        (self.width, self.height)
    }
    /// Bounds of a tile given in the grid's own row order
    ///
    /// Panics if `zoom` is not a level of the grid.
    pub fn tile_bounds(&self, xtile: u32, ytile: u32, zoom: u8) -> BoundingBox {
        // based on mapcache_grid_get_tile_extent
        let res = self.resolutions[zoom as usize];
        let tile_sx = self.width as f64;
        let tile_sy = self.height as f64;
        let left = self.extent.left + (res * xtile as f64 * tile_sx);
        let right = self.extent.left + (res * (xtile as f64 + 1.0) * tile_sx);
        match self.origin {
            Origin::BottomLeft => BoundingBox {
                left,
                bottom: self.extent.bottom + (res * ytile as f64 * tile_sy),
                right,
                top: self.extent.bottom + (res * (ytile as f64 + 1.0) * tile_sy),
            },
            Origin::TopLeft => BoundingBox {
                left,
                bottom: self.extent.top - (res * (ytile as f64 + 1.0) * tile_sy),
                right,
                top: self.extent.top - (res * ytile as f64 * tile_sy),
            },
        }
    }
    /// Grid row of an XYZ row
    ///
    /// Panics if `zoom` is not a level of the grid.
    pub fn native_row(&self, ytile: u32, zoom: u8) -> u32 {
        match self.origin {
            Origin::TopLeft => ytile,
            Origin::BottomLeft => {
                // y = maxy-ytile-1
                let maxy = self.level_max[zoom as usize].1;
                maxy.saturating_sub(ytile).saturating_sub(1)
            }
        }
    }
    /// Bounds of a tile in XYZ adressing scheme
    ///
    /// Panics if `tile.z` is not a level of the grid, see `checked_xy_bounds`.
    pub fn xy_bounds(&self, tile: &Tile) -> BoundingBox {
        let y = self.native_row(tile.y, tile.z);
        self.tile_bounds(tile.x, y, tile.z)
    }
    /// Bounds of a tile in XYZ adressing scheme, `None` for zoom levels beyond the grid
    pub fn checked_xy_bounds(&self, tile: &Tile) -> Option<BoundingBox> {
        if tile.z >= self.nlevels() {
            return None;
        }
        Some(self.xy_bounds(tile))
    }
    /// (maxx, maxy) of grid level, `zoom` < `nlevels`
    pub(crate) fn level_limit(&self, zoom: u8) -> CellIndex {
        let res = self.resolutions[zoom as usize];
        let unitheight = self.height as f64 * res;
        let unitwidth = self.width as f64 * res;

        let maxy = ((self.extent.height() - 0.01 * unitheight) / unitheight).ceil() as u32;
        let maxx = ((self.extent.width() - 0.01 * unitwidth) / unitwidth).ceil() as u32;
        (maxx, maxy)
    }
    /// (maxx, maxy) of all grid levels
    fn level_max(&self) -> Vec<CellIndex> {
        (0..self.nlevels())
            .map(|zoom| self.level_limit(zoom))
            .collect()
    }
    /// XYZ tile index limits of all levels covering `bounds`
    pub fn tile_limits(&self, bounds: &BoundingBox) -> Vec<TileLimits> {
        (0..self.nlevels())
            .map(|zoom| self.level_tile_limits(bounds, zoom))
            .collect()
    }
    /// XYZ tile index limits covering `bounds` at `zoom`
    ///
    /// Panics if `zoom` is not a level of the grid.
    pub fn level_tile_limits(&self, bounds: &BoundingBox, zoom: u8) -> TileLimits {
        // Based on mapcache_grid_compute_limits
        const EPSILON: f64 = 0.0000001;
        let res = self.resolutions[zoom as usize];
        let unitheight = self.height as f64 * res;
        let unitwidth = self.width as f64 * res;
        let (level_maxx, level_maxy) = self.level_max[zoom as usize];

        // to avoid requesting out-of-range tiles
        let clamp = |v: f64, max: u32| v.max(0.0).min(max as f64) as u32;

        let minx = ((bounds.left - self.extent.left) / unitwidth + EPSILON).floor();
        let maxx = ((bounds.right - self.extent.left) / unitwidth - EPSILON).ceil();
        let (miny, maxy) = match self.origin {
            Origin::TopLeft => (
                clamp(
                    ((self.extent.top - bounds.top) / unitheight + EPSILON).floor(),
                    level_maxy,
                ),
                clamp(
                    ((self.extent.top - bounds.bottom) / unitheight - EPSILON).ceil(),
                    level_maxy,
                ),
            ),
            Origin::BottomLeft => {
                // grid rows counted from the bottom, flipped to XYZ rows
                let native_miny = clamp(
                    ((bounds.bottom - self.extent.bottom) / unitheight + EPSILON).floor(),
                    level_maxy,
                );
                let native_maxy = clamp(
                    ((bounds.top - self.extent.bottom) / unitheight - EPSILON).ceil(),
                    level_maxy,
                );
                (level_maxy - native_maxy, level_maxy - native_miny)
            }
        };

        TileLimits {
            minx: clamp(minx, level_maxx),
            miny,
            maxx: clamp(maxx, level_maxx),
            maxy,
        }
    }
    /// True if the tile is part of the grid and touches `bounds`
    pub fn covers(&self, bounds: &BoundingBox, tile: &Tile) -> bool {
        if tile.z >= self.nlevels() {
            return false;
        }
        self.level_tile_limits(bounds, tile.z)
            .contains(tile.x, tile.y)
    }
}

/// Returns the Spherical Mercator (x, y) in meters
pub fn lonlat_to_merc(lon: f64, lat: f64) -> (f64, f64) {
    let x = 6378137.0 * lon.to_radians();
    let y = 6378137.0 * ((consts::PI * 0.25) + (0.5 * lat.to_radians())).tan().ln();
    (x, y)
}

/// Projected bounds
pub fn bounds_wgs84_to_merc(bounds: &BoundingBox) -> BoundingBox {
    let (left, bottom) = lonlat_to_merc(bounds.left, bounds.bottom);
    let (right, top) = lonlat_to_merc(bounds.right, bounds.top);
    BoundingBox {
        left,
        bottom,
        right,
        top,
    }
}
