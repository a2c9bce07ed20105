//! A library for map tile grid calculations
//!
//! ## Predefined grids
//!
//! ```rust
//! use tile_grid::{BoundingBox, Grid, Tile};
//!
//! let grid = Grid::wgs84();
//! assert_eq!(
//!     grid.xy_bounds(&Tile::new(0, 0, 0)),
//!     BoundingBox::new(-180.0, -90.0, 0.0, 90.0)
//! );
//! ```
//!
//! ## Tile coverage
//!
//! ```rust
//! use tile_grid::{BoundingBox, Grid, Tile};
//!
//! let grid = Grid::wgs84();
//! let eastern = BoundingBox::new(10.0, -10.0, 20.0, 10.0);
//! assert!(grid.covers(&eastern, &Tile::new(1, 0, 0)));
//! assert!(!grid.covers(&eastern, &Tile::new(0, 0, 0)));
//! ```
//!
//! ## Custom grids
//!
//! ```rust
//! use tile_grid::{BoundingBox, Grid, Origin, Tile, Unit};
//!
//! let grid = Grid::new(
//!     256,
//!     256,
//!     BoundingBox::new(2420000.0, 1030000.0, 2900000.0, 1350000.0),
//!     2056,
//!     Unit::Meters,
//!     vec![
//!         4000.0, 3750.0, 3500.0, 3250.0, 3000.0, 2750.0, 2500.0, 2250.0, 2000.0, 1750.0, 1500.0,
//!         1250.0, 1000.0, 750.0, 650.0, 500.0, 250.0, 100.0, 50.0, 20.0, 10.0, 5.0, 2.5, 2.0,
//!         1.5, 1.0, 0.5,
//!     ],
//!     Origin::TopLeft,
//! );
//! assert_eq!(
//!     grid.xy_bounds(&Tile::new(0, 0, 15)),
//!     BoundingBox::new(2420000.0, 1222000.0, 2548000.0, 1350000.0)
//! );
//! ```

mod grid;

pub use grid::{bounds_wgs84_to_merc, lonlat_to_merc, BoundingBox, Grid, Origin, Tile, TileLimits, Unit};
