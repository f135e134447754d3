//! Geographic coordinate type shared by the decoder and the serializer

use geo::{Coord, Point};

/// A single track position in degrees, longitude first
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Coordinate {
    /// Longitude in degrees (x)
    pub lon: f64,
    /// Latitude in degrees (y)
    pub lat: f64,
}

impl Coordinate {
    /// Create a new coordinate from longitude and latitude
    #[inline]
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Check if both components lie within the WGS84 degree ranges
    #[inline]
    pub fn is_valid_wgs84(&self) -> bool {
        (-180.0..=180.0).contains(&self.lon) && (-90.0..=90.0).contains(&self.lat)
    }
}

impl From<Coordinate> for Coord<f64> {
    #[inline]
    fn from(c: Coordinate) -> Self {
        Coord { x: c.lon, y: c.lat }
    }
}

impl From<Coord<f64>> for Coordinate {
    #[inline]
    fn from(c: Coord<f64>) -> Self {
        Coordinate::new(c.x, c.y)
    }
}

impl From<Coordinate> for Point<f64> {
    #[inline]
    fn from(c: Coordinate) -> Self {
        Point::new(c.lon, c.lat)
    }
}

impl From<Point<f64>> for Coordinate {
    #[inline]
    fn from(p: Point<f64>) -> Self {
        Coordinate::new(p.x(), p.y())
    }
}
