//! Utility functions for summarizing decoded tracks

use crate::Coordinate;
use geo::Rect;

/// Mean Earth radius in meters
pub const EARTH_RADIUS_M: f64 = 6371000.0;

/// Calculate the Haversine distance between two coordinates in meters
#[inline]
pub fn haversine_distance(p1: &Coordinate, p2: &Coordinate) -> f64 {
    let lat1 = p1.lat.to_radians();
    let lat2 = p2.lat.to_radians();
    let delta_lat = (p2.lat - p1.lat).to_radians();
    let delta_lon = (p2.lon - p1.lon).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_M * c
}

/// Total length of a track in meters, following points in order
pub fn track_length_meters(coordinates: &[Coordinate]) -> f64 {
    coordinates
        .windows(2)
        .map(|pair| haversine_distance(&pair[0], &pair[1]))
        .sum()
}

/// Bounding box of a track in degrees (x = longitude, y = latitude)
///
/// Returns `None` for an empty track.
pub fn bounding_box(coordinates: &[Coordinate]) -> Option<Rect<f64>> {
    let first = coordinates.first()?;
    let (mut min_x, mut min_y) = (first.lon, first.lat);
    let (mut max_x, mut max_y) = (first.lon, first.lat);

    for c in &coordinates[1..] {
        min_x = min_x.min(c.lon);
        min_y = min_y.min(c.lat);
        max_x = max_x.max(c.lon);
        max_y = max_y.max(c.lat);
    }

    Some(Rect::new(
        geo::Coord { x: min_x, y: min_y },
        geo::Coord { x: max_x, y: max_y },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_haversine_zero_for_same_point() {
        let p = Coordinate::new(-0.1278, 51.5074);
        assert!(haversine_distance(&p, &p).abs() < f64::EPSILON);
    }

    #[test]
    fn test_haversine_one_degree_of_latitude() {
        let a = Coordinate::new(0.0, 0.0);
        let b = Coordinate::new(0.0, 1.0);
        // 2 * PI * R / 360
        assert!((haversine_distance(&a, &b) - 111_194.9).abs() < 1.0);
    }

    #[test]
    fn test_track_length() {
        assert_eq!(track_length_meters(&[]), 0.0);
        assert_eq!(track_length_meters(&[Coordinate::new(1.0, 1.0)]), 0.0);

        // Points around London, a few tens of meters apart
        let track = [
            Coordinate::new(-0.1278, 51.5074),
            Coordinate::new(-0.1276, 51.5076),
            Coordinate::new(-0.1274, 51.5078),
        ];
        let length = track_length_meters(&track);
        assert!(length > 0.0);
        assert!(length < 1000.0);
    }

    #[test]
    fn test_bounding_box() {
        assert!(bounding_box(&[]).is_none());

        let bbox = bounding_box(&[
            Coordinate::new(-120.2, 38.5),
            Coordinate::new(-126.453, 43.252),
            Coordinate::new(-120.95, 40.7),
        ])
        .unwrap();
        assert_eq!(bbox.min().x, -126.453);
        assert_eq!(bbox.min().y, 38.5);
        assert_eq!(bbox.max().x, -120.2);
        assert_eq!(bbox.max().y, 43.252);
    }
}
