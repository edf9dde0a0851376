//! Coarse geometry used for compass hints
pub mod atlas;

pub use atlas::BoundaryAtlas;

use std::fmt;

/// A point in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Eight-point compass rose
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Compass {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Compass {
    pub const ALL: [Compass; 8] = [
        Compass::North,
        Compass::NorthEast,
        Compass::East,
        Compass::SouthEast,
        Compass::South,
        Compass::SouthWest,
        Compass::West,
        Compass::NorthWest,
    ];

    /// Buckets a bearing in degrees (as returned by `atan2`, so -180..=180)
    /// into a 45° sector. Lower bounds are inclusive.
    pub fn from_degrees(angle: f64) -> Self {
        if (-22.5..22.5).contains(&angle) {
            Compass::North
        } else if (22.5..67.5).contains(&angle) {
            Compass::NorthEast
        } else if (67.5..112.5).contains(&angle) {
            Compass::East
        } else if (112.5..157.5).contains(&angle) {
            Compass::SouthEast
        } else if (-157.5..-112.5).contains(&angle) {
            Compass::SouthWest
        } else if (-112.5..-67.5).contains(&angle) {
            Compass::West
        } else if (-67.5..-22.5).contains(&angle) {
            Compass::NorthWest
        } else {
            // >= 157.5 or < -157.5, plus anything non-finite
            Compass::South
        }
    }

    /// Bearing at the middle of the sector
    pub fn center_degrees(self) -> f64 {
        match self {
            Compass::North => 0.0,
            Compass::NorthEast => 45.0,
            Compass::East => 90.0,
            Compass::SouthEast => 135.0,
            Compass::South => 180.0,
            Compass::SouthWest => -135.0,
            Compass::West => -90.0,
            Compass::NorthWest => -45.0,
        }
    }

    pub fn abbrev(self) -> &'static str {
        match self {
            Compass::North => "N",
            Compass::NorthEast => "NE",
            Compass::East => "E",
            Compass::SouthEast => "SE",
            Compass::South => "S",
            Compass::SouthWest => "SW",
            Compass::West => "W",
            Compass::NorthWest => "NW",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Compass::North => "North",
            Compass::NorthEast => "North-East",
            Compass::East => "East",
            Compass::SouthEast => "South-East",
            Compass::South => "South",
            Compass::SouthWest => "South-West",
            Compass::West => "West",
            Compass::NorthWest => "North-West",
        }
    }
}

impl fmt::Display for Compass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "🧭 {}", self.label())
    }
}

/// Direction to travel from `from` to reach `to`.
///
/// Uses `atan2(Δlng, Δlat)` without scaling longitude by latitude, so it is
/// only good for coarse hints. Identical points come out as North.
pub fn compass_direction(from: LatLng, to: LatLng) -> Compass {
    let d_lat = to.lat - from.lat;
    let d_lng = to.lng - from.lng;
    Compass::from_degrees(d_lng.atan2(d_lat).to_degrees())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cardinal_directions() {
        let origin = LatLng::new(0.0, 0.0);
        assert_eq!(compass_direction(origin, LatLng::new(10.0, 0.0)), Compass::North);
        assert_eq!(compass_direction(origin, LatLng::new(0.0, 10.0)), Compass::East);
        assert_eq!(compass_direction(origin, LatLng::new(-10.0, 0.0)), Compass::South);
        assert_eq!(compass_direction(origin, LatLng::new(0.0, -10.0)), Compass::West);
        assert_eq!(compass_direction(origin, LatLng::new(5.0, 5.0)), Compass::NorthEast);
        assert_eq!(compass_direction(origin, LatLng::new(-5.0, -5.0)), Compass::SouthWest);
    }

    #[test]
    fn sector_lower_bounds_are_inclusive() {
        assert_eq!(Compass::from_degrees(-22.5), Compass::North);
        assert_eq!(Compass::from_degrees(22.5), Compass::NorthEast);
        assert_eq!(Compass::from_degrees(67.5), Compass::East);
        assert_eq!(Compass::from_degrees(112.5), Compass::SouthEast);
        assert_eq!(Compass::from_degrees(157.5), Compass::South);
        assert_eq!(Compass::from_degrees(-157.5), Compass::SouthWest);
        assert_eq!(Compass::from_degrees(-112.5), Compass::West);
        assert_eq!(Compass::from_degrees(-67.5), Compass::NorthWest);
        assert_eq!(Compass::from_degrees(-180.0), Compass::South);
        assert_eq!(Compass::from_degrees(180.0), Compass::South);
    }

    #[test]
    fn same_point_points_north() {
        let p = LatLng::new(41.9, 12.5);
        assert_eq!(compass_direction(p, p), Compass::North);
    }

    #[test]
    fn display_carries_the_glyph() {
        assert_eq!(Compass::SouthEast.to_string(), "🧭 South-East");
        assert_eq!(Compass::SouthEast.abbrev(), "SE");
    }
}
