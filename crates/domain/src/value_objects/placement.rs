//! Placement geometry: ground coordinates, world positions, and headings.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A point on the ground plane of a world partition.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinates {
    pub x: f32,
    pub y: f32,
}

impl Coordinates {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: Coordinates) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A world position. `z` is height; ground coordinates map to `x`/`y`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub z: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, z: f32, y: f32) -> Self {
        Self { x, z, y }
    }

    /// Position at terrain height zero, which the world snaps to the ground.
    pub fn on_ground(at: Coordinates) -> Self {
        Self::new(at.x, 0.0, at.y)
    }

    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.x, self.y)
    }
}

/// A heading in whole degrees, kept in `0..360`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Angle(i32);

impl Angle {
    pub fn degrees(degrees: i32) -> Self {
        Self(degrees.rem_euclid(360))
    }

    pub fn as_degrees(&self) -> i32 {
        self.0
    }

    /// The opposite heading.
    pub fn half_turn(self) -> Self {
        Self::degrees(self.0 + 180)
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn angle_normalizes_into_a_full_turn() {
        assert_eq!(Angle::degrees(450).as_degrees(), 90);
        assert_eq!(Angle::degrees(-90).as_degrees(), 270);
    }

    #[test]
    fn half_turn_adds_180() {
        assert_eq!(Angle::degrees(90).half_turn().as_degrees(), 270);
        assert_eq!(Angle::degrees(270).half_turn().as_degrees(), 90);
    }

    #[test]
    fn ground_position_drops_height() {
        let pos = Position::on_ground(Coordinates::new(10.0, -20.0));
        assert_eq!(pos, Position::new(10.0, 0.0, -20.0));
        assert_eq!(pos.coordinates(), Coordinates::new(10.0, -20.0));
    }

    #[test]
    fn distance_is_euclidean() {
        let a = Coordinates::new(0.0, 0.0);
        let b = Coordinates::new(3.0, 4.0);
        assert!((a.distance_to(b) - 5.0).abs() < f32::EPSILON);
    }
}
