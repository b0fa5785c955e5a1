//! # Generation Module
//!
//! Procedural dungeon generation: configuration, room geometry, and the
//! room-and-corridor generator itself (see [`dungeon`]).
//!
//! All randomness flows through a seeded [`StdRng`] created from the
//! configuration, so a given seed always reproduces the same dungeon.

pub mod dungeon;

pub use dungeon::*;

use crate::game::Position;
use crate::{config, DelveError, DelveResult};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// Parameters for dungeon generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Random seed for reproducible generation
    pub seed: u64,
    /// Map width in tiles
    pub map_width: i32,
    /// Map height in tiles
    pub map_height: i32,
    /// Room placement attempts per dungeon. Attempts that collide with an
    /// accepted room are discarded, so this is a budget, not a room count.
    pub max_rooms: u32,
    /// Minimum room dimension, outer walls included
    pub room_min_size: i32,
    /// Maximum room dimension, outer walls included
    pub room_max_size: i32,
    /// Upper bound on monsters placed per accepted room
    pub max_monsters_per_room: u32,
}

impl GenerationConfig {
    /// Creates a configuration with the crate defaults and the given seed.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::GenerationConfig;
    ///
    /// let config = GenerationConfig::new(42);
    /// assert_eq!(config.seed, 42);
    /// assert!(config.validate().is_ok());
    /// ```
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            map_width: config::DEFAULT_MAP_WIDTH,
            map_height: config::DEFAULT_MAP_HEIGHT,
            max_rooms: config::DEFAULT_MAX_ROOMS,
            room_min_size: config::DEFAULT_ROOM_MIN_SIZE,
            room_max_size: config::DEFAULT_ROOM_MAX_SIZE,
            max_monsters_per_room: config::DEFAULT_MAX_MONSTERS_PER_ROOM,
        }
    }

    /// Creates a configuration for small, quick-to-generate test maps.
    pub fn for_testing(seed: u64) -> Self {
        Self {
            seed,
            map_width: 30,
            map_height: 20,
            max_rooms: 8,
            room_min_size: 4,
            room_max_size: 6,
            max_monsters_per_room: 1,
        }
    }

    /// Checks that the parameters can actually produce a dungeon.
    ///
    /// Rejecting bad parameters here keeps the generator itself free of
    /// range-selection panics: a room of `room_max_size` must fit inside the
    /// map with the 1-tile far-edge margin the placement step reserves.
    pub fn validate(&self) -> DelveResult<()> {
        if self.map_width <= 0 || self.map_height <= 0 {
            return Err(DelveError::InvalidConfig(format!(
                "map dimensions must be positive, got {}x{}",
                self.map_width, self.map_height
            )));
        }
        if self.max_rooms == 0 {
            return Err(DelveError::InvalidConfig(
                "max_rooms must be at least 1".to_string(),
            ));
        }
        if self.room_min_size < 3 {
            return Err(DelveError::InvalidConfig(format!(
                "room_min_size must be at least 3, got {}",
                self.room_min_size
            )));
        }
        if self.room_min_size > self.room_max_size {
            return Err(DelveError::InvalidConfig(format!(
                "room_min_size {} exceeds room_max_size {}",
                self.room_min_size, self.room_max_size
            )));
        }
        let limit = self.map_width.min(self.map_height) - 1;
        if self.room_max_size > limit {
            return Err(DelveError::InvalidConfig(format!(
                "room_max_size {} cannot fit in a {}x{} map (limit {})",
                self.room_max_size, self.map_width, self.map_height, limit
            )));
        }
        Ok(())
    }

    /// Creates the seeded RNG all generation draws go through.
    pub fn create_rng(&self) -> StdRng {
        StdRng::seed_from_u64(self.seed)
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::new(42)
    }
}

/// An axis-aligned rectangular room, half-open on the far edge.
///
/// Rooms are generation-time values only; they are not retained once the
/// dungeon has been carved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RectangularRoom {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl RectangularRoom {
    /// Creates a room from its top-left corner and outer dimensions.
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x1: x,
            y1: y,
            x2: x + width,
            y2: y + height,
        }
    }

    /// The integer midpoint of the room, floor-rounded.
    pub fn center(&self) -> Position {
        Position::new((self.x1 + self.x2) / 2, (self.y1 + self.y2) / 2)
    }

    /// Iterates over the carvable interior, excluding the wall border.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::RectangularRoom;
    ///
    /// let room = RectangularRoom::new(0, 0, 4, 4);
    /// assert_eq!(room.inner().count(), 9);
    /// ```
    pub fn inner(&self) -> impl Iterator<Item = Position> + '_ {
        let (x1, x2) = (self.x1, self.x2);
        (self.y1 + 1..self.y2).flat_map(move |y| (x1 + 1..x2).map(move |x| Position::new(x, y)))
    }

    /// Whether `pos` lies in the carvable interior.
    pub fn inner_contains(&self, pos: Position) -> bool {
        pos.x > self.x1 && pos.x < self.x2 && pos.y > self.y1 && pos.y < self.y2
    }

    /// Whether this room overlaps another, borders included: two rooms that
    /// share an edge count as intersecting.
    pub fn intersects(&self, other: &RectangularRoom) -> bool {
        self.x1 <= other.x2 && self.x2 >= other.x1 && self.y1 <= other.y2 && self.y2 >= other.y1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults_are_valid() {
        assert!(GenerationConfig::new(7).validate().is_ok());
        assert!(GenerationConfig::for_testing(7).validate().is_ok());
    }

    #[test]
    fn test_config_rejects_min_over_max() {
        let mut config = GenerationConfig::for_testing(1);
        config.room_min_size = 10;
        config.room_max_size = 5;
        assert!(matches!(
            config.validate(),
            Err(DelveError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_config_rejects_oversized_rooms() {
        let mut config = GenerationConfig::for_testing(1);
        config.map_width = 10;
        config.map_height = 10;
        config.room_max_size = 10;
        assert!(config.validate().is_err());

        config.room_max_size = 9;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_rejects_zero_attempts() {
        let mut config = GenerationConfig::for_testing(1);
        config.max_rooms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        use rand::Rng;
        let config = GenerationConfig::new(12345);
        let a: u64 = config.create_rng().gen();
        let b: u64 = config.create_rng().gen();
        assert_eq!(a, b);
    }

    #[test]
    fn test_room_geometry() {
        let room = RectangularRoom::new(5, 5, 10, 8);
        assert_eq!(room.x2, 15);
        assert_eq!(room.y2, 13);
        assert_eq!(room.center(), Position::new(10, 9));
    }

    #[test]
    fn test_room_inner_excludes_border() {
        let room = RectangularRoom::new(2, 2, 4, 5);
        let inner: Vec<Position> = room.inner().collect();
        // 3 columns (x = 3..=5), 4 rows (y = 3..=6)
        assert_eq!(inner.len(), 12);
        assert!(inner.iter().all(|p| p.x > 2 && p.x < 6 && p.y > 2 && p.y < 7));
        assert!(inner.contains(&Position::new(3, 3)));
        assert!(!inner.contains(&Position::new(2, 3)));
        assert!(room.inner_contains(Position::new(5, 6)));
        assert!(!room.inner_contains(Position::new(6, 6)));
    }

    #[test]
    fn test_rooms_sharing_an_edge_intersect() {
        let a = RectangularRoom::new(0, 0, 5, 5);
        let b = RectangularRoom::new(5, 0, 5, 5);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn test_identical_rooms_intersect() {
        let a = RectangularRoom::new(3, 3, 6, 4);
        let b = RectangularRoom::new(3, 3, 6, 4);
        assert!(a.intersects(&b));
    }

    #[test]
    fn test_separated_rooms_do_not_intersect() {
        let a = RectangularRoom::new(0, 0, 5, 5);
        let b = RectangularRoom::new(6, 6, 5, 5);
        assert!(!a.intersects(&b));
        assert!(!b.intersects(&a));
    }
}
