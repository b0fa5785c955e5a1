//! # Dungeon Generation
//!
//! Room-and-corridor dungeon generation.
//!
//! The generator runs a fixed budget of independent room attempts: each
//! attempt draws a random rectangle, rejects it if it intersects any
//! previously accepted room, and otherwise carves it into the map. Accepted
//! rooms are chained together with L-shaped corridors and populated with
//! monsters cloned from the template catalog. There is no backtracking or
//! convergent search, so generation cost is bounded by the attempt budget.

use crate::game::entity::{templates, Entity};
use crate::game::map::GameMap;
use crate::game::tiles::FLOOR;
use crate::game::{EntityId, Position};
use crate::generation::{GenerationConfig, RectangularRoom};
use crate::{DelveError, DelveResult};
use rand::{rngs::StdRng, Rng};

/// The output of a generation run.
///
/// Rooms are included for callers that want to inspect or post-process the
/// layout (tests, stair placement); the map itself does not retain them.
#[derive(Debug, Clone)]
pub struct GeneratedDungeon {
    /// The populated map
    pub map: GameMap,
    /// Handle to the player entity on the map
    pub player: EntityId,
    /// The accepted rooms, in acceptance order
    pub rooms: Vec<RectangularRoom>,
}

/// Room-and-corridor dungeon generator.
///
/// # Examples
///
/// ```
/// use delve::{DungeonGenerator, GenerationConfig};
/// use delve::game::templates;
///
/// let config = GenerationConfig::for_testing(12345);
/// let mut rng = config.create_rng();
/// let generator = DungeonGenerator::new(config);
/// let dungeon = generator.generate(templates::player(), &mut rng).unwrap();
/// assert!(dungeon.map.entity(dungeon.player).is_some());
/// assert!(!dungeon.rooms.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct DungeonGenerator {
    config: GenerationConfig,
}

impl DungeonGenerator {
    /// Creates a generator for the given configuration.
    pub fn new(config: GenerationConfig) -> Self {
        Self { config }
    }

    /// The configuration this generator runs with.
    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Generates a populated dungeon map.
    ///
    /// The `player` template becomes the map's first entity and is placed at
    /// the center of the first accepted room. Fails with
    /// [`DelveError::InvalidConfig`] before touching the RNG if the
    /// configuration cannot produce a dungeon; no partial map is ever
    /// returned.
    pub fn generate(&self, player: Entity, rng: &mut StdRng) -> DelveResult<GeneratedDungeon> {
        self.config.validate()?;

        let mut map = GameMap::new(self.config.map_width, self.config.map_height);
        let player_id = map.insert(player);
        let mut rooms: Vec<RectangularRoom> = Vec::new();

        for attempt in 0..self.config.max_rooms {
            let room_width = rng.gen_range(self.config.room_min_size..=self.config.room_max_size);
            let room_height = rng.gen_range(self.config.room_min_size..=self.config.room_max_size);

            // Keep a 1-tile margin on the far edges so the room's border
            // never touches the map edge.
            let x = rng.gen_range(0..=self.config.map_width - room_width - 1);
            let y = rng.gen_range(0..=self.config.map_height - room_height - 1);

            let new_room = RectangularRoom::new(x, y, room_width, room_height);

            // A failed attempt is simply discarded; max_rooms is a budget,
            // not a guaranteed room count.
            if rooms.iter().any(|other| new_room.intersects(other)) {
                continue;
            }

            for pos in new_room.inner() {
                map.set_tile(pos.x, pos.y, FLOOR)?;
            }

            if let Some(previous) = rooms.last() {
                for pos in tunnel_between(previous.center(), new_room.center(), rng) {
                    map.set_tile(pos.x, pos.y, FLOOR)?;
                }
            } else {
                // First accepted room: the player starts at its center.
                let center = new_room.center();
                if let Some(player) = map.entity_mut(player_id) {
                    player.x = center.x;
                    player.y = center.y;
                }
            }

            place_entities(&new_room, &mut map, self.config.max_monsters_per_room, rng);

            log::debug!(
                "accepted room {} of {} attempts: ({}, {}) {}x{}",
                rooms.len() + 1,
                attempt + 1,
                x,
                y,
                room_width,
                room_height
            );
            rooms.push(new_room);
        }

        if rooms.is_empty() {
            return Err(DelveError::GenerationFailed(
                "no rooms were accepted".to_string(),
            ));
        }

        log::debug!(
            "generated dungeon: {} rooms, {} entities",
            rooms.len(),
            map.entity_count()
        );
        Ok(GeneratedDungeon {
            map,
            player: player_id,
            rooms,
        })
    }
}

/// Generates a dungeon using an RNG seeded from the configuration.
///
/// Convenience wrapper around [`DungeonGenerator::generate`].
pub fn generate_dungeon(
    config: &GenerationConfig,
    player: Entity,
) -> DelveResult<GeneratedDungeon> {
    let mut rng = config.create_rng();
    DungeonGenerator::new(config.clone()).generate(player, &mut rng)
}

/// Places monsters in a room's interior.
///
/// Draws a monster count in `[0, max_monsters]`, then for each draw picks a
/// random interior cell. If the cell is already occupied by any entity the
/// draw is forfeited — no retry. Otherwise an orc (p = 0.8) or a troll
/// (p = 0.2) is spawned from the template catalog.
pub fn place_entities(
    room: &RectangularRoom,
    map: &mut GameMap,
    max_monsters: u32,
    rng: &mut StdRng,
) {
    let number_of_monsters = rng.gen_range(0..=max_monsters);

    for _ in 0..number_of_monsters {
        let x = rng.gen_range(room.x1 + 1..room.x2);
        let y = rng.gen_range(room.y1 + 1..room.y2);

        if map.entity_at(x, y).is_some() {
            continue;
        }

        let template = if rng.gen_bool(0.8) {
            templates::orc()
        } else {
            templates::troll()
        };
        template.spawn(map, x, y);
    }
}

/// Yields the cells of an L-shaped tunnel between two points.
///
/// A coin flip picks the corner: `(end.x, start.y)` runs horizontally first,
/// `(start.x, end.y)` vertically first. Both legs are walked with
/// [`bresenham`], so every yielded step moves by one cell in at most one
/// axis and both endpoints are included. If `start == end` the tunnel is a
/// single point.
pub fn tunnel_between(
    start: Position,
    end: Position,
    rng: &mut StdRng,
) -> impl Iterator<Item = Position> {
    let corner = if rng.gen_bool(0.5) {
        Position::new(end.x, start.y)
    } else {
        Position::new(start.x, end.y)
    };

    // The corner ends one leg and starts the other; drop the repeat.
    let mut last = None;
    bresenham(start, corner)
        .chain(bresenham(corner, end))
        .filter(move |&pos| {
            if last == Some(pos) {
                false
            } else {
                last = Some(pos);
                true
            }
        })
}

/// Integer line walk from `start` to `end`, inclusive of both endpoints.
#[derive(Debug, Clone)]
pub struct Bresenham {
    x: i32,
    y: i32,
    end: Position,
    dx: i32,
    dy: i32,
    sx: i32,
    sy: i32,
    err: i32,
    done: bool,
}

/// Creates a [`Bresenham`] walk between two grid points.
pub fn bresenham(start: Position, end: Position) -> Bresenham {
    let dx = (end.x - start.x).abs();
    let dy = -(end.y - start.y).abs();
    Bresenham {
        x: start.x,
        y: start.y,
        end,
        dx,
        dy,
        sx: if start.x < end.x { 1 } else { -1 },
        sy: if start.y < end.y { 1 } else { -1 },
        err: dx + dy,
        done: false,
    }
}

impl Iterator for Bresenham {
    type Item = Position;

    fn next(&mut self) -> Option<Position> {
        if self.done {
            return None;
        }
        let current = Position::new(self.x, self.y);
        if current == self.end {
            self.done = true;
            return Some(current);
        }
        let e2 = 2 * self.err;
        if e2 >= self.dy {
            self.err += self.dy;
            self.x += self.sx;
        }
        if e2 <= self.dx {
            self.err += self.dx;
            self.y += self.sy;
        }
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bresenham_horizontal() {
        let points: Vec<Position> = bresenham(Position::new(2, 5), Position::new(6, 5)).collect();
        assert_eq!(
            points,
            vec![
                Position::new(2, 5),
                Position::new(3, 5),
                Position::new(4, 5),
                Position::new(5, 5),
                Position::new(6, 5),
            ]
        );
    }

    #[test]
    fn test_bresenham_reverse_vertical() {
        let points: Vec<Position> = bresenham(Position::new(0, 4), Position::new(0, 1)).collect();
        assert_eq!(points.first(), Some(&Position::new(0, 4)));
        assert_eq!(points.last(), Some(&Position::new(0, 1)));
        assert_eq!(points.len(), 4);
    }

    #[test]
    fn test_bresenham_diagonal_unit_steps() {
        let start = Position::new(1, 1);
        let end = Position::new(7, 4);
        let points: Vec<Position> = bresenham(start, end).collect();
        assert_eq!(points.first(), Some(&start));
        assert_eq!(points.last(), Some(&end));
        for pair in points.windows(2) {
            let step = pair[1] - pair[0];
            assert!(step.x.abs() <= 1 && step.y.abs() <= 1);
            assert_ne!((step.x, step.y), (0, 0));
        }
    }

    #[test]
    fn test_bresenham_single_point() {
        let points: Vec<Position> = bresenham(Position::new(3, 3), Position::new(3, 3)).collect();
        assert_eq!(points, vec![Position::new(3, 3)]);
    }

    #[test]
    fn test_tunnel_includes_both_endpoints() {
        let config = GenerationConfig::for_testing(99);
        let mut rng = config.create_rng();
        let start = Position::new(2, 2);
        let end = Position::new(10, 7);
        let points: Vec<Position> = tunnel_between(start, end, &mut rng).collect();
        assert_eq!(points.first(), Some(&start));
        assert_eq!(points.last(), Some(&end));
    }

    #[test]
    fn test_tunnel_steps_one_axis_at_a_time() {
        let config = GenerationConfig::for_testing(7);
        let mut rng = config.create_rng();
        let points: Vec<Position> =
            tunnel_between(Position::new(0, 0), Position::new(9, 6), &mut rng).collect();
        for pair in points.windows(2) {
            let step = pair[1] - pair[0];
            assert_eq!(step.x.abs() + step.y.abs(), 1, "bad step {step:?}");
        }
    }

    #[test]
    fn test_tunnel_degenerate_is_single_point() {
        let config = GenerationConfig::for_testing(3);
        let mut rng = config.create_rng();
        let p = Position::new(4, 4);
        let points: Vec<Position> = tunnel_between(p, p, &mut rng).collect();
        assert_eq!(points, vec![p]);
    }

    #[test]
    fn test_generate_rejects_bad_config() {
        let mut config = GenerationConfig::for_testing(1);
        config.room_min_size = 12;
        config.room_max_size = 5;
        let mut rng = config.create_rng();
        let result = DungeonGenerator::new(config).generate(templates::player(), &mut rng);
        assert!(matches!(result, Err(DelveError::InvalidConfig(_))));
    }

    #[test]
    fn test_generate_produces_floor_and_player() {
        let config = GenerationConfig::for_testing(12345);
        let dungeon = generate_dungeon(&config, templates::player()).unwrap();

        let player = dungeon.map.entity(dungeon.player).unwrap();
        assert!(dungeon.map.is_walkable(player.x, player.y));

        let mut floor_count = 0;
        for y in 0..dungeon.map.height {
            for x in 0..dungeon.map.width {
                if dungeon.map.tile(x, y).unwrap() == FLOOR {
                    floor_count += 1;
                }
            }
        }
        assert!(floor_count > 0);
    }

    #[test]
    fn test_place_entities_respects_occupancy() {
        let mut map = GameMap::new(20, 20);
        let room = RectangularRoom::new(1, 1, 4, 4);
        for pos in room.inner() {
            map.set_tile(pos.x, pos.y, FLOOR).unwrap();
            templates::orc().spawn(&mut map, pos.x, pos.y);
        }
        let before = map.entity_count();

        let config = GenerationConfig::for_testing(5);
        let mut rng = config.create_rng();
        place_entities(&room, &mut map, 3, &mut rng);

        // Every interior cell was occupied, so every draw was forfeited.
        assert_eq!(map.entity_count(), before);
    }

    #[test]
    fn test_place_entities_zero_cap_spawns_nothing() {
        let mut map = GameMap::new(20, 20);
        let room = RectangularRoom::new(1, 1, 5, 5);
        let config = GenerationConfig::for_testing(5);
        let mut rng = config.create_rng();

        place_entities(&room, &mut map, 0, &mut rng);
        assert_eq!(map.entity_count(), 0);
    }
}
