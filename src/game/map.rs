//! # Game Map
//!
//! The map owns a dense grid of tile types, two parallel boolean overlays
//! (visible this turn, ever explored), and the entities placed on it.
//!
//! Entities are stored arena-style, keyed by [`EntityId`]: external code
//! (the caller holding the player's handle, the action layer) keeps the id
//! and resolves it through the map, so mutations are visible everywhere
//! without shared mutable references.
//!
//! The visibility overlays are written by an external field-of-view pass
//! through [`GameMap::set_visible`]; the map itself never computes FOV.

use crate::game::entity::Entity;
use crate::game::tiles::{Glyph, TileType, SHROUD, WALL};
use crate::game::{new_entity_id, EntityId};
use crate::{DelveError, DelveResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A grid-based dungeon map with visibility state and an entity store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameMap {
    pub width: i32,
    pub height: i32,
    /// Tile grid, row-major, initialized to [`WALL`]
    tiles: Vec<TileType>,
    /// Cells currently in view
    visible: Vec<bool>,
    /// Cells that have ever been in view
    explored: Vec<bool>,
    /// All entities on this map, indexed by id
    entities: HashMap<EntityId, Entity>,
}

/// One rendered screen of the map: a grid of display glyphs.
///
/// Produced by [`GameMap::render`]; consumed by whatever frontend actually
/// draws to a screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    pub width: i32,
    pub height: i32,
    cells: Vec<Glyph>,
}

impl Frame {
    /// The glyph at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are outside the frame.
    pub fn get(&self, x: i32, y: i32) -> Glyph {
        assert!(x >= 0 && x < self.width && y >= 0 && y < self.height);
        self.cells[(y * self.width + x) as usize]
    }

    /// Row-major iteration over all cells.
    pub fn cells(&self) -> impl Iterator<Item = &Glyph> {
        self.cells.iter()
    }
}

impl GameMap {
    /// Creates a map of the given dimensions, filled with solid wall and
    /// entirely unexplored.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is not positive.
    pub fn new(width: i32, height: i32) -> Self {
        assert!(width > 0 && height > 0, "map dimensions must be positive");
        let len = (width * height) as usize;
        Self {
            width,
            height,
            tiles: vec![WALL; len],
            visible: vec![false; len],
            explored: vec![false; len],
            entities: HashMap::new(),
        }
    }

    /// Returns true if `(x, y)` lies inside the map grid.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::GameMap;
    ///
    /// let map = GameMap::new(20, 10);
    /// assert!(map.in_bounds(0, 0));
    /// assert!(map.in_bounds(19, 9));
    /// assert!(!map.in_bounds(-1, 0));
    /// assert!(!map.in_bounds(20, 0));
    /// ```
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    fn index(&self, x: i32, y: i32) -> usize {
        debug_assert!(self.in_bounds(x, y));
        (y * self.width + x) as usize
    }

    fn out_of_bounds(&self, x: i32, y: i32) -> DelveError {
        DelveError::OutOfBounds {
            x,
            y,
            width: self.width,
            height: self.height,
        }
    }

    /// The tile at `(x, y)`.
    pub fn tile(&self, x: i32, y: i32) -> DelveResult<TileType> {
        if !self.in_bounds(x, y) {
            return Err(self.out_of_bounds(x, y));
        }
        Ok(self.tiles[self.index(x, y)])
    }

    /// Overwrites the tile at `(x, y)`.
    pub fn set_tile(&mut self, x: i32, y: i32, tile: TileType) -> DelveResult<()> {
        if !self.in_bounds(x, y) {
            return Err(self.out_of_bounds(x, y));
        }
        let idx = self.index(x, y);
        self.tiles[idx] = tile;
        Ok(())
    }

    /// Whether the tile at `(x, y)` can be walked on. Out-of-bounds cells
    /// are not walkable.
    pub fn is_walkable(&self, x: i32, y: i32) -> bool {
        self.in_bounds(x, y) && self.tiles[self.index(x, y)].walkable
    }

    /// Whether `(x, y)` is currently in view.
    pub fn is_visible(&self, x: i32, y: i32) -> bool {
        self.in_bounds(x, y) && self.visible[self.index(x, y)]
    }

    /// Whether `(x, y)` has ever been seen.
    pub fn is_explored(&self, x: i32, y: i32) -> bool {
        self.in_bounds(x, y) && self.explored[self.index(x, y)]
    }

    /// Sets the in-view flag for one cell. Making a cell visible also marks
    /// it explored; clearing visibility leaves the explored flag alone.
    ///
    /// This is the write path for the external field-of-view pass.
    pub fn set_visible(&mut self, x: i32, y: i32, visible: bool) -> DelveResult<()> {
        if !self.in_bounds(x, y) {
            return Err(self.out_of_bounds(x, y));
        }
        let idx = self.index(x, y);
        self.visible[idx] = visible;
        if visible {
            self.explored[idx] = true;
        }
        Ok(())
    }

    /// Marks the whole map visible and explored. Debug/demo helper.
    pub fn reveal_all(&mut self) {
        self.visible.fill(true);
        self.explored.fill(true);
    }

    /// Adds an entity to the map and returns its handle.
    pub fn insert(&mut self, entity: Entity) -> EntityId {
        let id = new_entity_id();
        self.entities.insert(id, entity);
        id
    }

    /// Removes an entity from the map, returning it if it was present.
    ///
    /// External handles to the removed id simply stop resolving.
    pub fn remove(&mut self, id: EntityId) -> Option<Entity> {
        let removed = self.entities.remove(&id);
        if let Some(entity) = &removed {
            log::debug!("removed entity '{}' at {:?}", entity.name, entity.position());
        }
        removed
    }

    /// Looks up an entity by handle.
    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    /// Looks up an entity by handle for mutation.
    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(&id)
    }

    /// Iterates over all entities on the map.
    pub fn entities(&self) -> impl Iterator<Item = (EntityId, &Entity)> {
        self.entities.iter().map(|(id, e)| (*id, e))
    }

    /// Number of entities on the map.
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Finds any entity occupying `(x, y)`.
    pub fn entity_at(&self, x: i32, y: i32) -> Option<(EntityId, &Entity)> {
        self.entities()
            .find(|(_, e)| e.x == x && e.y == y)
    }

    /// Finds a movement-blocking entity occupying `(x, y)`.
    pub fn blocking_entity_at(&self, x: i32, y: i32) -> Option<(EntityId, &Entity)> {
        self.entities()
            .find(|(_, e)| e.blocks_movement && e.x == x && e.y == y)
    }

    /// Produces the display grid for the current map state.
    ///
    /// Per cell, in priority order: in-view cells use the tile's `light`
    /// glyph, remembered cells use `dark`, never-seen cells use [`SHROUD`].
    /// Entities are then overlaid onto cells that are currently visible,
    /// keeping the underlying background color. Draw order is
    /// deterministic: non-blocking entities first, blocking entities last
    /// (so the blocker ends up on top when a cell is shared), ties broken
    /// by entity id.
    ///
    /// This is a pure read; the visibility overlays are not touched.
    pub fn render(&self) -> Frame {
        let mut cells = Vec::with_capacity((self.width * self.height) as usize);
        for y in 0..self.height {
            for x in 0..self.width {
                let idx = self.index(x, y);
                let glyph = if self.visible[idx] {
                    self.tiles[idx].light
                } else if self.explored[idx] {
                    self.tiles[idx].dark
                } else {
                    SHROUD
                };
                cells.push(glyph);
            }
        }

        let mut draw_order: Vec<(EntityId, &Entity)> = self.entities().collect();
        draw_order.sort_by_key(|(id, e)| (e.blocks_movement, *id));

        for (_, entity) in draw_order {
            if !self.is_visible(entity.x, entity.y) {
                continue;
            }
            let idx = self.index(entity.x, entity.y);
            cells[idx].ch = entity.ch;
            cells[idx].fg = entity.color;
        }

        Frame {
            width: self.width,
            height: self.height,
            cells,
        }
    }
}
