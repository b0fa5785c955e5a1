//! # Entity System
//!
//! Entities are the dynamic objects on a map: the player, monsters, and
//! anything else with a position and a glyph. An entity knows nothing about
//! any map — movement is an unconditional coordinate update, and callers
//! validate destinations before asking for one (see [`crate::game::actions`]).
//!
//! New monsters are created by cloning prototype templates from the
//! [`templates`] catalog into a map with [`Entity::spawn`].

use crate::game::map::GameMap;
use crate::game::tiles::Rgb;
use crate::game::EntityId;
use serde::{Deserialize, Serialize};

/// A positioned, renderable game object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub x: i32,
    pub y: i32,
    /// Display character
    pub ch: char,
    /// Foreground color used when drawing the entity
    pub color: Rgb,
    pub name: String,
    /// Whether this entity blocks movement through its cell
    pub blocks_movement: bool,
}

impl Entity {
    /// Creates a new entity at the given position.
    pub fn new(
        x: i32,
        y: i32,
        ch: char,
        color: Rgb,
        name: impl Into<String>,
        blocks_movement: bool,
    ) -> Self {
        Self {
            x,
            y,
            ch,
            color,
            name: name.into(),
            blocks_movement,
        }
    }

    /// The entity's current position as a pair.
    pub fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    /// Moves the entity by the given delta.
    ///
    /// No bounds or collision check is performed here; the action layer
    /// validates the destination first.
    pub fn walk(&mut self, dx: i32, dy: i32) {
        self.x += dx;
        self.y += dy;
    }

    /// Clones this template into `map` at `(x, y)` and returns the new
    /// entity's handle.
    ///
    /// The clone is a full structural copy: mutating it later never affects
    /// the template. No bounds or occupancy validation is performed —
    /// callers ensure the target cell is in bounds and free.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::game::{templates, GameMap};
    ///
    /// let mut map = GameMap::new(10, 10);
    /// let orc = templates::orc();
    /// let id = orc.spawn(&mut map, 3, 4);
    /// assert_eq!(map.entity(id).unwrap().position(), (3, 4));
    /// assert_eq!(orc.position(), (0, 0)); // template untouched
    /// ```
    pub fn spawn(&self, map: &mut GameMap, x: i32, y: i32) -> EntityId {
        let mut clone = self.clone();
        clone.x = x;
        clone.y = y;
        map.insert(clone)
    }
}

/// Prototype catalog for the entities the generator places.
///
/// Templates are created at the origin; position is assigned at spawn time.
pub mod templates {
    use super::Entity;
    use crate::game::tiles::{Rgb, WHITE};

    /// The player character.
    pub fn player() -> Entity {
        Entity::new(0, 0, '@', WHITE, "Player", true)
    }

    /// A lowly orc.
    pub fn orc() -> Entity {
        Entity::new(0, 0, 'o', Rgb(63, 127, 63), "Orc", true)
    }

    /// A hulking troll.
    pub fn troll() -> Entity {
        Entity::new(0, 0, 'T', Rgb(0, 127, 0), "Troll", true)
    }
}
