//! # Tile Registry
//!
//! Static tile definitions: per-tile attributes (walkable, transparent) and
//! the glyphs used to draw a tile depending on its visibility state.
//!
//! Tile types are plain `Copy` records compared by value. The two terrain
//! singletons, [`FLOOR`] and [`WALL`], are written into map grids directly;
//! nothing mutates a tile type after construction.

use serde::{Deserialize, Serialize};

/// An RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

pub const WHITE: Rgb = Rgb(255, 255, 255);
pub const BLACK: Rgb = Rgb(0, 0, 0);

/// A single display cell: character plus foreground and background colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Glyph {
    pub ch: char,
    pub fg: Rgb,
    pub bg: Rgb,
}

impl Glyph {
    /// Creates a new glyph.
    pub const fn new(ch: char, fg: Rgb, bg: Rgb) -> Self {
        Self { ch, fg, bg }
    }
}

/// Static attributes for one kind of terrain tile.
///
/// `dark` is the glyph drawn when the tile is remembered but not currently
/// visible; `light` is the glyph drawn when it is in view. Tiles that do not
/// care about the distinction can be built with [`TileType::new`], which
/// reuses the dark glyph for both states.
///
/// # Examples
///
/// ```
/// use delve::game::tiles::{self, TileType, Glyph, Rgb};
///
/// let lava = TileType::new(false, true, Glyph::new('~', Rgb(255, 64, 0), tiles::BLACK));
/// assert!(!lava.walkable);
/// assert_eq!(lava.light, lava.dark);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileType {
    /// Whether entities can occupy this tile
    pub walkable: bool,
    /// Whether this tile lets field-of-view pass through
    pub transparent: bool,
    /// Glyph for an explored tile that is not currently visible
    pub dark: Glyph,
    /// Glyph for a tile currently in view
    pub light: Glyph,
}

impl TileType {
    /// Creates a tile type whose lit glyph defaults to the dark glyph.
    pub const fn new(walkable: bool, transparent: bool, dark: Glyph) -> Self {
        Self {
            walkable,
            transparent,
            dark,
            light: dark,
        }
    }

    /// Sets a distinct glyph for when the tile is in view.
    pub const fn with_light(mut self, light: Glyph) -> Self {
        self.light = light;
        self
    }
}

/// Glyph for cells the player has never seen.
pub const SHROUD: Glyph = Glyph::new(' ', WHITE, BLACK);

/// Open dungeon floor.
pub const FLOOR: TileType = TileType::new(true, true, Glyph::new(' ', WHITE, Rgb(50, 50, 150)))
    .with_light(Glyph::new(' ', WHITE, Rgb(200, 180, 50)));

/// Solid rock. Maps start filled with this.
pub const WALL: TileType = TileType::new(false, false, Glyph::new(' ', WHITE, Rgb(0, 0, 100)))
    .with_light(Glyph::new(' ', WHITE, Rgb(130, 110, 50)));
