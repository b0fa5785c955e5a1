//! # Delve
//!
//! A turn-based dungeon-crawler prototype built around a procedural dungeon
//! generator and a tile-based map model.
//!
//! ## Architecture Overview
//!
//! The crate is organized around a small number of core pieces:
//!
//! - **Tile registry**: static tile attributes (walkable, transparent) plus
//!   the glyphs used to draw each tile when lit, remembered, or never seen
//! - **Entity system**: positioned, renderable game objects cloned into a
//!   map from prototype templates
//! - **Game map**: a dense tile grid with parallel visibility overlays and
//!   the set of entities placed on it
//! - **Generation system**: room-and-corridor dungeon generation driven by
//!   a seeded RNG and a validated configuration
//!
//! The windowing loop, keyboard dispatch, and field-of-view computation are
//! deliberately outside the core: the map exposes the data they need
//! ([`game::GameMap::render`], the visibility setters) and nothing more.

pub mod game;
pub mod generation;
pub mod rendering;

pub use game::{
    Action, Direction, Entity, EntityId, Frame, GameMap, Glyph, Position, Rgb, TileType,
};
pub use generation::{DungeonGenerator, GeneratedDungeon, GenerationConfig, RectangularRoom};

/// Core error type for the delve crate.
#[derive(thiserror::Error, Debug)]
pub enum DelveError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Generation parameters are unusable
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Dungeon generation failed
    #[error("Generation failed: {0}")]
    GenerationFailed(String),

    /// A tile or entity operation addressed a cell outside the map
    #[error("Out of bounds: ({x}, {y}) on a {width}x{height} map")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    },

    /// A move or placement was rejected
    #[error("Invalid action: {0}")]
    InvalidAction(String),
}

/// Result type used throughout the delve codebase.
pub type DelveResult<T> = Result<T, DelveError>;

/// Version information for the crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default generation parameters.
pub mod config {
    /// Default dungeon width in tiles
    pub const DEFAULT_MAP_WIDTH: i32 = 80;

    /// Default dungeon height in tiles
    pub const DEFAULT_MAP_HEIGHT: i32 = 45;

    /// Default room-attempt budget per dungeon
    pub const DEFAULT_MAX_ROOMS: u32 = 30;

    /// Default minimum room dimension (outer, including walls)
    pub const DEFAULT_ROOM_MIN_SIZE: i32 = 6;

    /// Default maximum room dimension (outer, including walls)
    pub const DEFAULT_ROOM_MAX_SIZE: i32 = 10;

    /// Default cap on monsters placed per room
    pub const DEFAULT_MAX_MONSTERS_PER_ROOM: u32 = 2;
}
