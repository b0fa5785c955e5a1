//! # Delve Entry Point
//!
//! Generates a dungeon from command-line parameters and prints one rendered
//! frame. There is no interactive loop here; the binary exists to exercise
//! the generator and the render path end to end.

use clap::Parser;
use delve::game::templates;
use delve::rendering::TerminalDisplay;
use delve::{config, generation, DelveResult, GenerationConfig};
use log::info;

/// Command line arguments for the delve dungeon generator.
#[derive(Parser, Debug)]
#[command(name = "delve")]
#[command(about = "A turn-based dungeon-crawler prototype")]
#[command(version)]
struct Args {
    /// Random seed for dungeon generation (random if omitted)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Map width in tiles
    #[arg(long, default_value_t = config::DEFAULT_MAP_WIDTH)]
    width: i32,

    /// Map height in tiles
    #[arg(long, default_value_t = config::DEFAULT_MAP_HEIGHT)]
    height: i32,

    /// Room placement attempts
    #[arg(long, default_value_t = config::DEFAULT_MAX_ROOMS)]
    max_rooms: u32,

    /// Minimum room dimension
    #[arg(long, default_value_t = config::DEFAULT_ROOM_MIN_SIZE)]
    room_min_size: i32,

    /// Maximum room dimension
    #[arg(long, default_value_t = config::DEFAULT_ROOM_MAX_SIZE)]
    room_max_size: i32,

    /// Maximum monsters per room
    #[arg(long, default_value_t = config::DEFAULT_MAX_MONSTERS_PER_ROOM)]
    max_monsters: u32,
}

fn main() -> DelveResult<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(rand::random);

    info!("delve v{}, seed {}", delve::VERSION, seed);

    let mut config = GenerationConfig::new(seed);
    config.map_width = args.width;
    config.map_height = args.height;
    config.max_rooms = args.max_rooms;
    config.room_min_size = args.room_min_size;
    config.room_max_size = args.room_max_size;
    config.max_monsters_per_room = args.max_monsters;

    let mut dungeon = generation::generate_dungeon(&config, templates::player())?;
    if let Some(player) = dungeon.map.entity(dungeon.player) {
        info!(
            "{} rooms, {} entities, player at {:?}",
            dungeon.rooms.len(),
            dungeon.map.entity_count(),
            player.position()
        );
    }

    // No field-of-view pass runs here, so light the whole map for display.
    dungeon.map.reveal_all();
    TerminalDisplay::new().present(&dungeon.map.render())?;

    Ok(())
}
