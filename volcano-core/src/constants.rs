//! Fixed numbers the orchestration layer relies on.
//!
//! The map grid and tile sizes are dictated by the engine's tile atlases, so
//! they live here rather than in the page configuration.

/// Logical tiles along each axis of a rendered map.
pub const MAP_GRID_TILES: u32 = 64;

/// Tile edge in pixels for the big atlas.
pub const BIG_TILE_PX: u32 = 16;

/// Tile edge in pixels for the small atlas.
pub const SMALL_TILE_PX: u32 = 8;

/// Lowest luck level accepted from the form.
pub const MIN_MAX_LUCK_LEVEL: u32 = 0;

/// Lowest day count accepted from the form. The engine derives the in-game
/// date from `days_played - 1`, so day zero is not representable.
pub const MIN_DAYS_PLAYED: u32 = 1;

/// Recomputes triggered by the stress entry point when the page does not
/// configure a count.
pub const DEFAULT_STRESS_ITERATIONS: usize = 1000;
