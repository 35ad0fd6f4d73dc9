use std::hash::Hasher;

use twox_hash::XxHash64;
use volcano_core::constants::MAP_GRID_TILES;
use volcano_core::headless::{ChoiceBoard, HeadlessCanvas};
use volcano_core::{EngineError, GameSettings, RenderRequest, SimulationEngine, TileResolution};

/// Levels published on every compute.
pub const DIGEST_LEVELS: i32 = 10;

const TILE_VARIANTS: u64 = 16;

/// Deterministic stand-in for the simulation engine.
///
/// Layouts and tiles are derived from an xxHash64 digest of the settings, so
/// the same inputs always publish the same choices and paint the same map.
pub struct DigestEngine {
    board: ChoiceBoard,
    ready: bool,
    fail_next_compute: bool,
    fail_next_render: bool,
    computes: usize,
}

impl DigestEngine {
    #[must_use]
    pub const fn new(board: ChoiceBoard) -> Self {
        Self {
            board,
            ready: false,
            fail_next_compute: false,
            fail_next_render: false,
            computes: 0,
        }
    }

    /// Make the next `compute_scalar` call fail.
    pub fn fail_next_compute(&mut self) {
        self.fail_next_compute = true;
    }

    /// Make the next `render_map` call fail.
    pub fn fail_next_render(&mut self) {
        self.fail_next_render = true;
    }

    #[must_use]
    pub const fn computes(&self) -> usize {
        self.computes
    }
}

/// Layout the engine offers for `level` under `settings`.
#[must_use]
pub fn layout_for(settings: &GameSettings, level: i32) -> u32 {
    match level {
        0 => 0,
        5 => 31,
        9 => 30,
        _ => u32::try_from(digest(settings, level) % 29).unwrap_or(0) + 1,
    }
}

fn digest(settings: &GameSettings, level: i32) -> u64 {
    let mut hasher = XxHash64::with_seed(0);
    hasher.write_i32(settings.seed);
    hasher.write_u32(settings.days_played);
    hasher.write_u32(settings.max_luck_level);
    for flag in [
        settings.legacy_rng,
        settings.post_update,
        settings.has_caldera,
        settings.cracked_golden_coconut,
        settings.special_charm,
    ] {
        hasher.write_u8(u8::from(flag));
    }
    hasher.write_i32(level);
    hasher.finish()
}

impl SimulationEngine for DigestEngine {
    type Target = HeadlessCanvas;
    type Atlas = TileResolution;

    fn initialize(&mut self) -> Result<(), EngineError> {
        self.ready = true;
        Ok(())
    }

    fn compute_scalar(&mut self, settings: &GameSettings) -> Result<String, EngineError> {
        if !self.ready {
            return Err(EngineError::NotInitialized);
        }
        if std::mem::take(&mut self.fail_next_compute) {
            return Err(EngineError::Compute("injected compute failure".into()));
        }
        self.computes += 1;
        let pairs = (0..DIGEST_LEVELS)
            .map(|level| (level, layout_for(settings, level)))
            .collect();
        self.board.publish(pairs);
        Ok(format!(
            "day {}: seed {} digest {:016x}",
            settings.days_played,
            settings.seed,
            digest(settings, -1)
        ))
    }

    fn render_map(
        &mut self,
        request: &RenderRequest<'_, HeadlessCanvas, TileResolution>,
    ) -> Result<String, EngineError> {
        let selection = request.selection;
        if !self.ready {
            return Err(EngineError::NotInitialized);
        }
        if std::mem::take(&mut self.fail_next_render) {
            return Err(EngineError::Render {
                level: selection.level,
                layout: selection.layout,
                message: "injected render failure".into(),
            });
        }
        let base = digest(&request.settings, selection.level) ^ u64::from(selection.layout);
        for y in 0..MAP_GRID_TILES {
            for x in 0..MAP_GRID_TILES {
                let mixed = base.rotate_left((x + y) % 64) ^ u64::from(x * MAP_GRID_TILES + y);
                let tile = u8::try_from(mixed % TILE_VARIANTS).unwrap_or(0);
                request.target.paint(x, y, tile);
            }
        }
        Ok(format!(
            "level {} layout {} at {} px ({})",
            selection.level,
            selection.layout,
            request.tile_px,
            request.atlas.label()
        ))
    }
}
