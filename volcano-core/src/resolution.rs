use crate::constants::{BIG_TILE_PX, MAP_GRID_TILES, SMALL_TILE_PX};

/// Which tile atlas a map is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TileResolution {
    Big,
    #[default]
    Small,
}

impl TileResolution {
    /// Resolution selected by the big-tiles checkbox.
    #[must_use]
    pub const fn from_big_tiles(checked: bool) -> Self {
        if checked { Self::Big } else { Self::Small }
    }

    #[must_use]
    pub const fn tile_px(self) -> u32 {
        match self {
            Self::Big => BIG_TILE_PX,
            Self::Small => SMALL_TILE_PX,
        }
    }

    /// Edge of the square drawing target in pixels.
    #[must_use]
    pub const fn canvas_px(self) -> u32 {
        MAP_GRID_TILES * self.tile_px()
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Big => "big",
            Self::Small => "small",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::TileResolution;

    #[test]
    fn canvas_sizes_follow_the_fixed_grid() {
        assert_eq!(TileResolution::Big.tile_px(), 16);
        assert_eq!(TileResolution::Big.canvas_px(), 1024);
        assert_eq!(TileResolution::Small.tile_px(), 8);
        assert_eq!(TileResolution::Small.canvas_px(), 512);
    }

    #[test]
    fn checkbox_maps_to_resolution() {
        assert_eq!(TileResolution::from_big_tiles(true), TileResolution::Big);
        assert_eq!(TileResolution::from_big_tiles(false), TileResolution::Small);
    }
}
