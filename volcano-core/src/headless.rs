//! In-memory stand-ins for the browser page, used by the tester binary and
//! by integration tests.

use std::cell::{Ref, RefCell};
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

use serde::Serialize;

use crate::choices::{ChoiceControl, controls_from_pairs};
use crate::constants::MAP_GRID_TILES;
use crate::resolution::TileResolution;
use crate::settings::{GameSettings, NumericField, SettingsForm, ToggleField};
use crate::surface::{MapPanel, Presentation};

/// A settings form backed by plain maps.
#[derive(Debug, Clone, Default)]
pub struct FormValues {
    text: HashMap<NumericField, String>,
    checked: HashMap<ToggleField, bool>,
}

impl FormValues {
    /// Form whose controls hold exactly the given snapshot.
    #[must_use]
    pub fn from_settings(settings: &GameSettings) -> Self {
        Self::default()
            .with_text(NumericField::Seed, settings.seed.to_string())
            .with_text(NumericField::MaxLuckLevel, settings.max_luck_level.to_string())
            .with_text(NumericField::DaysPlayed, settings.days_played.to_string())
            .with_toggle(ToggleField::LegacyRng, settings.legacy_rng)
            .with_toggle(ToggleField::PostUpdate, settings.post_update)
            .with_toggle(ToggleField::HasCaldera, settings.has_caldera)
            .with_toggle(ToggleField::CrackedCoconut, settings.cracked_golden_coconut)
            .with_toggle(ToggleField::SpecialCharm, settings.special_charm)
    }

    #[must_use]
    pub fn with_text(mut self, field: NumericField, text: impl Into<String>) -> Self {
        self.set_text(field, text);
        self
    }

    #[must_use]
    pub fn with_toggle(mut self, field: ToggleField, checked: bool) -> Self {
        self.set_checked(field, checked);
        self
    }

    pub fn set_text(&mut self, field: NumericField, text: impl Into<String>) {
        self.text.insert(field, text.into());
    }

    pub fn set_checked(&mut self, field: ToggleField, checked: bool) {
        self.checked.insert(field, checked);
    }
}

impl SettingsForm for FormValues {
    fn text(&self, field: NumericField) -> String {
        self.text.get(&field).cloned().unwrap_or_default()
    }

    fn checked(&self, field: ToggleField) -> bool {
        self.checked.get(&field).copied().unwrap_or(false)
    }
}

/// Shared list of (level, layout) pairs standing in for the choice markup
/// an engine writes into the page.
#[derive(Debug, Clone, Default)]
pub struct ChoiceBoard(Rc<RefCell<Vec<(i32, u32)>>>);

impl ChoiceBoard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole board.
    pub fn publish(&self, pairs: Vec<(i32, u32)>) {
        *self.0.borrow_mut() = pairs;
    }

    #[must_use]
    pub fn pairs(&self) -> Vec<(i32, u32)> {
        self.0.borrow().clone()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanvasBuffer {
    side_px: u32,
    tiles: Vec<Option<u8>>,
}

impl CanvasBuffer {
    fn sized(side_px: u32) -> Self {
        let cells = (MAP_GRID_TILES * MAP_GRID_TILES) as usize;
        Self {
            side_px,
            tiles: vec![None; cells],
        }
    }

    #[must_use]
    pub const fn side_px(&self) -> u32 {
        self.side_px
    }

    /// Tile index drawn at a grid cell, if any.
    #[must_use]
    pub fn tile_at(&self, x: u32, y: u32) -> Option<u8> {
        self.index(x, y).and_then(|i| self.tiles[i])
    }

    #[must_use]
    pub fn painted_cells(&self) -> usize {
        self.tiles.iter().filter(|t| t.is_some()).count()
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        (x < MAP_GRID_TILES && y < MAP_GRID_TILES).then(|| (y * MAP_GRID_TILES + x) as usize)
    }
}

/// Drawing target handed to engines by [`HeadlessSurface`].
#[derive(Debug, Clone)]
pub struct HeadlessCanvas(Rc<RefCell<CanvasBuffer>>);

impl HeadlessCanvas {
    fn new(side_px: u32) -> Self {
        Self(Rc::new(RefCell::new(CanvasBuffer::sized(side_px))))
    }

    /// Draw tile `tile` into grid cell (`x`, `y`). Out-of-grid cells are ignored.
    pub fn paint(&self, x: u32, y: u32, tile: u8) {
        let mut buffer = self.0.borrow_mut();
        if let Some(i) = buffer.index(x, y) {
            buffer.tiles[i] = Some(tile);
        }
    }

    #[must_use]
    pub fn buffer(&self) -> Ref<'_, CanvasBuffer> {
        self.0.borrow()
    }

    fn resize(&self, side_px: u32) {
        *self.0.borrow_mut() = CanvasBuffer::sized(side_px);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VisiblePanel {
    Placeholder,
    Map,
}

/// Presentation surface that records what a page would show.
#[derive(Debug)]
pub struct HeadlessSurface {
    board: ChoiceBoard,
    big_tiles: bool,
    result_text: String,
    panel: VisiblePanel,
    notes: String,
    canvas: HeadlessCanvas,
    handlers: BTreeMap<ChoiceControl, u32>,
    discovered: Vec<ChoiceControl>,
    stray_detaches: u32,
}

impl HeadlessSurface {
    #[must_use]
    pub fn new(board: ChoiceBoard) -> Self {
        Self {
            board,
            big_tiles: false,
            result_text: String::new(),
            panel: VisiblePanel::Placeholder,
            notes: String::new(),
            canvas: HeadlessCanvas::new(0),
            handlers: BTreeMap::new(),
            discovered: Vec::new(),
            stray_detaches: 0,
        }
    }

    pub fn set_big_tiles(&mut self, big: bool) {
        self.big_tiles = big;
    }

    #[must_use]
    pub fn result_text(&self) -> &str {
        &self.result_text
    }

    #[must_use]
    pub const fn visible_panel(&self) -> VisiblePanel {
        self.panel
    }

    #[must_use]
    pub fn notes(&self) -> &str {
        &self.notes
    }

    #[must_use]
    pub const fn canvas(&self) -> &HeadlessCanvas {
        &self.canvas
    }

    #[must_use]
    pub fn canvas_side(&self) -> u32 {
        self.canvas.buffer().side_px()
    }

    /// Controls found by the last discovery, in document order.
    #[must_use]
    pub fn discovered(&self) -> &[ChoiceControl] {
        &self.discovered
    }

    /// Handlers currently attached to a control.
    #[must_use]
    pub fn handler_count(&self, control: &ChoiceControl) -> u32 {
        self.handlers.get(control).copied().unwrap_or(0)
    }

    /// Largest number of handlers any single control carries.
    #[must_use]
    pub fn max_handler_multiplicity(&self) -> u32 {
        self.handlers.values().copied().max().unwrap_or(0)
    }

    #[must_use]
    pub fn total_handlers(&self) -> u32 {
        self.handlers.values().sum()
    }

    /// Detach requests for controls that had no handler.
    #[must_use]
    pub const fn stray_detaches(&self) -> u32 {
        self.stray_detaches
    }
}

impl MapPanel for HeadlessSurface {
    fn show_placeholder(&mut self) {
        self.panel = VisiblePanel::Placeholder;
        self.notes.clear();
    }

    fn show_map(&mut self, notes: &str) {
        self.panel = VisiblePanel::Map;
        notes.clone_into(&mut self.notes);
    }
}

impl Presentation for HeadlessSurface {
    type Target = HeadlessCanvas;
    type Atlas = TileResolution;

    fn set_result_text(&mut self, text: &str) {
        text.clone_into(&mut self.result_text);
    }

    fn resolution(&self) -> TileResolution {
        TileResolution::from_big_tiles(self.big_tiles)
    }

    fn prepare_canvas(&mut self, side_px: u32) -> HeadlessCanvas {
        self.canvas.resize(side_px);
        self.canvas.clone()
    }

    fn atlas(&self, resolution: TileResolution) -> TileResolution {
        resolution
    }

    fn discover_choices(&mut self) -> Vec<ChoiceControl> {
        self.discovered = controls_from_pairs(self.board.pairs());
        self.discovered.clone()
    }

    fn attach_choice_handler(&mut self, control: ChoiceControl) {
        *self.handlers.entry(control).or_insert(0) += 1;
    }

    fn detach_choice_handler(&mut self, control: ChoiceControl) {
        match self.handlers.get_mut(&control) {
            Some(count) if *count > 1 => *count -= 1,
            Some(_) => {
                self.handlers.remove(&control);
            }
            None => {
                log::warn!("detach for unbound control {control:?}");
                self.stray_detaches += 1;
            }
        }
    }
}
