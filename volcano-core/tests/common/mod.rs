#![allow(dead_code)]

use volcano_core::headless::{ChoiceBoard, FormValues, HeadlessCanvas, HeadlessSurface};
use volcano_core::{
    EngineError, GameSettings, NumericField, Orchestrator, RenderRequest, Selection,
    SimulationEngine, TileResolution,
};

#[derive(Debug, Clone, PartialEq)]
pub struct RenderCall {
    pub settings: GameSettings,
    pub selection: Selection,
    pub atlas: TileResolution,
    pub tile_px: u32,
    pub canvas_px: u32,
}

/// Engine double: publishes a fixed board on every compute and records
/// every render.
pub struct RecordingEngine {
    board: ChoiceBoard,
    pub pairs: Vec<(i32, u32)>,
    pub initialized: bool,
    pub fail_init: bool,
    pub fail_compute: bool,
    pub fail_compute_after: Option<usize>,
    pub fail_render: bool,
    pub computes: Vec<GameSettings>,
    pub renders: Vec<RenderCall>,
}

impl RecordingEngine {
    pub fn new(board: ChoiceBoard) -> Self {
        Self {
            board,
            pairs: vec![(0, 0), (1, 12), (2, 1), (2, 33), (5, 31), (9, 30)],
            initialized: false,
            fail_init: false,
            fail_compute: false,
            fail_compute_after: None,
            fail_render: false,
            computes: Vec::new(),
            renders: Vec::new(),
        }
    }
}

impl SimulationEngine for RecordingEngine {
    type Target = HeadlessCanvas;
    type Atlas = TileResolution;

    fn initialize(&mut self) -> Result<(), EngineError> {
        if self.fail_init {
            return Err(EngineError::Init("module missing".into()));
        }
        self.initialized = true;
        Ok(())
    }

    fn compute_scalar(&mut self, settings: &GameSettings) -> Result<String, EngineError> {
        if !self.initialized {
            return Err(EngineError::NotInitialized);
        }
        let exhausted = self
            .fail_compute_after
            .is_some_and(|limit| self.computes.len() >= limit);
        if self.fail_compute || exhausted {
            return Err(EngineError::Compute("boom".into()));
        }
        self.computes.push(*settings);
        self.board.publish(self.pairs.clone());
        Ok(format!("day {} seed {}", settings.days_played, settings.seed))
    }

    fn render_map(
        &mut self,
        request: &RenderRequest<'_, HeadlessCanvas, TileResolution>,
    ) -> Result<String, EngineError> {
        if !self.initialized {
            return Err(EngineError::NotInitialized);
        }
        if self.fail_render {
            return Err(EngineError::Render {
                level: request.selection.level,
                layout: request.selection.layout,
                message: "atlas not loaded".into(),
            });
        }
        request.target.paint(0, 0, 3);
        self.renders.push(RenderCall {
            settings: request.settings,
            selection: request.selection,
            atlas: *request.atlas,
            tile_px: request.tile_px,
            canvas_px: request.target.buffer().side_px(),
        });
        Ok(format!(
            "level {} layout {}",
            request.selection.level, request.selection.layout
        ))
    }
}

pub type TestOrchestrator = Orchestrator<RecordingEngine, HeadlessSurface, FormValues>;

pub fn default_form() -> FormValues {
    FormValues::default()
        .with_text(NumericField::Seed, "123456")
        .with_text(NumericField::DaysPlayed, "5")
        .with_text(NumericField::MaxLuckLevel, "2")
}

pub fn orchestrator_with(configure: impl FnOnce(&mut RecordingEngine)) -> TestOrchestrator {
    let board = ChoiceBoard::new();
    let mut engine = RecordingEngine::new(board.clone());
    configure(&mut engine);
    Orchestrator::new(engine, HeadlessSurface::new(board), default_form())
        .expect("engine initializes")
}

pub fn started() -> TestOrchestrator {
    let mut orchestrator = orchestrator_with(|_| {});
    orchestrator.recompute().expect("startup recompute");
    orchestrator
}
