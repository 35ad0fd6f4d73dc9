//! Contract with the external simulation engine.

use thiserror::Error;

use crate::display::Selection;
use crate::settings::GameSettings;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("engine used before initialization")]
    NotInitialized,
    #[error("engine initialization failed: {0}")]
    Init(String),
    #[error("scalar computation failed: {0}")]
    Compute(String),
    #[error("map render failed for level {level} layout {layout}: {message}")]
    Render {
        level: i32,
        layout: u32,
        message: String,
    },
}

/// Inputs for one map render.
#[derive(Debug)]
pub struct RenderRequest<'a, T, A> {
    pub settings: GameSettings,
    pub selection: Selection,
    pub target: &'a T,
    pub atlas: &'a A,
    pub tile_px: u32,
}

/// The black-box engine computing the temperature text and drawing maps.
///
/// Calls are synchronous. `initialize` must succeed before anything else is
/// called; implementations report [`EngineError::NotInitialized`] otherwise.
pub trait SimulationEngine {
    type Target;
    type Atlas;

    /// # Errors
    ///
    /// Returns [`EngineError::Init`] when the engine cannot be brought up.
    fn initialize(&mut self) -> Result<(), EngineError>;

    /// Scalar result for a settings snapshot. The engine may also refresh the
    /// host's choice controls as a side effect.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine fails or is not initialized.
    fn compute_scalar(&mut self, settings: &GameSettings) -> Result<String, EngineError>;

    /// Draw a map into the request's target and return annotation text.
    /// Identical requests must draw identical maps.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine fails or is not initialized.
    fn render_map(
        &mut self,
        request: &RenderRequest<'_, Self::Target, Self::Atlas>,
    ) -> Result<String, EngineError>;
}
