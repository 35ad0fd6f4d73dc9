//! Recompute, render and resolution-toggle flows.
//!
//! A recompute asks the engine for the scalar and lets the host's choice
//! controls regenerate before touching anything visible, so a failing
//! engine leaves the page exactly as it was.

use serde::Serialize;
use thiserror::Error;

use crate::choices::{ChoiceBindings, ChoiceControl, RebindSummary};
use crate::display::{DisplayController, DisplayState, Selection};
use crate::engine::{EngineError, RenderRequest, SimulationEngine};
use crate::settings::{GameSettings, SettingsForm};
use crate::surface::Presentation;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OrchestratorError {
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error("stress recompute {iteration} of {total} failed: {source}")]
    Stress {
        iteration: usize,
        total: usize,
        source: Box<OrchestratorError>,
    },
}

/// Completed cycles since startup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CycleCounters {
    pub recomputes: u64,
    pub renders: u64,
}

pub struct Orchestrator<E, P, F> {
    engine: E,
    surface: P,
    form: F,
    display: DisplayController,
    bindings: ChoiceBindings,
    counters: CycleCounters,
}

impl<E, P, F> Orchestrator<E, P, F>
where
    E: SimulationEngine,
    P: Presentation<Target = E::Target, Atlas = E::Atlas>,
    F: SettingsForm,
{
    /// Initialize the engine and put the map panel in its placeholder state.
    /// The caller runs the startup [`recompute`](Self::recompute).
    ///
    /// # Errors
    ///
    /// Returns an error if the engine fails to initialize.
    pub fn new(mut engine: E, mut surface: P, form: F) -> Result<Self, OrchestratorError> {
        engine.initialize()?;
        let mut display = DisplayController::new();
        display.reset(&mut surface);
        log::debug!("orchestrator ready");
        Ok(Self {
            engine,
            surface,
            form,
            display,
            bindings: ChoiceBindings::new(),
            counters: CycleCounters::default(),
        })
    }

    /// Current form state as a settings snapshot.
    #[must_use]
    pub fn snapshot(&self) -> GameSettings {
        GameSettings::extract(&self.form)
    }

    /// Full cycle run whenever a tracked input changes.
    ///
    /// # Errors
    ///
    /// Returns the engine's error; the result text, map panel and handlers
    /// are untouched in that case.
    pub fn recompute(&mut self) -> Result<RebindSummary, OrchestratorError> {
        let settings = self.snapshot();
        let scalar = self.engine.compute_scalar(&settings)?;
        let controls = self.surface.discover_choices();

        self.surface.set_result_text(&scalar);
        self.display.reset(&mut self.surface);
        let summary = self.bindings.rebind(&mut self.surface, controls);
        self.counters.recomputes += 1;
        log::debug!(
            "recompute #{}: seed {} day {} -> {} choices ({} new, {} replaced, {} dropped)",
            self.counters.recomputes,
            settings.seed,
            settings.days_played,
            summary.bound(),
            summary.attached,
            summary.replaced,
            summary.detached,
        );
        Ok(summary)
    }

    /// Render the map for a (level, layout) pair at the toggle's resolution,
    /// using the form as it is right now.
    ///
    /// # Errors
    ///
    /// Returns the engine's error; the display state is left as it was.
    pub fn select_layout(&mut self, level: i32, layout: u32) -> Result<(), OrchestratorError> {
        let resolution = self.surface.resolution();
        let settings = self.snapshot();
        let selection = Selection::new(level, layout);
        let target = self.surface.prepare_canvas(resolution.canvas_px());
        let atlas = self.surface.atlas(resolution);
        let notes = self.engine.render_map(&RenderRequest {
            settings,
            selection,
            target: &target,
            atlas: &atlas,
            tile_px: resolution.tile_px(),
        })?;
        self.display.show_rendered(&mut self.surface, selection, notes);
        self.counters.renders += 1;
        log::debug!(
            "rendered level {level} layout {layout} with {} tiles",
            resolution.label()
        );
        Ok(())
    }

    /// Handler for an activated choice control. The control's data is
    /// forwarded as-is; the engine owns validation.
    ///
    /// # Errors
    ///
    /// Returns the render error, if any.
    pub fn activate_choice(&mut self, control: ChoiceControl) -> Result<(), OrchestratorError> {
        if !self.bindings.is_bound(&control) {
            log::debug!("activation from unbound control {control:?}");
        }
        self.select_layout(control.level, control.layout)
    }

    /// Re-render the last selection after the tile-size toggle changed.
    /// Returns whether a render happened.
    ///
    /// # Errors
    ///
    /// Returns the render error, if any.
    pub fn on_resolution_toggled(&mut self) -> Result<bool, OrchestratorError> {
        let Some(last) = self.display.last_selection() else {
            return Ok(false);
        };
        self.select_layout(last.level, last.layout)?;
        Ok(true)
    }

    /// Run `iterations` recomputes back to back, stopping at the first failure.
    ///
    /// # Errors
    ///
    /// Returns [`OrchestratorError::Stress`] naming the failed iteration.
    pub fn stress(&mut self, iterations: usize) -> Result<(), OrchestratorError> {
        for iteration in 1..=iterations {
            self.recompute()
                .map_err(|source| OrchestratorError::Stress {
                    iteration,
                    total: iterations,
                    source: Box::new(source),
                })?;
        }
        log::info!("stress run finished: {iterations} recomputes");
        Ok(())
    }

    #[must_use]
    pub const fn display(&self) -> &DisplayState {
        self.display.state()
    }

    #[must_use]
    pub const fn bindings(&self) -> &ChoiceBindings {
        &self.bindings
    }

    #[must_use]
    pub const fn counters(&self) -> CycleCounters {
        self.counters
    }

    #[must_use]
    pub const fn surface(&self) -> &P {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut P {
        &mut self.surface
    }

    #[must_use]
    pub const fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    pub fn form_mut(&mut self) -> &mut F {
        &mut self.form
    }
}
