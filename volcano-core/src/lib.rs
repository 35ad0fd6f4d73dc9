//! Volcano map viewer core
//!
//! Platform-agnostic render orchestration for the volcano dungeon viewer:
//! settings extraction, the map panel state machine, choice handler
//! bookkeeping and the recompute/render/toggle flows. The simulation engine
//! and the page are reached only through the [`SimulationEngine`],
//! [`Presentation`] and [`SettingsForm`] traits.

pub mod choices;
pub mod config;
pub mod constants;
pub mod display;
pub mod engine;
pub mod headless;
pub mod orchestrator;
pub mod resolution;
pub mod settings;
pub mod surface;

pub use choices::{ChoiceBindings, ChoiceControl, RebindSummary, controls_from_pairs};
pub use config::{AtlasPaths, PageConfig};
pub use display::{DisplayController, DisplayMode, DisplayState, Selection};
pub use engine::{EngineError, RenderRequest, SimulationEngine};
pub use orchestrator::{CycleCounters, Orchestrator, OrchestratorError};
pub use resolution::TileResolution;
pub use settings::{GameSettings, NumericField, SettingsForm, ToggleField, coerce_number};
pub use surface::{MapPanel, Presentation};
