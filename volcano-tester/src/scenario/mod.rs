use std::fmt::Debug;

use thiserror::Error;
use volcano_core::headless::{ChoiceBoard, FormValues, HeadlessSurface};
use volcano_core::{GameSettings, NumericField, Orchestrator, OrchestratorError};

use crate::engine::DigestEngine;

pub mod clamp;
pub mod flows;
pub mod stress;

pub type Harness = Orchestrator<DigestEngine, HeadlessSurface, FormValues>;

#[derive(Debug, Error)]
pub enum CheckError {
    #[error("{check}: expected {expected}, got {actual}")]
    Mismatch {
        check: &'static str,
        expected: String,
        actual: String,
    },
    #[error("{0} missing")]
    Missing(&'static str),
    #[error("{0} unexpectedly succeeded")]
    UnexpectedSuccess(&'static str),
    #[error(transparent)]
    Orchestrator(#[from] OrchestratorError),
}

pub type CheckResult = Result<(), CheckError>;

pub fn expect_eq<T>(check: &'static str, expected: T, actual: T) -> CheckResult
where
    T: PartialEq + Debug,
{
    if expected == actual {
        Ok(())
    } else {
        Err(CheckError::Mismatch {
            check,
            expected: format!("{expected:?}"),
            actual: format!("{actual:?}"),
        })
    }
}

#[derive(Debug, Clone)]
pub struct ScenarioCtx {
    pub seed: i32,
    pub stress_count: usize,
    pub verbose: bool,
}

impl ScenarioCtx {
    /// Form the harness starts from for this seed.
    #[must_use]
    pub fn form(&self) -> FormValues {
        let settings = GameSettings {
            seed: self.seed,
            days_played: 5,
            max_luck_level: 2,
            ..GameSettings::default()
        };
        FormValues::from_settings(&settings)
    }

    /// A started harness: engine initialized and the startup recompute done.
    pub fn harness(&self) -> Result<Harness, CheckError> {
        self.harness_with(self.form())
    }

    pub fn harness_with(&self, form: FormValues) -> Result<Harness, CheckError> {
        let board = ChoiceBoard::new();
        let engine = DigestEngine::new(board.clone());
        let mut harness = Orchestrator::new(engine, HeadlessSurface::new(board), form)?;
        harness.recompute()?;
        Ok(harness)
    }
}

/// Push a new seed into the form, as a user typing would.
pub fn retype_seed(harness: &mut Harness, seed: i64) {
    harness
        .form_mut()
        .set_text(NumericField::Seed, seed.to_string());
}

#[derive(Clone, Copy)]
pub struct Scenario {
    pub key: &'static str,
    pub description: &'static str,
    run: fn(&ScenarioCtx) -> CheckResult,
}

impl Scenario {
    pub fn run(&self, ctx: &ScenarioCtx) -> CheckResult {
        (self.run)(ctx)
    }
}

const CATALOG: [Scenario; 6] = [
    Scenario {
        key: "smoke",
        description: "Startup recompute, one layout selection and its map",
        run: flows::smoke,
    },
    Scenario {
        key: "resolution-toggle",
        description: "Toggling tile size re-renders only a shown selection",
        run: flows::resolution_toggle,
    },
    Scenario {
        key: "failure-isolation",
        description: "Engine failures leave the page exactly as it was",
        run: flows::failure_isolation,
    },
    Scenario {
        key: "clamp-policy",
        description: "Malformed and out-of-range form input degrades quietly",
        run: clamp::clamp_policy,
    },
    Scenario {
        key: "stress",
        description: "Repeated recomputes keep one handler per choice",
        run: stress::stress,
    },
    Scenario {
        key: "rebinding",
        description: "Changing choice sets detach vanished controls",
        run: stress::rebinding,
    },
];

#[must_use]
pub fn find_scenario(key: &str) -> Option<Scenario> {
    CATALOG.iter().copied().find(|s| s.key == key)
}

#[must_use]
pub fn list_scenarios() -> Vec<(&'static str, &'static str)> {
    CATALOG.iter().map(|s| (s.key, s.description)).collect()
}

#[must_use]
pub fn all_keys() -> Vec<&'static str> {
    CATALOG.iter().map(|s| s.key).collect()
}
