use volcano_core::{EngineError, OrchestratorError};

/// Failures looking up or driving page elements.
#[derive(Debug, thiserror::Error)]
pub enum DomError {
    #[error("browser window unavailable")]
    NoWindow,
    #[error("document unavailable")]
    NoDocument,
    #[error("element #{0} not found")]
    MissingElement(String),
    #[error("element #{id} is not a {expected}")]
    WrongType { id: String, expected: &'static str },
    #[error("canvas #{0} has no 2d context")]
    NoContext(String),
    #[error("{0}")]
    Js(String),
}

/// Anything that stops the page from starting.
#[derive(Debug, thiserror::Error)]
pub enum BootError {
    #[error(transparent)]
    Dom(#[from] DomError),
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error(transparent)]
    Orchestrator(#[from] OrchestratorError),
}
