mod common;

use common::{orchestrator_with, started};
use volcano_core::{ChoiceControl, DisplayMode, OrchestratorError};

#[test]
fn thousand_recomputes_keep_one_handler_per_control() {
    let mut orchestrator = started();
    orchestrator.select_layout(2, 1).unwrap();

    orchestrator.stress(1000).unwrap();

    assert_eq!(orchestrator.display().mode(), DisplayMode::Placeholder);
    assert_eq!(orchestrator.counters().recomputes, 1001);
    assert_eq!(orchestrator.bindings().generation(), 1001);
    let surface = orchestrator.surface();
    assert_eq!(surface.max_handler_multiplicity(), 1);
    assert_eq!(surface.total_handlers(), 6);
    assert_eq!(surface.stray_detaches(), 0);
    for control in surface.discovered() {
        assert_eq!(surface.handler_count(control), 1, "{control:?}");
    }
}

#[test]
fn vanished_controls_lose_their_handler() {
    let mut orchestrator = started();
    let dropped = ChoiceControl {
        level: 2,
        layout: 33,
        ordinal: 0,
    };
    assert_eq!(orchestrator.surface().handler_count(&dropped), 1);

    orchestrator.engine_mut().pairs = vec![(0, 0), (1, 12), (2, 1), (2, 1)];
    let summary = orchestrator.recompute().unwrap();

    assert_eq!(summary.detached, 3);
    assert_eq!(summary.replaced, 3);
    assert_eq!(summary.attached, 1);
    assert_eq!(orchestrator.surface().handler_count(&dropped), 0);
    assert!(!orchestrator.bindings().is_bound(&dropped));
    let repeat = ChoiceControl {
        level: 2,
        layout: 1,
        ordinal: 1,
    };
    assert_eq!(orchestrator.surface().handler_count(&repeat), 1);
}

#[test]
fn stress_stops_at_the_first_failure() {
    let mut orchestrator = orchestrator_with(|engine| engine.fail_compute_after = Some(10));

    let err = orchestrator.stress(1000).unwrap_err();

    match err {
        OrchestratorError::Stress {
            iteration, total, ..
        } => {
            assert_eq!(iteration, 11);
            assert_eq!(total, 1000);
        }
        other => panic!("unexpected error {other:?}"),
    }
    assert_eq!(orchestrator.counters().recomputes, 10);
    assert_eq!(orchestrator.surface().max_handler_multiplicity(), 1);
}

#[test]
fn empty_board_leaves_no_handlers() {
    let mut orchestrator = started();
    orchestrator.engine_mut().pairs.clear();
    let summary = orchestrator.recompute().unwrap();
    assert_eq!(summary.bound(), 0);
    assert_eq!(summary.detached, 6);
    assert_eq!(orchestrator.surface().total_handlers(), 0);
    assert!(orchestrator.bindings().is_empty());
}
