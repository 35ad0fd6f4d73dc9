use std::collections::BTreeSet;

use volcano_core::{ChoiceControl, DisplayMode};

use super::{CheckError, CheckResult, Harness, ScenarioCtx, expect_eq, retype_seed};

const RESEED_ROUNDS: i64 = 32;

fn expect_single_handlers(harness: &Harness) -> CheckResult {
    let surface = harness.surface();
    for control in surface.discovered() {
        expect_eq("handlers per control", 1, surface.handler_count(control))?;
    }
    expect_eq(
        "handlers in total",
        harness.bindings().len(),
        surface.total_handlers() as usize,
    )?;
    expect_eq("stray detaches", 0, surface.stray_detaches())
}

pub fn stress(ctx: &ScenarioCtx) -> CheckResult {
    let mut harness = ctx.harness()?;
    harness.select_layout(0, 0)?;
    let before = harness.counters().recomputes;

    harness.stress(ctx.stress_count)?;

    expect_eq("mode after stress", DisplayMode::Placeholder, harness.display().mode())?;
    expect_eq("selection after stress", None, harness.display().last_selection())?;
    expect_eq(
        "recomputes",
        before + ctx.stress_count as u64,
        harness.counters().recomputes,
    )?;
    expect_eq(
        "engine computes",
        harness.counters().recomputes as usize,
        harness.engine().computes(),
    )?;
    let widest = harness.surface().max_handler_multiplicity();
    if widest > 1 {
        return Err(CheckError::Mismatch {
            check: "handler multiplicity",
            expected: "1".into(),
            actual: widest.to_string(),
        });
    }
    expect_single_handlers(&harness)
}

pub fn rebinding(ctx: &ScenarioCtx) -> CheckResult {
    let mut harness = ctx.harness()?;
    let mut previous: BTreeSet<ChoiceControl> = harness.bindings().iter().copied().collect();
    let mut total_detached = 0;

    for round in 1..=RESEED_ROUNDS {
        retype_seed(&mut harness, i64::from(ctx.seed) + round);
        let summary = harness.recompute()?;
        let current: BTreeSet<ChoiceControl> =
            harness.surface().discovered().iter().copied().collect();

        expect_eq(
            "vanished controls detached",
            previous.difference(&current).count(),
            summary.detached,
        )?;
        expect_eq(
            "new controls attached",
            current.difference(&previous).count(),
            summary.attached,
        )?;
        expect_eq("bound after rebind", current.len(), summary.bound())?;
        expect_single_handlers(&harness)?;
        if ctx.verbose {
            log::info!(
                "round {round}: {} attached, {} replaced, {} detached",
                summary.attached,
                summary.replaced,
                summary.detached
            );
        }

        total_detached += summary.detached;
        previous = current;
    }

    if total_detached == 0 {
        return Err(CheckError::Missing("a reseed that changes the choice set"));
    }
    Ok(())
}
