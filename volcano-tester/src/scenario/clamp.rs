use volcano_core::headless::FormValues;
use volcano_core::{GameSettings, NumericField, ToggleField};

use super::{CheckResult, ScenarioCtx, expect_eq};

/// (seed text, luck text, days text) and the snapshot fields they must yield.
const CASES: [(&str, &str, &str, i32, u32, u32); 7] = [
    ("12", "-5", "-1", 12, 0, 1),
    ("12", "0", "0", 12, 0, 1),
    ("12", "7", "3", 12, 7, 3),
    ("abc", "", "  ", 0, 0, 1),
    ("0x1F", "2.9", "1e2", 31, 2, 100),
    ("-3.7", "NaN", "Infinity", -3, 0, 1),
    ("99999999999", "4", "2", i32::MAX, 4, 2),
];

pub fn clamp_policy(ctx: &ScenarioCtx) -> CheckResult {
    let mut harness = ctx.harness()?;

    for (seed, luck, days, want_seed, want_luck, want_days) in CASES {
        let form = harness.form_mut();
        form.set_text(NumericField::Seed, seed);
        form.set_text(NumericField::MaxLuckLevel, luck);
        form.set_text(NumericField::DaysPlayed, days);

        let snapshot = harness.snapshot();
        expect_eq("seed", want_seed, snapshot.seed)?;
        expect_eq("max luck level", want_luck, snapshot.max_luck_level)?;
        expect_eq("days played", want_days, snapshot.days_played)?;

        // malformed input never stops a cycle
        harness.recompute()?;
    }

    let form = harness.form_mut();
    form.set_checked(ToggleField::HasCaldera, true);
    form.set_checked(ToggleField::SpecialCharm, true);
    let snapshot = harness.snapshot();
    expect_eq(
        "toggles",
        (false, false, true, false, true),
        (
            snapshot.legacy_rng,
            snapshot.post_update,
            snapshot.has_caldera,
            snapshot.cracked_golden_coconut,
            snapshot.special_charm,
        ),
    )?;
    expect_eq(
        "empty form",
        GameSettings::default(),
        GameSettings::extract(&FormValues::default()),
    )?;
    Ok(())
}
