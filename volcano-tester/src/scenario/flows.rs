use volcano_core::constants::MAP_GRID_TILES;
use volcano_core::headless::VisiblePanel;
use volcano_core::{DisplayMode, Selection};

use super::{CheckError, CheckResult, ScenarioCtx, expect_eq, retype_seed};

pub fn smoke(ctx: &ScenarioCtx) -> CheckResult {
    let mut harness = ctx.harness()?;
    expect_eq("mode after startup", DisplayMode::Placeholder, harness.display().mode())?;
    expect_eq(
        "panel after startup",
        VisiblePanel::Placeholder,
        harness.surface().visible_panel(),
    )?;
    expect_eq(
        "result text mentions the seed",
        true,
        harness
            .surface()
            .result_text()
            .contains(&ctx.seed.to_string()),
    )?;

    let control = harness
        .surface()
        .discovered()
        .first()
        .copied()
        .ok_or(CheckError::Missing("choice control after startup"))?;
    harness.activate_choice(control)?;

    let surface = harness.surface();
    expect_eq("mode after select", DisplayMode::Rendered, harness.display().mode())?;
    expect_eq(
        "selection after select",
        Some(control.selection()),
        harness.display().last_selection(),
    )?;
    expect_eq("panel after select", VisiblePanel::Map, surface.visible_panel())?;
    expect_eq("canvas side", 512, surface.canvas_side())?;
    expect_eq(
        "painted cells",
        (MAP_GRID_TILES * MAP_GRID_TILES) as usize,
        surface.canvas().buffer().painted_cells(),
    )?;
    expect_eq("notes shown", harness.display().notes(), surface.notes())?;
    Ok(())
}

pub fn resolution_toggle(ctx: &ScenarioCtx) -> CheckResult {
    let mut harness = ctx.harness()?;

    harness.surface_mut().set_big_tiles(true);
    let rendered = harness.on_resolution_toggled()?;
    expect_eq("render while placeholder", false, rendered)?;
    expect_eq("render count while placeholder", 0, harness.counters().renders)?;

    harness.surface_mut().set_big_tiles(false);
    harness.select_layout(5, 31)?;
    let small = harness.surface().canvas().buffer().clone();
    expect_eq("small canvas", 512, small.side_px())?;

    harness.surface_mut().set_big_tiles(true);
    let rendered = harness.on_resolution_toggled()?;
    expect_eq("render after toggle", true, rendered)?;
    expect_eq("render count after toggle", 2, harness.counters().renders)?;
    expect_eq(
        "selection kept",
        Some(Selection::new(5, 31)),
        harness.display().last_selection(),
    )?;
    expect_eq("big canvas", 1024, harness.surface().canvas_side())?;
    expect_eq(
        "notes name the tile size",
        true,
        harness.surface().notes().contains("16 px"),
    )?;

    // same selection and settings paint the same grid at either size
    let big = harness.surface().canvas().buffer().clone();
    for (x, y) in [(0, 0), (17, 40), (63, 63)] {
        expect_eq("tile after toggle", small.tile_at(x, y), big.tile_at(x, y))?;
    }

    retype_seed(&mut harness, i64::from(ctx.seed) + 1);
    harness.recompute()?;
    let rendered = harness.on_resolution_toggled()?;
    expect_eq("render after recompute", false, rendered)?;
    Ok(())
}

pub fn failure_isolation(ctx: &ScenarioCtx) -> CheckResult {
    let mut harness = ctx.harness()?;
    harness.select_layout(9, 30)?;

    let text_before = harness.surface().result_text().to_owned();
    let display_before = harness.display().clone();
    let generation_before = harness.bindings().generation();

    retype_seed(&mut harness, i64::from(ctx.seed) ^ 0x5555);
    harness.engine_mut().fail_next_compute();
    if harness.recompute().is_ok() {
        return Err(CheckError::UnexpectedSuccess("recompute with failing engine"));
    }
    expect_eq(
        "result text after failed recompute",
        text_before.as_str(),
        harness.surface().result_text(),
    )?;
    expect_eq(
        "display after failed recompute",
        &display_before,
        harness.display(),
    )?;
    expect_eq(
        "generation after failed recompute",
        generation_before,
        harness.bindings().generation(),
    )?;

    harness.engine_mut().fail_next_render();
    if harness.select_layout(2, 1).is_ok() {
        return Err(CheckError::UnexpectedSuccess("render with failing engine"));
    }
    expect_eq(
        "display after failed render",
        &display_before,
        harness.display(),
    )?;

    harness.recompute()?;
    expect_eq("mode after recovery", DisplayMode::Placeholder, harness.display().mode())?;
    Ok(())
}
