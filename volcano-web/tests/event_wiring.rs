#![cfg(target_arch = "wasm32")]

use std::cell::RefCell;
use std::rc::Rc;

use volcano_core::{
    DisplayMode, EngineError, GameSettings, PageConfig, RenderRequest, SimulationEngine,
};
use volcano_web::app::{SharedApp, mount};
use volcano_web::dom;
use volcano_web::surface::TileAtlases;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{
    CanvasRenderingContext2d, Document, Event, HtmlCanvasElement, HtmlElement, HtmlImageElement,
    HtmlInputElement,
};

wasm_bindgen_test_configure!(run_in_browser);

/// Engine double that logs every call in order.
#[derive(Clone, Default)]
struct CallLog(Rc<RefCell<Vec<String>>>);

impl CallLog {
    fn entries(&self) -> Vec<String> {
        self.0.borrow().clone()
    }

    fn last(&self) -> Option<String> {
        self.0.borrow().last().cloned()
    }
}

struct LoggingEngine {
    calls: CallLog,
}

impl SimulationEngine for LoggingEngine {
    type Target = CanvasRenderingContext2d;
    type Atlas = HtmlImageElement;

    fn initialize(&mut self) -> Result<(), EngineError> {
        self.calls.0.borrow_mut().push("init".into());
        Ok(())
    }

    fn compute_scalar(&mut self, settings: &GameSettings) -> Result<String, EngineError> {
        self.calls
            .0
            .borrow_mut()
            .push(format!("compute {}", settings.seed));
        Ok(format!("seed {}", settings.seed))
    }

    fn render_map(
        &mut self,
        request: &RenderRequest<'_, CanvasRenderingContext2d, HtmlImageElement>,
    ) -> Result<String, EngineError> {
        self.calls.0.borrow_mut().push(format!(
            "render {} {} {}",
            request.selection.level, request.selection.layout, request.tile_px
        ));
        Ok("drawn".into())
    }
}

fn fresh_page() -> Document {
    let doc = dom::document().unwrap();
    doc.body().unwrap().set_inner_html(
        r#"
        <input id="seed" class="setting" value="7">
        <input id="max_luck_lvl" class="setting" value="1">
        <input id="days_played" class="setting" value="3">
        <input id="has_caldera" class="setting" type="checkbox">
        <span id="temp"></span>
        <button class="layout-btn" data-lvl="1" data-layout="12">12</button>
        <button class="layout-btn" data-lvl="5" data-layout="31">31</button>
        <button class="layout-btn" data-lvl="9" data-layout="30">30</button>
        <input id="big_tiles" type="checkbox">
        <p id="map-placeholder"></p>
        <canvas id="map-canvas" class="hidden"></canvas>
        <div id="map-notes"></div>
        <button id="spam">spam</button>
        "#,
    );
    doc
}

async fn mounted(doc: &Document) -> (SharedApp<LoggingEngine>, CallLog) {
    let config = PageConfig::default();
    let atlases = TileAtlases::load(&config).await.unwrap();
    let calls = CallLog::default();
    let engine = LoggingEngine {
        calls: calls.clone(),
    };
    let app = mount(engine, doc, config, atlases).unwrap();
    (app, calls)
}

fn input(doc: &Document, id: &str) -> HtmlInputElement {
    doc.get_element_by_id(id)
        .unwrap()
        .dyn_into::<HtmlInputElement>()
        .unwrap()
}

fn fire_input(doc: &Document, id: &str) {
    let event = Event::new("input").unwrap();
    doc.get_element_by_id(id)
        .unwrap()
        .dispatch_event(&event)
        .unwrap();
}

fn click(doc: &Document, selector: &str) {
    doc.query_selector(selector)
        .unwrap()
        .unwrap()
        .dyn_into::<HtmlElement>()
        .unwrap()
        .click();
}

#[wasm_bindgen_test]
async fn mount_initializes_engine_before_startup_recompute() {
    let doc = fresh_page();
    let (app, calls) = mounted(&doc).await;

    assert_eq!(calls.entries(), vec!["init", "compute 7"]);
    assert_eq!(app.borrow().counters().recomputes, 1);
    assert_eq!(
        doc.get_element_by_id("temp").unwrap().text_content(),
        Some("seed 7".to_string())
    );
    assert_eq!(app.borrow().surface().bound_listeners(), 3);
}

#[wasm_bindgen_test]
async fn setting_input_recomputes_with_current_form() {
    let doc = fresh_page();
    let (app, calls) = mounted(&doc).await;

    input(&doc, "seed").set_value("41");
    fire_input(&doc, "seed");
    assert_eq!(app.borrow().counters().recomputes, 2);
    assert_eq!(calls.last().as_deref(), Some("compute 41"));

    input(&doc, "has_caldera").set_checked(true);
    fire_input(&doc, "has_caldera");
    assert_eq!(app.borrow().counters().recomputes, 3);
    assert_eq!(app.borrow().counters().renders, 0);
}

#[wasm_bindgen_test]
async fn big_tiles_input_rerenders_only_a_shown_selection() {
    let doc = fresh_page();
    let (app, calls) = mounted(&doc).await;

    input(&doc, "big_tiles").set_checked(true);
    fire_input(&doc, "big_tiles");
    assert_eq!(app.borrow().counters().renders, 0);

    input(&doc, "big_tiles").set_checked(false);
    fire_input(&doc, "big_tiles");
    click(&doc, "[data-lvl='5']");
    assert_eq!(app.borrow().counters().renders, 1);
    assert_eq!(calls.last().as_deref(), Some("render 5 31 8"));
    assert_eq!(app.borrow().display().mode(), DisplayMode::Rendered);

    input(&doc, "big_tiles").set_checked(true);
    fire_input(&doc, "big_tiles");
    assert_eq!(app.borrow().counters().renders, 2);
    assert_eq!(calls.last().as_deref(), Some("render 5 31 16"));
    let canvas = doc
        .get_element_by_id("map-canvas")
        .unwrap()
        .dyn_into::<HtmlCanvasElement>()
        .unwrap();
    assert_eq!(canvas.width(), 1024);

    fire_input(&doc, "seed");
    fire_input(&doc, "big_tiles");
    assert_eq!(app.borrow().counters().renders, 2);
    assert_eq!(app.borrow().display().mode(), DisplayMode::Placeholder);
}

#[wasm_bindgen_test]
async fn stress_button_runs_configured_recomputes() {
    let doc = fresh_page();
    let (app, _calls) = mounted(&doc).await;

    click(&doc, "#spam");

    let app = app.borrow();
    assert_eq!(app.counters().recomputes, 1 + 1000);
    assert_eq!(app.display().mode(), DisplayMode::Placeholder);
    assert_eq!(app.surface().bound_listeners(), 3);
}

#[wasm_bindgen_test]
async fn events_during_a_running_cycle_are_skipped() {
    let doc = fresh_page();
    let (app, calls) = mounted(&doc).await;

    {
        let _running = app.borrow_mut();
        fire_input(&doc, "seed");
        click(&doc, "#spam");
    }

    assert_eq!(app.borrow().counters().recomputes, 1);
    assert_eq!(calls.entries().len(), 2);

    fire_input(&doc, "seed");
    assert_eq!(app.borrow().counters().recomputes, 2);
}
