//! Page bootstrap and event wiring.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use volcano_core::{Orchestrator, OrchestratorError, PageConfig, SimulationEngine};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{CanvasRenderingContext2d, Document, Element, Event, HtmlImageElement};

use crate::dom;
use crate::error::BootError;
use crate::form::DomForm;
use crate::surface::{ChoiceDispatch, DomSurface, TileAtlases};

/// Engines the page can drive: anything drawing onto a 2D canvas context
/// with an image atlas.
pub trait PageEngine:
    SimulationEngine<Target = CanvasRenderingContext2d, Atlas = HtmlImageElement> + 'static
{
}

impl<E> PageEngine for E where
    E: SimulationEngine<Target = CanvasRenderingContext2d, Atlas = HtmlImageElement> + 'static
{
}

pub type App<E> = Orchestrator<E, DomSurface, DomForm>;
pub type SharedApp<E> = Rc<RefCell<App<E>>>;

/// Run one update cycle. Failures are logged and abort only this cycle; an
/// event arriving while another cycle holds the app is skipped.
pub fn run_cycle<E: PageEngine, T>(
    app: &SharedApp<E>,
    label: &str,
    cycle: impl FnOnce(&mut App<E>) -> Result<T, OrchestratorError>,
) {
    let Ok(mut app) = app.try_borrow_mut() else {
        log::warn!("{label} skipped: another update is still running");
        return;
    };
    if let Err(err) = cycle(&mut *app) {
        log::error!("{label} failed: {err}");
    }
}

fn upgrade_and_run<E: PageEngine, T>(
    weak: &Weak<RefCell<App<E>>>,
    label: &str,
    cycle: impl FnOnce(&mut App<E>) -> Result<T, OrchestratorError>,
) {
    if let Some(app) = weak.upgrade() {
        run_cycle(&app, label, cycle);
    }
}

/// Bring the page up: engine first, then atlases, surface and listeners.
///
/// # Errors
/// Returns an error if the engine fails to load or a required element is
/// missing. A failing startup recompute is only logged.
#[cfg(target_arch = "wasm32")]
pub async fn boot() -> Result<SharedApp<crate::engine::JsEngine>, BootError> {
    let config = crate::config::page_config();
    let engine = crate::engine::JsEngine::load().await?;
    let document = dom::document()?;
    let atlases = TileAtlases::load(&config).await?;
    mount(engine, &document, config, atlases)
}

/// Bind an engine to the page: initialize it, run the startup recompute and
/// attach every page-lifetime listener.
///
/// # Errors
/// Returns an error if the engine fails to initialize or a required element
/// is missing.
pub fn mount<E: PageEngine>(
    engine: E,
    document: &Document,
    config: PageConfig,
    atlases: TileAtlases,
) -> Result<SharedApp<E>, BootError> {
    let surface = DomSurface::attach(document, config.clone(), atlases)?;
    let form = DomForm::new(document.clone());
    let app: SharedApp<E> = Rc::new(RefCell::new(Orchestrator::new(engine, surface, form)?));

    install_choice_dispatch(&app);
    run_cycle(&app, "startup recompute", App::<E>::recompute);
    wire_events(&app, document, &config)?;
    log::info!("volcano viewer ready");
    Ok(app)
}

fn install_choice_dispatch<E: PageEngine>(app: &SharedApp<E>) {
    let weak = Rc::downgrade(app);
    let dispatch: ChoiceDispatch = Rc::new(move |control| {
        upgrade_and_run(&weak, "layout render", |app| app.activate_choice(control));
    });
    app.borrow().surface().set_dispatch(dispatch);
}

/// Attach a page-lifetime listener.
fn listen(target: &Element, event: &str, handler: impl FnMut(Event) + 'static) {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    match target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref()) {
        Ok(()) => closure.forget(),
        Err(err) => log::error!(
            "listening for {event} on #{} failed: {}",
            target.id(),
            dom::js_error_message(&err)
        ),
    }
}

fn wire_events<E: PageEngine>(
    app: &SharedApp<E>,
    document: &Document,
    config: &PageConfig,
) -> Result<(), BootError> {
    let settings = document.get_elements_by_class_name(&config.setting_class);
    for element in (0..settings.length()).filter_map(|i| settings.item(i)) {
        let weak = Rc::downgrade(app);
        listen(&element, "input", move |_| {
            upgrade_and_run(&weak, "recompute", App::<E>::recompute);
        });
    }

    let toggle: Element = dom::element_by_id(document, &config.big_tiles_id, "element")?;
    let weak = Rc::downgrade(app);
    listen(&toggle, "input", move |_| {
        upgrade_and_run(&weak, "resolution toggle", App::<E>::on_resolution_toggled);
    });

    if let Some(button) = document.get_element_by_id(&config.stress_button_id) {
        let weak = Rc::downgrade(app);
        let iterations = config.stress_iterations;
        listen(&button, "click", move |_| {
            upgrade_and_run(&weak, "stress run", |app| app.stress(iterations));
        });
    }
    Ok(())
}
