//! DOM-backed presentation surface.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use volcano_core::{
    ChoiceControl, MapPanel, PageConfig, Presentation, TileResolution, coerce_number,
    controls_from_pairs,
};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    CanvasRenderingContext2d, Document, Element, Event, HtmlCanvasElement, HtmlElement,
    HtmlImageElement, HtmlInputElement,
};

use crate::dom;
use crate::error::DomError;
use crate::paths::asset_path;

/// Callback run when a choice control is clicked.
pub type ChoiceDispatch = Rc<dyn Fn(ChoiceControl)>;

/// The two tile atlases, loaded once at startup.
#[derive(Clone)]
pub struct TileAtlases {
    small: HtmlImageElement,
    big: HtmlImageElement,
}

impl TileAtlases {
    /// Start loading both atlases and wait until they decode. A failed
    /// decode is logged; maps drawn with that atlas come out blank.
    ///
    /// # Errors
    /// Returns an error if an image element cannot be created.
    pub async fn load(config: &PageConfig) -> Result<Self, DomError> {
        let small = load_image(config.atlas_path(TileResolution::Small)).await?;
        let big = load_image(config.atlas_path(TileResolution::Big)).await?;
        Ok(Self { small, big })
    }

    #[must_use]
    pub fn get(&self, resolution: TileResolution) -> &HtmlImageElement {
        match resolution {
            TileResolution::Big => &self.big,
            TileResolution::Small => &self.small,
        }
    }
}

async fn load_image(path: &str) -> Result<HtmlImageElement, DomError> {
    let image = HtmlImageElement::new().map_err(|err| DomError::Js(dom::js_error_message(&err)))?;
    let url = asset_path(path);
    image.set_src(&url);
    if let Err(err) = JsFuture::from(image.decode()).await {
        log::warn!("tile atlas {url} failed to load: {}", dom::js_error_message(&err));
    }
    Ok(image)
}

struct BoundChoice {
    element: Element,
    listener: Closure<dyn FnMut(Event)>,
}

pub struct DomSurface {
    config: PageConfig,
    document: Document,
    result: HtmlElement,
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
    placeholder: Element,
    notes: Element,
    big_tiles: HtmlInputElement,
    atlases: TileAtlases,
    discovered: HashMap<ChoiceControl, Element>,
    bound: HashMap<ChoiceControl, BoundChoice>,
    dispatch: Rc<RefCell<Option<ChoiceDispatch>>>,
}

impl DomSurface {
    /// Look up every element named by the page configuration.
    ///
    /// # Errors
    /// Returns an error if an element is missing, has the wrong type, or the
    /// canvas has no 2D context.
    pub fn attach(
        document: &Document,
        config: PageConfig,
        atlases: TileAtlases,
    ) -> Result<Self, DomError> {
        let canvas: HtmlCanvasElement = dom::element_by_id(document, &config.canvas_id, "canvas")?;
        let context = canvas
            .get_context("2d")
            .map_err(|err| DomError::Js(dom::js_error_message(&err)))?
            .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
            .ok_or_else(|| DomError::NoContext(config.canvas_id.clone()))?;
        Ok(Self {
            result: dom::element_by_id(document, &config.result_id, "HTML element")?,
            placeholder: dom::element_by_id(document, &config.placeholder_id, "element")?,
            notes: dom::element_by_id(document, &config.notes_id, "element")?,
            big_tiles: dom::element_by_id(document, &config.big_tiles_id, "input")?,
            document: document.clone(),
            canvas,
            context,
            atlases,
            config,
            discovered: HashMap::new(),
            bound: HashMap::new(),
            dispatch: Rc::new(RefCell::new(None)),
        })
    }

    /// Install the callback choice controls invoke when clicked.
    pub fn set_dispatch(&self, dispatch: ChoiceDispatch) {
        *self.dispatch.borrow_mut() = Some(dispatch);
    }

    /// Click listeners currently attached to choice controls.
    #[must_use]
    pub fn bound_listeners(&self) -> usize {
        self.bound.len()
    }

    fn read_attr(element: &Element, name: &str) -> i64 {
        element
            .get_attribute(name)
            .map_or(0, |raw| coerce_number(&raw))
    }
}

impl MapPanel for DomSurface {
    fn show_placeholder(&mut self) {
        dom::set_hidden(&self.canvas, &self.config.hidden_class, true);
        dom::set_hidden(&self.placeholder, &self.config.hidden_class, false);
        self.notes.set_inner_html("");
    }

    fn show_map(&mut self, notes: &str) {
        dom::set_hidden(&self.canvas, &self.config.hidden_class, false);
        dom::set_hidden(&self.placeholder, &self.config.hidden_class, true);
        // the engine's notes are markup
        self.notes.set_inner_html(notes);
    }
}

impl Presentation for DomSurface {
    type Target = CanvasRenderingContext2d;
    type Atlas = HtmlImageElement;

    fn set_result_text(&mut self, text: &str) {
        self.result.set_inner_text(text);
    }

    fn resolution(&self) -> TileResolution {
        TileResolution::from_big_tiles(self.big_tiles.checked())
    }

    fn prepare_canvas(&mut self, side_px: u32) -> CanvasRenderingContext2d {
        self.canvas.set_width(side_px);
        self.canvas.set_height(side_px);
        self.context.clone()
    }

    fn atlas(&self, resolution: TileResolution) -> HtmlImageElement {
        self.atlases.get(resolution).clone()
    }

    fn discover_choices(&mut self) -> Vec<ChoiceControl> {
        let collection = self
            .document
            .get_elements_by_class_name(&self.config.choice_class);
        let elements: Vec<Element> = (0..collection.length())
            .filter_map(|i| collection.item(i))
            .collect();
        let pairs = elements.iter().map(|el| {
            let level = Self::read_attr(el, &self.config.level_attr);
            let layout = Self::read_attr(el, &self.config.layout_attr);
            (
                i32::try_from(level).unwrap_or(if level < 0 { i32::MIN } else { i32::MAX }),
                u32::try_from(layout.max(0)).unwrap_or(u32::MAX),
            )
        });
        let controls = controls_from_pairs(pairs.collect::<Vec<_>>());
        self.discovered = controls.iter().copied().zip(elements).collect();
        controls
    }

    fn attach_choice_handler(&mut self, control: ChoiceControl) {
        let Some(element) = self.discovered.get(&control).cloned() else {
            log::warn!("no element for choice {control:?}");
            return;
        };
        let dispatch = Rc::clone(&self.dispatch);
        let listener = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
            let handler = dispatch.borrow().clone();
            if let Some(handler) = handler {
                handler(control);
            }
        });
        if let Err(err) =
            element.add_event_listener_with_callback("click", listener.as_ref().unchecked_ref())
        {
            log::error!(
                "binding choice {control:?} failed: {}",
                dom::js_error_message(&err)
            );
            return;
        }
        self.bound.insert(control, BoundChoice { element, listener });
    }

    fn detach_choice_handler(&mut self, control: ChoiceControl) {
        let Some(bound) = self.bound.remove(&control) else {
            return;
        };
        if let Err(err) = bound
            .element
            .remove_event_listener_with_callback("click", bound.listener.as_ref().unchecked_ref())
        {
            log::warn!(
                "unbinding choice {control:?} failed: {}",
                dom::js_error_message(&err)
            );
        }
    }
}
