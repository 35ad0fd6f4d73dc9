//! Bridge to the external simulation engine module.
//!
//! `js/engine_bridge.js` adapts the engine package's exports; this module
//! only converts arguments and errors.

use volcano_core::{EngineError, GameSettings, RenderRequest, Selection, SimulationEngine};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

use crate::dom::js_error_message;

#[wasm_bindgen(module = "/js/engine_bridge.js")]
extern "C" {
    #[wasm_bindgen(catch, js_name = initEngine)]
    async fn init_engine() -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_name = engineReady)]
    fn engine_ready() -> bool;

    #[wasm_bindgen(catch, js_name = computeScalar)]
    fn compute_scalar_js(settings: JsValue) -> Result<String, JsValue>;

    #[wasm_bindgen(catch, js_name = renderMap)]
    fn render_map_js(
        settings: JsValue,
        level: i32,
        layout: u32,
        context: &CanvasRenderingContext2d,
        tiles: &HtmlImageElement,
        tile_size: u32,
    ) -> Result<String, JsValue>;
}

pub struct JsEngine {
    initialized: bool,
}

impl JsEngine {
    /// Fetch and instantiate the engine module.
    ///
    /// # Errors
    /// Returns [`EngineError::Init`] if the module fails to load.
    pub async fn load() -> Result<Self, EngineError> {
        init_engine()
            .await
            .map_err(|err| EngineError::Init(js_error_message(&err)))?;
        Ok(Self { initialized: false })
    }

    fn ensure_ready(&self) -> Result<(), EngineError> {
        if self.initialized {
            Ok(())
        } else {
            Err(EngineError::NotInitialized)
        }
    }
}

fn settings_value(settings: &GameSettings) -> Result<JsValue, String> {
    serde_wasm_bindgen::to_value(settings).map_err(|err| err.to_string())
}

impl SimulationEngine for JsEngine {
    type Target = CanvasRenderingContext2d;
    type Atlas = HtmlImageElement;

    fn initialize(&mut self) -> Result<(), EngineError> {
        if !engine_ready() {
            return Err(EngineError::Init("engine module not instantiated".into()));
        }
        self.initialized = true;
        Ok(())
    }

    fn compute_scalar(&mut self, settings: &GameSettings) -> Result<String, EngineError> {
        self.ensure_ready()?;
        let value = settings_value(settings).map_err(EngineError::Compute)?;
        compute_scalar_js(value).map_err(|err| EngineError::Compute(js_error_message(&err)))
    }

    fn render_map(
        &mut self,
        request: &RenderRequest<'_, CanvasRenderingContext2d, HtmlImageElement>,
    ) -> Result<String, EngineError> {
        self.ensure_ready()?;
        let Selection { level, layout } = request.selection;
        let failed = |message: String| EngineError::Render {
            level,
            layout,
            message,
        };
        let value = settings_value(&request.settings).map_err(failed)?;
        render_map_js(
            value,
            level,
            layout,
            request.target,
            request.atlas,
            request.tile_px,
        )
        .map_err(|err| failed(js_error_message(&err)))
    }
}
