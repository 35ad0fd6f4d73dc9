//! Page wiring configuration: which elements the glue binds to and which
//! assets it loads.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_STRESS_ITERATIONS;
use crate::resolution::TileResolution;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AtlasPaths {
    pub small: String,
    pub big: String,
}

impl Default for AtlasPaths {
    fn default() -> Self {
        Self {
            small: "icons/maptiles_8.png".to_string(),
            big: "icons/maptiles_16.png".to_string(),
        }
    }
}

/// Element ids, classes and attributes of the host page. Every field has a
/// default, so a partial JSON document only overrides what it names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub result_id: String,
    pub canvas_id: String,
    pub placeholder_id: String,
    pub notes_id: String,
    pub big_tiles_id: String,
    pub stress_button_id: String,
    pub setting_class: String,
    pub choice_class: String,
    pub hidden_class: String,
    pub level_attr: String,
    pub layout_attr: String,
    pub atlases: AtlasPaths,
    pub stress_iterations: usize,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            result_id: "temp".to_string(),
            canvas_id: "map-canvas".to_string(),
            placeholder_id: "map-placeholder".to_string(),
            notes_id: "map-notes".to_string(),
            big_tiles_id: "big_tiles".to_string(),
            stress_button_id: "spam".to_string(),
            setting_class: "setting".to_string(),
            choice_class: "layout-btn".to_string(),
            hidden_class: "hidden".to_string(),
            level_attr: "data-lvl".to_string(),
            layout_attr: "data-layout".to_string(),
            atlases: AtlasPaths::default(),
            stress_iterations: DEFAULT_STRESS_ITERATIONS,
        }
    }
}

impl PageConfig {
    /// Parse a page configuration from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or a field has the wrong type.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    #[must_use]
    pub fn atlas_path(&self, resolution: TileResolution) -> &str {
        match resolution {
            TileResolution::Big => &self.atlases.big,
            TileResolution::Small => &self.atlases.small,
        }
    }
}
