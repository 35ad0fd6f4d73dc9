use volcano_core::{NumericField, SettingsForm, ToggleField};
use web_sys::{Document, HtmlInputElement};

use crate::dom;
use crate::error::DomError;

/// Settings form read straight from the page's `<input>` elements, looked up
/// by their logical names on every read.
pub struct DomForm {
    document: Document,
}

impl DomForm {
    #[must_use]
    pub const fn new(document: Document) -> Self {
        Self { document }
    }

    fn input(&self, id: &str) -> Result<HtmlInputElement, DomError> {
        dom::element_by_id::<HtmlInputElement>(&self.document, id, "input")
    }
}

impl SettingsForm for DomForm {
    fn text(&self, field: NumericField) -> String {
        self.input(field.key()).map_or_else(
            |err| {
                log::debug!("reading {}: {err}", field.key());
                String::new()
            },
            |input| input.value(),
        )
    }

    fn checked(&self, field: ToggleField) -> bool {
        self.input(field.key()).map_or_else(
            |err| {
                log::debug!("reading {}: {err}", field.key());
                false
            },
            |input| input.checked(),
        )
    }
}
