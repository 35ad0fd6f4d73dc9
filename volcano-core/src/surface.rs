//! The presentation boundary the orchestrator drives.

use crate::choices::ChoiceControl;
use crate::resolution::TileResolution;

/// Visibility of the placeholder and map surfaces.
pub trait MapPanel {
    /// Hide the map, show the placeholder and clear the notes area.
    fn show_placeholder(&mut self);

    /// Hide the placeholder, show the map and fill the notes area.
    fn show_map(&mut self, notes: &str);
}

/// Everything the host page exposes to the orchestrator.
///
/// `Target` and `Atlas` are the handles the engine draws with; they are
/// whatever the host's drawing API uses (a 2D context and an image in the
/// browser).
pub trait Presentation: MapPanel {
    type Target;
    type Atlas;

    /// Replace the result area text verbatim.
    fn set_result_text(&mut self, text: &str);

    /// Current state of the tile-size toggle.
    fn resolution(&self) -> TileResolution;

    /// Resize the drawing target to `side_px` square and return a handle to
    /// draw into. Resizing clears previous pixels.
    fn prepare_canvas(&mut self, side_px: u32) -> Self::Target;

    /// Tile atlas loaded at startup for the given resolution.
    fn atlas(&self, resolution: TileResolution) -> Self::Atlas;

    /// Choice controls currently on the page, in document order.
    fn discover_choices(&mut self) -> Vec<ChoiceControl>;

    /// Attach the activation handler for a control found by the latest
    /// discovery.
    fn attach_choice_handler(&mut self, control: ChoiceControl);

    /// Remove the handler previously attached for a control.
    fn detach_choice_handler(&mut self, control: ChoiceControl);
}
