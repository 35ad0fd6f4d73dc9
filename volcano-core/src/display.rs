//! Map panel state: either the placeholder or a rendered map.

use serde::Serialize;

use crate::surface::MapPanel;

/// A (level, layout) pair the user picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Selection {
    pub level: i32,
    pub layout: u32,
}

impl Selection {
    #[must_use]
    pub const fn new(level: i32, layout: u32) -> Self {
        Self { level, layout }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    Placeholder,
    Rendered,
}

/// What the map panel currently shows. A selection and notes exist only
/// while a map is rendered.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DisplayState {
    #[default]
    Placeholder,
    Rendered { selection: Selection, notes: String },
}

impl DisplayState {
    #[must_use]
    pub const fn mode(&self) -> DisplayMode {
        match self {
            Self::Placeholder => DisplayMode::Placeholder,
            Self::Rendered { .. } => DisplayMode::Rendered,
        }
    }

    #[must_use]
    pub const fn last_selection(&self) -> Option<Selection> {
        match self {
            Self::Placeholder => None,
            Self::Rendered { selection, .. } => Some(*selection),
        }
    }

    #[must_use]
    pub fn notes(&self) -> &str {
        match self {
            Self::Placeholder => "",
            Self::Rendered { notes, .. } => notes,
        }
    }
}

/// Sole owner of [`DisplayState`]. Every transition is mirrored onto the
/// presentation boundary in the same call.
#[derive(Debug, Default)]
pub struct DisplayController {
    state: DisplayState,
}

impl DisplayController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop any rendered map and show the placeholder.
    pub fn reset<P: MapPanel + ?Sized>(&mut self, panel: &mut P) {
        self.state = DisplayState::Placeholder;
        panel.show_placeholder();
    }

    /// Record a successful render and reveal the map with its notes.
    pub fn show_rendered<P: MapPanel + ?Sized>(
        &mut self,
        panel: &mut P,
        selection: Selection,
        notes: String,
    ) {
        panel.show_map(&notes);
        self.state = DisplayState::Rendered { selection, notes };
    }

    #[must_use]
    pub const fn state(&self) -> &DisplayState {
        &self.state
    }

    #[must_use]
    pub const fn mode(&self) -> DisplayMode {
        self.state.mode()
    }

    #[must_use]
    pub const fn last_selection(&self) -> Option<Selection> {
        self.state.last_selection()
    }

    #[must_use]
    pub fn notes(&self) -> &str {
        self.state.notes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct PanelLog {
        events: Vec<String>,
    }

    impl MapPanel for PanelLog {
        fn show_placeholder(&mut self) {
            self.events.push("placeholder".into());
        }

        fn show_map(&mut self, notes: &str) {
            self.events.push(format!("map:{notes}"));
        }
    }

    #[test]
    fn starts_in_placeholder_without_selection() {
        let controller = DisplayController::new();
        assert_eq!(controller.mode(), DisplayMode::Placeholder);
        assert_eq!(controller.last_selection(), None);
        assert_eq!(controller.notes(), "");
    }

    #[test]
    fn show_rendered_stores_selection_and_notes() {
        let mut panel = PanelLog::default();
        let mut controller = DisplayController::new();
        controller.show_rendered(&mut panel, Selection::new(3, 12), "gate".into());
        assert_eq!(controller.mode(), DisplayMode::Rendered);
        assert_eq!(controller.last_selection(), Some(Selection::new(3, 12)));
        assert_eq!(controller.notes(), "gate");
        assert_eq!(panel.events, vec!["map:gate".to_string()]);
    }

    #[test]
    fn reset_clears_everything_and_signals_placeholder() {
        let mut panel = PanelLog::default();
        let mut controller = DisplayController::new();
        controller.show_rendered(&mut panel, Selection::new(1, 4), "notes".into());
        controller.reset(&mut panel);
        assert_eq!(controller.state(), &DisplayState::Placeholder);
        assert_eq!(controller.notes(), "");
        assert_eq!(panel.events.last().map(String::as_str), Some("placeholder"));
    }
}
