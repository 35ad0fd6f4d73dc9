//! Choice controls and their activation handlers.
//!
//! The engine regenerates the choice controls on every recompute. Handlers
//! are tracked per control identity and replaced in place, so a control that
//! survives any number of recomputes still carries exactly one handler.

use std::collections::{BTreeSet, HashMap};

use serde::Serialize;

use crate::display::Selection;
use crate::surface::Presentation;

/// Identity of one choice control: its (level, layout) data plus an ordinal
/// telling repeated pairs apart in document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ChoiceControl {
    pub level: i32,
    pub layout: u32,
    pub ordinal: u32,
}

impl ChoiceControl {
    #[must_use]
    pub const fn selection(self) -> Selection {
        Selection::new(self.level, self.layout)
    }
}

/// Turn (level, layout) pairs in document order into controls, numbering
/// repeats of the same pair.
#[must_use]
pub fn controls_from_pairs<I>(pairs: I) -> Vec<ChoiceControl>
where
    I: IntoIterator<Item = (i32, u32)>,
{
    let mut seen: HashMap<(i32, u32), u32> = HashMap::new();
    pairs
        .into_iter()
        .map(|(level, layout)| {
            let ordinal = seen.entry((level, layout)).or_insert(0);
            let control = ChoiceControl {
                level,
                layout,
                ordinal: *ordinal,
            };
            *ordinal += 1;
            control
        })
        .collect()
}

/// What one rebind did to the handler set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RebindSummary {
    pub generation: u64,
    pub attached: usize,
    pub replaced: usize,
    pub detached: usize,
}

impl RebindSummary {
    /// Controls holding a handler after the rebind.
    #[must_use]
    pub const fn bound(&self) -> usize {
        self.attached + self.replaced
    }
}

#[derive(Debug, Default)]
pub struct ChoiceBindings {
    bound: BTreeSet<ChoiceControl>,
    generation: u64,
}

impl ChoiceBindings {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bring the surface's handlers in line with `controls`: vanished
    /// controls lose their handler, surviving ones get a fresh handler in
    /// place of the old one, new ones get their first.
    pub fn rebind<P>(&mut self, surface: &mut P, controls: Vec<ChoiceControl>) -> RebindSummary
    where
        P: Presentation + ?Sized,
    {
        let next: BTreeSet<ChoiceControl> = controls.into_iter().collect();
        self.generation += 1;
        let mut summary = RebindSummary {
            generation: self.generation,
            ..RebindSummary::default()
        };

        for &stale in self.bound.difference(&next) {
            surface.detach_choice_handler(stale);
            summary.detached += 1;
        }
        for &control in &next {
            if self.bound.contains(&control) {
                surface.detach_choice_handler(control);
                summary.replaced += 1;
            } else {
                summary.attached += 1;
            }
            surface.attach_choice_handler(control);
        }

        self.bound = next;
        summary
    }

    #[must_use]
    pub fn is_bound(&self, control: &ChoiceControl) -> bool {
        self.bound.contains(control)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bound.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bound.is_empty()
    }

    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChoiceControl> {
        self.bound.iter()
    }
}
