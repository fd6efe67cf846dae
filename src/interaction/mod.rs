use serde::{Deserialize, Serialize};

use crate::extensions::ClusterKey;

mod scheduler;

pub use scheduler::{IntentClass, PendingRecompute, RecomputeScheduler};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InteractionMode {
    Idle,
    Panning,
}

/// Emitted when the cluster under the pointer changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoverChange {
    pub previous: Option<ClusterKey>,
    pub current: Option<ClusterKey>,
}

/// Tracks the hovered cluster so renderers only hear about transitions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HoverTracker {
    current: Option<ClusterKey>,
}

impl HoverTracker {
    #[must_use]
    pub fn current(self) -> Option<ClusterKey> {
        self.current
    }

    pub fn update(&mut self, hovered: Option<ClusterKey>) -> Option<HoverChange> {
        if hovered == self.current {
            return None;
        }
        let change = HoverChange {
            previous: self.current,
            current: hovered,
        };
        self.current = hovered;
        Some(change)
    }

    pub fn clear(&mut self) -> Option<HoverChange> {
        self.update(None)
    }
}

/// Pointer and pan state driven by renderer intents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionState {
    mode: InteractionMode,
    cursor_x: f64,
    cursor_y: f64,
    pointer_inside: bool,
    hover: HoverTracker,
}

impl Default for InteractionState {
    fn default() -> Self {
        Self {
            mode: InteractionMode::Idle,
            cursor_x: 0.0,
            cursor_y: 0.0,
            pointer_inside: false,
            hover: HoverTracker::default(),
        }
    }
}

impl InteractionState {
    #[must_use]
    pub fn mode(self) -> InteractionMode {
        self.mode
    }

    #[must_use]
    pub fn cursor(self) -> Option<(f64, f64)> {
        self.pointer_inside.then_some((self.cursor_x, self.cursor_y))
    }

    #[must_use]
    pub fn hovered(self) -> Option<ClusterKey> {
        self.hover.current()
    }

    pub fn on_pointer_move(&mut self, x: f64, y: f64) {
        self.cursor_x = x;
        self.cursor_y = y;
        self.pointer_inside = true;
    }

    pub fn on_pointer_leave(&mut self) -> Option<HoverChange> {
        self.pointer_inside = false;
        self.hover.clear()
    }

    pub fn set_hovered(&mut self, hovered: Option<ClusterKey>) -> Option<HoverChange> {
        self.hover.update(hovered)
    }

    pub fn on_pan_start(&mut self) {
        self.mode = InteractionMode::Panning;
    }

    pub fn on_pan_end(&mut self) {
        self.mode = InteractionMode::Idle;
    }
}
