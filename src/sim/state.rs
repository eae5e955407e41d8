//! Wheel state and the input/output event vocabulary
//!
//! `WheelState` transitions are owned exclusively by the controller; other
//! components read state or request transitions, never set it directly.

use serde::{Deserialize, Serialize};

/// Lifecycle state of one wheel instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum WheelState {
    /// Pre-setup marker; collapses to `Stopped` once construction completes
    #[default]
    Waiting,
    /// Idle between spins; accepts drag-start and hub-tap input
    Stopped,
    /// Drag in progress; accumulating displacement, previewing rotation
    Ready,
    /// Spin live; physics stepping, all spin inputs ignored
    Spinning,
}

/// Input the core consumes from the input-capture layer.
///
/// `vertical_delta` is the displacement since the previous drag event, in
/// input-space units (points/pixels).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    DragStart,
    DragMove { vertical_delta: f32 },
    DragEnd,
    /// Tap on the center hub or an external spin button
    HubTap,
}

/// Events emitted outward to the presentation layer
#[derive(Debug, Clone, PartialEq)]
pub enum WheelEvent {
    /// A spin launched (drives woosh sound / emitter effects)
    SpinStarted,
    /// Flapper clicked over a peg (drives the tick sound)
    Contact,
    /// Drag released below the spin threshold (drives the error sound)
    InsufficientSpin,
    /// Winning slot identified; highlight it
    Highlight(usize),
    /// Fired exactly once per completed spin, after the highlight period.
    /// Carries the data the win dialog consumes.
    Won {
        index: usize,
        title: String,
        image: String,
        amount: i64,
    },
}
