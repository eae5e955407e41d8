//! Spin Wheel - a physics-driven prize wheel mini-game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (wheel geometry, spin physics, winner resolution)
//! - `prizes`: Ordered prize records consumed by a wheel instance
//! - `config`: Data-driven tuning and behavior flags
//! - `error`: Load-time and internal-consistency error taxonomy
//!
//! Rendering, sound, and input capture live outside this crate; the core
//! consumes parsed prize tables, peg positions, and scalar drag deltas, and
//! emits events (`WheelEvent`) for a presentation layer to act on.

pub mod config;
pub mod error;
pub mod prizes;
pub mod sim;

pub use config::{SpinDirection, WheelConfig};
pub use error::WheelError;
pub use prizes::{PrizeSlot, PrizeTable};
pub use sim::{InputEvent, SpinWheelController, WheelEvent, WheelState};

use glam::Vec2;

/// Reference tuning constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz, matches the external frame clock)
    pub const SIM_DT: f32 = 1.0 / 120.0;

    /// Minimum accumulated drag displacement to launch a spin (strict `>`)
    pub const MIN_DRAG_THRESHOLD: f32 = 100.0;
    /// Drag-to-degrees divisor for the direct-manipulation preview
    pub const DRAG_PREVIEW_DIVISOR: f32 = 100.0;

    /// Hub/button spins draw a random impulse from this range
    pub const IMPULSE_MIN: f32 = 1200.0;
    pub const IMPULSE_MAX: f32 = 2800.0;
    /// Applied angular impulse = magnitude * IMPULSE_SCALE * direction
    pub const IMPULSE_SCALE: f32 = 30.0;
    /// Rotational inertia of the wheel body (reference mass)
    pub const WHEEL_INERTIA: f32 = 200.0;
    /// Angular velocity clamp after an impulse (rad/s)
    pub const MAX_ANGULAR_VELOCITY: f32 = 100.0;
    /// Damping applied while a spin is live
    pub const ANGULAR_DAMPING: f32 = 1.0;

    /// Angular speed below which the wheel counts as nearly at rest (rad/s)
    pub const REST_EPSILON: f32 = 0.05;
    /// Dwell before a near-rest reading is confirmed and the wheel frozen
    pub const SETTLE_DWELL: f32 = 0.25;
    /// Winning-slot highlight period before the `Won` event fires
    pub const HIGHLIGHT_DURATION: f32 = 2.0;

    /// Flapper spring-damper coefficients
    pub const FLAPPER_STIFFNESS: f32 = 900.0;
    pub const FLAPPER_DAMPING: f32 = 12.0;
    /// Fraction of wheel angular velocity transferred to the flapper per peg hit
    pub const FLAPPER_KICK: f32 = 0.05;
    /// Hard stop for flapper deflection (radians)
    pub const FLAPPER_MAX_DEFLECTION: f32 = std::f32::consts::FRAC_PI_4;
    /// Angular speed bled off the wheel per peg crossing (rad/s)
    pub const PEG_CONTACT_DRAG: f32 = 0.08;

    /// Slot content sits at this percentage of the peg-ring radius when no
    /// reference marker is supplied
    pub const DEFAULT_CONTENT_PERCENT: f32 = 75.0;
}

/// Normalize an angle in degrees to [0, 360)
#[inline]
pub fn normalize_degrees(degrees: f32) -> f32 {
    wrap_degrees_from(degrees, 0.0)
}

/// Bring an angle in degrees into the window [start, start + 360)
#[inline]
pub fn wrap_degrees_from(degrees: f32, start: f32) -> f32 {
    let wrapped = start + (degrees - start).rem_euclid(360.0);
    // rem_euclid of a tiny negative offset can round up to a full turn
    if wrapped >= start + 360.0 {
        start
    } else {
        wrapped
    }
}

/// Convert polar (r, theta in degrees) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, degrees: f32) -> Vec2 {
    let theta = degrees.to_radians();
    Vec2::new(r * theta.cos(), r * theta.sin())
}
