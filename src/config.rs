//! Wheel tuning and behavior flags
//!
//! One `WheelConfig` per wheel instance. The impulse range, scaling constant,
//! inertia, and damping values are coupled to each other; they ship with the
//! reference tuning but stay configurable rather than hard-coded.

use serde::{Deserialize, Serialize};

use crate::consts;
use crate::error::{Result, WheelError};

/// Physical spin direction; the sign convention for applied impulses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SpinDirection {
    #[default]
    Clockwise,
    CounterClockwise,
}

impl SpinDirection {
    /// Sign applied to angular impulses (clockwise rotation is negative)
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            SpinDirection::Clockwise => -1.0,
            SpinDirection::CounterClockwise => 1.0,
        }
    }
}

/// Tuning and behavior flags for one wheel instance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WheelConfig {
    /// Which way impulses turn the wheel
    pub spin_direction: SpinDirection,
    /// Whether tapping the center hub triggers a spin
    pub hub_spins_wheel: bool,
    /// Whether drag-to-spin input is handled at all
    pub swipe_to_spin: bool,

    /// Accumulated drag displacement must strictly exceed this to spin
    pub min_drag_threshold: f32,
    /// Degrees of preview rotation per unit of drag displacement is 1/divisor
    pub drag_preview_divisor: f32,

    /// Random impulse magnitude range for hub/button spins
    pub impulse_min: f32,
    pub impulse_max: f32,
    /// Impulse magnitudes are scaled by this before application
    pub impulse_scale: f32,
    /// Rotational inertia of the wheel body
    pub inertia: f32,
    /// Clamp on |angular velocity| after an impulse (rad/s)
    pub max_angular_velocity: f32,
    /// Damping set on the body when a spin starts
    pub angular_damping: f32,

    /// Near-rest angular speed threshold (rad/s)
    pub rest_epsilon: f32,
    /// Confirmation dwell before the wheel is frozen (seconds)
    pub settle_dwell: f32,
    /// Delay between the winning-slot highlight and the `Won` event (seconds)
    pub highlight_duration: f32,

    /// Static angular offset of the flapper's rest position (degrees)
    pub flapper_bias: f32,
    /// Flapper spring-damper coefficients
    pub flapper_stiffness: f32,
    pub flapper_damping: f32,
    /// Fraction of wheel angular velocity kicked into the flapper per peg hit
    pub flapper_kick: f32,
    /// Angular speed bled off the wheel per peg crossing (rad/s)
    pub peg_contact_drag: f32,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            spin_direction: SpinDirection::Clockwise,
            hub_spins_wheel: true,
            swipe_to_spin: true,
            min_drag_threshold: consts::MIN_DRAG_THRESHOLD,
            drag_preview_divisor: consts::DRAG_PREVIEW_DIVISOR,
            impulse_min: consts::IMPULSE_MIN,
            impulse_max: consts::IMPULSE_MAX,
            impulse_scale: consts::IMPULSE_SCALE,
            inertia: consts::WHEEL_INERTIA,
            max_angular_velocity: consts::MAX_ANGULAR_VELOCITY,
            angular_damping: consts::ANGULAR_DAMPING,
            rest_epsilon: consts::REST_EPSILON,
            settle_dwell: consts::SETTLE_DWELL,
            highlight_duration: consts::HIGHLIGHT_DURATION,
            flapper_bias: 0.0,
            flapper_stiffness: consts::FLAPPER_STIFFNESS,
            flapper_damping: consts::FLAPPER_DAMPING,
            flapper_kick: consts::FLAPPER_KICK,
            peg_contact_drag: consts::PEG_CONTACT_DRAG,
        }
    }
}

impl WheelConfig {
    /// Check tuning values are in legal ranges before a wheel opens
    pub fn validate(&self) -> Result<()> {
        if !(self.min_drag_threshold > 0.0) {
            return Err(WheelError::InvalidConfig {
                field: "min_drag_threshold",
            });
        }
        if !(self.drag_preview_divisor > 0.0) {
            return Err(WheelError::InvalidConfig {
                field: "drag_preview_divisor",
            });
        }
        if !(self.impulse_min > 0.0) || self.impulse_max < self.impulse_min {
            return Err(WheelError::InvalidConfig {
                field: "impulse_range",
            });
        }
        if !(self.inertia > 0.0) {
            return Err(WheelError::InvalidConfig { field: "inertia" });
        }
        if !(self.max_angular_velocity > 0.0) {
            return Err(WheelError::InvalidConfig {
                field: "max_angular_velocity",
            });
        }
        if !(0.0..=1.0).contains(&self.angular_damping) {
            return Err(WheelError::InvalidConfig {
                field: "angular_damping",
            });
        }
        if !(self.rest_epsilon > 0.0) {
            return Err(WheelError::InvalidConfig {
                field: "rest_epsilon",
            });
        }
        if self.settle_dwell < 0.0 || self.highlight_duration < 0.0 {
            return Err(WheelError::InvalidConfig { field: "timing" });
        }
        if !(self.flapper_stiffness > 0.0) || self.flapper_damping < 0.0 {
            return Err(WheelError::InvalidConfig {
                field: "flapper_spring",
            });
        }
        Ok(())
    }
}
