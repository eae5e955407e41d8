//! Rotational rigid-body simulation for the wheel and its flapper
//!
//! One disc pinned at its center, spun by angular impulses and slowed by
//! exponential damping, plus a spring-pinned flapper that clicks over the
//! rim pegs. The stopping point is emergent: damping plus the small drag of
//! each peg crossing decide where the wheel ends up, not a precomputed
//! target angle.
//!
//! The body integrates in radians (velocities and tuning are in radian
//! units); degree accessors feed the geometry/resolution side, which works
//! in the wheel's degree-based local frame.

use serde::{Deserialize, Serialize};

use crate::config::{SpinDirection, WheelConfig};

use super::geometry::WheelGeometry;

/// The wheel's rigid body. Pinned at its center, rotation-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WheelBody {
    /// Accumulated rotation (radians, signed; clockwise spins go negative)
    pub rotation: f32,
    /// Angular velocity (rad/s)
    pub angular_velocity: f32,
    /// Exponential damping coefficient, set when a spin starts
    pub angular_damping: f32,
    /// Frozen bodies ignore stepping entirely (settled or pre-spin)
    pub frozen: bool,
}

impl Default for WheelBody {
    fn default() -> Self {
        Self {
            rotation: 0.0,
            angular_velocity: 0.0,
            angular_damping: 0.0,
            frozen: true,
        }
    }
}

/// Spring-pinned flapper arm riding the rim pegs
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Flapper {
    /// Deflection from rest (radians); rest is 0
    pub rotation: f32,
    pub velocity: f32,
}

/// Two-phase settle detection
#[derive(Debug, Clone, Copy, PartialEq)]
enum SettlePhase {
    /// Wheel is live (or idle with no spin pending)
    Moving,
    /// Near rest; counting down the confirmation dwell
    Dwell { remaining: f32 },
    /// Confirmed at rest, body frozen
    Rested,
}

/// What one physics step observed
#[derive(Debug, Clone, Copy, Default)]
pub struct StepOutcome {
    /// The flapper crossed a peg this step (feedback tick)
    pub contact: bool,
    /// The settle dwell completed this step; the body is now frozen
    pub settled: bool,
}

/// Owns the wheel body and flapper for one wheel instance
#[derive(Debug, Clone)]
pub struct SpinPhysics {
    body: WheelBody,
    flapper: Flapper,
    config: WheelConfig,
    phase: SettlePhase,
    /// Sign of the last applied impulse; settle watches for a crossing
    /// against this direction
    spin_sign: f32,
    /// Tick sector currently under the flapper tip, for contact detection
    last_tick: Option<usize>,
}

impl SpinPhysics {
    pub fn new(config: WheelConfig) -> Self {
        Self {
            body: WheelBody::default(),
            flapper: Flapper::default(),
            config,
            phase: SettlePhase::Moving,
            spin_sign: 0.0,
            last_tick: None,
        }
    }

    /// Add angular impulse and arm damping, clamping the resulting speed.
    /// Runaway swipes with huge displacement cannot exceed the clamp.
    pub fn apply_impulse(&mut self, magnitude: f32, direction: SpinDirection) {
        let delta = magnitude * self.config.impulse_scale * direction.sign() / self.config.inertia;
        self.body.angular_damping = self.config.angular_damping;
        self.body.frozen = false;
        self.body.angular_velocity += delta;

        let max = self.config.max_angular_velocity;
        self.body.angular_velocity = self.body.angular_velocity.clamp(-max, max);

        self.spin_sign = direction.sign();
        self.phase = SettlePhase::Moving;
        log::debug!(
            "impulse {magnitude:.1} -> angular velocity {:.2} rad/s",
            self.body.angular_velocity
        );
    }

    /// Direct-manipulation rotation (drag preview while not spinning)
    pub fn rotate_by(&mut self, degrees: f32) {
        self.body.rotation += degrees.to_radians();
    }

    /// Integrate one step. Only meaningful while a spin is live; the caller
    /// gates this on the spinning state.
    pub fn step(&mut self, dt: f32, geometry: &WheelGeometry) -> StepOutcome {
        let mut outcome = StepOutcome::default();
        if self.body.frozen || dt <= 0.0 {
            return outcome;
        }

        // Exponential damping, then rotation integration
        self.body.angular_velocity *= (-self.body.angular_damping * dt).exp();
        self.body.rotation += self.body.angular_velocity * dt;

        // Flapper spring-damper toward rest
        let accel = -self.config.flapper_stiffness * self.flapper.rotation
            - self.config.flapper_damping * self.flapper.velocity;
        self.flapper.velocity += accel * dt;
        self.flapper.rotation += self.flapper.velocity * dt;
        let stop = crate::consts::FLAPPER_MAX_DEFLECTION;
        if self.flapper.rotation.abs() > stop {
            self.flapper.rotation = self.flapper.rotation.clamp(-stop, stop);
            self.flapper.velocity = 0.0;
        }

        // Peg contact: the flapper tip crossed into another tick sector.
        // Decorative pegs bound tick sectors too, so they click the flapper
        // without affecting which slot wins.
        let pointer = self.rotation_degrees() - self.config.flapper_bias;
        if let Some(tick) = geometry.tick_index(pointer) {
            if let Some(prev) = self.last_tick {
                if tick != prev {
                    outcome.contact = true;
                    // Kick the flapper along the wheel's motion and bleed a
                    // little speed off the wheel
                    self.flapper.velocity += self.body.angular_velocity * self.config.flapper_kick;
                    let av = self.body.angular_velocity;
                    let dragged = (av.abs() - self.config.peg_contact_drag).max(0.0);
                    self.body.angular_velocity = dragged.copysign(av);
                }
            }
            self.last_tick = Some(tick);
        }

        outcome.settled = self.update_settle(dt);
        outcome
    }

    /// Settle state machine. Phase one triggers when the wheel is nearly
    /// stopped or its velocity has crossed zero against the spin direction
    /// (a flapper bounce pushing it backwards). The dwell then absorbs
    /// residual flapper noise before the body is hard-frozen.
    fn update_settle(&mut self, dt: f32) -> bool {
        let av = self.body.angular_velocity;
        let eps = self.config.rest_epsilon;

        match self.phase {
            SettlePhase::Moving => {
                let near_rest = av.abs() < eps;
                let crossed = self.spin_sign != 0.0 && av * self.spin_sign < 0.0;
                if near_rest || crossed {
                    self.phase = SettlePhase::Dwell {
                        remaining: self.config.settle_dwell,
                    };
                }
                false
            }
            SettlePhase::Dwell { remaining } => {
                // A real recovery in the spin direction cancels the dwell
                if av * self.spin_sign > 0.0 && av.abs() > 4.0 * eps {
                    self.phase = SettlePhase::Moving;
                    return false;
                }
                let remaining = remaining - dt;
                if remaining <= 0.0 {
                    self.body.angular_velocity = 0.0;
                    self.body.frozen = true;
                    self.phase = SettlePhase::Rested;
                    log::debug!("wheel settled at {:.2}\u{b0}", self.rotation_degrees());
                    true
                } else {
                    self.phase = SettlePhase::Dwell { remaining };
                    false
                }
            }
            SettlePhase::Rested => false,
        }
    }

    /// True once the settle dwell has completed and the body is frozen
    pub fn is_resting(&self) -> bool {
        self.phase == SettlePhase::Rested
    }

    pub fn body(&self) -> &WheelBody {
        &self.body
    }

    /// Accumulated wheel rotation in degrees (signed)
    pub fn rotation_degrees(&self) -> f32 {
        self.body.rotation.to_degrees()
    }

    /// Flapper deflection in degrees
    pub fn flapper_degrees(&self) -> f32 {
        self.flapper.rotation.to_degrees()
    }
}
