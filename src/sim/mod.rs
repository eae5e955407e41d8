//! Deterministic wheel simulation
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed external-clock timesteps only
//! - Seeded RNG only (randomness lives solely in spin impulse magnitude)
//! - No rendering or platform dependencies

pub mod controller;
pub mod geometry;
pub mod physics;
pub mod resolver;
pub mod state;

pub use controller::SpinWheelController;
pub use geometry::{Peg, PegLayout, SlotInterval, SlotPlacement, WheelGeometry};
pub use physics::{Flapper, SpinPhysics, StepOutcome, WheelBody};
pub use resolver::resolve_winner;
pub use state::{InputEvent, WheelEvent, WheelState};
