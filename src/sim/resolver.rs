//! Winner resolution: settled angle to prize slot index
//!
//! The flapper tip, not its pivot, is the contact point, so half the
//! flapper's own rest rotation is folded into the stop angle before the
//! lookup. A non-zero flapper bias (flapper mounted away from the wheel's
//! zero reference) shifts the angle the other way. The lookup itself is a
//! half-open interval scan: an angle exactly on a boundary belongs to the
//! interval it starts, so every normalized angle resolves to exactly one
//! slot.

use crate::error::{Result, WheelError};

use super::geometry::WheelGeometry;

/// Resolve the winning slot for a settled wheel.
///
/// * `rotation_degrees` - the wheel body's final accumulated rotation
/// * `flapper_degrees` - the flapper's deflection at rest
/// * `flapper_bias` - static angular offset of the flapper mount
///
/// Randomness lives in the impulse at spin time; resolution is pure
/// arithmetic and fully deterministic.
pub fn resolve_winner(
    rotation_degrees: f32,
    flapper_degrees: f32,
    flapper_bias: f32,
    geometry: &WheelGeometry,
) -> Result<usize> {
    // Attribute half the flapper's tip rotation to pinpoint the peg gap
    let mut degree = rotation_degrees + flapper_degrees / 2.0;

    if flapper_bias != 0.0 {
        degree -= flapper_bias;
    }

    geometry.interval_index(degree).ok_or_else(|| {
        let err = WheelError::NoMatchingInterval { degree };
        log::error!("winner resolution failed: {err}");
        err
    })
}
