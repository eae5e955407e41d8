//! Error taxonomy for wheel construction and resolution
//!
//! Configuration errors are load-time and fatal: the wheel must not open.
//! Geometry-invariant violations are internal bugs surfaced loudly rather
//! than papered over with a plausible-looking winner. Recoverable input
//! conditions (insufficient drag, redundant spin requests) are events or
//! no-ops, not errors.

use std::fmt;

/// Fatal errors produced by the wheel core
#[derive(Debug, Clone, PartialEq)]
pub enum WheelError {
    /// Fewer than 2 boundary pegs; no slot arcs can exist
    TooFewPegs { found: usize },
    /// Prize slot count does not match boundary peg count
    SlotCountMismatch { pegs: usize, slots: usize },
    /// Peg ring radius is degenerate or a chord exceeds the ring diameter
    DegeneratePegRing,
    /// Slot spans do not tile the circle within tolerance
    OpenTiling { span_sum: f32 },
    /// A tuning value is outside its legal range
    InvalidConfig { field: &'static str },
    /// Winner resolution found no interval for a settled angle
    NoMatchingInterval { degree: f32 },
}

impl WheelError {
    /// True for load-time configuration defects (bad authored data)
    pub fn is_configuration(&self) -> bool {
        !matches!(self, WheelError::NoMatchingInterval { .. })
    }

    /// True for internal-consistency violations discovered at runtime
    pub fn is_invariant_violation(&self) -> bool {
        matches!(self, WheelError::NoMatchingInterval { .. })
    }
}

impl fmt::Display for WheelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WheelError::TooFewPegs { found } => {
                write!(f, "wheel needs at least 2 boundary pegs, found {found}")
            }
            WheelError::SlotCountMismatch { pegs, slots } => {
                write!(f, "{pegs} boundary pegs but {slots} prize slots")
            }
            WheelError::DegeneratePegRing => {
                write!(f, "peg positions do not form a ring around the wheel center")
            }
            WheelError::OpenTiling { span_sum } => {
                write!(f, "slot spans sum to {span_sum}\u{b0}, expected 360\u{b0}")
            }
            WheelError::InvalidConfig { field } => {
                write!(f, "configuration field `{field}` is out of range")
            }
            WheelError::NoMatchingInterval { degree } => {
                write!(f, "no slot interval matches settled angle {degree}\u{b0}")
            }
        }
    }
}

impl std::error::Error for WheelError {}

pub type Result<T> = std::result::Result<T, WheelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        assert!(WheelError::TooFewPegs { found: 1 }.is_configuration());
        assert!(WheelError::SlotCountMismatch { pegs: 8, slots: 6 }.is_configuration());
        assert!(WheelError::NoMatchingInterval { degree: 12.5 }.is_invariant_violation());
        assert!(!WheelError::NoMatchingInterval { degree: 12.5 }.is_configuration());
    }

    #[test]
    fn test_display_is_descriptive() {
        let msg = WheelError::SlotCountMismatch { pegs: 8, slots: 6 }.to_string();
        assert!(msg.contains('8') && msg.contains('6'));
    }
}
