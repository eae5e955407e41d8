//! Wheel geometry: peg positions to slot intervals
//!
//! The tricky part of the wheel: deriving the angular range of each prize
//! slot from where the pegs actually sit on screen. Spans come from chord
//! lengths against the ring radius, not from raw angle subtraction, so
//! unevenly laid-out pegs still produce a closed 360-degree tiling.
//!
//! Intervals live in the wheel's local, unrotated frame. The frame is
//! anchored at the first boundary peg: when that peg sits left of the
//! wheel's vertical axis the cursor starts at minus half the first span,
//! otherwise at zero.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts;
use crate::error::{Result, WheelError};
use crate::{polar_to_cartesian, wrap_degrees_from};

/// Spans must tile the circle within this tolerance (degrees)
const TILING_TOLERANCE: f64 = 1e-3;

/// One rim peg as authored in the wheel layout
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Peg {
    /// Position in the same space as the wheel center
    pub position: Vec2,
    /// Decorative pegs sit on the rim but do not mark a slot boundary
    pub decorative: bool,
}

impl Peg {
    pub fn boundary(position: Vec2) -> Self {
        Self {
            position,
            decorative: false,
        }
    }

    pub fn decorative(position: Vec2) -> Self {
        Self {
            position,
            decorative: true,
        }
    }
}

/// Extracted wheel layout: everything geometry needs, no scene graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PegLayout {
    /// Pegs in visual order around the rim
    pub pegs: Vec<Peg>,
    /// Wheel rotation center
    pub center: Vec2,
    /// Wheel scale factor; peg offsets are multiplied by this
    pub scale: f32,
    /// Distance from center of an authored content marker, if any; sets the
    /// radial placement of slot content
    pub content_marker_distance: Option<f32>,
}

impl PegLayout {
    /// Evenly spaced boundary pegs on a ring, first peg at `start_degrees`
    pub fn ring(count: usize, radius: f32, start_degrees: f32) -> Self {
        let pegs = (0..count)
            .map(|i| {
                let deg = start_degrees + 360.0 * i as f32 / count as f32;
                Peg::boundary(polar_to_cartesian(radius, deg))
            })
            .collect();
        Self {
            pegs,
            center: Vec2::ZERO,
            scale: 1.0,
            content_marker_distance: None,
        }
    }
}

/// Half-open angular range [start, end) in degrees, local frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlotInterval {
    pub start: f32,
    pub end: f32,
}

impl SlotInterval {
    #[inline]
    pub fn span(&self) -> f32 {
        self.end - self.start
    }

    /// Half-open containment; a boundary angle belongs to the interval it starts
    #[inline]
    pub fn contains(&self, degrees: f32) -> bool {
        degrees >= self.start && degrees < self.end
    }
}

/// Where a slot's visual content goes, relative to the wheel center
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlotPlacement {
    pub position: Vec2,
    /// Content rotation in degrees (the interval's angular midpoint)
    pub rotation: f32,
}

/// Derived slot intervals and content placements for one wheel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WheelGeometry {
    intervals: Vec<SlotInterval>,
    placements: Vec<SlotPlacement>,
    /// Angular position of every rim peg, decorative included; the flapper
    /// clicks over each of these
    ticks: Vec<f32>,
    radius: f32,
}

impl WheelGeometry {
    /// Derive slot intervals from a peg layout.
    ///
    /// `slot_count` must equal the number of non-decorative pegs: each
    /// boundary peg opens one slot, and the loop closes back to the first
    /// peg, so N pegs bound N slots.
    pub fn from_layout(layout: &PegLayout, slot_count: usize) -> Result<Self> {
        let pegs: Vec<Vec2> = layout
            .pegs
            .iter()
            .filter(|p| !p.decorative)
            .map(|p| (p.position - layout.center) * layout.scale)
            .collect();

        if pegs.len() < 2 {
            return Err(WheelError::TooFewPegs { found: pegs.len() });
        }
        if pegs.len() != slot_count {
            return Err(WheelError::SlotCountMismatch {
                pegs: pegs.len(),
                slots: slot_count,
            });
        }

        let radius = pegs[0].length();
        if radius < 1e-3 {
            return Err(WheelError::DegeneratePegRing);
        }

        // Central angle subtended by each consecutive peg pair, last pair
        // wrapping back to the first peg. Accumulated in f64 so the tiling
        // check stays meaningful at high peg counts.
        let n = pegs.len();
        let mut spans = Vec::with_capacity(n);
        for i in 0..n {
            spans.push(Self::chord_span(pegs[i], pegs[(i + 1) % n], radius)?);
        }

        let span_sum: f64 = spans.iter().sum();
        if (span_sum - 360.0).abs() > TILING_TOLERANCE {
            return Err(WheelError::OpenTiling {
                span_sum: span_sum as f32,
            });
        }

        // First peg left of the vertical axis biases the frame back by half a slot
        let mut cursor: f64 = if pegs[0].x < 0.0 { -(spans[0] / 2.0) } else { 0.0 };
        let frame_start = cursor as f32;

        // Tick ring: every rim peg clicks the flapper, decorative ones
        // included. Walk the full rim in visual order from the first
        // boundary peg, accumulating chord spans the same way.
        let first_boundary = layout
            .pegs
            .iter()
            .position(|p| !p.decorative)
            .unwrap_or(0);
        let rim: Vec<Vec2> = layout.pegs[first_boundary..]
            .iter()
            .chain(&layout.pegs[..first_boundary])
            .map(|p| (p.position - layout.center) * layout.scale)
            .collect();
        let mut ticks = Vec::with_capacity(rim.len());
        let mut tick_cursor = cursor;
        for i in 0..rim.len() {
            ticks.push(tick_cursor as f32);
            tick_cursor += Self::chord_span(rim[i], rim[(i + 1) % rim.len()], radius)?;
        }

        let percent = layout
            .content_marker_distance
            .map(|d| d / radius * 100.0)
            .unwrap_or(consts::DEFAULT_CONTENT_PERCENT);

        let mut intervals = Vec::with_capacity(n);
        let mut placements = Vec::with_capacity(n);
        for (i, &span) in spans.iter().enumerate() {
            intervals.push(SlotInterval {
                start: cursor as f32,
                end: (cursor + span) as f32,
            });

            let rotation = (cursor + span / 2.0) as f32;
            placements.push(Self::placement(
                pegs[i],
                pegs[(i + 1) % n],
                radius,
                percent,
                rotation,
            ));

            cursor += span;
        }

        // Kill accumulated float drift so the tiling closes exactly
        intervals[n - 1].end = frame_start + 360.0;

        log::debug!(
            "wheel geometry: {n} slots, radius {radius:.1}, frame start {frame_start:.2}\u{b0}"
        );

        Ok(Self {
            intervals,
            placements,
            ticks,
            radius,
        })
    }

    /// Central angle (degrees) subtended by two pegs on a ring of `radius`
    fn chord_span(a: Vec2, b: Vec2, radius: f32) -> Result<f64> {
        let chord = (b - a).length() as f64;
        let half = chord / (2.0 * radius as f64);
        if !(0.0..=1.0 + 1e-4).contains(&half) {
            return Err(WheelError::DegeneratePegRing);
        }
        Ok(2.0 * half.min(1.0).asin().to_degrees())
    }

    /// Content position between two pegs, pushed out to `percent` of the
    /// ring radius along the chord midpoint direction
    fn placement(a: Vec2, b: Vec2, radius: f32, percent: f32, rotation: f32) -> SlotPlacement {
        let mid = (a + b) / 2.0;
        let mid_dist = mid.length();
        let position = if mid_dist < 1e-3 {
            // Diametrically opposite pegs; fall back to the angular midpoint
            polar_to_cartesian(radius * percent / 100.0, rotation)
        } else {
            mid * (percent * radius / mid_dist / 100.0)
        };
        SlotPlacement { position, rotation }
    }

    pub fn intervals(&self) -> &[SlotInterval] {
        &self.intervals
    }

    pub fn placements(&self) -> &[SlotPlacement] {
        &self.placements
    }

    pub fn slot_count(&self) -> usize {
        self.intervals.len()
    }

    /// Peg-ring radius in layout units (after scaling)
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Start of the first interval; the local frame's angular origin
    pub fn frame_start(&self) -> f32 {
        self.intervals[0].start
    }

    /// Index of the interval containing `degrees`, after wrapping the angle
    /// into the local frame's 360-degree window. Total for finite input by
    /// construction; `None` signals a geometry bug upstream.
    pub fn interval_index(&self, degrees: f32) -> Option<usize> {
        if !degrees.is_finite() {
            return None;
        }
        let wrapped = wrap_degrees_from(degrees, self.frame_start());
        self.intervals.iter().position(|iv| iv.contains(wrapped))
    }

    /// Angular position of every rim peg in the local frame, decorative
    /// pegs included, ascending from the frame start
    pub fn tick_angles(&self) -> &[f32] {
        &self.ticks
    }

    /// Index of the tick sector containing `degrees`. Decorative pegs bound
    /// sectors here even though they bound no slot; crossing any sector
    /// edge is one flapper click.
    pub fn tick_index(&self, degrees: f32) -> Option<usize> {
        if !degrees.is_finite() {
            return None;
        }
        let wrapped = wrap_degrees_from(degrees, self.frame_start());
        self.ticks.iter().rposition(|&t| wrapped >= t)
    }
}
