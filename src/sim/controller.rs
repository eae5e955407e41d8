//! Per-wheel orchestration: input gating, state transitions, tick update
//!
//! One `SpinWheelController` owns one prize table, geometry, and physics
//! instance for the lifetime of a wheel "open". Transition authority lives
//! here and nowhere else. All deferred behavior (settle dwell, highlight
//! period) is tick-driven countdown state, so dropping the controller
//! cancels everything pending.

use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::config::WheelConfig;
use crate::error::Result;
use crate::prizes::PrizeTable;

use super::geometry::{PegLayout, SlotPlacement, WheelGeometry};
use super::physics::SpinPhysics;
use super::resolver::resolve_winner;
use super::state::{InputEvent, WheelEvent, WheelState};

/// Post-settle sequencing, driven by `update`
#[derive(Debug, Clone, Copy, PartialEq)]
enum PostSpin {
    /// No spin outcome pending
    Idle,
    /// Winning slot highlighted; counting down to the `Won` event
    Highlighting { index: usize, remaining: f32 },
    /// `Won` fired; waiting for the dialog-close acknowledgment
    AwaitingAck { index: usize },
}

/// Orchestrator for one active wheel
pub struct SpinWheelController {
    config: WheelConfig,
    prizes: PrizeTable,
    geometry: WheelGeometry,
    physics: SpinPhysics,
    state: WheelState,
    post_spin: PostSpin,
    /// Displacement accumulated over the current drag gesture
    drag_accum: f32,
    /// Wheel scale factor; hub spin power scales with it
    scale: f32,
    rng: Pcg32,
    events: Vec<WheelEvent>,
}

impl SpinWheelController {
    /// Build a wheel from an already-parsed prize table and extracted peg
    /// layout. Fails on any configuration defect; a wheel that fails here
    /// must not be shown.
    pub fn new(
        prizes: PrizeTable,
        layout: &PegLayout,
        config: WheelConfig,
        seed: u64,
    ) -> Result<Self> {
        config.validate()?;
        let geometry = WheelGeometry::from_layout(layout, prizes.len())?;
        let physics = SpinPhysics::new(config.clone());

        // Setup complete: the pre-setup Waiting state collapses to Stopped
        let state = WheelState::Stopped;

        log::info!(
            "wheel open: {} slots, spin direction {:?}",
            prizes.len(),
            config.spin_direction
        );

        Ok(Self {
            config,
            prizes,
            geometry,
            physics,
            state,
            post_spin: PostSpin::Idle,
            drag_accum: 0.0,
            scale: layout.scale,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
        })
    }

    /// Feed one input event. Inputs that are illegal in the current state
    /// are silently dropped; a spin request while spinning is a no-op, not
    /// an error.
    pub fn handle_input(&mut self, input: InputEvent) {
        match input {
            InputEvent::HubTap => {
                if self.config.hub_spins_wheel {
                    self.spin();
                }
            }
            InputEvent::DragStart => {
                if self.config.swipe_to_spin
                    && self.state == WheelState::Stopped
                    && self.post_spin == PostSpin::Idle
                {
                    self.state = WheelState::Ready;
                    self.drag_accum = 0.0;
                }
            }
            InputEvent::DragMove { vertical_delta } => {
                if self.state == WheelState::Ready {
                    self.drag_accum += vertical_delta;
                    // Direct-manipulation preview, not a physics spin
                    self.physics
                        .rotate_by(-vertical_delta / self.config.drag_preview_divisor);
                }
            }
            InputEvent::DragEnd => {
                if self.state == WheelState::Ready {
                    let magnitude = self.drag_accum.abs();
                    if magnitude > self.config.min_drag_threshold {
                        self.launch(magnitude);
                    } else {
                        self.state = WheelState::Stopped;
                        self.events.push(WheelEvent::InsufficientSpin);
                    }
                }
            }
        }
    }

    /// Spin with a random impulse from the configured range (hub/button
    /// path). No-op unless the wheel is idle with no outcome pending.
    pub fn spin(&mut self) {
        if self.state == WheelState::Spinning || self.post_spin != PostSpin::Idle {
            return;
        }
        if self.state == WheelState::Ready {
            // A tap mid-drag abandons the gesture
            self.drag_accum = 0.0;
        }
        let mut power = self
            .rng
            .random_range(self.config.impulse_min..=self.config.impulse_max);
        if self.scale != 1.0 {
            power *= self.scale;
        }
        self.launch(power);
    }

    fn launch(&mut self, magnitude: f32) {
        self.physics
            .apply_impulse(magnitude, self.config.spin_direction);
        self.state = WheelState::Spinning;
        self.events.push(WheelEvent::SpinStarted);
    }

    /// Advance one tick; returns the events produced during it.
    /// Physics steps only while spinning.
    pub fn update(&mut self, dt: f32) -> Vec<WheelEvent> {
        if self.state == WheelState::Spinning {
            let outcome = self.physics.step(dt, &self.geometry);
            if outcome.contact {
                self.events.push(WheelEvent::Contact);
            }
            if outcome.settled {
                self.state = WheelState::Stopped;
                self.resolve();
            }
        }

        if let PostSpin::Highlighting { index, remaining } = self.post_spin {
            let remaining = remaining - dt;
            if remaining <= 0.0 {
                self.emit_won(index);
                self.post_spin = PostSpin::AwaitingAck { index };
            } else {
                self.post_spin = PostSpin::Highlighting { index, remaining };
            }
        }

        std::mem::take(&mut self.events)
    }

    /// The sole path into resolution: a confirmed settle while spinning
    fn resolve(&mut self) {
        match resolve_winner(
            self.physics.rotation_degrees(),
            self.physics.flapper_degrees(),
            self.config.flapper_bias,
            &self.geometry,
        ) {
            Ok(index) => {
                if let Some(slot) = self.prizes.get(index) {
                    log::info!("landed on \"{}\" (slot {index})", slot.title);
                }
                self.events.push(WheelEvent::Highlight(index));
                self.post_spin = PostSpin::Highlighting {
                    index,
                    remaining: self.config.highlight_duration,
                };
            }
            Err(err) => {
                // Geometry bug: refuse to guess a winner
                log::error!("spin aborted with no winner: {err}");
                self.post_spin = PostSpin::Idle;
            }
        }
    }

    fn emit_won(&mut self, index: usize) {
        if let Some(slot) = self.prizes.get(index) {
            self.events.push(WheelEvent::Won {
                index,
                title: slot.title.clone(),
                image: slot.image.clone(),
                amount: slot.amount,
            });
        } else {
            log::error!("winning index {index} has no prize record");
        }
    }

    /// Dialog-close acknowledgment; re-arms the wheel for the next spin
    pub fn acknowledge_win(&mut self) {
        if matches!(self.post_spin, PostSpin::AwaitingAck { .. }) {
            self.post_spin = PostSpin::Idle;
        }
    }

    pub fn state(&self) -> WheelState {
        self.state
    }

    /// Winning slot whose `Won` event has fired but not yet been
    /// acknowledged, if any
    pub fn pending_win(&self) -> Option<usize> {
        match self.post_spin {
            PostSpin::AwaitingAck { index } => Some(index),
            _ => None,
        }
    }

    pub fn prizes(&self) -> &PrizeTable {
        &self.prizes
    }

    /// Slot content placement data for the presentation layer
    pub fn placements(&self) -> &[SlotPlacement] {
        self.geometry.placements()
    }

    /// Current wheel rotation in degrees (for rendering)
    pub fn rotation_degrees(&self) -> f32 {
        self.physics.rotation_degrees()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SpinDirection;
    use crate::consts::SIM_DT;
    use crate::prizes::PrizeSlot;

    fn prize_table(n: usize) -> PrizeTable {
        PrizeTable::new(
            (0..n)
                .map(|i| PrizeSlot::new(format!("{} coins", (i + 1) * 10), "coins", (i as i64 + 1) * 10))
                .collect(),
        )
    }

    fn wheel(seed: u64) -> SpinWheelController {
        let layout = PegLayout::ring(8, 240.0, 0.0);
        SpinWheelController::new(prize_table(8), &layout, WheelConfig::default(), seed).unwrap()
    }

    /// Drive until the Won event fires; panics if it never does
    fn run_to_won(wheel: &mut SpinWheelController, max_ticks: u32) -> (Vec<WheelEvent>, Vec<WheelState>) {
        let mut all = Vec::new();
        let mut states = vec![wheel.state()];
        for _ in 0..max_ticks {
            let events = wheel.update(SIM_DT);
            let done = events
                .iter()
                .any(|e| matches!(e, WheelEvent::Won { .. }));
            all.extend(events);
            if *states.last().unwrap() != wheel.state() {
                states.push(wheel.state());
            }
            if done {
                return (all, states);
            }
        }
        panic!("no Won event within {max_ticks} ticks");
    }

    #[test]
    fn test_construction_collapses_to_stopped() {
        assert_eq!(wheel(1).state(), WheelState::Stopped);
    }

    #[test]
    fn test_mismatched_prize_count_refuses_to_open() {
        let layout = PegLayout::ring(8, 240.0, 0.0);
        let result =
            SpinWheelController::new(prize_table(6), &layout, WheelConfig::default(), 0);
        assert!(result.is_err());
        assert!(result.err().unwrap().is_configuration());
    }

    #[test]
    fn test_hub_tap_spins_and_wins_once() {
        let mut w = wheel(42);
        w.handle_input(InputEvent::HubTap);
        assert_eq!(w.state(), WheelState::Spinning);

        let (events, states) = run_to_won(&mut w, 20_000);

        assert_eq!(events[0], WheelEvent::SpinStarted);
        let wins = events
            .iter()
            .filter(|e| matches!(e, WheelEvent::Won { .. }))
            .count();
        assert_eq!(wins, 1);
        // Highlight precedes Won and names the same slot
        let highlight = events
            .iter()
            .position(|e| matches!(e, WheelEvent::Highlight(_)))
            .unwrap();
        let won = events
            .iter()
            .position(|e| matches!(e, WheelEvent::Won { .. }))
            .unwrap();
        assert!(highlight < won);
        if let (WheelEvent::Highlight(h), WheelEvent::Won { index, .. }) =
            (&events[highlight], &events[won])
        {
            assert_eq!(h, index);
        }
        // Ticks fired while spinning
        assert!(events.iter().any(|e| *e == WheelEvent::Contact));
        // Spinning resolved back to Stopped
        assert_eq!(states, vec![WheelState::Spinning, WheelState::Stopped]);
    }

    #[test]
    fn test_won_payload_matches_prize_table() {
        let mut w = wheel(7);
        w.handle_input(InputEvent::HubTap);
        let (events, _) = run_to_won(&mut w, 20_000);
        let won = events
            .iter()
            .find_map(|e| match e {
                WheelEvent::Won {
                    index,
                    title,
                    amount,
                    ..
                } => Some((*index, title.clone(), *amount)),
                _ => None,
            })
            .unwrap();
        let slot = w.prizes().get(won.0).unwrap();
        assert_eq!(slot.title, won.1);
        assert_eq!(slot.amount, won.2);
    }

    #[test]
    fn test_drag_below_threshold_rejected() {
        let mut w = wheel(3);
        w.handle_input(InputEvent::DragStart);
        assert_eq!(w.state(), WheelState::Ready);
        w.handle_input(InputEvent::DragMove { vertical_delta: 40.0 });
        w.handle_input(InputEvent::DragMove { vertical_delta: 30.0 });
        w.handle_input(InputEvent::DragEnd);
        assert_eq!(w.state(), WheelState::Stopped);
        let events = w.update(SIM_DT);
        assert!(events.contains(&WheelEvent::InsufficientSpin));
        assert!(!events.contains(&WheelEvent::SpinStarted));
    }

    #[test]
    fn test_drag_exactly_at_threshold_rejected() {
        // Strict >: exactly 100.0 does not spin
        let mut w = wheel(3);
        w.handle_input(InputEvent::DragStart);
        w.handle_input(InputEvent::DragMove {
            vertical_delta: 100.0,
        });
        w.handle_input(InputEvent::DragEnd);
        assert_eq!(w.state(), WheelState::Stopped);
        assert!(w.update(SIM_DT).contains(&WheelEvent::InsufficientSpin));
    }

    #[test]
    fn test_drag_above_threshold_spins() {
        let mut w = wheel(3);
        w.handle_input(InputEvent::DragStart);
        w.handle_input(InputEvent::DragMove {
            vertical_delta: 160.0,
        });
        w.handle_input(InputEvent::DragEnd);
        assert_eq!(w.state(), WheelState::Spinning);
        assert!(w.update(SIM_DT).contains(&WheelEvent::SpinStarted));
    }

    #[test]
    fn test_drag_preview_rotates_wheel() {
        let mut w = wheel(3);
        w.handle_input(InputEvent::DragStart);
        w.handle_input(InputEvent::DragMove {
            vertical_delta: 50.0,
        });
        // 50 units over divisor 100 = half a degree, against the drag
        assert!((w.rotation_degrees() + 0.5).abs() < 1e-3);

        // Moves outside a drag are ignored
        w.handle_input(InputEvent::DragEnd);
        let before = w.rotation_degrees();
        w.handle_input(InputEvent::DragMove {
            vertical_delta: 50.0,
        });
        assert_eq!(w.rotation_degrees(), before);
    }

    #[test]
    fn test_spin_requests_while_spinning_ignored() {
        let mut w = wheel(11);
        w.handle_input(InputEvent::HubTap);
        let first_events = w.update(SIM_DT);
        assert!(first_events.contains(&WheelEvent::SpinStarted));

        // Redundant requests: no state change, no second SpinStarted
        w.handle_input(InputEvent::HubTap);
        w.handle_input(InputEvent::DragStart);
        assert_eq!(w.state(), WheelState::Spinning);

        let (events, _) = run_to_won(&mut w, 20_000);
        assert!(!events.contains(&WheelEvent::SpinStarted));
        let wins = events
            .iter()
            .filter(|e| matches!(e, WheelEvent::Won { .. }))
            .count();
        assert_eq!(wins, 1);
    }

    #[test]
    fn test_no_respin_until_win_acknowledged() {
        let mut w = wheel(5);
        w.handle_input(InputEvent::HubTap);
        let (events, _) = run_to_won(&mut w, 20_000);
        let won_index = events
            .iter()
            .find_map(|e| match e {
                WheelEvent::Won { index, .. } => Some(*index),
                _ => None,
            })
            .unwrap();

        // Outcome pending: spin inputs stay dead
        assert_eq!(w.pending_win(), Some(won_index));
        w.handle_input(InputEvent::HubTap);
        assert_eq!(w.state(), WheelState::Stopped);
        assert!(w.update(SIM_DT).is_empty());

        w.acknowledge_win();
        assert_eq!(w.pending_win(), None);
        w.handle_input(InputEvent::HubTap);
        assert_eq!(w.state(), WheelState::Spinning);
    }

    #[test]
    fn test_same_seed_same_outcome() {
        let run = |seed| {
            let mut w = wheel(seed);
            w.handle_input(InputEvent::HubTap);
            let (events, _) = run_to_won(&mut w, 20_000);
            events
        };
        assert_eq!(run(1234), run(1234));
    }

    #[test]
    fn test_state_trace_is_legal_cycle() {
        let mut w = wheel(9);
        let mut trace = vec![w.state()];
        let mut record = |s: WheelState, trace: &mut Vec<WheelState>| {
            if *trace.last().unwrap() != s {
                trace.push(s);
            }
        };

        w.handle_input(InputEvent::DragStart);
        record(w.state(), &mut trace);
        w.handle_input(InputEvent::DragMove {
            vertical_delta: 250.0,
        });
        w.handle_input(InputEvent::DragEnd);
        record(w.state(), &mut trace);
        for _ in 0..20_000 {
            let events = w.update(SIM_DT);
            record(w.state(), &mut trace);
            if events.iter().any(|e| matches!(e, WheelEvent::Won { .. })) {
                break;
            }
        }

        assert_eq!(
            trace,
            vec![
                WheelState::Stopped,
                WheelState::Ready,
                WheelState::Spinning,
                WheelState::Stopped,
            ]
        );
    }

    #[test]
    fn test_hub_disabled_ignores_tap_but_spin_still_works() {
        let layout = PegLayout::ring(8, 240.0, 0.0);
        let config = WheelConfig {
            hub_spins_wheel: false,
            ..WheelConfig::default()
        };
        let mut w = SpinWheelController::new(prize_table(8), &layout, config, 0).unwrap();
        w.handle_input(InputEvent::HubTap);
        assert_eq!(w.state(), WheelState::Stopped);
        w.spin();
        assert_eq!(w.state(), WheelState::Spinning);
    }

    #[test]
    fn test_swipe_disabled_ignores_drag() {
        let layout = PegLayout::ring(8, 240.0, 0.0);
        let config = WheelConfig {
            swipe_to_spin: false,
            ..WheelConfig::default()
        };
        let mut w = SpinWheelController::new(prize_table(8), &layout, config, 0).unwrap();
        w.handle_input(InputEvent::DragStart);
        assert_eq!(w.state(), WheelState::Stopped);
    }

    #[test]
    fn test_counter_clockwise_spins_positive() {
        let layout = PegLayout::ring(8, 240.0, 0.0);
        let config = WheelConfig {
            spin_direction: SpinDirection::CounterClockwise,
            ..WheelConfig::default()
        };
        let mut w = SpinWheelController::new(prize_table(8), &layout, config, 0).unwrap();
        w.handle_input(InputEvent::HubTap);
        for _ in 0..10 {
            w.update(SIM_DT);
        }
        assert!(w.rotation_degrees() > 0.0);

        let mut cw = wheel(0);
        cw.handle_input(InputEvent::HubTap);
        for _ in 0..10 {
            cw.update(SIM_DT);
        }
        assert!(cw.rotation_degrees() < 0.0);
    }

    #[test]
    fn test_scaled_wheel_draws_scaled_spin_power() {
        let mut layout = PegLayout::ring(8, 240.0, 0.0);
        layout.scale = 0.1;
        let mut small =
            SpinWheelController::new(prize_table(8), &layout, WheelConfig::default(), 77).unwrap();
        let mut full = wheel(77);

        small.handle_input(InputEvent::HubTap);
        full.handle_input(InputEvent::HubTap);
        assert_eq!(small.state(), WheelState::Spinning);
        for _ in 0..5 {
            small.update(SIM_DT);
            full.update(SIM_DT);
        }

        // Same seed, same draw: the full-size wheel's impulse saturates the
        // angular velocity clamp, while the tenth-scale wheel's lands far
        // below it, so it covers much less ground in the same ticks
        let small_deg = small.rotation_degrees().abs();
        let full_deg = full.rotation_degrees().abs();
        assert!(small_deg > 1.0);
        assert!(
            small_deg < full_deg / 2.0,
            "scaled wheel turned {small_deg:.1}\u{b0} vs {full_deg:.1}\u{b0}"
        );
    }

    #[test]
    fn test_placements_exposed_per_slot() {
        let w = wheel(0);
        assert_eq!(w.placements().len(), 8);
    }
}
