//! Orbit-direction cycle: which way stars should go, and how hard to pull them there.
//!
//! Everything here is a pure function of elapsed wall time so it can be tested
//! without running the integrator or renderer.

use crate::extensions::easing::{lerp, smoothstep};

/// Cycle cadence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CycleTiming {
    /// Length of one direction, in milliseconds.
    pub period_ms: f64,
    /// Length of the blended reversal at the end of each period, in milliseconds.
    pub ramp_ms: f64,
    /// Drive strength outside the ramp window, in [0, 1].
    pub drive_floor: f32,
}

impl Default for CycleTiming {
    fn default() -> Self {
        Self {
            period_ms: 20_000.0,
            ramp_ms: 2_000.0,
            drive_floor: 0.02,
        }
    }
}

/// Timing state for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CycleState {
    /// Milliseconds since the first frame.
    pub elapsed_ms: f64,
    /// Number of completed periods.
    pub cycle_index: u64,
    /// +1 on even cycles, −1 on odd ones.
    pub direction: f32,
    /// Direction of the following cycle.
    pub next_direction: f32,
    /// Linear progress through the ramp window; 0 outside it.
    pub ramp_fraction: f32,
    /// Smoothstep of `ramp_fraction`.
    pub ease: f32,
    /// Signed multiplier for each star's base speed, blended across the ramp.
    pub target_direction: f32,
    /// Lerp weight the integrator applies toward the target tangential speed.
    pub drive_strength: f32,
}

impl CycleState {
    /// Evaluate the cycle at `elapsed_ms`. Negative or non-finite input is treated as zero.
    pub fn at(elapsed_ms: f64, timing: &CycleTiming) -> Self {
        let elapsed = if elapsed_ms.is_finite() { elapsed_ms.max(0.0) } else { 0.0 };
        let period = timing.period_ms.max(f64::EPSILON);

        let cycle_index = (elapsed / period).floor() as u64;
        let phase = elapsed - cycle_index as f64 * period;

        let direction = if cycle_index % 2 == 0 { 1.0 } else { -1.0 };
        let next_direction = -direction;

        let ramp_fraction = ramp_fraction(phase, period, timing.ramp_ms);
        let ease = smoothstep(ramp_fraction);

        Self {
            elapsed_ms: elapsed,
            cycle_index,
            direction,
            next_direction,
            ramp_fraction,
            ease,
            target_direction: direction * (1.0 - ease) + next_direction * ease,
            drive_strength: lerp(timing.drive_floor, 1.0, ease),
        }
    }
}

/// Linear progress through the ramp window for a phase within a period.
///
/// 0 before `period − ramp`, 1 at `period`. A zero-length ramp is a hard step.
pub fn ramp_fraction(phase_ms: f64, period_ms: f64, ramp_ms: f64) -> f32 {
    let ramp = ramp_ms.min(period_ms);
    let ramp_start = period_ms - ramp;
    if ramp <= 0.0 {
        return if phase_ms >= period_ms { 1.0 } else { 0.0 };
    }
    ((phase_ms - ramp_start) / ramp).clamp(0.0, 1.0) as f32
}

/// Latches the first frame's timestamp and reports cycle state relative to it.
#[derive(Debug, Clone, Default)]
pub struct CycleClock {
    t0_ms: Option<f64>,
}

impl CycleClock {
    pub fn new() -> Self {
        Self { t0_ms: None }
    }

    /// Cycle state at `now_ms`. The first call fixes `t0`.
    /// Without a usable timestamp the cycle holds at its last known start.
    pub fn sample(&mut self, now_ms: Option<f64>, timing: &CycleTiming) -> CycleState {
        let now = now_ms.filter(|t| t.is_finite());
        let t0 = match (self.t0_ms, now) {
            (Some(t0), _) => t0,
            (None, Some(now)) => {
                self.t0_ms = Some(now);
                now
            }
            (None, None) => return CycleState::at(0.0, timing),
        };
        CycleState::at(now.map_or(0.0, |now| now - t0), timing)
    }

    pub fn t0_ms(&self) -> Option<f64> {
        self.t0_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timing() -> CycleTiming {
        CycleTiming::default()
    }

    #[test]
    fn direction_alternates_each_period() {
        let t = timing();
        let s0 = CycleState::at(0.0, &t);
        let s1 = CycleState::at(20_000.0, &t);
        let s2 = CycleState::at(40_000.0, &t);
        assert_eq!((s0.cycle_index, s0.target_direction), (0, 1.0));
        assert_eq!((s1.cycle_index, s1.target_direction), (1, -1.0));
        assert_eq!((s2.cycle_index, s2.target_direction), (2, 1.0));
    }

    #[test]
    fn next_direction_is_opposite() {
        let s = CycleState::at(25_000.0, &timing());
        assert_eq!(s.direction, -1.0);
        assert_eq!(s.next_direction, 1.0);
    }

    #[test]
    fn ramp_is_zero_before_window() {
        for phase in [0.0, 5_000.0, 17_999.0, 17_999.999] {
            assert_eq!(ramp_fraction(phase, 20_000.0, 2_000.0), 0.0, "phase {}", phase);
        }
    }

    #[test]
    fn ramp_rises_monotonically_to_one() {
        let mut prev = ramp_fraction(18_000.0, 20_000.0, 2_000.0);
        assert_eq!(prev, 0.0);
        let mut phase = 18_000.0;
        while phase < 20_000.0 {
            phase += 50.0;
            let f = ramp_fraction(phase, 20_000.0, 2_000.0);
            assert!(f > prev, "not rising at phase {}", phase);
            prev = f;
        }
        assert_eq!(ramp_fraction(20_000.0, 20_000.0, 2_000.0), 1.0);
    }

    #[test]
    fn target_crosses_zero_mid_ramp() {
        let s = CycleState::at(19_000.0, &timing());
        assert!((s.ease - 0.5).abs() < 1e-6);
        assert!(s.target_direction.abs() < 1e-6);
    }

    #[test]
    fn target_is_continuous_across_boundary() {
        let t = timing();
        let before = CycleState::at(19_999.9, &t);
        let after = CycleState::at(20_000.0, &t);
        assert!((before.target_direction - after.target_direction).abs() < 1e-3);
    }

    #[test]
    fn drive_strength_floor_then_ramps() {
        let t = timing();
        let quiet = CycleState::at(10_000.0, &t);
        assert!((quiet.drive_strength - t.drive_floor).abs() < 1e-6);
        let late = CycleState::at(19_990.0, &t);
        assert!(late.drive_strength > 0.99);
    }

    #[test]
    fn negative_elapsed_clamps_to_start() {
        let s = CycleState::at(-500.0, &timing());
        assert_eq!(s.cycle_index, 0);
        assert_eq!(s.elapsed_ms, 0.0);
    }

    #[test]
    fn clock_latches_first_frame() {
        let t = timing();
        let mut clock = CycleClock::new();
        let first = clock.sample(Some(123_456.0), &t);
        assert_eq!(first.elapsed_ms, 0.0);
        assert_eq!(clock.t0_ms(), Some(123_456.0));
        let later = clock.sample(Some(143_456.0), &t);
        assert_eq!(later.cycle_index, 1);
    }
}
