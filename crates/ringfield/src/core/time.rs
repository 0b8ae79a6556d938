/// Largest step the integrator will ever take, in seconds.
pub const MAX_FRAME_DT: f32 = 0.033;

/// Step used when the frame interval cannot be measured, in seconds.
pub const NOMINAL_FRAME_DT: f32 = 0.016;

/// Variable-timestep frame clock.
/// Turns raw compositor timestamps (milliseconds) into a bounded integration step.
///
/// The interval between frames is unbounded in wall time (a backgrounded tab
/// may not tick for minutes), so the raw delta is never trusted as-is.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    /// Timestamp of the previous frame, in milliseconds.
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self { last_ms: None }
    }

    /// Consume a frame timestamp and return the step to integrate, in seconds.
    ///
    /// Result is always in (0, MAX_FRAME_DT]. A missing, repeated, backwards or
    /// non-finite timestamp yields NOMINAL_FRAME_DT.
    pub fn advance(&mut self, now_ms: Option<f64>) -> f32 {
        let now = match now_ms {
            Some(t) if t.is_finite() => t,
            _ => return NOMINAL_FRAME_DT,
        };
        let dt = match self.last_ms {
            Some(last) => clamp_frame_dt(((now - last) / 1000.0) as f32),
            None => NOMINAL_FRAME_DT,
        };
        self.last_ms = Some(now);
        dt
    }

    /// Restart timing from `now_ms`, so the next frame measures from here.
    /// Called on resume; otherwise the hidden interval would become one huge step.
    pub fn reset(&mut self, now_ms: Option<f64>) {
        self.last_ms = now_ms.filter(|t| t.is_finite());
    }

    /// Timestamp of the previous frame, if any.
    pub fn last_ms(&self) -> Option<f64> {
        self.last_ms
    }
}

/// Clamp a raw frame delta (seconds) into (0, MAX_FRAME_DT].
pub fn clamp_frame_dt(raw: f32) -> f32 {
    if !raw.is_finite() || raw <= 0.0 {
        NOMINAL_FRAME_DT
    } else {
        raw.min(MAX_FRAME_DT)
    }
}
