/// Whether the frame loop is allowed to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Running,
    Paused,
}

/// Edge produced when the run state flips.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Paused → Running. Frame timing must restart from now.
    Resumed,
    /// Running → Paused. The pending frame must be cancelled.
    Paused,
}

/// Run-state controller. Paused when the page is hidden or the user prefers reduced motion.
#[derive(Debug, Clone)]
pub struct Lifecycle {
    hidden: bool,
    reduced_motion: bool,
    state: RunState,
}

impl Lifecycle {
    pub fn new(hidden: bool, reduced_motion: bool) -> Self {
        Self {
            hidden,
            reduced_motion,
            state: Self::derive(hidden, reduced_motion),
        }
    }

    fn derive(hidden: bool, reduced_motion: bool) -> RunState {
        if hidden || reduced_motion {
            RunState::Paused
        } else {
            RunState::Running
        }
    }

    /// Apply fresh host signals. Returns the transition, if the state changed.
    pub fn update(&mut self, hidden: bool, reduced_motion: bool) -> Option<Transition> {
        self.hidden = hidden;
        self.reduced_motion = reduced_motion;
        let next = Self::derive(hidden, reduced_motion);
        if next == self.state {
            return None;
        }
        self.state = next;
        Some(match next {
            RunState::Running => Transition::Resumed,
            RunState::Paused => Transition::Paused,
        })
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn prefers_reduced_motion(&self) -> bool {
        self.reduced_motion
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_in_derived_state() {
        assert_eq!(Lifecycle::new(false, false).state(), RunState::Running);
        assert_eq!(Lifecycle::new(true, false).state(), RunState::Paused);
        assert_eq!(Lifecycle::new(false, true).state(), RunState::Paused);
    }

    #[test]
    fn hide_and_show_produce_edges() {
        let mut lc = Lifecycle::new(false, false);
        assert_eq!(lc.update(true, false), Some(Transition::Paused));
        assert_eq!(lc.update(true, false), None);
        assert_eq!(lc.update(false, false), Some(Transition::Resumed));
    }

    #[test]
    fn reduced_motion_keeps_paused_when_visible() {
        let mut lc = Lifecycle::new(true, true);
        assert_eq!(lc.update(false, true), None);
        assert!(!lc.is_running());
        assert_eq!(lc.update(false, false), Some(Transition::Resumed));
    }

    #[test]
    fn either_signal_pauses() {
        let mut lc = Lifecycle::new(false, false);
        assert_eq!(lc.update(false, true), Some(Transition::Paused));
        assert_eq!(lc.update(true, true), None);
        assert_eq!(lc.update(true, false), None);
        assert!(lc.is_hidden());
        assert!(!lc.prefers_reduced_motion());
    }
}
