/// Lifecycle of one page session. Moves forward only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Landing view: colors cycle at random.
    Idle,
    /// Start pressed, camera flying in; colors still cycle.
    Transitioning,
    /// Fly-in done: controls, reset and color picker are live.
    Started,
}

#[derive(Debug)]
pub struct Session {
    phase: SessionPhase,
}

impl Session {
    pub fn new() -> Self {
        Self { phase: SessionPhase::Idle }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Idle → Transitioning. False if the start was already pressed.
    pub fn begin(&mut self) -> bool {
        if self.phase != SessionPhase::Idle {
            return false;
        }
        self.phase = SessionPhase::Transitioning;
        true
    }

    /// Transitioning → Started. False from any other phase.
    pub fn finish(&mut self) -> bool {
        if self.phase != SessionPhase::Transitioning {
            return false;
        }
        self.phase = SessionPhase::Started;
        true
    }

    pub fn is_started(&self) -> bool {
        self.phase == SessionPhase::Started
    }

    /// Random color cycling runs until the fly-in completes.
    pub fn cycles_colors(&self) -> bool {
        !self.is_started()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
