use crate::config::Mode;

/// Lifecycle of one submission. `Answered` and `Failed` are idle-equivalent:
/// they hold what the surface should render while accepting the next prompt.
/// Holding the outcome as a variant makes "never both a result and an error"
/// impossible to violate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Submitting,
    Answered(String),
    Failed(String),
}

/// Transient surface state: the current phase and the mode flag. No prompt
/// or response history is retained beyond the latest outcome.
#[derive(Debug)]
pub struct Session {
    phase: Phase,
    mode: Mode,
}

impl Session {
    pub fn new(mode: Mode) -> Self {
        Self {
            phase: Phase::Idle,
            mode,
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    pub fn toggle_mode(&mut self) -> Mode {
        self.mode = self.mode.toggled();
        self.mode
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.phase, Phase::Submitting)
    }

    /// Guarded transition into `Submitting`. Returns the owned prompt when
    /// the submission is accepted; `None` (with no state change) when the
    /// trimmed input is empty or a submission is still outstanding.
    pub fn try_submit(&mut self, input: &str) -> Option<String> {
        if self.is_busy() {
            return None;
        }
        let prompt = input.trim();
        if prompt.is_empty() {
            return None;
        }
        self.phase = Phase::Submitting;
        Some(prompt.to_string())
    }

    /// Settles the outstanding submission with a response text, replacing
    /// any previously held outcome.
    pub fn settle_answer(&mut self, text: String) {
        self.phase = Phase::Answered(text);
    }

    /// Settles the outstanding submission with an error description,
    /// replacing any previously held outcome.
    pub fn settle_failure(&mut self, message: String) {
        self.phase = Phase::Failed(message);
    }
}
