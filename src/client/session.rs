// src/client/session.rs
use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Where a session is in the run lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    Idle,
    Collecting,
    Submitting,
    Completed,
    Failed,
}

impl fmt::Display for RunPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunPhase::Idle => write!(f, "idle"),
            RunPhase::Collecting => write!(f, "collecting"),
            RunPhase::Submitting => write!(f, "submitting"),
            RunPhase::Completed => write!(f, "completed"),
            RunPhase::Failed => write!(f, "failed"),
        }
    }
}

#[derive(Debug)]
struct SessionState {
    interactive: bool,
    collected: Vec<String>,
    phase: RunPhase,
}

/// Per-user run context: the interactive toggle, lines gathered for the run
/// in progress, and the busy flag (any phase other than `Idle`).
#[derive(Debug)]
pub struct Session {
    state: Mutex<SessionState>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(false)
    }
}

impl Session {
    pub fn new(interactive: bool) -> Self {
        Self {
            state: Mutex::new(SessionState {
                interactive,
                collected: Vec::new(),
                phase: RunPhase::Idle,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Toggling interactive mode always discards collected lines.
    pub fn set_interactive(&self, enabled: bool) {
        let mut state = self.lock();
        state.interactive = enabled;
        state.collected.clear();
    }

    pub fn interactive_enabled(&self) -> bool {
        self.lock().interactive
    }

    pub fn phase(&self) -> RunPhase {
        self.lock().phase
    }

    pub fn is_busy(&self) -> bool {
        self.phase() != RunPhase::Idle
    }

    pub fn collected_lines(&self) -> Vec<String> {
        self.lock().collected.clone()
    }

    /// Claims the session for one run. `None` while another run holds it.
    pub(crate) fn try_begin(&self, first_phase: RunPhase) -> Option<RunGuard<'_>> {
        let mut state = self.lock();
        if state.phase != RunPhase::Idle {
            return None;
        }
        state.phase = first_phase;
        Some(RunGuard { session: self })
    }
}

/// Holds the busy flag for one run; dropping it returns the session to
/// `Idle` and clears the lines collected for that run.
pub(crate) struct RunGuard<'a> {
    session: &'a Session,
}

impl RunGuard<'_> {
    pub(crate) fn advance(&self, phase: RunPhase) {
        let mut state = self.session.lock();
        log::debug!("Run phase {} -> {}", state.phase, phase);
        state.phase = phase;
    }

    pub(crate) fn record_lines(&self, lines: Vec<String>) {
        self.session.lock().collected = lines;
    }
}

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        let mut state = self.session.lock();
        state.phase = RunPhase::Idle;
        state.collected.clear();
    }
}
