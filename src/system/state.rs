//! Run State Management
//!
//! Owns the `Running`/`Stopped` state machine. The system starts in
//! `Running`; a fall, an operator stop request or a persistent sensor fault
//! forces the transition to `Stopped`. The transition is one-shot and there
//! is no path back to `Running` within a session.
//!
//! The current state is protected by a critical-section mutex and the
//! transition is broadcast through a watch, so every periodic task can race
//! its ticker against the stop notification and cancel immediately.

use core::cell::Cell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::watch::{Receiver, Watch};

/// Capacity for stop-transition observers. The three periodic loops each
/// take one.
pub const STOP_OBSERVERS: usize = 4;

/// Vehicle run state
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RunState {
    /// Balancing actively: sampling and control loops are live
    Running,
    /// Actuation cut. Terminal for the session; requires a restart.
    Stopped,
}

/// One-shot `Running` -> `Stopped` latch with broadcast notification
pub struct RunControl {
    state: Mutex<CriticalSectionRawMutex, Cell<RunState>>,
    stopped: Watch<CriticalSectionRawMutex, RunState, STOP_OBSERVERS>,
}

impl RunControl {
    pub(crate) const fn new() -> Self {
        Self {
            state: Mutex::new(Cell::new(RunState::Running)),
            stopped: Watch::new(),
        }
    }

    /// Returns the current run state
    pub fn state(&self) -> RunState {
        self.state.lock(|cell| cell.get())
    }

    /// Performs the stop transition.
    ///
    /// Returns `true` on the first invocation; repeated triggers are no-ops
    /// and return `false`.
    pub(crate) fn stop(&self) -> bool {
        let transitioned = self.state.lock(|cell| {
            if cell.get() == RunState::Running {
                cell.set(RunState::Stopped);
                true
            } else {
                false
            }
        });
        if transitioned {
            self.stopped.sender().send(RunState::Stopped);
        }
        transitioned
    }

    /// Registers an observer for the stop transition.
    ///
    /// Panics when more than [`STOP_OBSERVERS`] observers are registered,
    /// which is a wiring error caught at startup.
    pub(crate) fn observer(
        &self,
    ) -> Receiver<'_, CriticalSectionRawMutex, RunState, STOP_OBSERVERS> {
        self.stopped.receiver().unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_running() {
        let run = RunControl::new();
        assert_eq!(run.state(), RunState::Running);
    }

    #[test]
    fn stop_is_one_shot() {
        let run = RunControl::new();
        assert!(run.stop());
        assert_eq!(run.state(), RunState::Stopped);
        // second trigger is a no-op
        assert!(!run.stop());
        assert_eq!(run.state(), RunState::Stopped);
    }
}
