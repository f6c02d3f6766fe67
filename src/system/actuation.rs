//! Actuation Commands
//!
//! Combines the attitude and velocity terms into one signed duty value, maps
//! it onto the two motor channels and provides the latest-wins signal that
//! carries the result to the motor task.
//!
//! The two channels are cross-wired: a positive duty drives side B forward
//! and side A backward at the same magnitude, implementing a single
//! rotational correction with both wheels. That pairing is a fixed hardware
//! contract of the chassis, not a tunable.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

/// Drive command for one motor channel, magnitude in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SideDrive {
    Forward(f32),
    Backward(f32),
    Stop,
}

/// Per-tick actuation command for both motor channels
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ActuationCommand {
    pub side_a: SideDrive,
    pub side_b: SideDrive,
}

impl ActuationCommand {
    /// Both channels stopped
    pub const STOP: Self = Self {
        side_a: SideDrive::Stop,
        side_b: SideDrive::Stop,
    };
}

/// Mixes the two controller terms into an actuation command.
///
/// The duty is the balance term minus the velocity counter-command,
/// saturated to `[-1, 1]`. Exactly zero duty yields a both-stopped command.
pub fn mix(balance_term: f32, velocity_term: f32) -> ActuationCommand {
    let duty = (balance_term - velocity_term).clamp(-1.0, 1.0);
    if duty > 0.0 {
        ActuationCommand {
            side_a: SideDrive::Backward(duty),
            side_b: SideDrive::Forward(duty),
        }
    } else if duty < 0.0 {
        ActuationCommand {
            side_a: SideDrive::Forward(-duty),
            side_b: SideDrive::Backward(-duty),
        }
    } else {
        ActuationCommand::STOP
    }
}

/// Requests consumed by the motor task
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotorRequest {
    /// Apply a per-tick drive command
    Drive(ActuationCommand),
    /// Cut power on both channels and release the driver. Final request of a
    /// session.
    StopAll,
}

/// Latest-wins signal carrying motor requests.
///
/// A command that is overwritten before the motor task consumed it was stale
/// anyway: the next tick supersedes it, and a stop overwrites any pending
/// drive.
pub struct ActuationSignal {
    signal: Signal<CriticalSectionRawMutex, MotorRequest>,
}

impl ActuationSignal {
    pub(crate) const fn new() -> Self {
        Self {
            signal: Signal::new(),
        }
    }

    /// Publishes a new request, replacing any request not yet consumed
    pub(crate) fn update(&self, request: MotorRequest) {
        self.signal.signal(request);
    }

    /// Waits for the next request
    pub(crate) async fn wait(&self) -> MotorRequest {
        self.signal.wait().await
    }
}
