//! Hardware abstraction for the external collaborators.
//!
//! The control core does not talk to hardware directly: the attitude sensor,
//! the wheel encoder and the motor driver live behind these traits, and the
//! firmware binds them to its board. All methods are async so a sensor may
//! issue a bus transaction and resolve later; the control step itself never
//! waits on them, it consumes whatever the sampling tasks last cached.

use crate::system::actuation::ActuationCommand;
use crate::system::sensors::{SpeedSample, TiltSample};

/// Fused gyro/accelerometer attitude source.
///
/// Sampled once per control period. A transient error is tolerated: the
/// cached value is reused for that tick.
pub trait AttitudeSensor {
    type Error;

    async fn sample(&mut self) -> Result<TiltSample, Self::Error>;
}

/// Wheel encoder speed source, same contract as [`AttitudeSensor`].
pub trait SpeedSensor {
    type Error;

    async fn sample(&mut self) -> Result<SpeedSample, Self::Error>;
}

/// Motor actuation service.
///
/// Commands are fire-and-forget from the core's perspective: a failed drive
/// is logged but never retried, since the next tick supersedes it anyway.
pub trait MotorDriver {
    type Error;

    /// Applies a per-tick drive command to both channels
    async fn drive(&mut self, command: ActuationCommand) -> Result<(), Self::Error>;

    /// Cuts power on both channels. Issued exactly once, on the stop
    /// transition.
    async fn stop_all(&mut self) -> Result<(), Self::Error>;
}
