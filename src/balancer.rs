//! System wiring
//!
//! [`Balancer`] owns the shared pieces the tasks communicate through: the
//! sensor cache, the event channel, the run-state latch and the actuation
//! signal. Construction is `const`, so a firmware can place the whole system
//! in a `static` and hand references to its spawned tasks.

use crate::hal::{AttitudeSensor, MotorDriver, SpeedSensor};
use crate::system::actuation::ActuationSignal;
use crate::system::config::BalanceConfig;
use crate::system::event::{Event, EventBus};
use crate::system::sensors::SensorCache;
use crate::system::state::{RunControl, RunState};
use crate::task::tick::Periodic;
use crate::task::{attitude_read, balance, motor_drive, orchestrate, speed_read};
use embassy_futures::join::join5;

/// Shared state and channels of one balancing session
pub struct Balancer {
    config: BalanceConfig,
    sensors: SensorCache,
    pub(crate) events: EventBus,
    pub(crate) run: RunControl,
    pub(crate) actuation: ActuationSignal,
}

impl Balancer {
    pub const fn new(config: BalanceConfig) -> Self {
        Self {
            config,
            sensors: SensorCache::new(),
            events: EventBus::new(),
            run: RunControl::new(),
            actuation: ActuationSignal::new(),
        }
    }

    pub fn config(&self) -> &BalanceConfig {
        &self.config
    }

    pub fn sensors(&self) -> &SensorCache {
        &self.sensors
    }

    /// Current run state
    pub fn run_state(&self) -> RunState {
        self.run.state()
    }

    /// Operator entry point for an immediate stop.
    ///
    /// Callable from any context at any time; requests after the stop
    /// transition are no-ops.
    pub fn request_stop(&self) {
        self.events.try_send(Event::StopRequested);
    }

    /// Drives a complete session: the two sampling loops, the control loop,
    /// the motor task and the orchestrator, all paced at the configured
    /// period. Completes once the system has stopped and the final full-stop
    /// command has been issued.
    ///
    /// Firmware that prefers one executor task per activity can spawn the
    /// [`crate::task`] functions individually instead.
    pub async fn run<A, S, M>(&self, attitude_sensor: A, speed_sensor: S, motor: M)
    where
        A: AttitudeSensor,
        S: SpeedSensor,
        M: MotorDriver,
    {
        let period = self.config.control_period;
        join5(
            attitude_read::attitude_read(self, attitude_sensor, Periodic::new(period)),
            speed_read::speed_read(self, speed_sensor, Periodic::new(period)),
            balance::balance(self, Periodic::new(period)),
            motor_drive::motor_drive(self, motor),
            orchestrate::orchestrate(self),
        )
        .await;
        info!("session complete");
    }
}
