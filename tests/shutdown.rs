//! End-to-end shutdown behavior, driven deterministically with mock
//! hardware and instant tick sources: no wall-clock waits.

use std::cell::RefCell;
use std::rc::Rc;

use balance_bot::hal::{AttitudeSensor, MotorDriver, SpeedSensor};
use balance_bot::system::actuation::ActuationCommand;
use balance_bot::system::sensors::{SpeedSample, TiltSample};
use balance_bot::task::tick::TickSource;
use balance_bot::task::{attitude_read, balance, motor_drive, orchestrate, speed_read};
use balance_bot::{BalanceConfig, Balancer, RunState};
use embassy_futures::block_on;
use embassy_futures::join::{join, join5};
use embassy_futures::yield_now;

/// Tick source that fires immediately, yielding once so the other tasks in
/// the session make progress between ticks.
struct InstantTicks;

impl TickSource for InstantTicks {
    async fn next_tick(&mut self) {
        yield_now().await;
    }
}

/// Attitude sensor resting at the balance offset, tipping over after a set
/// number of samples.
struct ScriptedTilt {
    samples_taken: usize,
    fall_after: Option<usize>,
}

impl ScriptedTilt {
    fn steady() -> Self {
        Self {
            samples_taken: 0,
            fall_after: None,
        }
    }

    fn falling_after(samples: usize) -> Self {
        Self {
            samples_taken: 0,
            fall_after: Some(samples),
        }
    }
}

impl AttitudeSensor for ScriptedTilt {
    type Error = ();

    async fn sample(&mut self) -> Result<TiltSample, ()> {
        self.samples_taken += 1;
        let fallen = self.fall_after.is_some_and(|n| self.samples_taken > n);
        Ok(TiltSample {
            angle_deg: if fallen { 31.0 } else { 0.8 },
            rate_dps: 0.0,
        })
    }
}

/// Attitude sensor that delivers a few good samples, then fails every tick.
struct FlakyTilt {
    oks_left: usize,
}

impl AttitudeSensor for FlakyTilt {
    type Error = ();

    async fn sample(&mut self) -> Result<TiltSample, ()> {
        if self.oks_left > 0 {
            self.oks_left -= 1;
            Ok(TiltSample {
                angle_deg: 5.0,
                rate_dps: 0.0,
            })
        } else {
            Err(())
        }
    }
}

/// Encoder reporting a constant speed
struct SteadySpeed(f32);

impl SpeedSensor for SteadySpeed {
    type Error = ();

    async fn sample(&mut self) -> Result<SpeedSample, ()> {
        Ok(SpeedSample { rpm: self.0 })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum MotorEvent {
    Drive(ActuationCommand),
    StopAll,
}

/// Motor driver that records every call it receives
#[derive(Clone)]
struct RecordingMotor {
    log: Rc<RefCell<Vec<MotorEvent>>>,
}

impl RecordingMotor {
    fn new() -> (Self, Rc<RefCell<Vec<MotorEvent>>>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        (Self { log: log.clone() }, log)
    }
}

impl MotorDriver for RecordingMotor {
    type Error = ();

    async fn drive(&mut self, command: ActuationCommand) -> Result<(), ()> {
        self.log.borrow_mut().push(MotorEvent::Drive(command));
        Ok(())
    }

    async fn stop_all(&mut self) -> Result<(), ()> {
        self.log.borrow_mut().push(MotorEvent::StopAll);
        Ok(())
    }
}

/// Motor driver that faults on every periodic drive command but honors the
/// full stop.
struct RejectingMotor {
    drives_rejected: Rc<RefCell<usize>>,
    stops: Rc<RefCell<usize>>,
}

impl MotorDriver for RejectingMotor {
    type Error = ();

    async fn drive(&mut self, _command: ActuationCommand) -> Result<(), ()> {
        *self.drives_rejected.borrow_mut() += 1;
        Err(())
    }

    async fn stop_all(&mut self) -> Result<(), ()> {
        *self.stops.borrow_mut() += 1;
        Ok(())
    }
}

fn stop_count(log: &[MotorEvent]) -> usize {
    log.iter().filter(|e| **e == MotorEvent::StopAll).count()
}

#[test]
fn fall_cuts_power_once_and_for_good() {
    let balancer = Balancer::new(BalanceConfig::default());
    let (motor, log) = RecordingMotor::new();

    block_on(join5(
        attitude_read::attitude_read(&balancer, ScriptedTilt::falling_after(50), InstantTicks),
        speed_read::speed_read(&balancer, SteadySpeed(0.0), InstantTicks),
        balance::balance(&balancer, InstantTicks),
        motor_drive::motor_drive(&balancer, motor),
        orchestrate::orchestrate(&balancer),
    ));

    assert_eq!(balancer.run_state(), RunState::Stopped);

    let entries = log.borrow();
    assert_eq!(stop_count(&entries), 1, "exactly one full-stop actuation");
    assert_eq!(
        *entries.last().unwrap(),
        MotorEvent::StopAll,
        "no drive command after the full stop"
    );

    // the session is over: another trigger produces no further actuation
    let commands_after_shutdown = entries.len();
    drop(entries);
    balancer.request_stop();
    assert_eq!(log.borrow().len(), commands_after_shutdown);
}

#[test]
fn steady_state_holds_station_until_operator_stop() {
    let balancer = Balancer::new(BalanceConfig::default());
    let (motor, log) = RecordingMotor::new();

    // the vehicle starts at rest on the balance point
    balancer.sensors().publish_tilt(TiltSample {
        angle_deg: 0.8,
        rate_dps: 0.0,
    });

    let session = join5(
        attitude_read::attitude_read(&balancer, ScriptedTilt::steady(), InstantTicks),
        speed_read::speed_read(&balancer, SteadySpeed(0.0), InstantTicks),
        balance::balance(&balancer, InstantTicks),
        motor_drive::motor_drive(&balancer, motor),
        orchestrate::orchestrate(&balancer),
    );
    let operator = async {
        for _ in 0..200 {
            yield_now().await;
        }
        balancer.request_stop();
        // a repeated request collapses into the same one-shot stop
        balancer.request_stop();
    };
    block_on(join(session, operator));

    assert_eq!(balancer.run_state(), RunState::Stopped);

    let log = log.borrow();
    assert_eq!(stop_count(&log), 1);
    assert_eq!(*log.last().unwrap(), MotorEvent::StopAll);
    // balanced at the target angle with zero wheel speed: every periodic
    // command is a both-stopped command
    assert!(log.iter().all(|e| match e {
        MotorEvent::Drive(command) => *command == ActuationCommand::STOP,
        MotorEvent::StopAll => true,
    }));
}

#[test]
fn rejected_drive_commands_never_stall_the_session() {
    let balancer = Balancer::new(BalanceConfig::default());
    let drives_rejected = Rc::new(RefCell::new(0usize));
    let stops = Rc::new(RefCell::new(0usize));
    let motor = RejectingMotor {
        drives_rejected: drives_rejected.clone(),
        stops: stops.clone(),
    };

    block_on(join5(
        attitude_read::attitude_read(&balancer, ScriptedTilt::falling_after(5), InstantTicks),
        speed_read::speed_read(&balancer, SteadySpeed(0.0), InstantTicks),
        balance::balance(&balancer, InstantTicks),
        motor_drive::motor_drive(&balancer, motor),
        orchestrate::orchestrate(&balancer),
    ));

    // driver faults are logged, not retried, and the shutdown still lands
    assert_eq!(balancer.run_state(), RunState::Stopped);
    assert!(*drives_rejected.borrow() >= 1);
    assert_eq!(*stops.borrow(), 1);
}

#[test]
fn persistent_sensor_fault_stops_the_session() {
    let balancer = Balancer::new(BalanceConfig::default());
    let (motor, log) = RecordingMotor::new();

    block_on(join5(
        attitude_read::attitude_read(&balancer, FlakyTilt { oks_left: 3 }, InstantTicks),
        speed_read::speed_read(&balancer, SteadySpeed(0.0), InstantTicks),
        balance::balance(&balancer, InstantTicks),
        motor_drive::motor_drive(&balancer, motor),
        orchestrate::orchestrate(&balancer),
    ));

    assert_eq!(balancer.run_state(), RunState::Stopped);

    // failed samples never overwrote the cache: the last good value stuck
    assert_eq!(balancer.sensors().tilt().angle_deg, 5.0);

    let log = log.borrow();
    assert_eq!(stop_count(&log), 1);
    assert_eq!(*log.last().unwrap(), MotorEvent::StopAll);
}
