//! Balance control task
//!
//! The control-and-actuate step, once per period: read the sensor cache,
//! run the attitude and velocity laws, mix the terms into an actuation
//! command, publish it for the motor task and evaluate fall detection on
//! the same tilt angle the laws just consumed.
//!
//! The velocity controller owned here carries the only cross-tick state in
//! the system; it is advanced exactly once per tick while running.

use embassy_futures::select::{select, Either};

use crate::balancer::Balancer;
use crate::system::actuation::{mix, MotorRequest};
use crate::system::attitude::AttitudeController;
use crate::system::event::Event;
use crate::system::safety::SafetyMonitor;
use crate::system::state::RunState;
use crate::system::velocity::VelocityController;
use crate::task::tick::TickSource;

/// Periodic control loop. Runs until a fall or the stop transition.
pub async fn balance(balancer: &Balancer, mut ticks: impl TickSource) {
    let attitude = AttitudeController::new(balancer.config());
    let mut velocity = VelocityController::new(balancer.config());
    let safety = SafetyMonitor::new(balancer.config());
    let mut stop = balancer.run.observer();

    info!("balance control started");
    loop {
        match select(stop.changed(), ticks.next_tick()).await {
            Either::First(_) => break,
            Either::Second(()) => {}
        }

        // The stop transition may have happened while this tick was pending;
        // commanding the motors now could overwrite the final stop request.
        if balancer.run_state() == RunState::Stopped {
            break;
        }

        let tilt = balancer.sensors().tilt();
        let speed = balancer.sensors().speed();

        let balance_term = attitude.balance_term(tilt.angle_deg, tilt.rate_dps);
        // single combined encoder: the one reading stands in for both wheels
        let velocity_term = velocity.velocity_term(speed.rpm, speed.rpm);
        let command = mix(balance_term, velocity_term);

        balancer.actuation.update(MotorRequest::Drive(command));

        if safety.fall_detected(tilt.angle_deg) {
            warn!("fall detected at {} degrees, stopping", tilt.angle_deg);
            balancer.events.send(Event::FallDetected(tilt.angle_deg)).await;
            break;
        }
    }
    info!("balance control stopped");
}
