//! Attitude sampling task
//!
//! Polls the fused attitude sensor once per period and publishes the sample
//! into the sensor cache. A failed sample is non-fatal: the cache keeps the
//! previous value and the control step tolerates one period of staleness.
//! Persistent failure is a safety fault; balancing blind is worse than
//! stopping, so the task raises a stop request and ends.

use embassy_futures::select::{select, Either};

use crate::balancer::Balancer;
use crate::hal::AttitudeSensor;
use crate::system::event::{Event, SensorKind};
use crate::task::tick::TickSource;

/// Periodic attitude sampling loop. Runs until the stop transition.
pub async fn attitude_read<S: AttitudeSensor>(
    balancer: &Balancer,
    mut sensor: S,
    mut ticks: impl TickSource,
) {
    let mut stop = balancer.run.observer();
    let mut consecutive_failures: u32 = 0;

    info!("attitude sampling started");
    loop {
        match select(stop.changed(), ticks.next_tick()).await {
            Either::First(_) => break,
            Either::Second(()) => {}
        }

        match sensor.sample().await {
            Ok(sample) => {
                consecutive_failures = 0;
                balancer.sensors().publish_tilt(sample);
            }
            Err(_) => {
                consecutive_failures += 1;
                warn!(
                    "attitude sample failed ({} consecutive)",
                    consecutive_failures
                );
                if consecutive_failures >= balancer.config().sensor_fault_limit {
                    balancer
                        .events
                        .send(Event::SensorFault(SensorKind::Attitude))
                        .await;
                    break;
                }
            }
        }
    }
    info!("attitude sampling stopped");
}
