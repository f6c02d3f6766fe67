//! Wheel speed sampling task
//!
//! Polls the encoder once per period and publishes the speed into the sensor
//! cache. Same failure contract as the attitude task: transient errors keep
//! the previous cached value, persistent failure raises a stop request.

use embassy_futures::select::{select, Either};

use crate::balancer::Balancer;
use crate::hal::SpeedSensor;
use crate::system::event::{Event, SensorKind};
use crate::task::tick::TickSource;

/// Periodic speed sampling loop. Runs until the stop transition.
pub async fn speed_read<S: SpeedSensor>(
    balancer: &Balancer,
    mut sensor: S,
    mut ticks: impl TickSource,
) {
    let mut stop = balancer.run.observer();
    let mut consecutive_failures: u32 = 0;

    info!("speed sampling started");
    loop {
        match select(stop.changed(), ticks.next_tick()).await {
            Either::First(_) => break,
            Either::Second(()) => {}
        }

        match sensor.sample().await {
            Ok(sample) => {
                consecutive_failures = 0;
                balancer.sensors().publish_speed(sample);
            }
            Err(_) => {
                consecutive_failures += 1;
                warn!("speed sample failed ({} consecutive)", consecutive_failures);
                if consecutive_failures >= balancer.config().sensor_fault_limit {
                    balancer
                        .events
                        .send(Event::SensorFault(SensorKind::Speed))
                        .await;
                    break;
                }
            }
        }
    }
    info!("speed sampling stopped");
}
