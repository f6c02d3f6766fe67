//! Motor actuation task
//!
//! Owns the motor driver and consumes actuation requests from the
//! latest-wins signal. A request that was overwritten before this task ran
//! was stale and is dropped, which also guarantees that a stop request can
//! never be overtaken by an older drive command.
//!
//! Driver faults are logged and not retried; the next tick supersedes a
//! failed drive command. The task ends after the final stop request, so no
//! actuation is possible afterwards.

use crate::balancer::Balancer;
use crate::hal::MotorDriver;
use crate::system::actuation::MotorRequest;

/// Motor request consumer. Runs until the final stop request.
pub async fn motor_drive<M: MotorDriver>(balancer: &Balancer, mut driver: M) {
    info!("motor task started");
    loop {
        match balancer.actuation.wait().await {
            MotorRequest::Drive(command) => {
                if driver.drive(command).await.is_err() {
                    warn!("motor driver rejected drive command");
                }
            }
            MotorRequest::StopAll => {
                if driver.stop_all().await.is_err() {
                    error!("motor driver rejected stop command");
                }
                break;
            }
        }
    }
    info!("motor output released");
}
