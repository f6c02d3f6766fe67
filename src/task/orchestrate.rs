//! Orchestrator task
//!
//! Single consumer of system events. Every current event is stop-causing:
//! the orchestrator performs the one-shot `Running` -> `Stopped` transition,
//! issues the final full-stop actuation and ends. The transition broadcast
//! cancels the periodic loops; triggers after the first are no-ops.

use crate::balancer::Balancer;
use crate::system::actuation::MotorRequest;
use crate::system::event::Event;

/// Event loop owning the stop transition
pub async fn orchestrate(balancer: &Balancer) {
    info!("orchestrator started");
    loop {
        let event = balancer.events.wait().await;
        match event {
            Event::StopRequested => info!("operator stop requested"),
            Event::FallDetected(angle) => info!("fall event at {} degrees", angle),
            Event::SensorFault(_) => error!("persistent sensor fault"),
        }

        if balancer.run.stop() {
            balancer.actuation.update(MotorRequest::StopAll);
            info!("stopped, actuation disabled for this session");
            break;
        }
    }
}
