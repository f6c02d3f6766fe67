//! System Events
//!
//! Defines the stop-causing events and the channel that routes them to the
//! orchestrator.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

/// Event queue depth. Stop is latched on the first event, so a shallow
/// queue is sufficient.
const EVENT_QUEUE_DEPTH: usize = 8;

/// System-wide events
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// Operator requested an immediate stop
    StopRequested,
    /// Tilt angle passed the fall limit; carries the offending angle in degrees
    FallDetected(f32),
    /// A sensor failed persistently and the controller is flying blind
    SensorFault(SensorKind),
}

/// Sensor identifiers for fault reporting
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorKind {
    Attitude,
    Speed,
}

/// Multi-producer, single-consumer event channel
pub struct EventBus {
    channel: Channel<CriticalSectionRawMutex, Event, EVENT_QUEUE_DEPTH>,
}

impl EventBus {
    pub(crate) const fn new() -> Self {
        Self {
            channel: Channel::new(),
        }
    }

    /// Sends an event, waiting for queue space
    pub(crate) async fn send(&self, event: Event) {
        self.channel.sender().send(event).await;
    }

    /// Sends an event without waiting. A full queue means a stop is already
    /// pending, so the event is dropped.
    pub(crate) fn try_send(&self, event: Event) {
        let _ = self.channel.sender().try_send(event);
    }

    /// Receives the next event
    pub(crate) async fn wait(&self) -> Event {
        self.channel.receiver().receive().await
    }
}
