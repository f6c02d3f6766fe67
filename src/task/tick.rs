//! Periodic tick abstraction
//!
//! The periodic tasks pace themselves on a [`TickSource`] instead of an
//! embedded ticker directly, so tests can drive the scheduling
//! deterministically without wall-clock waits.

use embassy_time::{Duration, Ticker};

/// Source of periodic ticks for the sampling and control loops
pub trait TickSource {
    /// Completes at the next tick boundary
    async fn next_tick(&mut self);
}

/// Production tick source: a fixed-period [`embassy_time::Ticker`].
///
/// The ticker keeps its phase when a tick is consumed late, so the loops
/// stay locked to the configured period.
pub struct Periodic {
    ticker: Ticker,
}

impl Periodic {
    pub fn new(period: Duration) -> Self {
        Self {
            ticker: Ticker::every(period),
        }
    }
}

impl TickSource for Periodic {
    async fn next_tick(&mut self) {
        self.ticker.next().await;
    }
}
