//! Velocity Controller
//!
//! Filtered proportional-integral law that regulates forward/backward drift.
//! The wheel speed error is low-pass filtered, accumulated into a clamped
//! integrator and converted into a counter-command that the mixer subtracts
//! from the balance term.
//!
//! The filter and integrator values are the only state in the system that
//! persists across control ticks. They belong exclusively to this controller
//! and are updated exactly once per tick; they reset only at construction.

use crate::system::config::{BalanceConfig, DUTY_SCALE};

/// Coefficient of the first-order low-pass on the velocity error: each tick
/// blends 20% of the fresh error with 80% of the filtered history.
const FILTER_GAIN: f32 = 0.2;

/// Filtered-PI velocity regulator
pub struct VelocityController {
    kp: f32,
    ki: f32,
    target_rpm: f32,
    integrator_limit: f32,
    filtered: f32,
    integrated: f32,
}

impl VelocityController {
    pub fn new(config: &BalanceConfig) -> Self {
        Self {
            kp: config.velocity_kp,
            ki: config.velocity_ki,
            target_rpm: config.target_rpm,
            integrator_limit: config.integrator_limit,
            filtered: 0.0,
            integrated: 0.0,
        }
    }

    /// Advances the filter and integrator by one tick and returns the
    /// velocity counter-command.
    ///
    /// The chassis has a single combined speed sensor, so callers feed the
    /// same measurement in as both wheel speeds.
    pub fn velocity_term(&mut self, left_rpm: f32, right_rpm: f32) -> f32 {
        let error = left_rpm + right_rpm - self.target_rpm;
        self.filtered = FILTER_GAIN * error + (1.0 - FILTER_GAIN) * self.filtered;
        // anti-windup clamp against unbounded growth during sustained error
        self.integrated = (self.integrated + self.filtered)
            .clamp(-self.integrator_limit, self.integrator_limit);
        (self.kp * self.filtered + self.ki * self.integrated) / DUTY_SCALE
    }
}
