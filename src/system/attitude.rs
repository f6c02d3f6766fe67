//! Attitude Controller
//!
//! Proportional-derivative law that converts the current lean into a
//! stabilizing drive term: leaning forward drives the wheels forward under
//! the center of mass, and the derivative term damps the correction against
//! the measured angular rate.

use crate::system::config::{BalanceConfig, DUTY_SCALE};

/// PD attitude stabilizer
///
/// Stateless: the term depends only on the current tilt sample.
pub struct AttitudeController {
    target_angle_deg: f32,
    kp: f32,
    kd: f32,
}

impl AttitudeController {
    pub fn new(config: &BalanceConfig) -> Self {
        Self {
            target_angle_deg: config.target_angle_deg,
            kp: config.attitude_kp,
            kd: config.attitude_kd,
        }
    }

    /// Computes the stabilizing drive term for the given tilt sample.
    ///
    /// Zero when the vehicle rests exactly at the mechanical balance offset
    /// with no angular rate.
    pub fn balance_term(&self, angle_deg: f32, rate_dps: f32) -> f32 {
        (self.kp * (angle_deg - self.target_angle_deg) + self.kd * rate_dps) / DUTY_SCALE
    }
}
