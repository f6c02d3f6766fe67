//! Controller Configuration
//!
//! Gains, limits and timing for the balance control loop. The values are
//! fixed once the controller is constructed; there is no runtime retuning.

use embassy_time::Duration;

/// Controller gains are expressed in thousandths of full duty, so both
/// control laws divide their raw output by this factor to produce a
/// normalized duty value.
pub const DUTY_SCALE: f32 = 1000.0;

/// Balance controller configuration
///
/// The defaults are the tuned values for the reference chassis. Firmware for
/// a different chassis overrides individual fields:
///
/// ```ignore
/// let config = BalanceConfig {
///     target_angle_deg: 1.2, // different center-of-mass offset
///     ..BalanceConfig::DEFAULT
/// };
/// ```
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BalanceConfig {
    /// Mechanical zero offset in degrees. Not true vertical: compensates the
    /// center-of-mass bias of the chassis.
    pub target_angle_deg: f32,
    /// Proportional gain of the attitude law (per degree of tilt error)
    pub attitude_kp: f32,
    /// Derivative gain of the attitude law (per degree/second of tilt rate)
    pub attitude_kd: f32,
    /// Proportional gain of the velocity law (per rpm of filtered error)
    pub velocity_kp: f32,
    /// Integral gain of the velocity law (per rpm of accumulated error)
    pub velocity_ki: f32,
    /// Velocity setpoint in rpm. Zero means station-keeping.
    pub target_rpm: f32,
    /// Anti-windup clamp on the velocity integrator
    pub integrator_limit: f32,
    /// Tilt angle beyond which the fall is irrecoverable, in degrees
    pub fall_limit_deg: f32,
    /// Period of the three periodic activities (sampling and control)
    pub control_period: Duration,
    /// Consecutive failed sensor samples tolerated before the sampling task
    /// raises a safety stop
    pub sensor_fault_limit: u32,
}

impl BalanceConfig {
    /// Tuned configuration for the reference chassis
    pub const DEFAULT: Self = Self {
        target_angle_deg: 0.8,
        attitude_kp: 80.0,
        attitude_kd: 2.0,
        velocity_kp: 3.0,
        velocity_ki: 3.0 / 200.0,
        target_rpm: 0.0,
        integrator_limit: 3000.0,
        fall_limit_deg: 30.0,
        control_period: Duration::from_millis(20),
        sensor_fault_limit: 25,
    };
}

impl Default for BalanceConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
