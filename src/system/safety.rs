//! Safety Monitor
//!
//! Fall detection: past the recoverable tilt limit active balancing is
//! abandoned and the session shuts actuation down. The check runs every
//! control tick on the same angle the control law just consumed.

use crate::system::config::BalanceConfig;

/// Fall detector
pub struct SafetyMonitor {
    fall_limit_deg: f32,
}

impl SafetyMonitor {
    pub fn new(config: &BalanceConfig) -> Self {
        Self {
            fall_limit_deg: config.fall_limit_deg,
        }
    }

    /// Returns `true` when the tilt angle is at or beyond the fall limit in
    /// either direction. The boundary itself counts as fallen.
    pub fn fall_detected(&self, angle_deg: f32) -> bool {
        libm::fabsf(angle_deg) >= self.fall_limit_deg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn monitor() -> SafetyMonitor {
        SafetyMonitor::new(&BalanceConfig::DEFAULT)
    }

    #[test]
    fn upright_angles_are_recoverable() {
        let monitor = monitor();
        for angle in [0.0f32, 0.8, -5.0, 29.9, -29.9] {
            assert!(!monitor.fall_detected(angle), "angle {angle} misdetected");
        }
    }

    #[test]
    fn boundary_is_inclusive() {
        let monitor = monitor();
        assert!(monitor.fall_detected(30.0));
        assert!(monitor.fall_detected(-30.0));
    }

    #[test]
    fn past_the_limit_is_fallen() {
        let monitor = monitor();
        assert!(monitor.fall_detected(31.0));
        assert!(monitor.fall_detected(-45.0));
        assert!(monitor.fall_detected(90.0));
    }
}
