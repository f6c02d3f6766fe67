//! Sensor Cache
//!
//! Holds the most recently observed tilt and wheel speed samples. The two
//! sampling tasks overwrite their respective value asynchronously; the
//! control step reads whatever is cached at the tick boundary and never
//! waits for a fresher sample, so staleness is bounded by one sampling
//! period.
//!
//! Each value is replaced as a whole inside a critical-section lock, so a
//! reader can never observe a partially written sample even when publishers
//! run on a different executor or interrupt priority.

use core::cell::Cell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;

/// Tilt measurement from the fused gyro/accelerometer attitude sensor
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TiltSample {
    /// Forward/backward lean in degrees, zero at the mechanical balance offset
    pub angle_deg: f32,
    /// Rotational velocity of the lean axis in degrees/second
    pub rate_dps: f32,
}

impl TiltSample {
    /// Default before the first sample arrives
    pub const ZERO: Self = Self {
        angle_deg: 0.0,
        rate_dps: 0.0,
    };
}

/// Wheel speed measurement from the encoder
///
/// The chassis has a single combined speed sensor, so this one value stands
/// in for both wheels in the velocity law.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpeedSample {
    /// Rotational speed in rpm, signed
    pub rpm: f32,
}

impl SpeedSample {
    /// Default before the first sample arrives
    pub const ZERO: Self = Self { rpm: 0.0 };
}

/// Last-value-wins cache for the sensor readings consumed by the control step
pub struct SensorCache {
    tilt: Mutex<CriticalSectionRawMutex, Cell<TiltSample>>,
    speed: Mutex<CriticalSectionRawMutex, Cell<SpeedSample>>,
}

impl SensorCache {
    pub const fn new() -> Self {
        Self {
            tilt: Mutex::new(Cell::new(TiltSample::ZERO)),
            speed: Mutex::new(Cell::new(SpeedSample::ZERO)),
        }
    }

    /// Overwrites the cached tilt sample
    pub fn publish_tilt(&self, sample: TiltSample) {
        self.tilt.lock(|cell| cell.set(sample));
    }

    /// Overwrites the cached speed sample
    pub fn publish_speed(&self, sample: SpeedSample) {
        self.speed.lock(|cell| cell.set(sample));
    }

    /// Returns the latest published tilt sample without blocking
    pub fn tilt(&self) -> TiltSample {
        self.tilt.lock(|cell| cell.get())
    }

    /// Returns the latest published speed sample without blocking
    pub fn speed(&self) -> SpeedSample {
        self.speed.lock(|cell| cell.get())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zeroed_before_first_sample() {
        let cache = SensorCache::new();
        assert_eq!(cache.tilt(), TiltSample::ZERO);
        assert_eq!(cache.speed(), SpeedSample::ZERO);
    }

    #[test]
    fn publish_overwrites_previous_value() {
        let cache = SensorCache::new();
        cache.publish_tilt(TiltSample {
            angle_deg: 1.5,
            rate_dps: -3.0,
        });
        cache.publish_tilt(TiltSample {
            angle_deg: 2.5,
            rate_dps: 4.0,
        });
        let tilt = cache.tilt();
        assert_eq!(tilt.angle_deg, 2.5);
        assert_eq!(tilt.rate_dps, 4.0);

        cache.publish_speed(SpeedSample { rpm: 42.0 });
        assert_eq!(cache.speed().rpm, 42.0);
    }

    #[test]
    fn reads_do_not_consume_the_sample() {
        let cache = SensorCache::new();
        cache.publish_speed(SpeedSample { rpm: 10.0 });
        assert_eq!(cache.speed().rpm, 10.0);
        assert_eq!(cache.speed().rpm, 10.0);
    }
}
