//! Control core for a self-balancing two-wheeled robot.
//!
//! Reads tilt angle, angular rate and wheel speed, computes a motor drive
//! command at a fixed sampling period, and cuts power when the vehicle falls
//! past the recoverable tilt limit or an operator requests a stop.
//!
//! # Architecture
//!
//! Three periodic activities run at the same fixed period:
//! - attitude sampling ([`task::attitude_read`])
//! - wheel speed sampling ([`task::speed_read`])
//! - the control-and-actuate step ([`task::balance`])
//!
//! The sampling tasks publish into a last-value-wins [`system::sensors::SensorCache`];
//! the control step never blocks on a fresh sample. Actuation commands flow
//! through a latest-wins signal to a motor task that owns the motor driver.
//! Fall detection and operator stop requests are routed as events to an
//! orchestrator that performs the one-shot `Running` -> `Stopped` transition.
//! `Stopped` is terminal for the session; recovery requires a restart.
//!
//! Hardware is abstracted behind the [`hal`] traits, so the crate carries no
//! HAL dependency of its own. A firmware binds the traits to its board and
//! either spawns the task functions individually or drives them together via
//! [`Balancer::run`]:
//!
//! ```ignore
//! static BALANCER: Balancer = Balancer::new(BalanceConfig::DEFAULT);
//!
//! #[embassy_executor::task]
//! async fn balance_control(imu: BoardImu, encoder: BoardEncoder, motors: BoardMotors) {
//!     BALANCER.run(imu, encoder, motors).await;
//! }
//! ```

#![cfg_attr(not(test), no_std)]
#![allow(async_fn_in_trait)]

// This mod MUST go first, so that the others see its macros.
pub(crate) mod fmt;

mod balancer;
/// Hardware abstraction traits for the external collaborators
pub mod hal;
/// Core system components
pub mod system;
/// Task implementations
pub mod task;

pub use balancer::Balancer;
pub use system::config::BalanceConfig;
pub use system::state::RunState;
