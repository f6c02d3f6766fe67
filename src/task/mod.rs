pub mod attitude_read;
pub mod balance;
pub mod motor_drive;
pub mod orchestrate;
pub mod speed_read;
pub mod tick;
