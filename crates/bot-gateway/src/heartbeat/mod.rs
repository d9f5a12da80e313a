//! Heartbeat scheduling

mod scheduler;

pub use scheduler::HeartbeatScheduler;
