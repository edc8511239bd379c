//! Background Tasks Module
//!
//! # Tasks
//! - TTL Cleanup: drops expired cached responses at a configured interval

mod cleanup;

pub use cleanup::spawn_cleanup_task;
