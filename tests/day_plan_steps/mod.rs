//! Step definitions for daily-plan behaviour scenarios.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
