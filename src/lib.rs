//! QualiTasks core: task management and daily planning.
//!
//! This crate provides the scheduling heart of the QualiTasks application:
//! task records with status, priority, and due dates, multi-field task
//! filtering, and the daily-plan aggregation that drives the "My Day" view.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, in-memory)
//!
//! All time-dependent behaviour takes an explicit reference instant or an
//! injected clock; no component reads the wall clock inside domain logic.
//!
//! # Modules
//!
//! - [`task`]: Task records, filtering, and daily-plan aggregation

pub mod task;
