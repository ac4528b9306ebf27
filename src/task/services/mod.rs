//! Application services for task orchestration.

mod day_plan;
mod lifecycle;

pub use day_plan::{DayPlanError, DayPlanResult, DayPlanService};
pub use lifecycle::{
    CreateTaskRequest, RescheduleTaskRequest, TaskLifecycleError, TaskLifecycleResult,
    TaskLifecycleService, TransitionTaskRequest,
};
