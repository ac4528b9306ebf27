//! Shared world state for daily-plan BDD scenarios.

use std::sync::Arc;

use chrono::{DateTime, Local, Utc};
use mockable::{Clock, DefaultClock};
use qualitasks::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::DayPlan,
    services::TaskLifecycleService,
};
use rstest::fixture;

/// Lifecycle service type used by the BDD world.
pub type TestLifecycleService = TaskLifecycleService<InMemoryTaskRepository, DefaultClock>;

/// Clock pinned to the scenario's reference instant.
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Scenario world for daily-plan behaviour tests.
pub struct DayPlanWorld {
    /// Repository shared between seeding and planning.
    pub repository: Arc<InMemoryTaskRepository>,
    /// Lifecycle service used to seed scenario tasks.
    pub lifecycle: TestLifecycleService,
    /// Reference instant the plan is computed against.
    pub reference: Option<DateTime<Utc>>,
    /// The plan produced by the when step.
    pub plan: Option<DayPlan>,
}

impl DayPlanWorld {
    /// Creates a world with an empty repository and no computed plan.
    #[must_use]
    pub fn new() -> Self {
        let repository = Arc::new(InMemoryTaskRepository::new());
        let lifecycle = TaskLifecycleService::new(Arc::clone(&repository), Arc::new(DefaultClock));

        Self {
            repository,
            lifecycle,
            reference: None,
            plan: None,
        }
    }
}

impl Default for DayPlanWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> DayPlanWorld {
    DayPlanWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
