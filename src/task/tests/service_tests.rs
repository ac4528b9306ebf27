//! Service orchestration tests for task lifecycle and daily planning.

use std::sync::Arc;

use crate::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{
        DayWindows, Task, TaskDomainError, TaskFilters, TaskId, TaskPriority, TaskStatus,
    },
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
    services::{
        CreateTaskRequest, DayPlanError, DayPlanService, RescheduleTaskRequest,
        TaskLifecycleError, TaskLifecycleService, TransitionTaskRequest,
    },
};
use super::fixtures::{creator, instant};
use async_trait::async_trait;
use chrono::{DateTime, Local, Utc};
use mockable::{Clock, DefaultClock};
use rstest::{fixture, rstest};

type TestService = TaskLifecycleService<InMemoryTaskRepository, DefaultClock>;

/// Clock pinned to a fixed instant for reproducible planning.
struct FixedClock(DateTime<Utc>);

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

mockall::mock! {
    TaskStore {}

    #[async_trait]
    impl TaskRepository for TaskStore {
        async fn store(&self, task: &Task) -> TaskRepositoryResult<()>;
        async fn update(&self, task: &Task) -> TaskRepositoryResult<()>;
        async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()>;
        async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;
        async fn list(
            &self,
            filters: &TaskFilters,
            now: DateTime<Utc>,
        ) -> TaskRepositoryResult<Vec<Task>>;
        async fn list_day_window(&self, windows: &DayWindows)
        -> TaskRepositoryResult<Vec<Task>>;
    }
}

#[fixture]
fn service() -> TestService {
    TaskLifecycleService::new(
        Arc::new(InMemoryTaskRepository::new()),
        Arc::new(DefaultClock),
    )
}

// ── Lifecycle ───────────────────────────────────────────────────────

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_persists_and_is_retrievable(service: TestService) {
    let request = CreateTaskRequest::new("Set up CI pipeline", creator())
        .with_description("Mirror the staging workflow")
        .with_priority("high")
        .with_due_date(instant(2024, 6, 14, 17, 0));

    let created = service
        .create(request)
        .await
        .expect("task creation should succeed");
    let fetched = service
        .find_by_id(created.id())
        .await
        .expect("lookup should succeed");

    assert_eq!(fetched, Some(created.clone()));
    assert_eq!(created.priority(), TaskPriority::High);
    assert_eq!(created.status(), TaskStatus::Pending);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_rejects_blank_title(service: TestService) {
    let request = CreateTaskRequest::new("   ", creator());
    let result = service.create(request).await;

    assert!(matches!(
        result,
        Err(TaskLifecycleError::Domain(TaskDomainError::EmptyTitle))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_rejects_unrecognised_priority(service: TestService) {
    let request = CreateTaskRequest::new("Valid title", creator()).with_priority("critical");
    let result = service.create(request).await;

    assert!(matches!(result, Err(TaskLifecycleError::Priority(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn transition_persists_the_new_status(service: TestService) {
    let created = service
        .create(CreateTaskRequest::new("Implement search", creator()))
        .await
        .expect("task creation should succeed");

    let transitioned = service
        .transition(TransitionTaskRequest::new(created.id(), "in_progress"))
        .await
        .expect("transition should succeed");
    assert_eq!(transitioned.status(), TaskStatus::InProgress);

    let fetched = service
        .find_by_id(created.id())
        .await
        .expect("lookup should succeed")
        .expect("task should exist");
    assert_eq!(fetched.status(), TaskStatus::InProgress);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn transition_rejects_unrecognised_status_value(service: TestService) {
    let created = service
        .create(CreateTaskRequest::new("Implement search", creator()))
        .await
        .expect("task creation should succeed");

    let result = service
        .transition(TransitionTaskRequest::new(created.id(), "archived"))
        .await;

    assert!(matches!(result, Err(TaskLifecycleError::Status(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn transition_rejects_missing_task(service: TestService) {
    let missing = TaskId::new();
    let result = service
        .transition(TransitionTaskRequest::new(missing, "completed"))
        .await;

    assert!(matches!(
        result,
        Err(TaskLifecycleError::TaskNotFound(id)) if id == missing
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reschedule_clears_the_due_date(service: TestService) {
    let created = service
        .create(
            CreateTaskRequest::new("Review design doc", creator())
                .with_due_date(instant(2024, 6, 14, 12, 0)),
        )
        .await
        .expect("task creation should succeed");

    let rescheduled = service
        .reschedule(RescheduleTaskRequest::new(created.id(), None))
        .await
        .expect("reschedule should succeed");

    assert!(rescheduled.due_date().is_none());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_removes_the_task(service: TestService) {
    let created = service
        .create(CreateTaskRequest::new("Throwaway", creator()))
        .await
        .expect("task creation should succeed");

    service
        .delete(created.id())
        .await
        .expect("delete should succeed");

    let fetched = service
        .find_by_id(created.id())
        .await
        .expect("lookup should succeed");
    assert!(fetched.is_none());

    let second_delete = service.delete(created.id()).await;
    assert!(matches!(
        second_delete,
        Err(TaskLifecycleError::Repository(
            TaskRepositoryError::NotFound(_)
        ))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_applies_filters(service: TestService) {
    service
        .create(CreateTaskRequest::new("Write report intro", creator()))
        .await
        .expect("task creation should succeed");
    service
        .create(CreateTaskRequest::new("Fix login bug", creator()))
        .await
        .expect("task creation should succeed");

    let filters = TaskFilters::none().with_search("report");
    let tasks = service.list(&filters).await.expect("listing should succeed");

    assert_eq!(tasks.len(), 1);
    assert!(tasks.iter().all(|task| task.title().contains("report")));
}

// ── Daily planning ──────────────────────────────────────────────────

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn day_plan_buckets_seeded_tasks_relative_to_fixed_clock() {
    let now = instant(2024, 6, 12, 9, 0);
    let repository = Arc::new(InMemoryTaskRepository::new());
    let lifecycle = TaskLifecycleService::new(Arc::clone(&repository), Arc::new(DefaultClock));

    lifecycle
        .create(
            CreateTaskRequest::new("Due today", creator())
                .with_due_date(instant(2024, 6, 12, 23, 0))
                .with_priority("high"),
        )
        .await
        .expect("task creation should succeed");
    lifecycle
        .create(
            CreateTaskRequest::new("Carried over", creator())
                .with_due_date(instant(2024, 6, 11, 10, 0))
                .with_priority("low"),
        )
        .await
        .expect("task creation should succeed");
    lifecycle
        .create(
            CreateTaskRequest::new("Later this week", creator())
                .with_due_date(instant(2024, 6, 14, 10, 0)),
        )
        .await
        .expect("task creation should succeed");

    let planner = DayPlanService::new(repository, Arc::new(FixedClock(now)));
    let plan = planner.plan().await.expect("planning should succeed");

    let today_titles: Vec<&str> = plan
        .today
        .iter()
        .map(|entry| entry.task.title())
        .collect();
    assert_eq!(today_titles, vec!["Due today", "Carried over"]);
    let carried: Vec<bool> = plan.today.iter().map(|entry| entry.carried_over).collect();
    assert_eq!(carried, vec![false, true]);

    let week_titles: Vec<&str> = plan.this_week.iter().map(Task::title).collect();
    assert_eq!(week_titles, vec!["Later this week"]);
    assert!(plan.yesterday.is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn day_plan_propagates_repository_failures() {
    let mut repository = MockTaskStore::new();
    repository.expect_list_day_window().returning(|_| {
        Err(TaskRepositoryError::persistence(std::io::Error::other(
            "connection reset",
        )))
    });

    let planner = DayPlanService::new(Arc::new(repository), Arc::new(DefaultClock));
    let result = planner.plan().await;

    assert!(matches!(
        result,
        Err(DayPlanError::Repository(
            TaskRepositoryError::Persistence(_)
        ))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn plan_at_accepts_an_explicit_reference_instant() {
    let repository = Arc::new(InMemoryTaskRepository::new());
    let lifecycle = TaskLifecycleService::new(Arc::clone(&repository), Arc::new(DefaultClock));
    lifecycle
        .create(
            CreateTaskRequest::new("Anchored task", creator())
                .with_due_date(instant(2024, 6, 12, 15, 0)),
        )
        .await
        .expect("task creation should succeed");

    let planner = DayPlanService::new(repository, Arc::new(DefaultClock));
    let plan = planner
        .plan_at(instant(2024, 6, 12, 9, 0))
        .await
        .expect("planning should succeed");

    assert_eq!(plan.today.len(), 1);
}
