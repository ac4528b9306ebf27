//! Given steps for daily-plan BDD scenarios.

use super::world::{DayPlanWorld, run_async};
use chrono::{DateTime, Utc};
use eyre::WrapErr;
use qualitasks::task::services::{CreateTaskRequest, TransitionTaskRequest};
use rstest_bdd_macros::given;

fn parse_instant(value: &str) -> Result<DateTime<Utc>, eyre::Report> {
    let parsed = DateTime::parse_from_rfc3339(value)
        .wrap_err_with(|| format!("invalid scenario timestamp: {value}"))?;
    Ok(parsed.with_timezone(&Utc))
}

#[given(r#"the reference clock reads "{timestamp}""#)]
fn reference_clock_reads(
    world: &mut DayPlanWorld,
    timestamp: String,
) -> Result<(), eyre::Report> {
    world.reference = Some(parse_instant(&timestamp)?);
    Ok(())
}

#[given(r#"a pending task "{title}" due "{due}""#)]
fn pending_task_due(
    world: &mut DayPlanWorld,
    title: String,
    due: String,
) -> Result<(), eyre::Report> {
    let request = CreateTaskRequest::new(title, scenario_creator()).with_due_date(parse_instant(&due)?);
    run_async(world.lifecycle.create(request)).wrap_err("seed pending task")?;
    Ok(())
}

#[given(r#"a pending task "{title}" due "{due}" with priority "{priority}""#)]
fn pending_task_with_priority(
    world: &mut DayPlanWorld,
    title: String,
    due: String,
    priority: String,
) -> Result<(), eyre::Report> {
    let request = CreateTaskRequest::new(title, scenario_creator())
        .with_due_date(parse_instant(&due)?)
        .with_priority(priority);
    run_async(world.lifecycle.create(request)).wrap_err("seed prioritised task")?;
    Ok(())
}

#[given(r#"a completed task "{title}" due "{due}""#)]
fn completed_task_due(
    world: &mut DayPlanWorld,
    title: String,
    due: String,
) -> Result<(), eyre::Report> {
    let request = CreateTaskRequest::new(title, scenario_creator()).with_due_date(parse_instant(&due)?);
    let created = run_async(world.lifecycle.create(request)).wrap_err("seed completed task")?;
    run_async(
        world
            .lifecycle
            .transition(TransitionTaskRequest::new(created.id(), "completed")),
    )
    .wrap_err("complete seeded task")?;
    Ok(())
}

/// Fixed creator reference shared by scenario tasks.
fn scenario_creator() -> qualitasks::task::domain::UserId {
    qualitasks::task::domain::UserId::from_uuid(uuid::Uuid::from_u128(9))
}
