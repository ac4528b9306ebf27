//! Then steps for daily-plan BDD scenarios.

use super::world::DayPlanWorld;
use qualitasks::task::domain::DayPlan;
use rstest_bdd_macros::then;

fn plan(world: &DayPlanWorld) -> Result<&DayPlan, eyre::Report> {
    world
        .plan
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing computed plan in scenario world"))
}

#[then(r#"today contains "{title}" marked as carried over"#)]
fn today_contains_carried_over(world: &DayPlanWorld, title: String) -> Result<(), eyre::Report> {
    let entry = plan(world)?
        .today
        .iter()
        .find(|entry| entry.task.title() == title)
        .ok_or_else(|| eyre::eyre!("task {title} not found in today bucket"))?;

    if !entry.carried_over {
        return Err(eyre::eyre!("task {title} is not marked as carried over"));
    }
    Ok(())
}

#[then(r#"the yesterday bucket contains "{title}""#)]
fn yesterday_contains(world: &DayPlanWorld, title: String) -> Result<(), eyre::Report> {
    let found = plan(world)?
        .yesterday
        .iter()
        .any(|task| task.title() == title);

    if !found {
        return Err(eyre::eyre!("task {title} not found in yesterday bucket"));
    }
    Ok(())
}

#[then("the yesterday bucket is empty")]
fn yesterday_is_empty(world: &DayPlanWorld) -> Result<(), eyre::Report> {
    let yesterday = &plan(world)?.yesterday;
    if !yesterday.is_empty() {
        return Err(eyre::eyre!(
            "expected empty yesterday bucket, found {} tasks",
            yesterday.len()
        ));
    }
    Ok(())
}

#[then("the today bucket is empty")]
fn today_is_empty(world: &DayPlanWorld) -> Result<(), eyre::Report> {
    let today = &plan(world)?.today;
    if !today.is_empty() {
        return Err(eyre::eyre!(
            "expected empty today bucket, found {} tasks",
            today.len()
        ));
    }
    Ok(())
}

#[then(r#"today lists "{first}" before "{second}""#)]
fn today_lists_in_order(
    world: &DayPlanWorld,
    first: String,
    second: String,
) -> Result<(), eyre::Report> {
    let titles: Vec<&str> = plan(world)?
        .today
        .iter()
        .map(|entry| entry.task.title())
        .collect();

    let first_index = titles
        .iter()
        .position(|title| *title == first)
        .ok_or_else(|| eyre::eyre!("task {first} not found in today bucket"))?;
    let second_index = titles
        .iter()
        .position(|title| *title == second)
        .ok_or_else(|| eyre::eyre!("task {second} not found in today bucket"))?;

    if first_index >= second_index {
        return Err(eyre::eyre!(
            "expected {first} before {second}, found order {titles:?}"
        ));
    }
    Ok(())
}
