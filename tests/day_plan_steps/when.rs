//! When steps for daily-plan BDD scenarios.

use super::world::{DayPlanWorld, FixedClock, run_async};
use eyre::WrapErr;
use qualitasks::task::services::DayPlanService;
use rstest_bdd_macros::when;
use std::sync::Arc;

#[when("the daily plan is computed")]
fn compute_daily_plan(world: &mut DayPlanWorld) -> Result<(), eyre::Report> {
    let reference = world
        .reference
        .ok_or_else(|| eyre::eyre!("missing reference instant in scenario world"))?;

    let planner = DayPlanService::new(
        Arc::clone(&world.repository),
        Arc::new(FixedClock(reference)),
    );
    let plan = run_async(planner.plan()).wrap_err("compute daily plan")?;
    world.plan = Some(plan);
    Ok(())
}
