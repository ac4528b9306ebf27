//! Daily-plan aggregation: the rules behind the "My Day" view.
//!
//! [`plan_day`] partitions a task snapshot into three buckets relative to an
//! explicit reference instant:
//!
//! - `today`: tasks due on the current calendar day (any status), overdue
//!   unfinished tasks, and unfinished tasks without a due date. Tasks due on
//!   yesterday's calendar day and still unfinished are additionally marked
//!   as carried over.
//! - `yesterday`: remaining tasks due strictly inside yesterday; in
//!   practice yesterday's completed tasks, since unfinished ones already
//!   moved to `today`.
//! - `this_week`: remaining tasks due strictly after today and strictly
//!   before the end of the week.
//!
//! Tasks matching none of the rules are not surfaced. Each bucket is then
//! stably sorted by [`schedule_ordering`]. The computation is a pure
//! function: it never reads the wall clock, performs no I/O, and leaves its
//! input untouched, so identical inputs always produce identical plans.

use super::Task;
use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Utc};
use serde::Serialize;
use std::cmp::Ordering;

/// Calendar-day and calendar-week boundaries derived from a reference
/// instant.
///
/// All boundaries are computed in UTC. The week convention is pinned to ISO
/// weeks (Monday start, Sunday end) independent of any runtime locale, so
/// bucket membership never varies by deployment. "End" boundaries are the
/// last representable nanosecond of the period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayWindows {
    start_of_today: DateTime<Utc>,
    end_of_today: DateTime<Utc>,
    start_of_yesterday: DateTime<Utc>,
    end_of_yesterday: DateTime<Utc>,
    start_of_week: DateTime<Utc>,
    end_of_week: DateTime<Utc>,
}

impl DayWindows {
    /// Derives the boundaries surrounding `now`.
    #[must_use]
    pub fn around(now: DateTime<Utc>) -> Self {
        let start_of_today = now.date_naive().and_time(NaiveTime::MIN).and_utc();
        let start_of_yesterday = start_of_today - Duration::days(1);
        let days_into_week = i64::from(now.date_naive().weekday().num_days_from_monday());
        let start_of_week = start_of_today - Duration::days(days_into_week);

        Self {
            start_of_today,
            end_of_today: last_instant_of_day(start_of_today),
            start_of_yesterday,
            end_of_yesterday: last_instant_of_day(start_of_yesterday),
            start_of_week,
            end_of_week: start_of_week + Duration::days(7) - Duration::nanoseconds(1),
        }
    }

    /// Returns the first instant of the current calendar day.
    #[must_use]
    pub const fn start_of_today(&self) -> DateTime<Utc> {
        self.start_of_today
    }

    /// Returns the last instant of the current calendar day.
    #[must_use]
    pub const fn end_of_today(&self) -> DateTime<Utc> {
        self.end_of_today
    }

    /// Returns the first instant of the preceding calendar day.
    #[must_use]
    pub const fn start_of_yesterday(&self) -> DateTime<Utc> {
        self.start_of_yesterday
    }

    /// Returns the last instant of the preceding calendar day.
    #[must_use]
    pub const fn end_of_yesterday(&self) -> DateTime<Utc> {
        self.end_of_yesterday
    }

    /// Returns the first instant of the ISO week containing the reference
    /// instant.
    #[must_use]
    pub const fn start_of_week(&self) -> DateTime<Utc> {
        self.start_of_week
    }

    /// Returns the last instant of the ISO week containing the reference
    /// instant.
    #[must_use]
    pub const fn end_of_week(&self) -> DateTime<Utc> {
        self.end_of_week
    }

    /// Returns the current calendar date.
    #[must_use]
    pub fn today_date(&self) -> NaiveDate {
        self.start_of_today.date_naive()
    }

    /// Returns the preceding calendar date.
    #[must_use]
    pub fn yesterday_date(&self) -> NaiveDate {
        self.start_of_yesterday.date_naive()
    }
}

/// Returns the last nanosecond of the calendar day starting at `start`.
fn last_instant_of_day(start: DateTime<Utc>) -> DateTime<Utc> {
    start + Duration::days(1) - Duration::nanoseconds(1)
}

/// A task surfaced in the `today` bucket together with its carry-over mark.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayPlanEntry {
    /// The surfaced task.
    pub task: Task,
    /// True when the task was due on yesterday's calendar day and is still
    /// unfinished. Older overdue tasks surface in `today` without the mark.
    pub carried_over: bool,
}

/// The three ordered buckets of the daily-plan view.
///
/// Recomputed from scratch on every aggregation; holds no state of its own.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DayPlan {
    /// Tasks to work on today, carried-over ones marked.
    pub today: Vec<DayPlanEntry>,
    /// Tasks due later this week.
    pub this_week: Vec<Task>,
    /// Yesterday's remaining (completed) tasks.
    pub yesterday: Vec<Task>,
}

/// Bucket assignment for a single task.
enum Bucket {
    Today { carried_over: bool },
    Yesterday,
    ThisWeek,
}

/// Classifies a task against the window boundaries; first matching rule
/// wins, `None` means the task is not surfaced.
fn classify(task: &Task, windows: &DayWindows) -> Option<Bucket> {
    let due = task.due_date();
    let unfinished = !task.status().is_completed();

    let due_today = due.is_some_and(|date| date.date_naive() == windows.today_date());
    let overdue = due.is_some_and(|date| date < windows.start_of_today());

    if due_today || (overdue && unfinished) || (due.is_none() && unfinished) {
        let carried_over =
            unfinished && due.is_some_and(|date| date.date_naive() == windows.yesterday_date());
        return Some(Bucket::Today { carried_over });
    }

    // Strict bounds: a task due exactly at yesterday's midnight falls
    // outside the view once completed.
    if due.is_some_and(|date| {
        date > windows.start_of_yesterday() && date < windows.end_of_yesterday()
    }) {
        return Some(Bucket::Yesterday);
    }

    if due.is_some_and(|date| date > windows.end_of_today() && date < windows.end_of_week()) {
        return Some(Bucket::ThisWeek);
    }

    None
}

/// Aggregates a task snapshot into the daily-plan buckets relative to `now`.
///
/// An empty snapshot yields three empty buckets. Every task lands in at most
/// one bucket, and bucket ordering preserves the snapshot's encounter order
/// between tasks that [`schedule_ordering`] considers equal.
#[must_use]
pub fn plan_day(tasks: &[Task], now: DateTime<Utc>) -> DayPlan {
    let windows = DayWindows::around(now);

    let mut today = Vec::new();
    let mut this_week = Vec::new();
    let mut yesterday = Vec::new();

    for task in tasks {
        match classify(task, &windows) {
            Some(Bucket::Today { carried_over }) => today.push(DayPlanEntry {
                task: task.clone(),
                carried_over,
            }),
            Some(Bucket::Yesterday) => yesterday.push(task.clone()),
            Some(Bucket::ThisWeek) => this_week.push(task.clone()),
            None => {}
        }
    }

    today.sort_by(|a, b| schedule_ordering(&a.task, &b.task));
    this_week.sort_by(|a, b| schedule_ordering(a, b));
    yesterday.sort_by(|a, b| schedule_ordering(a, b));

    DayPlan {
        today,
        this_week,
        yesterday,
    }
}

/// Orders two tasks for presentation within a daily-plan bucket.
///
/// Keys, most significant first: unfinished before completed, priority rank
/// (`urgent` first), status rank (`pending` first), then due date ascending.
/// When either side lacks a due date the comparison is `Equal`, leaving a
/// stable sort to preserve encounter order.
#[must_use]
pub fn schedule_ordering(a: &Task, b: &Task) -> Ordering {
    a.status()
        .is_completed()
        .cmp(&b.status().is_completed())
        .then_with(|| a.priority().schedule_rank().cmp(&b.priority().schedule_rank()))
        .then_with(|| a.status().schedule_rank().cmp(&b.status().schedule_rank()))
        .then_with(|| match (a.due_date(), b.due_date()) {
            (Some(first), Some(second)) => first.cmp(&second),
            _ => Ordering::Equal,
        })
}
