//! Derived task views.
//!
//! Views are computed from the cached list on every render, never
//! stored: the inbox (tasks with no date), a calendar day (tasks
//! whose date equals the selected day), and within either, the
//! todo/done split with todo further divided into scheduled and
//! all-day subsets. The all-day subset is the only one that can be
//! manually reordered.

use chrono::NaiveDate;

use super::ordering::compare_unified;
use super::Task;

/// Tasks with no assigned date.
pub fn inbox(tasks: &[Task]) -> Vec<&Task> {
    tasks.iter().filter(|t| t.date.is_none()).collect()
}

/// Tasks assigned to the given calendar day (day equality, not a
/// time-range comparison).
pub fn for_day(tasks: &[Task], day: NaiveDate) -> Vec<&Task> {
    tasks.iter().filter(|t| t.date == Some(day)).collect()
}

/// Todo/done partition of one active view.
#[derive(Debug, Default)]
pub struct DayView<'a> {
    /// Incomplete tasks with a date or time, ascending by date+time.
    pub scheduled: Vec<&'a Task>,
    /// Incomplete tasks with neither date nor time, in list order.
    pub all_day: Vec<&'a Task>,
    /// Completed tasks, in list order.
    pub done: Vec<&'a Task>,
}

impl<'a> DayView<'a> {
    /// Partition an already-filtered view.
    pub fn build(view: &[&'a Task]) -> Self {
        let mut partition = DayView::default();
        for &task in view {
            if task.is_done {
                partition.done.push(task);
            } else if task.has_schedule() {
                partition.scheduled.push(task);
            } else {
                partition.all_day.push(task);
            }
        }
        partition
            .scheduled
            .sort_by(|a, b| a.schedule_key().cmp(&b.schedule_key()));
        partition
    }

    /// Id sequence of the reorderable subset.
    pub fn all_day_ids(&self) -> Vec<String> {
        self.all_day.iter().map(|t| t.id.clone()).collect()
    }
}

/// Inbox partition with the unified comparator applied first, so the
/// all-day subset comes out in its canonical manual order.
pub fn inbox_view(tasks: &[Task]) -> DayView<'_> {
    let mut filtered = inbox(tasks);
    filtered.sort_by(|a, b| compare_unified(a, b));
    DayView::build(&filtered)
}

/// Day partition for a selected calendar day.
pub fn day_view(tasks: &[Task], day: NaiveDate) -> DayView<'_> {
    let mut filtered = for_day(tasks, day);
    filtered.sort_by(|a, b| compare_unified(a, b));
    DayView::build(&filtered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::sample_task;
    use chrono::NaiveTime;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn fixture() -> Vec<Task> {
        let mut dated = sample_task("dated");
        dated.date = Some(day(2024, 1, 1));
        dated.time = NaiveTime::from_hms_opt(9, 0, 0);

        let mut dated_later = sample_task("dated-later");
        dated_later.date = Some(day(2024, 1, 1));
        dated_later.time = NaiveTime::from_hms_opt(14, 0, 0);

        let mut other_day = sample_task("other-day");
        other_day.date = Some(day(2024, 1, 2));

        let mut done = sample_task("done");
        done.date = Some(day(2024, 1, 1));
        done.is_done = true;

        let mut loose_a = sample_task("loose-a");
        loose_a.order = Some(1);
        let mut loose_b = sample_task("loose-b");
        loose_b.order = Some(0);

        vec![dated, dated_later, other_day, done, loose_a, loose_b]
    }

    #[test]
    fn inbox_excludes_dated_tasks() {
        let tasks = fixture();
        let view = inbox(&tasks);
        let ids: Vec<&str> = view.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["loose-a", "loose-b"]);
    }

    #[test]
    fn for_day_uses_calendar_equality() {
        let tasks = fixture();
        let view = for_day(&tasks, day(2024, 1, 1));
        let ids: Vec<&str> = view.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["dated", "dated-later", "done"]);
        assert!(for_day(&tasks, day(2024, 3, 1)).is_empty());
    }

    #[test]
    fn day_view_partitions_and_sorts_scheduled() {
        let tasks = fixture();
        let view = day_view(&tasks, day(2024, 1, 1));
        let scheduled: Vec<&str> = view.scheduled.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(scheduled, ["dated", "dated-later"]);
        assert!(view.all_day.is_empty());
        assert_eq!(view.done.len(), 1);
        assert_eq!(view.done[0].id, "done");
    }

    #[test]
    fn inbox_view_orders_all_day_by_manual_order() {
        let tasks = fixture();
        let view = inbox_view(&tasks);
        assert_eq!(view.all_day_ids(), ["loose-b", "loose-a"]);
        assert!(view.scheduled.is_empty());
    }

    #[test]
    fn time_only_task_lands_in_scheduled_subset() {
        let mut timed = sample_task("timed");
        timed.time = NaiveTime::from_hms_opt(8, 0, 0);
        let loose = sample_task("loose");
        let tasks = vec![timed, loose];
        let view = inbox_view(&tasks);
        assert_eq!(view.scheduled.len(), 1);
        assert_eq!(view.scheduled[0].id, "timed");
        assert_eq!(view.all_day_ids(), ["loose"]);
    }
}
