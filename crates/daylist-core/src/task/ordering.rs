//! Deterministic ordering for the unified task list.
//!
//! The comparator is total and the sort is stable, so the output
//! order is a pure function of the input: scheduled tasks first (by
//! combined date+time), then unscheduled tasks (by manual `order`
//! when both carry one, newest-created first otherwise), remaining
//! ties in input order.

use std::cmp::Ordering;

use super::Task;
use crate::error::ValidationError;

/// Primary comparator for the unified list view.
pub fn compare_unified(a: &Task, b: &Task) -> Ordering {
    match (a.has_schedule(), b.has_schedule()) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (true, true) => a.schedule_key().cmp(&b.schedule_key()),
        (false, false) => match (a.order, b.order) {
            (Some(x), Some(y)) => x.cmp(&y),
            // Newest first; tasks without created_at count as epoch.
            _ => b.created_key().cmp(&a.created_key()),
        },
    }
}

/// Stable-sort a task list into unified order.
pub fn sort_unified(tasks: &mut [Task]) {
    tasks.sort_by(compare_unified);
}

/// Move the element at `source` to `destination` within one subset's
/// id sequence.
///
/// A drop with no destination is a no-op (`Ok(false)`). Both indices
/// must be within the subset's bounds; nothing outside the subset is
/// touched.
pub fn move_task(
    ids: &mut Vec<String>,
    source: usize,
    destination: Option<usize>,
) -> Result<bool, ValidationError> {
    let Some(destination) = destination else {
        return Ok(false);
    };
    let len = ids.len();
    if source >= len {
        return Err(ValidationError::OutOfBounds {
            collection: "tasks".into(),
            index: source,
            len,
        });
    }
    if destination >= len {
        return Err(ValidationError::OutOfBounds {
            collection: "tasks".into(),
            index: destination,
            len,
        });
    }
    let id = ids.remove(source);
    ids.insert(destination, id);
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::sample_task;
    use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};

    fn scheduled(id: &str, date: &str, time: Option<&str>) -> Task {
        let mut t = sample_task(id);
        t.date = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok();
        t.time = time.and_then(|s| NaiveTime::parse_from_str(s, "%H:%M").ok());
        t
    }

    fn unscheduled(id: &str, order: Option<i64>, created_secs: Option<i64>) -> Task {
        let mut t = sample_task(id);
        t.order = order;
        t.created_at = created_secs.map(|s| Utc.timestamp_opt(s, 0).unwrap());
        t
    }

    fn ids(tasks: &[Task]) -> Vec<&str> {
        tasks.iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn scheduled_before_unscheduled() {
        let mut tasks = vec![
            unscheduled("b", Some(1), None),
            scheduled("a", "2024-01-01", Some("09:00")),
            unscheduled("c", Some(0), None),
        ];
        sort_unified(&mut tasks);
        assert_eq!(ids(&tasks), ["a", "c", "b"]);
    }

    #[test]
    fn scheduled_sorted_by_date_then_time() {
        let mut tasks = vec![
            scheduled("late", "2024-01-02", Some("08:00")),
            scheduled("early", "2024-01-01", Some("09:00")),
            scheduled("noon", "2024-01-01", Some("12:00")),
        ];
        sort_unified(&mut tasks);
        assert_eq!(ids(&tasks), ["early", "noon", "late"]);
    }

    #[test]
    fn missing_time_counts_as_midnight() {
        let mut tasks = vec![
            scheduled("timed", "2024-01-01", Some("09:00")),
            scheduled("dateonly", "2024-01-01", None),
        ];
        sort_unified(&mut tasks);
        assert_eq!(ids(&tasks), ["dateonly", "timed"]);
    }

    #[test]
    fn time_only_task_is_scheduled_at_epoch_day() {
        let mut time_only = sample_task("t");
        time_only.time = NaiveTime::from_hms_opt(9, 0, 0);
        let mut tasks = vec![scheduled("dated", "2024-01-01", None), time_only];
        sort_unified(&mut tasks);
        assert_eq!(ids(&tasks), ["t", "dated"]);
    }

    #[test]
    fn unscheduled_by_order_ascending() {
        let mut tasks = vec![
            unscheduled("b", Some(5), None),
            unscheduled("a", Some(-1), None),
            unscheduled("c", Some(7), None),
        ];
        sort_unified(&mut tasks);
        assert_eq!(ids(&tasks), ["a", "b", "c"]);
    }

    #[test]
    fn unscheduled_without_order_newest_first() {
        let mut tasks = vec![
            unscheduled("old", None, Some(100)),
            unscheduled("new", None, Some(200)),
            unscheduled("ancient", None, None),
        ];
        sort_unified(&mut tasks);
        assert_eq!(ids(&tasks), ["new", "old", "ancient"]);
    }

    #[test]
    fn mixed_order_presence_falls_back_to_created() {
        // Only one side has a manual order: created_at decides.
        let mut tasks = vec![
            unscheduled("ordered", Some(0), Some(100)),
            unscheduled("newer", None, Some(200)),
        ];
        sort_unified(&mut tasks);
        assert_eq!(ids(&tasks), ["newer", "ordered"]);
    }

    #[test]
    fn ties_preserve_input_order() {
        let mut tasks = vec![
            unscheduled("first", None, Some(100)),
            unscheduled("second", None, Some(100)),
            unscheduled("third", None, Some(100)),
        ];
        sort_unified(&mut tasks);
        assert_eq!(ids(&tasks), ["first", "second", "third"]);
    }

    #[test]
    fn sort_is_idempotent() {
        let mut tasks = vec![
            scheduled("s2", "2024-02-01", None),
            unscheduled("u1", Some(3), None),
            scheduled("s1", "2024-01-15", Some("10:30")),
            unscheduled("u2", None, Some(50)),
        ];
        sort_unified(&mut tasks);
        let once = ids(&tasks).join(",");
        sort_unified(&mut tasks);
        assert_eq!(once, ids(&tasks).join(","));
    }

    #[test]
    fn move_task_reinserts_at_destination() {
        let mut ids: Vec<String> = ["a", "b", "c", "d"].iter().map(|s| s.to_string()).collect();
        assert!(move_task(&mut ids, 0, Some(2)).unwrap());
        assert_eq!(ids, ["b", "c", "a", "d"]);

        assert!(move_task(&mut ids, 3, Some(0)).unwrap());
        assert_eq!(ids, ["d", "b", "c", "a"]);
    }

    #[test]
    fn move_task_without_destination_is_noop() {
        let mut ids: Vec<String> = vec!["a".into(), "b".into()];
        assert!(!move_task(&mut ids, 0, None).unwrap());
        assert_eq!(ids, ["a", "b"]);
    }

    #[test]
    fn move_task_rejects_out_of_bounds() {
        let mut ids: Vec<String> = vec!["a".into(), "b".into()];
        assert!(move_task(&mut ids, 2, Some(0)).is_err());
        assert!(move_task(&mut ids, 0, Some(2)).is_err());
        assert_eq!(ids, ["a", "b"]);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        prop_compose! {
            fn arb_task()(
                id in 0u32..64,
                date_days in proptest::option::of(0i64..2000),
                time_mins in proptest::option::of(0u32..1440),
                order in proptest::option::of(-10i64..10),
                created in proptest::option::of(0i64..1_000_000),
                is_done in any::<bool>(),
            ) -> Task {
                let mut t = sample_task(&format!("t{id}"));
                t.date = date_days.and_then(|d| {
                    NaiveDate::from_ymd_opt(1970, 1, 1)
                        .map(|base| base + chrono::Duration::days(d))
                });
                t.time = time_mins
                    .and_then(|m| NaiveTime::from_hms_opt(m / 60, m % 60, 0));
                t.order = order;
                t.created_at = created.map(|s| {
                    DateTime::<Utc>::UNIX_EPOCH + chrono::Duration::seconds(s)
                });
                t.is_done = is_done;
                t
            }
        }

        proptest! {
            #[test]
            fn sorting_is_deterministic(tasks in proptest::collection::vec(arb_task(), 0..24)) {
                let mut once = tasks.clone();
                let mut twice = tasks.clone();
                sort_unified(&mut once);
                sort_unified(&mut twice);
                prop_assert_eq!(ids(&once), ids(&twice));
            }

            #[test]
            fn scheduled_always_lead(tasks in proptest::collection::vec(arb_task(), 0..24)) {
                let mut sorted = tasks;
                sort_unified(&mut sorted);
                let first_unscheduled = sorted
                    .iter()
                    .position(|t| !t.has_schedule())
                    .unwrap_or(sorted.len());
                prop_assert!(sorted[first_unscheduled..]
                    .iter()
                    .all(|t| !t.has_schedule()));
            }

            #[test]
            fn moving_only_permutes_the_subset(
                len in 1usize..12,
                source in 0usize..12,
                destination in 0usize..12,
            ) {
                let source = source % len;
                let destination = destination % len;
                let mut ids: Vec<String> = (0..len).map(|i| format!("id{i}")).collect();
                let before: std::collections::BTreeSet<String> =
                    ids.iter().cloned().collect();
                move_task(&mut ids, source, Some(destination)).unwrap();
                let after: std::collections::BTreeSet<String> =
                    ids.iter().cloned().collect();
                prop_assert_eq!(before, after);
                prop_assert_eq!(ids.len(), len);
            }
        }
    }
}
