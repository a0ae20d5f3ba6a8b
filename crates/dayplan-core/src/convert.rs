//! Time-field inference for converting a schedule item between its two
//! representations.
//!
//! Events carry a date range plus optional times of day; tasks carry full
//! timestamps. Converting between them is lossy in shape but deterministic:
//! the rules below decide which task timestamps an event's fields map onto
//! and which event date range a task's timestamps collapse into.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// Task-side time fields produced by an Event → Task conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskTimes {
    pub start_time: Option<NaiveDateTime>,
    pub end_time: Option<NaiveDateTime>,
    pub scheduled_time: Option<NaiveDateTime>,
}

/// Event-side time fields produced by a Task → Event conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventTimes {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
}

const DAY_END: NaiveTime = match NaiveTime::from_hms_opt(23, 59, 59) {
    Some(t) => t,
    None => unreachable!(),
};

/// ## Summary
/// Maps an event's date range and optional times of day onto task
/// timestamps.
///
/// A lone start time becomes the task's `scheduled_time`; a full start/end
/// pair becomes the task's start and end timestamps; an all-day event spans
/// midnight to 23:59:59.
#[must_use]
pub fn event_to_task_times(
    start_date: NaiveDate,
    end_date: NaiveDate,
    start_time: Option<NaiveTime>,
    end_time: Option<NaiveTime>,
) -> TaskTimes {
    match (start_time, end_time) {
        (Some(start), None) => TaskTimes {
            start_time: None,
            end_time: None,
            scheduled_time: Some(start_date.and_time(start)),
        },
        (Some(start), Some(end)) => TaskTimes {
            start_time: Some(start_date.and_time(start)),
            end_time: Some(end_date.and_time(end)),
            scheduled_time: None,
        },
        _ => TaskTimes {
            start_time: Some(start_date.and_time(NaiveTime::MIN)),
            end_time: Some(end_date.and_time(DAY_END)),
            scheduled_time: None,
        },
    }
}

/// ## Summary
/// Collapses a task's timestamps into an event date range with optional
/// times of day.
///
/// `scheduled_time` wins over the start/end pair; a task with no time data
/// at all lands on `today` as an all-day event.
#[must_use]
pub fn task_to_event_times(
    scheduled_time: Option<NaiveDateTime>,
    start_time: Option<NaiveDateTime>,
    end_time: Option<NaiveDateTime>,
    today: NaiveDate,
) -> EventTimes {
    if let Some(scheduled) = scheduled_time {
        EventTimes {
            start_date: scheduled.date(),
            end_date: scheduled.date(),
            start_time: Some(scheduled.time()),
            end_time: None,
        }
    } else if let (Some(start), Some(end)) = (start_time, end_time) {
        EventTimes {
            start_date: start.date(),
            end_date: end.date(),
            start_time: Some(start.time()),
            end_time: Some(end.time()),
        }
    } else if let Some(start) = start_time {
        EventTimes {
            start_date: start.date(),
            end_date: start.date(),
            start_time: None,
            end_time: None,
        }
    } else if let Some(end) = end_time {
        EventTimes {
            start_date: end.date(),
            end_date: end.date(),
            start_time: None,
            end_time: None,
        }
    } else {
        EventTimes {
            start_date: today,
            end_date: today,
            start_time: None,
            end_time: None,
        }
    }
}
