// SPDX-FileCopyrightText: 2026 Shiftbell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Target-date derivation.

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use shiftbell_config::model::ReminderWindow;
use shiftbell_core::date::local_date;

/// The calendar dates a reminder issued at `now` covers, in ascending order.
///
/// "Today" is the local date of `now` in `tz`.
pub fn target_dates(now: DateTime<Utc>, tz: FixedOffset, window: ReminderWindow) -> Vec<NaiveDate> {
    let today = local_date(now, tz);
    // NaiveDate::MAX has no successor; clamp rather than fail.
    let tomorrow = today.succ_opt().unwrap_or(today);
    match window {
        ReminderWindow::Tomorrow => vec![tomorrow],
        ReminderWindow::TodayAndTomorrow => vec![today, tomorrow],
    }
}
