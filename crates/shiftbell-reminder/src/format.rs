// SPDX-FileCopyrightText: 2026 Shiftbell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Subject and body wording.

use std::iter;

use shiftbell_core::date::format_date;
use shiftbell_core::{ReminderResult, ResolvedShift};

/// Format resolved shifts into a [`ReminderResult`].
///
/// One body line per date, `first` then `rest` in order.
pub fn format_reminder(first: ResolvedShift, rest: Vec<ResolvedShift>) -> ReminderResult {
    let subject = match rest.split_last() {
        None => format!("Reminder: Your Shift for {}", format_date(first.date)),
        Some((last, middle)) => {
            let leading: Vec<String> = iter::once(&first)
                .chain(middle)
                .map(|s| format_date(s.date))
                .collect();
            format!(
                "Reminder: Your Shifts for {} and {}",
                leading.join(", "),
                format_date(last.date)
            )
        }
    };

    let shifts: Vec<ResolvedShift> = iter::once(first).chain(rest).collect();
    let body = shifts
        .iter()
        .map(|shift| format!("Your shift for {} is: {}.", format_date(shift.date), shift.label))
        .collect::<Vec<_>>()
        .join("\n");

    ReminderResult {
        subject,
        body,
        shifts,
    }
}
