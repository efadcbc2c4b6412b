// SPDX-FileCopyrightText: 2026 Shiftbell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! What happens when a target date has no stored shift.

use chrono::NaiveDate;
use shiftbell_config::model::{ReminderConfig, SuppressionMode};
use shiftbell_core::{ResolvedShift, ShiftEntry};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SuppressionPolicy {
    /// Any missing date cancels the whole reminder.
    #[default]
    Strict,
    /// Missing dates are shown with `placeholder`.
    Lenient { placeholder: String },
}

impl SuppressionPolicy {
    pub fn from_config(config: &ReminderConfig) -> Self {
        match config.suppression {
            SuppressionMode::Strict => Self::Strict,
            SuppressionMode::Lenient => Self::Lenient {
                placeholder: config.placeholder.clone(),
            },
        }
    }
}

/// Result of applying a policy to looked-up entries.
///
/// A resolved reminder always covers at least one date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Resolved {
        first: ResolvedShift,
        rest: Vec<ResolvedShift>,
    },
    Suppressed {
        missing: Vec<NaiveDate>,
    },
}

/// Pair each target date with its entry (if any) and apply `policy`.
///
/// No target dates means nothing to remind about: `Suppressed` with no
/// missing dates.
pub fn resolve(
    policy: &SuppressionPolicy,
    lookups: Vec<(NaiveDate, Option<ShiftEntry>)>,
) -> Resolution {
    let missing: Vec<NaiveDate> = lookups
        .iter()
        .filter(|(_, entry)| entry.is_none())
        .map(|(date, _)| *date)
        .collect();

    let placeholder = match policy {
        SuppressionPolicy::Strict if !missing.is_empty() => {
            return Resolution::Suppressed { missing };
        }
        SuppressionPolicy::Strict => "",
        SuppressionPolicy::Lenient { placeholder } => placeholder.as_str(),
    };

    let mut shifts = lookups.into_iter().map(|(date, entry)| match entry {
        Some(entry) => ResolvedShift {
            date,
            label: entry.label,
            placeholder: false,
        },
        None => ResolvedShift {
            date,
            label: placeholder.to_string(),
            placeholder: true,
        },
    });

    match shifts.next() {
        Some(first) => Resolution::Resolved {
            first,
            rest: shifts.collect(),
        },
        None => Resolution::Suppressed {
            missing: Vec::new(),
        },
    }
}
