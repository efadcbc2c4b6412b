// SPDX-FileCopyrightText: 2026 Shiftbell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reminder computation for Shiftbell.
//!
//! Given "now" from an injected [`Clock`](shiftbell_core::Clock), a fixed
//! time-zone offset and a [`ReminderWindow`](shiftbell_config::model::ReminderWindow),
//! derives the target date(s), looks each up in the shift store, applies the
//! [`SuppressionPolicy`] and hands at most one formatted notification to the
//! dispatcher. Planning is a pure function of the instant and the store
//! contents; only [`Reminder::run`] has a side effect.

pub mod format;
pub mod policy;
pub mod reminder;
pub mod window;

pub use format::format_reminder;
pub use policy::{resolve, Resolution, SuppressionPolicy};
pub use reminder::{Reminder, ReminderOutcome, ReminderPlan, ReminderSettings};
pub use window::target_dates;
