// SPDX-FileCopyrightText: 2026 Shiftbell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter trait definitions for Shiftbell's external collaborators.
//!
//! Every collaborator extends the [`PluginAdapter`] base trait and uses
//! `#[async_trait]` so handlers can hold them as `Arc<dyn ...>`.

pub mod adapter;
pub mod clock;
pub mod dispatch;
pub mod source;
pub mod store;

pub use adapter::PluginAdapter;
pub use clock::{Clock, SystemClock};
pub use dispatch::NotificationDispatcher;
pub use source::DocumentSource;
pub use store::ShiftStore;
