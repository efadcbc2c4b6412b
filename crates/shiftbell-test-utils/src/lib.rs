// SPDX-FileCopyrightText: 2026 Shiftbell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Shiftbell integration tests.
//!
//! Provides mock adapters and test harness infrastructure for fast,
//! deterministic tests without mail servers, object stores or wall clocks.
//!
//! # Components
//!
//! - [`MockDispatcher`] - Captures notifications, optionally fails on demand
//! - [`MockSource`] - In-memory document source
//! - [`FixedClock`] - Clock pinned to a chosen instant
//! - [`TestHarness`] - Temp SQLite store wired to the mocks above

pub mod clock;
pub mod harness;
pub mod mock_dispatcher;
pub mod mock_source;

pub use clock::FixedClock;
pub use harness::TestHarness;
pub use mock_dispatcher::MockDispatcher;
pub use mock_source::MockSource;
