// SPDX-FileCopyrightText: 2026 Shiftbell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shift store backends for Shiftbell.
//!
//! Provides a WAL-mode SQLite store with embedded migrations, where every
//! statement runs on `tokio-rusqlite`'s single background thread, and an
//! in-memory reference store for tests and dry runs.

pub mod adapter;
pub mod database;
pub mod memory;
pub mod migrations;
pub mod queries;

pub use adapter::SqliteShiftStore;
pub use database::Database;
pub use memory::MemoryShiftStore;
