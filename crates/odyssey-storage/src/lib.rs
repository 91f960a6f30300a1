// SPDX-FileCopyrightText: 2026 Odyssey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Persistence layer for the Odyssey game framework.
//!
//! Provides WAL-mode SQLite storage with an embedded schema and a
//! single-writer concurrency model via `tokio-rusqlite`, plus an in-memory
//! store for offline mode and a null store for unconfigured deployments.

pub mod database;
pub mod memory;
pub mod null;
pub mod queries;
pub mod sqlite;

pub use database::Database;
pub use memory::MemoryStore;
pub use null::NullStore;
pub use sqlite::SqliteStore;
