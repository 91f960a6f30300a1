// SPDX-FileCopyrightText: 2026 Odyssey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Odyssey integration tests.
//!
//! Provides deterministic, CI-runnable mock implementations of the
//! collaborator traits so game-loop tests need no external services.

pub mod mock_backend;
pub mod mock_lookup;

pub use mock_backend::MockBackend;
pub use mock_lookup::MockLookup;
