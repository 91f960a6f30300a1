// SPDX-FileCopyrightText: 2026 Odyssey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! JPL Small-Body Database lookup backend for the Odyssey game framework.
//!
//! Implements [`odyssey_core::SmallBodyLookup`] against the public SBDB API,
//! with a catalog of fictional mission-critical objects checked first and a
//! heuristic that skips queries for descriptive phrases the API cannot
//! resolve. All transport failures degrade to `Ok(None)` so a lookup can
//! never wedge the game loop.

pub mod sbdb;

pub use sbdb::SbdbLookup;
