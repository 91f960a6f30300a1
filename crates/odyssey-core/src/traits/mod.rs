// SPDX-FileCopyrightText: 2026 Odyssey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Collaborator traits consumed by the game core.

pub mod generative;
pub mod lookup;
pub mod persistence;

pub use generative::GenerativeBackend;
pub use lookup::SmallBodyLookup;
pub use persistence::PersistenceBackend;
