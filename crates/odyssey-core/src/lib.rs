// SPDX-FileCopyrightText: 2026 Odyssey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Odyssey game framework.
//!
//! This crate provides the foundational trait definitions, error types, and
//! domain types used throughout the Odyssey workspace. Collaborator
//! implementations (generative backend, persistence, data lookup) implement
//! traits defined here.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::OdysseyError;
pub use types::{
    AssetKind, CaptainLogEntry, CommandAction, CommandParams, ConversationEntry, Hotspot,
    ImageData, InterpretedCommand, InterpretedData, MissionStep, PlayerAsset, Role, Ship, User,
};

// Re-export the collaborator traits at crate root.
pub use traits::{GenerativeBackend, PersistenceBackend, SmallBodyLookup};
