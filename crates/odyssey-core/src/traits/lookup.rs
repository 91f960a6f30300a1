// SPDX-FileCopyrightText: 2026 Odyssey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! External astronomical data lookup trait, used only by the
//! `INTERPRET_DATA` workflow.

use async_trait::async_trait;

use crate::error::OdysseyError;

/// Adapter for the external small-body data lookup.
#[async_trait]
pub trait SmallBodyLookup: Send + Sync {
    /// Looks up raw data for a celestial object by name.
    ///
    /// `Ok(None)` means "no data found" — including transport failures,
    /// which implementations degrade to `None` after their retries so a
    /// lookup can never wedge the game loop. `Err` is reserved for
    /// misconfiguration.
    async fn lookup(&self, object_name: &str) -> Result<Option<String>, OdysseyError>;
}
