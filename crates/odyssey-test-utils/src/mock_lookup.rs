// SPDX-FileCopyrightText: 2026 Odyssey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock small-body lookup with a configurable name-to-data map.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use odyssey_core::{OdysseyError, SmallBodyLookup};

/// Lookup stub. Unknown names resolve to `Ok(None)`, matching the degraded
/// behavior of the real backend.
#[derive(Default)]
pub struct MockLookup {
    entries: HashMap<String, String>,
    /// Number of lookups performed.
    pub calls: AtomicUsize,
}

impl MockLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-loads a lookup result. Keys are matched case-insensitively.
    pub fn with_entry(mut self, name: impl Into<String>, data: impl Into<String>) -> Self {
        self.entries.insert(name.into().to_lowercase(), data.into());
        self
    }
}

#[async_trait]
impl SmallBodyLookup for MockLookup {
    async fn lookup(&self, object_name: &str) -> Result<Option<String>, OdysseyError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.entries.get(&object_name.to_lowercase()).cloned())
    }
}
