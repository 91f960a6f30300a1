// SPDX-FileCopyrightText: 2026 Odyssey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed query modules, one per table group.

pub mod assets;
pub mod logs;
pub mod missions;
pub mod ships;
pub mod users;
