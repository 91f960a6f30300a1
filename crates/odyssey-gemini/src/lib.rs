// SPDX-FileCopyrightText: 2026 Odyssey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gemini generative backend for the Odyssey game framework.
//!
//! Implements [`odyssey_core::GenerativeBackend`] on top of the Gemini REST
//! API: `generateContent` for text, structured JSON, and multimodal image
//! editing; Imagen `predict` for scene images; and Veo `predictLongRunning`
//! for mission-complete videos.

pub mod backend;
pub mod client;
pub mod types;

pub use backend::GeminiBackend;
pub use client::GeminiClient;
