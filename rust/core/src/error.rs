// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for layout intake.
//!
//! Geometry itself never fails: malformed rooms and openings are clipped or
//! skipped. Only decoding the layout document can return an error.

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading a layout.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The layout document is not valid JSON or does not match the schema.
    #[error("invalid layout JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The layout document decoded but holds no usable rooms.
    #[error("layout contains no renderable rooms")]
    EmptyLayout,
}
