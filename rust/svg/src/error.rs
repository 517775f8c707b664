// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for plan rendering
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Floor {0} has no rooms")]
    EmptyFloor(u32),

    #[error("Invalid plan style: {0}")]
    InvalidStyle(String),

    #[error("Failed to write SVG: {0}")]
    Write(#[from] std::fmt::Error),
}
