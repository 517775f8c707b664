// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Defaults loaded from environment variables.

use plan_lite_geometry::DEFAULT_FLOOR_HEIGHT;
use std::path::PathBuf;

/// Renderer defaults; command-line flags override these.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Pixels per foot for 2D output.
    pub scale: f64,
    /// 2D zoom factor.
    pub zoom: f64,
    /// Storey height in feet for 3D output.
    pub floor_height: f64,
    /// Directory output files are written to when no explicit path is given.
    pub output_dir: PathBuf,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Config::from_env`], reading variables through `lookup`
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let positive = |key: &str, default: f64| {
            lookup(key)
                .and_then(|v| v.trim().parse::<f64>().ok())
                .filter(|v| v.is_finite() && *v > 0.0)
                .unwrap_or(default)
        };

        Self {
            scale: positive("PLAN_SCALE", plan_lite_svg::style::DEFAULT_SCALE),
            zoom: positive("PLAN_ZOOM", 1.0),
            floor_height: positive("PLAN_FLOOR_HEIGHT", DEFAULT_FLOOR_HEIGHT),
            output_dir: lookup("PLAN_OUTPUT_DIR")
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".")),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
