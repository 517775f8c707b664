// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Feet → pixel scaling and stroke widths

use crate::error::{Error, Result};
use plan_lite_core::{GeneratedLayout, DEFAULT_WALL_THICKNESS};

pub const DEFAULT_SCALE: f64 = 20.0;

/// Exterior walls are drawn this much thicker than interior ones
pub const EXTERIOR_STROKE_RATIO: f64 = 1.5;

/// Rendering parameters for the 2D plan
#[derive(Debug, Clone, PartialEq)]
pub struct PlanStyle {
    /// Pixels per foot at zoom 1
    pub scale: f64,
    pub zoom: f64,
    /// Interior wall thickness in feet
    pub wall_thickness: f64,
}

impl Default for PlanStyle {
    fn default() -> Self {
        Self {
            scale: DEFAULT_SCALE,
            zoom: 1.0,
            wall_thickness: DEFAULT_WALL_THICKNESS,
        }
    }
}

impl PlanStyle {
    pub fn for_layout(layout: &GeneratedLayout) -> Self {
        Self {
            wall_thickness: layout.effective_wall_thickness(),
            ..Self::default()
        }
    }

    #[inline]
    pub fn px_per_ft(&self) -> f64 {
        self.scale * self.zoom
    }

    #[inline]
    pub fn interior_stroke(&self) -> f64 {
        self.wall_thickness * self.px_per_ft()
    }

    #[inline]
    pub fn exterior_stroke(&self) -> f64 {
        self.interior_stroke() * EXTERIOR_STROKE_RATIO
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("scale", self.scale),
            ("zoom", self.zoom),
            ("wall_thickness", self.wall_thickness),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(Error::InvalidStyle(format!("{name} must be positive, got {value}")));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strokes_scale_with_zoom() {
        let style = PlanStyle {
            scale: 10.0,
            zoom: 2.0,
            wall_thickness: 0.5,
        };
        assert_eq!(style.px_per_ft(), 20.0);
        assert_eq!(style.interior_stroke(), 10.0);
        assert_eq!(style.exterior_stroke(), 15.0);
    }

    #[test]
    fn test_validate() {
        assert!(PlanStyle::default().validate().is_ok());
        let bad = PlanStyle {
            zoom: 0.0,
            ..PlanStyle::default()
        };
        assert!(matches!(bad.validate(), Err(Error::InvalidStyle(_))));
        let bad = PlanStyle {
            scale: f64::NAN,
            ..PlanStyle::default()
        };
        assert!(bad.validate().is_err());
    }
}
