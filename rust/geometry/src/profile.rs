// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! 2D footprints and their triangulation

use crate::error::{Error, Result};
use nalgebra::Point2;

/// Closed 2D outline in the plan (X/Y) plane
#[derive(Debug, Clone, PartialEq)]
pub struct Profile2D {
    /// Outer boundary (counter-clockwise)
    pub outer: Vec<Point2<f64>>,
}

impl Profile2D {
    /// Create a new profile, reversing clockwise input so the outline is
    /// always counter-clockwise
    pub fn new(outer: Vec<Point2<f64>>) -> Self {
        let mut profile = Self { outer };
        if profile.signed_area() < 0.0 {
            profile.outer.reverse();
        }
        profile
    }

    /// Shoelace area, positive for counter-clockwise outlines
    pub fn signed_area(&self) -> f64 {
        let n = self.outer.len();
        (0..n)
            .map(|i| {
                let (a, b) = (self.outer[i], self.outer[(i + 1) % n]);
                a.x * b.y - b.x * a.y
            })
            .sum::<f64>()
            / 2.0
    }

    /// Triangulate the profile using earcutr
    /// Returns triangle indices into `outer`
    pub fn triangulate(&self) -> Result<Triangulation> {
        if self.outer.len() < 3 {
            return Err(Error::InvalidProfile(
                "Profile must have at least 3 vertices".to_string(),
            ));
        }

        let vertices: Vec<f64> = self.outer.iter().flat_map(|p| [p.x, p.y]).collect();
        let indices = earcutr::earcut(&vertices, &[], 2)
            .map_err(|e| Error::TriangulationError(format!("{:?}", e)))?;

        if indices.is_empty() {
            return Err(Error::TriangulationError(
                "Degenerate profile produced no triangles".to_string(),
            ));
        }

        Ok(Triangulation {
            points: self.outer.clone(),
            indices,
        })
    }
}

/// Triangulated profile result
#[derive(Debug, Clone)]
pub struct Triangulation {
    pub points: Vec<Point2<f64>>,
    /// Triangle indices into `points`
    pub indices: Vec<usize>,
}

/// Create a rectangular profile centred on the origin
#[inline]
pub fn create_rectangle(width: f64, height: f64) -> Profile2D {
    let half_w = width / 2.0;
    let half_h = height / 2.0;
    create_aligned_rectangle(Point2::new(-half_w, -half_h), Point2::new(half_w, half_h))
}

/// Create an axis-aligned rectangle spanning two opposite corners
pub fn create_aligned_rectangle(min: Point2<f64>, max: Point2<f64>) -> Profile2D {
    Profile2D::new(vec![
        Point2::new(min.x, min.y),
        Point2::new(max.x, min.y),
        Point2::new(max.x, max.y),
        Point2::new(min.x, max.y),
    ])
}

/// Create a circular profile centred on the origin
pub fn create_circle(radius: f64) -> Profile2D {
    let segments = calculate_circle_segments(radius);

    let outer = (0..segments)
        .map(|i| {
            let angle = 2.0 * std::f64::consts::PI * (i as f64) / (segments as f64);
            Point2::new(radius * angle.cos(), radius * angle.sin())
        })
        .collect();

    Profile2D::new(outer)
}

/// Adaptive number of segments for a circle of the given radius (feet)
#[inline]
pub fn calculate_circle_segments(radius: f64) -> usize {
    let segments = (radius.max(0.0).sqrt() * 12.0).ceil() as usize;
    segments.clamp(12, 32)
}
