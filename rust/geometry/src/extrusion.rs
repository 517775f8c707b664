// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Extrusion operations - converting 2D profiles to 3D meshes

use crate::error::{Error, Result};
use crate::mesh::Mesh;
use crate::profile::{create_aligned_rectangle, Profile2D, Triangulation};
use nalgebra::{Matrix4, Point2, Point3, Vector3};

/// Extrude a 2D profile along the Z axis from `z = 0` to `z = depth`
pub fn extrude_profile(
    profile: &Profile2D,
    depth: f64,
    transform: Option<Matrix4<f64>>,
) -> Result<Mesh> {
    if !(depth.is_finite() && depth > 0.0) {
        return Err(Error::InvalidExtrusion(format!(
            "Depth must be positive, got {depth}"
        )));
    }

    let triangulation = profile.triangulate()?;

    let n = profile.outer.len();
    let mut mesh = Mesh::with_capacity(n * 2 + n * 4, triangulation.indices.len() * 2 + n * 6);

    create_cap_mesh(&triangulation, 0.0, false, &mut mesh);
    create_cap_mesh(&triangulation, depth, true, &mut mesh);
    create_side_walls(&profile.outer, depth, &mut mesh);

    if let Some(mat) = transform {
        apply_transform(&mut mesh, &mat);
    }

    Ok(mesh)
}

/// Axis-aligned box between two opposite corners
pub fn make_box(min: Point3<f64>, max: Point3<f64>) -> Result<Mesh> {
    let size = max - min;
    if !(size.x > 0.0 && size.y > 0.0) {
        return Err(Error::InvalidProfile(format!(
            "Box footprint must be positive, got {:.3} x {:.3}",
            size.x, size.y
        )));
    }

    let profile = create_aligned_rectangle(Point2::new(min.x, min.y), Point2::new(max.x, max.y));
    let transform = Matrix4::new_translation(&Vector3::new(0.0, 0.0, min.z));
    extrude_profile(&profile, max.z - min.z, Some(transform))
}

/// Create a cap mesh (top or bottom) from triangulation
///
/// Triangles are wound so the face normal points along +Z for the top cap
/// and -Z for the bottom, whatever order earcut emitted them in.
fn create_cap_mesh(triangulation: &Triangulation, z: f64, top: bool, mesh: &mut Mesh) {
    let base_index = mesh.vertex_count() as u32;
    let normal = if top { Vector3::z() } else { -Vector3::z() };

    for point in &triangulation.points {
        mesh.add_vertex(Point3::new(point.x, point.y, z), normal);
    }

    for tri in triangulation.indices.chunks_exact(3) {
        let (a, b, c) = (
            triangulation.points[tri[0]],
            triangulation.points[tri[1]],
            triangulation.points[tri[2]],
        );
        let ccw = (b - a).perp(&(c - a)) > 0.0;

        let i0 = base_index + tri[0] as u32;
        let i1 = base_index + tri[1] as u32;
        let i2 = base_index + tri[2] as u32;

        if ccw == top {
            mesh.add_triangle(i0, i1, i2);
        } else {
            mesh.add_triangle(i0, i2, i1);
        }
    }
}

/// Create side walls for a counter-clockwise profile boundary
fn create_side_walls(boundary: &[Point2<f64>], depth: f64, mesh: &mut Mesh) {
    for i in 0..boundary.len() {
        let p0 = boundary[i];
        let p1 = boundary[(i + 1) % boundary.len()];

        // outward for a counter-clockwise boundary
        let edge = p1 - p0;
        let normal = match Vector3::new(edge.y, -edge.x, 0.0).try_normalize(1e-10) {
            Some(n) => n,
            None => continue,
        };

        let idx = mesh.vertex_count() as u32;
        mesh.add_vertex(Point3::new(p0.x, p0.y, 0.0), normal);
        mesh.add_vertex(Point3::new(p1.x, p1.y, 0.0), normal);
        mesh.add_vertex(Point3::new(p1.x, p1.y, depth), normal);
        mesh.add_vertex(Point3::new(p0.x, p0.y, depth), normal);

        mesh.add_triangle(idx, idx + 1, idx + 2);
        mesh.add_triangle(idx, idx + 2, idx + 3);
    }
}

/// Apply transformation matrix to mesh
pub fn apply_transform(mesh: &mut Mesh, transform: &Matrix4<f64>) {
    mesh.positions.chunks_exact_mut(3).for_each(|chunk| {
        let point = Point3::new(chunk[0] as f64, chunk[1] as f64, chunk[2] as f64);
        let transformed = transform.transform_point(&point);
        chunk[0] = transformed.x as f32;
        chunk[1] = transformed.y as f32;
        chunk[2] = transformed.z as f32;
    });

    // inverse transpose keeps normals perpendicular under non-uniform scale
    let normal_matrix = transform.try_inverse().unwrap_or(*transform).transpose();

    mesh.normals.chunks_exact_mut(3).for_each(|chunk| {
        let normal = Vector3::new(chunk[0] as f64, chunk[1] as f64, chunk[2] as f64);
        let transformed = (normal_matrix * normal.to_homogeneous())
            .xyz()
            .try_normalize(1e-12)
            .unwrap_or(normal);
        chunk[0] = transformed.x as f32;
        chunk[1] = transformed.y as f32;
        chunk[2] = transformed.z as f32;
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{create_circle, create_rectangle};
    use approx::assert_relative_eq;

    #[test]
    fn test_extrude_rectangle() {
        let profile = create_rectangle(10.0, 5.0);
        let mesh = extrude_profile(&profile, 20.0, None).unwrap();

        // 2 caps of 4 + 4 side quads
        assert_eq!(mesh.vertex_count(), 8 + 16);
        assert_eq!(mesh.triangle_count(), 4 + 8);

        let (min, max) = mesh.bounds();
        assert_relative_eq!(min.x, -5.0);
        assert_relative_eq!(max.x, 5.0);
        assert_relative_eq!(min.y, -2.5);
        assert_relative_eq!(max.y, 2.5);
        assert_relative_eq!(min.z, 0.0);
        assert_relative_eq!(max.z, 20.0);
    }

    #[test]
    fn test_extrude_with_transform() {
        let profile = create_rectangle(10.0, 5.0);
        let transform = Matrix4::new_translation(&Vector3::new(100.0, 200.0, 300.0));
        let mesh = extrude_profile(&profile, 20.0, Some(transform)).unwrap();

        let (min, max) = mesh.bounds();
        assert_relative_eq!(min.x, 95.0);
        assert_relative_eq!(max.y, 202.5);
        assert_relative_eq!(min.z, 300.0);
        assert_relative_eq!(max.z, 320.0);
    }

    #[test]
    fn test_extrude_circle() {
        let mesh = extrude_profile(&create_circle(2.0), 3.0, None).unwrap();
        let (min, max) = mesh.bounds();
        assert_relative_eq!(min.x, -2.0, epsilon = 0.1);
        assert_relative_eq!(max.y, 2.0, epsilon = 0.1);
    }

    #[test]
    fn test_invalid_depth() {
        let profile = create_rectangle(10.0, 5.0);
        assert!(extrude_profile(&profile, -1.0, None).is_err());
        assert!(extrude_profile(&profile, 0.0, None).is_err());
        assert!(extrude_profile(&profile, f64::NAN, None).is_err());
    }

    #[test]
    fn test_make_box() {
        let mesh = make_box(Point3::new(1.0, 2.0, 3.0), Point3::new(4.0, 6.0, 10.0)).unwrap();
        let (min, max) = mesh.bounds();
        assert_eq!(min, Point3::new(1.0, 2.0, 3.0));
        assert_eq!(max, Point3::new(4.0, 6.0, 10.0));
    }

    #[test]
    fn test_flat_box_is_rejected() {
        assert!(make_box(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 0.0)).is_err());
        assert!(make_box(Point3::new(0.0, 0.0, 0.0), Point3::new(0.0, 1.0, 1.0)).is_err());
    }

    #[test]
    fn test_face_normals_point_outward() {
        let mesh = make_box(Point3::new(0.0, 0.0, 0.0), Point3::new(2.0, 2.0, 2.0)).unwrap();
        let p: Vec<_> = mesh.points().collect();

        for tri in mesh.indices.chunks_exact(3) {
            let (a, b, c) = (p[tri[0] as usize], p[tri[1] as usize], p[tri[2] as usize]);
            let face = (b - a).cross(&(c - a));
            let centroid = (a.coords + b.coords + c.coords) / 3.0;
            let from_center = centroid - nalgebra::Vector3::new(1.0f32, 1.0, 1.0);
            assert!(face.dot(&from_center) > 0.0);

            let n = tri[0] as usize * 3;
            let stored = nalgebra::Vector3::new(mesh.normals[n], mesh.normals[n + 1], mesh.normals[n + 2]);
            assert!(stored.dot(&face) > 0.0);
        }
    }
}
