// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Volumetric wall construction
//!
//! Every run of a segmented wall becomes one or more boxes placed in a
//! [`WallFrame`]: `along` is the offset from the wall's start corner, `across`
//! the signed distance from the wall centre line (positive into the room).

use crate::extrusion::{extrude_profile, make_box};
use crate::mesh::Mesh;
use crate::profile::create_aligned_rectangle;
use crate::scene::{PartKind, RoomScene};
use nalgebra::{Matrix4, Point2, Point3, Vector2, Vector3};
use plan_lite_core::{Room, RunKind, Side, WallRun};

pub const DOOR_HEIGHT: f64 = 7.0;
pub const WINDOW_SILL_HEIGHT: f64 = 3.0;
pub const WINDOW_HEAD_HEIGHT: f64 = 7.0;
pub const RAILING_HEIGHT: f64 = 3.5;

/// Target distance between railing posts (feet)
pub const RAILING_POST_SPACING: f64 = 0.6;

const FRAME_WIDTH: f64 = 0.15;
const FRAME_PROUD: f64 = 0.05;
const PANEL_THICKNESS: f64 = 0.15;
/// Door panels are shown ajar
const PANEL_OPEN_DEGREES: f64 = 30.0;
const SILL_THICKNESS: f64 = 0.15;
const SILL_OVERHANG: f64 = 0.2;
const LINTEL_DEPTH: f64 = 0.3;
const GLASS_THICKNESS: f64 = 0.05;
const POST_SIZE: f64 = 0.15;
const RAIL_SIZE: f64 = 0.12;
const BALUSTER_SIZE: f64 = 0.04;

/// Convert plan coordinates (y grows southwards) to world X/Y (Y north)
#[inline]
pub fn plan_to_world(x: f64, y: f64) -> Point2<f64> {
    Point2::new(x, -y)
}

/// Local placement of one room wall in world space
#[derive(Debug, Clone, Copy)]
pub struct WallFrame {
    pub side: Side,
    /// World position of the wall's start corner
    pub origin: Point2<f64>,
    /// Unit vector along the wall
    pub dir: Vector2<f64>,
    /// Unit vector from the wall into the room
    pub inward: Vector2<f64>,
    pub length: f64,
    /// Elevation of the floor the wall stands on
    pub base_z: f64,
}

impl WallFrame {
    pub fn new(room: &Room, side: Side, base_z: f64) -> Self {
        let (x0, y0) = match side {
            Side::Top | Side::Left => (room.x, room.y),
            Side::Bottom => (room.x, room.y + room.height),
            Side::Right => (room.x + room.width, room.y),
        };
        let (dx, dy) = if side.is_horizontal() { (1.0, 0.0) } else { (0.0, 1.0) };
        let (ix, iy) = side.inward();

        Self {
            side,
            origin: plan_to_world(x0, y0),
            dir: Vector2::new(dx, -dy),
            inward: Vector2::new(ix, -iy),
            length: room.wall_length(side),
            base_z,
        }
    }

    #[inline]
    pub fn point(&self, along: f64, across: f64) -> Point2<f64> {
        self.origin + self.dir * along + self.inward * across
    }

    /// Axis-aligned box spanning `[start, end]` along the wall, `[a0, a1]`
    /// across it and `[z0, z1]` above the floor
    pub fn slab(&self, (start, end): (f64, f64), (a0, a1): (f64, f64), (z0, z1): (f64, f64)) -> Option<Mesh> {
        let p = self.point(start, a0);
        let q = self.point(end, a1);
        let min = Point3::new(p.x.min(q.x), p.y.min(q.y), self.base_z + z0);
        let max = Point3::new(p.x.max(q.x), p.y.max(q.y), self.base_z + z1);

        match make_box(min, max) {
            Ok(mesh) => Some(mesh),
            Err(e) => {
                tracing::debug!(side = ?self.side, start, end, z0, z1, error = %e, "skipping degenerate box");
                None
            }
        }
    }

    /// Box centred on the wall line
    #[inline]
    pub fn centred(&self, span: (f64, f64), thickness: f64, heights: (f64, f64)) -> Option<Mesh> {
        self.slab(span, (-thickness / 2.0, thickness / 2.0), heights)
    }
}

/// Per-wall construction parameters
#[derive(Debug, Clone, Copy)]
pub struct WallStyle {
    pub thickness: f64,
    pub height: f64,
    /// Run kind for solid wall volume
    pub kind: PartKind,
}

/// Solid wall volume
///
/// `corner_extension` lengthens the run past the wall's start and/or end
/// corner (feet), filling the square left where it meets an exterior wall.
pub fn build_solid(
    frame: &WallFrame,
    run: &WallRun,
    style: &WallStyle,
    corner_extension: (f64, f64),
    scene: &mut RoomScene,
) {
    let mut start = run.start;
    let mut end = run.end;
    if start <= 0.0 {
        start -= corner_extension.0;
    }
    if end >= frame.length {
        end += corner_extension.1;
    }

    scene.push(style.kind, frame.centred((start, end), style.thickness, (0.0, style.height)));
}

/// Door cut-out: wall above, frame, and a panel swung part open
pub fn build_door(frame: &WallFrame, run: &WallRun, style: &WallStyle, scene: &mut RoomScene) {
    let RunKind::Door { swings_outward, .. } = run.kind else {
        return;
    };
    let height = style.height;
    let door_h = DOOR_HEIGHT.min(height);
    let span = (run.start, run.end);
    let t = style.thickness;

    if door_h < height {
        scene.push(style.kind, frame.centred(span, t, (door_h, height)));
    }

    let jamb_t = t + FRAME_PROUD * 2.0;
    let frame_w = FRAME_WIDTH.min(run.len() / 4.0);
    scene.push(
        PartKind::DoorFrame,
        frame.centred((run.start, run.start + frame_w), jamb_t, (0.0, door_h)),
    );
    scene.push(
        PartKind::DoorFrame,
        frame.centred((run.end - frame_w, run.end), jamb_t, (0.0, door_h)),
    );
    scene.push(
        PartKind::DoorFrame,
        frame.centred(span, jamb_t, ((door_h - frame_w).max(0.0), door_h)),
    );

    let leaf = run.len() - frame_w * 2.0;
    let leaf_h = door_h - frame_w;
    scene.push(
        PartKind::DoorPanel,
        door_panel(frame, run.start + frame_w, leaf, leaf_h, t, swings_outward),
    );
}

/// Panel hinged at `hinge_along`, rotated about Z towards the side it swings into
fn door_panel(
    frame: &WallFrame,
    hinge_along: f64,
    leaf: f64,
    height: f64,
    wall_thickness: f64,
    swings_outward: bool,
) -> Option<Mesh> {
    if leaf <= 0.0 || height <= 0.0 {
        return None;
    }

    let swing = if swings_outward { -frame.inward } else { frame.inward };
    let hinge = frame.point(hinge_along, 0.0) + swing * (wall_thickness / 2.0);
    let turn = frame.dir.perp(&swing).signum() * PANEL_OPEN_DEGREES.to_radians();
    let angle = frame.dir.y.atan2(frame.dir.x) + turn;

    let profile = create_aligned_rectangle(
        Point2::new(0.0, -PANEL_THICKNESS / 2.0),
        Point2::new(leaf, PANEL_THICKNESS / 2.0),
    );
    let transform = Matrix4::new_translation(&Vector3::new(hinge.x, hinge.y, frame.base_z))
        * Matrix4::new_rotation(Vector3::z() * angle);

    extrude_profile(&profile, height, Some(transform))
        .map_err(|e| tracing::debug!(error = %e, "skipping door panel"))
        .ok()
}

/// Window cut-out: wall below and above, sill, lintel and a glazing pane
pub fn build_window(frame: &WallFrame, run: &WallRun, style: &WallStyle, scene: &mut RoomScene) {
    let height = style.height;
    let sill = WINDOW_SILL_HEIGHT.min(height);
    let head = WINDOW_HEAD_HEIGHT.min(height).max(sill);
    let span = (run.start, run.end);
    let t = style.thickness;

    scene.push(style.kind, frame.centred(span, t, (0.0, sill)));
    if head < height {
        scene.push(style.kind, frame.centred(span, t, (head, height)));
    }

    let wide = (run.start - SILL_OVERHANG, run.end + SILL_OVERHANG);
    scene.push(
        PartKind::WindowSill,
        frame.centred(wide, t + SILL_OVERHANG, ((sill - SILL_THICKNESS).max(0.0), sill)),
    );
    scene.push(
        PartKind::WindowLintel,
        frame.centred(wide, t + FRAME_PROUD * 2.0, (head, (head + LINTEL_DEPTH).min(height))),
    );
    scene.push(PartKind::WindowGlass, frame.centred(span, GLASS_THICKNESS, (sill, head)));
}

/// Open railing along an exterior edge of a balcony or garden
pub fn build_railing(frame: &WallFrame, run: &WallRun, height: f64, scene: &mut RoomScene) {
    let top = RAILING_HEIGHT.min(height);
    let gaps = (run.len() / RAILING_POST_SPACING).ceil().max(1.0) as usize;
    let step = run.len() / gaps as f64;
    let half = POST_SIZE / 2.0;

    for i in 0..=gaps {
        let at = run.start + step * i as f64;
        let span = ((at - half).max(run.start), (at + half).min(run.end));
        scene.push(PartKind::RailingPost, frame.centred(span, POST_SIZE, (0.0, top)));

        if i < gaps {
            let mid = at + step / 2.0;
            let span = (mid - BALUSTER_SIZE / 2.0, mid + BALUSTER_SIZE / 2.0);
            scene.push(
                PartKind::RailingBaluster,
                frame.centred(span, BALUSTER_SIZE, (0.0, top - RAIL_SIZE)),
            );
        }
    }

    let span = (run.start, run.end);
    scene.push(PartKind::RailingRail, frame.centred(span, RAIL_SIZE, (top - RAIL_SIZE, top)));
    let mid = top / 2.0;
    scene.push(
        PartKind::RailingRail,
        frame.centred(span, RAIL_SIZE, (mid - RAIL_SIZE / 2.0, mid + RAIL_SIZE / 2.0)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use plan_lite_core::RoomType;

    fn room() -> Room {
        Room::new("r", RoomType::Bedroom, 2.0, 3.0, 10.0, 8.0)
    }

    #[test]
    fn test_frames_start_at_wall_corner() {
        let r = room();
        let top = WallFrame::new(&r, Side::Top, 0.0);
        assert_eq!(top.point(0.0, 0.0), Point2::new(2.0, -3.0));
        assert_eq!(top.point(10.0, 0.0), Point2::new(12.0, -3.0));

        let right = WallFrame::new(&r, Side::Right, 0.0);
        assert_eq!(right.point(8.0, 0.0), Point2::new(12.0, -11.0));
        // inward from the right wall points west
        assert_eq!(right.point(0.0, 1.0), Point2::new(11.0, -3.0));

        let bottom = WallFrame::new(&r, Side::Bottom, 0.0);
        // inward from the bottom wall points north (+Y in world)
        assert_eq!(bottom.point(0.0, 1.0), Point2::new(2.0, -10.0));
    }

    #[test]
    fn test_slab_is_axis_aligned() {
        let frame = WallFrame::new(&room(), Side::Left, 10.0);
        let mesh = frame.centred((1.0, 3.0), 0.5, (0.0, 4.0)).unwrap();
        let (min, max) = mesh.bounds();

        assert_relative_eq!(min.x, 1.75);
        assert_relative_eq!(max.x, 2.25);
        assert_relative_eq!(min.y, -6.0);
        assert_relative_eq!(max.y, -4.0);
        assert_relative_eq!(min.z, 10.0);
        assert_relative_eq!(max.z, 14.0);
    }

    #[test]
    fn test_degenerate_slab_is_skipped() {
        let frame = WallFrame::new(&room(), Side::Top, 0.0);
        assert!(frame.centred((2.0, 2.0), 0.5, (0.0, 4.0)).is_none());
        assert!(frame.centred((2.0, 3.0), 0.5, (4.0, 4.0)).is_none());
    }

    #[test]
    fn test_door_panel_swings_into_room() {
        let frame = WallFrame::new(&room(), Side::Top, 0.0);
        let inward = door_panel(&frame, 4.0, 3.0, 7.0, 0.5, false).unwrap();
        let outward = door_panel(&frame, 4.0, 3.0, 7.0, 0.5, true).unwrap();

        // top wall at world y = -3, room lies to the south (-Y)
        let (min, _) = inward.bounds();
        assert!(min.y < -3.0 - 1.0);
        let (_, max) = outward.bounds();
        assert!(max.y > -3.0 + 1.0);
    }
}
