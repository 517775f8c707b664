// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Furniture blocks from the shared room-type table

use crate::extrusion::{extrude_profile, make_box};
use crate::mesh::Mesh;
use crate::profile::create_circle;
use crate::scene::{PartKind, RoomScene};
use crate::walls::plan_to_world;
use nalgebra::{Matrix4, Point3, Vector3};
use plan_lite_core::{furniture_for, FurnitureItem, Room};

/// Add one block (or cylinder, for round kinds) per furniture item
pub fn furnish(room: &Room, base_z: f64, ceiling: f64, scene: &mut RoomScene) {
    for item in furniture_for(room.room_type) {
        scene.push(PartKind::Furniture(item.kind), furniture_mesh(room, item, base_z, ceiling));
    }
}

fn furniture_mesh(room: &Room, item: &FurnitureItem, base_z: f64, ceiling: f64) -> Option<Mesh> {
    let x0 = room.x + item.x * room.width;
    let y0 = room.y + item.y * room.height;
    let w = item.width * room.width;
    let d = item.depth * room.height;
    let h = item.height.min(ceiling);

    let a = plan_to_world(x0, y0);
    let b = plan_to_world(x0 + w, y0 + d);

    let mesh = if item.kind.is_round() {
        let center = nalgebra::center(&a, &b);
        let transform = Matrix4::new_translation(&Vector3::new(center.x, center.y, base_z));
        extrude_profile(&create_circle(w.min(d) / 2.0), h, Some(transform))
    } else {
        make_box(
            Point3::new(a.x.min(b.x), a.y.min(b.y), base_z),
            Point3::new(a.x.max(b.x), a.y.max(b.y), base_z + h),
        )
    };

    mesh.map_err(|e| tracing::debug!(kind = ?item.kind, error = %e, "skipping furniture"))
        .ok()
}
