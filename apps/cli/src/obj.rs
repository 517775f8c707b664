// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wavefront OBJ/MTL export of built scenes.

use plan_lite_geometry::{FloorScene, PartKind};
use std::io::{self, Write};

const GLASS_OPACITY: f32 = 0.35;

/// Write `floors` as one OBJ object per room, one group per part.
///
/// Scene space is Z-up with Y pointing north; OBJ is Y-up, so each vertex is
/// written as `(x, z, -y)`. That mapping is a rotation and keeps winding.
pub fn write_obj<W: Write>(out: &mut W, floors: &[FloorScene], mtl_name: Option<&str>) -> io::Result<()> {
    let room_count: usize = floors.iter().map(|f| f.rooms.len()).sum();
    writeln!(out, "# Generated by plan-lite")?;
    writeln!(out, "# {} floor(s), {} room(s), units: feet", floors.len(), room_count)?;
    writeln!(out, "# Coordinate system: Y-up (OBJ convention)")?;
    if let Some(name) = mtl_name {
        writeln!(out, "mtllib {name}")?;
    }
    writeln!(out)?;

    let mut vertex_offset: u32 = 0;

    for floor in floors {
        writeln!(out, "# Floor {} at {:.2} ft", floor.floor, floor.elevation)?;

        for room in &floor.rooms {
            writeln!(out, "o floor{}_{}", floor.floor, object_name(&room.room_id))?;

            for part in &room.parts {
                let mesh = &part.mesh;
                writeln!(out, "g {}", part.kind.label())?;
                writeln!(out, "usemtl {}", part.kind.label())?;

                for p in mesh.positions.chunks_exact(3) {
                    writeln!(out, "v {:.6} {:.6} {:.6}", p[0], p[2], -p[1])?;
                }
                for n in mesh.normals.chunks_exact(3) {
                    writeln!(out, "vn {:.6} {:.6} {:.6}", n[0], n[2], -n[1])?;
                }
                for t in mesh.indices.chunks_exact(3) {
                    let [a, b, c] = [t[0], t[1], t[2]].map(|i| i + vertex_offset + 1);
                    writeln!(out, "f {a}//{a} {b}//{b} {c}//{c}")?;
                }

                vertex_offset += mesh.vertex_count() as u32;
            }
        }
        writeln!(out)?;
    }

    Ok(())
}

/// Write one material per part kind present in `floors`, in first-use order.
pub fn write_mtl<W: Write>(out: &mut W, floors: &[FloorScene]) -> io::Result<()> {
    writeln!(out, "# Generated by plan-lite")?;

    let mut seen: Vec<&'static str> = Vec::new();
    for kind in floors.iter().flat_map(FloorScene::parts).map(|p| p.kind) {
        let label = kind.label();
        if seen.contains(&label) {
            continue;
        }
        seen.push(label);
        write_material(out, kind)?;
    }
    Ok(())
}

fn write_material<W: Write>(out: &mut W, kind: PartKind) -> io::Result<()> {
    let [r, g, b] = kind.color();
    writeln!(out)?;
    writeln!(out, "newmtl {}", kind.label())?;
    writeln!(out, "Kd {r:.3} {g:.3} {b:.3}")?;
    writeln!(out, "Ka 0.100 0.100 0.100")?;
    if kind.is_transparent() {
        writeln!(out, "d {GLASS_OPACITY:.2}")?;
    }
    Ok(())
}

/// OBJ names end at whitespace
fn object_name(id: &str) -> String {
    id.chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect()
}
