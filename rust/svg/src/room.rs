// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-room line art
//!
//! Each room is drawn in its own frame: origin at its top-left corner, feet
//! already multiplied by `scale × zoom`. The caller positions the frame.

use crate::primitive::{Primitive, StrokeClass};
use crate::style::PlanStyle;
use plan_lite_core::{furniture_for, segment_room, Room, RunKind, SegmentedWall, Side, WallRun};

pub const MIN_LABEL_SIZE: f64 = 9.0;
pub const MAX_LABEL_SIZE: f64 = 16.0;

/// Target distance between railing posts in plan view (feet)
const RAILING_POST_SPACING: f64 = 1.5;
/// Gap between the two railing rails (feet)
const RAILING_GAP: f64 = 0.3;
const POST_SIZE: f64 = 0.25;
const WINDOW_TICK: f64 = 0.15;

/// Everything drawn for one room
#[derive(Debug, Clone, PartialEq)]
pub struct RoomDrawing {
    pub room_id: String,
    /// Top-left corner in absolute plan pixels
    pub origin: (f64, f64),
    pub primitives: Vec<Primitive>,
}

impl RoomDrawing {
    pub fn count(&self, class: StrokeClass) -> usize {
        self.primitives.iter().filter(|p| p.class() == class).count()
    }
}

/// Maps wall-local feet to room-local pixels for one side
struct WallPen {
    side: Side,
    k: f64,
    origin: (f64, f64),
    dir: (f64, f64),
    inward: (f64, f64),
}

impl WallPen {
    fn new(room: &Room, side: Side, k: f64) -> Self {
        let origin = match side {
            Side::Top | Side::Left => (0.0, 0.0),
            Side::Bottom => (0.0, room.height * k),
            Side::Right => (room.width * k, 0.0),
        };
        let dir = if side.is_horizontal() { (1.0, 0.0) } else { (0.0, 1.0) };
        Self {
            side,
            k,
            origin,
            dir,
            inward: side.inward(),
        }
    }

    /// `along` in feet, `across` in pixels (positive into the room)
    fn at(&self, along: f64, across: f64) -> (f64, f64) {
        let a = along * self.k;
        (
            self.origin.0 + self.dir.0 * a + self.inward.0 * across,
            self.origin.1 + self.dir.1 * a + self.inward.1 * across,
        )
    }
}

/// Draw one room against the other rooms on its floor
pub fn draw_room(room: &Room, rooms: &[Room], style: &PlanStyle) -> RoomDrawing {
    let k = style.px_per_ft();
    if !room.has_valid_footprint() {
        tracing::debug!(room = %room.id, width = room.width, height = room.height, "skipping room with unusable footprint");
        return RoomDrawing {
            room_id: room.id.clone(),
            origin: (0.0, 0.0),
            primitives: Vec::new(),
        };
    }

    let mut primitives = vec![Primitive::Rect {
        x: 0.0,
        y: 0.0,
        width: room.width * k,
        height: room.height * k,
        class: StrokeClass::RoomFill,
        fill: fill_color(&room.color),
    }];

    draw_furniture(room, k, &mut primitives);

    for wall in segment_room(room, rooms) {
        let pen = WallPen::new(room, wall.side, k);
        draw_wall(&pen, &wall, style, &mut primitives);
    }

    draw_label(room, k, &mut primitives);

    RoomDrawing {
        room_id: room.id.clone(),
        origin: (room.x * k, room.y * k),
        primitives,
    }
}

fn draw_wall(pen: &WallPen, wall: &SegmentedWall, style: &PlanStyle, out: &mut Vec<Primitive>) {
    for run in wall.rendered_runs() {
        if wall.is_railing(run) {
            draw_railing(pen, run, out);
            continue;
        }

        let (class, thickness) = if run.is_shared() {
            (StrokeClass::InteriorWall, style.interior_stroke())
        } else {
            (StrokeClass::ExteriorWall, style.exterior_stroke())
        };

        match run.kind {
            RunKind::Solid => out.push(Primitive::line(pen.at(run.start, 0.0), pen.at(run.end, 0.0), class)),
            RunKind::Door {
                is_main,
                swings_outward,
            } => draw_door(pen, run, is_main, swings_outward, out),
            RunKind::Window => draw_window(pen, run, thickness, out),
        }
    }
}

/// Leaf drawn fully open at 90° from the near jamb, plus the quarter arc its
/// free end sweeps back to the far jamb
fn draw_door(pen: &WallPen, run: &WallRun, is_main: bool, swings_outward: bool, out: &mut Vec<Primitive>) {
    let radius = run.len() * pen.k;
    let sign = if swings_outward { -1.0 } else { 1.0 };

    let hinge = pen.at(run.start, 0.0);
    let leaf_tip = pen.at(run.start, sign * radius);
    let far_jamb = pen.at(run.end, 0.0);

    let a = (leaf_tip.0 - hinge.0, leaf_tip.1 - hinge.1);
    let b = (far_jamb.0 - hinge.0, far_jamb.1 - hinge.1);
    let sweep = a.0 * b.1 - a.1 * b.0 > 0.0;

    out.push(Primitive::line(hinge, leaf_tip, StrokeClass::DoorLeaf));
    out.push(Primitive::Arc {
        from: leaf_tip,
        to: far_jamb,
        radius,
        sweep,
        class: if is_main {
            StrokeClass::MainDoorSwing
        } else {
            StrokeClass::DoorSwing
        },
    });
}

/// Both wall faces across the opening, closed by a tick at each end
fn draw_window(pen: &WallPen, run: &WallRun, thickness: f64, out: &mut Vec<Primitive>) {
    let half = thickness / 2.0;
    for across in [-half, half] {
        out.push(Primitive::line(
            pen.at(run.start, across),
            pen.at(run.end, across),
            StrokeClass::Window,
        ));
    }

    let tick = half + WINDOW_TICK * pen.k;
    for along in [run.start, run.end] {
        out.push(Primitive::line(
            pen.at(along, -tick),
            pen.at(along, tick),
            StrokeClass::Window,
        ));
    }
}

fn draw_railing(pen: &WallPen, run: &WallRun, out: &mut Vec<Primitive>) {
    let gap = RAILING_GAP * pen.k;
    for across in [0.0, gap] {
        out.push(Primitive::line(
            pen.at(run.start, across),
            pen.at(run.end, across),
            StrokeClass::Railing,
        ));
    }

    let posts = (run.len() / RAILING_POST_SPACING).ceil().max(1.0) as usize;
    let step = run.len() / posts as f64;
    let size = POST_SIZE * pen.k;
    for i in 0..=posts {
        let (cx, cy) = pen.at(run.start + step * i as f64, gap / 2.0);
        out.push(Primitive::Rect {
            x: cx - size / 2.0,
            y: cy - size / 2.0,
            width: size,
            height: size,
            class: StrokeClass::RailingPost,
            fill: None,
        });
    }

    tracing::trace!(side = ?pen.side, posts = posts + 1, "railing drawn");
}

fn draw_furniture(room: &Room, k: f64, out: &mut Vec<Primitive>) {
    for item in furniture_for(room.room_type) {
        let x = item.x * room.width * k;
        let y = item.y * room.height * k;
        let w = item.width * room.width * k;
        let d = item.depth * room.height * k;

        out.push(if item.kind.is_round() {
            Primitive::Circle {
                cx: x + w / 2.0,
                cy: y + d / 2.0,
                r: w.min(d) / 2.0,
                class: StrokeClass::Furniture,
            }
        } else {
            Primitive::Rect {
                x,
                y,
                width: w,
                height: d,
                class: StrokeClass::Furniture,
                fill: None,
            }
        });
    }
}

/// Label font size in pixels: grows with the drawn room width, clamped
pub fn label_size(width_px: f64) -> f64 {
    (width_px / 8.0).clamp(MIN_LABEL_SIZE, MAX_LABEL_SIZE)
}

fn draw_label(room: &Room, k: f64, out: &mut Vec<Primitive>) {
    let size = label_size(room.width * k);
    let (cx, cy) = (room.width * k / 2.0, room.height * k / 2.0);
    let name = if room.name.trim().is_empty() {
        room.id.clone()
    } else {
        room.name.clone()
    };

    out.push(Primitive::Text {
        x: cx,
        y: cy - size * 0.6,
        size,
        content: name,
        class: StrokeClass::Label,
    });
    out.push(Primitive::Text {
        x: cx,
        y: cy + size * 0.6,
        size: (size * 0.75).max(MIN_LABEL_SIZE),
        content: format!("{}' × {}'", trim_feet(room.width), trim_feet(room.height)),
        class: StrokeClass::Dimension,
    });
}

/// `12` for whole feet, `12.5` otherwise
fn trim_feet(ft: f64) -> String {
    let rounded = (ft * 10.0).round() / 10.0;
    if rounded.fract() == 0.0 {
        format!("{rounded:.0}")
    } else {
        format!("{rounded:.1}")
    }
}

/// Accept only plain colour tokens (`#a1b2c3`, `lightblue`) as fill overrides
fn fill_color(color: &str) -> Option<String> {
    let color = color.trim();
    let valid = !color.is_empty()
        && color.len() <= 32
        && color.chars().all(|c| c.is_ascii_alphanumeric() || c == '#');
    valid.then(|| color.to_string())
}
