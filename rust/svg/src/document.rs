// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Whole-floor SVG documents

use crate::error::{Error, Result};
use crate::primitive::escape;
use crate::room::{draw_room, RoomDrawing};
use crate::style::PlanStyle;
use plan_lite_core::GeneratedLayout;
use std::fmt::Write;

/// Blank border around the drawn rooms (feet)
const MARGIN_FT: f64 = 2.0;

/// Draw every room on a floor, in input order
pub fn draw_floor(layout: &GeneratedLayout, floor: u32, style: &PlanStyle) -> Result<Vec<RoomDrawing>> {
    style.validate()?;
    let rooms = layout.rooms_on_floor(floor);
    if rooms.is_empty() {
        return Err(Error::EmptyFloor(floor));
    }

    Ok(rooms.iter().map(|room| draw_room(room, &rooms, style)).collect())
}

/// Render one floor as a standalone SVG document
pub fn render_floor_svg(layout: &GeneratedLayout, floor: u32, style: &PlanStyle) -> Result<String> {
    let drawings = draw_floor(layout, floor, style)?;
    let rooms = layout.rooms_on_floor(floor);
    let k = style.px_per_ft();

    let (min_x, min_y, max_x, max_y) = rooms
        .iter()
        .filter(|r| r.has_valid_footprint())
        .map(|r| (r.x, r.y, r.x + r.width, r.y + r.height))
        .reduce(|a, b| (a.0.min(b.0), a.1.min(b.1), a.2.max(b.2), a.3.max(b.3)))
        .unwrap_or_default();

    let margin = MARGIN_FT * k;
    let width = (max_x - min_x) * k + margin * 2.0;
    let height = (max_y - min_y) * k + margin * 2.0;
    let shift = (margin - min_x * k, margin - min_y * k);

    let mut svg = String::new();
    writeln!(svg, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
    writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width:.0}" height="{height:.0}" viewBox="0 0 {width:.2} {height:.2}">"#
    )?;
    writeln!(svg, "<title>Floor {floor}</title>")?;
    write_styles(&mut svg, style)?;
    writeln!(svg, r#"<rect width="100%" height="100%" class="paper"/>"#)?;

    for drawing in drawings.iter().filter(|d| !d.primitives.is_empty()) {
        let (ox, oy) = (drawing.origin.0 + shift.0, drawing.origin.1 + shift.1);
        writeln!(
            svg,
            r#"<g id="room-{}" transform="translate({ox:.2},{oy:.2})">"#,
            escape(&drawing.room_id)
        )?;
        for primitive in &drawing.primitives {
            primitive.write_svg(&mut svg)?;
        }
        writeln!(svg, "</g>")?;
    }

    writeln!(svg, "</svg>")?;

    tracing::debug!(
        floor,
        rooms = drawings.len(),
        primitives = drawings.iter().map(|d| d.primitives.len()).sum::<usize>(),
        bytes = svg.len(),
        "floor plan rendered"
    );
    Ok(svg)
}

fn write_styles(svg: &mut String, style: &PlanStyle) -> std::fmt::Result {
    let k = style.px_per_ft();
    let ext = style.exterior_stroke();
    let int = style.interior_stroke();
    let fine = (0.05 * k).max(0.75);

    writeln!(
        svg,
        r#"<defs>
  <style>
    .paper {{ fill: #ffffff; }}
    .room {{ fill: #f7f4ee; stroke: none; }}
    .wall-ext {{ stroke: #1f2933; stroke-width: {ext:.2}; stroke-linecap: square; }}
    .wall-int {{ stroke: #3e4c59; stroke-width: {int:.2}; stroke-linecap: butt; }}
    .door-leaf {{ stroke: #52606d; stroke-width: {fine:.2}; }}
    .door-swing {{ fill: none; stroke: #7b8794; stroke-width: {fine:.2}; stroke-dasharray: 4,3; }}
    .door-swing.main {{ stroke: #b44d12; stroke-dasharray: none; }}
    .window {{ stroke: #2680c2; stroke-width: {fine:.2}; }}
    .railing {{ stroke: #616e7c; stroke-width: {fine:.2}; }}
    .railing-post {{ fill: #616e7c; stroke: none; }}
    .furniture {{ fill: none; stroke: #9aa5b1; stroke-width: {fine:.2}; }}
    .label {{ font-family: sans-serif; font-weight: bold; fill: #1f2933; }}
    .dimension {{ font-family: sans-serif; fill: #616e7c; }}
  </style>
</defs>"#
    )
}
