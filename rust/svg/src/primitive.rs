// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Drawing primitives and their SVG serialisation
//!
//! Coordinates are pixels in the owning room's local frame (origin at the
//! room's top-left corner, y down).

use std::fmt::{self, Write};

/// CSS class a primitive is styled by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrokeClass {
    RoomFill,
    ExteriorWall,
    InteriorWall,
    DoorLeaf,
    DoorSwing,
    MainDoorSwing,
    Window,
    Railing,
    RailingPost,
    Furniture,
    Label,
    Dimension,
}

impl StrokeClass {
    pub fn as_str(self) -> &'static str {
        match self {
            StrokeClass::RoomFill => "room",
            StrokeClass::ExteriorWall => "wall-ext",
            StrokeClass::InteriorWall => "wall-int",
            StrokeClass::DoorLeaf => "door-leaf",
            StrokeClass::DoorSwing => "door-swing",
            StrokeClass::MainDoorSwing => "door-swing main",
            StrokeClass::Window => "window",
            StrokeClass::Railing => "railing",
            StrokeClass::RailingPost => "railing-post",
            StrokeClass::Furniture => "furniture",
            StrokeClass::Label => "label",
            StrokeClass::Dimension => "dimension",
        }
    }
}

/// One piece of line art
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        class: StrokeClass,
    },
    /// Circular arc from `from` to `to`; `sweep` follows the SVG sweep-flag
    Arc {
        from: (f64, f64),
        to: (f64, f64),
        radius: f64,
        sweep: bool,
        class: StrokeClass,
    },
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        class: StrokeClass,
        /// Overrides the class fill
        fill: Option<String>,
    },
    Circle {
        cx: f64,
        cy: f64,
        r: f64,
        class: StrokeClass,
    },
    Text {
        x: f64,
        y: f64,
        size: f64,
        content: String,
        class: StrokeClass,
    },
}

impl Primitive {
    pub fn line(from: (f64, f64), to: (f64, f64), class: StrokeClass) -> Self {
        Primitive::Line {
            x1: from.0,
            y1: from.1,
            x2: to.0,
            y2: to.1,
            class,
        }
    }

    pub fn class(&self) -> StrokeClass {
        match self {
            Primitive::Line { class, .. }
            | Primitive::Arc { class, .. }
            | Primitive::Rect { class, .. }
            | Primitive::Circle { class, .. }
            | Primitive::Text { class, .. } => *class,
        }
    }

    /// Append this primitive as one SVG element line
    pub fn write_svg(&self, svg: &mut String) -> fmt::Result {
        match self {
            Primitive::Line { x1, y1, x2, y2, class } => writeln!(
                svg,
                r#"  <line x1="{x1:.2}" y1="{y1:.2}" x2="{x2:.2}" y2="{y2:.2}" class="{}"/>"#,
                class.as_str()
            ),
            Primitive::Arc {
                from,
                to,
                radius,
                sweep,
                class,
            } => writeln!(
                svg,
                r#"  <path d="M{:.2},{:.2} A{radius:.2},{radius:.2} 0 0 {} {:.2},{:.2}" class="{}"/>"#,
                from.0,
                from.1,
                u8::from(*sweep),
                to.0,
                to.1,
                class.as_str()
            ),
            Primitive::Rect {
                x,
                y,
                width,
                height,
                class,
                fill,
            } => {
                write!(
                    svg,
                    r#"  <rect x="{x:.2}" y="{y:.2}" width="{width:.2}" height="{height:.2}" class="{}""#,
                    class.as_str()
                )?;
                if let Some(fill) = fill {
                    write!(svg, r#" fill="{}""#, escape(fill))?;
                }
                writeln!(svg, "/>")
            }
            Primitive::Circle { cx, cy, r, class } => writeln!(
                svg,
                r#"  <circle cx="{cx:.2}" cy="{cy:.2}" r="{r:.2}" class="{}"/>"#,
                class.as_str()
            ),
            Primitive::Text {
                x,
                y,
                size,
                content,
                class,
            } => writeln!(
                svg,
                r#"  <text x="{x:.2}" y="{y:.2}" font-size="{size:.1}" text-anchor="middle" dominant-baseline="middle" class="{}">{}</text>"#,
                class.as_str(),
                escape(content)
            ),
        }
    }
}

/// Escape text for use in SVG content and attribute values
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}
