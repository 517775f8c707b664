// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Plan-Lite SVG
//!
//! Blueprint-style 2D rendering of a floor from the shared wall segmentation.
//!
//! ```rust,ignore
//! use plan_lite_svg::{render_floor_svg, PlanStyle};
//!
//! let style = PlanStyle { zoom: 1.5, ..PlanStyle::for_layout(&layout) };
//! std::fs::write("floor-1.svg", render_floor_svg(&layout, 1, &style)?)?;
//! ```

pub mod document;
pub mod error;
pub mod primitive;
pub mod room;
pub mod style;

pub use document::{draw_floor, render_floor_svg};
pub use error::{Error, Result};
pub use primitive::{Primitive, StrokeClass};
pub use room::{draw_room, label_size, RoomDrawing};
pub use style::PlanStyle;
