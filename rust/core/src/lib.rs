// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Plan-Lite Core
//!
//! Renderer-agnostic floor plan model shared by the 2D plan renderer and the
//! 3D scene builder.
//!
//! ## Overview
//!
//! - **Model**: rectangular rooms with door/window openings, grouped by floor
//! - **Intake**: tolerant JSON loading of a generated layout
//! - **Adjacency**: which part of each room edge is shared with which neighbour
//! - **Segmentation**: splitting every wall into solid, door and window runs
//! - **Furniture**: a declarative room-type → furniture table
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use plan_lite_core::{segment_room, GeneratedLayout};
//!
//! let layout = GeneratedLayout::from_json(json)?;
//! let rooms = layout.rooms_on_floor(1);
//!
//! for room in &rooms {
//!     for wall in segment_room(room, &rooms) {
//!         for run in wall.rendered_runs() {
//!             println!("{} {:?}: {:.1}..{:.1} {:?}", room.id, wall.side, run.start, run.end, run.kind);
//!         }
//!     }
//! }
//! ```
//!
//! Every function here is a pure function of the room list. Nothing is
//! cached: adjacency is recomputed from scratch on every call, which keeps
//! results consistent when rooms move between renders.

pub mod adjacency;
pub mod error;
pub mod furniture;
pub mod intake;
pub mod model;
pub mod segmenter;

pub use adjacency::{
    build_wall_segments, get_adjacent_segments, owns_segment, resolve_wall, should_render,
    AdjacencyList, WallSegmentInfo, ADJACENCY_TOLERANCE,
};
pub use error::{Error, Result};
pub use furniture::{furniture_for, FurnitureItem, FurnitureKind};
pub use model::{Door, GeneratedLayout, Room, RoomType, Side, Window, DEFAULT_WALL_THICKNESS};
pub use segmenter::{
    place_openings, segment_room, segment_wall, LocalOpening, RunKind, SegmentedWall, WallOpening,
    WallRun,
};
