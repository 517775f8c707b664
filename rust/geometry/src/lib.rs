// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Plan-Lite Geometry
//!
//! Volumetric 3D scenes built from the shared wall segmentation, using
//! earcutr triangulation and nalgebra for transformations.

pub mod error;
pub mod extrusion;
pub mod furnishing;
pub mod mesh;
pub mod profile;
pub mod scene;
pub mod walls;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point2, Point3, Vector2, Vector3};

pub use error::{Error, Result};
pub use extrusion::{apply_transform, extrude_profile, make_box};
pub use mesh::Mesh;
pub use profile::{create_aligned_rectangle, create_circle, create_rectangle, Profile2D};
pub use scene::{
    build_building, build_floor_scene, build_room_scene, BuildingScene, DebugTag, FloorScene,
    PartKind, RenderMode, RoomScene, SceneOptions, ScenePart, DEFAULT_FLOOR_HEIGHT,
};
pub use walls::{
    plan_to_world, DOOR_HEIGHT, RAILING_HEIGHT, WINDOW_HEAD_HEIGHT, WINDOW_SILL_HEIGHT,
};
