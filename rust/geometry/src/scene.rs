// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! 3D scene construction
//!
//! Consumes the shared wall segmentation and turns every room into a list of
//! tagged meshes. World space is Z up, X east, Y north; floor `n` stands at
//! `(n - 1) * floor_height`.
//!
//! Shared runs are built only by the room that wins the id tie-break, so two
//! neighbours never emit coincident wall volumes.

use crate::error::{Error, Result};
use crate::extrusion::make_box;
use crate::furnishing::furnish;
use crate::mesh::Mesh;
use crate::walls::{
    build_door, build_railing, build_solid, build_window, plan_to_world, WallFrame, WallStyle,
};
use nalgebra::Point3;
use plan_lite_core::{
    segment_room, should_render, FurnitureKind, GeneratedLayout, Room, RunKind, SegmentedWall,
    Side, DEFAULT_WALL_THICKNESS,
};

pub const DEFAULT_FLOOR_HEIGHT: f64 = 10.0;

/// Exterior walls are this much thicker than interior ones
pub const EXTERIOR_THICKNESS_RATIO: f64 = 1.5;

const SLAB_THICKNESS: f64 = 0.25;
const MARKER_HEIGHT: f64 = 0.3;

/// Whether to add the ownership debug overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    #[default]
    Normal,
    Debug,
}

/// Scene construction parameters
#[derive(Debug, Clone, PartialEq)]
pub struct SceneOptions {
    /// Storey height in feet; also the wall height
    pub floor_height: f64,
    /// Interior wall thickness in feet
    pub wall_thickness: f64,
    pub render_mode: RenderMode,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            floor_height: DEFAULT_FLOOR_HEIGHT,
            wall_thickness: DEFAULT_WALL_THICKNESS,
            render_mode: RenderMode::Normal,
        }
    }
}

impl SceneOptions {
    /// Defaults with the layout's own wall thickness
    pub fn for_layout(layout: &GeneratedLayout) -> Self {
        Self {
            wall_thickness: layout.effective_wall_thickness(),
            ..Self::default()
        }
    }

    /// Elevation of a floor's finished surface
    #[inline]
    pub fn elevation(&self, floor: u32) -> f64 {
        floor.saturating_sub(1) as f64 * self.floor_height
    }

    #[inline]
    pub fn interior_thickness(&self) -> f64 {
        self.wall_thickness
    }

    #[inline]
    pub fn exterior_thickness(&self) -> f64 {
        self.wall_thickness * EXTERIOR_THICKNESS_RATIO
    }
}

/// Ownership class of a wall segment, shown by debug markers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DebugTag {
    Exterior,
    /// Shared and built by this room
    OwnedShared,
    /// Shared and left to the neighbour
    Deferred,
}

/// What a scene part represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartKind {
    Floor,
    ExteriorWall,
    InteriorWall,
    DoorFrame,
    DoorPanel,
    WindowSill,
    WindowLintel,
    WindowGlass,
    RailingPost,
    RailingRail,
    RailingBaluster,
    Furniture(FurnitureKind),
    DebugMarker(DebugTag),
}

impl PartKind {
    /// Stable name, used for exported groups and materials
    pub fn label(&self) -> &'static str {
        match self {
            PartKind::Floor => "floor",
            PartKind::ExteriorWall => "exterior_wall",
            PartKind::InteriorWall => "interior_wall",
            PartKind::DoorFrame => "door_frame",
            PartKind::DoorPanel => "door_panel",
            PartKind::WindowSill => "window_sill",
            PartKind::WindowLintel => "window_lintel",
            PartKind::WindowGlass => "window_glass",
            PartKind::RailingPost => "railing_post",
            PartKind::RailingRail => "railing_rail",
            PartKind::RailingBaluster => "railing_baluster",
            PartKind::Furniture(_) => "furniture",
            PartKind::DebugMarker(DebugTag::Exterior) => "debug_exterior",
            PartKind::DebugMarker(DebugTag::OwnedShared) => "debug_owned",
            PartKind::DebugMarker(DebugTag::Deferred) => "debug_deferred",
        }
    }

    /// Display colour (linear RGB)
    pub fn color(&self) -> [f32; 3] {
        match self {
            PartKind::Floor => [0.78, 0.72, 0.62],
            PartKind::ExteriorWall => [0.85, 0.85, 0.82],
            PartKind::InteriorWall => [0.95, 0.95, 0.93],
            PartKind::DoorFrame => [0.45, 0.30, 0.18],
            PartKind::DoorPanel => [0.60, 0.42, 0.25],
            PartKind::WindowSill | PartKind::WindowLintel => [0.90, 0.90, 0.90],
            PartKind::WindowGlass => [0.60, 0.80, 0.95],
            PartKind::RailingPost | PartKind::RailingRail | PartKind::RailingBaluster => {
                [0.35, 0.35, 0.38]
            }
            PartKind::Furniture(_) => [0.55, 0.50, 0.45],
            PartKind::DebugMarker(DebugTag::Exterior) => [0.2, 0.4, 1.0],
            PartKind::DebugMarker(DebugTag::OwnedShared) => [0.1, 0.8, 0.2],
            PartKind::DebugMarker(DebugTag::Deferred) => [1.0, 0.2, 0.2],
        }
    }

    /// Translucent in viewers
    pub fn is_transparent(&self) -> bool {
        matches!(self, PartKind::WindowGlass)
    }
}

/// One tagged mesh
#[derive(Debug, Clone, PartialEq)]
pub struct ScenePart {
    pub kind: PartKind,
    pub mesh: Mesh,
}

/// All geometry contributed by one room
#[derive(Debug, Clone, PartialEq)]
pub struct RoomScene {
    pub room_id: String,
    pub floor: u32,
    pub parts: Vec<ScenePart>,
}

impl RoomScene {
    pub fn new(room_id: impl Into<String>, floor: u32) -> Self {
        Self {
            room_id: room_id.into(),
            floor,
            parts: Vec::new(),
        }
    }

    /// Add a part; `None` and empty meshes are ignored
    pub fn push(&mut self, kind: PartKind, mesh: Option<Mesh>) {
        if let Some(mesh) = mesh.filter(|m| !m.is_empty()) {
            self.parts.push(ScenePart { kind, mesh });
        }
    }

    pub fn parts_of(&self, kind: PartKind) -> impl Iterator<Item = &ScenePart> {
        self.parts.iter().filter(move |p| p.kind == kind)
    }

    pub fn count(&self, kind: PartKind) -> usize {
        self.parts_of(kind).count()
    }

    /// Merge every part into a single mesh (loses per-part identity)
    pub fn combined_mesh(&self) -> Mesh {
        let mut combined = Mesh::new();
        for part in &self.parts {
            combined.merge(&part.mesh);
        }
        combined
    }

    pub fn triangle_count(&self) -> usize {
        self.parts.iter().map(|p| p.mesh.triangle_count()).sum()
    }
}

/// Every room on one floor
#[derive(Debug, Clone)]
pub struct FloorScene {
    pub floor: u32,
    pub elevation: f64,
    pub rooms: Vec<RoomScene>,
}

impl FloorScene {
    pub fn triangle_count(&self) -> usize {
        self.rooms.iter().map(RoomScene::triangle_count).sum()
    }

    pub fn parts(&self) -> impl Iterator<Item = &ScenePart> {
        self.rooms.iter().flat_map(|r| r.parts.iter())
    }
}

/// All floors stacked
#[derive(Debug, Clone)]
pub struct BuildingScene {
    pub floors: Vec<FloorScene>,
    pub total_height: f64,
}

impl BuildingScene {
    pub fn rooms(&self) -> impl Iterator<Item = &RoomScene> {
        self.floors.iter().flat_map(|f| f.rooms.iter())
    }

    pub fn triangle_count(&self) -> usize {
        self.floors.iter().map(FloorScene::triangle_count).sum()
    }

    /// World-space bounds over every part
    pub fn bounds(&self) -> Option<(Point3<f32>, Point3<f32>)> {
        self.rooms()
            .flat_map(|r| r.parts.iter())
            .map(|p| p.mesh.bounds())
            .reduce(|(amin, amax), (bmin, bmax)| {
                (
                    Point3::new(amin.x.min(bmin.x), amin.y.min(bmin.y), amin.z.min(bmin.z)),
                    Point3::new(amax.x.max(bmax.x), amax.y.max(bmax.y), amax.z.max(bmax.z)),
                )
            })
    }
}

/// Build the geometry of one room
///
/// `rooms` must be every room on the room's floor; adjacency is resolved
/// against it. Malformed pieces are skipped, never reported.
pub fn build_room_scene(room: &Room, rooms: &[Room], options: &SceneOptions) -> RoomScene {
    let base_z = options.elevation(room.floor);
    let height = options.floor_height;
    let mut scene = RoomScene::new(room.id.clone(), room.floor);
    if !room.has_valid_footprint() {
        tracing::debug!(room = %room.id, width = room.width, height = room.height, "skipping room with unusable footprint");
        return scene;
    }

    // south-west and north-east corners
    let sw = plan_to_world(room.x, room.y + room.height);
    let ne = plan_to_world(room.x + room.width, room.y);
    let slab = make_box(
        Point3::new(sw.x, sw.y, base_z - SLAB_THICKNESS),
        Point3::new(ne.x, ne.y, base_z),
    );
    scene.push(
        PartKind::Floor,
        slab.map_err(|e| tracing::debug!(room = %room.id, error = %e, "skipping floor slab"))
            .ok(),
    );

    let walls = segment_room(room, rooms);
    for wall in &walls {
        let frame = WallFrame::new(room, wall.side, base_z);
        // the vertical exterior wall reaches half its own thickness past the corner
        let corner_reach = |vertical| {
            if wall.side.is_horizontal() && corner_is_exterior(&walls, wall.side, vertical) {
                options.exterior_thickness() / 2.0
            } else {
                0.0
            }
        };
        let corner_extension = (corner_reach(Side::Left), corner_reach(Side::Right));
        build_wall(&frame, wall, corner_extension, options, &mut scene);

        if options.render_mode == RenderMode::Debug {
            add_debug_markers(&frame, wall, options, &mut scene);
        }
    }

    furnish(room, base_z, height, &mut scene);

    tracing::trace!(
        room = %room.id,
        parts = scene.parts.len(),
        triangles = scene.triangle_count(),
        "room scene built"
    );
    scene
}

/// Whether the corner where horizontal wall `side` meets vertical wall
/// `vertical` is exterior on the vertical side
///
/// Horizontal walls own exterior corners; vertical walls always stop at the
/// corner.
fn corner_is_exterior(walls: &[SegmentedWall], side: Side, vertical: Side) -> bool {
    walls
        .iter()
        .find(|w| w.side == vertical)
        .and_then(|w| match side {
            Side::Top => w.segments.first(),
            _ => w.segments.last(),
        })
        .is_some_and(|s| !s.is_shared)
}

fn build_wall(
    frame: &WallFrame,
    wall: &SegmentedWall,
    corner_extension: (f64, f64),
    options: &SceneOptions,
    scene: &mut RoomScene,
) {
    for run in wall.rendered_runs() {
        if wall.is_railing(run) {
            build_railing(frame, run, options.floor_height, scene);
            continue;
        }

        let style = if run.is_shared() {
            WallStyle {
                thickness: options.interior_thickness(),
                height: options.floor_height,
                kind: PartKind::InteriorWall,
            }
        } else {
            WallStyle {
                thickness: options.exterior_thickness(),
                height: options.floor_height,
                kind: PartKind::ExteriorWall,
            }
        };

        match run.kind {
            RunKind::Solid => build_solid(frame, run, &style, corner_extension, scene),
            RunKind::Door { .. } => build_door(frame, run, &style, scene),
            RunKind::Window => build_window(frame, run, &style, scene),
        }
    }
}

/// Coloured bars on top of the wall, one per shared/exterior segment
///
/// Deferred segments are drawn inset into the room so they stay visible
/// next to the owner's marker on the same line.
fn add_debug_markers(frame: &WallFrame, wall: &SegmentedWall, options: &SceneOptions, scene: &mut RoomScene) {
    let t = options.interior_thickness();
    let top = options.floor_height;

    for segment in &wall.segments {
        let (tag, inset) = match &segment.adjacent_room_id {
            None => (DebugTag::Exterior, 0.0),
            Some(neighbor) if should_render(&wall.room_id, neighbor) => {
                (DebugTag::OwnedShared, 0.0)
            }
            Some(_) => (DebugTag::Deferred, t),
        };

        scene.push(
            PartKind::DebugMarker(tag),
            frame.slab(
                (segment.start, segment.end),
                (inset - t / 4.0, inset + t / 4.0),
                (top, top + MARKER_HEIGHT),
            ),
        );
    }
}

/// Build every room on one floor
pub fn build_floor_scene(layout: &GeneratedLayout, floor: u32, options: &SceneOptions) -> Result<FloorScene> {
    let rooms = layout.rooms_on_floor(floor);
    if rooms.is_empty() {
        return Err(Error::EmptyFloor(floor));
    }

    let scenes = rooms
        .iter()
        .map(|room| build_room_scene(room, &rooms, options))
        .collect();

    Ok(FloorScene {
        floor,
        elevation: options.elevation(floor),
        rooms: scenes,
    })
}

/// Build and stack every floor of the layout
pub fn build_building(layout: &GeneratedLayout, options: &SceneOptions) -> Result<BuildingScene> {
    let floors = layout
        .floors()
        .into_iter()
        .map(|floor| build_floor_scene(layout, floor, options))
        .collect::<Result<Vec<_>>>()?;

    let total_height = floors
        .iter()
        .map(|f| f.elevation + options.floor_height)
        .fold(0.0, f64::max);

    tracing::debug!(
        floors = floors.len(),
        total_height,
        "building scene built"
    );

    Ok(BuildingScene { floors, total_height })
}
