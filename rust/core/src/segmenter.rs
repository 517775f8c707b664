// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wall segmentation around doors and windows
//!
//! Takes the shared/exterior partition of a wall and cuts each run further
//! into solid, door and window pieces. The output always covers the whole
//! wall, in order, without gaps or overlaps.
//!
//! Opening policy:
//! - an opening belongs to the adjacency segment containing its centre
//! - windows on shared segments are dropped
//! - doors on shared segments must fit entirely inside the segment
//! - on exterior segments openings are clipped to the segment
//! - openings that overlap an earlier one (by start) are trimmed

use crate::adjacency::{resolve_wall, should_render, WallSegmentInfo};
use crate::model::{Door, Room, Side, Window};
use rustc_hash::FxHashMap;
use serde::Serialize;

/// Openings shorter than this after clipping are dropped (feet)
const MIN_OPENING_LENGTH: f64 = 1e-3;

/// Slack for "fully inside a segment" checks (feet)
const FIT_EPSILON: f64 = 1e-6;

/// Solid runs shorter than this are folded into the neighbouring opening
const SLIVER: f64 = 1e-9;

/// What occupies a run of wall
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "type")]
pub enum RunKind {
    Solid,
    Door {
        is_main: bool,
        /// Door declared by the neighbour on the other side of a shared wall
        swings_outward: bool,
    },
    Window,
}

impl RunKind {
    #[inline]
    pub fn is_opening(self) -> bool {
        !matches!(self, RunKind::Solid)
    }

    #[inline]
    pub fn is_door(self) -> bool {
        matches!(self, RunKind::Door { .. })
    }
}

/// One piece of a segmented wall
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WallRun {
    /// Offset from the wall's start corner (feet)
    pub start: f64,
    /// Offset from the wall's start corner (feet)
    pub end: f64,
    pub kind: RunKind,
    /// Neighbour sharing the enclosing adjacency segment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adjacent_room_id: Option<String>,
}

impl WallRun {
    #[inline]
    pub fn len(&self) -> f64 {
        self.end - self.start
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() <= 0.0
    }

    #[inline]
    pub fn is_shared(&self) -> bool {
        self.adjacent_room_id.is_some()
    }
}

/// An opening positioned along a whole wall
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallOpening {
    /// Centre offset from the wall's start corner (feet)
    pub center: f64,
    pub width: f64,
    pub kind: RunKind,
}

impl WallOpening {
    pub fn from_door(door: &Door, wall_length: f64) -> Self {
        Self {
            center: door.offset / 100.0 * wall_length,
            width: door.width,
            kind: RunKind::Door {
                is_main: door.is_main,
                swings_outward: false,
            },
        }
    }

    pub fn from_window(window: &Window, wall_length: f64) -> Self {
        Self {
            center: window.offset / 100.0 * wall_length,
            width: window.width,
            kind: RunKind::Window,
        }
    }

    #[inline]
    pub fn start(&self) -> f64 {
        self.center - self.width / 2.0
    }

    #[inline]
    pub fn end(&self) -> f64 {
        self.center + self.width / 2.0
    }

    fn overlaps(&self, other: &WallOpening) -> bool {
        self.start() < other.end() && other.start() < self.end()
    }
}

/// An opening renormalised to one adjacency segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalOpening {
    /// Centre as a percentage (0-100) of the segment length
    pub offset: f64,
    /// Width in feet
    pub width: f64,
    pub kind: RunKind,
}

/// All four walls of a room are returned as one of these each
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentedWall {
    pub room_id: String,
    pub side: Side,
    pub length: f64,
    /// Room is a balcony or garden
    pub open_air: bool,
    /// Shared/exterior partition the runs were cut from
    pub segments: Vec<WallSegmentInfo>,
    pub runs: Vec<WallRun>,
}

impl SegmentedWall {
    /// Runs this room is responsible for drawing
    ///
    /// Shared runs are skipped unless this room wins the id tie-break.
    pub fn rendered_runs(&self) -> impl Iterator<Item = &WallRun> {
        self.runs.iter().filter(move |run| self.owns(run))
    }

    #[inline]
    pub fn owns(&self, run: &WallRun) -> bool {
        match &run.adjacent_room_id {
            Some(neighbor) => should_render(&self.room_id, neighbor),
            None => true,
        }
    }

    /// Exterior non-door runs of open-air rooms get a railing, not a wall
    #[inline]
    pub fn is_railing(&self, run: &WallRun) -> bool {
        self.open_air && !run.is_shared() && !run.kind.is_door()
    }

    pub fn shared_segment_count(&self) -> usize {
        self.segments.iter().filter(|s| s.is_shared).count()
    }
}

/// Place openings along one segment and fill the rest with solid runs
///
/// Works entirely in segment-local coordinates: `segment_length` feet, each
/// opening centred on its percentage offset. Returned runs carry no
/// adjacency information.
pub fn place_openings(segment_length: f64, openings: &[LocalOpening]) -> Vec<WallRun> {
    if segment_length.is_nan() || segment_length <= 0.0 {
        return Vec::new();
    }

    let mut placed: Vec<(f64, f64, RunKind)> = openings
        .iter()
        .filter_map(|opening| {
            if !(opening.offset.is_finite() && opening.width > 0.0) {
                return None;
            }
            let center = opening.offset / 100.0 * segment_length;
            let start = (center - opening.width / 2.0).max(0.0);
            let end = (center + opening.width / 2.0).min(segment_length);
            if end - start < MIN_OPENING_LENGTH {
                tracing::debug!(
                    offset = opening.offset,
                    width = opening.width,
                    "dropping out-of-range opening"
                );
                return None;
            }
            Some((start, end, opening.kind))
        })
        .collect();
    placed.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut runs = Vec::with_capacity(placed.len() * 2 + 1);
    let mut cursor = 0.0;

    for (start, end, kind) in placed {
        let mut start = start.max(cursor);
        if end - start < MIN_OPENING_LENGTH {
            tracing::debug!(start, end, "dropping overlapping opening");
            continue;
        }
        if start - cursor > SLIVER {
            runs.push(local_run(cursor, start, RunKind::Solid));
        } else {
            start = cursor;
        }
        runs.push(local_run(start, end, kind));
        cursor = end;
    }

    if segment_length - cursor > SLIVER {
        runs.push(local_run(cursor, segment_length, RunKind::Solid));
    } else if let Some(last) = runs.last_mut() {
        last.end = segment_length;
    }

    runs
}

fn local_run(start: f64, end: f64, kind: RunKind) -> WallRun {
    WallRun {
        start,
        end,
        kind,
        adjacent_room_id: None,
    }
}

/// Cut a wall into solid/door/window runs
///
/// `segments` must be the partition produced by
/// [`build_wall_segments`](crate::adjacency::build_wall_segments).
pub fn segment_wall(
    wall_length: f64,
    segments: &[WallSegmentInfo],
    openings: &[WallOpening],
) -> Vec<WallRun> {
    if wall_length.is_nan() || wall_length <= 0.0 {
        return Vec::new();
    }

    let mut buckets: Vec<Vec<LocalOpening>> = vec![Vec::new(); segments.len()];

    for opening in openings {
        if !(opening.center.is_finite() && opening.width > 0.0) {
            tracing::debug!(center = opening.center, width = opening.width, "dropping malformed opening");
            continue;
        }
        let center = opening.center.clamp(0.0, wall_length);
        let Some(index) = segments.iter().position(|s| s.contains(center)) else {
            continue;
        };
        let segment = &segments[index];

        if segment.is_shared {
            if opening.kind == RunKind::Window {
                tracing::debug!(center, "suppressing window on shared wall");
                continue;
            }
            let fits = opening.start() >= segment.start - FIT_EPSILON
                && opening.end() <= segment.end + FIT_EPSILON;
            if !fits {
                tracing::debug!(
                    center,
                    width = opening.width,
                    "door does not fit its shared segment"
                );
                continue;
            }
        }

        buckets[index].push(LocalOpening {
            offset: (center - segment.start) / segment.len() * 100.0,
            width: opening.width,
            kind: opening.kind,
        });
    }

    let mut runs = Vec::new();
    for (segment, bucket) in segments.iter().zip(&buckets) {
        let local_length = segment.len();
        for run in place_openings(local_length, bucket) {
            let start = if run.start <= 0.0 {
                segment.start
            } else {
                segment.start + run.start
            };
            let end = if run.end >= local_length {
                segment.end
            } else {
                segment.start + run.end
            };
            runs.push(WallRun {
                start,
                end,
                kind: run.kind,
                adjacent_room_id: segment.adjacent_room_id.clone(),
            });
        }
    }
    runs
}

/// Resolve and segment all four walls of a room
///
/// `rooms` is the room list for the room's floor (rooms on other floors are
/// ignored anyway). Doors declared by a neighbour on a shared wall this room
/// owns are placed here too, since the neighbour skips that wall.
pub fn segment_room(room: &Room, rooms: &[Room]) -> Vec<SegmentedWall> {
    let index: FxHashMap<&str, &Room> = rooms
        .iter()
        .filter(|r| r.floor == room.floor)
        .map(|r| (r.id.as_str(), r))
        .collect();

    Side::ALL
        .iter()
        .map(|&side| {
            let length = room.wall_length(side);
            let segments = resolve_wall(room, side, rooms);

            let mut openings: Vec<WallOpening> = room
                .doors_on(side)
                .map(|d| WallOpening::from_door(d, length))
                .chain(room.windows_on(side).map(|w| WallOpening::from_window(w, length)))
                .collect();

            for segment in &segments {
                let Some(neighbor_id) = segment.adjacent_room_id.as_deref() else {
                    continue;
                };
                if !should_render(&room.id, neighbor_id) {
                    continue;
                }
                if let Some(neighbor) = index.get(neighbor_id) {
                    merge_neighbor_doors(room, side, neighbor, segment, &mut openings);
                }
            }

            let runs = segment_wall(length, &segments, &openings);
            SegmentedWall {
                room_id: room.id.clone(),
                side,
                length,
                open_air: room.is_open_air(),
                segments,
                runs,
            }
        })
        .collect()
}

/// Bring the neighbour's doors on the facing wall into this wall's frame
fn merge_neighbor_doors(
    room: &Room,
    side: Side,
    neighbor: &Room,
    segment: &WallSegmentInfo,
    openings: &mut Vec<WallOpening>,
) {
    let facing = side.opposite();
    let (wall_start, _) = room.wall_span(side);
    let (neighbor_start, _) = neighbor.wall_span(facing);
    let neighbor_length = neighbor.wall_length(facing);

    for door in neighbor.doors_on(facing) {
        let absolute = neighbor_start + door.offset / 100.0 * neighbor_length;
        let candidate = WallOpening {
            center: absolute - wall_start,
            width: door.width,
            kind: RunKind::Door {
                is_main: door.is_main,
                swings_outward: true,
            },
        };

        if !segment.contains(candidate.center) {
            continue;
        }
        let duplicate = openings
            .iter()
            .any(|o| o.kind.is_door() && o.overlaps(&candidate));
        if duplicate {
            continue;
        }
        openings.push(candidate);
    }
}
