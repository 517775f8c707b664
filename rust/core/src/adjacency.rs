// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wall adjacency resolution
//!
//! For one room edge, find every same-floor neighbour whose facing edge lies
//! on the same line and overlaps it, then partition the edge into shared and
//! exterior runs.
//!
//! Offsets are measured along the wall from its start corner: the left end
//! for top/bottom walls, the top end for left/right walls.

use crate::model::{Room, Side};
use serde::Serialize;
use smallvec::SmallVec;

/// Distance (feet) within which two edges count as coincident, and the
/// minimum overlap for two edges to count as sharing a wall
pub const ADJACENCY_TOLERANCE: f64 = 0.5;

/// Gaps narrower than this are absorbed instead of emitted as slivers
const GAP_EPSILON: f64 = 1e-6;

/// A contiguous run along one wall, either shared with a neighbour or exterior
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WallSegmentInfo {
    /// Offset from the wall's start corner (feet)
    pub start: f64,
    /// Offset from the wall's start corner (feet)
    pub end: f64,
    /// Neighbour sharing this run; `None` for exterior runs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adjacent_room_id: Option<String>,
    /// Always equal to `adjacent_room_id.is_some()`
    pub is_shared: bool,
}

impl WallSegmentInfo {
    pub fn exterior(start: f64, end: f64) -> Self {
        Self {
            start,
            end,
            adjacent_room_id: None,
            is_shared: false,
        }
    }

    pub fn shared(start: f64, end: f64, neighbor: impl Into<String>) -> Self {
        Self {
            start,
            end,
            adjacent_room_id: Some(neighbor.into()),
            is_shared: true,
        }
    }

    #[inline]
    pub fn len(&self) -> f64 {
        self.end - self.start
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() <= 0.0
    }

    #[inline]
    pub fn contains(&self, offset: f64) -> bool {
        offset >= self.start && offset <= self.end
    }
}

/// Shared runs found on one wall (rarely more than a handful)
pub type AdjacencyList = SmallVec<[WallSegmentInfo; 4]>;

/// Find every same-floor neighbour sharing part of `room`'s `side`
///
/// Each qualifying neighbour yields exactly one shared segment, expressed in
/// `room`'s wall-local offsets. Corner contacts (overlap not exceeding the
/// tolerance) and neighbours without a valid footprint are ignored. Results
/// are sorted by start offset.
pub fn get_adjacent_segments(room: &Room, side: Side, all_rooms: &[Room]) -> AdjacencyList {
    let edge = room.edge_position(side);
    let (wall_start, wall_end) = room.wall_span(side);
    let facing = side.opposite();

    let mut segments: AdjacencyList = all_rooms
        .iter()
        .filter(|other| other.id != room.id && other.floor == room.floor)
        .filter(|other| other.has_valid_footprint())
        .filter(|other| (other.edge_position(facing) - edge).abs() < ADJACENCY_TOLERANCE)
        .filter_map(|other| {
            let (other_start, other_end) = other.wall_span(facing);
            let overlap_start = wall_start.max(other_start);
            let overlap_end = wall_end.min(other_end);

            (overlap_end - overlap_start > ADJACENCY_TOLERANCE).then(|| {
                WallSegmentInfo::shared(
                    overlap_start - wall_start,
                    overlap_end - wall_start,
                    other.id.clone(),
                )
            })
        })
        .collect();

    segments.sort_by(|a, b| {
        a.start
            .total_cmp(&b.start)
            .then_with(|| a.adjacent_room_id.cmp(&b.adjacent_room_id))
    });
    segments
}

/// Fill the gaps between shared runs with exterior runs
///
/// The result is an ordered, gap-free, non-overlapping partition of
/// `[0, wall_length]`. Shared runs that overlap an earlier one (only possible
/// with overlapping neighbours) are trimmed to start where it ends.
pub fn build_wall_segments(wall_length: f64, shared: &[WallSegmentInfo]) -> Vec<WallSegmentInfo> {
    if wall_length.is_nan() || wall_length <= 0.0 {
        return Vec::new();
    }

    let mut sorted: Vec<&WallSegmentInfo> = shared.iter().filter(|s| s.is_shared).collect();
    sorted.sort_by(|a, b| a.start.total_cmp(&b.start));

    let mut result = Vec::with_capacity(sorted.len() * 2 + 1);
    let mut cursor = 0.0;

    for segment in sorted {
        let mut start = segment.start.clamp(cursor, wall_length);
        let end = segment.end.clamp(cursor, wall_length);

        if start - cursor > GAP_EPSILON {
            result.push(WallSegmentInfo::exterior(cursor, start));
        } else {
            start = cursor;
        }

        if end - start > GAP_EPSILON {
            result.push(WallSegmentInfo {
                start,
                end,
                ..segment.clone()
            });
            cursor = end;
        }
    }

    if wall_length - cursor > GAP_EPSILON {
        result.push(WallSegmentInfo::exterior(cursor, wall_length));
    } else if let Some(last) = result.last_mut() {
        last.end = wall_length;
    }

    result
}

/// Resolve one wall of a room into its shared/exterior partition
pub fn resolve_wall(room: &Room, side: Side, all_rooms: &[Room]) -> Vec<WallSegmentInfo> {
    let shared = get_adjacent_segments(room, side, all_rooms);
    build_wall_segments(room.wall_length(side), &shared)
}

/// Ownership tie-break for a wall shared by two rooms
///
/// Both rooms see the same shared run; only the one with the
/// lexicographically smaller id draws it.
#[inline]
pub fn should_render(room_id: &str, neighbor_id: &str) -> bool {
    room_id < neighbor_id
}

/// Whether `room` is responsible for drawing `segment`
///
/// Exterior runs always belong to the room they bound.
#[inline]
pub fn owns_segment(room: &Room, segment: &WallSegmentInfo) -> bool {
    match &segment.adjacent_room_id {
        Some(neighbor) => should_render(&room.id, neighbor),
        None => true,
    }
}
