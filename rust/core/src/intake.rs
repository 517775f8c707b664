// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Layout intake: decoding and sanitising a generated layout
//!
//! The generator is expected to validate its own output. Whatever slips
//! through is clamped here so that the renderers never see negative
//! dimensions or percentages outside 0-100.

use crate::error::{Error, Result};
use crate::model::GeneratedLayout;
use rustc_hash::FxHashSet;

impl GeneratedLayout {
    /// Decode a layout document and sanitise it
    pub fn from_json(json: &str) -> Result<Self> {
        let mut layout: GeneratedLayout = serde_json::from_str(json)?;
        layout.sanitize();

        if layout.rooms.is_empty() {
            return Err(Error::EmptyLayout);
        }

        Ok(layout)
    }

    /// Clamp out-of-range values in place
    ///
    /// Rooms without a positive finite footprint are removed. Everything else
    /// is kept and clamped.
    pub fn sanitize(&mut self) {
        let before = self.rooms.len();
        self.rooms.retain(|room| {
            let valid = room.has_valid_footprint();
            if !valid {
                tracing::warn!(
                    room = %room.id,
                    width = room.width,
                    height = room.height,
                    "dropping room with unusable footprint"
                );
            }
            valid
        });
        if self.rooms.len() != before {
            tracing::debug!(dropped = before - self.rooms.len(), "sanitised room list");
        }

        let mut seen = FxHashSet::default();
        for room in &mut self.rooms {
            if !seen.insert(room.id.clone()) {
                tracing::warn!(room = %room.id, "duplicate room id; shared walls may render twice");
            }

            if room.floor == 0 {
                room.floor = 1;
            }

            for door in &mut room.doors {
                door.offset = clamp_percent(door.offset);
                door.width = clamp_width(door.width);
            }
            for window in &mut room.windows {
                window.offset = clamp_percent(window.offset);
                window.width = clamp_width(window.width);
            }
        }

        self.efficiency = if self.efficiency.is_finite() {
            self.efficiency.clamp(0.0, 1.0)
        } else {
            0.0
        };
        if !self.total_area.is_finite() || self.total_area < 0.0 {
            self.total_area = self.rooms.iter().map(|r| r.area()).sum();
        }
    }
}

#[inline]
fn clamp_percent(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 100.0)
    } else {
        50.0
    }
}

#[inline]
fn clamp_width(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{RoomType, Side};

    const LAYOUT: &str = r##"{
        "rooms": [
            {
                "id": "living-1", "type": "living", "name": "Living Room",
                "x": 0, "y": 0, "width": 16, "height": 12, "floor": 1,
                "color": "#f5e6d3",
                "doors": [{"position": "bottom", "offset": 50, "width": 3.5, "isMain": true}],
                "windows": [{"position": "top", "offset": 40, "width": 4}]
            },
            {
                "id": "kitchen-1", "type": "kitchen", "name": "Kitchen",
                "x": 16, "y": 0, "width": 10, "height": 12
            }
        ],
        "totalArea": 312,
        "efficiency": 0.82,
        "suggestions": ["Consider a larger kitchen"],
        "wallThickness": 0.75
    }"##;

    #[test]
    fn test_from_json() {
        let layout = GeneratedLayout::from_json(LAYOUT).unwrap();

        assert_eq!(layout.rooms.len(), 2);
        assert_eq!(layout.rooms[0].room_type, RoomType::Living);
        assert_eq!(layout.rooms[0].color, "#f5e6d3");
        assert!(layout.rooms[0].doors[0].is_main);
        assert_eq!(layout.rooms[0].doors[0].position, Side::Bottom);
        assert!(layout.rooms[1].doors.is_empty());
        assert!(layout.rooms[1].windows.is_empty());
        assert_eq!(layout.wall_thickness, Some(0.75));
        assert_eq!(layout.suggestions.len(), 1);
    }

    #[test]
    fn test_invalid_json_is_error() {
        let result = GeneratedLayout::from_json("{ not json");
        assert!(matches!(result, Err(Error::Json(_))));
    }

    #[test]
    fn test_empty_layout_is_error() {
        let result = GeneratedLayout::from_json(r#"{"rooms": []}"#);
        assert!(matches!(result, Err(Error::EmptyLayout)));
    }

    #[test]
    fn test_sanitize_clamps_values() {
        let json = r#"{
            "rooms": [
                {
                    "id": "a", "type": "bedroom", "x": 0, "y": 0, "width": 10, "height": 10,
                    "floor": 0,
                    "doors": [{"position": "left", "offset": 140, "width": -2}],
                    "windows": [{"position": "top", "offset": -10, "width": 3}]
                },
                { "id": "bad", "type": "storage", "x": 0, "y": 0, "width": 0, "height": 10 }
            ],
            "efficiency": 3.5
        }"#;

        let layout = GeneratedLayout::from_json(json).unwrap();

        assert_eq!(layout.rooms.len(), 1);
        let room = &layout.rooms[0];
        assert_eq!(room.floor, 1);
        assert_eq!(room.doors[0].offset, 100.0);
        assert_eq!(room.doors[0].width, 0.0);
        assert_eq!(room.windows[0].offset, 0.0);
        assert_eq!(layout.efficiency, 1.0);
    }
}
