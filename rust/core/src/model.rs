// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Core types for rooms, openings and generated layouts
//!
//! All lengths are in feet. Positions are plot-relative with the origin at
//! the top-left of the plot, `x` growing to the right and `y` growing down.

use serde::{Deserialize, Serialize};

/// Wall thickness used when a layout does not specify one (feet)
pub const DEFAULT_WALL_THICKNESS: f64 = 0.5;

/// One edge of a room rectangle
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Top,
    Bottom,
    Left,
    Right,
}

impl Side {
    /// All four sides in drawing order
    pub const ALL: [Side; 4] = [Side::Top, Side::Right, Side::Bottom, Side::Left];

    /// The side of a neighbour that faces this side
    pub fn opposite(self) -> Side {
        match self {
            Side::Top => Side::Bottom,
            Side::Bottom => Side::Top,
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// Top and bottom walls run along the X axis
    pub fn is_horizontal(self) -> bool {
        matches!(self, Side::Top | Side::Bottom)
    }

    /// Unit direction pointing from the wall into the room, in plan coordinates
    pub fn inward(self) -> (f64, f64) {
        match self {
            Side::Top => (0.0, 1.0),
            Side::Bottom => (0.0, -1.0),
            Side::Left => (1.0, 0.0),
            Side::Right => (-1.0, 0.0),
        }
    }
}

/// Room category
///
/// Unknown strings deserialize to [`RoomType::Other`] so that a new category
/// coming from the generator never breaks rendering.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RoomType {
    #[serde(alias = "living_room")]
    Living,
    Bedroom,
    MasterBedroom,
    Kitchen,
    Bathroom,
    #[serde(alias = "dining_room")]
    Dining,
    Study,
    Balcony,
    Garden,
    Garage,
    Utility,
    Storage,
    Pooja,
    Staircase,
    Corridor,
    #[serde(other)]
    Other,
}

impl RoomType {
    /// Open-air rooms get railings instead of walls on their exterior edges
    pub fn is_open_air(self) -> bool {
        matches!(self, RoomType::Balcony | RoomType::Garden)
    }
}

/// A door on one room edge
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Door {
    /// Edge the door sits on
    pub position: Side,
    /// Percent (0-100) along the edge, measured from its start corner
    pub offset: f64,
    /// Door width in feet
    pub width: f64,
    /// Primary entrance
    #[serde(default)]
    pub is_main: bool,
}

/// A window on one room edge
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Window {
    /// Edge the window sits on
    pub position: Side,
    /// Percent (0-100) along the edge, measured from its start corner
    pub offset: f64,
    /// Window width in feet
    pub width: f64,
}

fn default_floor() -> u32 {
    1
}

/// Axis-aligned rectangular room
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Room {
    pub id: String,
    #[serde(rename = "type")]
    pub room_type: RoomType,
    #[serde(default)]
    pub name: String,
    /// Top-left corner
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// 1 = ground floor
    #[serde(default = "default_floor")]
    pub floor: u32,
    /// Display hint only
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub doors: Vec<Door>,
    #[serde(default)]
    pub windows: Vec<Window>,
}

impl Room {
    /// Create a room with no openings on the ground floor
    pub fn new(id: impl Into<String>, room_type: RoomType, x: f64, y: f64, width: f64, height: f64) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            room_type,
            x,
            y,
            width,
            height,
            floor: 1,
            color: String::new(),
            doors: Vec::new(),
            windows: Vec::new(),
        }
    }

    /// Builder-style floor assignment
    pub fn on_floor(mut self, floor: u32) -> Self {
        self.floor = floor;
        self
    }

    /// Builder-style door
    pub fn with_door(mut self, position: Side, offset: f64, width: f64) -> Self {
        self.doors.push(Door {
            position,
            offset,
            width,
            is_main: false,
        });
        self
    }

    /// Builder-style window
    pub fn with_window(mut self, position: Side, offset: f64, width: f64) -> Self {
        self.windows.push(Window {
            position,
            offset,
            width,
        });
        self
    }

    /// Length of the wall on `side`
    #[inline]
    pub fn wall_length(&self, side: Side) -> f64 {
        if side.is_horizontal() {
            self.width
        } else {
            self.height
        }
    }

    /// Coordinate of the edge on the axis perpendicular to the wall
    #[inline]
    pub fn edge_position(&self, side: Side) -> f64 {
        match side {
            Side::Top => self.y,
            Side::Bottom => self.y + self.height,
            Side::Left => self.x,
            Side::Right => self.x + self.width,
        }
    }

    /// Absolute `[start, end]` interval covered by the wall along its running axis
    #[inline]
    pub fn wall_span(&self, side: Side) -> (f64, f64) {
        if side.is_horizontal() {
            (self.x, self.x + self.width)
        } else {
            (self.y, self.y + self.height)
        }
    }

    /// Doors on one edge
    pub fn doors_on(&self, side: Side) -> impl Iterator<Item = &Door> {
        self.doors.iter().filter(move |d| d.position == side)
    }

    /// Windows on one edge
    pub fn windows_on(&self, side: Side) -> impl Iterator<Item = &Window> {
        self.windows.iter().filter(move |w| w.position == side)
    }

    /// Finite position and a positive, finite footprint
    pub fn has_valid_footprint(&self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
            && self.width > 0.0
            && self.height > 0.0
    }

    /// Floor area in square feet
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    pub fn is_open_air(&self) -> bool {
        self.room_type.is_open_air()
    }
}

/// A complete generated layout, the unit exchanged with the layout generator
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedLayout {
    pub rooms: Vec<Room>,
    #[serde(default)]
    pub total_area: f64,
    /// Coverage ratio, 0-1
    #[serde(default)]
    pub efficiency: f64,
    #[serde(default)]
    pub suggestions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wall_thickness: Option<f64>,
}

impl GeneratedLayout {
    pub fn new(rooms: Vec<Room>) -> Self {
        let total_area = rooms.iter().map(Room::area).sum();
        Self {
            rooms,
            total_area,
            efficiency: 0.0,
            suggestions: Vec::new(),
            wall_thickness: None,
        }
    }

    /// Distinct floors present in the layout, ascending
    pub fn floors(&self) -> Vec<u32> {
        let mut floors: Vec<u32> = self.rooms.iter().map(|r| r.floor).collect();
        floors.sort_unstable();
        floors.dedup();
        floors
    }

    /// Rooms on one floor, in input order
    pub fn rooms_on_floor(&self, floor: u32) -> Vec<Room> {
        self.rooms
            .iter()
            .filter(|r| r.floor == floor)
            .cloned()
            .collect()
    }

    /// Wall thickness in feet, falling back to [`DEFAULT_WALL_THICKNESS`]
    pub fn effective_wall_thickness(&self) -> f64 {
        match self.wall_thickness {
            Some(t) if t.is_finite() && t > 0.0 => t,
            _ => DEFAULT_WALL_THICKNESS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_opposites() {
        for side in Side::ALL {
            assert_eq!(side.opposite().opposite(), side);
            assert_eq!(side.is_horizontal(), side.opposite().is_horizontal());
        }
    }

    #[test]
    fn test_wall_geometry() {
        let room = Room::new("a", RoomType::Kitchen, 4.0, 6.0, 12.0, 8.0);

        assert_eq!(room.wall_length(Side::Top), 12.0);
        assert_eq!(room.wall_length(Side::Left), 8.0);
        assert_eq!(room.edge_position(Side::Bottom), 14.0);
        assert_eq!(room.edge_position(Side::Right), 16.0);
        assert_eq!(room.wall_span(Side::Left), (6.0, 14.0));
        assert_eq!(room.area(), 96.0);
    }

    #[test]
    fn test_footprint_validity() {
        assert!(Room::new("a", RoomType::Kitchen, 0.0, 0.0, 12.0, 8.0).has_valid_footprint());
        assert!(!Room::new("a", RoomType::Kitchen, 0.0, 0.0, -12.0, 8.0).has_valid_footprint());
        assert!(!Room::new("a", RoomType::Kitchen, 0.0, 0.0, 12.0, 0.0).has_valid_footprint());
        assert!(!Room::new("a", RoomType::Kitchen, 0.0, 0.0, 12.0, f64::NAN).has_valid_footprint());
        assert!(!Room::new("a", RoomType::Kitchen, f64::INFINITY, 0.0, 12.0, 8.0).has_valid_footprint());
    }

    #[test]
    fn test_floors_sorted_and_distinct() {
        let layout = GeneratedLayout::new(vec![
            Room::new("a", RoomType::Bedroom, 0.0, 0.0, 10.0, 10.0).on_floor(2),
            Room::new("b", RoomType::Living, 0.0, 0.0, 10.0, 10.0),
            Room::new("c", RoomType::Study, 10.0, 0.0, 10.0, 10.0).on_floor(2),
        ]);

        assert_eq!(layout.floors(), vec![1, 2]);
        assert_eq!(layout.rooms_on_floor(2).len(), 2);
        assert_eq!(layout.total_area, 300.0);
    }

    #[test]
    fn test_effective_wall_thickness() {
        let mut layout = GeneratedLayout::new(vec![]);
        assert_eq!(layout.effective_wall_thickness(), DEFAULT_WALL_THICKNESS);
        layout.wall_thickness = Some(-1.0);
        assert_eq!(layout.effective_wall_thickness(), DEFAULT_WALL_THICKNESS);
        layout.wall_thickness = Some(0.75);
        assert_eq!(layout.effective_wall_thickness(), 0.75);
    }

    #[test]
    fn test_unknown_room_type_is_other() {
        let room: Room = serde_json::from_str(
            r#"{"id":"r1","type":"wine_cellar","x":0,"y":0,"width":5,"height":5}"#,
        )
        .unwrap();
        assert_eq!(room.room_type, RoomType::Other);
        assert_eq!(room.floor, 1);
        assert!(room.doors.is_empty());
    }
}
