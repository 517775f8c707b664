// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Decorative furniture per room type
//!
//! One static table maps each room type to the furniture it shows. Both
//! renderers read the same descriptors: the 2D plan draws glyphs, the 3D
//! scene extrudes boxes.

use crate::model::RoomType;
use serde::Serialize;

/// Furniture glyph / mesh family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FurnitureKind {
    Bed,
    Wardrobe,
    Sofa,
    CoffeeTable,
    Tv,
    DiningTable,
    Counter,
    Stove,
    Sink,
    Fridge,
    Toilet,
    Shower,
    Vanity,
    Desk,
    Chair,
    Bookshelf,
    Car,
    Washer,
    Shelf,
    Altar,
    Stairs,
    Planter,
    Bench,
}

impl FurnitureKind {
    /// Drawn as a circle in plan view
    pub fn is_round(self) -> bool {
        matches!(self, FurnitureKind::Planter | FurnitureKind::Toilet | FurnitureKind::Sink)
    }
}

/// One piece of furniture placed relative to the room footprint
///
/// `x`, `y`, `width` and `depth` are fractions (0-1) of the room's width and
/// height, measured from its top-left corner. `height` is in feet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FurnitureItem {
    pub kind: FurnitureKind,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub depth: f64,
    pub height: f64,
}

const fn item(kind: FurnitureKind, x: f64, y: f64, width: f64, depth: f64, height: f64) -> FurnitureItem {
    FurnitureItem {
        kind,
        x,
        y,
        width,
        depth,
        height,
    }
}

use FurnitureKind as F;

static FURNITURE_TABLE: &[(RoomType, &[FurnitureItem])] = &[
    (
        RoomType::Living,
        &[
            item(F::Sofa, 0.15, 0.65, 0.5, 0.2, 2.8),
            item(F::CoffeeTable, 0.3, 0.4, 0.25, 0.15, 1.5),
            item(F::Tv, 0.25, 0.05, 0.4, 0.06, 3.5),
        ],
    ),
    (
        RoomType::Bedroom,
        &[
            item(F::Bed, 0.25, 0.2, 0.45, 0.55, 2.0),
            item(F::Wardrobe, 0.75, 0.05, 0.2, 0.15, 7.0),
        ],
    ),
    (
        RoomType::MasterBedroom,
        &[
            item(F::Bed, 0.2, 0.2, 0.5, 0.55, 2.0),
            item(F::Wardrobe, 0.75, 0.05, 0.2, 0.15, 7.0),
            item(F::Desk, 0.75, 0.75, 0.2, 0.15, 2.5),
        ],
    ),
    (
        RoomType::Kitchen,
        &[
            item(F::Counter, 0.05, 0.05, 0.9, 0.18, 3.0),
            item(F::Stove, 0.15, 0.06, 0.2, 0.15, 3.1),
            item(F::Sink, 0.6, 0.07, 0.15, 0.12, 3.1),
            item(F::Fridge, 0.8, 0.75, 0.15, 0.18, 6.0),
        ],
    ),
    (
        RoomType::Bathroom,
        &[
            item(F::Toilet, 0.1, 0.65, 0.2, 0.25, 1.5),
            item(F::Vanity, 0.55, 0.05, 0.35, 0.2, 3.0),
            item(F::Shower, 0.6, 0.6, 0.35, 0.35, 0.3),
        ],
    ),
    (
        RoomType::Dining,
        &[
            item(F::DiningTable, 0.25, 0.3, 0.5, 0.4, 2.5),
            item(F::Chair, 0.15, 0.4, 0.08, 0.2, 3.0),
            item(F::Chair, 0.77, 0.4, 0.08, 0.2, 3.0),
        ],
    ),
    (
        RoomType::Study,
        &[
            item(F::Desk, 0.1, 0.1, 0.45, 0.2, 2.5),
            item(F::Chair, 0.25, 0.33, 0.15, 0.15, 3.0),
            item(F::Bookshelf, 0.75, 0.05, 0.2, 0.12, 6.0),
        ],
    ),
    (
        RoomType::Balcony,
        &[
            item(F::Planter, 0.08, 0.2, 0.12, 0.4, 2.0),
            item(F::Chair, 0.5, 0.3, 0.15, 0.4, 3.0),
        ],
    ),
    (
        RoomType::Garden,
        &[
            item(F::Planter, 0.1, 0.1, 0.15, 0.15, 3.0),
            item(F::Planter, 0.75, 0.1, 0.15, 0.15, 3.0),
            item(F::Bench, 0.3, 0.7, 0.4, 0.12, 1.5),
        ],
    ),
    (RoomType::Garage, &[item(F::Car, 0.2, 0.15, 0.6, 0.7, 4.5)]),
    (
        RoomType::Utility,
        &[
            item(F::Washer, 0.1, 0.1, 0.3, 0.3, 3.0),
            item(F::Sink, 0.6, 0.1, 0.25, 0.25, 3.0),
        ],
    ),
    (
        RoomType::Storage,
        &[
            item(F::Shelf, 0.05, 0.05, 0.9, 0.2, 6.0),
            item(F::Shelf, 0.05, 0.75, 0.9, 0.2, 6.0),
        ],
    ),
    (RoomType::Pooja, &[item(F::Altar, 0.3, 0.05, 0.4, 0.25, 3.5)]),
    (RoomType::Staircase, &[item(F::Stairs, 0.1, 0.05, 0.8, 0.9, 0.5)]),
];

/// Furniture shown in a room of the given type (empty for unfurnished types)
pub fn furniture_for(room_type: RoomType) -> &'static [FurnitureItem] {
    FURNITURE_TABLE
        .iter()
        .find(|(kind, _)| *kind == room_type)
        .map(|(_, items)| *items)
        .unwrap_or(&[])
}
