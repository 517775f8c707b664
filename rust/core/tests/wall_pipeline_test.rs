// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Whole-pipeline checks: adjacency → partition → segmentation on a small
//! apartment layout.

use approx::assert_relative_eq;
use plan_lite_core::{
    build_wall_segments, get_adjacent_segments, owns_segment, resolve_wall, segment_room,
    GeneratedLayout, Room, RoomType, RunKind, Side, WallSegmentInfo,
};

/// Two floors; ground floor is a 3x2 block with a balcony below the living room.
///
/// ```text
///  y=0  +---------+------+------+
///       | living  | kit  | bath |
///  y=12 +----+----+------+------+
///       |balc|    bed-1  | bed-2|
///  y=20 +----+-----------+------+
/// ```
fn apartment() -> GeneratedLayout {
    GeneratedLayout::new(vec![
        Room::new("living", RoomType::Living, 0.0, 0.0, 16.0, 12.0)
            .with_door(Side::Top, 50.0, 3.5)
            .with_window(Side::Left, 50.0, 4.0)
            .with_window(Side::Right, 50.0, 3.0),
        Room::new("kitchen", RoomType::Kitchen, 16.0, 0.0, 10.0, 12.0)
            .with_door(Side::Left, 25.0, 3.0)
            .with_window(Side::Top, 50.0, 3.0),
        Room::new("bath", RoomType::Bathroom, 26.0, 0.0, 8.0, 12.0).with_door(Side::Left, 70.0, 2.5),
        Room::new("balcony", RoomType::Balcony, 0.0, 12.0, 6.0, 8.0).with_door(Side::Top, 50.0, 3.0),
        Room::new("bed-1", RoomType::Bedroom, 6.0, 12.0, 20.0, 8.0)
            .with_door(Side::Top, 30.0, 3.0)
            .with_window(Side::Bottom, 50.0, 4.0),
        Room::new("bed-2", RoomType::Bedroom, 26.0, 12.0, 8.0, 8.0).with_door(Side::Left, 50.0, 3.0),
        Room::new("upper", RoomType::Study, 16.0, 0.0, 10.0, 12.0).on_floor(2),
    ])
}

fn to_frame(segment: &WallSegmentInfo, offset: f64) -> (f64, f64) {
    (segment.start + offset, segment.end + offset)
}

#[test]
fn test_two_room_scenario() {
    let rooms = vec![
        Room::new("A", RoomType::Living, 0.0, 0.0, 10.0, 10.0),
        Room::new("B", RoomType::Bedroom, 10.0, 0.0, 10.0, 10.0),
    ];

    assert_eq!(
        resolve_wall(&rooms[0], Side::Right, &rooms),
        vec![WallSegmentInfo::shared(0.0, 10.0, "B")]
    );
    assert_eq!(
        resolve_wall(&rooms[1], Side::Left, &rooms),
        vec![WallSegmentInfo::shared(0.0, 10.0, "A")]
    );

    for side in [Side::Top, Side::Bottom, Side::Left] {
        assert_eq!(
            resolve_wall(&rooms[0], side, &rooms),
            vec![WallSegmentInfo::exterior(0.0, 10.0)]
        );
    }
    for side in [Side::Top, Side::Bottom, Side::Right] {
        assert_eq!(
            resolve_wall(&rooms[1], side, &rooms),
            vec![WallSegmentInfo::exterior(0.0, 10.0)]
        );
    }
}

#[test]
fn test_adjacency_is_symmetric() {
    let layout = apartment();
    let rooms = layout.rooms_on_floor(1);

    for room in &rooms {
        for side in Side::ALL {
            for segment in get_adjacent_segments(room, side, &rooms) {
                let neighbor_id = segment.adjacent_room_id.as_deref().unwrap();
                let neighbor = rooms.iter().find(|r| r.id == neighbor_id).unwrap();

                let back = get_adjacent_segments(neighbor, side.opposite(), &rooms);
                let mirrored = back
                    .iter()
                    .find(|s| s.adjacent_room_id.as_deref() == Some(room.id.as_str()))
                    .unwrap_or_else(|| panic!("{} not seen from {}", room.id, neighbor.id));

                let (room_start, _) = room.wall_span(side);
                let (neighbor_start, _) = neighbor.wall_span(side.opposite());
                let (a0, a1) = to_frame(&segment, room_start);
                let (b0, b1) = to_frame(mirrored, neighbor_start);
                assert_relative_eq!(a0, b0, epsilon = 1e-9);
                assert_relative_eq!(a1, b1, epsilon = 1e-9);
            }
        }
    }
}

#[test]
fn test_partition_covers_every_wall() {
    let layout = apartment();
    let rooms = layout.rooms_on_floor(1);

    for room in &rooms {
        for side in Side::ALL {
            let length = room.wall_length(side);
            let segments = resolve_wall(room, side, &rooms);

            assert_eq!(segments.first().unwrap().start, 0.0);
            assert_eq!(segments.last().unwrap().end, length);
            for pair in segments.windows(2) {
                assert_eq!(pair[0].end, pair[1].start, "{} {:?}", room.id, side);
            }
            assert!(segments.iter().all(|s| s.end > s.start));
            assert!(segments.iter().all(|s| s.is_shared == s.adjacent_room_id.is_some()));
        }
    }
}

#[test]
fn test_runs_cover_every_wall() {
    let layout = apartment();
    let rooms = layout.rooms_on_floor(1);

    for room in &rooms {
        for wall in segment_room(room, &rooms) {
            assert_eq!(wall.runs.first().unwrap().start, 0.0);
            assert_eq!(wall.runs.last().unwrap().end, wall.length);
            for pair in wall.runs.windows(2) {
                assert_eq!(pair[0].end, pair[1].start, "{} {:?}", room.id, wall.side);
            }
            assert!(wall.runs.iter().all(|r| r.end > r.start));
        }
    }
}

#[test]
fn test_shared_runs_have_exactly_one_owner() {
    let layout = apartment();
    let rooms = layout.rooms_on_floor(1);

    for room in &rooms {
        for side in Side::ALL {
            for segment in resolve_wall(room, side, &rooms).iter().filter(|s| s.is_shared) {
                let neighbor_id = segment.adjacent_room_id.as_deref().unwrap();
                let neighbor = rooms.iter().find(|r| r.id == neighbor_id).unwrap();
                let mirrored = resolve_wall(neighbor, side.opposite(), &rooms)
                    .into_iter()
                    .find(|s| s.adjacent_room_id.as_deref() == Some(room.id.as_str()))
                    .unwrap();

                assert_ne!(owns_segment(room, segment), owns_segment(neighbor, &mirrored));
            }
        }
    }
}

#[test]
fn test_no_window_on_shared_runs() {
    let mut layout = apartment();
    // windows deliberately placed on interior walls
    for room in &mut layout.rooms {
        for side in Side::ALL {
            room.windows.push(plan_lite_core::Window {
                position: side,
                offset: 50.0,
                width: 2.0,
            });
        }
    }
    let rooms = layout.rooms_on_floor(1);

    for room in &rooms {
        for wall in segment_room(room, &rooms) {
            assert!(wall
                .runs
                .iter()
                .filter(|r| r.is_shared())
                .all(|r| r.kind != RunKind::Window));
        }
    }
}

#[test]
fn test_pipeline_is_idempotent() {
    let layout = apartment();
    let rooms = layout.rooms_on_floor(1);

    let first: Vec<_> = rooms.iter().map(|r| segment_room(r, &rooms)).collect();
    let second: Vec<_> = rooms.iter().map(|r| segment_room(r, &rooms)).collect();
    assert_eq!(first, second);
}

#[test]
fn test_floors_do_not_interact() {
    let layout = apartment();
    let all = layout.rooms.clone();
    let upper = all.iter().find(|r| r.id == "upper").unwrap();

    // same footprint as the kitchen, different floor: no adjacency at all
    for side in Side::ALL {
        assert_eq!(
            resolve_wall(upper, side, &all),
            build_wall_segments(upper.wall_length(side), &[])
        );
    }
}

#[test]
fn test_living_room_bottom_wall() {
    let layout = apartment();
    let rooms = layout.rooms_on_floor(1);
    let living = &rooms[0];

    // balcony under 0..6, bed-1 under 6..16
    assert_eq!(
        resolve_wall(living, Side::Bottom, &rooms),
        vec![
            WallSegmentInfo::shared(0.0, 6.0, "balcony"),
            WallSegmentInfo::shared(6.0, 16.0, "bed-1"),
        ]
    );

    // both neighbours sort before "living" and draw this wall themselves
    let walls = segment_room(living, &rooms);
    let bottom = walls.iter().find(|w| w.side == Side::Bottom).unwrap();
    assert_eq!(bottom.rendered_runs().count(), 0);

    let bed = rooms.iter().find(|r| r.id == "bed-1").unwrap();
    let walls = segment_room(bed, &rooms);
    let top = walls.iter().find(|w| w.side == Side::Top).unwrap();
    let door = top.runs.iter().find(|r| r.kind.is_door()).unwrap();
    assert_relative_eq!(door.start, 4.5, epsilon = 1e-9);
    assert_relative_eq!(door.end, 7.5, epsilon = 1e-9);
    assert_eq!(door.adjacent_room_id.as_deref(), Some("living"));
    assert_eq!(top.rendered_runs().count(), top.runs.len());
}

#[test]
fn test_owner_places_neighbor_door() {
    let layout = apartment();
    let rooms = layout.rooms_on_floor(1);
    let bed = rooms.iter().find(|r| r.id == "bed-1").unwrap();

    // bed-2 declares a door on its left wall; bed-1 owns that wall
    let walls = segment_room(bed, &rooms);
    let right = walls.iter().find(|w| w.side == Side::Right).unwrap();
    let door = right.rendered_runs().find(|r| r.kind.is_door()).unwrap();

    assert_relative_eq!(door.start, 2.5, epsilon = 1e-9);
    assert_relative_eq!(door.end, 5.5, epsilon = 1e-9);
    assert_eq!(
        door.kind,
        RunKind::Door {
            is_main: false,
            swings_outward: true
        }
    );
}

#[test]
fn test_balcony_railing_and_shared_wall() {
    let layout = apartment();
    let rooms = layout.rooms_on_floor(1);
    let balcony = rooms.iter().find(|r| r.id == "balcony").unwrap();
    let walls = segment_room(balcony, &rooms);

    let top = walls.iter().find(|w| w.side == Side::Top).unwrap();
    assert!(top.runs.iter().all(|r| r.is_shared() && !top.is_railing(r)));
    // "balcony" < "living": the balcony owns and renders the shared wall
    assert_eq!(top.rendered_runs().count(), top.runs.len());

    let left = walls.iter().find(|w| w.side == Side::Left).unwrap();
    assert!(left.runs.iter().all(|r| left.is_railing(r)));

    let right = walls.iter().find(|w| w.side == Side::Right).unwrap();
    assert!(right.runs.iter().all(|r| !right.is_railing(r)));
}

fn assert_well_formed(walls: &[plan_lite_core::SegmentedWall]) {
    for wall in walls {
        for run in &wall.runs {
            assert!(run.start.is_finite() && run.end.is_finite(), "{:?} {run:?}", wall.side);
            assert!(run.end > run.start, "{:?} {run:?}", wall.side);
        }
    }
}

#[test]
fn test_malformed_rooms_degrade_to_empty_walls() {
    let malformed = [
        Room::new("neg", RoomType::Bedroom, 0.0, 0.0, -10.0, 8.0),
        Room::new("zero", RoomType::Bedroom, 0.0, 0.0, 10.0, 0.0),
        Room::new("nan", RoomType::Bedroom, 0.0, 0.0, 10.0, f64::NAN),
    ];

    for room in malformed {
        let room = room
            .with_door(Side::Left, 50.0, 3.0)
            .with_door(Side::Bottom, 50.0, 3.0)
            .with_window(Side::Top, 50.0, 3.0)
            .with_window(Side::Right, 50.0, 3.0);
        let rooms = vec![room.clone(), Room::new("ok", RoomType::Kitchen, 10.0, 0.0, 10.0, 8.0)];

        let walls = segment_room(&room, &rooms);
        assert_eq!(walls.len(), 4);
        assert_well_formed(&walls);
        for wall in &walls {
            if !(wall.length > 0.0) {
                assert!(wall.runs.is_empty(), "{} {:?}", room.id, wall.side);
            }
        }
    }
}

#[test]
fn test_oversized_and_malformed_openings() {
    let mut room = Room::new("a", RoomType::Living, 0.0, 0.0, 10.0, 8.0)
        .with_window(Side::Top, 50.0, 40.0)
        .with_door(Side::Bottom, f64::NAN, 3.0)
        .with_door(Side::Left, 50.0, f64::NAN);
    room.windows.push(plan_lite_core::Window {
        position: Side::Right,
        offset: 50.0,
        width: -4.0,
    });
    let rooms = vec![room.clone()];
    let walls = segment_room(&room, &rooms);
    assert_well_formed(&walls);

    // a window wider than its wall is clipped to the whole wall
    let top = walls.iter().find(|w| w.side == Side::Top).unwrap();
    assert_eq!(top.runs.len(), 1);
    assert_eq!(top.runs[0].kind, RunKind::Window);
    assert_eq!((top.runs[0].start, top.runs[0].end), (0.0, 10.0));

    // malformed openings leave their walls solid
    for side in [Side::Bottom, Side::Left, Side::Right] {
        let wall = walls.iter().find(|w| w.side == side).unwrap();
        assert_eq!(wall.runs.len(), 1, "{side:?}");
        assert_eq!(wall.runs[0].kind, RunKind::Solid);
    }
}
