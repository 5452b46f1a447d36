//! Deterministic floor geometry generation.
//!
//! Everything here is a pure function of (run seed, floor index): room
//! placement, corridor carving, and staircase selection never touch the
//! game's RNG, so the same run seed always yields the same dungeon.
//! Spawning entities onto the generated geometry belongs to the floor
//! transition logic, not to this module.

mod layout;
mod model;
mod seed;

pub use model::{FloorPlan, MAP_HEIGHT, MAP_WIDTH};

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::Rng;

use crate::content::SPAWN_ATTEMPTS;
use crate::state::{Map, Room};
use crate::types::{Pos, TileKind};

use layout::{build_room_layout, carve_corridors, carve_room};
use seed::floor_rng;

pub fn generate_floor(run_seed: u64, floor_index: u8) -> FloorPlan {
    let mut geometry_rng = floor_rng(run_seed, floor_index);
    let width = MAP_WIDTH;
    let height = MAP_HEIGHT;

    let room_layout = build_room_layout(&mut geometry_rng, width, height);
    let mut tiles = vec![TileKind::Wall; width * height];
    for room in &room_layout.rooms {
        carve_room(&mut tiles, width, room);
    }
    carve_corridors(&mut tiles, width, &mut geometry_rng, &room_layout.rooms);

    let rooms: Vec<Room> = room_layout
        .rooms
        .iter()
        .map(|r| Room { x: r.x, y: r.y, width: r.width, height: r.height })
        .collect();

    let entry = room_layout.entry_tile;
    let down = room_layout.down_stairs_tile;
    tiles[(down.y as usize) * width + (down.x as usize)] = TileKind::DownStairs;

    // The entry room hosts the up staircase on every floor below the first;
    // the player starts beside it, never on it.
    let (player_start, stairs_up) = if floor_index > 1 {
        tiles[(entry.y as usize) * width + (entry.x as usize)] = TileKind::UpStairs;
        let start = adjacent_floor_tile(&tiles, width, height, entry)
            .unwrap_or(Pos { y: entry.y, x: entry.x - 1 });
        (start, Some(entry))
    } else {
        (entry, None)
    };

    FloorPlan {
        width,
        height,
        tiles,
        rooms,
        player_start,
        stairs_up,
        stairs_down: down,
    }
}

fn adjacent_floor_tile(tiles: &[TileKind], width: usize, height: usize, pos: Pos) -> Option<Pos> {
    let candidates = [
        Pos { y: pos.y, x: pos.x - 1 },
        Pos { y: pos.y, x: pos.x + 1 },
        Pos { y: pos.y - 1, x: pos.x },
        Pos { y: pos.y + 1, x: pos.x },
    ];
    candidates.into_iter().find(|p| {
        p.x >= 0
            && p.y >= 0
            && (p.x as usize) < width
            && (p.y as usize) < height
            && tiles[(p.y as usize) * width + (p.x as usize)] == TileKind::Floor
    })
}

/// Sample a walkable tile, giving up silently after a bounded number of
/// attempts so spawn placement can never wedge floor generation.
pub fn random_walkable_position(map: &Map, rng: &mut ChaCha8Rng) -> Option<Pos> {
    for _ in 0..SPAWN_ATTEMPTS {
        let x = (rng.next_u64() as usize) % map.width;
        let y = (rng.next_u64() as usize) % map.height;
        let pos = Pos { y: y as i32, x: x as i32 };
        if map.is_walkable(pos) {
            return Some(pos);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use proptest::prelude::*;
    use rand_chacha::rand_core::SeedableRng;

    use super::*;

    fn plan_tile(plan: &FloorPlan, pos: Pos) -> TileKind {
        plan.tiles[(pos.y as usize) * plan.width + (pos.x as usize)]
    }

    fn reachable_floor_count(plan: &FloorPlan, start: Pos) -> usize {
        let mut seen = vec![false; plan.width * plan.height];
        let mut queue = VecDeque::from([start]);
        seen[(start.y as usize) * plan.width + (start.x as usize)] = true;
        let mut count = 0;
        while let Some(pos) = queue.pop_front() {
            count += 1;
            for (dy, dx) in [(-1, 0), (1, 0), (0, -1), (0, 1)] {
                let next = Pos { y: pos.y + dy, x: pos.x + dx };
                if next.x < 0
                    || next.y < 0
                    || next.x as usize >= plan.width
                    || next.y as usize >= plan.height
                {
                    continue;
                }
                let idx = (next.y as usize) * plan.width + (next.x as usize);
                if seen[idx] || plan.tiles[idx] == TileKind::Wall {
                    continue;
                }
                seen[idx] = true;
                queue.push_back(next);
            }
        }
        count
    }

    #[test]
    fn same_seed_and_floor_regenerate_identical_geometry() {
        let first = generate_floor(777, 3);
        let second = generate_floor(777, 3);
        assert_eq!(first.canonical_bytes(), second.canonical_bytes());
    }

    #[test]
    fn different_floors_differ_in_geometry() {
        let first = generate_floor(777, 1);
        let second = generate_floor(777, 2);
        assert_ne!(first.canonical_bytes(), second.canonical_bytes());
    }

    #[test]
    fn player_start_is_floor_and_stairs_are_marked() {
        for floor in 1..=5u8 {
            let plan = generate_floor(4242, floor);
            assert_eq!(plan_tile(&plan, plan.player_start), TileKind::Floor);
            assert_eq!(plan_tile(&plan, plan.stairs_down), TileKind::DownStairs);
            match plan.stairs_up {
                Some(up) => {
                    assert!(floor > 1);
                    assert_eq!(plan_tile(&plan, up), TileKind::UpStairs);
                    assert_ne!(up, plan.player_start);
                }
                None => assert_eq!(floor, 1),
            }
        }
    }

    #[test]
    fn random_walkable_position_lands_on_floor() {
        let plan = generate_floor(99, 2);
        let mut map = Map::new(plan.width, plan.height);
        map.tiles = plan.tiles.clone();
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        for _ in 0..20 {
            let pos = random_walkable_position(&map, &mut rng).expect("open floor has room");
            assert!(map.is_walkable(pos));
        }
    }

    #[test]
    fn random_walkable_position_gives_up_on_solid_map() {
        let map = Map::new(10, 10);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(random_walkable_position(&map, &mut rng), None);
    }

    proptest! {
        #[test]
        fn all_non_wall_tiles_are_mutually_reachable(seed in any::<u64>(), floor in 1u8..=5) {
            let plan = generate_floor(seed, floor);
            let total_open =
                plan.tiles.iter().filter(|tile| **tile != TileKind::Wall).count();
            let reached = reachable_floor_count(&plan, plan.player_start);
            prop_assert_eq!(reached, total_open, "disconnected floor for seed {}", seed);
        }

        #[test]
        fn stairs_down_never_coincides_with_player_start(seed in any::<u64>(), floor in 1u8..=5) {
            let plan = generate_floor(seed, floor);
            prop_assert_ne!(plan.player_start, plan.stairs_down);
        }
    }
}
