//! Deterministic shortest-path search for enemy movement.
//! This module exists so navigation rules stay reusable and ordered.
//! It does not own chase policy; callers decide when to path and when to
//! fall back to greedy steps.

use std::collections::{BTreeMap, BTreeSet};

use super::*;
use crate::state::Map;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub(super) struct OpenNode {
    f: u32,
    h: u32,
    y: i32,
    x: i32,
}

/// A* over walkable tiles. Tiles in `occupied` are blocked as transit, but
/// the goal itself may be occupied (the player's tile when chasing). The
/// returned path excludes `start` and ends on `goal`.
pub(super) fn astar_path(
    map: &Map,
    start: Pos,
    goal: Pos,
    occupied: &BTreeSet<Pos>,
) -> Option<Vec<Pos>> {
    if !map.is_walkable(start) || !map.is_walkable(goal) {
        return None;
    }
    if start == goal {
        return Some(vec![]);
    }
    let mut open_set = BTreeSet::new();
    let mut g_score = BTreeMap::new();
    let mut came_from = BTreeMap::new();
    let h = manhattan(start, goal);
    open_set.insert(OpenNode { f: h, h, y: start.y, x: start.x });
    g_score.insert(start, 0);
    while let Some(curr) = open_set.pop_first() {
        let p = Pos { y: curr.y, x: curr.x };
        if p == goal {
            return Some(reconstruct_path(&came_from, start, goal));
        }
        let cur_g = *g_score.get(&p).expect("current node must have g-score");
        for n in neighbors(p) {
            if !map.is_walkable(n) || (occupied.contains(&n) && n != goal) {
                continue;
            }
            let tg = cur_g + 1;
            if tg < *g_score.get(&n).unwrap_or(&u32::MAX) {
                came_from.insert(n, p);
                g_score.insert(n, tg);
                let h = manhattan(n, goal);
                open_set.insert(OpenNode { f: tg + h, h, y: n.y, x: n.x });
            }
        }
    }
    None
}

fn reconstruct_path(came: &BTreeMap<Pos, Pos>, start: Pos, goal: Pos) -> Vec<Pos> {
    let mut p = goal;
    let mut result = vec![p];
    while p != start {
        p = *came.get(&p).expect("path must be reconstructible");
        result.push(p);
    }
    result.reverse();
    result.remove(0);
    result
}

pub(super) fn neighbors(p: Pos) -> [Pos; 4] {
    [
        Pos { y: p.y - 1, x: p.x },
        Pos { y: p.y, x: p.x + 1 },
        Pos { y: p.y + 1, x: p.x },
        Pos { y: p.y, x: p.x - 1 },
    ]
}

pub(super) fn manhattan(a: Pos, b: Pos) -> u32 {
    a.x.abs_diff(b.x) + a.y.abs_diff(b.y)
}
