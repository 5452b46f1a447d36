//! Field-of-view and line-of-sight calculations for map visibility.
//! This module exists to keep sight rules deterministic and isolated.
//! It does not own movement planning or enemy targeting policy.

use super::*;
use crate::state::Map;

fn transform_octant(orig: Pos, x: i32, y: i32, oct: u8) -> Pos {
    match oct {
        0 => Pos { y: orig.y - y, x: orig.x + x },
        1 => Pos { y: orig.y - x, x: orig.x + y },
        2 => Pos { y: orig.y - x, x: orig.x - y },
        3 => Pos { y: orig.y - y, x: orig.x - x },
        4 => Pos { y: orig.y + y, x: orig.x - x },
        5 => Pos { y: orig.y + x, x: orig.x - y },
        6 => Pos { y: orig.y + x, x: orig.x + y },
        7 => Pos { y: orig.y + y, x: orig.x + x },
        _ => orig,
    }
}

pub fn compute_fov(map: &mut Map, origin: Pos, range: i32) {
    let prev_explored = map.explored.clone();
    map.clear_visible();
    map.set_visible(origin, true);
    for octant in 0..8 {
        scan_octant(map, origin, range, 1, Slope::new(1, 1), Slope::new(0, 1), octant);
    }

    let min_y = (origin.y - range).max(0);
    let max_y = (origin.y + range + 1).min(map.height as i32);
    let min_x = (origin.x - range).max(0);
    let max_x = (origin.x + range + 1).min(map.width as i32);

    // Shadowcasting alone lets light bend around some corners; a bresenham
    // post-filter strips those tiles and undoes their explored marks.
    for y in min_y..max_y {
        for x in min_x..max_x {
            let p = Pos { y, x };
            if p == origin || !map.is_visible(p) {
                continue;
            }
            if !has_direct_line_of_sight(map, origin, p) {
                let idx = (y as usize) * map.width + (x as usize);
                map.visible[idx] = false;
                map.explored[idx] = prev_explored[idx];
            }
        }
    }
}

#[derive(Clone, Copy)]
struct Slope {
    y: i32,
    x: i32,
}

impl Slope {
    fn new(y: i32, x: i32) -> Self {
        Self { y, x }
    }

    fn greater_or_equal(&self, other: &Slope) -> bool {
        self.y * other.x >= other.y * self.x
    }

    fn greater_than(&self, other: &Slope) -> bool {
        self.y * other.x > other.y * self.x
    }
}

fn scan_octant(map: &mut Map, orig: Pos, range: i32, dist: i32, start: Slope, end: Slope, oct: u8) {
    if dist > range {
        return;
    }
    let range_u = u32::try_from(range).unwrap_or(0);
    let mut blocked = false;
    let mut cur_start = start;
    for y in (0..=dist).rev() {
        let top = Slope::new(2 * y + 1, 2 * dist - 1);
        let bot = Slope::new(2 * y - 1, 2 * dist + 1);
        if cur_start.greater_or_equal(&bot) && top.greater_than(&end) {
            let p = transform_octant(orig, dist, y, oct);
            if manhattan(orig, p) <= range_u {
                map.set_visible(p, true);
            }
            if map.is_opaque(p) {
                if !blocked {
                    scan_octant(map, orig, range, dist + 1, cur_start, top, oct);
                    blocked = true;
                }
                cur_start = bot;
            } else if blocked {
                blocked = false;
            }
        }
    }
    if !blocked {
        scan_octant(map, orig, range, dist + 1, cur_start, end, oct);
    }
}

fn has_direct_line_of_sight(map: &Map, origin: Pos, target: Pos) -> bool {
    let dx = target.x - origin.x;
    let dy = target.y - origin.y;
    let sx = dx.signum();
    let sy = dy.signum();
    let total_dist_x = dx.abs();
    let total_dist_y = dy.abs();

    let mut x = origin.x;
    let mut y = origin.y;
    let mut current_step_x = 0;
    let mut current_step_y = 0;

    while current_step_x < total_dist_x || current_step_y < total_dist_y {
        let lhs = (1 + 2 * current_step_x) * total_dist_y;
        let rhs = (1 + 2 * current_step_y) * total_dist_x;

        if lhs == rhs {
            x += sx;
            y += sy;
            current_step_x += 1;
            current_step_y += 1;
        } else if lhs < rhs {
            x += sx;
            current_step_x += 1;
        } else {
            y += sy;
            current_step_y += 1;
        }

        if x == target.x && y == target.y {
            break;
        }
        if map.is_opaque(Pos { y, x }) {
            return false;
        }
    }
    true
}

fn manhattan(a: Pos, b: Pos) -> u32 {
    a.y.abs_diff(b.y) + a.x.abs_diff(b.x)
}

#[allow(dead_code)]
pub(super) fn draw_map_diag(map: &Map, player: Pos) -> String {
    let mut text = String::new();
    for y in 0..map.height {
        for x in 0..map.width {
            let p = Pos { y: y as i32, x: x as i32 };
            let c = if p == player {
                '@'
            } else {
                match map.tile_at(p) {
                    TileKind::Wall => '#',
                    TileKind::UpStairs => '<',
                    TileKind::DownStairs => '>',
                    TileKind::Floor => '.',
                }
            };
            let v = if map.is_visible(p) { 'v' } else { 'h' };
            let e = if map.is_explored(p) { 'e' } else { 'u' };
            text.push_str(&format!("{c}{v}{e} "));
        }
        text.push('\n');
    }
    text
}
