//! Room placement and corridor carving on a fixed cell grid.
//!
//! The canvas is divided into `CELL_COLUMNS` by `CELL_ROWS` equal cells and
//! each cell hosts at most one room, jittered inside the cell interior.
//! Rooms in distinct cells can never touch, so placement needs no rejection
//! sampling. Corridors chain the rooms in serpentine cell order, which
//! keeps every room reachable by construction.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::Rng;

use crate::types::{Pos, TileKind};

const CELL_COLUMNS: usize = 5;
const CELL_ROWS: usize = 2;
const MIN_ROOM_WIDTH: usize = 5;
const MAX_ROOM_WIDTH: usize = 10;
const MIN_ROOM_HEIGHT: usize = 4;
const MAX_ROOM_HEIGHT: usize = 6;
/// At most this many cells stay roomless on a floor.
const MAX_EMPTY_CELLS: usize = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) struct RoomRect {
    pub(super) x: usize,
    pub(super) y: usize,
    pub(super) width: usize,
    pub(super) height: usize,
}

impl RoomRect {
    pub(super) fn center(self) -> Pos {
        Pos { y: (self.y + self.height / 2) as i32, x: (self.x + self.width / 2) as i32 }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(super) struct RoomLayout {
    pub(super) rooms: Vec<RoomRect>,
    pub(super) entry_tile: Pos,
    pub(super) down_stairs_tile: Pos,
}

/// Rooms come back in serpentine cell order; the entry room is the first
/// and the down staircase sits in the room farthest from it.
pub(super) fn build_room_layout(rng: &mut ChaCha8Rng, width: usize, height: usize) -> RoomLayout {
    let cell_width = width / CELL_COLUMNS;
    let cell_height = height / CELL_ROWS;

    let mut empty_cells_left = (rng.next_u64() as usize) % (MAX_EMPTY_CELLS + 1);
    let mut rooms = Vec::new();
    for (column, row) in serpentine_cells() {
        if empty_cells_left > 0 && rng.next_u64() % 4 == 0 {
            empty_cells_left -= 1;
            continue;
        }
        if let Some(room) =
            place_room_in_cell(rng, column * cell_width, row * cell_height, cell_width, cell_height)
        {
            rooms.push(room);
        }
    }
    if rooms.is_empty() {
        // Canvas too small for the cell grid; one clamped room keeps the
        // floor playable.
        rooms.push(RoomRect {
            x: 1,
            y: 1,
            width: MIN_ROOM_WIDTH.min(width.saturating_sub(2)).max(1),
            height: MIN_ROOM_HEIGHT.min(height.saturating_sub(2)).max(1),
        });
    }

    let entry_tile = rooms[0].center();
    let down_stairs_tile = rooms
        .iter()
        .map(|room| room.center())
        .max_by_key(|center| (manhattan(entry_tile, *center), center.y, center.x))
        .filter(|center| *center != entry_tile)
        // Single-room degenerate layout: keep the stairs off the entry tile.
        .unwrap_or(Pos { y: entry_tile.y, x: entry_tile.x + 1 });

    RoomLayout { rooms, entry_tile, down_stairs_tile }
}

/// One tile of wall on every side of the cell separates neighbouring rooms
/// and preserves the canvas border.
fn place_room_in_cell(
    rng: &mut ChaCha8Rng,
    cell_x: usize,
    cell_y: usize,
    cell_width: usize,
    cell_height: usize,
) -> Option<RoomRect> {
    let interior_width = cell_width.checked_sub(2)?;
    let interior_height = cell_height.checked_sub(2)?;
    if interior_width < MIN_ROOM_WIDTH || interior_height < MIN_ROOM_HEIGHT {
        return None;
    }
    let room_width = sample_range(rng, MIN_ROOM_WIDTH, interior_width.min(MAX_ROOM_WIDTH));
    let room_height = sample_range(rng, MIN_ROOM_HEIGHT, interior_height.min(MAX_ROOM_HEIGHT));
    let x = cell_x + 1 + sample_range(rng, 0, interior_width - room_width);
    let y = cell_y + 1 + sample_range(rng, 0, interior_height - room_height);
    Some(RoomRect { x, y, width: room_width, height: room_height })
}

fn sample_range(rng: &mut ChaCha8Rng, min_value: usize, max_value: usize) -> usize {
    min_value + (rng.next_u64() as usize) % (max_value - min_value + 1)
}

/// Cell coordinates row by row, alternating sweep direction, so that
/// consecutive cells are always grid neighbours.
fn serpentine_cells() -> Vec<(usize, usize)> {
    let mut cells = Vec::with_capacity(CELL_COLUMNS * CELL_ROWS);
    for row in 0..CELL_ROWS {
        let mut columns: Vec<usize> = (0..CELL_COLUMNS).collect();
        if row % 2 == 1 {
            columns.reverse();
        }
        cells.extend(columns.into_iter().map(|column| (column, row)));
    }
    cells
}

pub(super) fn carve_room(tiles: &mut [TileKind], width: usize, room: &RoomRect) {
    for y in room.y..room.y + room.height {
        let row_start = y * width + room.x;
        tiles[row_start..row_start + room.width].fill(TileKind::Floor);
    }
}

/// Connect consecutive rooms of the serpentine order with L-shaped
/// corridors. A chain over every room is enough for full connectivity;
/// the elbow side varies per link.
pub(super) fn carve_corridors(
    tiles: &mut [TileKind],
    width: usize,
    rng: &mut ChaCha8Rng,
    rooms: &[RoomRect],
) {
    for pair in rooms.windows(2) {
        let from = pair[0].center();
        let to = pair[1].center();
        let elbow = if rng.next_u64() & 1 == 0 {
            Pos { y: from.y, x: to.x }
        } else {
            Pos { y: to.y, x: from.x }
        };
        carve_span(tiles, width, from, elbow);
        carve_span(tiles, width, elbow, to);
    }
}

/// Carve one axis-aligned inclusive line of floor. Endpoints are room
/// centers or elbows between them, all interior to the canvas.
fn carve_span(tiles: &mut [TileKind], width: usize, from: Pos, to: Pos) {
    debug_assert!(from.x == to.x || from.y == to.y);
    let (dy, dx) = ((to.y - from.y).signum(), (to.x - from.x).signum());
    let mut cursor = from;
    loop {
        tiles[cursor.y as usize * width + cursor.x as usize] = TileKind::Floor;
        if cursor == to {
            break;
        }
        cursor = cursor.offset(dy, dx);
    }
}

fn manhattan(a: Pos, b: Pos) -> u32 {
    a.x.abs_diff(b.x) + a.y.abs_diff(b.y)
}
