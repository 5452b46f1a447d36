//! Public data model for generated floor geometry.

use crate::state::Room;
use crate::types::{Pos, TileKind};

pub const MAP_WIDTH: usize = 80;
pub const MAP_HEIGHT: usize = 24;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FloorPlan {
    pub width: usize,
    pub height: usize,
    pub tiles: Vec<TileKind>,
    pub rooms: Vec<Room>,
    pub player_start: Pos,
    pub stairs_up: Option<Pos>,
    pub stairs_down: Pos,
}

impl FloorPlan {
    /// Stable byte encoding of the geometry, used by determinism tests.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend((self.width as u32).to_le_bytes());
        bytes.extend((self.height as u32).to_le_bytes());
        for tile in &self.tiles {
            bytes.push(match tile {
                TileKind::Wall => 0,
                TileKind::Floor => 1,
                TileKind::UpStairs => 2,
                TileKind::DownStairs => 3,
            });
        }
        bytes.extend(self.player_start.y.to_le_bytes());
        bytes.extend(self.player_start.x.to_le_bytes());
        bytes.extend(self.stairs_down.y.to_le_bytes());
        bytes.extend(self.stairs_down.x.to_le_bytes());
        if let Some(up) = self.stairs_up {
            bytes.push(1);
            bytes.extend(up.y.to_le_bytes());
            bytes.extend(up.x.to_le_bytes());
        } else {
            bytes.push(0);
        }
        bytes.extend((self.rooms.len() as u32).to_le_bytes());
        for room in &self.rooms {
            bytes.extend((room.x as u32).to_le_bytes());
            bytes.extend((room.y as u32).to_le_bytes());
            bytes.extend((room.width as u32).to_le_bytes());
            bytes.extend((room.height as u32).to_le_bytes());
        }
        bytes
    }
}
