//! Stable snapshot hashing for deterministic verification.
//! This module exists to keep hashing concerns separate from simulation code.
//! It does not own save-file persistence.

use std::hash::Hasher;

use xxhash_rust::xxh3::Xxh3;

use super::*;

impl Game {
    /// Order-stable digest of the observable run state. Two runs with the
    /// same seed and the same action script must agree on this value.
    pub fn snapshot_hash(&self) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.write_u64(self.seed);
        hasher.write_u8(self.state.floor_index);

        let player = self.state.player();
        hasher.write_i32(player.pos.x);
        hasher.write_i32(player.pos.y);
        hasher.write_i32(player.hp);
        hasher.write_i32(player.max_hp);
        hasher.write_i32(player.attack);
        hasher.write_i32(player.defense);

        hasher.write_i32(self.state.gold);
        hasher.write_i32(self.state.xp);
        hasher.write_i32(self.state.level);

        for kind in &self.state.inventory {
            write_item_kind(&mut hasher, *kind);
        }

        let mut enemies: Vec<&Actor> = self
            .state
            .actors
            .iter()
            .filter(|(id, _)| *id != self.state.player_id)
            .map(|(_, actor)| actor)
            .collect();
        enemies.sort_by_key(|actor| (actor.pos.y, actor.pos.x));
        for enemy in enemies {
            hasher.write_u8(enemy.kind as u8);
            hasher.write_i32(enemy.pos.x);
            hasher.write_i32(enemy.pos.y);
            hasher.write_i32(enemy.hp);
        }

        hasher.write_usize(self.state.traps.len());
        for pos in [self.state.stairs_up, self.state.stairs_down].into_iter().flatten() {
            hasher.write_i32(pos.x);
            hasher.write_i32(pos.y);
        }
        hasher.finish()
    }
}

fn write_item_kind(hasher: &mut Xxh3, kind: ItemKind) {
    match kind {
        ItemKind::Consumable(key) => {
            hasher.write_u8(0);
            hasher.write(key.as_bytes());
        }
        ItemKind::Weapon(key) => {
            hasher.write_u8(1);
            hasher.write(key.as_bytes());
        }
        ItemKind::Armor(key) => {
            hasher.write_u8(2);
            hasher.write(key.as_bytes());
        }
        ItemKind::Currency(value) => {
            hasher.write_u8(3);
            hasher.write_i32(value);
        }
    }
}
