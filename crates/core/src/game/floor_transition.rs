//! Floor-change mechanics and generated floor state installation.
//! This module exists to isolate transition rules and spawn initialization.
//! It does not own geometry generation or the action branch ordering.

use rand_chacha::rand_core::Rng;

use super::*;
use crate::content::{
    BOSS_KIND, CONSUMABLE_POOL, ENEMY_SPAWN_BASE, MIN_ENEMY_SPAWN_DISTANCE_SQ, TOTAL_FLOORS,
    enemy_spawn_table, keys,
};
use crate::mapgen::{generate_floor, random_walkable_position};
use crate::state::{GroundItem, Trap};

impl Game {
    /// Descending from the final floor is victory; the loop stops and no
    /// floor is ever generated past it.
    pub(super) fn descend(&mut self) {
        if self.state.floor_index >= TOTAL_FLOORS {
            self.state.push_message("You escape with the dungeon's heart. You have won!");
            self.outcome = Some(RunOutcome::Victory);
            return;
        }
        let next = self.state.floor_index + 1;
        self.install_floor(next);
        self.state.push_message(format!("You descend to floor {next}."));
    }

    pub(super) fn ascend(&mut self) {
        if self.state.floor_index <= 1 {
            self.state.push_message("You are on the topmost floor; the only way out is down.");
            return;
        }
        let previous = self.state.floor_index - 1;
        self.install_floor(previous);
        self.state.push_message(format!("You climb back to floor {previous}."));
    }

    /// Replace the world snapshot with a freshly generated floor. The
    /// player actor and the persistent progression fields survive; enemies,
    /// items, traps, and both sight masks start over.
    pub(super) fn install_floor(&mut self, floor_index: u8) {
        let plan = generate_floor(self.seed, floor_index);
        let mut map = Map::new(plan.width, plan.height);
        map.tiles = plan.tiles;

        let player_id = self.state.player_id;
        self.state.actors.retain(|id, _| id == player_id);
        self.state.actors[player_id].pos = plan.player_start;
        self.state.items.clear();
        self.state.traps.clear();

        self.state.rooms = plan.rooms;
        self.state.stairs_up = plan.stairs_up;
        self.state.stairs_down = Some(plan.stairs_down);
        self.state.floor_index = floor_index;
        self.state.map = map;

        self.spawn_enemies(floor_index);
        self.spawn_items(floor_index);
        self.generate_traps(floor_index);
        self.recompute_fov();
    }

    fn spawn_enemies(&mut self, floor_index: u8) {
        if floor_index == TOTAL_FLOORS {
            self.spawn_boss();
            return;
        }

        let table = enemy_spawn_table(floor_index);
        if table.is_empty() {
            return;
        }
        let enemy_count = ENEMY_SPAWN_BASE + 2 * floor_index as usize;
        for _ in 0..enemy_count {
            let kind = self.weighted_pick(&table);
            if let Some(pos) = self.sample_enemy_position() {
                self.insert_enemy(kind, pos);
            }
        }
    }

    /// The final floor spawns only the boss, placed in the last room of the
    /// layout order. A blocked room center falls back to sampling, staying
    /// inside the boss room when it can.
    fn spawn_boss(&mut self) {
        let player_pos = self.state.player().pos;
        let Some(boss_room) = self.state.rooms.last().copied() else {
            return;
        };
        let boss_pos = Some(boss_room.center())
            .filter(|pos| self.state.map.is_walkable(*pos) && *pos != player_pos)
            .or_else(|| self.sample_enemy_position().filter(|pos| boss_room.contains(*pos)))
            .or_else(|| self.sample_enemy_position());
        if let Some(pos) = boss_pos {
            self.insert_enemy(BOSS_KIND, pos);
            self.state.push_message("A terrible presence stirs below.");
        }
    }

    fn insert_enemy(&mut self, kind: ActorKind, pos: Pos) {
        let stats = get_enemy_stats(kind);
        let enemy = Actor {
            id: EntityId::default(),
            kind,
            pos,
            hp: stats.hp,
            max_hp: stats.hp,
            attack: stats.attack,
            defense: stats.defense,
        };
        let enemy_id = self.state.actors.insert(enemy);
        self.state.actors[enemy_id].id = enemy_id;
    }

    fn weighted_pick(&mut self, table: &[(ActorKind, u32)]) -> ActorKind {
        let total: u32 = table.iter().map(|(_, weight)| weight).sum();
        let mut roll = (self.rng.next_u64() % total as u64) as u32;
        for (kind, weight) in table {
            if roll < *weight {
                return *kind;
            }
            roll -= weight;
        }
        table[table.len() - 1].0
    }

    /// Enemy placement additionally keeps a minimum Euclidean distance from
    /// the player and an empty tile; exhausting the attempt limit skips
    /// the spawn silently.
    fn sample_enemy_position(&mut self) -> Option<Pos> {
        let player_pos = self.state.player().pos;
        for _ in 0..crate::content::SPAWN_ATTEMPTS {
            let Some(pos) = random_walkable_position(&self.state.map, &mut self.rng) else {
                return None;
            };
            if euclidean_sq(pos, player_pos) > MIN_ENEMY_SPAWN_DISTANCE_SQ
                && !self.state.is_occupied(pos)
            {
                return Some(pos);
            }
        }
        None
    }

    fn spawn_items(&mut self, floor_index: u8) {
        let floor = floor_index as usize;

        for _ in 0..(2 + floor) {
            let key = CONSUMABLE_POOL
                [(self.rng.next_u64() % CONSUMABLE_POOL.len() as u64) as usize];
            self.place_ground_item(ItemKind::Consumable(key));
        }

        // Equipment shows up from the second floor on, one piece per floor.
        if floor_index > 1 {
            let equipment = [
                ItemKind::Weapon(keys::WEAPON_SHORT_SWORD),
                ItemKind::Weapon(keys::WEAPON_BATTLE_AXE),
                ItemKind::Armor(keys::ARMOR_WOODEN_SHIELD),
            ];
            let pick = equipment[(self.rng.next_u64() % equipment.len() as u64) as usize];
            self.place_ground_item(pick);
        }

        for _ in 0..(3 + floor) {
            let value = 5 + (self.rng.next_u64() % 21) as i32;
            self.place_ground_item(ItemKind::Currency(value));
        }
    }

    fn place_ground_item(&mut self, kind: ItemKind) {
        let player_pos = self.state.player().pos;
        let Some(pos) = random_walkable_position(&self.state.map, &mut self.rng)
            .filter(|pos| *pos != player_pos)
        else {
            return;
        };
        let item = GroundItem { id: ItemId::default(), kind, pos };
        let item_id = self.state.items.insert(item);
        self.state.items[item_id].id = item_id;
    }

    pub(super) fn insert_trap(&mut self, effect: TrapEffect, pos: Pos) -> TrapId {
        let trap = Trap { id: TrapId::default(), pos, effect, triggered: false };
        let trap_id = self.state.traps.insert(trap);
        self.state.traps[trap_id].id = trap_id;
        trap_id
    }
}
