//! Shared test fixtures for the `game` submodule test suites.
//! This module exists to avoid repeating map and actor setup across many tests.
//! It does not own production gameplay logic.

use std::path::PathBuf;

use super::*;
use crate::content::{INVENTORY_CAPACITY, keys};
use crate::state::{Actor, GroundItem, Map, Trap};

pub(crate) fn fixture_game(seed: u64) -> Game {
    Game::new(seed, 1, save_dir_fixture())
}

pub(crate) fn save_dir_fixture() -> PathBuf {
    std::env::temp_dir().join("dungeon-saves-test")
}

/// A fully generated run whose floor has been swapped for an open, bordered
/// arena with the player centered and nothing else on it. Tests that need
/// exact tile arithmetic start here.
pub(crate) fn arena_game(seed: u64) -> Game {
    let mut game = fixture_game(seed);
    let mut map = Map::new(20, 15);
    for y in 1..14 {
        for x in 1..19 {
            map.set_tile(Pos { y, x }, TileKind::Floor);
        }
    }
    game.state.map = map;
    game.state.rooms.clear();
    game.state.stairs_up = None;
    game.state.stairs_down = None;

    let player_id = game.state.player_id;
    game.state.actors.retain(|id, _| id == player_id);
    game.state.actors[player_id].pos = Pos { y: 7, x: 10 };
    game.state.items.clear();
    game.state.traps.clear();
    game.state.messages.clear();
    game.recompute_fov();
    game
}

pub(crate) fn add_enemy(game: &mut Game, kind: ActorKind, pos: Pos) -> EntityId {
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
    let id = game.state.actors.insert(enemy);
    game.state.actors[id].id = id;
    id
}

pub(crate) fn place_item(game: &mut Game, kind: ItemKind, pos: Pos) -> ItemId {
    let item = GroundItem { id: ItemId::default(), kind, pos };
    let id = game.state.items.insert(item);
    game.state.items[id].id = id;
    id
}

pub(crate) fn add_trap(game: &mut Game, effect: TrapEffect, pos: Pos) -> TrapId {
    let trap = Trap { id: TrapId::default(), pos, effect, triggered: false };
    let id = game.state.traps.insert(trap);
    game.state.traps[id].id = id;
    id
}

pub(crate) fn fill_inventory(game: &mut Game) {
    while game.state.inventory.len() < INVENTORY_CAPACITY {
        game.state.inventory.push(ItemKind::Consumable(keys::CONSUMABLE_HEALTH_POTION));
    }
}
