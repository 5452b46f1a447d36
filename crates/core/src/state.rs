use std::collections::VecDeque;

use slotmap::SlotMap;

use crate::content::MAX_MESSAGES;
use crate::types::*;

#[derive(Clone, Debug)]
pub struct Actor {
    pub id: EntityId,
    pub kind: ActorKind,
    pub pos: Pos,
    pub hp: i32,
    pub max_hp: i32,
    pub attack: i32,
    pub defense: i32,
}

#[derive(Clone, Debug)]
pub struct GroundItem {
    pub id: ItemId,
    pub kind: ItemKind,
    pub pos: Pos,
}

#[derive(Clone, Debug)]
pub struct Trap {
    pub id: TrapId,
    pub pos: Pos,
    pub effect: TrapEffect,
    pub triggered: bool,
}

/// Axis-aligned room rectangle in tile coordinates. Kept after generation
/// only for spawn placement (the boss room is the last room in layout order).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Room {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl Room {
    pub fn center(self) -> Pos {
        Pos { y: (self.y + self.height / 2) as i32, x: (self.x + self.width / 2) as i32 }
    }

    pub fn contains(self, pos: Pos) -> bool {
        if pos.x < 0 || pos.y < 0 {
            return false;
        }
        let px = pos.x as usize;
        let py = pos.y as usize;
        px >= self.x && px < self.x + self.width && py >= self.y && py < self.y + self.height
    }
}

/// Tile grid plus the two per-floor sight masks. `explored` is monotonic
/// for the lifetime of a floor; `visible` is rebuilt on every FOV pass.
#[derive(Clone)]
pub struct Map {
    pub width: usize,
    pub height: usize,
    pub tiles: Vec<TileKind>,
    pub visible: Vec<bool>,
    pub explored: Vec<bool>,
}

impl Map {
    /// All-wall canvas; floor layout is carved into it by the generator.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            tiles: vec![TileKind::Wall; width * height],
            visible: vec![false; width * height],
            explored: vec![false; width * height],
        }
    }

    pub fn tile_at(&self, pos: Pos) -> TileKind {
        if !self.in_bounds(pos) {
            return TileKind::Wall;
        }
        self.tiles[self.index(pos)]
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.x >= 0
            && pos.y >= 0
            && (pos.x as usize) < self.width
            && (pos.y as usize) < self.height
    }

    pub fn set_tile(&mut self, pos: Pos, tile: TileKind) {
        if !self.in_bounds(pos) {
            return;
        }
        let idx = self.index(pos);
        self.tiles[idx] = tile;
    }

    /// Walkable means plain floor. Stairs are actionable but not occupiable.
    pub fn is_walkable(&self, pos: Pos) -> bool {
        self.tile_at(pos) == TileKind::Floor
    }

    pub fn is_opaque(&self, pos: Pos) -> bool {
        self.tile_at(pos) == TileKind::Wall
    }

    /// Marking a tile visible also folds it into the explored union.
    pub fn set_visible(&mut self, pos: Pos, value: bool) {
        if !self.in_bounds(pos) {
            return;
        }
        let idx = self.index(pos);
        self.visible[idx] = value;
        if value {
            self.explored[idx] = true;
        }
    }

    pub fn clear_visible(&mut self) {
        self.visible.fill(false);
    }

    pub fn is_visible(&self, pos: Pos) -> bool {
        self.in_bounds(pos) && self.visible[self.index(pos)]
    }

    pub fn is_explored(&self, pos: Pos) -> bool {
        self.in_bounds(pos) && self.explored[self.index(pos)]
    }

    pub fn index(&self, pos: Pos) -> usize {
        (pos.y as usize) * self.width + (pos.x as usize)
    }
}

/// Countdown record for one timed stat change. Always stored behind an
/// `Option` that defaults to inactive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimedBuff {
    pub remaining: u8,
    pub amount: i32,
}

/// One record slot per status kind, present whether or not the effect is
/// active. The ticker walks these in declaration order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StatusEffects {
    pub strength: Option<TimedBuff>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PoisonStatus {
    pub remaining: u8,
    pub damage: i32,
}

/// The mutable world snapshot for the current floor. Replaced wholesale on
/// floor transitions except for the player-persistent fields (the player
/// actor, gold, xp, level, inventory, equipment, status timers).
pub struct GameState {
    pub floor_index: u8,
    pub map: Map,
    pub rooms: Vec<Room>,
    pub actors: SlotMap<EntityId, Actor>,
    pub items: SlotMap<ItemId, GroundItem>,
    pub traps: SlotMap<TrapId, Trap>,
    pub player_id: EntityId,
    pub stairs_up: Option<Pos>,
    pub stairs_down: Option<Pos>,
    pub gold: i32,
    pub xp: i32,
    pub level: i32,
    pub inventory: Vec<ItemKind>,
    pub equipped_weapon: Option<&'static str>,
    pub equipped_armor: Option<&'static str>,
    pub status: StatusEffects,
    pub poison: Option<PoisonStatus>,
    pub messages: VecDeque<String>,
}

impl GameState {
    pub fn player(&self) -> &Actor {
        &self.actors[self.player_id]
    }

    pub fn player_mut(&mut self) -> &mut Actor {
        let id = self.player_id;
        &mut self.actors[id]
    }

    pub fn push_message(&mut self, text: impl Into<String>) {
        self.messages.push_back(text.into());
        while self.messages.len() > MAX_MESSAGES {
            self.messages.pop_front();
        }
    }

    pub fn enemy_at(&self, pos: Pos) -> Option<EntityId> {
        self.actors
            .iter()
            .find(|(id, actor)| *id != self.player_id && actor.pos == pos)
            .map(|(id, _)| id)
    }

    pub fn is_occupied(&self, pos: Pos) -> bool {
        self.actors.iter().any(|(_, actor)| actor.pos == pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_log_evicts_oldest_beyond_cap() {
        let mut state = state_fixture();
        for n in 0..(MAX_MESSAGES + 3) {
            state.push_message(format!("line {n}"));
        }
        assert_eq!(state.messages.len(), MAX_MESSAGES);
        assert_eq!(state.messages.front().map(String::as_str), Some("line 3"));
    }

    #[test]
    fn marking_visible_updates_explored_union() {
        let mut map = Map::new(5, 5);
        let p = Pos { y: 2, x: 2 };
        map.set_visible(p, true);
        assert!(map.is_visible(p));
        assert!(map.is_explored(p));

        map.clear_visible();
        assert!(!map.is_visible(p));
        assert!(map.is_explored(p), "explored must survive visibility rebuilds");
    }

    #[test]
    fn out_of_bounds_tiles_read_as_wall() {
        let map = Map::new(4, 4);
        assert_eq!(map.tile_at(Pos { y: -1, x: 0 }), TileKind::Wall);
        assert_eq!(map.tile_at(Pos { y: 0, x: 9 }), TileKind::Wall);
        assert!(!map.is_walkable(Pos { y: 9, x: 9 }));
    }

    fn state_fixture() -> GameState {
        let mut actors: SlotMap<EntityId, Actor> = SlotMap::with_key();
        let player_id = actors.insert(Actor {
            id: EntityId::default(),
            kind: ActorKind::Player,
            pos: Pos { y: 1, x: 1 },
            hp: 30,
            max_hp: 30,
            attack: 5,
            defense: 1,
        });
        actors[player_id].id = player_id;
        GameState {
            floor_index: 1,
            map: Map::new(8, 8),
            rooms: Vec::new(),
            actors,
            items: SlotMap::with_key(),
            traps: SlotMap::with_key(),
            player_id,
            stairs_up: None,
            stairs_down: None,
            gold: 0,
            xp: 0,
            level: 1,
            inventory: Vec::new(),
            equipped_weapon: None,
            equipped_armor: None,
            status: StatusEffects::default(),
            poison: None,
            messages: VecDeque::new(),
        }
    }
}
