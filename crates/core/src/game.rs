//! The turn-resolution engine.
//!
//! `Game` owns the world snapshot for the current floor and arbitrates, for
//! each decoded player action, the ordered sequence of state transitions it
//! triggers. The submodules are `impl Game` extensions, one per concern;
//! side-effect ordering within one action (movement/combat, trap, pickup,
//! stairs, enemy turn, status tick) is fixed and must not be reordered.

mod action;
mod combat;
mod effects;
mod enemy_turn;
mod floor_transition;
mod hash;
mod inventory;
mod pathfinding;
mod traps;
mod visibility;

#[cfg(test)]
pub(crate) mod test_support;

use std::collections::VecDeque;
use std::path::PathBuf;

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;
use slotmap::SlotMap;

use crate::content::{self, FOV_RADIUS, get_enemy_stats};
use crate::save;
use crate::state::{Actor, GameState, Map, StatusEffects};
use crate::types::*;

pub use visibility::compute_fov;

pub struct Game {
    seed: u64,
    rng: ChaCha8Rng,
    state: GameState,
    running: bool,
    inventory_open: bool,
    selected_slot: Option<usize>,
    outcome: Option<RunOutcome>,
    save_slot: u8,
    save_dir: PathBuf,
}

impl Game {
    pub fn new(seed: u64, save_slot: u8, save_dir: PathBuf) -> Self {
        let rng = ChaCha8Rng::seed_from_u64(seed);

        let player_stats = get_enemy_stats(ActorKind::Player);
        let mut actors: SlotMap<EntityId, Actor> = SlotMap::with_key();
        let player_id = actors.insert(Actor {
            id: EntityId::default(),
            kind: ActorKind::Player,
            pos: Pos { y: 0, x: 0 },
            hp: player_stats.hp,
            max_hp: player_stats.hp,
            attack: player_stats.attack,
            defense: player_stats.defense,
        });
        actors[player_id].id = player_id;

        let state = GameState {
            floor_index: 0,
            map: Map::new(1, 1),
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
        };

        let mut game = Self {
            seed,
            rng,
            state,
            running: true,
            inventory_open: false,
            selected_slot: None,
            outcome: None,
            save_slot,
            save_dir,
        };
        game.install_floor(1);
        game.state.push_message("You descend into the dungeon. Press ? for help.");
        game
    }

    /// Resolve one decoded player action. While the inventory sub-mode is
    /// open, input routes to the inventory handler; otherwise to the action
    /// resolver. Returns a UI request when the front end must draw something
    /// (currently only the help screen) before reading the next input.
    pub fn handle_action(&mut self, action: Action) -> Option<UiRequest> {
        if !self.running || self.outcome.is_some() {
            return None;
        }
        if self.inventory_open {
            self.resolve_inventory_action(action);
            return None;
        }
        match action {
            Action::Move(direction) => self.resolve_move(direction),
            Action::Wait => {
                self.state.push_message("You wait.");
                self.run_enemy_turn();
                self.recompute_fov();
            }
            Action::OpenInventory => {
                self.inventory_open = true;
                self.selected_slot = None;
            }
            Action::Help => return Some(UiRequest::ShowHelp),
            Action::Save => self.resolve_save(),
            Action::Quit => {
                self.running = false;
                self.state.push_message("You abandon the delve.");
            }
            // Inventory-mode inputs are meaningless here and consume nothing.
            Action::SelectSlot(_)
            | Action::UseSelected
            | Action::DropSelected
            | Action::Cancel => {}
        }
        None
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn running(&self) -> bool {
        self.running
    }

    pub fn outcome(&self) -> Option<RunOutcome> {
        self.outcome
    }

    pub fn inventory_open(&self) -> bool {
        self.inventory_open
    }

    pub fn selected_slot(&self) -> Option<usize> {
        self.selected_slot
    }

    pub(crate) fn recompute_fov(&mut self) {
        let origin = self.state.player().pos;
        compute_fov(&mut self.state.map, origin, FOV_RADIUS);
    }

    fn resolve_save(&mut self) {
        match save::save_game(self, &self.save_dir) {
            Ok(_) => {
                let slot = self.save_slot;
                self.state.push_message(format!("Game saved to slot {slot}."));
            }
            Err(e) => {
                self.state.push_message(format!("Save failed: {e}"));
            }
        }
    }

    pub(crate) fn save_slot(&self) -> u8 {
        self.save_slot
    }

    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }
}

pub(crate) fn chebyshev(a: Pos, b: Pos) -> u32 {
    a.x.abs_diff(b.x).max(a.y.abs_diff(b.y))
}

pub(crate) fn euclidean_sq(a: Pos, b: Pos) -> i64 {
    let dx = (a.x - b.x) as i64;
    let dy = (a.y - b.y) as i64;
    dx * dx + dy * dy
}
