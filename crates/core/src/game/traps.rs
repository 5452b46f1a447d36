//! Trap placement, triggering, and the player's poison condition.
//! This module exists to keep hazard bookkeeping out of the movement path.
//! It does not own the turn ordering that decides when poison ticks.

use rand_chacha::rand_core::Rng;

use super::*;
use crate::state::PoisonStatus;

impl Game {
    /// Scatter hidden traps across the floor, avoiding the entry tile,
    /// both staircases, and tiles that already hold a trap.
    pub(super) fn generate_traps(&mut self, floor_index: u8) {
        let trap_count = 1 + floor_index as usize;
        let forbidden = [
            Some(self.state.player().pos),
            self.state.stairs_up,
            self.state.stairs_down,
        ];
        for index in 0..trap_count {
            let Some(pos) =
                crate::mapgen::random_walkable_position(&self.state.map, &mut self.rng)
            else {
                continue;
            };
            if forbidden.contains(&Some(pos))
                || self.state.traps.iter().any(|(_, trap)| trap.pos == pos)
            {
                continue;
            }
            let effect = if index % 2 == 0 {
                TrapEffect::Spikes { damage: 4 + (self.rng.next_u64() % 5) as i32 }
            } else {
                TrapEffect::PoisonDart { turns: 3, damage: 2 }
            };
            self.insert_trap(effect, pos);
        }
    }

    /// Trigger any trap on the tile the player just stepped onto. Returns
    /// true when the trap killed the player, in which case the caller must
    /// end the action immediately.
    pub(super) fn check_trap_at(&mut self, pos: Pos) -> bool {
        let Some((trap_id, effect)) = self
            .state
            .traps
            .iter()
            .find(|(_, trap)| trap.pos == pos && !trap.triggered)
            .map(|(id, trap)| (id, trap.effect))
        else {
            return false;
        };
        self.state.traps[trap_id].triggered = true;

        match effect {
            TrapEffect::Spikes { damage } => {
                let player = self.state.player_mut();
                player.hp -= damage;
                self.state
                    .push_message(format!("Spikes shoot up from the floor! You take {damage} damage."));
            }
            TrapEffect::PoisonDart { turns, damage } => {
                self.state.poison = Some(PoisonStatus { remaining: turns, damage });
                self.state.push_message("A dart grazes you. Poison courses through your veins!");
            }
        }
        self.remove_triggered_traps();
        self.state.player().hp <= 0
    }

    pub(super) fn remove_triggered_traps(&mut self) {
        self.state.traps.retain(|_, trap| !trap.triggered);
    }

    /// Poison deals its damage once per enemy phase and counts itself down.
    pub(super) fn update_player_poison(&mut self) {
        let Some(mut poison) = self.state.poison else {
            return;
        };
        let player = self.state.player_mut();
        player.hp -= poison.damage;
        poison.remaining -= 1;
        self.state
            .push_message(format!("Poison burns through you for {} damage.", poison.damage));
        if poison.remaining == 0 {
            self.state.poison = None;
            self.state.push_message("The poison has run its course.");
        } else {
            self.state.poison = Some(poison);
        }
    }
}
