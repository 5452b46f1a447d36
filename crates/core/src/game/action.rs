//! Directional-move resolution and the pickup rule.
//! This module exists to keep the strict movement/combat/trap/pickup/stairs
//! ordering in one place. It does not own combat math or floor installation.

use super::*;
use crate::content::INVENTORY_CAPACITY;

impl Game {
    /// Resolve one directional move. The branch order is load-bearing:
    /// an enemy on the target tile turns the move into an attack (no step),
    /// a walkable tile steps then checks trap, pickup, stairs in that order,
    /// and a non-walkable tile is a silent no-op unless it is a staircase.
    pub(super) fn resolve_move(&mut self, direction: Direction) {
        let (dy, dx) = direction.delta();
        let target = self.state.player().pos.offset(dy, dx);

        if let Some(enemy_id) = self.state.enemy_at(target) {
            self.resolve_attack(enemy_id);
            self.run_enemy_turn();
            self.recompute_fov();
            return;
        }

        if self.state.map.is_walkable(target) {
            self.state.player_mut().pos = target;

            if self.check_trap_at(target) {
                // Trap killed the player; nothing later this turn may run.
                self.state.push_message("You have died...");
                self.outcome = Some(RunOutcome::Defeat);
                return;
            }

            self.pickup_items_at(target);

            match self.state.map.tile_at(target) {
                TileKind::DownStairs => {
                    self.descend();
                    return;
                }
                TileKind::UpStairs => {
                    self.ascend();
                    return;
                }
                TileKind::Floor | TileKind::Wall => {}
            }

            self.run_enemy_turn();
            self.recompute_fov();
            return;
        }

        // Stairs are non-walkable but actionable; anything else is a no-op
        // that consumes no turn and logs nothing.
        match self.state.map.tile_at(target) {
            TileKind::DownStairs => self.descend(),
            TileKind::UpStairs => self.ascend(),
            TileKind::Wall | TileKind::Floor => {}
        }
    }

    /// Every item co-located with the player is evaluated independently:
    /// currency always converts to gold; anything else needs inventory
    /// capacity, and each blocked item logs its own full-inventory message.
    pub(super) fn pickup_items_at(&mut self, pos: Pos) {
        let mut here: Vec<ItemId> = self
            .state
            .items
            .iter()
            .filter(|(_, item)| item.pos == pos)
            .map(|(id, _)| id)
            .collect();
        here.sort();

        for item_id in here {
            let kind = self.state.items[item_id].kind;
            match kind {
                ItemKind::Currency(value) => {
                    self.state.items.remove(item_id);
                    self.state.gold += value;
                    self.state.push_message(format!("You pick up {value} gold."));
                }
                ItemKind::Consumable(key) | ItemKind::Weapon(key) | ItemKind::Armor(key) => {
                    if self.state.inventory.len() < INVENTORY_CAPACITY {
                        self.state.items.remove(item_id);
                        self.state.inventory.push(kind);
                        let name = content::item_display_name(key);
                        self.state.push_message(format!("You pick up the {name}."));
                    } else {
                        self.state.push_message("Your inventory is full.");
                    }
                }
            }
        }
    }
}
