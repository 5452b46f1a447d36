//! Inventory-mode input resolution. This module exists to keep the modal
//! slot-selection rules away from the overworld action path. It does not
//! own item effects; those live with combat and equipment.

use super::*;
use crate::content::item_display_name;
use crate::state::GroundItem;

impl Game {
    /// While the inventory is open, every action routes here. Using or
    /// dropping always closes the inventory, even when the selection was
    /// invalid; selection alone keeps it open.
    pub(super) fn resolve_inventory_action(&mut self, action: Action) {
        match action {
            Action::SelectSlot(slot) => {
                self.selected_slot = Some(slot);
            }
            Action::UseSelected => {
                self.use_selected_slot();
                self.close_inventory();
                self.recompute_fov();
            }
            Action::DropSelected => {
                self.drop_selected_slot();
                self.close_inventory();
            }
            Action::Cancel | Action::OpenInventory => {
                self.close_inventory();
            }
            Action::Quit => {
                self.close_inventory();
                self.running = false;
                self.state.push_message("You abandon the delve.");
            }
            // Movement and the rest are swallowed by the modal screen.
            _ => {}
        }
    }

    fn close_inventory(&mut self) {
        self.inventory_open = false;
        self.selected_slot = None;
    }

    fn use_selected_slot(&mut self) {
        let Some(slot) = self.selected_slot.filter(|s| *s < self.state.inventory.len()) else {
            self.state.push_message("Nothing selected.");
            return;
        };
        let kind = self.state.inventory.remove(slot);
        match kind {
            ItemKind::Consumable(key) => self.use_item(key),
            ItemKind::Weapon(_) | ItemKind::Armor(_) => self.equip_item(kind),
            ItemKind::Currency(_) => {
                self.state.push_message("You cannot use that.");
                self.state.inventory.insert(slot, kind);
            }
        }
    }

    fn drop_selected_slot(&mut self) {
        let Some(slot) = self.selected_slot.filter(|s| *s < self.state.inventory.len()) else {
            self.state.push_message("Nothing selected.");
            return;
        };
        let kind = self.state.inventory.remove(slot);
        let pos = self.state.player().pos;
        let item = GroundItem { id: ItemId::default(), kind, pos };
        let item_id = self.state.items.insert(item);
        self.state.items[item_id].id = item_id;
        let label = match kind {
            ItemKind::Consumable(key) | ItemKind::Weapon(key) | ItemKind::Armor(key) => {
                item_display_name(key).to_string()
            }
            ItemKind::Currency(value) => format!("{value} gold"),
        };
        self.state.push_message(format!("You drop the {label}."));
    }
}
