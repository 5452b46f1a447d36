//! Combat orchestration and post-attack bookkeeping.
//! This module exists to keep XP grants, level-ups, and synchronous corpse
//! removal next to the attack paths that cause them. It does not own the
//! enemy-turn batch loop or trap effects.

use std::collections::BTreeSet;

use super::pathfinding::astar_path;
use super::*;
use crate::content::{
    FIREBALL_DAMAGE, HEALTH_POTION_HEAL, LEVEL_UP_ATTACK_GAIN, LEVEL_UP_HP_GAIN,
    STRENGTH_POTION_BONUS, STRENGTH_POTION_TURNS, armor_defense_bonus, item_display_name, keys,
    weapon_attack_bonus, xp_threshold,
};
use crate::mapgen::random_walkable_position;
use crate::state::TimedBuff;

impl Game {
    /// Player attacks the enemy on the target tile. Damage is
    /// `max(1, attack - defense)`; a kill grants XP, may level the player
    /// up, and removes the corpse synchronously.
    pub(super) fn resolve_attack(&mut self, enemy_id: EntityId) {
        let player_attack = self.state.player().attack;
        let enemy = &self.state.actors[enemy_id];
        let name = get_enemy_stats(enemy.kind).name;
        let damage = (player_attack - enemy.defense).max(1);

        self.state.actors[enemy_id].hp -= damage;
        self.state.push_message(format!("You hit the {name} for {damage} damage."));

        if self.state.actors[enemy_id].hp <= 0 {
            self.grant_kill_rewards(enemy_id);
        }
    }

    /// Death bookkeeping shared by melee and item damage: message, XP,
    /// level-up check, then immediate removal from the actor collection.
    pub(super) fn grant_kill_rewards(&mut self, enemy_id: EntityId) {
        let kind = self.state.actors[enemy_id].kind;
        let stats = get_enemy_stats(kind);
        self.state.push_message(format!("The {} dies!", stats.name));
        self.state.xp += stats.xp_reward;
        self.state.push_message(format!("You gain {} XP.", stats.xp_reward));
        self.check_level_up();
        self.state.actors.remove(enemy_id);
    }

    pub(super) fn check_level_up(&mut self) {
        while self.state.xp >= xp_threshold(self.state.level) {
            self.state.level += 1;
            let level = self.state.level;
            let player = self.state.player_mut();
            player.max_hp += LEVEL_UP_HP_GAIN;
            player.hp = player.max_hp;
            player.attack += LEVEL_UP_ATTACK_GAIN;
            self.state.push_message(format!("Welcome to level {level}! You feel stronger."));
        }
    }

    /// Consumable effects. The caller has already removed the item from the
    /// inventory; offensive scrolls may target enemies.
    pub(super) fn use_item(&mut self, key: &'static str) {
        match key {
            keys::CONSUMABLE_HEALTH_POTION => {
                let player = self.state.player_mut();
                let healed = HEALTH_POTION_HEAL.min(player.max_hp - player.hp);
                player.hp += healed;
                self.state.push_message(format!(
                    "You drink the health potion and recover {healed} HP."
                ));
            }
            keys::CONSUMABLE_STRENGTH_POTION => {
                match self.state.status.strength {
                    Some(buff) => {
                        self.state.status.strength =
                            Some(TimedBuff { remaining: STRENGTH_POTION_TURNS, ..buff });
                    }
                    None => {
                        self.state.player_mut().attack += STRENGTH_POTION_BONUS;
                        self.state.status.strength = Some(TimedBuff {
                            remaining: STRENGTH_POTION_TURNS,
                            amount: STRENGTH_POTION_BONUS,
                        });
                    }
                }
                self.state.push_message("You feel a surge of strength!");
            }
            keys::CONSUMABLE_FIREBALL_SCROLL => match self.nearest_visible_enemy() {
                Some(enemy_id) => {
                    let name = get_enemy_stats(self.state.actors[enemy_id].kind).name;
                    self.state.actors[enemy_id].hp -= FIREBALL_DAMAGE;
                    self.state.push_message(format!(
                        "A fireball engulfs the {name} for {FIREBALL_DAMAGE} damage."
                    ));
                    if self.state.actors[enemy_id].hp <= 0 {
                        self.grant_kill_rewards(enemy_id);
                    }
                }
                None => self.state.push_message("The scroll fizzles with nothing in sight."),
            },
            keys::CONSUMABLE_TELEPORT_SCROLL => {
                let destination = random_walkable_position(&self.state.map, &mut self.rng)
                    .filter(|pos| !self.state.is_occupied(*pos));
                match destination {
                    Some(pos) => {
                        self.state.player_mut().pos = pos;
                        self.state.push_message("The world blurs and you are elsewhere.");
                    }
                    None => self.state.push_message("The scroll crackles but nothing happens."),
                }
            }
            _ => {
                let name = item_display_name(key);
                self.state.push_message(format!("You cannot use the {name}."));
            }
        }
    }

    /// Equipping replaces the occupied slot; the replaced piece goes back
    /// into the inventory (the caller freed a slot by removing this item).
    pub(super) fn equip_item(&mut self, kind: ItemKind) {
        match kind {
            ItemKind::Weapon(key) => {
                if let Some(old) = self.state.equipped_weapon.replace(key) {
                    self.state.player_mut().attack -= weapon_attack_bonus(old);
                    self.state.inventory.push(ItemKind::Weapon(old));
                }
                self.state.player_mut().attack += weapon_attack_bonus(key);
                self.state.push_message(format!("You wield the {}.", item_display_name(key)));
            }
            ItemKind::Armor(key) => {
                if let Some(old) = self.state.equipped_armor.replace(key) {
                    self.state.player_mut().defense -= armor_defense_bonus(old);
                    self.state.inventory.push(ItemKind::Armor(old));
                }
                self.state.player_mut().defense += armor_defense_bonus(key);
                self.state.push_message(format!("You put on the {}.", item_display_name(key)));
            }
            ItemKind::Consumable(_) | ItemKind::Currency(_) => {
                self.state.push_message("You cannot equip that.");
            }
        }
    }

    /// One enemy's turn: attack when adjacent (8-way), otherwise chase the
    /// player while standing inside the player's field of view.
    pub(super) fn enemy_take_turn(&mut self, enemy_id: EntityId) {
        let Some(enemy) = self.state.actors.get(enemy_id) else {
            return;
        };
        let enemy_pos = enemy.pos;
        let enemy_attack = enemy.attack;
        let name = get_enemy_stats(enemy.kind).name;
        let player_pos = self.state.player().pos;

        if chebyshev(enemy_pos, player_pos) <= 1 {
            let damage = (enemy_attack - self.state.player().defense).max(1);
            self.state.player_mut().hp -= damage;
            self.state.push_message(format!("The {name} hits you for {damage} damage."));
            return;
        }

        if !self.state.map.is_visible(enemy_pos) {
            return;
        }

        let occupied: BTreeSet<Pos> = self
            .state
            .actors
            .iter()
            .filter(|(id, _)| *id != enemy_id && *id != self.state.player_id)
            .map(|(_, actor)| actor.pos)
            .collect();

        if let Some(path) = astar_path(&self.state.map, enemy_pos, player_pos, &occupied)
            && let Some(step) = path.first().copied()
            && step != player_pos
        {
            self.state.actors[enemy_id].pos = step;
            return;
        }

        // No route; fall back to a single greedy step toward the player.
        let dy = (player_pos.y - enemy_pos.y).signum();
        let dx = (player_pos.x - enemy_pos.x).signum();
        for (step_dy, step_dx) in [(dy, dx), (dy, 0), (0, dx)] {
            let candidate = enemy_pos.offset(step_dy, step_dx);
            if candidate != player_pos
                && self.state.map.is_walkable(candidate)
                && !occupied.contains(&candidate)
            {
                self.state.actors[enemy_id].pos = candidate;
                return;
            }
        }
    }

    /// Deterministic target pick for offensive items: nearest visible enemy,
    /// ties broken by position then id.
    pub(super) fn nearest_visible_enemy(&self) -> Option<EntityId> {
        let player_pos = self.state.player().pos;
        self.state
            .actors
            .iter()
            .filter(|(id, actor)| {
                *id != self.state.player_id && self.state.map.is_visible(actor.pos)
            })
            .min_by_key(|(id, actor)| {
                (euclidean_sq(player_pos, actor.pos), actor.pos.y, actor.pos.x, *id)
            })
            .map(|(id, _)| id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::test_support::*;

    #[test]
    fn damage_is_floored_at_one() {
        let mut game = arena_game(200);
        game.state.player_mut().attack = 1;
        let enemy_pos = game.state.player().pos.offset(0, 1);
        let enemy_id = add_enemy(&mut game, ActorKind::Troll, enemy_pos);
        let hp = game.state.actors[enemy_id].hp;

        game.resolve_attack(enemy_id);

        assert_eq!(game.state.actors[enemy_id].hp, hp - 1);
    }

    #[test]
    fn kill_grants_xp_and_removes_enemy_synchronously() {
        let mut game = arena_game(201);
        let enemy_pos = game.state.player().pos.offset(0, 1);
        let enemy_id = add_enemy(&mut game, ActorKind::Rat, enemy_pos);
        game.state.actors[enemy_id].hp = 1;

        game.resolve_attack(enemy_id);

        assert!(game.state.actors.get(enemy_id).is_none(), "corpse must be removed in place");
        assert_eq!(game.state.xp, get_enemy_stats(ActorKind::Rat).xp_reward);
        assert!(game.state.messages.iter().any(|m| m.contains("dies")));
        assert!(game.state.messages.iter().any(|m| m.contains("XP")));
    }

    #[test]
    fn level_up_restores_hp_and_raises_attack() {
        let mut game = arena_game(202);
        game.state.player_mut().hp = 5;
        let max_hp = game.state.player().max_hp;
        let attack = game.state.player().attack;
        game.state.xp = xp_threshold(1);

        game.check_level_up();

        assert_eq!(game.state.level, 2);
        assert_eq!(game.state.player().max_hp, max_hp + LEVEL_UP_HP_GAIN);
        assert_eq!(game.state.player().hp, game.state.player().max_hp);
        assert_eq!(game.state.player().attack, attack + LEVEL_UP_ATTACK_GAIN);
        assert!(game.state.messages.iter().any(|m| m.contains("level 2")));
    }

    #[test]
    fn equipping_a_second_weapon_swaps_the_first_back() {
        let mut game = arena_game(203);
        let base_attack = game.state.player().attack;

        game.equip_item(ItemKind::Weapon(keys::WEAPON_SHORT_SWORD));
        assert_eq!(
            game.state.player().attack,
            base_attack + weapon_attack_bonus(keys::WEAPON_SHORT_SWORD)
        );

        game.equip_item(ItemKind::Weapon(keys::WEAPON_BATTLE_AXE));
        assert_eq!(
            game.state.player().attack,
            base_attack + weapon_attack_bonus(keys::WEAPON_BATTLE_AXE)
        );
        assert!(game.state.inventory.contains(&ItemKind::Weapon(keys::WEAPON_SHORT_SWORD)));
    }

    #[test]
    fn adjacent_enemy_attacks_instead_of_moving() {
        let mut game = arena_game(204);
        let player_pos = game.state.player().pos;
        let enemy_pos = player_pos.offset(1, 1);
        let enemy_id = add_enemy(&mut game, ActorKind::Goblin, enemy_pos);
        let hp = game.state.player().hp;

        game.enemy_take_turn(enemy_id);

        assert_eq!(game.state.actors[enemy_id].pos, enemy_pos);
        assert!(game.state.player().hp < hp);
    }

    #[test]
    fn visible_enemy_chases_the_player() {
        let mut game = arena_game(205);
        let player_pos = game.state.player().pos;
        let enemy_pos = player_pos.offset(0, 4);
        let enemy_id = add_enemy(&mut game, ActorKind::Goblin, enemy_pos);
        game.recompute_fov();
        assert!(game.state.map.is_visible(enemy_pos));

        game.enemy_take_turn(enemy_id);

        let after = game.state.actors[enemy_id].pos;
        assert!(
            chebyshev(after, player_pos) < chebyshev(enemy_pos, player_pos),
            "enemy should close distance"
        );
    }

    #[test]
    fn enemy_outside_fov_stays_put() {
        let mut game = arena_game(206);
        let enemy_pos = Pos { y: 1, x: 1 };
        game.state.map.set_tile(enemy_pos, TileKind::Floor);
        let enemy_id = add_enemy(&mut game, ActorKind::Goblin, enemy_pos);
        game.state.map.clear_visible();

        game.enemy_take_turn(enemy_id);

        assert_eq!(game.state.actors[enemy_id].pos, enemy_pos);
    }

    #[test]
    fn fireball_hits_the_nearest_visible_enemy() {
        let mut game = arena_game(207);
        let player_pos = game.state.player().pos;
        let near = add_enemy(&mut game, ActorKind::Troll, player_pos.offset(0, 2));
        let far = add_enemy(&mut game, ActorKind::Troll, player_pos.offset(0, 5));
        game.recompute_fov();

        let near_hp = game.state.actors[near].hp;
        let far_hp = game.state.actors[far].hp;
        game.use_item(keys::CONSUMABLE_FIREBALL_SCROLL);

        assert_eq!(game.state.actors[near].hp, near_hp - FIREBALL_DAMAGE);
        assert_eq!(game.state.actors[far].hp, far_hp);
    }

    #[test]
    fn fireball_with_no_target_fizzles() {
        let mut game = arena_game(208);
        game.use_item(keys::CONSUMABLE_FIREBALL_SCROLL);
        assert!(game.state.messages.iter().any(|m| m.contains("fizzles")));
    }

    #[test]
    fn health_potion_never_overheals() {
        let mut game = arena_game(209);
        game.state.player_mut().hp = game.state.player().max_hp - 3;
        game.use_item(keys::CONSUMABLE_HEALTH_POTION);
        assert_eq!(game.state.player().hp, game.state.player().max_hp);
        assert!(game.state.messages.iter().any(|m| m.contains("recover 3 HP")));
    }

    #[test]
    fn teleport_scroll_moves_the_player_to_walkable_ground() {
        let mut game = arena_game(210);
        game.use_item(keys::CONSUMABLE_TELEPORT_SCROLL);
        assert!(game.state.map.is_walkable(game.state.player().pos));
    }
}
