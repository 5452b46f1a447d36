//! Hardcoded stat tables, spawn tables, and tuning constants.

use crate::types::ActorKind;

pub mod keys {
    pub const WEAPON_SHORT_SWORD: &str = "weapon_short_sword";
    pub const WEAPON_BATTLE_AXE: &str = "weapon_battle_axe";

    pub const ARMOR_WOODEN_SHIELD: &str = "armor_wooden_shield";

    pub const CONSUMABLE_HEALTH_POTION: &str = "consumable_health_potion";
    pub const CONSUMABLE_STRENGTH_POTION: &str = "consumable_strength_potion";
    pub const CONSUMABLE_FIREBALL_SCROLL: &str = "consumable_fireball_scroll";
    pub const CONSUMABLE_TELEPORT_SCROLL: &str = "consumable_teleport_scroll";
}

pub const TOTAL_FLOORS: u8 = 5;
pub const INVENTORY_CAPACITY: usize = 10;
pub const MAX_MESSAGES: usize = 10;
pub const FOV_RADIUS: i32 = 8;

/// Attack never drops below this when a temporary bonus is reverted.
pub const MIN_ATTACK: i32 = 3;

pub const ENEMY_SPAWN_BASE: usize = 3;
pub const SPAWN_ATTEMPTS: usize = 50;
/// Enemies must spawn strictly farther than this (Euclidean) from the player.
pub const MIN_ENEMY_SPAWN_DISTANCE_SQ: i64 = 25;

pub const HEALTH_POTION_HEAL: i32 = 20;
pub const STRENGTH_POTION_BONUS: i32 = 5;
pub const STRENGTH_POTION_TURNS: u8 = 10;
pub const FIREBALL_DAMAGE: i32 = 20;

pub const LEVEL_UP_HP_GAIN: i32 = 10;
pub const LEVEL_UP_ATTACK_GAIN: i32 = 2;

pub struct EnemyStats {
    pub name: &'static str,
    pub hp: i32,
    pub attack: i32,
    pub defense: i32,
    pub xp_reward: i32,
    pub min_level: u8,
    pub spawn_weight: u32,
}

pub fn get_enemy_stats(kind: ActorKind) -> EnemyStats {
    match kind {
        ActorKind::Rat => EnemyStats {
            name: "rat",
            hp: 6,
            attack: 3,
            defense: 0,
            xp_reward: 5,
            min_level: 1,
            spawn_weight: 3,
        },
        ActorKind::Goblin => EnemyStats {
            name: "goblin",
            hp: 12,
            attack: 4,
            defense: 1,
            xp_reward: 10,
            min_level: 1,
            spawn_weight: 3,
        },
        ActorKind::Skeleton => EnemyStats {
            name: "skeleton",
            hp: 16,
            attack: 5,
            defense: 1,
            xp_reward: 15,
            min_level: 2,
            spawn_weight: 2,
        },
        ActorKind::Orc => EnemyStats {
            name: "orc",
            hp: 20,
            attack: 6,
            defense: 2,
            xp_reward: 20,
            min_level: 2,
            spawn_weight: 2,
        },
        ActorKind::Troll => EnemyStats {
            name: "troll",
            hp: 30,
            attack: 8,
            defense: 3,
            xp_reward: 35,
            min_level: 3,
            spawn_weight: 1,
        },
        ActorKind::Dragon => EnemyStats {
            name: "dragon",
            hp: 60,
            attack: 12,
            defense: 4,
            xp_reward: 100,
            min_level: TOTAL_FLOORS,
            spawn_weight: 0,
        },
        ActorKind::Player => EnemyStats {
            name: "you",
            hp: 30,
            attack: 5,
            defense: 1,
            xp_reward: 0,
            min_level: 1,
            spawn_weight: 0,
        },
    }
}

pub const BOSS_KIND: ActorKind = ActorKind::Dragon;

/// Weighted table the non-final floors draw from, already filtered by the
/// floor's minimum-level requirement.
pub fn enemy_spawn_table(floor_index: u8) -> Vec<(ActorKind, u32)> {
    [ActorKind::Rat, ActorKind::Goblin, ActorKind::Skeleton, ActorKind::Orc, ActorKind::Troll]
        .into_iter()
        .map(|kind| (kind, get_enemy_stats(kind)))
        .filter(|(_, stats)| stats.min_level <= floor_index)
        .map(|(kind, stats)| (kind, stats.spawn_weight))
        .collect()
}

pub const CONSUMABLE_POOL: [&str; 4] = [
    keys::CONSUMABLE_HEALTH_POTION,
    keys::CONSUMABLE_STRENGTH_POTION,
    keys::CONSUMABLE_FIREBALL_SCROLL,
    keys::CONSUMABLE_TELEPORT_SCROLL,
];

pub fn weapon_attack_bonus(key: &str) -> i32 {
    match key {
        keys::WEAPON_SHORT_SWORD => 4,
        keys::WEAPON_BATTLE_AXE => 6,
        _ => 0,
    }
}

pub fn armor_defense_bonus(key: &str) -> i32 {
    match key {
        keys::ARMOR_WOODEN_SHIELD => 2,
        _ => 0,
    }
}

pub fn item_display_name(key: &str) -> &'static str {
    match key {
        keys::WEAPON_SHORT_SWORD => "short sword",
        keys::WEAPON_BATTLE_AXE => "battle axe",
        keys::ARMOR_WOODEN_SHIELD => "wooden shield",
        keys::CONSUMABLE_HEALTH_POTION => "health potion",
        keys::CONSUMABLE_STRENGTH_POTION => "strength potion",
        keys::CONSUMABLE_FIREBALL_SCROLL => "scroll of fireball",
        keys::CONSUMABLE_TELEPORT_SCROLL => "scroll of teleport",
        _ => "unidentified item",
    }
}

/// XP needed to advance past `level`. The level-up check loops, so a large
/// single grant can advance more than one level.
pub fn xp_threshold(level: i32) -> i32 {
    level * 25
}
