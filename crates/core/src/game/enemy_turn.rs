//! The per-turn enemy batch pass.
//! Enemy actions are one atomic batch keyed by an alive-snapshot taken at
//! pass start; a player death anywhere in the pass halts everything that
//! would otherwise follow, including the poison and buff ticks.

use super::*;

impl Game {
    pub(super) fn run_enemy_turn(&mut self) {
        let mut enemy_ids: Vec<EntityId> = self
            .state
            .actors
            .iter()
            .filter(|(id, actor)| *id != self.state.player_id && actor.hp > 0)
            .map(|(id, _)| id)
            .collect();
        enemy_ids.sort();

        for enemy_id in enemy_ids {
            // The snapshot may hold ids removed mid-pass (e.g. by a kill
            // resolved earlier in the same action).
            if self.state.actors.get(enemy_id).is_none_or(|enemy| enemy.hp <= 0) {
                continue;
            }
            self.enemy_take_turn(enemy_id);
            if self.state.player().hp <= 0 {
                self.state.push_message("You have died...");
                self.outcome = Some(RunOutcome::Defeat);
                return;
            }
        }

        let player_id = self.state.player_id;
        self.state.actors.retain(|id, actor| id == player_id || actor.hp > 0);

        self.update_player_poison();
        if self.state.player().hp <= 0 {
            self.state.push_message("You have died...");
            self.outcome = Some(RunOutcome::Defeat);
            return;
        }

        self.tick_status_effects();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::test_support::*;

    #[test]
    fn player_death_mid_pass_halts_remaining_enemies() {
        let mut game = arena_game(300);
        game.state.player_mut().hp = 1;
        let player_pos = game.state.player().pos;
        let first = add_enemy(&mut game, ActorKind::Troll, player_pos.offset(0, 1));
        let second = add_enemy(&mut game, ActorKind::Troll, player_pos.offset(0, -1));

        game.run_enemy_turn();

        assert_eq!(game.outcome(), Some(RunOutcome::Defeat));
        let hits =
            game.state.messages.iter().filter(|m| m.contains("hits you")).count();
        assert_eq!(hits, 1, "no enemy may act after the player dies");
        // Both troll ids still exist; the purge step never ran.
        assert!(game.state.actors.get(first).is_some());
        assert!(game.state.actors.get(second).is_some());
    }

    #[test]
    fn dead_enemies_are_purged_after_the_pass() {
        let mut game = arena_game(301);
        let player_pos = game.state.player().pos;
        let wounded = add_enemy(&mut game, ActorKind::Rat, player_pos.offset(0, 5));
        game.state.actors[wounded].hp = 0;

        game.run_enemy_turn();

        assert!(game.state.actors.get(wounded).is_none());
        assert!(game.outcome().is_none());
    }

    #[test]
    fn poison_death_skips_the_buff_tick() {
        let mut game = arena_game(302);
        game.state.player_mut().hp = 1;
        game.state.poison = Some(crate::state::PoisonStatus { remaining: 2, damage: 2 });
        game.state.status.strength = Some(crate::state::TimedBuff { remaining: 1, amount: 5 });

        game.run_enemy_turn();

        assert_eq!(game.outcome(), Some(RunOutcome::Defeat));
        assert_eq!(
            game.state.status.strength,
            Some(crate::state::TimedBuff { remaining: 1, amount: 5 }),
            "buff counters must not tick once the player is dead"
        );
    }

    #[test]
    fn surviving_pass_ticks_poison_and_buffs() {
        let mut game = arena_game(303);
        game.state.poison = Some(crate::state::PoisonStatus { remaining: 2, damage: 2 });
        game.state.status.strength = Some(crate::state::TimedBuff { remaining: 3, amount: 5 });
        let hp = game.state.player().hp;

        game.run_enemy_turn();

        assert_eq!(game.state.player().hp, hp - 2);
        assert_eq!(game.state.poison.map(|p| p.remaining), Some(1));
        assert_eq!(game.state.status.strength.map(|b| b.remaining), Some(2));
    }
}
