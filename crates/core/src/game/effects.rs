//! The status-effect ticker for timed player buffs.
//! Each status kind has an always-present optional record; expiry applies
//! the configured reversal and the tick emits one combined message when
//! several effects lapse at once.

use super::*;
use crate::content::MIN_ATTACK;

impl Game {
    /// Decrement every active counter by one; a counter reaching exactly
    /// zero reverts its stat change (attack floored at `MIN_ATTACK`).
    /// Checked in declaration order of `StatusEffects`, which fixes the
    /// message order for simultaneous expirations.
    pub(super) fn tick_status_effects(&mut self) {
        let mut expired: Vec<&'static str> = Vec::new();

        if let Some(buff) = self.state.status.strength {
            let remaining = buff.remaining.saturating_sub(1);
            if remaining == 0 {
                let player = self.state.player_mut();
                player.attack = (player.attack - buff.amount).max(MIN_ATTACK);
                self.state.status.strength = None;
                expired.push("The strength potion wears off.");
            } else {
                self.state.status.strength = Some(crate::state::TimedBuff { remaining, ..buff });
            }
        }

        if !expired.is_empty() {
            self.state.push_message(expired.join(" "));
        }
    }
}
