pub mod app_loop;
pub mod input;
pub mod render;

/// Format a seed as an exact decimal string with no prefix or suffix.
pub fn format_seed(seed: u64) -> String {
    seed.to_string()
}

/// Map a `RunOutcome` to the banner line shown on the end screen.
pub fn outcome_banner(outcome: core::RunOutcome) -> &'static str {
    match outcome {
        core::RunOutcome::Victory => "You have escaped with the dungeon's heart!",
        core::RunOutcome::Defeat => "You have died. The dungeon keeps its secrets.",
    }
}
