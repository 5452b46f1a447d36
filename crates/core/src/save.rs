//! File-backed JSONL save files with a SHA-256 integrity footer.
//!
//! The file format is line-delimited JSON (`.jsonl`):
//! - Line 1: header with `format_version`, `seed`, `slot`.
//! - Line 2: the run body (floor, player stats, progression, inventory,
//!   plus a stable snapshot hash of the live state).
//! - Line 3: footer carrying `hex(SHA-256(body_json))` so a truncated or
//!   edited file is detectable before anything trusts it.
//!
//! Writing flushes before returning so a reported success means the bytes
//! reached the file.

use std::fmt;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::game::Game;
use crate::types::ItemKind;

const SAVE_FORMAT_VERSION: u16 = 1;

/// First line of the save file.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SaveHeader {
    pub format_version: u16,
    pub seed: u64,
    pub slot: u8,
}

/// One carried item, written with owned strings so the file stands alone.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SavedItem {
    pub kind: String,
    pub name: String,
    pub value: i32,
}

/// Second line: everything needed to describe the run at save time.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SaveBody {
    pub floor_index: u8,
    pub hp: i32,
    pub max_hp: i32,
    pub attack: i32,
    pub defense: i32,
    pub gold: i32,
    pub xp: i32,
    pub level: i32,
    pub inventory: Vec<SavedItem>,
    pub equipped_weapon: Option<String>,
    pub equipped_armor: Option<String>,
    pub snapshot_hash: u64,
}

/// Third line.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SaveFooter {
    pub sha256_hex: String,
}

#[derive(Debug)]
pub enum SaveError {
    Io(io::Error),
    Encode(String),
}

impl fmt::Display for SaveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "save I/O error: {e}"),
            Self::Encode(message) => write!(f, "save encode error: {message}"),
        }
    }
}

impl From<io::Error> for SaveError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

/// Compute `hex(SHA-256(body_json))`.
fn compute_body_sha256(body_json: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(body_json.as_bytes());
    let result = hasher.finalize();
    format!("{result:064x}")
}

fn saved_item(kind: ItemKind) -> SavedItem {
    match kind {
        ItemKind::Consumable(key) => {
            SavedItem { kind: "consumable".to_string(), name: key.to_string(), value: 0 }
        }
        ItemKind::Weapon(key) => {
            SavedItem { kind: "weapon".to_string(), name: key.to_string(), value: 0 }
        }
        ItemKind::Armor(key) => {
            SavedItem { kind: "armor".to_string(), name: key.to_string(), value: 0 }
        }
        ItemKind::Currency(value) => {
            SavedItem { kind: "currency".to_string(), name: "gold".to_string(), value }
        }
    }
}

pub fn save_file_path(dir: &Path, slot: u8) -> PathBuf {
    dir.join(format!("slot_{slot}.save.jsonl"))
}

/// Write the run to `slot_{n}.save.jsonl` under `dir`, creating the
/// directory if needed. Returns the path the file landed at. On any
/// failure the live game state is untouched; the caller only reports it.
pub fn save_game(game: &Game, dir: &Path) -> Result<PathBuf, SaveError> {
    fs::create_dir_all(dir)?;
    let path = save_file_path(dir, game.save_slot());

    let state = game.state();
    let player = state.player();
    let header =
        SaveHeader { format_version: SAVE_FORMAT_VERSION, seed: game.seed(), slot: game.save_slot() };
    let body = SaveBody {
        floor_index: state.floor_index,
        hp: player.hp,
        max_hp: player.max_hp,
        attack: player.attack,
        defense: player.defense,
        gold: state.gold,
        xp: state.xp,
        level: state.level,
        inventory: state.inventory.iter().map(|kind| saved_item(*kind)).collect(),
        equipped_weapon: state.equipped_weapon.map(str::to_string),
        equipped_armor: state.equipped_armor.map(str::to_string),
        snapshot_hash: game.snapshot_hash(),
    };

    let header_json =
        serde_json::to_string(&header).map_err(|e| SaveError::Encode(e.to_string()))?;
    let body_json = serde_json::to_string(&body).map_err(|e| SaveError::Encode(e.to_string()))?;
    let footer = SaveFooter { sha256_hex: compute_body_sha256(&body_json) };
    let footer_json =
        serde_json::to_string(&footer).map_err(|e| SaveError::Encode(e.to_string()))?;

    let file = File::create(&path)?;
    let mut writer = BufWriter::new(file);
    writeln!(writer, "{header_json}")?;
    writeln!(writer, "{body_json}")?;
    writeln!(writer, "{footer_json}")?;
    writer.flush()?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Game;
    use crate::types::Action;

    fn game_in(dir: &Path) -> Game {
        Game::new(99, 2, dir.to_path_buf())
    }

    #[test]
    fn save_writes_three_validatable_lines() {
        let dir = tempfile::tempdir().unwrap();
        let game = game_in(dir.path());

        let path = save_game(&game, dir.path()).unwrap();
        assert_eq!(path, dir.path().join("slot_2.save.jsonl"));

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.ends_with('\n'));
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);

        let header: SaveHeader = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(header, SaveHeader { format_version: 1, seed: 99, slot: 2 });

        let body: SaveBody = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(body.floor_index, 1);
        assert_eq!(body.snapshot_hash, game.snapshot_hash());

        let footer: SaveFooter = serde_json::from_str(lines[2]).unwrap();
        assert_eq!(footer.sha256_hex, compute_body_sha256(lines[1]));
        assert_eq!(footer.sha256_hex.len(), 64);
    }

    #[test]
    fn saving_twice_overwrites_the_slot_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut game = game_in(dir.path());

        save_game(&game, dir.path()).unwrap();
        game.state_mut().gold = 777;
        let path = save_game(&game, dir.path()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let body: SaveBody = serde_json::from_str(content.lines().nth(1).unwrap()).unwrap();
        assert_eq!(body.gold, 777);
    }

    #[test]
    fn tampered_body_fails_footer_validation() {
        let dir = tempfile::tempdir().unwrap();
        let game = game_in(dir.path());
        let path = save_game(&game, dir.path()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        let mut body: SaveBody = serde_json::from_str(lines[1]).unwrap();
        body.gold += 500;
        let tampered = serde_json::to_string(&body).unwrap();
        let footer: SaveFooter = serde_json::from_str(lines[2]).unwrap();
        assert_ne!(footer.sha256_hex, compute_body_sha256(&tampered));
    }

    #[test]
    fn save_failure_reports_without_touching_the_run() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocked");
        fs::write(&blocker, b"not a directory").unwrap();

        let mut game = game_in(&blocker);
        let hash = game.snapshot_hash();
        game.handle_action(Action::Save);

        assert_eq!(game.snapshot_hash(), hash);
        assert!(game.state().messages.iter().any(|m| m.starts_with("Save failed:")));
    }
}
