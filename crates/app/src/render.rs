//! Terminal rendering: map, HUD, message log, and the modal screens.
//!
//! Drawing is queue-based; each frame clears, queues every cell and line,
//! and flushes once. Tiles outside the explored mask are blank, explored
//! but unseen tiles draw dim, and the live field of view draws bright.

use std::io::{self, Write};

use core::content::{self, INVENTORY_CAPACITY, TOTAL_FLOORS};
use core::types::{ActorKind, ItemKind, Pos, TileKind};
use core::{Game, GameState};

use crossterm::style::{Color, Print, SetForegroundColor};
use crossterm::{cursor, queue, terminal};

const HUD_ROW_OFFSET: u16 = 0;
const MESSAGE_LINES: usize = 5;

pub fn draw_frame(out: &mut impl Write, game: &Game) -> io::Result<()> {
    queue!(out, terminal::Clear(terminal::ClearType::All), cursor::MoveTo(0, 0))?;

    let state = game.state();
    draw_map(out, state)?;
    draw_hud(out, state)?;
    draw_messages(out, state)?;

    if game.inventory_open() {
        draw_inventory(out, game)?;
    }

    out.flush()
}

fn glyph_at(state: &GameState, pos: Pos) -> (char, Color) {
    if pos == state.player().pos {
        return ('@', Color::White);
    }
    if let Some((_, actor)) =
        state.actors.iter().find(|(id, a)| *id != state.player_id && a.pos == pos)
    {
        return match actor.kind {
            ActorKind::Rat => ('r', Color::DarkYellow),
            ActorKind::Goblin => ('g', Color::Green),
            ActorKind::Skeleton => ('s', Color::Grey),
            ActorKind::Orc => ('o', Color::DarkGreen),
            ActorKind::Troll => ('T', Color::DarkRed),
            ActorKind::Dragon => ('D', Color::Red),
            ActorKind::Player => ('@', Color::White),
        };
    }
    if let Some((_, item)) = state.items.iter().find(|(_, item)| item.pos == pos) {
        return match item.kind {
            ItemKind::Consumable(_) => ('!', Color::Magenta),
            ItemKind::Weapon(_) => ('/', Color::Cyan),
            ItemKind::Armor(_) => ('[', Color::Cyan),
            ItemKind::Currency(_) => ('$', Color::Yellow),
        };
    }
    let tile_char = match state.map.tile_at(pos) {
        TileKind::Wall => '#',
        TileKind::Floor => '.',
        TileKind::UpStairs => '<',
        TileKind::DownStairs => '>',
    };
    (tile_char, Color::Grey)
}

fn draw_map(out: &mut impl Write, state: &GameState) -> io::Result<()> {
    for y in 0..state.map.height {
        queue!(out, cursor::MoveTo(0, y as u16))?;
        for x in 0..state.map.width {
            let pos = Pos { y: y as i32, x: x as i32 };
            if state.map.is_visible(pos) {
                let (glyph, color) = glyph_at(state, pos);
                queue!(out, SetForegroundColor(color), Print(glyph))?;
            } else if state.map.is_explored(pos) {
                // Remembered geometry only; actors and items are not drawn
                // from memory.
                let glyph = match state.map.tile_at(pos) {
                    TileKind::Wall => '#',
                    TileKind::Floor => '.',
                    TileKind::UpStairs => '<',
                    TileKind::DownStairs => '>',
                };
                queue!(out, SetForegroundColor(Color::DarkGrey), Print(glyph))?;
            } else {
                queue!(out, Print(' '))?;
            }
        }
    }
    Ok(())
}

fn draw_hud(out: &mut impl Write, state: &GameState) -> io::Result<()> {
    let player = state.player();
    let row = state.map.height as u16 + HUD_ROW_OFFSET;
    let line = format!(
        "HP {}/{}  ATK {}  DEF {}  Lvl {}  XP {}  Gold {}  Floor {}/{}",
        player.hp,
        player.max_hp,
        player.attack,
        player.defense,
        state.level,
        state.xp,
        state.gold,
        state.floor_index,
        TOTAL_FLOORS,
    );
    queue!(
        out,
        cursor::MoveTo(0, row),
        SetForegroundColor(Color::White),
        Print(line)
    )
}

fn draw_messages(out: &mut impl Write, state: &GameState) -> io::Result<()> {
    let base_row = state.map.height as u16 + 1;
    let recent = state.messages.iter().rev().take(MESSAGE_LINES).rev();
    for (offset, message) in recent.enumerate() {
        queue!(
            out,
            cursor::MoveTo(0, base_row + 1 + offset as u16),
            SetForegroundColor(Color::Grey),
            Print(message)
        )?;
    }
    Ok(())
}

fn draw_inventory(out: &mut impl Write, game: &Game) -> io::Result<()> {
    let state = game.state();
    queue!(
        out,
        cursor::MoveTo(2, 1),
        SetForegroundColor(Color::White),
        Print(format!("-- Inventory ({}/{INVENTORY_CAPACITY}) --", state.inventory.len()))
    )?;
    for (slot, kind) in state.inventory.iter().enumerate() {
        let marker = if game.selected_slot() == Some(slot) { '>' } else { ' ' };
        let label = item_label(*kind);
        queue!(
            out,
            cursor::MoveTo(2, 2 + slot as u16),
            Print(format!("{marker}{}) {label}", slot + 1))
        )?;
    }
    let footer_row = 2 + state.inventory.len().max(1) as u16 + 1;
    queue!(
        out,
        cursor::MoveTo(2, footer_row),
        SetForegroundColor(Color::DarkGrey),
        Print("1-9 select, u/Enter use, d drop, Esc close")
    )
}

fn item_label(kind: ItemKind) -> String {
    match kind {
        ItemKind::Consumable(key) | ItemKind::Weapon(key) | ItemKind::Armor(key) => {
            content::item_display_name(key).to_string()
        }
        ItemKind::Currency(value) => format!("{value} gold"),
    }
}

pub fn draw_help(out: &mut impl Write) -> io::Result<()> {
    let lines = [
        "-- Commands --",
        "",
        "arrows / hjkl   move (yubn for diagonals)",
        ".               wait a turn",
        "i               open inventory",
        "S               save the run",
        "?               this screen",
        "q / Esc         quit",
        "",
        "Walk into an enemy to attack it. Step toward staircases (< and >)",
        "to change floors. Descend from the deepest floor to win.",
        "",
        "Press any key to continue.",
    ];
    queue!(out, terminal::Clear(terminal::ClearType::All))?;
    for (row, line) in lines.iter().enumerate() {
        queue!(
            out,
            cursor::MoveTo(2, row as u16 + 1),
            SetForegroundColor(Color::White),
            Print(*line)
        )?;
    }
    out.flush()
}

pub fn draw_end_screen(out: &mut impl Write, game: &Game, banner: &str) -> io::Result<()> {
    let state = game.state();
    queue!(out, terminal::Clear(terminal::ClearType::All))?;
    let lines = [
        banner.to_string(),
        String::new(),
        format!("Seed: {}", crate::format_seed(game.seed())),
        format!(
            "Floor {} | Level {} | {} XP | {} gold",
            state.floor_index, state.level, state.xp, state.gold
        ),
        String::new(),
        "Press any key to exit.".to_string(),
    ];
    for (row, line) in lines.iter().enumerate() {
        queue!(
            out,
            cursor::MoveTo(4, row as u16 + 2),
            SetForegroundColor(Color::White),
            Print(line)
        )?;
    }
    out.flush()
}
