use slotmap::new_key_type;

new_key_type! {
    pub struct EntityId;
    pub struct ItemId;
    pub struct TrapId;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pos {
    pub y: i32,
    pub x: i32,
}

impl Pos {
    pub fn offset(self, dy: i32, dx: i32) -> Pos {
        Pos { y: self.y + dy, x: self.x + dx }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TileKind {
    Wall,
    Floor,
    UpStairs,
    DownStairs,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ActorKind {
    Player,
    Rat,
    Goblin,
    Skeleton,
    Orc,
    Troll,
    Dragon,
}

/// Closed item taxonomy. Category drives resolution exhaustively; the
/// `&'static str` payloads are content-table keys, never display text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ItemKind {
    Consumable(&'static str),
    Weapon(&'static str),
    Armor(&'static str),
    Currency(i32),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrapEffect {
    Spikes { damage: i32 },
    PoisonDart { turns: u8, damage: i32 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl Direction {
    /// (dy, dx) with y growing downward.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (-1, 0),
            Direction::South => (1, 0),
            Direction::East => (0, 1),
            Direction::West => (0, -1),
            Direction::NorthEast => (-1, 1),
            Direction::NorthWest => (-1, -1),
            Direction::SouthEast => (1, 1),
            Direction::SouthWest => (1, -1),
        }
    }
}

/// One decoded player input. Directional moves, wait, help, save, and quit
/// resolve in the main mode; the slot/use/drop/cancel variants only have
/// meaning while the inventory sub-mode is open.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Move(Direction),
    Wait,
    OpenInventory,
    Help,
    Save,
    Quit,
    SelectSlot(usize),
    UseSelected,
    DropSelected,
    Cancel,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    Victory,
    Defeat,
}

/// Something the front end must render before the next input is read.
/// The engine itself never draws; it only reports the request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UiRequest {
    ShowHelp,
}
