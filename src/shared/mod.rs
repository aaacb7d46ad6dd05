//! Shared components, resources, events, and constants for Valley Farm.
//!
//! This is the type contract. Every domain plugin imports from here.
//! No domain imports from any other domain directly; only `sim` wires them
//! together.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut};

// ═══════════════════════════════════════════════════════════════════════
// CALENDAR
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Season {
    Spring,
    Summer,
    Fall,
    Winter,
}

impl Season {
    /// Fixed cyclic order used by the calendar.
    pub const ALL: [Season; 4] = [Season::Spring, Season::Summer, Season::Fall, Season::Winter];

    pub fn next(self) -> Self {
        match self {
            Season::Spring => Season::Summer,
            Season::Summer => Season::Fall,
            Season::Fall => Season::Winter,
            Season::Winter => Season::Spring,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Season::Spring => 0,
            Season::Summer => 1,
            Season::Fall => 2,
            Season::Winter => 3,
        }
    }

    /// Wraps around, so `from_index(4)` is Spring again.
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % Self::ALL.len()]
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Season::Spring => "spring",
            Season::Summer => "summer",
            Season::Fall => "fall",
            Season::Winter => "winter",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Weather {
    #[default]
    Sunny,
    Rainy,
    Cloudy,
}

/// Day counter plus the weather rolled for that day. Season and season day
/// are derived from `day`, never stored.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldClock {
    /// 1-based, never resets.
    pub day: u32,
    pub weather: Weather,
}

impl Default for WorldClock {
    fn default() -> Self {
        Self {
            day: 1,
            weather: Weather::Sunny,
        }
    }
}

impl WorldClock {
    /// Day within the current season, 1..=28.
    pub fn season_day(&self) -> u32 {
        (self.day - 1) % DAYS_PER_SEASON + 1
    }

    pub fn season_index(&self) -> usize {
        (((self.day - 1) / DAYS_PER_SEASON) % SEASONS_PER_YEAR) as usize
    }

    pub fn season(&self) -> Season {
        Season::from_index(self.season_index())
    }

    /// 1-based year, one year being four full seasons.
    pub fn year(&self) -> u32 {
        (self.day - 1) / (DAYS_PER_SEASON * SEASONS_PER_YEAR) + 1
    }
}

// ═══════════════════════════════════════════════════════════════════════
// CROPS
// ═══════════════════════════════════════════════════════════════════════

/// The fixed set of plantable crops. Catalog data lives in `crate::data`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CropType {
    Parsnip,
    Cauliflower,
    Potato,
    Strawberry,
    Melon,
    Corn,
    Pumpkin,
}

impl CropType {
    /// Catalog order. `CropCounts` and the crop table are indexed by it.
    pub const ALL: [CropType; 7] = [
        CropType::Parsnip,
        CropType::Cauliflower,
        CropType::Potato,
        CropType::Strawberry,
        CropType::Melon,
        CropType::Corn,
        CropType::Pumpkin,
    ];

    pub fn index(self) -> usize {
        match self {
            CropType::Parsnip => 0,
            CropType::Cauliflower => 1,
            CropType::Potato => 2,
            CropType::Strawberry => 3,
            CropType::Melon => 4,
            CropType::Corn => 5,
            CropType::Pumpkin => 6,
        }
    }
}

/// A growing crop. Owned by exactly one tile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Crop {
    pub kind: CropType,
    /// Days of watered growth accumulated, 0..=max_growth.
    pub growth: u32,
    pub max_growth: u32,
    pub watered: bool,
    pub planted_on_day: u32,
}

impl Crop {
    pub fn is_mature(&self) -> bool {
        self.growth >= self.max_growth
    }
}

// ═══════════════════════════════════════════════════════════════════════
// GRID
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPos {
    pub row: usize,
    pub col: usize,
}

impl GridPos {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Returns `None` when the coordinate falls outside the farm.
    pub fn try_new(row: usize, col: usize) -> Option<Self> {
        (row < GRID_SIZE && col < GRID_SIZE).then_some(Self { row, col })
    }

    pub fn in_bounds(&self) -> bool {
        self.row < GRID_SIZE && self.col < GRID_SIZE
    }
}

impl fmt::Display for GridPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub tilled: bool,
    /// Only ever `Some` on a tilled tile.
    pub crop: Option<Crop>,
}

/// The fixed `GRID_SIZE × GRID_SIZE` farm plot, stored row-major.
///
/// Indexing with an out-of-range `GridPos` panics: that is a caller bug, not
/// a game-rule rejection.
#[derive(Resource, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FarmGrid {
    tiles: Vec<Tile>,
}

impl Default for FarmGrid {
    fn default() -> Self {
        Self {
            tiles: vec![Tile::default(); GRID_SIZE * GRID_SIZE],
        }
    }
}

impl FarmGrid {
    pub fn size(&self) -> usize {
        GRID_SIZE
    }

    pub fn get(&self, pos: GridPos) -> Option<&Tile> {
        pos.in_bounds().then(|| &self.tiles[pos.row * GRID_SIZE + pos.col])
    }

    pub fn tile(&self, pos: GridPos) -> &Tile {
        &self.tiles[Self::offset(pos)]
    }

    pub fn tile_mut(&mut self, pos: GridPos) -> &mut Tile {
        &mut self.tiles[Self::offset(pos)]
    }

    /// All tiles with their positions, row by row.
    pub fn iter(&self) -> impl Iterator<Item = (GridPos, &Tile)> {
        self.tiles
            .iter()
            .enumerate()
            .map(|(i, tile)| (GridPos::new(i / GRID_SIZE, i % GRID_SIZE), tile))
    }

    pub fn tiles_mut(&mut self) -> impl Iterator<Item = &mut Tile> {
        self.tiles.iter_mut()
    }

    /// One slice per row, for renderers that lay the farm out as a table.
    pub fn rows(&self) -> impl Iterator<Item = &[Tile]> {
        self.tiles.chunks(GRID_SIZE)
    }

    pub fn crops(&self) -> impl Iterator<Item = (GridPos, &Crop)> {
        self.iter()
            .filter_map(|(pos, tile)| tile.crop.as_ref().map(|crop| (pos, crop)))
    }

    pub fn tilled_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.tilled).count()
    }

    fn offset(pos: GridPos) -> usize {
        assert!(
            pos.in_bounds(),
            "tile {} is outside the {}x{} farm",
            pos,
            GRID_SIZE,
            GRID_SIZE
        );
        pos.row * GRID_SIZE + pos.col
    }
}

// ═══════════════════════════════════════════════════════════════════════
// PLAYER LEDGER
// ═══════════════════════════════════════════════════════════════════════

/// Per-crop counter with every crop type always present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropCounts([u32; 7]);

impl CropCounts {
    pub fn get(&self, kind: CropType) -> u32 {
        self.0[kind.index()]
    }

    pub fn add(&mut self, kind: CropType, amount: u32) {
        let slot = &mut self.0[kind.index()];
        *slot = slot.saturating_add(amount);
    }

    /// Removes one unit. Returns false (and changes nothing) if the slot is empty.
    pub fn take_one(&mut self, kind: CropType) -> bool {
        let slot = &mut self.0[kind.index()];
        if *slot == 0 {
            return false;
        }
        *slot -= 1;
        true
    }

    /// Empties the slot, returning what was in it.
    pub fn take_all(&mut self, kind: CropType) -> u32 {
        std::mem::take(&mut self.0[kind.index()])
    }

    pub fn iter(&self) -> impl Iterator<Item = (CropType, u32)> + '_ {
        CropType::ALL.iter().map(move |&kind| (kind, self.get(kind)))
    }

    pub fn total(&self) -> u32 {
        self.0.iter().fold(0u32, |acc, &n| acc.saturating_add(n))
    }

    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|&n| n == 0)
    }
}

impl Index<CropType> for CropCounts {
    type Output = u32;

    fn index(&self, kind: CropType) -> &u32 {
        &self.0[kind.index()]
    }
}

impl IndexMut<CropType> for CropCounts {
    fn index_mut(&mut self, kind: CropType) -> &mut u32 {
        &mut self.0[kind.index()]
    }
}

#[derive(Resource, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerLedger {
    pub gold: u32,
    /// 0..=max_energy
    pub energy: u32,
    pub max_energy: u32,
    pub seed_stock: CropCounts,
    pub harvest_inventory: CropCounts,
}

impl Default for PlayerLedger {
    fn default() -> Self {
        let mut seed_stock = CropCounts::default();
        seed_stock[CropType::Parsnip] = STARTING_PARSNIP_SEEDS;

        Self {
            gold: STARTING_GOLD,
            energy: MAX_ENERGY,
            max_energy: MAX_ENERGY,
            seed_stock,
            harvest_inventory: CropCounts::default(),
        }
    }
}

impl PlayerLedger {
    pub fn is_exhausted(&self) -> bool {
        self.energy == 0
    }

    pub fn has_harvest(&self) -> bool {
        !self.harvest_inventory.is_empty()
    }
}

// ═══════════════════════════════════════════════════════════════════════
// SELECTION & ACTIONS
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Tool {
    #[default]
    Till,
    Water,
    Plant,
    Harvest,
}

impl Tool {
    pub const ALL: [Tool; 4] = [Tool::Till, Tool::Water, Tool::Plant, Tool::Harvest];

    /// Energy spent when the action actually applies.
    pub fn energy_cost(self) -> u32 {
        match self {
            Tool::Till => TILL_ENERGY_COST,
            Tool::Water => WATER_ENERGY_COST,
            Tool::Plant => PLANT_ENERGY_COST,
            Tool::Harvest => 0,
        }
    }
}

/// What the player currently has in hand. Owned by the presentation side,
/// read by the action processor.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub tool: Tool,
    pub seed: CropType,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            tool: Tool::Till,
            seed: CropType::Parsnip,
        }
    }
}

/// Result of a single tool use. There is deliberately no error variant:
/// anything the rules reject is a `NoOp`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionOutcome {
    Applied,
    NoOp,
    /// Zero energy; the UI shows a "too tired" signal.
    Exhausted,
}

// ═══════════════════════════════════════════════════════════════════════
// EVENTS — requests from the presentation layer
// ═══════════════════════════════════════════════════════════════════════

#[derive(Event, Debug, Clone)]
pub struct ToolActionEvent {
    pub tool: Tool,
    pub pos: GridPos,
    pub seed: CropType,
}

/// The player goes to bed; the day advances.
#[derive(Event, Debug, Clone, Default)]
pub struct SleepEvent;

#[derive(Event, Debug, Clone)]
pub struct BuySeedEvent {
    pub crop: CropType,
}

#[derive(Event, Debug, Clone, Default)]
pub struct SellAllEvent;

// ═══════════════════════════════════════════════════════════════════════
// EVENTS — results for the presentation layer
// ═══════════════════════════════════════════════════════════════════════

#[derive(Event, Debug, Clone)]
pub struct ActionResolvedEvent {
    pub tool: Tool,
    pub pos: GridPos,
    pub outcome: ActionOutcome,
}

/// Sent with the day that just ended.
#[derive(Event, Debug, Clone)]
pub struct DayEndEvent {
    pub day: u32,
    pub season: Season,
}

/// Sent with the day that just began.
#[derive(Event, Debug, Clone)]
pub struct DayStartEvent {
    pub day: u32,
    pub season: Season,
    pub weather: Weather,
}

#[derive(Event, Debug, Clone)]
pub struct SeasonChangeEvent {
    pub new_season: Season,
    pub year: u32,
}

#[derive(Event, Debug, Clone)]
pub struct GoldChangeEvent {
    pub amount: i64, // positive = gain, negative = spend
    pub reason: String,
}

// ═══════════════════════════════════════════════════════════════════════
// CONSTANTS
// ═══════════════════════════════════════════════════════════════════════

pub const GRID_SIZE: usize = 6;

pub const DAYS_PER_SEASON: u32 = 28;
pub const SEASONS_PER_YEAR: u32 = 4;

pub const MAX_ENERGY: u32 = 100;
pub const STARTING_GOLD: u32 = 500;
pub const STARTING_PARSNIP_SEEDS: u32 = 15;

pub const TILL_ENERGY_COST: u32 = 2;
pub const WATER_ENERGY_COST: u32 = 1;
pub const PLANT_ENERGY_COST: u32 = 1;

/// Five equally likely slots: 60% sunny, 20% cloudy, 20% rainy.
pub const WEATHER_TABLE: [Weather; 5] = [
    Weather::Sunny,
    Weather::Sunny,
    Weather::Sunny,
    Weather::Cloudy,
    Weather::Rainy,
];
