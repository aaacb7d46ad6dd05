//! Simulation root: the single owner of farm state, plus the plugin bundle.
//!
//! `FarmSession` is the plain-Rust face of the engine: a presentation layer
//! calls its operations and re-renders from its accessors. `ValleyFarmPlugin`
//! exposes the same rules to a Bevy app as resources plus request/result
//! events.
//!
//! Every mutating operation computes complete new values from the current
//! ones and only then swaps them in, so a reader never sees a grid from one
//! step paired with a ledger from another.

pub mod day_cycle;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::calendar::{detect_season_change, CalendarPlugin, RandomWeather, WeatherSource};
use crate::economy::shipping::sell_all;
use crate::economy::shop::{buy_seed, seed_listings, SeedListing};
use crate::economy::EconomyPlugin;
use crate::farming::{apply_action, handle_tool_actions, FarmingPlugin};
use crate::shared::*;
use day_cycle::{advance_day, process_sleep};

// ═══════════════════════════════════════════════════════════════════════
// SNAPSHOTS
// ═══════════════════════════════════════════════════════════════════════

/// Clock fields as the UI shows them, derived values included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockView {
    pub day: u32,
    pub season_day: u32,
    pub season: Season,
    pub year: u32,
    pub weather: Weather,
}

impl From<&WorldClock> for ClockView {
    fn from(clock: &WorldClock) -> Self {
        Self {
            day: clock.day,
            season_day: clock.season_day(),
            season: clock.season(),
            year: clock.year(),
            weather: clock.weather,
        }
    }
}

/// Owned copy of everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FarmSnapshot {
    pub grid: FarmGrid,
    pub ledger: PlayerLedger,
    pub clock: ClockView,
    pub selection: Selection,
}

// ═══════════════════════════════════════════════════════════════════════
// SESSION
// ═══════════════════════════════════════════════════════════════════════

pub struct FarmSession {
    grid: FarmGrid,
    ledger: PlayerLedger,
    clock: WorldClock,
    selection: Selection,
    weather: Box<dyn WeatherSource>,
}

impl Default for FarmSession {
    fn default() -> Self {
        Self::new()
    }
}

impl FarmSession {
    /// A fresh farm with entropy-seeded weather.
    pub fn new() -> Self {
        Self::with_weather(RandomWeather::from_entropy())
    }

    /// A fresh farm whose daily weather comes from `source`.
    pub fn with_weather(source: impl WeatherSource + 'static) -> Self {
        Self {
            grid: FarmGrid::default(),
            ledger: PlayerLedger::default(),
            clock: WorldClock::default(),
            selection: Selection::default(),
            weather: Box::new(source),
        }
    }

    // ── Read accessors ─────────────────────────────────────────────────

    pub fn grid(&self) -> &FarmGrid {
        &self.grid
    }

    pub fn ledger(&self) -> &PlayerLedger {
        &self.ledger
    }

    pub fn clock(&self) -> &WorldClock {
        &self.clock
    }

    pub fn clock_view(&self) -> ClockView {
        ClockView::from(&self.clock)
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn snapshot(&self) -> FarmSnapshot {
        FarmSnapshot {
            grid: self.grid.clone(),
            ledger: self.ledger.clone(),
            clock: self.clock_view(),
            selection: self.selection,
        }
    }

    /// Crops the seed picker should offer today.
    pub fn seasonal_crops(&self) -> Vec<CropType> {
        CropType::in_season(self.clock.season()).collect()
    }

    /// Today's shop shelf.
    pub fn shop_listings(&self) -> Vec<SeedListing> {
        seed_listings(self.clock.season(), self.ledger.gold)
    }

    // ── Selection ──────────────────────────────────────────────────────

    pub fn select_tool(&mut self, tool: Tool) {
        self.selection.tool = tool;
    }

    pub fn select_seed(&mut self, seed: CropType) {
        self.selection.seed = seed;
    }

    // ── Operations ─────────────────────────────────────────────────────

    /// Use `tool` on the tile at `pos`, planting `seed` if the tool is Plant.
    ///
    /// # Panics
    ///
    /// If `pos` is outside the farm.
    pub fn apply_action(&mut self, tool: Tool, pos: GridPos, seed: CropType) -> ActionOutcome {
        let result = apply_action(&self.grid, &self.ledger, &self.clock, tool, seed, pos);
        if result.outcome == ActionOutcome::Applied {
            self.grid = result.grid;
            self.ledger = result.ledger;
        }
        result.outcome
    }

    /// Use whatever is currently selected on the tile at `pos`.
    pub fn use_selected(&mut self, pos: GridPos) -> ActionOutcome {
        let Selection { tool, seed } = self.selection;
        self.apply_action(tool, pos, seed)
    }

    /// Sleep: grow crops, roll the clock and weather, refill energy.
    pub fn advance_day(&mut self) {
        let next = advance_day(&self.grid, &self.ledger, &self.clock, self.weather.as_mut());
        self.grid = next.grid;
        self.ledger = next.ledger;
        self.clock = next.clock;
    }

    /// Returns false, changing nothing, when the player can't afford it.
    pub fn buy_seed(&mut self, crop: CropType) -> bool {
        match buy_seed(&self.ledger, crop) {
            Some(next) => {
                self.ledger = next;
                true
            }
            None => false,
        }
    }

    /// Sells the whole harvest inventory; returns the gold gained.
    pub fn sell_all(&mut self) -> u32 {
        let sale = sell_all(&self.ledger);
        self.ledger = sale.ledger;
        sale.gold_gained
    }
}

// ═══════════════════════════════════════════════════════════════════════
// PLUGIN
// ═══════════════════════════════════════════════════════════════════════

/// Registers every domain plugin plus the cross-domain sleep system.
///
/// To control the weather, insert a `WeatherRng` after adding the plugin.
pub struct ValleyFarmPlugin;

impl Plugin for ValleyFarmPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((CalendarPlugin, FarmingPlugin, EconomyPlugin))
            .add_event::<SleepEvent>()
            .add_systems(
                Update,
                process_sleep
                    .after(handle_tool_actions)
                    .before(detect_season_change),
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::ScriptedWeather;

    #[test]
    fn test_new_session_starting_state() {
        let session = FarmSession::with_weather(ScriptedWeather::default());
        let snap = session.snapshot();
        assert_eq!(snap.ledger.gold, 500);
        assert_eq!(snap.ledger.energy, 100);
        assert_eq!(snap.ledger.seed_stock[CropType::Parsnip], 15);
        assert_eq!(snap.clock.day, 1);
        assert_eq!(snap.clock.season, Season::Spring);
        assert_eq!(snap.clock.weather, Weather::Sunny);
        assert_eq!(snap.selection.tool, Tool::Till);
        assert_eq!(snap.selection.seed, CropType::Parsnip);
        assert_eq!(snap.grid.tilled_count(), 0);
    }

    #[test]
    fn test_use_selected_follows_selection() {
        let mut session = FarmSession::with_weather(ScriptedWeather::default());
        let pos = GridPos::new(0, 0);

        assert_eq!(session.use_selected(pos), ActionOutcome::Applied);
        session.select_tool(Tool::Plant);
        session.select_seed(CropType::Potato);
        // No potato seeds yet.
        assert_eq!(session.use_selected(pos), ActionOutcome::NoOp);

        assert!(session.buy_seed(CropType::Potato));
        assert_eq!(session.use_selected(pos), ActionOutcome::Applied);
        assert_eq!(
            session.grid().tile(pos).crop.as_ref().map(|c| c.kind),
            Some(CropType::Potato)
        );
    }

    #[test]
    fn test_seasonal_crops_follow_clock() {
        let mut session = FarmSession::with_weather(ScriptedWeather::default());
        assert_eq!(session.seasonal_crops().len(), 4);
        for _ in 0..28 {
            session.advance_day();
        }
        assert_eq!(session.clock().season(), Season::Summer);
        assert_eq!(
            session.seasonal_crops(),
            vec![CropType::Strawberry, CropType::Melon, CropType::Corn]
        );
    }

    #[test]
    fn test_shop_listings_use_current_gold() {
        let mut session = FarmSession::with_weather(ScriptedWeather::default());
        assert!(session.shop_listings().iter().all(|l| l.can_afford));
        while session.buy_seed(CropType::Strawberry) {}
        assert_eq!(session.ledger().gold, 0);
        assert!(session.shop_listings().iter().all(|l| !l.can_afford));
    }

    #[test]
    fn test_clock_view_derivations() {
        let view = ClockView::from(&WorldClock {
            day: 29,
            weather: Weather::Rainy,
        });
        assert_eq!(view.season, Season::Summer);
        assert_eq!(view.season_day, 1);
        assert_eq!(view.year, 1);
        assert_eq!(view.weather, Weather::Rainy);
    }
}
