//! Sleeping through the night: the one transition that touches every domain.
//!
//! Order matters and is fixed here:
//! 1. Overnight growth consumes yesterday's `watered` flags, then clears them.
//! 2. The clock rolls to the next day and draws the new weather.
//! 3. Energy refills.
//! 4. If the new day is rainy, every crop is watered, once.
//!
//! Step 4 runs after step 1 by construction, so a rainy morning only helps
//! the *next* night's growth.

use bevy::prelude::*;

use crate::calendar::{next_day, WeatherRng, WeatherSource};
use crate::farming::crops::advance_crop_growth;
use crate::farming::rain::apply_rain_watering;
use crate::shared::*;

/// Complete replacement state after one night.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayTransition {
    pub grid: FarmGrid,
    pub ledger: PlayerLedger,
    pub clock: WorldClock,
}

pub fn advance_day(
    grid: &FarmGrid,
    ledger: &PlayerLedger,
    clock: &WorldClock,
    weather: &mut dyn WeatherSource,
) -> DayTransition {
    let grown = advance_crop_growth(grid);
    let next_clock = next_day(clock, weather);

    let mut next_ledger = ledger.clone();
    next_ledger.energy = next_ledger.max_energy;

    let next_grid = if next_clock.weather == Weather::Rainy {
        apply_rain_watering(&grown)
    } else {
        grown
    };

    DayTransition {
        grid: next_grid,
        ledger: next_ledger,
        clock: next_clock,
    }
}

/// Handles SleepEvent: advances the day once per event and announces the
/// day that ended and the day that began.
pub fn process_sleep(
    mut sleep_events: EventReader<SleepEvent>,
    mut grid: ResMut<FarmGrid>,
    mut ledger: ResMut<PlayerLedger>,
    mut clock: ResMut<WorldClock>,
    mut weather: ResMut<WeatherRng>,
    mut day_end_writer: EventWriter<DayEndEvent>,
    mut day_start_writer: EventWriter<DayStartEvent>,
) {
    for _ev in sleep_events.read() {
        let ended = *clock;
        let next = advance_day(&grid, &ledger, &ended, &mut *weather.0);

        *grid = next.grid;
        *ledger = next.ledger;
        *clock = next.clock;

        info!(
            "[Calendar] Day ended: Day {} {} Year {}",
            ended.season_day(),
            ended.season(),
            ended.year()
        );

        day_end_writer.send(DayEndEvent {
            day: ended.day,
            season: ended.season(),
        });
        day_start_writer.send(DayStartEvent {
            day: clock.day,
            season: clock.season(),
            weather: clock.weather,
        });
    }
}
