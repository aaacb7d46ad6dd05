//! Calendar domain — the heartbeat of Valley Farm.
//!
//! Responsible for:
//! - Rolling the world clock forward one day at a time
//! - Rolling daily weather from an injectable source
//! - Detecting season changes and sending SeasonChangeEvent
//!
//! Season and season day are derived from the day counter (see `WorldClock`),
//! so the only state the calendar ever writes is `day` and `weather`.

use std::collections::VecDeque;

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::shared::*;

// ─── Weather sources ──────────────────────────────────────────────────────────

/// Anything that can pick tomorrow's weather. The only nondeterministic input
/// to the simulation; tests swap in a seeded or scripted source.
pub trait WeatherSource: Send + Sync {
    fn draw(&mut self) -> Weather;
}

/// Uniform draw over `WEATHER_TABLE` (60% sunny, 20% cloudy, 20% rainy).
pub fn roll_weather<R: Rng + ?Sized>(rng: &mut R) -> Weather {
    WEATHER_TABLE[rng.gen_range(0..WEATHER_TABLE.len())]
}

/// Weather drawn from a random number generator.
#[derive(Debug, Clone)]
pub struct RandomWeather<R = StdRng> {
    rng: R,
}

impl RandomWeather<StdRng> {
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    /// Same seed, same weather sequence.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomWeather<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng + Send + Sync> WeatherSource for RandomWeather<R> {
    fn draw(&mut self) -> Weather {
        roll_weather(&mut self.rng)
    }
}

/// Plays back a fixed forecast, then repeats `fallback` forever.
#[derive(Debug, Clone, Default)]
pub struct ScriptedWeather {
    upcoming: VecDeque<Weather>,
    fallback: Weather,
}

impl ScriptedWeather {
    pub fn new(forecast: impl IntoIterator<Item = Weather>) -> Self {
        Self {
            upcoming: forecast.into_iter().collect(),
            fallback: Weather::Sunny,
        }
    }

    /// Every draw returns `weather`.
    pub fn always(weather: Weather) -> Self {
        Self {
            upcoming: VecDeque::new(),
            fallback: weather,
        }
    }

    pub fn then_always(mut self, weather: Weather) -> Self {
        self.fallback = weather;
        self
    }
}

impl WeatherSource for ScriptedWeather {
    fn draw(&mut self) -> Weather {
        self.upcoming.pop_front().unwrap_or(self.fallback)
    }
}

/// The weather source used by the ECS day-advance system.
#[derive(Resource)]
pub struct WeatherRng(pub Box<dyn WeatherSource>);

impl WeatherRng {
    pub fn new(source: impl WeatherSource + 'static) -> Self {
        Self(Box::new(source))
    }
}

impl Default for WeatherRng {
    fn default() -> Self {
        Self::new(RandomWeather::from_entropy())
    }
}

// ─── Day rollover ─────────────────────────────────────────────────────────────

/// Returns the clock for the following day with freshly rolled weather.
/// Season is recomputed from the new day number.
pub fn next_day(clock: &WorldClock, weather: &mut dyn WeatherSource) -> WorldClock {
    let next = WorldClock {
        day: clock.day + 1,
        weather: weather.draw(),
    };

    if next.season() != clock.season() {
        info!(
            "[Calendar] Season changed: {} -> {} (Year {})",
            clock.season(),
            next.season(),
            next.year()
        );
    }

    info!(
        "[Calendar] New day: Day {} {} Year {} — Weather: {:?}",
        next.season_day(),
        next.season(),
        next.year(),
        next.weather
    );

    next
}

// ─── Plugin ───────────────────────────────────────────────────────────────────

pub struct CalendarPlugin;

impl Plugin for CalendarPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WorldClock>()
            .init_resource::<WeatherRng>()
            .add_event::<DayEndEvent>()
            .add_event::<DayStartEvent>()
            .add_event::<SeasonChangeEvent>()
            .add_systems(Update, detect_season_change);
    }
}

/// Pairs each DayEndEvent with the clock that replaced it and sends a
/// SeasonChangeEvent when the season rolled over.
pub fn detect_season_change(
    mut day_end_reader: EventReader<DayEndEvent>,
    mut day_start_reader: EventReader<DayStartEvent>,
    mut season_writer: EventWriter<SeasonChangeEvent>,
) {
    for (ended, started) in day_end_reader.read().zip(day_start_reader.read()) {
        if ended.season == started.season {
            continue;
        }

        let year = WorldClock {
            day: started.day,
            weather: started.weather,
        }
        .year();

        season_writer.send(SeasonChangeEvent {
            new_season: started.season,
            year,
        });
        info!("[Calendar] SeasonChangeEvent sent: {} Year {}", started.season, year);
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weather_roll_distribution() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut sunny = 0u32;
        let mut rainy = 0u32;
        let mut cloudy = 0u32;

        for _ in 0..10_000 {
            match roll_weather(&mut rng) {
                Weather::Sunny => sunny += 1,
                Weather::Rainy => rainy += 1,
                Weather::Cloudy => cloudy += 1,
            }
        }

        // Loose tolerances around 60/20/20.
        assert!(sunny > 5500 && sunny < 6500, "Sunny should be ~60%, got {}", sunny);
        assert!(rainy > 1500 && rainy < 2500, "Rainy should be ~20%, got {}", rainy);
        assert!(cloudy > 1500 && cloudy < 2500, "Cloudy should be ~20%, got {}", cloudy);
    }

    #[test]
    fn test_seeded_weather_is_repeatable() {
        let mut a = RandomWeather::seeded(42);
        let mut b = RandomWeather::seeded(42);
        let first: Vec<_> = (0..30).map(|_| a.draw()).collect();
        let second: Vec<_> = (0..30).map(|_| b.draw()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_scripted_weather_plays_forecast_then_fallback() {
        let mut source = ScriptedWeather::new([Weather::Rainy, Weather::Cloudy]);
        assert_eq!(source.draw(), Weather::Rainy);
        assert_eq!(source.draw(), Weather::Cloudy);
        assert_eq!(source.draw(), Weather::Sunny);

        let mut source = ScriptedWeather::new([Weather::Cloudy]).then_always(Weather::Rainy);
        assert_eq!(source.draw(), Weather::Cloudy);
        assert_eq!(source.draw(), Weather::Rainy);
        assert_eq!(source.draw(), Weather::Rainy);
    }

    #[test]
    fn test_next_day_increments_and_rolls_weather() {
        let clock = WorldClock::default();
        let mut weather = ScriptedWeather::always(Weather::Cloudy);
        let next = next_day(&clock, &mut weather);
        assert_eq!(next.day, 2);
        assert_eq!(next.weather, Weather::Cloudy);
        assert_eq!(next.season(), Season::Spring);
    }

    #[test]
    fn test_next_day_crosses_into_summer() {
        let clock = WorldClock {
            day: 28,
            weather: Weather::Sunny,
        };
        let next = next_day(&clock, &mut ScriptedWeather::always(Weather::Sunny));
        assert_eq!(next.day, 29);
        assert_eq!(next.season(), Season::Summer);
        assert_eq!(next.season_day(), 1);
    }

    #[test]
    fn test_next_day_after_winter_is_spring() {
        let clock = WorldClock {
            day: 112,
            weather: Weather::Sunny,
        };
        assert_eq!(clock.season(), Season::Winter);
        let next = next_day(&clock, &mut ScriptedWeather::always(Weather::Sunny));
        assert_eq!(next.day, 113);
        assert_eq!(next.season(), Season::Spring);
        assert_eq!(next.season_day(), 1);
        assert_eq!(next.year(), 2);
    }

    #[test]
    fn test_weather_rng_resource_accepts_scripted_source() {
        let mut rng = WeatherRng::new(ScriptedWeather::always(Weather::Rainy));
        assert_eq!(rng.0.draw(), Weather::Rainy);
    }
}
