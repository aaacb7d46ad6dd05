//! Valley Farm, a 6x6 farming simulation engine.
//!
//! The rules are pure functions over plain data (`farming`, `economy`,
//! `calendar`, `sim::day_cycle`). Two front doors sit on top of them:
//!
//! - [`FarmSession`]: a single owned state value with method calls, for any
//!   presentation layer that wants to drive the game directly.
//! - [`ValleyFarmPlugin`]: the same rules as Bevy resources, request events
//!   and systems, so a Bevy app (or a headless `MinimalPlugins` test app) can
//!   run the farm without a window or GPU.

pub mod shared;
pub mod data;
pub mod calendar;
pub mod farming;
pub mod economy;
pub mod sim;

pub use sim::{FarmSession, FarmSnapshot, ValleyFarmPlugin};
