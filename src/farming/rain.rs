//! Rain watering.

use bevy::prelude::*;
use crate::shared::*;

/// On a rainy morning every crop starts the day watered.
///
/// Runs once, right after the day's weather is rolled. The growth pass for
/// the night that just ended has already happened, so the rain only pays off
/// at the next rollover.
pub fn apply_rain_watering(grid: &FarmGrid) -> FarmGrid {
    let mut next = grid.clone();
    let mut watered = 0usize;

    for crop in next.tiles_mut().filter_map(|tile| tile.crop.as_mut()) {
        crop.watered = true;
        watered += 1;
    }

    info!("[Farming] Rain watered {} crop(s)", watered);
    next
}
