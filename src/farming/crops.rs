//! Crop planting and overnight growth.

use bevy::prelude::*;
use crate::shared::*;

// ─────────────────────────────────────────────────────────────────────────────
// Planting
// ─────────────────────────────────────────────────────────────────────────────

/// Plants one `seed` on the tile, consuming it from the ledger.
///
/// Rejected (nothing changes) unless the tile is tilled and empty, the seed
/// grows in the current season, and the player has one in stock.
pub fn plant(tile: &mut Tile, ledger: &mut PlayerLedger, seed: CropType, clock: &WorldClock) -> bool {
    if !tile.tilled || tile.crop.is_some() {
        return false;
    }

    if !seed.grows_in(clock.season()) {
        // Out of season: the seed picker only lists in-season crops.
        return false;
    }

    if !ledger.seed_stock.take_one(seed) {
        return false;
    }

    tile.crop = Some(Crop {
        kind: seed,
        growth: 0,
        max_growth: seed.grow_time(),
        watered: false,
        planted_on_day: clock.day,
    });
    true
}

// ─────────────────────────────────────────────────────────────────────────────
// Crop growth advancement (called from the day cycle)
// ─────────────────────────────────────────────────────────────────────────────

/// Advance every crop by one night.
///
/// Watered crops gain one day of growth, capped at maturity. Every crop's
/// `watered` flag is cleared afterwards, grown or not.
pub fn advance_crop_growth(grid: &FarmGrid) -> FarmGrid {
    let mut next = grid.clone();
    let mut grown = 0usize;

    for crop in next.tiles_mut().filter_map(|tile| tile.crop.as_mut()) {
        if crop.watered && crop.growth < crop.max_growth {
            crop.growth += 1;
            grown += 1;
        }
        crop.watered = false;
    }

    debug!("[Farming] Overnight growth: {} crop(s) grew", grown);
    next
}
