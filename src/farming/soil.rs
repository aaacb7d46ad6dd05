//! Tilling and watering.

use crate::shared::*;

// ─────────────────────────────────────────────────────────────────────────────
// Till: prepare an untouched tile
// ─────────────────────────────────────────────────────────────────────────────

/// Tills the tile. Returns false if it was already tilled.
pub fn till(tile: &mut Tile) -> bool {
    if tile.tilled {
        return false;
    }
    tile.tilled = true;
    true
}

// ─────────────────────────────────────────────────────────────────────────────
// Water: wet a crop for tonight's growth
// ─────────────────────────────────────────────────────────────────────────────

/// Waters the crop on a tilled tile. Bare soil and crops that are already
/// watered are left alone.
pub fn water(tile: &mut Tile) -> bool {
    if !tile.tilled {
        return false;
    }
    match tile.crop.as_mut() {
        Some(crop) if !crop.watered => {
            crop.watered = true;
            true
        }
        _ => false,
    }
}
