//! Harvest: pick a mature crop into the inventory.

use crate::shared::*;

/// Try to harvest the crop on `tile`. Returns true if a harvest occurred.
///
/// Only mature crops come up. The tile stays tilled and is ready for
/// replanting. Harvesting never costs energy.
pub fn harvest(tile: &mut Tile, ledger: &mut PlayerLedger) -> bool {
    let ready = tile.crop.as_ref().is_some_and(Crop::is_mature);
    if !ready {
        return false;
    }

    let Some(crop) = tile.crop.take() else {
        return false;
    };
    ledger.harvest_inventory.add(crop.kind, 1);
    true
}
