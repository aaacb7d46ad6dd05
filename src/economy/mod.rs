//! Economy domain — the seed shop and the shipping of harvested crops.
//!
//! All cross-domain communication goes through `crate::shared::*` events and resources.
//! No other domain module is imported here.

use bevy::prelude::*;
use crate::shared::*;

pub mod gold;
pub mod shipping;
pub mod shop;

use gold::{track_gold_changes, EconomyStats};
use shipping::handle_sell_all;
use shop::handle_buy_seed;

pub struct EconomyPlugin;

impl Plugin for EconomyPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlayerLedger>()
            .init_resource::<EconomyStats>()
            .add_event::<BuySeedEvent>()
            .add_event::<SellAllEvent>()
            .add_event::<GoldChangeEvent>()
            .add_systems(
                Update,
                (
                    // Process buy/sell requests from the UI.
                    handle_buy_seed,
                    handle_sell_all,
                    // Tally after both so same-frame transactions are counted.
                    track_gold_changes,
                )
                    .chain(),
            );

        info!("[Economy] EconomyPlugin registered.");
    }
}
