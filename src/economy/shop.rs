use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use crate::economy::gold::format_gold;
use crate::shared::*;

// ─────────────────────────────────────────────────────────────────────────────
// Listings
// ─────────────────────────────────────────────────────────────────────────────

/// A single seed on the shop shelf, enriched for the UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedListing {
    pub crop: CropType,
    pub display_name: String,
    pub seed_price: u32,
    pub sell_price: u32, // what the grown crop fetches
    pub can_afford: bool,
}

/// The seeds the shop shows this season, with affordability against `gold`.
pub fn seed_listings(season: Season, gold: u32) -> Vec<SeedListing> {
    CropType::in_season(season)
        .map(|crop| SeedListing {
            crop,
            display_name: crop.def().name.to_string(),
            seed_price: crop.seed_price(),
            sell_price: crop.sell_price(),
            can_afford: gold >= crop.seed_price(),
        })
        .collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Purchase
// ─────────────────────────────────────────────────────────────────────────────

/// Buy one seed packet. Returns the new ledger, or `None` when the player
/// can't afford it.
///
/// Any crop can be bought in any season; only the listing is filtered.
pub fn buy_seed(ledger: &PlayerLedger, crop: CropType) -> Option<PlayerLedger> {
    let price = crop.seed_price();
    if ledger.gold < price {
        debug!(
            "[Economy] Cannot afford {} seeds: need {}, have {}",
            crop.def().name,
            format_gold(price),
            format_gold(ledger.gold)
        );
        return None;
    }

    let mut next = ledger.clone();
    next.gold -= price;
    next.seed_stock.add(crop, 1);
    Some(next)
}

/// Processes BuySeedEvents from the UI.
pub fn handle_buy_seed(
    mut buy_events: EventReader<BuySeedEvent>,
    mut ledger: ResMut<PlayerLedger>,
    mut gold_writer: EventWriter<GoldChangeEvent>,
) {
    for ev in buy_events.read() {
        let Some(next) = buy_seed(&ledger, ev.crop) else {
            continue;
        };
        *ledger = next;

        let price = ev.crop.seed_price();
        gold_writer.send(GoldChangeEvent {
            amount: -(price as i64),
            reason: format!("Bought {} seeds", ev.crop.def().name),
        });
        info!(
            "[Economy] Bought {} seeds for {}. Balance: {}",
            ev.crop.def().name,
            format_gold(price),
            format_gold(ledger.gold)
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ledger_with_gold(gold: u32) -> PlayerLedger {
        PlayerLedger {
            gold,
            ..default()
        }
    }

    #[test]
    fn test_buy_seed_insufficient_gold() {
        let ledger = ledger_with_gold(50);
        assert_eq!(buy_seed(&ledger, CropType::Pumpkin), None);
    }

    #[test]
    fn test_buy_seed_deducts_price() {
        let ledger = ledger_with_gold(150);
        let next = buy_seed(&ledger, CropType::Pumpkin).expect("affordable");
        assert_eq!(next.gold, 50);
        assert_eq!(next.seed_stock[CropType::Pumpkin], 1);
        assert_eq!(ledger.gold, 150, "Input ledger is untouched");
    }

    #[test]
    fn test_buy_seed_exact_price() {
        let ledger = ledger_with_gold(20);
        let next = buy_seed(&ledger, CropType::Parsnip).expect("exactly affordable");
        assert_eq!(next.gold, 0);
        assert_eq!(next.seed_stock[CropType::Parsnip], 16);
    }

    #[test]
    fn test_buy_seed_ignores_season() {
        let ledger = ledger_with_gold(500);
        assert!(buy_seed(&ledger, CropType::Pumpkin).is_some());
    }

    #[test]
    fn test_seed_listings_spring() {
        let listings = seed_listings(Season::Spring, 90);
        let crops: Vec<_> = listings.iter().map(|l| l.crop).collect();
        assert_eq!(
            crops,
            vec![CropType::Parsnip, CropType::Cauliflower, CropType::Potato, CropType::Strawberry]
        );
        let affordable: Vec<_> = listings.iter().filter(|l| l.can_afford).map(|l| l.crop).collect();
        assert_eq!(
            affordable,
            vec![CropType::Parsnip, CropType::Cauliflower, CropType::Potato]
        );
        assert_eq!(listings[3].seed_price, 100);
        assert_eq!(listings[3].sell_price, 120);
    }

    #[test]
    fn test_seed_listings_winter_is_empty() {
        assert!(seed_listings(Season::Winter, 10_000).is_empty());
    }
}
