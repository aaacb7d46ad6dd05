use bevy::prelude::*;
use crate::economy::gold::format_gold;
use crate::shared::*;

/// Outcome of selling the whole harvest inventory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sale {
    pub ledger: PlayerLedger,
    pub gold_gained: u32,
    pub items_sold: u32,
}

/// Current value of everything in the harvest inventory at catalog prices.
/// The UI reads this as a "pending earnings" preview.
pub fn calculate_harvest_value(inventory: &CropCounts) -> u32 {
    inventory
        .iter()
        .map(|(crop, count)| crop.sell_price().saturating_mul(count))
        .fold(0u32, |acc, v| acc.saturating_add(v))
}

/// Sells every harvested crop at its catalog price and empties the
/// inventory. Selling an empty inventory is a harmless no-op.
pub fn sell_all(ledger: &PlayerLedger) -> Sale {
    let mut next = ledger.clone();
    let mut gold_gained: u32 = 0;
    let mut items_sold: u32 = 0;

    for crop in CropType::ALL {
        let count = next.harvest_inventory.take_all(crop);
        if count == 0 {
            continue;
        }
        gold_gained = gold_gained.saturating_add(crop.sell_price().saturating_mul(count));
        items_sold = items_sold.saturating_add(count);
    }

    next.gold = next.gold.saturating_add(gold_gained);

    Sale {
        ledger: next,
        gold_gained,
        items_sold,
    }
}

/// Processes SellAllEvents from the UI.
pub fn handle_sell_all(
    mut sell_events: EventReader<SellAllEvent>,
    mut ledger: ResMut<PlayerLedger>,
    mut gold_writer: EventWriter<GoldChangeEvent>,
) {
    for _ev in sell_events.read() {
        if !ledger.has_harvest() {
            continue;
        }

        let sale = sell_all(&ledger);
        *ledger = sale.ledger;

        gold_writer.send(GoldChangeEvent {
            amount: sale.gold_gained as i64,
            reason: format!("Sold harvest ({} items)", sale.items_sold),
        });
        info!(
            "[Economy] Sold {} item(s) for {}. Balance: {}",
            sale.items_sold,
            format_gold(sale.gold_gained),
            format_gold(ledger.gold)
        );
    }
}

impl PlayerLedger {
    pub fn harvest_value(&self) -> u32 {
        calculate_harvest_value(&self.harvest_inventory)
    }
}
