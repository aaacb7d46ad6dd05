use crate::shared::*;

/// Immutable catalog entry for one crop type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropDef {
    pub kind: CropType,
    pub name: &'static str,
    /// Shown for the harvested good.
    pub glyph: &'static str,
    /// One glyph per visual growth stage, seedling first, mature last.
    pub stages: &'static [&'static str],
    /// Days of watered growth needed to mature.
    pub grow_time: u32,
    pub sell_price: u32,
    pub seed_price: u32,
    /// Never empty.
    pub seasons: &'static [Season],
}

/// The crop table, in `CropType::ALL` order.
///
///   Spring: parsnip (4d), cauliflower (12d), potato (6d), strawberry (8d, also summer)
///   Summer: melon (12d), corn (14d, also fall)
///   Fall:   pumpkin (13d)
///   Winter: nothing grows
pub static CROP_TABLE: [CropDef; 7] = [
    CropDef {
        kind: CropType::Parsnip,
        name: "Parsnip",
        glyph: "🥕",
        stages: &["🌱", "🌿", "🥕"],
        grow_time: 4,
        sell_price: 35,
        seed_price: 20,
        seasons: &[Season::Spring],
    },
    CropDef {
        kind: CropType::Cauliflower,
        name: "Cauliflower",
        glyph: "🥦",
        stages: &["🌱", "🌿", "🥬", "🥦"],
        grow_time: 12,
        sell_price: 175,
        seed_price: 80,
        seasons: &[Season::Spring],
    },
    CropDef {
        kind: CropType::Potato,
        name: "Potato",
        glyph: "🥔",
        stages: &["🌱", "🌿", "🥔"],
        grow_time: 6,
        sell_price: 80,
        seed_price: 50,
        seasons: &[Season::Spring],
    },
    CropDef {
        kind: CropType::Strawberry,
        name: "Strawberry",
        glyph: "🍓",
        stages: &["🌱", "🌿", "🌸", "🍓"],
        grow_time: 8,
        sell_price: 120,
        seed_price: 100,
        seasons: &[Season::Spring, Season::Summer],
    },
    CropDef {
        kind: CropType::Melon,
        name: "Melon",
        glyph: "🍈",
        stages: &["🌱", "🌿", "🍈"],
        grow_time: 12,
        sell_price: 250,
        seed_price: 80,
        seasons: &[Season::Summer],
    },
    CropDef {
        kind: CropType::Corn,
        name: "Corn",
        glyph: "🌽",
        stages: &["🌱", "🌿", "🌾", "🌽"],
        grow_time: 14,
        sell_price: 50,
        seed_price: 150,
        seasons: &[Season::Summer, Season::Fall],
    },
    CropDef {
        kind: CropType::Pumpkin,
        name: "Pumpkin",
        glyph: "🎃",
        stages: &["🌱", "🌿", "🎃"],
        grow_time: 13,
        sell_price: 320,
        seed_price: 100,
        seasons: &[Season::Fall],
    },
];

impl CropType {
    pub fn def(self) -> &'static CropDef {
        &CROP_TABLE[self.index()]
    }

    pub fn grow_time(self) -> u32 {
        self.def().grow_time
    }

    pub fn sell_price(self) -> u32 {
        self.def().sell_price
    }

    pub fn seed_price(self) -> u32 {
        self.def().seed_price
    }

    pub fn stage_count(self) -> usize {
        self.def().stages.len()
    }

    pub fn grows_in(self, season: Season) -> bool {
        self.def().seasons.contains(&season)
    }

    /// Crops plantable in `season`, in catalog order.
    pub fn in_season(season: Season) -> impl Iterator<Item = CropType> {
        CropType::ALL.into_iter().filter(move |kind| kind.grows_in(season))
    }
}

/// Maps accumulated growth onto a visual stage:
/// `floor(growth / max_growth * (stage_count - 1))`, clamped to the last stage.
pub fn stage_index(growth: u32, max_growth: u32, stage_count: usize) -> usize {
    let last = stage_count.saturating_sub(1);
    if max_growth == 0 {
        return last;
    }
    let scaled = (growth as u64 * last as u64) / max_growth as u64;
    (scaled as usize).min(last)
}

impl Crop {
    pub fn stage_index(&self) -> usize {
        stage_index(self.growth, self.max_growth, self.kind.stage_count())
    }

    pub fn stage_glyph(&self) -> &'static str {
        self.kind.def().stages[self.stage_index()]
    }
}
