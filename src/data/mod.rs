//! Data layer — the static crop catalog.
//!
//! The crop set is closed, so the catalog is a compile-time table keyed by
//! `CropType` rather than a registry filled at startup. Every domain reads it
//! through the `CropType` accessors (`grow_time`, `sell_price`, `seed_price`,
//! `grows_in`, `stage_count`).

mod crops;

pub use crops::{stage_index, CropDef, CROP_TABLE};
