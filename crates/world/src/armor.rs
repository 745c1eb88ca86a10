//! Armor defense and damage reduction.
//!
//! Armor is not equipped into slots: every armor piece carried in the
//! inventory contributes its defense.

use crate::inventory::Inventory;
use rusted_core::ItemCategory;

/// Damage is never reduced below this fraction.
pub const MIN_DAMAGE_MULTIPLIER: f64 = 0.1;

/// Sum of defense over carried armor.
pub fn total_defense(inventory: &Inventory) -> u32 {
    inventory
        .items()
        .iter()
        .filter(|i| i.category() == ItemCategory::Armor)
        .map(|i| i.defense())
        .sum()
}

/// Incoming damage factor for a given defense total.
pub fn multiplier_for_defense(defense: u32) -> f64 {
    (1.0 - f64::from(defense) / 100.0).max(MIN_DAMAGE_MULTIPLIER)
}

/// Incoming damage factor for the carried armor.
pub fn damage_multiplier(inventory: &Inventory) -> f64 {
    multiplier_for_defense(total_defense(inventory))
}
