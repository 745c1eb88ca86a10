//! Item system - tools, resources, consumables, building parts and armor.

use crate::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Raw resource families gathered from the world or looted from wildlife.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    /// Chopped from trees and loose branches.
    Wood,
    /// Mined from rocks and loose stones.
    Stone,
    /// Occasional by-product of mining stone.
    MetalOre,
    /// Looted from wildlife.
    Cloth,
    /// Generic food resource.
    Food,
    /// Looted from wildlife.
    AnimalHide,
}

impl ResourceType {
    /// Canonical lowercase key, also used as the inventory stack id.
    pub const fn as_str(self) -> &'static str {
        match self {
            ResourceType::Wood => "wood",
            ResourceType::Stone => "stone",
            ResourceType::MetalOre => "metal_ore",
            ResourceType::Cloth => "cloth",
            ResourceType::Food => "food",
            ResourceType::AnimalHide => "animal_hide",
        }
    }

    /// Display name used when a stack of this resource is created.
    pub const fn display_name(self) -> &'static str {
        match self {
            ResourceType::Wood => "WOOD",
            ResourceType::Stone => "STONE",
            ResourceType::MetalOre => "Metal Ore",
            ResourceType::Cloth => "Cloth",
            ResourceType::Food => "Food",
            ResourceType::AnimalHide => "Animal Hide",
        }
    }

    /// Build a resource stack of `count` units.
    pub fn stack(self, count: u32) -> Item {
        Item::resource(self.as_str(), self.display_name(), count)
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "wood" => Ok(ResourceType::Wood),
            "stone" => Ok(ResourceType::Stone),
            "metal_ore" => Ok(ResourceType::MetalOre),
            "cloth" => Ok(ResourceType::Cloth),
            "food" => Ok(ResourceType::Food),
            "animal_hide" => Ok(ResourceType::AnimalHide),
            other => Err(CoreError::UnknownResource(other.to_string())),
        }
    }
}

/// Category tag derived from [`ItemKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemCategory {
    /// Hand-held implement with durability.
    Tool,
    /// Stackable crafting material.
    Resource,
    /// Stackable food.
    Consumable,
    /// Stackable placeable structure.
    Building,
    /// Worn protection with durability.
    Armor,
}

impl ItemCategory {
    /// Canonical lowercase key.
    pub const fn as_str(self) -> &'static str {
        match self {
            ItemCategory::Tool => "tool",
            ItemCategory::Resource => "resource",
            ItemCategory::Consumable => "consumable",
            ItemCategory::Building => "building",
            ItemCategory::Armor => "armor",
        }
    }

    /// Stackable categories keep at most one stack per id.
    pub const fn is_stackable(self) -> bool {
        matches!(
            self,
            ItemCategory::Resource | ItemCategory::Consumable | ItemCategory::Building
        )
    }

    /// Whether items of this category can be selected into the hotbar.
    pub const fn is_hotbar(self) -> bool {
        !matches!(self, ItemCategory::Resource)
    }
}

/// Per-category payload. Each variant carries only the fields relevant to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ItemKind {
    /// A tool instance.
    Tool {
        /// Remaining uses.
        durability: u32,
        /// Uses when new.
        max_durability: u32,
    },
    /// Crafting material.
    Resource,
    /// Food.
    Consumable,
    /// Placeable structure.
    Building,
    /// Armor instance.
    Armor {
        /// Defense points contributed while carried.
        defense: u32,
        /// Remaining durability.
        durability: u32,
        /// Durability when new.
        max_durability: u32,
    },
}

impl ItemKind {
    /// Category tag for this payload.
    pub const fn category(&self) -> ItemCategory {
        match self {
            ItemKind::Tool { .. } => ItemCategory::Tool,
            ItemKind::Resource => ItemCategory::Resource,
            ItemKind::Consumable => ItemCategory::Consumable,
            ItemKind::Building => ItemCategory::Building,
            ItemKind::Armor { .. } => ItemCategory::Armor,
        }
    }
}

/// An inventory stack (or a single tool/armor instance).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Stack id. Stackable items share ids; tool/armor instances carry a unique suffix.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Quantity in this stack.
    pub count: u32,
    /// Category payload.
    #[serde(flatten)]
    pub kind: ItemKind,
}

impl Item {
    /// A single new tool.
    pub fn tool(id: impl Into<String>, name: impl Into<String>, durability: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            count: 1,
            kind: ItemKind::Tool {
                durability,
                max_durability: durability,
            },
        }
    }

    /// A resource stack.
    pub fn resource(id: impl Into<String>, name: impl Into<String>, count: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            count,
            kind: ItemKind::Resource,
        }
    }

    /// A consumable stack.
    pub fn consumable(id: impl Into<String>, name: impl Into<String>, count: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            count,
            kind: ItemKind::Consumable,
        }
    }

    /// A building-part stack.
    pub fn building(id: impl Into<String>, name: impl Into<String>, count: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            count,
            kind: ItemKind::Building,
        }
    }

    /// A single new armor piece.
    pub fn armor(
        id: impl Into<String>,
        name: impl Into<String>,
        defense: u32,
        durability: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            count: 1,
            kind: ItemKind::Armor {
                defense,
                durability,
                max_durability: durability,
            },
        }
    }

    /// Category tag.
    pub fn category(&self) -> ItemCategory {
        self.kind.category()
    }

    /// Whether this item merges with same-id stacks.
    pub fn is_stackable(&self) -> bool {
        self.category().is_stackable()
    }

    /// Defense contributed by this stack (armor only).
    pub fn defense(&self) -> u32 {
        match self.kind {
            ItemKind::Armor { defense, .. } => defense.saturating_mul(self.count),
            _ => 0,
        }
    }

    /// Remaining durability for tools and armor.
    pub fn durability(&self) -> Option<u32> {
        match self.kind {
            ItemKind::Tool { durability, .. } | ItemKind::Armor { durability, .. } => {
                Some(durability)
            }
            _ => None,
        }
    }

    /// Wear the item by `amount`. Returns true when it just broke.
    pub fn wear(&mut self, amount: u32) -> bool {
        match &mut self.kind {
            ItemKind::Tool { durability, .. } | ItemKind::Armor { durability, .. } => {
                *durability = durability.saturating_sub(amount);
                *durability == 0
            }
            _ => false,
        }
    }

    /// Id without the per-instance suffix (`hatchet-3` -> `hatchet`).
    pub fn base_id(&self) -> &str {
        match self.id.rsplit_once('-') {
            Some((base, suffix)) if suffix.chars().all(|c| c.is_ascii_digit()) => base,
            _ => &self.id,
        }
    }
}

/// Attack/harvest characteristics of whatever the player is holding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ToolProfile {
    /// 0 = hand/torch, 1 = starter rock, 2 = stone hatchet/pickaxe, 3 = metal.
    pub tier: u8,
    /// Holding any hatchet.
    pub hatchet: bool,
    /// Holding any pickaxe.
    pub pickaxe: bool,
    /// Holding the starter rock tool.
    pub rock: bool,
    /// Nothing held, or the torch.
    pub bare_or_torch: bool,
}

impl ToolProfile {
    /// Derive the profile of the active item. Only tools contribute a tier.
    pub fn of(active: Option<&Item>) -> Self {
        let Some(item) = active else {
            return Self {
                bare_or_torch: true,
                ..Self::default()
            };
        };
        if item.category() != ItemCategory::Tool {
            return Self::default();
        }

        let id = item.id.as_str();
        let tier = if id.starts_with("metal") {
            3
        } else if id.starts_with("hatchet") || id.starts_with("pickaxe") {
            2
        } else if id.starts_with("rock") {
            1
        } else {
            0
        };

        Self {
            tier,
            hatchet: id.contains("hatchet"),
            pickaxe: id.contains("pickaxe"),
            rock: id.starts_with("rock_tool"),
            bare_or_torch: item.base_id() == "torch",
        }
    }

    /// Melee damage against wildlife.
    pub const fn combat_damage(&self) -> f64 {
        match self.tier {
            3 => 55.0,
            2 => 34.0,
            1 => 15.0,
            _ => 5.0,
        }
    }

    /// Whether this is the right implement for the resource family.
    pub fn suits(&self, resource: ResourceType) -> bool {
        match resource {
            ResourceType::Wood => self.hatchet,
            ResourceType::Stone => self.pickaxe,
            _ => false,
        }
    }
}
