//! Player inventory: an ordered list of stacks and tool/armor instances.

use rusted_core::{Item, ItemCategory, ResourceType};
use serde::{Deserialize, Serialize};

/// Id of the starter rock tool; also the default active item.
pub const STARTER_TOOL_ID: &str = "rock_tool";

/// Number of hotbar slots.
pub const HOTBAR_SLOTS: usize = 6;

/// Ordered item list. Zero-count stacks are pruned after every mutation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inventory {
    items: Vec<Item>,
}

impl Inventory {
    /// Create an empty inventory.
    pub fn new() -> Self {
        Self::default()
    }

    /// The kit every new (or respawned) player starts with.
    pub fn starting() -> Self {
        Self {
            items: vec![
                Item::tool(STARTER_TOOL_ID, "Rock", 50),
                Item::tool("torch", "Torch", 80),
            ],
        }
    }

    /// All items in order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the inventory holds nothing.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Look up an entry by exact id.
    pub fn get(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Mutable lookup by exact id.
    pub fn get_mut(&mut self, id: &str) -> Option<&mut Item> {
        self.items.iter_mut().find(|i| i.id == id)
    }

    /// Add an item. Stackables merge into an existing same-id stack; instances append.
    pub fn add(&mut self, item: Item) {
        if item.count == 0 {
            return;
        }
        if item.is_stackable() {
            if let Some(existing) = self.items.iter_mut().find(|i| i.id == item.id) {
                existing.count = existing.count.saturating_add(item.count);
                return;
            }
        }
        self.items.push(item);
    }

    /// Add a resource stack.
    pub fn add_resource(&mut self, resource: ResourceType, count: u32) {
        self.add(resource.stack(count));
    }

    /// Remove up to `amount` from the entry with `id`. Returns how many were removed.
    pub fn remove(&mut self, id: &str, amount: u32) -> u32 {
        let removed = match self.get_mut(id) {
            Some(item) => {
                let taken = item.count.min(amount);
                item.count -= taken;
                taken
            }
            None => 0,
        };
        self.prune();
        removed
    }

    /// Drop an entry entirely.
    pub fn remove_entry(&mut self, id: &str) -> Option<Item> {
        let index = self.items.iter().position(|i| i.id == id)?;
        Some(self.items.remove(index))
    }

    /// Total count across resource stacks whose id starts with `prefix`.
    pub fn count_resource_prefix(&self, prefix: &str) -> u32 {
        self.items
            .iter()
            .filter(|i| i.category() == ItemCategory::Resource && i.id.starts_with(prefix))
            .map(|i| i.count)
            .sum()
    }

    /// Take `amount` units from matching resource stacks in order.
    ///
    /// Callers must check [`Self::count_resource_prefix`] first; a shortfall
    /// removes what is available.
    pub fn take_resource_prefix(&mut self, prefix: &str, amount: u32) {
        let mut remaining = amount;
        for item in self
            .items
            .iter_mut()
            .filter(|i| i.category() == ItemCategory::Resource && i.id.starts_with(prefix))
        {
            if remaining == 0 {
                break;
            }
            let taken = item.count.min(remaining);
            item.count -= taken;
            remaining -= taken;
        }
        self.prune();
    }

    /// Items selectable into the hotbar, in inventory order.
    pub fn hotbar(&self) -> impl Iterator<Item = &Item> {
        self.items.iter().filter(|i| i.category().is_hotbar())
    }

    /// Id of the item in 1-based hotbar `slot`.
    pub fn hotbar_slot(&self, slot: usize) -> Option<&str> {
        if slot == 0 || slot > HOTBAR_SLOTS {
            return None;
        }
        self.hotbar().nth(slot - 1).map(|i| i.id.as_str())
    }

    fn prune(&mut self) {
        self.items.retain(|i| i.count > 0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starting_kit() {
        let inv = Inventory::starting();
        assert_eq!(inv.len(), 2);
        assert_eq!(inv.items()[0].id, "rock_tool");
        assert_eq!(inv.items()[1].id, "torch");
        assert_eq!(inv.items()[1].durability(), Some(80));
    }

    #[test]
    fn test_stackables_merge_instances_do_not() {
        let mut inv = Inventory::new();
        inv.add_resource(ResourceType::Wood, 5);
        inv.add_resource(ResourceType::Wood, 7);
        inv.add(Item::tool("hatchet-1", "Stone Hatchet", 100));
        inv.add(Item::tool("hatchet-2", "Stone Hatchet", 100));
        assert_eq!(inv.len(), 3);
        assert_eq!(inv.get("wood").map(|i| i.count), Some(12));
    }

    #[test]
    fn test_remove_prunes_empty_stacks() {
        let mut inv = Inventory::new();
        inv.add_resource(ResourceType::Stone, 3);
        assert_eq!(inv.remove("stone", 5), 3);
        assert!(inv.is_empty());
        assert_eq!(inv.remove("stone", 1), 0);
    }

    #[test]
    fn test_prefix_counting_only_sees_resources() {
        let mut inv = Inventory::new();
        inv.add_resource(ResourceType::MetalOre, 4);
        inv.add(Item::tool("metal_hatchet-1", "Metal Hatchet", 250));
        inv.add(Item::resource("metal_ore_rich", "Rich Ore", 2));
        assert_eq!(inv.count_resource_prefix("metal"), 6);
        inv.take_resource_prefix("metal", 5);
        assert_eq!(inv.count_resource_prefix("metal"), 1);
        assert!(inv.get("metal_ore").is_none());
        assert!(inv.get("metal_hatchet-1").is_some());
    }

    #[test]
    fn test_hotbar_skips_resources() {
        let mut inv = Inventory::starting();
        inv.add_resource(ResourceType::Wood, 20);
        inv.add(Item::building("foundation", "Wood Foundation", 1));
        assert_eq!(inv.hotbar_slot(1), Some("rock_tool"));
        assert_eq!(inv.hotbar_slot(2), Some("torch"));
        assert_eq!(inv.hotbar_slot(3), Some("foundation"));
        assert_eq!(inv.hotbar_slot(4), None);
        assert_eq!(inv.hotbar_slot(0), None);
        assert_eq!(inv.hotbar_slot(7), None);
    }

    #[test]
    fn test_serializes_as_plain_list() {
        let inv = Inventory::starting();
        let json = serde_json::to_value(&inv).expect("serialize");
        assert!(json.is_array());
        let back: Inventory = serde_json::from_value(json).expect("deserialize");
        assert_eq!(back, inv);
    }
}
