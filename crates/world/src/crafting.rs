//! Crafting with JSON-loadable recipes.
//!
//! Ingredients are matched by resource-id prefix across every resource stack,
//! so `metal` would accept both `metal_ore` and any other `metal*` resource.

use crate::state::WorldState;
use anyhow::{Context, Result};
use rusted_core::{Item, ItemCategory, ResourceType};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

/// One ingredient requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    /// Resource family; matched as an id prefix.
    pub resource: ResourceType,
    /// Units consumed.
    pub count: u32,
}

/// Crafting recipe definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    /// Unique recipe identifier (e.g., "stone_hatchet").
    pub id: String,
    /// Display name, logged in upper case on success.
    pub name: String,
    /// Resources consumed.
    pub ingredients: Vec<Ingredient>,
    /// Item produced. Tool and armor outputs receive a fresh instance id.
    pub output: Item,
}

/// Why a craft did not happen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum CraftOutcome {
    /// Output added to the inventory under this id.
    Crafted {
        /// Inventory id of the new item.
        item_id: String,
    },
    /// Not enough of at least one ingredient.
    Missing {
        /// First short ingredient.
        resource: ResourceType,
        /// Units required.
        needed: u32,
        /// Units available.
        available: u32,
    },
    /// No recipe with that id.
    UnknownRecipe,
}

impl CraftOutcome {
    /// Whether the craft went through.
    pub fn is_crafted(&self) -> bool {
        matches!(self, CraftOutcome::Crafted { .. })
    }
}

/// Ordered collection of recipes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeBook {
    recipes: Vec<Recipe>,
}

impl RecipeBook {
    /// Create an empty recipe book.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load recipes from a JSON file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read recipe file {}", path.display()))?;
        Self::load_from_str(&content)
    }

    /// Load recipes from a JSON array.
    pub fn load_from_str(content: &str) -> Result<Self> {
        let recipes: Vec<Recipe> =
            serde_json::from_str(content).context("Failed to parse recipe JSON")?;
        let mut book = Self::new();
        for recipe in recipes {
            book.add_recipe(recipe);
        }
        Ok(book)
    }

    /// Add a recipe, replacing any with the same id.
    pub fn add_recipe(&mut self, recipe: Recipe) {
        match self.recipes.iter_mut().find(|r| r.id == recipe.id) {
            Some(existing) => *existing = recipe,
            None => self.recipes.push(recipe),
        }
    }

    /// Get a recipe by id.
    pub fn get(&self, id: &str) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.id == id)
    }

    /// All recipes in insertion order.
    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    /// Number of recipes.
    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    /// Whether the book is empty.
    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// The stock survival recipes.
    pub fn with_defaults() -> Self {
        use ResourceType::{AnimalHide, Cloth, MetalOre, Stone, Wood};

        let recipe = |id: &str, name: &str, ingredients: &[(ResourceType, u32)], output: Item| {
            Recipe {
                id: id.to_string(),
                name: name.to_string(),
                ingredients: ingredients
                    .iter()
                    .map(|&(resource, count)| Ingredient { resource, count })
                    .collect(),
                output,
            }
        };

        let mut book = Self::new();
        for r in [
            recipe(
                "craft_rock",
                "Starter Rock",
                &[(Stone, 10)],
                Item::tool("rock_tool", "Rock", 50),
            ),
            recipe(
                "stone_hatchet",
                "Stone Hatchet",
                &[(Wood, 15), (Stone, 10)],
                Item::tool("hatchet", "Stone Hatchet", 100),
            ),
            recipe(
                "stone_pickaxe",
                "Stone Pickaxe",
                &[(Wood, 15), (Stone, 15)],
                Item::tool("pickaxe", "Stone Pickaxe", 100),
            ),
            recipe(
                "metal_hatchet",
                "Metal Hatchet",
                &[(Wood, 25), (MetalOre, 5)],
                Item::tool("metal_hatchet", "Metal Hatchet", 250),
            ),
            recipe(
                "metal_pickaxe",
                "Metal Pickaxe",
                &[(Wood, 25), (MetalOre, 5)],
                Item::tool("metal_pickaxe", "Metal Pickaxe", 250),
            ),
            recipe(
                "leather_vest",
                "Leather Vest",
                &[(AnimalHide, 8), (Cloth, 5)],
                Item::armor("leather_vest", "Leather Vest", 15, 200),
            ),
            recipe(
                "metal_chestplate",
                "Metal Chestplate",
                &[(MetalOre, 20), (AnimalHide, 5)],
                Item::armor("metal_chestplate", "Metal Plate", 35, 300),
            ),
            recipe(
                "wood_foundation",
                "Wood Foundation",
                &[(Wood, 40)],
                Item::building("foundation", "Wood Foundation", 1),
            ),
            recipe(
                "wood_wall",
                "Wood Wall",
                &[(Wood, 25)],
                Item::building("wall", "Wood Wall", 1),
            ),
        ] {
            book.add_recipe(r);
        }
        book
    }
}

impl Recipe {
    /// Total units needed per resource, in first-listed order.
    ///
    /// Ingredients naming the same resource more than once are summed.
    pub fn requirements(&self) -> Vec<Ingredient> {
        let mut totals: Vec<Ingredient> = Vec::with_capacity(self.ingredients.len());
        for ingredient in &self.ingredients {
            match totals.iter_mut().find(|t| t.resource == ingredient.resource) {
                Some(total) => total.count += ingredient.count,
                None => totals.push(*ingredient),
            }
        }
        totals
    }
}

/// Check and apply a recipe against the world's inventory.
///
/// A missing ingredient or unknown recipe leaves the state untouched.
pub fn craft(
    mut state: WorldState,
    book: &RecipeBook,
    recipe_id: &str,
) -> (WorldState, CraftOutcome) {
    let Some(recipe) = book.get(recipe_id) else {
        debug!(recipe_id, "unknown recipe");
        return (state, CraftOutcome::UnknownRecipe);
    };

    let requirements = recipe.requirements();
    for needed in &requirements {
        let available = state.inventory.count_resource_prefix(needed.resource.as_str());
        if available < needed.count {
            debug!(
                recipe_id,
                resource = needed.resource.as_str(),
                needed = needed.count,
                available,
                "missing ingredient"
            );
            return (
                state,
                CraftOutcome::Missing {
                    resource: needed.resource,
                    needed: needed.count,
                    available,
                },
            );
        }
    }

    for needed in &requirements {
        state
            .inventory
            .take_resource_prefix(needed.resource.as_str(), needed.count);
    }

    let mut output = recipe.output.clone();
    if matches!(output.category(), ItemCategory::Tool | ItemCategory::Armor) {
        output.id = state.mint_instance_id(&output.id);
    }
    let item_id = output.id.clone();
    state.inventory.add(output);
    state
        .log
        .push(format!("CRAFTED: {}", recipe.name.to_uppercase()));
    debug!(recipe_id, item_id = item_id.as_str(), "crafted");

    (state, CraftOutcome::Crafted { item_id })
}
