//! Melee resolution: striking wildlife and harvesting resources.
//!
//! A strike lands on the nearest NPC under the cursor if there is one in reach,
//! otherwise on the nearest harvestable entity. Ranges are world-space and do not
//! scale with zoom.

use crate::entity::{EntityId, EntityKind};
use crate::npc::{NpcId, NpcKind};
use crate::player::{Player, Viewport};
use crate::state::WorldState;
use rand::Rng;
use rusted_core::{Item, ItemCategory, ResourceType, ToolProfile};
use serde::Serialize;
use tracing::debug;

/// Cursor tolerance around an NPC.
pub const NPC_PICK_RADIUS: f64 = 40.0;
/// Cursor tolerance around an entity.
pub const ENTITY_PICK_RADIUS: f64 = 50.0;
/// Maximum distance from the player to anything struck.
pub const MELEE_REACH: f64 = 160.0;
/// Damage the player takes from striking barehanded where it hurts.
pub const HAND_HARVEST_DAMAGE: f64 = 2.0;
/// Chance that mining a rock turns up metal ore.
pub const METAL_ORE_CHANCE: f64 = 0.15;

/// What a strike hit.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "target", rename_all = "snake_case")]
pub enum StrikeOutcome {
    /// An NPC took damage.
    Npc {
        /// Target.
        id: NpcId,
        /// Target kind.
        kind: NpcKind,
        /// Damage dealt.
        damage: f64,
        /// Whether the hit was fatal.
        killed: bool,
    },
    /// An entity was harvested.
    Harvest {
        /// Target.
        id: EntityId,
        /// Resource granted.
        resource: ResourceType,
        /// Units granted.
        gain: u32,
        /// Whether the entity was used up.
        depleted: bool,
    },
    /// Nothing in reach.
    Miss,
}

/// Convert a screen point into world coordinates around the player.
pub fn screen_to_world(
    player: &Player,
    screen_x: f64,
    screen_y: f64,
    viewport: &Viewport,
    zoom: f64,
) -> (f64, f64) {
    let (cx, cy) = viewport.center();
    (
        player.x + (screen_x - cx) / zoom,
        player.y + (screen_y - cy) / zoom,
    )
}

/// Items dropped by a kill.
pub fn loot_for(kind: NpcKind) -> Vec<Item> {
    let meat = |id: &str, name: &str, count| Item::consumable(id, name, count);
    match kind {
        NpcKind::Wolf => vec![
            meat("meat_wolf", "Wolf Meat", 2),
            ResourceType::Cloth.stack(5),
            ResourceType::AnimalHide.stack(3),
        ],
        NpcKind::Bear => vec![
            meat("meat_bear", "Bear Meat", 6),
            ResourceType::Cloth.stack(12),
            ResourceType::AnimalHide.stack(8),
        ],
        NpcKind::Boar => vec![
            meat("meat_boar", "Boar Meat", 4),
            ResourceType::Cloth.stack(3),
            ResourceType::AnimalHide.stack(2),
        ],
        NpcKind::Chicken => vec![meat("meat_chicken", "Raw Chicken", 1)],
    }
}

/// Damage and yield of one harvest hit.
fn harvest_yield(kind: EntityKind, profile: &ToolProfile) -> (f64, u32, bool) {
    let resource = kind.resource();
    let correct = profile.suits(resource);
    if kind.is_ground_clutter() {
        (100.0, 5, false)
    } else if correct && profile.tier == 3 {
        (50.0, 18, false)
    } else if correct {
        (34.0, 12, false)
    } else if profile.rock {
        (15.0, 3, false)
    } else {
        (5.0, 1, true)
    }
}

/// Resolve a strike at world point `(wx, wy)` with the item `active_id` in hand.
///
/// `rng` is only drawn from when mining rock.
pub fn resolve_strike<R: Rng>(
    mut state: WorldState,
    wx: f64,
    wy: f64,
    active_id: Option<&str>,
    rng: &mut R,
) -> (WorldState, StrikeOutcome) {
    let active = active_id.and_then(|id| state.inventory.get(id));
    let profile = ToolProfile::of(active);
    let tool_id = active
        .filter(|item| item.category() == ItemCategory::Tool)
        .map(|item| item.id.clone());
    let (px, py) = (state.player.x, state.player.y);

    let npc_target = state
        .npcs
        .iter()
        .enumerate()
        .map(|(i, n)| (i, n.distance_to(wx, wy)))
        .filter(|&(i, d)| d < NPC_PICK_RADIUS && state.npcs[i].distance_to(px, py) < MELEE_REACH)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(i, _)| i);

    let outcome = if let Some(index) = npc_target {
        let damage = profile.combat_damage();
        let npc = &mut state.npcs[index];
        let (id, kind) = (npc.id, npc.kind);
        let killed = npc.damage(damage);
        if profile.bare_or_torch {
            state.player.hurt(HAND_HARVEST_DAMAGE);
        }
        if killed {
            state.npcs.remove(index);
            for item in loot_for(kind) {
                state.inventory.add(item);
            }
            state
                .log
                .push(format!("KILLED: {}", kind.as_str().to_uppercase()));
        } else {
            state
                .log
                .push(format!("HIT: {}", kind.as_str().to_uppercase()));
        }
        StrikeOutcome::Npc {
            id,
            kind,
            damage,
            killed,
        }
    } else {
        let entity_target = state
            .entities
            .iter()
            .enumerate()
            .map(|(i, e)| (i, e.distance_to(wx, wy)))
            .filter(|&(i, d)| {
                d < ENTITY_PICK_RADIUS && state.entities[i].distance_to(px, py) < MELEE_REACH
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(i, _)| i);

        let Some(index) = entity_target else {
            debug!(wx, wy, "strike hit nothing");
            return (state, StrikeOutcome::Miss);
        };

        let entity = &mut state.entities[index];
        let (id, kind) = (entity.id, entity.kind);
        let resource = kind.resource();
        let (damage, gain, punching) = harvest_yield(kind, &profile);
        entity.health -= damage;
        let depleted = entity.health <= 0.0;
        if depleted {
            state.entities.remove(index);
        }
        if punching {
            state.player.hurt(HAND_HARVEST_DAMAGE);
        }
        state.inventory.add_resource(resource, gain);
        if resource == ResourceType::Stone
            && !kind.is_ground_clutter()
            && rng.gen::<f64>() < METAL_ORE_CHANCE
        {
            let ore = if profile.tier >= 2 { 3 } else { 1 };
            state.inventory.add_resource(ResourceType::MetalOre, ore);
        }
        state.log.push(format!("RESOURCES: +{gain} {resource}"));
        StrikeOutcome::Harvest {
            id,
            resource,
            gain,
            depleted,
        }
    };

    if let Some(tool_id) = tool_id {
        wear_tool(&mut state, &tool_id);
    }
    debug!(?outcome, "strike resolved");
    (state, outcome)
}

/// Spend one durability on the tool; remove it when it breaks.
fn wear_tool(state: &mut WorldState, tool_id: &str) {
    let broke = state
        .inventory
        .get_mut(tool_id)
        .is_some_and(|tool| tool.wear(1));
    if broke {
        if let Some(tool) = state.inventory.remove_entry(tool_id) {
            state
                .log
                .push(format!("BROKE: {}", tool.name.to_uppercase()));
        }
    }
}
