//! Island population by rejection sampling.
//!
//! Generation runs once per world. Every draw comes from the caller's seeded RNG
//! so the same seed always yields the same island.

use crate::entity::{Entity, EntityId, EntityKind};
use crate::heightmap::{height_at, map_center, MAP_SIZE, WATER_THRESHOLD};
use crate::npc::{Npc, NpcId, NpcKind};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;
use tracing::{debug, warn};

/// Tunables for one generation pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldGenConfig {
    /// Entities to place.
    pub entity_target: usize,
    /// Attempt cap for entities.
    pub entity_attempts: usize,
    /// NPCs to place.
    pub npc_target: usize,
    /// Attempt cap for NPCs.
    pub npc_attempts: usize,
    /// Minimum distance between any two accepted points.
    pub separation: f64,
    /// Entities need `h > WATER_THRESHOLD + entity_margin`.
    pub entity_margin: f64,
    /// NPCs need `h > WATER_THRESHOLD + npc_margin`.
    pub npc_margin: f64,
}

impl Default for WorldGenConfig {
    fn default() -> Self {
        Self {
            entity_target: 1200,
            entity_attempts: 50_000,
            npc_target: 80,
            npc_attempts: 20_000,
            separation: 40.0,
            entity_margin: 0.08,
            npc_margin: 0.05,
        }
    }
}

/// Output of a generation pass.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedWorld {
    /// Accepted static entities.
    pub entities: Vec<Entity>,
    /// Accepted NPCs.
    pub npcs: Vec<Npc>,
    /// Entity attempts consumed.
    pub entity_attempts_used: usize,
    /// NPC attempts consumed.
    pub npc_attempts_used: usize,
}

impl GeneratedWorld {
    /// Placement counts and attempts consumed.
    pub fn stats(&self) -> GenerationStats {
        GenerationStats {
            entities: self.entities.len(),
            npcs: self.npcs.len(),
            entity_attempts: self.entity_attempts_used,
            npc_attempts: self.npc_attempts_used,
        }
    }
}

/// Summary of a generation pass, kept after the entities move into the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GenerationStats {
    /// Entities placed.
    pub entities: usize,
    /// NPCs placed.
    pub npcs: usize,
    /// Entity attempts consumed.
    pub entity_attempts: usize,
    /// NPC attempts consumed.
    pub npc_attempts: usize,
}

/// Spawn-point search parameters.
const SPAWN_SAMPLES: usize = 200;
const SPAWN_RADIUS_MIN: f64 = 4800.0;
const SPAWN_RADIUS_SPAN: f64 = 1000.0;
const SPAWN_HEIGHT_MIN: f64 = 0.11;
const SPAWN_HEIGHT_MAX: f64 = 0.16;
const SPAWN_FALLBACK_OFFSET: f64 = 5000.0;

/// Deterministic island generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct WorldGenerator {
    config: WorldGenConfig,
}

impl WorldGenerator {
    /// Create a generator with explicit tunables.
    pub fn new(config: WorldGenConfig) -> Self {
        Self { config }
    }

    /// Tunables in use.
    pub fn config(&self) -> &WorldGenConfig {
        &self.config
    }

    /// Place entities, then NPCs. Shortfalls are logged, never fatal.
    pub fn generate<R: Rng>(&self, rng: &mut R) -> GeneratedWorld {
        let (entities, entity_attempts_used) = self.place_entities(rng);
        let (npcs, npc_attempts_used) = self.place_npcs(&entities, rng);
        debug!(
            entities = entities.len(),
            npcs = npcs.len(),
            entity_attempts_used,
            npc_attempts_used,
            "generated island"
        );
        GeneratedWorld {
            entities,
            npcs,
            entity_attempts_used,
            npc_attempts_used,
        }
    }

    fn place_entities<R: Rng>(&self, rng: &mut R) -> (Vec<Entity>, usize) {
        let min_sq = self.config.separation * self.config.separation;
        let mut entities: Vec<Entity> = Vec::with_capacity(self.config.entity_target);
        let mut attempts = 0;

        while entities.len() < self.config.entity_target && attempts < self.config.entity_attempts {
            attempts += 1;
            let x = rng.gen::<f64>() * MAP_SIZE;
            let y = rng.gen::<f64>() * MAP_SIZE;
            if entities.iter().any(|e| dist_sq(e.x, e.y, x, y) < min_sq) {
                continue;
            }
            let h = height_at(x, y);
            if h <= WATER_THRESHOLD + self.config.entity_margin {
                continue;
            }

            let roll = rng.gen::<f64>();
            let kind = if roll < 0.2 {
                EntityKind::GroundWood
            } else if roll < 0.4 {
                EntityKind::GroundStone
            } else if roll < 0.7 {
                EntityKind::Tree
            } else {
                EntityKind::Rock
            };
            let variant = match kind {
                EntityKind::Tree => Some(tree_variant(h, rng)),
                EntityKind::Rock => Some(rng.gen_range(0..3)),
                _ => None,
            };
            let id = EntityId(entities.len() as u32);
            entities.push(Entity::new(id, kind, x, y, variant));
        }

        if entities.len() < self.config.entity_target {
            warn!(
                placed = entities.len(),
                target = self.config.entity_target,
                "entity placement exhausted its attempt budget"
            );
        }
        (entities, attempts)
    }

    fn place_npcs<R: Rng>(&self, entities: &[Entity], rng: &mut R) -> (Vec<Npc>, usize) {
        let min_sq = self.config.separation * self.config.separation;
        let mut npcs: Vec<Npc> = Vec::with_capacity(self.config.npc_target);
        let mut attempts = 0;

        while npcs.len() < self.config.npc_target && attempts < self.config.npc_attempts {
            attempts += 1;
            let x = rng.gen::<f64>() * MAP_SIZE;
            let y = rng.gen::<f64>() * MAP_SIZE;
            let crowded = entities.iter().any(|e| dist_sq(e.x, e.y, x, y) < min_sq)
                || npcs.iter().any(|n| dist_sq(n.x, n.y, x, y) < min_sq);
            if crowded {
                continue;
            }
            if height_at(x, y) <= WATER_THRESHOLD + self.config.npc_margin {
                continue;
            }

            let kind = NpcKind::ALL[rng.gen_range(0..NpcKind::ALL.len())];
            let rotation = rng.gen::<f64>() * TAU;
            let id = NpcId(npcs.len() as u32);
            npcs.push(Npc::new(id, kind, x, y, rotation));
        }

        if npcs.len() < self.config.npc_target {
            warn!(
                placed = npcs.len(),
                target = self.config.npc_target,
                "npc placement exhausted its attempt budget"
            );
        }
        (npcs, attempts)
    }
}

fn dist_sq(ax: f64, ay: f64, bx: f64, by: f64) -> f64 {
    (ax - bx).powi(2) + (ay - by).powi(2)
}

/// Trees pick their look from the elevation band: palms on the coast, pines up high.
fn tree_variant<R: Rng>(h: f64, rng: &mut R) -> u8 {
    let pair = if h < 0.32 {
        [3, 4]
    } else if h > 0.72 {
        [2, 5]
    } else {
        [0, 1]
    };
    if rng.gen::<f64>() < 0.5 {
        pair[0]
    } else {
        pair[1]
    }
}

/// Find a beach spawn point in the outer ring of the island.
///
/// Falls back to a fixed point east of the center when no sample lands on sand.
pub fn find_spawn_point<R: Rng>(rng: &mut R) -> (f64, f64) {
    sample_spawn_point(rng, SPAWN_SAMPLES)
}

fn sample_spawn_point<R: Rng>(rng: &mut R, samples: usize) -> (f64, f64) {
    let (cx, cy) = map_center();
    for _ in 0..samples {
        let angle = rng.gen::<f64>() * TAU;
        let radius = SPAWN_RADIUS_MIN + rng.gen::<f64>() * SPAWN_RADIUS_SPAN;
        let x = cx + angle.cos() * radius;
        let y = cy + angle.sin() * radius;
        let h = height_at(x, y);
        if h > SPAWN_HEIGHT_MIN && h < SPAWN_HEIGHT_MAX {
            return (x, y);
        }
    }
    warn!("no beach spawn found, using fallback point");
    fallback_spawn_point()
}

/// Spawn fallback used when sampling fails.
pub fn fallback_spawn_point() -> (f64, f64) {
    let (cx, cy) = map_center();
    (cx + SPAWN_FALLBACK_OFFSET, cy)
}
