//! The authoritative world snapshot.

use crate::entity::{BuildingPart, Entity};
use crate::inventory::Inventory;
use crate::log::EventLog;
use crate::npc::Npc;
use crate::player::Player;
use crate::settings::Settings;
use crate::time::DayClock;
use crate::weather::Weather;
use crate::worldgen::{find_spawn_point, GenerationStats, WorldGenerator};
use rusted_core::{scoped_rng, RngDomain, SimTick};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Everything the simulation mutates, in one aggregate.
///
/// Phases take the state by value and hand back the next one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldState {
    /// World seed every RNG stream derives from.
    pub seed: u64,
    /// The survivor.
    pub player: Player,
    /// Carried items.
    pub inventory: Inventory,
    /// Harvestable static objects.
    pub entities: Vec<Entity>,
    /// Wildlife.
    pub npcs: Vec<Npc>,
    /// Placed structures.
    pub building_parts: Vec<BuildingPart>,
    /// Time of day.
    pub clock: DayClock,
    /// Weather descriptor.
    pub weather: Weather,
    /// Player-facing messages.
    pub log: EventLog,
    /// Settings snapshot.
    pub settings: Settings,
    /// Next per-instance id for tools, armor and building parts.
    pub instance_counter: u64,
}

impl WorldState {
    /// A bare world: player at `(x, y)`, starting kit, nothing else spawned.
    pub fn empty(seed: u64, x: f64, y: f64, settings: Settings) -> Self {
        Self {
            seed,
            player: Player::spawn_at(x, y),
            inventory: Inventory::starting(),
            entities: Vec::new(),
            npcs: Vec::new(),
            building_parts: Vec::new(),
            clock: DayClock::default(),
            weather: Weather::default(),
            log: EventLog::with_welcome(),
            settings,
            instance_counter: 0,
        }
    }

    /// Generate a fresh island and drop the player on its beach.
    pub fn generate(seed: u64, generator: &WorldGenerator, settings: Settings) -> Self {
        Self::generate_with_stats(seed, generator, settings).0
    }

    /// Like [`WorldState::generate`], also returning placement statistics.
    pub fn generate_with_stats(
        seed: u64,
        generator: &WorldGenerator,
        settings: Settings,
    ) -> (Self, GenerationStats) {
        let mut spawn_rng = scoped_rng(seed, RngDomain::Spawn, SimTick::ZERO);
        let (x, y) = find_spawn_point(&mut spawn_rng);
        let mut gen_rng = scoped_rng(seed, RngDomain::WorldGen, SimTick::ZERO);
        let world = generator.generate(&mut gen_rng);
        let stats = world.stats();
        info!(
            seed,
            entities = stats.entities,
            npcs = stats.npcs,
            spawn_x = x,
            spawn_y = y,
            "world generated"
        );
        let state = Self {
            entities: world.entities,
            npcs: world.npcs,
            ..Self::empty(seed, x, y, settings)
        };
        (state, stats)
    }

    /// Mint a unique instance id: `<base>-<n>`.
    pub fn mint_instance_id(&mut self, base: &str) -> String {
        format!("{base}-{}", self.next_instance())
    }

    /// Advance the instance counter and return the claimed value.
    pub fn next_instance(&mut self) -> u64 {
        self.instance_counter += 1;
        self.instance_counter
    }
}

impl Default for WorldState {
    /// Unseeded empty world at the origin. Stands in while a phase owns the real state.
    fn default() -> Self {
        Self {
            seed: 0,
            player: Player::spawn_at(0.0, 0.0),
            inventory: Inventory::new(),
            entities: Vec::new(),
            npcs: Vec::new(),
            building_parts: Vec::new(),
            clock: DayClock::default(),
            weather: Weather::default(),
            log: EventLog::new(),
            settings: Settings::default(),
            instance_counter: 0,
        }
    }
}
