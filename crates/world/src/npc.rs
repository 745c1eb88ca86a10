//! Wildlife with a three-state behavior machine.
//!
//! Predators (wolves, bears) chase the player inside their detection radius and
//! deal contact damage once close; prey (boars, chickens) bolt when the player
//! comes near. Any animal below 30% health flees regardless of kind.

use crate::heightmap::{height_at, WATER_THRESHOLD};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;

/// Chasers stop advancing once this close to the player.
pub const NPC_SAFE_DISTANCE: f64 = 55.0;

/// Chasers deal contact damage inside this radius.
pub const NPC_CONTACT_RANGE: f64 = NPC_SAFE_DISTANCE + 15.0;

/// Health fraction below which every animal flees.
const LOW_HEALTH_FRACTION: f64 = 0.3;

/// Idle wander speed along the current heading.
const IDLE_SPEED: f64 = 0.5;

/// Per-tick chance that an idle animal picks a new heading.
const IDLE_TURN_CHANCE: f64 = 0.02;

/// Stable identifier of an NPC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NpcId(pub u32);

impl fmt::Display for NpcId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "npc-{}", self.0)
    }
}

/// Types of wildlife.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NpcKind {
    /// Fast predator.
    Wolf,
    /// Slow, tough predator.
    Bear,
    /// Skittish prey.
    Boar,
    /// Fragile prey.
    Chicken,
}

impl NpcKind {
    /// Every kind, in spawn-table order.
    pub const ALL: [NpcKind; 4] = [NpcKind::Wolf, NpcKind::Bear, NpcKind::Boar, NpcKind::Chicken];

    /// Canonical lowercase string key for configs/logging.
    pub const fn as_str(self) -> &'static str {
        match self {
            NpcKind::Wolf => "wolf",
            NpcKind::Bear => "bear",
            NpcKind::Boar => "boar",
            NpcKind::Chicken => "chicken",
        }
    }

    /// Health at spawn.
    pub const fn max_health(self) -> f64 {
        match self {
            NpcKind::Wolf => 120.0,
            NpcKind::Bear => 300.0,
            NpcKind::Boar => 80.0,
            NpcKind::Chicken => 20.0,
        }
    }

    /// Predators chase; everything else is prey.
    pub const fn is_predator(self) -> bool {
        matches!(self, NpcKind::Wolf | NpcKind::Bear)
    }

    /// Radius inside which the animal reacts to the player.
    pub const fn detection_range(self) -> f64 {
        if self.is_predator() {
            350.0
        } else {
            150.0
        }
    }

    /// Chase speed per tick.
    pub const fn chase_speed(self) -> f64 {
        match self {
            NpcKind::Wolf => 4.0,
            _ => 2.0,
        }
    }

    /// Flee speed per tick.
    pub const fn flee_speed(self, low_health: bool) -> f64 {
        if !low_health {
            4.0
        } else if self.is_predator() {
            5.0
        } else {
            4.5
        }
    }

    /// Raw contact damage per tick, before armor.
    pub const fn contact_damage(self) -> f64 {
        match self {
            NpcKind::Wolf => 0.15,
            _ => 0.3,
        }
    }
}

/// Behavior state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NpcState {
    /// Wandering slowly.
    Idle,
    /// Closing in on the player.
    Chasing,
    /// Running away from the player.
    Fleeing,
}

/// A wildlife instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Npc {
    /// Stable id.
    pub id: NpcId,
    /// Kind.
    pub kind: NpcKind,
    /// World X.
    pub x: f64,
    /// World Y.
    pub y: f64,
    /// Heading in radians.
    pub rotation: f64,
    /// Current health.
    pub health: f64,
    /// Health at spawn.
    pub max_health: f64,
    /// Current behavior.
    pub state: NpcState,
}

impl Npc {
    /// Create an idle NPC at full health.
    pub fn new(id: NpcId, kind: NpcKind, x: f64, y: f64, rotation: f64) -> Self {
        Self {
            id,
            kind,
            x,
            y,
            rotation,
            health: kind.max_health(),
            max_health: kind.max_health(),
            state: NpcState::Idle,
        }
    }

    /// Take damage and return true if the NPC died.
    pub fn damage(&mut self, amount: f64) -> bool {
        self.health -= amount;
        self.health <= 0.0
    }

    /// Distance to a point.
    pub fn distance_to(&self, x: f64, y: f64) -> f64 {
        ((self.x - x).powi(2) + (self.y - y).powi(2)).sqrt()
    }

    /// Whether the NPC is badly hurt.
    pub fn is_low_health(&self) -> bool {
        self.health < self.max_health * LOW_HEALTH_FRACTION
    }

    /// Pick the behavior for a player at `dist`.
    fn decide(&self, dist: f64) -> NpcState {
        if self.is_low_health() {
            NpcState::Fleeing
        } else if dist < self.kind.detection_range() {
            if self.kind.is_predator() {
                NpcState::Chasing
            } else {
                NpcState::Fleeing
            }
        } else {
            NpcState::Idle
        }
    }

    /// Advance one tick towards/away from the player.
    ///
    /// Returns the raw contact damage dealt this tick (before armor).
    pub fn update<R: Rng>(mut self, player_x: f64, player_y: f64, rng: &mut R) -> (Self, f64) {
        let dist = self.distance_to(player_x, player_y);
        let low_health = self.is_low_health();
        self.state = self.decide(dist);

        let mut contact = 0.0;
        let (mut next_x, mut next_y) = (self.x, self.y);
        match self.state {
            NpcState::Chasing => {
                self.rotation = (player_y - self.y).atan2(player_x - self.x);
                if dist > NPC_SAFE_DISTANCE {
                    let speed = self.kind.chase_speed();
                    next_x += self.rotation.cos() * speed;
                    next_y += self.rotation.sin() * speed;
                }
                if dist < NPC_CONTACT_RANGE {
                    contact = self.kind.contact_damage();
                }
            }
            NpcState::Fleeing => {
                self.rotation = (self.y - player_y).atan2(self.x - player_x);
                let speed = self.kind.flee_speed(low_health);
                next_x += self.rotation.cos() * speed;
                next_y += self.rotation.sin() * speed;
            }
            NpcState::Idle => {
                next_x += self.rotation.cos() * IDLE_SPEED;
                next_y += self.rotation.sin() * IDLE_SPEED;
                if rng.gen::<f64>() < IDLE_TURN_CHANCE {
                    self.rotation += rng.gen::<f64>() - 0.5;
                }
            }
        }

        if height_at(next_x, next_y) > WATER_THRESHOLD {
            self.x = next_x;
            self.y = next_y;
        } else {
            // Turn around at the shoreline.
            self.rotation += PI;
        }

        (self, contact)
    }
}

/// Result of one NPC phase.
#[derive(Debug, Clone, PartialEq)]
pub struct NpcPhase {
    /// Surviving NPCs after movement.
    pub npcs: Vec<Npc>,
    /// Armor-adjusted damage dealt to the player this tick.
    pub contact_damage: f64,
}

/// Run the behavior machine for every NPC against the post-movement player position.
///
/// `damage_multiplier` is the player's armor factor. Dead NPCs are dropped.
pub fn tick_npcs<R: Rng>(
    npcs: Vec<Npc>,
    player_x: f64,
    player_y: f64,
    damage_multiplier: f64,
    rng: &mut R,
) -> NpcPhase {
    let mut contact_damage = 0.0;
    let npcs = npcs
        .into_iter()
        .map(|npc| {
            let (npc, raw) = npc.update(player_x, player_y, rng);
            contact_damage += raw * damage_multiplier;
            npc
        })
        .filter(|npc| npc.health > 0.0)
        .collect();
    NpcPhase {
        npcs,
        contact_damage,
    }
}
