//! Static world objects: harvestable entities and placed building parts.

use rusted_core::ResourceType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Collision radius of the player.
pub const PLAYER_RADIUS: f64 = 8.0;

/// Stable identifier of a static entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ent-{}", self.0)
    }
}

/// Kinds of static entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// Standing tree.
    Tree,
    /// Boulder.
    Rock,
    /// Loose branches; one hit to collect.
    GroundWood,
    /// Loose stones; one hit to collect.
    GroundStone,
}

impl EntityKind {
    /// Canonical lowercase key.
    pub const fn as_str(self) -> &'static str {
        match self {
            EntityKind::Tree => "tree",
            EntityKind::Rock => "rock",
            EntityKind::GroundWood => "ground_wood",
            EntityKind::GroundStone => "ground_stone",
        }
    }

    /// Pre-harvested pickups that never block and always break in one hit.
    pub const fn is_ground_clutter(self) -> bool {
        matches!(self, EntityKind::GroundWood | EntityKind::GroundStone)
    }

    /// Resource family yielded when harvested.
    pub const fn resource(self) -> ResourceType {
        match self {
            EntityKind::Tree | EntityKind::GroundWood => ResourceType::Wood,
            EntityKind::Rock | EntityKind::GroundStone => ResourceType::Stone,
        }
    }

    /// Collision radius, or `None` for walk-over clutter.
    pub const fn collision_radius(self) -> Option<f64> {
        match self {
            EntityKind::Tree => Some(8.0),
            EntityKind::Rock => Some(6.0),
            EntityKind::GroundWood | EntityKind::GroundStone => None,
        }
    }

    /// Health at spawn.
    pub const fn max_health(self) -> f64 {
        if self.is_ground_clutter() {
            1.0
        } else {
            100.0
        }
    }
}

/// A harvestable static object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Stable id.
    pub id: EntityId,
    /// Kind.
    pub kind: EntityKind,
    /// World X.
    pub x: f64,
    /// World Y.
    pub y: f64,
    /// Remaining health.
    pub health: f64,
    /// Health at spawn.
    pub max_health: f64,
    /// Visual sub-type for trees and rocks.
    pub variant: Option<u8>,
}

impl Entity {
    /// New entity at full health.
    pub fn new(id: EntityId, kind: EntityKind, x: f64, y: f64, variant: Option<u8>) -> Self {
        let max_health = kind.max_health();
        Self {
            id,
            kind,
            x,
            y,
            health: max_health,
            max_health,
            variant,
        }
    }

    /// Euclidean distance to a point.
    pub fn distance_to(&self, x: f64, y: f64) -> f64 {
        ((self.x - x).powi(2) + (self.y - y).powi(2)).sqrt()
    }
}

/// Placeable structure kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartKind {
    /// Floor tile.
    Foundation,
    /// Wall segment.
    Wall,
    /// Door frame.
    Door,
}

impl PartKind {
    /// Collision radius.
    pub const fn collision_radius(self) -> f64 {
        match self {
            PartKind::Foundation => 35.0,
            PartKind::Wall | PartKind::Door => 10.0,
        }
    }

    /// Map a building item id onto a part kind.
    pub fn from_item_id(id: &str) -> Option<Self> {
        match id {
            "foundation" => Some(PartKind::Foundation),
            "wall" => Some(PartKind::Wall),
            "door" => Some(PartKind::Door),
            _ => None,
        }
    }
}

/// A placed structure. Acts as a static collider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingPart {
    /// Stable id minted from the world's instance counter.
    pub id: u64,
    /// Kind.
    pub kind: PartKind,
    /// World X.
    pub x: f64,
    /// World Y.
    pub y: f64,
    /// Remaining health.
    pub health: f64,
}

impl BuildingPart {
    /// New part at full health.
    pub fn new(id: u64, kind: PartKind, x: f64, y: f64) -> Self {
        Self {
            id,
            kind,
            x,
            y,
            health: 100.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ground_clutter_is_single_hit() {
        let e = Entity::new(EntityId(1), EntityKind::GroundWood, 0.0, 0.0, None);
        assert_eq!(e.max_health, 1.0);
        assert!(e.kind.collision_radius().is_none());
        let t = Entity::new(EntityId(2), EntityKind::Tree, 0.0, 0.0, Some(3));
        assert_eq!(t.max_health, 100.0);
        assert_eq!(t.kind.collision_radius(), Some(8.0));
    }

    #[test]
    fn resource_families() {
        assert_eq!(EntityKind::Tree.resource(), ResourceType::Wood);
        assert_eq!(EntityKind::GroundWood.resource(), ResourceType::Wood);
        assert_eq!(EntityKind::Rock.resource(), ResourceType::Stone);
        assert_eq!(EntityKind::GroundStone.resource(), ResourceType::Stone);
    }

    #[test]
    fn ids_display_as_kind_index_keys() {
        assert_eq!(EntityId(17).to_string(), "ent-17");
    }
}
