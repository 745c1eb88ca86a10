//! Property-based tests for island generation.
//!
//! Validates placement invariants for arbitrary seeds:
//! - Accepted points keep the minimum separation from each other
//! - Nothing is placed at or below the water margins
//! - Attempt budgets are never exceeded
//! - Spawn points land on the beach band or the fixed fallback

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rusted_world::{
    fallback_spawn_point, find_spawn_point, height_at, map_center, WorldGenConfig, WorldGenerator,
    WATER_THRESHOLD,
};

fn compact_config() -> WorldGenConfig {
    WorldGenConfig {
        entity_target: 80,
        entity_attempts: 3_000,
        npc_target: 12,
        npc_attempts: 1_500,
        ..WorldGenConfig::default()
    }
}

fn dist(ax: f64, ay: f64, bx: f64, by: f64) -> f64 {
    ((ax - bx).powi(2) + (ay - by).powi(2)).sqrt()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    /// Property: every pair of accepted points is at least `separation` apart.
    #[test]
    fn placements_respect_separation(seed in any::<u64>()) {
        let config = compact_config();
        let world = WorldGenerator::new(config).generate(&mut StdRng::seed_from_u64(seed));

        let points: Vec<(f64, f64)> = world
            .entities
            .iter()
            .map(|e| (e.x, e.y))
            .chain(world.npcs.iter().map(|n| (n.x, n.y)))
            .collect();
        for (i, a) in points.iter().enumerate() {
            for b in &points[i + 1..] {
                prop_assert!(
                    dist(a.0, a.1, b.0, b.1) >= config.separation,
                    "points {:?} and {:?} closer than {}",
                    a,
                    b,
                    config.separation
                );
            }
        }
    }

    /// Property: entities and NPCs only stand on dry land above their margins.
    #[test]
    fn placements_stay_above_water(seed in any::<u64>()) {
        let config = compact_config();
        let world = WorldGenerator::new(config).generate(&mut StdRng::seed_from_u64(seed));

        for entity in &world.entities {
            prop_assert!(height_at(entity.x, entity.y) > WATER_THRESHOLD + config.entity_margin);
        }
        for npc in &world.npcs {
            prop_assert!(height_at(npc.x, npc.y) > WATER_THRESHOLD + config.npc_margin);
        }
    }

    /// Property: budgets cap both attempts and placements; ids are dense.
    #[test]
    fn budgets_are_respected(seed in any::<u64>()) {
        let config = compact_config();
        let world = WorldGenerator::new(config).generate(&mut StdRng::seed_from_u64(seed));

        prop_assert!(world.entities.len() <= config.entity_target);
        prop_assert!(world.npcs.len() <= config.npc_target);
        prop_assert!(world.entity_attempts_used <= config.entity_attempts);
        prop_assert!(world.npc_attempts_used <= config.npc_attempts);
        prop_assert!(world.entity_attempts_used >= world.entities.len());
        for (i, entity) in world.entities.iter().enumerate() {
            prop_assert_eq!(entity.id.0 as usize, i);
            prop_assert_eq!(entity.health, entity.max_health);
        }
        for (i, npc) in world.npcs.iter().enumerate() {
            prop_assert_eq!(npc.id.0 as usize, i);
        }
    }

    /// Property: spawn points sit on the sandy ring or at the fallback.
    #[test]
    fn spawn_points_land_on_the_beach(seed in any::<u64>()) {
        let (x, y) = find_spawn_point(&mut StdRng::seed_from_u64(seed));
        if (x, y) != fallback_spawn_point() {
            let h = height_at(x, y);
            prop_assert!(h > 0.11 && h < 0.16, "spawn height {} off the beach", h);
            let (cx, cy) = map_center();
            let r = dist(x, y, cx, cy);
            prop_assert!((4799.0..=5801.0).contains(&r), "spawn radius {} outside ring", r);
        }
    }
}
