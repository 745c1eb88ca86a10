//! Point-vs-solid queries for player movement.

use crate::entity::{BuildingPart, Entity, PLAYER_RADIUS};

/// Whether a player centered at `(x, y)` would overlap a solid.
///
/// Ground clutter never blocks. Contact exactly at the combined radius is allowed.
pub fn blocks_movement(x: f64, y: f64, entities: &[Entity], parts: &[BuildingPart]) -> bool {
    let hits = |cx: f64, cy: f64, radius: f64| {
        let reach = radius + PLAYER_RADIUS;
        (x - cx).powi(2) + (y - cy).powi(2) < reach * reach
    };

    entities.iter().any(|e| {
        e.kind
            .collision_radius()
            .is_some_and(|radius| hits(e.x, e.y, radius))
    }) || parts
        .iter()
        .any(|p| hits(p.x, p.y, p.kind.collision_radius()))
}
