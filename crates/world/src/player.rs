//! Player controller: movement, stamina, and survival stats.

use crate::collision::blocks_movement;
use crate::entity::{BuildingPart, Entity};
use crate::heightmap::is_swimming_at;
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_2;

/// Base movement speed in world units per tick.
pub const PLAYER_SPEED: f64 = 5.5;
/// Speed factor while sprinting.
pub const SPRINT_MULTIPLIER: f64 = 1.6;
/// Speed factor while crouching.
pub const CROUCH_MULTIPLIER: f64 = 0.5;
/// Speed factor while swimming.
pub const SWIM_MULTIPLIER: f64 = 0.35;
/// Stamina spent per sprinting tick.
pub const STAMINA_DECAY: f64 = 0.45;
/// Stamina regained per non-sprinting tick.
pub const STAMINA_REGEN: f64 = 0.25;
/// Hunger/thirst below this drain health and halve stamina regen.
pub const CRITICAL_STAT_THRESHOLD: f64 = 15.0;
/// Health drained per tick by each critical stat.
pub const STARVATION_DRAIN: f64 = 0.04;
/// Hunger lost per tick.
pub const HUNGER_DECAY: f64 = 0.003;
/// Thirst lost per tick.
pub const THIRST_DECAY: f64 = 0.005;
/// Exhaustion clears once stamina recovers to this.
pub const EXHAUSTION_RECOVERY: f64 = 20.0;
/// Upper bound of every stat.
pub const STAT_MAX: f64 = 100.0;

/// The survivor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// World X.
    pub x: f64,
    /// World Y.
    pub y: f64,
    /// Facing in radians.
    pub rotation: f64,
    /// Health in `[0, 100]`.
    pub health: f64,
    /// Hunger in `[0, 100]`; 100 is fed.
    pub hunger: f64,
    /// Thirst in `[0, 100]`; 100 is hydrated.
    pub thirst: f64,
    /// Stamina in `[0, 100]`.
    pub stamina: f64,
    /// Sprint lockout after running dry.
    pub exhausted: bool,
    /// Crouch held this tick.
    pub crouching: bool,
}

impl Player {
    /// A fresh player at full stats.
    pub fn spawn_at(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            rotation: 0.0,
            health: STAT_MAX,
            hunger: STAT_MAX,
            thirst: STAT_MAX,
            stamina: STAT_MAX,
            exhausted: false,
            crouching: false,
        }
    }

    /// Whether the player has died.
    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }

    /// Distance to a point.
    pub fn distance_to(&self, x: f64, y: f64) -> f64 {
        ((self.x - x).powi(2) + (self.y - y).powi(2)).sqrt()
    }

    /// Clamp every stat into `[0, 100]`.
    pub fn clamp_stats(&mut self) {
        self.health = self.health.clamp(0.0, STAT_MAX);
        self.hunger = self.hunger.clamp(0.0, STAT_MAX);
        self.thirst = self.thirst.clamp(0.0, STAT_MAX);
        self.stamina = self.stamina.clamp(0.0, STAT_MAX);
    }

    /// Apply raw damage and clamp.
    pub fn hurt(&mut self, amount: f64) {
        self.health = (self.health - amount).clamp(0.0, STAT_MAX);
    }
}

/// Held movement keys. Directions are relative to the player's facing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MoveIntent {
    /// Towards the cursor.
    pub forward: bool,
    /// Away from the cursor.
    pub back: bool,
    /// Strafe left of the facing.
    pub left: bool,
    /// Strafe right of the facing.
    pub right: bool,
}

/// Screen size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl Viewport {
    /// Screen center.
    pub fn center(&self) -> (f64, f64) {
        (self.width / 2.0, self.height / 2.0)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
        }
    }
}

/// Latest raw input, sampled once per tick.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InputSnapshot {
    /// Held movement keys.
    pub movement: MoveIntent,
    /// Sprint held.
    pub sprint: bool,
    /// Crouch held.
    pub crouch: bool,
    /// Pointer X in screen pixels.
    pub pointer_x: f64,
    /// Pointer Y in screen pixels.
    pub pointer_y: f64,
    /// Screen size.
    pub viewport: Viewport,
}

impl InputSnapshot {
    /// Facing implied by the pointer position.
    pub fn facing(&self) -> f64 {
        let (cx, cy) = self.viewport.center();
        (self.pointer_y - cy).atan2(self.pointer_x - cx)
    }
}

/// Per-tick movement facts for the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Locomotion {
    /// Standing in deep water this tick.
    pub swimming: bool,
    /// Magnitude of the raw intent vector (0 when idle or in a menu).
    pub speed: f64,
}

/// Advance the player by one tick.
///
/// With a panel open the player stands still and only regenerates stamina.
pub fn tick_player(
    mut player: Player,
    input: &InputSnapshot,
    panel_open: bool,
    entities: &[Entity],
    parts: &[BuildingPart],
) -> (Player, Locomotion) {
    let rotation = input.facing();
    player.rotation = rotation;
    player.crouching = input.crouch;
    let sprinting = input.sprint && player.stamina > 0.0 && !player.exhausted && !player.crouching;

    player.hunger = (player.hunger - HUNGER_DECAY).max(0.0);
    player.thirst = (player.thirst - THIRST_DECAY).max(0.0);
    let hungry = player.hunger < CRITICAL_STAT_THRESHOLD;
    let thirsty = player.thirst < CRITICAL_STAT_THRESHOLD;
    let drain = STARVATION_DRAIN * (u8::from(hungry) + u8::from(thirsty)) as f64;
    player.health = (player.health - drain).max(0.0);
    let regen = if hungry || thirsty {
        STAMINA_REGEN * 0.5
    } else {
        STAMINA_REGEN
    };

    let mut locomotion = Locomotion {
        swimming: is_swimming_at(player.x, player.y),
        speed: 0.0,
    };

    if panel_open {
        player.stamina += regen;
    } else {
        let intent = input.movement;
        let mut dx = 0.0;
        let mut dy = 0.0;
        let mut push = |angle: f64, sign: f64| {
            dx += angle.cos() * sign;
            dy += angle.sin() * sign;
        };
        if intent.forward {
            push(rotation, 1.0);
        }
        if intent.back {
            push(rotation, -1.0);
        }
        if intent.left {
            push(rotation - FRAC_PI_2, 1.0);
        }
        if intent.right {
            push(rotation + FRAC_PI_2, 1.0);
        }

        let length = (dx * dx + dy * dy).sqrt();
        locomotion.speed = length;
        // Opposing keys can cancel to a tiny residue; treat it as standing still.
        if length > 1e-9 {
            let swim = if locomotion.swimming { SWIM_MULTIPLIER } else { 1.0 };
            let sprint = if sprinting { SPRINT_MULTIPLIER } else { 1.0 };
            let crouch = if player.crouching { CROUCH_MULTIPLIER } else { 1.0 };
            let scale = PLAYER_SPEED * swim * sprint * crouch / length;
            let step_x = dx * scale;
            let step_y = dy * scale;
            if !blocks_movement(player.x + step_x, player.y, entities, parts) {
                player.x += step_x;
            }
            if !blocks_movement(player.x, player.y + step_y, entities, parts) {
                player.y += step_y;
            }
            if sprinting {
                player.stamina -= STAMINA_DECAY;
            } else {
                player.stamina += regen;
            }
        } else {
            locomotion.speed = 0.0;
            player.stamina += regen;
        }
    }

    player.clamp_stats();
    if player.stamina <= 0.0 {
        player.exhausted = true;
    } else if player.stamina >= EXHAUSTION_RECOVERY {
        player.exhausted = false;
    }

    (player, locomotion)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heightmap::map_center;

    fn facing_east() -> InputSnapshot {
        let viewport = Viewport::default();
        InputSnapshot {
            pointer_x: viewport.width,
            pointer_y: viewport.height / 2.0,
            viewport,
            ..InputSnapshot::default()
        }
    }

    #[test]
    fn test_pointer_sets_rotation() {
        let (cx, cy) = map_center();
        let mut input = facing_east();
        input.pointer_x = 640.0;
        input.pointer_y = 720.0;
        let (p, _) = tick_player(Player::spawn_at(cx, cy), &input, false, &[], &[]);
        assert!((p.rotation - FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn test_forward_moves_towards_cursor() {
        let (cx, cy) = map_center();
        let mut input = facing_east();
        input.movement.forward = true;
        let (p, loco) = tick_player(Player::spawn_at(cx, cy), &input, false, &[], &[]);
        assert!((p.x - (cx + PLAYER_SPEED)).abs() < 1e-9);
        assert!((p.y - cy).abs() < 1e-9);
        assert!(!loco.swimming);
        assert!((loco.speed - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_left_strafes_counter_clockwise_of_facing() {
        let (cx, cy) = map_center();
        let mut input = facing_east();
        input.movement.left = true;
        let (p, _) = tick_player(Player::spawn_at(cx, cy), &input, false, &[], &[]);
        // Facing east, left is -Y in screen space.
        assert!((p.y - (cy - PLAYER_SPEED)).abs() < 1e-9);
    }

    #[test]
    fn test_sprint_and_crouch_scale_speed() {
        let (cx, cy) = map_center();
        let mut input = facing_east();
        input.movement.forward = true;
        input.sprint = true;
        let (p, _) = tick_player(Player::spawn_at(cx, cy), &input, false, &[], &[]);
        assert!((p.x - cx - PLAYER_SPEED * SPRINT_MULTIPLIER).abs() < 1e-9);
        assert!((p.stamina - (100.0 - STAMINA_DECAY)).abs() < 1e-9);

        input.crouch = true;
        let (p, _) = tick_player(Player::spawn_at(cx, cy), &input, false, &[], &[]);
        assert!((p.x - cx - PLAYER_SPEED * CROUCH_MULTIPLIER).abs() < 1e-9);
        assert!(p.crouching);
    }

    #[test]
    fn test_panel_freezes_movement() {
        let (cx, cy) = map_center();
        let mut input = facing_east();
        input.movement.forward = true;
        let mut start = Player::spawn_at(cx, cy);
        start.stamina = 50.0;
        let (p, loco) = tick_player(start, &input, true, &[], &[]);
        assert_eq!((p.x, p.y), (cx, cy));
        assert_eq!(loco.speed, 0.0);
        assert!((p.stamina - 50.25).abs() < 1e-9);
    }

    #[test]
    fn test_starvation_drains_health_and_halves_regen() {
        let (cx, cy) = map_center();
        let mut start = Player::spawn_at(cx, cy);
        start.hunger = 10.0;
        start.thirst = 10.0;
        start.stamina = 50.0;
        let (p, _) = tick_player(start, &facing_east(), false, &[], &[]);
        assert!((p.health - (100.0 - 2.0 * STARVATION_DRAIN)).abs() < 1e-9);
        assert!((p.stamina - 50.125).abs() < 1e-9);
        assert!((p.hunger - (10.0 - HUNGER_DECAY)).abs() < 1e-12);
        assert!((p.thirst - (10.0 - THIRST_DECAY)).abs() < 1e-12);
    }

    #[test]
    fn test_stats_never_go_negative() {
        let (cx, cy) = map_center();
        let mut start = Player::spawn_at(cx, cy);
        start.hunger = 0.0;
        start.thirst = 0.0;
        start.health = 0.01;
        let (p, _) = tick_player(start, &facing_east(), false, &[], &[]);
        assert_eq!(p.health, 0.0);
        assert_eq!(p.hunger, 0.0);
        assert_eq!(p.thirst, 0.0);
    }

    #[test]
    fn test_collision_blocks_each_axis() {
        use crate::entity::{EntityId, EntityKind};
        let (cx, cy) = map_center();
        let tree = Entity::new(EntityId(0), EntityKind::Tree, cx + 20.0, cy, Some(0));
        let mut input = facing_east();
        input.movement.forward = true;
        let (p, _) = tick_player(Player::spawn_at(cx, cy), &input, false, &[tree], &[]);
        assert_eq!(p.x, cx);
    }
}
