//! Property-based tests for the player tick.
//!
//! Validates survival stat invariants under arbitrary input sequences:
//! - Every stat stays within [0, 100]
//! - The exhaustion latch obeys its hysteresis thresholds
//! - An open panel freezes the player in place

use proptest::prelude::*;
use rusted_world::{
    map_center, tick_player, InputSnapshot, MoveIntent, Player, Viewport, EXHAUSTION_RECOVERY,
    STAT_MAX,
};

fn input_strategy() -> impl Strategy<Value = InputSnapshot> {
    (any::<[bool; 6]>(), 0.0f64..1280.0, 0.0f64..720.0)
        .prop_map(|(keys, pointer_x, pointer_y)| InputSnapshot {
            movement: MoveIntent {
                forward: keys[0],
                back: keys[1],
                left: keys[2],
                right: keys[3],
            },
            sprint: keys[4],
            crouch: keys[5],
            pointer_x,
            pointer_y,
            viewport: Viewport::default(),
        })
}

fn stat_strategy() -> impl Strategy<Value = f64> {
    prop_oneof![Just(0.0), Just(1.0), 0.0f64..=100.0]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Property: stats never leave [0, 100] and the exhaustion latch is consistent.
    #[test]
    fn stats_stay_bounded(
        hunger in stat_strategy(),
        thirst in stat_strategy(),
        stamina in stat_strategy(),
        inputs in prop::collection::vec(input_strategy(), 1..200),
    ) {
        let (cx, cy) = map_center();
        let mut player = Player::spawn_at(cx, cy);
        player.hunger = hunger;
        player.thirst = thirst;
        player.stamina = stamina;

        for input in &inputs {
            let was_exhausted = player.exhausted;
            let (next, locomotion) = tick_player(player, input, false, &[], &[]);
            player = next;

            for stat in [player.health, player.hunger, player.thirst, player.stamina] {
                prop_assert!((0.0..=STAT_MAX).contains(&stat), "stat {} out of range", stat);
            }
            prop_assert!(locomotion.speed >= 0.0);
            if player.stamina <= 0.0 {
                prop_assert!(player.exhausted);
            }
            if player.stamina >= EXHAUSTION_RECOVERY {
                prop_assert!(!player.exhausted);
            }
            if player.stamina > 0.0 && player.stamina < EXHAUSTION_RECOVERY {
                prop_assert_eq!(player.exhausted, was_exhausted);
            }
        }
    }

    /// Property: with a panel open the player never moves and stamina never drops.
    #[test]
    fn open_panel_freezes_movement(
        stamina in stat_strategy(),
        inputs in prop::collection::vec(input_strategy(), 1..60),
    ) {
        let (cx, cy) = map_center();
        let mut player = Player::spawn_at(cx, cy);
        player.stamina = stamina;

        for input in &inputs {
            let before = player.stamina;
            let (next, locomotion) = tick_player(player, input, true, &[], &[]);
            player = next;
            prop_assert_eq!((player.x, player.y), (cx, cy));
            prop_assert_eq!(locomotion.speed, 0.0);
            prop_assert!(player.stamina >= before);
        }
    }
}
