//! Fixed-step tick orchestrator.
//!
//! [`Simulation`] owns the authoritative [`WorldState`] plus the transient
//! session state around it (status, panels, active item, swing). Ticks and
//! discrete input events both take `&mut self`, so they are serialized by
//! construction.

use crate::armor::damage_multiplier;
use crate::crafting::{craft, CraftOutcome, RecipeBook};
use crate::entity::{BuildingPart, PartKind, PLAYER_RADIUS};
use crate::interaction::{resolve_strike, screen_to_world, StrikeOutcome, MELEE_REACH};
use crate::inventory::{Inventory, STARTER_TOOL_ID};
use crate::npc::tick_npcs;
use crate::player::{tick_player, InputSnapshot, Locomotion, Player, STAT_MAX};
use crate::settings::Settings;
use crate::state::WorldState;
use crate::weather::WeatherChanged;
use crate::worldgen::{find_spawn_point, WorldGenerator};
use rand::rngs::StdRng;
use rusted_core::{scoped_rng, Item, ItemCategory, RngDomain, SimTick};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

/// Normal tick interval in milliseconds (60 TPS).
pub const TICK_INTERVAL_MS: f64 = 1000.0 / 60.0;
/// Tick interval while a panel is open.
pub const THROTTLED_TICK_INTERVAL_MS: f64 = 33.33;
/// Catch-up cap per [`Simulation::advance`] call.
pub const MAX_TICKS_PER_ADVANCE: usize = 5;
/// Swing progress added per tick.
pub const SWING_STEP: f64 = 0.18;
/// Health restored by eating.
pub const CONSUME_HEALTH: f64 = 15.0;
/// Hunger restored by eating.
pub const CONSUME_HUNGER: f64 = 25.0;

/// Whether the player is alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    /// Ticks run.
    Playing,
    /// Ticks are suspended until respawn.
    Dead,
}

/// Overlay panels. At most one is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Panel {
    /// Inventory grid (Tab).
    Inventory,
    /// Crafting menu (C).
    Crafting,
    /// Settings menu (X).
    Settings,
}

/// Discrete input events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum InputEvent {
    /// Click at a screen point.
    PrimaryAction {
        /// Screen X.
        x: f64,
        /// Screen Y.
        y: f64,
    },
    /// Eat the active consumable, otherwise strike at the pointer.
    UseActive,
    /// Select hotbar slot 1-6.
    SelectSlot {
        /// 1-based slot.
        slot: usize,
    },
    /// Open a panel, closing the others; close it if already open.
    TogglePanel {
        /// Panel to toggle.
        panel: Panel,
    },
    /// Close every panel.
    ClosePanels,
    /// Attempt a recipe.
    Craft {
        /// Recipe id.
        recipe: String,
    },
    /// Place the active building item at a screen point.
    PlaceBuilding {
        /// Screen X.
        x: f64,
        /// Screen Y.
        y: f64,
    },
    /// Leave the death screen.
    Respawn,
}

/// What an input event did.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", content = "detail", rename_all = "snake_case")]
pub enum EventOutcome {
    /// Dropped: dead, mid-swing, or nothing applicable.
    Ignored,
    /// A strike resolved.
    Strike(StrikeOutcome),
    /// An item was eaten.
    Consumed {
        /// Item id.
        item_id: String,
    },
    /// Active item changed.
    Selected {
        /// New active item id.
        item_id: String,
    },
    /// Panel state changed.
    Panel(Option<Panel>),
    /// A recipe was attempted.
    Craft(CraftOutcome),
    /// A building part was placed.
    Built {
        /// New part id.
        part_id: u64,
        /// Kind placed.
        kind: PartKind,
    },
    /// The player came back.
    Respawned,
}

/// Melee swing animation state.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SwingState {
    /// A swing is in progress.
    pub active: bool,
    /// Progress in `[0, 1)`.
    pub progress: f64,
}

impl SwingState {
    fn start() -> Self {
        Self {
            active: true,
            progress: 0.0,
        }
    }

    fn tick(self) -> Self {
        if !self.active {
            return self;
        }
        let progress = self.progress + SWING_STEP;
        if progress >= 1.0 {
            Self::default()
        } else {
            Self {
                active: true,
                progress,
            }
        }
    }
}

/// Summary of one tick, for event logs and tests.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TickReport {
    /// Tick just completed.
    pub tick: SimTick,
    /// Armor-adjusted NPC damage taken.
    pub contact_damage: f64,
    /// Weather change this tick.
    pub weather: Option<WeatherChanged>,
    /// The player died this tick.
    pub died: bool,
}

/// Read-only view handed to the renderer.
#[derive(Debug, Clone, Copy)]
pub struct RenderFrame<'a> {
    /// World snapshot.
    pub state: &'a WorldState,
    /// Item in hand.
    pub active_item: Option<&'a Item>,
    /// Swing animation progress.
    pub swing_progress: f64,
    /// Player is swimming.
    pub swimming: bool,
    /// Raw movement magnitude.
    pub speed: f64,
    /// Alive or dead.
    pub status: GameStatus,
    /// Open panel.
    pub open_panel: Option<Panel>,
}

/// The tick orchestrator.
#[derive(Debug, Clone)]
pub struct Simulation {
    state: WorldState,
    recipes: RecipeBook,
    status: GameStatus,
    open_panel: Option<Panel>,
    active_item: Option<String>,
    swing: SwingState,
    locomotion: Locomotion,
    last_input: InputSnapshot,
    tick: SimTick,
    accumulator_ms: f64,
    npc_rng: StdRng,
    interaction_rng: StdRng,
    weather_rng: StdRng,
    spawn_rng: StdRng,
}

impl Simulation {
    /// Generate a world from `seed` and start playing.
    pub fn new(seed: u64, generator: &WorldGenerator, settings: Settings) -> Self {
        Self::from_state(WorldState::generate(seed, generator, settings))
    }

    /// Wrap an existing world state. RNG streams derive from `state.seed`.
    pub fn from_state(state: WorldState) -> Self {
        let seed = state.seed;
        Self {
            state,
            recipes: RecipeBook::with_defaults(),
            status: GameStatus::Playing,
            open_panel: None,
            active_item: Some(STARTER_TOOL_ID.to_string()),
            swing: SwingState::default(),
            locomotion: Locomotion::default(),
            last_input: InputSnapshot::default(),
            tick: SimTick::ZERO,
            accumulator_ms: 0.0,
            npc_rng: scoped_rng(seed, RngDomain::NpcBehavior, SimTick::ZERO),
            interaction_rng: scoped_rng(seed, RngDomain::Interaction, SimTick::ZERO),
            weather_rng: scoped_rng(seed, RngDomain::Weather, SimTick::ZERO),
            // Tick 1 keeps respawns off the initial spawn stream.
            spawn_rng: scoped_rng(seed, RngDomain::Spawn, SimTick(1)),
        }
    }

    /// Replace the recipe book.
    pub fn with_recipes(mut self, recipes: RecipeBook) -> Self {
        self.recipes = recipes;
        self
    }

    /// World snapshot.
    pub fn state(&self) -> &WorldState {
        &self.state
    }

    /// Mutable world snapshot, for scenario setup.
    pub fn state_mut(&mut self) -> &mut WorldState {
        &mut self.state
    }

    /// Recipes in use.
    pub fn recipes(&self) -> &RecipeBook {
        &self.recipes
    }

    /// Alive or dead.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Ticks completed.
    pub fn tick(&self) -> SimTick {
        self.tick
    }

    /// Open panel, if any.
    pub fn open_panel(&self) -> Option<Panel> {
        self.open_panel
    }

    /// Active item id, which may name an item no longer carried.
    pub fn active_item_id(&self) -> Option<&str> {
        self.active_item.as_deref()
    }

    /// Swing animation state.
    pub fn swing(&self) -> SwingState {
        self.swing
    }

    /// Movement facts from the last tick.
    pub fn locomotion(&self) -> Locomotion {
        self.locomotion
    }

    /// Current tick interval.
    pub fn tick_interval(&self) -> Duration {
        let ms = if self.open_panel.is_some() {
            THROTTLED_TICK_INTERVAL_MS
        } else {
            TICK_INTERVAL_MS
        };
        Duration::from_secs_f64(ms / 1000.0)
    }

    /// Accumulate wall time and run the ticks it covers.
    ///
    /// Runs at most [`MAX_TICKS_PER_ADVANCE`] ticks; any further backlog is dropped.
    pub fn advance(&mut self, elapsed: Duration, input: &InputSnapshot) -> Vec<TickReport> {
        if self.status == GameStatus::Dead {
            self.accumulator_ms = 0.0;
            return Vec::new();
        }
        let interval = self.tick_interval().as_secs_f64() * 1000.0;
        self.accumulator_ms += elapsed.as_secs_f64() * 1000.0;

        let mut reports = Vec::new();
        while self.accumulator_ms >= interval && reports.len() < MAX_TICKS_PER_ADVANCE {
            self.accumulator_ms -= interval;
            match self.step(input) {
                Some(report) => reports.push(report),
                None => break,
            }
        }
        if self.accumulator_ms >= interval {
            debug!(backlog_ms = self.accumulator_ms, "dropping tick backlog");
            self.accumulator_ms %= interval;
        }
        if self.status == GameStatus::Dead {
            self.accumulator_ms = 0.0;
        }
        reports
    }

    /// Run exactly one tick. Returns `None` while dead.
    pub fn step(&mut self, input: &InputSnapshot) -> Option<TickReport> {
        if self.status == GameStatus::Dead {
            return None;
        }
        self.last_input = *input;
        self.tick = self.tick.advance(1);
        self.swing = self.swing.tick();

        let panel_open = self.open_panel.is_some();
        let state = std::mem::take(&mut self.state);
        let (state, locomotion) = player_phase(state, input, panel_open);
        let (state, contact_damage) = npc_phase(state, &mut self.npc_rng);
        let (state, weather) = environment_phase(state, self.tick, &mut self.weather_rng);
        self.state = state;
        self.locomotion = locomotion;

        let died = self.check_death();

        Some(TickReport {
            tick: self.tick,
            contact_damage,
            weather,
            died,
        })
    }

    /// Apply a discrete input event.
    pub fn handle(&mut self, event: InputEvent) -> EventOutcome {
        if self.status == GameStatus::Dead && event != InputEvent::Respawn {
            return EventOutcome::Ignored;
        }
        let outcome = match event {
            InputEvent::PrimaryAction { x, y } => self.primary_action(x, y),
            InputEvent::UseActive => self.use_active(),
            InputEvent::SelectSlot { slot } => self.select_slot(slot),
            InputEvent::TogglePanel { panel } => {
                self.open_panel = if self.open_panel == Some(panel) {
                    None
                } else {
                    Some(panel)
                };
                EventOutcome::Panel(self.open_panel)
            }
            InputEvent::ClosePanels => {
                self.open_panel = None;
                EventOutcome::Panel(None)
            }
            InputEvent::Craft { recipe } => {
                let state = std::mem::take(&mut self.state);
                let (state, outcome) = craft(state, &self.recipes, &recipe);
                self.state = state;
                EventOutcome::Craft(outcome)
            }
            InputEvent::PlaceBuilding { x, y } => self.place_building(x, y),
            InputEvent::Respawn => self.respawn(),
        };
        debug!(tick = self.tick.0, ?outcome, "input event");
        self.check_death();
        outcome
    }

    /// Append a narrator line to the log.
    pub fn push_world_message(&mut self, text: &str) {
        self.state.log.push(format!("WORLD: {text}"));
    }

    /// View for the renderer.
    pub fn frame(&self) -> RenderFrame<'_> {
        RenderFrame {
            state: &self.state,
            active_item: self.active_item(),
            swing_progress: self.swing.progress,
            swimming: self.locomotion.swimming,
            speed: self.locomotion.speed,
            status: self.status,
            open_panel: self.open_panel,
        }
    }

    /// Strike counter-damage can kill outside a tick.
    fn check_death(&mut self) -> bool {
        if self.status == GameStatus::Playing && self.state.player.is_dead() {
            self.status = GameStatus::Dead;
            info!(tick = self.tick.0, "player died");
            return true;
        }
        false
    }

    fn active_item(&self) -> Option<&Item> {
        self.active_item
            .as_deref()
            .and_then(|id| self.state.inventory.get(id))
    }

    fn primary_action(&mut self, screen_x: f64, screen_y: f64) -> EventOutcome {
        if self.swing.active {
            return EventOutcome::Ignored;
        }
        self.swing = SwingState::start();
        let (wx, wy) = screen_to_world(
            &self.state.player,
            screen_x,
            screen_y,
            &self.last_input.viewport,
            self.state.settings.zoom(),
        );
        let state = std::mem::take(&mut self.state);
        let (state, outcome) = resolve_strike(
            state,
            wx,
            wy,
            self.active_item.as_deref(),
            &mut self.interaction_rng,
        );
        self.state = state;
        EventOutcome::Strike(outcome)
    }

    fn use_active(&mut self) -> EventOutcome {
        let consumable = self
            .active_item()
            .filter(|item| item.category() == ItemCategory::Consumable)
            .map(|item| (item.id.clone(), item.name.to_uppercase()));
        match consumable {
            Some((item_id, name)) => {
                self.state.inventory.remove(&item_id, 1);
                let player = &mut self.state.player;
                player.health = (player.health + CONSUME_HEALTH).min(STAT_MAX);
                player.hunger = (player.hunger + CONSUME_HUNGER).min(STAT_MAX);
                self.state.log.push(format!("CONSUMED: {name}"));
                EventOutcome::Consumed { item_id }
            }
            None => self.primary_action(self.last_input.pointer_x, self.last_input.pointer_y),
        }
    }

    fn select_slot(&mut self, slot: usize) -> EventOutcome {
        match self.state.inventory.hotbar_slot(slot) {
            Some(id) => {
                let item_id = id.to_string();
                self.active_item = Some(item_id.clone());
                EventOutcome::Selected { item_id }
            }
            None => EventOutcome::Ignored,
        }
    }

    fn place_building(&mut self, screen_x: f64, screen_y: f64) -> EventOutcome {
        let Some((item_id, name, kind)) = self.active_item().and_then(|item| {
            if item.category() != ItemCategory::Building {
                return None;
            }
            PartKind::from_item_id(&item.id).map(|kind| (item.id.clone(), item.name.clone(), kind))
        }) else {
            return EventOutcome::Ignored;
        };

        let player = &self.state.player;
        let (wx, wy) = screen_to_world(
            player,
            screen_x,
            screen_y,
            &self.last_input.viewport,
            self.state.settings.zoom(),
        );
        let dist = player.distance_to(wx, wy);
        if dist >= MELEE_REACH || dist < kind.collision_radius() + PLAYER_RADIUS {
            debug!(dist, "building placement out of range or overlapping player");
            return EventOutcome::Ignored;
        }

        let part_id = self.state.next_instance();
        self.state
            .building_parts
            .push(BuildingPart::new(part_id, kind, wx, wy));
        self.state.inventory.remove(&item_id, 1);
        self.state
            .log
            .push(format!("BUILT: {}", name.to_uppercase()));
        EventOutcome::Built { part_id, kind }
    }

    fn respawn(&mut self) -> EventOutcome {
        if self.status != GameStatus::Dead {
            return EventOutcome::Ignored;
        }
        let (x, y) = find_spawn_point(&mut self.spawn_rng);
        self.state.player = Player::spawn_at(x, y);
        self.state.inventory = Inventory::starting();
        self.state.log.push("RESPAWN: Waking up on the beach...");
        self.active_item = Some(STARTER_TOOL_ID.to_string());
        self.swing = SwingState::default();
        self.locomotion = Locomotion::default();
        self.accumulator_ms = 0.0;
        self.status = GameStatus::Playing;
        info!(x, y, "player respawned");
        EventOutcome::Respawned
    }
}

/// Player movement and survival stats.
fn player_phase(
    mut state: WorldState,
    input: &InputSnapshot,
    panel_open: bool,
) -> (WorldState, Locomotion) {
    let (player, locomotion) = tick_player(
        state.player,
        input,
        panel_open,
        &state.entities,
        &state.building_parts,
    );
    state.player = player;
    (state, locomotion)
}

/// Wildlife against the post-movement player. Returns contact damage applied.
fn npc_phase(mut state: WorldState, rng: &mut StdRng) -> (WorldState, f64) {
    let multiplier = damage_multiplier(&state.inventory);
    let npcs = std::mem::take(&mut state.npcs);
    let phase = tick_npcs(npcs, state.player.x, state.player.y, multiplier, rng);
    state.npcs = phase.npcs;
    if phase.contact_damage > 0.0 {
        state.player.hurt(phase.contact_damage);
    }
    (state, phase.contact_damage)
}

/// Day clock and weather.
fn environment_phase(
    mut state: WorldState,
    tick: SimTick,
    rng: &mut StdRng,
) -> (WorldState, Option<WeatherChanged>) {
    state.clock = state.clock.tick();
    let mut change = None;
    if state.settings.weather_enabled {
        let (weather, changed) = state.weather.tick(tick.0, rng);
        state.weather = weather;
        if let Some(changed) = changed {
            info!(from = changed.from.as_str(), to = changed.to.as_str(), "weather changed");
        }
        change = changed;
    }
    (state, change)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{Entity, EntityId, EntityKind};
    use crate::npc::{Npc, NpcId, NpcKind};
    use crate::player::Viewport;

    const PX: f64 = 6000.0;
    const PY: f64 = 6000.0;

    fn sim() -> Simulation {
        Simulation::from_state(WorldState::empty(42, PX, PY, Settings::default()))
    }

    fn idle() -> InputSnapshot {
        let viewport = Viewport::default();
        InputSnapshot {
            pointer_x: viewport.width / 2.0 + 100.0,
            pointer_y: viewport.height / 2.0,
            viewport,
            ..InputSnapshot::default()
        }
    }

    #[test]
    fn advance_runs_one_tick_per_interval() {
        let mut sim = sim();
        assert_eq!(sim.advance(Duration::from_millis(10), &idle()).len(), 0);
        assert_eq!(sim.advance(Duration::from_millis(10), &idle()).len(), 1);
        assert_eq!(sim.advance(Duration::from_millis(50), &idle()).len(), 3);
        assert_eq!(sim.tick(), SimTick(4));
    }

    #[test]
    fn advance_caps_catch_up() {
        let mut sim = sim();
        let ran = sim.advance(Duration::from_secs(2), &idle()).len();
        assert_eq!(ran, MAX_TICKS_PER_ADVANCE);
        // Backlog was dropped.
        assert!(sim.advance(Duration::ZERO, &idle()).is_empty());
    }

    #[test]
    fn open_panel_throttles_ticks() {
        let mut sim = sim();
        sim.handle(InputEvent::TogglePanel {
            panel: Panel::Crafting,
        });
        assert_eq!(sim.advance(Duration::from_millis(20), &idle()).len(), 0);
        assert_eq!(sim.advance(Duration::from_millis(14), &idle()).len(), 1);
    }

    #[test]
    fn panels_are_mutually_exclusive() {
        let mut sim = sim();
        sim.handle(InputEvent::TogglePanel {
            panel: Panel::Inventory,
        });
        sim.handle(InputEvent::TogglePanel {
            panel: Panel::Settings,
        });
        assert_eq!(sim.open_panel(), Some(Panel::Settings));
        sim.handle(InputEvent::TogglePanel {
            panel: Panel::Settings,
        });
        assert_eq!(sim.open_panel(), None);
        sim.handle(InputEvent::TogglePanel {
            panel: Panel::Crafting,
        });
        sim.handle(InputEvent::ClosePanels);
        assert_eq!(sim.open_panel(), None);
    }

    #[test]
    fn swing_blocks_repeat_actions_until_done() {
        let mut sim = sim();
        sim.state_mut()
            .entities
            .push(Entity::new(EntityId(0), EntityKind::Tree, PX + 60.0, PY, Some(0)));
        sim.step(&idle());
        // Zoom 2/3: 40 screen px right of center is 60 world units.
        let click = InputEvent::PrimaryAction { x: 680.0, y: 360.0 };
        assert!(matches!(sim.handle(click.clone()), EventOutcome::Strike(_)));
        assert_eq!(sim.handle(click.clone()), EventOutcome::Ignored);
        for _ in 0..6 {
            sim.step(&idle());
        }
        assert!(!sim.swing().active);
        assert!(matches!(sim.handle(click), EventOutcome::Strike(_)));
        assert_eq!(sim.state().entities[0].health, 70.0);
    }

    #[test]
    fn select_slot_and_consume() {
        let mut sim = sim();
        sim.state_mut()
            .inventory
            .add(Item::consumable("meat_boar", "Boar Meat", 2));
        sim.state_mut().player.health = 50.0;
        sim.state_mut().player.hunger = 90.0;
        assert_eq!(
            sim.handle(InputEvent::SelectSlot { slot: 3 }),
            EventOutcome::Selected {
                item_id: "meat_boar".into()
            }
        );
        assert_eq!(
            sim.handle(InputEvent::UseActive),
            EventOutcome::Consumed {
                item_id: "meat_boar".into()
            }
        );
        let state = sim.state();
        assert_eq!(state.player.health, 65.0);
        assert_eq!(state.player.hunger, 100.0);
        assert_eq!(state.inventory.get("meat_boar").map(|i| i.count), Some(1));
        assert_eq!(state.log.last(), Some("CONSUMED: BOAR MEAT"));
        assert_eq!(sim.handle(InputEvent::SelectSlot { slot: 6 }), EventOutcome::Ignored);
    }

    #[test]
    fn place_building_consumes_item() {
        let mut sim = sim();
        sim.state_mut()
            .inventory
            .add(Item::building("wall", "Wood Wall", 1));
        sim.step(&idle());
        sim.handle(InputEvent::SelectSlot { slot: 3 });
        // Too close: overlaps the player.
        assert_eq!(
            sim.handle(InputEvent::PlaceBuilding { x: 645.0, y: 360.0 }),
            EventOutcome::Ignored
        );
        let outcome = sim.handle(InputEvent::PlaceBuilding { x: 700.0, y: 360.0 });
        assert!(matches!(
            outcome,
            EventOutcome::Built {
                kind: PartKind::Wall,
                ..
            }
        ));
        assert_eq!(sim.state().building_parts.len(), 1);
        assert!(sim.state().inventory.get("wall").is_none());
        assert_eq!(sim.state().log.last(), Some("BUILT: WOOD WALL"));
    }

    #[test]
    fn death_suspends_ticks_until_respawn() {
        let mut sim = sim();
        sim.state_mut().player.health = 0.1;
        sim.state_mut()
            .npcs
            .push(Npc::new(NpcId(0), NpcKind::Bear, PX + 60.0, PY, 0.0));
        let report = sim.step(&idle()).expect("tick while alive");
        assert!(report.died);
        assert_eq!(sim.status(), GameStatus::Dead);
        assert!(sim.step(&idle()).is_none());
        assert_eq!(sim.handle(InputEvent::UseActive), EventOutcome::Ignored);

        assert_eq!(sim.handle(InputEvent::Respawn), EventOutcome::Respawned);
        assert_eq!(sim.status(), GameStatus::Playing);
        let state = sim.state();
        assert_eq!(state.player.health, 100.0);
        assert_eq!(state.inventory, Inventory::starting());
        assert_eq!(sim.active_item_id(), Some("rock_tool"));
        assert_eq!(state.log.last(), Some("RESPAWN: Waking up on the beach..."));
        assert_eq!(sim.handle(InputEvent::Respawn), EventOutcome::Ignored);
    }

    #[test]
    fn counter_damage_kills_immediately() {
        let mut sim = sim();
        sim.state_mut()
            .npcs
            .push(Npc::new(NpcId(0), NpcKind::Chicken, PX + 60.0, PY, 0.0));
        sim.state_mut()
            .inventory
            .add(Item::consumable("meat_boar", "Boar Meat", 1));
        sim.step(&idle());
        sim.state_mut().player.health = 1.0;
        sim.handle(InputEvent::SelectSlot { slot: 2 });
        assert_eq!(sim.active_item_id(), Some("torch"));

        let outcome = sim.handle(InputEvent::PrimaryAction { x: 680.0, y: 360.0 });
        assert!(matches!(outcome, EventOutcome::Strike(StrikeOutcome::Npc { .. })));
        assert_eq!(sim.status(), GameStatus::Dead);
        assert_eq!(sim.state().player.health, 0.0);

        assert_eq!(sim.handle(InputEvent::SelectSlot { slot: 3 }), EventOutcome::Ignored);
        assert_eq!(sim.handle(InputEvent::UseActive), EventOutcome::Ignored);
        assert_eq!(sim.state().player.health, 0.0);
        assert!(sim.step(&idle()).is_none());
    }

    #[test]
    fn world_messages_are_prefixed() {
        let mut sim = sim();
        sim.push_world_message("A chill runs down your spine.");
        assert_eq!(
            sim.state().log.last(),
            Some("WORLD: A chill runs down your spine.")
        );
    }

    #[test]
    fn day_clock_advances_per_tick() {
        let mut sim = sim();
        for _ in 0..100 {
            sim.step(&idle());
        }
        assert!((sim.state().clock.minutes - 721.0).abs() < 1e-9);
    }
}
