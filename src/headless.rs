use crate::narrator::{HttpNarrative, NarrativeSource, Narrator, NARRATION_TIMEOUT};
use crate::scripted_input::ScriptedInputPlayer;
use anyhow::{Context, Result};
use rusted_core::SimTick;
use rusted_testkit::{
    EventRecord, JsonlSink, MetricsReportBuilder, MetricsSink, SimulationMetrics,
    TestExecutionMetrics, WorldGenMetrics,
};
use rusted_world::{
    EventOutcome, GameStatus, InputEvent, InputSnapshot, RecipeBook, Settings, Simulation,
    StrikeOutcome, TickReport, WorldGenConfig, WorldGenerator, WorldState,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

pub struct HeadlessConfig {
    pub seed: u64,
    pub ticks: u64,
    pub settings: Settings,
    pub worldgen: WorldGenConfig,
    pub recipes: Option<PathBuf>,
    pub scripted_input: Option<PathBuf>,
    pub event_log: Option<PathBuf>,
    pub metrics: Option<PathBuf>,
    pub narrative_endpoint: Option<String>,
    pub narrative_timeout: Duration,
    pub realtime: bool,
}

impl Default for HeadlessConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            ticks: 3_600,
            settings: Settings::default(),
            worldgen: WorldGenConfig::default(),
            recipes: None,
            scripted_input: None,
            event_log: None,
            metrics: None,
            narrative_endpoint: None,
            narrative_timeout: NARRATION_TIMEOUT,
            realtime: false,
        }
    }
}

/// Run the simulation for `cfg.ticks` ticks and return the session counters.
///
/// Driver time advances one tick interval per iteration; with `realtime` the
/// loop also sleeps that long. Deaths respawn the player on the next iteration.
pub async fn run(cfg: HeadlessConfig) -> Result<SimulationMetrics> {
    let started = Instant::now();
    let generator = WorldGenerator::new(cfg.worldgen);
    let (state, stats) = WorldState::generate_with_stats(cfg.seed, &generator, cfg.settings);

    let mut sim = Simulation::from_state(state);
    if let Some(path) = &cfg.recipes {
        let book = RecipeBook::load_from_file(path)?;
        info!(recipes = book.len(), path = %path.display(), "loaded recipe book");
        sim = sim.with_recipes(book);
    }

    let mut script = cfg
        .scripted_input
        .as_deref()
        .map(|path| {
            ScriptedInputPlayer::from_path(path)
                .with_context(|| format!("failed to load scripted input {}", path.display()))
        })
        .transpose()?;

    let mut events = cfg
        .event_log
        .as_deref()
        .map(JsonlSink::create)
        .transpose()?;

    let source: Option<Arc<dyn NarrativeSource>> = cfg
        .narrative_endpoint
        .as_deref()
        .map(|endpoint| {
            Arc::new(HttpNarrative::new(endpoint, cfg.narrative_timeout))
                as Arc<dyn NarrativeSource>
        });
    let mut narrator = Narrator::new(source, cfg.seed).with_timeout(cfg.narrative_timeout);

    let mut counters = SimulationMetrics::default();
    let mut driver_time = Duration::ZERO;
    let mut input = InputSnapshot::default();

    info!(seed = cfg.seed, ticks = cfg.ticks, "headless run starting");
    while sim.tick().0 < cfg.ticks {
        if sim.status() == GameStatus::Dead {
            narrator.abort();
            let outcome = sim.handle(InputEvent::Respawn);
            record_outcome(&mut events, sim.tick(), &outcome, &mut counters)?;
        }

        let dt = sim.tick_interval();
        driver_time += dt;

        if let Some(script) = script.as_mut() {
            let (held, due) = script.advance(dt.as_secs_f64());
            input = held;
            for event in due {
                let outcome = sim.handle(event);
                if outcome == EventOutcome::Respawned {
                    narrator.abort();
                }
                record_outcome(&mut events, sim.tick(), &outcome, &mut counters)?;
                if sim.status() == GameStatus::Dead {
                    narrator.abort();
                    record_death(&mut events, sim.tick(), &mut counters)?;
                    break;
                }
            }
        }

        for report in sim.advance(dt, &input) {
            record_tick(&mut events, &report, &mut counters)?;
            if report.died {
                narrator.abort();
            }
        }

        narrator.poll(driver_time, sim.state());
        for line in narrator.drain() {
            sim.push_world_message(&line);
            if let Some(sink) = events.as_mut() {
                sink.write(&EventRecord::text(sim.tick(), "narration", line))?;
            }
        }

        if cfg.realtime {
            tokio::time::sleep(dt).await;
        } else {
            tokio::task::yield_now().await;
        }
    }
    narrator.abort();

    if let Some(sink) = events.as_mut() {
        sink.flush()?;
        debug!(written = sink.written(), "event log flushed");
    }

    counters.final_health = sim.state().player.health;
    let elapsed = started.elapsed();
    info!(
        ticks = counters.ticks,
        deaths = counters.deaths,
        kills = counters.kills,
        harvests = counters.harvests,
        elapsed_ms = elapsed.as_millis() as u64,
        "headless run finished"
    );

    if let Some(path) = &cfg.metrics {
        let report = MetricsReportBuilder::new("headless_run")
            .worldgen(WorldGenMetrics {
                seed: cfg.seed,
                entities: stats.entities,
                npcs: stats.npcs,
                entity_attempts: stats.entity_attempts as u32,
                npc_attempts: stats.npc_attempts as u32,
            })
            .simulation(counters.clone())
            .execution(TestExecutionMetrics {
                duration_ms: elapsed.as_millis(),
                ticks_per_second: counters.ticks as f64 / elapsed.as_secs_f64().max(1e-9),
            })
            .build();
        MetricsSink::create(path)?.write(&report)?;
        info!(path = %path.display(), "metrics written");
    }

    Ok(counters)
}

fn record_tick(
    events: &mut Option<JsonlSink>,
    report: &TickReport,
    counters: &mut SimulationMetrics,
) -> Result<()> {
    counters.ticks += 1;
    if let Some(change) = report.weather {
        counters.weather_changes += 1;
        if let Some(sink) = events.as_mut() {
            sink.write(&EventRecord {
                tick: report.tick,
                kind: "weather",
                payload: serde_json::to_value(change)?,
            })?;
        }
    }
    if report.died {
        record_death(events, report.tick, counters)?;
    }
    Ok(())
}

fn record_death(
    events: &mut Option<JsonlSink>,
    tick: SimTick,
    counters: &mut SimulationMetrics,
) -> Result<()> {
    counters.deaths += 1;
    warn!(tick = tick.0, "player died");
    if let Some(sink) = events.as_mut() {
        sink.write(&EventRecord::text(tick, "death", "YOU DIED"))?;
    }
    Ok(())
}

fn record_outcome(
    events: &mut Option<JsonlSink>,
    tick: SimTick,
    outcome: &EventOutcome,
    counters: &mut SimulationMetrics,
) -> Result<()> {
    let kind = match outcome {
        EventOutcome::Ignored => return Ok(()),
        EventOutcome::Strike(strike) => {
            match strike {
                StrikeOutcome::Npc { killed: true, .. } => counters.kills += 1,
                StrikeOutcome::Harvest { .. } => counters.harvests += 1,
                _ => {}
            }
            "strike"
        }
        EventOutcome::Craft(craft) => {
            if craft.is_crafted() {
                counters.crafts += 1;
            }
            "craft"
        }
        EventOutcome::Built { .. } => {
            counters.builds += 1;
            "build"
        }
        EventOutcome::Consumed { .. } => "consume",
        EventOutcome::Selected { .. } => "select",
        EventOutcome::Panel(_) => "panel",
        EventOutcome::Respawned => "respawn",
    };
    if let Some(sink) = events.as_mut() {
        sink.write(&EventRecord {
            tick,
            kind,
            payload: serde_json::to_value(outcome)?,
        })?;
    }
    Ok(())
}
