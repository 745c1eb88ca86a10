//! Structured metrics reports written by headless runs and worldtests.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

/// One metrics document per test or headless run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsReport {
    /// Name of the run.
    pub test_name: String,
    /// RFC 3339 timestamp when the report was built.
    pub timestamp: String,
    /// Commit hash, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit_hash: Option<String>,
    /// Overall outcome.
    pub result: TestResult,
    /// World generation statistics.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub worldgen: Option<WorldGenMetrics>,
    /// Simulation counters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub simulation: Option<SimulationMetrics>,
    /// Wall-clock execution details.
    pub test_execution: TestExecutionMetrics,
}

/// Run outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestResult {
    /// Run completed with all checks satisfied.
    Pass,
    /// A check failed.
    Fail,
}

/// Placement statistics from world generation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldGenMetrics {
    /// World seed.
    pub seed: u64,
    /// Static entities placed.
    pub entities: usize,
    /// NPCs placed.
    pub npcs: usize,
    /// Entity placement attempts consumed.
    pub entity_attempts: u32,
    /// NPC placement attempts consumed.
    pub npc_attempts: u32,
}

/// Counters accumulated while ticking.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationMetrics {
    /// Ticks simulated.
    pub ticks: u64,
    /// NPCs killed by the player.
    pub kills: u32,
    /// Successful harvest strikes.
    pub harvests: u32,
    /// Successful crafts.
    pub crafts: u32,
    /// Building parts placed.
    pub builds: u32,
    /// Player deaths.
    pub deaths: u32,
    /// Weather transitions.
    pub weather_changes: u32,
    /// Health at the end of the run.
    pub final_health: f64,
}

/// Execution timing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TestExecutionMetrics {
    /// Wall-clock duration in milliseconds.
    pub duration_ms: u128,
    /// Ticks per wall-clock second.
    pub ticks_per_second: f64,
}

/// Builder for [`MetricsReport`].
pub struct MetricsReportBuilder {
    test_name: String,
    commit_hash: Option<String>,
    result: TestResult,
    worldgen: Option<WorldGenMetrics>,
    simulation: Option<SimulationMetrics>,
    test_execution: TestExecutionMetrics,
}

impl MetricsReportBuilder {
    /// Start a passing report named `test_name`.
    pub fn new(test_name: impl Into<String>) -> Self {
        Self {
            test_name: test_name.into(),
            commit_hash: std::env::var("GIT_COMMIT").ok(),
            result: TestResult::Pass,
            worldgen: None,
            simulation: None,
            test_execution: TestExecutionMetrics::default(),
        }
    }

    /// Set the outcome.
    pub fn result(mut self, result: TestResult) -> Self {
        self.result = result;
        self
    }

    /// Attach worldgen statistics.
    pub fn worldgen(mut self, metrics: WorldGenMetrics) -> Self {
        self.worldgen = Some(metrics);
        self
    }

    /// Attach simulation counters.
    pub fn simulation(mut self, metrics: SimulationMetrics) -> Self {
        self.simulation = Some(metrics);
        self
    }

    /// Attach execution timing.
    pub fn execution(mut self, metrics: TestExecutionMetrics) -> Self {
        self.test_execution = metrics;
        self
    }

    /// Finish the report, stamping the current time.
    pub fn build(self) -> MetricsReport {
        MetricsReport {
            test_name: self.test_name,
            timestamp: chrono::Utc::now().to_rfc3339(),
            commit_hash: self.commit_hash,
            result: self.result,
            worldgen: self.worldgen,
            simulation: self.simulation,
            test_execution: self.test_execution,
        }
    }
}

/// Writes metrics reports as pretty JSON.
pub struct MetricsSink {
    writer: BufWriter<File>,
}

impl MetricsSink {
    /// Create a sink at `path`, creating parent dirs if needed.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let file = File::create(path)
            .with_context(|| format!("Failed to create metrics file {}", path.display()))?;
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }

    /// Serialize the report.
    pub fn write(&mut self, report: &MetricsReport) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, report)?;
        Ok(())
    }
}
