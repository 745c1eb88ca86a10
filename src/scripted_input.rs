use rusted_world::{InputEvent, InputSnapshot, MoveIntent, Viewport};
use serde::Deserialize;
use std::{fs, path::Path};

#[derive(Debug, Deserialize)]
struct ScriptedInputFile {
    steps: Vec<ScriptedStep>,
}

#[derive(Debug, Clone, Deserialize, Default)]
struct ScriptedStep {
    /// Seconds of driver time the step lasts.
    duration: f64,
    #[serde(default)]
    forward: bool,
    #[serde(default)]
    back: bool,
    #[serde(default)]
    left: bool,
    #[serde(default)]
    right: bool,
    #[serde(default)]
    sprint: bool,
    #[serde(default)]
    crouch: bool,
    /// Pointer offset from the screen center, in pixels.
    #[serde(default)]
    pointer_x: f64,
    #[serde(default)]
    pointer_y: f64,
    /// Fired once when the step begins.
    #[serde(default)]
    events: Vec<InputEvent>,
}

/// Replays a JSON step file as held input plus one-shot events.
pub struct ScriptedInputPlayer {
    steps: Vec<ScriptedStep>,
    viewport: Viewport,
    index: usize,
    time_in_step: f64,
    fired: bool,
    finished: bool,
}

impl ScriptedInputPlayer {
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> anyhow::Result<Self> {
        let file: ScriptedInputFile = serde_json::from_str(contents)?;
        if file.steps.is_empty() {
            anyhow::bail!("scripted input file contains no steps");
        }
        if let Some(bad) = file.steps.iter().position(|s| s.duration <= 0.0) {
            anyhow::bail!("scripted step {bad} has a non-positive duration");
        }
        Ok(Self {
            steps: file.steps,
            viewport: Viewport::default(),
            index: 0,
            time_in_step: 0.0,
            fired: false,
            finished: false,
        })
    }

    /// Advance by `dt` seconds; returns the held input and any events that became due.
    ///
    /// The last step keeps being held after the script finishes.
    pub fn advance(&mut self, dt: f64) -> (InputSnapshot, Vec<InputEvent>) {
        let mut events = Vec::new();
        self.collect_events(&mut events);

        self.time_in_step += dt;
        while !self.finished && self.time_in_step >= self.steps[self.index].duration {
            self.time_in_step -= self.steps[self.index].duration;
            if self.index + 1 < self.steps.len() {
                self.index += 1;
                self.fired = false;
                self.collect_events(&mut events);
            } else {
                self.time_in_step = 0.0;
                self.finished = true;
            }
        }

        let step = self.steps.get(self.index).cloned().unwrap_or_default();
        (step.into_snapshot(self.viewport), events)
    }

    fn collect_events(&mut self, out: &mut Vec<InputEvent>) {
        if !self.fired {
            self.fired = true;
            if let Some(step) = self.steps.get(self.index) {
                out.extend(step.events.iter().cloned());
            }
        }
    }
}

impl ScriptedStep {
    fn into_snapshot(self, viewport: Viewport) -> InputSnapshot {
        let (cx, cy) = viewport.center();
        InputSnapshot {
            movement: MoveIntent {
                forward: self.forward,
                back: self.back,
                left: self.left,
                right: self.right,
            },
            sprint: self.sprint,
            crouch: self.crouch,
            pointer_x: cx + self.pointer_x,
            pointer_y: cy + self.pointer_y,
            viewport,
        }
    }
}
