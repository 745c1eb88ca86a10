//! Flavor-text narration for the world log.
//!
//! A [`Narrator`] asks a [`NarrativeSource`] for one atmospheric line per
//! minute of driver time. Requests run as tokio tasks and post their result on a
//! channel the driver drains between ticks. Failures, empty replies and timeouts
//! fall back to an offline line so the log never stalls.

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::Rng;
use rusted_core::{scoped_rng, RngDomain, SimTick};
use rusted_world::WorldState;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Minimum driver time between two narration requests.
pub const NARRATION_INTERVAL: Duration = Duration::from_secs(60);

/// Default bound on a single request.
pub const NARRATION_TIMEOUT: Duration = Duration::from_secs(10);

/// Line used when the source answers with nothing.
pub const SILENT_LINE: &str = "The wasteland is silent.";

/// Lines used when the source is unreachable.
pub const OFFLINE_LINES: [&str; 13] = [
    "The wind carries the scent of sulfur.",
    "Distant gunfire echoes off the mountains.",
    "A chill runs down your spine.",
    "The Geiger counter clicks ominously.",
    "You feel watched from the shadows.",
    "The sun beats down unforgivingly.",
    "A rusted supply drop plane flies overhead.",
    "Silence falls over the wasteland.",
    "You hear the crunch of dry leaves nearby.",
    "The air tastes of metal and ash.",
    "Supplies are scarce. Conserve your energy.",
    "Darkness approaches. Find shelter.",
    "The local wildlife seems agitated.",
];

const CHANNEL_CAPACITY: usize = 8;

/// Why a narrative request produced no text.
#[derive(Debug, Error)]
pub enum NarrativeError {
    /// The endpoint reported its quota as exhausted (HTTP 429).
    #[error("narrative quota exceeded")]
    QuotaExceeded,
    /// Transport or HTTP failure.
    #[error("narrative request failed: {0}")]
    Transport(String),
    /// The blocking request task did not complete.
    #[error("narrative task failed: {0}")]
    Task(String),
}

/// Snapshot of the player handed to the source.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NarrativeRequest {
    /// World X.
    pub x: f64,
    /// World Y.
    pub y: f64,
    /// Health percentage.
    pub health: f64,
    /// Hunger percentage.
    pub hunger: f64,
}

impl NarrativeRequest {
    /// Capture the request fields from a world snapshot.
    pub fn from_state(state: &WorldState) -> Self {
        Self {
            x: state.player.x,
            y: state.player.y,
            health: state.player.health,
            hunger: state.player.hunger,
        }
    }

    /// Natural-language prompt for text-generation endpoints.
    pub fn prompt(&self) -> String {
        format!(
            "You are the narrator of a brutal survival game called RUSTED. \
             The player is at X:{}, Y:{}. Health: {}%, Hunger: {}%. \
             Provide a brief (10-15 words) atmospheric world event or survival hint.",
            self.x.round(),
            self.y.round(),
            self.health.round(),
            self.hunger.round(),
        )
    }
}

/// Something that can produce a narration line.
#[async_trait]
pub trait NarrativeSource: Send + Sync {
    /// Produce one line for `request`.
    async fn narrate(&self, request: NarrativeRequest) -> Result<String, NarrativeError>;
}

/// Posts the request as JSON to an HTTP endpoint.
///
/// The reply may be a JSON object with a `text` field or plain text.
pub struct HttpNarrative {
    endpoint: String,
    agent: ureq::Agent,
}

impl HttpNarrative {
    /// Create a client for `endpoint` with a transport-level timeout.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self {
            endpoint: endpoint.into(),
            agent: ureq::AgentBuilder::new().timeout(timeout).build(),
        }
    }
}

#[async_trait]
impl NarrativeSource for HttpNarrative {
    async fn narrate(&self, request: NarrativeRequest) -> Result<String, NarrativeError> {
        let agent = self.agent.clone();
        let endpoint = self.endpoint.clone();
        let body = serde_json::json!({
            "prompt": request.prompt(),
            "player": request,
        })
        .to_string();

        let reply = tokio::task::spawn_blocking(move || {
            match agent
                .post(&endpoint)
                .set("Content-Type", "application/json")
                .send_string(&body)
            {
                Ok(response) => response
                    .into_string()
                    .map_err(|err| NarrativeError::Transport(err.to_string())),
                Err(ureq::Error::Status(429, _)) => Err(NarrativeError::QuotaExceeded),
                Err(ureq::Error::Status(code, _)) => {
                    Err(NarrativeError::Transport(format!("HTTP {code}")))
                }
                Err(err) => Err(NarrativeError::Transport(err.to_string())),
            }
        })
        .await
        .map_err(|err| NarrativeError::Task(err.to_string()))??;

        Ok(extract_text(&reply))
    }
}

fn extract_text(reply: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(reply) {
        Ok(serde_json::Value::Object(map)) => map
            .get("text")
            .and_then(|text| text.as_str())
            .unwrap_or_default()
            .to_string(),
        _ => reply.to_string(),
    }
}

/// Rate-limited, fire-and-forget narration.
pub struct Narrator {
    source: Option<Arc<dyn NarrativeSource>>,
    timeout: Duration,
    interval: Duration,
    last_request: Duration,
    rng: StdRng,
    tx: mpsc::Sender<String>,
    rx: mpsc::Receiver<String>,
    in_flight: Option<JoinHandle<()>>,
}

impl Narrator {
    /// Narrator backed by `source`, or offline-only when `None`.
    pub fn new(source: Option<Arc<dyn NarrativeSource>>, seed: u64) -> Self {
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        Self {
            source,
            timeout: NARRATION_TIMEOUT,
            interval: NARRATION_INTERVAL,
            last_request: Duration::ZERO,
            rng: scoped_rng(seed, RngDomain::Narrative, SimTick::ZERO),
            tx,
            rx,
            in_flight: None,
        }
    }

    /// Override the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Whether a request is still running.
    pub fn is_busy(&self) -> bool {
        self.in_flight
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Start a request if the interval has elapsed at driver time `now`.
    ///
    /// Must be called from inside a tokio runtime. Returns true when a request started.
    pub fn poll(&mut self, now: Duration, state: &WorldState) -> bool {
        if now.saturating_sub(self.last_request) <= self.interval || self.is_busy() {
            return false;
        }
        self.last_request = now;
        let fallback = self.offline_line();

        let Some(source) = self.source.clone() else {
            if self.tx.try_send(fallback.to_string()).is_err() {
                debug!("narration channel full, dropping offline line");
            }
            return true;
        };

        let request = NarrativeRequest::from_state(state);
        let timeout = self.timeout;
        let tx = self.tx.clone();
        self.in_flight = Some(tokio::spawn(async move {
            let line = match tokio::time::timeout(timeout, source.narrate(request)).await {
                Ok(Ok(text)) if text.trim().is_empty() => SILENT_LINE.to_string(),
                Ok(Ok(text)) => text.trim().to_string(),
                Ok(Err(NarrativeError::QuotaExceeded)) => {
                    warn!("narrative quota exceeded, switching to offline narration");
                    fallback.to_string()
                }
                Ok(Err(err)) => {
                    warn!(%err, "narrative request failed, using offline narration");
                    fallback.to_string()
                }
                Err(_) => {
                    warn!(?timeout, "narrative request timed out, using offline narration");
                    fallback.to_string()
                }
            };
            if tx.send(line).await.is_err() {
                debug!("narrator dropped before the line arrived");
            }
        }));
        true
    }

    /// Lines that have arrived since the last drain.
    pub fn drain(&mut self) -> Vec<String> {
        let mut lines = Vec::new();
        while let Ok(line) = self.rx.try_recv() {
            lines.push(line);
        }
        lines
    }

    /// Cancel the in-flight request, if any. Its line is never delivered.
    pub fn abort(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            if !handle.is_finished() {
                debug!("aborting in-flight narration");
            }
            handle.abort();
        }
    }

    /// Wait for the next line.
    #[cfg(test)]
    pub async fn recv(&mut self) -> Option<String> {
        self.rx.recv().await
    }

    fn offline_line(&mut self) -> &'static str {
        OFFLINE_LINES[self.rng.gen_range(0..OFFLINE_LINES.len())]
    }
}

impl Drop for Narrator {
    fn drop(&mut self) {
        self.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusted_world::Settings;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Fixed(&'static str);

    #[async_trait]
    impl NarrativeSource for Fixed {
        async fn narrate(&self, _request: NarrativeRequest) -> Result<String, NarrativeError> {
            Ok(self.0.to_string())
        }
    }

    struct Failing;

    #[async_trait]
    impl NarrativeSource for Failing {
        async fn narrate(&self, _request: NarrativeRequest) -> Result<String, NarrativeError> {
            Err(NarrativeError::QuotaExceeded)
        }
    }

    struct Slow(Duration);

    #[async_trait]
    impl NarrativeSource for Slow {
        async fn narrate(&self, _request: NarrativeRequest) -> Result<String, NarrativeError> {
            tokio::time::sleep(self.0).await;
            Ok("too late".to_string())
        }
    }

    struct Counting(AtomicUsize);

    #[async_trait]
    impl NarrativeSource for Counting {
        async fn narrate(&self, _request: NarrativeRequest) -> Result<String, NarrativeError> {
            let n = self.0.fetch_add(1, Ordering::SeqCst);
            Ok(format!("line {n}"))
        }
    }

    fn state() -> WorldState {
        WorldState::empty(3, 6000.0, 6000.0, Settings::default())
    }

    const MINUTE: Duration = Duration::from_secs(61);

    async fn next(narrator: &mut Narrator) -> Option<String> {
        tokio::time::timeout(Duration::from_secs(2), narrator.recv())
            .await
            .ok()
            .flatten()
    }

    #[test]
    fn prompt_rounds_the_player_snapshot() {
        let mut state = state();
        state.player.x = 1234.6;
        state.player.hunger = 41.2;
        let prompt = NarrativeRequest::from_state(&state).prompt();
        assert!(prompt.contains("X:1235, Y:6000"));
        assert!(prompt.contains("Hunger: 41%"));
    }

    #[test]
    fn reply_text_is_extracted_from_json() {
        assert_eq!(extract_text(r#"{"text":"Wolves howl."}"#), "Wolves howl.");
        assert_eq!(extract_text("Plain reply"), "Plain reply");
        assert_eq!(extract_text(r#"{"other":1}"#), "");
    }

    #[tokio::test]
    async fn source_line_is_delivered() {
        let mut narrator = Narrator::new(Some(Arc::new(Fixed("  Ash falls like snow.  "))), 1);
        assert!(narrator.poll(MINUTE, &state()));
        assert_eq!(next(&mut narrator).await.as_deref(), Some("Ash falls like snow."));
    }

    #[tokio::test]
    async fn empty_reply_uses_silent_line() {
        let mut narrator = Narrator::new(Some(Arc::new(Fixed("   "))), 1);
        narrator.poll(MINUTE, &state());
        assert_eq!(next(&mut narrator).await.as_deref(), Some(SILENT_LINE));
    }

    #[tokio::test]
    async fn failures_fall_back_to_offline_lines() {
        let mut narrator = Narrator::new(Some(Arc::new(Failing)), 1);
        narrator.poll(MINUTE, &state());
        let line = next(&mut narrator).await.expect("fallback line");
        assert!(OFFLINE_LINES.contains(&line.as_str()));
    }

    #[tokio::test]
    async fn timeouts_fall_back_to_offline_lines() {
        let mut narrator = Narrator::new(Some(Arc::new(Slow(Duration::from_secs(5)))), 1)
            .with_timeout(Duration::from_millis(20));
        narrator.poll(MINUTE, &state());
        let line = next(&mut narrator).await.expect("fallback line");
        assert!(OFFLINE_LINES.contains(&line.as_str()));
    }

    #[tokio::test]
    async fn requests_are_rate_limited() {
        let source = Arc::new(Counting(AtomicUsize::new(0)));
        let mut narrator = Narrator::new(Some(source.clone()), 1);

        assert!(!narrator.poll(Duration::from_secs(30), &state()));
        assert!(!narrator.poll(Duration::from_secs(60), &state()));
        assert!(narrator.poll(MINUTE, &state()));
        assert_eq!(next(&mut narrator).await.as_deref(), Some("line 0"));

        assert!(!narrator.poll(MINUTE + Duration::from_secs(59), &state()));
        assert!(narrator.poll(MINUTE * 2 + Duration::from_secs(1), &state()));
        assert_eq!(next(&mut narrator).await.as_deref(), Some("line 1"));
        assert_eq!(source.0.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn aborted_requests_never_deliver() {
        let mut narrator = Narrator::new(Some(Arc::new(Slow(Duration::from_millis(100)))), 1);
        assert!(narrator.poll(MINUTE, &state()));
        assert!(narrator.is_busy());
        narrator.abort();
        assert!(!narrator.is_busy());

        let late = tokio::time::timeout(Duration::from_millis(300), narrator.recv()).await;
        assert!(late.is_err(), "aborted request delivered {late:?}");
        assert!(narrator.drain().is_empty());
    }

    #[tokio::test]
    async fn offline_mode_posts_directly() {
        let mut narrator = Narrator::new(None, 9);
        assert!(narrator.poll(MINUTE, &state()));
        let lines = narrator.drain();
        assert_eq!(lines.len(), 1);
        assert!(OFFLINE_LINES.contains(&lines[0].as_str()));
    }
}
