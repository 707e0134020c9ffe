use super::gate;
use super::step::{self, TickOutcome};
use super::types::{Command, Direction, Phase, SimulationState, StateSnapshot};
use crate::config::SimConfig;
use crate::score_store::ScoreStore;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;

/// Owns the authoritative simulation state and drives it.
///
/// All mutation happens behind one lock by whole-state replacement, so a
/// command never interleaves field-by-field with a tick. The clock driver is
/// a spawned task that re-reads the tick interval from the current speed
/// level before every sleep; pausing aborts it (the pending tick is
/// cancelled), resuming spawns a fresh one.
pub struct Session {
  config: SimConfig,
  scores: ScoreStore,
  state: Mutex<SimulationState>,
  snapshots: watch::Sender<StateSnapshot>,
  driver: Mutex<Option<JoinHandle<()>>>,
}

impl Session {
  pub async fn new(config: SimConfig, scores: ScoreStore) -> Arc<Self> {
    let best_score = scores.load_best().await;
    let state = step::seeded(&config, best_score, &mut rand::thread_rng());
    let (snapshots, _) = watch::channel(snapshot_of(&state, &config));
    Arc::new(Self {
      config,
      scores,
      state: Mutex::new(state),
      snapshots,
      driver: Mutex::new(None),
    })
  }

  pub fn subscribe(&self) -> watch::Receiver<StateSnapshot> {
    self.snapshots.subscribe()
  }

  pub async fn snapshot(&self) -> StateSnapshot {
    let state = self.state.lock().await;
    snapshot_of(&state, &self.config)
  }

  pub async fn handle_command(self: &Arc<Self>, command: Command) {
    match command {
      Command::Start => self.start().await,
      Command::Pause => self.pause().await,
      Command::Resume => self.resume().await,
      Command::Toggle => self.toggle().await,
      Command::Reset => self.reset().await,
      Command::Turn(direction) => self.set_direction(direction).await,
    }
  }

  /// Space-bar behavior: start when idle or finished, otherwise flip
  /// between paused and running.
  async fn toggle(self: &Arc<Self>) {
    let phase = self.state.lock().await.phase;
    match phase {
      Phase::Running => self.pause().await,
      Phase::Paused => self.resume().await,
      _ => self.start().await,
    }
  }

  pub async fn start(self: &Arc<Self>) {
    {
      let mut state = self.state.lock().await;
      match state.phase {
        Phase::Idle => state.phase = Phase::Running,
        phase if phase.is_terminal() => {
          let best_score = state.best_score;
          *state = step::seeded(&self.config, best_score, &mut rand::thread_rng());
          state.phase = Phase::Running;
        }
        _ => return,
      }
      self.publish(&state);
      tracing::info!(best = state.best_score, "run started");
    }
    self.ensure_driver().await;
  }

  pub async fn pause(&self) {
    {
      let mut state = self.state.lock().await;
      if state.phase != Phase::Running {
        return;
      }
      state.phase = Phase::Paused;
      self.publish(&state);
    }
    self.cancel_driver().await;
    tracing::debug!("run paused");
  }

  pub async fn resume(self: &Arc<Self>) {
    {
      let mut state = self.state.lock().await;
      if state.phase != Phase::Paused {
        return;
      }
      state.phase = Phase::Running;
      self.publish(&state);
    }
    self.ensure_driver().await;
    tracing::debug!("run resumed");
  }

  /// Re-seeds the board into `Idle`, folding the abandoned run's score into
  /// the best score first so a record cannot be lost to a reset.
  pub async fn reset(&self) {
    let (previous_best, best_score) = {
      let mut state = self.state.lock().await;
      let previous_best = state.best_score;
      let best_score = state.best_score.max(state.score);
      *state = step::seeded(&self.config, best_score, &mut rand::thread_rng());
      self.publish(&state);
      (previous_best, best_score)
    };
    self.cancel_driver().await;
    if best_score > previous_best {
      self.persist_best(best_score);
    }
    tracing::info!(best = best_score, "simulation reset");
  }

  pub async fn set_direction(&self, direction: Direction) {
    let mut state = self.state.lock().await;
    let next = gate::set_pending_direction(&state, direction);
    if next != *state {
      *state = next;
      self.publish(&state);
    }
  }

  async fn step_once(&self) -> bool {
    let mut state = self.state.lock().await;
    if state.phase != Phase::Running {
      return false;
    }
    let previous_best = state.best_score;
    let (next, outcome) = step::advance(&state, &self.config, &mut rand::thread_rng());
    *state = next;
    self.publish(&state);
    let score = state.score;
    let best_score = state.best_score;
    let keep_running = state.phase == Phase::Running;
    drop(state);

    match outcome {
      TickOutcome::Ate => tracing::debug!(score, "food eaten"),
      TickOutcome::GameOver => tracing::info!(score, best = best_score, "game over"),
      TickOutcome::Won => tracing::info!(score, "board filled, run won"),
      TickOutcome::Moved | TickOutcome::Ignored => {}
    }
    if best_score > previous_best {
      self.persist_best(best_score);
    }
    keep_running
  }

  async fn current_tick_ms(&self) -> Option<u64> {
    let state = self.state.lock().await;
    if state.phase != Phase::Running {
      return None;
    }
    Some(self.config.tick_interval_ms(state.speed_level))
  }

  async fn ensure_driver(self: &Arc<Self>) {
    let mut driver = self.driver.lock().await;
    if let Some(handle) = driver.as_ref() {
      if !handle.is_finished() {
        return;
      }
    }
    let session = Arc::clone(self);
    *driver = Some(tokio::spawn(async move {
      loop {
        let Some(tick_ms) = session.current_tick_ms().await else { break };
        tokio::time::sleep(Duration::from_millis(tick_ms)).await;
        if !session.step_once().await {
          break;
        }
      }
    }));
  }

  async fn cancel_driver(&self) {
    let mut driver = self.driver.lock().await;
    if let Some(handle) = driver.take() {
      handle.abort();
    }
  }

  fn persist_best(&self, best_score: u64) {
    let scores = self.scores.clone();
    tokio::spawn(async move {
      if let Err(error) = scores.save_best(best_score).await {
        tracing::warn!(?error, best_score, "failed to persist best score");
      }
    });
  }

  fn publish(&self, state: &SimulationState) {
    self.snapshots.send_replace(snapshot_of(state, &self.config));
  }
}

fn snapshot_of(state: &SimulationState, config: &SimConfig) -> StateSnapshot {
  StateSnapshot {
    phase: state.phase,
    snake: state.snake.clone(),
    food: state.food,
    direction: state.current_direction,
    score: state.score,
    best_score: state.best_score,
    speed_level: state.speed_level,
    tick_ms: config.tick_interval_ms(state.speed_level),
  }
}
