//! Periodic Runner
//!
//! One tokio task owns the engine. Simulation steps, decay ticks and
//! control commands are multiplexed on that task, so no two steps ever
//! overlap and the engine needs no lock.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

use crate::error::{EngineError, EngineResult};
use crate::logic::activity::Event;
use crate::logic::engine::{EngineUpdate, RiskEngine};
use crate::logic::events::UpdateEmitter;
use crate::logic::simulator::EventSimulator;

const COMMAND_BUFFER: usize = 64;

enum Command {
    /// Reply carries the rejection, if any
    Submit(Event, oneshot::Sender<EngineResult<()>>),
    Reset,
    Shutdown,
}

/// Monitoring gates everything; pause only gates simulation
#[derive(Debug, Default)]
struct RunFlags {
    monitoring: AtomicBool,
    simulating: AtomicBool,
}

impl RunFlags {
    fn should_simulate(&self) -> bool {
        self.monitoring.load(Ordering::SeqCst) && self.simulating.load(Ordering::SeqCst)
    }
}

pub struct RunnerHandle {
    flags: Arc<RunFlags>,
    commands: mpsc::Sender<Command>,
    emitter: UpdateEmitter,
    task: JoinHandle<RiskEngine>,
}

impl RunnerHandle {
    /// Start monitoring; simulation resumes too
    pub fn start(&self) {
        if !self.flags.monitoring.swap(true, Ordering::SeqCst) {
            self.flags.simulating.store(true, Ordering::SeqCst);
            log::info!("Monitoring started");
        }
    }

    pub fn stop(&self) {
        if self.flags.monitoring.swap(false, Ordering::SeqCst) {
            self.flags.simulating.store(false, Ordering::SeqCst);
            log::info!("Monitoring stopped");
        }
    }

    /// Flip pause/resume; ignored while monitoring is stopped.
    /// Returns whether simulation is now active.
    pub fn toggle_pause(&self) -> bool {
        if !self.is_running() {
            return false;
        }
        let active = !self.flags.simulating.fetch_xor(true, Ordering::SeqCst);
        log::info!("Simulation {}", if active { "resumed" } else { "paused" });
        active
    }

    pub fn is_running(&self) -> bool {
        self.flags.monitoring.load(Ordering::SeqCst)
    }

    pub fn is_paused(&self) -> bool {
        self.is_running() && !self.flags.simulating.load(Ordering::SeqCst)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<EngineUpdate> {
        self.emitter.subscribe()
    }

    /// Run an externally sourced event; resolves once the engine has
    /// processed or rejected it
    pub async fn submit(&self, event: Event) -> EngineResult<()> {
        let (reply, outcome) = oneshot::channel();
        self.send(Command::Submit(event, reply)).await?;
        outcome.await.map_err(|_| EngineError::RunnerClosed)?
    }

    pub async fn reset(&self) -> EngineResult<()> {
        self.send(Command::Reset).await
    }

    /// Stop the task and hand the engine back
    pub async fn shutdown(self) -> EngineResult<RiskEngine> {
        self.stop();
        // The task may already be gone; join below tells
        let _ = self.commands.send(Command::Shutdown).await;
        self.task.await.map_err(|e| {
            log::error!("Runner task failed: {}", e);
            EngineError::RunnerClosed
        })
    }

    async fn send(&self, command: Command) -> EngineResult<()> {
        self.commands
            .send(command)
            .await
            .map_err(|_| EngineError::RunnerClosed)
    }
}

/// Spawn the runner task. Monitoring starts stopped; decay runs from
/// the first tick regardless.
pub fn spawn(engine: RiskEngine, simulator: EventSimulator, emitter: UpdateEmitter) -> RunnerHandle {
    let flags = Arc::new(RunFlags::default());
    let (tx, rx) = mpsc::channel(COMMAND_BUFFER);

    let task = tokio::spawn(run_loop(engine, simulator, emitter.clone(), flags.clone(), rx));

    RunnerHandle {
        flags,
        commands: tx,
        emitter,
        task,
    }
}

async fn run_loop(
    mut engine: RiskEngine,
    mut simulator: EventSimulator,
    emitter: UpdateEmitter,
    flags: Arc<RunFlags>,
    mut commands: mpsc::Receiver<Command>,
) -> RiskEngine {
    let sim_ms = engine.config().simulation_interval_ms.max(1);
    let decay_ms = engine.config().decay_interval_ms.max(1);
    log::info!("Risk runner started (simulation {}ms, decay {}ms)", sim_ms, decay_ms);

    let mut sim_tick = interval(Duration::from_millis(sim_ms));
    let mut decay_tick = interval(Duration::from_millis(decay_ms));
    sim_tick.set_missed_tick_behavior(MissedTickBehavior::Delay);
    decay_tick.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = sim_tick.tick() => {
                if !flags.should_simulate() {
                    continue;
                }
                if let Some(event) = simulator.next_event() {
                    // Rejections are already logged by the engine
                    let _ = process(&mut engine, &emitter, event);
                }
            }
            _ = decay_tick.tick() => {
                emitter.emit(engine.decay_tick());
            }
            command = commands.recv() => match command {
                Some(Command::Submit(event, reply)) => {
                    // The caller may have stopped waiting
                    let _ = reply.send(process(&mut engine, &emitter, event));
                }
                Some(Command::Reset) => {
                    emitter.emit(engine.reset());
                }
                Some(Command::Shutdown) | None => break,
            },
        }
    }

    log::info!("Risk runner stopped after {} activities", engine.total_activities());
    engine
}

fn process(engine: &mut RiskEngine, emitter: &UpdateEmitter, event: Event) -> EngineResult<()> {
    let update = engine.process_event(event)?;
    emitter.emit(update);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::activity::ActivityKind;
    use crate::error::InvalidEvent;
    use crate::logic::config::EngineConfig;
    use crate::logic::events::UpdateKind;
    use crate::logic::persistence::NullSink;
    use crate::logic::random::ScriptedSource;

    fn engine(simulation_interval_ms: u64) -> RiskEngine {
        let config = EngineConfig {
            simulation_interval_ms,
            decay_interval_ms: 60_000,
            ..Default::default()
        };
        RiskEngine::with_parts(
            config,
            Box::new(NullSink),
            Box::new(ScriptedSource::constant(0.99)),
            Box::new(ScriptedSource::constant(0.99)),
        )
        .unwrap()
    }

    fn simulator() -> EventSimulator {
        EventSimulator::with_random(
            &crate::logic::users::UserProfile::default_roster(),
            Box::new(ScriptedSource::constant(0.0)),
        )
    }

    #[tokio::test]
    async fn test_submitted_event_is_broadcast() {
        let handle = spawn(engine(60_000), simulator(), UpdateEmitter::default());
        let mut updates = handle.subscribe();

        handle
            .submit(Event::new("user_B", ActivityKind::DataCopyToUsb))
            .await
            .unwrap();

        let update = loop {
            let update = updates.recv().await.unwrap();
            if update.kind == UpdateKind::Activity {
                break update;
            }
        };
        assert_eq!(update.users[1].score, 15);

        let engine = handle.shutdown().await.unwrap();
        assert_eq!(engine.total_activities(), 1);
    }

    #[tokio::test]
    async fn test_rejected_submission_reaches_caller() {
        let handle = spawn(engine(60_000), simulator(), UpdateEmitter::default());

        let result = handle
            .submit(Event::new("user_Z", ActivityKind::FileDownload))
            .await;
        assert!(matches!(
            result,
            Err(EngineError::InvalidEvent(InvalidEvent::UnknownUser(ref id))) if id == "user_Z"
        ));

        let engine = handle.shutdown().await.unwrap();
        assert_eq!(engine.total_activities(), 0);
        assert!(engine.activity_log().is_empty());
    }

    #[tokio::test]
    async fn test_submit_after_shutdown_is_closed() {
        let mut handle = spawn(engine(60_000), simulator(), UpdateEmitter::default());
        handle.task.abort();
        let _ = (&mut handle.task).await;

        let result = handle
            .submit(Event::new("user_A", ActivityKind::FileDownload))
            .await;
        assert!(matches!(result, Err(EngineError::RunnerClosed)));
    }

    #[tokio::test]
    async fn test_stopped_runner_does_not_simulate() {
        let handle = spawn(engine(5), simulator(), UpdateEmitter::default());
        tokio::time::sleep(Duration::from_millis(60)).await;

        let engine = handle.shutdown().await.unwrap();
        assert_eq!(engine.total_activities(), 0);
    }

    #[tokio::test]
    async fn test_started_runner_simulates() {
        let handle = spawn(engine(5), simulator(), UpdateEmitter::default());
        handle.start();
        assert!(handle.is_running());
        tokio::time::sleep(Duration::from_millis(60)).await;

        let engine = handle.shutdown().await.unwrap();
        assert!(engine.total_activities() > 0);
        // constant picks: always user_A with a normal activity
        assert!(engine
            .activity_log()
            .entries()
            .all(|e| e.user_id == "user_A" && e.risk_delta == 0));
    }

    #[tokio::test]
    async fn test_pause_and_reset() {
        let handle = spawn(engine(60_000), simulator(), UpdateEmitter::default());
        assert!(!handle.toggle_pause());

        handle.start();
        assert!(!handle.toggle_pause());
        assert!(handle.is_paused());
        assert!(handle.toggle_pause());

        let mut updates = handle.subscribe();
        handle
            .submit(Event::new("user_A", ActivityKind::FileDownload))
            .await
            .unwrap();
        handle.reset().await.unwrap();

        let update = loop {
            let update = updates.recv().await.unwrap();
            if update.kind == UpdateKind::Reset {
                break update;
            }
        };
        assert_eq!(update.stats.total_activities, 0);
        assert!(update.users.iter().all(|u| u.score == 0));
        handle.shutdown().await.unwrap();
    }
}
