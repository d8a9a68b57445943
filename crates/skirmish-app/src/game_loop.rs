//! Game loop thread: runs the simulation engine at the tick rate and
//! publishes snapshots.
//!
//! The engine is created inside the thread so the loop owns it outright.
//! Commands arrive via `mpsc` channel. Status events are written to the log
//! and the latest snapshot is kept in shared state for polling.

use std::io;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use skirmish_core::state::WorldSnapshot;
use skirmish_sim::engine::{SimConfig, SimulationEngine};

use crate::state::GameLoopCommand;

/// Nominal duration of one tick at 1x speed.
pub fn tick_duration(tick_rate: u32) -> Duration {
    Duration::from_nanos(1_000_000_000 / u64::from(tick_rate.max(1)))
}

/// Spawns the game loop in a new thread and returns its command sender.
pub fn spawn_game_loop(
    config: SimConfig,
    latest_snapshot: Arc<Mutex<Option<WorldSnapshot>>>,
) -> io::Result<mpsc::Sender<GameLoopCommand>> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    std::thread::Builder::new()
        .name("skirmish-game-loop".into())
        .spawn(move || {
            run_game_loop(config, cmd_rx, &latest_snapshot);
        })?;

    Ok(cmd_tx)
}

/// Runs until `Shutdown` arrives or every sender is dropped.
fn run_game_loop(
    config: SimConfig,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<WorldSnapshot>>,
) {
    let mut engine = SimulationEngine::new(config);
    let nominal = tick_duration(engine.tuning().tick_rate);
    let mut next_tick_time = Instant::now();
    log::info!("game loop started ({:?} per tick)", nominal);

    loop {
        // Commands first, so they land on this tick's boundary
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::PlayerCommand(cmd)) => {
                    engine.queue_command(cmd);
                }
                Ok(GameLoopCommand::Shutdown) | Err(mpsc::TryRecvError::Disconnected) => {
                    log::info!("game loop stopped at tick {}", engine.time().tick);
                    return;
                }
                Err(mpsc::TryRecvError::Empty) => break,
            }
        }

        // Paused engines still produce a snapshot
        let snapshot = engine.tick();

        // Status events go to the log
        for event in &snapshot.events {
            log::info!("[{:>8.2}s] {}", snapshot.time.elapsed_secs, event.message());
        }

        // Publish for polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        // Pace to the scaled tick interval; a frozen engine is polled at the nominal rate
        let time_scale = engine.time_scale();
        let effective_tick_duration = if time_scale > 0.001 {
            nominal.div_f64(time_scale)
        } else {
            nominal
        };

        next_tick_time += effective_tick_duration;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > effective_tick_duration * 2 {
            // Too far behind: reset to avoid catch-up spiral
            next_tick_time = now;
        }
    }
}
