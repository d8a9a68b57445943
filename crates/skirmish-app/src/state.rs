//! Application state shared between the console and the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};

use skirmish_core::commands::PlayerCommand;
use skirmish_core::state::WorldSnapshot;
use skirmish_sim::engine::SimConfig;

use crate::game_loop;

/// Commands sent from the console to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A player command to forward to the simulation engine.
    PlayerCommand(PlayerCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Handle to a (possibly running) game loop.
///
/// `mpsc::Sender` is not Sync, so it lives behind a `Mutex`. The latest
/// snapshot is shared with the loop thread.
pub struct AppState {
    /// `None` until `start` succeeds.
    pub command_tx: Mutex<Option<mpsc::Sender<GameLoopCommand>>>,
    /// Updated by the game loop thread after each tick.
    pub latest_snapshot: Arc<Mutex<Option<WorldSnapshot>>>,
    pub running: Mutex<bool>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            command_tx: Mutex::new(None),
            latest_snapshot: Arc::new(Mutex::new(None)),
            running: Mutex::new(false),
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn the game loop if it is not already running.
    pub fn start(&self, config: SimConfig) -> Result<(), String> {
        let mut running = self.running.lock().map_err(|e| e.to_string())?;
        if *running {
            return Err("Simulation already running".into());
        }

        let cmd_tx = game_loop::spawn_game_loop(config, self.latest_snapshot.clone())
            .map_err(|e| format!("Failed to spawn game loop: {e}"))?;

        let mut tx_lock = self.command_tx.lock().map_err(|e| e.to_string())?;
        *tx_lock = Some(cmd_tx);
        *running = true;
        Ok(())
    }

    /// Forward a player command to the simulation.
    pub fn send_command(&self, command: PlayerCommand) -> Result<(), String> {
        let tx_lock = self.command_tx.lock().map_err(|e| e.to_string())?;
        match tx_lock.as_ref() {
            Some(tx) => tx
                .send(GameLoopCommand::PlayerCommand(command))
                .map_err(|e| format!("Failed to send command: {e}")),
            None => Err("Simulation not started".into()),
        }
    }

    /// The latest snapshot, if the loop has ticked at least once.
    pub fn snapshot(&self) -> Result<Option<WorldSnapshot>, String> {
        let lock = self.latest_snapshot.lock().map_err(|e| e.to_string())?;
        Ok(lock.clone())
    }

    /// Ask the loop to stop. A no-op when it was never started.
    pub fn shutdown(&self) -> Result<(), String> {
        let mut tx_lock = self.command_tx.lock().map_err(|e| e.to_string())?;
        if let Some(tx) = tx_lock.take() {
            let _ = tx.send(GameLoopCommand::Shutdown);
        }
        *self.running.lock().map_err(|e| e.to_string())? = false;
        Ok(())
    }
}
