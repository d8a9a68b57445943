//! `skirmish [config.json]`: run the simulation and drive it from stdin.

use std::io::{self, BufRead};
use std::process::ExitCode;

use skirmish_app::console::{self, ConsoleInput};
use skirmish_app::state::AppState;
use skirmish_core::state::WorldSnapshot;
use skirmish_sim::engine::SimConfig;

fn load_config() -> Result<SimConfig, String> {
    let Some(path) = std::env::args().nth(1) else {
        return Ok(SimConfig::default());
    };
    let json = std::fs::read_to_string(&path).map_err(|e| format!("{path}: {e}"))?;
    let config = SimConfig::from_json(&json).map_err(|e| format!("{path}: {e}"))?;
    log::info!("loaded config from {path}");
    Ok(config)
}

fn print_status(snapshot: &WorldSnapshot) {
    println!(
        "t={:.2}s tick={} scale={}{}",
        snapshot.time.elapsed_secs,
        snapshot.time.tick,
        snapshot.time_scale,
        if snapshot.paused { " PAUSED" } else { "" }
    );
    for o in &snapshot.objects {
        println!(
            "  #{:<3} {:?} {:?} pos=({:.0}, {:.0}) vel=({:.1}, {:.1}) hdg={:.1}° {:?}",
            o.id,
            o.faction,
            o.kind,
            o.position.x,
            o.position.y,
            o.velocity.x,
            o.velocity.y,
            o.bearing.to_degrees(),
            o.rotation
        );
    }
    for t in &snapshot.tracks {
        println!(
            "  track {} {:?} current={} life={}",
            t.object_id, t.perceived_faction, t.is_current, t.lifetime
        );
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match load_config() {
        Ok(c) => c,
        Err(e) => {
            log::error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let state = AppState::new();
    if let Err(e) = state.start(config) {
        log::error!("{e}");
        return ExitCode::FAILURE;
    }

    for line in io::stdin().lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                log::error!("stdin: {e}");
                break;
            }
        };
        let result = match console::parse_line(&line) {
            Ok(Some(ConsoleInput::Command(command))) => state.send_command(command),
            Ok(Some(ConsoleInput::Status)) => state.snapshot().map(|snap| match snap {
                Some(s) => print_status(&s),
                None => println!("no snapshot yet"),
            }),
            Ok(Some(ConsoleInput::Quit)) => break,
            Ok(None) => Ok(()),
            Err(e) => Err(e),
        };
        if let Err(e) = result {
            log::warn!("{e}");
        }
    }

    if let Err(e) = state.shutdown() {
        log::error!("{e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
