//! Headless entry point: replays a JSON event script and prints the final state.

mod script;

use std::path::PathBuf;

fn main() {
    env_logger::init();

    let Some(path) = std::env::args_os().nth(1).map(PathBuf::from) else {
        eprintln!("usage: plantingpad <script.json>");
        std::process::exit(2);
    };
    log::info!("Replaying {}", path.display());

    let summary = script::Script::load(&path).and_then(script::replay);
    match summary {
        Ok(summary) => match serde_json::to_string_pretty(&summary) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                log::error!("Failed to serialize summary: {}", e);
                std::process::exit(1);
            }
        },
        Err(e) => {
            log::error!("Replay failed: {}", e);
            std::process::exit(1);
        }
    }
}
