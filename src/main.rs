//! Signal Breakout entry point
//!
//! Runs the pipeline against the wall clock with a scripted keyboard and
//! prints the text-grid renderer a couple of times per second.

use std::time::Duration;

use signal_breakout::audio::LogAudio;
use signal_breakout::platform::{Clock, InputEvent};
use signal_breakout::renderer::AsciiRenderer;
use signal_breakout::{ConfigError, Game, SimConfig};

/// Optional path to a JSON config
const CONFIG_ENV: &str = "SIGNAL_BREAKOUT_CONFIG";
const DEMO_SECONDS: u64 = 6;
const GRID: (usize, usize) = (48, 16);

fn load_config() -> Result<SimConfig, ConfigError> {
    match std::env::var(CONFIG_ENV) {
        Ok(path) => SimConfig::load(path),
        Err(_) => {
            let config = SimConfig::new(480.0, 320.0);
            config.validate()?;
            Ok(config)
        }
    }
}

fn main() {
    env_logger::init();
    log::info!("Signal Breakout (native) starting...");

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };

    let interval = config.tick_interval_ms;
    let ticks = DEMO_SECONDS * 1000 / interval;
    let print_every = (500 / interval).max(1);
    let (left, right) = (config.left_key, config.right_key);
    let renderer = AsciiRenderer::new(&config, GRID.0, GRID.1);

    let mut game = match Game::new(config, Clock::real(interval), renderer, LogAudio::new()) {
        Ok(game) => game,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };
    println!("{}\n", game.renderer().frame_text());

    // Scripted keyboard on its own thread, like a real event source
    let keyboard = game.input_sender();
    let script = std::thread::spawn(move || {
        std::thread::sleep(Duration::from_millis(750));
        let pattern = [
            InputEvent::KeyDown(left),
            InputEvent::KeyUp(left),
            InputEvent::KeyDown(right),
            InputEvent::KeyUp(right),
        ];
        for event in pattern.iter().cycle() {
            if !keyboard.send(*event) {
                break;
            }
            std::thread::sleep(Duration::from_millis(600));
        }
    });

    for _ in 0..ticks {
        if game.advance().is_some() && game.stats().delivered % print_every == 0 {
            println!("{}\n{}", game.renderer().frame_text(), "-".repeat(GRID.0));
        }
    }

    let stats = game.stats();
    log::info!(
        "Ran {} ticks: {} frames delivered, {} dropped, {} beeps",
        stats.ticks,
        stats.delivered,
        stats.dropped,
        game.audio().played()
    );
    match serde_json::to_string_pretty(game.simulation().state()) {
        Ok(json) => println!("{json}"),
        Err(e) => log::warn!("Could not serialize final state: {}", e),
    }

    drop(game);
    if script.join().is_err() {
        log::warn!("Keyboard script panicked");
    }
}
