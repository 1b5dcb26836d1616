//! UWB Pong entry point
//!
//! In the browser this starts the live session. Natively it replays a
//! recorded message capture headlessly and prints what happened.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    uwb_pong::platform::web::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use std::path::Path;

    use anyhow::Context;
    use uwb_pong::platform::replay::{self, ReplayOptions};
    use uwb_pong::renderer::RecordingSurface;
    use uwb_pong::{Config, Game, SilentCue};

    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let Some(capture_path) = capture_path(&args) else {
        eprintln!("Usage: uwb-pong <capture-file> [options]");
        eprintln!();
        eprintln!("Options:");
        eprintln!("  --config <path>      JSON config (default: built-in)");
        eprintln!("  --seed <n>           Launch RNG seed (default: 0)");
        eprintln!("  --width <px>         Court width (default: 800)");
        eprintln!("  --height <px>        Court height (default: 600)");
        eprintln!("  --linger-ms <ms>     Keep playing after the last message (default: 0)");
        std::process::exit(1);
    };

    let config = match find_arg(&args, "--config") {
        Some(path) => Config::load_file(Path::new(&path))?,
        None => Config::default(),
    };
    let seed: u64 = parse_arg(&args, "--seed")?.unwrap_or(0);
    let width: f32 = parse_arg(&args, "--width")?.unwrap_or(800.0);
    let height: f32 = parse_arg(&args, "--height")?.unwrap_or(600.0);
    let linger_ms: f64 = parse_arg(&args, "--linger-ms")?.unwrap_or(0.0);

    let text = std::fs::read_to_string(capture_path)
        .with_context(|| format!("reading capture {}", capture_path))?;
    let capture = replay::parse_capture(&text);
    log::info!("Loaded {} messages from {}", capture.len(), capture_path);

    let mut game = Game::new(config, seed, width, height);
    let mut surface = RecordingSurface::new(width, height);
    let options = ReplayOptions {
        linger_ms,
        ..ReplayOptions::default()
    };
    let summary = replay::run(&mut game, &capture, options, &mut surface, &SilentCue);

    println!("UWB Pong replay ({}x{}, seed {})", width, height, seed);
    println!(
        "  {} frames over {:.1} s",
        summary.frames,
        summary.duration_ms / 1000.0
    );
    println!(
        "  {} messages applied, {} dropped",
        summary.delivered, summary.dropped
    );
    println!("  {} paddle hits", summary.paddle_hits);
    for (t_ms, side) in &summary.points {
        println!("  {:>9.0} ms  point {:?}", t_ms, side);
    }
    println!("  final score {} - {}", summary.score.left, summary.score.right);

    Ok(())
}

/// First argument, unless it is missing or a flag
#[cfg(not(target_arch = "wasm32"))]
fn capture_path(args: &[String]) -> Option<&str> {
    args.get(1)
        .map(String::as_str)
        .filter(|path| !path.starts_with("--"))
}

#[cfg(not(target_arch = "wasm32"))]
fn find_arg(args: &[String], flag: &str) -> Option<String> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1).cloned())
}

#[cfg(not(target_arch = "wasm32"))]
fn parse_arg<T>(args: &[String], flag: &str) -> anyhow::Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    use anyhow::Context;

    find_arg(args, flag)
        .map(|value| {
            value
                .parse()
                .with_context(|| format!("invalid value {:?} for {}", value, flag))
        })
        .transpose()
}
