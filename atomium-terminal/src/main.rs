/// Atomium Terminal Demo - animated lattice in the terminal
///
/// Usage: atomium-terminal [landmark|lattice|spin|pointer]
/// Controls:
///   - Mouse drag: Orbit the camera
///   - Mouse wheel: Zoom (when the preset allows it)
///   - Space: Pause / resume the animation
///   - Q/ESC: Quit
///
/// Set `ATOMIUM_LOG=<file>` to write logs; `RUST_LOG` filters them.

use atomium_core::{AtomiumConfig, Tessellation};
use atomium_terminal::TerminalApp;
use std::env;
use std::fs::File;
use std::io;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

fn init_logging() -> io::Result<()> {
    // stderr would draw over the alternate screen
    let Ok(path) = env::var("ATOMIUM_LOG") else {
        return Ok(());
    };
    let file = File::create(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> io::Result<()> {
    init_logging()?;

    let args: Vec<String> = env::args().collect();
    let preset = args.get(1).map(String::as_str).unwrap_or("lattice");

    let Some(mut config) = AtomiumConfig::preset(preset) else {
        eprintln!("Usage: {} [landmark|lattice|spin|pointer]", args[0]);
        eprintln!("\nUnknown preset: {}", preset);
        std::process::exit(2);
    };
    config.tessellation = Tessellation::coarse();

    println!("Atomium Terminal Renderer - building '{}'...", preset);
    tracing::info!(preset, "starting terminal renderer");

    // Run the terminal app
    let mut app = TerminalApp::new(config)?;
    app.run()?;

    println!("Thank you for using the Atomium Terminal Renderer!");
    Ok(())
}
