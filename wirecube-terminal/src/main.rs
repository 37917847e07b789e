/// wirecube - drag the mouse to spin a wireframe cube in the terminal
///
/// Controls:
///   - Left mouse drag: Rotate the cube
///   - Arrow Keys: Nudge the rotation
///   - R: Reset rotation
///   - Q/ESC: Quit
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use log::info;
use wirecube_terminal::{Settings, TerminalApp};

#[derive(Parser, Debug)]
#[command(name = "wirecube")]
#[command(about = "Rotating wireframe cube in the terminal, driven by mouse drag")]
struct Args {
    /// Settings file with `key = value` lines
    #[arg(long)]
    config: Option<PathBuf>,

    /// Radians of rotation per pixel of drag (overrides the settings file)
    #[arg(long)]
    sensitivity: Option<f32>,

    /// Target frames per second (overrides the settings file)
    #[arg(long)]
    fps: Option<u32>,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let mut settings = match &args.config {
        Some(path) => Settings::load(path)
            .with_context(|| format!("could not load settings from {}", path.display()))?,
        None => Settings::default(),
    };
    if let Some(sensitivity) = args.sensitivity {
        settings.sensitivity = sensitivity;
    }
    if let Some(fps) = args.fps {
        settings.fps = fps;
    }
    settings.validate().context("invalid command line settings")?;
    info!("settings: {:?}", settings);

    let mut app = TerminalApp::new(settings).context("could not query terminal size")?;
    app.run().context("terminal renderer failed")?;

    Ok(())
}
