//! Basalt Player - run the fixed physics-prop scene
//!
//! Usage:
//!   basalt-player [--fullscreen]

use anyhow::{Context, Result};
use basalt_player::{build_scene, PlayerApp};
use clap::Parser;
use winit::event_loop::{ControlFlow, EventLoop};

#[derive(Parser)]
#[command(name = "basalt-player")]
#[command(about = "Basalt scene player - a floor, a camera, and stacks of physics props")]
struct Args {
    /// Launch in fullscreen mode
    #[arg(long)]
    fullscreen: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let (world, physics, physics_sync, handles) =
        build_scene().context("Failed to build scene")?;

    println!("Entities: {}", world.entity_count());
    println!();
    println!("Controls:");
    println!("  WASD        - Move");
    println!("  Mouse       - Look");
    println!("  Space/Shift - Rise / descend");
    println!("  Up/Down     - Push / spin the props");
    println!("  Escape      - Exit");
    println!("  Pad sticks  - Move and look");
    println!("  LB/LT       - Push / spin the props (with rumble)");

    let event_loop = EventLoop::new().context("Failed to create event loop")?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = PlayerApp::new(world, physics, physics_sync, handles, args.fullscreen);
    event_loop
        .run_app(&mut app)
        .context("Event loop terminated abnormally")?;

    Ok(())
}
