use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use gravity_assist::engine::{debug::set_debug_text, App};
use gravity_assist::orbit::{GravityAssist, SimConfig};

/// Launch spacecraft past a planet and watch them slingshot.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Directory holding background.jpg, jupiter.png and spaceship.png.
    /// Missing files are drawn as plain shapes instead.
    #[arg(long, default_value = ".")]
    assets: PathBuf,

    /// Print debug messages to the console
    #[arg(long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    set_debug_text(args.debug || cfg!(debug_assertions));

    let config = SimConfig::default().with_assets_dir(args.assets);
    App::new(GravityAssist::new(config)).run();
    Ok(())
}
