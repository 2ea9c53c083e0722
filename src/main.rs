use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgAction, Parser};
use mapselect::Config;
use mapselect::replay::{self, Gesture};

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("MAPSELECT_GIT_HASH"),
    ", ",
    env!("MAPSELECT_BUILD_PROFILE"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "mapselect")]
#[command(
    version,
    long_version = LONG_VERSION,
    about = "Draw a rectangular area on a map and view its corner coordinates"
)]
struct Cli {
    /// Completed rectangle drag, as LAT1,LNG1,LAT2,LNG2 (repeatable, replayed in order)
    #[arg(
        long = "rect",
        value_name = "LAT1,LNG1,LAT2,LNG2",
        allow_hyphen_values = true
    )]
    rects: Vec<Gesture>,

    /// Print the selected coordinates as JSON instead of the dialog text
    #[arg(long, action = ArgAction::SetTrue)]
    json: bool,

    /// Read configuration from PATH instead of ~/.config/mapselect/config.toml
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Write the documented default config file and exit
    #[arg(long, action = ArgAction::SetTrue, conflicts_with_all = ["rects", "json"])]
    init_config: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    if cli.init_config {
        let path = match &cli.config {
            Some(path) => {
                Config::create_default_file_at(path)?;
                path.clone()
            }
            None => Config::create_default_file()?,
        };
        println!("Wrote default config to {}", path.display());
        return Ok(());
    }

    if cli.rects.is_empty() {
        println!("mapselect: Draw a rectangular area on a map and view its corner coordinates");
        println!();
        println!("Usage:");
        println!("  mapselect --rect LAT1,LNG1,LAT2,LNG2 [--rect ...]   Replay rectangle drags");
        println!("  mapselect --rect ... --json                          Print coordinates as JSON");
        println!("  mapselect --init-config                              Write default config");
        println!("  mapselect --help                                     Show help");
        println!();
        println!("Each --rect is one completed drag; only the last valid rectangle is kept.");
        return Ok(());
    }

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    log::info!("Replaying {} rectangle drag(s)", cli.rects.len());
    let presenter = replay::replay(&config, &cli.rects)?;

    if cli.json {
        let json = serde_json::to_string(&presenter.coords())
            .context("Failed to serialize coordinates")?;
        println!("{json}");
    } else {
        println!("{}", presenter.render());
    }

    Ok(())
}
