mod config_gen;
mod setup;
mod terminal;

use std::env;

use anyhow::Context;
use lantern_core::config::CoreConfig;
use lantern_core::port::driver::Driver;
use lantern_core::{CachedSource, PlaybackController, SheetSource};
use lantern_sheet::SceneRef;

use crate::terminal::{TerminalInput, TerminalPort};

#[derive(Debug, Default)]
struct Args {
    scene: Option<SceneRef>,
    refresh: bool,
    list: bool,
}

fn parse_args() -> anyhow::Result<Args> {
    let mut args = Args::default();
    let mut it = env::args().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--scene" => {
                let value = it.next().context("--scene needs a value like 2 or 2.1")?;
                args.scene = Some(value.parse()?);
            }
            "--refresh" => args.refresh = true,
            "--list" => args.list = true,
            other => anyhow::bail!("unknown argument '{}'", other),
        }
    }
    Ok(args)
}

fn main() -> anyhow::Result<()> {
    let args = parse_args()?;
    setup::init("config.toml");
    log::info!(">>> Lantern Desktop Launcher Started <<<");

    let cfg = CoreConfig::load();
    log::info!("Loading script from config: {}", cfg.system.script_path);

    let source = CachedSource::new(SheetSource::new(&cfg.system.script_path), &cfg.system.cache_path);
    let mut controller = PlaybackController::new(TerminalPort, Box::new(source));

    if args.refresh {
        controller.refresh()?;
    }
    let store = controller.load()?;

    if args.list {
        for scene in store.scenes() {
            println!("scene {}: branches {:?}", scene, store.branches(scene));
        }
        return Ok(());
    }

    let start = args
        .scene
        .unwrap_or_else(|| SceneRef::new(cfg.playback.start_scene, cfg.playback.start_branch));
    let mut driver = Driver::new(controller, TerminalInput::new(cfg.playback.auto_advance));
    let state = driver.run(start.scene, start.branch)?;
    log::info!("Playback ended: {:?}", state);
    Ok(())
}
