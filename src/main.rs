use anyhow::Result;
use clap::Parser;
use winit::event_loop::EventLoop;

use freedom_within::app::App;
use freedom_within::cli::Cli;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let event_loop = EventLoop::new()?;
    let mut app = App::new(cli);

    log::info!("Freedom Within - Controls: drag to orbit, right-drag to pan, scroll to zoom, Escape to quit");
    event_loop.run_app(&mut app)?;

    Ok(())
}
