use log::{info, LevelFilter};
use std::error::Error;
use tapfall::app::App;
use winit::event_loop::EventLoop;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_default_env()
        .filter_level(LevelFilter::Info)
        .filter_module("tapfall::game", LevelFilter::Debug)
        .init();

    info!("Application starting...");

    let event_loop = EventLoop::new()?;
    let mut app = App::new();
    if let Err(e) = event_loop.run_app(&mut app) {
        log::error!("Application exited with error: {}", e);
        return Err(Box::new(e));
    }

    info!("Application exited gracefully.");
    Ok(())
}
