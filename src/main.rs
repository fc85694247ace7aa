mod app;
mod config;
mod debug;
mod ecs;
mod game;
mod input;
mod inventory;
mod obstacle;
mod player;
mod present;
mod resource;
mod spatial;
mod terrain;


fn main() {
    env_logger::init();
    log::info!("IslandForage starting up");

    if let Err(e) = app::run() {
        log::error!("Fatal error: {e}");
        std::process::exit(1);
    }
}
