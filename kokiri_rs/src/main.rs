//! Demo application driving a world of the kokiri ECS

use std::cell::Cell;
use std::error::Error;
use std::rc::Rc;

use config::Config;

mod config;
mod demo;
mod logger;

/// Entry point of `kokiri_rs` demo
fn main() -> Result<(), Box<dyn Error + Send + Sync + 'static>> {
    let config = Config::from_env()?;
    let _handle = logger::init(config.log_level())?;
    log::info!("logger initialized successfully");
    log::info!(
        "{} v{} runs {} rounds",
        config.name(),
        config.version(),
        config.rounds(),
    );

    let round = Rc::new(Cell::new(0));
    let mut world = demo::world(Rc::clone(&round))?;
    for _ in 0..config.rounds() {
        round.set(round.get() + 1);
        let reached = world.run_round().map_err(|error| {
            log::error!("round {} failed: {}", round.get(), error);
            error
        })?;
        log::info!(
            "round {} complete: {} schedulers reached, {} entities left",
            round.get(),
            reached,
            world.table().len(),
        );
    }
    Ok(())
}
