use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tokio::time::{interval, MissedTickBehavior};

use cropsim::config::Config;
use cropsim::fleet;
use cropsim::signal::SignalGenerator;
use cropsim::transport::{HttpCollector, TransportDriver};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let config = Config::parse();
    config.validate()?;
    run(config).await
}

async fn run(config: Config) -> Result<()> {
    let mut rng = match config.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };

    let mut nodes = match &config.fleet {
        Some(path) => fleet::from_file(path, &mut rng)?,
        None => fleet::build(config.sensors, &mut rng),
    };
    let mut generator = SignalGenerator::new(rng);
    let driver = TransportDriver::new(HttpCollector::new(&config.collector_url));

    println!("Starting simulation with {} sensors", nodes.len());
    println!("Collector: {}", config.collector_url);
    println!("Update interval: {}s", config.interval);
    println!("{}", "-".repeat(50));

    // Stagger the initial registrations so the collector sees them arrive in
    // fleet order.
    for node in nodes.iter_mut() {
        driver.register(node).await;
        tokio::time::sleep(Duration::from_millis(100)).await;
    }

    println!("{}", "-".repeat(50));
    println!("Sending readings... (Ctrl+C to stop)");
    println!("{}", "-".repeat(50));

    let mut ticker = interval(Duration::from_secs_f64(config.interval));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut completed = 0u64;

    // One pinned future so an interrupt arriving mid-tick is still seen at
    // the next loop turn.
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                println!();
                println!("Simulation stopped");
                break;
            }
            _ = ticker.tick() => {
                driver.run_tick(&mut generator, &mut nodes).await;
                completed += 1;
                if config.rounds.is_some_and(|rounds| completed >= rounds) {
                    println!("Completed {completed} rounds");
                    break;
                }
            }
        }
    }

    Ok(())
}
