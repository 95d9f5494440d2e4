//! Swap terminal binary: reads line commands from stdin and prints a JSON snapshot of the
//! swap form after every change.

use std::sync::Arc;

use swap_terminal::core::service::InMemoryAssetStore;
use swap_terminal::driver::Command;
use swap_terminal::{debug, SwapController};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

fn print_snapshot(controller: &SwapController) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string(&controller.snapshot())?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    debug::init();

    lib_core::config::init_config()?;
    let config = lib_core::config::core_config()?;
    info!(
        quote_api = %config.quote_api_url,
        price_api = %config.price_api_url,
        currency = %config.native_currency,
        "Swap terminal starting"
    );

    let store = Arc::new(InMemoryAssetStore::default());
    let mut controller = SwapController::from_config(config, store.clone())?;
    let events = controller.event_rx.clone();
    print_snapshot(&controller)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                match Command::parse(&line) {
                    Ok(Command::Quit) => break,
                    Ok(command) => {
                        command.execute(&mut controller, &store);
                        print_snapshot(&controller)?;
                    }
                    Err(e) => {
                        warn!(error = %e, "Rejected command");
                        eprintln!("{}", e);
                    }
                }
            }
            Ok(event) = events.recv() => {
                controller.handle_event(event);
                controller.process_events();
                print_snapshot(&controller)?;
            }
        }
    }

    info!("Swap terminal stopped");
    Ok(())
}
