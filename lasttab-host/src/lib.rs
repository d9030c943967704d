use crate::prelude::*;

use lasttab_api::{
    config::{host_log, Config},
    log::effective_level,
};
use lifeline::dyn_bus::DynBus;
use message::main::{MainShutdown, ShortcutBinding};
use service::main::MainService;
use simplelog::{ColorChoice, CombinedLogger, TermLogger, TerminalMode, WriteLogger};
use std::{path::PathBuf, time::Duration};
use tokio::{select, signal::ctrl_c, time};

mod bus;
mod message;
mod prelude;
mod service;
mod state;

/// Runs the native messaging host until the browser closes the port.
///
/// Shortcut changes from the extension are saved to `config_path`.
pub fn host_main(config: Config, config_path: PathBuf) -> anyhow::Result<()> {
    init()?;

    info!("lasttab host starting");
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_io()
        .enable_time()
        .build()?;

    let result = runtime.block_on(async { main_async(config, config_path).await });

    runtime.shutdown_timeout(Duration::from_millis(25));
    info!("lasttab host stopped");

    result
}

fn init() -> anyhow::Result<()> {
    let log_file = host_log()?;

    let config = simplelog::ConfigBuilder::new()
        .set_time_format_str("%H:%M:%S%.3f HST")
        .build();

    // stdout carries the native messaging protocol
    let level = effective_level();
    CombinedLogger::init(vec![
        TermLogger::new(level, config.clone(), TerminalMode::Stderr, ColorChoice::Never),
        WriteLogger::new(level, config, std::fs::File::create(log_file)?),
    ])?;

    log_panics::init();

    Ok(())
}

async fn main_async(config: Config, config_path: PathBuf) -> anyhow::Result<()> {
    let (rx, _service) = spawn(config, config_path)?;
    wait_for_shutdown(rx).await;

    Ok(())
}

fn spawn(
    config: Config,
    config_path: PathBuf,
) -> anyhow::Result<(impl Stream<Item = MainShutdown> + Unpin, MainService)> {
    let bus = MainBus::default();
    bus.capacity::<HostEvent>(128)?;
    bus.capacity::<HostRequest>(128)?;

    bus.store_resource(ShortcutBinding {
        shortcut: config.shortcut(),
        command: config.command,
        config_path,
    });

    let rx_shutdown = bus.rx::<MainShutdown>()?;
    let service = MainService::spawn(&bus)?;

    Ok((rx_shutdown, service))
}

/// Waits for either a ctrl-c signal, or a shutdown message.
async fn wait_for_shutdown(mut receiver: impl Stream<Item = MainShutdown> + Unpin) {
    debug!("Waiting for termination");

    select! {
        _ = ctrl_c() => {},
        _ = receiver.recv() => {
            // let the final requests reach stdout
            time::sleep(Duration::from_millis(20)).await;
        }
    }

    debug!("Complete.  Shutting down");
}
