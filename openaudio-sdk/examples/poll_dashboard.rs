//! Text dashboard that polls an OpenAudio amplifier
//!
//! Connects, starts the background poller and prints every zone, input and
//! amplifier after each cycle.
//!
//! Run with: cargo run -p openaudio-sdk --example poll_dashboard -- 192.168.1.50
//!
//! Without a host argument the saved hub config is used. Set
//! `OPENAUDIO_LOG_LEVEL=debug` to see each poll step.

use std::time::Duration;

use openaudio_sdk::{HubConfig, OpenAudioSystem, SdkError};
use openaudio_state::logging::init_logging_from_env;

const CYCLES: u64 = 5;

fn main() -> Result<(), SdkError> {
    if let Err(e) = init_logging_from_env() {
        eprintln!("Logging disabled: {}", e);
    }

    let config = match std::env::args().nth(1) {
        Some(host) => HubConfig::new(host).with_scan_interval(Duration::from_secs(10)),
        None => HubConfig::load_default()?,
    };

    println!("OpenAudio dashboard");
    println!("===================");
    println!("Connecting to {}...", config.address());

    let system = OpenAudioSystem::connect(config)?;
    if let Some(server) = system.server_device_id() {
        println!("Server device: {}", server);
    }

    let poller = system.start_polling();
    let wait = system.config().scan_interval + system.config().cycle_timeout;

    for cycle in 1..=CYCLES {
        if !poller.wait_for_cycles(cycle, wait) {
            println!("No poll finished within {:?}, giving up", wait);
            break;
        }

        let status = poller.status();
        println!("\n--- cycle {} ({} failed so far) ---", status.cycles, status.failures);
        if let Some(error) = &status.last_error {
            println!("Last poll failed: {}", error);
            println!("Showing last known state");
        }
        print_topology(&system)?;
    }

    poller.shutdown();
    system.close();
    Ok(())
}

fn print_topology(system: &OpenAudioSystem) -> Result<(), SdkError> {
    for amp in system.amplifiers() {
        let view = amp.view()?;
        println!(
            "{} by {} (serial {}, firmware {})",
            view.name,
            view.manufacturer,
            view.serial_number,
            view.firmware_version.as_deref().unwrap_or("?")
        );
        for diagnostic in &view.diagnostics {
            if let Some(value) = &diagnostic.value {
                let unit = diagnostic.unit.unwrap_or("");
                println!("    {:<16} {}{}", diagnostic.name, value, unit);
            }
        }
    }

    println!("Zones:");
    for zone in system.zones() {
        let view = zone.view()?;
        println!(
            "  {:<24} {:<8} {:>3.0}%  {:<12} {}",
            view.name,
            view.state,
            view.volume * 100.0,
            view.source,
            view.media_title.as_deref().unwrap_or("")
        );
    }

    println!("Inputs:");
    for input in system.inputs() {
        let view = input.view()?;
        println!(
            "  {:<24} {:<8} {:<12} of {}",
            view.name,
            view.state,
            view.source.as_deref().unwrap_or("-"),
            view.source_list.join(", ")
        );
    }
    Ok(())
}
