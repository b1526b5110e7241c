// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use anyhow::{bail, Context, Result};
use std::env;
use std::sync::Arc;
use the_tubeline::component::Component;
use the_tubeline::config::{load_and_validate_config, MachineBuilder};
use the_tubeline::environment::Environment;
use the_tubeline::machine::Machine;
use the_tubeline::observability::TracingSink;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() != 2 {
        eprintln!("Usage: {} <machine.yaml>", args[0]);
        eprintln!("Example: {} configs/ingest-pipeline.yaml", args[0]);
        bail!("expected exactly one machine file");
    }
    let config_file = &args[1];

    let environment = Arc::new(Environment::detect());
    let config = load_and_validate_config(config_file)
        .with_context(|| format!("loading {}", config_file))?;
    let mut machine =
        MachineBuilder::from_config(&config, environment.clone(), Arc::new(TracingSink::new()))
            .with_context(|| format!("building machine '{}'", config.machine_id))?;

    println!("Machine {} on {}", machine.id(), environment);
    println!("env_hash: {}", environment.environment_hash());
    print_machine(&machine);

    machine.shutdown();
    println!();
    println!("Final status: {}", machine.status());
    for event in machine.event_log() {
        println!("  {}", event);
    }
    Ok(())
}

fn print_machine(machine: &Machine) {
    for (name, composite) in machine.composites() {
        println!();
        println!("Composite {}", name);
        for (member, component) in composite.components() {
            print_component(member, component);
        }
        if let Some(targets) = machine.connections().get(name) {
            println!("  feeds: {}", targets.join(", "));
        }
    }
}

fn print_component(member: &str, component: &Component) {
    println!(
        "  {} [{}] {} lineage={}",
        member,
        component.id().short(),
        component.status(),
        component.lineage().join(" > ")
    );
    for (peer_id, peer_reason) in component.connected_components() {
        println!("    -> {} ({})", peer_id.short(), peer_reason);
    }
}
