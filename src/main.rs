// Copyright (c) 2026 voltctl contributors
// SPDX-License-Identifier: Apache-2.0

mod cli;
mod client;
mod commands;
pub mod config;
mod fields;
mod filter;
mod format;
mod order;

use std::time::Duration;

use anyhow::Result;
use clap::Parser;

use cli::{Args, Command, EventCommand};
use client::ControllerClient;
use config::Config;

/// Initialize logging to stderr; -v raises the default level to debug.
fn init_logging(verbose: bool) {
    let default_filter = if verbose { "voltctl=debug" } else { "voltctl=warn" };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = run(&args).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(args: &Args) -> Result<()> {
    let mut config = Config::load()?;

    match &args.command {
        // Local commands need no controller connection
        Command::Stack(command) => commands::stack::run(&mut config, command),
        Command::Version(flags) => commands::version::run(flags),

        Command::Device(command) => {
            let client = connect(args, &config)?;
            commands::device::run(&client, command).await
        }
        Command::LogicalDevice(command) => {
            let client = connect(args, &config)?;
            commands::logical_device::run(&client, command).await
        }
        Command::Adapter(command) => {
            let client = connect(args, &config)?;
            commands::adapter::run(&client, command).await
        }
        Command::Event(EventCommand::Listen(flags)) => {
            let client = connect(args, &config)?;
            commands::event::listen(&client, flags).await
        }
    }
}

fn connect(args: &Args, config: &Config) -> Result<ControllerClient> {
    let server = config.resolve_server(args.server.as_deref(), args.stack.as_deref())?;
    ControllerClient::new(&server, Duration::from_secs(args.timeout))
}
