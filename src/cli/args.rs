// Copyright (c) 2026 voltctl contributors
// SPDX-License-Identifier: Apache-2.0

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "voltctl")]
#[command(author, version, about = "Operate a VOLTHA-style access-network controller")]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Controller northbound endpoint (overrides the current stack)
    #[arg(short, long)]
    pub server: Option<String>,

    /// Named stack to use for this invocation
    #[arg(long)]
    pub stack: Option<String>,

    /// Request timeout in seconds
    #[arg(short, long, default_value_t = 5)]
    pub timeout: u64,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Device commands
    #[command(subcommand)]
    Device(DeviceCommand),

    /// Logical device commands
    #[command(subcommand, name = "logicaldevice")]
    LogicalDevice(LogicalDeviceCommand),

    /// Adapter commands
    #[command(subcommand)]
    Adapter(AdapterCommand),

    /// Controller event commands
    #[command(subcommand)]
    Event(EventCommand),

    /// Manage named stacks in the local configuration
    #[command(subcommand)]
    Stack(StackCommand),

    /// Show client version information
    Version(ListFlags),
}

/// The uniform flag contract: every list-style subcommand carries exactly
/// these flags, with identical grammar.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct ListFlags {
    /// Only show results matching the filter expression,
    /// e.g. 'adminState=ENABLED,serialNumber~^ALPHA'
    #[arg(short, long)]
    pub filter: Option<String>,

    /// Sort results by the comma-separated field spec,
    /// e.g. '+type,-serialNumber'
    #[arg(short = 'r', long, allow_hyphen_values = true)]
    pub orderby: Option<String>,

    /// Render output with the given format template
    #[arg(long)]
    pub format: Option<String>,

    /// Output encoding
    #[arg(short, long, value_enum, default_value = "table")]
    pub outputas: OutputFormat,

    /// Omit column headers in table output
    #[arg(long)]
    pub no_headers: bool,
}

#[derive(ValueEnum, Clone, Debug, Default, PartialEq)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Yaml,
}

#[derive(Subcommand, Debug)]
pub enum DeviceCommand {
    /// List all devices known to the controller
    List(ListFlags),

    /// Get a single device
    Get {
        id: String,

        #[command(flatten)]
        flags: ListFlags,
    },

    /// Enable one or more devices
    Enable { ids: Vec<String> },

    /// Disable one or more devices
    Disable { ids: Vec<String> },

    /// Delete one or more devices
    Delete { ids: Vec<String> },

    /// Reboot one or more devices
    Reboot { ids: Vec<String> },
}

#[derive(Subcommand, Debug)]
pub enum LogicalDeviceCommand {
    /// List all logical devices
    List(ListFlags),
}

#[derive(Subcommand, Debug)]
pub enum AdapterCommand {
    /// List all registered adapters
    List(ListFlags),
}

#[derive(Subcommand, Debug)]
pub enum EventCommand {
    /// Stream controller events to stdout
    Listen(EventListenFlags),
}

#[derive(clap::Args, Debug, Clone, Default)]
pub struct EventListenFlags {
    #[command(flatten)]
    pub list: ListFlags,

    /// Stop after this many events
    #[arg(short, long)]
    pub count: Option<usize>,

    /// Stop after this many seconds without a new event (0 = wait forever)
    #[arg(long, default_value_t = 0)]
    pub idle: u64,
}

#[derive(Subcommand, Debug)]
pub enum StackCommand {
    /// List configured stacks
    List(ListFlags),

    /// Add or update a named stack
    Add {
        name: String,

        /// Controller northbound endpoint
        #[arg(long)]
        server: String,

        /// Kafka bootstrap endpoint
        #[arg(long, default_value = "")]
        kafka: String,

        /// KV store endpoint
        #[arg(long, default_value = "")]
        kv_store: String,
    },

    /// Delete a named stack
    Delete { name: String },

    /// Select the stack used by default
    Use { name: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_args_are_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_list_flags_on_device_list() {
        let args = Args::parse_from([
            "voltctl",
            "device",
            "list",
            "--filter",
            "adminState=ENABLED",
            "-r",
            "-serialNumber",
            "-o",
            "json",
        ]);
        match args.command {
            Command::Device(DeviceCommand::List(flags)) => {
                assert_eq!(flags.filter.as_deref(), Some("adminState=ENABLED"));
                assert_eq!(flags.orderby.as_deref(), Some("-serialNumber"));
                assert_eq!(flags.outputas, OutputFormat::Json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_stack_add() {
        let args = Args::parse_from([
            "voltctl",
            "stack",
            "add",
            "prod",
            "--server",
            "http://prod:8181",
        ]);
        match args.command {
            Command::Stack(StackCommand::Add { name, server, kafka, .. }) => {
                assert_eq!(name, "prod");
                assert_eq!(server, "http://prod:8181");
                assert!(kafka.is_empty());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
