// Copyright (c) 2026 voltctl contributors
// SPDX-License-Identifier: Apache-2.0

use anyhow::Result;

use crate::cli::LogicalDeviceCommand;
use crate::client::ControllerClient;

use super::render;

const DEFAULT_FORMAT: &str =
    "table{{.id}}\t{{.datapathId}}\t{{.rootDeviceId}}\t{{.serialNumber}}";

pub async fn run(client: &ControllerClient, command: &LogicalDeviceCommand) -> Result<()> {
    match command {
        LogicalDeviceCommand::List(flags) => {
            let devices = client.list("/api/v1/logical_devices").await?;
            render(flags, DEFAULT_FORMAT, devices)
        }
    }
}
