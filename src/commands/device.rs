// Copyright (c) 2026 voltctl contributors
// SPDX-License-Identifier: Apache-2.0

use anyhow::Result;

use crate::cli::DeviceCommand;
use crate::client::ControllerClient;

use super::render;

const DEFAULT_FORMAT: &str = "table{{.id}}\t{{.type}}\t{{.root}}\t{{.parentId}}\t{{.serialNumber}}\t{{.adminState}}\t{{.operStatus}}\t{{.connectStatus}}\t{{.reason}}";

pub async fn run(client: &ControllerClient, command: &DeviceCommand) -> Result<()> {
    match command {
        DeviceCommand::List(flags) => {
            let devices = client.list("/api/v1/devices").await?;
            render(flags, DEFAULT_FORMAT, devices)
        }
        DeviceCommand::Get { id, flags } => {
            let device = client.get(&format!("/api/v1/devices/{}", id)).await?;
            render(flags, DEFAULT_FORMAT, device)
        }
        DeviceCommand::Enable { ids } => operate(client, ids, "enable").await,
        DeviceCommand::Disable { ids } => operate(client, ids, "disable").await,
        DeviceCommand::Reboot { ids } => operate(client, ids, "reboot").await,
        DeviceCommand::Delete { ids } => {
            for id in ids {
                match client.delete(&format!("/api/v1/devices/{}", id)).await {
                    Ok(()) => println!("{}", id),
                    Err(e) => eprintln!("Error while deleting '{}': {:#}", id, e),
                }
            }
            Ok(())
        }
    }
}

/// POST the named operation for each device, printing the id on success.
/// One failing device does not stop the rest.
async fn operate(client: &ControllerClient, ids: &[String], operation: &str) -> Result<()> {
    for id in ids {
        match client
            .post(&format!("/api/v1/devices/{}/{}", id, operation))
            .await
        {
            Ok(()) => println!("{}", id),
            Err(e) => eprintln!("Error while running '{}' on '{}': {:#}", operation, id, e),
        }
    }
    Ok(())
}
