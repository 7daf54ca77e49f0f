// Copyright (c) 2026 voltctl contributors
// SPDX-License-Identifier: Apache-2.0

use anyhow::Result;

use crate::cli::AdapterCommand;
use crate::client::ControllerClient;

use super::render;

const DEFAULT_FORMAT: &str =
    "table{{.id}}\t{{.vendor}}\t{{.version}}\t{{.sinceLastCommunication}}";

pub async fn run(client: &ControllerClient, command: &AdapterCommand) -> Result<()> {
    match command {
        AdapterCommand::List(flags) => {
            let adapters = client.list("/api/v1/adapters").await?;
            render(flags, DEFAULT_FORMAT, adapters)
        }
    }
}
