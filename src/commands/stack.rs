// Copyright (c) 2026 voltctl contributors
// SPDX-License-Identifier: Apache-2.0

use anyhow::{Context, Result};
use serde_json::{json, Value};

use crate::cli::StackCommand;
use crate::config::{Config, Stack};

use super::render;

const DEFAULT_FORMAT: &str =
    "table{{.current}}\t{{.name}}\t{{.server}}\t{{.kafka}}\t{{.kvStore}}";

pub fn run(config: &mut Config, command: &StackCommand) -> Result<()> {
    match command {
        StackCommand::List(flags) => {
            // Stacks are records like any other: same filter/order/format
            // pipeline, with a marker column for the current selection.
            let records = config
                .stacks
                .iter()
                .map(|stack| {
                    let mut record =
                        serde_json::to_value(stack).context("Failed to encode stack")?;
                    let marker = if stack.name == config.current_stack {
                        "*"
                    } else {
                        ""
                    };
                    record["current"] = json!(marker);
                    Ok(record)
                })
                .collect::<Result<Vec<Value>>>()?;
            render(flags, DEFAULT_FORMAT, Value::Array(records))
        }
        StackCommand::Add {
            name,
            server,
            kafka,
            kv_store,
        } => {
            config.upsert_stack(Stack {
                name: name.clone(),
                server: server.clone(),
                kafka: kafka.clone(),
                kv_store: kv_store.clone(),
            });
            // First stack added becomes current automatically
            if config.current_stack.is_empty() {
                config.current_stack = name.clone();
            }
            config.save()
        }
        StackCommand::Delete { name } => {
            config.remove_stack(name)?;
            config.save()
        }
        StackCommand::Use { name } => {
            config.use_stack(name)?;
            config.save()?;
            println!("active stack: {}", name);
            Ok(())
        }
    }
}
