// Copyright (c) 2026 voltctl contributors
// SPDX-License-Identifier: Apache-2.0

//! Command handlers.
//!
//! Every list-style command follows the same pipeline: fetch records from a
//! collaborator, pass them through the filter engine, then the order
//! engine, then render. [`render`] is that shared tail.

pub mod adapter;
pub mod device;
pub mod event;
pub mod logical_device;
pub mod stack;
pub mod version;

use std::io::Write;

use anyhow::Result;
use serde_json::Value;

use crate::cli::{ListFlags, OutputFormat};
use crate::filter::Filter;
use crate::format::{Format, RenderOptions};
use crate::order::Sorter;

/// Filter, sort, and emit records according to the uniform flag contract.
/// `default_format` is the command's built-in table template, used unless
/// --format overrides it.
pub fn render(flags: &ListFlags, default_format: &str, data: Value) -> Result<()> {
    let data = match &flags.filter {
        Some(spec) => Filter::parse(spec)?.process(data)?,
        None => data,
    };
    let data = match &flags.orderby {
        Some(spec) => Sorter::parse(spec).process(data)?,
        None => data,
    };

    let mut out = std::io::stdout();
    match flags.outputas {
        OutputFormat::Table => {
            let format = Format::parse(flags.format.as_deref().unwrap_or(default_format))?;
            let options = RenderOptions {
                as_table: true,
                name_limit: None,
                no_headers: flags.no_headers,
            };
            format.execute(&mut out, &options, &data)?;
        }
        OutputFormat::Json => {
            if !data.is_null() {
                writeln!(out, "{}", serde_json::to_string_pretty(&data)?)?;
            }
        }
        OutputFormat::Yaml => {
            if !data.is_null() {
                write!(out, "{}", serde_yaml::to_string(&data)?)?;
            }
        }
    }
    Ok(())
}
