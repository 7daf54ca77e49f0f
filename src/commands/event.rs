// Copyright (c) 2026 voltctl contributors
// SPDX-License-Identifier: Apache-2.0

//! Continuous event stream dump.
//!
//! Events arrive one at a time, so table widths cannot be computed from the
//! full result set; output uses the format engine's fixed-width mode with
//! predeclared column widths. The idle timer is recreated on every loop
//! iteration, which means it resets whenever a message arrives.

use std::io::Write;
use std::time::Duration;

use anyhow::Result;
use tracing::warn;

use crate::cli::EventListenFlags;
use crate::client::ControllerClient;
use crate::filter::Filter;
use crate::format::{FixedWidths, Format};

const DEFAULT_FORMAT: &str =
    "{{.category}}\t{{.subCategory}}\t{{.type}}\t{{.raisedTs}}\t{{.deviceId}}\t{{.title}}";

fn default_widths() -> FixedWidths {
    FixedWidths::new()
        .set("CATEGORY", 13)
        .set("SUBCATEGORY", 13)
        .set("TYPE", 22)
        .set("RAISEDTS", 19)
        .set("DEVICEID", 40)
        .set("TITLE", 40)
}

pub async fn listen(client: &ControllerClient, flags: &EventListenFlags) -> Result<()> {
    let filter = flags
        .list
        .filter
        .as_deref()
        .map(Filter::parse)
        .transpose()?;
    let format = Format::parse(flags.list.format.as_deref().unwrap_or(DEFAULT_FORMAT))?;
    let widths = default_widths();

    let mut stream = client.events("/api/v1/events").await?;
    let mut out = std::io::stdout();

    if !flags.list.no_headers {
        format.execute_fixed_width(&mut out, &widths, true, None)?;
        out.flush()?;
    }

    let mut shown = 0usize;
    loop {
        let next = stream.next_event();
        let event = if flags.idle > 0 {
            tokio::select! {
                biased;
                _ = tokio::signal::ctrl_c() => break,
                _ = tokio::time::sleep(Duration::from_secs(flags.idle)) => break,
                event = next => event,
            }
        } else {
            tokio::select! {
                biased;
                _ = tokio::signal::ctrl_c() => break,
                event = next => event,
            }
        };

        let event = match event {
            None => break,
            Some(Ok(event)) => event,
            Some(Err(e)) => {
                warn!("{:#}", e);
                continue;
            }
        };

        if let Some(filter) = &filter {
            if !filter.evaluate(&event)? {
                continue;
            }
        }

        format.execute_fixed_width(&mut out, &widths, false, Some(&event))?;
        out.flush()?;

        shown += 1;
        if let Some(count) = flags.count {
            if shown >= count {
                break;
            }
        }
    }

    Ok(())
}
