// Copyright (c) 2026 voltctl contributors
// SPDX-License-Identifier: Apache-2.0

use anyhow::Result;
use serde_json::json;

use crate::cli::ListFlags;

use super::render;

const DEFAULT_FORMAT: &str = "table{{.version}}\t{{.os}}\t{{.arch}}";

pub fn run(flags: &ListFlags) -> Result<()> {
    let record = json!({
        "version": env!("CARGO_PKG_VERSION"),
        "os": std::env::consts::OS,
        "arch": std::env::consts::ARCH,
    });
    render(flags, DEFAULT_FORMAT, record)
}
