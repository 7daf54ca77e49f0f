// Copyright (c) 2026 voltctl contributors
// SPDX-License-Identifier: Apache-2.0

//! Output rendering engine.
//!
//! A [`Format`] wraps a template string such as
//! `table{{.id}}\t{{.type}}\t{{.adminState}}`. A leading literal `table`
//! tags the template for aligned tabular rendering; without it each record
//! renders as one line of direct substitution. Field references use
//! `{{.field}}` / `{{.nested.field}}` syntax, and tab characters separate
//! columns in table mode.
//!
//! Fixed-width mode ([`Format::execute_fixed_width`]) is for streaming
//! output where column widths cannot be computed from the full result set
//! up front; widths come from a [`FixedWidths`] companion matched by field
//! name.

mod fixed;
mod table;

pub use fixed::FixedWidths;

use std::io::Write;

use anyhow::{anyhow, Result};
use serde_json::Value;

use crate::fields::{header_name, lookup, stringify};

/// Options shared by the table and plain rendering paths.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Render `table`-tagged templates as aligned tables.
    pub as_table: bool,
    /// Truncate column header names longer than this.
    pub name_limit: Option<usize>,
    /// Omit the header row in table mode.
    pub no_headers: bool,
}

#[derive(Debug, Clone, PartialEq)]
enum Segment {
    Literal(String),
    Field(String),
}

/// A parsed output template, built once per command invocation.
#[derive(Debug, Clone)]
pub struct Format {
    table: bool,
    // One entry per tab-separated template cell; plain mode re-joins them
    // with tabs so non-table templates render byte-for-byte.
    columns: Vec<Vec<Segment>>,
}

impl Format {
    /// Parse a format template. Unclosed `{{` and references without a
    /// leading `.` are rejected here so render calls cannot fail on syntax.
    pub fn parse(spec: &str) -> Result<Format> {
        let (table, template) = match spec.strip_prefix("table") {
            Some(rest) => (true, rest),
            None => (false, spec),
        };

        let columns = template
            .split('\t')
            .map(parse_segments)
            .collect::<Result<Vec<_>>>()?;

        Ok(Format { table, columns })
    }

    pub fn is_table(&self) -> bool {
        self.table
    }

    /// Render a single record or a collection to `writer`.
    ///
    /// Table mode applies when the options ask for it and the template is
    /// `table`-tagged; otherwise each record renders as one plain line.
    /// `Null` input (a filtered-out single record) renders nothing.
    pub fn execute(
        &self,
        writer: &mut dyn Write,
        options: &RenderOptions,
        data: &Value,
    ) -> Result<()> {
        if data.is_null() {
            return Ok(());
        }
        let records: &[Value] = match data {
            Value::Array(items) => items.as_slice(),
            single => std::slice::from_ref(single),
        };

        if options.as_table && self.table {
            let headers: Vec<String> = self.columns.iter().map(|column| column_header(column)).collect();
            let rows: Vec<Vec<String>> = records
                .iter()
                .map(|record| {
                    self.columns
                        .iter()
                        .map(|column| render_cell(column, record))
                        .collect()
                })
                .collect();
            table::render(writer, &headers, rows, options)?;
        } else {
            for record in records {
                let line: Vec<String> = self
                    .columns
                    .iter()
                    .map(|column| render_cell(column, record))
                    .collect();
                writeln!(writer, "{}", line.join("\t"))?;
            }
        }
        Ok(())
    }

    /// Render one fixed-width row, or just the header row when
    /// `print_header` is set (in which case `data` is ignored).
    pub fn execute_fixed_width(
        &self,
        writer: &mut dyn Write,
        widths: &FixedWidths,
        print_header: bool,
        data: Option<&Value>,
    ) -> Result<()> {
        let cells: Vec<String> = if print_header {
            self.columns
                .iter()
                .map(|column| {
                    let header = column_header(column);
                    fixed::pad(&header, widths.width_of(&header))
                })
                .collect()
        } else {
            let record = match data {
                Some(record) => record,
                None => return Ok(()),
            };
            self.columns
                .iter()
                .map(|column| {
                    let value = render_cell(column, record);
                    fixed::pad(&value, widths.width_of(&column_header(column)))
                })
                .collect()
        };

        writeln!(writer, "{}", cells.join("  ").trim_end())?;
        Ok(())
    }
}

/// Header for one template column: derived from its first field reference,
/// empty for literal-only columns.
fn column_header(column: &[Segment]) -> String {
    column
        .iter()
        .find_map(|segment| match segment {
            Segment::Field(path) => Some(header_name(path)),
            Segment::Literal(_) => None,
        })
        .unwrap_or_default()
}

fn render_cell(column: &[Segment], record: &Value) -> String {
    let mut out = String::new();
    for segment in column {
        match segment {
            Segment::Literal(text) => out.push_str(text),
            Segment::Field(path) if path.is_empty() => out.push_str(&stringify(record)),
            Segment::Field(path) => {
                if let Some(value) = lookup(record, path) {
                    out.push_str(&stringify(value));
                }
            }
        }
    }
    out
}

fn parse_segments(template: &str) -> Result<Vec<Segment>> {
    let mut segments = Vec::new();
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        if start > 0 {
            segments.push(Segment::Literal(rest[..start].to_string()));
        }
        let after = &rest[start + 2..];
        let end = after
            .find("}}")
            .ok_or_else(|| anyhow!("unclosed '{{{{' in format template"))?;
        let reference = after[..end].trim();
        let path = reference.strip_prefix('.').ok_or_else(|| {
            anyhow!("invalid field reference '{{{{{}}}}}' in format template", reference)
        })?;
        segments.push(Segment::Field(path.to_string()));
        rest = &after[end + 2..];
    }
    if !rest.is_empty() {
        segments.push(Segment::Literal(rest.to_string()));
    }
    Ok(segments)
}
