use super::table::truncate_value;

/// Column widths for fixed-width streaming output, matched against derived
/// header names case-insensitively. Streaming commands cannot compute
/// widths from the full result set, so they declare them up front.
#[derive(Debug, Clone, Default)]
pub struct FixedWidths {
    columns: Vec<(String, usize)>,
}

impl FixedWidths {
    pub fn new() -> FixedWidths {
        FixedWidths::default()
    }

    pub fn set(mut self, name: &str, width: usize) -> FixedWidths {
        self.columns.push((name.to_uppercase(), width));
        self
    }

    pub(super) fn width_of(&self, name: &str) -> Option<usize> {
        let name = name.to_uppercase();
        self.columns
            .iter()
            .find(|(candidate, _)| *candidate == name)
            .map(|(_, width)| *width)
    }
}

/// Pad (and if necessary truncate) a value into its column. Fields with no
/// configured width pass through untouched.
pub(super) fn pad(value: &str, width: Option<usize>) -> String {
    match width {
        Some(width) => format!("{:<width$}", truncate_value(value, width)),
        None => value.to_string(),
    }
}
