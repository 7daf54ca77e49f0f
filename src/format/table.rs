use std::borrow::Cow;
use std::io::Write;

use anyhow::Result;
use comfy_table::{presets::NOTHING, Table};

use super::RenderOptions;

/// Truncate a string to max_len chars, adding "..." if truncated
pub(super) fn truncate_value(s: &str, max_len: usize) -> Cow<'_, str> {
    if s.chars().count() <= max_len {
        Cow::Borrowed(s)
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
        Cow::Owned(format!("{}...", truncated))
    }
}

/// Render pre-stringified rows as an aligned, borderless table.
pub(super) fn render(
    writer: &mut dyn Write,
    headers: &[String],
    rows: Vec<Vec<String>>,
    options: &RenderOptions,
) -> Result<()> {
    let mut table = Table::new();
    table.load_preset(NOTHING);

    if !options.no_headers {
        let headers: Vec<Cow<'_, str>> = headers
            .iter()
            .map(|name| match options.name_limit {
                Some(limit) => truncate_value(name, limit),
                None => Cow::Borrowed(name.as_str()),
            })
            .collect();
        table.set_header(headers);
    }

    for row in rows {
        table.add_row(row);
    }

    writeln!(writer, "{}", table)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_value_short() {
        let result = truncate_value("hello", 10);
        assert_eq!(result, "hello");
        assert!(matches!(result, Cow::Borrowed(_)));
    }

    #[test]
    fn test_truncate_value_exact_length() {
        let result = truncate_value("1234567890", 10);
        assert_eq!(result, "1234567890");
        assert!(matches!(result, Cow::Borrowed(_)));
    }

    #[test]
    fn test_truncate_value_too_long() {
        let result = truncate_value("this is a very long header name", 20);
        assert!(result.ends_with("..."));
        assert!(result.chars().count() <= 20);
        assert!(matches!(result, Cow::Owned(_)));
    }

    #[test]
    fn test_header_truncated_by_name_limit() {
        let mut buffer = Vec::new();
        render(
            &mut buffer,
            &["SERIALNUMBER".to_string()],
            vec![vec!["x".to_string()]],
            &RenderOptions {
                as_table: true,
                name_limit: Some(8),
                no_headers: false,
            },
        )
        .unwrap();
        let out = String::from_utf8(buffer).unwrap();
        assert!(out.contains("SERIA..."));
        assert!(!out.contains("SERIALNUMBER"));
    }

    #[test]
    fn test_no_headers() {
        let mut buffer = Vec::new();
        render(
            &mut buffer,
            &["ID".to_string()],
            vec![vec!["d1".to_string()]],
            &RenderOptions {
                as_table: true,
                name_limit: None,
                no_headers: true,
            },
        )
        .unwrap();
        let out = String::from_utf8(buffer).unwrap();
        assert!(!out.contains("ID"));
        assert!(out.contains("d1"));
    }
}
