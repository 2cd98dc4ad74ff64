//! Output rendering: aligned text tables, detail sections and JSON.

use std::io::{self, Write};

use serde::Serialize;

/// Minimum gutter between columns.
const COLUMN_GAP: usize = 2;

/// Truncates `value` to at most `max` characters, ellipsis-terminated.
/// `max` of zero means no cap.
pub fn truncate(value: &str, max: usize) -> String {
    if max == 0 || value.chars().count() <= max {
        return value.to_string();
    }
    let keep = max.saturating_sub(3);
    let mut out: String = value.chars().take(keep).collect();
    out.push_str("...");
    out
}

/// Writes one header row and one line per data row, space-padded so every
/// column aligns. Same rows in, byte-identical bytes out.
pub fn write_table<W: Write>(out: &mut W, headers: &[&str], rows: &[Vec<String>]) -> io::Result<()> {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }
    }

    let header_cells: Vec<String> = headers.iter().map(|h| (*h).to_string()).collect();
    write_row(out, &header_cells, &widths)?;
    for row in rows {
        write_row(out, row, &widths)?;
    }
    Ok(())
}

fn write_row<W: Write>(out: &mut W, cells: &[String], widths: &[usize]) -> io::Result<()> {
    let mut line = String::new();
    for (i, cell) in cells.iter().enumerate() {
        line.push_str(cell);
        if i + 1 < cells.len() {
            let pad = widths[i].saturating_sub(cell.chars().count()) + COLUMN_GAP;
            line.extend(std::iter::repeat(' ').take(pad));
        }
    }
    writeln!(out, "{}", line.trim_end())
}

/// The success path for an empty result set.
pub fn write_empty<W: Write>(out: &mut W, resource: &str) -> io::Result<()> {
    writeln!(out, "No {resource} found.")
}

pub fn write_json<W: Write, T: Serialize>(out: &mut W, value: &T) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

/// A `Key: value` line inside a detail section, skipped when the value is
/// blank.
pub fn detail_line<W: Write>(out: &mut W, key: &str, value: &str) -> io::Result<()> {
    if value.trim().is_empty() {
        return Ok(());
    }
    writeln!(out, "  {key}: {value}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<Vec<String>> {
        vec![
            vec!["1".to_string(), "Acme".to_string()],
            vec!["204".to_string(), "ABC Logistics".to_string()],
        ]
    }

    #[test]
    fn table_aligns_columns_with_two_space_gutter() {
        let mut out = Vec::new();
        write_table(&mut out, &["ID", "COMPANY"], &rows()).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "ID   COMPANY\n1    Acme\n204  ABC Logistics\n");
    }

    #[test]
    fn table_rendering_is_idempotent() {
        let render = || {
            let mut out = Vec::new();
            write_table(&mut out, &["ID", "COMPANY"], &rows()).unwrap();
            out
        };
        assert_eq!(render(), render());
    }

    #[test]
    fn empty_result_set_is_a_message_not_an_error() {
        let mut out = Vec::new();
        write_empty(&mut out, "brokers").unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "No brokers found.\n");
    }

    #[test]
    fn truncate_caps_long_cells_with_an_ellipsis() {
        assert_eq!(truncate("short", 24), "short");
        assert_eq!(truncate("abcdefghij", 8), "abcde...");
        assert_eq!(truncate("anything at all", 0), "anything at all");
    }

    #[test]
    fn detail_lines_skip_blank_values() {
        let mut out = Vec::new();
        detail_line(&mut out, "Title", "Dispatcher").unwrap();
        detail_line(&mut out, "Email", "   ").unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "  Title: Dispatcher\n");
    }
}
