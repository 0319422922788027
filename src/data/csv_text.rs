//! Minimal CSV reader for shared-sheet exports and uploaded `.csv` files.
//!
//! The grammar is deliberately small: a `"` toggles quoting and is never kept
//! as data, a `,` outside quotes ends a field, a line break ends a row.
//! Known limitations: a doubled quote (`""`) inside a quoted field is read as
//! two toggles rather than one literal quote, and quoted fields cannot span
//! lines.

use super::error::ImportError;
use super::model::{Product, RawRow, RawValue};
use super::normalize::{normalize_row, KeyCase};

/// Split `text` into rows of trimmed string fields.
pub fn tokenize(text: &str) -> Vec<Vec<String>> {
    text.lines().map(tokenize_line).collect()
}

fn tokenize_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    fields.push(current.trim().to_string());
    fields
}

/// Turn tokenized rows into raw rows keyed by the (lowercased) header row.
///
/// Rows whose fields are all empty are dropped. Short rows yield `""` for
/// the missing trailing columns; surplus fields are ignored. When a header
/// repeats, the rightmost column wins.
pub fn records(rows: &[Vec<String>]) -> Result<Vec<RawRow>, ImportError> {
    let (header_row, body) = rows.split_first().ok_or(ImportError::Empty)?;
    let headers: Vec<String> = header_row
        .iter()
        .map(|h| h.to_lowercase().replace('"', "").trim().to_string())
        .collect();

    let mut dropped = 0usize;
    let records: Vec<RawRow> = body
        .iter()
        .filter(|row| {
            let keep = row.iter().any(|cell| !cell.is_empty());
            if !keep {
                dropped += 1;
            }
            keep
        })
        .map(|row| {
            let mut record = RawRow::new();
            for (i, header) in headers.iter().enumerate() {
                let value = row.get(i).map(|v| v.replace('"', "")).unwrap_or_default();
                record.insert(header.clone(), RawValue::Text(value));
            }
            record
        })
        .collect();

    if dropped > 0 {
        log::debug!("Dropped {dropped} blank CSV rows");
    }
    Ok(records)
}

/// Parse CSV text into normalized products.
///
/// Fails only when the text holds no header row at all.
pub fn parse_catalog(text: &str) -> Result<Vec<Product>, ImportError> {
    if text.trim().is_empty() {
        return Err(ImportError::Empty);
    }
    let rows = tokenize(text);
    let records = records(&rows)?;
    Ok(records
        .iter()
        .map(|r| normalize_row(r, KeyCase::Lowercase))
        .collect())
}
