use std::io::Cursor;
use std::path::Path;

use calamine::{open_workbook_auto_from_rs, Data, Range, Reader};
use serde_json::Value as JsonValue;
use url::Url;

use super::csv_text;
use super::error::ImportError;
use super::model::{Product, RawRow, RawValue};
use super::normalize::{normalize_rows, KeyCase};
use crate::config::FetchConfig;

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a catalog from a file on disk. The extension is not consulted; the
/// content decides the parser (see [`decode_bytes`]).
pub fn load_file(path: &Path) -> Result<Vec<Product>, ImportError> {
    let bytes = std::fs::read(path)?;
    let products = decode_bytes(&bytes)?;
    log::info!("Loaded {} products from {}", products.len(), path.display());
    Ok(products)
}

/// Decode an uploaded file's bytes into products.
///
/// * ZIP or OLE compound document signature → spreadsheet (`.xlsx`, `.xlsb`,
///   `.ods`, `.xls`)
/// * UTF-8 text starting with `[` → JSON array of row objects
/// * any other UTF-8 text → CSV
pub fn decode_bytes(bytes: &[u8]) -> Result<Vec<Product>, ImportError> {
    if is_workbook(bytes) {
        return decode_workbook(bytes);
    }

    let text = std::str::from_utf8(bytes).map_err(|_| ImportError::NotText)?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    if text.trim_start().starts_with('[') {
        decode_json_rows(text)
    } else {
        csv_text::parse_catalog(text)
    }
}

/// Fetch CSV text over HTTP and parse it.
pub fn fetch_csv(url: &Url, config: &FetchConfig) -> Result<Vec<Product>, ImportError> {
    let client = reqwest::blocking::Client::builder()
        .timeout(config.timeout)
        .user_agent(config.user_agent.as_str())
        .build()?;

    log::debug!("GET {url}");
    let response = client.get(url.as_str()).send()?;
    let status = response.status();
    if !status.is_success() {
        return Err(ImportError::Status(status));
    }

    let is_html = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("text/html"));
    if is_html {
        log::warn!("{url} answered with an HTML page instead of CSV");
        return Err(ImportError::NotCsv);
    }

    let text = response.text()?;
    let products = csv_text::parse_catalog(&text)?;
    log::info!("Fetched {} products from {url}", products.len());
    Ok(products)
}

// ---------------------------------------------------------------------------
// Spreadsheet decoder bridge
// ---------------------------------------------------------------------------

const ZIP_MAGIC: &[u8] = b"PK\x03\x04";
const CFB_MAGIC: &[u8] = &[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];

fn is_workbook(bytes: &[u8]) -> bool {
    bytes.starts_with(ZIP_MAGIC) || bytes.starts_with(CFB_MAGIC)
}

/// Read the first worksheet of a workbook.
fn decode_workbook(bytes: &[u8]) -> Result<Vec<Product>, ImportError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))?;
    let sheet_name = workbook.sheet_names().first().cloned().unwrap_or_default();
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(ImportError::NoSheet)??;

    let rows = sheet_rows(&range);
    log::debug!("Sheet '{sheet_name}': {} data rows", rows.len());
    Ok(normalize_rows(&rows, KeyCase::AnyCase))
}

/// Convert a cell range into raw rows: the first row supplies the keys,
/// every later row with at least one non-empty cell becomes one [`RawRow`].
/// Empty cells are left out of the row; empty headers skip their column.
pub fn sheet_rows(range: &Range<Data>) -> Vec<RawRow> {
    let mut rows = range.rows();
    let Some(header_cells) = rows.next() else {
        return Vec::new();
    };
    let headers: Vec<String> = header_cells
        .iter()
        .map(|c| match c {
            Data::Empty => String::new(),
            other => other.to_string().trim().to_string(),
        })
        .collect();

    rows.filter_map(|cells| {
        let mut row = RawRow::new();
        for (header, cell) in headers.iter().zip(cells) {
            if header.is_empty() {
                continue;
            }
            let value = cell_value(cell);
            if !value.is_absent() {
                row.entry(header.clone()).or_insert(value);
            }
        }
        (!row.is_empty()).then_some(row)
    })
    .collect()
}

fn cell_value(cell: &Data) -> RawValue {
    match cell {
        Data::Empty => RawValue::Absent,
        Data::String(s) => RawValue::Text(s.clone()),
        Data::Float(f) => RawValue::Number(*f),
        Data::Int(i) => RawValue::Number(*i as f64),
        Data::DateTime(dt) => RawValue::Number(dt.as_f64()),
        other => RawValue::Text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// JSON rows
// ---------------------------------------------------------------------------

/// `[{ "product_no": "A1", "DP_PRICE": 12.5, ... }, ...]`
fn decode_json_rows(text: &str) -> Result<Vec<Product>, ImportError> {
    let root: Vec<JsonValue> = serde_json::from_str(text)?;

    let rows: Vec<RawRow> = root
        .iter()
        .filter_map(|rec| rec.as_object())
        .map(|obj| {
            obj.iter()
                .map(|(key, val)| (key.clone(), json_to_raw(val)))
                .collect()
        })
        .collect();

    if rows.len() < root.len() {
        log::debug!("Skipped {} non-object JSON rows", root.len() - rows.len());
    }
    Ok(normalize_rows(&rows, KeyCase::AnyCase))
}

fn json_to_raw(val: &JsonValue) -> RawValue {
    match val {
        JsonValue::String(s) => RawValue::Text(s.clone()),
        JsonValue::Number(n) => n.as_f64().map_or(RawValue::Absent, RawValue::Number),
        JsonValue::Null => RawValue::Absent,
        other => RawValue::Text(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::error::ErrorKind;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn csv_text_goes_through_the_tokenizer() {
        let bytes = b"\xEF\xBB\xBFproduct_no,DP_PRICE\nA1,12\n";
        let products = decode_bytes(bytes).unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].product_no, "A1");
        assert_eq!(products[0].dp_price, 12.0);
    }

    #[test]
    fn json_rows_use_case_tolerant_keys() {
        let text = r#"[
            {"PRODUCT_NO": "A1", "DP_PRICE": 12.5, "Brand": "Acme", "id": 7},
            {"product_no": "A2", "dp_price": "oops", "url": null},
            42
        ]"#;
        let products = decode_bytes(text.as_bytes()).unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].product_no, "A1");
        assert_eq!(products[0].dp_price, 12.5);
        assert_eq!(products[0].brand, "Acme");
        assert_eq!(products[0].id.as_deref(), Some("7"));
        assert_eq!(products[1].dp_price, 0.0);
        assert_eq!(products[1].url, None);
    }

    #[test]
    fn malformed_json_is_a_decode_error() {
        let err = decode_bytes(b"[{\"name\": ").unwrap_err();
        assert!(matches!(err, ImportError::Json(_)));
    }

    #[test]
    fn binary_garbage_is_rejected() {
        let err = decode_bytes(&[0xFF, 0xFE, 0x00, 0x81, 0x9C]).unwrap_err();
        assert!(matches!(err, ImportError::NotText));
    }

    #[test]
    fn corrupt_workbook_is_a_decode_error() {
        let mut bytes = ZIP_MAGIC.to_vec();
        bytes.extend_from_slice(b"definitely not a zip archive");
        let err = decode_bytes(&bytes).unwrap_err();
        assert!(matches!(err, ImportError::Workbook(_)));
    }

    #[test]
    fn empty_input_is_a_decode_error() {
        assert!(matches!(decode_bytes(b""), Err(ImportError::Empty)));
    }

    #[test]
    fn sheet_rows_follow_header_row() {
        let mut range = Range::new((0, 0), (3, 3));
        range.set_value((0, 0), Data::String("Product_No".into()));
        range.set_value((0, 1), Data::String(" DP_PRICE ".into()));
        range.set_value((0, 3), Data::String("name".into()));
        range.set_value((1, 0), Data::String("A1".into()));
        range.set_value((1, 1), Data::Float(10.5));
        range.set_value((1, 2), Data::String("no header".into()));
        range.set_value((3, 0), Data::Int(77));
        range.set_value((3, 3), Data::Bool(true));

        let rows = sheet_rows(&range);
        assert_eq!(rows.len(), 2, "blank row 2 is skipped");
        assert_eq!(rows[0].get("Product_No"), Some(&RawValue::from("A1")));
        assert_eq!(rows[0].get("DP_PRICE"), Some(&RawValue::Number(10.5)));
        assert_eq!(rows[0].len(), 2);
        assert_eq!(rows[1].get("Product_No"), Some(&RawValue::Number(77.0)));
        assert_eq!(rows[1].get("name"), Some(&RawValue::from("true")));

        let products = normalize_rows(&rows, KeyCase::AnyCase);
        assert_eq!(products[0].dp_price, 10.5);
        assert_eq!(products[1].product_no, "77");
    }

    fn inline(cell: &str, text: &str) -> String {
        format!(r#"<c r="{cell}" t="inlineStr"><is><t>{text}</t></is></c>"#)
    }

    fn number(cell: &str, value: f64) -> String {
        format!(r#"<c r="{cell}"><v>{value}</v></c>"#)
    }

    /// Minimal single-sheet `.xlsx` with inline string cells.
    fn xlsx(rows: &[Vec<String>]) -> Vec<u8> {
        let sheet_rows: String = rows
            .iter()
            .enumerate()
            .map(|(i, cells)| format!(r#"<row r="{}">{}</row>"#, i + 1, cells.concat()))
            .collect();
        let parts = [
            (
                "[Content_Types].xml",
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/><Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/></Types>"#
                    .to_string(),
            ),
            (
                "_rels/.rels",
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#
                    .to_string(),
            ),
            (
                "xl/workbook.xml",
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets><sheet name="Catalog" sheetId="1" r:id="rId1"/></sheets></workbook>"#
                    .to_string(),
            ),
            (
                "xl/_rels/workbook.xml.rels",
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/></Relationships>"#
                    .to_string(),
            ),
            (
                "xl/worksheets/sheet1.xml",
                format!(
                    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>{sheet_rows}</sheetData></worksheet>"#
                ),
            ),
        ];

        let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let options = zip::write::SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Stored);
        for (name, body) in parts {
            zip.start_file(name, options).unwrap();
            zip.write_all(body.as_bytes()).unwrap();
        }
        zip.finish().unwrap().into_inner()
    }

    #[test]
    fn xlsx_first_sheet_is_normalized() {
        let bytes = xlsx(&[
            vec![
                inline("A1", "PRODUCT_NO"),
                inline("B1", "Name"),
                inline("C1", "dp_price"),
                inline("D1", "BRAND"),
            ],
            vec![inline("A2", "A1"), inline("B2", "Hub"), number("C2", 12.5)],
            vec![number("A3", 77.0), inline("C3", "bad"), inline("D3", "Acme")],
        ]);
        assert!(bytes.starts_with(ZIP_MAGIC));

        let products = decode_bytes(&bytes).unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].product_no, "A1");
        assert_eq!(products[0].name, "Hub");
        assert_eq!(products[0].dp_price, 12.5);
        assert_eq!(products[0].brand, "");
        assert_eq!(products[1].product_no, "77");
        assert_eq!(products[1].brand, "Acme");
        assert_eq!(products[1].dp_price, 0.0);
        assert_eq!(products[1].display_name(), "Unnamed Product");
    }

    /// Serve one canned HTTP response per connection, in order, on loopback.
    fn serve(responses: Vec<String>) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        thread::spawn(move || {
            for response in responses {
                let (mut stream, _) = listener.accept().unwrap();
                let mut request = Vec::new();
                let mut buf = [0u8; 1024];
                while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                    match stream.read(&mut buf) {
                        Ok(0) | Err(_) => break,
                        Ok(n) => request.extend_from_slice(&buf[..n]),
                    }
                }
                stream.write_all(response.as_bytes()).unwrap();
            }
        });
        format!("http://{addr}/export.csv")
    }

    fn response(status: &str, content_type: &str, body: &str) -> String {
        format!(
            "HTTP/1.1 {status}\r\nContent-Type: {content_type}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        )
    }

    #[test]
    fn fetch_csv_maps_responses() {
        let base = serve(vec![
            response("404 Not Found", "text/plain", ""),
            response("200 OK", "text/html; charset=utf-8", "<html>Sign in</html>"),
            response("200 OK", "text/csv", "product_no,dp_price\nA,1\n"),
            response("200 OK", "text/csv", ""),
        ]);
        let url = Url::parse(&base).unwrap();
        let config = FetchConfig {
            timeout: Duration::from_secs(5),
            ..FetchConfig::default()
        };

        let err = fetch_csv(&url, &config).unwrap_err();
        assert!(
            matches!(err, ImportError::Status(s) if s == reqwest::StatusCode::NOT_FOUND),
            "{err:?}"
        );
        assert_eq!(err.kind(), ErrorKind::Network);

        let err = fetch_csv(&url, &config).unwrap_err();
        assert!(matches!(err, ImportError::NotCsv), "{err:?}");
        assert_eq!(err.kind(), ErrorKind::Decode);

        let products = fetch_csv(&url, &config).unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].product_no, "A");
        assert_eq!(products[0].dp_price, 1.0);

        let err = fetch_csv(&url, &config).unwrap_err();
        assert!(matches!(err, ImportError::Empty), "{err:?}");
    }
}
