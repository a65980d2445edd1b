//! CSV reader producing typed rows.
//!
//! Decodes the file (encoding auto-detected), reads it with the `csv` crate,
//! then infers one type per column: a column is numeric only when every
//! non-missing cell in it parses as a number. Cells of mixed columns stay
//! text, so a stray `"n.a."` turns the whole column into text.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use crate::error::{CsvError, CsvResult};
use crate::models::{CellValue, Row};

/// Delimiter used when none is configured.
pub const DEFAULT_DELIMITER: char = ',';

/// Cell contents read as missing values.
const NA_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// A fully loaded table.
#[derive(Debug, Clone)]
pub struct ParsedTable {
    /// Column headers, duplicates disambiguated.
    pub headers: Vec<String>,
    /// Rows in file order.
    pub rows: Vec<Row>,
    /// Detected encoding.
    pub encoding: String,
    /// Delimiter used.
    pub delimiter: char,
}

/// Type inferred for a whole column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Integer,
    Float,
    Text,
}

/// Detect the encoding of raw bytes using chardet
pub fn detect_encoding(bytes: &[u8]) -> String {
    let result = chardet::detect(bytes);
    let charset = result.0;

    match charset.to_lowercase().as_str() {
        "ascii" | "utf-8" | "utf8" | "utf-8-sig" | "" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        other => other.to_string(),
    }
}

/// Decode bytes using the given encoding, dropping a leading byte-order mark.
pub fn decode_content(bytes: &[u8], encoding: &str) -> CsvResult<String> {
    let decoded = match encoding.to_lowercase().as_str() {
        "iso-8859-1" | "latin-1" | "latin1" => decode_with(encoding_rs::WINDOWS_1252, bytes)?,
        "windows-1252" | "cp1252" => decode_with(encoding_rs::WINDOWS_1252, bytes)?,
        _ => String::from_utf8(bytes.to_vec())
            .map_err(|e| CsvError::Encoding(format!("input is not valid UTF-8 ({})", e)))?,
    };

    Ok(match decoded.strip_prefix('\u{feff}') {
        Some(rest) => rest.to_string(),
        None => decoded,
    })
}

// encoding_rs maps ISO-8859-1 labels to windows-1252, a superset.
fn decode_with(encoding: &'static encoding_rs::Encoding, bytes: &[u8]) -> CsvResult<String> {
    let (text, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        return Err(CsvError::Encoding(format!(
            "input contains bytes invalid in {}",
            encoding.name()
        )));
    }
    Ok(text.into_owned())
}

/// Read and parse a CSV file.
pub fn parse_csv_file<P: AsRef<Path>>(path: P, delimiter: char) -> CsvResult<ParsedTable> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| CsvError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    parse_bytes(&bytes, delimiter)
}

/// Parse CSV bytes, detecting their encoding first.
pub fn parse_bytes(bytes: &[u8], delimiter: char) -> CsvResult<ParsedTable> {
    let encoding = detect_encoding(bytes);
    let content = decode_content(bytes, &encoding)?;
    let (headers, rows) = parse_str(&content, delimiter)?;

    Ok(ParsedTable {
        headers,
        rows,
        encoding,
        delimiter,
    })
}

/// Parse decoded CSV text into headers and typed rows.
///
/// # Example
/// ```
/// use career_compass::parser::parse_str;
/// use career_compass::CellValue;
///
/// let (headers, rows) = parse_str("Title,Job Zone\nCEO,5\nClerk,2", ',').unwrap();
///
/// assert_eq!(headers, vec!["Title", "Job Zone"]);
/// assert_eq!(rows[0]["Job Zone"], CellValue::Integer(5));
/// assert_eq!(rows[1]["Title"], CellValue::Text("Clerk".into()));
/// ```
pub fn parse_str(content: &str, delimiter: char) -> CsvResult<(Vec<String>, Vec<Row>)> {
    if !delimiter.is_ascii() {
        return Err(CsvError::InvalidDelimiter(delimiter));
    }

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter as u8)
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let raw_headers: Vec<String> = reader
        .headers()
        .map_err(CsvError::from_csv)?
        .iter()
        .map(String::from)
        .collect();

    if raw_headers.is_empty() {
        return Err(CsvError::EmptyFile);
    }
    let headers = dedupe_headers(raw_headers);

    let mut records = Vec::new();
    for result in reader.records() {
        let record = result.map_err(CsvError::from_csv)?;
        if record.len() > headers.len() {
            return Err(CsvError::Parse {
                line: record.position().map(|p| p.line()).unwrap_or(0),
                message: format!(
                    "expected at most {} fields, found {}",
                    headers.len(),
                    record.len()
                ),
            });
        }
        records.push(record);
    }

    let kinds: Vec<ColumnKind> = (0..headers.len())
        .map(|i| infer_kind(records.iter().map(|r| present_cell(r, i))))
        .collect();

    let rows = records
        .iter()
        .map(|record| {
            headers
                .iter()
                .zip(&kinds)
                .enumerate()
                .map(|(i, (header, kind))| (header.clone(), to_cell(present_cell(record, i), *kind)))
                .collect::<Row>()
        })
        .collect();

    Ok((headers, rows))
}

/// Rename repeated headers: the second `X` becomes `X.1`, the third `X.2`.
pub fn dedupe_headers(raw: Vec<String>) -> Vec<String> {
    let mut used: HashSet<String> = HashSet::new();
    let mut counters: HashMap<String, usize> = HashMap::new();
    let mut headers = Vec::with_capacity(raw.len());

    for name in raw {
        if used.insert(name.clone()) {
            headers.push(name);
            continue;
        }

        let counter = counters.entry(name.clone()).or_insert(0);
        let unique = loop {
            *counter += 1;
            let candidate = format!("{}.{}", name, counter);
            if !used.contains(&candidate) {
                break candidate;
            }
        };
        used.insert(unique.clone());
        headers.push(unique);
    }

    headers
}

/// Infer the type of a column from its non-missing cells (`None` = missing).
pub fn infer_kind<'a, I>(cells: I) -> ColumnKind
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    let mut all_integer = true;
    let mut all_numeric = true;
    let mut has_missing = false;

    for cell in cells {
        match cell {
            None => has_missing = true,
            Some(s) => {
                let s = s.trim();
                if s.parse::<i64>().is_err() {
                    all_integer = false;
                }
                if s.parse::<f64>().is_err() {
                    all_numeric = false;
                    break;
                }
            }
        }
    }

    if !all_numeric {
        ColumnKind::Text
    } else if all_integer && !has_missing {
        ColumnKind::Integer
    } else {
        ColumnKind::Float
    }
}

fn is_missing(raw: &str) -> bool {
    NA_TOKENS.contains(&raw.trim())
}

fn present_cell(record: &csv::StringRecord, index: usize) -> Option<&str> {
    record.get(index).filter(|s| !is_missing(s))
}

fn to_cell(raw: Option<&str>, kind: ColumnKind) -> CellValue {
    let Some(raw) = raw else {
        return CellValue::Null;
    };

    match kind {
        ColumnKind::Integer => match raw.trim().parse::<i64>() {
            Ok(i) => CellValue::Integer(i),
            Err(_) => CellValue::Text(raw.to_string()),
        },
        ColumnKind::Float => match raw.trim().parse::<f64>() {
            Ok(f) => CellValue::Float(f),
            Err(_) => CellValue::Text(raw.to_string()),
        },
        ColumnKind::Text => CellValue::Text(raw.to_string()),
    }
}
