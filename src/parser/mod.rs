//! CSV reader with encoding and delimiter auto-detection.
//!
//! Turns the raw source file into JSON objects keyed by column header.
//! No boss-specific logic here; the cleaner interprets the columns.

use serde_json::{json, Map, Value};
use std::path::Path;

use crate::error::{CsvError, CsvResult};

/// Result of parsing with metadata.
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// Parsed rows as JSON objects, one per data line.
    pub records: Vec<Value>,
    /// Detected or used encoding.
    pub encoding: String,
    /// Detected or used delimiter.
    pub delimiter: char,
    /// Column headers, in file order.
    pub headers: Vec<String>,
}

/// Detect the encoding of raw bytes using chardet.
pub fn detect_encoding(bytes: &[u8]) -> String {
    let (charset, _, _) = chardet::detect(bytes);

    // Normalize charset names
    match charset.to_lowercase().as_str() {
        "ascii" | "utf-8" | "utf8" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        other => other.to_string(),
    }
}

/// Decode bytes to a string using the specified encoding.
pub fn decode_content(bytes: &[u8], encoding: &str) -> CsvResult<String> {
    let decoded = match encoding.to_lowercase().as_str() {
        "utf-8" | "utf8" | "ascii" => String::from_utf8_lossy(bytes).to_string(),
        "iso-8859-1" | "latin-1" | "latin1" => {
            encoding_rs::ISO_8859_15.decode(bytes).0.to_string()
        }
        "windows-1252" | "cp1252" => encoding_rs::WINDOWS_1252.decode(bytes).0.to_string(),
        // Fallback: lossy UTF-8
        _ => String::from_utf8_lossy(bytes).to_string(),
    };
    Ok(decoded)
}

/// Detect the delimiter by counting candidate occurrences in the header line.
pub fn detect_delimiter(content: &str) -> char {
    let first_line = content.lines().next().unwrap_or("");

    let separators = [',', ';', '\t', '|'];
    let mut best_sep = ',';
    let mut best_count = 0;

    for &sep in &separators {
        let count = first_line.matches(sep).count();
        if count > best_count {
            best_count = count;
            best_sep = sep;
        }
    }

    best_sep
}

/// Parse CSV text into JSON objects with an explicit delimiter.
///
/// Each row becomes a JSON object where keys are column headers. Fields
/// are trimmed; quoted values are unquoted; short rows are padded with
/// empty strings and extra fields are ignored.
///
/// # Example
/// ```
/// use bossfeed::parser::parse_records;
///
/// let csv = "name,hp\nDragon,1000\nHydra,900";
/// let result = parse_records(csv, ',').unwrap();
///
/// assert_eq!(result.records.len(), 2);
/// assert_eq!(result.records[0]["name"], "Dragon");
/// assert_eq!(result.records[0]["hp"], "1000");
/// ```
pub fn parse_records(content: &str, delimiter: char) -> CsvResult<ParseResult> {
    if content.trim().is_empty() {
        return Err(CsvError::EmptyFile);
    }
    if !delimiter.is_ascii() {
        return Err(CsvError::ParseError(format!(
            "delimiter '{delimiter}' is not an ASCII character"
        )));
    }

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter as u8)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| CsvError::ParseError(e.to_string()))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
        return Err(CsvError::NoHeaders);
    }

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(|e| CsvError::ParseError(e.to_string()))?;

        let mut obj = Map::new();
        for (i, header) in headers.iter().enumerate() {
            let value = row.get(i).unwrap_or("");
            obj.insert(header.clone(), json!(value));
        }
        records.push(Value::Object(obj));
    }

    Ok(ParseResult {
        records,
        encoding: "utf-8".to_string(),
        delimiter,
        headers,
    })
}

/// Parse CSV bytes, auto-detecting encoding and delimiter.
pub fn parse_bytes_auto(bytes: &[u8]) -> CsvResult<ParseResult> {
    let encoding = detect_encoding(bytes);
    let content = decode_content(bytes, &encoding)?;
    let delimiter = detect_delimiter(&content);

    let mut result = parse_records(&content, delimiter)?;
    result.encoding = encoding;
    Ok(result)
}

/// Parse CSV bytes with an explicit delimiter, auto-detecting only the
/// encoding.
pub fn parse_bytes_with(bytes: &[u8], delimiter: char) -> CsvResult<ParseResult> {
    let encoding = detect_encoding(bytes);
    let content = decode_content(bytes, &encoding)?;

    let mut result = parse_records(&content, delimiter)?;
    result.encoding = encoding;
    Ok(result)
}

/// Parse a CSV file, auto-detecting encoding and delimiter.
pub fn parse_file_auto<P: AsRef<Path>>(path: P) -> CsvResult<ParseResult> {
    let bytes = std::fs::read(path.as_ref())?;
    parse_bytes_auto(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_csv() {
        let csv = "boss_name,boss_hp\nDragon,1000\nHydra,900";
        let result = parse_records(csv, ',').unwrap();

        assert_eq!(result.records.len(), 2);
        assert_eq!(result.records[0]["boss_name"], "Dragon");
        assert_eq!(result.records[0]["boss_hp"], "1000");
        assert_eq!(result.records[1]["boss_name"], "Hydra");
    }

    #[test]
    fn test_headers_preserved_in_order() {
        let csv = "link,Date,boss_name,boss_hp\nboss/1,2024-01-01,A,10";
        let result = parse_records(csv, ',').unwrap();
        assert_eq!(result.headers, vec!["link", "Date", "boss_name", "boss_hp"]);
    }

    #[test]
    fn test_quoted_values() {
        let csv = "name,value\n\"Dragon, the Red\",\"1000\"";
        let result = parse_records(csv, ',').unwrap();
        assert_eq!(result.records[0]["name"], "Dragon, the Red");
        assert_eq!(result.records[0]["value"], "1000");
    }

    #[test]
    fn test_fields_trimmed() {
        let csv = "a,b\n 1 ,  2";
        let result = parse_records(csv, ',').unwrap();
        assert_eq!(result.records[0]["a"], "1");
        assert_eq!(result.records[0]["b"], "2");
    }

    #[test]
    fn test_short_rows_padded() {
        let csv = "a,b,c\n1,2";
        let result = parse_records(csv, ',').unwrap();
        assert_eq!(result.records[0]["c"], "");
    }

    #[test]
    fn test_extra_columns_ignored() {
        let csv = "a,b\n1,2,3,4";
        let result = parse_records(csv, ',').unwrap();
        assert_eq!(result.records[0]["a"], "1");
        assert_eq!(result.records[0]["b"], "2");
        assert_eq!(result.records[0].as_object().unwrap().len(), 2);
    }

    #[test]
    fn test_empty_csv_error() {
        let result = parse_records("", ',');
        assert!(matches!(result, Err(CsvError::EmptyFile)));
    }

    #[test]
    fn test_detect_delimiter_comma() {
        assert_eq!(detect_delimiter("a,b,c\n1,2,3"), ',');
    }

    #[test]
    fn test_detect_delimiter_semicolon() {
        assert_eq!(detect_delimiter("a;b;c\n1;2;3"), ';');
    }

    #[test]
    fn test_detect_delimiter_tab() {
        assert_eq!(detect_delimiter("a\tb\tc\n1\t2\t3"), '\t');
    }

    #[test]
    fn test_auto_parse() {
        let csv = "boss_name;boss_hp\nDragon;1000";
        let result = parse_bytes_auto(csv.as_bytes()).unwrap();

        assert_eq!(result.delimiter, ';');
        assert_eq!(result.records.len(), 1);
        assert_eq!(result.headers, vec!["boss_name", "boss_hp"]);
    }

    #[test]
    fn test_non_ascii_delimiter_rejected() {
        let result = parse_records("a,b\n1,2", '§');
        assert!(matches!(result, Err(CsvError::ParseError(_))));
    }

    #[test]
    fn test_latin1_decoding() {
        // "Société" in ISO-8859-1
        let bytes: &[u8] = &[0x53, 0x6F, 0x63, 0x69, 0xE9, 0x74, 0xE9];
        let decoded = decode_content(bytes, "iso-8859-1").unwrap();
        assert!(decoded.contains("Soci"));
    }

    #[test]
    fn test_utf8_content_survives() {
        let csv = "boss_name,boss_hp\nมังกร,1000";
        let result = parse_bytes_auto(csv.as_bytes()).unwrap();
        assert_eq!(result.records[0]["boss_name"], "มังกร");
    }
}
