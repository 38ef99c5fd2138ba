//! Holdings parsers.

use folio_core::traits::HoldingsParser;
use folio_core::{CanonicalField, FieldValue, FolioError, FolioResult, HoldingRecord};
use tracing::debug;

/// Delimiters tried, in order, when none is configured.
pub const AUTO_DELIMITERS: [u8; 4] = [b'\t', b',', b'|', b';'];

// =============================================================================
// DELIMITED TABLE PARSER
// =============================================================================

/// Parses the first delimited holdings table found in raw page text.
///
/// The header row is the first line containing a `Value` cell. The table runs
/// from there to the next blank line. Copying a holdings grid out of a browser
/// usually produces tab-separated text; comma, pipe and semicolon tables are
/// recognized too.
#[derive(Debug, Clone, Default)]
pub struct DelimitedHoldingsParser {
    delimiter: Option<u8>,
}

impl DelimitedHoldingsParser {
    /// Create a parser that detects the delimiter from the header row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser that only accepts `delimiter`.
    pub fn with_delimiter(delimiter: u8) -> Self {
        Self {
            delimiter: Some(delimiter),
        }
    }

    fn candidates(&self) -> Vec<u8> {
        match self.delimiter {
            Some(d) => vec![d],
            None => AUTO_DELIMITERS.to_vec(),
        }
    }

    /// Locates the header row: `(line index, delimiter)`.
    fn find_header(&self, lines: &[&str]) -> Option<(usize, u8)> {
        let value_aliases = CanonicalField::Value.aliases();
        let candidates = self.candidates();

        lines.iter().enumerate().find_map(|(idx, line)| {
            candidates.iter().copied().find_map(|d| {
                let cells: Vec<&str> = line.split(char::from(d)).map(str::trim).collect();
                let has_value = cells.iter().any(|c| value_aliases.contains(c));
                (cells.len() >= 2 && has_value).then_some((idx, d))
            })
        })
    }
}

impl HoldingsParser for DelimitedHoldingsParser {
    fn parse(&self, text: &str) -> FolioResult<Vec<HoldingRecord>> {
        let lines: Vec<&str> = text.lines().collect();
        let (start, delimiter) = self.find_header(&lines).ok_or_else(|| {
            FolioError::parse("Could not find a holdings table with a 'Value' column")
        })?;

        let table: Vec<&str> = lines[start..]
            .iter()
            .take_while(|l| !l.trim().is_empty())
            .copied()
            .collect();
        let table = table.join("\n");

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(table.as_bytes());

        let headers = reader
            .headers()
            .map_err(|e| FolioError::parse(format!("Could not read table header: {}", e)))?
            .clone();

        let mut records = Vec::new();
        for (i, row) in reader.records().enumerate() {
            let row = row.map_err(|e| {
                FolioError::parse(format!("Could not read holdings row {}: {}", i + 1, e))
            })?;
            if row.iter().all(str::is_empty) {
                continue;
            }

            let record: HoldingRecord = headers
                .iter()
                .enumerate()
                .filter(|(_, h)| !h.is_empty())
                .map(|(col, h)| {
                    let cell = row.get(col).unwrap_or("");
                    let value = if cell.is_empty() {
                        FieldValue::Empty
                    } else {
                        FieldValue::text(cell)
                    };
                    (h, value)
                })
                .collect();
            records.push(record);
        }

        if records.is_empty() {
            return Err(FolioError::parse(
                "Could not find any holdings below the table header",
            ));
        }

        debug!(
            rows = records.len(),
            delimiter = %char::from(delimiter).escape_default(),
            "Parsed delimited holdings table"
        );
        Ok(records)
    }
}

// =============================================================================
// JSON PARSER
// =============================================================================

/// Parses holdings that are already structured as a JSON array of objects.
///
/// Key order within each object is preserved.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonHoldingsParser;

impl JsonHoldingsParser {
    /// Create a new JSON holdings parser.
    pub fn new() -> Self {
        Self
    }
}

impl HoldingsParser for JsonHoldingsParser {
    fn parse(&self, text: &str) -> FolioResult<Vec<HoldingRecord>> {
        let records: Vec<HoldingRecord> = serde_json::from_str(text)
            .map_err(|e| FolioError::parse(format!("Could not read holdings JSON: {}", e)))?;

        if records.is_empty() {
            return Err(FolioError::parse("Could not find any holdings in JSON input"));
        }
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::ErrorKind;

    const PAGE_TEXT: &str = "Empower Dashboard\n\
        Holdings for all accounts\n\
        Name\tTicker\tShares\tPrice\tValue\n\
        Apple Inc\tAAPL\t10\t$150.00\t$1,500.00\n\
        Bond Fund\tBND\t5\t$100.00\t$500.00\n\
        \n\
        Total\t\t\t\t$2,000.00\n";

    #[test]
    fn test_tab_table_inside_page_text() {
        let records = DelimitedHoldingsParser::new().parse(PAGE_TEXT).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("Ticker"), Some(&FieldValue::text("AAPL")));
        assert_eq!(records[1].get("Value"), Some(&FieldValue::text("$500.00")));
        let cols: Vec<_> = records[0].columns().collect();
        assert_eq!(cols, vec!["Name", "Ticker", "Shares", "Price", "Value"]);
    }

    #[test]
    fn test_quoted_comma_table() {
        let text = "Symbol,Name,Value\nVTI,\"Vanguard Total\",\"$1,234.00\"\n";
        let records = DelimitedHoldingsParser::new().parse(text).unwrap();
        assert_eq!(records[0].get("Value"), Some(&FieldValue::text("$1,234.00")));
        assert_eq!(records[0].get("Symbol"), Some(&FieldValue::text("VTI")));
    }

    #[test]
    fn test_pipe_table_with_borders() {
        let text = "| Name | Ticker | Value |\n| Cash | CASH | $10.00 |\n";
        let records = DelimitedHoldingsParser::new().parse(text).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].len(), 3);
        assert_eq!(records[0].get("Name"), Some(&FieldValue::text("Cash")));
    }

    #[test]
    fn test_short_rows_get_empty_cells() {
        let text = "Name\tTicker\tShares\tValue\nCash\t\t\t$5.00\nFund\tFND\n";
        let records = DelimitedHoldingsParser::new().parse(text).unwrap();
        assert_eq!(records[0].get("Ticker"), Some(&FieldValue::Empty));
        assert_eq!(records[1].get("Value"), Some(&FieldValue::Empty));
    }

    #[test]
    fn test_no_table_is_parse_error() {
        let err = DelimitedHoldingsParser::new()
            .parse("Welcome back!\nYour accounts are loading")
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
        assert!(err.to_string().contains("Could not"));
    }

    #[test]
    fn test_header_without_rows_is_parse_error() {
        let err = DelimitedHoldingsParser::new()
            .parse("Name\tValue\n\nfooter")
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
    }

    #[test]
    fn test_fixed_delimiter() {
        let text = "Name;Value\nA;$1.00\n";
        assert!(DelimitedHoldingsParser::with_delimiter(b'\t').parse(text).is_err());
        assert_eq!(
            DelimitedHoldingsParser::with_delimiter(b';')
                .parse(text)
                .unwrap()
                .len(),
            1
        );
    }

    #[test]
    fn test_json_parser() {
        let text = r#"[{"Name": "Apple Inc", "Ticker": "AAPL", "Shares": 10, "Value": "$1,500.00"}]"#;
        let records = JsonHoldingsParser::new().parse(text).unwrap();
        assert_eq!(records[0].get("Shares"), Some(&FieldValue::from(10_i64)));

        assert!(JsonHoldingsParser::new().parse("[]").is_err());
        assert_eq!(
            JsonHoldingsParser::new().parse("{").unwrap_err().kind(),
            ErrorKind::Parse
        );
    }
}
