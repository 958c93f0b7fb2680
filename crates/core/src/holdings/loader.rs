//! Holdings source file loader.
//!
//! Portfolio exports are spreadsheets saved as CSV: a few preamble rows,
//! then a header row containing a `Particulars` column, then holdings
//! grouped under sector header rows ("Financial Sector", "Tech Sector",
//! ...). The loader finds the header, walks the rows keeping a running
//! current-sector label, and emits one [`RawHolding`] per company row.
//!
//! Parsing is deliberately lenient about values - a cell that does not
//! parse becomes zero or absent, matching how the exports actually look -
//! but strict about the schema: no `Particulars` header, no load.

use std::collections::HashMap;
use std::fs::File;
use std::io;
use std::path::Path;

use csv::StringRecord;
use log::debug;
use rust_decimal::Decimal;

use crate::errors::LoadError;
use crate::holdings::RawHolding;

/// The column whose presence identifies the header row.
pub const HEADER_COLUMN: &str = "Particulars";

const COL_PURCHASE_PRICE: &str = "Purchase Price";
const COL_QUANTITY: &str = "Qty";
const COL_CMP: &str = "CMP";
const COL_PE_RATIO: &str = "P/E";
const COL_EARNINGS: &str = "Latest Earnings";
const COL_EXCHANGE: &str = "NSE/BSE";

const DEFAULT_SECTOR: &str = "Unknown";

/// Load holdings from a CSV file on disk.
pub fn load_from_path(path: &Path) -> Result<Vec<RawHolding>, LoadError> {
    let file = File::open(path)?;
    load_from_reader(file)
}

/// Load holdings from any CSV byte stream.
///
/// Returns [`LoadError::MissingHeader`] when no row carries the
/// `Particulars` column; an otherwise-empty source yields an empty list.
pub fn load_from_reader<R: io::Read>(reader: R) -> Result<Vec<RawHolding>, LoadError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let records: Vec<StringRecord> = csv_reader
        .records()
        .collect::<Result<_, _>>()?;

    let header_index = records
        .iter()
        .position(|record| record.iter().any(|field| field.trim() == HEADER_COLUMN))
        .ok_or_else(|| LoadError::MissingHeader(HEADER_COLUMN.to_string()))?;

    let columns: HashMap<&str, usize> = records[header_index]
        .iter()
        .enumerate()
        .map(|(index, field)| (field.trim(), index))
        .collect();
    let name_column = columns[HEADER_COLUMN];

    let mut current_sector = DEFAULT_SECTOR.to_string();
    let mut holdings = Vec::new();

    for record in &records[header_index + 1..] {
        let name = match field(record, Some(&name_column)) {
            Some(name) => name,
            None => continue,
        };

        // A row whose name contains "sector" is a grouping header: it
        // retags everything below it and is not itself a holding.
        if name.to_lowercase().contains("sector") {
            current_sector = sector_label(name);
            continue;
        }

        let purchase_price =
            parse_decimal_field(record, columns.get(COL_PURCHASE_PRICE)).unwrap_or(Decimal::ZERO);
        let quantity = parse_integer_field(record, columns.get(COL_QUANTITY)).unwrap_or(0);

        holdings.push(RawHolding {
            name: name.to_string(),
            purchase_price,
            quantity,
            investment: purchase_price * Decimal::from(quantity),
            sector: current_sector.clone(),
            cmp: parse_decimal_field(record, columns.get(COL_CMP)),
            pe_ratio: parse_decimal_field(record, columns.get(COL_PE_RATIO)),
            earnings: parse_decimal_field(record, columns.get(COL_EARNINGS)),
            exchange: field(record, columns.get(COL_EXCHANGE)).map(str::to_string),
        });
    }

    debug!(
        "Loaded {} holding rows from source ({} records total)",
        holdings.len(),
        records.len()
    );

    Ok(holdings)
}

/// Sector label of a header row: the row name with the word "sector"
/// removed ("Financial Sector" -> "Financial").
fn sector_label(name: &str) -> String {
    let lower = name.to_lowercase();
    let label = match lower.find("sector") {
        Some(index) => {
            let mut remainder = String::with_capacity(name.len());
            remainder.push_str(&name[..index]);
            remainder.push_str(&name[index + "sector".len()..]);
            remainder.trim().to_string()
        }
        None => name.trim().to_string(),
    };
    if label.is_empty() {
        DEFAULT_SECTOR.to_string()
    } else {
        label
    }
}

/// Trimmed, non-empty field at a column index, if any.
fn field<'a>(record: &'a StringRecord, index: Option<&usize>) -> Option<&'a str> {
    let value = record.get(*index?)?.trim();
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

fn parse_decimal_field(record: &StringRecord, index: Option<&usize>) -> Option<Decimal> {
    field(record, index)?.replace(',', "").parse::<Decimal>().ok()
}

fn parse_integer_field(record: &StringRecord, index: Option<&usize>) -> Option<i64> {
    field(record, index)?.replace(',', "").parse::<i64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::io::Cursor;

    const SOURCE: &str = "\
My Portfolio,,,,,,
,,,,,,
Particulars,Purchase Price,Qty,CMP,P/E,Latest Earnings,NSE/BSE
Financial Sector,,,,,,
HDFC Bank,100,10,150,18.5,85.3,HDFCBANK.NS
ICICI Bank,\"1,250\",4,,,,
Tech Sector,,,,,,
Affle India,1100,5,1180,,,AFFLE.NS
";

    fn load(source: &str) -> Vec<RawHolding> {
        load_from_reader(Cursor::new(source)).unwrap()
    }

    #[test]
    fn test_header_row_is_found_past_preamble() {
        let holdings = load(SOURCE);
        assert_eq!(holdings.len(), 3);
        assert_eq!(holdings[0].name, "HDFC Bank");
    }

    #[test]
    fn test_sector_rows_tag_following_holdings() {
        let holdings = load(SOURCE);
        assert_eq!(holdings[0].sector, "Financial");
        assert_eq!(holdings[1].sector, "Financial");
        assert_eq!(holdings[2].sector, "Tech");
    }

    #[test]
    fn test_sector_rows_are_not_emitted_as_holdings() {
        let holdings = load(SOURCE);
        assert!(holdings.iter().all(|h| !h.name.to_lowercase().contains("sector")));
    }

    #[test]
    fn test_values_parse_with_thousands_separators() {
        let holdings = load(SOURCE);
        assert_eq!(holdings[1].purchase_price, dec!(1250));
        assert_eq!(holdings[1].quantity, 4);
        assert_eq!(holdings[1].investment, dec!(5000));
    }

    #[test]
    fn test_optional_columns_stay_absent() {
        let holdings = load(SOURCE);
        assert_eq!(holdings[0].cmp, Some(dec!(150)));
        assert_eq!(holdings[0].exchange.as_deref(), Some("HDFCBANK.NS"));
        assert!(holdings[1].cmp.is_none());
        assert!(holdings[1].exchange.is_none());
    }

    #[test]
    fn test_investment_is_price_times_quantity() {
        let holdings = load(SOURCE);
        assert_eq!(holdings[0].investment, dec!(1000));
        assert_eq!(holdings[2].investment, dec!(5500));
    }

    #[test]
    fn test_holdings_before_any_sector_row_default_to_unknown() {
        let source = "\
Particulars,Purchase Price,Qty
Standalone Co,50,2
";
        let holdings = load(source);
        assert_eq!(holdings[0].sector, "Unknown");
    }

    #[test]
    fn test_missing_header_is_a_load_error() {
        let result = load_from_reader(Cursor::new("a,b,c\n1,2,3\n"));
        assert!(matches!(result, Err(LoadError::MissingHeader(_))));
    }

    #[test]
    fn test_header_only_source_yields_empty_list() {
        let holdings = load("Particulars,Purchase Price,Qty\n");
        assert!(holdings.is_empty());
    }

    #[test]
    fn test_unparseable_values_default_lenient() {
        let source = "\
Particulars,Purchase Price,Qty,CMP
Oddball Co,n/a,abc,--
";
        let holdings = load(source);
        assert_eq!(holdings[0].purchase_price, Decimal::ZERO);
        assert_eq!(holdings[0].quantity, 0);
        assert!(holdings[0].cmp.is_none());
    }

    #[test]
    fn test_load_from_path() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SOURCE.as_bytes()).unwrap();

        let holdings = load_from_path(file.path()).unwrap();
        assert_eq!(holdings.len(), 3);
    }
}
