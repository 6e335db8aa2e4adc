//! Splits delimited text into typed rows.
//!
//! Both input files share one format: a header line, which is always
//! discarded, followed by one record per line with fields separated by a
//! single delimiter byte. There is no quoting or escaping, so a field can
//! never contain the delimiter.

use serde::Deserialize;

use std::io::Read;

use crate::error::{Error, Result};

/// The default field delimiter for both input files.
pub const DEFAULT_DELIMITER: u8 = b',';

/// Separates the book id from the quantity inside a sale item field.
pub const ITEM_SEPARATOR: char = ';';

const BOOK_FIELDS: usize = 4;
const SALE_FIXED_FIELDS: usize = 4;

/// One row of the book catalog: `id,title,author,price`.
///
/// Only `id` and `price` are used. `price` is kept as text so that a bad
/// value can be degraded to zero by [`crate::Catalog`] rather than failing
/// the whole file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BookRow {
    pub id: String,
    pub title: String,
    pub author: String,
    pub price: String,
}

/// One row of the sales ledger:
/// `date,customer,payment_method,item_count,item_1,item_2,...`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaleRow {
    /// Line number in the source file, for error messages.
    pub line: u64,
    pub date: String,
    pub customer_email: String,
    pub payment_method: String,
    pub item_count: String,
    /// The remaining `bookId;quantity` fields, unparsed.
    pub item_fields: Vec<String>,
}

/// Returns a CSV reader configured for the no-quoting format shared by both
/// input files.
///
/// The reader expects the header line to have been removed already; see
/// [`raw_rows`].
pub fn reader<R: Read>(rdr: R, delimiter: u8) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .delimiter(delimiter)
        .from_reader(rdr)
}

/// Reads every non-header line of `rdr` as a raw field array, paired with
/// its line number. Order is preserved.
///
/// The first physical line is the header and is dropped whatever it
/// contains, even if it is blank.
///
/// # Errors
///
/// Returns any error from reading the underlying input.
pub fn raw_rows<R: Read>(mut rdr: R, delimiter: u8) -> Result<Vec<(u64, csv::StringRecord)>> {
    let mut data = Vec::new();
    rdr.read_to_end(&mut data)?;
    let body = match data.iter().position(|&b| b == b'\n') {
        Some(end) => &data[end + 1..],
        None => &[][..],
    };
    let mut rows = Vec::new();
    for result in reader(body, delimiter).into_records() {
        let record = result?;
        let line = record.position().map_or(0, csv::Position::line) + 1;
        rows.push((line, record));
    }
    Ok(rows)
}

/// Reads book catalog rows from `rdr`.
///
/// # Errors
///
/// Returns [`Error::MalformedBook`] if a row has fewer than four fields, or
/// any error from reading the input.
pub fn book_rows<R: Read>(rdr: R, delimiter: u8) -> Result<Vec<BookRow>> {
    raw_rows(rdr, delimiter)?
        .into_iter()
        .map(|(line, record)| {
            if record.len() < BOOK_FIELDS {
                return Err(Error::MalformedBook {
                    line,
                    found: record.len(),
                });
            }
            Ok(record.deserialize(None)?)
        })
        .collect()
}

/// Reads sales ledger rows from `rdr`.
///
/// # Errors
///
/// Returns [`Error::MalformedSale`] if a row has fewer than the four fixed
/// fields, or any error from reading the input.
pub fn sale_rows<R: Read>(rdr: R, delimiter: u8) -> Result<Vec<SaleRow>> {
    raw_rows(rdr, delimiter)?
        .into_iter()
        .map(|(line, record)| {
            if record.len() < SALE_FIXED_FIELDS {
                return Err(Error::MalformedSale {
                    line,
                    reason: format!(
                        "expected at least {SALE_FIXED_FIELDS} fields, found {}",
                        record.len()
                    ),
                });
            }
            Ok(SaleRow {
                line,
                date: record[0].to_string(),
                customer_email: record[1].to_string(),
                payment_method: record[2].to_string(),
                item_count: record[3].to_string(),
                item_fields: record
                    .iter()
                    .skip(SALE_FIXED_FIELDS)
                    .map(str::to_string)
                    .collect(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_rows_fn_skips_header_unconditionally() {
        let input = "B1,T,A,1.0\nB2,T,A,2.0\n";
        let rows = raw_rows(input.as_bytes(), DEFAULT_DELIMITER).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0].1[0], "B2");
        assert_eq!(rows[0].0, 2);
    }

    #[test]
    fn raw_rows_fn_skips_blank_header_line() {
        let input = "\nB1,T,A,10.0\nB2,T,A,5.0\n";
        let rows = raw_rows(input.as_bytes(), DEFAULT_DELIMITER).unwrap();
        let ids: Vec<_> = rows.iter().map(|(_, record)| &record[0]).collect();
        assert_eq!(ids, vec!["B1", "B2"]);
        assert_eq!(rows[0].0, 2);
    }

    #[test]
    fn raw_rows_fn_returns_nothing_for_header_only_input() {
        assert!(raw_rows("id,price".as_bytes(), DEFAULT_DELIMITER)
            .unwrap()
            .is_empty());
        assert!(raw_rows("".as_bytes(), DEFAULT_DELIMITER).unwrap().is_empty());
    }

    #[test]
    fn raw_rows_fn_does_not_interpret_quotes() {
        let input = "h\n\"a,b\",c\n";
        let rows = raw_rows(input.as_bytes(), DEFAULT_DELIMITER).unwrap();
        let fields: Vec<_> = rows[0].1.iter().collect();
        assert_eq!(fields, vec!["\"a", "b\"", "c"]);
    }

    #[test]
    fn book_rows_fn_reads_fields_by_position() {
        let input = "book_id,book_author,book_title,book_price\n\
                     B1,Someone,Some Title,10.5\n";
        let rows = book_rows(input.as_bytes(), DEFAULT_DELIMITER).unwrap();
        assert_eq!(
            rows,
            vec![BookRow {
                id: "B1".into(),
                title: "Someone".into(),
                author: "Some Title".into(),
                price: "10.5".into(),
            }]
        );
    }

    #[test]
    fn book_rows_fn_returns_error_for_short_row() {
        let input = "id,a,b,price\nB1,x,10.0\n";
        let err = book_rows(input.as_bytes(), DEFAULT_DELIMITER).unwrap_err();
        assert!(matches!(err, Error::MalformedBook { line: 2, found: 3 }));
    }

    #[test]
    fn sale_rows_fn_collects_variable_item_fields() {
        let input = "date,email,method,count,items\n\
                     2017-12-22,a@x.com,card,3,B1;2,B2;1\n\
                     2017-12-23,b@x.com,cash,1,B3;1\n";
        let rows = sale_rows(input.as_bytes(), DEFAULT_DELIMITER).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].customer_email, "a@x.com");
        assert_eq!(rows[0].item_fields, vec!["B1;2", "B2;1"]);
        assert_eq!(rows[1].item_fields, vec!["B3;1"]);
        assert_eq!(rows[1].line, 3);
    }

    #[test]
    fn sale_rows_fn_returns_error_for_missing_fixed_fields() {
        let input = "header\n2017-12-22,a@x.com\n";
        let err = sale_rows(input.as_bytes(), DEFAULT_DELIMITER).unwrap_err();
        assert!(matches!(err, Error::MalformedSale { line: 2, .. }));
    }

    #[test]
    fn reader_fn_honours_custom_delimiter() {
        let input = "h\nB1|t|a|3.0\n";
        let rows = book_rows(input.as_bytes(), b'|').unwrap();
        assert_eq!(rows[0].price, "3.0");
    }
}
