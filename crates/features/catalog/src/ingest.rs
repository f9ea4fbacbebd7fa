//! CSV ingestion: one header row naming the fields, one destination per data row.

use crate::error::{CatalogError, CatalogErrorExt};
use crate::record::Destination;
use crate::schema::Schema;
use csv::{ReaderBuilder, Trim};
use std::io::Read;
use std::sync::Arc;

/// Parses the whole input into a schema and its records, in file order.
///
/// Short rows are padded with empty values, surplus cells are ignored and values are kept
/// verbatim.
pub(crate) fn read_destinations<R: Read>(
    reader: R,
) -> Result<(Arc<Schema>, Vec<Destination>), CatalogError> {
    let mut csv = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::Headers)
        .from_reader(reader);

    let headers = csv.headers().context("Reading header row")?.clone();
    let schema = Arc::new(Schema::new(headers.iter()));
    let columns = schema.column_map(headers.iter());

    let mut destinations = Vec::new();
    for (row, record) in csv.records().enumerate() {
        let record = record.context(format!("Reading data row {}", row + 1))?;

        let mut values = vec![String::new(); schema.len()];
        for (cell, column) in record.iter().zip(&columns) {
            if let Some(key) = column {
                values[key.position()] = cell.to_owned();
            }
        }
        destinations.push(Destination::new(Arc::clone(&schema), values));
    }

    Ok((schema, destinations))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headers_are_trimmed_and_rows_kept_in_order() {
        let data = "Destination, Region ,  Country\nParis,Ile-de-France,France\nRome,Lazio,Italy\n";
        let (schema, records) = read_destinations(data.as_bytes()).expect("ingest");

        assert_eq!(schema.fields(), ["Destination", "Region", "Country"]);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].field("Destination"), Some("Paris"));
        assert_eq!(records[1].field("country"), Some("Italy"));
    }

    #[test]
    fn values_are_not_trimmed_or_converted() {
        let data = "Destination,Latitude\n Lisbon ,38.7223\n";
        let (_, records) = read_destinations(data.as_bytes()).expect("ingest");

        assert_eq!(records[0].field("Destination"), Some(" Lisbon "));
        assert_eq!(records[0].field("Latitude"), Some("38.7223"));
    }

    #[test]
    fn ragged_rows_are_padded_or_truncated() {
        let data = "A,B,C\n1\n1,2,3,4\n";
        let (_, records) = read_destinations(data.as_bytes()).expect("ingest");

        assert_eq!(records[0].iter().collect::<Vec<_>>(), [("A", "1"), ("B", ""), ("C", "")]);
        assert_eq!(records[1].iter().collect::<Vec<_>>(), [("A", "1"), ("B", "2"), ("C", "3")]);
    }

    #[test]
    fn repeated_header_takes_rightmost_value_at_first_position() {
        let data = "Name, Country,Name \nfirst,Spain,second\nonly,Italy\n";
        let (schema, records) = read_destinations(data.as_bytes()).expect("ingest");

        assert_eq!(schema.fields(), ["Name", "Country"]);
        assert_eq!(records[0].iter().collect::<Vec<_>>(), [("Name", "second"), ("Country", "Spain")]);
        assert_eq!(records[1].field("name"), Some("only"));
    }

    #[test]
    fn quoted_cells_may_contain_separators() {
        let data = "Destination,Famous Foods\nNaples,\"Pizza, Sfogliatella\"\n";
        let (_, records) = read_destinations(data.as_bytes()).expect("ingest");

        assert_eq!(records[0].field("famous foods"), Some("Pizza, Sfogliatella"));
    }

    #[test]
    fn malformed_utf8_is_a_csv_error() {
        let data: &[u8] = b"Destination\n\xff\xfe\n";
        let err = read_destinations(data).unwrap_err();
        assert!(matches!(err, CatalogError::Csv { context: Some(_), .. }));
    }
}
