//! Enriched data export
//!
//! Writes enriched transactions as pipe-delimited text, one line per record in
//! input order. Absent catalog values are written as empty fields. Fields are
//! never quoted: validated records cannot contain the delimiter.

use crate::types::{AnalyticsError, EnrichedTransaction};
use csv::{QuoteStyle, WriterBuilder};
use std::io::Write;

/// Column names of the enriched export
pub const EXPORT_HEADER: [&str; 12] = [
    "TransactionID",
    "Date",
    "ProductID",
    "ProductName",
    "Quantity",
    "UnitPrice",
    "CustomerID",
    "Region",
    "API_Category",
    "API_Brand",
    "API_Rating",
    "API_Match",
];

/// Write enriched transactions in the pipe-delimited export format
///
/// # Errors
///
/// Returns `AnalyticsError::ExportError` if a record cannot be written and
/// `AnalyticsError::IoError` if the output cannot be flushed.
pub fn write_enriched_export(
    records: &[EnrichedTransaction],
    output: &mut dyn Write,
) -> Result<(), AnalyticsError> {
    let mut writer = WriterBuilder::new()
        .delimiter(b'|')
        .quote_style(QuoteStyle::Never)
        .from_writer(output);

    writer.write_record(EXPORT_HEADER)?;

    for record in records {
        let tx = &record.transaction;
        writer.write_record(&[
            tx.transaction_id.clone(),
            tx.date.clone(),
            tx.product_id.clone(),
            tx.product_name.clone(),
            tx.quantity.to_string(),
            tx.unit_price.to_string(),
            tx.customer_id.clone(),
            tx.region.clone(),
            record.api_category.clone().unwrap_or_default(),
            record.api_brand.clone().unwrap_or_default(),
            record.api_rating.map(|r| r.to_string()).unwrap_or_default(),
            record.api_match.to_string(),
        ])?;
    }

    writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::parser::parse_line;

    fn enriched(line: &str, catalog: Option<(&str, &str, f64)>) -> EnrichedTransaction {
        let transaction = parse_line(line).unwrap();
        match catalog {
            Some((category, brand, rating)) => EnrichedTransaction {
                transaction,
                api_category: Some(category.to_string()),
                api_brand: Some(brand.to_string()),
                api_rating: Some(rating),
                api_match: true,
            },
            None => EnrichedTransaction::unmatched(transaction),
        }
    }

    fn export(records: &[EnrichedTransaction]) -> String {
        let mut output = Vec::new();
        write_enriched_export(records, &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_export_writes_header_and_rows() {
        let records = vec![
            enriched(
                "T001|2024-01-05|P101|Widget|2|10.50|C001|North",
                Some(("phones", "Apple", 4.6)),
            ),
            enriched("T002|2024-01-06|P150|Gadget|1|5.00|C002|South", None),
        ];

        assert_eq!(
            export(&records),
            "TransactionID|Date|ProductID|ProductName|Quantity|UnitPrice|CustomerID|Region|API_Category|API_Brand|API_Rating|API_Match\n\
             T001|2024-01-05|P101|Widget|2|10.50|C001|North|phones|Apple|4.6|true\n\
             T002|2024-01-06|P150|Gadget|1|5.00|C002|South||||false\n"
        );
    }

    #[test]
    fn test_export_empty_writes_header_only() {
        assert_eq!(export(&[]).lines().count(), 1);
    }

    #[test]
    fn test_export_does_not_quote_special_characters() {
        let records = vec![enriched(
            "T001|2024-01-05|P101|12\" \"Pizza\" Stone|1|9.99|C001|North",
            None,
        )];

        let output = export(&records);

        assert!(output.contains("|12\" \"Pizza\" Stone|"));
    }

    #[test]
    fn test_export_round_trips_field_values() {
        let lines = [
            "T001|2024-01-05|P101|Widget,Deluxe|1,000|1,250.75|C001|North",
            "T002|2024-01-06|P102|Gadget|3|9.99|C002|South",
        ];
        let records: Vec<_> = lines.iter().map(|line| enriched(line, None)).collect();

        let output = export(&records);
        let rows: Vec<Vec<&str>> = output
            .lines()
            .skip(1)
            .map(|line| line.split('|').collect())
            .collect();

        assert_eq!(rows.len(), 2);
        assert_eq!(
            rows[0][..8],
            ["T001", "2024-01-05", "P101", "Widget Deluxe", "1000", "1250.75", "C001", "North"]
        );
        assert_eq!(
            rows[1][..8],
            ["T002", "2024-01-06", "P102", "Gadget", "3", "9.99", "C002", "South"]
        );
    }
}
