//! Region filter
//!
//! Optionally narrows the cleaned records to a single region, either from a
//! value given up front or by asking on an interactive prompt. The analytics
//! and report code behave the same on filtered and unfiltered data.

use crate::types::Transaction;
use std::collections::BTreeSet;
use std::fmt;
use std::io::{BufRead, Write};

/// What the region filter did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterSummary {
    NotApplied {
        total_records: usize,
    },
    Applied {
        region: String,
        records_before_filter: usize,
        records_after_filter: usize,
    },
}

impl fmt::Display for FilterSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterSummary::NotApplied { total_records } => {
                write!(f, "no filter applied ({} records)", total_records)
            }
            FilterSummary::Applied {
                region,
                records_before_filter,
                records_after_filter,
            } => write!(
                f,
                "region '{}': {} of {} records kept",
                region, records_after_filter, records_before_filter
            ),
        }
    }
}

/// Distinct regions present in the records, sorted
pub fn available_regions(records: &[Transaction]) -> BTreeSet<&str> {
    records.iter().map(|tx| tx.region.as_str()).collect()
}

/// Keep only records from `region`
///
/// The comparison ignores case and surrounding whitespace in `region`.
pub fn filter_by_region(records: Vec<Transaction>, region: &str) -> (Vec<Transaction>, FilterSummary) {
    let region = region.trim();
    let records_before_filter = records.len();

    let filtered: Vec<Transaction> = records
        .into_iter()
        .filter(|tx| tx.region.to_lowercase() == region.to_lowercase())
        .collect();

    let summary = FilterSummary::Applied {
        region: region.to_string(),
        records_before_filter,
        records_after_filter: filtered.len(),
    };

    (filtered, summary)
}

/// Ask whether to filter by region and apply the answer
///
/// Lists the available regions on `output`, then reads a yes/no answer from
/// `input`. Only `yes` (any case) enables filtering, after which a region
/// name is read. End of input counts as "no".
///
/// # Errors
///
/// Returns any I/O error from reading `input` or writing `output`.
pub fn prompt_region_filter<R: BufRead, W: Write>(
    records: Vec<Transaction>,
    input: &mut R,
    output: &mut W,
) -> std::io::Result<(Vec<Transaction>, FilterSummary)> {
    writeln!(output)?;
    writeln!(output, "Available Regions:")?;
    for region in available_regions(&records) {
        writeln!(output, "- {}", region)?;
    }

    write!(output, "\nDo you want to filter data by region? (yes/no): ")?;
    output.flush()?;
    let answer = read_answer(input)?;

    if !answer.eq_ignore_ascii_case("yes") {
        let summary = FilterSummary::NotApplied {
            total_records: records.len(),
        };
        return Ok((records, summary));
    }

    write!(output, "Enter region name: ")?;
    output.flush()?;
    let region = read_answer(input)?;

    Ok(filter_by_region(records, &region))
}

fn read_answer<R: BufRead>(input: &mut R) -> std::io::Result<String> {
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::parse_and_clean;
    use std::io::Cursor;

    fn records() -> Vec<Transaction> {
        parse_and_clean([
            "T001|2024-01-05|P101|Widget|2|10.50|C001|North",
            "T002|2024-01-05|P102|Gadget|1|5.00|C002|South",
            "T003|2024-01-06|P101|Widget|1|10.50|C003|north",
            "T004|2024-01-07|P103|Gizmo|3|2.00|C001|East",
        ])
        .transactions
    }

    #[test]
    fn test_available_regions_sorted_and_distinct() {
        let data = records();
        let regions: Vec<_> = available_regions(&data).into_iter().collect();
        assert_eq!(regions, vec!["East", "North", "South", "north"]);
    }

    #[test]
    fn test_filter_by_region_ignores_case() {
        let (filtered, summary) = filter_by_region(records(), "  NORTH ");

        let ids: Vec<_> = filtered.iter().map(|tx| tx.transaction_id.as_str()).collect();
        assert_eq!(ids, vec!["T001", "T003"]);
        assert_eq!(
            summary,
            FilterSummary::Applied {
                region: "NORTH".to_string(),
                records_before_filter: 4,
                records_after_filter: 2,
            }
        );
    }

    #[test]
    fn test_filter_by_unknown_region_keeps_nothing() {
        let (filtered, summary) = filter_by_region(records(), "Mars");
        assert!(filtered.is_empty());
        assert_eq!(summary.to_string(), "region 'Mars': 0 of 4 records kept");
    }

    #[test]
    fn test_prompt_yes_applies_filter() {
        let mut input = Cursor::new("Yes\nSouth\n");
        let mut output = Vec::new();

        let (filtered, summary) = prompt_region_filter(records(), &mut input, &mut output).unwrap();

        assert_eq!(filtered.len(), 1);
        assert!(matches!(summary, FilterSummary::Applied { records_after_filter: 1, .. }));

        let transcript = String::from_utf8(output).unwrap();
        assert!(transcript.contains("Available Regions:\n- East\n- North\n- South\n- north\n"));
        assert!(transcript.contains("Do you want to filter data by region? (yes/no): "));
        assert!(transcript.contains("Enter region name: "));
    }

    #[test]
    fn test_prompt_other_answer_keeps_everything() {
        let mut input = Cursor::new("y\n");
        let mut output = Vec::new();

        let (filtered, summary) = prompt_region_filter(records(), &mut input, &mut output).unwrap();

        assert_eq!(filtered.len(), 4);
        assert_eq!(summary, FilterSummary::NotApplied { total_records: 4 });
        assert!(!String::from_utf8(output).unwrap().contains("Enter region name"));
    }

    #[test]
    fn test_prompt_end_of_input_means_no() {
        let mut input = Cursor::new("");
        let mut output = Vec::new();

        let (filtered, summary) = prompt_region_filter(records(), &mut input, &mut output).unwrap();

        assert_eq!(filtered.len(), 4);
        assert_eq!(summary.to_string(), "no filter applied (4 records)");
    }
}
