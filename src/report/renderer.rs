//! Sales report renderer
//!
//! Produces the plain-text analytics report. Sections always appear in the
//! same order and each one is computed directly from the inputs:
//!
//! 1. header
//! 2. overall summary
//! 3. region-wise performance
//! 4. top products
//! 5. top customers (always [`TOP_CUSTOMER_ROWS`] rows)
//! 6. daily sales trend
//! 7. product performance (peak day and low performers)
//! 8. catalog enrichment summary
//!
//! Output is deterministic apart from the generation timestamp, which the
//! caller supplies.

use crate::core::{
    check_totals, customer_analysis, daily_trend, date_range, low_performing_products, peak_sales_day,
    region_breakdown, top_products, total_revenue, EnrichmentStats,
};
use crate::report::format::ReportConfig;
use crate::types::{AnalyticsError, EnrichedTransaction, Transaction};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use std::io::Write;

const TITLE: &str = "SALES ANALYTICS REPORT";
const DOUBLE_RULE: &str = "============================================";
const RULE: &str = "--------------------------------------------";

/// Rows in the top customers table
pub const TOP_CUSTOMER_ROWS: usize = 5;

/// Timestamp layout used in the report header
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Render the full sales report
///
/// # Errors
///
/// Returns `AnalyticsError::ZeroRecords` when `transactions` is empty and
/// `AnalyticsError::Overflow` when the totals do not fit, both before anything
/// is written, and `AnalyticsError::IoError` if writing fails.
pub fn render_report(
    transactions: &[Transaction],
    enriched: &[EnrichedTransaction],
    config: &ReportConfig,
    generated_at: &NaiveDateTime,
    out: &mut dyn Write,
) -> Result<(), AnalyticsError> {
    if transactions.is_empty() {
        return Err(AnalyticsError::ZeroRecords);
    }
    check_totals(transactions)?;

    write_header(transactions, generated_at, out)?;
    write_overall_summary(transactions, config, out)?;
    write_region_performance(transactions, config, out)?;
    write_top_products(transactions, config, out)?;
    write_top_customers(transactions, config, out)?;
    write_daily_trend(transactions, config, out)?;
    write_product_performance(transactions, config, out)?;
    write_enrichment_summary(enriched, config, out)?;

    Ok(())
}

fn write_section_title(title: &str, out: &mut dyn Write) -> Result<(), AnalyticsError> {
    writeln!(out, "{}", title)?;
    writeln!(out, "{}", RULE)?;
    Ok(())
}

fn write_header(
    transactions: &[Transaction],
    generated_at: &NaiveDateTime,
    out: &mut dyn Write,
) -> Result<(), AnalyticsError> {
    writeln!(out, "{}", DOUBLE_RULE)?;
    writeln!(out, "{}", TITLE)?;
    writeln!(out, "Generated: {}", generated_at.format(TIMESTAMP_FORMAT))?;
    writeln!(out, "Records Processed: {}", transactions.len())?;
    writeln!(out, "{}", DOUBLE_RULE)?;
    writeln!(out)?;
    Ok(())
}

fn write_overall_summary(
    transactions: &[Transaction],
    config: &ReportConfig,
    out: &mut dyn Write,
) -> Result<(), AnalyticsError> {
    let format = &config.format;
    let revenue = total_revenue(transactions);
    let count = transactions.len();
    let average = revenue
        .checked_div(Decimal::from(count))
        .ok_or(AnalyticsError::ZeroRecords)?;
    let (first, last) = date_range(transactions).ok_or(AnalyticsError::ZeroRecords)?;

    write_section_title("OVERALL SUMMARY", out)?;
    writeln!(out, "Total Revenue: {}", format.money(revenue))?;
    writeln!(out, "Total Transactions: {}", count)?;
    writeln!(out, "Average Order Value: {}", format.money(average))?;
    writeln!(out, "Date Range: {} to {}", first, last)?;
    writeln!(out)?;
    Ok(())
}

fn write_region_performance(
    transactions: &[Transaction],
    config: &ReportConfig,
    out: &mut dyn Write,
) -> Result<(), AnalyticsError> {
    let format = &config.format;

    write_section_title("REGION-WISE PERFORMANCE", out)?;
    writeln!(out, "Region | Total Sales | % of Total | Transactions")?;
    for region in region_breakdown(transactions) {
        writeln!(
            out,
            "{} | {} | {} | {}",
            region.region,
            format.money(region.total_sales),
            format.percent(region.percentage),
            region.transaction_count
        )?;
    }
    writeln!(out)?;
    Ok(())
}

fn write_top_products(
    transactions: &[Transaction],
    config: &ReportConfig,
    out: &mut dyn Write,
) -> Result<(), AnalyticsError> {
    let format = &config.format;

    write_section_title(&format!("TOP {} PRODUCTS", config.top_n), out)?;
    writeln!(out, "Rank | Product | Quantity | Revenue")?;
    for (rank, product) in top_products(transactions, config.top_n).iter().enumerate() {
        writeln!(
            out,
            "{} | {} | {} | {}",
            rank + 1,
            product.name,
            product.total_quantity,
            format.money(product.total_revenue)
        )?;
    }
    writeln!(out)?;
    Ok(())
}

fn write_top_customers(
    transactions: &[Transaction],
    config: &ReportConfig,
    out: &mut dyn Write,
) -> Result<(), AnalyticsError> {
    let format = &config.format;

    write_section_title(&format!("TOP {} CUSTOMERS", TOP_CUSTOMER_ROWS), out)?;
    writeln!(out, "Rank | CustomerID | Total Spent | Orders")?;
    for (rank, customer) in customer_analysis(transactions)
        .iter()
        .take(TOP_CUSTOMER_ROWS)
        .enumerate()
    {
        writeln!(
            out,
            "{} | {} | {} | {}",
            rank + 1,
            customer.customer_id,
            format.money(customer.total_spent),
            customer.purchase_count
        )?;
    }
    writeln!(out)?;
    Ok(())
}

fn write_daily_trend(
    transactions: &[Transaction],
    config: &ReportConfig,
    out: &mut dyn Write,
) -> Result<(), AnalyticsError> {
    let format = &config.format;

    write_section_title("DAILY SALES TREND", out)?;
    writeln!(out, "Date | Revenue | Transactions | Customers")?;
    for day in daily_trend(transactions) {
        writeln!(
            out,
            "{} | {} | {} | {}",
            day.date,
            format.money(day.revenue),
            day.transaction_count,
            day.unique_customers
        )?;
    }
    writeln!(out)?;
    Ok(())
}

fn write_product_performance(
    transactions: &[Transaction],
    config: &ReportConfig,
    out: &mut dyn Write,
) -> Result<(), AnalyticsError> {
    let format = &config.format;

    write_section_title("PRODUCT PERFORMANCE ANALYSIS", out)?;
    match peak_sales_day(transactions) {
        Some(peak) => writeln!(
            out,
            "Best Selling Day: {} ({} in {} transactions)",
            peak.date,
            format.money(peak.revenue),
            peak.transaction_count
        )?,
        None => writeln!(out, "Best Selling Day: none")?,
    }

    let low_performers = low_performing_products(transactions, config.low_threshold);
    if low_performers.is_empty() {
        writeln!(out, "No low performing products found.")?;
    } else {
        writeln!(out, "Low Performing Products:")?;
        for product in low_performers {
            writeln!(
                out,
                "{} - Qty: {}, Revenue: {}",
                product.name,
                product.total_quantity,
                format.money(product.total_revenue)
            )?;
        }
    }
    writeln!(out)?;
    Ok(())
}

fn write_enrichment_summary(
    enriched: &[EnrichedTransaction],
    config: &ReportConfig,
    out: &mut dyn Write,
) -> Result<(), AnalyticsError> {
    let stats = EnrichmentStats::from(enriched);

    write_section_title("API ENRICHMENT SUMMARY", out)?;
    writeln!(out, "Products Enriched: {}/{}", stats.matched, stats.total)?;
    writeln!(out, "Success Rate: {}", config.format.percent(stats.success_rate))?;

    if stats.unmatched_products.is_empty() {
        writeln!(out, "All products were enriched successfully.")?;
    } else {
        writeln!(out, "Products not enriched:")?;
        for name in &stats.unmatched_products {
            writeln!(out, "- {}", name)?;
        }
    }
    Ok(())
}
