//! Aggregation engine
//!
//! Pure functions over a slice of validated transactions. Each function makes
//! its own pass over the data; nothing is cached between calls. Every sort is
//! stable, so groups with equal keys keep the order in which they first
//! appeared in the input.

use crate::types::{AnalyticsError, Transaction};
use rust_decimal::Decimal;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Default number of rows returned by [`top_products`]
pub const DEFAULT_TOP_N: usize = 5;

/// Default quantity threshold for [`low_performing_products`]
pub const DEFAULT_LOW_THRESHOLD: u64 = 10;

/// Decimal places used for rounded monetary and percentage values
const ROUNDING_DP: u32 = 2;

/// Sales totals for one region
#[derive(Debug, Clone, PartialEq)]
pub struct RegionSales {
    pub region: String,
    pub total_sales: Decimal,
    pub transaction_count: usize,
    /// Share of overall revenue, rounded to two decimal places
    pub percentage: Decimal,
}

/// Quantity and revenue totals for one product name
#[derive(Debug, Clone, PartialEq)]
pub struct ProductSales {
    pub name: String,
    pub total_quantity: u64,
    pub total_revenue: Decimal,
}

/// Purchase behaviour of one customer
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerSummary {
    pub customer_id: String,
    /// Rounded to two decimal places
    pub total_spent: Decimal,
    pub purchase_count: usize,
    /// Rounded to two decimal places
    pub avg_order_value: Decimal,
    pub products_bought: BTreeSet<String>,
}

/// Sales activity for one date
#[derive(Debug, Clone, PartialEq)]
pub struct DailySales {
    pub date: String,
    /// Rounded to two decimal places
    pub revenue: Decimal,
    pub transaction_count: usize,
    pub unique_customers: usize,
}

/// The date with the highest revenue
#[derive(Debug, Clone, PartialEq)]
pub struct PeakDay {
    pub date: String,
    pub revenue: Decimal,
    pub transaction_count: usize,
}

/// Groups items by key while remembering first-appearance order
///
/// `HashMap` alone loses encounter order, which the stable tie-break rules
/// depend on.
struct OrderedGroups<V> {
    index: HashMap<String, usize>,
    groups: Vec<(String, V)>,
}

impl<V: Default> OrderedGroups<V> {
    fn new() -> Self {
        OrderedGroups {
            index: HashMap::new(),
            groups: Vec::new(),
        }
    }

    fn entry(&mut self, key: &str) -> &mut V {
        let position = match self.index.get(key) {
            Some(&position) => position,
            None => {
                self.groups.push((key.to_string(), V::default()));
                self.index.insert(key.to_string(), self.groups.len() - 1);
                self.groups.len() - 1
            }
        };
        &mut self.groups[position].1
    }

    fn into_vec(self) -> Vec<(String, V)> {
        self.groups
    }
}

fn round(value: Decimal) -> Decimal {
    value.round_dp(ROUNDING_DP)
}

/// Check that every total the aggregations build fits its numeric type
///
/// All line totals are positive, so the overall revenue and the overall
/// quantity bound every per-region, per-product, per-customer and per-day
/// total. When this check passes, no aggregation in this module saturates.
///
/// # Errors
///
/// Returns `AnalyticsError::Overflow` naming the total that does not fit.
pub fn check_totals(transactions: &[Transaction]) -> Result<(), AnalyticsError> {
    let mut revenue = Decimal::ZERO;
    let mut quantity: u64 = 0;

    for tx in transactions {
        revenue = tx
            .checked_line_total()
            .and_then(|line_total| revenue.checked_add(line_total))
            .ok_or_else(|| AnalyticsError::overflow("total revenue"))?;
        quantity = quantity
            .checked_add(tx.quantity)
            .ok_or_else(|| AnalyticsError::overflow("total quantity"))?;
    }

    Ok(())
}

/// Sum of line totals over all transactions
///
/// Returns zero for an empty slice. Saturates instead of overflowing; see
/// [`check_totals`].
pub fn total_revenue(transactions: &[Transaction]) -> Decimal {
    transactions
        .iter()
        .map(Transaction::line_total)
        .fold(Decimal::ZERO, Decimal::saturating_add)
}

/// Revenue, transaction count and revenue share per region
///
/// Ordered by descending total sales. An empty slice yields an empty vector;
/// validated transactions always carry a positive line total, so a non-empty
/// slice always has a positive overall total to divide by.
pub fn region_breakdown(transactions: &[Transaction]) -> Vec<RegionSales> {
    let overall = total_revenue(transactions);
    let mut groups: OrderedGroups<(Decimal, usize)> = OrderedGroups::new();

    for tx in transactions {
        let entry = groups.entry(&tx.region);
        entry.0 = entry.0.saturating_add(tx.line_total());
        entry.1 += 1;
    }

    let mut regions: Vec<RegionSales> = groups
        .into_vec()
        .into_iter()
        .map(|(region, (total_sales, transaction_count))| RegionSales {
            percentage: share_of(total_sales, overall),
            region,
            total_sales,
            transaction_count,
        })
        .collect();

    regions.sort_by(|a, b| b.total_sales.cmp(&a.total_sales));
    regions
}

fn share_of(part: Decimal, whole: Decimal) -> Decimal {
    part.checked_div(whole)
        .map(|ratio| round(ratio * Decimal::ONE_HUNDRED))
        .unwrap_or(Decimal::ZERO)
}

/// Quantity and revenue per product name, in first-appearance order
fn product_totals(transactions: &[Transaction]) -> Vec<ProductSales> {
    let mut groups: OrderedGroups<(u64, Decimal)> = OrderedGroups::new();

    for tx in transactions {
        let entry = groups.entry(&tx.product_name);
        entry.0 = entry.0.saturating_add(tx.quantity);
        entry.1 = entry.1.saturating_add(tx.line_total());
    }

    groups
        .into_vec()
        .into_iter()
        .map(|(name, (total_quantity, total_revenue))| ProductSales {
            name,
            total_quantity,
            total_revenue,
        })
        .collect()
}

/// The `n` best-selling products by total quantity
pub fn top_products(transactions: &[Transaction], n: usize) -> Vec<ProductSales> {
    let mut products = product_totals(transactions);
    products.sort_by(|a, b| b.total_quantity.cmp(&a.total_quantity));
    products.truncate(n);
    products
}

/// Products whose total quantity is strictly below `threshold`
///
/// Ordered by ascending quantity. An empty result means there are no low
/// performers.
pub fn low_performing_products(transactions: &[Transaction], threshold: u64) -> Vec<ProductSales> {
    let mut products: Vec<ProductSales> = product_totals(transactions)
        .into_iter()
        .filter(|product| product.total_quantity < threshold)
        .collect();
    products.sort_by_key(|product| product.total_quantity);
    products
}

/// Spending, order count and product variety per customer
///
/// Ordered by descending rounded total spent.
pub fn customer_analysis(transactions: &[Transaction]) -> Vec<CustomerSummary> {
    let mut groups: OrderedGroups<(Decimal, usize, BTreeSet<String>)> = OrderedGroups::new();

    for tx in transactions {
        let entry = groups.entry(&tx.customer_id);
        entry.0 = entry.0.saturating_add(tx.line_total());
        entry.1 += 1;
        entry.2.insert(tx.product_name.clone());
    }

    let mut customers: Vec<CustomerSummary> = groups
        .into_vec()
        .into_iter()
        .map(|(customer_id, (spent, purchase_count, products_bought))| {
            let avg_order_value = spent
                .checked_div(Decimal::from(purchase_count))
                .map(round)
                .unwrap_or(Decimal::ZERO);

            CustomerSummary {
                customer_id,
                total_spent: round(spent),
                purchase_count,
                avg_order_value,
                products_bought,
            }
        })
        .collect();

    customers.sort_by(|a, b| b.total_spent.cmp(&a.total_spent));
    customers
}

/// Revenue, transaction count and distinct customers per date
///
/// Ordered by ascending date string.
pub fn daily_trend(transactions: &[Transaction]) -> Vec<DailySales> {
    let mut days: BTreeMap<&str, (Decimal, usize, BTreeSet<&str>)> = BTreeMap::new();

    for tx in transactions {
        let entry = days.entry(tx.date.as_str()).or_default();
        entry.0 = entry.0.saturating_add(tx.line_total());
        entry.1 += 1;
        entry.2.insert(tx.customer_id.as_str());
    }

    days.into_iter()
        .map(|(date, (revenue, transaction_count, customers))| DailySales {
            date: date.to_string(),
            revenue: round(revenue),
            transaction_count,
            unique_customers: customers.len(),
        })
        .collect()
}

/// The date with the highest daily revenue
///
/// A later date only replaces the current peak when its revenue is strictly
/// greater, so the earliest of several equal days wins. Returns `None` for an
/// empty slice.
pub fn peak_sales_day(transactions: &[Transaction]) -> Option<PeakDay> {
    let mut peak: Option<PeakDay> = None;

    for day in daily_trend(transactions) {
        let current = peak.as_ref().map_or(Decimal::ZERO, |p| p.revenue);
        if day.revenue > current {
            peak = Some(PeakDay {
                date: day.date,
                revenue: day.revenue,
                transaction_count: day.transaction_count,
            });
        }
    }

    peak
}

/// Lexical minimum and maximum date
///
/// Returns `None` for an empty slice.
pub fn date_range(transactions: &[Transaction]) -> Option<(&str, &str)> {
    let first = transactions.iter().map(|tx| tx.date.as_str()).min()?;
    let last = transactions.iter().map(|tx| tx.date.as_str()).max()?;
    Some((first, last))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn tx(
        id: &str,
        date: &str,
        product: &str,
        quantity: u64,
        price: &str,
        customer: &str,
        region: &str,
    ) -> Transaction {
        Transaction {
            transaction_id: id.to_string(),
            date: date.to_string(),
            product_id: "P101".to_string(),
            product_name: product.to_string(),
            quantity,
            unit_price: price.parse().unwrap(),
            customer_id: customer.to_string(),
            region: region.to_string(),
        }
    }

    fn dec(value: &str) -> Decimal {
        value.parse().unwrap()
    }

    fn sample() -> Vec<Transaction> {
        vec![
            tx("T001", "2024-01-05", "Laptop", 2, "450.00", "C001", "North"),
            tx("T002", "2024-01-05", "Mouse", 10, "15.50", "C002", "South"),
            tx("T003", "2024-01-06", "Laptop", 1, "450.00", "C001", "East"),
            tx("T004", "2024-01-07", "Keyboard", 4, "30.00", "C003", "North"),
            tx("T005", "2024-01-06", "Mouse", 5, "15.50", "C002", "South"),
        ]
    }

    #[test]
    fn test_total_revenue() {
        assert_eq!(total_revenue(&sample()), dec("1702.50"));
        assert_eq!(total_revenue(&[]), Decimal::ZERO);
    }

    #[test]
    fn test_region_breakdown_orders_by_sales() {
        let regions = region_breakdown(&sample());

        let names: Vec<_> = regions.iter().map(|r| r.region.as_str()).collect();
        assert_eq!(names, vec!["North", "East", "South"]);

        assert_eq!(regions[0].total_sales, dec("1020.00"));
        assert_eq!(regions[0].transaction_count, 2);
        assert_eq!(regions[0].percentage, dec("59.91"));
        assert_eq!(regions[1].percentage, dec("26.43"));
        assert_eq!(regions[2].percentage, dec("13.66"));
    }

    #[test]
    fn test_region_totals_add_up_to_total_revenue() {
        let data = sample();
        let sum: Decimal = region_breakdown(&data).iter().map(|r| r.total_sales).sum();
        assert_eq!(sum, total_revenue(&data));
    }

    #[test]
    fn test_region_percentages_sum_to_hundred() {
        let regions = region_breakdown(&sample());
        let sum: Decimal = regions.iter().map(|r| r.percentage).sum();
        let tolerance = dec("0.01") * Decimal::from(regions.len());
        assert!((sum - Decimal::ONE_HUNDRED).abs() <= tolerance);
    }

    #[test]
    fn test_region_breakdown_ties_keep_first_appearance() {
        let data = vec![
            tx("T001", "2024-01-05", "A", 1, "10", "C001", "West"),
            tx("T002", "2024-01-05", "A", 1, "10", "C001", "East"),
            tx("T003", "2024-01-05", "A", 1, "10", "C001", "North"),
        ];
        let names: Vec<_> = region_breakdown(&data).into_iter().map(|r| r.region).collect();
        assert_eq!(names, vec!["West", "East", "North"]);
    }

    #[test]
    fn test_region_breakdown_empty() {
        assert!(region_breakdown(&[]).is_empty());
    }

    #[test]
    fn test_top_products_by_quantity() {
        let top = top_products(&sample(), 2);

        assert_eq!(top.len(), 2);
        assert_eq!(top[0].name, "Mouse");
        assert_eq!(top[0].total_quantity, 15);
        assert_eq!(top[0].total_revenue, dec("232.50"));
        assert_eq!(top[1].name, "Keyboard");
        assert_eq!(top[1].total_quantity, 4);
    }

    #[test]
    fn test_top_products_ties_keep_first_appearance() {
        let data = vec![
            tx("T001", "2024-01-05", "Zeta", 3, "1", "C001", "North"),
            tx("T002", "2024-01-05", "Alpha", 3, "1", "C001", "North"),
        ];
        let names: Vec<_> = top_products(&data, DEFAULT_TOP_N)
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Zeta", "Alpha"]);
    }

    #[test]
    fn test_quantities_past_u64_saturate() {
        let big = i64::MAX as u64;
        let data = vec![
            tx("T001", "2024-01-05", "Bolt", big, "1", "C001", "North"),
            tx("T002", "2024-01-05", "Bolt", big, "1", "C001", "North"),
            tx("T003", "2024-01-05", "Bolt", big, "1", "C001", "North"),
        ];

        let top = top_products(&data, DEFAULT_TOP_N);
        assert_eq!(top[0].total_quantity, u64::MAX);
        assert!(low_performing_products(&data, DEFAULT_LOW_THRESHOLD).is_empty());
        assert_eq!(check_totals(&data), Err(AnalyticsError::overflow("total quantity")));
    }

    #[test]
    fn test_revenue_past_decimal_range_saturates() {
        let data = vec![
            tx("T001", "2024-01-05", "Yacht", 1, "50000000000000000000000000000", "C001", "North"),
            tx("T002", "2024-01-06", "Yacht", 1, "50000000000000000000000000000", "C002", "South"),
        ];

        assert_eq!(total_revenue(&data), Decimal::MAX);
        assert_eq!(customer_analysis(&data).len(), 2);
        assert_eq!(daily_trend(&data).len(), 2);
        assert_eq!(region_breakdown(&data).len(), 2);
        assert_eq!(check_totals(&data), Err(AnalyticsError::overflow("total revenue")));
    }

    #[test]
    fn test_check_totals_accepts_sample() {
        assert_eq!(check_totals(&sample()), Ok(()));
        assert_eq!(check_totals(&[]), Ok(()));
    }

    #[test]
    fn test_customer_analysis() {
        let customers = customer_analysis(&sample());

        let ids: Vec<_> = customers.iter().map(|c| c.customer_id.as_str()).collect();
        assert_eq!(ids, vec!["C001", "C002", "C003"]);

        let first = &customers[0];
        assert_eq!(first.total_spent, dec("1350.00"));
        assert_eq!(first.purchase_count, 2);
        assert_eq!(first.avg_order_value, dec("675.00"));
        assert_eq!(
            first.products_bought.iter().collect::<Vec<_>>(),
            vec!["Laptop"]
        );
    }

    #[test]
    fn test_customer_average_is_rounded() {
        let data = vec![
            tx("T001", "2024-01-05", "A", 1, "10", "C001", "North"),
            tx("T002", "2024-01-05", "B", 1, "10", "C001", "North"),
            tx("T003", "2024-01-05", "C", 1, "0.01", "C001", "North"),
        ];
        let customers = customer_analysis(&data);
        assert_eq!(customers[0].avg_order_value, dec("6.67"));
        assert_eq!(customers[0].products_bought.len(), 3);
    }

    #[test]
    fn test_daily_trend_sorted_by_date() {
        let days = daily_trend(&sample());

        let dates: Vec<_> = days.iter().map(|d| d.date.as_str()).collect();
        assert_eq!(dates, vec!["2024-01-05", "2024-01-06", "2024-01-07"]);

        assert_eq!(days[0].revenue, dec("1055.00"));
        assert_eq!(days[0].transaction_count, 2);
        assert_eq!(days[0].unique_customers, 2);
        assert_eq!(days[1].revenue, dec("527.50"));
        assert_eq!(days[1].unique_customers, 2);
    }

    #[test]
    fn test_peak_sales_day() {
        let peak = peak_sales_day(&sample()).unwrap();
        assert_eq!(peak.date, "2024-01-05");
        assert_eq!(peak.revenue, dec("1055.00"));
        assert_eq!(peak.transaction_count, 2);
    }

    #[test]
    fn test_peak_sales_day_tie_keeps_earliest() {
        let data = vec![
            tx("T002", "2024-01-06", "A", 1, "500", "C001", "North"),
            tx("T001", "2024-01-05", "A", 1, "500", "C001", "North"),
        ];
        assert_eq!(peak_sales_day(&data).unwrap().date, "2024-01-05");
    }

    #[test]
    fn test_peak_sales_day_empty() {
        assert_eq!(peak_sales_day(&[]), None);
    }

    #[rstest]
    #[case::below_threshold(9, true)]
    #[case::at_threshold(10, false)]
    #[case::above_threshold(11, false)]
    fn test_low_performer_threshold_is_strict(#[case] quantity: u64, #[case] is_low: bool) {
        let data = vec![tx("T001", "2024-01-05", "Widget", quantity, "1", "C001", "North")];
        let low = low_performing_products(&data, DEFAULT_LOW_THRESHOLD);
        assert_eq!(!low.is_empty(), is_low);
    }

    #[test]
    fn test_low_performers_sorted_ascending() {
        let low = low_performing_products(&sample(), DEFAULT_LOW_THRESHOLD);

        let names: Vec<_> = low.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Laptop", "Keyboard"]);
        assert_eq!(low[0].total_quantity, 3);
        assert_eq!(low[0].total_revenue, dec("1350.00"));
    }

    #[test]
    fn test_low_performers_none_found() {
        assert!(low_performing_products(&sample(), 1).is_empty());
    }

    #[test]
    fn test_date_range() {
        assert_eq!(date_range(&sample()), Some(("2024-01-05", "2024-01-07")));
        assert_eq!(date_range(&[]), None);
    }

    #[test]
    fn test_aggregations_do_not_mutate_input() {
        let data = sample();
        let before = data.clone();

        let _ = region_breakdown(&data);
        let _ = top_products(&data, DEFAULT_TOP_N);
        let _ = customer_analysis(&data);
        let _ = daily_trend(&data);
        let _ = low_performing_products(&data, DEFAULT_LOW_THRESHOLD);

        assert_eq!(data, before);
    }
}
