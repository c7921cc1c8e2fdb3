//! Enrichment join
//!
//! Annotates each transaction with product catalog metadata. The lookup key
//! is derived from the internal product id: `P1xx` ids map onto the catalog's
//! small integer ids by subtracting [`ENRICHMENT_KEY_OFFSET`]. This offset is
//! a fixed convention between the two id spaces; if either side renumbers,
//! matches silently stop.

use crate::types::{CatalogId, EnrichedTransaction, ProductMapping, Transaction};
use rust_decimal::Decimal;

/// Offset between internal product numbers and catalog ids
pub const ENRICHMENT_KEY_OFFSET: CatalogId = 100;

/// Derive the catalog lookup key for a product id
///
/// `P101` becomes `1`. Returns `None` when the id has no `P` prefix or the
/// remainder is not an integer; such products never match.
pub fn enrichment_key(product_id: &str) -> Option<CatalogId> {
    let number: CatalogId = product_id.strip_prefix('P')?.trim().parse().ok()?;
    number.checked_sub(ENRICHMENT_KEY_OFFSET)
}

/// Join transactions against the product mapping
///
/// Produces exactly one enriched record per input transaction, in the same
/// order. Neither the transactions nor the mapping are modified.
pub fn enrich(transactions: &[Transaction], mapping: &ProductMapping) -> Vec<EnrichedTransaction> {
    transactions
        .iter()
        .map(|tx| {
            let info = enrichment_key(&tx.product_id).and_then(|key| mapping.get(&key));

            match info {
                Some(info) => EnrichedTransaction {
                    transaction: tx.clone(),
                    api_category: info.category.clone(),
                    api_brand: info.brand.clone(),
                    api_rating: info.rating,
                    api_match: true,
                },
                None => EnrichedTransaction::unmatched(tx.clone()),
            }
        })
        .collect()
}

/// Match statistics over a set of enriched transactions
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichmentStats {
    pub matched: usize,
    pub total: usize,
    /// `matched / total × 100`, rounded to two places; zero when `total` is zero
    pub success_rate: Decimal,
    /// Distinct product names that found no catalog entry, first-seen order
    pub unmatched_products: Vec<String>,
}

impl From<&[EnrichedTransaction]> for EnrichmentStats {
    fn from(enriched: &[EnrichedTransaction]) -> Self {
        let matched = enriched.iter().filter(|record| record.api_match).count();
        let total = enriched.len();

        let success_rate = Decimal::from(matched)
            .checked_div(Decimal::from(total))
            .map(|ratio| (ratio * Decimal::ONE_HUNDRED).round_dp(2))
            .unwrap_or(Decimal::ZERO);

        let mut unmatched_products: Vec<String> = Vec::new();
        for record in enriched.iter().filter(|record| !record.api_match) {
            let name = &record.transaction.product_name;
            if !unmatched_products.contains(name) {
                unmatched_products.push(name.clone());
            }
        }

        EnrichmentStats {
            matched,
            total,
            success_rate,
            unmatched_products,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ProductInfo;
    use rstest::rstest;

    fn tx(id: &str, product_id: &str, name: &str) -> Transaction {
        Transaction {
            transaction_id: id.to_string(),
            date: "2024-01-05".to_string(),
            product_id: product_id.to_string(),
            product_name: name.to_string(),
            quantity: 1,
            unit_price: Decimal::ONE,
            customer_id: "C001".to_string(),
            region: "North".to_string(),
        }
    }

    fn phone_mapping() -> ProductMapping {
        let mut mapping = ProductMapping::new();
        mapping.insert(
            1,
            ProductInfo {
                title: Some("iPhone 9".to_string()),
                category: Some("phones".to_string()),
                brand: Some("Apple".to_string()),
                rating: Some(4.6),
            },
        );
        mapping
    }

    #[rstest]
    #[case::first_catalog_id("P101", Some(1))]
    #[case::larger_id("P130", Some(30))]
    #[case::below_offset("P099", Some(-1))]
    #[case::not_numeric("PXYZ", None)]
    #[case::missing_prefix("101", None)]
    #[case::bare_prefix("P", None)]
    fn test_enrichment_key(#[case] product_id: &str, #[case] expected: Option<CatalogId>) {
        assert_eq!(enrichment_key(product_id), expected);
    }

    #[test]
    fn test_enrich_copies_catalog_fields_on_match() {
        let enriched = enrich(&[tx("T001", "P101", "Phone")], &phone_mapping());

        assert_eq!(enriched.len(), 1);
        assert!(enriched[0].api_match);
        assert_eq!(enriched[0].api_category.as_deref(), Some("phones"));
        assert_eq!(enriched[0].api_brand.as_deref(), Some("Apple"));
        assert_eq!(enriched[0].api_rating, Some(4.6));
    }

    #[test]
    fn test_enrich_marks_missing_keys_unmatched() {
        let enriched = enrich(&[tx("T001", "P150", "Toaster")], &phone_mapping());

        assert!(!enriched[0].api_match);
        assert_eq!(enriched[0].api_category, None);
        assert_eq!(enriched[0].api_brand, None);
        assert_eq!(enriched[0].api_rating, None);
    }

    #[test]
    fn test_enrich_preserves_count_and_order_with_empty_mapping() {
        let transactions = vec![
            tx("T001", "P101", "Phone"),
            tx("T002", "P102", "Tablet"),
            tx("T003", "PABC", "Mystery"),
        ];

        let enriched = enrich(&transactions, &ProductMapping::new());

        assert_eq!(enriched.len(), transactions.len());
        assert!(enriched.iter().all(|record| !record.api_match));
        let ids: Vec<_> = enriched
            .iter()
            .map(|record| record.transaction.transaction_id.as_str())
            .collect();
        assert_eq!(ids, vec!["T001", "T002", "T003"]);
    }

    #[test]
    fn test_enrich_does_not_modify_inputs() {
        let transactions = vec![tx("T001", "P101", "Phone")];
        let mapping = phone_mapping();

        let enriched = enrich(&transactions, &mapping);

        assert_eq!(enriched[0].transaction, transactions[0]);
        assert_eq!(mapping, phone_mapping());
    }

    #[test]
    fn test_enrichment_stats() {
        let transactions = vec![
            tx("T001", "P101", "Phone"),
            tx("T002", "P150", "Toaster"),
            tx("T003", "P150", "Toaster"),
            tx("T004", "P160", "Kettle"),
        ];
        let enriched = enrich(&transactions, &phone_mapping());

        let stats = EnrichmentStats::from(enriched.as_slice());

        assert_eq!(stats.matched, 1);
        assert_eq!(stats.total, 4);
        assert_eq!(stats.success_rate, Decimal::new(25, 0));
        assert_eq!(stats.unmatched_products, vec!["Toaster", "Kettle"]);
    }

    #[test]
    fn test_enrichment_stats_empty() {
        let enriched: Vec<EnrichedTransaction> = Vec::new();
        let stats = EnrichmentStats::from(enriched.as_slice());
        assert_eq!(stats.total, 0);
        assert_eq!(stats.success_rate, Decimal::ZERO);
        assert!(stats.unmatched_products.is_empty());
    }
}
