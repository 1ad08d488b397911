#[cfg(test)]
mod tests {
    use {
        crate::aggregate::{daily_series, kpi_summary, product_metrics, store_metrics},
        crate::dataset::Transaction,
        crate::filter,
        chrono::NaiveDate,
        std::collections::HashSet,
    };

    fn row(
        txn: u64,
        date: (i32, u32, u32),
        time: &str,
        qty: u32,
        price: f64,
        store: &str,
        category: &str,
        product: &str,
    ) -> Transaction {
        Transaction {
            transaction_id: txn,
            transaction_date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).expect("date"),
            transaction_time: time.to_string(),
            transaction_qty: qty,
            unit_price: price,
            store_location: store.to_string(),
            product_category: category.to_string(),
            product_type: product.to_string(),
            total_price: qty as f64 * price,
        }
    }

    /// A week of mixed traffic: multi-line-item purchases, three stores,
    /// overlapping products. Every transaction id stays within one day.
    fn sample_table() -> Vec<Transaction> {
        vec![
            row(1, (2023, 5, 1), "07:12:00", 2, 3.00, "Astoria", "Coffee", "Latte"),
            row(1, (2023, 5, 1), "07:12:00", 1, 3.25, "Astoria", "Bakery", "Croissant"),
            row(2, (2023, 5, 1), "08:45:10", 1, 4.50, "Hell's Kitchen", "Coffee", "Mocha"),
            row(3, (2023, 5, 2), "09:03:55", 3, 2.50, "Lower Manhattan", "Tea", "Chai"),
            row(4, (2023, 5, 2), "10:20:31", 1, 3.00, "Astoria", "Coffee", "Latte"),
            row(4, (2023, 5, 2), "10:20:31", 2, 1.75, "Astoria", "Bakery", "Scone"),
            row(5, (2023, 5, 3), "16:40:00", 1, 5.00, "Hell's Kitchen", "Tea", "Matcha"),
            row(6, (2023, 5, 4), "11:11:11", 2, 4.50, "Lower Manhattan", "Coffee", "Mocha"),
            row(7, (2023, 5, 5), "19:58:02", 1, 2.50, "Hell's Kitchen", "Tea", "Chai"),
        ]
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    /// No grouping may lose or double-count revenue: the per-group sums of
    /// every grouping match the directly computed total.
    #[test]
    fn test_grouping_conserves_revenue() {
        let table = sample_table();
        let total: f64 = table.iter().map(|r| r.total_price).sum();

        let daily: f64 = daily_series(&table).iter().map(|p| p.revenue).sum();
        let products: f64 = product_metrics(&table).iter().map(|p| p.revenue).sum();
        let stores: f64 = store_metrics(&table).iter().map(|s| s.revenue).sum();

        assert!(close(daily, total));
        assert!(close(products, total));
        assert!(close(stores, total));
        assert!(close(kpi_summary(&table).total_revenue, total));
    }

    /// Per-day distinct transaction counts sum to the overall distinct count
    /// as long as no transaction spans multiple days. The sample data (like
    /// the real export) satisfies that; it is an assumption, not something
    /// the loader enforces.
    #[test]
    fn test_daily_distinct_counts_sum_to_kpi_count() {
        let table = sample_table();

        let mut days_per_txn: std::collections::HashMap<u64, HashSet<NaiveDate>> =
            std::collections::HashMap::new();
        for r in &table {
            days_per_txn
                .entry(r.transaction_id)
                .or_default()
                .insert(r.transaction_date);
        }
        assert!(days_per_txn.values().all(|days| days.len() == 1));

        let per_day_sum: usize = daily_series(&table).iter().map(|p| p.transactions).sum();
        assert_eq!(per_day_sum, kpi_summary(&table).total_transactions);
    }

    /// Filtering then aggregating matches aggregating a hand-picked subset.
    #[test]
    fn test_filter_then_aggregate_consistency() {
        let table = sample_table();
        let stores: HashSet<String> = ["Astoria", "Hell's Kitchen"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let start = NaiveDate::from_ymd_opt(2023, 5, 1).expect("date");
        let end = NaiveDate::from_ymd_opt(2023, 5, 2).expect("date");

        let kept = filter::apply(&table, start, end, &stores);
        assert_eq!(kept.len(), 5);

        let kpis = kpi_summary(&kept);
        // Rows 1 (two line items), 2, and 4 (two line items).
        assert_eq!(kpis.total_transactions, 3);
        assert!(close(kpis.total_revenue, 6.0 + 3.25 + 4.5 + 3.0 + 3.5));
        assert_eq!(kpis.total_items, 7);
    }
}
