use {
    crate::dataset::Transaction,
    chrono::NaiveDate,
    std::collections::HashSet,
};

/// Narrow the table to the rows inside the inclusive date range whose store
/// is in the selected set.
///
/// Both edge policies are deliberate: an empty store set means "nothing
/// selected", not "no filter", and an inverted range selects nothing. The
/// input table is never mutated; the result is a fresh copy.
pub fn apply(
    table: &[Transaction],
    start: NaiveDate,
    end: NaiveDate,
    stores: &HashSet<String>,
) -> Vec<Transaction> {
    if stores.is_empty() || start > end {
        return Vec::new();
    }

    table
        .iter()
        .filter(|row| row.transaction_date >= start && row.transaction_date <= end)
        .filter(|row| stores.contains(&row.store_location))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: u64, date: (i32, u32, u32), store: &str) -> Transaction {
        Transaction {
            transaction_id: id,
            transaction_date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).expect("date"),
            transaction_time: "09:00:00".to_string(),
            transaction_qty: 1,
            unit_price: 3.0,
            store_location: store.to_string(),
            product_category: "Coffee".to_string(),
            product_type: "Latte".to_string(),
            total_price: 3.0,
        }
    }

    fn stores(names: &[&str]) -> HashSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("date")
    }

    #[test]
    fn range_is_inclusive_on_both_ends() {
        let table = vec![
            row(1, (2023, 1, 1), "A"),
            row(2, (2023, 1, 2), "A"),
            row(3, (2023, 1, 3), "A"),
            row(4, (2023, 1, 4), "A"),
        ];

        let kept = apply(&table, date(2023, 1, 2), date(2023, 1, 3), &stores(&["A"]));
        let ids: Vec<u64> = kept.iter().map(|r| r.transaction_id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn store_membership_is_enforced() {
        let table = vec![row(1, (2023, 1, 1), "A"), row(2, (2023, 1, 1), "B")];

        let kept = apply(&table, date(2023, 1, 1), date(2023, 1, 1), &stores(&["B"]));
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].store_location, "B");
    }

    #[test]
    fn empty_store_set_selects_nothing() {
        let table = vec![row(1, (2023, 1, 1), "A")];
        let kept = apply(&table, date(2020, 1, 1), date(2030, 1, 1), &HashSet::new());
        assert!(kept.is_empty());
    }

    #[test]
    fn inverted_range_selects_nothing() {
        let table = vec![row(1, (2023, 1, 1), "A")];
        let kept = apply(&table, date(2023, 1, 2), date(2023, 1, 1), &stores(&["A"]));
        assert!(kept.is_empty());
    }

    #[test]
    fn apply_is_idempotent() {
        let table = vec![
            row(1, (2023, 1, 1), "A"),
            row(2, (2023, 1, 5), "B"),
            row(3, (2023, 1, 9), "A"),
        ];
        let selected = stores(&["A"]);

        let once = apply(&table, date(2023, 1, 1), date(2023, 1, 7), &selected);
        let twice = apply(&once, date(2023, 1, 1), date(2023, 1, 7), &selected);
        assert_eq!(once, twice);
    }

    #[test]
    fn input_table_is_untouched() {
        let table = vec![row(1, (2023, 1, 1), "A"), row(2, (2023, 1, 2), "B")];
        let before = table.clone();

        let _ = apply(&table, date(2023, 1, 1), date(2023, 1, 1), &stores(&["A"]));
        assert_eq!(table, before);
    }
}
