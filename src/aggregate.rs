use {
    crate::dataset::Transaction,
    chrono::Datelike,
    indexmap::IndexMap,
    std::collections::{BTreeMap, HashSet},
};

/// Fixed weekday presentation order for the day-of-week view.
pub const DAY_ORDER: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Number of product rows the ranking view keeps.
pub const TOP_PRODUCTS: usize = 10;

/// Top-level metrics over the filtered table.
///
/// avg_transaction_value is the mean of per-row total_price, not revenue
/// divided by the distinct transaction count. The two differ whenever
/// line-item counts vary per transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct KpiSummary {
    pub total_revenue: f64,
    pub total_transactions: usize,
    pub avg_transaction_value: f64,
    pub total_items: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DailyPoint {
    pub date: chrono::NaiveDate,
    pub revenue: f64,
    pub transactions: usize,
    pub items: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductMetrics {
    pub category: String,
    pub product_type: String,
    pub revenue: f64,
    /// Line-item rows in the group, not distinct transactions.
    pub line_items: usize,
    pub items: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryShare {
    pub category: String,
    pub revenue: f64,
    /// Fraction of the filtered table's revenue, in [0, 1].
    pub share: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StoreMetrics {
    pub store: String,
    pub revenue: f64,
    pub transactions: usize,
    pub items: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HourlyPoint {
    /// Two-character lexical prefix of transaction_time; shorter raw values
    /// propagate whatever prefix exists.
    pub hour: String,
    pub avg_revenue: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeekdayPoint {
    pub day: &'static str,
    /// None when the day has no rows in range; rendered as absent, not zero.
    pub avg_revenue: Option<f64>,
}

/// Compute the four headline KPIs.
///
/// The dashboard never calls this on an empty table (the empty-selection
/// notice short-circuits first); the empty guard only avoids a zero division.
pub fn kpi_summary(rows: &[Transaction]) -> KpiSummary {
    let total_revenue: f64 = rows.iter().map(|r| r.total_price).sum();
    let distinct: HashSet<u64> = rows.iter().map(|r| r.transaction_id).collect();
    let total_items: u64 = rows.iter().map(|r| r.transaction_qty as u64).sum();
    let avg_transaction_value = if rows.is_empty() {
        0.0
    } else {
        total_revenue / rows.len() as f64
    };

    KpiSummary {
        total_revenue,
        total_transactions: distinct.len(),
        avg_transaction_value,
        total_items,
    }
}

#[derive(Default)]
struct GroupAccum {
    revenue: f64,
    transactions: HashSet<u64>,
    items: u64,
}

impl GroupAccum {
    fn add(&mut self, row: &Transaction) {
        self.revenue += row.total_price;
        self.transactions.insert(row.transaction_id);
        self.items += row.transaction_qty as u64;
    }
}

/// Revenue, distinct transactions, and items sold per calendar day,
/// ascending by date.
pub fn daily_series(rows: &[Transaction]) -> Vec<DailyPoint> {
    let mut groups: BTreeMap<chrono::NaiveDate, GroupAccum> = BTreeMap::new();
    for row in rows {
        groups.entry(row.transaction_date).or_default().add(row);
    }

    groups
        .into_iter()
        .map(|(date, acc)| DailyPoint {
            date,
            revenue: acc.revenue,
            transactions: acc.transactions.len(),
            items: acc.items,
        })
        .collect()
}

#[derive(Default)]
struct ProductAccum {
    revenue: f64,
    line_items: usize,
    items: u64,
}

/// Revenue, row count, and items sold per (category, product type) group,
/// in first-encounter order. Encounter order is what breaks revenue ties in
/// the ranking view, so it is preserved here rather than re-sorted.
pub fn product_metrics(rows: &[Transaction]) -> Vec<ProductMetrics> {
    let mut groups: IndexMap<(String, String), ProductAccum> = IndexMap::new();
    for row in rows {
        let key = (row.product_category.clone(), row.product_type.clone());
        let acc = groups.entry(key).or_default();
        acc.revenue += row.total_price;
        acc.line_items += 1;
        acc.items += row.transaction_qty as u64;
    }

    groups
        .into_iter()
        .map(|((category, product_type), acc)| ProductMetrics {
            category,
            product_type,
            revenue: acc.revenue,
            line_items: acc.line_items,
            items: acc.items,
        })
        .collect()
}

/// The n highest-revenue product groups, descending by revenue. The sort is
/// stable, so equal-revenue groups keep their encounter order.
pub fn top_products(products: &[ProductMetrics], n: usize) -> Vec<ProductMetrics> {
    let mut ranked = products.to_vec();
    ranked.sort_by(|a, b| {
        b.revenue
            .partial_cmp(&a.revenue)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    ranked.truncate(n);
    ranked
}

/// Fold product groups into per-category revenue and share-of-total,
/// descending by revenue. Lives here so the category-mix chart needs no
/// aggregation on the presentation side.
pub fn category_shares(products: &[ProductMetrics]) -> Vec<CategoryShare> {
    let mut groups: IndexMap<String, f64> = IndexMap::new();
    for product in products {
        *groups.entry(product.category.clone()).or_default() += product.revenue;
    }

    let total: f64 = groups.values().sum();
    let mut shares: Vec<CategoryShare> = groups
        .into_iter()
        .map(|(category, revenue)| CategoryShare {
            category,
            revenue,
            share: if total > 0.0 { revenue / total } else { 0.0 },
        })
        .collect();

    shares.sort_by(|a, b| {
        b.revenue
            .partial_cmp(&a.revenue)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    shares
}

/// Revenue, distinct transactions, and items sold per store, ascending by
/// store name.
pub fn store_metrics(rows: &[Transaction]) -> Vec<StoreMetrics> {
    let mut groups: BTreeMap<String, GroupAccum> = BTreeMap::new();
    for row in rows {
        groups
            .entry(row.store_location.clone())
            .or_default()
            .add(row);
    }

    groups
        .into_iter()
        .map(|(store, acc)| StoreMetrics {
            store,
            revenue: acc.revenue,
            transactions: acc.transactions.len(),
            items: acc.items,
        })
        .collect()
}

/// The hour key is a lexical two-character prefix, not a parsed time. A raw
/// value shorter than two characters contributes whatever prefix it has.
pub fn hour_key(time: &str) -> String {
    time.chars().take(2).collect()
}

/// Mean per-row total_price grouped by hour key, ascending by the key as a
/// string.
pub fn hourly_averages(rows: &[Transaction]) -> Vec<HourlyPoint> {
    let mut groups: BTreeMap<String, (f64, usize)> = BTreeMap::new();
    for row in rows {
        let entry = groups.entry(hour_key(&row.transaction_time)).or_default();
        entry.0 += row.total_price;
        entry.1 += 1;
    }

    groups
        .into_iter()
        .map(|(hour, (sum, count))| HourlyPoint {
            hour,
            avg_revenue: sum / count as f64,
        })
        .collect()
}

/// Mean per-row total_price per weekday, reindexed onto Monday..Sunday.
/// Always exactly 7 rows; a day with no rows in range carries None.
pub fn weekday_averages(rows: &[Transaction]) -> Vec<WeekdayPoint> {
    let mut sums = [0.0f64; 7];
    let mut counts = [0usize; 7];
    for row in rows {
        let idx = row.transaction_date.weekday().num_days_from_monday() as usize;
        sums[idx] += row.total_price;
        counts[idx] += 1;
    }

    DAY_ORDER
        .into_iter()
        .enumerate()
        .map(|(idx, day)| WeekdayPoint {
            day,
            avg_revenue: if counts[idx] > 0 {
                Some(sums[idx] / counts[idx] as f64)
            } else {
                None
            },
        })
        .collect()
}
