use {
    crate::aggregate::{
        self, CategoryShare, DailyPoint, HourlyPoint, KpiSummary, ProductMetrics, StoreMetrics,
        WeekdayPoint, TOP_PRODUCTS,
    },
    crate::dataset::Transaction,
    crate::filter,
    chrono::NaiveDate,
    std::collections::{BTreeSet, HashSet},
};

/// Dashboard views, one per rendered panel. Recomputed wholesale from the
/// filtered subset on every selection change.
pub struct DashboardViews {
    pub kpis: KpiSummary,
    pub daily: Vec<DailyPoint>,
    pub top_products: Vec<ProductMetrics>,
    pub categories: Vec<CategoryShare>,
    pub stores: Vec<StoreMetrics>,
    pub hourly: Vec<HourlyPoint>,
    pub weekdays: Vec<WeekdayPoint>,
}

impl DashboardViews {
    fn compute(rows: &[Transaction]) -> Self {
        let products = aggregate::product_metrics(rows);
        Self {
            kpis: aggregate::kpi_summary(rows),
            daily: aggregate::daily_series(rows),
            top_products: aggregate::top_products(&products, TOP_PRODUCTS),
            categories: aggregate::category_shares(&products),
            stores: aggregate::store_metrics(rows),
            hourly: aggregate::hourly_averages(rows),
            weekdays: aggregate::weekday_averages(rows),
        }
    }
}

/// The user's current filter selection.
pub struct Selection {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub stores: HashSet<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Overview,
    Products,
    Stores,
    Patterns,
    Data,
}

impl Tab {
    pub const ALL: [Tab; 5] = [
        Tab::Overview,
        Tab::Products,
        Tab::Stores,
        Tab::Patterns,
        Tab::Data,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Tab::Overview => "Overview",
            Tab::Products => "Products",
            Tab::Stores => "Stores",
            Tab::Patterns => "Patterns",
            Tab::Data => "Data",
        }
    }

    pub fn index(self) -> usize {
        Tab::ALL.iter().position(|t| *t == self).unwrap_or(0)
    }

    fn next(self) -> Tab {
        Tab::ALL[(self.index() + 1) % Tab::ALL.len()]
    }

    fn prev(self) -> Tab {
        Tab::ALL[(self.index() + Tab::ALL.len() - 1) % Tab::ALL.len()]
    }
}

/// Which end of the date range the arrow keys adjust.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateField {
    Start,
    End,
}

/// In-memory dashboard state.
///
/// The loaded table is immutable for the session; everything else is a pure
/// derivation refreshed after each selection change, before the next key
/// event is read.
pub struct App {
    table: Vec<Transaction>,
    pub min_date: NaiveDate,
    pub max_date: NaiveDate,
    /// Distinct store names, ascending; index positions drive the 1-9 keys.
    pub store_names: Vec<String>,
    pub selection: Selection,
    pub filtered: Vec<Transaction>,
    /// None when the current selection matches no rows.
    pub views: Option<DashboardViews>,
    pub tab: Tab,
    pub focused_date: DateField,
    pub table_offset: usize,
    pub should_quit: bool,
}

impl App {
    /// Build the dashboard over a non-empty loaded table. The default
    /// selection is the full observed date span with every store selected.
    pub fn new(table: Vec<Transaction>) -> Self {
        let min_date = table
            .iter()
            .map(|r| r.transaction_date)
            .min()
            .unwrap_or_default();
        let max_date = table
            .iter()
            .map(|r| r.transaction_date)
            .max()
            .unwrap_or_default();

        let store_names: Vec<String> = table
            .iter()
            .map(|r| r.store_location.clone())
            .collect::<BTreeSet<String>>()
            .into_iter()
            .collect();

        let selection = Selection {
            start: min_date,
            end: max_date,
            stores: store_names.iter().cloned().collect(),
        };

        let mut app = Self {
            table,
            min_date,
            max_date,
            store_names,
            selection,
            filtered: Vec::new(),
            views: None,
            tab: Tab::Overview,
            focused_date: DateField::Start,
            table_offset: 0,
            should_quit: false,
        };
        app.refresh();
        app
    }

    /// Recompute the filtered subset and every derived view from the current
    /// selection. An empty subset clears the views; the presenter renders the
    /// no-data notice instead.
    pub fn refresh(&mut self) {
        self.filtered = filter::apply(
            &self.table,
            self.selection.start,
            self.selection.end,
            &self.selection.stores,
        );
        self.views = if self.filtered.is_empty() {
            None
        } else {
            Some(DashboardViews::compute(&self.filtered))
        };
        self.table_offset = self.table_offset.min(self.filtered.len().saturating_sub(1));
    }

    pub fn total_rows(&self) -> usize {
        self.table.len()
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn next_tab(&mut self) {
        self.tab = self.tab.next();
    }

    pub fn prev_tab(&mut self) {
        self.tab = self.tab.prev();
    }

    pub fn focus_date(&mut self, field: DateField) {
        self.focused_date = field;
    }

    /// Move the focused end of the date range by one day, clamped to the
    /// observed data bounds. An inverted range is allowed; it simply selects
    /// nothing.
    pub fn nudge_focused_date(&mut self, forward: bool) {
        let current = match self.focused_date {
            DateField::Start => self.selection.start,
            DateField::End => self.selection.end,
        };
        let moved = if forward {
            current.succ_opt().unwrap_or(current)
        } else {
            current.pred_opt().unwrap_or(current)
        };
        let clamped = moved.clamp(self.min_date, self.max_date);

        match self.focused_date {
            DateField::Start => self.selection.start = clamped,
            DateField::End => self.selection.end = clamped,
        }
        self.refresh();
    }

    /// Toggle the store at the given index in the sorted store list.
    pub fn toggle_store(&mut self, index: usize) {
        if let Some(name) = self.store_names.get(index) {
            if !self.selection.stores.remove(name) {
                self.selection.stores.insert(name.clone());
            }
            self.refresh();
        }
    }

    pub fn select_all_stores(&mut self) {
        self.selection.stores = self.store_names.iter().cloned().collect();
        self.refresh();
    }

    pub fn clear_stores(&mut self) {
        self.selection.stores.clear();
        self.refresh();
    }

    /// Back to the defaults: full observed span, every store.
    pub fn reset_selection(&mut self) {
        self.selection.start = self.min_date;
        self.selection.end = self.max_date;
        self.select_all_stores();
    }

    /// Scroll the raw-data table, clamped to the filtered row count.
    pub fn scroll_table(&mut self, delta: isize) {
        let max = self.filtered.len().saturating_sub(1);
        let next = self.table_offset as isize + delta;
        self.table_offset = next.clamp(0, max as isize) as usize;
    }
}
