//! Integration tests for the load -> filter -> aggregate flow
//!
//! Tests drive the crate the way the dashboard does: load a CSV export,
//! build the app state, and push selection changes through it, verifying
//! the derived views stay consistent at each step.

#[cfg(test)]
mod dashboard_integration_tests {
    use brewflow::dataset;
    use brewflow::state::{App, DateField};
    use chrono::NaiveDate;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str = "transaction_id,transaction_date,transaction_time,transaction_qty,unit_price,store_location,product_category,product_type";

    fn write_csv(lines: &[&str]) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("temp file");
        for line in lines {
            writeln!(file, "{}", line).expect("write csv line");
        }
        file
    }

    fn sample_file() -> NamedTempFile {
        write_csv(&[
            HEADER,
            "1,2023-06-01,07:30:00,2,3.00,Astoria,Coffee,Latte",
            "1,2023-06-01,07:30:00,1,3.25,Astoria,Bakery,Croissant",
            "2,2023-06-01,09:15:00,1,4.50,Hell's Kitchen,Coffee,Mocha",
            "3,2023-06-02,10:05:00,2,2.50,Astoria,Tea,Chai",
            "4,2023-06-03,16:45:00,1,5.00,Hell's Kitchen,Tea,Matcha",
        ])
    }

    #[test]
    fn test_csv_to_dashboard_flow() {
        let file = sample_file();
        let table = dataset::load(file.path()).expect("load");
        assert_eq!(table.len(), 5);

        let app = App::new(table);

        // Defaults: full observed span, every store selected.
        assert_eq!(
            app.selection.start,
            NaiveDate::from_ymd_opt(2023, 6, 1).expect("date")
        );
        assert_eq!(
            app.selection.end,
            NaiveDate::from_ymd_opt(2023, 6, 3).expect("date")
        );
        assert_eq!(app.store_names, vec!["Astoria", "Hell's Kitchen"]);

        let views = app.views.as_ref().expect("views");
        assert_eq!(views.kpis.total_transactions, 4);
        assert!((views.kpis.total_revenue - 23.75).abs() < 1e-9);
        assert_eq!(views.kpis.total_items, 7);
        assert_eq!(views.daily.len(), 3);
        assert_eq!(views.weekdays.len(), 7);
    }

    #[test]
    fn test_selection_changes_recompute_views() {
        let file = sample_file();
        let table = dataset::load(file.path()).expect("load");
        let mut app = App::new(table);

        // Narrow to the first day.
        app.focus_date(DateField::End);
        app.nudge_focused_date(false);
        app.nudge_focused_date(false);
        assert_eq!(
            app.selection.end,
            NaiveDate::from_ymd_opt(2023, 6, 1).expect("date")
        );

        let views = app.views.as_ref().expect("views");
        assert_eq!(views.daily.len(), 1);
        assert_eq!(views.kpis.total_transactions, 2);
        assert!((views.kpis.total_revenue - 13.75).abs() < 1e-9);

        // Drop the only store with traffic that day one by one.
        app.toggle_store(0); // Astoria off
        let views = app.views.as_ref().expect("views");
        assert_eq!(views.kpis.total_transactions, 1);

        app.toggle_store(1); // Hell's Kitchen off -> nothing selected
        assert!(app.views.is_none());
        assert!(app.filtered.is_empty());

        // Reset brings the full dashboard back.
        app.reset_selection();
        let views = app.views.as_ref().expect("views");
        assert_eq!(views.kpis.total_transactions, 4);
    }

    #[test]
    fn test_top_products_ranking_through_the_pipeline() {
        let file = sample_file();
        let table = dataset::load(file.path()).expect("load");
        let app = App::new(table);

        let views = app.views.as_ref().expect("views");
        assert!(views.top_products.len() <= 10);
        assert_eq!(views.top_products[0].product_type, "Latte");
        assert!((views.top_products[0].revenue - 6.0).abs() < 1e-9);
        for pair in views.top_products.windows(2) {
            assert!(pair[0].revenue >= pair[1].revenue);
        }
    }

    #[test]
    fn test_header_only_file_loads_empty() {
        let file = write_csv(&[HEADER]);
        let table = dataset::load(file.path()).expect("load");
        assert!(table.is_empty());
    }

    #[test]
    fn test_malformed_file_fails_loud() {
        let file = write_csv(&[
            HEADER,
            "1,2023-06-01,07:30:00,two,3.00,Astoria,Coffee,Latte",
        ]);
        assert!(dataset::load(file.path()).is_err());
    }
}
