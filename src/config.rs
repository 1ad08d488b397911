use std::env;

/// Default dataset path, matching the published point-of-sale CSV export.
pub const DEFAULT_DATA_PATH: &str = "Coffee Shop Sales.csv";

/// Configuration loaded from environment variables
pub struct Config {
    pub data_path: String,
    pub rust_log: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// The dataset path is fixed per deployment, not user-supplied at runtime.
    /// Set DATA_PATH (directly or via a .env file) to point at a different
    /// CSV export.
    pub fn from_env() -> Self {
        let data_path = env::var("DATA_PATH").unwrap_or_else(|_| DEFAULT_DATA_PATH.to_string());

        let rust_log = env::var("RUST_LOG").ok();

        Self {
            data_path,
            rust_log,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::DEFAULT_DATA_PATH;

    #[test]
    fn default_path_is_the_csv_export() {
        assert!(DEFAULT_DATA_PATH.ends_with(".csv"));
    }
}
