use {
    chrono::NaiveDate,
    serde::Deserialize,
    std::{fs::File, path::Path},
};

/// Column headers the source CSV must carry.
pub const REQUIRED_COLUMNS: [&str; 8] = [
    "transaction_id",
    "transaction_date",
    "transaction_time",
    "transaction_qty",
    "unit_price",
    "store_location",
    "product_category",
    "product_type",
];

/// One line-item sale from the point-of-sale log.
///
/// A single purchase may span several rows sharing a transaction_id, so
/// transaction counts are taken over distinct ids, never over rows.
/// total_price is always derived from qty and unit price at load time.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub transaction_id: u64,
    pub transaction_date: NaiveDate,
    /// Raw time-of-day text; only the leading two characters (hour) are used.
    pub transaction_time: String,
    pub transaction_qty: u32,
    pub unit_price: f64,
    pub store_location: String,
    pub product_category: String,
    pub product_type: String,
    pub total_price: f64,
}

/// Shape of a source row before normalization. Extra columns are ignored,
/// including any precomputed total column the export might carry.
#[derive(Debug, Deserialize)]
struct RawRecord {
    transaction_id: u64,
    transaction_date: String,
    transaction_time: String,
    transaction_qty: u32,
    unit_price: f64,
    store_location: String,
    product_category: String,
    product_type: String,
}

#[derive(Debug)]
pub enum LoadError {
    Io(std::io::Error),
    Csv(csv::Error),
    MissingColumn(String),
    InvalidDate { line: u64, value: String },
}

impl From<std::io::Error> for LoadError {
    fn from(err: std::io::Error) -> Self {
        LoadError::Io(err)
    }
}

impl From<csv::Error> for LoadError {
    fn from(err: csv::Error) -> Self {
        LoadError::Csv(err)
    }
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::Io(e) => write!(f, "IO error: {}", e),
            LoadError::Csv(e) => write!(f, "CSV error: {}", e),
            LoadError::MissingColumn(col) => write!(f, "Missing required column: {}", col),
            LoadError::InvalidDate { line, value } => {
                write!(f, "Invalid transaction_date '{}' on line {}", value, line)
            }
        }
    }
}

impl std::error::Error for LoadError {}

/// Load the full transaction table from a CSV export.
///
/// The header row is validated against REQUIRED_COLUMNS before any record is
/// read, so a renamed column fails with the column name rather than a row
/// error deep in the file. A well-formed file with zero data rows loads as an
/// empty table, which callers treat as a terminal state.
pub fn load(path: &Path) -> Result<Vec<Transaction>, LoadError> {
    let file = File::open(path)?;
    let mut reader = csv::Reader::from_reader(file);

    let headers = reader.headers()?.clone();
    for required in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == required) {
            return Err(LoadError::MissingColumn(required.to_string()));
        }
    }

    let mut table = Vec::new();
    for record in reader.records() {
        let record = record?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let raw: RawRecord = record.deserialize(Some(&headers))?;
        table.push(normalize(raw, line)?);
    }

    Ok(table)
}

fn normalize(raw: RawRecord, line: u64) -> Result<Transaction, LoadError> {
    let transaction_date = parse_date(&raw.transaction_date).ok_or(LoadError::InvalidDate {
        line,
        value: raw.transaction_date.clone(),
    })?;

    let total_price = raw.transaction_qty as f64 * raw.unit_price;

    Ok(Transaction {
        transaction_id: raw.transaction_id,
        transaction_date,
        transaction_time: raw.transaction_time,
        transaction_qty: raw.transaction_qty,
        unit_price: raw.unit_price,
        store_location: raw.store_location,
        product_category: raw.product_category,
        product_type: raw.product_type,
        total_price,
    })
}

/// Parse a calendar date in either ISO form or the m/d/Y form the original
/// export uses.
fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(value, "%m/%d/%Y"))
        .ok()
}
