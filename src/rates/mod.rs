//! Exchange-rate system
//!
//! # Components
//!
//! - **table**: in-memory rate table seeded with the known currency list
//! - **fetcher**: single HTTP GET + JSON decode of fresh rates
//! - **refresh**: hourly background loop pushing fetched rates into the table
//!
//! # Example
//!
//! ```rust
//! use fxcalc::rates::RateTable;
//! use std::collections::HashMap;
//!
//! let mut table = RateTable::seeded();
//! table.apply_fetched_rates(&HashMap::from([("JPY".to_string(), 4.3)]));
//! assert_eq!(table.lookup("JPY"), Some(4.3));
//! ```

pub mod fetcher;
pub mod refresh;
pub mod table;

pub use fetcher::RateFetcher;
pub use refresh::{spawn_refresh, RefreshHandle, REFRESH_PERIOD};
pub use table::{CurrencyEntry, RateTable, SharedRateTable};
