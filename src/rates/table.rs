//! In-memory exchange-rate table
//!
//! A small fixed list of currencies seeded at startup. Fetched rates are
//! written over the seed values in place; the table never grows or shrinks
//! after seeding, so a payload mentioning an unseeded code is simply ignored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Shared handle to the rate table
///
/// The display path reads through this without coordination while the
/// background refresh task writes into it.
pub type SharedRateTable = Arc<RwLock<RateTable>>;

/// One currency row: display name, ISO-4217 code, rate against the base
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrencyEntry {
    pub name: String,
    pub code: String,
    /// Rate relative to the base currency; 0.0 until first fetched
    pub rate: f64,
}

impl CurrencyEntry {
    /// Create a new entry
    pub fn new(name: &str, code: &str, rate: f64) -> Self {
        Self {
            name: name.to_string(),
            code: code.to_string(),
            rate,
        }
    }

    /// True once a real rate has been fetched for this entry
    pub fn is_fetched(&self) -> bool {
        self.rate > 0.0
    }
}

// Entries are identified by code alone; name and rate may differ transiently
// while an update is being applied
impl PartialEq for CurrencyEntry {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code
    }
}

/// Ordered table of currency entries with unique codes
#[derive(Debug, Clone)]
pub struct RateTable {
    entries: Vec<CurrencyEntry>,
    base: String,
    last_updated: Option<DateTime<Utc>>,
}

impl RateTable {
    /// Default seed: TWD as the base at 1.0, everything else unfetched
    pub fn seeded() -> Self {
        Self::with_entries(
            "TWD",
            vec![
                CurrencyEntry::new("New Taiwan Dollar", "TWD", 1.0),
                CurrencyEntry::new("Japanese Yen", "JPY", 0.0),
                CurrencyEntry::new("US Dollar", "USD", 0.0),
                CurrencyEntry::new("Euro", "EUR", 0.0),
                CurrencyEntry::new("South Korean Won", "KRW", 0.0),
                CurrencyEntry::new("Chinese Yuan", "CNY", 0.0),
            ],
        )
    }

    /// Build a table from an explicit seed list
    pub fn with_entries(base: &str, entries: Vec<CurrencyEntry>) -> Self {
        debug_assert!(
            entries.iter().any(|e| e.code == base),
            "base currency must be seeded"
        );
        Self {
            entries,
            base: base.to_string(),
            last_updated: None,
        }
    }

    /// Wrap the table for sharing between the display path and a refresh task
    pub fn into_shared(self) -> SharedRateTable {
        Arc::new(RwLock::new(self))
    }

    /// Code of the base currency (rate 1.0 in a fetched payload)
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Look up the rate for a code
    pub fn lookup(&self, code: &str) -> Option<f64> {
        self.entry(code).map(|e| e.rate)
    }

    /// Look up the full entry for a code
    pub fn entry(&self, code: &str) -> Option<&CurrencyEntry> {
        self.entries.iter().find(|e| e.code == code)
    }

    /// All entries, in seed order
    pub fn entries(&self) -> &[CurrencyEntry] {
        &self.entries
    }

    /// When rates were last successfully applied
    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.last_updated
    }

    /// Overwrite rates for every entry whose code appears in `rates`
    ///
    /// Payload codes that are not seeded are dropped, and seeded codes absent
    /// from the payload keep their previous rate.
    pub fn apply_fetched_rates(&mut self, rates: &HashMap<String, f64>) {
        for entry in &mut self.entries {
            if let Some(rate) = rates.get(&entry.code) {
                entry.rate = *rate;
            }
        }
        self.last_updated = Some(Utc::now());
    }
}

impl Default for RateTable {
    fn default() -> Self {
        Self::seeded()
    }
}
