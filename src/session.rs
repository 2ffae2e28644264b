//! Converter session - the boundary consumed by a presentation layer
//!
//! Owns the keypad, the from/to currency selection, and a shared rate table
//! kept fresh by a background refresh task. There is no push notification:
//! the UI forwards key taps and re-reads the display strings after each
//! mutation or fetch completion.

use crate::convert::convert;
use crate::error::{FxcalcError, Result};
use crate::keypad::{Key, Keypad};
use crate::rates::{
    spawn_refresh, CurrencyEntry, RateFetcher, RateTable, RefreshHandle, SharedRateTable,
    REFRESH_PERIOD,
};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;

/// The two currency codes currently selected for conversion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionSelection {
    pub from: String,
    pub to: String,
}

/// A running converter session
///
/// # Example
/// ```
/// use fxcalc::keypad::{Key, Operator};
/// use fxcalc::session::ConverterSession;
///
/// let mut session = ConverterSession::new();
/// session.press(Key::Digit(5));
/// session.press(Key::Op(Operator::Add));
/// session.press(Key::Digit(3));
/// session.press(Key::Equals);
/// assert_eq!(session.display_entry(), "8.00");
/// ```
pub struct ConverterSession {
    keypad: Keypad,
    table: SharedRateTable,
    selection: ConversionSelection,
    refresh: Option<RefreshHandle>,
}

impl ConverterSession {
    /// Create a session over the default seed table, without background
    /// refresh
    pub fn new() -> Self {
        Self::with_table(RateTable::seeded())
    }

    /// Create a session over an explicit table
    ///
    /// The selection defaults to the base currency and the first non-base
    /// entry.
    pub fn with_table(table: RateTable) -> Self {
        let base = table.base().to_string();
        let to = table
            .entries()
            .iter()
            .map(|e| e.code.clone())
            .find(|code| *code != base)
            .unwrap_or_else(|| base.clone());

        Self {
            keypad: Keypad::new(),
            table: table.into_shared(),
            selection: ConversionSelection { from: base, to },
            refresh: None,
        }
    }

    /// Start fetching rates now and then once per hour
    ///
    /// Must be called from within a tokio runtime.
    pub fn start_refresh(&mut self) -> Result<()> {
        let base = self.table.read().unwrap().base().to_string();
        let fetcher = RateFetcher::new(&base)?;
        self.start_refresh_with(fetcher, REFRESH_PERIOD);
        Ok(())
    }

    /// Start a refresh loop with an explicit fetcher and period
    pub fn start_refresh_with(&mut self, fetcher: RateFetcher, period: Duration) {
        self.stop_refresh();
        self.refresh = Some(spawn_refresh(fetcher, Arc::clone(&self.table), period));
    }

    /// Stop the background refresh, if one is running
    pub fn stop_refresh(&mut self) {
        if let Some(handle) = self.refresh.take() {
            handle.cancel();
        }
    }

    /// Forward one key tap to the keypad
    pub fn press(&mut self, key: Key) {
        self.keypad.press(key);
    }

    /// Raw entry display: what the user has typed, or "0"
    pub fn display_entry(&self) -> String {
        self.keypad.display()
    }

    /// Converted amount for the second display row, to 2 decimals
    ///
    /// Converts the currently displayed value through the selection; a
    /// non-numeric entry converts as 0.
    pub fn converted_display(&self) -> String {
        let amount = self.keypad.value().unwrap_or(0.0);
        let table = self.table.read().unwrap();
        format!(
            "{:.2}",
            convert(&table, amount, &self.selection.from, &self.selection.to)
        )
    }

    /// Ordered snapshot of the currency list for a picker
    pub fn currencies(&self) -> Vec<CurrencyEntry> {
        self.table.read().unwrap().entries().to_vec()
    }

    /// The currently selected from/to codes
    pub fn selection(&self) -> &ConversionSelection {
        &self.selection
    }

    /// Select the source currency
    pub fn select_from(&mut self, code: &str) -> Result<()> {
        self.ensure_known(code)?;
        self.selection.from = code.to_string();
        Ok(())
    }

    /// Select the target currency
    pub fn select_to(&mut self, code: &str) -> Result<()> {
        self.ensure_known(code)?;
        self.selection.to = code.to_string();
        Ok(())
    }

    /// Swap the from/to selection
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.selection.from, &mut self.selection.to);
    }

    /// True while a rate fetch is outstanding
    pub fn is_loading(&self) -> bool {
        self.refresh
            .as_ref()
            .map(|handle| handle.is_loading())
            .unwrap_or(false)
    }

    /// When rates were last successfully applied, if ever
    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.table.read().unwrap().last_updated()
    }

    fn ensure_known(&self, code: &str) -> Result<()> {
        if self.table.read().unwrap().lookup(code).is_some() {
            Ok(())
        } else {
            Err(FxcalcError::UnknownCurrency(code.to_string()))
        }
    }
}

impl Default for ConverterSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keypad::Operator;
    use std::collections::HashMap;

    fn session_with_rates() -> ConverterSession {
        let mut table = RateTable::seeded();
        table.apply_fetched_rates(&HashMap::from([
            ("TWD".to_string(), 1.0),
            ("JPY".to_string(), 4.3),
            ("USD".to_string(), 0.031),
        ]));
        ConverterSession::with_table(table)
    }

    #[test]
    fn test_default_selection() {
        let session = ConverterSession::new();
        assert_eq!(session.selection().from, "TWD");
        assert_eq!(session.selection().to, "JPY");
    }

    #[test]
    fn test_converted_display_follows_entry() {
        let mut session = session_with_rates();
        assert_eq!(session.converted_display(), "0.00");

        session.press(Key::Digit(1));
        session.press(Key::Digit(0));
        session.press(Key::Digit(0));
        assert_eq!(session.display_entry(), "100");
        assert_eq!(session.converted_display(), "430.00");
    }

    #[test]
    fn test_converted_display_of_equals_result() {
        let mut session = session_with_rates();
        for key in [
            Key::Digit(5),
            Key::Digit(0),
            Key::Op(Operator::Add),
            Key::Digit(5),
            Key::Digit(0),
            Key::Equals,
        ] {
            session.press(key);
        }
        assert_eq!(session.display_entry(), "100.00");
        assert_eq!(session.converted_display(), "430.00");
    }

    #[test]
    fn test_select_and_swap() {
        let mut session = session_with_rates();
        session.select_from("JPY").unwrap();
        session.select_to("USD").unwrap();
        assert_eq!(session.selection().from, "JPY");
        assert_eq!(session.selection().to, "USD");

        session.swap();
        assert_eq!(session.selection().from, "USD");
        assert_eq!(session.selection().to, "JPY");
    }

    #[test]
    fn test_select_unknown_code_is_rejected() {
        let mut session = session_with_rates();
        let err = session.select_from("XYZ").unwrap_err();
        assert!(matches!(err, FxcalcError::UnknownCurrency(_)));
        // Selection is unchanged
        assert_eq!(session.selection().from, "TWD");
    }

    #[test]
    fn test_not_loading_without_refresh() {
        let session = ConverterSession::new();
        assert!(!session.is_loading());
        assert!(session.last_updated().is_none());
    }

    #[test]
    fn test_currencies_snapshot_is_ordered() {
        let session = ConverterSession::new();
        let codes: Vec<String> = session
            .currencies()
            .into_iter()
            .map(|entry| entry.code)
            .collect();
        assert_eq!(codes, ["TWD", "JPY", "USD", "EUR", "KRW", "CNY"]);
    }
}
