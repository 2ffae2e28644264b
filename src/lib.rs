//! # fxcalc
//!
//! Core of a mobile currency-converter calculator: a numeric keypad drives
//! four-function arithmetic and currency conversion over exchange rates
//! fetched hourly from a public API.
//!
//! The crate is UI-free. A presentation layer forwards key taps through
//! [`session::ConverterSession`], re-reads the two display strings after each
//! tap, and renders the currency list for its picker; the background refresh
//! task keeps the shared rate table current.
//!
//! ## Example
//!
//! ```rust
//! use fxcalc::prelude::*;
//!
//! let mut session = ConverterSession::new();
//! session.press(Key::Digit(5));
//! session.press(Key::Op(Operator::Add));
//! session.press(Key::Digit(3));
//! session.press(Key::Equals);
//! assert_eq!(session.display_entry(), "8.00");
//! ```

pub mod convert;
pub mod error;
pub mod keypad;
pub mod rates;
pub mod session;

pub mod prelude {
    //! Commonly used types
    pub use crate::convert::convert;
    pub use crate::error::{FxcalcError, Result};
    pub use crate::keypad::{Key, Keypad, Operator};
    pub use crate::rates::{CurrencyEntry, RateFetcher, RateTable};
    pub use crate::session::{ConversionSelection, ConverterSession};
}
