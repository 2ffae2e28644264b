//! Keypad state machine
//!
//! The calculator engine: consumes single key presses and maintains the
//! current text entry plus at most one pending binary operation. Every key
//! that cannot legally apply in the current state is a silent no-op; the
//! machine never enters an error state.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Binary operator selected on the keypad
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    /// Apply the operator to a stored left-hand value and the current entry
    pub fn apply(&self, lhs: f64, rhs: f64) -> f64 {
        match self {
            Operator::Add => lhs + rhs,
            Operator::Subtract => lhs - rhs,
            Operator::Multiply => lhs * rhs,
            Operator::Divide => lhs / rhs,
        }
    }

    /// Get the keypad caption for this operator
    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Subtract => "\u{2212}",
            Operator::Multiply => "\u{00d7}",
            Operator::Divide => "\u{00f7}",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A single keypad key press
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Key {
    /// Digit key 0-9
    Digit(u8),
    /// Decimal point
    Point,
    /// Clear key; resets entry and any pending operation
    Clear,
    /// Sign toggle (+/-)
    ToggleSign,
    /// Percent: divides the entry by 100
    Percent,
    /// One of the four binary operators
    Op(Operator),
    /// Equals: resolves the pending operation
    Equals,
    /// Decorative filler key; always ignored
    Spacer,
}

impl Key {
    /// Parse a key from its button caption
    ///
    /// Accepts the calculator's captions ("AC", "+/-", "%", "÷", "×", "−",
    /// "+", "=", ".", "0"-"9", and "" for the decorative spacer) plus ASCII
    /// fallbacks for the operator glyphs. Returns `None` for anything else.
    pub fn from_label(label: &str) -> Option<Key> {
        match label {
            "AC" => Some(Key::Clear),
            "+/-" => Some(Key::ToggleSign),
            "%" => Some(Key::Percent),
            "\u{00f7}" | "/" => Some(Key::Op(Operator::Divide)),
            "\u{00d7}" | "*" => Some(Key::Op(Operator::Multiply)),
            "\u{2212}" | "-" => Some(Key::Op(Operator::Subtract)),
            "+" => Some(Key::Op(Operator::Add)),
            "=" => Some(Key::Equals),
            "." => Some(Key::Point),
            "" => Some(Key::Spacer),
            digit => digit
                .parse::<u8>()
                .ok()
                .filter(|d| *d <= 9 && digit.len() == 1)
                .map(Key::Digit),
        }
    }
}

/// Calculator engine state
///
/// Holds the raw text being typed, and the operator/left-hand value stored
/// between an operator press and equals. Digits append verbatim (leading
/// zeros are kept), at most one decimal point is retained, and equals formats
/// its result to exactly two decimals.
///
/// # Example
/// ```
/// use fxcalc::keypad::{Key, Keypad, Operator};
///
/// let mut pad = Keypad::new();
/// pad.press(Key::Digit(5));
/// pad.press(Key::Op(Operator::Add));
/// pad.press(Key::Digit(3));
/// pad.press(Key::Equals);
/// assert_eq!(pad.display(), "8.00");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Keypad {
    entry: String,
    pending_op: Option<Operator>,
    pending_operand: Option<f64>,
}

impl Keypad {
    /// Create a keypad with an empty entry and no pending operation
    pub fn new() -> Self {
        Self::default()
    }

    /// Current display string: the raw entry, or "0" when nothing is typed
    pub fn display(&self) -> String {
        if self.entry.is_empty() {
            "0".to_string()
        } else {
            self.entry.clone()
        }
    }

    /// Parse the current entry as a number, if it is one
    pub fn value(&self) -> Option<f64> {
        self.entry.parse::<f64>().ok()
    }

    /// Operator stored since the last operator press, if any
    pub fn pending_operator(&self) -> Option<Operator> {
        self.pending_op
    }

    /// Left-hand value stored since the last operator press, if any
    pub fn pending_operand(&self) -> Option<f64> {
        self.pending_operand
    }

    /// Feed one key press through the transition rules
    pub fn press(&mut self, key: Key) {
        match key {
            Key::Clear => {
                self.entry.clear();
                self.pending_op = None;
                self.pending_operand = None;
            }
            Key::Digit(d) => {
                // Out-of-range digit constants are ignored, not clamped
                if d <= 9 {
                    self.entry.push(char::from(b'0' + d));
                }
            }
            Key::Point => {
                if !self.entry.contains('.') {
                    self.entry.push('.');
                }
            }
            Key::ToggleSign => {
                if let Some(v) = self.value() {
                    self.entry = (-v).to_string();
                }
            }
            Key::Percent => {
                if let Some(v) = self.value() {
                    self.entry = (v / 100.0).to_string();
                }
            }
            Key::Op(op) => {
                // Requires a parseable entry; otherwise the press is dropped
                // and any earlier pending operation is kept
                if let Some(v) = self.value() {
                    self.pending_operand = Some(v);
                    self.pending_op = Some(op);
                    self.entry.clear();
                }
            }
            Key::Equals => {
                if let (Some(rhs), Some(lhs), Some(op)) =
                    (self.value(), self.pending_operand, self.pending_op)
                {
                    self.entry = format!("{:.2}", op.apply(lhs, rhs));
                    self.pending_op = None;
                    self.pending_operand = None;
                }
            }
            Key::Spacer => {}
        }
    }
}
