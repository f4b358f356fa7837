//! Currency formatting and order total derivations.
//!
//! Every price shown on screen goes through [`CurrencyFormat::format`].
//! Formatted strings are derived from raw amounts when data is loaded and
//! are never taken from the server.

use crate::state::Extra;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Localized currency formatting rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrencyFormat {
    /// Currency symbol placed before the amount.
    pub symbol: String,
    /// Separator between units and cents.
    pub decimal_separator: char,
    /// Separator between groups of three digits.
    pub thousands_separator: char,
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self::brl()
    }
}

impl CurrencyFormat {
    /// Brazilian real, as used by the GoRestaurant API (`R$ 1.234,50`).
    pub fn brl() -> Self {
        Self {
            symbol: "R$".to_string(),
            decimal_separator: ',',
            thousands_separator: '.',
        }
    }

    /// Format an amount, rounded half away from zero to cents.
    pub fn format(&self, amount: Decimal) -> String {
        let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        let negative = rounded.is_sign_negative() && !rounded.is_zero();

        let digits = format!("{:.2}", rounded.abs());
        let (units, cents) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

        let mut grouped = String::with_capacity(units.len() + units.len() / 3);
        for (i, c) in units.chars().enumerate() {
            if i > 0 && (units.len() - i) % 3 == 0 {
                grouped.push(self.thousands_separator);
            }
            grouped.push(c);
        }

        format!(
            "{}{} {}{}{}",
            if negative { "-" } else { "" },
            self.symbol,
            grouped,
            self.decimal_separator,
            cents
        )
    }

    /// Read back a string produced by [`CurrencyFormat::format`].
    pub fn parse(&self, text: &str) -> Option<Decimal> {
        let text = text.trim();
        let (negative, text) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text),
        };

        let number: String = text
            .strip_prefix(self.symbol.as_str())?
            .trim()
            .chars()
            .filter(|c| *c != self.thousands_separator)
            .map(|c| if c == self.decimal_separator { '.' } else { c })
            .collect();

        let value = Decimal::from_str(&number).ok()?;
        Some(if negative { -value } else { value })
    }
}

/// Format an amount with the default (BRL) rules.
pub fn format_value(amount: Decimal) -> String {
    CurrencyFormat::default().format(amount)
}

/// Parse an amount formatted with the default (BRL) rules.
pub fn parse_value(text: &str) -> Option<Decimal> {
    CurrencyFormat::default().parse(text)
}

/// Sum of `value * quantity` over all extras.
pub fn extras_total(extras: &[Extra]) -> Decimal {
    extras
        .iter()
        .map(|extra| extra.value * Decimal::from(extra.quantity))
        .sum()
}

/// All-inclusive cost of an order line: `(price + extras) * quantity`.
pub fn line_total(price: Decimal, quantity: u32, extras: &[Extra]) -> Decimal {
    (price + extras_total(extras)) * Decimal::from(quantity)
}
